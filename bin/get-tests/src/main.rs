//! ---
//! tc_section: "05-cli"
//! tc_subsection: "binary"
//! tc_type: "source"
//! tc_scope: "code"
//! tc_description: "Command line driver printing subsystem test commands."
//! tc_version: "v0.0.0-prealpha"
//! tc_owner: "tbd"
//! ---
use std::backtrace::Backtrace;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use testcat_catalog::{Catalog, DEFAULT_CATALOG_FILE};
use testcat_logging::{
    self as logging, catalog_error, log_system_event, LogContext, LogFormat, LoggingConfig,
    SystemEventOutcome,
};
use tracing::debug;

mod output;

#[derive(Debug, Parser)]
#[command(
    name = "get-tests",
    version,
    about = "Print the test command for a subsystem from a test catalog",
    long_about = None
)]
struct Cli {
    /// Subsystem to select.
    #[arg(short = 's', long = "subsystem", value_name = "NAME")]
    subsystem: Option<String>,

    /// Catalog to read (defaults to test.yaml next to the executable).
    #[arg(short = 'f', long = "file", value_name = "FILE", env = "GET_TESTS_FILE")]
    file: Option<PathBuf>,

    /// Print the subsystem record instead of its test command.
    #[arg(short = 'i', long = "info", action = ArgAction::SetTrue)]
    info: bool,

    /// Emit debug diagnostics on stderr.
    #[arg(short = 'v', long = "verbose", action = ArgAction::SetTrue)]
    verbose: bool,

    /// Diagnostic log format.
    #[arg(
        long = "log-format",
        value_enum,
        env = "GET_TESTS_LOG_FORMAT",
        default_value_t = LogFormatArg::Compact
    )]
    log_format: LogFormatArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormatArg {
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(value: LogFormatArg) -> Self {
        match value {
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let verbose = cli.verbose;
    panic::set_hook(Box::new(move |info| {
        eprintln!("ERROR: {info}");
        if verbose {
            eprintln!("{}", Backtrace::force_capture());
        }
    }));

    panic::catch_unwind(AssertUnwindSafe(|| run(cli))).unwrap_or(ExitCode::FAILURE)
}

fn run(cli: Cli) -> ExitCode {
    // Checked before anything touches the file system.
    let Some(subsystem) = cli.subsystem.as_deref().filter(|name| !name.is_empty()) else {
        eprintln!("ERROR: Must provide a subsystem to select");
        return ExitCode::FAILURE;
    };

    if cli.verbose {
        std::env::set_var("RUST_LIB_BACKTRACE", "1");
    }
    logging::init(&LoggingConfig {
        verbose: cli.verbose,
        format: cli.log_format.into(),
    });
    install_interrupt_handler();

    let path = match catalog_path(cli.file.clone()) {
        Ok(path) => path,
        Err(err) => {
            eprintln!("ERROR: {err:#}");
            debug!("{err:?}");
            return ExitCode::FAILURE;
        }
    };
    let source = path.display().to_string();
    let context = LogContext::new().with_source(&source);

    let catalog = match Catalog::load(&path) {
        Ok(catalog) => {
            log_system_event(
                Some(&context),
                "catalog.load",
                &format!("loaded {} subsystem(s)", catalog.len()),
                SystemEventOutcome::Success,
            );
            catalog
        }
        Err(err) => {
            let err = anyhow::Error::new(err);
            eprintln!("ERROR: Processing YAML file {source}\n{err:#}");
            log_system_event(
                Some(&context),
                "catalog.load",
                "catalog rejected",
                SystemEventOutcome::Fault,
            );
            debug!("{err:?}");
            return ExitCode::FAILURE;
        }
    };

    let context = context.with_subsystem(subsystem);
    match output::render(&catalog, subsystem, cli.info) {
        Ok(text) => {
            println!("{text}");
            log_system_event(
                Some(&context),
                "catalog.lookup",
                if cli.info { "printed record" } else { "printed command" },
                SystemEventOutcome::Success,
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err} in {source}");
            for name in &err.known {
                eprintln!("{name}");
            }
            log_system_event(
                Some(&context),
                "catalog.lookup",
                "unknown subsystem",
                SystemEventOutcome::Fault,
            );
            ExitCode::FAILURE
        }
    }
}

/// Explicit path, or the default catalog next to the running executable.
fn catalog_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path);
    }
    let exe = std::env::current_exe().context("unable to locate the running executable")?;
    let dir = exe
        .parent()
        .context("running executable has no parent directory")?;
    Ok(dir.join(DEFAULT_CATALOG_FILE))
}

fn install_interrupt_handler() {
    let installed = ctrlc::set_handler(|| {
        eprintln!("\ninterrupted.");
        std::process::exit(1);
    });
    if let Err(err) = installed {
        catalog_error!("failed to install Ctrl-C handler: {err}");
    }
}
