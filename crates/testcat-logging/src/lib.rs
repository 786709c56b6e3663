//! ---
//! tc_section: "03-logging"
//! tc_subsection: "module"
//! tc_type: "source"
//! tc_scope: "code"
//! tc_description: "Structured logging adapters and sinks."
//! tc_version: "v0.0.0-prealpha"
//! tc_owner: "tbd"
//! ---
#![warn(missing_docs)]

use std::io::IsTerminal;

use tracing::Level;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::{Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;

pub mod macros;

/// Environment variable holding an explicit filter directive.
pub const LOG_ENV: &str = "GET_TESTS_LOG";

/// Available output formats for diagnostic logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Single-line human readable events, coloured only on a terminal.
    #[default]
    Compact,
    /// One JSON object per event with RFC 3339 timestamps.
    Json,
}

/// Logging settings derived from the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Raise the default level from `error` to `debug`.
    pub verbose: bool,
    /// Event rendering.
    pub format: LogFormat,
}

impl LoggingConfig {
    /// Level used when no filter directive is present in the environment.
    pub fn default_level(&self) -> Level {
        if self.verbose {
            Level::DEBUG
        } else {
            Level::ERROR
        }
    }
}

/// Initialize the tracing subscriber. Every event is written to stderr so
/// stdout stays reserved for command output.
///
/// * `GET_TESTS_LOG` overrides the filter (e.g. `info`, `testcat_catalog=trace`).
/// * When unset the standard `RUST_LOG` variable is honoured, finally falling
///   back to [`LoggingConfig::default_level`].
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init(config: &LoggingConfig) {
    let filter = build_filter(config);

    let fmt_layer = match config.format {
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_ansi(std::io::stderr().is_terminal())
            .with_target(false)
            .without_time()
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_target(true)
            .with_timer(fmt::time::UtcTime::rfc_3339())
            .with_writer(std::io::stderr)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .ok();
}

fn build_filter(config: &LoggingConfig) -> EnvFilter {
    let fallback = || EnvFilter::default().add_directive(config.default_level().into());
    match std::env::var(LOG_ENV) {
        Ok(directive) => EnvFilter::try_new(&directive).unwrap_or_else(|err| {
            eprintln!("invalid {LOG_ENV} directive ({err}); using default level");
            fallback()
        }),
        Err(_) => EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback()),
    }
}

/// Structured logging context propagated by the convenience macros.
#[derive(Debug, Default, Clone)]
pub struct LogContext<'a> {
    /// Subsystem the event refers to.
    pub subsystem: Option<&'a str>,
    /// Test name within the subsystem's plan.
    pub test: Option<&'a str>,
    /// Catalog file the data came from.
    pub source: Option<&'a str>,
}

impl<'a> LogContext<'a> {
    /// Create an empty logging context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a subsystem name.
    pub fn with_subsystem(mut self, subsystem: &'a str) -> Self {
        self.subsystem = Some(subsystem);
        self
    }

    /// Attach a test name.
    pub fn with_test(mut self, test: &'a str) -> Self {
        self.test = Some(test);
        self
    }

    /// Attach the catalog source path.
    pub fn with_source(mut self, source: &'a str) -> Self {
        self.source = Some(source);
        self
    }
}

/// High-level outcome used when emitting lifecycle log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemEventOutcome {
    /// The operation completed successfully.
    Success,
    /// The operation failed.
    Fault,
}

impl SystemEventOutcome {
    fn as_str(&self) -> &'static str {
        match self {
            SystemEventOutcome::Success => "success",
            SystemEventOutcome::Fault => "fault",
        }
    }
}

/// Emit a standardized lifecycle event with a success/fault outcome.
///
/// Successes are logged at `debug`, faults at `warn`; neither shows up
/// without `--verbose` or an explicit filter.
pub fn log_system_event(
    context: Option<&LogContext<'_>>,
    event: &str,
    message: &str,
    outcome: SystemEventOutcome,
) {
    let empty = LogContext::default();
    let ctx = context.unwrap_or(&empty);
    match outcome {
        SystemEventOutcome::Success => tracing::event!(
            Level::DEBUG,
            event,
            outcome = outcome.as_str(),
            subsystem = ctx.subsystem.unwrap_or(""),
            test = ctx.test.unwrap_or(""),
            source = ctx.source.unwrap_or(""),
            message = %message
        ),
        SystemEventOutcome::Fault => tracing::event!(
            Level::WARN,
            event,
            outcome = outcome.as_str(),
            subsystem = ctx.subsystem.unwrap_or(""),
            test = ctx.test.unwrap_or(""),
            source = ctx.source.unwrap_or(""),
            message = %message
        ),
    }
}
