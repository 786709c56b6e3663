//! ---
//! tc_section: "03-logging"
//! tc_subsection: "module"
//! tc_type: "source"
//! tc_scope: "code"
//! tc_description: "Structured logging adapters and sinks."
//! tc_version: "v0.0.0-prealpha"
//! tc_owner: "tbd"
//! ---
//! Context-enriched logging macros.
//!
//! Every macro accepts an optional leading `context = <LogContext>` argument
//! followed by regular format arguments.

#[doc(hidden)]
#[macro_export]
macro_rules! __catalog_event {
    ($level:expr, $ctx:expr, $($arg:tt)+) => {{
        let ctx = &$ctx;
        tracing::event!(
            $level,
            subsystem = ctx.subsystem.unwrap_or(""),
            test = ctx.test.unwrap_or(""),
            source = ctx.source.unwrap_or(""),
            message = %format_args!($($arg)+)
        );
    }};
}

/// Emit a debug log enriched with catalog context.
#[macro_export]
macro_rules! catalog_debug {
    (context = $ctx:expr, $($arg:tt)+) => {
        $crate::__catalog_event!(tracing::Level::DEBUG, $ctx, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__catalog_event!(tracing::Level::DEBUG, $crate::LogContext::default(), $($arg)+)
    };
}

/// Emit an error log enriched with catalog context.
#[macro_export]
macro_rules! catalog_error {
    (context = $ctx:expr, $($arg:tt)+) => {
        $crate::__catalog_event!(tracing::Level::ERROR, $ctx, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__catalog_event!(tracing::Level::ERROR, $crate::LogContext::default(), $($arg)+)
    };
}
