//! Gated emit macros
//!
//! These macros check a handle's gate before the message is formatted, so
//! a disabled severity costs one bitwise AND and no allocation.

/// Format and emit through a `LogHandle` if its gate allows `severity`
///
/// Evaluates to `logsource_core::Result<()>`. A disposed handle yields
/// `ErrorKind::UsedAfterRelease` whether or not the gate is open.
///
/// # Example
///
/// ```
/// # use logsource_core::{trace_event, BackendRegistry, LogHandle};
/// # use logsource_core_types::Severity;
/// let registry = BackendRegistry::new();
/// let log = LogHandle::from_registry(&registry, "doc.trace_event").unwrap();
/// trace_event!(log, Severity::Information, "Message {}", 2).unwrap();
/// ```
#[macro_export]
macro_rules! trace_event {
    ($handle:expr, $severity:expr, $($arg:tt)+) => {{
        let handle: &$crate::handle::LogHandle = &$handle;
        let severity: $crate::Severity = $severity;
        if handle.should_emit(severity) {
            handle.emit_fmt(severity, format_args!($($arg)+))
        } else {
            // Still fails on a disposed handle
            handle.backend().map(|_| ())
        }
    }};
}

/// Emit an error through `LogHandle::emit_exception_fmt`
///
/// Evaluates to `logsource_core::Result<()>`.
///
/// # Example
///
/// ```
/// # use logsource_core::{trace_exception, BackendRegistry, LogHandle};
/// let registry = BackendRegistry::new();
/// let log = LogHandle::from_registry(&registry, "doc.trace_exception").unwrap();
/// let err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
/// trace_exception!(log, err, "open", "Opening {}", "config.toml").unwrap();
/// trace_exception!(log, tag = "port0", err, "open", "Opening {}", "COM1").unwrap();
/// ```
#[macro_export]
macro_rules! trace_exception {
    ($handle:expr, tag = $tag:expr, $err:expr, $function:expr, $($arg:tt)+) => {{
        let handle: &$crate::handle::LogHandle = &$handle;
        handle.emit_exception_fmt(Some($tag), &$err, $function, format_args!($($arg)+))
    }};
    ($handle:expr, $err:expr, $function:expr, $($arg:tt)+) => {{
        let handle: &$crate::handle::LogHandle = &$handle;
        handle.emit_exception_fmt(None, &$err, $function, format_args!($($arg)+))
    }};
}
