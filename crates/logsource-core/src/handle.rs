//! Per-category logging façade
//!
//! A [`LogHandle`] lets library code ask "would this message be logged?"
//! before paying for formatting:
//!
//! ```
//! use logsource_core::{BackendRegistry, LogHandle};
//! use logsource_core_types::Severity;
//!
//! let registry = BackendRegistry::new();
//! let log = LogHandle::from_registry(&registry, "MyLibrary").unwrap();
//! let error_code = 42;
//! if log.should_emit(Severity::Information) {
//!     log.emit_fmt(Severity::Information, format_args!("Log Message: {}", error_code))
//!         .unwrap();
//! }
//! ```
//!
//! The gate is computed once, when the handle is built. A later change of
//! the backend's switch is only seen by handles built after the change.
//!
//! The gate never filters emits. Every emit goes to the backend, which does
//! its own filtering.

use crate::backend::{Backend, StructuredLogger, SwitchBackend};
use crate::errors::{require_name, LogSourceError, Result};
use crate::level_gate::LevelGate;
use crate::registry::BackendRegistry;
use logsource_core_types::schema::DEFAULT_CATEGORY;
use logsource_core_types::{Severity, SourceLevel};
use std::error::Error;
use std::fmt::{self, Write};
use std::sync::Arc;

/// Façade object for one logging category
///
/// Lifecycle: built active, then [`LogHandle::dispose`] releases the
/// backend for good. Operations that need the backend fail with
/// `ErrorKind::UsedAfterRelease` afterwards.
pub struct LogHandle {
    name: String,
    gate: LevelGate,
    backend: Option<Arc<dyn Backend>>,
    logger: Option<Arc<dyn StructuredLogger>>,
}

impl LogHandle {
    /// Build a handle for `name` from the process-wide registry
    ///
    /// # Errors
    ///
    /// Returns `ErrorKind::InvalidArgument` if `name` is empty.
    pub fn new(name: &str) -> Result<Self> {
        Self::from_registry(BackendRegistry::global(), name)
    }

    /// Build a handle for `name` from `registry`
    ///
    /// # Errors
    ///
    /// Returns `ErrorKind::InvalidArgument` if `name` is empty.
    pub fn from_registry(registry: &BackendRegistry, name: &str) -> Result<Self> {
        require_name("name", name)?;

        let backend = registry.resolve(name)?;
        Ok(Self::active(name, backend))
    }

    /// Build an unregistered handle around a caller-supplied logger
    ///
    /// # Errors
    ///
    /// Returns `ErrorKind::InvalidArgument` if `name` is empty.
    pub fn with_logger(name: &str, logger: Arc<dyn StructuredLogger>) -> Result<Self> {
        require_name("name", name)?;

        let backend: Arc<dyn Backend> = Arc::new(SwitchBackend::from_logger(name, logger));
        Ok(Self::active(name, backend))
    }

    /// Build a handle that logs nothing
    ///
    /// Every gate is closed and the backend has no listeners.
    pub fn disabled() -> Self {
        let backend: Arc<dyn Backend> =
            Arc::new(SwitchBackend::new(DEFAULT_CATEGORY, SourceLevel::Off));
        Self {
            name: String::new(),
            gate: LevelGate::closed(),
            backend: Some(backend),
            logger: None,
        }
    }

    fn active(name: &str, backend: Arc<dyn Backend>) -> Self {
        let gate = LevelGate::compute(backend.as_ref());
        let logger = backend.logger();
        Self {
            name: name.to_string(),
            gate,
            backend: Some(backend),
            logger,
        }
    }

    /// The category name; empty for a disabled handle
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn gate(&self) -> LevelGate {
        self.gate
    }

    /// The structured logger behind this handle, if any
    pub fn logger(&self) -> Option<&Arc<dyn StructuredLogger>> {
        self.logger.as_ref()
    }

    /// The resolved backend
    ///
    /// # Errors
    ///
    /// Returns `ErrorKind::UsedAfterRelease` after [`LogHandle::dispose`].
    pub fn backend(&self) -> Result<&Arc<dyn Backend>> {
        self.backend
            .as_ref()
            .ok_or_else(|| LogSourceError::UsedAfterRelease {
                name: self.name.clone(),
            })
    }

    pub fn is_disposed(&self) -> bool {
        self.backend.is_none()
    }

    /// Check whether a record of `severity` would pass the backend's switch
    /// as it was when this handle was built
    #[inline]
    pub fn should_emit(&self, severity: Severity) -> bool {
        self.gate.should_emit(severity)
    }

    /// Emit a message with event id 0
    ///
    /// # Errors
    ///
    /// Returns `ErrorKind::UsedAfterRelease` after dispose, otherwise any
    /// error the backend reports.
    pub fn emit(&self, severity: Severity, message: &str) -> Result<()> {
        self.backend()?.emit(severity, 0, message)
    }

    /// Emit a message with an explicit event id
    ///
    /// # Errors
    ///
    /// As [`LogHandle::emit`].
    pub fn emit_event(&self, severity: Severity, id: i32, message: &str) -> Result<()> {
        self.backend()?.emit(severity, id, message)
    }

    /// Format and emit a message with event id 0
    ///
    /// # Errors
    ///
    /// As [`LogHandle::emit`], plus `ErrorKind::Format` if formatting fails.
    pub fn emit_fmt(&self, severity: Severity, args: fmt::Arguments<'_>) -> Result<()> {
        self.backend()?.emit_fmt(severity, 0, args)
    }

    /// Emit an error at error severity, with detail depending on the gate
    ///
    /// With information enabled the error's `Debug` form is included;
    /// with only error enabled, its `Display` form. With neither enabled
    /// nothing is composed or emitted.
    ///
    /// # Errors
    ///
    /// As [`LogHandle::emit_fmt`]. A disposed handle fails even when both
    /// gates are closed.
    pub fn emit_exception(
        &self,
        tag: Option<&str>,
        err: &dyn Error,
        function: &str,
        message: &str,
    ) -> Result<()> {
        self.emit_exception_fmt(tag, err, function, format_args!("{}", message))
    }

    /// Like [`LogHandle::emit_exception`] with a formatted message
    ///
    /// # Errors
    ///
    /// As [`LogHandle::emit_fmt`].
    pub fn emit_exception_fmt(
        &self,
        tag: Option<&str>,
        err: &dyn Error,
        function: &str,
        args: fmt::Arguments<'_>,
    ) -> Result<()> {
        let backend = self.backend()?;
        let full_detail = self.should_emit(Severity::Information);
        if !full_detail && !self.should_emit(Severity::Error) {
            return Ok(());
        }

        let mut text = String::new();
        if let Some(tag) = tag {
            write!(text, "{}: ", tag)?;
        }
        write!(text, "{}: ", function)?;
        text.write_fmt(args)?;
        if full_detail {
            write!(text, "\n{:?}", err)?;
        } else {
            write!(text, "\n{}", err)?;
        }
        backend.emit(Severity::Error, 0, &text)
    }

    /// Flush and close the backend, then release it
    ///
    /// Calling this again is a no-op. The backend is released even when
    /// flushing or closing fails.
    ///
    /// # Errors
    ///
    /// Returns the first error reported while flushing or closing.
    pub fn dispose(&mut self) -> Result<()> {
        let Some(backend) = self.backend.take() else {
            return Ok(());
        };

        let flushed = backend.flush();
        let closed = backend.close();
        flushed.and(closed)
    }
}

impl Default for LogHandle {
    fn default() -> Self {
        Self::disabled()
    }
}

impl fmt::Debug for LogHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogHandle")
            .field("name", &self.name)
            .field("gate", &self.gate)
            .field("disposed", &self.is_disposed())
            .field("has_logger", &self.logger.is_some())
            .finish()
    }
}
