//! Backend contracts consumed by the façade
//!
//! Two backend styles sit behind a [`LogHandle`](crate::handle::LogHandle):
//!
//! - a severity-switch dispatcher ([`SwitchBackend`]) that checks a
//!   [`SourceLevel`] switch and pushes records to its [`Listener`]s;
//! - a [`StructuredLogger`] that accepts discrete leveled records. It is
//!   reached by wrapping it in a [`SwitchBackend`] whose listener is a
//!   [`BridgeSink`].
//!
//! Both are seen by the handle only through the [`Backend`] capability trait.

use crate::bridge::BridgeSink;
use crate::errors::Result;
use logsource_core_types::{LogLevel, Severity, SourceLevel};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

/// Structured leveled logger with a named category
pub trait StructuredLogger: Send + Sync {
    /// Check whether records at `level` would be written
    fn is_enabled(&self, level: LogLevel) -> bool;

    /// Write one complete record
    fn log(&self, level: LogLevel, id: i32, line: &str);
}

/// Creates a structured logger for a category
pub trait LoggerFactory: Send + Sync {
    /// Create a logger for `category`, or `None` if the factory declines
    fn create_logger(&self, category: &str) -> Option<Arc<dyn StructuredLogger>>;
}

/// Push contract of the severity-switch backend
pub trait Listener: Send + Sync {
    /// Write a raw fragment that may or may not end a line
    fn write(&self, fragment: &str) -> Result<()>;

    /// Write text and end the line
    fn write_line(&self, fragment: &str) -> Result<()>;

    /// Write a leveled event from the source named `source`
    fn trace_event(&self, source: &str, severity: Severity, id: i32, message: &str)
        -> Result<()>;

    /// Report a failure or assertion, with optional detail
    fn fail(&self, message: &str, detail: Option<&str>) -> Result<()>;

    fn flush(&self) -> Result<()>;

    fn close(&self) -> Result<()> {
        self.flush()
    }
}

/// Capability interface a handle resolves to
///
/// A backend performs its own level filtering in [`Backend::emit`]; callers
/// use [`Backend::is_enabled`] (or a gate computed from it) only to avoid
/// building messages nobody will see.
pub trait Backend: Send + Sync {
    fn name(&self) -> &str;

    fn is_enabled(&self, severity: Severity) -> bool;

    /// Emit a message
    ///
    /// # Errors
    ///
    /// Returns whatever error the backend or one of its sinks reports.
    fn emit(&self, severity: Severity, id: i32, message: &str) -> Result<()>;

    /// Format and emit a message
    ///
    /// # Errors
    ///
    /// Returns `ErrorKind::Format` if formatting fails, otherwise as
    /// [`Backend::emit`].
    fn emit_fmt(&self, severity: Severity, id: i32, args: fmt::Arguments<'_>) -> Result<()> {
        let mut message = String::new();
        fmt::write(&mut message, args)?;
        self.emit(severity, id, &message)
    }

    /// # Errors
    ///
    /// Returns the first error reported by a sink.
    fn flush(&self) -> Result<()>;

    /// # Errors
    ///
    /// Returns the first error reported by a sink.
    fn close(&self) -> Result<()>;

    /// The structured logger this backend writes to, if any
    fn logger(&self) -> Option<Arc<dyn StructuredLogger>> {
        None
    }
}

impl fmt::Debug for dyn Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Backend").field("name", &self.name()).finish()
    }
}

/// Severity-switch dispatcher
///
/// The switch level is live: [`SwitchBackend::set_level`] takes effect on
/// the next emit. Listeners are called in the order they were added.
pub struct SwitchBackend {
    name: String,
    level: RwLock<SourceLevel>,
    listeners: RwLock<Vec<Arc<dyn Listener>>>,
    logger: Option<Arc<dyn StructuredLogger>>,
}

impl SwitchBackend {
    /// Create a backend with no listeners
    pub fn new(name: impl Into<String>, level: SourceLevel) -> Self {
        Self {
            name: name.into(),
            level: RwLock::new(level),
            listeners: RwLock::new(Vec::new()),
            logger: None,
        }
    }

    /// Create a backend with a single listener
    pub fn with_listener(
        name: impl Into<String>,
        level: SourceLevel,
        listener: Arc<dyn Listener>,
    ) -> Self {
        let backend = Self::new(name, level);
        backend.add_listener(listener);
        backend
    }

    /// Wrap a structured logger
    ///
    /// The switch level is derived from what the logger has enabled, and a
    /// [`BridgeSink`] is the single listener.
    pub fn from_logger(name: impl Into<String>, logger: Arc<dyn StructuredLogger>) -> Self {
        let name = name.into();
        let level = SourceLevel::from_enabled(|l| logger.is_enabled(l));
        let sink: Arc<dyn Listener> = Arc::new(BridgeSink::new(name.clone(), logger.clone()));

        let mut backend = Self::with_listener(name, level, sink);
        backend.logger = Some(logger);
        backend
    }

    pub fn level(&self) -> SourceLevel {
        *self.level.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_level(&self, level: SourceLevel) {
        *self.level.write().unwrap_or_else(PoisonError::into_inner) = level;
    }

    pub fn add_listener(&self, listener: Arc<dyn Listener>) {
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(listener);
    }

    pub fn clear_listeners(&self) {
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn listener_count(&self) -> usize {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    // Listeners are called without holding the lock
    fn snapshot_listeners(&self) -> Vec<Arc<dyn Listener>> {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl fmt::Debug for SwitchBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwitchBackend")
            .field("name", &self.name)
            .field("level", &self.level())
            .field("listeners", &self.listener_count())
            .field("has_logger", &self.logger.is_some())
            .finish()
    }
}

impl Backend for SwitchBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_enabled(&self, severity: Severity) -> bool {
        self.level().allows(severity)
    }

    fn emit(&self, severity: Severity, id: i32, message: &str) -> Result<()> {
        if !self.is_enabled(severity) {
            return Ok(());
        }
        for listener in self.snapshot_listeners() {
            listener.trace_event(&self.name, severity, id, message)?;
        }
        Ok(())
    }

    fn emit_fmt(&self, severity: Severity, id: i32, args: fmt::Arguments<'_>) -> Result<()> {
        if !self.is_enabled(severity) {
            return Ok(());
        }
        let mut message = String::new();
        fmt::write(&mut message, args)?;
        self.emit(severity, id, &message)
    }

    fn flush(&self) -> Result<()> {
        for listener in self.snapshot_listeners() {
            listener.flush()?;
        }
        Ok(())
    }

    fn close(&self) -> Result<()> {
        for listener in self.snapshot_listeners() {
            listener.close()?;
        }
        Ok(())
    }

    fn logger(&self) -> Option<Arc<dyn StructuredLogger>> {
        self.logger.clone()
    }
}
