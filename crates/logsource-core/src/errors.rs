use thiserror::Error;

/// Result type alias using LogSourceError
pub type Result<T> = std::result::Result<T, LogSourceError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that callers and tests can match
/// on without depending on message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    // Validation
    InvalidArgument,

    // Lifecycle
    UsedAfterRelease,

    // Backend
    Format,
    Backend,

    // Configuration
    Config,
    Io,
}

impl ErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::InvalidArgument => "ERR_INVALID_ARGUMENT",
            ErrorKind::UsedAfterRelease => "ERR_USED_AFTER_RELEASE",
            ErrorKind::Format => "ERR_FORMAT",
            ErrorKind::Backend => "ERR_BACKEND",
            ErrorKind::Config => "ERR_CONFIG",
            ErrorKind::Io => "ERR_IO",
        }
    }
}

// ========== End Error Facility ==========

/// Error taxonomy for log source operations
///
/// Validation errors are raised at the call that received the bad input.
/// Backend failures are passed through to the caller as they were reported.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LogSourceError {
    // ===== Validation Errors =====
    /// A required argument was empty
    #[error("Invalid argument '{param}': {reason}")]
    InvalidArgument { param: &'static str, reason: String },

    // ===== Lifecycle Errors =====
    /// The handle was disposed and its backend released
    #[error("Log source used after release: {name}")]
    UsedAfterRelease { name: String },

    // ===== Backend Errors =====
    /// A message could not be formatted
    #[error("Formatting the log message failed")]
    Format(#[from] std::fmt::Error),

    /// A backend, listener or sink reported a failure
    #[error("Backend '{name}' failed: {reason}")]
    Backend { name: String, reason: String },

    // ===== Configuration Errors =====
    /// The configuration source is malformed
    #[error("Invalid log source configuration: {reason}")]
    Config { reason: String },

    /// The configuration source could not be read
    #[error("Failed to read configuration {path}: {reason}")]
    Io { path: String, reason: String },
}

impl LogSourceError {
    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        match self {
            LogSourceError::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            LogSourceError::UsedAfterRelease { .. } => ErrorKind::UsedAfterRelease,
            LogSourceError::Format(_) => ErrorKind::Format,
            LogSourceError::Backend { .. } => ErrorKind::Backend,
            LogSourceError::Config { .. } => ErrorKind::Config,
            LogSourceError::Io { .. } => ErrorKind::Io,
        }
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind().code()
    }
}

/// Create an invalid argument error for an empty name
pub fn empty_name(param: &'static str) -> LogSourceError {
    LogSourceError::InvalidArgument {
        param,
        reason: "name may not be empty".to_string(),
    }
}

/// Create a backend error
pub fn backend_error(name: &str, reason: impl Into<String>) -> LogSourceError {
    LogSourceError::Backend {
        name: name.to_string(),
        reason: reason.into(),
    }
}

/// Reject an empty name
pub(crate) fn require_name(param: &'static str, name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(empty_name(param));
    }
    Ok(())
}
