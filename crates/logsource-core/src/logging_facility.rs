//! The `tracing` side of the façade
//!
//! Categories nobody registered write through [`TracingLogger`], so their
//! records land in whatever subscriber the process installed. [`init`] is a
//! convenience for installing one; tests use [`init_test_capture`] instead.
//!
//! ```rust
//! use logsource_core::logging_facility::{init, Profile};
//!
//! init(Profile::Production);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;
pub mod tracing_logger;

pub use init::{init, is_initialized, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
pub use tracing_logger::{TracingLogger, TracingLoggerFactory, TRACING_TARGET};
