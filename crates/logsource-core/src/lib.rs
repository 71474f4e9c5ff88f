//! LogSource Core - gated logging façade over two backend styles
//!
//! This crate provides:
//! - `LogHandle`: per-category façade with a precomputed level gate
//! - `BackendRegistry`: name → backend mapping with override and reset
//! - `LineBuffer`: reassembly of text fragments into complete lines
//! - `BridgeSink`: severity-switch listener that forwards to a structured logger
//! - `SwitchBackend`: severity-switch dispatcher with pluggable listeners
//! - A tracing-backed structured logger and its subscriber bootstrap

pub mod backend;
pub mod bridge;
pub mod config;
pub mod errors;
pub mod handle;
pub mod level_gate;
pub mod line_buffer;
pub mod logging_facility;
pub mod registry;

// Re-export commonly used types
pub use backend::{Backend, Listener, LoggerFactory, StructuredLogger, SwitchBackend};
pub use bridge::BridgeSink;
pub use config::SourceConfig;
pub use errors::{ErrorKind, LogSourceError, Result};
pub use handle::LogHandle;
pub use level_gate::LevelGate;
pub use line_buffer::LineBuffer;
pub use logsource_core_types::{LogLevel, Severity, SeverityMask, SourceLevel};
pub use registry::BackendRegistry;
