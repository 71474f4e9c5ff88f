//! Core types shared across the LogSource facilities
//!
//! This crate provides the severity vocabulary used by the level gate,
//! the severity-switch backends and the structured loggers:
//!
//! - **Severity types**: Severity, SeverityMask, SourceLevel, LogLevel
//! - **Schema constants**: Canonical field keys for structured records

pub mod schema;
pub mod severity;

pub use severity::{LogLevel, Severity, SeverityMask, SourceLevel};
