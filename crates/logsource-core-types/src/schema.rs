//! Canonical schema constants for structured log records
//!
//! These constants keep the tracing-backed logger and the test capture
//! layer agreeing on field names. Critical records also carry a `severity`
//! field; `tracing` macros take field names as identifiers, so that one is
//! written literally and read back from the captured extra fields.

// Canonical field keys for structured records
pub const FIELD_CATEGORY: &str = "category";
pub const FIELD_EVENT_ID: &str = "event_id";
pub const FIELD_MESSAGE: &str = "message";

// Severity tag carried on ERROR events that were logged as critical
pub const SEVERITY_CRITICAL: &str = "critical";

// Category used by the disabled handle
pub const DEFAULT_CATEGORY: &str = "default";
