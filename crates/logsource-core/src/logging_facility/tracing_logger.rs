//! Structured logger that writes through `tracing`
//!
//! This is the default sink for categories nobody configured: their
//! switch backend gets a `BridgeSink` over a `TracingLogger`, so anything
//! that passes the switch ends up in the installed tracing subscriber.
//!
//! Every record is an event with target [`TRACING_TARGET`] carrying the
//! `category` and `event_id` fields. `tracing` has no critical level, so
//! critical records are ERROR events with `severity = "critical"`.

use crate::backend::{LoggerFactory, StructuredLogger};
use logsource_core_types::LogLevel;
use std::sync::Arc;
use tracing::Level;

/// Target of every event written by [`TracingLogger`]
pub const TRACING_TARGET: &str = "logsource";

/// A [`StructuredLogger`] for one category
#[derive(Debug, Clone)]
pub struct TracingLogger {
    category: String,
}

impl TracingLogger {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }
}

impl StructuredLogger for TracingLogger {
    fn is_enabled(&self, level: LogLevel) -> bool {
        match level {
            LogLevel::Trace => tracing::enabled!(target: TRACING_TARGET, Level::TRACE),
            LogLevel::Debug => tracing::enabled!(target: TRACING_TARGET, Level::DEBUG),
            LogLevel::Information => tracing::enabled!(target: TRACING_TARGET, Level::INFO),
            LogLevel::Warning => tracing::enabled!(target: TRACING_TARGET, Level::WARN),
            LogLevel::Error | LogLevel::Critical => {
                tracing::enabled!(target: TRACING_TARGET, Level::ERROR)
            }
            LogLevel::None => false,
        }
    }

    fn log(&self, level: LogLevel, id: i32, line: &str) {
        let category = self.category.as_str();
        match level {
            LogLevel::Trace => {
                tracing::trace!(target: TRACING_TARGET, category, event_id = id, "{}", line)
            }
            LogLevel::Debug => {
                tracing::debug!(target: TRACING_TARGET, category, event_id = id, "{}", line)
            }
            LogLevel::Information => {
                tracing::info!(target: TRACING_TARGET, category, event_id = id, "{}", line)
            }
            LogLevel::Warning => {
                tracing::warn!(target: TRACING_TARGET, category, event_id = id, "{}", line)
            }
            LogLevel::Error => {
                tracing::error!(target: TRACING_TARGET, category, event_id = id, "{}", line)
            }
            LogLevel::Critical => tracing::error!(
                target: TRACING_TARGET,
                category,
                event_id = id,
                severity = logsource_core_types::schema::SEVERITY_CRITICAL,
                "{}",
                line
            ),
            LogLevel::None => {}
        }
    }
}

/// Creates a [`TracingLogger`] per category
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLoggerFactory;

impl LoggerFactory for TracingLoggerFactory {
    fn create_logger(&self, category: &str) -> Option<Arc<dyn StructuredLogger>> {
        Some(Arc::new(TracingLogger::new(category)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging_facility::test_capture::init_test_capture;
    use tracing::Level;

    #[test]
    fn test_log_records_category_and_id() {
        let capture = init_test_capture();
        let logger = TracingLogger::new("tracing_logger.unit.1");

        logger.log(LogLevel::Warning, 17, "disk almost full");

        let events = capture.events_for("tracing_logger.unit.1");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].level, Level::WARN);
        assert_eq!(events[0].event_id, Some(17));
        assert_eq!(events[0].message.as_deref(), Some("disk almost full"));
    }

    #[test]
    fn test_critical_is_tagged_error() {
        let capture = init_test_capture();
        let logger = TracingLogger::new("tracing_logger.unit.2");

        logger.log(LogLevel::Critical, 0, "meltdown");

        let events = capture.events_for("tracing_logger.unit.2");
        assert_eq!(events[0].level, Level::ERROR);
        assert_eq!(
            events[0].fields.get("severity").map(String::as_str),
            Some("critical")
        );
    }

    #[test]
    fn test_none_writes_nothing() {
        let capture = init_test_capture();
        let logger = TracingLogger::new("tracing_logger.unit.3");

        logger.log(LogLevel::None, 0, "silent");

        assert!(!logger.is_enabled(LogLevel::None));
        assert!(capture.events_for("tracing_logger.unit.3").is_empty());
    }

    #[test]
    fn test_factory_creates_per_category() {
        let factory = TracingLoggerFactory;
        assert!(factory.create_logger("any").is_some());
    }
}
