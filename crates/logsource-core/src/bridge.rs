//! Listener that forwards to a structured logger
//!
//! The severity-switch backend pushes raw fragments, whole lines, leveled
//! events and failures. A structured logger only takes complete records, so
//! [`BridgeSink`] reassembles text through a [`LineBuffer`] and forwards each
//! complete line.
//!
//! Severity of forwarded lines:
//!
//! - fragments, lines, failures and flushed leftovers are written at
//!   [`LogLevel::Information`], because the real severity of a bare
//!   fragment is unknown when it arrives;
//! - a leveled event is written as one record, never split on its
//!   terminators, at the event's severity with the event's id.
//!
//! A fragment still pending when an event arrives is closed as its own
//! line and forwarded before the event, at the event's severity. It is
//! never merged into the event message.

use crate::backend::{Listener, StructuredLogger};
use crate::errors::Result;
use crate::line_buffer::LineBuffer;
use logsource_core_types::{LogLevel, Severity};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Adapts the listener push contract onto a [`StructuredLogger`]
pub struct BridgeSink {
    name: String,
    logger: Arc<dyn StructuredLogger>,
    lines: Mutex<LineBuffer>,
}

impl BridgeSink {
    pub fn new(name: impl Into<String>, logger: Arc<dyn StructuredLogger>) -> Self {
        Self {
            name: name.into(),
            logger,
            lines: Mutex::new(LineBuffer::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn logger(&self) -> &Arc<dyn StructuredLogger> {
        &self.logger
    }

    fn lines(&self) -> MutexGuard<'_, LineBuffer> {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // The buffer lock is released before the logger is called
    fn forward(&self, level: LogLevel, id: i32, lines: Vec<String>) {
        for line in lines {
            self.logger.log(level, id, &line);
        }
    }
}

impl fmt::Debug for BridgeSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BridgeSink")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl Listener for BridgeSink {
    fn write(&self, fragment: &str) -> Result<()> {
        let lines = {
            let mut buffer = self.lines();
            buffer.append(fragment);
            buffer.drain()
        };
        self.forward(LogLevel::Information, 0, lines);
        Ok(())
    }

    fn write_line(&self, fragment: &str) -> Result<()> {
        let lines = {
            let mut buffer = self.lines();
            buffer.append_line(fragment);
            buffer.drain()
        };
        self.forward(LogLevel::Information, 0, lines);
        Ok(())
    }

    fn trace_event(
        &self,
        _source: &str,
        severity: Severity,
        id: i32,
        message: &str,
    ) -> Result<()> {
        let level = severity.log_level();
        let pending = {
            let mut buffer = self.lines();
            if buffer.has_pending() {
                buffer.force_break();
            }
            buffer.drain()
        };
        self.forward(level, id, pending);
        // The event is one complete record, embedded terminators included
        self.logger.log(level, id, message);
        Ok(())
    }

    fn fail(&self, message: &str, detail: Option<&str>) -> Result<()> {
        let composed = match detail {
            Some(detail) => format!("{}: {}", message, detail),
            None => message.to_string(),
        };
        let lines = {
            let mut buffer = self.lines();
            if buffer.has_pending() {
                buffer.force_break();
            }
            buffer.append_line(&composed);
            buffer.drain()
        };
        self.forward(LogLevel::Information, 0, lines);
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        let lines = {
            let mut buffer = self.lines();
            if buffer.has_pending() {
                buffer.force_break();
            }
            buffer.drain()
        };
        self.forward(LogLevel::Information, 0, lines);
        Ok(())
    }
}
