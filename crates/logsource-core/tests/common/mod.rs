//! In-memory stand-ins for the backends and sinks behind a LogHandle

use logsource_core::errors::backend_error;
use logsource_core::{Listener, LogLevel, LoggerFactory, Result, Severity, StructuredLogger};
use std::sync::{Arc, Mutex};

/// Which listener entry point produced an entry
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Write,
    WriteLine,
    Event,
    Fail,
}

/// One call recorded by a MemoryListener
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerEntry {
    pub kind: EntryKind,
    pub source: Option<String>,
    pub severity: Option<Severity>,
    pub id: i32,
    pub message: String,
}

/// Listener that records every call
#[derive(Default)]
pub struct MemoryListener {
    entries: Mutex<Vec<ListenerEntry>>,
    flushes: Mutex<usize>,
    closes: Mutex<usize>,
}

#[allow(dead_code)]
impl MemoryListener {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn entries(&self) -> Vec<ListenerEntry> {
        self.entries.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn flushes(&self) -> usize {
        *self.flushes.lock().unwrap()
    }

    pub fn closes(&self) -> usize {
        *self.closes.lock().unwrap()
    }

    fn push(&self, entry: ListenerEntry) {
        self.entries.lock().unwrap().push(entry);
    }
}

impl Listener for MemoryListener {
    fn write(&self, fragment: &str) -> Result<()> {
        self.push(ListenerEntry {
            kind: EntryKind::Write,
            source: None,
            severity: None,
            id: 0,
            message: fragment.to_string(),
        });
        Ok(())
    }

    fn write_line(&self, fragment: &str) -> Result<()> {
        self.push(ListenerEntry {
            kind: EntryKind::WriteLine,
            source: None,
            severity: None,
            id: 0,
            message: fragment.to_string(),
        });
        Ok(())
    }

    fn trace_event(&self, source: &str, severity: Severity, id: i32, message: &str) -> Result<()> {
        self.push(ListenerEntry {
            kind: EntryKind::Event,
            source: Some(source.to_string()),
            severity: Some(severity),
            id,
            message: message.to_string(),
        });
        Ok(())
    }

    fn fail(&self, message: &str, detail: Option<&str>) -> Result<()> {
        let message = match detail {
            Some(detail) => format!("{}: {}", message, detail),
            None => message.to_string(),
        };
        self.push(ListenerEntry {
            kind: EntryKind::Fail,
            source: None,
            severity: Some(Severity::Warning),
            id: 0,
            message,
        });
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        *self.flushes.lock().unwrap() += 1;
        Ok(())
    }

    fn close(&self) -> Result<()> {
        *self.closes.lock().unwrap() += 1;
        self.flush()
    }
}

/// Listener whose events and flushes always fail
#[allow(dead_code)]
pub struct FailingListener;

impl Listener for FailingListener {
    fn write(&self, _fragment: &str) -> Result<()> {
        Ok(())
    }

    fn write_line(&self, _fragment: &str) -> Result<()> {
        Ok(())
    }

    fn trace_event(&self, source: &str, _severity: Severity, _id: i32, _message: &str) -> Result<()> {
        Err(backend_error(source, "sink rejected the event"))
    }

    fn fail(&self, _message: &str, _detail: Option<&str>) -> Result<()> {
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        Err(backend_error("failing", "sink cannot flush"))
    }
}

/// Structured logger that records every line at or above a minimum level
pub struct MemoryLogger {
    min_level: LogLevel,
    records: Mutex<Vec<(LogLevel, i32, String)>>,
}

#[allow(dead_code)]
impl MemoryLogger {
    /// A logger with every level enabled
    pub fn new() -> Arc<Self> {
        Self::with_min_level(LogLevel::Trace)
    }

    pub fn with_min_level(min_level: LogLevel) -> Arc<Self> {
        Arc::new(Self {
            min_level,
            records: Mutex::new(Vec::new()),
        })
    }

    pub fn records(&self) -> Vec<(LogLevel, i32, String)> {
        self.records.lock().unwrap().clone()
    }

    pub fn lines(&self) -> Vec<String> {
        self.records().into_iter().map(|(_, _, line)| line).collect()
    }

    pub fn count(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

impl StructuredLogger for MemoryLogger {
    fn is_enabled(&self, level: LogLevel) -> bool {
        level != LogLevel::None && level >= self.min_level
    }

    fn log(&self, level: LogLevel, id: i32, line: &str) {
        self.records
            .lock()
            .unwrap()
            .push((level, id, line.to_string()));
    }
}

/// Factory handing out one MemoryLogger per category, remembering each
#[derive(Default)]
pub struct MemoryLoggerFactory {
    created: Mutex<Vec<(String, Arc<MemoryLogger>)>>,
}

#[allow(dead_code)]
impl MemoryLoggerFactory {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn logger_for(&self, category: &str) -> Option<Arc<MemoryLogger>> {
        self.created
            .lock()
            .unwrap()
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, logger)| logger.clone())
    }

    pub fn created_count(&self) -> usize {
        self.created.lock().unwrap().len()
    }
}

impl LoggerFactory for MemoryLoggerFactory {
    fn create_logger(&self, category: &str) -> Option<Arc<dyn StructuredLogger>> {
        let logger = MemoryLogger::new();
        self.created
            .lock()
            .unwrap()
            .push((category.to_string(), logger.clone()));
        Some(logger)
    }
}

/// Factory that never yields a logger
#[allow(dead_code)]
pub struct DecliningFactory;

impl LoggerFactory for DecliningFactory {
    fn create_logger(&self, _category: &str) -> Option<Arc<dyn StructuredLogger>> {
        None
    }
}
