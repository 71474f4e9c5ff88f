//! In-memory tracing capture for tests
//!
//! [`init_test_capture`] installs a subscriber whose only layer keeps every
//! event, so tests can assert on what a [`TracingLogger`] wrote. The
//! subscriber is process-wide: filter by a category unique to the test.
//!
//! [`TracingLogger`]: super::TracingLogger

use logsource_core_types::schema::{FIELD_CATEGORY, FIELD_EVENT_ID, FIELD_MESSAGE};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

/// One recorded tracing event
///
/// The well-known record fields are lifted out; anything else ends up in
/// `fields`, rendered as text.
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    pub target: String,
    pub category: Option<String>,
    pub event_id: Option<i64>,
    pub message: Option<String>,
    pub fields: HashMap<String, String>,
}

impl CapturedEvent {
    fn empty(level: Level, target: &str) -> Self {
        Self {
            level,
            target: target.to_string(),
            category: None,
            event_id: None,
            message: None,
            fields: HashMap::new(),
        }
    }
}

impl Visit for CapturedEvent {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            FIELD_CATEGORY => self.category = Some(value.to_string()),
            FIELD_MESSAGE => self.message = Some(value.to_string()),
            name => {
                self.fields.insert(name.to_string(), value.to_string());
            }
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        if field.name() == FIELD_EVENT_ID {
            self.event_id = Some(value);
        } else {
            self.fields.insert(field.name().to_string(), value.to_string());
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match i64::try_from(value) {
            Ok(value) => self.record_i64(field, value),
            Err(_) => {
                self.fields.insert(field.name().to_string(), value.to_string());
            }
        }
    }

    // `message` arrives here as format arguments
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.record_str(field, &format!("{:?}", value));
    }
}

type EventLog = Arc<Mutex<Vec<CapturedEvent>>>;

fn lock(events: &EventLog) -> MutexGuard<'_, Vec<CapturedEvent>> {
    events.lock().unwrap_or_else(PoisonError::into_inner)
}

struct CaptureLayer {
    events: EventLog,
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let mut captured = CapturedEvent::empty(*metadata.level(), metadata.target());
        event.record(&mut captured);
        lock(&self.events).push(captured);
    }
}

/// Read side of the capture subscriber
#[derive(Clone)]
pub struct TestCapture {
    events: EventLog,
}

impl TestCapture {
    /// Every event captured so far, in order
    pub fn events(&self) -> Vec<CapturedEvent> {
        lock(&self.events).clone()
    }

    /// Events written for `category`, in order
    pub fn events_for(&self, category: &str) -> Vec<CapturedEvent> {
        lock(&self.events)
            .iter()
            .filter(|e| e.category.as_deref() == Some(category))
            .cloned()
            .collect()
    }

    /// Messages written for `category`, in order
    pub fn messages_for(&self, category: &str) -> Vec<String> {
        self.events_for(category)
            .into_iter()
            .filter_map(|e| e.message)
            .collect()
    }

    /// # Panics
    ///
    /// Panics unless `category` logged `message`.
    pub fn assert_message_logged(&self, category: &str, message: &str) {
        let messages = self.messages_for(category);
        assert!(
            messages.iter().any(|m| m == message),
            "{:?} was not logged for {}; got {:?}",
            message,
            category,
            messages
        );
    }
}

static GLOBAL_CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Install the capture subscriber on first use and return its read side
///
/// # Example
///
/// ```
/// use logsource_core::backend::StructuredLogger;
/// use logsource_core::logging_facility::{init_test_capture, TracingLogger};
/// use logsource_core_types::LogLevel;
///
/// let capture = init_test_capture();
/// TracingLogger::new("doc.capture").log(LogLevel::Information, 0, "hello");
/// capture.assert_message_logged("doc.capture", "hello");
/// ```
pub fn init_test_capture() -> TestCapture {
    GLOBAL_CAPTURE
        .get_or_init(|| {
            let events = EventLog::default();
            let layer = CaptureLayer {
                events: events.clone(),
            };
            tracing_subscriber::registry().with(layer).init();
            TestCapture { events }
        })
        .clone()
}
