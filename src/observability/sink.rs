//! Log sinks.
//!
//! The interceptor never talks to a global logger; it is handed a sink.
//! [`TracingSink`] forwards to `tracing`, [`MemorySink`] keeps events in
//! memory for inspection.

use std::sync::{Arc, Mutex};

use crate::observability::event::{Level, LogEvent};

/// Target used for call events emitted through `tracing`.
pub const EVENT_TARGET: &str = "http_autolog";

pub trait LogSink: Send + Sync {
    fn emit(&self, event: LogEvent);
}

impl<S: LogSink + ?Sized> LogSink for Arc<S> {
    fn emit(&self, event: LogEvent) {
        (**self).emit(event)
    }
}

/// Emits each event as one `tracing` event.
///
/// The rendered message is the event message; the template and the captured
/// properties (as JSON) are recorded as fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn emit(&self, event: LogEvent) {
        let message = event.render_message();
        let properties = serde_json::Value::Object(event.captured_properties()).to_string();
        let template = event.message_template.as_str();

        match event.level {
            Level::Info => tracing::info!(
                target: EVENT_TARGET,
                template = %template,
                properties = %properties,
                "{}",
                message
            ),
            Level::Error => tracing::error!(
                target: EVENT_TARGET,
                template = %template,
                properties = %properties,
                "{}",
                message
            ),
        }
    }
}

/// Collects events in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<LogEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every event emitted so far.
    pub fn events(&self) -> Vec<LogEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.events.lock().map(|events| events.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl LogSink for MemorySink {
    fn emit(&self, event: LogEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}
