//! Log events handed to a [`LogSink`](crate::observability::sink::LogSink).

use serde_json::{Map, Value};

use crate::observability::template;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Error,
}

/// How a property value is captured on the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureMode {
    /// Scalars as-is, maps and lists rendered to compact JSON text.
    Flat,
    /// The value tree is kept inspectable.
    Structured,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventProperty {
    pub value: Value,
    pub capture: CaptureMode,
}

impl EventProperty {
    /// The value as the sink should record it.
    pub fn captured(&self) -> Value {
        match (self.capture, &self.value) {
            (CaptureMode::Flat, Value::Object(_) | Value::Array(_)) => {
                Value::String(self.value.to_string())
            }
            _ => self.value.clone(),
        }
    }
}

/// One log event: level, unrendered message template, ordered properties.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEvent {
    pub level: Level,
    pub message_template: String,
    properties: Vec<(String, EventProperty)>,
}

impl LogEvent {
    pub fn new(level: Level, message_template: impl Into<String>) -> Self {
        Self {
            level,
            message_template: message_template.into(),
            properties: Vec::new(),
        }
    }

    /// Add a property unless one with the same name is already attached.
    pub fn add_property_if_absent(
        &mut self,
        name: impl Into<String>,
        value: Value,
        capture: CaptureMode,
    ) -> bool {
        let name = name.into();
        if self.property(&name).is_some() {
            return false;
        }
        self.properties.push((name, EventProperty { value, capture }));
        true
    }

    pub fn property(&self, name: &str) -> Option<&EventProperty> {
        self.properties
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, p)| p)
    }

    pub fn properties(&self) -> impl Iterator<Item = (&str, &EventProperty)> {
        self.properties.iter().map(|(n, p)| (n.as_str(), p))
    }

    pub fn property_names(&self) -> Vec<&str> {
        self.properties.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Captured values keyed by name, in attachment order.
    pub fn captured_properties(&self) -> Map<String, Value> {
        self.properties
            .iter()
            .map(|(n, p)| (n.clone(), p.captured()))
            .collect()
    }

    /// The message template with placeholders filled from captured properties.
    pub fn render_message(&self) -> String {
        template::render(&self.message_template, |name| {
            self.property(name).map(EventProperty::captured)
        })
    }
}
