//! Log event enrichment.
//!
//! # Responsibilities
//! - Drop properties named by the per-call ignore rule
//! - Flag properties for structured or flat capture
//! - Attach properties without overwriting ones already on the event

use std::collections::HashSet;

use crate::capture::properties::PropertySet;
use crate::http::request::{Header, LOG_IGNORED_HEADER};
use crate::observability::event::{CaptureMode, LogEvent};

/// Property names excluded from one call's event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreRule {
    names: HashSet<String>,
}

impl IgnoreRule {
    /// Parse a comma-separated list. Entries are trimmed; empty ones dropped.
    pub fn parse(value: &str) -> Self {
        let names = value
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();
        Self { names }
    }

    /// Read the rule from the first `LogIgnored` header, if any.
    pub fn from_headers(headers: &[Header]) -> Self {
        headers
            .iter()
            .find(|h| h.name == LOG_IGNORED_HEADER)
            .map(|h| Self::parse(&h.value))
            .unwrap_or_default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Property names captured as structured data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DestructureRule {
    names: HashSet<String>,
}

impl DestructureRule {
    pub fn new<S: AsRef<str>>(names: &[S]) -> Self {
        Self {
            names: names.iter().map(|n| n.as_ref().to_string()).collect(),
        }
    }

    pub fn capture_mode(&self, name: &str) -> CaptureMode {
        if self.names.contains(name) {
            CaptureMode::Structured
        } else {
            CaptureMode::Flat
        }
    }
}

pub struct LogEnricher<'a> {
    properties: &'a PropertySet,
    ignored: &'a IgnoreRule,
    destructure: &'a DestructureRule,
}

impl<'a> LogEnricher<'a> {
    pub fn new(
        properties: &'a PropertySet,
        ignored: &'a IgnoreRule,
        destructure: &'a DestructureRule,
    ) -> Self {
        Self {
            properties,
            ignored,
            destructure,
        }
    }

    pub fn enrich(&self, event: &mut LogEvent) {
        for (name, value) in self.properties.iter() {
            if self.ignored.contains(name) {
                continue;
            }
            event.add_property_if_absent(name, value.clone(), self.destructure.capture_mode(name));
        }
    }
}
