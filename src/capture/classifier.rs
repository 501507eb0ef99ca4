//! Body content classification.
//!
//! The default rule is a case-insensitive substring match, so
//! `application/vnd.api+json` counts as JSON. A body parameter tagged as JSON
//! also counts, even without a matching header.

use crate::http::request::{DataFormat, OutgoingRequest};

/// How a body should be turned into a log property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Json,
    Form,
    /// Logged as-is.
    Opaque,
}

pub trait ContentClassifier: Send + Sync {
    fn classify_request(&self, request: &OutgoingRequest) -> BodyKind;

    fn classify_response(&self, content_type: Option<&str>) -> BodyKind;
}

/// Default classifier: `json` / `x-www-form-urlencoded` substring matching.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringClassifier;

impl SubstringClassifier {
    fn classify_content_type(content_type: &str) -> BodyKind {
        let content_type = content_type.to_ascii_lowercase();
        if content_type.contains("json") {
            BodyKind::Json
        } else if content_type.contains("x-www-form-urlencoded") {
            BodyKind::Form
        } else {
            BodyKind::Opaque
        }
    }
}

impl ContentClassifier for SubstringClassifier {
    fn classify_request(&self, request: &OutgoingRequest) -> BodyKind {
        let header_kinds: Vec<BodyKind> = request
            .header_values("Content-Type")
            .map(Self::classify_content_type)
            .collect();

        let body_is_json = request.body.as_ref().is_some_and(|body| {
            body.format == DataFormat::Json
                || body.name.to_ascii_lowercase().contains("json")
                || body
                    .content_type
                    .as_deref()
                    .is_some_and(|ct| Self::classify_content_type(ct) == BodyKind::Json)
        });

        if body_is_json || header_kinds.contains(&BodyKind::Json) {
            BodyKind::Json
        } else if header_kinds.contains(&BodyKind::Form) {
            BodyKind::Form
        } else {
            BodyKind::Opaque
        }
    }

    fn classify_response(&self, content_type: Option<&str>) -> BodyKind {
        content_type.map_or(BodyKind::Opaque, Self::classify_content_type)
    }
}
