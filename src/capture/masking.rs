//! Sensitive field masking for JSON request bodies.
//!
//! # Responsibilities
//! - Replace the value of configured JSON members with a fixed marker
//! - Match member names at any nesting depth, with no parser depth limit
//! - Never fail the pipeline: errors fall back to the unmasked text
//!
//! # Design Decisions
//! - Field entries are case-insensitive glob patterns (`*token*`, `password`)
//! - The whole member value is replaced, whatever its JSON type

use glob::{MatchOptions, Pattern};
use serde_json::Value;
use thiserror::Error;

use crate::capture::decoder::parse_unbounded;

/// Marker written in place of masked values.
pub const MASK: &str = "******";

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

#[derive(Debug, Error)]
pub enum MaskingError {
    #[error("Invalid mask pattern '{field}': {source}")]
    Pattern {
        field: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("Content is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Compiled set of field-name patterns.
#[derive(Debug, Clone)]
pub struct FieldMasker {
    patterns: Vec<Pattern>,
}

impl FieldMasker {
    pub fn new<S: AsRef<str>>(fields: &[S]) -> Result<Self, MaskingError> {
        let patterns = fields
            .iter()
            .map(|field| {
                Pattern::new(field.as_ref()).map_err(|source| MaskingError::Pattern {
                    field: field.as_ref().to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn matches(&self, name: &str) -> bool {
        self.patterns
            .iter()
            .any(|p| p.matches_with(name, MATCH_OPTIONS))
    }

    /// Mask matching members of the JSON document in `content`.
    pub fn mask(&self, content: &str) -> Result<String, MaskingError> {
        let mut document = parse_unbounded(content)?;
        self.mask_value(&mut document);
        Ok(serde_json::to_string(&document)?)
    }

    fn mask_value(&self, value: &mut Value) {
        match value {
            Value::Object(members) => {
                for (name, member) in members.iter_mut() {
                    if self.matches(name) {
                        *member = Value::String(MASK.to_string());
                    } else {
                        self.mask_value(member);
                    }
                }
            }
            Value::Array(items) => items.iter_mut().for_each(|item| self.mask_value(item)),
            _ => {}
        }
    }
}

/// Mask `content`, or return it untouched (with a warning) if masking fails.
pub fn mask_or_original(content: &str, fields: &[String]) -> String {
    if fields.is_empty() {
        return content.to_string();
    }

    match FieldMasker::new(fields).and_then(|masker| masker.mask(content)) {
        Ok(masked) => masked,
        Err(e) => {
            tracing::warn!(
                error = %e,
                source_content = %content,
                masked_fields = ?fields,
                "Unexpected error trying to mask JSON fields"
            );
            content.to_string()
        }
    }
}
