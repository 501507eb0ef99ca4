//! Error flattening.
//!
//! Turns an error, a `source()` chain, or an [`AggregateError`] with several
//! independent causes into one uniform tree so the log shape does not depend
//! on the concrete error type.

use serde::Serialize;
use std::error::Error;
use std::fmt;

use crate::http::response::BoxError;

/// An error wrapping several independent causes.
#[derive(Debug)]
pub struct AggregateError {
    message: String,
    errors: Vec<BoxError>,
}

impl AggregateError {
    pub fn new(message: impl Into<String>, errors: Vec<BoxError>) -> Self {
        Self {
            message: message.into(),
            errors,
        }
    }

    pub fn errors(&self) -> &[BoxError] {
        &self.errors
    }
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} errors)", self.message, self.errors.len())
    }
}

impl Error for AggregateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.errors.first().map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

/// Flattened description of an error and its causes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ErrorTree {
    pub message: String,
    /// Debug rendering of the error, which carries whatever context the
    /// concrete type records.
    pub stack_trace: String,
    pub inner_errors: Vec<ErrorTree>,
}

/// Flatten `error` depth-first. `None` in, `None` out.
pub fn flatten_error(error: Option<&(dyn Error + 'static)>) -> Option<ErrorTree> {
    let error = error?;

    let inner_errors = match error.downcast_ref::<AggregateError>() {
        Some(aggregate) if !aggregate.errors.is_empty() => aggregate
            .errors
            .iter()
            .filter_map(|e| flatten_error(Some(e.as_ref() as &(dyn Error + 'static))))
            .collect(),
        _ => flatten_error(error.source()).into_iter().collect(),
    };

    Some(ErrorTree {
        message: error.to_string(),
        stack_trace: format!("{error:?}"),
        inner_errors,
    })
}
