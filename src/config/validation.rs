//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check that mask patterns compile
//! - Check that the logger filter directive parses
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AutologConfig → Result<(), Vec<ValidationError>>

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::capture::masking::FieldMasker;
use crate::config::schema::AutologConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("mask_fields: {0}")]
    InvalidMaskPattern(String),

    #[error("logger.filter '{filter}' is invalid: {reason}")]
    InvalidLogFilter { filter: String, reason: String },

    #[error("environment_variable must not be blank")]
    BlankEnvironmentVariable,

    #[error("properties_to_destructure contains a blank entry")]
    BlankDestructureName,
}

pub fn validate_config(config: &AutologConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for field in &config.mask_fields {
        if let Err(e) = FieldMasker::new(std::slice::from_ref(field)) {
            errors.push(ValidationError::InvalidMaskPattern(e.to_string()));
        }
    }

    if let Some(logger) = &config.logger {
        if let Err(e) = EnvFilter::try_new(&logger.filter) {
            errors.push(ValidationError::InvalidLogFilter {
                filter: logger.filter.clone(),
                reason: e.to_string(),
            });
        }
    }

    if config.environment_variable.trim().is_empty() {
        errors.push(ValidationError::BlankEnvironmentVariable);
    }

    if config
        .properties_to_destructure
        .iter()
        .any(|name| name.trim().is_empty())
    {
        errors.push(ValidationError::BlankDestructureName);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
