//! Configuration loading from disk.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::AutologConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<AutologConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<AutologConfig, ConfigError> {
    let config: AutologConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{LogFormat, DEFAULT_MAX_RESPONSE_CONTENT_LENGTH};

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config, AutologConfig::default());
        assert_eq!(config.max_response_content_length, DEFAULT_MAX_RESPONSE_CONTENT_LENGTH);
    }

    #[test]
    fn test_full_file() {
        let config = parse_config(
            r#"
            message_template_for_error = "HTTP {Method} {Url} failed with {StatusCode}"
            mask_fields = ["password", "*token*"]
            properties_to_destructure = ["RequestBody", "ResponseContent"]
            max_response_content_length = 1024
            environment_variable = "DEPLOY_ENV"

            [logger]
            filter = "debug"
            format = "pretty"
            "#,
        )
        .unwrap();

        assert_eq!(config.error_template(), "HTTP {Method} {Url} failed with {StatusCode}");
        assert_eq!(config.mask_fields, vec!["password", "*token*"]);
        assert_eq!(config.max_response_content_length, 1024);
        assert_eq!(config.environment_variable, "DEPLOY_ENV");
        assert_eq!(config.logger.unwrap().format, LogFormat::Pretty);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let err = parse_config(r#"mask_fields = ["[oops"]"#).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref e) if e.len() == 1));
        assert!(err.to_string().starts_with("Validation failed: mask_fields:"));

        let err = parse_config("max_response_content_length = \"big\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/autolog.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
