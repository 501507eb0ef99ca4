//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.
//! Every field has a default so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};

/// Template used when none (or a blank one) is configured.
pub const DEFAULT_MESSAGE_TEMPLATE: &str =
    "[{Application}] HTTP {Method} {Url} responded {StatusCode} in {ElapsedMilliseconds} ms";

/// 128 KiB.
pub const DEFAULT_MAX_RESPONSE_CONTENT_LENGTH: u64 = 128 * 1024;

pub const DEFAULT_ENVIRONMENT_VARIABLE: &str = "APP_ENVIRONMENT";

/// Per-client logging configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AutologConfig {
    /// Message template for successful calls.
    pub message_template_for_success: Option<String>,

    /// Message template for failed calls.
    pub message_template_for_error: Option<String>,

    /// JSON field names (glob patterns) masked in request bodies.
    pub mask_fields: Vec<String>,

    /// Property names captured as structured data instead of flat values.
    pub properties_to_destructure: Vec<String>,

    /// Responses larger than this many bytes are not logged.
    pub max_response_content_length: u64,

    /// Environment variable holding the deployment tag.
    pub environment_variable: String,

    /// Optional logger-construction directive.
    pub logger: Option<LoggerSettings>,
}

impl Default for AutologConfig {
    fn default() -> Self {
        Self {
            message_template_for_success: None,
            message_template_for_error: None,
            mask_fields: Vec::new(),
            properties_to_destructure: Vec::new(),
            max_response_content_length: DEFAULT_MAX_RESPONSE_CONTENT_LENGTH,
            environment_variable: DEFAULT_ENVIRONMENT_VARIABLE.to_string(),
            logger: None,
        }
    }
}

impl AutologConfig {
    /// Configuration using `template` for both outcomes.
    pub fn with_message_template(template: impl Into<String>) -> Self {
        let template = template.into();
        Self {
            message_template_for_success: Some(template.clone()),
            message_template_for_error: Some(template),
            ..Self::default()
        }
    }

    pub fn success_template(&self) -> &str {
        non_blank(self.message_template_for_success.as_deref())
    }

    pub fn error_template(&self) -> &str {
        non_blank(self.message_template_for_error.as_deref())
    }
}

fn non_blank(template: Option<&str>) -> &str {
    match template {
        Some(t) if !t.trim().is_empty() => t,
        _ => DEFAULT_MESSAGE_TEMPLATE,
    }
}

/// How the logger-construction directive installs a subscriber.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggerSettings {
    /// `EnvFilter` directive, e.g. `info,http_autolog=debug`.
    pub filter: String,

    pub format: LogFormat,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            format: LogFormat::Json,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}
