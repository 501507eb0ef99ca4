//! Response descriptors.
//!
//! # Responsibilities
//! - Carry status, protocol, headers and content of a completed call
//! - Carry transport failures (message + error object) alongside
//! - Decide whether the call counts as successful

use serde::de::DeserializeOwned;
use std::fmt;

use crate::http::request::Header;

/// Boxed error object attached to a failed call.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Transport-level outcome of a call, independent of the HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseStatus {
    #[default]
    None,
    Completed,
    Error,
    TimedOut,
    Aborted,
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResponseStatus::None => "None",
            ResponseStatus::Completed => "Completed",
            ResponseStatus::Error => "Error",
            ResponseStatus::TimedOut => "TimedOut",
            ResponseStatus::Aborted => "Aborted",
        };
        f.write_str(name)
    }
}

/// Everything the transport reports about one call.
///
/// `status_code` is 0 when no HTTP response was received.
#[derive(Debug, Default)]
pub struct Response {
    pub status_code: u16,
    pub status_description: Option<String>,
    pub response_status: ResponseStatus,
    pub protocol_version: Option<String>,
    pub content_length: Option<u64>,
    pub content_type: Option<String>,
    pub content: Option<String>,
    pub headers: Vec<Header>,
    pub error_message: Option<String>,
    pub error: Option<BoxError>,
}

impl Response {
    /// A completed response with the given status code.
    pub fn completed(status_code: u16) -> Self {
        let status_description = reqwest::StatusCode::from_u16(status_code)
            .ok()
            .and_then(|s| s.canonical_reason())
            .map(str::to_string);
        Self {
            status_code,
            status_description,
            response_status: ResponseStatus::Completed,
            ..Self::default()
        }
    }

    /// A call that never produced an HTTP response.
    pub fn failed(response_status: ResponseStatus, error: BoxError) -> Self {
        Self {
            response_status,
            error_message: Some(error.to_string()),
            error: Some(error),
            ..Self::default()
        }
    }

    /// Attach a body. The content length becomes the body's byte length
    /// unless one was already declared.
    pub fn with_content(mut self, content_type: impl Into<String>, content: impl Into<String>) -> Self {
        let content = content.into();
        self.content_length.get_or_insert(content.len() as u64);
        self.content_type = Some(content_type.into());
        self.content = Some(content);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push(Header::new(name, value));
        self
    }

    /// 2xx status and the transport completed the exchange.
    pub fn is_successful(&self) -> bool {
        (200..300).contains(&self.status_code) && self.response_status == ResponseStatus::Completed
    }

    /// Deserialize the response content.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(self.content.as_deref().unwrap_or_default())
    }
}
