//! Request descriptors.
//!
//! # Responsibilities
//! - Describe one outgoing call (method, resource, query, headers, body)
//! - Resolve the resource against the client's base URL
//! - Merge per-call headers with client defaults
//!
//! # Design Decisions
//! - Query parameters are appended to the URL, so the logged URL is exactly what was sent
//! - The `LogIgnored` header is an ordinary header and is forwarded like any other

use reqwest::Method;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Name of the per-call header listing properties to drop from the log event.
pub const LOG_IGNORED_HEADER: &str = "LogIgnored";

const CONTENT_TYPE: &str = "Content-Type";

/// A single header entry. Order and duplicates are preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub name: String,
    pub value: String,
}

impl Header {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Serialization hint attached to a body parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataFormat {
    #[default]
    None,
    Json,
}

/// Body payload as handed over by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum BodyContent {
    Text(String),
    Json(Value),
    Bytes(Vec<u8>),
}

impl BodyContent {
    /// Wire representation of the body.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            BodyContent::Text(text) => text.as_bytes().to_vec(),
            BodyContent::Json(value) => value.to_string().into_bytes(),
            BodyContent::Bytes(bytes) => bytes.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            BodyContent::Text(text) => text.is_empty(),
            BodyContent::Json(value) => value.is_null(),
            BodyContent::Bytes(bytes) => bytes.is_empty(),
        }
    }
}

/// The request body together with its naming and content-type hints.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyParameter {
    pub name: String,
    pub value: BodyContent,
    pub content_type: Option<String>,
    pub format: DataFormat,
}

impl BodyParameter {
    /// A JSON body serialized from `value`.
    pub fn json(value: Value) -> Self {
        Self {
            name: "application/json".to_string(),
            value: BodyContent::Json(value),
            content_type: Some("application/json".to_string()),
            format: DataFormat::Json,
        }
    }

    /// A raw text body with an explicit content type.
    pub fn text(content_type: impl Into<String>, text: impl Into<String>) -> Self {
        let content_type = content_type.into();
        Self {
            name: content_type.clone(),
            value: BodyContent::Text(text.into()),
            content_type: Some(content_type),
            format: DataFormat::None,
        }
    }

    /// An `application/x-www-form-urlencoded` body built from ordered pairs.
    pub fn form<K: AsRef<str>, V: AsRef<str>>(pairs: &[(K, V)]) -> Self {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in pairs {
            serializer.append_pair(key.as_ref(), value.as_ref());
        }
        Self::text("application/x-www-form-urlencoded", serializer.finish())
    }
}

/// Errors raised while turning a [`Request`] into an [`OutgoingRequest`].
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Resource '{0}' is relative and the client has no base URL")]
    MissingBaseUrl(String),

    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// A call as described by the caller, before client defaults are applied.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    /// Absolute URL, or a path relative to the client's base URL.
    pub resource: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<Header>,
    pub body: Option<BodyParameter>,
    /// Forwarded to the transport untouched.
    pub timeout: Option<Duration>,
}

impl Request {
    pub fn new(method: Method, resource: impl Into<String>) -> Self {
        Self {
            method,
            resource: resource.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
            timeout: None,
        }
    }

    pub fn get(resource: impl Into<String>) -> Self {
        Self::new(Method::GET, resource)
    }

    pub fn post(resource: impl Into<String>) -> Self {
        Self::new(Method::POST, resource)
    }

    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push(Header::new(name, value));
        self
    }

    /// Exclude the named log properties for this call only.
    pub fn log_ignored(self, properties: &[&str]) -> Self {
        self.header(LOG_IGNORED_HEADER, properties.join(","))
    }

    pub fn body(mut self, body: BodyParameter) -> Self {
        self.body = Some(body);
        self
    }

    pub fn json_body(self, value: Value) -> Self {
        self.body(BodyParameter::json(value))
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Resolve the resource into the absolute URL that will be sent.
    ///
    /// Relative resources are appended to the base URL's path, so
    /// `https://api/v1` + `/users` gives `https://api/v1/users`.
    pub fn resolve_url(&self, base_url: Option<&Url>) -> Result<Url, RequestError> {
        let mut url = match Url::parse(&self.resource) {
            Ok(url) => url,
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                let base = base_url
                    .ok_or_else(|| RequestError::MissingBaseUrl(self.resource.clone()))?;
                let mut base = base.clone();
                if !base.path().ends_with('/') {
                    let path = format!("{}/", base.path());
                    base.set_path(&path);
                }
                base.join(self.resource.trim_start_matches('/'))
                    .map_err(|source| RequestError::InvalidUrl {
                        url: self.resource.clone(),
                        source,
                    })?
            }
            Err(source) => {
                return Err(RequestError::InvalidUrl {
                    url: self.resource.clone(),
                    source,
                })
            }
        };

        if !self.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in &self.query {
                pairs.append_pair(name, value);
            }
        }

        Ok(url)
    }
}

/// A fully resolved call, as handed to the transport.
#[derive(Debug, Clone)]
pub struct OutgoingRequest {
    pub method: Method,
    pub url: Url,
    /// Per-call headers first, then client defaults.
    pub headers: Vec<Header>,
    pub body: Option<BodyParameter>,
    pub timeout: Option<Duration>,
}

impl OutgoingRequest {
    /// Apply client defaults to `request`.
    ///
    /// A body with a declared content type and no explicit `Content-Type`
    /// header contributes that header.
    pub fn prepare(
        request: &Request,
        base_url: Option<&Url>,
        default_headers: &[Header],
    ) -> Result<Self, RequestError> {
        let url = request.resolve_url(base_url)?;

        let mut headers: Vec<Header> = request
            .headers
            .iter()
            .chain(default_headers.iter())
            .cloned()
            .collect();

        if let Some(content_type) = request.body.as_ref().and_then(|b| b.content_type.as_ref()) {
            let declared = headers
                .iter()
                .any(|h| h.name.eq_ignore_ascii_case(CONTENT_TYPE));
            if !declared {
                headers.push(Header::new(CONTENT_TYPE, content_type.clone()));
            }
        }

        Ok(Self {
            method: request.method.clone(),
            url,
            headers,
            body: request.body.clone(),
            timeout: request.timeout,
        })
    }

    /// Values of every header whose name matches `name` ignoring ASCII case.
    pub fn header_values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.headers
            .iter()
            .filter(move |h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header_values(CONTENT_TYPE).next()
    }
}
