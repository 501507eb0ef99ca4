//! Transport contract and the `reqwest` adapter.
//!
//! # Responsibilities
//! - Define the minimal call contract the interceptor wraps
//! - Execute a prepared request over `reqwest`
//! - Fold every transport failure into a [`Response`]

use std::future::Future;

use crate::http::request::{Header, OutgoingRequest};
use crate::http::response::{Response, ResponseStatus};

/// Anything able to perform one HTTP exchange.
pub trait Transport: Send + Sync {
    /// Identity tag logged as the `Agent` property.
    fn agent(&self) -> &str;

    /// Perform the call. Failures are reported inside the returned response.
    fn execute(&self, request: &OutgoingRequest) -> impl Future<Output = Response> + Send;
}

/// [`Transport`] backed by a `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already configured client (proxies, TLS, pooling).
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    fn agent(&self) -> &str {
        "reqwest"
    }

    async fn execute(&self, request: &OutgoingRequest) -> Response {
        let mut builder = self
            .client
            .request(request.method.clone(), request.url.clone());

        for header in &request.headers {
            builder = builder.header(header.name.as_str(), header.value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.value.to_bytes());
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        match builder.send().await {
            Ok(response) => read_response(response).await,
            Err(e) => {
                tracing::debug!(url = %request.url, error = %e, "Transport error");
                Response::failed(status_for_error(&e), Box::new(e))
            }
        }
    }
}

async fn read_response(response: reqwest::Response) -> Response {
    let status = response.status();
    let protocol_version = format!("{:?}", response.version());
    let declared_length = response.content_length();
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let headers: Vec<Header> = response
        .headers()
        .iter()
        .map(|(name, value)| Header::new(name.as_str(), String::from_utf8_lossy(value.as_bytes())))
        .collect();

    let mut result = Response::completed(status.as_u16());
    result.protocol_version = Some(protocol_version);
    result.content_type = content_type;
    result.headers = headers;

    match response.bytes().await {
        Ok(bytes) => {
            result.content_length = Some(declared_length.unwrap_or(bytes.len() as u64));
            if !bytes.is_empty() {
                result.content = Some(String::from_utf8_lossy(&bytes).into_owned());
            }
        }
        Err(e) => {
            result.content_length = declared_length;
            result.response_status = status_for_error(&e);
            result.error_message = Some(e.to_string());
            result.error = Some(Box::new(e));
        }
    }

    result
}

fn status_for_error(error: &reqwest::Error) -> ResponseStatus {
    if error.is_timeout() {
        ResponseStatus::TimedOut
    } else {
        ResponseStatus::Error
    }
}
