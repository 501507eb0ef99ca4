//! Automatic structured logging for outbound HTTP calls.
//!
//! Every call made through an [`AutologClient`] produces exactly one log
//! event describing the request and the response: timing, URL parts,
//! grouped headers, decoded and masked bodies, status, and a flattened error
//! tree when the transport failed.
//!
//! ```no_run
//! use http_autolog::{AutologClient, AutologConfig, ReqwestTransport, Request};
//! use serde_json::json;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AutologConfig {
//!     mask_fields: vec!["password".into()],
//!     ..AutologConfig::default()
//! };
//! let client = AutologClient::with_configuration(ReqwestTransport::new(), config)
//!     .base_url("https://api.example.com/v1".parse()?);
//!
//! let request = Request::post("/sessions").json_body(json!({"user": "ana", "password": "s3cret"}));
//! let response = client.execute(&request).await?;
//! println!("{}", response.status_code);
//! # Ok(())
//! # }
//! ```

pub mod capture;
pub mod client;
pub mod config;
pub mod http;
pub mod observability;

pub use capture::{AggregateError, PropertySet};
pub use client::AutologClient;
pub use config::AutologConfig;
pub use http::{BodyParameter, ReqwestTransport, Request, Response, ResponseStatus, Transport};
pub use observability::{LogEvent, LogSink, MemorySink, TracingSink};
