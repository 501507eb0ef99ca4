//! The logging call interceptor.
//!
//! # Responsibilities
//! - Wrap any [`Transport`] and time each call around it
//! - Build the property set and exactly one log event per call
//! - Pick the success or error template from the response's own outcome
//!
//! # Design Decisions
//! - Composition over the transport, so any implementation can be wrapped
//! - Configuration is owned per client; `&mut self` is needed to change it,
//!   so it cannot change while a call borrows the client
//! - The call result is returned untouched, whatever happened while logging

use serde_json::{Map, Value};
use std::sync::Arc;
use url::Url;

use crate::capture::classifier::{ContentClassifier, SubstringClassifier};
use crate::capture::collector::{CallMetadata, PropertyCollector};
use crate::client::call::{CallState, Outcome};
use crate::config::global::configuration_from_global;
use crate::config::schema::AutologConfig;
use crate::http::request::{Header, OutgoingRequest, Request, RequestError};
use crate::http::response::Response;
use crate::http::transport::Transport;
use crate::observability::enricher::{DestructureRule, IgnoreRule, LogEnricher};
use crate::observability::event::LogEvent;
use crate::observability::logging::init_logging;
use crate::observability::sink::{LogSink, TracingSink};

/// HTTP client decorator that logs every call it performs.
pub struct AutologClient<T> {
    transport: T,
    base_url: Option<Url>,
    default_headers: Vec<Header>,
    additional_properties: Map<String, Value>,
    configuration: AutologConfig,
    classifier: Arc<dyn ContentClassifier>,
    sink: Arc<dyn LogSink>,
}

impl<T: Transport> AutologClient<T> {
    /// Client configured from the process-wide default, or built-in defaults.
    pub fn new(transport: T) -> Self {
        Self::with_configuration(transport, configuration_from_global())
    }

    /// Client with an explicit configuration.
    ///
    /// A `logger` directive in the configuration installs a global
    /// `tracing` subscriber unless one already exists.
    pub fn with_configuration(transport: T, configuration: AutologConfig) -> Self {
        if let Some(logger) = &configuration.logger {
            init_logging(logger);
        }

        Self {
            transport,
            base_url: None,
            default_headers: Vec::new(),
            additional_properties: Map::new(),
            configuration,
            classifier: Arc::new(SubstringClassifier),
            sink: Arc::new(TracingSink),
        }
    }

    /// Client using `template` for both success and error messages.
    pub fn with_message_template(transport: T, template: impl Into<String>) -> Self {
        Self::with_configuration(transport, AutologConfig::with_message_template(template))
    }

    pub fn base_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }

    pub fn sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn classifier(mut self, classifier: Arc<dyn ContentClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn configuration(&self) -> &AutologConfig {
        &self.configuration
    }

    pub fn configuration_mut(&mut self) -> &mut AutologConfig {
        &mut self.configuration
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Header sent with every call, after the per-call headers.
    pub fn add_default_header(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.default_headers.push(Header::new(name, value));
        self
    }

    /// Extra property logged first on every event.
    pub fn set_additional_property(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.additional_properties.insert(name.into(), value.into());
        self
    }

    pub fn additional_properties(&self) -> &Map<String, Value> {
        &self.additional_properties
    }

    /// Send `key: value` as a default header and log it as an extra property.
    pub fn add_log_additional_info(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let key = key.into();
        let value = value.into();
        self.add_default_header(key.clone(), value.clone());
        self.set_additional_property(key, value)
    }

    /// Perform `request` and log it.
    ///
    /// Transport failures come back inside the `Ok` response and are logged
    /// on the error path. `Err` only means the URL could not be resolved, in
    /// which case nothing was sent and nothing is logged.
    pub async fn execute(&self, request: &Request) -> Result<Response, RequestError> {
        let outgoing = OutgoingRequest::prepare(request, self.base_url.as_ref(), &self.default_headers)?;
        let ignored = IgnoreRule::from_headers(&request.headers);

        let state = CallState::Idle.start();
        let response = self.transport.execute(&outgoing).await;
        let state = state.complete(response.is_successful());

        self.log_call(&outgoing, &response, &ignored, state);
        Ok(response)
    }

    fn log_call(&self, outgoing: &OutgoingRequest, response: &Response, ignored: &IgnoreRule, state: CallState) {
        let elapsed = state.elapsed().unwrap_or_default();
        let outcome = state.outcome().unwrap_or(Outcome::Failure);

        let call = CallMetadata {
            agent: self.transport.agent(),
            request: outgoing,
            response,
            elapsed,
            additional_properties: &self.additional_properties,
        };
        let properties = PropertyCollector::new(&self.configuration, self.classifier.as_ref()).collect(&call);

        let template = match outcome {
            Outcome::Success => self.configuration.success_template(),
            Outcome::Failure => self.configuration.error_template(),
        };
        let destructure = DestructureRule::new(&self.configuration.properties_to_destructure);
        let mut event = LogEvent::new(outcome.level(), template);
        LogEnricher::new(&properties, ignored, &destructure).enrich(&mut event);

        tracing::debug!(
            method = %outgoing.method,
            url = %outgoing.url,
            status = response.status_code,
            elapsed_ms = elapsed.as_millis() as u64,
            outcome = ?outcome,
            "HTTP call completed"
        );

        self.sink.emit(event);
    }
}

impl<T> std::fmt::Debug for AutologClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutologClient")
            .field("base_url", &self.base_url.as_ref().map(Url::as_str))
            .field("default_headers", &self.default_headers.len())
            .field("configuration", &self.configuration)
            .finish()
    }
}
