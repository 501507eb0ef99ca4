//! Property collection for one completed call.
//!
//! # Responsibilities
//! - Build the ordered property set from request, response and timing
//! - Route bodies through classification, masking and decoding
//! - Suppress oversized response bodies
//!
//! # Design Decisions
//! - Properties are written in a fixed order, caller extras first
//! - Request bodies are masked, response bodies never are
//! - Pure apart from reading one environment variable; no logging I/O here

use serde_json::{Map, Value};
use std::error::Error;
use std::time::Duration;

use crate::capture::classifier::ContentClassifier;
use crate::capture::decoder::{decode_body, decode_text, group_values};
use crate::capture::exception::flatten_error;
use crate::capture::properties::PropertySet;
use crate::config::schema::AutologConfig;
use crate::http::request::{Header, OutgoingRequest};
use crate::http::response::Response;

/// What the interceptor knows about a call once the transport returned.
#[derive(Debug, Clone, Copy)]
pub struct CallMetadata<'a> {
    /// Transport identity, logged as `Agent`.
    pub agent: &'a str,
    pub request: &'a OutgoingRequest,
    pub response: &'a Response,
    pub elapsed: Duration,
    /// Caller-supplied extras, logged first.
    pub additional_properties: &'a Map<String, Value>,
}

pub struct PropertyCollector<'a> {
    config: &'a AutologConfig,
    classifier: &'a dyn ContentClassifier,
}

impl<'a> PropertyCollector<'a> {
    pub fn new(config: &'a AutologConfig, classifier: &'a dyn ContentClassifier) -> Self {
        Self { config, classifier }
    }

    pub fn collect(&self, call: &CallMetadata<'_>) -> PropertySet {
        let mut properties = PropertySet::new();
        let request = call.request;
        let response = call.response;
        let url = &request.url;

        for (name, value) in call.additional_properties {
            properties.insert(name.clone(), value.clone());
        }

        properties.insert("Agent", call.agent);
        properties.insert("ElapsedMilliseconds", call.elapsed.as_millis() as u64);
        properties.insert("Method", request.method.as_str());
        properties.insert("Url", url.as_str());
        properties.insert("Host", url.host_str());
        properties.insert("Path", url.path());
        properties.insert("Port", url.port_or_known_default());
        properties.insert(
            "QueryString",
            url.query().map(|q| format!("?{q}")).unwrap_or_default(),
        );
        properties.insert_some("Query", non_empty(group_values(url.query_pairs())));
        properties.insert_some("RequestBody", self.request_body(request));
        properties.insert("RequestHeaders", Value::Object(group_headers(&request.headers)));
        properties.insert("StatusCode", response.status_code);
        properties.insert("StatusCodeFamily", status_family(response.status_code));
        properties.insert(
            "StatusDescription",
            response.status_description.as_ref().map(|d| d.replace(' ', "")),
        );
        properties.insert("ResponseStatus", response.response_status.to_string());
        properties.insert("ProtocolVersion", response.protocol_version.clone());
        properties.insert("IsSuccessful", response.is_successful());
        properties.insert("ErrorMessage", response.error_message.clone());
        properties.insert("ErrorException", error_value(response));
        properties.insert_some("ResponseContent", self.response_content(response));
        properties.insert("ContentLength", response.content_length);
        properties.insert("ContentType", response.content_type.clone());
        properties.insert_some("ResponseHeaders", non_empty(group_headers(&response.headers)));
        properties.insert(
            "Environment",
            std::env::var(&self.config.environment_variable).ok(),
        );

        properties
    }

    fn request_body(&self, request: &OutgoingRequest) -> Option<Value> {
        let body = request.body.as_ref()?;
        let kind = self.classifier.classify_request(request);
        decode_body(kind, &body.value, &self.config.mask_fields)
    }

    fn response_content(&self, response: &Response) -> Option<Value> {
        let max = self.config.max_response_content_length;
        let length = response
            .content_length
            .or_else(|| response.content.as_ref().map(|c| c.len() as u64));

        if length.is_some_and(|length| length > max) {
            return Some(Value::String(suppression_notice(max)));
        }

        let content = response.content.as_deref()?;
        let kind = self
            .classifier
            .classify_response(response.content_type.as_deref());
        decode_text(kind, content)
    }
}

/// First digit of the status code followed by `XX`.
pub fn status_family(status_code: u16) -> String {
    let first = status_code.to_string().chars().next().unwrap_or('0');
    format!("{first}XX")
}

pub fn suppression_notice(max_bytes: u64) -> String {
    format!("**** Response contents suppressed: content length exceeds {max_bytes} maximum bytes. ****")
}

fn group_headers(headers: &[Header]) -> Map<String, Value> {
    group_values(headers.iter().map(|h| (h.name.as_str(), h.value.as_str())))
}

fn non_empty(map: Map<String, Value>) -> Option<Value> {
    (!map.is_empty()).then_some(Value::Object(map))
}

fn error_value(response: &Response) -> Option<Value> {
    let error = response
        .error
        .as_deref()
        .map(|e| e as &(dyn Error + 'static));
    flatten_error(error).and_then(|tree| serde_json::to_value(tree).ok())
}
