//! Structural decoding of body content into generic values.
//!
//! JSON becomes a `serde_json::Value` tree with insertion-ordered objects;
//! form content becomes a flat map of comma-joined values.
//!
//! Numbers keep their source text, so integers wider than 64 bits survive.
//!
//! Nesting depth is bounded only by the input: the parser's recursion limit
//! is disabled and the stack grows on demand. Adversarial input can therefore
//! cost memory in proportion to its size. Request bodies have no size guard.

use percent_encoding::percent_decode_str;
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::capture::classifier::BodyKind;
use crate::capture::masking::mask_or_original;
use crate::http::request::BodyContent;

#[derive(Debug, Error)]
#[error("Content is not valid JSON: {0}")]
pub struct DecodeError(#[from] serde_json::Error);

/// Parse JSON text into a generic value tree.
pub fn parse_json(content: &str) -> Result<Value, DecodeError> {
    Ok(parse_unbounded(content)?)
}

/// Parse JSON with no nesting limit.
pub(crate) fn parse_unbounded(content: &str) -> Result<Value, serde_json::Error> {
    let mut deserializer = serde_json::Deserializer::from_str(content);
    deserializer.disable_recursion_limit();
    let value = Value::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
    deserializer.end()?;
    Ok(value)
}

/// Mask (when `mask_fields` is non-empty) then parse JSON content.
///
/// On parse failure the raw text is returned as a string value.
pub fn decode_json(content: &str, mask_fields: &[String]) -> Value {
    let content = mask_or_original(content, mask_fields);

    match parse_json(&content) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(
                error = %e,
                source_content = %content,
                masked_fields = ?mask_fields,
                "Unexpected error trying to deserialize JSON content"
            );
            Value::String(content)
        }
    }
}

/// Decode `application/x-www-form-urlencoded` content.
pub fn decode_form(content: &str) -> Value {
    let pairs = content
        .split('&')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let (key, value) = segment.split_once('=').unwrap_or((segment, ""));
            (url_decode(key), url_decode(value))
        });

    Value::Object(group_values(pairs))
}

/// Group `(name, value)` pairs by exact name, joining repeated values with
/// commas in first-seen order.
pub fn group_values<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Map<String, Value>
where
    K: Into<String>,
    V: AsRef<str>,
{
    let mut grouped: Map<String, Value> = Map::new();
    for (name, value) in pairs {
        match grouped.entry(name.into()) {
            serde_json::map::Entry::Occupied(mut entry) => {
                if let Value::String(joined) = entry.get_mut() {
                    joined.push(',');
                    joined.push_str(value.as_ref());
                }
            }
            serde_json::map::Entry::Vacant(entry) => {
                entry.insert(Value::String(value.as_ref().to_string()));
            }
        }
    }
    grouped
}

/// Turn a body into its log property value, or `None` when there is nothing to log.
pub fn decode_body(kind: BodyKind, body: &BodyContent, mask_fields: &[String]) -> Option<Value> {
    if body.is_empty() {
        return None;
    }

    let value = match (kind, body) {
        (BodyKind::Json, BodyContent::Text(text)) => decode_json(text, mask_fields),
        (BodyKind::Json, BodyContent::Json(value)) => decode_json(&value.to_string(), mask_fields),
        (BodyKind::Json, BodyContent::Bytes(bytes)) => {
            decode_json(&String::from_utf8_lossy(bytes), mask_fields)
        }
        (BodyKind::Form, BodyContent::Text(text)) => decode_form(text),
        (BodyKind::Form, BodyContent::Bytes(bytes)) => decode_form(&String::from_utf8_lossy(bytes)),
        (_, BodyContent::Json(value)) => value.clone(),
        (_, BodyContent::Text(text)) => Value::String(text.clone()),
        (_, BodyContent::Bytes(bytes)) => Value::String(String::from_utf8_lossy(bytes).into_owned()),
    };
    Some(value)
}

/// Decode a response body. Responses are never masked.
pub fn decode_text(kind: BodyKind, content: &str) -> Option<Value> {
    decode_body(kind, &BodyContent::Text(content.to_string()), &[])
}

fn url_decode(component: &str) -> String {
    let component = component.replace('+', " ");
    percent_decode_str(&component).decode_utf8_lossy().into_owned()
}
