//! Classify a raw response as a candidate record or an API error.
//!
//! The API answers some failures with HTTP 200 and a body such as
//! `{"message": "invalid"}`, so the status alone cannot tell a record from an
//! error. A success-status object that carries none of the target record's
//! required keys is treated as an error envelope. Objects that carry only
//! some of them are left for the decoder, which names what is missing.

use serde_json::{Map, Value};

use crate::error::{OuraError, Result};
use crate::http::HttpResponse;

/// Error fields checked in order when extracting a message.
const MESSAGE_KEYS: &[&str] = &["message", "detail", "title"];

const SNIPPET_LEN: usize = 200;

/// Returns the parsed body object when it may hold a record of the type
/// described by `required_keys`.
pub fn classify(response: &HttpResponse, required_keys: &[&str]) -> Result<Map<String, Value>> {
    if !response.is_success() {
        return Err(error_from_body(response));
    }

    let value: Value = serde_json::from_str(&response.body)
        .map_err(|e| OuraError::decode("body", e.to_string()))?;

    let Value::Object(object) = value else {
        return Err(OuraError::api(
            response.status,
            format!("expected a JSON object ({})", synthesize(response)),
        ));
    };

    let carries_none = !required_keys.is_empty()
        && required_keys.iter().all(|key| !object.contains_key(*key));
    if carries_none {
        let message = extract_message(&object).unwrap_or_else(|| synthesize(response));
        return Err(OuraError::api(response.status, message));
    }

    Ok(object)
}

fn error_from_body(response: &HttpResponse) -> OuraError {
    let message = match serde_json::from_str::<Value>(&response.body) {
        Ok(Value::Object(object)) => extract_message(&object),
        _ => None,
    };
    OuraError::api(
        response.status,
        message.unwrap_or_else(|| synthesize(response)),
    )
}

fn extract_message(object: &Map<String, Value>) -> Option<String> {
    MESSAGE_KEYS
        .iter()
        .filter_map(|key| object.get(*key))
        .find_map(|value| match value {
            Value::Null => None,
            Value::String(text) => Some(text.clone()),
            other => Some(other.to_string()),
        })
}

fn synthesize(response: &HttpResponse) -> String {
    let body = response.body.trim();
    if body.is_empty() {
        return format!("HTTP {} with empty body", response.status);
    }
    let snippet: String = body.chars().take(SNIPPET_LEN).collect();
    let ellipsis = if body.chars().count() > SNIPPET_LEN { "..." } else { "" };
    format!("HTTP {}: {snippet}{ellipsis}", response.status)
}
