//! Decoder for the JSON envelopes the REST backends answer with.
//!
//! Failures arrive as `{"errorMessages": [...], "errors": {...}}`; the
//! messages are tracker-authored and safe to surface, except the ambient
//! "login required" notice, which is noise rather than an actionable
//! error and is suppressed.

use serde_json::Value;

use crate::ticket::TrackerError;

/// Classifies a non-2xx JSON response.
///
/// Unparsable bodies are [`TrackerError::Undecodable`] with the raw body
/// retained for diagnostics. Parsed envelopes yield a
/// [`TrackerError::Validation`] with every surviving message; an empty
/// message list falls back to [`TrackerError::Authentication`] for 401/403
/// and [`TrackerError::Transport`] otherwise.
#[must_use]
pub fn decode_error(status: u16, body: &str) -> TrackerError {
    let Ok(envelope) = serde_json::from_str::<Value>(body) else {
        return TrackerError::Undecodable(format!("HTTP {status} body is not JSON: {body}"));
    };

    let messages = error_messages(&envelope);
    if !messages.is_empty() {
        return TrackerError::Validation { messages };
    }
    if status == 401 || status == 403 {
        TrackerError::Authentication(format!("HTTP {status}"))
    } else {
        TrackerError::Transport(format!("HTTP {status}"))
    }
}

/// Extracts the displayable messages from a parsed error envelope.
///
/// Every string in `errorMessages` survives unless it equals
/// "login required" case-insensitively; every `errors` key/value pair is
/// rendered as `key: value` and appended.
#[must_use]
pub fn error_messages(envelope: &Value) -> Vec<String> {
    let mut messages = Vec::new();
    if let Some(list) = envelope.get("errorMessages").and_then(Value::as_array) {
        for entry in list {
            if let Some(text) = entry.as_str() {
                if !text.eq_ignore_ascii_case("login required") {
                    messages.push(text.to_string());
                }
            }
        }
    }
    if let Some(map) = envelope.get("errors").and_then(Value::as_object) {
        for (key, value) in map {
            let rendered = value.as_str().map_or_else(|| value.to_string(), str::to_string);
            messages.push(format!("{key}: {rendered}"));
        }
    }
    messages
}

/// Parses a 2xx body and extracts the record object.
///
/// With `root` set, the record lives under that key of the response
/// document (Redmine wraps its issue); without it the document itself is
/// the record (JIRA).
///
/// # Errors
///
/// Returns [`TrackerError::Undecodable`] with the raw body when parsing
/// fails or the root key is absent.
pub fn decode_success(body: &str, root: Option<&str>) -> Result<Value, TrackerError> {
    let document: Value = serde_json::from_str(body)
        .map_err(|_| TrackerError::Undecodable(format!("response is not JSON: {body}")))?;
    match root {
        None => Ok(document),
        Some(key) => document
            .get(key)
            .cloned()
            .ok_or_else(|| TrackerError::Undecodable(format!("response lacks an '{key}' key: {body}"))),
    }
}

/// Reads a non-empty string at a nested path of keys.
#[must_use]
pub fn string_at(value: &Value, path: &[&str]) -> Option<String> {
    let mut cursor = value;
    for key in path {
        cursor = cursor.get(key)?;
    }
    cursor.as_str().filter(|s| !s.is_empty()).map(str::to_string)
}
