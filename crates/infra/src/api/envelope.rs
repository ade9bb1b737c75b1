//! Provider response envelope decoding
//!
//! Face endpoints wrap their payload as
//! `{"error_code": 0, "error_msg": "SUCCESS", "log_id": .., "result": {..}}`.
//! OCR endpoints return their fields at top level and only add `error_code` /
//! `error_msg` on failure. The token endpoint reports failures OAuth-style as
//! `{"error": .., "error_description": ..}`.

use facelink_domain::constants::VENDOR_SUCCESS_CODE;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::errors::ApiError;

/// Decode a response whose payload sits under `result`.
///
/// `result` may be nested JSON or a JSON document encoded as a string.
pub fn decode_enveloped<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    let mut envelope = parse_object(body)?;
    if let Some(err) = vendor_error(&envelope) {
        return Err(err);
    }

    match envelope.remove("result") {
        Some(Value::String(encoded)) => serde_json::from_str(&encoded)
            .map_err(|e| ApiError::Decode(format!("invalid string-encoded result: {e}"))),
        Some(Value::Null) | None => {
            Err(ApiError::Decode("response envelope has no result".to_string()))
        }
        Some(nested) => serde_json::from_value(nested)
            .map_err(|e| ApiError::Decode(format!("unexpected result shape: {e}"))),
    }
}

/// Decode a response whose payload is the whole top-level object.
pub fn decode_plain<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    let object = parse_object(body)?;
    if let Some(err) = vendor_error(&object) {
        return Err(err);
    }

    serde_json::from_value(Value::Object(object))
        .map_err(|e| ApiError::Decode(format!("unexpected response shape: {e}")))
}

/// Build the error for a non-success HTTP status.
///
/// Prefers the provider's own code and message when the body carries them,
/// otherwise falls back to the HTTP status.
pub fn status_error(status: StatusCode, body: &str) -> ApiError {
    if let Ok(object) = parse_object(body) {
        if let Some(err) = vendor_error(&object) {
            return err;
        }
    }

    let message = if body.trim().is_empty() {
        status.canonical_reason().unwrap_or("unknown status").to_string()
    } else {
        body.trim().to_string()
    };
    ApiError::Vendor { code: status.as_u16().to_string(), message }
}

fn parse_object(body: &str) -> Result<Map<String, Value>, ApiError> {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(object)) => Ok(object),
        Ok(other) => Err(ApiError::Decode(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
        Err(e) => Err(ApiError::Decode(format!("response is not valid JSON: {e}"))),
    }
}

fn vendor_error(object: &Map<String, Value>) -> Option<ApiError> {
    if let Some(code) = object.get("error_code").and_then(failure_code) {
        let message = object
            .get("error_msg")
            .and_then(Value::as_str)
            .unwrap_or("unknown provider error")
            .to_string();
        return Some(ApiError::Vendor { code, message });
    }

    if let Some(code) = object.get("error").and_then(Value::as_str) {
        let message = object
            .get("error_description")
            .and_then(Value::as_str)
            .unwrap_or(code)
            .to_string();
        return Some(ApiError::Vendor { code: code.to_string(), message });
    }

    None
}

/// Returns the code as a string unless it denotes success.
fn failure_code(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) if n.as_i64() == Some(VENDOR_SUCCESS_CODE) => None,
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if s.is_empty() || s == "0" => None,
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
