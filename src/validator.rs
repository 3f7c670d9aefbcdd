// Submission validation: loosely typed JSON payload -> ResultRecord

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::models::{ResultRecord, SubmissionMeta, TEST_METHOD};

/// Payload keys that must all be present and numeric.
pub const REQUIRED_FIELDS: [&str; 5] = ["download", "upload", "ping", "jitter", "packetLoss"];

const UNKNOWN: &str = "Unknown";

/// Parse a raw request body into a JSON object.
pub fn parse_payload(body: &[u8]) -> Result<Map<String, Value>, ValidationError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| ValidationError::InvalidBody(format!("request body is not valid JSON: {e}")))?;
    match value {
        Value::Object(map) => Ok(map),
        other => Err(ValidationError::InvalidBody(format!(
            "request body must be a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

/// Check required fields, coerce numerics, apply defaults and stamp server-side fields.
/// No range checks: negative or out-of-range values are stored as sent.
pub fn validate_and_build(
    payload: &Map<String, Value>,
    meta: &SubmissionMeta,
    now: DateTime<Utc>,
) -> Result<ResultRecord, ValidationError> {
    if !REQUIRED_FIELDS.iter().all(|k| payload.contains_key(*k)) {
        return Err(ValidationError::MissingFields);
    }

    // Payload `ip` is the public address the client saw at the measurement provider.
    // It takes precedence; the proxy-resolved request IP is only a fallback.
    let ip = match payload.get("ip") {
        Some(v) => text_value(v),
        None => meta.client_ip.clone().unwrap_or_default(),
    };

    Ok(ResultRecord {
        timestamp: format_timestamp(now),
        ip,
        country: text_or(payload, "country", UNKNOWN),
        colo: text_or(payload, "colo", ""),
        server: text_or(payload, "server", UNKNOWN),
        download: required_number(payload, "download")?,
        upload: required_number(payload, "upload")?,
        ping: required_number(payload, "ping")?,
        jitter: required_number(payload, "jitter")?,
        packet_loss: required_number(payload, "packetLoss")?,
        user_agent: meta
            .user_agent
            .clone()
            .unwrap_or_else(|| UNKNOWN.to_string()),
        client_time: text_or(payload, "timestamp", ""),
        test_method: TEST_METHOD.to_string(),
    })
}

/// ISO-8601 UTC with microseconds and a trailing `Z`.
pub fn format_timestamp(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}

fn required_number(payload: &Map<String, Value>, key: &'static str) -> Result<f64, ValidationError> {
    let value = payload.get(key).ok_or(ValidationError::MissingFields)?;
    to_float(value).ok_or_else(|| ValidationError::InvalidFormat {
        field: key,
        reason: format!("could not convert {} to a finite number", value),
    })
}

/// Infinite and NaN results are rejected, so `"1e400"` fails like a bare `1e400` does.
fn to_float(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    };
    n.filter(|f| f.is_finite())
}

fn text_or(payload: &Map<String, Value>, key: &str, default: &str) -> String {
    payload
        .get(key)
        .map(text_value)
        .unwrap_or_else(|| default.to_string())
}

/// Strings verbatim, null as empty, anything else as its JSON text.
fn text_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
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
