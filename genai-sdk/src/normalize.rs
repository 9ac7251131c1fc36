//! Response normalization
//!
//! Models asked for JSON still sometimes wrap it in a markdown code fence.
//! These helpers strip such fences and decode the payload.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::GenerationError;

const FENCE: &str = "```";

/// Remove a leading ```` ```json ```` (or bare ```` ``` ````) fence and a trailing fence
pub fn strip_code_fence(raw: &str) -> &str {
    let mut text = raw.trim();

    if let Some(rest) = text.strip_prefix(FENCE) {
        let rest = rest.strip_prefix("json").unwrap_or(rest);
        let rest = rest.strip_prefix("JSON").unwrap_or(rest);
        text = rest;
    }

    if let Some(rest) = text.trim_end().strip_suffix(FENCE) {
        text = rest;
    }

    text.trim()
}

/// Decode a structured answer into a JSON value
pub fn parse_json_payload(raw: &str) -> Result<Value, GenerationError> {
    let payload = strip_code_fence(raw);
    if payload.is_empty() {
        return Err(GenerationError::malformed("empty response body"));
    }

    serde_json::from_str(payload)
        .map_err(|e| GenerationError::malformed(format!("invalid JSON: {}", e)))
}

/// Decode a structured answer into `T`.
///
/// The payload must be a JSON object; arrays, scalars and any other shape
/// mismatch are reported as a malformed response.
pub fn parse_structured<T: DeserializeOwned>(raw: &str) -> Result<T, GenerationError> {
    let value = parse_json_payload(raw)?;
    if !value.is_object() {
        return Err(GenerationError::malformed("expected a JSON object"));
    }
    serde_json::from_value(value)
        .map_err(|e| GenerationError::malformed(format!("unexpected response shape: {}", e)))
}
