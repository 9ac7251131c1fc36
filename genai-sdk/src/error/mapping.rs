//! Error mapping for remote API responses
//!
//! Converts non-success HTTP responses into `ServiceError` values.

use reqwest::StatusCode;
use serde_json::Value;

use super::{ErrorContext, ServiceError};

/// Longest body excerpt kept in a message when the body is not JSON
const BODY_EXCERPT_LEN: usize = 200;

/// Map a Gemini API error body to a ServiceError
///
/// Gemini reports errors as `{"error": {"code": 429, "message": "...", "status": "RESOURCE_EXHAUSTED"}}`.
pub fn map_gemini_error(status: StatusCode, json: &Value, context: &mut ErrorContext) -> ServiceError {
    context.service = "gemini".to_string();

    let error = json.get("error");

    if let Some(remote_status) = error
        .and_then(|e| e.get("status"))
        .and_then(|s| s.as_str())
    {
        context.error_code = Some(remote_status.to_string());
    }

    let message = error
        .and_then(|e| e.get("message"))
        .or_else(|| json.get("message"))
        .and_then(|m| m.as_str())
        .unwrap_or("Unknown Gemini error");

    match context.error_code.as_deref() {
        Some("RESOURCE_EXHAUSTED") => ServiceError::rate_limit(message),
        Some("UNAUTHENTICATED") => ServiceError::authentication(message),
        Some("PERMISSION_DENIED") => ServiceError::authorization(message),
        Some("NOT_FOUND") => ServiceError::not_found(message),
        Some("DEADLINE_EXCEEDED") => ServiceError::timeout(message),
        _ => map_status(status, message),
    }
}

/// Map a generic HTTP error to a ServiceError
pub fn map_http_error(status: StatusCode, body: &str, context: &mut ErrorContext) -> ServiceError {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        if context.service == "gemini" {
            return map_gemini_error(status, &json, context);
        }

        let message = json
            .get("message")
            .or_else(|| json.get("error"))
            .and_then(|m| m.as_str())
            .unwrap_or(body);

        return map_status(status, message);
    }

    let message = if body.trim().is_empty() {
        status.to_string()
    } else {
        format!("{}: {}", status, crate::util::truncate_string(body.trim(), BODY_EXCERPT_LEN))
    };

    map_status(status, message)
}

fn map_status(status: StatusCode, message: impl Into<String>) -> ServiceError {
    match status {
        StatusCode::UNAUTHORIZED => ServiceError::authentication(message),
        StatusCode::FORBIDDEN => ServiceError::authorization(message),
        StatusCode::TOO_MANY_REQUESTS => ServiceError::rate_limit(message),
        StatusCode::BAD_REQUEST => ServiceError::validation(message),
        StatusCode::NOT_FOUND => ServiceError::not_found(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => ServiceError::timeout(message),
        s if s.is_server_error() => ServiceError::service(message),
        _ => ServiceError::unknown(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_gemini_quota_error_maps_to_rate_limit() {
        let body = json!({
            "error": {
                "code": 429,
                "message": "Quota exceeded for model",
                "status": "RESOURCE_EXHAUSTED"
            }
        });
        let mut context = ErrorContext::new();

        let err = map_gemini_error(StatusCode::TOO_MANY_REQUESTS, &body, &mut context);

        assert!(matches!(err, ServiceError::RateLimit(ref m) if m == "Quota exceeded for model"));
        assert_eq!(context.service, "gemini");
        assert_eq!(context.error_code.as_deref(), Some("RESOURCE_EXHAUSTED"));
    }

    #[test]
    fn test_unknown_model_maps_to_not_found() {
        let body = r#"{"error": {"code": 404, "message": "models/nope is not found", "status": "NOT_FOUND"}}"#;
        let mut context = ErrorContext::for_service("gemini");

        let err = map_http_error(StatusCode::NOT_FOUND, body, &mut context);

        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[test]
    fn test_plain_text_body_is_kept_in_message() {
        let mut context = ErrorContext::for_service("gemini");

        let err = map_http_error(StatusCode::BAD_GATEWAY, "upstream went away", &mut context);

        assert!(matches!(err, ServiceError::Service(ref m) if m.contains("upstream went away")));
    }

    #[test]
    fn test_empty_body_uses_status_text() {
        let mut context = ErrorContext::for_service("other");

        let err = map_http_error(StatusCode::SERVICE_UNAVAILABLE, "", &mut context);

        assert!(err.to_string().contains("503"));
    }
}
