//! Error handling for the GenAI SDK
//!
//! Two layers of failure exist:
//! - `ServiceError`: one call against one model candidate failed
//! - `GenerationError`: the whole request failed, either because every
//!   candidate failed or because the answer could not be decoded

use std::fmt;
use thiserror::Error;

use crate::fallback::ModelCandidate;

pub mod mapping;

/// Result type for GenAI SDK operations
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Failure of a single call to the remote service
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Network or connection errors
    #[error("Network error: {0}")]
    Network(String),

    /// Missing or rejected API key
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Key lacks permission for the model or project
    #[error("Authorization error: {0}")]
    Authorization(String),

    /// Quota or rate limit exhausted
    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    /// Remote service reported an internal problem
    #[error("Service error: {0}")]
    Service(String),

    /// Request rejected as invalid
    #[error("Validation error: {0}")]
    Validation(String),

    /// Response body could not be decoded
    #[error("Parsing error: {0}")]
    Parsing(String),

    /// The prompt or answer was withheld by the model's safety filter
    #[error("Blocked: {0}")]
    Blocked(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Timeout errors
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// Unknown model or endpoint
    #[error("Not found: {0}")]
    NotFound(String),

    /// Unknown errors
    #[error("Unknown error: {0}")]
    Unknown(String),

    /// Errors with additional context
    #[error("{inner}")]
    WithContext {
        inner: Box<ServiceError>,
        context: ErrorContext,
    },
}

impl ServiceError {
    pub fn network(message: impl Into<String>) -> Self {
        ServiceError::Network(message.into())
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        ServiceError::Authentication(message.into())
    }

    pub fn authorization(message: impl Into<String>) -> Self {
        ServiceError::Authorization(message.into())
    }

    pub fn rate_limit(message: impl Into<String>) -> Self {
        ServiceError::RateLimit(message.into())
    }

    pub fn service(message: impl Into<String>) -> Self {
        ServiceError::Service(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ServiceError::Validation(message.into())
    }

    pub fn parsing(message: impl Into<String>) -> Self {
        ServiceError::Parsing(message.into())
    }

    pub fn blocked(message: impl Into<String>) -> Self {
        ServiceError::Blocked(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        ServiceError::Configuration(message.into())
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        ServiceError::Timeout(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ServiceError::NotFound(message.into())
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        ServiceError::Unknown(message.into())
    }

    /// Add context to an existing error
    pub fn with_context(self, context: ErrorContext) -> Self {
        ServiceError::WithContext {
            inner: Box::new(self),
            context,
        }
    }

    /// The error without any context wrappers
    pub fn root(&self) -> &ServiceError {
        match self {
            ServiceError::WithContext { inner, .. } => inner.root(),
            other => other,
        }
    }

    /// Get the HTTP status code if available
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ServiceError::WithContext { context, inner } => {
                context.status_code.or_else(|| inner.status_code())
            }
            _ => None,
        }
    }

    /// Get the remote error status (e.g. `RESOURCE_EXHAUSTED`) if available
    pub fn error_code(&self) -> Option<&str> {
        match self {
            ServiceError::WithContext { context, inner } => {
                context.error_code.as_deref().or_else(|| inner.error_code())
            }
            _ => None,
        }
    }
}

/// Error context information
#[derive(Debug, Clone)]
pub struct ErrorContext {
    /// Service that generated the error
    pub service: String,

    /// When the error was observed
    pub timestamp: Option<chrono::DateTime<chrono::Utc>>,

    /// HTTP status code if applicable
    pub status_code: Option<u16>,

    /// Service-specific error status
    pub error_code: Option<String>,

    /// Model the call was addressed to
    pub model: Option<String>,
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self {
            service: "unknown".to_string(),
            timestamp: Some(chrono::Utc::now()),
            status_code: None,
            error_code: None,
            model: None,
        }
    }
}

impl ErrorContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new error context for a specific service
    pub fn for_service(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            ..Self::default()
        }
    }

    pub fn status_code(mut self, code: u16) -> Self {
        self.status_code = Some(code);
        self
    }

    pub fn error_code(mut self, code: impl Into<String>) -> Self {
        self.error_code = Some(code.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

/// Convert reqwest errors to ServiceError
impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        let context = ErrorContext::for_service("http_client");

        let service_error = if err.is_timeout() {
            ServiceError::timeout(format!("Request timed out: {}", err))
        } else if err.is_connect() {
            ServiceError::network(format!("Connection error: {}", err))
        } else if err.is_decode() {
            ServiceError::parsing(format!("Response decode error: {}", err))
        } else if err.is_builder() {
            ServiceError::validation(format!("Invalid request: {}", err))
        } else {
            ServiceError::network(format!("HTTP client error: {}", err))
        };

        if let Some(status) = err.status() {
            service_error.with_context(context.status_code(status.as_u16()))
        } else {
            service_error.with_context(context)
        }
    }
}

/// Convert serde_json errors to ServiceError
impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::parsing(format!("JSON error: {}", err))
            .with_context(ErrorContext::for_service("json"))
    }
}

/// One failed attempt inside a fallback run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFailure {
    pub candidate: ModelCandidate,
    pub message: String,
}

/// Every candidate was tried and none answered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestFailure {
    /// Message of the final failure
    pub last_error_message: String,

    /// Candidates in the order they were tried
    pub attempted_candidates: Vec<ModelCandidate>,

    /// Every failure, in attempt order
    pub failures: Vec<CandidateFailure>,
}

impl RequestFailure {
    /// Build from the ordered list of failures; `failures` must be non-empty
    pub(crate) fn from_failures(failures: Vec<CandidateFailure>) -> Self {
        let last_error_message = failures
            .last()
            .map(|f| f.message.clone())
            .unwrap_or_default();
        let attempted_candidates = failures.iter().map(|f| f.candidate.clone()).collect();

        Self {
            last_error_message,
            attempted_candidates,
            failures,
        }
    }
}

impl fmt::Display for RequestFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let attempted: Vec<&str> = self
            .attempted_candidates
            .iter()
            .map(ModelCandidate::as_str)
            .collect();
        write!(
            f,
            "all model candidates failed [{}]; last error: {}",
            attempted.join(", "),
            self.last_error_message
        )
    }
}

/// Failure of a whole generation request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// No candidate produced an answer
    #[error("{0}")]
    ExhaustedCandidates(RequestFailure),

    /// An answer arrived but did not decode into the expected shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl GenerationError {
    pub fn malformed(message: impl Into<String>) -> Self {
        GenerationError::MalformedResponse(message.into())
    }

    /// Message suitable for embedding in user-facing text
    pub fn user_message(&self) -> &str {
        match self {
            GenerationError::ExhaustedCandidates(failure) => &failure.last_error_message,
            GenerationError::MalformedResponse(message) => message,
        }
    }
}
