//! Core abstractions for the GenAI SDK
//!
//! - `GenerationBackend`: performs exactly one generation call against one model
//! - `GenerationRequest`: what to ask, in which output mode
//! - `GenerationResult`: the text a model answered with, and which model it was

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// Output mode requested from the remote model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    /// Free-form text
    #[default]
    PlainText,

    /// Output constrained to valid JSON (`application/json`)
    StructuredJson,
}

impl ResponseFormat {
    /// MIME type to send to the remote service, if any
    pub fn mime_type(&self) -> Option<&'static str> {
        match self {
            ResponseFormat::PlainText => None,
            ResponseFormat::StructuredJson => Some("application/json"),
        }
    }
}

/// A single generation request, built fresh for every user action
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GenerationRequest {
    /// User prompt text
    pub prompt: String,

    /// Requested output mode
    pub response_format: ResponseFormat,

    /// Optional system instruction
    pub system_instruction: Option<String>,

    /// Optional response schema, only meaningful in structured mode
    pub response_schema: Option<Value>,

    /// Optional sampling temperature
    pub temperature: Option<f32>,
}

impl GenerationRequest {
    /// Request free-form text
    pub fn plain(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Self::default()
        }
    }

    /// Request JSON output
    pub fn structured(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            response_format: ResponseFormat::StructuredJson,
            ..Self::default()
        }
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    pub fn with_response_schema(mut self, schema: Value) -> Self {
        self.response_schema = Some(schema);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Successful answer from one model candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    /// Raw text returned by the model
    pub text: String,

    /// Identifier of the candidate that produced it
    pub model: String,
}

/// Capability: attempt a single generation call against one model.
///
/// Implementations must not retry internally; retrying on another model
/// is the job of [`crate::fallback::FallbackClient`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Run `request` against the model identified by `model`, returning its text
    async fn generate(&self, model: &str, request: &GenerationRequest) -> Result<String>;
}
