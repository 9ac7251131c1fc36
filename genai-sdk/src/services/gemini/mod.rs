//! Gemini API client implementation
//!
//! Talks to the `generateContent` endpoint of the Generative Language API.
//! One `GeminiClient` owns one pooled `reqwest::Client` and is shared by
//! every request the process handles.

mod models;
pub use models::*;

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;

use crate::config::{GeminiConfig, ServiceConfig, DEFAULT_GEMINI_BASE_URL, DEFAULT_TIMEOUT_SECONDS};
use crate::core::{GenerationBackend, GenerationRequest};
use crate::error::{ErrorContext, Result, ServiceError};
use crate::services::common::{build_http_client, parse_error_response, UserAgent};

const SERVICE_NAME: &str = "gemini";
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini API client
#[derive(Clone)]
pub struct GeminiClient {
    http_client: Client,
    api_key: String,
    base_url: String,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Create a client from a loaded configuration
    pub fn new_with_config(config: GeminiConfig) -> Result<Self> {
        config.validate()?;

        let http_client = build_http_client(
            Some(UserAgent {
                extra: Some("Gemini-Client".to_string()),
                ..UserAgent::default()
            }),
            Some(Duration::from_secs(config.timeout_seconds)),
        )?;

        Ok(Self {
            http_client,
            api_key: config.api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a new builder for the Gemini client
    pub fn builder() -> GeminiClientBuilder {
        GeminiClientBuilder::default()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }

    /// Call `generateContent` on one model and return the decoded body
    pub async fn generate_content(
        &self,
        model: &str,
        body: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let url = self.endpoint(model);
        debug!("Sending request to Gemini: POST {}", url);

        let response = self
            .http_client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| ServiceError::from(e).with_context(ErrorContext::for_service(SERVICE_NAME).model(model)))?;

        if !response.status().is_success() {
            return Err(parse_error_response(SERVICE_NAME, model, response).await);
        }

        response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| ServiceError::parsing(format!("Failed to parse Gemini response: {}", e)))
    }
}

#[async_trait]
impl GenerationBackend for GeminiClient {
    async fn generate(&self, model: &str, request: &GenerationRequest) -> Result<String> {
        let body = GenerateContentRequest::from(request);
        let response = self.generate_content(model, &body).await?;

        match response.text() {
            Some(text) => Ok(text),
            None => {
                let reason = response.block_reason().unwrap_or("no candidates returned");
                Err(ServiceError::blocked(format!("model {} returned no answer: {}", model, reason)))
            }
        }
    }
}

/// Builder for Gemini client
#[derive(Default)]
pub struct GeminiClientBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    timeout_seconds: Option<u64>,
}

impl GeminiClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API key
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the base URL
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the timeout in seconds
    pub fn timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = Some(seconds);
        self
    }

    /// Build the client
    pub fn build(self) -> Result<GeminiClient> {
        let api_key = self
            .api_key
            .ok_or_else(|| ServiceError::configuration("Gemini API key is required"))?;

        let mut config = GeminiConfig::with_api_key(api_key);
        config.base_url = self.base_url.unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string());
        config.timeout_seconds = self.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS);

        GeminiClient::new_with_config(config)
    }
}
