// smartbridge-rs/src/bridge.rs
// Translation and critique flows on top of the fallback client

use std::sync::Arc;

use genai_sdk::normalize::parse_structured;
use genai_sdk::{
    CandidateList, FallbackClient, GeminiConfig, GenerationBackend, GenerationError, GenerationRequest,
};

use crate::critique::CritiqueResult;
use crate::prompts::{build_critique_prompt, build_translation_prompt, critique_response_schema, is_blank};

/// Shown when the model answered with no text
pub const TRANSLATION_EMPTY_MESSAGE: &str = "翻訳に失敗しました";

/// Prefix of the text shown when no model could translate
pub const TRANSLATION_ERROR_PREFIX: &str = "エラーが発生しました";

/// Entry point for both user-facing flows. Immutable after construction
/// and shared across requests behind an `Arc`.
#[derive(Debug, Clone)]
pub struct SmartBridge {
    client: FallbackClient,
    translation_temperature: f32,
}

impl SmartBridge {
    pub fn new(backend: Arc<dyn GenerationBackend>, candidates: CandidateList, translation_temperature: f32) -> Self {
        Self {
            client: FallbackClient::new(backend, candidates),
            translation_temperature,
        }
    }

    /// Build from a loaded config, using `backend` for the actual calls
    pub fn from_config(backend: Arc<dyn GenerationBackend>, config: &GeminiConfig) -> Self {
        Self::new(backend, config.model_candidates.clone(), config.translation_temperature)
    }

    pub fn candidates(&self) -> &CandidateList {
        self.client.candidates()
    }

    /// Translate an English message into Japanese.
    ///
    /// Never fails: blank input yields `""` without a remote call, and
    /// failures come back as a displayable Japanese message.
    pub async fn translate(&self, text: &str) -> String {
        if is_blank(text) {
            return String::new();
        }

        let request =
            GenerationRequest::plain(build_translation_prompt(text)).with_temperature(self.translation_temperature);

        match self.client.generate_with_fallback(&request).await {
            Ok(result) if result.text.trim().is_empty() => {
                log::warn!("Model {} returned an empty translation", result.model);
                TRANSLATION_EMPTY_MESSAGE.to_string()
            }
            Ok(result) => result.text,
            Err(err) => {
                log::error!("Translation failed: {}", err);
                format!("{}: {}", TRANSLATION_ERROR_PREFIX, err.user_message())
            }
        }
    }

    /// Analyse a Japanese reply in the context of the partner's message.
    ///
    /// Callers are expected to reject a blank reply first.
    pub async fn try_critique(&self, reply: &str, context: &str) -> Result<CritiqueResult, GenerationError> {
        let prompt = build_critique_prompt(reply, context);
        let request = GenerationRequest::structured(prompt.prompt)
            .with_system_instruction(prompt.system_instruction)
            .with_response_schema(critique_response_schema());

        let result = self.client.generate_with_fallback(&request).await?;
        let critique: CritiqueResult = parse_structured(&result.text).map_err(|err| {
            log::warn!("Model {} returned an unusable critique: {}", result.model, err);
            err
        })?;

        Ok(critique.with_original_text(reply))
    }

    /// Like `try_critique`, but any failure becomes `None` after being logged
    pub async fn critique(&self, reply: &str, context: &str) -> Option<CritiqueResult> {
        match self.try_critique(reply, context).await {
            Ok(result) => Some(result),
            Err(err) => {
                log::error!("Critique failed: {}", err);
                None
            }
        }
    }
}
