//! Model fallback
//!
//! A `FallbackClient` walks an ordered `CandidateList` and sends the same
//! request to each model in turn until one of them answers. Every candidate
//! gets exactly one attempt per request.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::config::DEFAULT_MODEL_CANDIDATES;
use crate::core::{GenerationBackend, GenerationRequest, GenerationResult};
use crate::error::{CandidateFailure, GenerationError, RequestFailure, Result, ServiceError};
use crate::util::{generate_request_id, measure_time_async, sanitize_for_logging};

/// Opaque identifier of a remote model
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelCandidate(String);

impl ModelCandidate {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModelCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModelCandidate {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Ordered, non-empty list of candidates; index 0 is tried first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateList {
    candidates: Vec<ModelCandidate>,
}

impl CandidateList {
    /// Build a list from model identifiers, rejecting an empty or blank list.
    ///
    /// Blank identifiers are skipped and a repeated identifier keeps only its
    /// first position, so no model is ever tried twice for one request.
    pub fn new<I, S>(ids: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let candidates: Vec<ModelCandidate> = ids
            .into_iter()
            .map(|id| Into::<String>::into(id).trim().to_string())
            .filter(|id| !id.is_empty() && seen.insert(id.clone()))
            .map(ModelCandidate::new)
            .collect();

        if candidates.is_empty() {
            return Err(ServiceError::configuration(
                "model candidate list must contain at least one model",
            ));
        }

        Ok(Self { candidates })
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModelCandidate> {
        self.candidates.iter()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Always false: a list is non-empty by construction. Kept alongside
    /// `len` for clippy's `len_without_is_empty`.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn first(&self) -> &ModelCandidate {
        // non-empty by construction
        &self.candidates[0]
    }
}

impl Default for CandidateList {
    fn default() -> Self {
        Self {
            candidates: DEFAULT_MODEL_CANDIDATES
                .iter()
                .map(|id| ModelCandidate::new(*id))
                .collect(),
        }
    }
}

/// Client that retries a request across model candidates
#[derive(Clone)]
pub struct FallbackClient {
    backend: Arc<dyn GenerationBackend>,
    candidates: CandidateList,
}

impl fmt::Debug for FallbackClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FallbackClient")
            .field("candidates", &self.candidates)
            .finish_non_exhaustive()
    }
}

impl FallbackClient {
    pub fn new(backend: Arc<dyn GenerationBackend>, candidates: CandidateList) -> Self {
        Self { backend, candidates }
    }

    pub fn candidates(&self) -> &CandidateList {
        &self.candidates
    }

    /// Send `request` to each candidate in order and return the first answer.
    ///
    /// Attempts are strictly sequential. When every candidate fails the
    /// error carries the last failure message plus every individual failure.
    pub async fn generate_with_fallback(
        &self,
        request: &GenerationRequest,
    ) -> std::result::Result<GenerationResult, GenerationError> {
        let request_id = generate_request_id();
        let mut failures = Vec::with_capacity(self.candidates.len());

        for candidate in self.candidates.iter() {
            log::debug!("[{}] trying model {}", request_id, candidate);

            let (outcome, elapsed) =
                measure_time_async(|| self.backend.generate(candidate.as_str(), request)).await;

            match outcome {
                Ok(text) => {
                    log::info!(
                        "[{}] model {} answered in {} ms after {} failed attempt(s)",
                        request_id,
                        candidate,
                        elapsed.as_millis(),
                        failures.len()
                    );
                    return Ok(GenerationResult {
                        text,
                        model: candidate.as_str().to_string(),
                    });
                }
                Err(err) => {
                    let message = sanitize_for_logging(&err.to_string());
                    log::warn!(
                        "[{}] model {} failed (status {}, {}): {}",
                        request_id,
                        candidate,
                        err.status_code().map_or_else(|| "-".to_string(), |code| code.to_string()),
                        err.error_code().unwrap_or("-"),
                        message
                    );
                    failures.push(CandidateFailure {
                        candidate: candidate.clone(),
                        message,
                    });
                }
            }
        }

        let failure = RequestFailure::from_failures(failures);
        log::error!("[{}] {}", request_id, failure);
        Err(GenerationError::ExhaustedCandidates(failure))
    }
}
