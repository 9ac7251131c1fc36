//! # GenAI SDK
//!
//! Client-side plumbing for talking to a hosted generative-language model
//! in the SmartBridge project.
//!
//! This crate provides:
//!
//! - A `GenerationBackend` seam: one generation call against one model
//! - A typed Gemini `generateContent` client implementing that seam
//! - `FallbackClient`: tries an ordered list of model candidates, first success wins
//! - A response normalizer for fenced / structured JSON output
//! - Error types for per-candidate transport failures and exhausted fallbacks
//! - Configuration providers backed by environment variables or memory

pub mod core;
pub use core::{GenerationBackend, GenerationRequest, GenerationResult, ResponseFormat};

pub mod services;
pub use services::gemini;

pub mod error;
pub use error::{CandidateFailure, ErrorContext, GenerationError, RequestFailure, Result, ServiceError};

pub mod fallback;
pub use fallback::{CandidateList, FallbackClient, ModelCandidate};

pub mod normalize;

pub mod config;
pub use config::{ConfigProvider, ConfigProviderExt, GeminiConfig, ServiceConfig};

pub mod util;

#[cfg(test)]
mod tests;
