//! Service-specific client implementations

pub mod gemini;
mod common;
