//! Unit tests for the GenAI SDK

pub mod config_tests;
pub mod normalize_tests;
