// smartbridge-rs/src/lib.rs
// SmartBridge: English to Japanese translation and reply critique

pub mod bridge;
pub mod critique;
pub mod prompts;
pub mod web;


pub use bridge::SmartBridge;
pub use critique::{CritiqueResult, Suggestion};
