//! Gemini Integration
//!
//! Google Gemini generateContent API との統合

pub mod client;
pub mod models;
pub mod prompts;
pub mod resilient_caller;
pub mod retry;
