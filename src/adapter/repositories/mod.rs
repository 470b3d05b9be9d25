//! Repository Implementations
//!
//! Domain層のRepositoryトレイトの実装

pub mod gemini_coach_repository;
pub mod json_state_repository;
