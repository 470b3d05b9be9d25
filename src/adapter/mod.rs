//! Adapter Layer
//!
//! 外部システム（Gemini API, ファイルシステム）との統合

pub mod config;
pub mod gemini;
pub mod repositories;
