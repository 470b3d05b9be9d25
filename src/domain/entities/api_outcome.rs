//! # API Outcome
//!
//! 生成AI呼び出しの結果。失敗も例外ではなく値として返す

use serde::{Deserialize, Serialize};

/// 生成AI呼び出しの結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "text", rename_all = "lowercase")]
pub enum ApiOutcome {
    /// 抽出されたテキスト
    Success(String),
    /// リトライを使い切った後のエラーメッセージ
    Failure(String),
}

impl ApiOutcome {
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, ApiOutcome::Success(_))
    }

    /// 成功時のテキストを返す
    pub fn text(&self) -> Option<&str> {
        match self {
            ApiOutcome::Success(text) => Some(text),
            ApiOutcome::Failure(_) => None,
        }
    }

    /// 失敗時のメッセージを返す
    pub fn failure_message(&self) -> Option<&str> {
        match self {
            ApiOutcome::Success(_) => None,
            ApiOutcome::Failure(message) => Some(message),
        }
    }

    /// UIにそのまま表示できる文字列
    pub fn render(&self) -> String {
        match self {
            ApiOutcome::Success(text) => text.clone(),
            ApiOutcome::Failure(message) => format!("Error: {}", message),
        }
    }

    /// `Result` に変換する
    pub fn into_result(self) -> Result<String, String> {
        match self {
            ApiOutcome::Success(text) => Ok(text),
            ApiOutcome::Failure(message) => Err(message),
        }
    }
}
