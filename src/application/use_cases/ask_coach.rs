//! # Ask Coach Use Case
//!
//! チャットコーチへの質問ユースケース

use anyhow::{bail, Result};
use std::sync::Arc;

use crate::domain::entities::api_outcome::ApiOutcome;
use crate::domain::repositories::coach_repository::CoachRepository;

/// 質問ユースケース
pub struct AskCoachUseCase<C: CoachRepository> {
    coach_repository: Arc<C>,
}

impl<C: CoachRepository> AskCoachUseCase<C> {
    pub fn new(coach_repository: Arc<C>) -> Self {
        Self { coach_repository }
    }

    /// 質問を送る
    ///
    /// # Returns
    ///
    /// AIの回答。サービスの失敗は `ApiOutcome::Failure` として返る
    ///
    /// # Errors
    ///
    /// 質問が空白のみの場合（ネットワーク呼び出しは行わない）
    pub async fn execute(&self, question: &str) -> Result<ApiOutcome> {
        let question = question.trim();
        if question.is_empty() {
            bail!("Question must not be empty");
        }

        Ok(self.coach_repository.ask(question).await)
    }
}
