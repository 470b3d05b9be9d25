//! # Review State Use Case
//!
//! 保存済みのドリルバンク・進捗・スケジュールを読み出すユースケース

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::domain::entities::drill_bank::DrillBank;
use crate::domain::entities::progress::ProgressState;
use crate::domain::entities::schedule::WeeklySchedule;
use crate::domain::repositories::state_repository::{
    StateRepository, DRILL_BANK_KEY, PROGRESS_KEY, WEEKLY_SCHEDULE_KEY,
};

/// 状態参照ユースケース
pub struct ReviewStateUseCase<S: StateRepository> {
    state_repository: Arc<S>,
}

impl<S: StateRepository> ReviewStateUseCase<S> {
    pub fn new(state_repository: Arc<S>) -> Self {
        Self { state_repository }
    }

    /// ドリルバンク（未保存なら空）
    pub async fn drill_bank(&self) -> Result<DrillBank> {
        Ok(self
            .state_repository
            .load(DRILL_BANK_KEY)
            .await
            .context("Failed to load drill bank")?
            .unwrap_or_default())
    }

    /// 進捗（未保存なら空）
    pub async fn progress(&self) -> Result<ProgressState> {
        Ok(self
            .state_repository
            .load(PROGRESS_KEY)
            .await
            .context("Failed to load progress")?
            .unwrap_or_default())
    }

    /// 最後に生成したスケジュール
    pub async fn last_schedule(&self) -> Result<Option<WeeklySchedule>> {
        self.state_repository
            .load(WEEKLY_SCHEDULE_KEY)
            .await
            .context("Failed to load weekly schedule")
    }
}
