//! # Generate Schedule Use Case
//!
//! ドリルバンクから週間スケジュールを生成して保存するユースケース

use anyhow::{Context, Result};
use log::{info, warn};
use std::sync::Arc;

use crate::domain::entities::drill_bank::DrillBank;
use crate::domain::entities::schedule::WeeklySchedule;
use crate::domain::repositories::state_repository::{
    StateRepository, DRILL_BANK_KEY, WEEKLY_SCHEDULE_KEY,
};
use crate::domain::services::scheduler::ScheduleGenerator;

/// スケジュール生成ユースケース
pub struct GenerateScheduleUseCase<S: StateRepository> {
    state_repository: Arc<S>,
    generator: ScheduleGenerator,
}

impl<S: StateRepository> GenerateScheduleUseCase<S> {
    pub fn new(state_repository: Arc<S>, generator: ScheduleGenerator) -> Self {
        Self {
            state_repository,
            generator,
        }
    }

    /// スケジュールを生成して保存する
    ///
    /// 保存済みドリルのうち不正なものは除外してから使う。
    /// ドリルプールが空の場合も空のスケジュール（注意付き）を保存する
    ///
    /// # Errors
    ///
    /// 時間が不正な場合、または状態の読み書きに失敗した場合
    pub async fn execute(&self, hours_per_week: f64) -> Result<WeeklySchedule> {
        let mut drill_bank: DrillBank = self
            .state_repository
            .load(DRILL_BANK_KEY)
            .await
            .context("Failed to load drill bank")?
            .unwrap_or_default();

        let dropped = drill_bank.retain_valid();
        if dropped > 0 {
            warn!("Ignoring {} malformed drills from the drill bank", dropped);
        }

        let schedule = self.generator.generate(drill_bank.drills(), hours_per_week)?;
        info!(
            "Generated {} sessions of {} minutes from {} drills",
            schedule.sessions.len(),
            schedule.minutes_per_session,
            drill_bank.len()
        );

        self.state_repository
            .save(WEEKLY_SCHEDULE_KEY, &schedule)
            .await
            .context("Failed to save weekly schedule")?;

        Ok(schedule)
    }
}
