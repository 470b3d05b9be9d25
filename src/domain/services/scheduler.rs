//! # Schedule Generator
//!
//! ドリルプールと週あたりの練習時間から週間スケジュールを組み立てるサービス

use crate::domain::entities::drill::{Drill, DEFAULT_DRILL_MINUTES};
use crate::domain::entities::schedule::{Advisory, DaySession, WeeklySchedule};
use crate::domain::errors::ScheduleError;

/// 曜日ラベル（月曜始まり）
pub const WEEK_DAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// 1週間の時間数（週あたりの練習時間の上限）
pub const MAX_HOURS_PER_WEEK: f64 = 168.0;

/// スケジュール生成の設定
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduleConfig {
    /// 目標とする1セッションの長さ（分）
    pub target_session_minutes: f64,
    /// これを下回ると注意を出すセッションの長さ（分）
    pub min_session_minutes: f64,
    /// セッション時間の超過許容倍率
    pub overflow_factor: f64,
    /// 所要時間のないドリルに使う時間（分）
    pub default_drill_minutes: f64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            target_session_minutes: 90.0,
            min_session_minutes: 30.0,
            overflow_factor: 1.2,
            default_drill_minutes: DEFAULT_DRILL_MINUTES,
        }
    }
}

/// スケジュールジェネレータ
pub struct ScheduleGenerator {
    config: ScheduleConfig,
}

impl ScheduleConfig {
    /// 不正な値（非有限・0以下）をデフォルト値に置き換える
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let positive = |value: f64, fallback: f64, name: &str| {
            if value.is_finite() && value > 0.0 {
                value
            } else {
                log::warn!("Invalid {} ({}), using {}", name, value, fallback);
                fallback
            }
        };

        Self {
            target_session_minutes: positive(
                self.target_session_minutes,
                defaults.target_session_minutes,
                "target_session_minutes",
            ),
            min_session_minutes: if self.min_session_minutes.is_finite()
                && self.min_session_minutes >= 0.0
            {
                self.min_session_minutes
            } else {
                log::warn!(
                    "Invalid min_session_minutes ({}), using {}",
                    self.min_session_minutes,
                    defaults.min_session_minutes
                );
                defaults.min_session_minutes
            },
            overflow_factor: positive(
                self.overflow_factor,
                defaults.overflow_factor,
                "overflow_factor",
            ),
            default_drill_minutes: positive(
                self.default_drill_minutes,
                defaults.default_drill_minutes,
                "default_drill_minutes",
            ),
        }
    }
}

impl ScheduleGenerator {
    /// 設定値は `ScheduleConfig::sanitized` で検証してから使う
    pub fn new(config: ScheduleConfig) -> Self {
        Self {
            config: config.sanitized(),
        }
    }

    /// 週あたりのセッション数
    ///
    /// 目標セッション長で割って四捨五入し、1以上・曜日数以下に収める
    pub fn sessions_per_week(&self, total_minutes: f64) -> usize {
        let sessions = (total_minutes / self.config.target_session_minutes).round();
        (sessions.max(1.0) as usize).min(WEEK_DAYS.len())
    }

    /// 週間スケジュールを生成する
    ///
    /// ドリルはラウンドロビンで各曜日に割り当てる。ポインタは曜日をまたいで進み、
    /// 曜日ごとにリセットされない。収まらずに打ち切ったドリルも消費済みとなり、
    /// 翌日はその次のドリルから始まる。空のセッションには超過していても最初のドリルを入れる
    ///
    /// # Errors
    ///
    /// `hours_per_week` が0より大きく168以下の有限値でない場合は `ScheduleError::InvalidHours`
    pub fn generate(
        &self,
        drill_pool: &[Drill],
        hours_per_week: f64,
    ) -> Result<WeeklySchedule, ScheduleError> {
        if !hours_per_week.is_finite()
            || hours_per_week <= 0.0
            || hours_per_week > MAX_HOURS_PER_WEEK
        {
            return Err(ScheduleError::InvalidHours(hours_per_week));
        }

        let total_minutes = hours_per_week * 60.0;
        let sessions_per_week = self.sessions_per_week(total_minutes);
        let minutes_per_session = (total_minutes / sessions_per_week as f64).floor();

        let mut schedule = WeeklySchedule {
            sessions: Vec::new(),
            minutes_per_session,
            advisories: Vec::new(),
        };

        if drill_pool.is_empty() {
            log::info!("Drill pool is empty, no schedule generated");
            schedule.advisories.push(Advisory::EmptyDrillPool);
            return Ok(schedule);
        }

        if minutes_per_session < self.config.min_session_minutes {
            log::warn!("Sessions are short ({}m)", minutes_per_session);
            schedule.advisories.push(Advisory::SessionsTooShort {
                minutes_per_session,
            });
        }

        let overflow_limit = minutes_per_session * self.config.overflow_factor;
        let mut drill_idx = 0usize;

        for day in WEEK_DAYS.iter().take(sessions_per_week) {
            let mut session = DaySession::new(*day);

            while session.total_minutes < minutes_per_session {
                let drill = &drill_pool[drill_idx % drill_pool.len()];
                drill_idx += 1;
                let minutes = drill.effective_minutes(self.config.default_drill_minutes);

                if session.is_empty() || session.total_minutes + minutes <= overflow_limit {
                    session.push(drill, self.config.default_drill_minutes);
                } else {
                    break;
                }
            }

            log::debug!(
                "{}: {} drills, {}m",
                session.day_label,
                session.drills.len(),
                session.total_minutes
            );
            schedule.sessions.push(session);
        }

        Ok(schedule)
    }
}

impl Default for ScheduleGenerator {
    fn default() -> Self {
        Self::new(ScheduleConfig::default())
    }
}
