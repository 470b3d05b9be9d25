//! # Schedule Entities
//!
//! 週間トレーニングスケジュールのバリューオブジェクト

use serde::{Deserialize, Serialize};
use std::fmt;

use super::drill::Drill;

/// 1日分の練習セッション
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySession {
    /// 曜日ラベル（例: "Monday"）
    pub day_label: String,
    /// セッションに含まれるドリル（所要時間は確定済み）
    pub drills: Vec<Drill>,
    /// ドリルの合計時間（分）
    pub total_minutes: f64,
}

impl DaySession {
    /// 空のセッションを作成
    pub fn new(day_label: impl Into<String>) -> Self {
        Self {
            day_label: day_label.into(),
            drills: Vec::new(),
            total_minutes: 0.0,
        }
    }

    /// ドリルを追加し、合計時間を更新する
    ///
    /// 所要時間のないドリルは `fallback_minutes` で確定させてから記録する
    pub fn push(&mut self, drill: &Drill, fallback_minutes: f64) {
        let resolved = drill.with_resolved_duration(fallback_minutes);
        self.total_minutes += resolved.effective_minutes(fallback_minutes);
        self.drills.push(resolved);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.drills.is_empty()
    }
}

/// スケジュール生成時の注意事項
///
/// 出力そのものは変えない、ユーザー向けの通知
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Advisory {
    /// ドリルバンクが空でスケジュールを生成できなかった
    EmptyDrillPool,
    /// 1セッションあたりの時間が短すぎる
    #[serde(rename_all = "camelCase")]
    SessionsTooShort { minutes_per_session: f64 },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::EmptyDrillPool => {
                write!(f, "Drill bank is empty. Analyze skills first.")
            }
            Advisory::SessionsTooShort {
                minutes_per_session,
            } => write!(
                f,
                "Sessions are short ({}m). Consider increasing weekly hours.",
                minutes_per_session
            ),
        }
    }
}

/// 週間スケジュール
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklySchedule {
    pub sessions: Vec<DaySession>,
    pub minutes_per_session: f64,
    pub advisories: Vec<Advisory>,
}

impl WeeklySchedule {
    /// 全セッションの合計時間（分）
    pub fn total_minutes(&self) -> f64 {
        self.sessions.iter().map(|s| s.total_minutes).sum()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_updates_total() {
        let mut session = DaySession::new("Monday");
        assert!(session.is_empty());

        session.push(&Drill::new("A", 30.0), 15.0);
        session.push(&Drill::without_duration("B"), 15.0);

        assert_eq!(session.drills.len(), 2);
        assert_eq!(session.total_minutes, 45.0);
        assert_eq!(session.drills[0].duration_minutes, Some(30.0));
        assert_eq!(session.drills[1].duration_minutes, Some(15.0));
    }

    #[test]
    fn test_weekly_total_minutes() {
        let mut monday = DaySession::new("Monday");
        monday.push(&Drill::new("A", 40.0), 15.0);
        let mut tuesday = DaySession::new("Tuesday");
        tuesday.push(&Drill::new("B", 50.0), 15.0);

        let schedule = WeeklySchedule {
            sessions: vec![monday, tuesday],
            minutes_per_session: 90.0,
            advisories: vec![],
        };

        assert_eq!(schedule.total_minutes(), 90.0);
        assert!(!schedule.is_empty());
    }

    #[test]
    fn test_advisory_display() {
        let advisory = Advisory::SessionsTooShort {
            minutes_per_session: 24.0,
        };
        assert!(advisory.to_string().contains("24m"));
        assert!(Advisory::EmptyDrillPool.to_string().contains("empty"));
    }

    #[test]
    fn test_advisory_serde_tag() {
        let json = serde_json::to_value(Advisory::SessionsTooShort {
            minutes_per_session: 20.0,
        })
        .unwrap();
        assert_eq!(json["kind"], "sessionsTooShort");
        assert_eq!(json["minutesPerSession"], 20.0);
    }
}
