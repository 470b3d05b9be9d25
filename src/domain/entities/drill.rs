//! # Drill Entity
//!
//! 練習ドリルのドメインエンティティ

use serde::{Deserialize, Serialize};

/// 所要時間が不明なドリルに割り当てるデフォルト時間（分）
pub const DEFAULT_DRILL_MINUTES: f64 = 15.0;

/// 練習ドリル
///
/// AIの分析結果から得られる推奨練習。説明文のテキストで同一性を判定する
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drill {
    /// ドリルの説明
    #[serde(rename = "drill")]
    pub description: String,
    /// 所要時間（分）
    #[serde(rename = "duration", default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<f64>,
}

impl Drill {
    /// 新しいドリルを作成
    pub fn new(description: impl Into<String>, duration_minutes: f64) -> Self {
        Self {
            description: description.into(),
            duration_minutes: Some(duration_minutes),
        }
    }

    /// 所要時間が未設定のドリルを作成
    pub fn without_duration(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            duration_minutes: None,
        }
    }

    /// スケジュール計算に使う所要時間を返す
    ///
    /// 未設定・0以下・非有限値の場合は `fallback` を返す
    pub fn effective_minutes(&self, fallback: f64) -> f64 {
        match self.duration_minutes {
            Some(minutes) if minutes.is_finite() && minutes > 0.0 => minutes,
            _ => fallback,
        }
    }

    /// 所要時間をフォールバック値で確定させたコピーを返す
    pub fn with_resolved_duration(&self, fallback: f64) -> Self {
        Self {
            description: self.description.clone(),
            duration_minutes: Some(self.effective_minutes(fallback)),
        }
    }

    /// 説明文が同じドリルかどうか
    pub fn same_description(&self, other: &Drill) -> bool {
        self.description == other.description
    }
}
