//! # Progress State
//!
//! サブスキルごとのベストスコアを追跡する状態

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::skill::SkillCategory;

/// 目標スコア
pub const TARGET_SCORE: f64 = 100.0;

/// サブスキル1件の進捗
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkillProgress {
    /// これまでのベストスコア
    pub current: f64,
    /// 目標スコア
    pub target: f64,
}

impl Default for SkillProgress {
    fn default() -> Self {
        Self {
            current: 0.0,
            target: TARGET_SCORE,
        }
    }
}

impl SkillProgress {
    /// 目標に対する達成率（0.0〜1.0）
    pub fn completion(&self) -> f64 {
        if self.target <= 0.0 {
            return 0.0;
        }
        (self.current / self.target).clamp(0.0, 1.0)
    }
}

/// 進捗状態
///
/// カテゴリ → サブスキル → 進捗。スコアは上がることはあっても下がらない
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressState {
    #[serde(default)]
    pub skills: BTreeMap<SkillCategory, BTreeMap<String, SkillProgress>>,
    /// 最後にベストスコアが更新された時刻
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl ProgressState {
    pub fn new() -> Self {
        Self::default()
    }

    /// サブスキルの進捗を取得
    pub fn get(&self, category: SkillCategory, sub_skill: &str) -> Option<&SkillProgress> {
        self.skills.get(&category)?.get(sub_skill)
    }

    /// スコアを記録する
    ///
    /// 既存のベストを上回った場合のみ更新し、`true` を返す
    pub fn record_score(
        &mut self,
        category: SkillCategory,
        sub_skill: &str,
        score: f64,
        timestamp: String,
    ) -> bool {
        let entry = self
            .skills
            .entry(category)
            .or_default()
            .entry(sub_skill.to_string())
            .or_default();

        if score > entry.current {
            entry.current = score;
            self.updated_at = Some(timestamp);
            true
        } else {
            false
        }
    }

    /// カテゴリ内の平均スコア
    pub fn category_average(&self, category: SkillCategory) -> f64 {
        match self.skills.get(&category) {
            Some(sub_skills) if !sub_skills.is_empty() => {
                sub_skills.values().map(|p| p.current).sum::<f64>() / sub_skills.len() as f64
            }
            _ => 0.0,
        }
    }
}
