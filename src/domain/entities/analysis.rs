//! # Analysis Entities
//!
//! AIによるテクニック分析結果のエンティティ

use serde::{Deserialize, Serialize};

use super::drill::Drill;

/// プロ選手の参考スコアのデフォルト値
pub const DEFAULT_PRO_SCORE: f64 = 90.0;

/// 指摘事項の重要度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    #[default]
    Medium,
    Low,
}

impl Severity {
    /// 大文字小文字を区別せずにパースする
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "high" => Some(Severity::High),
            "medium" => Some(Severity::Medium),
            "low" => Some(Severity::Low),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

/// 技術的な指摘事項と修正方法
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub severity: Severity,
    pub issue: String,
    pub fix: String,
}

/// サニタイズ済みの分析結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// 0〜100のスコア
    pub score: f64,
    /// プロ選手の参考スコア
    pub pro_score: f64,
    pub issues: Vec<Issue>,
    pub strengths: Vec<String>,
    pub drills: Vec<Drill>,
}

impl Default for AnalysisResult {
    fn default() -> Self {
        Self {
            score: 0.0,
            pro_score: DEFAULT_PRO_SCORE,
            issues: Vec::new(),
            strengths: Vec::new(),
            drills: Vec::new(),
        }
    }
}

impl AnalysisResult {
    /// プロスコアとの差
    pub fn gap_to_pro(&self) -> f64 {
        (self.pro_score - self.score).max(0.0)
    }

    /// 重要度が高い指摘事項
    pub fn high_severity_issues(&self) -> impl Iterator<Item = &Issue> {
        self.issues
            .iter()
            .filter(|issue| issue.severity == Severity::High)
    }
}
