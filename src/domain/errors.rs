//! # Domain Errors
//!
//! ドメイン層のエラー型

use thiserror::Error;

use super::entities::skill::SkillCategory;

/// スケジュール生成のエラー
#[derive(Debug, Error, PartialEq)]
pub enum ScheduleError {
    /// 週あたりの時間が0より大きく168以下の有限値ではない
    #[error("Invalid hours per week: {0} (must be greater than 0 and at most 168)")]
    InvalidHours(f64),
}

/// テクニック分析のエラー
///
/// いずれも1回の分析操作を失敗させ、ユーザーに明示的に通知される
#[derive(Debug, Error, PartialEq)]
pub enum AnalysisError {
    /// キーフレームの枚数がカテゴリの要求と一致しない
    #[error("Capture all {expected} frames for {category} first (got {actual})")]
    MissingKeyframes {
        category: SkillCategory,
        expected: usize,
        actual: usize,
    },

    /// サブスキル名が空
    #[error("Please select a sub-skill before analyzing")]
    MissingSubSkill,

    /// 生成AIの呼び出しがリトライ後も失敗した
    #[error("Analysis failed: {0}")]
    Service(String),

    /// AIの応答がJSONとしてパースできない
    #[error("AI returned invalid JSON data: {0}")]
    InvalidJson(String),
}
