//! # Analysis Report DTO
//!
//! テクニック分析ユースケースの結果

use crate::domain::entities::analysis::AnalysisResult;

/// 分析レポート
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    /// サニタイズ済みの分析結果
    pub analysis: AnalysisResult,
    /// 分析前のベストスコア（未記録なら0）
    pub previous_best: f64,
    /// ベストスコアを更新したか
    pub personal_best: bool,
    /// ドリルバンクに新しく追加されたドリル数
    pub drills_added: usize,
}

impl AnalysisReport {
    /// 分析後のベストスコア
    pub fn best_score(&self) -> f64 {
        if self.personal_best {
            self.analysis.score
        } else {
            self.previous_best
        }
    }
}
