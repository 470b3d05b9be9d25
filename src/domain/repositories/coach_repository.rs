//! # Coach Repository Trait
//!
//! 生成AIコーチへの問い合わせを抽象化

use async_trait::async_trait;

use crate::domain::entities::api_outcome::ApiOutcome;
use crate::domain::entities::capture::TechniqueCapture;

/// コーチリポジトリ
///
/// 失敗も `ApiOutcome::Failure` として値で返すため、エラー型を持たない
#[async_trait]
pub trait CoachRepository: Send + Sync {
    /// 自由記述の質問をAIコーチに送る
    ///
    /// # Arguments
    ///
    /// * `question` - ユーザーの質問
    async fn ask(&self, question: &str) -> ApiOutcome;

    /// キーフレームを送ってテクニック分析を依頼する
    ///
    /// # Arguments
    ///
    /// * `capture` - 分析対象のキーフレームとスキル情報
    ///
    /// # Returns
    ///
    /// 成功時はJSON形式の分析結果テキスト
    async fn analyze(&self, capture: &TechniqueCapture) -> ApiOutcome;
}
