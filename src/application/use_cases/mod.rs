//! # Use Cases
//!
//! アプリケーションのビジネスフロー（ユースケース）
//!
//! ## ユースケース
//!
//! - **AskCoachUseCase**: チャットコーチへの質問
//! - **AnalyzeTechniqueUseCase**: テクニック分析と進捗・ドリルバンクの更新
//! - **GenerateScheduleUseCase**: 週間スケジュールの生成
//! - **ReviewStateUseCase**: 保存済み状態の参照

pub mod analyze_technique;
pub mod ask_coach;
pub mod generate_schedule;
pub mod review_state;

#[cfg(test)]
pub(crate) mod mocks;
