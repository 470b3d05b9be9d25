//! # Domain Entities
//!
//! ビジネスエンティティとバリューオブジェクトを定義するモジュール
//!
//! ## エンティティ
//!
//! - **Drill**: 練習ドリル
//! - **DaySession / WeeklySchedule**: 週間スケジュール
//! - **AnalysisResult**: AIによる分析結果
//! - **ProgressState / DrillBank**: 永続化される進捗とドリルバンク
//! - **ApiOutcome**: 生成AI呼び出しの結果
//! - **TechniqueCapture**: 分析に送るキーフレーム

pub mod analysis;
pub mod api_outcome;
pub mod capture;
pub mod drill;
pub mod drill_bank;
pub mod progress;
pub mod schedule;
pub mod skill;
