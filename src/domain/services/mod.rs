//! # Domain Services
//!
//! エンティティに属さない純粋なビジネスルール
//!
//! - **ResponseSanitizer**: AI応答の不正エントリ除去
//! - **ScheduleGenerator**: 週間スケジュールの生成

pub mod sanitizer;
pub mod scheduler;
