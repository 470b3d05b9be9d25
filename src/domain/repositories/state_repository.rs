//! # State Repository Trait
//!
//! 進捗・ドリルバンク・スケジュールの永続化を抽象化

use anyhow::Result;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// 進捗状態のキー
pub const PROGRESS_KEY: &str = "progress";
/// ドリルバンクのキー
pub const DRILL_BANK_KEY: &str = "drill_bank";
/// 週間スケジュールのキー
pub const WEEKLY_SCHEDULE_KEY: &str = "weekly_schedule";

/// 状態リポジトリ
///
/// アプリケーションが定義したキーで値を読み書きする永続化ポート
#[async_trait]
pub trait StateRepository: Send + Sync {
    /// 状態を読み込む
    ///
    /// # Arguments
    ///
    /// * `key` - 状態のキー
    ///
    /// # Returns
    ///
    /// 保存済みの値。未保存の場合は `None`
    ///
    /// # Errors
    ///
    /// 読み込みまたはデシリアライズに失敗した場合にエラーを返す
    async fn load<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned + Send + 'static;

    /// 状態を保存する
    ///
    /// # Arguments
    ///
    /// * `key` - 状態のキー
    /// * `value` - 保存する値
    ///
    /// # Errors
    ///
    /// シリアライズまたは書き込みに失敗した場合にエラーを返す
    async fn save<T>(&self, key: &str, value: &T) -> Result<()>
    where
        T: Serialize + Sync;
}
