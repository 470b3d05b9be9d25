//! JSON State Repository Implementation
//!
//! StateRepositoryのJSON実装（キーごとに `<state_dir>/<key>.json` として永続化）

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::repositories::state_repository::StateRepository;

/// JSONファイルベースの状態リポジトリ
pub struct JsonStateRepository {
    base_dir: PathBuf,
}

impl JsonStateRepository {
    /// 新しいリポジトリを作成
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// キーに対応するファイルパス
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", key))
    }

    /// ファイルから値を読み込む（同期処理）
    fn load_sync<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
        if !path.exists() {
            info!("No existing state found at {}", path.display());
            return Ok(None);
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read state file: {}", path.display()))?;

        let value: T = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse state JSON: {}", path.display()))?;

        debug!("Loaded state from {}", path.display());

        Ok(Some(value))
    }

    /// 値をファイルに保存する（同期処理）
    fn save_sync(path: &Path, json: &str) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create state directory")?;
        }

        fs::write(path, json)
            .with_context(|| format!("Failed to write state file: {}", path.display()))?;

        info!("Saved state to {}", path.display());

        Ok(())
    }
}

#[async_trait]
impl StateRepository for JsonStateRepository {
    async fn load<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let path = self.path_for(key);
        tokio::task::spawn_blocking(move || Self::load_sync::<T>(&path))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))?
    }

    async fn save<T>(&self, key: &str, value: &T) -> Result<()>
    where
        T: Serialize + Sync,
    {
        let path = self.path_for(key);
        let json = serde_json::to_string_pretty(value)
            .with_context(|| format!("Failed to serialize state: {}", key))?;
        tokio::task::spawn_blocking(move || Self::save_sync(&path, &json))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))??;

        Ok(())
    }
}
