//! Configuration
//!
//! JSON設定ファイルの読み込み。全フィールドにデフォルト値がある

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::adapter::gemini::retry::{
    RetryPolicy, DEFAULT_BACKOFF_MULTIPLIER, DEFAULT_INITIAL_DELAY_MS, DEFAULT_MAX_ATTEMPTS,
};
use crate::domain::services::scheduler::ScheduleConfig;

/// デフォルトの設定ファイルパス
pub const DEFAULT_CONFIG_PATH: &str = "./.playsmart/config.json";
/// APIキーのフォールバック環境変数
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

fn default_model() -> String {
    "gemini-2.5-flash-preview-09-2025".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

fn default_initial_delay_ms() -> u64 {
    DEFAULT_INITIAL_DELAY_MS
}

fn default_backoff_multiplier() -> f64 {
    DEFAULT_BACKOFF_MULTIPLIER
}

fn default_request_timeout_secs() -> u64 {
    60
}

fn default_target_session_minutes() -> f64 {
    ScheduleConfig::default().target_session_minutes
}

fn default_min_session_minutes() -> f64 {
    ScheduleConfig::default().min_session_minutes
}

fn default_overflow_factor() -> f64 {
    ScheduleConfig::default().overflow_factor
}

fn default_drill_minutes() -> f64 {
    ScheduleConfig::default().default_drill_minutes
}

fn default_state_dir() -> String {
    "./.playsmart/state".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Gemini APIキー。空なら `GEMINI_API_KEY` を使う
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,

    // Retry
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    // Schedule
    #[serde(default = "default_target_session_minutes")]
    pub target_session_minutes: f64,
    #[serde(default = "default_min_session_minutes")]
    pub min_session_minutes: f64,
    #[serde(default = "default_overflow_factor")]
    pub overflow_factor: f64,
    #[serde(default = "default_drill_minutes")]
    pub default_drill_minutes: f64,

    /// 状態ファイルの保存先（`~` 展開あり）
    #[serde(default = "default_state_dir")]
    pub state_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            base_url: default_base_url(),
            max_attempts: default_max_attempts(),
            initial_delay_ms: default_initial_delay_ms(),
            backoff_multiplier: default_backoff_multiplier(),
            request_timeout_secs: default_request_timeout_secs(),
            target_session_minutes: default_target_session_minutes(),
            min_session_minutes: default_min_session_minutes(),
            overflow_factor: default_overflow_factor(),
            default_drill_minutes: default_drill_minutes(),
            state_dir: default_state_dir(),
        }
    }
}

impl Config {
    /// 設定ファイルを読み込む
    ///
    /// ファイルが存在しない場合はデフォルト設定を返す
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            info!(
                "No config file at {}, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// APIキーを解決する（設定ファイル → 環境変数）
    pub fn resolve_api_key(&self) -> Option<String> {
        self.resolve_api_key_with(std::env::var(API_KEY_ENV).ok())
    }

    fn resolve_api_key_with(&self, env_value: Option<String>) -> Option<String> {
        let configured = self.api_key.trim();
        if !configured.is_empty() {
            return Some(configured.to_string());
        }
        env_value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.max_attempts,
            self.initial_delay_ms,
            self.backoff_multiplier,
        )
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// スケジュール設定（不正な値はデフォルトに置き換える）
    pub fn schedule_config(&self) -> ScheduleConfig {
        ScheduleConfig {
            target_session_minutes: self.target_session_minutes,
            min_session_minutes: self.min_session_minutes,
            overflow_factor: self.overflow_factor,
            default_drill_minutes: self.default_drill_minutes,
        }
        .sanitized()
    }

    /// `~` を展開した状態ディレクトリ
    pub fn state_dir(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.state_dir).into_owned())
    }
}
