//! ユースケースのテスト用インメモリリポジトリ

use anyhow::Result;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::entities::api_outcome::ApiOutcome;
use crate::domain::entities::capture::TechniqueCapture;
use crate::domain::repositories::coach_repository::CoachRepository;
use crate::domain::repositories::state_repository::StateRepository;

/// 値をJSONとして保持する状態リポジトリ
#[derive(Default)]
pub struct MockStateRepository {
    values: Mutex<HashMap<String, Value>>,
    fail_saves: bool,
}

impl MockStateRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_saves() -> Self {
        Self {
            fail_saves: true,
            ..Self::default()
        }
    }

    pub fn with<T: Serialize>(self, key: &str, value: &T) -> Self {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), serde_json::to_value(value).unwrap());
        self
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.values
            .lock()
            .unwrap()
            .get(key)
            .map(|v| serde_json::from_value(v.clone()).unwrap())
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.values.lock().unwrap().keys().cloned().collect();
        keys.sort();
        keys
    }
}

#[async_trait]
impl StateRepository for MockStateRepository {
    async fn load<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let value = self.values.lock().unwrap().get(key).cloned();
        Ok(value.map(serde_json::from_value).transpose()?)
    }

    async fn save<T>(&self, key: &str, value: &T) -> Result<()>
    where
        T: Serialize + Sync,
    {
        if self.fail_saves {
            anyhow::bail!("disk full");
        }
        let json = serde_json::to_value(value)?;
        self.values.lock().unwrap().insert(key.to_string(), json);
        Ok(())
    }
}

/// 決まった応答を返し、呼び出し回数を記録するコーチリポジトリ
pub struct MockCoachRepository {
    outcome: ApiOutcome,
    calls: Mutex<usize>,
}

impl MockCoachRepository {
    pub fn new(outcome: ApiOutcome) -> Self {
        Self {
            outcome,
            calls: Mutex::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl CoachRepository for MockCoachRepository {
    async fn ask(&self, _question: &str) -> ApiOutcome {
        *self.calls.lock().unwrap() += 1;
        self.outcome.clone()
    }

    async fn analyze(&self, _capture: &TechniqueCapture) -> ApiOutcome {
        *self.calls.lock().unwrap() += 1;
        self.outcome.clone()
    }
}
