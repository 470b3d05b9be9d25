//! Gemini Client Abstractions
//!
//! 生成AIクライアントの抽象化と実装

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, error};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

#[cfg(test)]
use mockall::automock;

use super::models::{http_error_message, GenerateContentResponse};

/// Failure of a single generateContent attempt
///
/// Every variant is treated as retryable by the resilient caller
#[derive(Debug, Error)]
pub enum GenerativeApiError {
    /// Non-2xx status
    #[error("{0}")]
    Http(String),

    /// URLは取り除いて保持する
    #[error("Network error: {0}")]
    Transport(reqwest::Error),

    /// Body is not the expected JSON
    #[error("Unexpected response format: {0}")]
    MalformedBody(String),

    #[error("AI response blocked due to safety settings.")]
    Blocked,

    #[error("AI processing stopped unexpectedly: {0}")]
    UnexpectedFinish(String),

    #[error("API finished with reason {0} but returned no text.")]
    EmptyResponse(String),

    #[error("Invalid response structure from API.")]
    InvalidStructure,
}

impl From<reqwest::Error> for GenerativeApiError {
    fn from(e: reqwest::Error) -> Self {
        GenerativeApiError::Transport(e.without_url())
    }
}

/// Header carrying the API key, kept out of the URL so it never shows up in error messages
pub const API_KEY_HEADER: &str = "x-goog-api-key";

/// Trait for one generateContent attempt
/// This enables mocking in tests while using the real HTTP client in production
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GenerativeClient: Send + Sync {
    /// Send the payload once and return the primary text of the response
    async fn generate(&self, payload: &Value) -> Result<String, GenerativeApiError>;
}

/// reqwest-backed Gemini client
pub struct GeminiHttpClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl GeminiHttpClient {
    pub fn new(base_url: &str, model: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        let endpoint = format!(
            "{}/models/{}:generateContent",
            base_url.trim_end_matches('/'),
            model
        );

        Ok(Self {
            client,
            endpoint,
            api_key: api_key.to_string(),
            model: model.to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[async_trait]
impl GenerativeClient for GeminiHttpClient {
    async fn generate(&self, payload: &Value) -> Result<String, GenerativeApiError> {
        debug!("POST generateContent (model: {})", self.model);

        let response = self
            .client
            .post(&self.endpoint)
            .header(API_KEY_HEADER, &self.api_key)
            .json(payload)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!("API Error Body: {}", body);
            return Err(GenerativeApiError::Http(http_error_message(
                status.as_u16(),
                &body,
            )));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|e| GenerativeApiError::MalformedBody(e.to_string()))?;

        parsed.into_text()
    }
}
