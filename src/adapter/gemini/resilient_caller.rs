//! Resilient Gemini Caller
//!
//! 指数バックオフ付きリトライで一時的な失敗を呼び出し元から隠す

use log::{error, info, warn};
use serde_json::Value;
use tokio::time::sleep;

use super::client::GenerativeClient;
use super::retry::{error_chain_to_string, RetryPolicy};
use crate::domain::entities::api_outcome::ApiOutcome;

/// Prefix of the failure message once every attempt is exhausted
pub const FAILURE_PREFIX: &str = "Unable to get response from AI.";

/// Wraps a `GenerativeClient` with bounded, strictly sequential retries
pub struct ResilientCaller<C: GenerativeClient> {
    client: C,
    policy: RetryPolicy,
}

impl<C: GenerativeClient> ResilientCaller<C> {
    pub fn new(client: C, policy: RetryPolicy) -> Self {
        Self { client, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Perform one logical request
    ///
    /// Never returns an error: after the last failed attempt the outcome is
    /// `ApiOutcome::Failure` carrying the last error's message. No delay is
    /// introduced after a success or after the final failure.
    pub async fn call(&self, payload: &Value) -> ApiOutcome {
        let mut last_error = String::from("no attempt was made");

        for attempt in 0..self.policy.max_attempts {
            match self.client.generate(payload).await {
                Ok(text) => {
                    if attempt > 0 {
                        info!("Request succeeded on attempt {}", attempt + 1);
                    }
                    return ApiOutcome::Success(text);
                }
                Err(e) => {
                    last_error = error_chain_to_string(&e);

                    if self.policy.has_attempt_after(attempt) {
                        let delay = self.policy.delay_after_failure(attempt);
                        warn!(
                            "Attempt {} failed, retrying in {}ms: {}",
                            attempt + 1,
                            delay.as_millis(),
                            last_error
                        );
                        sleep(delay).await;
                    } else {
                        error!(
                            "Attempt {} failed, giving up: {}",
                            attempt + 1,
                            last_error
                        );
                    }
                }
            }
        }

        error!(
            "API call failed after {} attempts",
            self.policy.max_attempts
        );
        ApiOutcome::Failure(format!("{} {}", FAILURE_PREFIX, last_error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::gemini::client::{GenerativeApiError, MockGenerativeClient};
    use serde_json::json;
    use std::time::Duration;
    use tokio::time::Instant;

    fn assert_elapsed(start: Instant, expected_ms: u64) {
        let elapsed = start.elapsed();
        assert!(
            elapsed >= Duration::from_millis(expected_ms)
                && elapsed < Duration::from_millis(expected_ms + 50),
            "expected ~{}ms, got {:?}",
            expected_ms,
            elapsed
        );
    }

    fn unavailable() -> GenerativeApiError {
        GenerativeApiError::Http("HTTP error! status: 503, message: overloaded".to_string())
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_on_first_attempt() {
        let mut mock = MockGenerativeClient::new();
        mock.expect_generate()
            .times(1)
            .returning(|_| Ok("Keep your knee over the ball.".to_string()));

        let caller = ResilientCaller::new(mock, RetryPolicy::default());
        let start = Instant::now();

        let outcome = caller.call(&json!({"contents": []})).await;

        assert_eq!(
            outcome,
            ApiOutcome::Success("Keep your knee over the ball.".to_string())
        );
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_all_attempts_fail() {
        let mut mock = MockGenerativeClient::new();
        let mut calls = 0;
        mock.expect_generate().times(3).returning(move |_| {
            calls += 1;
            if calls < 3 {
                Err(unavailable())
            } else {
                Err(GenerativeApiError::InvalidStructure)
            }
        });

        let caller = ResilientCaller::new(mock, RetryPolicy::default());
        let start = Instant::now();

        let outcome = caller.call(&json!({})).await;

        let message = outcome.failure_message().unwrap();
        assert_eq!(
            message,
            "Unable to get response from AI. Invalid response structure from API."
        );
        assert!(!message.contains("overloaded"));
        // 1000ms + 2000ms, no sleep after the last attempt
        assert_elapsed(start, 3000);
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_after_retries() {
        let mut mock = MockGenerativeClient::new();
        let mut calls = 0;
        mock.expect_generate().times(2).returning(move |_| {
            calls += 1;
            if calls == 1 {
                Err(GenerativeApiError::EmptyResponse("STOP".to_string()))
            } else {
                Ok("{\"score\": 50}".to_string())
            }
        });

        let caller = ResilientCaller::new(mock, RetryPolicy::new(5, 100, 2.0));
        let start = Instant::now();

        let outcome = caller.call(&json!({})).await;

        assert_eq!(outcome.text(), Some("{\"score\": 50}"));
        assert_elapsed(start, 100);
    }

    #[tokio::test(start_paused = true)]
    async fn test_invocation_count_matches_max_attempts() {
        let mut mock = MockGenerativeClient::new();
        mock.expect_generate()
            .times(5)
            .returning(|_| Err(unavailable()));

        let caller = ResilientCaller::new(mock, RetryPolicy::new(5, 10, 2.0));
        let start = Instant::now();

        let outcome = caller.call(&json!({})).await;

        assert!(!outcome.is_success());
        assert!(outcome.failure_message().unwrap().contains("overloaded"));
        // 10 + 20 + 40 + 80
        assert_elapsed(start, 150);
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_attempt_policy_does_not_sleep() {
        let mut mock = MockGenerativeClient::new();
        mock.expect_generate()
            .times(1)
            .returning(|_| Err(GenerativeApiError::Blocked));

        let caller = ResilientCaller::new(mock, RetryPolicy::new(1, 1000, 2.0));
        let start = Instant::now();

        let outcome = caller.call(&json!({})).await;

        assert_eq!(
            outcome.render(),
            "Error: Unable to get response from AI. AI response blocked due to safety settings."
        );
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test]
    async fn test_payload_is_passed_through() {
        let mut mock = MockGenerativeClient::new();
        mock.expect_generate()
            .withf(|payload| payload["contents"][0]["parts"][0]["text"] == "How do I chip?")
            .times(1)
            .returning(|_| Ok("Lean back slightly.".to_string()));

        let caller = ResilientCaller::new(mock, RetryPolicy::default());
        let payload = json!({"contents": [{"parts": [{"text": "How do I chip?"}]}]});

        let outcome = caller.call(&payload).await;

        assert!(outcome.is_success());
    }
}
