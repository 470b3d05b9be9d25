//! Gemini Retry Policy
//!
//! リトライ回数と指数バックオフの設定

use std::time::Duration;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_INITIAL_DELAY_MS: u64 = 1000;
pub const DEFAULT_BACKOFF_MULTIPLIER: f64 = 2.0;

/// Retry configuration for a single logical request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_delay_ms: u64,
    pub backoff_multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            initial_delay_ms: DEFAULT_INITIAL_DELAY_MS,
            backoff_multiplier: DEFAULT_BACKOFF_MULTIPLIER,
        }
    }
}

impl RetryPolicy {
    /// Build a policy, clamping values into their valid ranges
    /// (at least one attempt, multiplier >= 1)
    pub fn new(max_attempts: u32, initial_delay_ms: u64, backoff_multiplier: f64) -> Self {
        let backoff_multiplier = if backoff_multiplier.is_finite() {
            backoff_multiplier.max(1.0)
        } else {
            DEFAULT_BACKOFF_MULTIPLIER
        };

        Self {
            max_attempts: max_attempts.max(1),
            initial_delay_ms,
            backoff_multiplier,
        }
    }

    /// Delay to wait after the attempt at `attempt_index` (0-based) failed
    ///
    /// `initial_delay * multiplier^attempt_index`
    pub fn delay_after_failure(&self, attempt_index: u32) -> Duration {
        let exponent = attempt_index.min(i32::MAX as u32) as i32;
        let millis = self.initial_delay_ms as f64 * self.backoff_multiplier.powi(exponent);
        Duration::from_millis(millis.min(u64::MAX as f64) as u64)
    }

    /// Whether another attempt is allowed after `attempt_index` failed
    pub fn has_attempt_after(&self, attempt_index: u32) -> bool {
        attempt_index + 1 < self.max_attempts
    }
}

/// Convert error chain to string including all causes
pub fn error_chain_to_string(e: &(dyn std::error::Error + 'static)) -> String {
    let mut messages = vec![e.to_string()];
    let mut source = e.source();
    while let Some(cause) = source {
        let message = cause.to_string();
        if !messages.iter().any(|m| m.contains(&message)) {
            messages.push(message);
        }
        source = cause.source();
    }
    messages.join(" | ")
}
