//! Retry policy with exponential backoff for transient server errors.
//!
//! Only the transient 5xx subset {500, 502, 503, 504} is retried, and only
//! within a fixed total attempt budget. Block signals (403) and
//! network-level failures are never retried here; callers own those.

use std::time::Duration;

use rand::Rng;
use tracing::debug;

/// Total attempt budget per request, including the initial attempt.
pub const MAX_ATTEMPTS: u32 = 3;

/// Base delay before the first retry.
const BASE_DELAY: Duration = Duration::from_secs(1);

/// Cap applied to computed delays.
const MAX_DELAY: Duration = Duration::from_secs(32);

/// Multiplier applied per retry.
const BACKOFF_MULTIPLIER: f64 = 2.0;

/// Maximum jitter added to each delay.
const MAX_JITTER: Duration = Duration::from_millis(500);

/// Status codes retried automatically.
pub const RETRYABLE_STATUSES: [u16; 4] = [500, 502, 503, 504];

/// True for the transient server statuses {500, 502, 503, 504}.
#[must_use]
pub fn is_retryable_status(status: u16) -> bool {
    RETRYABLE_STATUSES.contains(&status)
}

/// Decision on what to do after an attempt settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryDecision {
    /// Retry after the given delay.
    Retry {
        /// How long to wait before retrying.
        delay: Duration,
        /// The attempt number of the retry (1-indexed).
        attempt: u32,
    },
    /// Surface the response as-is.
    GiveUp {
        /// Why the request will not be retried.
        reason: String,
    },
}

/// Configuration for bounded status-based retry.
///
/// # Delay Calculation
///
/// ```text
/// delay = min(base_delay * multiplier^(attempt - 1), max_delay) + jitter
/// ```
///
/// With the defaults, retry delays are roughly 1s then 2s (plus jitter).
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
    max_delay: Duration,
    backoff_multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS,
            base_delay: BASE_DELAY,
            max_delay: MAX_DELAY,
            backoff_multiplier: BACKOFF_MULTIPLIER,
        }
    }
}

impl RetryPolicy {
    /// Creates a policy with custom parameters.
    ///
    /// `max_attempts` is clamped to at least 1 so every request gets its
    /// initial attempt.
    #[must_use]
    pub fn new(
        max_attempts: u32,
        base_delay: Duration,
        max_delay: Duration,
        backoff_multiplier: f64,
    ) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
            max_delay,
            backoff_multiplier,
        }
    }

    /// Total attempt budget, including the initial attempt.
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Decides whether the attempt that just answered `status` should be
    /// retried. `attempt` is the 1-indexed number of the attempt that just
    /// finished.
    #[tracing::instrument(skip(self), fields(max_attempts = self.max_attempts))]
    pub fn should_retry(&self, status: u16, attempt: u32) -> RetryDecision {
        if !is_retryable_status(status) {
            return RetryDecision::GiveUp {
                reason: format!("status {status} is not retryable"),
            };
        }
        if attempt >= self.max_attempts {
            debug!(attempt, "attempt budget exhausted");
            return RetryDecision::GiveUp {
                reason: format!("attempt budget ({}) exhausted", self.max_attempts),
            };
        }
        let delay = self.calculate_delay(attempt);
        debug!(attempt, delay_ms = delay.as_millis(), "will retry");
        RetryDecision::Retry {
            delay,
            attempt: attempt + 1,
        }
    }

    /// Computes the backoff delay after `attempt` failures, jitter included.
    fn calculate_delay(&self, attempt: u32) -> Duration {
        // Exponent is clamped; 2^31 seconds is already far past any cap.
        let exponent = attempt.saturating_sub(1).min(31);
        #[allow(clippy::cast_possible_wrap)]
        let multiplier = self.backoff_multiplier.powi(exponent as i32);
        let base = self.base_delay.as_secs_f64() * multiplier;
        let capped = base.min(self.max_delay.as_secs_f64());
        Duration::from_secs_f64(capped) + self.calculate_jitter()
    }

    /// Random jitter in `0..=MAX_JITTER`, scaled down with the base delay so
    /// fast test policies stay fast.
    fn calculate_jitter(&self) -> Duration {
        let ceiling = MAX_JITTER.min(self.base_delay);
        if ceiling.is_zero() {
            return Duration::ZERO;
        }
        #[allow(clippy::cast_possible_truncation)]
        let millis = rand::thread_rng().gen_range(0..=ceiling.as_millis()) as u64;
        Duration::from_millis(millis)
    }
}
