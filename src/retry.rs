//! Retry policy for transient HTTP failures.
//!
//! Only HTTP outcomes are retried. 429 and 5xx responses are treated as
//! transient capacity problems and retried with exponential backoff plus
//! jitter; 404 and every other non-2xx status fail fast. Transport errors are
//! never retried.

use http::StatusCode;
use rand::Rng;
use std::time::Duration;

/// Default number of retries after the first attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default base delay for exponential backoff.
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(1000);

/// Upper bound (exclusive) of the random jitter added to every backoff delay.
pub const MAX_JITTER: Duration = Duration::from_millis(500);

/// How the retry loop reacts to a response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// 2xx: decode and return.
    Success,
    /// 404: fail immediately.
    NotFound,
    /// 429 or 5xx: retry while attempts remain.
    Retryable,
    /// Any other status: fail immediately.
    Fatal,
}

impl StatusClass {
    /// Classifies a response status.
    ///
    /// ```
    /// use opendota::retry::StatusClass;
    /// use http::StatusCode;
    ///
    /// assert_eq!(StatusClass::of(StatusCode::OK), StatusClass::Success);
    /// assert_eq!(StatusClass::of(StatusCode::NOT_FOUND), StatusClass::NotFound);
    /// assert_eq!(StatusClass::of(StatusCode::TOO_MANY_REQUESTS), StatusClass::Retryable);
    /// assert_eq!(StatusClass::of(StatusCode::BAD_GATEWAY), StatusClass::Retryable);
    /// assert_eq!(StatusClass::of(StatusCode::BAD_REQUEST), StatusClass::Fatal);
    /// ```
    pub fn of(status: StatusCode) -> Self {
        if status.is_success() {
            StatusClass::Success
        } else if status == StatusCode::NOT_FOUND {
            StatusClass::NotFound
        } else if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
            StatusClass::Retryable
        } else {
            StatusClass::Fatal
        }
    }
}

/// Bounded exponential backoff with jitter.
///
/// The call is attempted at most `max_retries + 1` times. Before attempt
/// `k + 1` the client waits `base_delay * 2^k` plus a uniformly random jitter
/// in `[0, 500ms)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Number of retries after the first attempt.
    pub max_retries: u32,
    /// Delay before the first retry, doubled for each subsequent one.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay: DEFAULT_BASE_DELAY,
        }
    }
}

impl RetryPolicy {
    /// Returns `true` if `attempt` (0-indexed) is the last one allowed.
    pub fn is_last_attempt(&self, attempt: u32) -> bool {
        attempt >= self.max_retries
    }

    /// Returns the delay without jitter that follows the failed `attempt`
    /// (0-indexed).
    ///
    /// ```
    /// use opendota::retry::RetryPolicy;
    /// use std::time::Duration;
    ///
    /// let policy = RetryPolicy { max_retries: 3, base_delay: Duration::from_millis(100) };
    /// assert_eq!(policy.base_backoff(0), Duration::from_millis(100));
    /// assert_eq!(policy.base_backoff(2), Duration::from_millis(400));
    /// ```
    pub fn base_backoff(&self, attempt: u32) -> Duration {
        let multiplier = 2u32.saturating_pow(attempt);
        self.base_delay.saturating_mul(multiplier)
    }

    /// Returns the delay to wait after the failed `attempt` (0-indexed),
    /// including random jitter.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let jitter_micros = rand::thread_rng().gen_range(0..MAX_JITTER.as_micros() as u64);
        self.base_backoff(attempt)
            .saturating_add(Duration::from_micros(jitter_micros))
    }
}
