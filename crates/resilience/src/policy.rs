use std::collections::BTreeSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use argus_error::{ClassifiedError, ErrorKind};

/// Static, per-component retry configuration.
///
/// Read-only after registration; the engine consults it after every failed
/// attempt. Attempt counters are 1-indexed: attempt 1 is the first try.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryPolicy {
    max_attempts: u32,
    initial_interval: Duration,
    maximum_interval: Duration,
    backoff_coefficient: f64,
    non_retryable_kinds: BTreeSet<ErrorKind>,
}

impl Default for RetryPolicy {
    /// Three attempts, 1s initial interval doubling up to 60s, with the
    /// conventionally-deterministic kinds excluded.
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_interval: Duration::from_secs(1),
            maximum_interval: Duration::from_secs(60),
            backoff_coefficient: 2.0,
            non_retryable_kinds: BTreeSet::from([
                ErrorKind::Validation,
                ErrorKind::Configuration,
                ErrorKind::Authentication,
            ]),
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries.
    pub fn none() -> Self {
        Self::default().with_max_attempts(1)
    }

    /// Set the maximum number of attempts (including the first).
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Set the backoff interval before the second attempt.
    pub fn with_initial_interval(mut self, interval: Duration) -> Self {
        self.initial_interval = interval;
        self
    }

    /// Cap the backoff interval.
    pub fn with_maximum_interval(mut self, interval: Duration) -> Self {
        self.maximum_interval = interval;
        self
    }

    /// Set the multiplier applied to the interval after each attempt.
    pub fn with_backoff_coefficient(mut self, coefficient: f64) -> Self {
        self.backoff_coefficient = coefficient.max(1.0);
        self
    }

    /// Add an error kind to the exclusion set.
    pub fn with_non_retryable(mut self, kind: ErrorKind) -> Self {
        self.non_retryable_kinds.insert(kind);
        self
    }

    /// Maximum number of attempts.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// The error kinds excluded from retry.
    pub fn non_retryable_kinds(&self) -> &BTreeSet<ErrorKind> {
        &self.non_retryable_kinds
    }

    /// The decision rule: retry iff `attempt < max_attempts` and the
    /// error's kind is not excluded.
    ///
    /// `attempt` is the 1-indexed attempt that just failed.
    pub fn should_retry(&self, error: &ClassifiedError, attempt: u32) -> bool {
        attempt < self.max_attempts && !self.non_retryable_kinds.contains(&error.kind())
    }

    /// Backoff interval before the given 1-indexed attempt's successor.
    ///
    /// `min(maximum_interval, initial_interval · coefficient^(attempt-1))`,
    /// so attempt 1 waits the initial interval and the schedule is fully
    /// deterministic.
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let attempt = attempt.max(1);
        let scaled = self.initial_interval.as_secs_f64()
            * self.backoff_coefficient.powi((attempt - 1) as i32);
        let capped = scaled.min(self.maximum_interval.as_secs_f64());
        Duration::from_secs_f64(capped)
    }

    /// Full decision for one failed attempt, suitable for structured logs.
    pub fn decide(&self, error: &ClassifiedError, attempt: u32) -> RetryDecision {
        if self.non_retryable_kinds.contains(&error.kind()) {
            RetryDecision::GiveUp {
                reason: format!("kind `{}` is non-retryable", error.kind()),
            }
        } else if attempt >= self.max_attempts {
            RetryDecision::GiveUp {
                reason: format!("attempts exhausted ({attempt}/{})", self.max_attempts),
            }
        } else {
            RetryDecision::Retry {
                after: self.backoff_for(attempt),
            }
        }
    }
}

/// Outcome of applying the retry decision rule to one failed attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum RetryDecision {
    /// Reschedule after the given backoff interval.
    Retry {
        /// Interval to wait before the next attempt.
        after: Duration,
    },
    /// Surface the error to the caller.
    GiveUp {
        /// Why the error will not be retried.
        reason: String,
    },
}
