use std::time::Duration;

use super::error::ConfigError;

/// Exponential backoff policy with a cap.
///
/// Every failure is treated the same way: the coordinator retries until
/// `max_attempts` is reached, waiting `delay_after(n)` between attempts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the first).
    pub max_attempts: u32,
    /// Delay before the second attempt.
    pub initial_delay: Duration,
    /// Upper bound on backoff delay.
    pub max_delay: Duration,
    /// Geometric growth factor applied per retry.
    pub backoff_multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(1000),
            max_delay: Duration::from_millis(10_000),
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    /// Reject policies the coordinator cannot run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_attempts == 0 {
            return Err(ConfigError::ZeroAttempts);
        }
        if !self.backoff_multiplier.is_finite() || self.backoff_multiplier <= 0.0 {
            return Err(ConfigError::InvalidMultiplier(self.backoff_multiplier));
        }
        Ok(())
    }

    /// Delay to wait after failed attempt `attempt` (1-based) before the next one.
    ///
    /// `min(initial_delay * backoff_multiplier^(attempt - 1), max_delay)`: the
    /// geometric term is computed first, then clamped.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        if self.initial_delay.is_zero() {
            return Duration::ZERO;
        }
        let exp = attempt.saturating_sub(1).min(i32::MAX as u32) as i32;
        let raw = self.initial_delay.as_secs_f64() * self.backoff_multiplier.powi(exp);
        // Terms past Duration::MAX land on the cap.
        match Duration::try_from_secs_f64(raw) {
            Ok(term) => term.min(self.max_delay),
            Err(_) => self.max_delay,
        }
    }

    /// Delays observed by a run whose every attempt fails (`max_attempts - 1` entries).
    pub fn schedule(&self) -> Vec<Duration> {
        (1..self.max_attempts).map(|n| self.delay_after(n)).collect()
    }

    /// Worst-case time spent sleeping across a full run.
    pub fn total_delay(&self) -> Duration {
        self.schedule()
            .into_iter()
            .fold(Duration::ZERO, |acc, d| acc.saturating_add(d))
    }
}
