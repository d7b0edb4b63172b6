//! Observable progress of a retry run.

/// Snapshot of a coordinator's mutable state (presentation-friendly).
#[derive(Debug, Clone, PartialEq)]
pub struct RetryState<E> {
    /// Attempts made in the current or most recent run (0 when idle or after success).
    pub attempts: u32,
    /// True from the start of a run until it succeeds or is exhausted.
    pub is_retrying: bool,
    /// Most recent failure, cleared on success and reset.
    pub last_error: Option<E>,
}

impl<E> Default for RetryState<E> {
    fn default() -> Self {
        Self {
            attempts: 0,
            is_retrying: false,
            last_error: None,
        }
    }
}

impl<E> RetryState<E> {
    /// Whether a new run may start and still has attempts left.
    pub fn can_retry(&self, max_attempts: u32) -> bool {
        self.attempts < max_attempts && !self.is_retrying
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_state_can_retry() {
        let s: RetryState<String> = RetryState::default();
        assert!(s.can_retry(3));
        assert!(!s.can_retry(0));
    }

    #[test]
    fn in_flight_or_exhausted_cannot_retry() {
        let running = RetryState::<String> {
            attempts: 1,
            is_retrying: true,
            last_error: None,
        };
        assert!(!running.can_retry(3));

        let exhausted = RetryState {
            attempts: 3,
            is_retrying: false,
            last_error: Some("boom".to_string()),
        };
        assert!(!exhausted.can_retry(3));
    }
}
