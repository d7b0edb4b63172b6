//! Error types for the retry coordinator.

use std::fmt;

/// Error returned by `RetryCoordinator::retry`.
///
/// Intermediate action failures are absorbed; only the error of the final
/// attempt is carried out in `Exhausted`.
#[derive(Debug, Clone, PartialEq)]
pub enum RetryError<E> {
    /// Every attempt failed; `source` is the error of the last one.
    Exhausted { attempts: u32, source: E },
    /// Another run is already in flight on this coordinator.
    Busy,
    /// The run was invalidated by `reset()` before it finished.
    Cancelled,
}

impl<E> RetryError<E> {
    /// The last action error, if the run ended by exhaustion.
    pub fn into_source(self) -> Option<E> {
        match self {
            RetryError::Exhausted { source, .. } => Some(source),
            RetryError::Busy | RetryError::Cancelled => None,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, RetryError::Exhausted { .. })
    }
}

impl<E: fmt::Display> fmt::Display for RetryError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RetryError::Exhausted { attempts, source } => {
                write!(f, "gave up after {} attempt(s): {}", attempts, source)
            }
            RetryError::Busy => write!(f, "a retry run is already in progress"),
            RetryError::Cancelled => write!(f, "retry run cancelled by reset"),
        }
    }
}

impl<E> std::error::Error for RetryError<E>
where
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RetryError::Exhausted { source, .. } => Some(source),
            RetryError::Busy | RetryError::Cancelled => None,
        }
    }
}

/// Invalid retry policy.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("max_attempts must be at least 1")]
    ZeroAttempts,
    #[error("backoff_multiplier must be finite and > 0 (got {0})")]
    InvalidMultiplier(f64),
}
