//! One-shot retry loop for callers that don't need to observe state.

use std::fmt;
use std::future::Future;

use super::coordinator::RetryCoordinator;
use super::error::{ConfigError, RetryError};
use super::policy::RetryPolicy;

/// Runs an async action until it succeeds or the policy's attempts run out.
/// On failure, waits for the backoff delay then tries again.
pub async fn run_with_retry<T, E, F, Fut>(
    policy: RetryPolicy,
    action: F,
) -> Result<Result<T, RetryError<E>>, ConfigError>
where
    E: Clone + fmt::Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let coordinator = RetryCoordinator::new(policy)?;
    Ok(coordinator.retry(action).await)
}
