//! Stateful retry coordinator: drives the attempt loop and publishes progress.
//!
//! Each run is tagged with a generation number. `reset()` bumps the
//! generation, which wakes a pending backoff delay and makes every later
//! state update from the old run a no-op. An action already in flight cannot
//! be interrupted; its result is dropped when it resolves.

use std::fmt;
use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::watch;

use super::error::{ConfigError, RetryError};
use super::guard::RunGuard;
use super::hooks::RetryHooks;
use super::policy::RetryPolicy;
use super::state::RetryState;

struct Shared<E> {
    generation: u64,
    state: RetryState<E>,
}

/// Runs an action with exponential backoff and exposes live retry state.
///
/// One run at a time per instance: a `retry()` call made while another run
/// is in flight returns `RetryError::Busy`.
pub struct RetryCoordinator<E> {
    policy: RetryPolicy,
    hooks: RetryHooks<E>,
    shared: Mutex<Shared<E>>,
    published: watch::Sender<RetryState<E>>,
    generation: watch::Sender<u64>,
}

impl<E> RetryCoordinator<E>
where
    E: Clone + fmt::Display,
{
    pub fn new(policy: RetryPolicy) -> Result<Self, ConfigError> {
        Self::with_hooks(policy, RetryHooks::new())
    }

    pub fn with_hooks(policy: RetryPolicy, hooks: RetryHooks<E>) -> Result<Self, ConfigError> {
        policy.validate()?;
        let (published, _) = watch::channel(RetryState::default());
        let (generation, _) = watch::channel(0);
        Ok(Self {
            policy,
            hooks,
            shared: Mutex::new(Shared {
                generation: 0,
                state: RetryState::default(),
            }),
            published,
            generation,
        })
    }

    /// Run `action` until it succeeds or `max_attempts` is reached.
    ///
    /// The same action is invoked again on each retry, so it must be safe to
    /// repeat. On exhaustion the error of the last attempt is returned in
    /// `RetryError::Exhausted`.
    pub async fn retry<T, F, Fut>(&self, mut action: F) -> Result<T, RetryError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let generation = match self.begin() {
            Some(g) => g,
            None => {
                tracing::debug!("retry requested while a run is in flight");
                return Err(RetryError::Busy);
            }
        };
        let _guard = RunGuard {
            coordinator: self,
            generation,
        };

        let max_attempts = self.policy.max_attempts;
        let mut attempt = 1u32;
        self.hooks.retry(attempt);

        loop {
            tracing::debug!(attempt, max_attempts, "starting attempt");
            match action().await {
                Ok(value) => {
                    if !self.update(generation, |s| *s = RetryState::default()) {
                        return Err(RetryError::Cancelled);
                    }
                    if attempt > 1 {
                        tracing::info!(attempts = attempt, "action succeeded after retry");
                    }
                    self.hooks.success();
                    return Ok(value);
                }
                Err(err) => {
                    let recorded = err.clone();
                    if !self.update(generation, move |s| s.last_error = Some(recorded)) {
                        return Err(RetryError::Cancelled);
                    }
                    self.hooks.error(&err, attempt);

                    if attempt >= max_attempts {
                        if !self.update(generation, |s| s.is_retrying = false) {
                            return Err(RetryError::Cancelled);
                        }
                        tracing::error!(attempts = attempt, error = %err, "giving up");
                        return Err(RetryError::Exhausted {
                            attempts: attempt,
                            source: err,
                        });
                    }

                    let delay = self.policy.delay_after(attempt);
                    tracing::warn!(
                        attempt,
                        max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "attempt failed, backing off"
                    );
                    if !self.wait(generation, delay).await {
                        tracing::debug!(attempt, "pending retry cancelled");
                        return Err(RetryError::Cancelled);
                    }

                    attempt += 1;
                    if !self.update(generation, |s| s.attempts = attempt) {
                        return Err(RetryError::Cancelled);
                    }
                    self.hooks.retry(attempt);
                }
            }
        }
    }

    /// Clear all state and cancel a pending retry. Does not touch the policy.
    pub fn reset(&self) {
        let mut shared = self.lock();
        shared.generation += 1;
        shared.state = RetryState::default();
        self.generation.send_replace(shared.generation);
        self.published.send_replace(shared.state.clone());
        tracing::debug!(generation = shared.generation, "retry state reset");
    }

    pub fn state(&self) -> RetryState<E> {
        self.lock().state.clone()
    }

    pub fn attempts(&self) -> u32 {
        self.lock().state.attempts
    }

    pub fn is_retrying(&self) -> bool {
        self.lock().state.is_retrying
    }

    pub fn last_error(&self) -> Option<E> {
        self.lock().state.last_error.clone()
    }

    pub fn can_retry(&self) -> bool {
        self.lock().state.can_retry(self.policy.max_attempts)
    }

    /// Receiver that observes every state transition.
    pub fn subscribe(&self) -> watch::Receiver<RetryState<E>> {
        self.published.subscribe()
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    fn lock(&self) -> MutexGuard<'_, Shared<E>> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start a run: returns its generation, or `None` if one is already in flight.
    fn begin(&self) -> Option<u64> {
        let mut shared = self.lock();
        if shared.state.is_retrying {
            return None;
        }
        shared.generation += 1;
        shared.state = RetryState {
            attempts: 1,
            is_retrying: true,
            last_error: None,
        };
        self.generation.send_replace(shared.generation);
        self.published.send_replace(shared.state.clone());
        Some(shared.generation)
    }

    /// Apply `f` if `generation` is still current. Returns false for a stale run.
    fn update<F>(&self, generation: u64, f: F) -> bool
    where
        F: FnOnce(&mut RetryState<E>),
    {
        let mut shared = self.lock();
        if shared.generation != generation {
            return false;
        }
        f(&mut shared.state);
        self.published.send_replace(shared.state.clone());
        true
    }

    /// Sleep for `delay` unless the run is invalidated first. Returns false if cancelled.
    async fn wait(&self, generation: u64, delay: Duration) -> bool {
        let current = self.generation.subscribe();
        if delay.is_zero() {
            return *current.borrow() == generation;
        }
        let cancelled = tokio::select! {
            _ = tokio::time::sleep(delay) => false,
            _ = invalidated(current, generation) => true,
        };
        !cancelled
    }
}

/// Resolves once the published generation moves past `generation`.
async fn invalidated(mut rx: watch::Receiver<u64>, generation: u64) {
    loop {
        let current = *rx.borrow_and_update();
        if current != generation {
            return;
        }
        if rx.changed().await.is_err() {
            // Sender lives as long as the coordinator; never resolve.
            std::future::pending::<()>().await;
        }
    }
}

impl<E: Clone> RetryCoordinator<E> {
    /// Close a run that ended without reaching success or exhaustion. No-op if
    /// the run already finished or was invalidated.
    pub(super) fn abandon(&self, generation: u64) {
        let mut shared = self.shared.lock().unwrap_or_else(PoisonError::into_inner);
        if shared.generation != generation || !shared.state.is_retrying {
            return;
        }
        shared.generation += 1;
        shared.state.is_retrying = false;
        self.generation.send_replace(shared.generation);
        self.published.send_replace(shared.state.clone());
        tracing::debug!(
            attempts = shared.state.attempts,
            "retry run dropped before completion"
        );
    }
}

impl<E> fmt::Debug for RetryCoordinator<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryCoordinator")
            .field("policy", &self.policy)
            .field("hooks", &self.hooks)
            .finish_non_exhaustive()
    }
}
