//! Optional observer callbacks fired at each retry transition.

use std::fmt;
use std::sync::Arc;

type RetryFn = Arc<dyn Fn(u32) + Send + Sync>;
type SuccessFn = Arc<dyn Fn() + Send + Sync>;
type ErrorFn<E> = Arc<dyn Fn(&E, u32) + Send + Sync>;

/// Callbacks invoked synchronously by the coordinator, outside its state lock.
/// A panic in a hook is not caught.
pub struct RetryHooks<E> {
    on_retry: Option<RetryFn>,
    on_success: Option<SuccessFn>,
    on_error: Option<ErrorFn<E>>,
}

impl<E> RetryHooks<E> {
    pub fn new() -> Self {
        Self {
            on_retry: None,
            on_success: None,
            on_error: None,
        }
    }

    /// Called with the attempt number when an attempt starts (the first one included).
    pub fn on_retry<F>(mut self, f: F) -> Self
    where
        F: Fn(u32) + Send + Sync + 'static,
    {
        self.on_retry = Some(Arc::new(f));
        self
    }

    /// Called once the action succeeds and state has been reset.
    pub fn on_success<F>(mut self, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_success = Some(Arc::new(f));
        self
    }

    /// Called with the error and attempt number after each failed attempt.
    pub fn on_error<F>(mut self, f: F) -> Self
    where
        F: Fn(&E, u32) + Send + Sync + 'static,
    {
        self.on_error = Some(Arc::new(f));
        self
    }

    pub(super) fn retry(&self, attempt: u32) {
        if let Some(f) = &self.on_retry {
            f(attempt);
        }
    }

    pub(super) fn success(&self) {
        if let Some(f) = &self.on_success {
            f();
        }
    }

    pub(super) fn error(&self, err: &E, attempt: u32) {
        if let Some(f) = &self.on_error {
            f(err, attempt);
        }
    }
}

impl<E> Default for RetryHooks<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for RetryHooks<E> {
    fn clone(&self) -> Self {
        Self {
            on_retry: self.on_retry.clone(),
            on_success: self.on_success.clone(),
            on_error: self.on_error.clone(),
        }
    }
}

impl<E> fmt::Debug for RetryHooks<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryHooks")
            .field("on_retry", &self.on_retry.is_some())
            .field("on_success", &self.on_success.is_some())
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}
