//! Retry and backoff coordination.
//!
//! A `RetryCoordinator` runs a caller-supplied async action, retries every
//! failure with capped exponential backoff, and publishes its progress
//! (attempt count, in-flight flag, last error) to hooks and subscribers.

mod coordinator;
mod error;
mod guard;
mod hooks;
mod policy;
mod run;
mod state;

pub use coordinator::RetryCoordinator;
pub use error::{ConfigError, RetryError};
pub use hooks::RetryHooks;
pub use policy::RetryPolicy;
pub use run::run_with_retry;
pub use state::RetryState;
