//! RAII guard that closes out a run whose future is dropped before it finishes.

use super::coordinator::RetryCoordinator;

/// Ends the run for `generation` when dropped, unless it already ended.
/// Covers timeouts, `select!` losers, aborted tasks and panicking actions.
pub(super) struct RunGuard<'a, E: Clone> {
    pub(super) coordinator: &'a RetryCoordinator<E>,
    pub(super) generation: u64,
}

impl<E: Clone> Drop for RunGuard<'_, E> {
    fn drop(&mut self) {
        self.coordinator.abandon(self.generation);
    }
}
