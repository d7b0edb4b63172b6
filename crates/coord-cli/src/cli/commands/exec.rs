//! `coord exec` – run a command under the retry coordinator.

use anyhow::{anyhow, Result};
use coord_core::command::{CommandAction, CommandError};
use coord_core::retry::{RetryCoordinator, RetryError, RetryHooks, RetryPolicy};

pub async fn run_exec(policy: &RetryPolicy, argv: &[String]) -> Result<()> {
    let action = CommandAction::from_argv(argv).ok_or_else(|| anyhow!("no command given"))?;

    let hooks = {
        let policy = *policy;
        RetryHooks::new().on_error(move |err: &CommandError, attempt| {
            if attempt < policy.max_attempts {
                eprintln!(
                    "coord: attempt {}/{} failed ({}); retrying in {}ms",
                    attempt,
                    policy.max_attempts,
                    err,
                    policy.delay_after(attempt).as_millis()
                );
            }
        })
    };
    let coordinator = RetryCoordinator::with_hooks(*policy, hooks)?;

    // Print retry progress from the state feed.
    let mut rx = coordinator.subscribe();
    let max_attempts = policy.max_attempts;
    let progress = tokio::spawn(async move {
        let mut shown = 1;
        while rx.changed().await.is_ok() {
            let attempts = {
                let state = rx.borrow_and_update();
                if !state.is_retrying {
                    continue;
                }
                state.attempts
            };
            if attempts > shown {
                eprintln!("coord: attempt {}/{}", attempts, max_attempts);
                shown = attempts;
            }
        }
    });

    let outcome = coordinator.retry(|| action.run()).await;
    drop(coordinator);
    let _ = progress.await;

    match outcome {
        Ok(()) => {
            tracing::info!(program = action.program(), "command succeeded");
            Ok(())
        }
        Err(RetryError::Exhausted { attempts, source }) => Err(anyhow!(
            "{} failed after {} attempt(s): {}",
            action.program(),
            attempts,
            source
        )),
        Err(e) => Err(e.into()),
    }
}
