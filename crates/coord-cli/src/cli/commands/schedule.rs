//! `coord schedule` – print the backoff delays a failing run would wait.

use anyhow::Result;
use coord_core::retry::RetryPolicy;
use std::time::Duration;

pub fn run_schedule(policy: &RetryPolicy) -> Result<()> {
    let schedule = policy.schedule();
    if schedule.is_empty() {
        println!("max_attempts = 1: no retries.");
        return Ok(());
    }

    println!("{:<8} {:>12} {:>12}", "ATTEMPT", "DELAY", "ELAPSED");
    let mut elapsed = Duration::ZERO;
    for (i, delay) in schedule.iter().enumerate() {
        elapsed = elapsed.saturating_add(*delay);
        println!(
            "{:<8} {:>12} {:>12}",
            i + 2,
            format!("{}ms", delay.as_millis()),
            format!("{}ms", elapsed.as_millis())
        );
    }
    Ok(())
}
