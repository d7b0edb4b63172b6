//! `coord config` – show where settings come from and what they resolve to.

use anyhow::Result;
use coord_core::config;
use std::path::Path;

pub fn run_config(explicit: Option<&Path>) -> Result<()> {
    let (path, cfg) = match explicit {
        Some(p) => (p.to_path_buf(), config::load_from_path(p)?),
        None => (config::config_path()?, config::load_or_init()?),
    };
    let retry = cfg.retry_or_default();
    let valid = match retry.to_policy() {
        Ok(_) => "valid".to_string(),
        Err(e) => format!("INVALID ({e})"),
    };

    println!("# {}", path.display());
    println!("[retry]  # {}", valid);
    println!("max_attempts = {}", retry.max_attempts);
    println!("initial_delay_ms = {}", retry.initial_delay_ms);
    println!("max_delay_ms = {}", retry.max_delay_ms);
    println!("backoff_multiplier = {}", retry.backoff_multiplier);
    Ok(())
}
