//! CLI for the coord retry coordinator.

mod commands;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use coord_core::config::{self, CoordConfig, RetryConfig};
use coord_core::retry::RetryPolicy;
use std::path::PathBuf;

use commands::{run_completions, run_config, run_exec, run_schedule};

/// Top-level CLI for coord.
#[derive(Debug, Parser)]
#[command(name = "coord")]
#[command(about = "coord: run commands with exponential-backoff retry", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Policy overrides shared by commands that build a retry policy.
#[derive(Debug, Clone, Default, Args)]
pub struct PolicyArgs {
    /// Config file to read instead of ~/.config/coord/config.toml.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// Maximum number of attempts, the first one included.
    #[arg(long, value_name = "N")]
    pub max_attempts: Option<u32>,
    /// Delay before the second attempt.
    #[arg(long, value_name = "MS")]
    pub initial_delay_ms: Option<u64>,
    /// Upper bound on any single delay.
    #[arg(long, value_name = "MS")]
    pub max_delay_ms: Option<u64>,
    /// Delay growth factor per retry.
    #[arg(long, value_name = "X")]
    pub multiplier: Option<f64>,
}

impl PolicyArgs {
    /// Config file named by `--config`, or the default one (created if missing).
    pub fn load_config(&self) -> Result<CoordConfig> {
        match &self.config {
            Some(path) => config::load_from_path(path),
            None => config::load_or_init(),
        }
    }

    /// Apply command-line overrides on top of `base`.
    pub fn apply(&self, base: RetryConfig) -> RetryConfig {
        RetryConfig {
            max_attempts: self.max_attempts.unwrap_or(base.max_attempts),
            initial_delay_ms: self.initial_delay_ms.unwrap_or(base.initial_delay_ms),
            max_delay_ms: self.max_delay_ms.unwrap_or(base.max_delay_ms),
            backoff_multiplier: self.multiplier.unwrap_or(base.backoff_multiplier),
        }
    }

    pub fn resolve(&self) -> Result<RetryPolicy> {
        let cfg = self.load_config()?;
        tracing::debug!("loaded config: {:?}", cfg);
        let policy = self
            .apply(cfg.retry_or_default())
            .to_policy()
            .context("invalid retry policy")?;
        Ok(policy)
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Run a command, retrying it with backoff until it exits 0.
    Exec {
        #[command(flatten)]
        policy: PolicyArgs,
        /// Program and its arguments (put them after `--`).
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },

    /// Print the delay before each retry for the effective policy.
    Schedule {
        #[command(flatten)]
        policy: PolicyArgs,
    },

    /// Show the config file path and the effective retry settings.
    Config {
        /// Config file to read instead of the default.
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,
    },

    /// Print shell completions to stdout.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Exec { policy, command } => run_exec(&policy.resolve()?, &command).await?,
            CliCommand::Schedule { policy } => run_schedule(&policy.resolve()?)?,
            CliCommand::Config { config } => run_config(config.as_deref())?,
            CliCommand::Completions { shell } => run_completions(shell),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
