//! CLI command handlers, one per file.

mod completions;
mod config;
mod exec;
mod schedule;

pub use completions::run_completions;
pub use config::run_config;
pub use exec::run_exec;
pub use schedule::run_schedule;
