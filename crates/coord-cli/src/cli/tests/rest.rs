//! Tests for schedule, config, completions.

use super::parse;
use crate::cli::CliCommand;
use clap_complete::Shell;

#[test]
fn cli_parse_schedule() {
    match parse(&["coord", "schedule", "--max-attempts", "4"]) {
        CliCommand::Schedule { policy } => assert_eq!(policy.max_attempts, Some(4)),
        _ => panic!("expected Schedule"),
    }
}

#[test]
fn cli_parse_config() {
    match parse(&["coord", "config"]) {
        CliCommand::Config { config } => assert!(config.is_none()),
        _ => panic!("expected Config"),
    }
}

#[test]
fn cli_parse_config_path() {
    match parse(&["coord", "config", "--config", "/etc/coord.toml"]) {
        CliCommand::Config { config } => {
            assert_eq!(config.as_deref(), Some(std::path::Path::new("/etc/coord.toml")))
        }
        _ => panic!("expected Config with --config"),
    }
}

#[test]
fn cli_parse_completions() {
    match parse(&["coord", "completions", "bash"]) {
        CliCommand::Completions { shell } => assert_eq!(shell, Shell::Bash),
        _ => panic!("expected Completions"),
    }
}

#[test]
fn cli_definition_is_consistent() {
    use clap::CommandFactory;
    crate::cli::Cli::command().debug_assert();
}
