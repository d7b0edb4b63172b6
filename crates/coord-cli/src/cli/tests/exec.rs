//! Tests for the exec subcommand and policy overrides.

use super::parse;
use clap::Parser;
use crate::cli::{CliCommand, PolicyArgs};
use coord_core::config::RetryConfig;
use tempfile::tempdir;

#[test]
fn cli_parse_exec_after_double_dash() {
    match parse(&["coord", "exec", "--", "curl", "-f", "https://example.com"]) {
        CliCommand::Exec { policy, command } => {
            assert_eq!(command, vec!["curl", "-f", "https://example.com"]);
            assert!(policy.max_attempts.is_none());
            assert!(policy.config.is_none());
        }
        _ => panic!("expected Exec"),
    }
}

#[test]
fn cli_parse_exec_with_overrides() {
    match parse(&[
        "coord",
        "exec",
        "--max-attempts",
        "5",
        "--initial-delay-ms",
        "250",
        "--max-delay-ms",
        "4000",
        "--multiplier",
        "1.5",
        "--config",
        "/tmp/coord.toml",
        "--",
        "false",
    ]) {
        CliCommand::Exec { policy, command } => {
            assert_eq!(command, vec!["false"]);
            assert_eq!(policy.max_attempts, Some(5));
            assert_eq!(policy.initial_delay_ms, Some(250));
            assert_eq!(policy.max_delay_ms, Some(4000));
            assert_eq!(policy.multiplier, Some(1.5));
            assert_eq!(
                policy.config.as_deref(),
                Some(std::path::Path::new("/tmp/coord.toml"))
            );
        }
        _ => panic!("expected Exec with overrides"),
    }
}

#[test]
fn cli_parse_exec_program_flags_are_not_ours() {
    match parse(&["coord", "exec", "ls", "--max-attempts", "9"]) {
        CliCommand::Exec { policy, command } => {
            assert!(policy.max_attempts.is_none());
            assert_eq!(command, vec!["ls", "--max-attempts", "9"]);
        }
        _ => panic!("expected Exec"),
    }
}

#[test]
fn cli_parse_exec_requires_command() {
    assert!(crate::cli::Cli::try_parse_from(["coord", "exec"]).is_err());
}

#[test]
fn policy_overrides_replace_only_given_fields() {
    let args = PolicyArgs {
        max_attempts: Some(7),
        multiplier: Some(3.0),
        ..PolicyArgs::default()
    };
    let merged = args.apply(RetryConfig::default());
    assert_eq!(merged.max_attempts, 7);
    assert_eq!(merged.backoff_multiplier, 3.0);
    assert_eq!(merged.initial_delay_ms, 1000);
    assert_eq!(merged.max_delay_ms, 10_000);
}

#[test]
fn resolve_reads_explicit_config_and_validates() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "[retry]\nmax_attempts = 4\ninitial_delay_ms = 5000\nmax_delay_ms = 6000\n",
    )
    .unwrap();

    let args = PolicyArgs {
        config: Some(path.clone()),
        ..PolicyArgs::default()
    };
    let policy = args.resolve().unwrap();
    assert_eq!(policy.max_attempts, 4);
    assert_eq!(policy.schedule().len(), 3);

    let bad = PolicyArgs {
        config: Some(path),
        max_attempts: Some(0),
        ..PolicyArgs::default()
    };
    assert!(bad.resolve().is_err());
}
