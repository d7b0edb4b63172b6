//! External command as a retryable action.

use tokio::process::Command;

/// Failure of one command attempt. `Clone` so the coordinator can keep it as `last_error`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// The program could not be started (not found, permission denied, ...).
    #[error("failed to start: {0}")]
    Spawn(String),
    /// The program ran and exited unsuccessfully. `code` is `None` when killed by a signal.
    #[error("{}", exit_message(.code))]
    Exit { code: Option<i32> },
}

fn exit_message(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("exited with status {c}"),
        None => "terminated by signal".to_string(),
    }
}

/// A program plus arguments, re-spawned on every attempt.
#[derive(Debug, Clone)]
pub struct CommandAction {
    program: String,
    args: Vec<String>,
}

impl CommandAction {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Build from a `[program, args...]` list; `None` if empty.
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self::new(program.clone(), args.to_vec()))
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Run the command once, inheriting stdio. Succeeds on exit status 0.
    pub async fn run(&self) -> Result<(), CommandError> {
        tracing::debug!(program = %self.program, args = ?self.args, "spawning command");
        let status = Command::new(&self.program)
            .args(&self.args)
            .kill_on_drop(true)
            .status()
            .await
            .map_err(|e| CommandError::Spawn(format!("{}: {}", self.program, e)))?;
        if status.success() {
            Ok(())
        } else {
            Err(CommandError::Exit {
                code: status.code(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_argv_splits_program_and_args() {
        let argv = vec!["curl".to_string(), "-f".to_string(), "x".to_string()];
        let action = CommandAction::from_argv(&argv).unwrap();
        assert_eq!(action.program(), "curl");
        assert_eq!(action.args, vec!["-f", "x"]);
        assert!(CommandAction::from_argv(&[]).is_none());
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            CommandError::Exit { code: Some(2) }.to_string(),
            "exited with status 2"
        );
        assert_eq!(
            CommandError::Exit { code: None }.to_string(),
            "terminated by signal"
        );
        assert_eq!(
            CommandError::Spawn("nope: not found".into()).to_string(),
            "failed to start: nope: not found"
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn exit_status_maps_to_result() {
        assert_eq!(CommandAction::new("true", vec![]).run().await, Ok(()));
        assert_eq!(
            CommandAction::new("sh", vec!["-c".into(), "exit 3".into()])
                .run()
                .await,
            Err(CommandError::Exit { code: Some(3) })
        );
    }

    #[tokio::test]
    async fn missing_program_is_spawn_error() {
        let err = CommandAction::new("coord-definitely-not-a-program", vec![])
            .run()
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::Spawn(_)));
    }
}
