// src/services/runner.rs
use std::io::ErrorKind;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::error::RelayError;

/// Captured result of one finished child process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// `None` when the child was killed by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs the model runtime's command line with the given arguments.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, args: &[&str], timeout: Duration) -> Result<CommandOutput, RelayError>;
}

/// Spawns a real child process for every call.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    program: String,
    env: Vec<(String, String)>,
}

impl ProcessRunner {
    /// A runner that forces a UTF-8 locale on the child.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            env: vec![
                ("LANG".to_string(), "C.UTF-8".to_string()),
                ("LC_ALL".to_string(), "C.UTF-8".to_string()),
            ],
        }
    }

    pub fn with_env(program: impl Into<String>, env: Vec<(String, String)>) -> Self {
        Self {
            program: program.into(),
            env,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn describe(&self, args: &[&str]) -> String {
        // Prompts can be long; the first argument is enough to identify the call.
        match args.first() {
            Some(sub) => format!("{} {}", self.program, sub),
            None => self.program.clone(),
        }
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, args: &[&str], timeout: Duration) -> Result<CommandOutput, RelayError> {
        let command = self.describe(args);
        debug!(%command, ?timeout, "spawning");

        let child = Command::new(&self.program)
            .args(args)
            .envs(self.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| match source.kind() {
                ErrorKind::NotFound => RelayError::NotInstalled {
                    program: self.program.clone(),
                },
                _ => RelayError::Io {
                    command: command.clone(),
                    source,
                },
            })?;

        // Dropping the wait future on timeout kills the child.
        let output = tokio::time::timeout(timeout, child.wait_with_output())
            .await
            .map_err(|_| RelayError::Timeout {
                command: command.clone(),
                after: timeout,
            })?
            .map_err(|source| RelayError::Io {
                command: command.clone(),
                source,
            })?;

        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_program_is_not_installed() {
        let runner = ProcessRunner::new("definitely-not-a-real-ollama-binary");
        let err = runner.run(&["list"], Duration::from_secs(5)).await.unwrap_err();
        assert!(matches!(err, RelayError::NotInstalled { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn captures_exit_code_and_streams() {
        let runner = ProcessRunner::new("sh");
        let out = runner
            .run(&["-c", "echo hello; echo oops >&2; exit 3"], Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(out.code, Some(3));
        assert!(!out.success());
        assert_eq!(out.stdout.trim(), "hello");
        assert_eq!(out.stderr.trim(), "oops");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn forwards_locale_env() {
        let runner = ProcessRunner::new("sh");
        let out = runner
            .run(&["-c", "printf %s \"$LC_ALL\""], Duration::from_secs(5))
            .await
            .unwrap();
        assert!(out.success());
        assert_eq!(out.stdout, "C.UTF-8");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn invalid_utf8_is_replaced() {
        let runner = ProcessRunner::new("sh");
        let out = runner
            .run(&["-c", "printf 'ok\\377'"], Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(out.stdout, "ok\u{FFFD}");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn slow_child_times_out() {
        let runner = ProcessRunner::new("sleep");
        let err = runner.run(&["5"], Duration::from_millis(100)).await.unwrap_err();
        match err {
            RelayError::Timeout { command, after } => {
                assert_eq!(command, "sleep 5");
                assert_eq!(after, Duration::from_millis(100));
            }
            other => panic!("expected timeout, got {other:?}"),
        }
    }
}
