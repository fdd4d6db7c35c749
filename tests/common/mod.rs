#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chat_relay::config::RelayConfig;
use chat_relay::error::RelayError;
use chat_relay::services::relay::ChatRelay;
use chat_relay::services::runner::{CommandOutput, CommandRunner};

type Script = dyn Fn(&[&str]) -> Result<CommandOutput, RelayError> + Send + Sync;

/// Answers each call from a script and records the arguments it was given.
pub struct ScriptedRunner {
    script: Box<Script>,
    calls: Mutex<Vec<Vec<String>>>,
}

impl ScriptedRunner {
    pub fn new<F>(script: F) -> Arc<Self>
    where
        F: Fn(&[&str]) -> Result<CommandOutput, RelayError> + Send + Sync + 'static,
    {
        Arc::new(Self {
            script: Box::new(script),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }

    /// Models passed to `run`, in call order.
    pub fn models_tried(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|args| args.first().map(String::as_str) == Some("run"))
            .map(|args| args[1].clone())
            .collect()
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, args: &[&str], _timeout: Duration) -> Result<CommandOutput, RelayError> {
        self.calls
            .lock()
            .unwrap()
            .push(args.iter().map(|a| a.to_string()).collect());
        (self.script)(args)
    }
}

pub fn ok(stdout: &str) -> Result<CommandOutput, RelayError> {
    Ok(CommandOutput {
        code: Some(0),
        stdout: stdout.to_string(),
        stderr: String::new(),
    })
}

pub fn exit(code: i32, stderr: &str) -> Result<CommandOutput, RelayError> {
    Ok(CommandOutput {
        code: Some(code),
        stdout: String::new(),
        stderr: stderr.to_string(),
    })
}

pub fn timed_out(args: &[&str]) -> Result<CommandOutput, RelayError> {
    Err(RelayError::Timeout {
        command: format!("ollama {}", args[0]),
        after: Duration::from_secs(90),
    })
}

pub const MODEL_LIST: &str = "NAME            ID      SIZE\nllama3:latest   abc123  4.7 GB\n";

pub fn relay_with(runner: Arc<ScriptedRunner>) -> ChatRelay {
    ChatRelay::new(runner, &RelayConfig::default())
}

pub fn history(turns: &[&str]) -> Vec<String> {
    turns.iter().map(|t| t.to_string()).collect()
}
