// src/services/relay.rs
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::config::RelayConfig;
use crate::error::RelayError;
use crate::message::HealthReport;
use crate::services::prompt::{build_prompt, clean_reply, extract_user_message};
use crate::services::runner::{CommandRunner, ProcessRunner};

pub const NOT_RUNNING_REPLY: &str = "Ollama is not running. Please start 'ollama serve' in your terminal and make sure Llama 3 is installed.";
pub const MODEL_UNAVAILABLE_REPLY: &str = "I'm having trouble accessing Llama 3 right now. Please make sure it's properly installed and running.";
pub const EMPTY_REPLY: &str = "I'm here to help! Could you tell me more about what's on your mind?";

/// Tries each candidate in order and returns the first one whose attempt
/// produced a value. Failed and empty attempts are logged and skipped.
pub async fn first_success<'a, T, F, Fut>(
    candidates: &'a [String],
    mut attempt: F,
) -> Option<(&'a str, T)>
where
    F: FnMut(&'a str) -> Fut,
    Fut: Future<Output = Result<Option<T>, RelayError>>,
{
    for candidate in candidates {
        match attempt(candidate).await {
            Ok(Some(value)) => return Some((candidate.as_str(), value)),
            Ok(None) => warn!(candidate = %candidate, "attempt failed or returned nothing"),
            Err(err) => warn!(candidate = %candidate, error = %err, "attempt errored"),
        }
    }
    None
}

#[derive(Clone)]
pub struct ChatRelay {
    runner: Arc<dyn CommandRunner>,
    models: Vec<String>,
    liveness_timeout: Duration,
    health_timeout: Duration,
    generate_timeout: Duration,
}

impl std::fmt::Debug for ChatRelay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatRelay")
            .field("models", &self.models)
            .field("generate_timeout", &self.generate_timeout)
            .finish()
    }
}

impl ChatRelay {
    pub fn new(runner: Arc<dyn CommandRunner>, config: &RelayConfig) -> Self {
        Self {
            runner,
            models: config.models.clone(),
            liveness_timeout: config.liveness_timeout,
            health_timeout: config.health_timeout,
            generate_timeout: config.generate_timeout,
        }
    }

    pub fn from_config(config: &RelayConfig) -> Self {
        Self::new(Arc::new(ProcessRunner::new(config.program.clone())), config)
    }

    pub fn models(&self) -> &[String] {
        &self.models
    }

    /// Always produces a non-empty reply; runtime failures become explanatory text.
    pub async fn handle_chat(&self, history: &[String]) -> String {
        match self.try_chat(history).await {
            Ok(reply) => reply,
            Err(err) => {
                error!(error = %err, "chat relay failed");
                err.fallback_reply().to_string()
            }
        }
    }

    async fn try_chat(&self, history: &[String]) -> Result<String, RelayError> {
        let probe = self.runner.run(&["list"], self.liveness_timeout).await?;
        if !probe.success() {
            warn!(stderr = %probe.stderr.trim(), "liveness probe failed");
            return Ok(NOT_RUNNING_REPLY.to_string());
        }

        let user_message = extract_user_message(history);
        info!(message = %user_message, "processing message");
        let prompt = build_prompt(&user_message);

        let runner = &self.runner;
        let timeout = self.generate_timeout;
        let prompt = prompt.as_str();
        let winner = first_success(&self.models, |model| async move {
            info!(model, "trying model");
            let out = runner.run(&["run", model, prompt], timeout).await?;
            if out.success() && !out.stdout.trim().is_empty() {
                Ok(Some(out.stdout))
            } else {
                Ok(None)
            }
        })
        .await;

        let Some((model, raw)) = winner else {
            error!("every model attempt failed");
            return Ok(MODEL_UNAVAILABLE_REPLY.to_string());
        };
        info!(model, "model replied");

        let reply = clean_reply(&raw);
        if reply.is_empty() {
            return Ok(EMPTY_REPLY.to_string());
        }

        info!(reply = %preview(&reply, 100), "sending reply");
        Ok(reply)
    }

    pub async fn health_check(&self) -> HealthReport {
        match self.runner.run(&["list"], self.health_timeout).await {
            Ok(out) if out.success() => HealthReport::running(out.stdout.trim()),
            Ok(out) => HealthReport::not_responding(out.stderr.trim()),
            Err(err) => HealthReport::failed(err.to_string()),
        }
    }
}

fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
