// src/error.rs
use std::time::Duration;

use thiserror::Error;

pub const TIMEOUT_REPLY: &str =
    "I'm taking a bit longer to think about your message. Please try again in a moment.";
pub const NOT_INSTALLED_REPLY: &str = "Ollama is not installed or not in PATH. Please install Ollama first and make sure it's running.";
pub const UNEXPECTED_REPLY: &str = "I encountered an unexpected issue. Please try again or check if Ollama is running properly.";

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("`{command}` timed out after {}s", .after.as_secs())]
    Timeout { command: String, after: Duration },

    #[error("`{program}` was not found in PATH")]
    NotInstalled { program: String },

    #[error("failed to run `{command}`: {source}")]
    Io {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

impl RelayError {
    /// The user-facing reply the chat endpoint sends instead of a fault status.
    pub fn fallback_reply(&self) -> &'static str {
        match self {
            RelayError::Timeout { .. } => TIMEOUT_REPLY,
            RelayError::NotInstalled { .. } => NOT_INSTALLED_REPLY,
            RelayError::Io { .. } => UNEXPECTED_REPLY,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },

    #[error("OLLAMA_MODELS must name at least one model")]
    NoModels,
}
