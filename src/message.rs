// src/message.rs
use serde::{Deserialize, Serialize};

pub const WELCOME_MESSAGE: &str =
    "Welcome to the Mental Health Chatbot API. Use POST /api/chat to chat.";

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Full conversation history, oldest first.
    pub message: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WelcomeResponse {
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ollama: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub models: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthReport {
    pub fn running(models: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Healthy,
            ollama: Some("running".to_string()),
            models: Some(models.into()),
            error: None,
        }
    }

    pub fn not_responding(stderr: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Unhealthy,
            ollama: Some("not responding".to_string()),
            models: None,
            error: Some(stderr.into()),
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Unhealthy,
            ollama: None,
            models: None,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_report_omits_absent_fields() {
        let json = serde_json::to_value(HealthReport::failed("spawn failed")).unwrap();
        assert_eq!(json, serde_json::json!({"status": "unhealthy", "error": "spawn failed"}));

        let json = serde_json::to_value(HealthReport::running("NAME ID SIZE")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"status": "healthy", "ollama": "running", "models": "NAME ID SIZE"})
        );
    }
}
