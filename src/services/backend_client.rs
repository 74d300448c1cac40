use reqwest::Client;
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::ChatMessage;
use crate::services::config_service;

/// Shown in place of a reply when the backend answers 2xx without a
/// `response` field.
const MISSING_RESPONSE_PLACEHOLDER: &str = "No response received";

/// Failures talking to the chat backend, normalized into the three cases
/// the frontend presents differently.
#[derive(Debug, Error)]
pub enum BackendError {
    /// No backend URL in the config; refused before any request is made.
    #[error("No backend URL configured. Set one in Settings before chatting.")]
    NotConfigured,

    /// The backend could not be reached at all (connection refused, DNS
    /// failure, unreadable reply). Carries the attempted base URL.
    #[error("Unable to reach backend at {url}: {reason}")]
    Unreachable { url: String, reason: String },

    /// The backend answered with an error status; `detail` is its own
    /// message when it sent one.
    #[error("{detail}")]
    RequestFailed { detail: String },
}

/// Chat request body: the new message plus the conversation so far.
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
    history: Vec<WireMessage<'a>>,
}

/// How conversation messages travel on the wire: role, content, and an
/// ISO-8601 timestamp, without the client-side ids.
#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
    timestamp: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    response: Option<String>,
    model: Option<String>,
    tokens_used: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct HealthResponse {
    status: Option<String>,
    model: Option<String>,
}

/// What a successful chat call yields.
#[derive(Debug, Clone)]
pub struct ChatOutcome {
    pub response: String,
    pub model: Option<String>,
    pub tokens_used: Option<u64>,
}

/// Health endpoint result, with "unknown" standing in for missing fields.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: String,
    pub model: Option<String>,
}

/// Client for the chat backend's two endpoints.
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    /// Create a client for the given base URL. No timeout is set at this
    /// layer; the transport's defaults apply.
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create a client from the saved configuration. A missing or blank
    /// backend URL is a hard configuration error, never an empty request
    /// target.
    pub fn from_config() -> Result<Self, BackendError> {
        Self::from_saved_url(config_service::get_backend_url().unwrap_or(None))
    }

    fn from_saved_url(url: Option<String>) -> Result<Self, BackendError> {
        match url {
            Some(url) if !url.trim().is_empty() => Ok(Self::new(url.trim())),
            _ => Err(BackendError::NotConfigured),
        }
    }

    fn unreachable(&self, reason: impl std::fmt::Display) -> BackendError {
        BackendError::Unreachable {
            url: self.base_url.clone(),
            reason: reason.to_string(),
        }
    }

    /// Probe the health endpoint. Missing body fields are reported as
    /// unknown rather than failing the check.
    pub async fn check_health(&self) -> Result<HealthStatus, BackendError> {
        let url = format!("{}/health", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.unreachable(e))?;

        if !response.status().is_success() {
            return Err(self.unreachable(format!(
                "health check returned HTTP {}",
                response.status()
            )));
        }

        let body: HealthResponse = response.json().await.unwrap_or_default();
        Ok(HealthStatus {
            status: body.status.unwrap_or_else(|| "unknown".to_string()),
            model: body.model,
        })
    }

    /// Send a chat message along with the conversation so far.
    pub async fn send_chat(
        &self,
        message: &str,
        history: &[ChatMessage],
    ) -> Result<ChatOutcome, BackendError> {
        let request = ChatRequest {
            message,
            history: history
                .iter()
                .map(|m| WireMessage {
                    role: &m.role,
                    content: &m.content,
                    timestamp: m.timestamp,
                })
                .collect(),
        };

        let url = format!("{}/api/chat", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.unreachable(e))?;

        if !response.status().is_success() {
            let detail = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.detail)
                .unwrap_or_else(|| "Unknown error".to_string());
            return Err(BackendError::RequestFailed { detail });
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| self.unreachable(format!("unreadable response body: {}", e)))?;

        Ok(ChatOutcome {
            response: body
                .response
                .unwrap_or_else(|| MISSING_RESPONSE_PLACEHOLDER.to_string()),
            model: body.model,
            tokens_used: body.tokens_used,
        })
    }
}
