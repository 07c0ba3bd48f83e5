//! Groq chat-completions provider.
//!
//! Groq exposes an OpenAI-compatible API; this provider targets it directly
//! and classifies failures by cause so the chat layer can explain them.
//! Transient failures are retried with exponential backoff.

use async_trait::async_trait;
use krishi_core::{
    config::GroqConfig,
    context::{ApiMessage, Context},
    error::{KrishiError, ProviderErrorKind},
    message::{MessageMetadata, OutgoingMessage},
    traits::Provider,
};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

const GROQ_API_URL: &str = "https://api.groq.com/openai/v1";

/// Groq chat-completions provider.
pub struct GroqProvider {
    client: reqwest::Client,
    api_key: String,
    model: String,
    max_retries: u32,
}

impl GroqProvider {
    /// Create from config values. The API key falls back to the
    /// GROQ_API_KEY environment variable when the config leaves it empty.
    pub fn from_config(config: &GroqConfig) -> Result<Self, KrishiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                KrishiError::provider(
                    ProviderErrorKind::Unknown,
                    format!("failed to build http client: {e}"),
                )
            })?;
        Ok(Self {
            client,
            api_key: config.resolved_api_key(),
            model: config.model.clone(),
            max_retries: config.max_retries.max(1),
        })
    }
}

/// Build chat messages from context (system prompt as a message role).
fn build_chat_messages(system: &str, api_messages: &[ApiMessage]) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(api_messages.len() + 1);
    if !system.is_empty() {
        messages.push(ChatMessage {
            role: "system".to_string(),
            content: system.to_string(),
        });
    }
    for m in api_messages {
        messages.push(ChatMessage {
            role: m.role.clone(),
            content: m.content.clone(),
        });
    }
    messages
}

#[derive(Serialize, Deserialize, Clone)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Option<Vec<ChatChoice>>,
    model: Option<String>,
    usage: Option<ChatUsage>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: Option<ChatMessage>,
}

#[derive(Deserialize)]
struct ChatUsage {
    total_tokens: Option<u64>,
}

/// Map a transport-level failure to a provider error kind.
fn classify_request_error(e: &reqwest::Error) -> ProviderErrorKind {
    if e.is_timeout() {
        ProviderErrorKind::Timeout
    } else if e.is_connect() {
        ProviderErrorKind::Network
    } else {
        ProviderErrorKind::Unknown
    }
}

/// Map an HTTP status to a provider error kind.
fn classify_status(status: reqwest::StatusCode) -> ProviderErrorKind {
    match status.as_u16() {
        401 | 403 => ProviderErrorKind::Credential,
        429 => ProviderErrorKind::RateLimited,
        500..=599 => ProviderErrorKind::Network,
        _ => ProviderErrorKind::Unknown,
    }
}

impl GroqProvider {
    async fn send_once(
        &self,
        body: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, KrishiError> {
        let url = format!("{GROQ_API_URL}/chat/completions");
        debug!("groq: POST {url} model={}", body.model);

        let resp = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(body)
            .send()
            .await
            .map_err(|e| {
                KrishiError::provider(classify_request_error(&e), format!("groq request failed: {e}"))
            })?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(KrishiError::provider(
                classify_status(status),
                format!("groq returned {status}: {text}"),
            ));
        }

        resp.json().await.map_err(|e| {
            KrishiError::provider(
                ProviderErrorKind::Unknown,
                format!("groq: failed to parse response: {e}"),
            )
        })
    }
}

#[async_trait]
impl Provider for GroqProvider {
    fn name(&self) -> &str {
        "groq"
    }

    fn requires_api_key(&self) -> bool {
        true
    }

    async fn complete(&self, context: &Context) -> Result<OutgoingMessage, KrishiError> {
        if self.api_key.is_empty() {
            return Err(KrishiError::provider(
                ProviderErrorKind::Credential,
                "no Groq API key configured (set provider.groq.api_key or GROQ_API_KEY)",
            ));
        }

        let (system, api_messages) = context.to_api_messages();
        let body = ChatCompletionRequest {
            model: self.model.clone(),
            messages: build_chat_messages(&system, &api_messages),
            temperature: 0.7,
            max_tokens: 1500,
        };
        let start = Instant::now();

        let mut attempt = 0;
        let parsed = loop {
            attempt += 1;
            match self.send_once(&body).await {
                Ok(parsed) => break parsed,
                Err(e) => {
                    let transient = matches!(
                        &e,
                        KrishiError::Provider { kind, .. } if kind.is_transient()
                    );
                    if transient && attempt < self.max_retries {
                        let delay = Duration::from_secs(1 << (attempt - 1));
                        warn!("groq attempt {attempt} failed, retrying in {delay:?}: {e}");
                        tokio::time::sleep(delay).await;
                        continue;
                    }
                    return Err(e);
                }
            }
        };

        let text = parsed
            .choices
            .as_ref()
            .and_then(|c| c.first())
            .and_then(|c| c.message.as_ref())
            .map(|m| m.content.clone())
            .unwrap_or_else(|| "No response from Groq.".to_string());

        let tokens = parsed.usage.as_ref().and_then(|u| u.total_tokens);
        let elapsed_ms = start.elapsed().as_millis() as u64;

        Ok(OutgoingMessage {
            text,
            metadata: MessageMetadata {
                provider_used: "groq".to_string(),
                tokens_used: tokens,
                processing_time_ms: elapsed_ms,
                model: parsed.model,
            },
        })
    }

    async fn is_available(&self) -> bool {
        if self.api_key.is_empty() {
            warn!("groq: no API key configured");
            return false;
        }
        // Basic check: try to list models.
        let url = format!("{GROQ_API_URL}/models");
        match self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                warn!("groq not available: {e}");
                false
            }
        }
    }
}
