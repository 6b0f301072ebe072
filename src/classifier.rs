//! Optional LLM presenter in front of the deterministic command core.
//!
//! When a `[classifier]` section is configured, the gateway asks an
//! OpenAI-compatible endpoint to rephrase the dispatcher's reply in a
//! conversational voice. The deterministic parser and dispatcher always run
//! first and stay authoritative: the model's output is opaque text, never
//! parsed for structure, and any failure falls back to the original reply.

use crate::client::http::build_backend_client;
use crate::config::ClassifierConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const PRESENTER_TIMEOUT_SECS: u64 = 15;

const SYSTEM_PROMPT: &str = "You are the voice of a todo assistant. Rephrase the \
assistant result below as one short, friendly sentence. Keep every task title \
and id exactly as written. Do not add, remove, or reinterpret information.";

#[async_trait]
pub trait Presenter: Send + Sync {
    /// Rephrase `reply` for the user. Errors are recoverable — the caller
    /// falls back to the deterministic reply text.
    async fn present(&self, user_message: &str, reply: &str) -> anyhow::Result<String>;
}

pub struct LlmPresenter {
    cached_completions_url: String,
    api_key: Option<String>,
    model: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl LlmPresenter {
    pub fn from_config(config: &ClassifierConfig) -> Self {
        let base = config.base_url.trim_end_matches('/');
        Self {
            cached_completions_url: format!("{base}/chat/completions"),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            client: build_backend_client(PRESENTER_TIMEOUT_SECS),
        }
    }

    fn extract_text(response: ChatResponse) -> anyhow::Result<String> {
        let text = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .unwrap_or_default();
        if text.is_empty() {
            anyhow::bail!("presenter returned no text");
        }
        Ok(text)
    }
}

#[async_trait]
impl Presenter for LlmPresenter {
    async fn present(&self, user_message: &str, reply: &str) -> anyhow::Result<String> {
        let prompt = format!("User said: {user_message}\nAssistant result: {reply}");
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                Message {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                Message {
                    role: "user",
                    content: &prompt,
                },
            ],
            temperature: 0.2,
        };

        let mut builder = self.client.post(&self.cached_completions_url).json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await?;
        if !response.status().is_success() {
            anyhow::bail!("presenter endpoint returned {}", response.status());
        }

        Self::extract_text(response.json().await?)
    }
}
