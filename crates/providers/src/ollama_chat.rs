//! Ollama `/api/chat` backend: a role-tagged message list per request.
//!
//! The framing and the retrieved passage travel in the leading system
//! message; history turns follow as user/assistant messages.

use std::time::Duration;

use async_trait::async_trait;
use parley_core::error::BackendError;
use parley_core::prompt::{MessageList, PromptFormat, PromptPayload};
use parley_core::provider::{FragmentStream, GenerationBackend, GenerationRequest};
use serde::Deserialize;

use crate::ndjson::{self, Line};
use crate::ollama::{self, OllamaClient};

pub struct OllamaChatBackend {
    client: OllamaClient,
    model: String,
    format: MessageList,
}

impl OllamaChatBackend {
    pub fn new(base_url: &str, model: impl Into<String>) -> Self {
        Self::with_connect_timeout(base_url, model, Duration::from_secs(10))
    }

    pub fn with_connect_timeout(
        base_url: &str,
        model: impl Into<String>,
        connect_timeout: Duration,
    ) -> Self {
        Self {
            client: OllamaClient::new(base_url, connect_timeout),
            model: model.into(),
            format: MessageList,
        }
    }

    fn build_body(request: &GenerationRequest) -> Result<serde_json::Value, BackendError> {
        let PromptPayload::Messages(messages) = &request.payload else {
            return Err(BackendError::UnsupportedPayload(
                "ollama-chat expects a message list".into(),
            ));
        };

        let mut body = serde_json::json!({
            "model": request.model,
            "messages": messages,
            "stream": true,
        });
        if let Some(options) = ollama::options(request.temperature, request.max_tokens) {
            body["options"] = options;
        }
        Ok(body)
    }
}

#[derive(Debug, Deserialize)]
struct ChatLine {
    message: Option<ChatLineMessage>,
    #[serde(default)]
    done: bool,
    prompt_eval_count: Option<u32>,
    eval_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ChatLineMessage {
    #[serde(default)]
    content: String,
}

fn parse_line(line: &str) -> Result<Line, BackendError> {
    let value: serde_json::Value = serde_json::from_str(line)
        .map_err(|e| BackendError::InvalidResponse(format!("bad NDJSON line: {e}")))?;
    if let Some(err) = ndjson::error_line(&value) {
        return Err(err);
    }

    let parsed: ChatLine = serde_json::from_value(value)
        .map_err(|e| BackendError::InvalidResponse(e.to_string()))?;

    let content = parsed.message.map(|m| m.content).unwrap_or_default();
    if parsed.done {
        return Ok(Line::Done {
            content,
            usage: ndjson::usage_from_counts(parsed.prompt_eval_count, parsed.eval_count),
        });
    }
    Ok(Line::Fragment(content))
}

#[async_trait]
impl GenerationBackend for OllamaChatBackend {
    fn name(&self) -> &str {
        "ollama-chat"
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn prompt_format(&self) -> &dyn PromptFormat {
        &self.format
    }

    async fn generate(&self, request: GenerationRequest) -> Result<FragmentStream, BackendError> {
        let body = Self::build_body(&request)?;
        let response = self
            .client
            .post_stream(self.name(), "/api/chat", &request.model, &body)
            .await?;

        Ok(ndjson::spawn_pump(
            self.name().to_string(),
            response.bytes_stream(),
            parse_line,
        ))
    }

    async fn health_check(&self) -> Result<bool, BackendError> {
        self.client.health_check().await
    }
}
