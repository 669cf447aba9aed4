//! Ollama `/api/generate` backend: one flat prompt string per request.

use std::time::Duration;

use async_trait::async_trait;
use parley_core::error::BackendError;
use parley_core::prompt::{FlatTemplate, PromptFormat, PromptPayload};
use parley_core::provider::{FragmentStream, GenerationBackend, GenerationRequest};
use serde::Deserialize;

use crate::ndjson::{self, Line};
use crate::ollama::{self, OllamaClient};

pub struct OllamaGenerateBackend {
    client: OllamaClient,
    model: String,
    format: FlatTemplate,
}

impl OllamaGenerateBackend {
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
            format: FlatTemplate,
        }
    }

    fn build_body(request: &GenerationRequest) -> Result<serde_json::Value, BackendError> {
        let PromptPayload::Text(prompt) = &request.payload else {
            return Err(BackendError::UnsupportedPayload(
                "ollama-generate expects a flat text prompt".into(),
            ));
        };

        let mut body = serde_json::json!({
            "model": request.model,
            "prompt": prompt,
            "stream": true,
        });
        if let Some(options) = ollama::options(request.temperature, request.max_tokens) {
            body["options"] = options;
        }
        Ok(body)
    }
}

#[derive(Debug, Deserialize)]
struct GenerateLine {
    #[serde(default)]
    response: String,
    #[serde(default)]
    done: bool,
    prompt_eval_count: Option<u32>,
    eval_count: Option<u32>,
}

fn parse_line(line: &str) -> Result<Line, BackendError> {
    let value: serde_json::Value = serde_json::from_str(line)
        .map_err(|e| BackendError::InvalidResponse(format!("bad NDJSON line: {e}")))?;
    if let Some(err) = ndjson::error_line(&value) {
        return Err(err);
    }

    let parsed: GenerateLine = serde_json::from_value(value)
        .map_err(|e| BackendError::InvalidResponse(e.to_string()))?;

    if parsed.done {
        return Ok(Line::Done {
            content: parsed.response,
            usage: ndjson::usage_from_counts(parsed.prompt_eval_count, parsed.eval_count),
        });
    }
    Ok(Line::Fragment(parsed.response))
}

#[async_trait]
impl GenerationBackend for OllamaGenerateBackend {
    fn name(&self) -> &str {
        "ollama-generate"
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
            .post_stream(self.name(), "/api/generate", &request.model, &body)
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
