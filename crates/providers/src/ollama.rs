//! Shared HTTP plumbing for the Ollama backends.
//!
//! Both request shapes talk to the same server: the client, status-code
//! mapping and health probe live here so the two backends only differ in
//! body construction and line parsing.

use std::time::Duration;

use parley_core::error::BackendError;
use tracing::{debug, warn};

pub(crate) struct OllamaClient {
    base_url: String,
    client: reqwest::Client,
}

impl OllamaClient {
    /// Only connecting is bounded: a generation may legitimately stream
    /// for a long time, so the overall turn deadline belongs to the caller.
    pub(crate) fn new(base_url: &str, connect_timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST a streaming request and return the response once its status
    /// has been checked.
    pub(crate) async fn post_stream(
        &self,
        backend: &str,
        path: &str,
        model: &str,
        body: &serde_json::Value,
    ) -> Result<reqwest::Response, BackendError> {
        if self.base_url.trim().is_empty() {
            return Err(BackendError::NotConfigured(format!("{backend}: no base URL")));
        }
        if model.trim().is_empty() {
            return Err(BackendError::NotConfigured(format!("{backend}: no model")));
        }

        let url = format!("{}{path}", self.base_url);
        debug!(backend, url = %url, model, "Sending streaming request");

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| map_transport_error(&self.base_url, e))?;

        let status = response.status().as_u16();
        if status == 404 {
            return Err(BackendError::ModelNotFound(model.to_string()));
        }
        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(backend, status, body = %body, "Backend returned error");
            return Err(BackendError::Api {
                status_code: status,
                message: error_message(&body),
            });
        }

        Ok(response)
    }

    /// `GET /api/tags` answers whenever the server is up.
    pub(crate) async fn health_check(&self) -> Result<bool, BackendError> {
        let url = format!("{}/api/tags", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| map_transport_error(&self.base_url, e))?;

        Ok(response.status().is_success())
    }
}

fn map_transport_error(base_url: &str, e: reqwest::Error) -> BackendError {
    if e.is_timeout() {
        BackendError::Timeout(format!("{base_url}: {e}"))
    } else {
        BackendError::Unavailable(format!("{base_url}: {e}"))
    }
}

/// Ollama error bodies are `{"error": "..."}`; fall back to the raw text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"].as_str().map(String::from))
        .unwrap_or_else(|| body.to_string())
}

/// The `options` object carrying sampling parameters, if any are set.
pub(crate) fn options(temperature: Option<f32>, max_tokens: Option<u32>) -> Option<serde_json::Value> {
    if temperature.is_none() && max_tokens.is_none() {
        return None;
    }
    let mut options = serde_json::Map::new();
    if let Some(t) = temperature {
        options.insert("temperature".into(), serde_json::json!(t));
    }
    if let Some(n) = max_tokens {
        options.insert("num_predict".into(), serde_json::json!(n));
    }
    Some(serde_json::Value::Object(options))
}
