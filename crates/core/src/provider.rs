//! GenerationBackend trait: the abstraction over streaming text generation.
//!
//! A backend knows how to send one prompt payload to a generation service
//! and hand back the answer as an ordered stream of text fragments.
//!
//! Implementations: Ollama `/api/generate` (flat prompt) and Ollama
//! `/api/chat` (message list), both in `parley-providers`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::error::BackendError;
use crate::prompt::{PromptFormat, PromptPayload};

/// A single generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// The model to use (e.g., "llama3.1")
    pub model: String,

    /// The assembled prompt
    pub payload: PromptPayload,

    /// Sampling temperature; backend default when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Maximum tokens to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

/// Token usage information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// One item of a generation stream.
///
/// A well-formed stream is zero or more `Fragment`s followed by exactly one
/// `End`. A stream that yields `Err` or closes before `End` was interrupted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamEvent {
    /// Partial text, in arrival order.
    Fragment { content: String },

    /// Normal completion.
    End {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        usage: Option<Usage>,
    },
}

/// Receiving half of a generation stream. Finite and not restartable.
pub type FragmentStream = mpsc::Receiver<std::result::Result<StreamEvent, BackendError>>;

/// The core GenerationBackend trait.
///
/// The orchestration loop calls `generate()` without knowing which service
/// sits behind it; the request shape is controlled by `prompt_format()`.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// A human-readable name for this backend (e.g., "ollama-generate").
    fn name(&self) -> &str;

    /// The model identifier requests should carry.
    fn model(&self) -> &str;

    /// How prompts for this backend must be shaped.
    fn prompt_format(&self) -> &dyn PromptFormat;

    /// Send a request and get a stream of fragments back.
    ///
    /// Connection and HTTP-status failures are returned directly; failures
    /// after the first byte arrive as an `Err` item on the stream.
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> std::result::Result<FragmentStream, BackendError>;

    /// Health check: can we reach the backend?
    async fn health_check(&self) -> std::result::Result<bool, BackendError> {
        Ok(true)
    }
}
