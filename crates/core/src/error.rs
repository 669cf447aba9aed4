//! Error types for the Parley domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each collaborator has its own error enum; none of them is allowed to
//! escape a single turn of the orchestration loop.

use thiserror::Error;

/// The top-level error type for Parley operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),

    #[error("Context error: {0}")]
    Context(#[from] ContextError),

    #[error("Turn error: {0}")]
    Turn(#[from] TurnError),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures of the generation backend, before or during streaming.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BackendError {
    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    #[error("API request failed: {message} (status: {status_code})")]
    Api { status_code: u16, message: String },

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Stream interrupted: {0}")]
    StreamInterrupted(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Unsupported prompt payload: {0}")]
    UnsupportedPayload(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Backend not configured: {0}")]
    NotConfigured(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum HandlerError {
    #[error("Handler not found: {0}")]
    NotFound(String),

    #[error("Handler '{handler}' failed: {reason}")]
    ExecutionFailed { handler: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ContextError {
    #[error("Context source unavailable: {0}")]
    Unavailable(String),
}

/// Why a generation turn was aborted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TurnError {
    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("Turn timed out after {secs}s")]
    Timeout { secs: u64 },
}
