//! Session-level output events.
//!
//! `SessionEvent` is what the orchestration loop hands to the output
//! boundary: a local answer as one block, or a generated answer as a
//! `Thinking` marker, a run of `Chunk`s and a closing `Done`.

use parley_core::provider::Usage;
use serde::{Deserialize, Serialize};

/// Events emitted by a session while it handles turns.
///
/// - `local_answer`: a local handler answered the turn
/// - `thinking`: generation started
/// - `chunk`: partial text from the backend
/// - `done`: the generated answer is complete
/// - `error`: the turn failed; the session continues
/// - `ended`: the session was closed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    LocalAnswer { handler: String, content: String },

    Thinking,

    Chunk { content: String },

    Done {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        usage: Option<Usage>,
    },

    Error { message: String },

    Ended,
}

impl SessionEvent {
    /// Wire name of this event type.
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::LocalAnswer { .. } => "local_answer",
            Self::Thinking => "thinking",
            Self::Chunk { .. } => "chunk",
            Self::Done { .. } => "done",
            Self::Error { .. } => "error",
            Self::Ended => "ended",
        }
    }
}
