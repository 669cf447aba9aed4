//! The orchestration loop for Parley.
//!
//! Each user turn follows a **Route → (Answer | Retrieve → Assemble →
//! Stream) → Persist** cycle:
//!
//! 1. **Route** the text through the local handler registry
//! 2. **Answer** locally when a route matches, without touching the backend
//! 3. Otherwise **retrieve** a context passage for the text
//! 4. **Assemble** the prompt from the passage and the conversation history
//! 5. **Stream** the backend's answer to the output boundary
//! 6. **Persist** the user and assistant turns in the history
//!
//! A failed turn never ends the session; only an exit command does.

pub mod assembler;
pub mod session;
pub mod stream_event;

pub use assembler::PromptAssembler;
pub use session::{Session, SessionSettings, SessionState, TurnOutcome};
pub use stream_event::SessionEvent;
