//! # Parley Core
//!
//! Domain types, capability traits, and error definitions for the Parley
//! chat orchestrator. Nothing in here talks to the network or the terminal.
//!
//! ## Design Philosophy
//!
//! Every external collaborator is a trait here. Implementations live in
//! their respective crates:
//! - [`GenerationBackend`]: streaming text generation (`parley-providers`)
//! - [`LocalHandler`]: deterministic intent handlers (`parley-handlers`)
//! - [`ContextProvider`]: domain context retrieval (`parley-handlers`)
//!
//! The orchestration loop in `parley-agent` only ever sees these traits.

pub mod context;
pub mod error;
pub mod handler;
pub mod message;
pub mod prompt;
pub mod provider;

// Re-export key types at crate root for ergonomics
pub use context::ContextProvider;
pub use error::{BackendError, ContextError, Error, HandlerError, Result, TurnError};
pub use handler::{HandlerArgs, HandlerRegistry, KeywordRule, LocalAnswer, LocalHandler, Route};
pub use message::{History, Role, SessionId, Turn};
pub use prompt::{FlatTemplate, MessageList, PromptFormat, PromptPayload, PromptSections};
pub use provider::{FragmentStream, GenerationBackend, GenerationRequest, StreamEvent, Usage};
