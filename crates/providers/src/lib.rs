//! Generation backend implementations for Parley.
//!
//! All backends implement the `parley_core::GenerationBackend` trait and
//! stream Ollama's newline-delimited JSON responses. The router selects
//! the backend named in configuration.

mod ndjson;
pub mod ollama;
pub mod ollama_chat;
pub mod ollama_generate;
pub mod router;

pub use ollama_chat::OllamaChatBackend;
pub use ollama_generate::OllamaGenerateBackend;
pub use router::build_from_config;
