//! Backend selection from configuration.

use std::sync::Arc;
use std::time::Duration;

use parley_config::{AppConfig, BackendKind};
use parley_core::provider::GenerationBackend;
use tracing::info;

use crate::ollama_chat::OllamaChatBackend;
use crate::ollama_generate::OllamaGenerateBackend;

/// Build the configured generation backend.
pub fn build_from_config(config: &AppConfig) -> Arc<dyn GenerationBackend> {
    let backend = &config.backend;
    let connect_timeout = Duration::from_secs(backend.connect_timeout_secs);

    info!(
        kind = %backend.kind,
        base_url = %backend.base_url,
        model = %backend.model,
        "Selecting generation backend"
    );

    match backend.kind {
        BackendKind::Generate => Arc::new(OllamaGenerateBackend::with_connect_timeout(
            &backend.base_url,
            &backend.model,
            connect_timeout,
        )),
        BackendKind::Chat => Arc::new(OllamaChatBackend::with_connect_timeout(
            &backend.base_url,
            &backend.model,
            connect_timeout,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_core::prompt::{PromptPayload, PromptSections};

    fn sections() -> PromptSections<'static> {
        PromptSections {
            context_passage: "passage",
            turns: &[],
            instruction: "answer",
        }
    }

    #[test]
    fn default_config_builds_generate_backend() {
        let backend = build_from_config(&AppConfig::default());
        assert_eq!(backend.name(), "ollama-generate");
        assert_eq!(backend.model(), "llama3.1");
        assert!(matches!(
            backend.prompt_format().render(&sections()),
            PromptPayload::Text(_)
        ));
    }

    #[test]
    fn chat_kind_builds_chat_backend() {
        let mut config = AppConfig::default();
        config.backend.kind = BackendKind::Chat;
        config.backend.model = "mistral".into();
        let backend = build_from_config(&config);
        assert_eq!(backend.name(), "ollama-chat");
        assert_eq!(backend.model(), "mistral");
        assert!(matches!(
            backend.prompt_format().render(&sections()),
            PromptPayload::Messages(_)
        ));
    }
}
