//! Keyword context provider: simulated domain knowledge base.
//!
//! Passages are checked in configuration order; the first one with a
//! keyword contained in the user text is returned, otherwise the fallback.
//! Matching ignores case, so "Contrato" and "CONTRATO" select the same
//! passage as "contrato", the same way local routes are matched.

use std::time::Duration;

use async_trait::async_trait;
use parley_config::ContextConfig;
use parley_core::context::ContextProvider;
use parley_core::error::ContextError;
use tracing::debug;

struct Passage {
    keywords: Vec<String>,
    text: String,
}

pub struct KeywordContextProvider {
    passages: Vec<Passage>,
    fallback: String,
    latency: Duration,
}

impl KeywordContextProvider {
    pub fn new(config: &ContextConfig, latency: Duration) -> Self {
        let passages = config
            .passages
            .iter()
            .map(|p| Passage {
                keywords: p.keywords.iter().map(|k| k.to_lowercase()).collect(),
                text: p.text.trim().to_string(),
            })
            .collect();

        Self {
            passages,
            fallback: config.fallback.trim().to_string(),
            latency,
        }
    }

    /// The passage for `text`, without the simulated delay.
    pub fn lookup(&self, text: &str) -> &str {
        let normalized = text.to_lowercase();
        self.passages
            .iter()
            .find(|p| {
                p.keywords
                    .iter()
                    .any(|k| !k.is_empty() && normalized.contains(k.as_str()))
            })
            .map(|p| p.text.as_str())
            .filter(|t| !t.is_empty())
            .unwrap_or(self.fallback.as_str())
    }
}

#[async_trait]
impl ContextProvider for KeywordContextProvider {
    fn name(&self) -> &str {
        "keyword"
    }

    async fn retrieve(&self, text: &str) -> Result<String, ContextError> {
        tokio::time::sleep(self.latency).await;
        let passage = self.lookup(text);
        debug!(chars = passage.len(), "Context passage selected");
        Ok(passage.to_string())
    }

    fn fallback_passage(&self) -> &str {
        &self.fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> KeywordContextProvider {
        KeywordContextProvider::new(&ContextConfig::default(), Duration::ZERO)
    }

    #[tokio::test]
    async fn topic_passages() {
        let p = provider();
        assert!(p.retrieve("como emitir uma NOTA?").await.unwrap().contains("Notas Fiscais"));
        assert!(p.retrieve("me explique sobre contratos").await.unwrap().contains("módulo de Contratos"));
        assert!(p.retrieve("o que é saldo").await.unwrap().contains("consignações"));
    }

    #[test]
    fn order_decides_ties() {
        // Mentions both invoice and contract topics; invoices are checked first.
        let p = provider();
        assert!(p.lookup("nota do contrato").contains("Notas Fiscais"));
    }

    #[tokio::test]
    async fn fallback_when_nothing_matches() {
        let p = provider();
        let passage = p.retrieve("bom dia").await.unwrap();
        assert_eq!(passage, p.fallback_passage());
        assert!(passage.starts_with("Você é um assistente do sistema SICON"));
    }

    #[tokio::test(start_paused = true)]
    async fn retrieval_waits_for_latency() {
        let p = KeywordContextProvider::new(&ContextConfig::default(), Duration::from_millis(100));
        let start = tokio::time::Instant::now();
        p.retrieve("saldo").await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(100));
    }
}
