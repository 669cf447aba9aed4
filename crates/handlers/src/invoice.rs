//! Invoice issue handler: simulated invoicing service.

use std::time::Duration;

use async_trait::async_trait;
use parley_core::error::HandlerError;
use parley_core::handler::{HandlerArgs, LocalHandler};
use tracing::debug;

pub struct InvoiceIssueHandler {
    latency: Duration,
}

impl InvoiceIssueHandler {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

#[async_trait]
impl LocalHandler for InvoiceIssueHandler {
    fn name(&self) -> &str {
        "invoice_issue"
    }

    fn description(&self) -> &str {
        "Issue an invoice for a client and return its number."
    }

    async fn execute(&self, args: HandlerArgs) -> Result<String, HandlerError> {
        debug!(client = %args.subject_id, "Issuing invoice");
        tokio::time::sleep(self.latency).await;
        Ok(format!(
            "Nota fiscal emitida com sucesso para o cliente {}. Número: NF-2025-00123.",
            args.subject_id
        ))
    }
}
