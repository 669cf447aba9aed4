//! Balance lookup handler: simulated client ledger.

use std::time::Duration;

use async_trait::async_trait;
use parley_core::error::HandlerError;
use parley_core::handler::{HandlerArgs, LocalHandler};
use tracing::debug;

pub struct BalanceLookupHandler {
    latency: Duration,
}

impl BalanceLookupHandler {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

#[async_trait]
impl LocalHandler for BalanceLookupHandler {
    fn name(&self) -> &str {
        "balance_lookup"
    }

    fn description(&self) -> &str {
        "Report the available balance of a client."
    }

    async fn execute(&self, args: HandlerArgs) -> Result<String, HandlerError> {
        debug!(client = %args.subject_id, "Looking up balance");
        tokio::time::sleep(self.latency).await;
        Ok(format!(
            "O saldo disponível do cliente {} é de R$ 732,50.",
            args.subject_id
        ))
    }
}
