//! Contract lookup handler: simulated contract registry.
//!
//! Stands in for a call to the contract service: waits for the configured
//! latency, then reports a fixed status for the routed contract number.

use std::time::Duration;

use async_trait::async_trait;
use parley_core::error::HandlerError;
use parley_core::handler::{HandlerArgs, LocalHandler};
use tracing::debug;

pub struct ContractLookupHandler {
    latency: Duration,
}

impl ContractLookupHandler {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

#[async_trait]
impl LocalHandler for ContractLookupHandler {
    fn name(&self) -> &str {
        "contract_lookup"
    }

    fn description(&self) -> &str {
        "Report the status of a contract and the client it is bound to."
    }

    async fn execute(&self, args: HandlerArgs) -> Result<String, HandlerError> {
        debug!(contract = %args.subject_id, "Looking up contract");
        tokio::time::sleep(self.latency).await;
        Ok(format!(
            "Contrato nº {} está ativo e vinculado ao cliente João da Silva desde 2023.",
            args.subject_id
        ))
    }
}
