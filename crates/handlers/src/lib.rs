//! Built-in local handlers and context provider for Parley.
//!
//! Handlers answer recognised intents (contract status, client balance,
//! invoice issue) without calling the generation backend. They simulate
//! the business services they stand in for: a fixed delay followed by a
//! canned answer for the identifier their route is bound to.

pub mod balance;
pub mod context;
pub mod contract;
pub mod invoice;

use std::time::Duration;

use parley_config::AppConfig;
use parley_core::error::HandlerError;
use parley_core::handler::{HandlerRegistry, KeywordRule, Route};

pub use balance::BalanceLookupHandler;
pub use context::KeywordContextProvider;
pub use contract::ContractLookupHandler;
pub use invoice::InvoiceIssueHandler;

/// Create a registry with all built-in handlers and the configured routes.
///
/// Routes keep their configuration order. A route naming an unknown
/// handler is rejected.
pub fn default_registry(config: &AppConfig) -> Result<HandlerRegistry, HandlerError> {
    let latency = Duration::from_millis(config.simulation.handler_latency_ms);

    let mut registry = HandlerRegistry::new();
    registry.register(Box::new(ContractLookupHandler::new(latency)));
    registry.register(Box::new(BalanceLookupHandler::new(latency)));
    registry.register(Box::new(InvoiceIssueHandler::new(latency)));

    for route in &config.routes {
        registry.add_route(Route {
            handler: route.handler.clone(),
            subject_id: route.subject_id.clone(),
            rule: KeywordRule::new(&route.all_of, &route.any_of),
        })?;
    }

    Ok(registry)
}

/// The context provider described by `config.context`.
pub fn default_context(config: &AppConfig) -> KeywordContextProvider {
    KeywordContextProvider::new(
        &config.context,
        Duration::from_millis(config.simulation.context_latency_ms),
    )
}
