//! LocalHandler trait and the ordered intent registry.
//!
//! Local handlers answer recognised intents deterministically, without the
//! generation backend. The registry evaluates keyword routes in
//! registration order and runs the handler bound to the first match.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use crate::error::HandlerError;

/// Arguments passed to a handler when its route matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerArgs {
    /// The identifier the route is bound to (contract, client, ...)
    pub subject_id: String,
}

/// The core LocalHandler trait.
///
/// Each capability (contract lookup, balance lookup, invoice issue, ...)
/// implements this trait and is registered in the [`HandlerRegistry`].
#[async_trait]
pub trait LocalHandler: Send + Sync {
    /// The unique name routes refer to (e.g., "balance_lookup").
    fn name(&self) -> &str;

    /// A one-line description, listed by `parley doctor`.
    fn description(&self) -> &str;

    /// Execute the handler.
    async fn execute(&self, args: HandlerArgs) -> std::result::Result<String, HandlerError>;
}

/// A keyword predicate: every `all_of` keyword must be present and, when
/// `any_of` is non-empty, at least one of its keywords too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRule {
    #[serde(default)]
    all_of: Vec<String>,
    #[serde(default)]
    any_of: Vec<String>,
}

impl KeywordRule {
    pub fn new<A, B>(all_of: A, any_of: B) -> Self
    where
        A: IntoIterator,
        A::Item: AsRef<str>,
        B: IntoIterator,
        B::Item: AsRef<str>,
    {
        Self {
            all_of: all_of.into_iter().map(|k| k.as_ref().to_lowercase()).collect(),
            any_of: any_of.into_iter().map(|k| k.as_ref().to_lowercase()).collect(),
        }
    }

    /// A rule with no keywords matches nothing.
    pub fn is_empty(&self) -> bool {
        self.all_of.is_empty() && self.any_of.is_empty()
    }

    /// Test an already lowercased text.
    pub fn matches(&self, normalized: &str) -> bool {
        if self.is_empty() {
            return false;
        }
        self.all_of.iter().all(|k| normalized.contains(k.as_str()))
            && (self.any_of.is_empty() || self.any_of.iter().any(|k| normalized.contains(k.as_str())))
    }
}

/// Binds a keyword rule to a handler and the identifier it acts on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub handler: String,
    pub subject_id: String,
    pub rule: KeywordRule,
}

/// A successful local answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalAnswer {
    pub handler: String,
    pub content: String,
}

/// Handlers by name plus the ordered routes that select them.
pub struct HandlerRegistry {
    handlers: HashMap<String, Box<dyn LocalHandler>>,
    routes: Vec<Route>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            routes: Vec::new(),
        }
    }

    /// Register a handler. Replaces any existing handler with the same name.
    pub fn register(&mut self, handler: Box<dyn LocalHandler>) {
        let name = handler.name().to_string();
        self.handlers.insert(name, handler);
    }

    /// Append a route. Routes are evaluated in the order they are added.
    pub fn add_route(&mut self, route: Route) -> std::result::Result<(), HandlerError> {
        if !self.handlers.contains_key(&route.handler) {
            return Err(HandlerError::NotFound(route.handler));
        }
        self.routes.push(route);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&dyn LocalHandler> {
        self.handlers.get(name).map(|h| h.as_ref())
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// List all registered handler names.
    pub fn names(&self) -> Vec<&str> {
        self.handlers.keys().map(|s| s.as_str()).collect()
    }

    /// Classify the text: the first route whose rule matches, if any.
    pub fn match_route(&self, text: &str) -> Option<&Route> {
        let normalized = text.to_lowercase();
        self.routes.iter().find(|r| r.rule.matches(&normalized))
    }

    /// Route the text and run the matching handler.
    ///
    /// `Ok(None)` means no route matched; that is not an error.
    pub async fn match_and_execute(
        &self,
        text: &str,
    ) -> std::result::Result<Option<LocalAnswer>, HandlerError> {
        let Some(route) = self.match_route(text) else {
            return Ok(None);
        };

        let handler = self
            .handlers
            .get(&route.handler)
            .ok_or_else(|| HandlerError::NotFound(route.handler.clone()))?;

        debug!(handler = %route.handler, subject_id = %route.subject_id, "Local route matched");

        let content = handler
            .execute(HandlerArgs {
                subject_id: route.subject_id.clone(),
            })
            .await?;

        Ok(Some(LocalAnswer {
            handler: route.handler.clone(),
            content,
        }))
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
