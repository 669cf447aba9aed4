//! ContextProvider trait: domain context retrieval.

use async_trait::async_trait;

use crate::error::ContextError;

/// Supplies one domain passage for a user turn.
///
/// `retrieve` may fail (the source can be remote); callers recover by using
/// [`fallback_passage`](ContextProvider::fallback_passage), which never fails.
#[async_trait]
pub trait ContextProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Look up the passage for `text`. Never returns an empty passage.
    async fn retrieve(&self, text: &str) -> std::result::Result<String, ContextError>;

    /// The generic passage used when nothing more specific applies.
    fn fallback_passage(&self) -> &str;
}
