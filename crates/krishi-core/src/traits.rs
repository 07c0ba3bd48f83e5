use crate::{context::Context, error::KrishiError, message::OutgoingMessage};
use async_trait::async_trait;

/// Text-generation backend trait.
///
/// The rule engine answers most turns on its own; a provider is an optional
/// collaborator consulted when an in-domain question has no canned fact and
/// richer phrasing is wanted.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Human-readable provider name.
    fn name(&self) -> &str;

    /// Whether this provider requires an API key to function.
    fn requires_api_key(&self) -> bool;

    /// Send a conversation context to the provider and get a response.
    async fn complete(&self, context: &Context) -> Result<OutgoingMessage, KrishiError>;

    /// Check if the provider is available and ready.
    async fn is_available(&self) -> bool;
}
