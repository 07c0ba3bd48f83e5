//! Chat session loop: wires the rule engine to an optional backend.

use krishi_core::error::{KrishiError, ProviderErrorKind};
use krishi_core::traits::Provider;
use krishi_domain::{ConversationContext, ReplyKind, Responder};
use std::sync::Arc;
use tracing::{info, warn};

/// One interactive conversation: rule engine, optional backend, and the
/// exclusively-owned turn log. Turns are processed to completion one at a
/// time.
pub struct ChatSession {
    responder: Responder,
    provider: Option<Arc<dyn Provider>>,
    context: ConversationContext,
    system_prompt: String,
}

impl ChatSession {
    pub fn new(responder: Responder, provider: Option<Arc<dyn Provider>>) -> Self {
        Self {
            responder,
            provider,
            context: ConversationContext::new(),
            system_prompt: krishi_core::context::default_system_prompt(),
        }
    }

    /// Process one user turn and return the reply text.
    ///
    /// Total: every input produces a non-empty reply. The backend is only
    /// consulted for in-domain turns the rule engine answered generically,
    /// and its failures are converted to advisory text, never surfaced as
    /// errors.
    pub async fn handle_turn(&mut self, input: &str) -> String {
        let (classification, reply) = self.responder.draft(input, &self.context);

        let text = match (&reply.kind, self.provider.as_ref()) {
            (ReplyKind::GenericTopic | ReplyKind::GenericCrop, Some(provider)) => {
                let ctx = self.context.to_provider_context(&self.system_prompt, input);
                match provider.complete(&ctx).await {
                    Ok(out) => {
                        info!(
                            "backend reply via {} in {}ms",
                            out.metadata.provider_used, out.metadata.processing_time_ms
                        );
                        out.text
                    }
                    Err(e) => {
                        warn!("backend handoff failed: {e}");
                        format!("{}\n\n{}", backend_failure_notice(&e), reply.text)
                    }
                }
            }
            _ => reply.text.clone(),
        };

        self.responder
            .record_exchange(input, classification, &text, &mut self.context);
        text
    }

    pub fn context(&self) -> &ConversationContext {
        &self.context
    }
}

/// User-facing explanation for a failed backend call, categorized by cause.
/// The canned generic reply is appended after this notice, so the user
/// always gets an answer.
fn backend_failure_notice(error: &KrishiError) -> &'static str {
    let kind = match error {
        KrishiError::Provider { kind, .. } => *kind,
        _ => ProviderErrorKind::Unknown,
    };
    match kind {
        ProviderErrorKind::Credential => {
            "I could not reach my language service: the API credential is missing or was \
             rejected. Check provider.groq.api_key in config.toml (or the GROQ_API_KEY \
             environment variable). Meanwhile, here is what I know:"
        }
        ProviderErrorKind::Network => {
            "I could not connect to my language service. Check the network connection and \
             try again. Meanwhile, here is what I know:"
        }
        ProviderErrorKind::Timeout => {
            "My language service took too long to answer; it may be under heavy load. Try \
             again in a moment. Meanwhile, here is what I know:"
        }
        ProviderErrorKind::RateLimited => {
            "My language service is rate-limiting requests right now. Wait a minute before \
             asking again. Meanwhile, here is what I know:"
        }
        ProviderErrorKind::Unknown => {
            "My language service hit an unexpected problem. Please try again shortly. \
             Meanwhile, here is what I know:"
        }
    }
}
