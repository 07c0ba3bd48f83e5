//! The classify-then-synthesize pipeline.

use crate::classifier::{classify, Classification};
use crate::conversation::{ConversationContext, Turn};
use crate::registry::Registry;
use crate::synthesizer::{synthesize, Reply};
use std::sync::Arc;

/// Domain-scoped responder: decides membership and produces the reply.
///
/// The registry is injected once and shared; each chat session pairs one
/// responder reference with its own exclusively-owned conversation log.
pub struct Responder {
    registry: Arc<Registry>,
}

impl Responder {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Classify and synthesize without touching the conversation log.
    ///
    /// Used by callers that may substitute a richer backend reply before
    /// recording the exchange.
    pub fn draft(
        &self,
        utterance: &str,
        context: &ConversationContext,
    ) -> (Classification, Reply) {
        let classification = classify(&self.registry, utterance);
        let reply = synthesize(&self.registry, &classification, context);
        (classification, reply)
    }

    /// Process one turn: draft a reply and record both sides of the exchange.
    ///
    /// Total over text input: every utterance, including the empty string,
    /// yields a non-empty reply.
    pub fn respond(&self, utterance: &str, context: &mut ConversationContext) -> Reply {
        let (classification, reply) = self.draft(utterance, context);
        self.record_exchange(utterance, classification, &reply.text, context);
        reply
    }

    /// Record an exchange whose final text may have come from a backend.
    pub fn record_exchange(
        &self,
        utterance: &str,
        classification: Classification,
        reply_text: &str,
        context: &mut ConversationContext,
    ) {
        context.record(Turn::user(
            utterance,
            classification.crops,
            classification.topics,
        ));
        context.record(Turn::assistant(reply_text));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{Crop, Topic};
    use crate::synthesizer::ReplyKind;

    fn responder() -> Responder {
        Responder::new(Arc::new(Registry::builtin()))
    }

    #[test]
    fn test_every_input_yields_a_nonempty_reply() {
        let r = responder();
        let inputs = [
            "",
            "   ",
            "Hello",
            "How to control pests in wheat?",
            "What is the price of gold?",
            "What is machine learning?",
            "wheat and maize pest control",
            "???",
            "water",
        ];
        for input in inputs {
            let mut ctx = ConversationContext::new();
            let reply = r.respond(input, &mut ctx);
            assert!(!reply.text.is_empty(), "empty reply for {input:?}");
        }
    }

    #[test]
    fn test_exchange_is_recorded_in_order() {
        let r = responder();
        let mut ctx = ConversationContext::new();
        let reply = r.respond("How to control pests in wheat?", &mut ctx);
        assert_eq!(ctx.len(), 2);
        let turns = ctx.turns();
        assert_eq!(turns[0].speaker, crate::conversation::Speaker::User);
        assert!(turns[0].crops.contains(&Crop::Wheat));
        assert!(turns[0].topics.contains(&Topic::PestManagement));
        assert_eq!(turns[1].speaker, crate::conversation::Speaker::Assistant);
        assert_eq!(turns[1].text, reply.text);
    }

    #[test]
    fn test_context_carry_over_across_turns() {
        let r = responder();
        let mut ctx = ConversationContext::new();
        r.respond("Tell me about wheat", &mut ctx);
        let reply = r.respond("What about irrigation?", &mut ctx);
        assert_eq!(reply.kind, ReplyKind::Specialized);
        assert!(reply.text.contains("Wheat"));
        assert!(reply.text.contains("crown root initiation"));
    }

    #[test]
    fn test_same_input_same_output_on_fresh_contexts() {
        let r = responder();
        let mut a = ConversationContext::new();
        let mut b = ConversationContext::new();
        let first = r.respond("How to manage weeds in soybean?", &mut a);
        let second = r.respond("How to manage weeds in soybean?", &mut b);
        assert_eq!(first.text, second.text);
        assert_eq!(first.kind, second.kind);
    }

    #[test]
    fn test_decline_does_not_pollute_carry_over() {
        let r = responder();
        let mut ctx = ConversationContext::new();
        r.respond("Tell me about rice", &mut ctx);
        r.respond("who will win the cricket match", &mut ctx);
        // The declined turn recorded no matches, so rice still carries.
        let reply = r.respond("what about watering?", &mut ctx);
        assert_eq!(reply.kind, ReplyKind::Specialized);
        assert!(reply.text.contains("Rice"));
    }
}
