//! Session-scoped conversation log with last-match carry-over.

use crate::registry::{Crop, Topic};
use chrono::{DateTime, Utc};
use krishi_core::context::{Context, ContextEntry};
use serde::Serialize;
use std::collections::BTreeSet;
use uuid::Uuid;

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Assistant,
}

/// One recorded turn.
#[derive(Debug, Clone, Serialize)]
pub struct Turn {
    pub id: Uuid,
    pub speaker: Speaker,
    pub text: String,
    /// Crops the classifier matched in this turn. Empty for assistant turns.
    pub crops: BTreeSet<Crop>,
    /// Topics the classifier matched in this turn. Empty for assistant turns.
    pub topics: BTreeSet<Topic>,
    pub timestamp: DateTime<Utc>,
}

impl Turn {
    /// A user turn with its classification results.
    pub fn user(text: &str, crops: BTreeSet<Crop>, topics: BTreeSet<Topic>) -> Self {
        Self {
            id: Uuid::new_v4(),
            speaker: Speaker::User,
            text: text.to_string(),
            crops,
            topics,
            timestamp: Utc::now(),
        }
    }

    /// An assistant turn.
    pub fn assistant(text: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            speaker: Speaker::Assistant,
            text: text.to_string(),
            crops: BTreeSet::new(),
            topics: BTreeSet::new(),
            timestamp: Utc::now(),
        }
    }
}

/// Ordered turn log for one chat session.
///
/// Exclusively owned by the session handling the conversation and dropped
/// when it ends; nothing is persisted.
#[derive(Debug, Default, Serialize)]
pub struct ConversationContext {
    turns: Vec<Turn>,
}

impl ConversationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn. O(1) amortized.
    pub fn record(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Most recently matched crop, scanning turns backward.
    ///
    /// When a turn matched several crops, the canonical-first one is carried.
    pub fn last_matched_crop(&self) -> Option<Crop> {
        self.turns
            .iter()
            .rev()
            .find_map(|t| t.crops.iter().next().copied())
    }

    /// Most recently matched topic, scanning turns backward.
    pub fn last_matched_topic(&self) -> Option<Topic> {
        self.turns
            .iter()
            .rev()
            .find_map(|t| t.topics.iter().next().copied())
    }

    /// Render the log as a backend request around the current utterance.
    pub fn to_provider_context(&self, system_prompt: &str, current_message: &str) -> Context {
        let history = self
            .turns
            .iter()
            .map(|t| ContextEntry {
                role: match t.speaker {
                    Speaker::User => "user".to_string(),
                    Speaker::Assistant => "assistant".to_string(),
                },
                content: t.text.clone(),
            })
            .collect();

        Context {
            system_prompt: system_prompt.to_string(),
            history,
            current_message: current_message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crops(items: &[Crop]) -> BTreeSet<Crop> {
        items.iter().copied().collect()
    }

    fn topics(items: &[Topic]) -> BTreeSet<Topic> {
        items.iter().copied().collect()
    }

    #[test]
    fn test_empty_context_has_no_matches() {
        let ctx = ConversationContext::new();
        assert!(ctx.is_empty());
        assert_eq!(ctx.last_matched_crop(), None);
        assert_eq!(ctx.last_matched_topic(), None);
    }

    #[test]
    fn test_last_match_scans_backward() {
        let mut ctx = ConversationContext::new();
        ctx.record(Turn::user("tell me about wheat", crops(&[Crop::Wheat]), topics(&[])));
        ctx.record(Turn::assistant("Wheat basics."));
        ctx.record(Turn::user("and rice?", crops(&[Crop::Rice]), topics(&[])));
        ctx.record(Turn::assistant("Rice basics."));
        assert_eq!(ctx.last_matched_crop(), Some(Crop::Rice));
    }

    #[test]
    fn test_last_match_skips_unmatched_turns() {
        let mut ctx = ConversationContext::new();
        ctx.record(Turn::user(
            "wheat irrigation",
            crops(&[Crop::Wheat]),
            topics(&[Topic::Irrigation]),
        ));
        ctx.record(Turn::assistant("Irrigate at CRI."));
        ctx.record(Turn::user("thanks", crops(&[]), topics(&[])));
        ctx.record(Turn::assistant("Anytime."));
        assert_eq!(ctx.last_matched_crop(), Some(Crop::Wheat));
        assert_eq!(ctx.last_matched_topic(), Some(Topic::Irrigation));
    }

    #[test]
    fn test_multi_match_turn_carries_canonical_first() {
        let mut ctx = ConversationContext::new();
        ctx.record(Turn::user(
            "wheat and maize",
            crops(&[Crop::Wheat, Crop::Maize]),
            topics(&[]),
        ));
        assert_eq!(ctx.last_matched_crop(), Some(Crop::Maize));
    }

    #[test]
    fn test_to_provider_context_preserves_order_and_roles() {
        let mut ctx = ConversationContext::new();
        ctx.record(Turn::user("tell me about wheat", crops(&[Crop::Wheat]), topics(&[])));
        ctx.record(Turn::assistant("Wheat basics."));

        let provider_ctx = ctx.to_provider_context("Be helpful.", "what about irrigation?");
        assert_eq!(provider_ctx.system_prompt, "Be helpful.");
        assert_eq!(provider_ctx.history.len(), 2);
        assert_eq!(provider_ctx.history[0].role, "user");
        assert_eq!(provider_ctx.history[1].role, "assistant");
        assert_eq!(provider_ctx.current_message, "what about irrigation?");
    }

    #[test]
    fn test_turn_serializes_for_export() {
        let turn = Turn::user("wheat rust", crops(&[Crop::Wheat]), topics(&[Topic::CropHealth]));
        let json = serde_json::to_string(&turn).unwrap();
        assert!(json.contains("\"speaker\":\"user\""));
        assert!(json.contains("\"wheat\""));
        assert!(json.contains("\"crop-health\""));
    }
}
