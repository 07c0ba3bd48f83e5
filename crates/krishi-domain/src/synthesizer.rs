//! Reply synthesis from a classification and the conversation log.

use crate::classifier::Classification;
use crate::conversation::ConversationContext;
use crate::registry::{Crop, Registry, Topic};
use std::collections::BTreeSet;

/// How a reply was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyKind {
    /// Fixed welcome for greeting turns.
    Greeting,
    /// At least one (crop, topic) advisory was rendered.
    Specialized,
    /// Topics matched but no crop was available, even via carry-over.
    GenericTopic,
    /// Crops matched but no topic was available, even via carry-over.
    GenericCrop,
    /// Out-of-domain decline.
    Decline,
}

/// A synthesized reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub kind: ReplyKind,
    pub text: String,
}

/// Produce the reply for a classified utterance.
///
/// Pure: reads the context for carry-over but never mutates it. Crops and
/// topics are always presented in canonical enumeration order, so the same
/// classification yields byte-identical output.
pub fn synthesize(
    registry: &Registry,
    classification: &Classification,
    context: &ConversationContext,
) -> Reply {
    if !classification.in_domain {
        return Reply {
            kind: ReplyKind::Decline,
            text: registry.decline_reply().to_string(),
        };
    }

    if classification.greeting && classification.crops.is_empty() && classification.topics.is_empty()
    {
        return Reply {
            kind: ReplyKind::Greeting,
            text: registry.greeting_reply().to_string(),
        };
    }

    let mut crops = classification.crops.clone();
    let mut topics = classification.topics.clone();

    // Carry the last matched crop/topic forward when the current turn omits it.
    if crops.is_empty() {
        if let Some(crop) = context.last_matched_crop() {
            crops.insert(crop);
        }
    }
    if topics.is_empty() {
        if let Some(topic) = context.last_matched_topic() {
            topics.insert(topic);
        }
    }

    if crops.is_empty() {
        return Reply {
            kind: ReplyKind::GenericTopic,
            text: render_topic_only(registry, &topics),
        };
    }
    if topics.is_empty() {
        return Reply {
            kind: ReplyKind::GenericCrop,
            text: render_crop_only(registry, &crops),
        };
    }

    Reply {
        kind: ReplyKind::Specialized,
        text: render_specialized(registry, &crops, &topics),
    }
}

/// One section per (crop, topic) combination: crops in canonical order,
/// topics nested within. Pairs without a registered fact fall back to the
/// per-topic template naming the crop.
fn render_specialized(
    registry: &Registry,
    crops: &BTreeSet<Crop>,
    topics: &BTreeSet<Topic>,
) -> String {
    let mut sections = Vec::new();
    for crop in Crop::ALL {
        if !crops.contains(&crop) {
            continue;
        }
        for topic in Topic::ALL {
            if !topics.contains(&topic) {
                continue;
            }
            let advice = match registry.fact(crop, topic) {
                Some(fact) => fact.to_string(),
                None => registry.topic_fallback(topic, crop),
            };
            sections.push(format!("{} / {}:\n{}", crop.label(), topic.label(), advice));
        }
    }
    sections.join("\n\n")
}

fn render_topic_only(registry: &Registry, topics: &BTreeSet<Topic>) -> String {
    let mut sections = Vec::new();
    for topic in Topic::ALL {
        if !topics.contains(&topic) {
            continue;
        }
        sections.push(format!("{}:\n{}", topic.label(), registry.topic_answer(topic)));
    }
    sections.join("\n\n")
}

fn render_crop_only(registry: &Registry, crops: &BTreeSet<Crop>) -> String {
    let mut sections = Vec::new();
    for crop in Crop::ALL {
        if !crops.contains(&crop) {
            continue;
        }
        sections.push(registry.crop_answer(crop).to_string());
    }
    sections.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::classify;
    use crate::conversation::Turn;

    fn registry() -> Registry {
        Registry::builtin()
    }

    fn empty_context() -> ConversationContext {
        ConversationContext::new()
    }

    #[test]
    fn test_decline_for_out_of_domain() {
        let r = registry();
        let c = classify(&r, "What is the price of gold?");
        let reply = synthesize(&r, &c, &empty_context());
        assert_eq!(reply.kind, ReplyKind::Decline);
        for crop in Crop::ALL {
            assert!(reply.text.contains(crop.name()));
        }
        for topic in Topic::ALL {
            assert!(reply.text.contains(topic.name()));
        }
    }

    #[test]
    fn test_greeting_reply_is_fixed() {
        let r = registry();
        let c = classify(&r, "Hello");
        let reply = synthesize(&r, &c, &empty_context());
        assert_eq!(reply.kind, ReplyKind::Greeting);
        assert_eq!(reply.text, r.greeting_reply());
    }

    #[test]
    fn test_specialized_fact_for_crop_and_topic() {
        let r = registry();
        let c = classify(&r, "How to control pests in wheat?");
        let reply = synthesize(&r, &c, &empty_context());
        assert_eq!(reply.kind, ReplyKind::Specialized);
        assert!(reply.text.contains("Wheat"));
        assert!(reply.text.contains("Aphids"));
    }

    #[test]
    fn test_multi_crop_sections_in_canonical_order() {
        let r = registry();
        let c = classify(&r, "wheat and maize pest control");
        let reply = synthesize(&r, &c, &empty_context());
        let maize_pos = reply.text.find("Fall armyworm").expect("maize fact present");
        let wheat_pos = reply.text.find("Aphids").expect("wheat fact present");
        assert!(
            maize_pos < wheat_pos,
            "maize advisory must precede wheat's regardless of input order"
        );
    }

    #[test]
    fn test_topic_only_without_context_is_generic() {
        let r = registry();
        let c = classify(&r, "What about irrigation?");
        let reply = synthesize(&r, &c, &empty_context());
        assert_eq!(reply.kind, ReplyKind::GenericTopic);
        assert!(reply.text.contains("Drip irrigation"));
    }

    #[test]
    fn test_crop_only_without_context_is_generic() {
        let r = registry();
        let c = classify(&r, "Tell me about soybean");
        let reply = synthesize(&r, &c, &empty_context());
        assert_eq!(reply.kind, ReplyKind::GenericCrop);
        assert!(reply.text.contains("Rhizobium"));
    }

    #[test]
    fn test_carry_over_specializes_topic_turn() {
        let r = registry();
        let mut ctx = empty_context();
        let first = classify(&r, "Tell me about wheat");
        ctx.record(Turn::user(
            "Tell me about wheat",
            first.crops.clone(),
            first.topics.clone(),
        ));
        ctx.record(Turn::assistant("Wheat basics."));

        let second = classify(&r, "What about irrigation?");
        let reply = synthesize(&r, &second, &ctx);
        assert_eq!(reply.kind, ReplyKind::Specialized);
        assert!(reply.text.contains("crown root initiation"));
    }

    #[test]
    fn test_carry_over_specializes_crop_turn() {
        let r = registry();
        let mut ctx = empty_context();
        let first = classify(&r, "irrigation tips please");
        ctx.record(Turn::user(
            "irrigation tips please",
            first.crops.clone(),
            first.topics.clone(),
        ));
        ctx.record(Turn::assistant("Irrigation tips."));

        let second = classify(&r, "and for rice?");
        let reply = synthesize(&r, &second, &ctx);
        assert_eq!(reply.kind, ReplyKind::Specialized);
        assert!(reply.text.contains("standing water"));
    }

    #[test]
    fn test_fact_gap_falls_back_to_topic_template() {
        let file: crate::registry::RegistryFile = toml::from_str(
            r#"
            replace_facts = true

            [[facts]]
            crop = "maize"
            topic = "pest-management"
            advice = "Maize pest advice."
            "#,
        )
        .unwrap();
        let r = Registry::with_overrides(&file).unwrap();
        let c = classify(&r, "pest control in wheat");
        let reply = synthesize(&r, &c, &empty_context());
        assert_eq!(reply.kind, ReplyKind::Specialized);
        assert!(reply.text.contains("For wheat"));
        assert!(reply.text.contains("integrated pest management"));
    }

    #[test]
    fn test_decline_ignores_context() {
        let r = registry();
        let mut ctx = empty_context();
        ctx.record(Turn::user(
            "wheat",
            [Crop::Wheat].into_iter().collect(),
            Default::default(),
        ));
        let c = classify(&r, "best biryani recipe");
        let reply = synthesize(&r, &c, &ctx);
        assert_eq!(reply.kind, ReplyKind::Decline);
    }

    #[test]
    fn test_synthesis_is_deterministic() {
        let r = registry();
        let c = classify(&r, "wheat and maize pest control");
        let a = synthesize(&r, &c, &empty_context());
        let b = synthesize(&r, &c, &empty_context());
        assert_eq!(a.text, b.text);
    }
}
