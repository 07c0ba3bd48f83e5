//! Domain membership classification.

use crate::registry::{Crop, Registry, Topic};
use std::collections::BTreeSet;
use tracing::debug;

/// Outcome of classifying one utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Whether the utterance falls inside the assistant's scope.
    pub in_domain: bool,
    /// Crops named in the utterance, canonical order.
    pub crops: BTreeSet<Crop>,
    /// Topics named in the utterance, canonical order.
    pub topics: BTreeSet<Topic>,
    /// The utterance matched a greeting token.
    pub greeting: bool,
}

impl Classification {
    fn out_of_domain() -> Self {
        Self {
            in_domain: false,
            crops: BTreeSet::new(),
            topics: BTreeSet::new(),
            greeting: false,
        }
    }
}

/// Lowercase and collapse runs of whitespace.
pub(crate) fn normalize(utterance: &str) -> String {
    utterance
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Decide whether an utterance is in scope and which crops and topics it names.
///
/// All matching is word-boundary anchored: "price" never matches rice and
/// "machine" never matches the greeting "hi". Greetings short-circuit as
/// in-domain with empty match sets. An utterance that names no crop, topic,
/// or greeting is out of domain; the off-topic keyword list is logged when it
/// fires but never decides the outcome. Deterministic, no side effects
/// beyond logging.
pub fn classify(registry: &Registry, utterance: &str) -> Classification {
    let text = normalize(utterance);
    if text.is_empty() {
        return Classification::out_of_domain();
    }

    if registry.is_greeting(&text) {
        return Classification {
            in_domain: true,
            crops: BTreeSet::new(),
            topics: BTreeSet::new(),
            greeting: true,
        };
    }

    let crops = registry.matched_crops(&text);
    let topics = registry.matched_topics(&text);

    if crops.is_empty() && topics.is_empty() {
        let hits = registry.offtopic_hits(&text);
        if !hits.is_empty() {
            debug!("off-topic keywords observed: {hits:?}");
        }
        return Classification::out_of_domain();
    }

    Classification {
        in_domain: true,
        crops,
        topics,
        greeting: false,
    }
}
