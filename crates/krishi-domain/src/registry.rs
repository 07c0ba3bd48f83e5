//! The immutable domain registry: crops, topics, matching terms, and the
//! advisory fact table.
//!
//! Built once at startup and shared by reference. A TOML override file can
//! extend the built-in data; tests construct reduced registries the same way.

use krishi_core::error::KrishiError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::registry_data::*;

/// One of the five crops the assistant is trained on.
///
/// The declaration order is the canonical enumeration order; replies always
/// list crops in this order regardless of input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Crop {
    Maize,
    Wheat,
    Rice,
    Corn,
    Soybean,
}

impl Crop {
    /// All crops in canonical enumeration order.
    pub const ALL: [Crop; 5] = [
        Crop::Maize,
        Crop::Wheat,
        Crop::Rice,
        Crop::Corn,
        Crop::Soybean,
    ];

    /// Canonical lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Crop::Maize => "maize",
            Crop::Wheat => "wheat",
            Crop::Rice => "rice",
            Crop::Corn => "corn",
            Crop::Soybean => "soybean",
        }
    }

    /// Capitalized name for reply headings.
    pub fn label(&self) -> &'static str {
        match self {
            Crop::Maize => "Maize",
            Crop::Wheat => "Wheat",
            Crop::Rice => "Rice",
            Crop::Corn => "Corn",
            Crop::Soybean => "Soybean",
        }
    }

    /// Parse a canonical name, as used in registry override files.
    pub fn parse(s: &str) -> Option<Crop> {
        Crop::ALL.into_iter().find(|c| c.name() == s)
    }
}

impl fmt::Display for Crop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One of the four advisory topics.
///
/// Declaration order is the canonical enumeration order, nested inside the
/// crop order when a reply covers several combinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Topic {
    CropHealth,
    PestManagement,
    WeedControl,
    Irrigation,
}

impl Topic {
    /// All topics in canonical enumeration order.
    pub const ALL: [Topic; 4] = [
        Topic::CropHealth,
        Topic::PestManagement,
        Topic::WeedControl,
        Topic::Irrigation,
    ];

    /// Canonical kebab-case name.
    pub fn name(&self) -> &'static str {
        match self {
            Topic::CropHealth => "crop-health",
            Topic::PestManagement => "pest-management",
            Topic::WeedControl => "weed-control",
            Topic::Irrigation => "irrigation",
        }
    }

    /// Human-readable heading used in replies.
    pub fn label(&self) -> &'static str {
        match self {
            Topic::CropHealth => "Crop Health & Monitoring",
            Topic::PestManagement => "Pest Detection & Management",
            Topic::WeedControl => "Weed Detection & Control",
            Topic::Irrigation => "Irrigation Management",
        }
    }

    /// Parse a canonical name, as used in registry override files.
    pub fn parse(s: &str) -> Option<Topic> {
        Topic::ALL.into_iter().find(|t| t.name() == s)
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A matching term compiled for word-boundary search.
#[derive(Debug, Clone)]
struct Term {
    text: String,
    pattern: Regex,
}

/// Compile a term into a `\b`-anchored pattern. Multi-word terms tolerate
/// any run of whitespace between words (input is normalized anyway).
fn compile_term(term: &str) -> Result<Term, KrishiError> {
    let words: Vec<String> = term.split_whitespace().map(|w| regex::escape(w)).collect();
    if words.is_empty() {
        return Err(KrishiError::Registry("empty matching term".to_string()));
    }
    let pattern = format!(r"\b{}\b", words.join(r"\s+"));
    let regex = Regex::new(&pattern)
        .map_err(|e| KrishiError::Registry(format!("bad matching term {term:?}: {e}")))?;
    Ok(Term {
        text: term.to_lowercase(),
        pattern: regex,
    })
}

/// Registry override file (TOML).
///
/// Everything is optional; an empty file reproduces the built-in registry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistryFile {
    /// Extra greeting tokens, added to the built-in set.
    #[serde(default)]
    pub greetings: Vec<String>,
    /// Extra topic synonyms, keyed by canonical topic name.
    #[serde(default)]
    pub synonyms: BTreeMap<String, Vec<String>>,
    /// Extra off-topic keywords.
    #[serde(default)]
    pub offtopic: Vec<String>,
    /// Facts that replace or extend built-in entries for the same pair.
    #[serde(default)]
    pub facts: Vec<FactEntry>,
    /// Drop the built-in fact table and use only `facts`.
    #[serde(default)]
    pub replace_facts: bool,
}

/// One advisory fact in a registry override file.
#[derive(Debug, Clone, Deserialize)]
pub struct FactEntry {
    pub crop: String,
    pub topic: String,
    pub advice: String,
}

/// Immutable domain registry.
#[derive(Debug)]
pub struct Registry {
    greetings: Vec<Term>,
    crop_aliases: Vec<(Crop, Term)>,
    topic_synonyms: Vec<(Topic, Term)>,
    offtopic: Vec<Term>,
    facts: BTreeMap<(Crop, Topic), String>,
    greeting_reply: String,
    decline_reply: String,
}

impl Registry {
    /// The built-in registry with the full 5x4 fact table.
    pub fn builtin() -> Self {
        Self::with_overrides(&RegistryFile::default()).expect("built-in registry data is valid")
    }

    /// Load overrides from a TOML file and merge them over the built-in data.
    pub fn load(path: &str) -> Result<Self, KrishiError> {
        let raw = std::fs::read_to_string(path)?;
        let file: RegistryFile = toml::from_str(&raw)
            .map_err(|e| KrishiError::Registry(format!("failed to parse {path}: {e}")))?;
        Self::with_overrides(&file)
    }

    /// Build a registry from the built-in data plus the given overrides.
    pub fn with_overrides(file: &RegistryFile) -> Result<Self, KrishiError> {
        let mut greetings = Vec::new();
        for term in GREETING_TERMS.iter().copied().chain(file.greetings.iter().map(String::as_str)) {
            greetings.push(compile_term(term)?);
        }

        let mut crop_aliases = Vec::new();
        for (crop, aliases) in CROP_ALIASES {
            for alias in *aliases {
                crop_aliases.push((*crop, compile_term(alias)?));
            }
        }

        let mut topic_synonyms = Vec::new();
        for (topic, synonyms) in TOPIC_SYNONYMS {
            for synonym in *synonyms {
                topic_synonyms.push((*topic, compile_term(synonym)?));
            }
        }
        for (name, synonyms) in &file.synonyms {
            let topic = Topic::parse(name)
                .ok_or_else(|| KrishiError::Registry(format!("unknown topic {name:?}")))?;
            for synonym in synonyms {
                topic_synonyms.push((topic, compile_term(synonym)?));
            }
        }

        let mut offtopic = Vec::new();
        for term in OFFTOPIC_TERMS.iter().copied().chain(file.offtopic.iter().map(String::as_str)) {
            offtopic.push(compile_term(term)?);
        }

        let mut facts = BTreeMap::new();
        if !file.replace_facts {
            for (crop, topic, advice) in FACTS {
                facts.insert((*crop, *topic), (*advice).to_string());
            }
        }
        for entry in &file.facts {
            let crop = Crop::parse(&entry.crop)
                .ok_or_else(|| KrishiError::Registry(format!("unknown crop {:?}", entry.crop)))?;
            let topic = Topic::parse(&entry.topic)
                .ok_or_else(|| KrishiError::Registry(format!("unknown topic {:?}", entry.topic)))?;
            if entry.advice.trim().is_empty() {
                return Err(KrishiError::Registry(format!(
                    "empty advice for ({}, {})",
                    crop, topic
                )));
            }
            facts.insert((crop, topic), entry.advice.clone());
        }

        Ok(Self {
            greetings,
            crop_aliases,
            topic_synonyms,
            offtopic,
            facts,
            greeting_reply: GREETING_REPLY.to_string(),
            decline_reply: render_decline(),
        })
    }

    /// Whether the normalized text contains any greeting token.
    pub(crate) fn is_greeting(&self, text: &str) -> bool {
        self.greetings.iter().any(|t| t.pattern.is_match(text))
    }

    /// Crops named in the normalized text, canonical order.
    pub(crate) fn matched_crops(&self, text: &str) -> std::collections::BTreeSet<Crop> {
        self.crop_aliases
            .iter()
            .filter(|(_, t)| t.pattern.is_match(text))
            .map(|(c, _)| *c)
            .collect()
    }

    /// Topics named in the normalized text, canonical order.
    pub(crate) fn matched_topics(&self, text: &str) -> std::collections::BTreeSet<Topic> {
        self.topic_synonyms
            .iter()
            .filter(|(_, t)| t.pattern.is_match(text))
            .map(|(t, _)| *t)
            .collect()
    }

    /// Off-topic keywords present in the normalized text.
    pub(crate) fn offtopic_hits(&self, text: &str) -> Vec<&str> {
        self.offtopic
            .iter()
            .filter(|t| t.pattern.is_match(text))
            .map(|t| t.text.as_str())
            .collect()
    }

    /// The registered advisory for a (crop, topic) pair, if any.
    pub fn fact(&self, crop: Crop, topic: Topic) -> Option<&str> {
        self.facts.get(&(crop, topic)).map(String::as_str)
    }

    /// Number of registered (crop, topic) advisories.
    pub fn fact_count(&self) -> usize {
        self.facts.len()
    }

    /// Topic-level answer used when no crop is available.
    pub fn topic_answer(&self, topic: Topic) -> &'static str {
        lookup(GENERIC_TOPIC_ANSWERS, topic)
    }

    /// Fallback advisory template for a pair with no registered fact.
    pub fn topic_fallback(&self, topic: Topic, crop: Crop) -> String {
        lookup(TOPIC_FALLBACKS, topic).replace("{crop}", crop.name())
    }

    /// Crop-level overview used when no topic is available.
    pub fn crop_answer(&self, crop: Crop) -> &'static str {
        lookup(GENERIC_CROP_ANSWERS, crop)
    }

    /// Fixed reply for greeting turns.
    pub fn greeting_reply(&self) -> &str {
        &self.greeting_reply
    }

    /// Fixed decline for out-of-domain turns. Always enumerates every crop
    /// and every topic by canonical name.
    pub fn decline_reply(&self) -> &str {
        &self.decline_reply
    }
}

/// Find the entry for a key in a small static table.
///
/// The tables in `registry_data` cover every enum variant; a miss is a bug
/// caught by the completeness tests below.
fn lookup<K: Copy + PartialEq>(table: &'static [(K, &'static str)], key: K) -> &'static str {
    table
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
        .unwrap_or("")
}

/// Render the decline message from the canonical enumerations, so the
/// listing is complete by construction.
fn render_decline() -> String {
    let crops = Crop::ALL
        .iter()
        .map(|c| c.name())
        .collect::<Vec<_>>()
        .join(", ");

    let mut out = String::new();
    out.push_str("I'm sorry, I can only help with the crops and topics I was trained on.\n\n");
    out.push_str(&format!("Crops I know: {crops}.\n\n"));
    out.push_str("Topics I cover:\n");
    for topic in Topic::ALL {
        out.push_str(&format!(
            "- {}: {}\n",
            topic.name(),
            lookup(TOPIC_SUMMARIES, topic)
        ));
    }
    out.push_str("\nTry questions like:\n");
    for q in EXAMPLE_QUESTIONS {
        out.push_str(&format!("- {q}\n"));
    }
    out
}
