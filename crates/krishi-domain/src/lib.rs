//! # krishi-domain
//!
//! The domain-scoped response engine: a fixed registry of five crops and
//! four advisory topics, a word-boundary membership classifier, and a
//! deterministic reply synthesizer with last-match carry-over from the
//! conversation log.

pub mod classifier;
pub mod conversation;
pub mod registry;
mod registry_data;
pub mod responder;
pub mod synthesizer;

pub use classifier::{classify, Classification};
pub use conversation::{ConversationContext, Speaker, Turn};
pub use registry::{Crop, Registry, RegistryFile, Topic};
pub use responder::Responder;
pub use synthesizer::{synthesize, Reply, ReplyKind};
