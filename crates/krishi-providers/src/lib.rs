//! # krishi-providers
//!
//! Text-generation backend implementations for Krishi Sahayak.

pub mod groq;
