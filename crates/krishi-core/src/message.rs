use serde::{Deserialize, Serialize};

/// A response produced by a text-generation backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutgoingMessage {
    pub text: String,
    pub metadata: MessageMetadata,
}

/// Metadata about how a response was generated.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MessageMetadata {
    /// Which provider produced this response.
    pub provider_used: String,
    /// Token count (if available from the provider).
    pub tokens_used: Option<u64>,
    /// Wall-clock processing time in milliseconds.
    pub processing_time_ms: u64,
    /// Model identifier (if applicable).
    pub model: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_default_is_empty() {
        let m = MessageMetadata::default();
        assert!(m.provider_used.is_empty());
        assert_eq!(m.tokens_used, None);
        assert_eq!(m.processing_time_ms, 0);
    }

    #[test]
    fn test_outgoing_message_serde() {
        let msg = OutgoingMessage {
            text: "Spray neem oil at 2-3 ml/L.".into(),
            metadata: MessageMetadata {
                provider_used: "groq".into(),
                tokens_used: Some(42),
                processing_time_ms: 180,
                model: Some("llama-3.1-8b-instant".into()),
            },
        };
        let json = serde_json::to_string(&msg).unwrap();
        let back: OutgoingMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(back.metadata.tokens_used, Some(42));
        assert_eq!(back.text, msg.text);
    }
}
