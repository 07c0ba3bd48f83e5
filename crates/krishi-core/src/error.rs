use thiserror::Error;

/// Top-level error type for Krishi Sahayak.
#[derive(Debug, Error)]
pub enum KrishiError {
    /// Failure from a text-generation backend, categorized by cause.
    #[error("provider error ({kind}): {message}")]
    Provider {
        kind: ProviderErrorKind,
        message: String,
    },

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Domain registry construction error.
    #[error("registry error: {0}")]
    Registry(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl KrishiError {
    /// Shorthand for a categorized provider failure.
    pub fn provider(kind: ProviderErrorKind, message: impl Into<String>) -> Self {
        Self::Provider {
            kind,
            message: message.into(),
        }
    }
}

/// Why a text-generation backend call failed.
///
/// The chat layer turns each kind into an actionable user-facing notice;
/// the backend is optional and its failure never aborts a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    /// API key missing or rejected by the service.
    Credential,
    /// Could not reach the service at all.
    Network,
    /// The request timed out.
    Timeout,
    /// The service is rate-limiting requests.
    RateLimited,
    /// Anything else.
    Unknown,
}

impl ProviderErrorKind {
    /// Whether retrying the same request may help.
    pub fn is_transient(&self) -> bool {
        !matches!(self, Self::Credential | Self::RateLimited)
    }
}

impl std::fmt::Display for ProviderErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Credential => "credential",
            Self::Network => "network",
            Self::Timeout => "timeout",
            Self::RateLimited => "rate-limit",
            Self::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_display() {
        let e = KrishiError::provider(ProviderErrorKind::Timeout, "deadline exceeded");
        assert_eq!(e.to_string(), "provider error (timeout): deadline exceeded");
    }

    #[test]
    fn test_transient_kinds() {
        assert!(ProviderErrorKind::Network.is_transient());
        assert!(ProviderErrorKind::Timeout.is_transient());
        assert!(ProviderErrorKind::Unknown.is_transient());
        assert!(!ProviderErrorKind::Credential.is_transient());
        assert!(!ProviderErrorKind::RateLimited.is_transient());
    }
}
