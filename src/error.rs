use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Document validation failed: {0}")]
    Validation(String),

    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    #[error("Request quota exceeded: {used} of {limit} requests used")]
    RateLimit { used: u32, limit: u32 },

    #[error("Interrupted while waiting for the request interval")]
    Interrupted,

    #[error("HTTP request failed: {0}")]
    Transport(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Form encoding failed: {0}")]
    FormEncoding(#[from] serde_urlencoded::ser::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GatewayError {
    /// Whether a caller may reasonably try the same submission again later.
    /// The gateway itself never retries.
    pub fn is_retryable(&self) -> bool {
        matches!(self, GatewayError::Transport(_) | GatewayError::Interrupted)
    }

    /// Short label used for log fields and metric labels
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::Validation(_) => "validation",
            GatewayError::UnsupportedFormat(_) => "unsupported_format",
            GatewayError::RateLimit { .. } => "rate_limit",
            GatewayError::Interrupted => "interrupted",
            GatewayError::Transport(_) => "transport",
            GatewayError::Config(_) => "config",
            GatewayError::Json(_) => "json",
            GatewayError::FormEncoding(_) => "form_encoding",
            GatewayError::Toml(_) => "toml",
            GatewayError::Io(_) => "io",
        }
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_transport_and_interrupt_are_retryable() {
        assert!(GatewayError::Transport("reset".into()).is_retryable());
        assert!(GatewayError::Interrupted.is_retryable());
        assert!(!GatewayError::RateLimit { used: 1, limit: 1 }.is_retryable());
        assert!(!GatewayError::Validation("bad".into()).is_retryable());
        assert!(!GatewayError::Config("bad".into()).is_retryable());
    }

    #[test]
    fn test_rate_limit_message_mentions_quota() {
        let err = GatewayError::RateLimit { used: 3, limit: 3 };
        assert_eq!(err.to_string(), "Request quota exceeded: 3 of 3 requests used");
        assert_eq!(err.kind(), "rate_limit");
    }
}
