use std::fmt;

use async_trait::async_trait;

use super::types::{Completion, CompletionRequest};

/// Errors that can occur during provider operations.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// Provider misconfigured (malformed API key, bad URL). Not retryable.
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// API returned an error response (auth, quota, bad request).
    Api { status: u16, message: String },
    /// Failed to parse the provider's response.
    Parse(String),
}

impl ProviderError {
    /// The human-readable detail carried by this error, if it has any.
    pub fn message(&self) -> Option<&str> {
        let msg = match self {
            ProviderError::Config(msg) => msg,
            ProviderError::Network(msg) => msg,
            ProviderError::Api { message, .. } => message,
            ProviderError::Parse(msg) => msg,
        };
        let msg = msg.trim();
        if msg.is_empty() { None } else { Some(msg) }
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::Config(msg) => write!(f, "config error: {msg}"),
            ProviderError::Network(msg) => write!(f, "network error: {msg}"),
            ProviderError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ProviderError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ProviderError {}

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Returns the name of the provider.
    fn name(&self) -> &str;

    /// Issues one completion call and waits for the full response.
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, ProviderError>;
}
