//! Error types for prompt construction, provider calls and the facade.

use thiserror::Error;

/// Errors from the prompt builder.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PromptError {
    #[error("unknown {field} '{value}'")]
    UnknownCategoryKey { field: &'static str, value: String },
}

/// Failures of the network call itself.
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("no API key configured; set {0}")]
    MissingCredential(String),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

/// Errors from a single adapter invocation.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error(transparent)]
    UnknownCategoryKey(#[from] PromptError),

    #[error("{provider} returned a malformed reply: {reason}")]
    MalformedReply { provider: String, reason: String },

    #[error("call to {provider} failed: {source}")]
    UpstreamCall {
        provider: String,
        #[source]
        source: UpstreamError,
    },
}

impl ProviderError {
    pub(crate) fn malformed(provider: &str, reason: impl Into<String>) -> Self {
        ProviderError::MalformedReply {
            provider: provider.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn upstream(provider: &str, source: impl Into<UpstreamError>) -> Self {
        ProviderError::UpstreamCall {
            provider: provider.to_string(),
            source: source.into(),
        }
    }
}

/// No adapter is registered under the requested name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("AI provider '{0}' not found")]
pub struct UnknownProvider(pub String);

/// The only error type the generation facade returns.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error(transparent)]
    UnknownProvider(#[from] UnknownProvider),

    #[error("invalid generation request: {0}")]
    InvalidRequest(#[source] PromptError),

    #[error("Failed to generate the email with {provider}. Verify your API key.")]
    GenerationFailed {
        provider: String,
        #[source]
        source: ProviderError,
    },
}

impl GenerationError {
    /// Whether the caller, not the upstream service, is at fault.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            GenerationError::UnknownProvider(_) | GenerationError::InvalidRequest(_)
        )
    }
}
