//! Error types for the tutorgen generation pipeline.
//!
//! `ApiError` covers the failures that are allowed to reach a caller: bad input,
//! bad configuration, and provider errors at the client boundary. `GenerationFailure`
//! is the taxonomy of provider unreliability that the pipeline absorbs into a
//! fallback outcome.

use thiserror::Error;

/// API-related errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("Provider not configured: {0}")]
    ProviderNotConfigured(String),

    #[error("Provider request failed: {0}")]
    ProviderRequestFailed(String),

    #[error("Provider authentication failed: {0}")]
    ProviderAuthFailed(String),

    #[error("Provider rate limit exceeded: {0}")]
    ProviderRateLimit(String),

    #[error("Provider model not found: {0}")]
    ProviderModelNotFound(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Failed to render output: {0}")]
    OutputError(#[from] serde_json::Error),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

/// Why a generation attempt did not produce provider content.
///
/// None of these ever reach the caller as a failure; they end up in the
/// outcome's diagnostic detail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationFailure {
    #[error("no provider credential configured")]
    NoCredential,

    #[error("provider error: {0}")]
    Provider(String),

    #[error("provider reply did not contain a valid {0}")]
    Parse(&'static str),

    #[error("provider returned an empty reply")]
    EmptyReply,
}

impl From<ApiError> for GenerationFailure {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::ProviderNotConfigured(_) => GenerationFailure::NoCredential,
            other => GenerationFailure::Provider(other.to_string()),
        }
    }
}
