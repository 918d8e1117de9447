//! Provider invocation: one bounded call, converted into a tagged result.

use crate::error::GenerationFailure;
use crate::pipeline::request::GenerationRequest;
use crate::pipeline::GenerationPipeline;
use tracing::{debug, warn};

/// Result of a single provider call attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderResult {
    /// The provider answered; the text may still be empty or unparseable
    Completed { raw_text: String },
    Failed(GenerationFailure),
}

impl ProviderResult {
    pub fn succeeded(&self) -> bool {
        matches!(self, ProviderResult::Completed { .. })
    }

    pub fn raw_text(&self) -> Option<&str> {
        match self {
            ProviderResult::Completed { raw_text } => Some(raw_text),
            ProviderResult::Failed(_) => None,
        }
    }

    pub fn error_kind(&self) -> Option<&GenerationFailure> {
        match self {
            ProviderResult::Completed { .. } => None,
            ProviderResult::Failed(failure) => Some(failure),
        }
    }
}

impl GenerationPipeline {
    /// Issue one provider call for `request`.
    ///
    /// Without a client this returns `NoCredential` immediately. Errors and the
    /// per-call deadline both become `Failed(Provider(..))`; nothing is raised.
    pub async fn invoke(&self, request: &GenerationRequest) -> ProviderResult {
        let Some(client) = self.client.as_ref() else {
            debug!(kind = ?request.kind, "No provider credential; skipping provider call");
            return ProviderResult::Failed(GenerationFailure::NoCredential);
        };

        debug!(
            provider = client.provider_name(),
            model = client.model_name(),
            kind = ?request.kind,
            temperature = request.temperature,
            json_mode = request.json_mode,
            "Invoking provider"
        );

        let call = client.complete(request.messages(), request.options());
        match tokio::time::timeout(self.request_timeout, call).await {
            Ok(Ok(response)) => ProviderResult::Completed {
                raw_text: response.content,
            },
            Ok(Err(e)) => {
                warn!(provider = client.provider_name(), error = %e, "Provider call failed");
                ProviderResult::Failed(e.into())
            }
            Err(_) => {
                warn!(
                    provider = client.provider_name(),
                    timeout_ms = self.request_timeout.as_millis() as u64,
                    "Provider call timed out"
                );
                ProviderResult::Failed(GenerationFailure::Provider(format!(
                    "timed out after {} ms",
                    self.request_timeout.as_millis()
                )))
            }
        }
    }
}
