//! Resilient Generation Pipeline
//!
//! Turns a course topic or a mentor question into a result that is always
//! well-formed: provider content when the provider cooperates, deterministic
//! local content otherwise. Every public operation is total; provider trouble
//! only shows up in the outcome's origin and diagnostic detail.

use crate::config::{GenerationSettings, TutorgenConfig};
use crate::error::{ApiError, GenerationFailure};
use crate::provider::{ModelProviderClient, OpenRouterClient};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

mod chat;
mod course;
mod extract;
mod fallback;
mod invoke;
mod request;

pub use extract::{extract_structured, strip_code_fences};
pub use fallback::{build_fallback_course, pick_fallback_tips, FALLBACK_TIPS, TIPS_PER_REPLY};
pub use invoke::ProviderResult;
pub use request::{
    CourseTopic, GenerationRequest, MentorQuestion, RequestKind, COURSE_SYSTEM_PROMPT,
    MENTOR_SYSTEM_PROMPT,
};

/// Where the content of an outcome came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    Provider,
    /// No provider configured; a known mode, not an error
    Fallback,
    /// The provider was tried and failed
    FallbackAfterError,
}

/// The value every pipeline call returns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationOutcome<T> {
    pub reply: T,
    pub origin: Origin,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_error_detail: Option<String>,
}

impl<T> GenerationOutcome<T> {
    pub fn from_provider(reply: T) -> Self {
        Self {
            reply,
            origin: Origin::Provider,
            provider_error_detail: None,
        }
    }

    /// Fallback content, with the origin chosen by the failure that caused it.
    pub fn from_fallback(reply: T, failure: &GenerationFailure) -> Self {
        match failure {
            GenerationFailure::NoCredential => Self {
                reply,
                origin: Origin::Fallback,
                provider_error_detail: None,
            },
            other => Self {
                reply,
                origin: Origin::FallbackAfterError,
                provider_error_detail: Some(other.to_string()),
            },
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.origin != Origin::Provider
    }
}

impl<T: Serialize> GenerationOutcome<T> {
    /// Success-shaped caller payload: `{"<key>": reply, "origin": ..., "error"?: ...}`.
    pub fn into_payload(self, key: &str) -> Value {
        let mut payload = json!({
            key: self.reply,
            "origin": self.origin,
        });
        if let Some(detail) = self.provider_error_detail {
            payload["error"] = Value::String(detail);
        }
        payload
    }
}

pub type ChatOutcome = GenerationOutcome<String>;
pub type CourseOutcome = GenerationOutcome<crate::course::StructuredCourse>;

/// Shared, stateless-per-call pipeline. Safe to use from concurrent tasks.
pub struct GenerationPipeline {
    client: Option<Arc<dyn ModelProviderClient>>,
    settings: GenerationSettings,
    request_timeout: Duration,
    rng: Mutex<Box<dyn RngCore + Send>>,
}

impl GenerationPipeline {
    /// Build from configuration. Without a credential the pipeline runs in
    /// fallback-only mode and never touches the network.
    pub fn new(config: &TutorgenConfig) -> Result<Self, ApiError> {
        let provider = &config.provider;
        info!(
            credential_present = provider.has_credential(),
            credential_len = provider.credential_len(),
            model = %provider.model,
            base_url = %provider.base_url,
            "Generation pipeline configured"
        );

        let client: Option<Arc<dyn ModelProviderClient>> = if provider.has_credential() {
            Some(Arc::new(OpenRouterClient::new(provider)?))
        } else {
            None
        };

        Ok(Self::with_client(
            client,
            config.generation.clone(),
            provider.request_timeout(),
            Box::new(StdRng::from_entropy()),
        ))
    }

    /// Build around an explicit client and random source.
    pub fn with_client(
        client: Option<Arc<dyn ModelProviderClient>>,
        settings: GenerationSettings,
        request_timeout: Duration,
        rng: Box<dyn RngCore + Send>,
    ) -> Self {
        Self {
            client,
            settings,
            request_timeout,
            rng: Mutex::new(rng),
        }
    }

    pub fn has_provider(&self) -> bool {
        self.client.is_some()
    }

    fn max_tokens(&self) -> Option<u32> {
        Some(self.settings.max_tokens)
    }

    fn fallback_tips(&self, message: &str) -> String {
        let mut rng = self.rng.lock();
        pick_fallback_tips(message, &mut **rng)
    }
}
