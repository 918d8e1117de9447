//! Configuration System
//!
//! Explicit configuration for the generation pipeline. Values are layered with the
//! `config` crate (defaults, global file, workspace files, environment) and then
//! handed to the pipeline by value; nothing reads the process environment after load.

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

mod facade;
mod merge;
mod sources;

pub use facade::{ConfigLoader, EnvOverrides};

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_MODEL: &str = "meta-llama/llama-3.1-8b-instruct:free";
pub const DEFAULT_REFERER: &str = "http://localhost:5173";
pub const DEFAULT_APP_TITLE: &str = "CapacitaIA";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TutorgenConfig {
    /// Provider endpoint and credential
    #[serde(default)]
    pub provider: ProviderSettings,

    /// Sampling parameters for each request kind
    #[serde(default)]
    pub generation: GenerationSettings,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Connection settings for the OpenAI-compatible gateway.
#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// Bearer credential; absent or empty means no-credential mode
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Sent as `HTTP-Referer`
    #[serde(default = "default_referer")]
    pub referer: String,

    /// Sent as `X-Title`
    #[serde(default = "default_app_title")]
    pub app_title: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_referer() -> String {
    DEFAULT_REFERER.to_string()
}

fn default_app_title() -> String {
    DEFAULT_APP_TITLE.to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            referer: default_referer(),
            app_title: default_app_title(),
            request_timeout_secs: default_request_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

// Hand-written so the credential never ends up in a log line.
impl fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("credential_present", &self.has_credential())
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("referer", &self.referer)
            .field("app_title", &self.app_title)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .finish()
    }
}

impl ProviderSettings {
    /// The configured credential, ignoring blank values.
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn has_credential(&self) -> bool {
        self.credential().is_some()
    }

    /// Length of the credential, for diagnostics that must not show the value.
    pub fn credential_len(&self) -> usize {
        self.credential().map(str::len).unwrap_or(0)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("Model cannot be empty".to_string());
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(format!(
                "Base URL must start with http:// or https://: {}",
                self.base_url
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err("Request timeout must be greater than zero".to_string());
        }
        if self.connect_timeout_secs == 0 {
            return Err("Connect timeout must be greater than zero".to_string());
        }
        Ok(())
    }
}

/// Sampling parameters per request kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationSettings {
    #[serde(default = "default_chat_temperature")]
    pub chat_temperature: f32,

    /// Temperature of the first, schema-strict course attempt
    #[serde(default = "default_course_temperature")]
    pub course_temperature: f32,

    /// Temperature of the second, plainer course attempt
    #[serde(default = "default_course_retry_temperature")]
    pub course_retry_temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_chat_temperature() -> f32 {
    0.7
}

fn default_course_temperature() -> f32 {
    0.4
}

fn default_course_retry_temperature() -> f32 {
    0.6
}

fn default_max_tokens() -> u32 {
    1200
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            chat_temperature: default_chat_temperature(),
            course_temperature: default_course_temperature(),
            course_retry_temperature: default_course_retry_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

impl GenerationSettings {
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("chat_temperature", self.chat_temperature),
            ("course_temperature", self.course_temperature),
            ("course_retry_temperature", self.course_retry_temperature),
        ] {
            if !(0.0..=2.0).contains(&value) {
                return Err(format!("{} must be within 0.0..=2.0, got {}", name, value));
            }
        }
        if self.max_tokens == 0 {
            return Err("max_tokens must be greater than zero".to_string());
        }
        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Provider(String),
    Generation(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Provider(msg) => write!(f, "Provider: {}", msg),
            ValidationError::Generation(msg) => write!(f, "Generation: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl TutorgenConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.provider.validate() {
            errors.push(ValidationError::Provider(e));
        }
        if let Err(e) = self.generation.validate() {
            errors.push(ValidationError::Generation(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
