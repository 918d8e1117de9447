//! Environment sources: `TUTORGEN__SECTION__KEY` variables and the well-known
//! provider variables the deployment already exports.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Add `TUTORGEN__PROVIDER__MODEL`-style variables to builder.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(builder.add_source(
        Environment::with_prefix("TUTORGEN")
            .separator("__")
            .try_parsing(true),
    ))
}

/// Well-known provider variables, captured once so loading stays deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub referer: Option<String>,
    pub app_title: Option<String>,
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

impl EnvOverrides {
    /// Read OPENROUTER_* (with OPENAI_API_KEY and APP_URL as fallbacks).
    pub fn from_process_env() -> Self {
        Self {
            api_key: non_empty_var("OPENROUTER_API_KEY").or_else(|| non_empty_var("OPENAI_API_KEY")),
            base_url: non_empty_var("OPENROUTER_BASE_URL"),
            model: non_empty_var("OPENROUTER_MODEL"),
            referer: non_empty_var("OPENROUTER_REFERER").or_else(|| non_empty_var("APP_URL")),
            app_title: non_empty_var("OPENROUTER_APP_TITLE"),
        }
    }

    /// Apply as the highest-precedence layer.
    pub fn apply(
        &self,
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        builder
            .set_override_option("provider.api_key", self.api_key.clone())?
            .set_override_option("provider.base_url", self.base_url.clone())?
            .set_override_option("provider.model", self.model.clone())?
            .set_override_option("provider.referer", self.referer.clone())?
            .set_override_option("provider.app_title", self.app_title.clone())
    }
}
