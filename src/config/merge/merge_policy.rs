//! Built-in defaults, the lowest-precedence layer of every load.

use crate::config::{DEFAULT_APP_TITLE, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_REFERER};
use config::builder::DefaultState;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("provider.base_url", DEFAULT_BASE_URL)?
        .set_default("provider.model", DEFAULT_MODEL)?
        .set_default("provider.referer", DEFAULT_REFERER)?
        .set_default("provider.app_title", DEFAULT_APP_TITLE)?
        .set_default("provider.request_timeout_secs", 30_i64)?
        .set_default("provider.connect_timeout_secs", 10_i64)?
        .set_default("generation.chat_temperature", 0.7_f64)?
        .set_default("generation.course_temperature", 0.4_f64)?
        .set_default("generation.course_retry_temperature", 0.6_f64)?
        .set_default("generation.max_tokens", 1200_i64)
}
