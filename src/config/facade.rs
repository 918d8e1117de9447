//! Config loader facade: one entry point that applies every source in order.

use crate::config::merge::builder_with_defaults;
use crate::config::sources::{environment, global_file, workspace_file};
use crate::config::TutorgenConfig;
use crate::error::ApiError;
use config::builder::DefaultState;
use config::{ConfigBuilder, File};
use std::path::Path;
use tracing::debug;

pub use crate::config::sources::environment::EnvOverrides;

/// Loads `TutorgenConfig` from layered sources.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace using the process environment.
    ///
    /// Precedence (lowest to highest): defaults, global file, workspace
    /// `config/config.toml`, `config/{TUTORGEN_ENV}.toml`, `TUTORGEN__*` variables,
    /// well-known provider variables.
    pub fn load(workspace_root: &Path) -> Result<TutorgenConfig, ApiError> {
        Self::load_with(workspace_root, &EnvOverrides::from_process_env())
    }

    /// Same as [`ConfigLoader::load`] with explicitly supplied provider overrides.
    pub fn load_with(
        workspace_root: &Path,
        overrides: &EnvOverrides,
    ) -> Result<TutorgenConfig, ApiError> {
        let builder = builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        Self::finish(builder, overrides)
    }

    /// Load a single explicit file instead of the global and workspace layers.
    pub fn load_from_file(path: &Path) -> Result<TutorgenConfig, ApiError> {
        Self::load_from_file_with(path, &EnvOverrides::from_process_env())
    }

    pub fn load_from_file_with(
        path: &Path,
        overrides: &EnvOverrides,
    ) -> Result<TutorgenConfig, ApiError> {
        if !path.exists() {
            return Err(ApiError::ConfigError(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let builder = builder_with_defaults()?.add_source(File::from(path));
        Self::finish(builder, overrides)
    }

    fn finish(
        builder: ConfigBuilder<DefaultState>,
        overrides: &EnvOverrides,
    ) -> Result<TutorgenConfig, ApiError> {
        let builder = environment::add_to_builder(builder)?;
        let builder = overrides.apply(builder)?;
        let config: TutorgenConfig = builder.build()?.try_deserialize()?;

        config.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;

        debug!(
            model = %config.provider.model,
            base_url = %config.provider.base_url,
            credential_present = config.provider.has_credential(),
            "Configuration loaded"
        );
        Ok(config)
    }
}
