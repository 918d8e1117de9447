//! CLI route: single route table and run context. Dispatches to the pipeline and presentation.

use crate::cli::parse::{Commands, ProviderCommands};
use crate::cli::presentation::{
    format_chat_text, format_course_text, format_provider_status_json,
    format_provider_status_text, ProviderStatus,
};
use crate::config::{ConfigLoader, TutorgenConfig};
use crate::error::ApiError;
use crate::pipeline::{CourseTopic, GenerationPipeline, MentorQuestion};
use serde_json::Value;
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// Runtime context for CLI execution: loaded config and the pipeline built from it.
pub struct RunContext {
    config: TutorgenConfig,
    pipeline: GenerationPipeline,
}

impl RunContext {
    /// Load configuration from an explicit file, or from the workspace layers.
    pub fn load_config(
        workspace_root: &Path,
        config_path: Option<&Path>,
    ) -> Result<TutorgenConfig, ApiError> {
        match config_path {
            Some(cfg_path) => ConfigLoader::load_from_file(cfg_path),
            None => ConfigLoader::load(workspace_root),
        }
    }

    pub fn from_config(config: TutorgenConfig) -> Result<Self, ApiError> {
        let pipeline = GenerationPipeline::new(&config)?;
        Ok(Self { config, pipeline })
    }

    /// Execute a CLI command via the single route table.
    pub async fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        let started = Instant::now();
        let result = match command {
            Commands::Ask { message, format } => {
                let question = MentorQuestion::new(&message.join(" "))?;
                let outcome = self.pipeline.generate_chat_reply(&question).await;
                if format == "text" {
                    Ok(format_chat_text(&outcome))
                } else {
                    render_json(outcome.into_payload("reply"))
                }
            }
            Commands::Course {
                topic,
                language,
                format,
            } => {
                let topic = CourseTopic::new(topic, language)?;
                let outcome = self.pipeline.generate_structured(&topic).await;
                if format == "text" {
                    Ok(format_course_text(&outcome))
                } else {
                    render_json(outcome.into_payload("course"))
                }
            }
            Commands::Provider { command } => match command {
                ProviderCommands::Status { format } => {
                    let status = ProviderStatus::from_settings(&self.config.provider);
                    if format == "json" {
                        format_provider_status_json(&status)
                    } else {
                        Ok(format_provider_status_text(&status))
                    }
                }
            },
        };

        info!(
            duration_ms = started.elapsed().as_millis() as u64,
            ok = result.is_ok(),
            "Command finished"
        );
        result
    }
}

fn render_json(payload: Value) -> Result<String, ApiError> {
    Ok(serde_json::to_string_pretty(&payload)?)
}
