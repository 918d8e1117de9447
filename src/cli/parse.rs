//! CLI parse: clap types for tutorgen. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// tutorgen CLI - course and mentor generation with local fallbacks
#[derive(Parser)]
#[command(name = "tutorgen")]
#[command(about = "Generate courses and mentor replies, falling back to local content when the provider fails")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory (for config/config.toml)
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ask the mentor a question
    Ask {
        /// Question text (words are joined with spaces)
        #[arg(required = true)]
        message: Vec<String>,
        /// Output format (json or text)
        #[arg(long, default_value = "json")]
        format: String,
    },
    /// Generate a course outline for a topic
    Course {
        /// Course topic
        topic: String,
        /// Language code for the course content
        #[arg(long, default_value = "pt")]
        language: String,
        /// Output format (json or text)
        #[arg(long, default_value = "json")]
        format: String,
    },
    /// Inspect the configured provider
    Provider {
        #[command(subcommand)]
        command: ProviderCommands,
    },
}

#[derive(Subcommand)]
pub enum ProviderCommands {
    /// Show endpoint, model, and credential presence (never the credential)
    Status {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}
