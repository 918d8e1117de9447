//! tutorgen CLI Binary
//!
//! Command-line front end for the course and mentor generation pipeline.

use clap::Parser;
use std::process;
use tracing::{error, info};
use tutorgen::cli::{Cli, RunContext};
use tutorgen::logging::{init_logging, LoggingConfig};

#[tokio::main]
async fn main() {
    // A missing .env is normal outside development.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Logging is not up yet, so a bad config can only be reported on stderr.
    let config = match RunContext::load_config(&cli.workspace, cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", tutorgen::cli::map_error(&e));
            process::exit(1);
        }
    };

    let logging_config = build_logging_config(&cli, config.logging.clone());
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("tutorgen starting");

    let context = match RunContext::from_config(config) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Error building generation pipeline: {}", e);
            eprintln!("{}", tutorgen::cli::map_error(&e));
            process::exit(1);
        }
    };

    match context.execute(&cli.command).await {
        Ok(output) => println!("{}", output),
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", tutorgen::cli::map_error(&e));
            process::exit(1);
        }
    }
}

/// Apply CLI logging flags on top of the loaded logging section.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli, mut config: LoggingConfig) -> LoggingConfig {

    if cli.quiet {
        config.enabled = false;
    }
    if cli.verbose {
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.file = Some(file.clone());
    }

    config
}
