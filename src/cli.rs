//! CLI domain: parse, route, output, and presentation only.
//! No generation logic; the route table dispatches to the pipeline.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{Cli, Commands, ProviderCommands};
pub use presentation::{
    format_chat_text, format_course_text, format_provider_status_json,
    format_provider_status_text, ProviderStatus,
};
pub use route::RunContext;
