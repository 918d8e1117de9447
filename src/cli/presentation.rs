//! Presentation: text and JSON formatters for command results.

use crate::config::ProviderSettings;
use crate::course::StructuredCourse;
use crate::error::ApiError;
use crate::pipeline::{GenerationOutcome, Origin};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use serde::Serialize;

/// Provider status as shown by `provider status`.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderStatus {
    pub base_url: String,
    pub model: String,
    pub credential_present: bool,
    pub credential_len: usize,
    pub request_timeout_secs: u64,
    pub mode: &'static str,
}

impl ProviderStatus {
    pub fn from_settings(settings: &ProviderSettings) -> Self {
        Self {
            base_url: settings.base_url.clone(),
            model: settings.model.clone(),
            credential_present: settings.has_credential(),
            credential_len: settings.credential_len(),
            request_timeout_secs: settings.request_timeout_secs,
            mode: if settings.has_credential() {
                "provider"
            } else {
                "fallback-only"
            },
        }
    }
}

pub fn format_provider_status_text(status: &ProviderStatus) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Setting", "Value"]);
    table.add_row(vec!["Base URL".to_string(), status.base_url.clone()]);
    table.add_row(vec!["Model".to_string(), status.model.clone()]);
    table.add_row(vec![
        "Credential".to_string(),
        if status.credential_present {
            format!("present ({} chars)", status.credential_len)
        } else {
            "absent".to_string()
        },
    ]);
    table.add_row(vec![
        "Timeout".to_string(),
        format!("{}s", status.request_timeout_secs),
    ]);
    table.add_row(vec!["Mode".to_string(), status.mode.to_string()]);
    table.to_string()
}

pub fn format_provider_status_json(status: &ProviderStatus) -> Result<String, ApiError> {
    Ok(serde_json::to_string_pretty(status)?)
}

fn origin_note(origin: Origin) -> &'static str {
    match origin {
        Origin::Provider => "",
        Origin::Fallback => "\n\n(conteúdo local: provedor não configurado)",
        Origin::FallbackAfterError => "\n\n(conteúdo local: provedor indisponível)",
    }
}

pub fn format_chat_text(outcome: &GenerationOutcome<String>) -> String {
    format!("{}{}", outcome.reply, origin_note(outcome.origin))
}

pub fn format_course_text(outcome: &GenerationOutcome<StructuredCourse>) -> String {
    let course = &outcome.reply;
    let mut out = course.title.clone();
    if let Some(ref description) = course.description {
        out.push_str(&format!("\n{}", description));
    }
    for (i, module) in course.modules().iter().enumerate() {
        out.push_str(&format!("\n\n{}. {}\n{}", i + 1, module.title, module.text));
    }
    out.push_str(origin_note(outcome.origin));
    out
}
