//! Course schema produced by structured generation.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A schema a provider reply can be extracted into.
///
/// The hint is embedded verbatim in the prompt because the provider cannot be
/// relied on to enforce a schema natively.
pub trait StructuredOutput: DeserializeOwned {
    /// Short name used in diagnostics.
    const SCHEMA_NAME: &'static str;

    /// Prompt text describing the exact JSON shape expected.
    fn schema_hint() -> &'static str;

    /// Minimum shape a parsed value must have to be accepted.
    fn has_required_shape(&self) -> bool;
}

/// Generated course: a title and an ordered list of modules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredCourse {
    #[serde(default)]
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    pub content: CourseContent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseContent {
    pub modules: Vec<CourseModule>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseModule {
    pub title: String,
    pub text: String,
}

impl CourseModule {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
        }
    }
}

impl StructuredCourse {
    pub fn modules(&self) -> &[CourseModule] {
        &self.content.modules
    }
}

const COURSE_SCHEMA_HINT: &str = r#"Responda SOMENTE com um objeto JSON válido, sem texto antes ou depois, no formato:
{"title": "string", "description": "string", "content": {"modules": [{"title": "string", "text": "string"}]}}"#;

impl StructuredOutput for StructuredCourse {
    const SCHEMA_NAME: &'static str = "course";

    fn schema_hint() -> &'static str {
        COURSE_SCHEMA_HINT
    }

    fn has_required_shape(&self) -> bool {
        !self.content.modules.is_empty()
            && self
                .content
                .modules
                .iter()
                .all(|m| !m.title.trim().is_empty() && !m.text.trim().is_empty())
    }
}
