//! Two-attempt structured course policy.
//!
//! Attempt 1 asks for schema-only output with the provider's JSON mode; attempt 2
//! uses a plainer instruction, no JSON mode, and a higher temperature. A provider
//! error at either attempt, or two unusable replies, ends in the local template.

use crate::course::{StructuredCourse, StructuredOutput};
use crate::error::GenerationFailure;
use crate::pipeline::extract::extract_structured;
use crate::pipeline::fallback::build_fallback_course;
use crate::pipeline::invoke::ProviderResult;
use crate::pipeline::request::{CourseTopic, GenerationRequest};
use crate::pipeline::{CourseOutcome, GenerationOutcome, GenerationPipeline};
use tracing::{info, warn};

fn strict_prompt(topic: &CourseTopic) -> String {
    format!(
        "Crie um curso sobre \"{}\" no idioma \"{}\", com 4 a 6 módulos. \
         Cada módulo precisa de um título e de um texto explicativo de 2 a 4 parágrafos.",
        topic.topic(),
        topic.language()
    )
}

fn plain_prompt(topic: &CourseTopic) -> String {
    format!(
        "Escreva um curso curto sobre \"{}\" (idioma: {}). \
         Devolva apenas JSON com title, description e content.modules, \
         onde cada módulo tem title e text.",
        topic.topic(),
        topic.language()
    )
}

/// Fill fields the provider may omit.
fn complete_course(mut course: StructuredCourse, topic: &CourseTopic) -> StructuredCourse {
    if course.title.trim().is_empty() {
        course.title = topic.topic().to_string();
    }
    if course.language.is_none() {
        course.language = Some(topic.language().to_string());
    }
    course
}

impl GenerationPipeline {
    /// Generate a course for `topic`. Always returns a schema-valid course.
    pub async fn generate_structured(&self, topic: &CourseTopic) -> CourseOutcome {
        let attempts = [
            GenerationRequest::structured::<StructuredCourse>(
                strict_prompt(topic),
                self.settings.course_temperature,
                self.max_tokens(),
                true,
            ),
            GenerationRequest::structured::<StructuredCourse>(
                plain_prompt(topic),
                self.settings.course_retry_temperature,
                self.max_tokens(),
                false,
            ),
        ];

        let mut failure = GenerationFailure::Parse(StructuredCourse::SCHEMA_NAME);
        for (index, request) in attempts.iter().enumerate() {
            let attempt = index + 1;
            match self.invoke(request).await {
                ProviderResult::Completed { raw_text } => {
                    if let Some(course) = extract_structured::<StructuredCourse>(&raw_text) {
                        info!(
                            topic = topic.topic(),
                            attempt,
                            modules = course.modules().len(),
                            "Course generated by provider"
                        );
                        return GenerationOutcome::from_provider(complete_course(course, topic));
                    }
                    warn!(
                        topic = topic.topic(),
                        attempt,
                        reply_len = raw_text.len(),
                        "Provider reply did not contain a usable course"
                    );
                    failure = GenerationFailure::Parse(StructuredCourse::SCHEMA_NAME);
                }
                ProviderResult::Failed(e) => {
                    failure = e;
                    break;
                }
            }
        }

        info!(
            topic = topic.topic(),
            language = topic.language(),
            reason = %failure,
            "Using fallback course"
        );
        GenerationOutcome::from_fallback(
            build_fallback_course(topic.topic(), topic.language()),
            &failure,
        )
    }
}
