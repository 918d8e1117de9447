//! Mentor chat policy: exactly one provider attempt, tips on any failure.

use crate::error::GenerationFailure;
use crate::pipeline::invoke::ProviderResult;
use crate::pipeline::request::{GenerationRequest, MentorQuestion};
use crate::pipeline::{ChatOutcome, GenerationOutcome, GenerationPipeline};
use tracing::{debug, info};

impl GenerationPipeline {
    /// Answer a mentor question. Never fails; falls back to canned study tips.
    pub async fn generate_chat_reply(&self, question: &MentorQuestion) -> ChatOutcome {
        let request =
            GenerationRequest::chat(question, self.settings.chat_temperature, self.max_tokens());

        let failure = match self.invoke(&request).await {
            ProviderResult::Completed { raw_text } => {
                let reply = raw_text.trim();
                if !reply.is_empty() {
                    debug!(reply_len = reply.len(), "Mentor reply from provider");
                    return GenerationOutcome::from_provider(reply.to_string());
                }
                GenerationFailure::EmptyReply
            }
            ProviderResult::Failed(e) => e,
        };

        info!(reason = %failure, "Using fallback mentor tips");
        GenerationOutcome::from_fallback(self.fallback_tips(question.as_str()), &failure)
    }
}
