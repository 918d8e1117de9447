//! Validated caller inputs and the per-call generation request.

use crate::course::StructuredOutput;
use crate::error::ApiError;
use crate::provider::{ChatMessage, CompletionOptions};

/// Persona for the mentor chat. The user's message is the only variable input.
pub const MENTOR_SYSTEM_PROMPT: &str = "Você é um mentor de estudos paciente e direto. \
Responda em português do Brasil, em no máximo 6 frases curtas, com passos práticos. \
Não invente links, números ou fatos de que não tenha certeza.";

/// Persona for course generation.
pub const COURSE_SYSTEM_PROMPT: &str = "Você é um designer instrucional. \
Crie cursos curtos, práticos e progressivos para iniciantes.";

/// A course topic with its language code, trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseTopic {
    topic: String,
    language: String,
}

impl CourseTopic {
    /// Blank topics are rejected; a blank language falls back to `pt`.
    pub fn new(topic: &str, language: &str) -> Result<Self, ApiError> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(ApiError::InvalidInput("Tópico vazio".to_string()));
        }
        let language = match language.trim() {
            "" => "pt",
            other => other,
        };
        Ok(Self {
            topic: topic.to_string(),
            language: language.to_string(),
        })
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn language(&self) -> &str {
        &self.language
    }
}

/// A mentor question, trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentorQuestion(String);

impl MentorQuestion {
    pub fn new(message: &str) -> Result<Self, ApiError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(ApiError::InvalidInput("Mensagem vazia".to_string()));
        }
        Ok(Self(message.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Chat,
    StructuredCourse,
}

/// One provider call's worth of input. Built per attempt, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub kind: RequestKind,
    pub system: &'static str,
    pub prompt: String,
    /// Schema instruction appended to the prompt for structured requests
    pub target_schema: Option<&'static str>,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
    /// Request the provider's JSON mode, when it has one
    pub json_mode: bool,
}

impl GenerationRequest {
    pub fn chat(question: &MentorQuestion, temperature: f32, max_tokens: Option<u32>) -> Self {
        Self {
            kind: RequestKind::Chat,
            system: MENTOR_SYSTEM_PROMPT,
            prompt: question.as_str().to_string(),
            target_schema: None,
            temperature,
            max_tokens,
            json_mode: false,
        }
    }

    pub fn structured<T: StructuredOutput>(
        prompt: String,
        temperature: f32,
        max_tokens: Option<u32>,
        json_mode: bool,
    ) -> Self {
        Self {
            kind: RequestKind::StructuredCourse,
            system: COURSE_SYSTEM_PROMPT,
            prompt,
            target_schema: Some(T::schema_hint()),
            temperature,
            max_tokens,
            json_mode,
        }
    }

    /// Role-tagged messages sent to the provider.
    pub fn messages(&self) -> Vec<ChatMessage> {
        let user = match self.target_schema {
            Some(schema) => format!("{}\n\n{}", self.prompt, schema),
            None => self.prompt.clone(),
        };
        vec![ChatMessage::system(self.system), ChatMessage::user(user)]
    }

    pub fn options(&self) -> CompletionOptions {
        CompletionOptions {
            temperature: Some(self.temperature),
            max_tokens: self.max_tokens,
            json_mode: self.json_mode,
        }
    }
}
