//! tutorgen: Resilient Course and Mentor Generation
//!
//! Calls an OpenAI-compatible LLM gateway for mentor replies and course outlines,
//! repairs what comes back, and substitutes deterministic local content whenever the
//! provider is missing or misbehaves. Callers always receive a well-formed result.

pub mod cli;
pub mod config;
pub mod course;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod provider;
