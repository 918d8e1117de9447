//! Integration tests for the tutorgen generation pipeline

mod cli_binary;
mod config_integration;
mod course_generation;
mod fallback_properties;
mod mentor_chat;
