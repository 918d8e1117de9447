//! Mentor chat against a mock gateway

use httpmock::prelude::*;
use tutorgen::pipeline::{MentorQuestion, Origin, FALLBACK_TIPS};

use crate::integration::test_utils::{completion_body, pipeline_for};

fn bullet_lines(reply: &str) -> Vec<&str> {
    reply
        .lines()
        .filter_map(|line| line.strip_prefix("- "))
        .collect()
}

#[tokio::test]
async fn test_chat_reply_is_trimmed() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .json_body_partial(r#"{"model": "meta-llama/llama-3.1-8b-instruct:free"}"#);
            then.status(200)
                .json_body(completion_body("\n  Comece pelos fundamentos de SQL.  \n"));
        })
        .await;

    let question = MentorQuestion::new("Como estudar SQL?").unwrap();
    let outcome = pipeline_for(&server).generate_chat_reply(&question).await;

    assert_eq!(outcome.origin, Origin::Provider);
    assert_eq!(outcome.reply, "Comece pelos fundamentos de SQL.");
    mock.assert_hits_async(1).await;
}

#[tokio::test]
async fn test_blank_reply_falls_back_to_tips() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).json_body(completion_body("   "));
        })
        .await;

    let question = MentorQuestion::new("Como estudar SQL?").unwrap();
    let outcome = pipeline_for(&server).generate_chat_reply(&question).await;

    assert_eq!(outcome.origin, Origin::FallbackAfterError);
    assert!(outcome.reply.starts_with("Sobre \"Como estudar SQL?\""));
    let tips = bullet_lines(&outcome.reply);
    assert_eq!(tips.len(), 3);
    assert!(tips.iter().all(|tip| FALLBACK_TIPS.contains(tip)));
    mock.assert_hits_async(1).await;
}

#[tokio::test]
async fn test_rate_limited_chat_is_not_retried() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(429).body("rate limited");
        })
        .await;

    let question = MentorQuestion::new("Preciso de foco").unwrap();
    let payload = pipeline_for(&server)
        .generate_chat_reply(&question)
        .await
        .into_payload("reply");

    assert_eq!(payload["origin"], "fallback_after_error");
    assert!(payload["reply"].as_str().unwrap().contains("Preciso de foco"));
    assert!(payload.get("error").is_some());
    mock.assert_hits_async(1).await;
}
