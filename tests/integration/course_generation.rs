//! Course generation against a mock gateway: bounded attempts and fallbacks

use httpmock::prelude::*;
use std::time::Duration;
use tutorgen::config::TutorgenConfig;
use tutorgen::pipeline::{build_fallback_course, CourseTopic, GenerationPipeline, Origin};

use crate::integration::test_utils::{completion_body, config_for, pipeline_for, VALID_COURSE_REPLY};

#[tokio::test]
async fn test_course_from_fenced_provider_reply() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .header("Authorization", "Bearer sk-or-test-key")
                .header_exists("HTTP-Referer")
                .header_exists("X-Title");
            then.status(200).json_body(completion_body(VALID_COURSE_REPLY));
        })
        .await;

    let topic = CourseTopic::new("SQL", "pt").unwrap();
    let outcome = pipeline_for(&server).generate_structured(&topic).await;

    assert_eq!(outcome.origin, Origin::Provider);
    assert_eq!(outcome.reply.title, "SQL na prática");
    assert_eq!(outcome.reply.modules().len(), 2);
    assert_eq!(outcome.reply.language.as_deref(), Some("pt"));
    mock.assert_hits_async(1).await;
}

#[tokio::test]
async fn test_unparseable_replies_stop_after_two_attempts() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200)
                .json_body(completion_body("Claro! Vou montar um ótimo curso para você."));
        })
        .await;

    let topic = CourseTopic::new("Python", "pt").unwrap();
    let outcome = pipeline_for(&server).generate_structured(&topic).await;

    assert_eq!(outcome.origin, Origin::FallbackAfterError);
    assert_eq!(outcome.reply, build_fallback_course("Python", "pt"));
    assert!(outcome.provider_error_detail.is_some());
    mock.assert_hits_async(2).await;
}

#[tokio::test]
async fn test_server_error_goes_straight_to_fallback() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(500).body("upstream exploded");
        })
        .await;

    let topic = CourseTopic::new("Excel", "pt").unwrap();
    let outcome = pipeline_for(&server).generate_structured(&topic).await;

    assert_eq!(outcome.origin, Origin::FallbackAfterError);
    assert_eq!(outcome.reply.modules().len(), 4);
    mock.assert_hits_async(1).await;
}

#[tokio::test]
async fn test_unauthorized_yields_fallback_with_detail() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(401).body("No auth credentials found");
        })
        .await;

    let topic = CourseTopic::new("Redes", "pt").unwrap();
    let payload = pipeline_for(&server)
        .generate_structured(&topic)
        .await
        .into_payload("course");

    assert_eq!(payload["origin"], "fallback_after_error");
    assert!(payload["error"].as_str().unwrap().contains("No auth credentials"));
    assert_eq!(payload["course"]["title"], "Curso de Redes");
}

#[tokio::test]
async fn test_slow_provider_times_out_to_fallback() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200)
                .delay(Duration::from_secs(3))
                .json_body(completion_body(VALID_COURSE_REPLY));
        })
        .await;

    let mut config = config_for(&server);
    config.provider.request_timeout_secs = 1;
    let pipeline = GenerationPipeline::new(&config).unwrap();

    let topic = CourseTopic::new("Git", "en").unwrap();
    let outcome = pipeline.generate_structured(&topic).await;

    assert_eq!(outcome.origin, Origin::FallbackAfterError);
    assert_eq!(outcome.reply.title, "Git Course");
}

#[tokio::test]
async fn test_without_credential_no_request_is_made() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).json_body(completion_body(VALID_COURSE_REPLY));
        })
        .await;

    let mut config: TutorgenConfig = config_for(&server);
    config.provider.api_key = None;
    let pipeline = GenerationPipeline::new(&config).unwrap();

    let topic = CourseTopic::new("Python", "pt").unwrap();
    let outcome = pipeline.generate_structured(&topic).await;

    assert_eq!(outcome.origin, Origin::Fallback);
    assert!(outcome.provider_error_detail.is_none());
    mock.assert_hits_async(0).await;
}
