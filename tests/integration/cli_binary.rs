//! End-to-end runs of the tutorgen binary in no-credential mode

use serde_json::Value;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run_tutorgen(args: &[&str]) -> (TempDir, Output) {
    let home = TempDir::new().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_tutorgen"))
        .args(["--quiet"])
        .args(args)
        .current_dir(home.path())
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env_remove("OPENROUTER_API_KEY")
        .env_remove("OPENAI_API_KEY")
        .env_remove("TUTORGEN__PROVIDER__API_KEY")
        .output()
        .expect("failed to run tutorgen");
    (home, output)
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

#[test]
fn test_course_without_credential_prints_fallback() {
    let (_home, output) = run_tutorgen(&["course", "Python"]);
    assert!(output.status.success());

    let payload = stdout_json(&output);
    assert_eq!(payload["origin"], "fallback");
    assert!(payload.get("error").is_none());
    assert_eq!(payload["course"]["title"], "Curso de Python");
    assert_eq!(payload["course"]["content"]["modules"].as_array().unwrap().len(), 4);
}

#[test]
fn test_ask_without_credential_prints_tips() {
    let (_home, output) = run_tutorgen(&["ask", "Como", "estudar", "SQL?"]);
    assert!(output.status.success());

    let payload = stdout_json(&output);
    assert_eq!(payload["origin"], "fallback");
    let reply = payload["reply"].as_str().unwrap();
    assert!(reply.starts_with("Sobre \"Como estudar SQL?\""));
    assert_eq!(reply.lines().filter(|l| l.starts_with("- ")).count(), 3);
}

#[test]
fn test_blank_question_is_invalid_input() {
    let (_home, output) = run_tutorgen(&["ask", "   "]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error: Mensagem vazia"));
}

#[test]
fn test_blank_topic_is_invalid_input() {
    let (_home, output) = run_tutorgen(&["course", " "]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error: Tópico vazio"));
}

#[test]
fn test_provider_status_never_prints_credential() {
    let home = TempDir::new().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_tutorgen"))
        .args(["--quiet", "provider", "status", "--format", "json"])
        .current_dir(home.path())
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env("OPENROUTER_API_KEY", "sk-or-very-secret")
        .output()
        .expect("failed to run tutorgen");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("sk-or-very-secret"));
    let payload: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(payload["credential_present"], true);
}

#[test]
fn test_missing_config_file_fails_before_running() {
    let (_home, output) = run_tutorgen(&["--config", "does-not-exist.toml", "course", "Python"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Config file not found"));
}
