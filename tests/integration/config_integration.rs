//! Layered configuration loading from workspace files and the environment

use tempfile::TempDir;
use tutorgen::config::{ConfigLoader, EnvOverrides, DEFAULT_MODEL};
use tutorgen::pipeline::GenerationPipeline;

use crate::integration::test_utils::ENV_MUTEX;

fn write_workspace_file(dir: &TempDir, name: &str, contents: &str) {
    let config_dir = dir.path().join("config");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join(name), contents).unwrap();
}

#[test]
fn test_environment_file_overrides_base_file() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    std::env::remove_var("TUTORGEN_ENV");

    let temp_dir = TempDir::new().unwrap();
    write_workspace_file(
        &temp_dir,
        "config.toml",
        r#"
[provider]
model = "base-model"

[generation]
max_tokens = 900
"#,
    );
    write_workspace_file(
        &temp_dir,
        "development.toml",
        r#"
[provider]
model = "dev-model"
"#,
    );

    let config = ConfigLoader::load_with(temp_dir.path(), &EnvOverrides::default()).unwrap();
    assert_eq!(config.provider.model, "dev-model");
    assert_eq!(config.generation.max_tokens, 900);
}

#[test]
fn test_prefixed_env_vars_override_files() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());

    let temp_dir = TempDir::new().unwrap();
    write_workspace_file(
        &temp_dir,
        "config.toml",
        r#"
[generation]
max_tokens = 900
"#,
    );

    std::env::set_var("TUTORGEN__GENERATION__MAX_TOKENS", "321");
    let result = ConfigLoader::load_with(temp_dir.path(), &EnvOverrides::default());
    std::env::remove_var("TUTORGEN__GENERATION__MAX_TOKENS");

    assert_eq!(result.unwrap().generation.max_tokens, 321);
}

#[test]
fn test_well_known_provider_vars_are_read() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());

    std::env::remove_var("OPENROUTER_API_KEY");
    std::env::set_var("OPENAI_API_KEY", "sk-openai-fallback");
    std::env::set_var("OPENROUTER_MODEL", "  ");
    let overrides = EnvOverrides::from_process_env();
    std::env::remove_var("OPENAI_API_KEY");
    std::env::remove_var("OPENROUTER_MODEL");

    assert_eq!(overrides.api_key.as_deref(), Some("sk-openai-fallback"));
    assert!(overrides.model.is_none());
}

#[test]
fn test_file_without_credential_builds_fallback_pipeline() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());

    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("tutorgen.toml");
    std::fs::write(
        &config_file,
        r#"
[provider]
api_key = ""
"#,
    )
    .unwrap();

    let config = ConfigLoader::load_from_file_with(&config_file, &EnvOverrides::default()).unwrap();
    assert_eq!(config.provider.model, DEFAULT_MODEL);
    assert!(!config.provider.has_credential());

    let pipeline = GenerationPipeline::new(&config).unwrap();
    assert!(!pipeline.has_provider());
}

#[test]
fn test_invalid_temperature_is_rejected() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());

    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("tutorgen.toml");
    std::fs::write(
        &config_file,
        r#"
[generation]
chat_temperature = 3.5
"#,
    )
    .unwrap();

    let err = ConfigLoader::load_from_file_with(&config_file, &EnvOverrides::default())
        .unwrap_err();
    assert!(err.to_string().contains("chat_temperature"));
}
