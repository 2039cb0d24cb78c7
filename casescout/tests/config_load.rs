//! CaseStudyConfig::load with `.env` and XDG files in temp directories.
//!
//! Mutates process env, so everything runs in one test in this binary.

mod init_logging;

use std::env;

use casescout::{build_case_study_runner, BuildRunnerError, CaseStudyConfig, ConfigError};

const KEYS: &[&str] = &[
    "TAVILY_API_KEY",
    "OPENAI_MODEL",
    "MODEL",
    "OPENAI_BASE_URL",
    "OPENAI_API_BASE",
    "TAVILY_SEARCH_URL",
];

#[test]
fn load_layers_dotenv_over_xdg_and_fails_fast_without_key() {
    let saved: Vec<(&str, Option<String>)> = KEYS.iter().map(|k| (*k, env::var(k).ok())).collect();
    let saved_xdg = env::var_os("XDG_CONFIG_HOME");
    for k in KEYS {
        env::remove_var(k);
    }

    let xdg = tempfile::tempdir().unwrap();
    env::set_var("XDG_CONFIG_HOME", xdg.path());
    let empty = tempfile::tempdir().unwrap();

    // No key anywhere: config fails before any runner exists.
    let missing = CaseStudyConfig::load(Some(empty.path()));
    assert!(matches!(missing, Err(ConfigError::MissingEnv("TAVILY_API_KEY"))));

    let app_dir = xdg.path().join("casescout");
    std::fs::create_dir_all(&app_dir).unwrap();
    std::fs::write(
        app_dir.join("config.toml"),
        "[env]\nTAVILY_API_KEY = \"tvly-from-xdg\"\nOPENAI_MODEL = \"gpt-4o-mini\"\n",
    )
    .unwrap();
    let project = tempfile::tempdir().unwrap();
    std::fs::write(project.path().join(".env"), "TAVILY_API_KEY=tvly-from-dotenv\n").unwrap();

    let config = CaseStudyConfig::load(Some(project.path()));

    for (k, v) in saved {
        match v {
            Some(v) => env::set_var(k, v),
            None => env::remove_var(k),
        }
    }
    match saved_xdg {
        Some(v) => env::set_var("XDG_CONFIG_HOME", v),
        None => env::remove_var("XDG_CONFIG_HOME"),
    }

    let config = config.unwrap();
    assert_eq!(config.tavily_api_key, "tvly-from-dotenv");
    assert_eq!(config.model, "gpt-4o-mini");
    assert_eq!(config.temperature, 0.0);
}

#[test]
fn build_runner_requires_search_key() {
    let err = build_case_study_runner(&CaseStudyConfig::new("")).err();
    assert!(matches!(
        err,
        Some(BuildRunnerError::Config(ConfigError::MissingEnv(_)))
    ));
}
