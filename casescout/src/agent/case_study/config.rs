//! Run configuration for the case-study pipeline, read from the environment.
//!
//! | Variable | Required | Default |
//! |---|---|---|
//! | `TAVILY_API_KEY` | yes | |
//! | `OPENAI_MODEL` (or `MODEL`) | no | `gpt-4` |
//! | `OPENAI_API_KEY` | no | read by the OpenAI client itself |
//! | `OPENAI_BASE_URL` (or `OPENAI_API_BASE`) | no | OpenAI default |
//! | `TAVILY_SEARCH_URL` | no | `https://api.tavily.com/search` |

use std::path::Path;

use thiserror::Error;
use tracing::debug;

/// Model used when neither `OPENAI_MODEL` nor `MODEL` is set.
pub const DEFAULT_MODEL: &str = "gpt-4";

/// Name of the XDG config directory (`~/.config/casescout/config.toml`).
pub const APP_NAME: &str = "casescout";

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required variable is unset or blank.
    #[error("missing required environment variable {0}")]
    MissingEnv(&'static str),
    #[error("config load failed: {0}")]
    Load(#[from] env_config::LoadError),
}

/// Settings for building the real LLM and search clients.
#[derive(Clone, PartialEq)]
pub struct CaseStudyConfig {
    pub tavily_api_key: String,
    pub model: String,
    /// Sampling temperature; `0.0` for reproducible queries.
    pub temperature: f32,
    pub openai_api_key: Option<String>,
    pub openai_base_url: Option<String>,
    pub tavily_search_url: Option<String>,
}

impl std::fmt::Debug for CaseStudyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaseStudyConfig")
            .field("tavily_api_key", &"***")
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("openai_api_key", &self.openai_api_key.as_ref().map(|_| "***"))
            .field("openai_base_url", &self.openai_base_url)
            .field("tavily_search_url", &self.tavily_search_url)
            .finish()
    }
}

impl CaseStudyConfig {
    /// Config with the given search key and defaults for everything else.
    pub fn new(tavily_api_key: impl Into<String>) -> Self {
        Self {
            tavily_api_key: tavily_api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.0,
            openai_api_key: None,
            openai_base_url: None,
            tavily_search_url: None,
        }
    }

    /// Reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let tavily_api_key = get("TAVILY_API_KEY").ok_or(ConfigError::MissingEnv("TAVILY_API_KEY"))?;
        let mut config = Self::new(tavily_api_key);
        if let Some(model) = get("OPENAI_MODEL").or_else(|| get("MODEL")) {
            config.model = model;
        }
        config.openai_api_key = get("OPENAI_API_KEY");
        config.openai_base_url = get("OPENAI_BASE_URL").or_else(|| get("OPENAI_API_BASE"));
        config.tavily_search_url = get("TAVILY_SEARCH_URL");
        Ok(config)
    }

    /// Applies `.env` and XDG `config.toml` (without overriding set variables), then reads the environment.
    pub fn load(dotenv_dir: Option<&Path>) -> Result<Self, ConfigError> {
        let applied = env_config::load_and_apply(APP_NAME, dotenv_dir)?;
        for a in &applied {
            debug!(key = %a.key, source = ?a.source, "config value applied");
        }
        Self::from_env()
    }
}
