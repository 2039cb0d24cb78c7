//! `[env]` table of `$XDG_CONFIG_HOME/<app>/config.toml`.
//!
//! ```toml
//! [env]
//! TAVILY_API_KEY = "tvly-..."
//! OPENAI_MODEL = "gpt-4"
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::LoadError;

/// Config base directory: `$XDG_CONFIG_HOME` when set and non-empty, else the platform default.
fn config_home() -> Option<PathBuf> {
    std::env::var_os("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::config_dir)
}

/// Path of `<config home>/<app_name>/config.toml`, or `None` when the file does not exist.
pub fn config_path(app_name: &str) -> Result<Option<PathBuf>, LoadError> {
    let home = config_home().ok_or(LoadError::XdgPath)?;
    Ok(existing_file(home.join(app_name).join("config.toml")))
}

fn existing_file(path: PathBuf) -> Option<PathBuf> {
    path.is_file().then_some(path)
}

#[derive(serde::Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    env: HashMap<String, String>,
}

/// Reads the `[env]` table from `path`. A file without the table yields an empty map.
pub(crate) fn read_env_table(path: &Path) -> Result<HashMap<String, String>, LoadError> {
    let content = std::fs::read_to_string(path).map_err(LoadError::XdgRead)?;
    let config: ConfigFile = toml::from_str(&content)?;
    Ok(config.env)
}
