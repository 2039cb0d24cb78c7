//! Fill the process environment from a project `.env` and `$XDG_CONFIG_HOME/<app>/config.toml`.
//!
//! Priority per key: **existing env > .env > XDG**. Nothing already set is overwritten,
//! so a caller's shell always wins over files.

mod dotenv;
mod xdg_toml;

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use thiserror::Error;

pub use xdg_toml::config_path;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("no config directory for this platform")]
    XdgPath,
    #[error("read xdg config: {0}")]
    XdgRead(std::io::Error),
    #[error("parse xdg toml: {0}")]
    XdgParse(#[from] toml::de::Error),
    #[error("read .env: {0}")]
    DotenvRead(std::io::Error),
}

/// File a key's value was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Dotenv,
    Xdg,
}

/// One environment variable set by [`load_and_apply`]. Values are not kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    pub key: String,
    pub source: Source,
}

/// Reads both files and sets every key that is not already in the environment.
///
/// * `app_name`: XDG directory name, e.g. `"casescout"` for `~/.config/casescout/config.toml`.
/// * `override_dir`: directory holding `.env`; defaults to the current directory.
///
/// Missing files are not an error. Returns the applied keys sorted by name.
pub fn load_and_apply(app_name: &str, override_dir: Option<&Path>) -> Result<Vec<Applied>, LoadError> {
    let xdg = match config_path(app_name)? {
        Some(path) => xdg_toml::read_env_table(&path)?,
        None => HashMap::new(),
    };
    let dotenv = dotenv::load_env_map(override_dir).map_err(LoadError::DotenvRead)?;
    Ok(apply(&dotenv, &xdg, |key| std::env::var_os(key).is_some()))
}

/// Sets each key from `dotenv` or `xdg` for which `is_set` is false.
fn apply(
    dotenv: &HashMap<String, String>,
    xdg: &HashMap<String, String>,
    is_set: impl Fn(&str) -> bool,
) -> Vec<Applied> {
    let keys: BTreeSet<&String> = dotenv.keys().chain(xdg.keys()).collect();
    let mut applied = Vec::new();
    for key in keys {
        if is_set(key) {
            continue;
        }
        let (value, source) = match (dotenv.get(key), xdg.get(key)) {
            (Some(v), _) => (v, Source::Dotenv),
            (None, Some(v)) => (v, Source::Xdg),
            (None, None) => continue,
        };
        std::env::set_var(key, value);
        applied.push(Applied {
            key: key.clone(),
            source,
        });
    }
    applied
}
