pub mod persist;
mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Environment variable that overrides `omdb.api_key`.
pub const API_KEY_ENV: &str = "OMDB_API_KEY";

/// Default locations searched when no config path is given, in order.
pub const DEFAULT_CONFIG_PATHS: [&str; 2] = ["./movielst.toml", "~/.config/movielst/config.toml"];

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    prepare(&mut config, std::env::var(API_KEY_ENV).ok());
    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    for path_str in DEFAULT_CONFIG_PATHS {
        let path = expand_path(Path::new(path_str));
        if path.exists() {
            tracing::debug!(path = %path.display(), "Using config file");
            return load_config(&path);
        }
    }

    let mut config = Config::default();
    prepare(&mut config, std::env::var(API_KEY_ENV).ok());
    Ok(config)
}

/// Where `init-config` writes when no path is given.
pub fn default_config_path() -> PathBuf {
    expand_path(Path::new(DEFAULT_CONFIG_PATHS[1]))
}

/// Expand a leading `~` in a path.
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    PathBuf::from(shellexpand::tilde(raw.as_ref()).as_ref())
}

fn prepare(config: &mut Config, env_api_key: Option<String>) {
    if let Some(key) = env_api_key.filter(|k| !k.trim().is_empty()) {
        config.omdb.api_key = key;
    }
    config.index.location = expand_path(&config.index.location);
}
