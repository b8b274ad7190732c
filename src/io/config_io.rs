use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::WikiConfig;

pub const CONFIG_FILE_NAME: &str = "gtdwiki.toml";

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Walk up from `start` looking for `gtdwiki.toml`.
pub fn discover_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !current.pop() {
            return None;
        }
    }
}

pub fn load_config(path: &Path) -> Result<WikiConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load the config that applies to a document: the explicit path if given,
/// otherwise the nearest `gtdwiki.toml` above the document, otherwise
/// defaults.
pub fn resolve_config(explicit: Option<&Path>, document: &Path) -> Result<WikiConfig, ConfigError> {
    if let Some(path) = explicit {
        return load_config(path);
    }
    let start = document
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .or_else(|| std::env::current_dir().ok());
    match start.and_then(|dir| discover_config(&dir)) {
        Some(path) => {
            log::debug!("using config {}", path.display());
            load_config(&path)
        }
        None => Ok(WikiConfig::default()),
    }
}
