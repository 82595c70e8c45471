use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_CATALOG_DIR: &str = "catalog";
pub const DEFAULT_OUT_DIR: &str = ".";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read settings {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Optional JSON settings. Command-line flags win over these, these win
/// over the built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub catalog_dir: Option<PathBuf>,
    pub prepared_by: Option<String>,
    pub out_dir: Option<PathBuf>,
    pub default_category: Option<String>,
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    /// `None` path means no settings file was given.
    pub fn load_optional(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                let settings = Self::load(p)?;
                tracing::debug!(path = %p.display(), "settings loaded");
                Ok(settings)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn catalog_dir(&self, flag: Option<&Path>) -> PathBuf {
        flag.map(Path::to_path_buf)
            .or_else(|| self.catalog_dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG_DIR))
    }

    pub fn out_dir(&self, flag: Option<&Path>) -> PathBuf {
        flag.map(Path::to_path_buf)
            .or_else(|| self.out_dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR))
    }

    pub fn category(&self, flag: Option<&str>) -> Option<String> {
        flag.map(str::to_string)
            .or_else(|| self.default_category.clone())
    }

    pub fn prepared_by(&self, flag: Option<&str>) -> String {
        flag.map(str::to_string)
            .or_else(|| self.prepared_by.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/config.rs"]
mod tests;
