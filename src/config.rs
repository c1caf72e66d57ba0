use crate::paginate::PageRequest;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("Invalid config file '{path}': paging.default_limit must be between 1 and 100, got {value}")]
    InvalidDefaultLimit { path: String, value: u32 },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    pub dataset: DatasetRules,
    pub paging: PagingRules,
    pub display: DisplayRules,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetRules {
    /// Dataset used when none is given on the command line
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagingRules {
    pub default_limit: u32,
}

impl Default for PagingRules {
    fn default() -> Self {
        Self {
            default_limit: PageRequest::DEFAULT_LIMIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayRules {
    /// Titles longer than this are truncated in tables
    pub title_width: usize,
}

impl Default for DisplayRules {
    fn default() -> Self {
        Self { title_width: 40 }
    }
}

pub fn load_config(path: Option<&Path>) -> Result<BrowserConfig, ConfigError> {
    if let Some(path) = path {
        load_config_from_path(path)
    } else {
        Ok(default_config().clone())
    }
}

pub fn load_config_from_path(path: &Path) -> Result<BrowserConfig, ConfigError> {
    let path_display = path.display().to_string();
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path_display.clone(),
        source,
    })?;

    let config = toml::from_str::<BrowserConfig>(&raw).map_err(|source| ConfigError::Parse {
        path: path_display.clone(),
        source,
    })?;

    let limit = config.paging.default_limit;
    if !(PageRequest::MIN_LIMIT..=PageRequest::MAX_LIMIT).contains(&limit) {
        return Err(ConfigError::InvalidDefaultLimit {
            path: path_display,
            value: limit,
        });
    }

    Ok(config)
}

pub fn default_config() -> &'static BrowserConfig {
    static DEFAULT_CONFIG: LazyLock<BrowserConfig> = LazyLock::new(BrowserConfig::default);
    &DEFAULT_CONFIG
}
