use super::error::StoreError;
use crate::recipe::RecipeRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// On-disk form of a normalized recipe collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imported_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub recipes: Vec<RecipeRecord>,
}

impl DatasetFile {
    /// A dataset stamped with the current time
    pub fn new(source: Option<String>, recipes: Vec<RecipeRecord>) -> Self {
        Self {
            imported_at: Some(Utc::now()),
            source,
            recipes,
        }
    }

    pub fn read(path: &Path) -> Result<Self, StoreError> {
        let path_display = path.display().to_string();
        let raw = fs::read_to_string(path).map_err(|source| StoreError::Read {
            path: path_display.clone(),
            source,
        })?;

        serde_json::from_str(&raw).map_err(|source| StoreError::Parse {
            path: path_display,
            source,
        })
    }

    pub fn write(&self, path: &Path) -> Result<(), StoreError> {
        let body = serde_json::to_string_pretty(self).map_err(StoreError::Serialize)?;
        fs::write(path, body).map_err(|source| StoreError::Write {
            path: path.display().to_string(),
            source,
        })
    }
}
