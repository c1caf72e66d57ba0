//! Cleaning of raw recipe dumps into normalized dataset files
//!
//! The raw dump is a JSON object keyed by source id. Values use `"NaN"` and
//! `"null"` strings (or bare `NaN` literals) for missing data, numbers stored
//! as strings, and legacy field names. Entries that cannot become a valid
//! recipe are skipped and counted.

use crate::recipe::{RecipeId, RecipeRecord};
use crate::store::{DatasetFile, StoreError};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Failed to read raw dataset '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse raw dataset '{path}': {message}")]
    Parse { path: String, message: String },
    #[error("Raw dataset '{0}' must be a JSON object keyed by recipe id")]
    NotAnObject(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Outcome of cleaning one raw dump
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    pub recipes: Vec<RecipeRecord>,
    pub processed: usize,
    pub skipped: usize,
}

impl ImportReport {
    pub fn summary(&self) -> String {
        format!(
            "Imported {} recipes ({} skipped)",
            self.processed, self.skipped
        )
    }
}

/// Parse raw dump text, accepting JSON5 (bare `NaN`) when strict JSON fails
pub fn parse_raw_dataset(text: &str) -> Result<Value, String> {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => Ok(value),
        Err(strict_err) => json5::from_str::<Value>(text)
            .map_err(|lenient_err| format!("{strict_err} (JSON5 fallback: {lenient_err})")),
    }
}

/// Numeric keys in numeric order, then everything else lexicographically
fn compare_source_keys(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(a), Ok(b)) => a.cmp(&b),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// Clean every raw entry.
///
/// Ids are the 1-based position of each source key in key order, so the
/// same dump always yields the same ids.
pub fn clean_raw_recipes(raw: &Map<String, Value>, progress: Option<&ProgressBar>) -> ImportReport {
    let mut keys: Vec<&String> = raw.keys().collect();
    keys.sort_by(|a, b| compare_source_keys(a, b));

    let mut report = ImportReport::default();
    for (position, key) in keys.into_iter().enumerate() {
        let id = RecipeId(position as u64 + 1);
        match RecipeRecord::from_raw(id, key, &raw[key.as_str()]) {
            Ok(record) => {
                report.recipes.push(record);
                report.processed += 1;
            }
            Err(err) => {
                warn!("Skipping raw recipe: {err}");
                report.skipped += 1;
            }
        }
        if let Some(pb) = progress {
            pb.inc(1);
        }
    }

    report
}

fn create_progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .expect("valid progress bar template")
            .progress_chars("#>-"),
    );
    pb.set_message("recipes");
    pb
}

/// Read and clean a raw dump from disk
pub fn import_file(path: &Path, show_progress: bool) -> Result<ImportReport, ImportError> {
    let path_display = path.display().to_string();
    let text = fs::read_to_string(path).map_err(|source| ImportError::Read {
        path: path_display.clone(),
        source,
    })?;

    let value = parse_raw_dataset(&text).map_err(|message| ImportError::Parse {
        path: path_display.clone(),
        message,
    })?;
    let Value::Object(raw) = value else {
        return Err(ImportError::NotAnObject(path_display));
    };
    info!("Loaded {} raw recipes from {}", raw.len(), path_display);

    let progress = show_progress.then(|| create_progress_bar(raw.len() as u64));
    let report = clean_raw_recipes(&raw, progress.as_ref());
    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    info!("{}", report.summary());
    Ok(report)
}

/// Import `source` and write the normalized dataset to `destination`
pub fn import_to_dataset(
    source: &Path,
    destination: &Path,
    show_progress: bool,
) -> Result<ImportReport, ImportError> {
    let report = import_file(source, show_progress)?;
    let dataset = DatasetFile::new(
        Some(source.display().to_string()),
        report.recipes.clone(),
    );
    dataset.write(destination)?;
    Ok(report)
}
