use super::dataset::DatasetFile;
use super::error::{ExecutorResult, StoreError};
use super::QueryExecutor;
use crate::filter::{CompositePredicate, ExactField};
use crate::paginate::{SortKey, Window};
use crate::recipe::{RecipeId, RecipeRecord};
use std::collections::{BTreeSet, HashSet};
use std::path::Path;
use tracing::{debug, info};

/// Query executor over a fully loaded recipe collection
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<RecipeRecord>,
}

impl MemoryStore {
    /// Build a store, normalizing every record and rejecting duplicate ids
    pub fn new(records: impl IntoIterator<Item = RecipeRecord>) -> Result<Self, StoreError> {
        let mut seen = HashSet::new();
        let mut normalized = Vec::new();

        for record in records {
            let record = record.normalized()?;
            if !seen.insert(record.id) {
                return Err(StoreError::DuplicateId(record.id));
            }
            normalized.push(record);
        }
        normalized.sort_by_key(|record| record.id);

        Ok(Self {
            records: normalized,
        })
    }

    /// Load a dataset file written by `import`
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let dataset = DatasetFile::read(path)?;
        let store = Self::new(dataset.recipes)?;
        info!(
            "Loaded {} recipes from {}",
            store.records.len(),
            path.display()
        );
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn matching<'a>(
        &'a self,
        predicate: &'a CompositePredicate,
    ) -> impl Iterator<Item = &'a RecipeRecord> {
        self.records
            .iter()
            .filter(move |record| predicate.matches(record))
    }
}

impl QueryExecutor for MemoryStore {
    fn count(&self, predicate: &CompositePredicate) -> ExecutorResult<u64> {
        Ok(self.matching(predicate).count() as u64)
    }

    fn fetch(
        &self,
        predicate: &CompositePredicate,
        sort: SortKey,
        window: Window,
    ) -> ExecutorResult<Vec<RecipeRecord>> {
        let mut matched: Vec<&RecipeRecord> = self.matching(predicate).collect();
        matched.sort_by(|a, b| sort.compare(a, b));

        let offset = usize::try_from(window.offset).unwrap_or(usize::MAX);
        let count = usize::try_from(window.count).unwrap_or(usize::MAX);
        debug!(
            matched = matched.len(),
            offset, count, "Slicing sorted recipes"
        );

        Ok(matched
            .into_iter()
            .skip(offset)
            .take(count)
            .cloned()
            .collect())
    }

    fn distinct_values(&self, field: ExactField) -> ExecutorResult<BTreeSet<String>> {
        Ok(self
            .records
            .iter()
            .filter_map(|record| record.exact_value(field))
            .map(str::to_string)
            .collect())
    }

    fn find_by_id(&self, id: RecipeId) -> ExecutorResult<Option<RecipeRecord>> {
        Ok(self
            .records
            .binary_search_by_key(&id, |record| record.id)
            .ok()
            .map(|idx| self.records[idx].clone()))
    }
}
