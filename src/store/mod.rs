//! Query executor boundary
//!
//! The browsing engine talks to storage only through [`QueryExecutor`].
//! [`MemoryStore`] is the executor shipped with the crate; it answers from a
//! normalized dataset file held in memory.

mod dataset;
mod error;
mod memory;

pub use dataset::DatasetFile;
pub use error::{ExecutorError, ExecutorResult, StoreError};
pub use memory::MemoryStore;

use crate::filter::{CompositePredicate, ExactField};
use crate::paginate::{SortKey, Window};
use crate::recipe::{RecipeId, RecipeRecord};
use std::collections::BTreeSet;

/// Storage operations the browsing engine relies on.
///
/// Implementations own scheduling, timeouts and retries; the engine calls
/// these once per request and surfaces any error unchanged.
pub trait QueryExecutor {
    /// Number of records matching `predicate`
    fn count(&self, predicate: &CompositePredicate) -> ExecutorResult<u64>;

    /// Matching records ordered by `sort`, restricted to `window`
    fn fetch(
        &self,
        predicate: &CompositePredicate,
        sort: SortKey,
        window: Window,
    ) -> ExecutorResult<Vec<RecipeRecord>>;

    /// Every distinct non-empty value of `field`
    fn distinct_values(&self, field: ExactField) -> ExecutorResult<BTreeSet<String>>;

    fn find_by_id(&self, id: RecipeId) -> ExecutorResult<Option<RecipeRecord>>;
}
