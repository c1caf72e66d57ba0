use crate::filter::{CompositePredicate, ExactField, FilterExpression, FilterField, FilterParseError};
use crate::paginate::{PageError, PageRequest, PageResult, SortKey, envelope_of};
use crate::recipe::{RecipeId, RecipeRecord};
use crate::store::{ExecutorError, QueryExecutor};
use thiserror::Error;

/// Broad class of a failed request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input; the caller can fix the request
    Validation,
    NotFound,
    /// Storage failure
    Executor,
}

#[derive(Debug, Error)]
pub enum BrowseError {
    #[error(transparent)]
    Filter(#[from] FilterParseError),

    #[error(transparent)]
    Page(#[from] PageError),

    #[error("Recipe not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Executor(#[from] ExecutorError),
}

impl BrowseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BrowseError::Filter(_) | BrowseError::Page(_) => ErrorKind::Validation,
            BrowseError::NotFound(_) => ErrorKind::NotFound,
            BrowseError::Executor(_) => ErrorKind::Executor,
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.kind() != ErrorKind::Executor
    }
}

/// Raw search input exactly as the caller supplied it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    pub title: Option<String>,
    pub cuisine: Option<String>,
    pub calories: Option<String>,
    pub total_time: Option<String>,
    pub rating: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl SearchParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from query-string style pairs, e.g. `[("rating", ">=4")]`.
    ///
    /// Keys are case-insensitive. A later pair for the same key replaces an
    /// earlier one.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Result<Self, BrowseError>
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let key = key.as_ref();
            let value = Some(value.into());
            match key.to_lowercase().as_str() {
                "page" => params.page = value,
                "limit" => params.limit = value,
                _ => *params.slot_mut(key.parse()?) = value,
            }
        }
        Ok(params)
    }

    pub fn with_filter(mut self, field: FilterField, raw: impl Into<String>) -> Self {
        *self.slot_mut(field) = Some(raw.into());
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page.to_string());
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit.to_string());
        self
    }

    fn slot_mut(&mut self, field: FilterField) -> &mut Option<String> {
        match field {
            FilterField::Title => &mut self.title,
            FilterField::Cuisine => &mut self.cuisine,
            FilterField::Calories => &mut self.calories,
            FilterField::TotalTime => &mut self.total_time,
            FilterField::Rating => &mut self.rating,
        }
    }

    fn slot(&self, field: FilterField) -> Option<&str> {
        match field {
            FilterField::Title => self.title.as_deref(),
            FilterField::Cuisine => self.cuisine.as_deref(),
            FilterField::Calories => self.calories.as_deref(),
            FilterField::TotalTime => self.total_time.as_deref(),
            FilterField::Rating => self.rating.as_deref(),
        }
    }

    /// Parse every supplied filter token.
    ///
    /// A numeric parameter that is present but empty is rejected like any
    /// other malformed token; only an absent parameter leaves a field
    /// unfiltered.
    pub fn filters(&self) -> Result<Vec<FilterExpression>, FilterParseError> {
        let mut expressions = Vec::new();
        for field in FilterField::ALL {
            if let Some(raw) = self.slot(field)
                && let Some(expression) = FilterExpression::parse(field, raw)?
            {
                expressions.push(expression);
            }
        }
        Ok(expressions)
    }

    pub fn page_request(&self, default_limit: u32) -> Result<PageRequest, PageError> {
        PageRequest::from_raw(self.page.as_deref(), self.limit.as_deref(), default_limit)
    }
}

/// Compile the filters of `params` into one predicate
pub fn compile_params(params: &SearchParams) -> Result<CompositePredicate, FilterParseError> {
    CompositePredicate::compile(params.filters()?)
}

/// Run one search.
///
/// All input is validated before the executor is called, so a bad filter
/// or page never reaches storage.
pub fn search<E>(
    executor: &E,
    params: &SearchParams,
    default_limit: u32,
) -> Result<PageResult<RecipeRecord>, BrowseError>
where
    E: QueryExecutor + ?Sized,
{
    let request = params.page_request(default_limit)?;
    let predicate = compile_params(params)?;
    run_query(executor, &predicate, request)
}

/// Execute a compiled predicate for one page
pub fn run_query<E>(
    executor: &E,
    predicate: &CompositePredicate,
    request: PageRequest,
) -> Result<PageResult<RecipeRecord>, BrowseError>
where
    E: QueryExecutor + ?Sized,
{
    let total = executor.count(predicate)?;
    let recipes = executor.fetch(predicate, SortKey::RatingDescIdAsc, request.window())?;

    Ok(PageResult {
        recipes,
        pagination: envelope_of(total, request.page(), request.limit()),
    })
}

/// Every recipe, one page at a time
pub fn list<E>(executor: &E, request: PageRequest) -> Result<PageResult<RecipeRecord>, BrowseError>
where
    E: QueryExecutor + ?Sized,
{
    run_query(executor, &CompositePredicate::universal(), request)
}

/// Look up one recipe by its raw identity string
pub fn get_recipe<E>(executor: &E, raw_id: &str) -> Result<RecipeRecord, BrowseError>
where
    E: QueryExecutor + ?Sized,
{
    let not_found = || BrowseError::NotFound(raw_id.to_string());
    let id: RecipeId = raw_id.parse().map_err(|_| not_found())?;
    executor.find_by_id(id)?.ok_or_else(not_found)
}

/// Sorted list of cuisines for the cuisine filter
pub fn cuisines<E>(executor: &E) -> Result<Vec<String>, BrowseError>
where
    E: QueryExecutor + ?Sized,
{
    Ok(executor
        .distinct_values(ExactField::Cuisine)?
        .into_iter()
        .collect())
}
