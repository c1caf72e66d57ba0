use crate::filter::{ExactField, NumericField, TextField};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;

mod normalize;

pub use normalize::{clean_list, clean_nutrients, clean_number, clean_text};

static EMBEDDED_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+(?:\.[0-9]+)?").expect("valid embedded number regex"));

/// Nutrient name under which the energy amount is stored
pub const CALORIES_KEY: &str = "calories";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("Recipe {0} is not a JSON object")]
    NotAnObject(String),
    #[error("Recipe {0} has no title")]
    MissingTitle(String),
}

/// Stable identity of a recipe, assigned by the store
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct RecipeId(pub u64);

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecipeId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(RecipeId)
    }
}

/// A single recipe.
///
/// Numeric fields are either absent or finite and within their domain
/// (rating in 0..=5, times non-negative minutes). Empty strings, blank list
/// entries and empty nutrient maps are never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeRecord {
    pub id: RecipeId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prep_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cook_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ingredients: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub instructions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrients: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serves: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continent: Option<String>,
}

/// First of `names` present in a raw object
fn first_present<'a>(object: &'a Map<String, Value>, names: &[&str]) -> Option<&'a Value> {
    names.iter().find_map(|name| object.get(*name))
}

impl RecipeRecord {
    /// A record with only its identity and title set
    pub fn new(id: RecipeId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            cuisine: None,
            rating: None,
            prep_time: None,
            cook_time: None,
            total_time: None,
            description: None,
            ingredients: Vec::new(),
            instructions: Vec::new(),
            nutrients: None,
            serves: None,
            url: None,
            country_state: None,
            continent: None,
        }
    }

    /// Build a record from one raw dataset entry, cleaning every field.
    ///
    /// `source_key` only appears in errors.
    pub fn from_raw(id: RecipeId, source_key: &str, raw: &Value) -> Result<Self, RecordError> {
        let object = raw
            .as_object()
            .ok_or_else(|| RecordError::NotAnObject(source_key.to_string()))?;

        let title = clean_text(first_present(object, &["title"]))
            .ok_or_else(|| RecordError::MissingTitle(source_key.to_string()))?;

        let record = Self {
            id,
            title,
            cuisine: clean_text(first_present(object, &["cuisine"])),
            rating: clean_number(first_present(object, &["rating"])),
            prep_time: clean_number(first_present(object, &["prep_time"])),
            cook_time: clean_number(first_present(object, &["cook_time"])),
            total_time: clean_number(first_present(object, &["total_time"])),
            description: clean_text(first_present(object, &["description"])),
            ingredients: clean_list(first_present(object, &["ingredients"])),
            instructions: clean_list(first_present(object, &["instructions"])),
            nutrients: clean_nutrients(first_present(object, &["nutrients"])),
            serves: clean_text(first_present(object, &["serves"])),
            url: clean_text(first_present(object, &["url", "URL"])),
            country_state: clean_text(first_present(object, &["country_state", "Country_State"])),
            continent: clean_text(first_present(object, &["continent", "Contient"])),
        };

        Ok(record.enforce_domains())
    }

    /// Re-apply the record invariants to an already typed record
    pub fn normalized(self) -> Result<Self, RecordError> {
        let trimmed = |value: Option<String>| {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| normalize::is_present(v))
        };
        let list = |values: Vec<String>| {
            values
                .into_iter()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .collect::<Vec<_>>()
        };

        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(RecordError::MissingTitle(self.id.to_string()));
        }

        let nutrients = self.nutrients.map(|map| {
            map.into_iter()
                .filter_map(|(name, amount)| {
                    let amount = amount.trim();
                    normalize::is_present(amount).then(|| (name, amount.to_string()))
                })
                .collect::<BTreeMap<_, _>>()
        });

        let record = Self {
            id: self.id,
            title,
            cuisine: trimmed(self.cuisine),
            rating: self.rating,
            prep_time: self.prep_time,
            cook_time: self.cook_time,
            total_time: self.total_time,
            description: trimmed(self.description),
            ingredients: list(self.ingredients),
            instructions: list(self.instructions),
            nutrients: nutrients.filter(|map| !map.is_empty()),
            serves: trimmed(self.serves),
            url: trimmed(self.url),
            country_state: trimmed(self.country_state),
            continent: trimmed(self.continent),
        };

        Ok(record.enforce_domains())
    }

    fn enforce_domains(mut self) -> Self {
        let within = |value: Option<f64>, min: f64, max: f64| {
            value.filter(|v| v.is_finite() && *v >= min && *v <= max)
        };
        self.rating = within(self.rating, 0.0, 5.0);
        self.prep_time = within(self.prep_time, 0.0, f64::MAX);
        self.cook_time = within(self.cook_time, 0.0, f64::MAX);
        self.total_time = within(self.total_time, 0.0, f64::MAX);
        self
    }

    /// Numeric calories read out of the free-text nutrient amount.
    ///
    /// `"420 kcal"` gives `Some(420.0)`; a missing or number-free amount
    /// gives `None`.
    pub fn calories(&self) -> Option<f64> {
        let amount = self.nutrients.as_ref()?.get(CALORIES_KEY)?;
        EMBEDDED_NUMBER_RE
            .find(amount)
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .filter(|v| v.is_finite())
    }

    pub fn numeric_value(&self, field: NumericField) -> Option<f64> {
        match field {
            NumericField::Rating => self.rating,
            NumericField::TotalTime => self.total_time,
            NumericField::Calories => self.calories(),
        }
    }

    pub fn text_value(&self, field: TextField) -> &str {
        match field {
            TextField::Title => &self.title,
        }
    }

    pub fn exact_value(&self, field: ExactField) -> Option<&str> {
        match field {
            ExactField::Cuisine => self.cuisine.as_deref(),
        }
    }
}
