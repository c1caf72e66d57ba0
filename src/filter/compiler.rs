use super::error::FilterParseError;
use super::grammar::Comparison;
use super::parser::{ExactField, FilterExpression, FilterField, NumericField, TextField};
use crate::recipe::RecipeRecord;
use std::collections::BTreeMap;
use std::fmt;

/// A compiled test on one field of a recipe
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    /// Substring test; `needle` is stored lowercased
    Contains { field: TextField, needle: String },
    Equals { field: ExactField, value: String },
    /// Numeric comparison; a record without a value never matches
    Compare {
        field: NumericField,
        comparison: Comparison,
    },
}

impl Clause {
    fn compile(expression: FilterExpression) -> Self {
        match expression {
            FilterExpression::Text { field, needle } => Clause::Contains {
                field,
                needle: needle.to_lowercase(),
            },
            FilterExpression::Exact { field, value } => Clause::Equals { field, value },
            FilterExpression::Range { field, comparison } => Clause::Compare { field, comparison },
        }
    }

    pub fn field(&self) -> FilterField {
        match self {
            Clause::Contains { field, .. } => (*field).into(),
            Clause::Equals { field, .. } => (*field).into(),
            Clause::Compare { field, .. } => (*field).into(),
        }
    }

    pub fn matches(&self, record: &RecipeRecord) -> bool {
        match self {
            Clause::Contains { field, needle } => {
                record.text_value(*field).to_lowercase().contains(needle)
            }
            Clause::Equals { field, value } => record.exact_value(*field) == Some(value.as_str()),
            Clause::Compare { field, comparison } => record
                .numeric_value(*field)
                .is_some_and(|candidate| comparison.matches(candidate)),
        }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Clause::Contains { needle, .. } => {
                write!(f, "{} contains {:?} (ignoring case)", self.field(), needle)
            }
            Clause::Equals { value, .. } => write!(f, "{} = {:?}", self.field(), value),
            Clause::Compare { comparison, .. } => {
                write!(f, "{} {} {}", self.field(), comparison.op, comparison.value)
            }
        }
    }
}

/// Conjunction of clauses over distinct fields.
///
/// An empty predicate matches every record. Built once per request and
/// never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompositePredicate {
    clauses: BTreeMap<FilterField, Clause>,
}

impl CompositePredicate {
    /// The predicate that matches every record
    pub fn universal() -> Self {
        Self::default()
    }

    /// Combine filters with AND semantics.
    ///
    /// Each field may appear at most once.
    pub fn compile(
        expressions: impl IntoIterator<Item = FilterExpression>,
    ) -> Result<Self, FilterParseError> {
        let mut clauses = BTreeMap::new();
        for expression in expressions {
            let field = expression.field();
            if clauses.contains_key(&field) {
                return Err(FilterParseError::DuplicateField(field));
            }
            clauses.insert(field, Clause::compile(expression));
        }
        Ok(Self { clauses })
    }

    pub fn matches(&self, record: &RecipeRecord) -> bool {
        self.clauses.values().all(|clause| clause.matches(record))
    }

    pub fn is_universal(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn clause(&self, field: FilterField) -> Option<&Clause> {
        self.clauses.get(&field)
    }

    /// Clauses in field order
    pub fn clauses(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.values()
    }
}

impl fmt::Display for CompositePredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_universal() {
            return f.write_str("<all recipes>");
        }
        for (idx, clause) in self.clauses().enumerate() {
            if idx > 0 {
                f.write_str(" AND ")?;
            }
            write!(f, "{clause}")?;
        }
        Ok(())
    }
}
