use super::error::FilterParseError;
use super::grammar::{Comparison, ComparisonOp};
use std::fmt;
use std::str::FromStr;

/// Fields a caller may filter recipes by
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterField {
    Title,
    Cuisine,
    Calories,
    TotalTime,
    Rating,
}

impl FromStr for FilterField {
    type Err = FilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "title" => Ok(FilterField::Title),
            "cuisine" => Ok(FilterField::Cuisine),
            "calories" => Ok(FilterField::Calories),
            "total_time" | "totaltime" | "total-time" => Ok(FilterField::TotalTime),
            "rating" => Ok(FilterField::Rating),
            _ => Err(FilterParseError::UnknownField(s.to_string())),
        }
    }
}

impl FilterField {
    pub const ALL: [FilterField; 5] = [
        FilterField::Title,
        FilterField::Cuisine,
        FilterField::Calories,
        FilterField::TotalTime,
        FilterField::Rating,
    ];

    /// Get the canonical name of this field
    pub fn canonical_name(&self) -> &'static str {
        match self {
            FilterField::Title => "title",
            FilterField::Cuisine => "cuisine",
            FilterField::Calories => "calories",
            FilterField::TotalTime => "total_time",
            FilterField::Rating => "rating",
        }
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}

/// Fields matched by case-insensitive substring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    Title,
}

/// Fields matched by case-sensitive equality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExactField {
    Cuisine,
}

/// Fields compared numerically with the operator grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericField {
    Rating,
    TotalTime,
    /// Derived from the free-text `nutrients.calories` amount
    Calories,
}

impl From<TextField> for FilterField {
    fn from(field: TextField) -> Self {
        match field {
            TextField::Title => FilterField::Title,
        }
    }
}

impl From<ExactField> for FilterField {
    fn from(field: ExactField) -> Self {
        match field {
            ExactField::Cuisine => FilterField::Cuisine,
        }
    }
}

impl From<NumericField> for FilterField {
    fn from(field: NumericField) -> Self {
        match field {
            NumericField::Rating => FilterField::Rating,
            NumericField::TotalTime => FilterField::TotalTime,
            NumericField::Calories => FilterField::Calories,
        }
    }
}

/// A single typed filter on one field
#[derive(Debug, Clone, PartialEq)]
pub enum FilterExpression {
    /// Case-insensitive substring match
    Text { field: TextField, needle: String },
    /// Case-sensitive equality
    Exact { field: ExactField, value: String },
    /// `field op value` over a numeric field
    Range {
        field: NumericField,
        comparison: Comparison,
    },
}

impl FilterExpression {
    /// Parse the raw filter token supplied for `field`.
    ///
    /// An empty `title` or `cuisine` token means "no filter" and yields
    /// `Ok(None)`. Range fields reject anything the operator grammar does not
    /// accept, the empty token included.
    pub fn parse(field: FilterField, raw: &str) -> Result<Option<Self>, FilterParseError> {
        let expression = match field {
            FilterField::Title if raw.is_empty() => return Ok(None),
            FilterField::Cuisine if raw.is_empty() => return Ok(None),
            FilterField::Title => FilterExpression::Text {
                field: TextField::Title,
                needle: raw.to_string(),
            },
            FilterField::Cuisine => FilterExpression::Exact {
                field: ExactField::Cuisine,
                value: raw.to_string(),
            },
            FilterField::Calories => Self::range(NumericField::Calories, raw)?,
            FilterField::TotalTime => Self::range(NumericField::TotalTime, raw)?,
            FilterField::Rating => Self::range(NumericField::Rating, raw)?,
        };

        Ok(Some(expression))
    }

    /// Parse a filter given by field name, e.g. `("total_time", "<=30")`
    pub fn parse_named(name: &str, raw: &str) -> Result<Option<Self>, FilterParseError> {
        let field: FilterField = name.parse()?;
        Self::parse(field, raw)
    }

    fn range(field: NumericField, raw: &str) -> Result<Self, FilterParseError> {
        let comparison =
            Comparison::parse(raw).map_err(|source| FilterParseError::InvalidFilterSyntax {
                field: field.into(),
                source,
            })?;
        Ok(FilterExpression::Range { field, comparison })
    }

    pub fn field(&self) -> FilterField {
        match self {
            FilterExpression::Text { field, .. } => (*field).into(),
            FilterExpression::Exact { field, .. } => (*field).into(),
            FilterExpression::Range { field, .. } => (*field).into(),
        }
    }

    /// Operator of a range filter, if this is one
    pub fn operator(&self) -> Option<ComparisonOp> {
        match self {
            FilterExpression::Range { comparison, .. } => Some(comparison.op),
            _ => None,
        }
    }
}

impl fmt::Display for FilterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterExpression::Text { needle, .. } => {
                write!(f, "{} contains {:?} (ignoring case)", self.field(), needle)
            }
            FilterExpression::Exact { value, .. } => write!(f, "{} = {:?}", self.field(), value),
            FilterExpression::Range { comparison, .. } => {
                write!(f, "{} {} {}", self.field(), comparison.op, comparison.value)
            }
        }
    }
}
