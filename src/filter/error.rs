use super::parser::FilterField;
use thiserror::Error;

/// Errors raised by the operator grammar for a single `[op]<number>` token
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GrammarError {
    #[error(
        "Invalid operator expression: '{0}'. Expected [op]<number> where op is one of =, >, <, >=, <="
    )]
    InvalidOperatorExpression(String),
}

/// Errors that can occur when parsing or compiling recipe filters
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterParseError {
    #[error(
        "Unknown filter field: '{0}'. Valid fields are: title, cuisine, calories, total_time, rating"
    )]
    UnknownField(String),

    #[error("Invalid {field} filter: {source}")]
    InvalidFilterSyntax {
        field: FilterField,
        #[source]
        source: GrammarError,
    },

    #[error("Filter field '{0}' was given more than once")]
    DuplicateField(FilterField),
}
