//! Recipe filter parsing and predicate compilation
//!
//! Each filterable field takes one raw token. Tokens are parsed into typed
//! [`FilterExpression`]s and compiled into a single [`CompositePredicate`]
//! where every clause must hold.
//!
//! # Fields
//!
//! - `title` - case-insensitive substring
//! - `cuisine` - exact, case-sensitive match
//! - `rating`, `total_time`, `calories` - numeric comparison `[op]<number>`
//!
//! # Examples
//!
//! ```text
//! title=pie                 titles containing "pie", "Pie", "PIE", ...
//! cuisine=Southern Recipes  exactly that cuisine
//! rating=>=4                rated 4 or higher
//! total_time=<=30           ready in half an hour or less
//! calories=500              exactly 500 calories
//! ```
//!
//! An empty `title` or `cuisine` token means the field is not filtered. An
//! empty or otherwise malformed numeric token is always an error, never
//! silently ignored.

pub mod compiler;
pub mod error;
pub mod grammar;
pub mod parser;

pub use compiler::{Clause, CompositePredicate};
pub use error::{FilterParseError, GrammarError};
pub use grammar::{Comparison, ComparisonOp};
pub use parser::{ExactField, FilterExpression, FilterField, NumericField, TextField};
