//! Comparison operator grammar shared by all numeric range filters
//!
//! ```text
//! token    := [op] number
//! op       := ">=" | "<=" | ">" | "<" | "="      (defaults to "=")
//! number   := digits [ "." digits ]
//! ```
//!
//! Anything that does not match the whole token is rejected.

use super::error::GrammarError;
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

static COMPARISON_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(>=|<=|>|<|=)?([0-9]+(?:\.[0-9]+)?)$").expect("valid comparison regex")
});

/// The closed set of comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOp {
    Eq,
    Gt,
    Lt,
    Ge,
    Le,
}

impl ComparisonOp {
    pub const ALL: [ComparisonOp; 5] = [
        ComparisonOp::Eq,
        ComparisonOp::Gt,
        ComparisonOp::Lt,
        ComparisonOp::Ge,
        ComparisonOp::Le,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            ComparisonOp::Eq => "=",
            ComparisonOp::Gt => ">",
            ComparisonOp::Lt => "<",
            ComparisonOp::Ge => ">=",
            ComparisonOp::Le => "<=",
        }
    }

    fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }

    /// Evaluate `lhs op rhs`. Equality is exact, with no tolerance.
    pub fn holds(&self, lhs: f64, rhs: f64) -> bool {
        match lhs.partial_cmp(&rhs) {
            None => false,
            Some(ordering) => match self {
                ComparisonOp::Eq => ordering == Ordering::Equal,
                ComparisonOp::Gt => ordering == Ordering::Greater,
                ComparisonOp::Lt => ordering == Ordering::Less,
                ComparisonOp::Ge => ordering != Ordering::Less,
                ComparisonOp::Le => ordering != Ordering::Greater,
            },
        }
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A parsed `[op]<number>` token
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Comparison {
    pub op: ComparisonOp,
    pub value: f64,
}

impl Comparison {
    /// Parse a single filter token such as `">=120"` or `"4.5"`
    pub fn parse(token: &str) -> Result<Self, GrammarError> {
        let invalid = || GrammarError::InvalidOperatorExpression(token.to_string());

        let captures = COMPARISON_RE.captures(token).ok_or_else(invalid)?;
        let op = match captures.get(1) {
            Some(m) => ComparisonOp::from_symbol(m.as_str()).ok_or_else(invalid)?,
            None => ComparisonOp::Eq,
        };
        let value: f64 = captures[2].parse().map_err(|_| invalid())?;

        // A long enough digit run overflows to infinity
        if !value.is_finite() {
            return Err(invalid());
        }

        Ok(Comparison { op, value })
    }

    pub fn matches(&self, candidate: f64) -> bool {
        self.op.holds(candidate, self.value)
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.op, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_each_operator() {
        let cases = [
            (">=120", ComparisonOp::Ge, 120.0),
            ("<=30", ComparisonOp::Le, 30.0),
            (">4", ComparisonOp::Gt, 4.0),
            ("<2.5", ComparisonOp::Lt, 2.5),
            ("=500", ComparisonOp::Eq, 500.0),
        ];
        for (token, op, value) in cases {
            let parsed = Comparison::parse(token).unwrap();
            assert_eq!(parsed.op, op, "operator for {token}");
            assert_eq!(parsed.value, value, "value for {token}");
        }
    }

    #[test]
    fn test_missing_operator_defaults_to_equality() {
        let parsed = Comparison::parse("42").unwrap();
        assert_eq!(parsed.op, ComparisonOp::Eq);
        assert_eq!(parsed.value, 42.0);
    }

    #[test]
    fn test_malformed_tokens_are_rejected() {
        for token in [
            "", "abc", ">=", "=>5", "==5", "> 5", " 5", "5 ", "-3", "+3", "1.", ".5", "1e3", "5kcal",
            "<>5", "٣",
        ] {
            assert_eq!(
                Comparison::parse(token),
                Err(GrammarError::InvalidOperatorExpression(token.to_string())),
                "token {token:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_overflowing_number_is_rejected() {
        let token = "9".repeat(400);
        assert!(Comparison::parse(&token).is_err());
    }

    #[test]
    fn test_operator_semantics() {
        assert!(ComparisonOp::Eq.holds(4.0, 4.0));
        assert!(!ComparisonOp::Eq.holds(4.000001, 4.0));
        assert!(ComparisonOp::Ge.holds(4.0, 4.0));
        assert!(ComparisonOp::Ge.holds(4.5, 4.0));
        assert!(!ComparisonOp::Gt.holds(4.0, 4.0));
        assert!(ComparisonOp::Le.holds(30.0, 30.0));
        assert!(!ComparisonOp::Lt.holds(30.0, 30.0));
        assert!(!ComparisonOp::Eq.holds(f64::NAN, f64::NAN));
    }

    #[test]
    fn test_display_round_trips_symbol() {
        assert_eq!(Comparison::parse(">=120").unwrap().to_string(), ">=120");
        assert_eq!(Comparison::parse("2.5").unwrap().to_string(), "=2.5");
    }
}
