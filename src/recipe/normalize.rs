use regex::Regex;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Leading decimal number of a string, e.g. `"45 mins"` -> `45`
static LEADING_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?")
        .expect("valid leading number regex")
});

/// Placeholders the source data uses for missing values
const MISSING_MARKERS: [&str; 2] = ["NaN", "null"];

pub(crate) fn is_present(text: &str) -> bool {
    !text.is_empty() && !MISSING_MARKERS.contains(&text)
}

/// Clean a raw numeric value.
///
/// Accepts JSON numbers and strings starting with a number; anything else,
/// including non-finite values, is absent.
pub fn clean_number(value: Option<&Value>) -> Option<f64> {
    let number = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let s = s.trim();
            if !is_present(s) {
                return None;
            }
            LEADING_NUMBER_RE
                .find(s)
                .and_then(|m| m.as_str().parse::<f64>().ok())
        }
        _ => None,
    }?;

    number.is_finite().then_some(number)
}

/// Clean a raw string value: trimmed, never empty, never a missing marker
pub fn clean_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => {
            let s = s.trim();
            is_present(s).then(|| s.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Clean a raw list of strings, dropping blank entries
pub fn clean_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_str())
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

/// Clean a raw nutrient map; an empty result is absent
pub fn clean_nutrients(value: Option<&Value>) -> Option<BTreeMap<String, String>> {
    let Some(Value::Object(map)) = value else {
        return None;
    };

    let cleaned: BTreeMap<String, String> = map
        .iter()
        .filter_map(|(name, amount)| clean_text(Some(amount)).map(|a| (name.clone(), a)))
        .collect();

    (!cleaned.is_empty()).then_some(cleaned)
}
