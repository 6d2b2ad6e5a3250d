//! Per-column casting rules applied to raw values before display.

use crate::FieldValue;
use chrono::format::{Item, StrftimeItems};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Casting transform for one column.
///
/// In TOML, unit rules are plain strings (`Title = "upper"`) and rules with
/// an argument are inline tables (`Body = { limit_characters = 40 }`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CastRule {
    Upper,
    Lower,
    /// Truncate to this many characters, appending `...` when cut.
    LimitCharacters(usize),
    /// Render truthy values as `Yes` and everything else as `No`.
    BooleanNice,
    /// `strftime` pattern applied to `YYYY-MM-DD` or `YYYY-MM-DD HH:MM:SS` text.
    DateFormat(String),
    DecimalPlaces(usize),
}

impl CastRule {
    pub fn apply(&self, value: &FieldValue) -> FieldValue {
        match self {
            CastRule::Upper => map_text(value, |s| s.to_uppercase()),
            CastRule::Lower => map_text(value, |s| s.to_lowercase()),
            CastRule::LimitCharacters(limit) => map_text(value, |s| limit_characters(s, *limit)),
            CastRule::BooleanNice => {
                FieldValue::text(if value.is_truthy() { "Yes" } else { "No" })
            }
            CastRule::DateFormat(pattern) => format_date(value, pattern),
            CastRule::DecimalPlaces(places) => match value.as_f64() {
                Some(x) => FieldValue::Text(format!("{:.*}", *places, x)),
                None => value.clone(),
            },
        }
    }

    /// Reject rules that could never apply, such as a malformed date pattern.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            CastRule::DateFormat(pattern) => {
                if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
                    Err(format!("invalid date format pattern: {}", pattern))
                } else {
                    Ok(())
                }
            }
            _ => Ok(()),
        }
    }
}

fn map_text(value: &FieldValue, f: impl Fn(&str) -> String) -> FieldValue {
    if value.is_null() {
        return FieldValue::Null;
    }
    FieldValue::Text(f(&value.to_string()))
}

fn limit_characters(s: &str, limit: usize) -> String {
    if s.chars().count() <= limit {
        return s.to_string();
    }
    let mut out: String = s.chars().take(limit).collect();
    out.push_str("...");
    out
}

fn format_date(value: &FieldValue, pattern: &str) -> FieldValue {
    let FieldValue::Text(raw) = value else {
        return value.clone();
    };
    let raw = raw.trim();

    let mut out = String::new();
    let written = if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        write!(out, "{}", date.format(pattern))
    } else if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        write!(out, "{}", datetime.format(pattern))
    } else {
        return value.clone();
    };

    match written {
        Ok(()) => FieldValue::Text(out),
        Err(_) => value.clone(),
    }
}
