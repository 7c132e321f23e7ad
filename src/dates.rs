//! Ordered date layouts used by the date hypothesis.
//!
//! A layout is either a chrono strftime pattern or the RFC 3339 timestamp
//! grammar. Layouts are data: the classifier only asks whether any of them
//! accepts a value, trying them in list order and stopping at the first match.
//!
//! Pattern layouts are strict: a value matches only if formatting the parsed
//! date with the same pattern reproduces it (ASCII case aside). chrono alone
//! would accept unpadded fields, short years and signs such as `1-2-3`,
//! `12/31/24` or `+2024-01-01`.

use std::fmt::{self, Write as _};

use chrono::{
    DateTime, NaiveDate, NaiveDateTime,
    format::{Item, StrftimeItems},
};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TyperError};

const RFC3339_TOKEN: &str = "rfc3339";

pub const DEFAULT_DATE_PATTERNS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%d-%m-%Y",
    "%b %-d %Y",
    RFC3339_TOKEN,
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DateLayout {
    Pattern(String),
    Rfc3339,
}

impl DateLayout {
    /// Parses a layout token: `rfc3339` (any case) or a strftime pattern.
    pub fn parse(token: &str) -> Result<Self> {
        let token = token.trim();
        if token.eq_ignore_ascii_case(RFC3339_TOKEN) {
            return Ok(DateLayout::Rfc3339);
        }
        if token.is_empty() || !token.contains('%') {
            return Err(TyperError::InvalidDateFormat(token.to_string()));
        }
        if StrftimeItems::new(token).any(|item| matches!(item, Item::Error)) {
            return Err(TyperError::InvalidDateFormat(token.to_string()));
        }
        Ok(DateLayout::Pattern(token.to_string()))
    }

    pub fn matches(&self, value: &str) -> bool {
        match self {
            DateLayout::Rfc3339 => DateTime::parse_from_rfc3339(value).is_ok(),
            DateLayout::Pattern(pattern) => {
                let canonical = if let Ok(stamp) = NaiveDateTime::parse_from_str(value, pattern) {
                    render(stamp.format(pattern))
                } else if let Ok(date) = NaiveDate::parse_from_str(value, pattern) {
                    render(date.format(pattern))
                } else {
                    None
                };
                canonical.is_some_and(|text| text.eq_ignore_ascii_case(value))
            }
        }
    }
}

/// Formats into a string, returning `None` when the pattern needs fields the
/// value does not carry.
fn render(formatted: impl fmt::Display) -> Option<String> {
    let mut out = String::new();
    write!(out, "{formatted}").ok()?;
    Some(out)
}

impl fmt::Display for DateLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateLayout::Pattern(pattern) => f.write_str(pattern),
            DateLayout::Rfc3339 => f.write_str(RFC3339_TOKEN),
        }
    }
}

impl TryFrom<String> for DateLayout {
    type Error = TyperError;

    fn try_from(value: String) -> Result<Self> {
        DateLayout::parse(&value)
    }
}

impl From<DateLayout> for String {
    fn from(layout: DateLayout) -> Self {
        layout.to_string()
    }
}

/// Ordered list of accepted date layouts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateFormats {
    layouts: Vec<DateLayout>,
}

impl Default for DateFormats {
    fn default() -> Self {
        let layouts = DEFAULT_DATE_PATTERNS
            .iter()
            .map(|token| match *token {
                RFC3339_TOKEN => DateLayout::Rfc3339,
                pattern => DateLayout::Pattern(pattern.to_string()),
            })
            .collect();
        Self { layouts }
    }
}

impl DateFormats {
    pub fn new(layouts: Vec<DateLayout>) -> Self {
        Self { layouts }
    }

    /// Builds a list from layout tokens, rejecting the first invalid one.
    pub fn from_tokens<I, S>(tokens: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let layouts = tokens
            .into_iter()
            .map(|token| DateLayout::parse(token.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { layouts })
    }

    /// Appends a layout after the existing ones.
    pub fn push(&mut self, layout: DateLayout) -> &mut Self {
        self.layouts.push(layout);
        self
    }

    pub fn layouts(&self) -> &[DateLayout] {
        &self.layouts
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }

    pub fn matching_layout(&self, value: &str) -> Option<&DateLayout> {
        self.layouts.iter().find(|layout| layout.matches(value))
    }

    pub fn matches(&self, value: &str) -> bool {
        self.matching_layout(value).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_formats_cover_builtin_layouts() {
        let formats = DateFormats::default();
        assert!(formats.matches("2024-01-01"));
        assert!(formats.matches("12/31/2024"));
        assert!(formats.matches("31-12-2024"));
        assert!(formats.matches("Jan 2 2006"));
        assert!(formats.matches("2024-05-06T14:30:00Z"));
        assert!(formats.matches("2024-05-06T14:30:00+02:00"));
        assert!(!formats.matches("2024-13-01"));
        assert!(!formats.matches("42"));
        assert!(!formats.matches("hello"));
    }

    #[test]
    fn pattern_layouts_reject_loose_field_widths() {
        let formats = DateFormats::default();
        for value in [
            "1-2-3",
            "3-4-5",
            "2024-1-1",
            "2024- 1- 1",
            "+2024-01-01",
            "1/2/2024",
            "12/31/24",
            "Jan 02 2006",
        ] {
            assert!(!formats.matches(value), "{value} should not be a date");
        }
        assert!(formats.matches("Jan 15 2024"));
        assert!(formats.matches("jan 5 2024"));
        assert!(formats.matches("01/02/2024"));
    }

    #[test]
    fn pattern_needing_missing_fields_does_not_match() {
        let formats = DateFormats::from_tokens(["%Y-%m-%d %H"]).unwrap();
        assert!(!formats.matches("2024-05-06 14"));
        assert!(!formats.is_empty());
        assert!(DateFormats::new(Vec::new()).is_empty());
    }

    #[test]
    fn matching_layout_short_circuits_in_list_order() {
        let formats = DateFormats::default();
        assert_eq!(
            formats.matching_layout("2024-01-01"),
            Some(&DateLayout::Pattern("%Y-%m-%d".to_string()))
        );
        assert_eq!(
            formats.matching_layout("2024-01-01T00:00:00Z"),
            Some(&DateLayout::Rfc3339)
        );
    }

    #[test]
    fn parse_rejects_malformed_patterns() {
        assert_eq!(DateLayout::parse("RFC3339").unwrap(), DateLayout::Rfc3339);
        assert!(matches!(
            DateLayout::parse("%Q-%m"),
            Err(TyperError::InvalidDateFormat(_))
        ));
        assert!(DateLayout::parse("").is_err());
        assert!(DateLayout::parse("yyyy-mm-dd").is_err());
    }

    #[test]
    fn custom_layouts_extend_without_touching_defaults() {
        let mut formats = DateFormats::default();
        assert!(!formats.matches("31.12.2024"));
        formats.push(DateLayout::parse("%d.%m.%Y").unwrap());
        assert!(formats.matches("31.12.2024"));
    }

    #[test]
    fn pattern_with_time_fields_accepts_datetimes() {
        let formats = DateFormats::from_tokens(["%Y-%m-%d %H:%M:%S"]).unwrap();
        assert!(formats.matches("2024-05-06 14:30:00"));
        assert!(!formats.matches("2024-05-06"));
    }

    #[test]
    fn serde_round_trips_layout_tokens() {
        let formats = DateFormats::from_tokens(["%Y/%m/%d", "rfc3339"]).unwrap();
        let json = serde_json::to_string(&formats).unwrap();
        assert_eq!(json, r#"["%Y/%m/%d","rfc3339"]"#);
        let parsed: DateFormats = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, formats);
        assert!(serde_json::from_str::<DateFormats>(r#"["%Q"]"#).is_err());
    }
}
