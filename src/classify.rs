//! Column classification by ordered elimination.
//!
//! A column starts with three live hypotheses (int, float, date). Each value
//! can only clear hypotheses, never revive them, so the scan stops as soon as
//! all three are gone. The surviving hypothesis with the highest precedence
//! (int, then float, then date) names the column; `string` is the fallback.

use std::{sync::LazyLock, time::Instant};

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::{dates::DateFormats, types::ColumnType};

/// Scans visiting more values than this log their duration.
const TIMING_LOG_THRESHOLD: usize = 1000;

static DEFAULT_CLASSIFIER: LazyLock<Classifier> = LazyLock::new(Classifier::default);

/// How blank (empty after trimming) values are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BlankPolicy {
    /// Ignore blanks; a column with no other values is `string`.
    #[default]
    Skip,
    /// The first blank value makes the whole column `string`.
    Strict,
}

/// Outcome of a single classification scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub label: ColumnType,
    /// Values visited before the scan ended, blanks included.
    pub inspected: usize,
    pub blanks: usize,
    /// True when the scan stopped before the end of the input.
    pub early_exit: bool,
}

#[derive(Debug, Clone, Copy)]
struct TypeCandidate {
    possible_int: bool,
    possible_float: bool,
    possible_date: bool,
    observed: usize,
}

impl TypeCandidate {
    fn new() -> Self {
        Self {
            possible_int: true,
            possible_float: true,
            possible_date: true,
            observed: 0,
        }
    }

    fn update(&mut self, value: &str, date_formats: &DateFormats) {
        self.observed += 1;

        // Float first: a value that is not a float cannot be an int either.
        if self.possible_float && !is_float_literal(value) {
            self.possible_float = false;
            self.possible_int = false;
        }
        if self.possible_int && !is_int_literal(value) {
            self.possible_int = false;
        }
        if self.possible_date && !date_formats.matches(value) {
            self.possible_date = false;
        }

        debug_assert!(!self.possible_int || self.possible_float);
    }

    fn exhausted(&self) -> bool {
        !self.possible_int && !self.possible_float && !self.possible_date
    }

    fn decide(&self) -> ColumnType {
        if self.observed == 0 {
            ColumnType::String
        } else if self.possible_int {
            ColumnType::Int
        } else if self.possible_float {
            ColumnType::Float
        } else if self.possible_date {
            ColumnType::Date
        } else {
            ColumnType::String
        }
    }
}

/// Base-10 signed integer that fits in an `i64`.
pub fn is_int_literal(value: &str) -> bool {
    let digits = value.strip_prefix(['+', '-']).unwrap_or(value);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) && value.parse::<i64>().is_ok()
}

/// Signed decimal or exponential literal such as `-1.5`, `.5`, `3.` or `6e-3`.
///
/// Textual forms that `f64::from_str` also accepts (`inf`, `NaN`) are rejected.
pub fn is_float_literal(value: &str) -> bool {
    let body = value.strip_prefix(['+', '-']).unwrap_or(value);
    let (mantissa, exponent) = match body.find(['e', 'E']) {
        Some(pos) => (&body[..pos], Some(&body[pos + 1..])),
        None => (body, None),
    };

    let mut digits = 0usize;
    let mut points = 0usize;
    for b in mantissa.bytes() {
        match b {
            b'0'..=b'9' => digits += 1,
            b'.' => points += 1,
            _ => return false,
        }
    }
    if digits == 0 || points > 1 {
        return false;
    }

    if let Some(exponent) = exponent {
        let exp_digits = exponent.strip_prefix(['+', '-']).unwrap_or(exponent);
        if exp_digits.is_empty() || !exp_digits.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
    }
    true
}

/// Classifies value samples against a configured date format list.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    date_formats: DateFormats,
    blank_policy: BlankPolicy,
}

impl Classifier {
    pub fn new(date_formats: DateFormats, blank_policy: BlankPolicy) -> Self {
        Self {
            date_formats,
            blank_policy,
        }
    }

    pub fn date_formats(&self) -> &DateFormats {
        &self.date_formats
    }

    pub fn blank_policy(&self) -> BlankPolicy {
        self.blank_policy
    }

    pub fn classify<I, S>(&self, values: I) -> ColumnType
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.inspect(values).label
    }

    /// Runs the scan and reports how much of the input it needed.
    pub fn inspect<I, S>(&self, values: I) -> Classification
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let started = Instant::now();
        let mut candidate = TypeCandidate::new();
        let mut inspected = 0usize;
        let mut blanks = 0usize;
        let mut iter = values.into_iter();

        let finish = |label: ColumnType, inspected: usize, blanks: usize, early_exit: bool| {
            if inspected > TIMING_LOG_THRESHOLD {
                debug!(
                    "Classified column as {label} after {inspected} value(s) in {:?}",
                    started.elapsed()
                );
            }
            Classification {
                label,
                inspected,
                blanks,
                early_exit,
            }
        };

        while let Some(raw) = iter.next() {
            inspected += 1;
            let value = raw.as_ref().trim();
            if value.is_empty() {
                blanks += 1;
                match self.blank_policy {
                    BlankPolicy::Skip => continue,
                    BlankPolicy::Strict => {
                        trace!("Blank value at position {} under strict policy", inspected - 1);
                        let early_exit = iter.next().is_some();
                        return finish(ColumnType::String, inspected, blanks, early_exit);
                    }
                }
            }

            candidate.update(value, &self.date_formats);
            if candidate.exhausted() {
                let early_exit = iter.next().is_some();
                if early_exit {
                    trace!("All hypotheses cleared by '{value}' at position {}", inspected - 1);
                }
                return finish(ColumnType::String, inspected, blanks, early_exit);
            }
        }

        finish(candidate.decide(), inspected, blanks, false)
    }
}

/// Classifies `values` with the built-in date formats, skipping blanks.
pub fn classify<I, S>(values: I) -> ColumnType
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    DEFAULT_CLASSIFIER.classify(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_literal_accepts_decimal_and_exponent_forms() {
        for value in ["1", "-1", "+1", "1.5", ".5", "3.", "6e-3", "1E10", "-2.5e+7"] {
            assert!(is_float_literal(value), "{value} should be a float");
        }
        for value in ["", ".", "-", "e5", "1e", "1.2.3", "inf", "NaN", "1,000", "0x10", "1e5.0"] {
            assert!(!is_float_literal(value), "{value} should not be a float");
        }
    }

    #[test]
    fn int_literal_is_bounded_by_i64() {
        assert!(is_int_literal("9223372036854775807"));
        assert!(is_int_literal("-42"));
        assert!(is_int_literal("+7"));
        assert!(!is_int_literal("9223372036854775808"));
        assert!(!is_int_literal("1.0"));
        assert!(!is_int_literal("1e3"));
        assert!(!is_int_literal("-"));
    }

    #[test]
    fn candidate_clears_int_with_float() {
        let mut candidate = TypeCandidate::new();
        candidate.update("abc", &DateFormats::default());
        assert!(!candidate.possible_float);
        assert!(!candidate.possible_int);
        assert!(candidate.exhausted());
    }

    #[test]
    fn oversized_integers_fall_back_to_float() {
        assert_eq!(
            classify(["1", "99999999999999999999"]),
            ColumnType::Float
        );
    }

    #[test]
    fn inspect_reports_early_exit_position() {
        let outcome = Classifier::default().inspect(["text", "more text", "100", "200"]);
        assert_eq!(outcome.label, ColumnType::String);
        assert_eq!(outcome.inspected, 1);
        assert!(outcome.early_exit);
    }

    #[test]
    fn inspect_without_early_exit_when_last_value_clears_hypotheses() {
        let outcome = Classifier::default().inspect(["1", "x"]);
        assert_eq!(outcome.label, ColumnType::String);
        assert_eq!(outcome.inspected, 2);
        assert!(!outcome.early_exit);
    }

    #[test]
    fn strict_policy_stops_at_first_blank() {
        let strict = Classifier::new(DateFormats::default(), BlankPolicy::Strict);
        let outcome = strict.inspect(["1", "  ", "3"]);
        assert_eq!(outcome.label, ColumnType::String);
        assert_eq!(outcome.inspected, 2);
        assert_eq!(outcome.blanks, 1);
        assert!(outcome.early_exit);

        assert_eq!(Classifier::default().classify(["1", "  ", "3"]), ColumnType::Int);
    }
}
