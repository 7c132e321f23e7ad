//! Column sampling over raw delimited lines.
//!
//! Lines are split on a single delimiter character with no quote handling.
//! The first line fixes the column count, an optional header row is skipped,
//! and a prefix window of up to `sample_size` data rows feeds one
//! [`Classifier`] run per column.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    cache::{InferenceCache, fingerprint},
    classify::{Classifier, is_float_literal},
    types::ColumnType,
};

pub const DEFAULT_DELIMITER: char = ',';
pub const DEFAULT_SAMPLE_SIZE: usize = 2000;

/// How the first line is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum HeaderMode {
    /// Header when the first cell is not a number.
    #[default]
    Auto,
    Present,
    Absent,
}

/// Per-column samples drawn from a set of lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSamples {
    /// Trimmed cells of the first line when it was treated as a header.
    pub headers: Option<Vec<String>>,
    pub columns: Vec<Vec<String>>,
}

impl ColumnSamples {
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column_name(&self, index: usize) -> String {
        self.headers
            .as_ref()
            .and_then(|headers| headers.get(index))
            .filter(|name| !name.is_empty())
            .cloned()
            .unwrap_or_else(|| format!("field_{index}"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InferredColumn {
    pub index: usize,
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    pub samples: usize,
}

#[derive(Debug, Clone)]
pub struct ColumnSampler {
    classifier: Classifier,
    sample_size: usize,
    delimiter: char,
    header: HeaderMode,
}

impl Default for ColumnSampler {
    fn default() -> Self {
        Self::new(Classifier::default(), DEFAULT_SAMPLE_SIZE)
    }
}

impl ColumnSampler {
    pub fn new(classifier: Classifier, sample_size: usize) -> Self {
        Self {
            classifier,
            sample_size,
            delimiter: DEFAULT_DELIMITER,
            header: HeaderMode::Auto,
        }
    }

    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn header_mode(mut self, header: HeaderMode) -> Self {
        self.header = header;
        self
    }

    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    fn has_header(&self, first_cell: &str) -> bool {
        match self.header {
            HeaderMode::Auto => !is_float_literal(first_cell.trim()),
            HeaderMode::Present => true,
            HeaderMode::Absent => false,
        }
    }

    /// Splits `lines` into per-column samples.
    pub fn sample<S: AsRef<str>>(&self, lines: &[S]) -> ColumnSamples {
        let Some(first) = lines.first() else {
            return ColumnSamples::default();
        };

        let first_fields = first
            .as_ref()
            .split(self.delimiter)
            .map(|field| field.trim().to_string())
            .collect::<Vec<_>>();
        let column_count = first_fields.len();
        let has_header = self.has_header(&first_fields[0]);
        let start = usize::from(has_header);

        let mut columns = vec![Vec::with_capacity(self.sample_size.min(lines.len())); column_count];
        let window = lines.iter().skip(start).take(self.sample_size);
        let mut rows = 0usize;
        for line in window {
            rows += 1;
            for (column, field) in columns.iter_mut().zip(line.as_ref().split(self.delimiter)) {
                column.push(field.trim().to_string());
            }
        }

        debug!(
            "Sampled {rows} row(s) across {column_count} column(s) (header: {has_header})"
        );

        ColumnSamples {
            headers: has_header.then_some(first_fields),
            columns,
        }
    }

    /// Returns one label per column of the first line, in column order.
    pub fn classify_lines<S: AsRef<str>>(&self, lines: &[S]) -> Vec<ColumnType> {
        self.sample(lines)
            .columns
            .iter()
            .map(|column| self.classifier.classify(column))
            .collect()
    }

    pub fn infer<S: AsRef<str>>(&self, lines: &[S]) -> Vec<InferredColumn> {
        self.infer_with(lines, |column| self.classifier.classify(column))
    }

    /// Like [`infer`](Self::infer), memoizing each column by the fingerprint
    /// of its sample.
    pub fn infer_cached<S: AsRef<str>>(
        &self,
        lines: &[S],
        cache: &InferenceCache,
    ) -> Vec<InferredColumn> {
        self.infer_with(lines, |column| {
            cache.get_or_compute(&fingerprint(column), || self.classifier.classify(column))
        })
    }

    fn infer_with<S, F>(&self, lines: &[S], mut classify: F) -> Vec<InferredColumn>
    where
        S: AsRef<str>,
        F: FnMut(&[String]) -> ColumnType,
    {
        let samples = self.sample(lines);
        samples
            .columns
            .iter()
            .enumerate()
            .map(|(index, column)| InferredColumn {
                index,
                name: samples.column_name(index),
                column_type: classify(column.as_slice()),
                samples: column.len(),
            })
            .collect()
    }
}

/// Classifies each column of comma-delimited `lines` with the default
/// classifier, sampling at most `sample_size` data rows.
pub fn sample_and_classify<S: AsRef<str>>(lines: &[S], sample_size: usize) -> Vec<ColumnType> {
    ColumnSampler::new(Classifier::default(), sample_size).classify_lines(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_skips_non_numeric_header() {
        let lines = ["id,name", "1,Alice", "2,Bob"];
        let samples = ColumnSampler::default().sample(&lines);
        assert_eq!(
            samples.headers,
            Some(vec!["id".to_string(), "name".to_string()])
        );
        assert_eq!(samples.columns[0], vec!["1", "2"]);
        assert_eq!(samples.column_name(1), "name");
    }

    #[test]
    fn numeric_first_cell_is_treated_as_data() {
        let lines = ["1,x", "2,y"];
        let samples = ColumnSampler::default().sample(&lines);
        assert!(samples.headers.is_none());
        assert_eq!(samples.columns[0], vec!["1", "2"]);
        assert_eq!(samples.column_name(0), "field_0");
    }

    #[test]
    fn short_rows_leave_trailing_columns_short() {
        let lines = ["a,b,c", "1,2,3", "4", "5,6"];
        let samples = ColumnSampler::default().sample(&lines);
        assert_eq!(samples.columns[0], vec!["1", "4", "5"]);
        assert_eq!(samples.columns[1], vec!["2", "6"]);
        assert_eq!(samples.columns[2], vec!["3"]);
    }

    #[test]
    fn extra_fields_beyond_first_line_are_ignored() {
        let lines = ["a,b", "1,2,3,4"];
        let samples = ColumnSampler::default().sample(&lines);
        assert_eq!(samples.column_count(), 2);
    }

    #[test]
    fn window_is_a_prefix_of_data_rows() {
        let lines = ["n", "1", "2", "x"];
        let sampler = ColumnSampler::new(Classifier::default(), 2);
        assert_eq!(sampler.sample(&lines).columns[0], vec!["1", "2"]);
        assert_eq!(sampler.classify_lines(&lines), vec![ColumnType::Int]);
    }

    #[test]
    fn header_mode_overrides_heuristic() {
        let lines = ["2024,2025", "1,2"];
        let forced = ColumnSampler::default().header_mode(HeaderMode::Present);
        assert_eq!(forced.sample(&lines).columns[0], vec!["1"]);

        let lines = ["id,name", "1,Alice"];
        let absent = ColumnSampler::default().header_mode(HeaderMode::Absent);
        assert_eq!(absent.classify_lines(&lines)[0], ColumnType::String);
    }

    #[test]
    fn custom_delimiter_splits_fields() {
        let lines = ["id;price", "1;2.5"];
        let sampler = ColumnSampler::default().delimiter(';');
        assert_eq!(
            sampler.classify_lines(&lines),
            vec![ColumnType::Int, ColumnType::Float]
        );
    }
}
