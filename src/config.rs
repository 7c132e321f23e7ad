//! Inference options, loadable from YAML and overridable from the command line.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::{
    classify::{BlankPolicy, Classifier},
    dates::DateFormats,
    error::TyperError,
    sampler::{ColumnSampler, DEFAULT_DELIMITER, DEFAULT_SAMPLE_SIZE, HeaderMode},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InferenceOptions {
    /// Data rows inspected per column; `0` inspects none.
    pub sample_size: usize,
    pub delimiter: char,
    pub date_formats: DateFormats,
    pub blank_policy: BlankPolicy,
    pub header: HeaderMode,
}

impl Default for InferenceOptions {
    fn default() -> Self {
        Self {
            sample_size: DEFAULT_SAMPLE_SIZE,
            delimiter: DEFAULT_DELIMITER,
            date_formats: DateFormats::default(),
            blank_policy: BlankPolicy::default(),
            header: HeaderMode::default(),
        }
    }
}

impl InferenceOptions {
    pub fn from_yaml_str(input: &str) -> Result<Self> {
        let options: Self = serde_yaml::from_str(input).context("Parsing inference options")?;
        options.validate()?;
        Ok(options)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents =
            fs::read_to_string(path).with_context(|| format!("Reading config file {path:?}"))?;
        Self::from_yaml_str(&contents).with_context(|| format!("Loading config file {path:?}"))
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Serializing inference options")
    }

    pub fn validate(&self) -> Result<(), TyperError> {
        if !self.delimiter.is_ascii() {
            return Err(TyperError::InvalidDelimiter(
                self.delimiter.to_string(),
                "Delimiter must be ASCII",
            ));
        }
        Ok(())
    }

    pub fn classifier(&self) -> Classifier {
        Classifier::new(self.date_formats.clone(), self.blank_policy)
    }

    pub fn sampler(&self) -> ColumnSampler {
        ColumnSampler::new(self.classifier(), self.sample_size)
            .delimiter(self.delimiter)
            .header_mode(self.header)
    }
}

/// Parses delimiter names (`tab`, `comma`, `pipe`, `semicolon`) or a single
/// ASCII character.
pub fn parse_delimiter(value: &str) -> Result<char, TyperError> {
    match value {
        "tab" | "\t" => Ok('\t'),
        "comma" | "," => Ok(','),
        "|" | "pipe" => Ok('|'),
        ";" | "semicolon" => Ok(';'),
        other => {
            let mut chars = other.chars();
            let first = chars.next().ok_or_else(|| {
                TyperError::InvalidDelimiter(other.to_string(), "Delimiter cannot be empty")
            })?;
            if chars.next().is_some() {
                return Err(TyperError::InvalidDelimiter(
                    other.to_string(),
                    "Delimiter must be a single character",
                ));
            }
            if !first.is_ascii() {
                return Err(TyperError::InvalidDelimiter(
                    other.to_string(),
                    "Delimiter must be ASCII",
                ));
            }
            Ok(first)
        }
    }
}
