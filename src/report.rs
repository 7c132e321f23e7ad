use std::fmt::Write as _;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

use crate::{classify::Classification, sampler::InferredColumn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

/// Inferred columns of one input.
#[derive(Debug, Clone, Serialize)]
pub struct InputReport {
    pub input: String,
    pub columns: Vec<InferredColumn>,
}

pub fn render(reports: &[InputReport], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(reports)),
        OutputFormat::Json => {
            let mut out = serde_json::to_string_pretty(reports).context("Rendering JSON report")?;
            out.push('\n');
            Ok(out)
        }
        OutputFormat::Yaml => serde_yaml::to_string(reports).context("Rendering YAML report"),
    }
}

/// Renders one classification: the bare tag for text, the full scan
/// outcome otherwise.
pub fn render_classification(outcome: &Classification, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(format!("{}\n", outcome.label)),
        OutputFormat::Json => {
            let mut out =
                serde_json::to_string_pretty(outcome).context("Rendering JSON classification")?;
            out.push('\n');
            Ok(out)
        }
        OutputFormat::Yaml => {
            serde_yaml::to_string(outcome).context("Rendering YAML classification")
        }
    }
}

fn render_text(reports: &[InputReport]) -> String {
    let mut out = String::new();
    for report in reports {
        let _ = writeln!(out, "File: {}", report.input);
        if report.columns.is_empty() {
            let _ = writeln!(out, "  No columns inferred");
        }
        let width = report
            .columns
            .iter()
            .map(|column| column.name.len())
            .max()
            .unwrap_or(0);
        for column in &report.columns {
            let _ = writeln!(
                out,
                "  {:>3}  {:<width$}  {:<6}  ({} sampled)",
                column.index,
                column.name,
                column.column_type.as_str(),
                column.samples,
            );
        }
    }
    out
}
