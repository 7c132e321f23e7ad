//! Heuristic type inference for columns of delimited text.
//!
//! ```
//! use csv_typer::{ColumnType, classify, sample_and_classify};
//!
//! assert_eq!(classify(["1", "2.5"]), ColumnType::Float);
//!
//! let lines = ["id,name,age", "1,Alice,30", "2,Bob,25"];
//! assert_eq!(
//!     sample_and_classify(&lines, 10),
//!     vec![ColumnType::Int, ColumnType::String, ColumnType::Int]
//! );
//! ```

pub mod cache;
pub mod classify;
pub mod cli;
pub mod config;
pub mod dates;
pub mod error;
pub mod io_utils;
pub mod report;
pub mod sampler;
pub mod types;

use std::{env, io::Write, sync::OnceLock};

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, debug, info};

use crate::cli::{ClassifyArgs, ClassifyOptions, Cli, Commands, InferArgs};

pub use cache::{InferenceCache, fingerprint};
pub use classify::{BlankPolicy, Classification, Classifier, classify};
pub use config::InferenceOptions;
pub use dates::{DateFormats, DateLayout};
pub use error::TyperError;
pub use sampler::{ColumnSampler, HeaderMode, InferredColumn, sample_and_classify};
pub use types::ColumnType;

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("csv_typer", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Infer(args) => handle_infer(&args),
        Commands::Classify(args) => handle_classify(&args),
    }
}

fn apply_classify_options(options: &mut InferenceOptions, args: &ClassifyOptions) -> Result<()> {
    if !args.date_formats.is_empty() {
        options.date_formats = DateFormats::from_tokens(&args.date_formats)
            .context("Parsing --date-format values")?;
    }
    if let Some(policy) = args.blank_policy {
        options.blank_policy = policy;
    }
    Ok(())
}

fn resolve_infer_options(args: &InferArgs) -> Result<InferenceOptions> {
    let mut options = match &args.config {
        Some(path) => InferenceOptions::load(path)?,
        None => InferenceOptions::default(),
    };
    if let Some(sample_rows) = args.sample_rows {
        options.sample_size = sample_rows;
    }
    if let Some(delimiter) = args.delimiter {
        options.delimiter = delimiter;
    }
    if let Some(header) = args.header {
        options.header = header;
    }
    apply_classify_options(&mut options, &args.classify)?;
    Ok(options)
}

fn handle_infer(args: &InferArgs) -> Result<()> {
    let options = resolve_infer_options(args)?;
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    let sampler = options.sampler();
    let cache = InferenceCache::new();
    // One extra line for a possible header row.
    let line_limit = options.sample_size.saturating_add(1);

    let mut reports = Vec::with_capacity(args.inputs.len());
    for input in &args.inputs {
        info!(
            "Inferring column types for '{}' with delimiter '{}'",
            input.display(),
            printable_delimiter(options.delimiter)
        );
        let lines = io_utils::read_lines(input, encoding, Some(line_limit))?;
        let columns = sampler.infer_cached(&lines, &cache);
        debug!(
            "Inferred {} column(s) for '{}'; {} cached label(s)",
            columns.len(),
            input.display(),
            cache.len()
        );
        reports.push(report::InputReport {
            input: input.display().to_string(),
            columns,
        });
    }

    let rendered = report::render(&reports, args.format)?;
    std::io::stdout()
        .write_all(rendered.as_bytes())
        .context("Writing report")?;
    Ok(())
}

fn handle_classify(args: &ClassifyArgs) -> Result<()> {
    let mut options = InferenceOptions::default();
    apply_classify_options(&mut options, &args.classify)?;
    let outcome = options.classifier().inspect(&args.values);
    debug!(
        "Inspected {} of {} value(s) ({} blank, early exit: {})",
        outcome.inspected,
        args.values.len(),
        outcome.blanks,
        outcome.early_exit
    );
    let rendered = report::render_classification(&outcome, args.format)?;
    std::io::stdout()
        .write_all(rendered.as_bytes())
        .context("Writing classification")?;
    Ok(())
}

pub(crate) fn printable_delimiter(delimiter: char) -> String {
    match delimiter {
        '\t' => "\\t".to_string(),
        '\n' => "\\n".to_string(),
        other => other.to_string(),
    }
}
