use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::{
    classify::BlankPolicy, config::parse_delimiter, report::OutputFormat, sampler::HeaderMode,
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Infer column types of delimited text", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Infer a type (int, float, date, string) for every column of one or more files
    Infer(InferArgs),
    /// Classify a list of values given on the command line
    Classify(ClassifyArgs),
}

#[derive(Debug, Args)]
pub struct InferArgs {
    /// Input files to inspect ('-' reads stdin)
    #[arg(short = 'i', long = "input", required = true, action = clap::ArgAction::Append)]
    pub inputs: Vec<PathBuf>,
    /// Number of data rows to sample per column (overrides the config file)
    #[arg(long)]
    pub sample_rows: Option<usize>,
    /// Field delimiter (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<char>,
    /// Character encoding of the input files (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    #[command(flatten)]
    pub classify: ClassifyOptions,
    /// Treatment of the first line
    #[arg(long = "header", value_enum)]
    pub header: Option<HeaderMode>,
    /// YAML file with inference options
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Args)]
pub struct ClassifyArgs {
    /// Values to classify
    #[arg(required = true, allow_hyphen_values = true, allow_negative_numbers = true)]
    pub values: Vec<String>,
    #[command(flatten)]
    pub classify: ClassifyOptions,
    /// Output format (text prints the bare type tag)
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Args)]
pub struct ClassifyOptions {
    /// Accepted date layout (strftime pattern or 'rfc3339'); repeat to replace the built-in list
    #[arg(long = "date-format", action = clap::ArgAction::Append)]
    pub date_formats: Vec<String>,
    /// Treatment of blank values
    #[arg(long = "blank-policy", value_enum)]
    pub blank_policy: Option<BlankPolicy>,
}
