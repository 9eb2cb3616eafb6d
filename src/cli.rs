use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "kira-trendqc",
    version,
    about = "Clean, analyze and forecast categorical time series"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Full pipeline: clean, transform, analyze, forecast and write reports.
    Analyze(AnalyzeArgs),
    /// Trend and growth per category from cleaned data, printed as JSON.
    Quick(QuickArgs),
    /// Parse and clean only; prints per-category quality.
    Validate(ValidateArgs),
}

#[derive(Debug, Args)]
pub struct InputArgs {
    #[arg(long, help = "Upload file (.csv, .json, optionally .gz)")]
    pub input: PathBuf,

    #[arg(long, value_enum, help = "Input format (default: from file extension)")]
    pub format: Option<FormatArg>,

    #[arg(long, help = "JSON file overriding pipeline defaults")]
    pub config: Option<PathBuf>,

    #[arg(long, default_value_t = 0, help = "Number of threads (0 = auto)")]
    pub threads: usize,
}

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub common: InputArgs,

    #[arg(long)]
    pub out: PathBuf,

    #[arg(long, default_value_t = false, help = "Skip the 30-step forecast")]
    pub no_forecast: bool,

    #[arg(long, default_value_t = false, help = "Include chart payloads")]
    pub visualizations: bool,

    #[arg(long, value_enum, help = "Also write an export file in this format")]
    pub export: Option<FormatArg>,

    #[arg(long, help = "Restrict to one category (value without the category_ prefix)")]
    pub category: Option<String>,
}

#[derive(Debug, Args)]
pub struct QuickArgs {
    #[command(flatten)]
    pub common: InputArgs,

    #[arg(long)]
    pub category: Option<String>,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub common: InputArgs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Csv,
    Json,
}
