use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "perftrend",
    version,
    about = "Render per-commit performance trend charts from the results database"
)]
pub struct Cli {
    /// Log at debug level (RUST_LOG still takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Regenerate the overview and per-test trend charts
    Render(RenderArgs),
    /// Print the commits that would be charted
    Show(ShowArgs),
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Where the database lives and how much history to read.
#[derive(clap::Args, Clone, Debug)]
pub struct StoreArgs {
    /// Optional YAML config; flags override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Relative paths resolve against this directory
    #[arg(long, default_value = ".")]
    pub repo_root: PathBuf,

    /// Path to the performance database
    #[arg(long, env = "PERFTREND_DB")]
    pub db: Option<PathBuf>,

    /// Maximum number of complete commits to chart
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_commits: Option<u32>,
}

#[derive(Parser, Clone, Debug)]
pub struct RenderArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    /// Output directory for documentation charts
    #[arg(long)]
    pub docs_dir: Option<PathBuf>,

    /// Output directory for the test suite's charts
    #[arg(long)]
    pub suite_dir: Option<PathBuf>,
}

#[derive(Parser, Clone, Debug)]
pub struct ShowArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

