use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "docdelta",
    about = "Compare versions of structured documents",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Align and diff two document versions given as JSON block arrays
    Compare(CompareArgs),
    /// Show the character diff of two texts
    Diff(DiffArgs),
    /// Print the similarity of two texts in percent
    Similarity(SimilarityArgs),
    /// Print the effective engine configuration
    Config(ConfigArgs),
}

#[derive(Args)]
pub struct CompareArgs {
    /// Version 1 blocks (JSON)
    pub old: PathBuf,
    /// Version 2 blocks (JSON)
    pub new: PathBuf,
    /// Engine settings (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Override the per-side block limit
    #[arg(long)]
    pub max_blocks: Option<usize>,
    /// Also list pairs without changes
    #[arg(long)]
    pub all: bool,
}

#[derive(Args)]
pub struct DiffArgs {
    pub old: String,
    pub new: String,
    /// Treat OLD and NEW as file paths
    #[arg(long)]
    pub files: bool,
    /// Time budget for the diff search in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,
}

#[derive(Args)]
pub struct SimilarityArgs {
    pub old: String,
    pub new: String,
    /// Treat OLD and NEW as file paths
    #[arg(long)]
    pub files: bool,
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Engine settings (TOML) to load and validate
    #[arg(long)]
    pub config: Option<PathBuf>,
}
