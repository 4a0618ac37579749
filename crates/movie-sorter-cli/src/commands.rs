use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "movie-sorter")]
#[command(about = "Rename, deduplicate and sort movie folders by genre", long_about = None)]
pub struct Cli {
    /// Directory holding the movie folders to organize
    pub root: PathBuf,

    /// How to report per-item progress
    #[arg(long, value_enum, default_value_t = ProgressMode::Log)]
    pub progress: ProgressMode,

    /// Format of the log lines written to stdout
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProgressMode {
    /// Progress bar per stage
    Bar,
    /// One `Progress: NN.NN` log line per item
    Log,
    /// No progress output
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Single-line key=value
    Text,
    /// One JSON object per line
    Json,
}
