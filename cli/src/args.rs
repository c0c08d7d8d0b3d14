//! Command-line arguments.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "council",
    version,
    about = "Ask a question to a council of LLMs: independent drafts, anonymous peer ranking, chair synthesis"
)]
pub struct Cli {
    /// The question to deliberate
    pub question: String,

    /// Free-text context attached to the question
    #[arg(short, long)]
    pub context: Option<String>,

    /// Stream progress and the result as JSON lines
    #[arg(long)]
    pub stream: bool,

    /// Path to a configuration file (overrides discovered files)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Ignore all configuration files and use built-in defaults
    #[arg(long)]
    pub no_config: bool,

    /// What to print when the request completes
    #[arg(long, value_enum, default_value_t = OutputFormat::Full)]
    pub output: OutputFormat,

    /// Suppress the progress display
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Answer, critique, and run details
    Full,
    /// The synthesized answer only
    Answer,
    /// The whole outcome as JSON
    Json,
}
