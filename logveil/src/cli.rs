// logveil/src/cli.rs
//! This file defines the command-line interface (CLI) for the logveil application.
//! License: MIT OR APACHE 2.0

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use logveil_core::RedactionStrategy;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "logveil",
    author = "Logveil Team",
    version = env!("CARGO_PKG_VERSION"),
    about = "Redact PII from JSON documents and log streams",
    long_about = "Logveil reads a JSON document (or, with --lines, newline-delimited JSON) and redacts personally identifiable information before it reaches a log sink. Values are classified by field name and by content, using region-specific patterns confirmed with their check-digit algorithms."
)]
pub struct Cli {
    /// Path to a YAML or JSON configuration file.
    #[arg(long, short = 'c', value_name = "FILE", env = "LOGVEIL_CONFIG", help = "Path to a YAML or JSON configuration file.")]
    pub config: Option<PathBuf>,

    /// Path to an input file (reads from stdin if not provided).
    #[arg(long, short = 'i', value_name = "FILE", help = "Read input from a specified file instead of stdin.")]
    pub input: Option<PathBuf>,

    /// Write sanitized output to this file instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE", help = "Write output to a specified file instead of stdout.")]
    pub output: Option<PathBuf>,

    /// Treat the input as newline-delimited JSON.
    #[arg(long, short = 'l', help = "Process input line by line; lines that are not JSON are sanitized as free text.")]
    pub lines: bool,

    /// Restrict detection to these regions (comma-separated or repeated).
    #[arg(long, short = 'r', value_delimiter = ',', value_name = "CODE", help = "Active region codes, e.g. sg,my,th,kr,hk,ae (overrides the configuration file).")]
    pub region: Vec<String>,

    /// Redaction strategy (overrides the configuration file).
    #[arg(long, short = 's', value_enum, value_name = "STRATEGY", help = "Redaction strategy (overrides the configuration file).")]
    pub strategy: Option<StrategyChoice>,

    /// Print per-type redaction counts to stderr.
    #[arg(long, help = "Print per-type redaction counts to stderr when done.")]
    pub stats: bool,

    /// Disable informational messages
    #[arg(long, short = 'q', conflicts_with = "debug", help = "Suppress all log output.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short = 'd', help = "Enable debug logging.")]
    pub debug: bool,
}

/// Strategy names accepted on the command line.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum StrategyChoice {
    /// Replace the value with [REDACTED].
    Full,
    /// Mask the middle of the value.
    Partial,
    /// Replace the value with a salted SHA-256 digest.
    Hash,
    /// Drop the value.
    Remove,
}

impl From<StrategyChoice> for RedactionStrategy {
    fn from(choice: StrategyChoice) -> Self {
        match choice {
            StrategyChoice::Full => RedactionStrategy::Full,
            StrategyChoice::Partial => RedactionStrategy::Partial,
            StrategyChoice::Hash => RedactionStrategy::Hash,
            StrategyChoice::Remove => RedactionStrategy::Remove,
        }
    }
}
