// logveil/src/commands/sanitize.rs
//! The sanitize operation: read input, redact it, write the result.

use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde_json::Value;
use std::fs;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use logveil_core::{load_config_from_file, RedactionStrategy, Region, Sanitizer, SanitizerConfig};

use crate::stats::RedactionStats;

/// Options for a single sanitize run.
#[derive(Debug, Default, Clone)]
pub struct SanitizeOptions {
    pub config_path: Option<PathBuf>,
    pub input_path: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
    pub lines: bool,
    pub regions: Vec<String>,
    pub strategy: Option<RedactionStrategy>,
    pub stats: bool,
}

/// Default configuration location: `<config dir>/logveil/config.yaml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("logveil").join("config.yaml"))
}

/// Resolves the effective configuration: explicit file, else the default file if it
/// exists, else built-in defaults. Command-line overrides are applied last.
pub fn build_config(opts: &SanitizeOptions) -> Result<SanitizerConfig> {
    let mut config = match &opts.config_path {
        Some(path) => load_config_from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => match default_config_path().filter(|p| p.is_file()) {
            Some(path) => {
                debug!("Using default configuration file {}", path.display());
                load_config_from_file(&path).with_context(|| {
                    format!("Failed to load configuration from {}", path.display())
                })?
            }
            None => SanitizerConfig::default(),
        },
    };

    if !opts.regions.is_empty() {
        let regions = opts
            .regions
            .iter()
            .map(|code| code.parse::<Region>())
            .collect::<Result<Vec<_>, _>>()
            .context("Invalid --region value")?;
        config = config.with_regions(regions);
    }
    if let Some(strategy) = opts.strategy {
        config = config.with_strategy(strategy);
    }
    Ok(config)
}

/// Runs one sanitize pass and returns the collected stats when `--stats` was given.
pub fn run_sanitize(opts: &SanitizeOptions) -> Result<Option<Arc<RedactionStats>>> {
    info!("Starting logveil sanitize operation.");

    let mut config = build_config(opts)?;
    let stats = opts.stats.then(|| Arc::new(RedactionStats::new()));
    if let Some(stats) = &stats {
        config = config.with_metrics(stats.clone());
    }
    let sanitizer = Sanitizer::new(config).context("Invalid sanitizer configuration")?;

    let reader = open_input(opts.input_path.as_deref())?;
    let mut writer = open_output(opts.output_path.as_deref())?;

    if opts.lines {
        sanitize_lines(&sanitizer, reader, &mut writer)?;
    } else {
        sanitize_document(&sanitizer, reader, &mut writer)?;
    }
    writer.flush().context("Failed to flush output")?;

    info!("Logveil sanitize operation completed.");
    Ok(stats)
}

/// Sanitizes a whole JSON document.
pub fn sanitize_document<R: Read, W: Write>(
    sanitizer: &Sanitizer,
    mut reader: R,
    writer: &mut W,
) -> Result<()> {
    let mut input = Vec::new();
    reader.read_to_end(&mut input).context("Failed to read input")?;
    debug!("Read {} bytes of input.", input.len());

    let output = sanitizer.sanitize_json(&input).context("Input is not a valid JSON document")?;
    writer.write_all(&output)?;
    writeln!(writer)?;
    Ok(())
}

/// Sanitizes newline-delimited input. JSON lines are sanitized structurally; any other
/// non-blank line is treated as unnamed free text.
pub fn sanitize_lines<R: BufRead, W: Write>(
    sanitizer: &Sanitizer,
    reader: R,
    writer: &mut W,
) -> Result<()> {
    for (index, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line {}", index + 1))?;
        writeln!(writer, "{}", sanitize_line(sanitizer, &line))?;
    }
    Ok(())
}

pub fn sanitize_line(sanitizer: &Sanitizer, line: &str) -> String {
    if line.trim().is_empty() {
        return line.to_string();
    }
    match serde_json::from_str::<Value>(line) {
        Ok(value) => sanitizer.sanitize_value(&value).to_string(),
        Err(_) => {
            debug!("Line is not JSON; sanitizing as free text.");
            sanitizer.sanitize_field("", line)
        }
    }
}

fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match path {
        Some(path) => {
            let file = fs::File::open(path)
                .with_context(|| format!("Failed to open input file: {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            info!("Writing sanitized content to file: {}", path.display());
            let file = fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            Ok(Box::new(io::BufWriter::new(file)))
        }
        None => Ok(Box::new(io::BufWriter::new(io::stdout()))),
    }
}

/// Prints the stats summary to stderr.
pub fn report_stats(stats: &RedactionStats) {
    if let Err(e) = stats.write_summary(&mut io::stderr()) {
        warn!("Failed to write redaction summary: {}", e);
    }
}
