//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// SuiteMetrics - performance rollup engine for agent catalogs
///
/// Fold a catalog of agents grouped into suites down to a global rollup
/// and a ranked per-suite rollup, joined against a static suite registry.
/// Markdown/JSON reports. Built in Rust.
///
/// Examples:
///   suitemetrics --catalog agents.json
///   suitemetrics --catalog agents.json --registry suites.toml --format json
///   suitemetrics --catalog agents.json --suite "生态 Agent" --top 5
///   suitemetrics --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// JSON agent catalog to roll up
    ///
    /// Must contain a JSON array of agent records in the catalog export
    /// shape. Not required when using --init-config.
    #[arg(
        short,
        long,
        value_name = "FILE",
        required_unless_present = "init_config"
    )]
    pub catalog: Option<PathBuf>,

    /// TOML suite registry replacing the built-in table
    ///
    /// The registry is replaced wholesale; there is no per-entry patching.
    /// Can also be set via the SUITEMETRICS_REGISTRY env var.
    #[arg(short, long, value_name = "FILE", env = "SUITEMETRICS_REGISTRY")]
    pub registry: Option<PathBuf>,

    /// Output file path for the report
    ///
    /// Defaults to the config file setting, or suite_report.md.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (markdown, json)
    #[arg(short, long, default_value = "markdown", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Restrict the rollup to the named suite(s)
    ///
    /// Repeatable. Agents outside the named suites are dropped before
    /// aggregation, so the global summary covers the filtered set.
    #[arg(long, value_name = "ID")]
    pub suite: Option<Vec<String>>,

    /// Keep only the top N suites after ranking by bill
    #[arg(long, value_name = "COUNT")]
    pub top: Option<usize>,

    /// Report title override
    #[arg(long, value_name = "TITLE")]
    pub title: Option<String>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .suitemetrics.toml in the current directory
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Skip the per-suite detail sections in the Markdown report
    #[arg(long)]
    pub no_suite_sections: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .suitemetrics.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if let Some(ref catalog) = self.catalog {
            if !catalog.exists() {
                return Err(format!("Catalog file does not exist: {}", catalog.display()));
            }
        }

        if let Some(ref registry) = self.registry {
            if !registry.exists() {
                return Err(format!(
                    "Registry file does not exist: {}",
                    registry.display()
                ));
            }
        }

        if self.top == Some(0) {
            return Err("--top must be at least 1".to_string());
        }

        if let Some(ref suites) = self.suite {
            if suites.iter().any(|s| s.is_empty()) {
                return Err("--suite identifiers must be non-empty".to_string());
            }
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
