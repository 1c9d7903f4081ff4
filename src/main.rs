//! SuiteMetrics - Agent Catalog Rollup Engine
//!
//! A CLI tool that folds a catalog of agents grouped into suites down to
//! a global rollup and a ranked per-suite rollup, then renders a
//! dashboard-style report.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (bad catalog shape, unreadable files, invalid flags)

mod catalog;
mod cli;
mod config;
mod models;
mod report;
mod rollup;

use anyhow::{Context, Result};
use chrono::Utc;
use cli::{Args, OutputFormat};
use config::{Config, SuiteRegistry};
use models::AgentRecord;
use tracing::{debug, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Initialize logging
    init_logging(&args);

    info!("SuiteMetrics v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    // Run the rollup
    if let Err(e) = run_rollup(args) {
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config: generate a default .suitemetrics.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(".suitemetrics.toml");

    if path.exists() {
        eprintln!("⚠️  .suitemetrics.toml already exists. Remove it first or edit it manually.");
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .suitemetrics.toml")?;

    println!("✅ Created .suitemetrics.toml with default settings.");
    println!("   Edit it to customize the report and the suite registry.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the complete rollup workflow.
fn run_rollup(args: Args) -> Result<()> {
    // Load configuration
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    // Resolve the suite registry: an explicit --registry file replaces
    // everything, a config-file registry replaces the built-in table, and
    // otherwise the shipped defaults apply.
    let registry = resolve_registry(&args, &config)?;
    info!("Suite registry has {} entries", registry.len());

    // Load the agent catalog
    let catalog_path = args
        .catalog
        .as_ref()
        .context("No catalog file provided")?;
    println!("📥 Loading catalog: {}", catalog_path.display());

    let mut agents = catalog::load_catalog(catalog_path)?;
    info!("Loaded {} agents", agents.len());

    // Apply the --suite filter before aggregation
    if let Some(ref wanted) = args.suite {
        agents.retain(|agent| wanted.iter().any(|s| s == &agent.suite));
        if agents.is_empty() {
            warn!("Suite filter matched no agents");
        }
    }

    // Compute the rollup
    println!("🧮 Computing rollup for {} agents...", agents.len());
    let mut result = rollup::compute_suite_metrics(&agents, &registry);

    // Apply --top after ranking
    if let Some(top) = args.top {
        result.suites.truncate(top);
    }

    // Render the report
    let context = report::ReportContext {
        title: config.report.title.clone(),
        catalog: catalog_path.display().to_string(),
        generated_at: Utc::now(),
        include_suite_sections: config.report.include_suite_sections,
    };

    let output = match args.format {
        OutputFormat::Json => report::generate_json_report(&result, &context)?,
        OutputFormat::Markdown => report::generate_markdown_report(&result, &context),
    };

    let output_path = std::path::Path::new(&config.general.output);
    std::fs::write(output_path, &output)
        .with_context(|| format!("Failed to write report to {}", output_path.display()))?;

    // Print summary
    print_summary(&result, &agents);
    println!(
        "\n✅ Rollup complete! Report saved to: {}",
        output_path.display()
    );

    Ok(())
}

/// Print a terminal summary of the computed rollup.
fn print_summary(result: &models::SuiteRollup, agents: &[AgentRecord]) {
    println!("\n📊 Rollup Summary:");
    println!("   Agents: {}", agents.len());
    println!("   Suites: {}", result.suites.len());
    println!(
        "   Outcome index: {} | Autopilot: {}% | Total bill: {} | Mean CPR: {}",
        result.global.outcome_index,
        result.global.autopilot,
        result.global.bill,
        result.global.cpr
    );

    if let Some(leader) = result.suites.first() {
        println!(
            "   Top suite by bill: {} ({:.1}% of total)",
            leader.display_name(),
            leader.bill_share
        );
    }
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from .suitemetrics.toml");
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}

/// Pick the suite registry for this run.
fn resolve_registry(args: &Args, config: &Config) -> Result<SuiteRegistry> {
    if let Some(ref registry_path) = args.registry {
        info!("Loading registry from: {}", registry_path.display());
        return SuiteRegistry::load(registry_path);
    }

    if !config.registry.is_empty() {
        return Ok(config.registry.clone());
    }

    Ok(SuiteRegistry::builtin())
}
