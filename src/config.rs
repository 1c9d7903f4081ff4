//! Configuration and the static suite registry.
//!
//! This module handles loading and merging configuration from
//! `.suitemetrics.toml` files, and owns the suite registry: the immutable
//! mapping from suite identifier to display metadata and target baselines.
//! The registry ships with a built-in table and can only be replaced
//! wholesale, never patched entry by entry.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,

    /// Suite registry. When present in a config file it replaces the
    /// built-in table wholesale.
    #[serde(default)]
    pub registry: SuiteRegistry,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default output file path.
    #[serde(default = "default_output")]
    pub output: String,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            verbose: false,
        }
    }
}

fn default_output() -> String {
    "suite_report.md".to_string()
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Report title.
    #[serde(default = "default_title")]
    pub title: String,

    /// Include a detailed section per suite (true) or only the ranking
    /// table (false).
    #[serde(default = "default_true")]
    pub include_suite_sections: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            include_suite_sections: true,
        }
    }
}

fn default_title() -> String {
    "Suite Performance Report".to_string()
}

fn default_true() -> bool {
    true
}

/// Static display metadata and targets for one suite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteMeta {
    /// Short display name.
    pub alias: String,
    /// Human-readable focus description.
    pub focus: String,
    /// Reference outcome score, the denominator for lift computation.
    #[serde(default)]
    pub baseline_outcome: f64,
    /// Target automation coverage as a 0–100 percentage. Already scaled;
    /// the engine never divides it by 100 again.
    #[serde(default)]
    pub autopilot_target: f64,
}

/// Immutable suite-identifier-keyed metadata table.
///
/// Supplied once at process start and injected explicitly into the
/// aggregation functions; suite identifiers in the catalog need not all
/// exist here — lookups for missing suites simply return `None`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SuiteRegistry {
    suites: HashMap<String, SuiteMeta>,
}

impl SuiteRegistry {
    /// Look up the metadata for a suite identifier.
    pub fn get(&self, suite: &str) -> Option<&SuiteMeta> {
        self.suites.get(suite)
    }

    /// Add or replace one entry. Only used while building a registry;
    /// once handed to the engine the registry is read-only.
    #[allow(dead_code)] // Builder utility for alternate registries
    pub fn insert(&mut self, suite: String, meta: SuiteMeta) {
        self.suites.insert(suite, meta);
    }

    /// Number of registered suites.
    pub fn len(&self) -> usize {
        self.suites.len()
    }

    /// Whether the registry has no entries.
    pub fn is_empty(&self) -> bool {
        self.suites.is_empty()
    }

    /// Load a registry from a standalone TOML file, replacing whatever
    /// registry was in effect. Each top-level table is one suite entry.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read registry file: {}", path.display()))?;

        let registry: SuiteRegistry = toml::from_str(&content)
            .with_context(|| format!("Failed to parse registry file: {}", path.display()))?;

        Ok(registry)
    }

    /// The registry shipped with the binary.
    pub fn builtin() -> Self {
        let entries = [
            ("生态 Agent", "生态", "跨行业生态联接", 88.0, 80.0),
            ("百融 Agent · 金融套系", "百金™", "金融风控与授信", 93.0, 85.0),
            ("百融 Agent · 保险套系", "百保™", "保险核保理赔", 90.0, 82.0),
            ("百融 Agent · 运营与合规套系", "百率™", "运营合规指挥", 87.0, 78.0),
            ("百融 Agent · 增长套系", "百盈™", "客户增长经营", 91.0, 83.0),
            ("百融 Agent · 人力套系", "百才™", "人才获取与体验", 89.0, 80.0),
            ("百融 Agent · 法务套系", "百案™", "法务审计质检", 92.0, 82.0),
            ("百融 Agent · 个人助手", "To C", "个人决策与效率", 85.0, 72.0),
        ];

        let suites = entries
            .into_iter()
            .map(|(suite, alias, focus, baseline_outcome, autopilot_target)| {
                (
                    suite.to_string(),
                    SuiteMeta {
                        alias: alias.to_string(),
                        focus: focus.to_string(),
                        baseline_outcome,
                        autopilot_target,
                    },
                )
            })
            .collect();

        Self { suites }
    }
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but
    /// can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(".suitemetrics.toml");

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings; only
    /// explicitly provided values override.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref output) = args.output {
            self.general.output = output.to_string_lossy().to_string();
        }

        if args.verbose {
            self.general.verbose = true;
        }

        if let Some(ref title) = args.title {
            self.report.title = title.clone();
        }

        if args.no_suite_sections {
            self.report.include_suite_sections = false;
        }
    }

    /// Generate a default configuration file content, with the built-in
    /// registry spelled out so it can be edited.
    pub fn default_toml() -> String {
        let config = Config {
            registry: SuiteRegistry::builtin(),
            ..Config::default()
        };
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
