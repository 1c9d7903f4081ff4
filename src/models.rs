//! Data models for the rollup engine.
//!
//! This module contains the core data structures: agent records as supplied
//! by the catalog, and the derived global/suite summary records consumed by
//! the report generator. Field names serialize in camelCase to match the
//! catalog export and the dashboard consumer.

use serde::{Deserialize, Serialize};

/// Per-agent performance metrics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentMetrics {
    /// Quality/success score in the 0–100 range.
    pub outcome: f64,
    /// Monetary/usage volume attributed to the agent. Non-negative.
    pub bill: f64,
    /// Cost-per-result ratio.
    pub cpr: f64,
    /// Number of evidence replies produced.
    pub evidence_replies: u64,
    /// Number of customer touchpoints.
    pub cps: u64,
}

/// A single catalog entry: an automated workflow unit with its metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentRecord {
    /// Identifier of the suite this agent belongs to.
    pub suite: String,
    /// Free-text description of the suite. Redundant across agents of the
    /// same suite; the engine takes the value from the first member seen.
    #[serde(default)]
    pub suite_description: String,
    /// Performance metrics.
    pub metrics: AgentMetrics,
    /// Fraction of the agent's work performed without human intervention,
    /// in [0, 1].
    pub autopilot_coverage: f64,
    /// Connector identifiers used by this agent. Duplicates across agents
    /// of the same suite collapse into a distinct count per suite.
    #[serde(default)]
    pub connectors: Vec<String>,
}

/// Global rollup across the whole catalog. Recomputed on every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalSummary {
    /// Rounded mean outcome across all agents.
    pub outcome_index: i64,
    /// Total bill (unscaled sum).
    pub bill: f64,
    /// Mean cost ratio, formatted with exactly two decimals.
    pub cpr: String,
    /// Mean autopilot coverage as an integer percentage.
    pub autopilot: i64,
    /// Total evidence replies.
    pub evidence: u64,
    /// Total touchpoints.
    pub touchpoints: u64,
    /// True number of agents in the input (not the divisor-safe count).
    pub agent_count: usize,
}

/// Per-suite rollup joined against the static registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuiteSummary {
    /// Suite identifier.
    pub suite: String,
    /// Suite description, taken from the first grouped agent.
    pub description: String,
    /// Short display name from the registry, absent for unregistered suites.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Focus label from the registry, absent for unregistered suites.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus: Option<String>,
    /// URL/DOM-safe slug derived from the suite identifier.
    pub anchor: String,
    /// Number of agents in the suite.
    pub agents: usize,
    /// Share of the global agent count, percentage with one decimal.
    pub headcount_share: f64,
    /// Rounded mean outcome for the suite.
    pub outcome: i64,
    /// Percentage change of the mean outcome vs. the baseline, one decimal.
    pub conversion_lift: f64,
    /// Mean autopilot coverage as an integer percentage.
    pub autopilot: i64,
    /// Mean autopilot minus the registry target, one decimal.
    pub autopilot_gap: f64,
    /// Registry autopilot target as an integer percentage (0 when absent).
    pub autopilot_target: i64,
    /// Total bill for the suite.
    pub bill: f64,
    /// Share of the global bill, percentage with one decimal.
    pub bill_share: f64,
    /// Mean cost ratio, rounded to two decimals.
    pub cpr: f64,
    /// Distinct connector count across the suite's agents.
    pub connectors: usize,
    /// Rounded mean bill per agent.
    pub avg_bill: i64,
}

/// Result of a full suite rollup: the global summary plus one suite summary
/// per distinct suite, sorted descending by bill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuiteRollup {
    pub global: GlobalSummary,
    pub suites: Vec<SuiteSummary>,
}

impl AgentRecord {
    /// Creates a bare record with zeroed metrics, mostly useful in tests.
    #[allow(dead_code)] // Builder utility
    pub fn new(suite: impl Into<String>) -> Self {
        Self {
            suite: suite.into(),
            suite_description: String::new(),
            metrics: AgentMetrics::default(),
            autopilot_coverage: 0.0,
            connectors: Vec::new(),
        }
    }
}

impl SuiteSummary {
    /// Display label: the registry alias when present, else the identifier.
    pub fn display_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.suite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_record_from_camel_case_json() {
        let json = r#"{
            "suite": "growth",
            "suiteDescription": "Growth suite",
            "metrics": {
                "outcome": 88,
                "bill": 1200.5,
                "cpr": 3.2,
                "evidenceReplies": 14,
                "cps": 230
            },
            "autopilotCoverage": 0.72,
            "connectors": ["crm", "mail"]
        }"#;

        let agent: AgentRecord = serde_json::from_str(json).unwrap();
        assert_eq!(agent.suite, "growth");
        assert_eq!(agent.metrics.evidence_replies, 14);
        assert_eq!(agent.metrics.cps, 230);
        assert_eq!(agent.autopilot_coverage, 0.72);
        assert_eq!(agent.connectors.len(), 2);
    }

    #[test]
    fn test_optional_fields_default() {
        let json = r#"{
            "suite": "growth",
            "metrics": { "outcome": 1, "bill": 2, "cpr": 3, "evidenceReplies": 0, "cps": 0 },
            "autopilotCoverage": 0.5
        }"#;

        let agent: AgentRecord = serde_json::from_str(json).unwrap();
        assert!(agent.suite_description.is_empty());
        assert!(agent.connectors.is_empty());
    }

    #[test]
    fn test_summary_serializes_camel_case() {
        let summary = GlobalSummary {
            outcome_index: 85,
            bill: 300.0,
            cpr: "2.50".to_string(),
            autopilot: 60,
            evidence: 10,
            touchpoints: 20,
            agent_count: 2,
        };

        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"outcomeIndex\":85"));
        assert!(json.contains("\"agentCount\":2"));
    }

    #[test]
    fn test_display_name_falls_back_to_identifier() {
        let summary = SuiteSummary {
            suite: "ops".to_string(),
            description: String::new(),
            alias: None,
            focus: None,
            anchor: "ops".to_string(),
            agents: 1,
            headcount_share: 100.0,
            outcome: 0,
            conversion_lift: 0.0,
            autopilot: 0,
            autopilot_gap: 0.0,
            autopilot_target: 0,
            bill: 0.0,
            bill_share: 0.0,
            cpr: 0.0,
            connectors: 0,
            avg_bill: 0,
        };

        assert_eq!(summary.display_name(), "ops");

        let aliased = SuiteSummary {
            alias: Some("Ops™".to_string()),
            ..summary
        };
        assert_eq!(aliased.display_name(), "Ops™");
    }
}
