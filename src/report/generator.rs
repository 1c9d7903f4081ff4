//! Markdown and JSON report generation.
//!
//! This module renders a computed [`SuiteRollup`] into a dashboard-style
//! Markdown report or a JSON document. It is a pure consumer of the
//! engine's output; nothing here feeds back into the computation.

use crate::models::{GlobalSummary, SuiteRollup, SuiteSummary};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Presentation context for a report.
#[derive(Debug, Clone)]
pub struct ReportContext {
    /// Report title.
    pub title: String,
    /// Where the agent list came from, for the metadata section.
    pub catalog: String,
    /// Timestamp of the rollup.
    pub generated_at: DateTime<Utc>,
    /// Render a detailed section per suite in addition to the ranking table.
    pub include_suite_sections: bool,
}

/// Generate a complete Markdown report.
pub fn generate_markdown_report(rollup: &SuiteRollup, context: &ReportContext) -> String {
    let mut output = String::new();

    output.push_str(&format!("# {}\n\n", context.title));
    output.push_str(&generate_metadata_section(rollup, context));
    output.push_str(&generate_global_section(&rollup.global));
    output.push_str(&generate_ranking_section(&rollup.suites));

    if context.include_suite_sections {
        for suite in &rollup.suites {
            output.push_str(&generate_suite_section(suite));
        }
    }

    output.push_str(&generate_footer());

    output
}

/// Generate the metadata section.
fn generate_metadata_section(rollup: &SuiteRollup, context: &ReportContext) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!("- **Catalog:** {}\n", context.catalog));
    section.push_str(&format!(
        "- **Generated:** {}\n",
        context.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!("- **Agents:** {}\n", rollup.global.agent_count));
    section.push_str(&format!("- **Suites:** {}\n", rollup.suites.len()));
    section.push('\n');

    section
}

/// Generate the global summary section.
fn generate_global_section(global: &GlobalSummary) -> String {
    let mut section = String::new();

    section.push_str("## Global Summary\n\n");
    section.push_str("| Agents | Outcome Index | Autopilot | Total Bill | Mean CPR | Evidence | Touchpoints |\n");
    section.push_str("|:---:|:---:|:---:|:---:|:---:|:---:|:---:|\n");
    section.push_str(&format!(
        "| {} | {} | {}% | {} | {} | {} | {} |\n\n",
        global.agent_count,
        global.outcome_index,
        global.autopilot,
        format_amount(global.bill),
        global.cpr,
        global.evidence,
        global.touchpoints
    ));

    section
}

/// Generate the suite ranking table, ordered as the engine returned it
/// (descending by bill).
fn generate_ranking_section(suites: &[SuiteSummary]) -> String {
    let mut section = String::new();

    section.push_str("## Suite Ranking\n\n");

    if suites.is_empty() {
        section.push_str("No suites in the catalog.\n\n");
        return section;
    }

    section.push_str(
        "| # | Suite | Agents | Share | Outcome | Lift | Autopilot | Gap | Bill | Bill Share | CPR | Connectors |\n",
    );
    section.push_str("|:---:|:---|:---:|:---:|:---:|:---:|:---:|:---:|:---:|:---:|:---:|:---:|\n");

    for (rank, suite) in suites.iter().enumerate() {
        section.push_str(&format!(
            "| {} | [{}](#{}) | {} | {:.1}% | {} | {:+.1}% | {}% | {:+.1} | {} | {:.1}% | {:.2} | {} |\n",
            rank + 1,
            suite.display_name(),
            suite.anchor,
            suite.agents,
            suite.headcount_share,
            suite.outcome,
            suite.conversion_lift,
            suite.autopilot,
            suite.autopilot_gap,
            format_amount(suite.bill),
            suite.bill_share,
            suite.cpr,
            suite.connectors
        ));
    }
    section.push('\n');

    section
}

/// Generate the detail section for one suite.
fn generate_suite_section(suite: &SuiteSummary) -> String {
    let mut section = String::new();

    section.push_str(&format!(
        "### {} {{#{}}}\n\n",
        suite.display_name(),
        suite.anchor
    ));

    if let Some(ref focus) = suite.focus {
        section.push_str(&format!("*Focus: {}*\n\n", focus));
    }

    if !suite.description.is_empty() {
        section.push_str(&format!("{}\n\n", suite.description));
    }

    section.push_str(&format!(
        "- **Agents:** {} ({:.1}% of catalog)\n",
        suite.agents, suite.headcount_share
    ));
    section.push_str(&format!(
        "- **Outcome:** {} ({:+.1}% vs. baseline)\n",
        suite.outcome, suite.conversion_lift
    ));
    section.push_str(&format!(
        "- **Autopilot:** {}% (target {}%, gap {:+.1})\n",
        suite.autopilot, suite.autopilot_target, suite.autopilot_gap
    ));
    section.push_str(&format!(
        "- **Bill:** {} ({:.1}% of total, {} per agent)\n",
        format_amount(suite.bill),
        suite.bill_share,
        suite.avg_bill
    ));
    section.push_str(&format!("- **Mean CPR:** {:.2}\n", suite.cpr));
    section.push_str(&format!("- **Connectors:** {}\n\n", suite.connectors));

    section
}

/// Generate the report footer.
fn generate_footer() -> String {
    "---\n\n*Report generated by suitemetrics*\n".to_string()
}

/// Format a monetary amount: whole numbers without decimals, otherwise two.
fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{:.0}", amount)
    } else {
        format!("{:.2}", amount)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    title: &'a str,
    catalog: &'a str,
    generated_at: &'a DateTime<Utc>,
    global: &'a GlobalSummary,
    suites: &'a [SuiteSummary],
}

/// Generate a JSON report.
pub fn generate_json_report(rollup: &SuiteRollup, context: &ReportContext) -> Result<String> {
    let report = JsonReport {
        title: &context.title,
        catalog: &context.catalog,
        generated_at: &context.generated_at,
        global: &rollup.global,
        suites: &rollup.suites,
    };

    serde_json::to_string_pretty(&report).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_context() -> ReportContext {
        ReportContext {
            title: "Suite Performance Report".to_string(),
            catalog: "agents.json".to_string(),
            generated_at: Utc::now(),
            include_suite_sections: true,
        }
    }

    fn test_rollup() -> SuiteRollup {
        SuiteRollup {
            global: GlobalSummary {
                outcome_index: 85,
                bill: 300.0,
                cpr: "1.80".to_string(),
                autopilot: 60,
                evidence: 4,
                touchpoints: 10,
                agent_count: 2,
            },
            suites: vec![SuiteSummary {
                suite: "growth".to_string(),
                description: "Customer growth suite".to_string(),
                alias: Some("Growth™".to_string()),
                focus: Some("Customer growth".to_string()),
                anchor: "growth".to_string(),
                agents: 2,
                headcount_share: 100.0,
                outcome: 85,
                conversion_lift: -2.3,
                autopilot: 60,
                autopilot_gap: -15.0,
                autopilot_target: 75,
                bill: 300.0,
                bill_share: 100.0,
                cpr: 1.8,
                connectors: 3,
                avg_bill: 150,
            }],
        }
    }

    #[test]
    fn test_generate_markdown_report() {
        let markdown = generate_markdown_report(&test_rollup(), &test_context());

        assert!(markdown.contains("# Suite Performance Report"));
        assert!(markdown.contains("## Metadata"));
        assert!(markdown.contains("## Global Summary"));
        assert!(markdown.contains("## Suite Ranking"));
        assert!(markdown.contains("[Growth™](#growth)"));
        assert!(markdown.contains("### Growth™ {#growth}"));
        assert!(markdown.contains("-2.3%"));
    }

    #[test]
    fn test_suite_sections_can_be_disabled() {
        let mut context = test_context();
        context.include_suite_sections = false;

        let markdown = generate_markdown_report(&test_rollup(), &context);

        assert!(markdown.contains("## Suite Ranking"));
        assert!(!markdown.contains("### Growth™"));
    }

    #[test]
    fn test_empty_rollup_renders() {
        let rollup = SuiteRollup {
            global: GlobalSummary {
                outcome_index: 0,
                bill: 0.0,
                cpr: "0.00".to_string(),
                autopilot: 0,
                evidence: 0,
                touchpoints: 0,
                agent_count: 0,
            },
            suites: Vec::new(),
        };

        let markdown = generate_markdown_report(&rollup, &test_context());
        assert!(markdown.contains("No suites in the catalog."));
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(300.0), "300");
        assert_eq!(format_amount(300.5), "300.50");
    }

    #[test]
    fn test_generate_json_report() {
        let json = generate_json_report(&test_rollup(), &test_context()).unwrap();

        assert!(json.contains("\"global\""));
        assert!(json.contains("\"suites\""));
        assert!(json.contains("\"outcomeIndex\": 85"));
        assert!(json.contains("\"anchor\": \"growth\""));
    }
}
