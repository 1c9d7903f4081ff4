//! The aggregation engine.
//!
//! Two pure functions fold a list of agent records into summary statistics:
//! [`compute_global_metrics`] produces the catalog-wide rollup, and
//! [`compute_suite_metrics`] groups agents by suite, joins the static suite
//! registry, and derives comparative indicators (share of total, lift vs.
//! baseline, gap vs. target). Both are deterministic, allocate fresh output
//! on every call, and never mutate their inputs.

use crate::config::SuiteRegistry;
use crate::models::{AgentRecord, GlobalSummary, SuiteRollup, SuiteSummary};
use std::collections::{HashMap, HashSet};

/// Divisor-safe agent count: at least 1, so means over an empty group
/// degrade to zero instead of dividing by zero.
fn safe_count(count: usize) -> f64 {
    count.max(1) as f64
}

/// Round to the nearest integer, ties away from zero. Matches round-half-up
/// for the non-negative values the summary fields take.
fn round_whole(value: f64) -> i64 {
    value.round() as i64
}

/// Round to one decimal place.
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Round to two decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Derive a URL/DOM-safe anchor slug from a suite identifier.
///
/// Alphanumeric characters are lowercased and kept (Unicode alphanumerics
/// pass through, so CJK suite names stay distinct); every other run of
/// characters collapses into a single `-`. An identifier with no
/// alphanumeric characters at all falls back to `"suite"`.
pub fn suite_anchor(suite: &str) -> String {
    let mut slug = String::new();
    let mut pending_dash = false;

    for ch in suite.chars() {
        if ch.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(ch.to_lowercase());
        } else {
            pending_dash = true;
        }
    }

    if slug.is_empty() {
        "suite".to_string()
    } else {
        slug
    }
}

/// Compute the catalog-wide rollup.
///
/// Folds six running totals over the agent list and derives the rounded
/// means. An empty input yields an all-zero summary with `cpr == "0.00"`.
pub fn compute_global_metrics(agents: &[AgentRecord]) -> GlobalSummary {
    let mut outcome = 0.0;
    let mut bill = 0.0;
    let mut cpr = 0.0;
    let mut autopilot = 0.0;
    let mut evidence: u64 = 0;
    let mut touchpoints: u64 = 0;

    for agent in agents {
        outcome += agent.metrics.outcome;
        bill += agent.metrics.bill;
        cpr += agent.metrics.cpr;
        autopilot += agent.autopilot_coverage;
        evidence += agent.metrics.evidence_replies;
        touchpoints += agent.metrics.cps;
    }

    let count = safe_count(agents.len());

    GlobalSummary {
        outcome_index: round_whole(outcome / count),
        bill,
        cpr: format!("{:.2}", round2(cpr / count)),
        autopilot: round_whole((autopilot / count) * 100.0),
        evidence,
        touchpoints,
        agent_count: agents.len(),
    }
}

/// Accumulator for one suite group.
struct SuiteBucket {
    suite: String,
    description: String,
    agents: usize,
    outcome_sum: f64,
    bill: f64,
    cpr_sum: f64,
    autopilot_sum: f64,
    connectors: HashSet<String>,
}

impl SuiteBucket {
    fn new(agent: &AgentRecord) -> Self {
        Self {
            suite: agent.suite.clone(),
            description: agent.suite_description.clone(),
            agents: 0,
            outcome_sum: 0.0,
            bill: 0.0,
            cpr_sum: 0.0,
            autopilot_sum: 0.0,
            connectors: HashSet::new(),
        }
    }

    fn add(&mut self, agent: &AgentRecord) {
        self.agents += 1;
        self.outcome_sum += agent.metrics.outcome;
        self.bill += agent.metrics.bill;
        self.cpr_sum += agent.metrics.cpr;
        self.autopilot_sum += agent.autopilot_coverage;
        for connector in &agent.connectors {
            self.connectors.insert(connector.clone());
        }
    }
}

/// Compute the full suite rollup: the global summary plus one summary per
/// distinct suite in the input, joined against `registry` and sorted
/// descending by total bill.
///
/// Suites absent from the registry still appear in the output; their
/// metadata fields default (alias/focus absent, baseline and target 0) and
/// the conversion lift falls back to the global outcome index as its
/// baseline. The sort is stable, so suites with equal bills keep their
/// first-seen input order.
pub fn compute_suite_metrics(agents: &[AgentRecord], registry: &SuiteRegistry) -> SuiteRollup {
    let global = compute_global_metrics(agents);

    // Group by suite, preserving first-seen order for stable tie-breaking.
    let mut order: Vec<SuiteBucket> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for agent in agents {
        let slot = *index.entry(agent.suite.clone()).or_insert_with(|| {
            order.push(SuiteBucket::new(agent));
            order.len() - 1
        });
        order[slot].add(agent);
    }

    let mut suites: Vec<SuiteSummary> = order
        .into_iter()
        .map(|bucket| summarize_suite(bucket, &global, registry))
        .collect();

    // Stable sort keeps first-seen order for equal bills.
    suites.sort_by(|a, b| {
        b.bill
            .partial_cmp(&a.bill)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    SuiteRollup { global, suites }
}

/// Join one suite bucket against the registry and derive its summary.
fn summarize_suite(
    bucket: SuiteBucket,
    global: &GlobalSummary,
    registry: &SuiteRegistry,
) -> SuiteSummary {
    let meta = registry.get(&bucket.suite);
    let count = safe_count(bucket.agents);

    let avg_outcome = round_whole(bucket.outcome_sum / count);
    let avg_autopilot = round_whole((bucket.autopilot_sum / count) * 100.0);
    let avg_cpr = bucket.cpr_sum / count;

    let headcount_share = if global.agent_count == 0 {
        // Zero agents in the catalog means zero share, not a NaN.
        0.0
    } else {
        round1((bucket.agents as f64 / global.agent_count as f64) * 100.0)
    };

    let bill_share = if global.bill != 0.0 {
        round1((bucket.bill / global.bill) * 100.0)
    } else {
        0.0
    };

    let autopilot_target = meta
        .map(|m| round_whole(m.autopilot_target))
        .unwrap_or(0);

    // Lift baseline precedence: suite baseline, else the global outcome
    // index, else 1 to keep the division defined.
    let baseline = meta
        .map(|m| m.baseline_outcome)
        .filter(|b| *b != 0.0)
        .or_else(|| {
            if global.outcome_index != 0 {
                Some(global.outcome_index as f64)
            } else {
                None
            }
        })
        .unwrap_or(1.0);

    let conversion_lift = round1((avg_outcome as f64 / baseline - 1.0) * 100.0);
    let autopilot_gap = round1(avg_autopilot as f64 - autopilot_target as f64);

    SuiteSummary {
        anchor: suite_anchor(&bucket.suite),
        suite: bucket.suite,
        description: bucket.description,
        alias: meta.map(|m| m.alias.clone()),
        focus: meta.map(|m| m.focus.clone()),
        agents: bucket.agents,
        headcount_share,
        outcome: avg_outcome,
        conversion_lift,
        autopilot: avg_autopilot,
        autopilot_gap,
        autopilot_target,
        bill: bucket.bill,
        bill_share,
        cpr: round2(avg_cpr),
        connectors: bucket.connectors.len(),
        avg_bill: round_whole(bucket.bill / count),
    }
}
