//! Agent catalog loading.
//!
//! This module is the input boundary: it reads the JSON agent list the
//! engine consumes and fails fast on malformed records, so the aggregation
//! functions themselves never have to validate shapes.

use crate::models::AgentRecord;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Structural error raised at the catalog boundary.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("catalog is not a valid JSON agent list: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("agent #{index} ({suite}) has a malformed record: {reason}")]
    Shape {
        index: usize,
        suite: String,
        reason: String,
    },
}

/// Load and validate an agent catalog from a JSON file.
///
/// The file must contain a JSON array of agent records in the catalog
/// export shape (camelCase fields). Any structural problem is reported as
/// a single [`CatalogError`]; there are no partial results.
pub fn load_catalog(path: &Path) -> Result<Vec<AgentRecord>, CatalogError> {
    let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let agents = parse_catalog(&content)?;

    debug!("Loaded {} agents from {}", agents.len(), path.display());
    Ok(agents)
}

/// Parse and validate a catalog from raw JSON content.
pub fn parse_catalog(content: &str) -> Result<Vec<AgentRecord>, CatalogError> {
    let agents: Vec<AgentRecord> = serde_json::from_str(content)?;

    for (index, agent) in agents.iter().enumerate() {
        validate_record(index, agent)?;
    }

    Ok(agents)
}

/// Reject records whose numeric fields the engine's arithmetic cannot
/// meaningfully aggregate.
fn validate_record(index: usize, agent: &AgentRecord) -> Result<(), CatalogError> {
    let shape_error = |reason: String| CatalogError::Shape {
        index,
        suite: agent.suite.clone(),
        reason,
    };

    if agent.suite.is_empty() {
        return Err(shape_error("suite identifier is empty".to_string()));
    }

    let m = &agent.metrics;
    if !m.outcome.is_finite() || !m.bill.is_finite() || !m.cpr.is_finite() {
        return Err(shape_error("metrics contain a non-finite value".to_string()));
    }

    if m.bill < 0.0 {
        return Err(shape_error(format!("bill is negative ({})", m.bill)));
    }

    if !(0.0..=1.0).contains(&agent.autopilot_coverage) {
        return Err(shape_error(format!(
            "autopilotCoverage {} is outside [0, 1]",
            agent.autopilot_coverage
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample_json() -> &'static str {
        r#"[
            {
                "suite": "growth",
                "suiteDescription": "Growth suite",
                "metrics": {
                    "outcome": 88,
                    "bill": 1200,
                    "cpr": 3.2,
                    "evidenceReplies": 14,
                    "cps": 230
                },
                "autopilotCoverage": 0.72,
                "connectors": ["crm", "mail"]
            },
            {
                "suite": "ops",
                "metrics": {
                    "outcome": 75,
                    "bill": 400,
                    "cpr": 1.1,
                    "evidenceReplies": 3,
                    "cps": 40
                },
                "autopilotCoverage": 0.4
            }
        ]"#
    }

    #[test]
    fn test_parse_valid_catalog() {
        let agents = parse_catalog(sample_json()).unwrap();
        assert_eq!(agents.len(), 2);
        assert_eq!(agents[0].suite, "growth");
        assert_eq!(agents[1].connectors.len(), 0);
    }

    #[test]
    fn test_load_catalog_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(sample_json().as_bytes()).unwrap();

        let agents = load_catalog(file.path()).unwrap();
        assert_eq!(agents.len(), 2);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_catalog(Path::new("/nonexistent/agents.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let err = parse_catalog("{ not json").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn test_object_instead_of_array_is_parse_error() {
        let err = parse_catalog(r#"{"agents": []}"#).unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn test_autopilot_out_of_range_is_shape_error() {
        let json = r#"[{
            "suite": "growth",
            "metrics": { "outcome": 88, "bill": 1, "cpr": 1, "evidenceReplies": 0, "cps": 0 },
            "autopilotCoverage": 1.5
        }]"#;

        let err = parse_catalog(json).unwrap_err();
        assert!(matches!(err, CatalogError::Shape { index: 0, .. }));
    }

    #[test]
    fn test_negative_bill_is_shape_error() {
        let json = r#"[{
            "suite": "growth",
            "metrics": { "outcome": 88, "bill": -5, "cpr": 1, "evidenceReplies": 0, "cps": 0 },
            "autopilotCoverage": 0.5
        }]"#;

        let err = parse_catalog(json).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("bill is negative"));
    }

    #[test]
    fn test_empty_suite_is_shape_error() {
        let json = r#"[{
            "suite": "",
            "metrics": { "outcome": 88, "bill": 1, "cpr": 1, "evidenceReplies": 0, "cps": 0 },
            "autopilotCoverage": 0.5
        }]"#;

        let err = parse_catalog(json).unwrap_err();
        assert!(matches!(err, CatalogError::Shape { .. }));
    }

    #[test]
    fn test_empty_array_is_valid() {
        let agents = parse_catalog("[]").unwrap();
        assert!(agents.is_empty());
    }
}
