//! Diagram configuration documents
//!
//! Diagrams are usually described in a YAML document:
//!
//! ```yaml
//! diagrams:
//!   single-partition:
//!     title: Single Partition Processing
//!     description: Messages flowing through a single Kafka partition
//!     width: 800
//!     height: 300
//!     streams:
//!       producer: 'a---b---c---d---|'
//!       partition: 'a---b---c---d---|'
//!       consumer: '--a---b---c---d-|'
//!     roles:
//!       partition: intermediate
//! ```
//!
//! Diagram and stream order follow the document.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use thiserror::Error;
use tracing::warn;

use crate::ast::{DiagramSpec, Lane, LaneRole};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration has no `diagrams` mapping")]
    MissingDiagrams,

    #[error("Diagram names must be strings")]
    InvalidName,

    #[error("Stream `{lane}` in diagram `{diagram}` must be a string of marble notation")]
    InvalidStream { diagram: String, lane: String },

    #[error("Role given for unknown stream `{lane}` in diagram `{diagram}`")]
    UnknownLane { diagram: String, lane: String },
}

#[derive(Debug, Deserialize)]
struct Document {
    diagrams: Option<Mapping>,
}

#[derive(Debug, Deserialize)]
struct DiagramEntry {
    title: String,
    #[serde(default)]
    description: String,
    width: f64,
    height: f64,
    #[serde(default)]
    streams: Mapping,
    #[serde(default)]
    roles: BTreeMap<String, LaneRole>,
}

/// Parse every diagram in a YAML configuration document
pub fn from_yaml_str(input: &str) -> Result<Vec<DiagramSpec>, ConfigError> {
    let document: Document = serde_yaml::from_str(input)?;
    let diagrams = document.diagrams.ok_or(ConfigError::MissingDiagrams)?;

    diagrams
        .into_iter()
        .map(|(name, body)| {
            let name = name.as_str().ok_or(ConfigError::InvalidName)?.to_string();
            let entry: DiagramEntry = serde_yaml::from_value(body)?;
            build_spec(name, entry)
        })
        .collect()
}

fn build_spec(name: String, entry: DiagramEntry) -> Result<DiagramSpec, ConfigError> {
    let mut spec = DiagramSpec::new(name, entry.width, entry.height)
        .with_title(entry.title)
        .with_description(entry.description);

    for (lane, notation) in &entry.streams {
        let (Some(lane), Some(notation)) = (lane.as_str(), notation_str(notation)) else {
            return Err(ConfigError::InvalidStream {
                diagram: spec.name.clone(),
                lane: describe_key(lane),
            });
        };
        spec.lanes.push(Lane::new(lane, notation));
    }

    for (lane, role) in entry.roles {
        match spec.find_lane_mut(&lane) {
            Some(found) => found.role = role,
            None => {
                return Err(ConfigError::UnknownLane {
                    diagram: spec.name.clone(),
                    lane,
                });
            }
        }
    }

    Ok(spec)
}

/// Stream values are strings; an empty value means an empty lane
fn notation_str(value: &Value) -> Option<&str> {
    match value {
        Value::String(s) => Some(s.as_str()),
        Value::Null => Some(""),
        _ => None,
    }
}

fn describe_key(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
    }
}

/// Parse a configuration document, falling back to the built-in diagrams
/// when there is none or it cannot be used
pub fn load_or_default(input: Option<&str>) -> Vec<DiagramSpec> {
    let Some(input) = input else {
        warn!("no marble configuration found, using default diagrams");
        return default_diagrams();
    };

    match from_yaml_str(input) {
        Ok(specs) => specs,
        Err(e) => {
            warn!(error = %e, "could not load marble configuration, using default diagrams");
            default_diagrams()
        }
    }
}

/// Built-in Kafka diagrams
pub fn default_diagrams() -> Vec<DiagramSpec> {
    vec![
        DiagramSpec::new("single-partition", 800.0, 300.0)
            .with_title("Single Partition Processing")
            .with_description("Messages flowing through a single Kafka partition")
            .lane("producer", "a---b---c---d---|")
            .lane("partition", "a---b---c---d---|")
            .lane("consumer", "--a---b---c---d-|"),
        DiagramSpec::new("multiple-partitions", 1000.0, 400.0)
            .with_title("Multiple Partition Processing")
            .with_description("Messages distributed across multiple partitions")
            .lane("producer", "a---b---c---d---e---f---|")
            .lane("partition0", "a-------c-------e-----|")
            .lane("partition1", "---b-------d-------f-|")
            .lane("consumer", "--a---b---c---d---e---f-|"),
        DiagramSpec::new("partition-rebalancing", 1200.0, 500.0)
            .with_title("Consumer Group Rebalancing")
            .with_description("How consumers handle partition reassignment")
            .lane("partition0", "a---b---c---d---e---f---|")
            .lane("partition1", "---x---y---z---w-------|")
            .lane("consumer1", "a---b---c---d---e---f---|")
            .lane("consumer2", "---x---y---z---w-------|")
            .lane("rebalance", "-------R---------------|"),
        DiagramSpec::new("backpressure", 1000.0, 350.0)
            .with_title("Backpressure Handling")
            .with_description("How consumers handle high message rates")
            .lane("producer", "a-b-c-d-e-f-g-h-i-j-k-l-|")
            .lane("consumer", "a---b---c---d---e---f---|")
            .lane("buffer", "--b-c-d-e-f-g-h-i-j-k-l-|"),
        DiagramSpec::new("exactly-once", 1000.0, 400.0)
            .with_title("Exactly-Once Processing")
            .with_description("Ensuring messages are processed exactly once")
            .lane("message", "a---b---c---d---e---f---|")
            .lane("processing", "a---b---c---d---e---f---|")
            .lane("commit", "----a---b---c---d---e---f-|")
            .lane("duplicate", "-------c---------------|"),
    ]
}

/// Markdown index of rendered diagrams, one section per diagram
pub fn catalog_markdown(specs: &[DiagramSpec]) -> String {
    let mut out = String::from("# Kafka Partition Marble Diagrams\n\n");
    out.push_str(
        "This directory contains marble diagrams that visualize how Kafka partitions work.\n\n",
    );
    out.push_str("## Generated Diagrams\n");

    for spec in specs {
        out.push_str(&format!(
            "\n### {title}\n- **File**: `{name}.svg`\n- **Description**: {description}\n- **Dimensions**: {w}x{h}px\n",
            title = spec.title,
            name = spec.name,
            description = spec.description,
            w = spec.width,
            h = spec.height,
        ));
    }

    if let Some(first) = specs.first() {
        out.push_str("\n## Usage\n\nReference a diagram from Markdown:\n\n```markdown\n");
        out.push_str(&format!("![{}](./marbles/{}.svg)\n", first.title, first.name));
        out.push_str("```\n");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DOCUMENT: &str = r#"
diagrams:
  retries:
    title: Retry Topic
    description: Failed messages parked for a retry
    width: 900
    height: 450
    streams:
      consumer: 'a---X-------|'
      retry: '----a---a---|'
      dlq:
    roles:
      dlq: unclassified
  single:
    title: Single
    width: 600
    height: 200
    streams:
      producer: 'a|'
"#;

    #[test]
    fn test_document_order_is_kept() {
        let specs = from_yaml_str(DOCUMENT).unwrap();
        let names: Vec<_> = specs.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["retries", "single"]);

        let retries = &specs[0];
        assert_eq!(retries.title, "Retry Topic");
        assert_eq!((retries.width, retries.height), (900.0, 450.0));
        let lanes: Vec<_> = retries.lanes.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(lanes, vec!["consumer", "retry", "dlq"]);
        assert_eq!(retries.lanes[1].role, LaneRole::Sink);
        assert_eq!(retries.lanes[2].notation, "");
        assert_eq!(retries.lanes[2].role, LaneRole::Unclassified);
        assert_eq!(specs[1].description, "");
    }

    #[test]
    fn test_missing_diagrams() {
        assert!(matches!(
            from_yaml_str("other: 1"),
            Err(ConfigError::MissingDiagrams)
        ));
    }

    #[test]
    fn test_non_string_stream() {
        let doc = "diagrams:\n  d:\n    title: T\n    width: 1\n    height: 1\n    streams:\n      producer: [1, 2]\n";
        match from_yaml_str(doc) {
            Err(ConfigError::InvalidStream { diagram, lane }) => {
                assert_eq!(diagram, "d");
                assert_eq!(lane, "producer");
            }
            other => panic!("Expected InvalidStream, got {other:?}"),
        }
    }

    #[test]
    fn test_role_for_unknown_lane() {
        let doc = "diagrams:\n  d:\n    title: T\n    width: 1\n    height: 1\n    streams:\n      producer: 'a|'\n    roles:\n      consumer: sink\n";
        assert!(matches!(
            from_yaml_str(doc),
            Err(ConfigError::UnknownLane { .. })
        ));
    }

    #[test]
    fn test_missing_field_is_yaml_error() {
        let doc = "diagrams:\n  d:\n    title: T\n";
        assert!(matches!(from_yaml_str(doc), Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn test_fallback_to_defaults() {
        let defaults = default_diagrams();
        assert_eq!(load_or_default(None), defaults);
        assert_eq!(load_or_default(Some("diagrams: [")), defaults);
        assert_eq!(load_or_default(Some(DOCUMENT)).len(), 2);
    }

    #[test]
    fn test_default_diagram_roles() {
        let defaults = default_diagrams();
        assert_eq!(defaults.len(), 5);
        let rebalancing = &defaults[2];
        let roles: Vec<_> = rebalancing.lanes.iter().map(|l| l.role).collect();
        assert_eq!(
            roles,
            vec![
                LaneRole::Intermediate,
                LaneRole::Intermediate,
                LaneRole::Sink,
                LaneRole::Sink,
                LaneRole::Unclassified,
            ]
        );
    }

    #[test]
    fn test_catalog() {
        let catalog = catalog_markdown(&default_diagrams());
        assert!(catalog.contains("### Backpressure Handling"));
        assert!(catalog.contains("- **File**: `exactly-once.svg`"));
        assert!(catalog.contains("- **Dimensions**: 1200x500px"));
        assert!(catalog.contains("![Single Partition Processing](./marbles/single-partition.svg)"));
        assert!(!catalog_markdown(&[]).contains("## Usage"));
    }
}
