//! Data model for marble diagrams

use serde::Deserialize;

use crate::token::Token;

/// A complete marble diagram description
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramSpec {
    /// Identifier, used by callers to name the output
    pub name: String,
    /// Title shown in the header
    pub title: String,
    /// Subtitle shown under the title
    pub description: String,
    /// Canvas width in pixels
    pub width: f64,
    /// Canvas height in pixels
    pub height: f64,
    /// Lanes, top to bottom
    pub lanes: Vec<Lane>,
}

impl DiagramSpec {
    pub fn new(name: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            name: name.into(),
            title: String::new(),
            description: String::new(),
            width,
            height,
            lanes: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Append a lane with inferred role and annotation settings
    pub fn lane(mut self, name: impl Into<String>, notation: impl Into<String>) -> Self {
        self.lanes.push(Lane::new(name, notation));
        self
    }

    /// Append a fully specified lane
    pub fn with_lane(mut self, lane: Lane) -> Self {
        self.lanes.push(lane);
        self
    }

    /// Look up a lane by name
    pub fn find_lane_mut(&mut self, name: &str) -> Option<&mut Lane> {
        self.lanes.iter_mut().find(|l| l.name == name)
    }
}

/// One named stream of events
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lane {
    pub name: String,
    /// Raw marble notation
    pub notation: String,
    /// Which background band the lane is shaded into
    pub role: LaneRole,
    /// Draw `offset: n` / `EOF` annotations under messages and completion
    pub offsets: bool,
}

impl Lane {
    /// Create a lane, inferring role and offset annotations from its name
    pub fn new(name: impl Into<String>, notation: impl Into<String>) -> Self {
        let name = name.into();
        let role = LaneRole::infer(&name);
        let offsets = Lane::infer_offsets(&name);
        Self {
            name,
            notation: notation.into(),
            role,
            offsets,
        }
    }

    pub fn with_role(mut self, role: LaneRole) -> Self {
        self.role = role;
        self
    }

    pub fn with_offsets(mut self, offsets: bool) -> Self {
        self.offsets = offsets;
        self
    }

    /// Partition and topic lanes behave like a log and get offset labels
    pub fn infer_offsets(name: &str) -> bool {
        let name = name.to_lowercase();
        OFFSET_KEYWORDS.iter().any(|k| name.contains(k))
    }

    /// Display label: name with an uppercased first letter
    pub fn label(&self) -> String {
        let mut chars = self.name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

const OFFSET_KEYWORDS: &[&str] = &["partition", "topic"];

const SOURCE_KEYWORDS: &[&str] = &["producer", "message"];
const INTERMEDIATE_KEYWORDS: &[&str] = &["topic", "partition", "buffer"];
const SINK_KEYWORDS: &[&str] = &[
    "consumer",
    "processing",
    "commit",
    "retry",
    "dlq",
    "lag",
    "catch_up",
    "compact",
];

/// Conceptual role of a lane in the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LaneRole {
    /// Producers
    Source,
    /// Topics, partitions, buffers
    Intermediate,
    /// Consumers and downstream processing
    Sink,
    /// Matches no keyword; never shaded
    #[default]
    Unclassified,
}

impl LaneRole {
    /// Infer a role by case-insensitive keyword matching on a lane name
    pub fn infer(name: &str) -> LaneRole {
        let name = name.to_lowercase();
        let matches = |keywords: &[&str]| keywords.iter().any(|k| name.contains(k));
        if matches(SOURCE_KEYWORDS) {
            LaneRole::Source
        } else if matches(INTERMEDIATE_KEYWORDS) {
            LaneRole::Intermediate
        } else if matches(SINK_KEYWORDS) {
            LaneRole::Sink
        } else {
            LaneRole::Unclassified
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LaneRole::Source => "source",
            LaneRole::Intermediate => "intermediate",
            LaneRole::Sink => "sink",
            LaneRole::Unclassified => "unclassified",
        }
    }

    pub fn by_name(name: &str) -> Option<LaneRole> {
        match name.to_lowercase().as_str() {
            "source" => Some(LaneRole::Source),
            "intermediate" => Some(LaneRole::Intermediate),
            "sink" => Some(LaneRole::Sink),
            "unclassified" => Some(LaneRole::Unclassified),
            _ => None,
        }
    }
}

/// A visible token positioned in time, before layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub token: Token,
    /// Frame the token occupies
    pub frame: usize,
    /// Messages seen in the lane before this event; for a message this is
    /// its own zero-based offset
    pub sequence: usize,
}

/// An event positioned on the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedEvent {
    pub lane: String,
    pub event: Event,
    pub x: f64,
    pub y: f64,
}
