//! Road network components - nodes, edges and road classes

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Meters, NodeId, Seconds};

/// Road graph node
#[derive(Debug, Clone)]
pub struct RoadNode {
    /// Identifier of the node in the source data
    pub id: NodeId,
}

/// Road graph edge (directed road segment)
#[derive(Debug, Clone)]
pub struct RoadEdge {
    /// Segment length in meters
    pub distance: Meters,
    /// Nominal traversal time in seconds
    pub duration: Seconds,
    pub highway: HighwayClass,
    /// Way the segment belongs to, used to count way changes along a path
    pub way_id: Option<i64>,
}

impl RoadEdge {
    pub fn new(distance: Meters, duration: Seconds, highway: HighwayClass) -> Self {
        Self {
            distance,
            duration,
            highway,
            way_id: None,
        }
    }

    pub fn with_way_id(mut self, way_id: i64) -> Self {
        self.way_id = Some(way_id);
        self
    }
}

/// Road class of an edge, ordered from least to most important
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HighwayClass {
    Residential,
    Unclassified,
    Tertiary,
    Secondary,
    Primary,
    Trunk,
    Motorway,
}

impl HighwayClass {
    /// Classes in matching order, most important first
    pub const PRIORITY: [HighwayClass; 7] = [
        HighwayClass::Motorway,
        HighwayClass::Trunk,
        HighwayClass::Primary,
        HighwayClass::Secondary,
        HighwayClass::Tertiary,
        HighwayClass::Unclassified,
        HighwayClass::Residential,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HighwayClass::Motorway => "motorway",
            HighwayClass::Trunk => "trunk",
            HighwayClass::Primary => "primary",
            HighwayClass::Secondary => "secondary",
            HighwayClass::Tertiary => "tertiary",
            HighwayClass::Unclassified => "unclassified",
            HighwayClass::Residential => "residential",
        }
    }

    /// Numeric rank used for peak detection, `motorway = 7` down to `residential = 1`
    pub fn rank(self) -> u8 {
        match self {
            HighwayClass::Motorway => 7,
            HighwayClass::Trunk => 6,
            HighwayClass::Primary => 5,
            HighwayClass::Secondary => 4,
            HighwayClass::Tertiary => 3,
            HighwayClass::Unclassified => 2,
            HighwayClass::Residential => 1,
        }
    }

    /// Classify a raw `highway` tag.
    ///
    /// The tag may hold several values (`"['primary', 'secondary']"`) or a
    /// link variant (`"motorway_link"`); the first class of [`Self::PRIORITY`]
    /// whose name occurs anywhere in the tag wins. Tags matching nothing
    /// (`"living_street"`, `"service"`, empty) are treated as residential.
    pub fn from_tag(tag: &str) -> Self {
        Self::PRIORITY
            .into_iter()
            .find(|class| tag.contains(class.as_str()))
            .unwrap_or(HighwayClass::Residential)
    }
}

impl fmt::Display for HighwayClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
