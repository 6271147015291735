//! # canvass-core: Distribution Feeder Modeling Core
//!
//! Fundamental data structures shared by the canvass translation pipelines.
//!
//! A feeder is described by tabular survey data: [`NodeRecord`]s carry a
//! geographic location, a nominal voltage, and an electrical role
//! ([`BusType`]); [`EdgeRecord`]s connect nodes with a typed conductor
//! ([`EdgeKind`]). Both are loaded once per run and treated as immutable.
//!
//! ## Modules
//!
//! - [`diagnostics`] - Structured warning/error collection for skip-and-continue operations
//! - [`error`] - Unified [`CanvassError`] type
//! - [`geo`] - Great-circle distances and coordinate projection
//!
//! The `canvass-io` crate builds on these types to read GridLAB-D (.glm)
//! models, emit Graphviz layouts, and synthesize new models.

use serde::{Deserialize, Serialize};

pub mod diagnostics;
pub mod error;
pub mod geo;

pub use diagnostics::{DiagnosticIssue, Diagnostics, Severity};
pub use error::{CanvassError, CanvassResult};

/// A point on the earth in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Electrical role of a node. SWING designates the reference bus.
///
/// Valid feeders have exactly one SWING node; this is an input-validity
/// assumption, not something the toolkit enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BusType {
    Swing,
    Pq,
}

impl BusType {
    /// Map a survey-table label onto a bus type. Anything other than the
    /// literal `SWING` is treated as a plain load bus.
    pub fn from_label(label: &str) -> Self {
        if label.trim() == "SWING" {
            BusType::Swing
        } else {
            BusType::Pq
        }
    }

    pub fn is_swing(self) -> bool {
        matches!(self, BusType::Swing)
    }
}

/// One node row from the feeder survey tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub name: String,
    pub geo: GeoPoint,
    pub nominal_voltage: f64,
    pub bus_type: BusType,
}

/// Conductor kinds recognized by the translation pipelines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeKind {
    OverheadLine,
    UndergroundLine,
    Transformer,
    TriplexLine,
    Fuse,
}

impl EdgeKind {
    /// Map an edge-table kind label onto an [`EdgeKind`].
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "OH_Line" => Some(EdgeKind::OverheadLine),
            "UG_Line" => Some(EdgeKind::UndergroundLine),
            "Transformer" => Some(EdgeKind::Transformer),
            "Triplex_Line" => Some(EdgeKind::TriplexLine),
            "Fuse" => Some(EdgeKind::Fuse),
            _ => None,
        }
    }

    /// GridLAB-D object type name for this kind.
    pub fn glm_object(self) -> &'static str {
        match self {
            EdgeKind::OverheadLine => "overhead_line",
            EdgeKind::UndergroundLine => "underground_line",
            EdgeKind::Transformer => "transformer",
            EdgeKind::TriplexLine => "triplex_line",
            EdgeKind::Fuse => "fuse",
        }
    }
}

/// One edge row from the feeder survey tables.
///
/// `length_ft`, when present, overrides the geometry-derived length during
/// synthesis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub name: String,
    pub kind: EdgeKind,
    pub from_node: String,
    pub to_node: String,
    pub phases: String,
    pub length_ft: Option<f64>,
}

/// A request to instrument a node with a simulated sensor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorRequest {
    pub node: String,
    pub kind: String,
}

impl SensorRequest {
    /// Merging-unit PMU, the default sensor kind.
    pub fn mpmu(node: impl Into<String>) -> Self {
        Self {
            node: node.into(),
            kind: "mpmu".to_string(),
        }
    }
}

/// Project identity passed explicitly into every operation that names its
/// outputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub author: String,
}

impl Project {
    /// Conventional file name of the synthesized model for this project.
    pub fn model_filename(&self) -> String {
        format!("{}_model.glm", self.name)
    }
}

/// An in-memory feeder: the node and edge tables for one synthesis run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Feeder {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
}

impl Feeder {
    pub fn new(nodes: Vec<NodeRecord>, edges: Vec<EdgeRecord>) -> Self {
        Self { nodes, edges }
    }

    /// Look up a node by name.
    pub fn node(&self, name: &str) -> Option<&NodeRecord> {
        self.nodes.iter().find(|n| n.name == name)
    }
}
