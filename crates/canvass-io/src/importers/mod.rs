//! GridLAB-D model importers.
//!
//! [`glm`] holds the line classifier that turns a .glm document into a
//! stream of styled graph events for the DOT emitter.

pub mod glm;

pub use glm::{
    classify_glm_file, classify_glm_str, AnnotatedEdge, EdgeColor, EdgeStyle, GraphEvent, NodeShape,
};
