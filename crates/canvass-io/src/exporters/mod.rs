//! Feeder model exporters.
//!
//! [`dot`] serializes classified graph events as a Graphviz document;
//! [`glm`] synthesizes GridLAB-D models from tabular feeder records.

pub mod dot;
pub mod glm;

pub use dot::{dot_document, export_dot};
pub use glm::{
    install_sensors, recorder_block, synthesize, BlockKind, GlmBlock, GlmDocument,
    DEFAULT_OH_CONFIG,
};
