//! # canvass-io: Feeder Model I/O & Translation
//!
//! Text-format translation between GridLAB-D models and other feeder
//! representations:
//!
//! - **GLM -> Graphviz**: [`importers::glm`] scans a GridLAB-D model
//!   line-by-line and classifies its electrical objects into styled graph
//!   edges; [`exporters::dot`] serializes them as a DOT document for
//!   visual layout.
//! - **Tables -> GLM**: [`sources::tables`] loads node/edge survey tables
//!   and [`exporters::glm`] synthesizes a complete, runnable GridLAB-D
//!   model from them, deriving overhead-line lengths from node
//!   coordinates.
//!
//! The two pipelines share the GLM textual grammar but no code paths.
//!
//! Operations that skip items (unsupported edge kinds, malformed rows,
//! unknown sensor targets) return [`canvass_core::Diagnostics`] alongside
//! their output instead of printing; hard failures use
//! [`canvass_core::CanvassError`].

pub mod exporters;
pub mod importers;
pub mod sources;
