//! Tabular feeder data sources.

pub mod tables;

pub use tables::{load_edges, load_feeder, load_nodes};
