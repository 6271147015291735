//! Graphviz DOT emitter for classified feeder graphs.
//!
//! Pure formatting: the classifier decides colors, styles, labels, and
//! node-shape switches; this module only serializes the event stream in
//! order. The document opens with a box default so the first shape event
//! only matters once a transformer has been classified.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::importers::glm::GraphEvent;

/// Serialize a graph-event stream as a DOT document.
pub fn dot_document(events: &[GraphEvent]) -> String {
    let mut out = String::new();
    out.push_str("digraph {\n");
    out.push_str("node [shape=box]\n");
    for event in events {
        match event {
            GraphEvent::Edge(edge) => {
                out.push_str(&format!(
                    "{} -> {}[style={} color={} label=\"{}\"]\n",
                    edge.from,
                    edge.to,
                    edge.style.as_str(),
                    edge.color.as_str(),
                    edge.label
                ));
            }
            GraphEvent::NodeShape(shape) => {
                out.push_str(&format!("node [shape={}]\n", shape.as_str()));
            }
        }
    }
    out.push_str("}\n");
    out
}

/// Write the DOT document for `events` to `path`.
pub fn export_dot(events: &[GraphEvent], path: &Path) -> Result<()> {
    fs::write(path, dot_document(events))
        .with_context(|| format!("writing layout {}", path.display()))?;
    Ok(())
}
