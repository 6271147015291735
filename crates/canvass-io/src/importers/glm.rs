//! GLM line classifier.
//!
//! Scans a GridLAB-D model in a single forward pass and classifies its
//! electrical objects into a stream of [`GraphEvent`]s: styled directed
//! edges plus node-shape switches. The scanner is a two-state machine
//! (`Start` / `AfterFrom`) with a small style accumulator that resets to
//! defaults after every emitted edge.
//!
//! There is no validation layer. The scanner assumes well-formed input and
//! silently produces an incomplete edge stream when the grammar deviates
//! (e.g. a `from` with no matching `to`). That fragility matches the
//! historical tooling this feeds and is relied on by existing datasets.

use std::fs;
use std::path::Path;

use serde::Serialize;

use canvass_core::{CanvassError, CanvassResult};

/// Edge color derived from the classified object kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeColor {
    Black,
    Red,
    Green,
    Blue,
}

impl EdgeColor {
    pub fn as_str(self) -> &'static str {
        match self {
            EdgeColor::Black => "black",
            EdgeColor::Red => "red",
            EdgeColor::Green => "green",
            EdgeColor::Blue => "blue",
        }
    }
}

/// Edge style derived from the phase string length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeStyle {
    Solid,
    Dashed,
    Bold,
}

impl EdgeStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            EdgeStyle::Solid => "solid",
            EdgeStyle::Dashed => "dashed",
            EdgeStyle::Bold => "bold",
        }
    }
}

/// Node shape in effect for subsequently declared nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeShape {
    Box,
    Oval,
}

impl NodeShape {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeShape::Box => "box",
            NodeShape::Oval => "oval",
        }
    }
}

/// A classified edge, complete once both endpoints have been seen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedEdge {
    pub from: String,
    pub to: String,
    pub color: EdgeColor,
    pub style: EdgeStyle,
    pub label: String,
}

/// One item of the classifier's ordered output stream.
///
/// Shape switches are events rather than per-node attributes because the
/// oval shape set by a transformer applies to every node declared after it
/// until reset. The emitter must preserve the ordering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GraphEvent {
    Edge(AnnotatedEdge),
    NodeShape(NodeShape),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Start,
    AfterFrom,
}

/// Transient scan state, reset to defaults after each emitted edge.
#[derive(Debug)]
struct ClassifierState {
    scan: ScanState,
    color: EdgeColor,
    style: EdgeStyle,
    label: String,
    pending_from: Option<String>,
}

impl ClassifierState {
    fn new() -> Self {
        Self {
            scan: ScanState::Start,
            color: EdgeColor::Black,
            style: EdgeStyle::Solid,
            label: "None".to_string(),
            pending_from: None,
        }
    }

    fn reset_after_edge(&mut self) {
        self.scan = ScanState::Start;
        self.color = EdgeColor::Black;
        self.style = EdgeStyle::Solid;
        self.label = "None".to_string();
        self.pending_from = None;
    }
}

/// DOT identifiers cannot carry `-` or `:`; both become `_`.
fn normalize_id(token: &str) -> String {
    token.trim_end_matches(';').replace(['-', ':'], "_")
}

fn second_token(line: &str) -> Option<&str> {
    line.split_whitespace().nth(1)
}

/// Bounded look-ahead for a `length` property inside an overhead or
/// underground line block, starting at the object header.
///
/// Returns the value (joined with its unit token when present) or `None`
/// once the closing brace is reached, in which case the caller's label
/// falls back to "None" even if an earlier block had set one.
fn length_lookahead(lines: &[&str], start: usize) -> Option<String> {
    let mut idx = start;
    loop {
        let line = lines.get(idx)?;
        if line.contains("length ") {
            let mut tokens = line.split_whitespace();
            tokens.next(); // "length"
            let value = tokens.next()?;
            return Some(match tokens.next() {
                Some(unit) => format!("{} {}", value, unit.trim_end_matches(';')),
                None => value.trim_end_matches(';').to_string(),
            });
        }
        idx += 1;
        if lines.get(idx).map_or(true, |next| next.contains('}')) {
            return None;
        }
    }
}

/// Classify a GLM document into an ordered graph-event stream.
///
/// Single forward pass, no backtracking; the only look-ahead is the
/// bounded `length` sub-scan, which never advances the main cursor.
pub fn classify_glm_str(content: &str) -> Vec<GraphEvent> {
    let lines: Vec<&str> = content.lines().collect();
    let mut events = Vec::new();
    let mut state = ClassifierState::new();

    for (idx, line) in lines.iter().enumerate() {
        if line.starts_with("//") {
            continue;
        }

        if line.contains("from") {
            if let Some(token) = second_token(line) {
                state.pending_from = Some(normalize_id(token));
                state.scan = ScanState::AfterFrom;
            }
        } else if state.scan == ScanState::AfterFrom && line.contains("to ") {
            if let (Some(from), Some(token)) = (state.pending_from.take(), second_token(line)) {
                let was_transformer = state.color == EdgeColor::Red;
                events.push(GraphEvent::Edge(AnnotatedEdge {
                    from,
                    to: normalize_id(token),
                    color: state.color,
                    style: state.style,
                    label: state.label.clone(),
                }));
                if was_transformer {
                    events.push(GraphEvent::NodeShape(NodeShape::Box));
                }
                state.reset_after_edge();
            }
        } else if line.contains("object underground_line") || line.contains("object overhead_line")
        {
            let value = length_lookahead(&lines, idx).unwrap_or_else(|| "None".to_string());
            let prefix = if line.contains("object underground_line") {
                "UG_line"
            } else {
                "OH_line"
            };
            state.label = format!("{prefix}\\n{value}");
        } else if line.contains("object transformer") {
            state.color = EdgeColor::Red;
            state.label = format!("transformer\\n{}", state.label);
            events.push(GraphEvent::NodeShape(NodeShape::Oval));
        } else if line.contains("object triplex_line") {
            state.color = EdgeColor::Green;
            state.label = format!("triplex_line\\n{}", state.label);
        } else if line.contains("object fuse") {
            state.color = EdgeColor::Blue;
            state.label = format!("Fuse\\n{}", state.label);
        } else if line.contains("phases ") {
            if let Some(token) = second_token(line) {
                let phases = token.trim_end_matches(';');
                if phases.len() > 3 {
                    state.style = EdgeStyle::Bold;
                } else if phases.len() == 3 {
                    state.style = EdgeStyle::Dashed;
                }
            }
        }
    }

    events
}

/// Classify a .glm file. Any other extension is rejected as
/// [`CanvassError::UnsupportedInput`] so directory batches can skip it.
pub fn classify_glm_file(path: &Path) -> CanvassResult<Vec<GraphEvent>> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("glm") => {}
        _ => {
            return Err(CanvassError::UnsupportedInput(format!(
                "{} is not a GridLAB-D model",
                path.display()
            )))
        }
    }
    let content = fs::read_to_string(path)?;
    Ok(classify_glm_str(&content))
}
