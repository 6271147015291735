//! GridLAB-D model synthesizer.
//!
//! Builds a [`GlmDocument`] from tabular feeder records and serializes it
//! with the fixed brace/semicolon/tab grammar GridLAB-D expects. Blocks are
//! appended strictly in the documented order (header, clock, modules,
//! defaults, nodes, edges) because the grammar is positionally
//! significant for legacy tooling; recorders are appended after the fact
//! by [`install_sensors`].
//!
//! Synthesis is deterministic: identical inputs render byte-identical
//! output.

use std::fs::OpenOptions;
use std::io::Write as _;
use std::path::Path;

use anyhow::{Context, Result};

use canvass_core::geo;
use canvass_core::{Diagnostics, EdgeKind, EdgeRecord, Feeder, Project, SensorRequest};

/// Name of the synthesized default overhead-line configuration.
pub const DEFAULT_OH_CONFIG: &str = "default_oh_line_config";

const START_TIME: &str = "'2017-07-10 00:00:00'";
const STOP_TIME: &str = "'2017-07-11 00:00:00'";

/// Default overhead-line impedance matrix, reproduced verbatim for
/// compatibility with models generated by earlier tooling.
const OH_LINE_IMPEDANCE: [(&str, &str); 9] = [
    ("z11", "0.45+1.07j"),
    ("z12", "0.15+0.50j"),
    ("z13", "0.15+0.38j"),
    ("z21", "0.15+0.50j"),
    ("z22", "0.46+1.04j"),
    ("z23", "0.15+0.42j"),
    ("z31", "0.15+0.38j"),
    ("z32", "0.15+0.42j"),
    ("z33", "0.46+1.06j"),
];

/// Kind tag of a top-level GLM block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockKind {
    Clock,
    Module(String),
    Object(String),
}

/// One GLM block: a kind tag plus properties in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct GlmBlock {
    pub kind: BlockKind,
    pub props: Vec<(String, String)>,
}

impl GlmBlock {
    pub fn clock() -> Self {
        Self {
            kind: BlockKind::Clock,
            props: Vec::new(),
        }
    }

    pub fn module(name: impl Into<String>) -> Self {
        Self {
            kind: BlockKind::Module(name.into()),
            props: Vec::new(),
        }
    }

    pub fn object(kind: impl Into<String>) -> Self {
        Self {
            kind: BlockKind::Object(kind.into()),
            props: Vec::new(),
        }
    }

    pub fn prop(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.props.push((key.into(), value.into()));
        self
    }

    /// Render this block with the tab-indented `key value;` grammar.
    /// Property-less modules collapse to the `module <name>;` short form.
    pub fn render_into(&self, out: &mut String) {
        let header = match &self.kind {
            BlockKind::Clock => "clock".to_string(),
            BlockKind::Module(name) => format!("module {name}"),
            BlockKind::Object(kind) => format!("object {kind}"),
        };
        if self.props.is_empty() {
            if let BlockKind::Module(_) = self.kind {
                out.push_str(&header);
                out.push_str(";\n");
                return;
            }
        }
        out.push_str(&header);
        out.push_str(" {\n");
        for (key, value) in &self.props {
            out.push_str(&format!("\t{key} {value};\n"));
        }
        out.push_str("}\n");
    }
}

/// An ordered GLM document: leading comment lines plus top-level blocks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlmDocument {
    pub comments: Vec<String>,
    pub blocks: Vec<GlmBlock>,
}

impl GlmDocument {
    pub fn push(&mut self, block: GlmBlock) {
        self.blocks.push(block);
    }

    /// Serialize the whole document exactly once.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for comment in &self.comments {
            out.push_str(&format!("// {comment}\n"));
        }
        if !self.comments.is_empty() {
            out.push('\n');
        }
        for (idx, block) in self.blocks.iter().enumerate() {
            if idx > 0 {
                out.push('\n');
            }
            block.render_into(&mut out);
        }
        out
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.render())
            .with_context(|| format!("writing model {}", path.display()))?;
        Ok(())
    }
}

/// Synthesize a complete GridLAB-D model from feeder records.
///
/// Emits, in order: project header comments, a 24-hour clock window, the
/// Newton-Raphson powerflow and tape modules, the default overhead-line
/// configuration, one node object per record (with `bustype SWING` only
/// for the designated swing node), and one overhead-line object per
/// OverheadLine edge with its length taken from the record or derived
/// from the endpoint coordinates. Other edge kinds are reported in the
/// returned diagnostics and produce no block.
pub fn synthesize(project: &Project, feeder: &Feeder) -> (GlmDocument, Diagnostics) {
    let mut doc = GlmDocument::default();
    let mut diag = Diagnostics::new();

    doc.comments = vec![
        format!("Project Name: {}", project.name),
        format!("Author: {}", project.author),
        "Auto-generated GridLAB-D model".to_string(),
    ];

    doc.push(
        GlmBlock::clock()
            .prop("starttime", START_TIME)
            .prop("stoptime", STOP_TIME),
    );
    doc.push(GlmBlock::module("powerflow").prop("solver_method", "NR"));
    doc.push(GlmBlock::module("tape"));

    let mut config = GlmBlock::object("line_configuration").prop("name", DEFAULT_OH_CONFIG);
    for (key, value) in OH_LINE_IMPEDANCE {
        config = config.prop(key, value);
    }
    doc.push(config);

    for node in &feeder.nodes {
        let mut block = GlmBlock::object("node")
            .prop("name", &node.name)
            .prop("phases", "ABCN")
            .prop("nominal_voltage", format!("{:.1}", node.nominal_voltage));
        if node.bus_type.is_swing() {
            block = block.prop("bustype", "SWING");
        }
        doc.push(block);
    }

    for edge in &feeder.edges {
        if edge.kind != EdgeKind::OverheadLine {
            diag.add_warning_with_entity(
                "skip",
                &format!("{} edges are not synthesized", edge.kind.glm_object()),
                &edge.name,
            );
            continue;
        }
        match overhead_length(feeder, edge) {
            Some(length) => doc.push(
                GlmBlock::object("overhead_line")
                    .prop("name", &edge.name)
                    .prop("phases", &edge.phases)
                    .prop("from", &edge.from_node)
                    .prop("to", &edge.to_node)
                    .prop("length", format!("{length:.1}"))
                    .prop("configuration", DEFAULT_OH_CONFIG),
            ),
            None => diag.add_error_with_entity(
                "skip",
                "edge endpoint missing from node table",
                &edge.name,
            ),
        }
    }

    (doc, diag)
}

/// Overhead-line length in feet: an explicit record length wins, otherwise
/// the great-circle distance between the endpoint coordinates.
fn overhead_length(feeder: &Feeder, edge: &EdgeRecord) -> Option<f64> {
    if let Some(length) = edge.length_ft {
        return Some(length);
    }
    let from = feeder.node(&edge.from_node)?;
    let to = feeder.node(&edge.to_node)?;
    Some(geo::distance_feet(from.geo, to.geo))
}

/// Recorder block sampling a node's phase voltages hourly, retaining 1000
/// samples.
pub fn recorder_block(node: &str) -> GlmBlock {
    GlmBlock::object("recorder")
        .prop("parent", node)
        .prop("property", "voltage_A, voltage_B, voltage_C")
        .prop("interval", "3600")
        .prop("limit", "1000")
        .prop("file", format!("measurements_at_{node}.csv"))
}

/// Append one recorder block per valid sensor request to the model file.
///
/// Requests naming nodes absent from the feeder are reported in the
/// diagnostics and skipped; the remaining requests still install. Returns
/// the nodes that were instrumented.
pub fn install_sensors(
    model: &Path,
    feeder: &Feeder,
    requests: &[SensorRequest],
) -> Result<(Vec<String>, Diagnostics)> {
    let mut diag = Diagnostics::new();
    let mut installed = Vec::new();
    let mut appended = String::new();

    for request in requests {
        let node = request.node.trim();
        if feeder.node(node).is_none() {
            diag.add_error_with_entity(
                "sensor",
                &format!("cannot install a {} here: node not in feeder", request.kind),
                node,
            );
            continue;
        }
        appended.push('\n');
        recorder_block(node).render_into(&mut appended);
        installed.push(node.to_string());
    }

    if !appended.is_empty() {
        let mut file = OpenOptions::new()
            .append(true)
            .open(model)
            .with_context(|| format!("opening model {}", model.display()))?;
        file.write_all(appended.as_bytes())
            .with_context(|| format!("appending recorders to {}", model.display()))?;
    }

    Ok((installed, diag))
}

#[cfg(test)]
mod tests {
    use super::*;
    use canvass_core::{BusType, GeoPoint, NodeRecord};

    fn node(name: &str, lat: f64, lon: f64, voltage: f64, bus_type: BusType) -> NodeRecord {
        NodeRecord {
            name: name.to_string(),
            geo: GeoPoint::new(lat, lon),
            nominal_voltage: voltage,
            bus_type,
        }
    }

    fn oh_edge(name: &str, from: &str, to: &str) -> EdgeRecord {
        EdgeRecord {
            name: name.to_string(),
            kind: EdgeKind::OverheadLine,
            from_node: from.to_string(),
            to_node: to.to_string(),
            phases: "ABCN".to_string(),
            length_ft: None,
        }
    }

    fn project() -> Project {
        Project {
            name: "demo".to_string(),
            author: "tester".to_string(),
        }
    }

    fn two_node_feeder() -> Feeder {
        Feeder::new(
            vec![
                node("N1", 30.000, -90.000, 7200.0, BusType::Swing),
                node("N2", 30.001, -90.001, 7200.0, BusType::Pq),
            ],
            vec![oh_edge("L1", "N1", "N2")],
        )
    }

    #[test]
    fn swing_node_and_only_swing_node_gets_bustype() {
        let (doc, _) = synthesize(&project(), &two_node_feeder());
        let rendered = doc.render();
        assert_eq!(rendered.matches("bustype SWING;").count(), 1);
        let n1 = rendered.find("name N1;").unwrap();
        let n2 = rendered.find("name N2;").unwrap();
        let bustype = rendered.find("bustype SWING;").unwrap();
        assert!(n1 < bustype && bustype < n2);
    }

    #[test]
    fn node_block_carries_voltage_with_decimal() {
        let feeder = Feeder::new(vec![node("N1", 0.0, 0.0, 7200.0, BusType::Swing)], vec![]);
        let (doc, _) = synthesize(&project(), &feeder);
        let rendered = doc.render();
        assert!(rendered.contains("\tnominal_voltage 7200.0;\n"));
        assert!(rendered.contains("\tbustype SWING;\n"));
    }

    #[test]
    fn overhead_length_comes_from_geometry() {
        let (doc, diag) = synthesize(&project(), &two_node_feeder());
        let rendered = doc.render();
        // floor(0.14709674 km * 3280.84 ft/km) = 482
        assert!(rendered.contains("object overhead_line {"));
        assert!(rendered.contains("\tname L1;\n"));
        assert!(rendered.contains("\tlength 482.0;\n"));
        assert!(rendered.contains("\tconfiguration default_oh_line_config;\n"));
        assert!(diag.is_empty());
    }

    #[test]
    fn explicit_length_overrides_geometry() {
        let mut feeder = two_node_feeder();
        feeder.edges[0].length_ft = Some(1200.0);
        let (doc, _) = synthesize(&project(), &feeder);
        assert!(doc.render().contains("\tlength 1200.0;\n"));
    }

    #[test]
    fn non_overhead_kinds_are_skipped_with_diagnostic() {
        let mut feeder = two_node_feeder();
        feeder.edges.push(EdgeRecord {
            name: "T1".to_string(),
            kind: EdgeKind::Transformer,
            from_node: "N1".to_string(),
            to_node: "N2".to_string(),
            phases: "ABCN".to_string(),
            length_ft: None,
        });
        let (doc, diag) = synthesize(&project(), &feeder);
        let rendered = doc.render();
        assert!(!rendered.contains("object transformer"));
        assert_eq!(diag.warning_count(), 1);
        assert_eq!(diag.issues[0].entity.as_deref(), Some("T1"));
    }

    #[test]
    fn missing_endpoint_reports_error_and_emits_no_block() {
        let feeder = Feeder::new(
            vec![node("N1", 30.0, -90.0, 7200.0, BusType::Swing)],
            vec![oh_edge("L9", "N1", "GHOST")],
        );
        let (doc, diag) = synthesize(&project(), &feeder);
        assert!(!doc.render().contains("object overhead_line"));
        assert_eq!(diag.error_count(), 1);
    }

    #[test]
    fn header_clock_and_modules_come_first() {
        let (doc, _) = synthesize(&project(), &two_node_feeder());
        let rendered = doc.render();
        assert!(rendered.starts_with("// Project Name: demo\n// Author: tester\n"));
        let clock = rendered.find("clock {").unwrap();
        let powerflow = rendered.find("module powerflow {").unwrap();
        let tape = rendered.find("module tape;").unwrap();
        let config = rendered.find("object line_configuration {").unwrap();
        let first_node = rendered.find("object node {").unwrap();
        assert!(clock < powerflow && powerflow < tape && tape < config && config < first_node);
        assert!(rendered.contains("\tstarttime '2017-07-10 00:00:00';\n"));
        assert!(rendered.contains("\tsolver_method NR;\n"));
    }

    #[test]
    fn impedance_matrix_is_verbatim() {
        let (doc, _) = synthesize(&project(), &Feeder::default());
        let rendered = doc.render();
        for (key, value) in OH_LINE_IMPEDANCE {
            assert!(rendered.contains(&format!("\t{key} {value};\n")), "{key}");
        }
    }

    #[test]
    fn synthesis_is_byte_identical_across_runs() {
        let feeder = two_node_feeder();
        let (first, _) = synthesize(&project(), &feeder);
        let (second, _) = synthesize(&project(), &feeder);
        assert_eq!(first.render(), second.render());
    }

    #[test]
    fn recorder_block_shape() {
        let mut out = String::new();
        recorder_block("N2").render_into(&mut out);
        assert_eq!(
            out,
            "object recorder {\n\
             \tparent N2;\n\
             \tproperty voltage_A, voltage_B, voltage_C;\n\
             \tinterval 3600;\n\
             \tlimit 1000;\n\
             \tfile measurements_at_N2.csv;\n\
             }\n"
        );
    }

    #[test]
    fn install_sensors_appends_and_skips_unknown_targets() {
        let dir = tempfile::tempdir().unwrap();
        let model = dir.path().join("demo_model.glm");
        let feeder = two_node_feeder();
        let (doc, _) = synthesize(&project(), &feeder);
        doc.write_to(&model).unwrap();

        let requests = vec![
            SensorRequest::mpmu("N2"),
            SensorRequest::mpmu("GHOST"),
            SensorRequest::mpmu("N1"),
        ];
        let (installed, diag) = install_sensors(&model, &feeder, &requests).unwrap();
        assert_eq!(installed, vec!["N2".to_string(), "N1".to_string()]);
        assert_eq!(diag.error_count(), 1);
        assert_eq!(diag.issues[0].entity.as_deref(), Some("GHOST"));

        let rendered = std::fs::read_to_string(&model).unwrap();
        assert_eq!(rendered.matches("object recorder {").count(), 2);
        assert!(rendered.contains("measurements_at_N2.csv"));
        assert!(!rendered.contains("measurements_at_GHOST.csv"));
    }

    #[test]
    fn module_without_props_uses_short_form() {
        let mut out = String::new();
        GlmBlock::module("tape").render_into(&mut out);
        assert_eq!(out, "module tape;\n");
    }
}
