//! CSV loaders for feeder survey tables.
//!
//! Columns sit at fixed positional offsets inherited from the survey
//! template: node rows carry the name in column 0, latitude/longitude in
//! columns 2/3, nominal voltage in column 4, and the bus type in column 7;
//! edge rows carry name, kind label, and endpoints in columns 0-3, with
//! optional phases (4) and explicit length (5). Tables are expected to
//! carry a header row.
//!
//! Survey data is messy, so parsing is lenient where the legacy template
//! allows placeholders: unparseable coordinates default to 0.0 and
//! problem rows are skipped with a diagnostic instead of failing the load.

use std::path::Path;

use anyhow::{Context, Result};
use csv::ReaderBuilder;

use canvass_core::{
    BusType, Diagnostics, EdgeKind, EdgeRecord, Feeder, GeoPoint, NodeRecord,
};

const NODE_NAME_COL: usize = 0;
const NODE_LAT_COL: usize = 2;
const NODE_LON_COL: usize = 3;
const NODE_VOLTAGE_COL: usize = 4;
const NODE_BUSTYPE_COL: usize = 7;

const EDGE_NAME_COL: usize = 0;
const EDGE_KIND_COL: usize = 1;
const EDGE_FROM_COL: usize = 2;
const EDGE_TO_COL: usize = 3;
const EDGE_PHASES_COL: usize = 4;
const EDGE_LENGTH_COL: usize = 5;

fn reader(path: &Path) -> Result<csv::Reader<std::fs::File>> {
    ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening table {}", path.display()))
}

/// Load node records from a survey CSV.
pub fn load_nodes(path: &Path) -> Result<(Vec<NodeRecord>, Diagnostics)> {
    let mut rdr = reader(path)?;
    let mut nodes = Vec::new();
    let mut diag = Diagnostics::new();

    for (row, record) in rdr.records().enumerate() {
        let line = row + 2; // 1-based, after the header row
        let record = record.with_context(|| format!("reading node row {line}"))?;
        if record.len() <= NODE_BUSTYPE_COL {
            diag.add_warning_at_line("skip", "node row has too few columns", line);
            continue;
        }
        let name = record[NODE_NAME_COL].to_string();
        if name.is_empty() {
            diag.add_warning_at_line("skip", "node row has no name", line);
            continue;
        }
        let lat = record[NODE_LAT_COL].parse().unwrap_or(0.0);
        let lon = record[NODE_LON_COL].parse().unwrap_or(0.0);
        let nominal_voltage = match record[NODE_VOLTAGE_COL].parse() {
            Ok(v) => v,
            Err(_) => {
                diag.add_warning_with_entity("skip", "unparseable nominal voltage, using 0", &name);
                0.0
            }
        };
        nodes.push(NodeRecord {
            name,
            geo: GeoPoint::new(lat, lon),
            nominal_voltage,
            bus_type: BusType::from_label(&record[NODE_BUSTYPE_COL]),
        });
    }

    Ok((nodes, diag))
}

/// Load edge records from a survey CSV. Rows whose kind label does not map
/// to a supported [`EdgeKind`] are skipped with a diagnostic.
pub fn load_edges(path: &Path) -> Result<(Vec<EdgeRecord>, Diagnostics)> {
    let mut rdr = reader(path)?;
    let mut edges = Vec::new();
    let mut diag = Diagnostics::new();

    for (row, record) in rdr.records().enumerate() {
        let line = row + 2;
        let record = record.with_context(|| format!("reading edge row {line}"))?;
        if record.len() <= EDGE_TO_COL {
            diag.add_warning_at_line("skip", "edge row has too few columns", line);
            continue;
        }
        let name = record[EDGE_NAME_COL].to_string();
        let kind = match EdgeKind::from_label(&record[EDGE_KIND_COL]) {
            Some(kind) => kind,
            None => {
                diag.add_warning_with_entity(
                    "skip",
                    &format!("unsupported edge kind `{}`", &record[EDGE_KIND_COL]),
                    &name,
                );
                continue;
            }
        };
        let phases = record
            .get(EDGE_PHASES_COL)
            .filter(|p| !p.is_empty())
            .unwrap_or("ABCN")
            .to_string();
        let length_ft = record
            .get(EDGE_LENGTH_COL)
            .and_then(|v| v.parse().ok());
        edges.push(EdgeRecord {
            name,
            kind,
            from_node: record[EDGE_FROM_COL].to_string(),
            to_node: record[EDGE_TO_COL].to_string(),
            phases,
            length_ft,
        });
    }

    Ok((edges, diag))
}

/// Load both tables into a [`Feeder`], merging their diagnostics.
pub fn load_feeder(nodes_path: &Path, edges_path: &Path) -> Result<(Feeder, Diagnostics)> {
    let (nodes, mut diag) = load_nodes(nodes_path)?;
    let (edges, edge_diag) = load_edges(edges_path)?;
    diag.extend(edge_diag);
    Ok((Feeder::new(nodes, edges), diag))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn write_table(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn node_row_with_placeholders_parses() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_table(
            &dir,
            "nodes.csv",
            "name,c1,lat,long,voltage,c5,c6,bustype\n\
             N1,n/a,n/a,n/a,7200,n/a,n/a,SWING\n",
        );
        let (nodes, diag) = load_nodes(&path).unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].name, "N1");
        assert_eq!(nodes[0].nominal_voltage, 7200.0);
        assert_eq!(nodes[0].bus_type, BusType::Swing);
        assert_eq!(nodes[0].geo, GeoPoint::new(0.0, 0.0));
        assert!(diag.is_empty());
    }

    #[test]
    fn node_coordinates_parse_when_present() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_table(
            &dir,
            "nodes.csv",
            "name,c1,lat,long,voltage,c5,c6,bustype\n\
             N1, PQ , 30.001 , -90.001 , 7200 , x , y , PQ\n",
        );
        let (nodes, _) = load_nodes(&path).unwrap();
        assert_eq!(nodes[0].geo, GeoPoint::new(30.001, -90.001));
        assert_eq!(nodes[0].bus_type, BusType::Pq);
    }

    #[test]
    fn short_node_row_is_skipped_with_diagnostic() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_table(
            &dir,
            "nodes.csv",
            "name,c1,lat,long,voltage,c5,c6,bustype\n\
             N1,only,three\n\
             N2,n/a,n/a,n/a,480,n/a,n/a,PQ\n",
        );
        let (nodes, diag) = load_nodes(&path).unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].name, "N2");
        assert_eq!(diag.warning_count(), 1);
        assert_eq!(diag.issues[0].line, Some(2));
    }

    #[test]
    fn edge_rows_parse_at_fixed_offsets() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_table(
            &dir,
            "edges.csv",
            "name,kind,from,to\n\
             L1, OH_Line, N1, N2\n\
             T1, Transformer, N2, N3\n",
        );
        let (edges, diag) = load_edges(&path).unwrap();
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0].kind, EdgeKind::OverheadLine);
        assert_eq!(edges[0].from_node, "N1");
        assert_eq!(edges[0].phases, "ABCN");
        assert_eq!(edges[0].length_ft, None);
        assert_eq!(edges[1].kind, EdgeKind::Transformer);
        assert!(diag.is_empty());
    }

    #[test]
    fn unknown_edge_kind_is_skipped_with_diagnostic() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_table(
            &dir,
            "edges.csv",
            "name,kind,from,to\n\
             S1,Switch,N1,N2\n\
             L1,OH_Line,N2,N3\n",
        );
        let (edges, diag) = load_edges(&path).unwrap();
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].name, "L1");
        assert_eq!(diag.warning_count(), 1);
        assert_eq!(diag.issues[0].entity.as_deref(), Some("S1"));
    }

    #[test]
    fn explicit_phases_and_length_columns_are_honored() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_table(
            &dir,
            "edges.csv",
            "name,kind,from,to,phases,length\n\
             L1,OH_Line,N1,N2,ABC,1320.5\n",
        );
        let (edges, _) = load_edges(&path).unwrap();
        assert_eq!(edges[0].phases, "ABC");
        assert_eq!(edges[0].length_ft, Some(1320.5));
    }

    #[test]
    fn load_feeder_merges_diagnostics() {
        let dir = tempfile::tempdir().unwrap();
        let nodes = write_table(
            &dir,
            "nodes.csv",
            "name,c1,lat,long,voltage,c5,c6,bustype\n\
             N1,short\n",
        );
        let edges = write_table(
            &dir,
            "edges.csv",
            "name,kind,from,to\n\
             S1,Switch,N1,N2\n",
        );
        let (feeder, diag) = load_feeder(&nodes, &edges).unwrap();
        assert!(feeder.nodes.is_empty());
        assert!(feeder.edges.is_empty());
        assert_eq!(diag.warning_count(), 2);
    }
}
