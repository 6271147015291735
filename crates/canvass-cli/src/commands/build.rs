//! `canvass build`: tables -> GridLAB-D model synthesis.

use std::path::Path;

use anyhow::Result;
use tracing::info;

use canvass_cli::config::ProjectConfig;
use canvass_io::exporters::glm::synthesize;
use canvass_io::sources::tables::load_feeder;

use super::report;

pub fn handle(config_path: &Path, output: Option<&Path>) -> Result<()> {
    let config = ProjectConfig::load(config_path)?;
    let (feeder, load_diag) = load_feeder(&config.paths.nodes, &config.paths.edges)?;
    report(&load_diag);

    let (doc, synth_diag) = synthesize(&config.project, &feeder);
    report(&synth_diag);

    let out = output.map(Path::to_path_buf).unwrap_or_else(|| config.model_path());
    doc.write_to(&out)?;
    info!(
        "wrote {} ({} nodes, {} edges)",
        out.display(),
        feeder.nodes.len(),
        feeder.edges.len()
    );
    Ok(())
}
