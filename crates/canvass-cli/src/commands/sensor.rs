//! `canvass sensor`: append recorder blocks for sensor installs.

use std::path::Path;

use anyhow::Result;
use tracing::info;

use canvass_cli::config::ProjectConfig;
use canvass_core::SensorRequest;
use canvass_io::exporters::glm::install_sensors;
use canvass_io::sources::tables::load_feeder;

use super::report;

pub fn handle(
    config_path: &Path,
    nodes: &[String],
    kind: &str,
    model: Option<&Path>,
) -> Result<()> {
    let config = ProjectConfig::load(config_path)?;
    let (feeder, load_diag) = load_feeder(&config.paths.nodes, &config.paths.edges)?;
    report(&load_diag);

    let model = model
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.model_path());
    let requests: Vec<SensorRequest> = nodes
        .iter()
        .map(|node| SensorRequest {
            node: node.clone(),
            kind: kind.to_string(),
        })
        .collect();

    let (installed, diag) = install_sensors(&model, &feeder, &requests)?;
    report(&diag);
    for node in &installed {
        info!("installed a {kind} in node {node}");
    }
    Ok(())
}
