//! `canvass powerflow`: run GridLAB-D on a synthesized model.

use std::path::Path;

use anyhow::Result;
use tracing::{error, info};

use canvass_cli::config::ProjectConfig;
use canvass_core::CanvassError;

use super::external::{require_tool, run_tool};

pub fn handle(config_path: &Path, model: Option<&Path>) -> Result<()> {
    let config = ProjectConfig::load(config_path)?;
    let model = model
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.model_path());

    require_tool("gridlabd", "install GridLAB-D and ensure it is on PATH")?;

    match run_tool("gridlabd", &[model.as_os_str()]) {
        Ok(()) => info!("power flow completed for {}", model.display()),
        // A failed solve is reported but does not abort the caller.
        Err(CanvassError::ProcessFailure(msg)) => {
            error!("GridLAB-D model compilation failed: {msg}")
        }
        Err(err) => return Err(err.into()),
    }
    Ok(())
}
