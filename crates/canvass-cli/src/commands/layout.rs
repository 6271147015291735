//! `canvass layout`: GLM -> Graphviz translation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::{error, info, warn};

use canvass_core::{CanvassError, CanvassResult};
use canvass_io::exporters::dot::export_dot;
use canvass_io::importers::glm::classify_glm_file;

use super::external::{require_tool, run_tool};

pub fn handle(path: &Path, render: bool) -> Result<()> {
    // Probe the renderer up front so a missing binary aborts before any
    // partial output is produced.
    if render {
        require_tool("dot", "install Graphviz and ensure `dot` is on PATH")?;
    }

    if path.is_file() {
        // Same policy as directory mode: unsupported inputs and renderer
        // failures are reported, not fatal. The .dot is already on disk
        // when rendering fails.
        match layout_file(path, render) {
            Ok(_) => {}
            Err(CanvassError::UnsupportedInput(msg)) => warn!("skipping: {msg}"),
            Err(CanvassError::ProcessFailure(msg)) => error!("{msg}"),
            Err(err) => return Err(err.into()),
        }
    } else if path.is_dir() {
        info!("laying out all GLM files in {}", path.display());
        for entry in fs::read_dir(path)? {
            let file = entry?.path();
            if !file.is_file() {
                continue;
            }
            match layout_file(&file, render) {
                Ok(_) => {}
                Err(CanvassError::UnsupportedInput(msg)) => warn!("skipping: {msg}"),
                Err(CanvassError::ProcessFailure(msg)) => error!("{msg}"),
                Err(err) => error!("{}: {err}", file.display()),
            }
        }
        info!("layout of all GridLAB-D files complete");
    } else {
        anyhow::bail!("{} is neither a file nor a directory", path.display());
    }

    Ok(())
}

/// Classify one GLM file and write its DOT document alongside it.
fn layout_file(file: &Path, render: bool) -> CanvassResult<PathBuf> {
    let events = classify_glm_file(file)?;
    let dot_path = file.with_extension("dot");
    export_dot(&events, &dot_path)?;
    info!("wrote {}", dot_path.display());
    if render {
        let args = [std::ffi::OsStr::new("-Tsvg"), std::ffi::OsStr::new("-O"), dot_path.as_os_str()];
        run_tool("dot", &args)?;
        info!("rendered {}.svg", dot_path.display());
    }
    Ok(dot_path)
}
