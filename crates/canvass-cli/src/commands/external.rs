//! External tool probing and invocation.
//!
//! The renderer (`dot`) and the power-flow solver (`gridlabd`) are plain
//! blocking subprocesses; their only contract with the pipelines is
//! "accepts a file path, exits zero on success".

use std::env;
use std::ffi::OsStr;
use std::process::Command;

use canvass_core::{CanvassError, CanvassResult};

/// Whether `name` resolves to an executable file on PATH.
pub fn command_on_path(name: &str) -> bool {
    let Some(paths) = env::var_os("PATH") else {
        return false;
    };
    env::split_paths(&paths).any(|dir| {
        let candidate = dir.join(name);
        candidate.is_file() || candidate.with_extension("exe").is_file()
    })
}

/// Fail with [`CanvassError::MissingTool`] unless `tool` is installed.
pub fn require_tool(tool: &str, hint: &str) -> CanvassResult<()> {
    if command_on_path(tool) {
        Ok(())
    } else {
        Err(CanvassError::MissingTool {
            tool: tool.to_string(),
            hint: hint.to_string(),
        })
    }
}

/// Run `tool` with `args`, mapping a non-zero exit to
/// [`CanvassError::ProcessFailure`].
pub fn run_tool<S: AsRef<OsStr>>(tool: &str, args: &[S]) -> CanvassResult<()> {
    let status = Command::new(tool).args(args).status()?;
    if status.success() {
        Ok(())
    } else {
        Err(CanvassError::ProcessFailure(format!(
            "`{tool}` exited with {status}"
        )))
    }
}
