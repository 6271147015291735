//! Unified error types for the canvass toolkit.
//!
//! [`CanvassError`] covers every failure class the pipelines report.
//! Skip-and-continue conditions (unsupported items, unknown sensor targets)
//! usually travel in a [`crate::Diagnostics`] collection instead; the hard
//! variants here end the affected operation.

use thiserror::Error;

/// Unified error type for canvass operations.
#[derive(Error, Debug)]
pub enum CanvassError {
    /// I/O errors (file access, subprocess spawning, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A required external binary is not installed.
    #[error("missing external tool `{tool}`: {hint}")]
    MissingTool { tool: String, hint: String },

    /// Input the pipelines do not handle (wrong extension, unsupported kind).
    #[error("unsupported input: {0}")]
    UnsupportedInput(String),

    /// A sensor-install request named a node that is not in the feeder.
    #[error("unknown sensor target `{0}`")]
    UnknownSensorTarget(String),

    /// An external process ran but exited non-zero.
    #[error("external process failure: {0}")]
    ProcessFailure(String),

    /// Generic errors (for wrapping external errors)
    #[error("{0}")]
    Other(String),
}

/// Convenience type alias for Results using CanvassError.
pub type CanvassResult<T> = Result<T, CanvassError>;

impl From<anyhow::Error> for CanvassError {
    fn from(err: anyhow::Error) -> Self {
        CanvassError::Other(format!("{err:#}"))
    }
}

impl From<String> for CanvassError {
    fn from(s: String) -> Self {
        CanvassError::Other(s)
    }
}

impl From<&str> for CanvassError {
    fn from(s: &str) -> Self {
        CanvassError::Other(s.to_string())
    }
}
