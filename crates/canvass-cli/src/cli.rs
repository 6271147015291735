use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Distribution feeder translation toolkit", long_about = None)]
pub struct Cli {
    /// Set the logging level
    #[arg(long, default_value = "info")]
    pub log_level: tracing::Level,

    /// Path to the project configuration file
    #[arg(long, default_value = "canvass.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Lay out GridLAB-D models as Graphviz documents
    Layout {
        /// A .glm file or a directory of .glm files
        path: PathBuf,
        /// Also render each layout to SVG with the `dot` binary
        #[arg(long)]
        render: bool,
    },
    /// Synthesize a GridLAB-D model from the project's node and edge tables
    Build {
        /// Output file path (defaults to <project>_model.glm)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Install recorders on feeder nodes
    Sensor {
        /// Node names to instrument
        #[arg(required = true)]
        nodes: Vec<String>,
        /// Sensor kind
        #[arg(long, default_value = "mpmu")]
        kind: String,
        /// Model file to append to (defaults to <project>_model.glm)
        #[arg(long)]
        model: Option<PathBuf>,
    },
    /// Run the GridLAB-D power flow on a synthesized model
    Powerflow {
        /// Model file (defaults to <project>_model.glm)
        #[arg(long)]
        model: Option<PathBuf>,
    },
}
