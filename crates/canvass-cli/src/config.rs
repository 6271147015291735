//! Project configuration.
//!
//! The active project name, author, and table paths live in a
//! `canvass.toml` file loaded into an explicit [`ProjectConfig`] that is
//! passed into each operation.
//!
//! ```toml
//! [project]
//! name = "mytown"
//! author = "A. Modeler"
//!
//! [paths]
//! nodes = "nodes.csv"
//! edges = "edges.csv"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use canvass_core::Project;

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectConfig {
    pub project: Project,
    pub paths: TablePaths,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TablePaths {
    pub nodes: PathBuf,
    pub edges: PathBuf,
}

impl ProjectConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading project configuration {}", path.display()))?;
        let config: ProjectConfig =
            toml::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }

    /// Default model path for this project, next to the tables.
    pub fn model_path(&self) -> PathBuf {
        PathBuf::from(self.project.model_filename())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn loads_project_and_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("canvass.toml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[project]\nname = \"mytown\"\nauthor = \"A. Modeler\"\n\n\
             [paths]\nnodes = \"nodes.csv\"\nedges = \"edges.csv\"\n"
        )
        .unwrap();

        let config = ProjectConfig::load(&path).unwrap();
        assert_eq!(config.project.name, "mytown");
        assert_eq!(config.paths.edges, PathBuf::from("edges.csv"));
        assert_eq!(config.model_path(), PathBuf::from("mytown_model.glm"));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = ProjectConfig::load(Path::new("/nonexistent/canvass.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("canvass.toml"));
    }
}
