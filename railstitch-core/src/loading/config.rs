use std::path::PathBuf;

use serde::Deserialize;

/// Settings of a single reconstruction run
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReconstructionConfig {
    /// Overpass JSON response with the nodes, ways and relation of a line
    pub input_path: PathBuf,
    /// Bridge holes between way fragments after ingestion
    pub close_gaps: bool,
    /// Upper limit on gap closing passes, unlimited when `None`
    pub max_passes: Option<usize>,
}

impl Default for ReconstructionConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::new(),
            close_gaps: true,
            max_passes: None,
        }
    }
}

impl ReconstructionConfig {
    pub fn new(input_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            ..Self::default()
        }
    }
}
