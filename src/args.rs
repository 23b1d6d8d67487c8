use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser};
use serde::Deserialize;
use thiserror::Error;

use railstitch_core::ReconstructionConfig;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config '{path}': {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("No input file given, pass one as argument or set input_path in the config")]
    MissingInput,
}

/// Stitch fragmented OSM rail ways into continuous paths
#[derive(Debug, Parser)]
#[command(name = "railstitch", version, about)]
pub struct Args {
    /// Overpass JSON response (`out json`) with the nodes, ways and relation of a line
    pub input: Option<PathBuf>,

    /// TOML file with reconstruction settings
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write GeoJSON to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Keep the ingested ways as they are
    #[arg(long)]
    pub no_close_gaps: bool,

    /// Stop gap closing after this many passes
    #[arg(long)]
    pub max_passes: Option<usize>,

    /// Indent the GeoJSON output
    #[arg(long)]
    pub pretty: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Contents of the TOML config file
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    output: Option<PathBuf>,
    #[serde(flatten)]
    reconstruction: ReconstructionConfig,
}

/// Effective settings after merging the config file and the flags
#[derive(Debug)]
pub struct Settings {
    pub reconstruction: ReconstructionConfig,
    pub output: Option<PathBuf>,
    pub pretty: bool,
}

impl Args {
    /// Flags take precedence over the config file
    pub fn settings(&self) -> Result<Settings, ConfigError> {
        let file = match &self.config {
            Some(path) => load_config_file(path)?,
            None => FileConfig::default(),
        };

        let mut reconstruction = file.reconstruction;
        if let Some(input) = &self.input {
            reconstruction.input_path.clone_from(input);
        }
        if self.no_close_gaps {
            reconstruction.close_gaps = false;
        }
        if self.max_passes.is_some() {
            reconstruction.max_passes = self.max_passes;
        }
        if reconstruction.input_path.as_os_str().is_empty() {
            return Err(ConfigError::MissingInput);
        }

        Ok(Settings {
            reconstruction,
            output: self.output.clone().or(file.output),
            pretty: self.pretty,
        })
    }
}

/// Relative paths in the file are resolved against its directory
fn load_config_file(path: &Path) -> Result<FileConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mut config: FileConfig = toml::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let base = path.parent().unwrap_or_else(|| Path::new(""));
    let input = &mut config.reconstruction.input_path;
    if !input.as_os_str().is_empty() && input.is_relative() {
        *input = base.join(&*input);
    }
    if let Some(output) = config.output.as_mut()
        && output.is_relative()
    {
        *output = base.join(&*output);
    }
    Ok(config)
}
