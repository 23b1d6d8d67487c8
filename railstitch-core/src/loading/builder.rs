use log::info;

use super::config::ReconstructionConfig;
use super::parser::read_elements;
use crate::algo::{ReductionSummary, reduce_with_budget};
use crate::{Error, GraphModel};

/// Reduced graph together with the statistics of its reduction
#[derive(Debug, Clone)]
pub struct Reconstruction {
    pub graph: GraphModel,
    /// `None` when gap closing was disabled
    pub summary: Option<ReductionSummary>,
}

/// Creates a rail graph from the Overpass file named in the configuration
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not an Overpass document
pub fn create_graph_model(config: &ReconstructionConfig) -> Result<Reconstruction, Error> {
    validate_config(config)?;

    info!("Reading OSM elements: {}", config.input_path.display());
    let elements = read_elements(&config.input_path)?;
    let element_count = elements.len();

    let mut graph = GraphModel::build(elements);
    info!(
        "Built graph from {element_count} elements: {} nodes, {} ways, {} junctions, {} stops",
        graph.node_count(),
        graph.way_count(),
        graph.junction_count(),
        graph.stops().len()
    );

    let summary = if config.close_gaps {
        Some(reduce_with_budget(&mut graph, config.max_passes)?)
    } else {
        None
    };

    graph.validate()?;
    Ok(Reconstruction { graph, summary })
}

fn validate_config(config: &ReconstructionConfig) -> Result<(), Error> {
    if !config.input_path.exists() {
        return Err(Error::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("OSM file not found: {}", config.input_path.display()),
        )));
    }

    if config.max_passes == Some(0) && config.close_gaps {
        return Err(Error::InvalidData(
            "max_passes must be positive when gap closing is enabled".to_string(),
        ));
    }

    Ok(())
}
