use thiserror::Error;

use crate::{NodeId, WayId};

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown way {0}")]
    UnknownWay(WayId),
    #[error("Unknown node {0}")]
    UnknownNode(NodeId),
    #[error("Ways {0} and {1} share no endpoint")]
    NoSharedEndpoint(WayId, WayId),
    #[error("Way {0} cannot be merged with itself")]
    SelfMerge(WayId),
    #[error("Junction node {0} cannot be the seam of a merge")]
    JunctionSeam(NodeId),
    #[error("Inconsistent graph: {0}")]
    Inconsistent(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("GeoJSON error: {0}")]
    GeoJsonError(String),
}
