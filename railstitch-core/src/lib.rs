//! Reconstruction of continuous rail paths from fragmented `OpenStreetMap` data.
//!
//! Raw Overpass elements are ingested into a [`GraphModel`], after which the
//! gap closer repeatedly stitches the nearest loose way ends together until
//! only real junctions remain as way boundaries.

pub mod algo;
pub mod error;
pub mod export;
pub mod geometry;
pub mod loading;
pub mod model;
pub mod prelude;

pub use error::Error;
pub use loading::{Reconstruction, ReconstructionConfig, create_graph_model};
pub use model::{GraphModel, Node, Way};

/// OSM node identifier; negative values are synthetic
pub type NodeId = i64;
/// OSM way identifier; negative values are synthetic
pub type WayId = i64;

/// First identifier handed out for synthetic nodes and ways.
/// OSM identifiers are strictly positive, so the decreasing
/// synthetic range never collides with them.
pub const FIRST_SYNTHETIC_ID: i64 = -1;
