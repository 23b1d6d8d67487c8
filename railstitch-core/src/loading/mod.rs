//! This module is responsible for reading raw Overpass data
//! and building a reduced rail graph from it.

mod builder;
mod config;
mod parser;
mod raw_types;

pub use builder::{Reconstruction, create_graph_model};
pub use config::ReconstructionConfig;
pub use parser::{parse_elements, read_elements};
pub use raw_types::{OverpassResponse, RawElement, RawMember};
