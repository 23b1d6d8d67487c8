// Re-export key components
pub use crate::algo::gap_closer::{ReductionSummary, Stitch, reduce, reduce_step, reduce_with_budget};
pub use crate::loading::{RawElement, Reconstruction, ReconstructionConfig, create_graph_model};
pub use crate::model::{GraphModel, Node, Way};

// Core types
pub use crate::Error;
pub use crate::FIRST_SYNTHETIC_ID;
pub use crate::NodeId;
pub use crate::WayId;
