//! Graph reduction algorithms

pub mod gap_closer;

pub use gap_closer::{ReductionSummary, Stitch, reduce, reduce_step, reduce_with_budget};
