//! Closing of holes between way fragments.
//!
//! Each pass finds the two nearest loose way ends across the whole graph,
//! bridges them with a straight way and folds the bridge into both
//! neighbours. Junction nodes are never considered loose, so ways stay
//! split at real branch points. Passes continue while the graph has more
//! than `2 * junctions + 1` ways.

use itertools::Itertools;
use log::{debug, info, warn};

use crate::geometry::distance;
use crate::{Error, GraphModel, NodeId, Way, WayId};

/// Outcome of a single reduction pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stitch {
    /// A bridge between two distinct nodes was inserted and merged with
    /// the ways on both sides. `way` is the surviving way.
    Bridged {
        way: WayId,
        from: NodeId,
        to: NodeId,
        distance: f64,
    },
    /// Two ways already sharing the endpoint `at` were merged there
    Joined { way: WayId, at: NodeId },
}

impl Stitch {
    /// Id of the way left after the pass
    pub fn way(&self) -> WayId {
        match self {
            Self::Bridged { way, .. } | Self::Joined { way, .. } => *way,
        }
    }
}

/// Statistics of a full reduction
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReductionSummary {
    pub passes: usize,
    pub bridges: usize,
    pub joins: usize,
    /// Total length of all bridges in meters
    pub bridged_distance: f64,
    pub ways_before: usize,
    pub ways_after: usize,
}

impl ReductionSummary {
    pub fn is_noop(&self) -> bool {
        self.passes == 0
    }
}

/// Pair of loose way ends, `from` on `from_way` and `to` on `to_way`
#[derive(Debug, Clone, Copy)]
struct Candidate {
    distance: f64,
    from: NodeId,
    from_way: WayId,
    to: NodeId,
    to_way: WayId,
}

/// Reduces the graph until its ways are bounded by junctions only,
/// or until no pair of loose ends is left.
///
/// A graph that cannot be fully reduced is left partially reduced and
/// consistent; this is not an error.
///
/// # Errors
///
/// Only fails if the graph was already inconsistent.
pub fn reduce(graph: &mut GraphModel) -> Result<ReductionSummary, Error> {
    reduce_with_budget(graph, None)
}

/// Same as [`reduce`], stopping after at most `max_passes` passes
pub fn reduce_with_budget(
    graph: &mut GraphModel,
    max_passes: Option<usize>,
) -> Result<ReductionSummary, Error> {
    let mut summary = ReductionSummary {
        ways_before: graph.way_count(),
        ..ReductionSummary::default()
    };

    while graph.way_count() > graph.reduction_bound() {
        if let Some(max) = max_passes
            && summary.passes >= max
        {
            warn!(
                "Stopped gap closing after {max} passes with {} ways left (bound {})",
                graph.way_count(),
                graph.reduction_bound()
            );
            break;
        }

        let Some(stitch) = reduce_step(graph)? else {
            debug!(
                "No loose way ends left, {} ways remain above bound {}",
                graph.way_count(),
                graph.reduction_bound()
            );
            break;
        };

        summary.passes += 1;
        match stitch {
            Stitch::Bridged { distance, .. } => {
                summary.bridges += 1;
                summary.bridged_distance += distance;
            }
            Stitch::Joined { .. } => summary.joins += 1,
        }
    }

    summary.ways_after = graph.way_count();
    info!(
        "Reduced {} ways to {} in {} passes ({} bridges, {:.1} m bridged, {} joins)",
        summary.ways_before,
        summary.ways_after,
        summary.passes,
        summary.bridges,
        summary.bridged_distance,
        summary.joins
    );
    Ok(summary)
}

/// Performs one pass regardless of the termination bound.
///
/// Returns `None` when every remaining way end is a junction.
pub fn reduce_step(graph: &mut GraphModel) -> Result<Option<Stitch>, Error> {
    let Some(candidate) = nearest_loose_ends(graph) else {
        return Ok(None);
    };

    // Ways already touching each other need no bridge
    if candidate.from == candidate.to {
        let way = graph.merge_ways_at(candidate.from_way, candidate.to_way, candidate.from)?;
        debug!(
            "Joined ways {} and {} at node {}",
            candidate.from_way, candidate.to_way, candidate.from
        );
        return Ok(Some(Stitch::Joined {
            way,
            at: candidate.from,
        }));
    }

    let bridge = graph.add_bridge(candidate.from, candidate.to)?;
    let merged = graph.merge_ways_at(bridge, candidate.from_way, candidate.from)?;
    let way = graph.merge_ways_at(merged, candidate.to_way, candidate.to)?;

    debug!(
        "Bridged {:.1} m between node {} (way {}) and node {} (way {}) into way {way}",
        candidate.distance, candidate.from, candidate.from_way, candidate.to, candidate.to_way
    );

    Ok(Some(Stitch::Bridged {
        way,
        from: candidate.from,
        to: candidate.to,
        distance: candidate.distance,
    }))
}

/// Closest pair of non-junction endpoints belonging to different ways.
/// Ties keep the first pair found in ascending way id order.
fn nearest_loose_ends(graph: &GraphModel) -> Option<Candidate> {
    let ways: Vec<&Way> = graph
        .way_ids()
        .into_iter()
        .filter_map(|id| graph.way(id))
        .collect();

    let mut best: Option<Candidate> = None;
    for (w1, w2) in ways.iter().tuple_combinations() {
        let combinations = [
            (w1.first(), w2.first()),
            (w1.first(), w2.last()),
            (w1.last(), w2.first()),
            (w1.last(), w2.last()),
        ];

        for (from, to) in combinations {
            let (Some(a), Some(b)) = (graph.node(from), graph.node(to)) else {
                continue;
            };
            if a.is_junction || b.is_junction {
                continue;
            }

            let d = distance(a.geometry, b.geometry);
            if best.is_none_or(|current| d < current.distance) {
                best = Some(Candidate {
                    distance: d,
                    from,
                    from_way: w1.id,
                    to,
                    to_way: w2.id,
                });
            }
        }
    }
    best
}
