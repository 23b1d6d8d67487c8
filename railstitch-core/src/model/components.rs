//! Graph components - nodes and ways

use geo::Point;

use crate::{NodeId, WayId};

/// Graph node
#[derive(Debug, Clone)]
pub struct Node {
    /// OSM ID of the node, negative for synthetic nodes
    pub id: NodeId,
    /// Node coordinates (x = lon, y = lat)
    pub geometry: Point<f64>,
    /// Ways for which this node is the first node
    pub starting_ways: Vec<WayId>,
    /// Ways for which this node is the last node
    pub ending_ways: Vec<WayId>,
    /// Three or more ways touched this node at ingestion.
    /// Never recomputed after merges.
    pub is_junction: bool,
}

impl Node {
    pub fn new(id: NodeId, lat: f64, lon: f64) -> Self {
        Self {
            id,
            geometry: Point::new(lon, lat),
            starting_ways: Vec::new(),
            ending_ways: Vec::new(),
            is_junction: false,
        }
    }

    pub fn lat(&self) -> f64 {
        self.geometry.y()
    }

    pub fn lon(&self) -> f64 {
        self.geometry.x()
    }

    /// Number of way ends attached to this node
    pub fn degree(&self) -> usize {
        self.starting_ways.len() + self.ending_ways.len()
    }

    pub fn is_synthetic(&self) -> bool {
        self.id < 0
    }

    pub(crate) fn add_starting(&mut self, way: WayId) {
        if !self.starting_ways.contains(&way) {
            self.starting_ways.push(way);
        }
    }

    pub(crate) fn add_ending(&mut self, way: WayId) {
        if !self.ending_ways.contains(&way) {
            self.ending_ways.push(way);
        }
    }

    pub(crate) fn remove_starting(&mut self, way: WayId) {
        self.starting_ways.retain(|&w| w != way);
    }

    pub(crate) fn remove_ending(&mut self, way: WayId) {
        self.ending_ways.retain(|&w| w != way);
    }
}

/// Ordered path segment
#[derive(Debug, Clone)]
pub struct Way {
    /// OSM ID of the way, negative for synthetic ways
    pub id: WayId,
    /// Node ids from first to last, at least two
    pub(crate) nodes: Vec<NodeId>,
    /// Length in meters
    pub length: f64,
}

impl Way {
    /// Ways are only created by [`GraphModel`](crate::GraphModel), which
    /// never admits fewer than two nodes.
    pub(crate) fn new(id: WayId, nodes: Vec<NodeId>) -> Self {
        debug_assert!(nodes.len() >= 2, "way {id} needs at least two nodes");
        Self {
            id,
            nodes,
            length: 0.0,
        }
    }

    /// Node ids from first to last
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn first(&self) -> NodeId {
        self.nodes[0]
    }

    pub fn last(&self) -> NodeId {
        self.nodes[self.nodes.len() - 1]
    }

    pub fn is_closed(&self) -> bool {
        self.first() == self.last()
    }

    pub fn is_synthetic(&self) -> bool {
        self.id < 0
    }
}
