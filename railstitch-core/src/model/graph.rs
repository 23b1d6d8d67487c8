//! Graph of OSM nodes and ways with the primitive surgery operations
//! used while stitching fragmented rail lines back together.

use geo::Coord;
use hashbrown::HashMap;
use log::{debug, warn};

use super::components::{Node, Way};
use crate::geometry::{distance, path_length};
use crate::loading::RawElement;
use crate::{Error, FIRST_SYNTHETIC_ID, NodeId, WayId};

/// Nodes, ways and stops of a single transit relation.
///
/// The model is the only owner of [`Node`] and [`Way`] records. Ways are
/// referenced from their endpoint nodes through `starting_ways` and
/// `ending_ways`, and every mutation keeps both directions in sync.
#[derive(Debug, Clone)]
pub struct GraphModel {
    nodes: HashMap<NodeId, Node>,
    ways: HashMap<WayId, Way>,
    stops: Vec<NodeId>,
    junction_count: usize,
    next_synthetic_id: i64,
}

impl Default for GraphModel {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphModel {
    /// Creates an empty model
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            ways: HashMap::new(),
            stops: Vec::new(),
            junction_count: 0,
            next_synthetic_id: FIRST_SYNTHETIC_ID,
        }
    }

    /// Builds the graph from raw Overpass elements.
    ///
    /// Ways with fewer than two nodes are discarded. Stops and ways that
    /// reference nodes missing from the input are dropped with a warning.
    /// Junctions are detected once, on the ingested topology.
    pub fn build<I>(elements: I) -> Self
    where
        I: IntoIterator<Item = RawElement>,
    {
        let mut graph = Self::new();
        let mut raw_stops: Vec<(i64, NodeId)> = Vec::new();
        let mut degenerate_ways = 0usize;

        for element in elements {
            match element {
                RawElement::Node { id, lat, lon } => {
                    graph.nodes.insert(id, Node::new(id, lat, lon));
                }
                RawElement::Way { id, nodes } => {
                    if nodes.len() >= 2 {
                        graph.ways.insert(id, Way::new(id, nodes));
                    } else {
                        degenerate_ways += 1;
                    }
                }
                RawElement::Relation { id, members } => {
                    raw_stops.extend(
                        members
                            .iter()
                            .filter(|member| member.is_stop())
                            .map(|member| (id, member.reference)),
                    );
                }
                RawElement::Other => {}
            }
        }

        if degenerate_ways > 0 {
            debug!("Discarded {degenerate_ways} ways with fewer than two nodes");
        }

        graph.resolve_stops(raw_stops);
        graph.wire_ways();
        graph.detect_junctions();
        graph
    }

    fn resolve_stops(&mut self, raw_stops: Vec<(i64, NodeId)>) {
        for (relation_id, node_id) in raw_stops {
            if !self.nodes.contains_key(&node_id) {
                warn!("stop node not found on the path {relation_id}, node {node_id}");
                continue;
            }
            if !self.stops.contains(&node_id) {
                self.stops.push(node_id);
            }
        }
    }

    /// Registers every way at its endpoints and measures its length
    fn wire_ways(&mut self) {
        for way_id in self.way_ids() {
            let way = &self.ways[&way_id];
            let missing = way
                .nodes
                .iter()
                .copied()
                .find(|id| !self.nodes.contains_key(id));
            if let Some(missing) = missing {
                warn!("way {way_id} references missing node {missing}, discarding it");
                self.ways.remove(&way_id);
                continue;
            }

            let length = path_length(way.nodes.iter().map(|id| self.nodes[id].geometry));
            let (first, last) = (way.first(), way.last());

            if let Some(way) = self.ways.get_mut(&way_id) {
                way.length = length;
            }
            if let Some(node) = self.nodes.get_mut(&first) {
                node.add_starting(way_id);
            }
            if let Some(node) = self.nodes.get_mut(&last) {
                node.add_ending(way_id);
            }
        }
    }

    fn detect_junctions(&mut self) {
        let mut junctions = 0;
        for node in self.nodes.values_mut() {
            node.is_junction = node.degree() >= 3;
            if node.is_junction {
                junctions += 1;
            }
        }
        self.junction_count = junctions;
    }

    /// Hands out the next synthetic identifier
    pub fn next_id(&mut self) -> i64 {
        let id = self.next_synthetic_id;
        self.next_synthetic_id -= 1;
        id
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn way(&self, id: WayId) -> Option<&Way> {
        self.ways.get(&id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn ways(&self) -> impl Iterator<Item = &Way> {
        self.ways.values()
    }

    /// Way ids in ascending order
    pub fn way_ids(&self) -> Vec<WayId> {
        let mut ids: Vec<WayId> = self.ways.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Resolved stop nodes, in relation order
    pub fn stops(&self) -> &[NodeId] {
        &self.stops
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn way_count(&self) -> usize {
        self.ways.len()
    }

    pub fn junction_count(&self) -> usize {
        self.junction_count
    }

    /// Largest way count of a graph whose ways are bounded by junctions only
    pub fn reduction_bound(&self) -> usize {
        2 * self.junction_count + 1
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.ways.is_empty()
    }

    /// Coordinates of a way from first to last node
    pub fn way_coordinates(&self, way_id: WayId) -> Result<Vec<Coord<f64>>, Error> {
        self.require_way(way_id)?
            .nodes
            .iter()
            .map(|&id| self.require_node(id).map(|node| node.geometry.into()))
            .collect()
    }

    /// Reverses the node order of a way and swaps its endpoint registrations
    pub fn reverse_way(&mut self, way_id: WayId) -> Result<(), Error> {
        let (first, last) = self.endpoints(way_id)?;
        self.require_node(first)?;
        self.require_node(last)?;

        if let Some(way) = self.ways.get_mut(&way_id) {
            way.nodes.reverse();
        }
        // Closed ways keep both registrations on the same node
        if first == last {
            return Ok(());
        }

        let old_first = self.node_mut(first)?;
        old_first.remove_starting(way_id);
        old_first.add_ending(way_id);

        let old_last = self.node_mut(last)?;
        old_last.remove_ending(way_id);
        old_last.add_starting(way_id);
        Ok(())
    }

    /// Merges way `b` into way `a` at a shared endpoint and returns `a`.
    ///
    /// Orientation is resolved by checking, in order, last/last (reverse `b`),
    /// first/first (reverse `a`), first/last (reverse both) and last/first
    /// (already oriented). Way `b` no longer exists afterwards.
    ///
    /// # Errors
    ///
    /// Fails if the ways share no endpoint, are the same way, or if the
    /// shared endpoint is a junction.
    pub fn merge_ways(&mut self, a: WayId, b: WayId) -> Result<WayId, Error> {
        if a == b {
            return Err(Error::SelfMerge(a));
        }
        let (a_first, a_last) = self.endpoints(a)?;
        let (b_first, b_last) = self.endpoints(b)?;

        let (reverse_a, reverse_b, seam) = if a_last == b_last {
            (false, true, a_last)
        } else if a_first == b_first {
            (true, false, a_first)
        } else if a_first == b_last {
            (true, true, a_first)
        } else if a_last == b_first {
            (false, false, a_last)
        } else {
            return Err(Error::NoSharedEndpoint(a, b));
        };

        self.require_seam(seam)?;
        if reverse_a {
            self.reverse_way(a)?;
        }
        if reverse_b {
            self.reverse_way(b)?;
        }
        self.join_oriented(a, b)
    }

    /// Merges way `b` into way `a` using `seam` as the shared endpoint.
    ///
    /// Unlike [`GraphModel::merge_ways`] this never picks a different seam
    /// when the two ways share both of their endpoints.
    pub fn merge_ways_at(&mut self, a: WayId, b: WayId, seam: NodeId) -> Result<WayId, Error> {
        if a == b {
            return Err(Error::SelfMerge(a));
        }
        let (a_first, a_last) = self.endpoints(a)?;
        let (b_first, b_last) = self.endpoints(b)?;

        let a_touches = a_first == seam || a_last == seam;
        let b_touches = b_first == seam || b_last == seam;
        if !a_touches || !b_touches {
            return Err(Error::NoSharedEndpoint(a, b));
        }

        self.require_seam(seam)?;
        if a_last != seam {
            self.reverse_way(a)?;
        }
        if b_first != seam {
            self.reverse_way(b)?;
        }
        self.join_oriented(a, b)
    }

    /// Concatenates `b` onto `a`, expecting `last(a) == first(b)`
    fn join_oriented(&mut self, a: WayId, b: WayId) -> Result<WayId, Error> {
        self.require_way(a)?;
        let way_b = self.ways.remove(&b).ok_or(Error::UnknownWay(b))?;
        let seam = way_b.first();
        let last = way_b.last();

        let way_a = self.ways.get_mut(&a).ok_or(Error::UnknownWay(a))?;
        debug_assert_eq!(way_a.last(), seam);
        way_a.nodes.pop();
        way_a.nodes.extend_from_slice(&way_b.nodes);
        way_a.length += way_b.length;

        // The seam is interior to the merged way now
        let seam_node = self.node_mut(seam)?;
        seam_node.remove_ending(a);
        seam_node.remove_starting(b);

        let last_node = self.node_mut(last)?;
        last_node.remove_ending(b);
        last_node.add_ending(a);

        Ok(a)
    }

    /// Inserts a straight two-node way between `from` and `to`.
    /// Its length is the great-circle distance between the two nodes.
    pub fn add_bridge(&mut self, from: NodeId, to: NodeId) -> Result<WayId, Error> {
        let length = distance(
            self.require_node(from)?.geometry,
            self.require_node(to)?.geometry,
        );
        let id = self.next_id();
        self.ways.insert(
            id,
            Way {
                id,
                nodes: vec![from, to],
                length,
            },
        );
        self.node_mut(from)?.add_starting(id);
        self.node_mut(to)?.add_ending(id);
        Ok(id)
    }

    /// Copies a way onto fresh synthetic nodes so the same physical segment
    /// can be used by several paths without sharing graph state.
    pub fn clone_way(&mut self, way_id: WayId) -> Result<WayId, Error> {
        let way = self.require_way(way_id)?;
        let source_nodes = way.nodes.clone();
        let length = way.length;

        let mut clones: HashMap<NodeId, NodeId> = HashMap::with_capacity(source_nodes.len());
        let mut nodes = Vec::with_capacity(source_nodes.len());
        for node_id in source_nodes {
            let clone = match clones.get(&node_id) {
                Some(&clone) => clone,
                None => {
                    let clone = self.clone_node(node_id)?;
                    clones.insert(node_id, clone);
                    clone
                }
            };
            nodes.push(clone);
        }

        let id = self.next_id();
        let way = Way { id, nodes, length };
        let (first, last) = (way.first(), way.last());
        self.ways.insert(id, way);
        self.node_mut(first)?.add_starting(id);
        self.node_mut(last)?.add_ending(id);

        debug!("Cloned way {way_id} as {id}");
        Ok(id)
    }

    /// Copies a node's coordinates onto a fresh synthetic node with no ways
    pub(crate) fn clone_node(&mut self, node_id: NodeId) -> Result<NodeId, Error> {
        let geometry = self.require_node(node_id)?.geometry;
        let id = self.next_id();
        self.nodes.insert(
            id,
            Node {
                id,
                geometry,
                starting_ways: Vec::new(),
                ending_ways: Vec::new(),
                is_junction: false,
            },
        );
        Ok(id)
    }

    /// Checks the endpoint registrations of every way and node.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Inconsistent`] describing the first violation found.
    pub fn validate(&self) -> Result<(), Error> {
        for way in self.ways.values() {
            if way.nodes.len() < 2 {
                return inconsistent(format!("way {} has {} nodes", way.id, way.nodes.len()));
            }
            if let Some(missing) = way.nodes.iter().find(|id| !self.nodes.contains_key(*id)) {
                return inconsistent(format!("way {} references missing node {missing}", way.id));
            }
            if !self.nodes[&way.first()].starting_ways.contains(&way.id) {
                return inconsistent(format!(
                    "way {} is not registered at its first node {}",
                    way.id,
                    way.first()
                ));
            }
            if !self.nodes[&way.last()].ending_ways.contains(&way.id) {
                return inconsistent(format!(
                    "way {} is not registered at its last node {}",
                    way.id,
                    way.last()
                ));
            }
        }

        for node in self.nodes.values() {
            for way_id in &node.starting_ways {
                match self.ways.get(way_id) {
                    Some(way) if way.first() == node.id => {}
                    _ => {
                        return inconsistent(format!(
                            "node {} lists way {way_id} as starting there",
                            node.id
                        ));
                    }
                }
            }
            for way_id in &node.ending_ways {
                match self.ways.get(way_id) {
                    Some(way) if way.last() == node.id => {}
                    _ => {
                        return inconsistent(format!(
                            "node {} lists way {way_id} as ending there",
                            node.id
                        ));
                    }
                }
            }
        }

        if let Some(stop) = self.stops.iter().find(|id| !self.nodes.contains_key(*id)) {
            return inconsistent(format!("stop {stop} is not a node of the graph"));
        }

        Ok(())
    }

    fn endpoints(&self, way_id: WayId) -> Result<(NodeId, NodeId), Error> {
        let way = self.require_way(way_id)?;
        Ok((way.first(), way.last()))
    }

    fn require_way(&self, way_id: WayId) -> Result<&Way, Error> {
        self.ways.get(&way_id).ok_or(Error::UnknownWay(way_id))
    }

    fn require_node(&self, node_id: NodeId) -> Result<&Node, Error> {
        self.nodes.get(&node_id).ok_or(Error::UnknownNode(node_id))
    }

    fn node_mut(&mut self, node_id: NodeId) -> Result<&mut Node, Error> {
        self.nodes
            .get_mut(&node_id)
            .ok_or(Error::UnknownNode(node_id))
    }

    fn require_seam(&self, seam: NodeId) -> Result<(), Error> {
        if self.require_node(seam)?.is_junction {
            Err(Error::JunctionSeam(seam))
        } else {
            Ok(())
        }
    }
}

fn inconsistent(message: String) -> Result<(), Error> {
    Err(Error::Inconsistent(message))
}
