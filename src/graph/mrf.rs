//! Arena-backed pairwise MRF graph with symmetric edge mutation
//!
//! Nodes live in a `Vec` and are addressed by their `NodeId`. Edges are stored
//! once in each endpoint's neighbor list, so every mutation goes through the
//! graph to keep both sides in step.

use crate::graph::node::{GraphNode, NodeId};
use crate::io::error::{Result, invalid_parameter, topology_violation};
use crate::math::PairwisePotential;
use crate::math::normalization::normalize_log_message;
use rand::Rng;

/// Undirected graph of MRF nodes
#[derive(Debug, Clone, Default)]
pub struct MrfGraph {
    nodes: Vec<GraphNode>,
}

impl MrfGraph {
    /// Create an empty graph
    pub const fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Create an empty graph with room for `capacity` nodes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Number of registered nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Register a node
    ///
    /// Registering an id that is already present leaves the existing node
    /// untouched. Ids must be dense: a new node must carry the next free index.
    ///
    /// # Errors
    ///
    /// Returns an error if the node id skips past the next free index.
    pub fn add_vertex(&mut self, node: GraphNode) -> Result<NodeId> {
        let id = node.id();
        if id.index() < self.nodes.len() {
            return Ok(id);
        }
        if id.index() > self.nodes.len() {
            return Err(topology_violation(
                id,
                &format!("node ids must be dense, next free id is {}", self.nodes.len()),
            ));
        }
        self.nodes.push(node);
        Ok(id)
    }

    /// Connect two nodes in both directions
    ///
    /// Returns `false` if the edge already existed.
    ///
    /// # Errors
    ///
    /// Returns an error for self-loops or unknown endpoints.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId) -> Result<bool> {
        self.check_endpoints(a, b)?;
        let added_a = self.node_mut(a)?.add_neighbor(b);
        let added_b = self.node_mut(b)?.add_neighbor(a);
        if added_a != added_b {
            return Err(topology_violation(
                a,
                &format!("edge to {b} was present on one side only"),
            ));
        }
        Ok(added_a)
    }

    /// Disconnect two nodes in both directions
    ///
    /// Returns `false` if no such edge existed.
    ///
    /// # Errors
    ///
    /// Returns an error for self-loops or unknown endpoints.
    pub fn remove_edge(&mut self, a: NodeId, b: NodeId) -> Result<bool> {
        self.check_endpoints(a, b)?;
        let removed_a = self.node_mut(a)?.remove_neighbor(b);
        let removed_b = self.node_mut(b)?.remove_neighbor(a);
        Ok(removed_a || removed_b)
    }

    /// All node ids in arena order
    pub fn vertices(&self) -> Vec<NodeId> {
        self.nodes.iter().map(GraphNode::id).collect()
    }

    /// Undirected edges as `(lower, higher)` pairs, each listed once
    pub fn edges(&self) -> Vec<(NodeId, NodeId)> {
        let mut edges = Vec::new();
        for node in &self.nodes {
            for &neighbor in node.neighbors() {
                if node.id() < neighbor {
                    edges.push((node.id(), neighbor));
                }
            }
        }
        edges
    }

    /// Look up a node
    pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
        self.nodes.get(id.index())
    }

    /// Iterate over nodes in arena order
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.iter()
    }

    /// Seed every node's buffers with the uniform message
    pub fn initialize_incoming(&mut self) {
        for node in &mut self.nodes {
            node.initialize_incoming();
        }
    }

    /// Seed every node's buffers with random log-values, in arena order
    pub fn initialize_incoming_with<R: Rng>(&mut self, rng: &mut R) {
        for node in &mut self.nodes {
            node.initialize_incoming_with(rng);
        }
    }

    /// Compute, normalize and deliver the message from `from` to `to`
    ///
    /// # Errors
    ///
    /// Returns an error if either node is unknown or unseeded, they are not
    /// neighbors, or normalization fails.
    pub fn send_message<P: PairwisePotential + ?Sized>(
        &mut self,
        from: NodeId,
        to: NodeId,
        potential: &P,
    ) -> Result<()> {
        let mut message = self.node_ref(from)?.outgoing_message(to, potential)?;
        normalize_log_message(&mut message)?;
        self.node_mut(to)?.set_incoming(from, message)
    }

    /// Send a message from `from` to each of its neighbors in insertion order
    ///
    /// Every send lands immediately, so later nodes in a sweep see the fresh values.
    ///
    /// # Errors
    ///
    /// Propagates the first failing [`MrfGraph::send_message`].
    pub fn propagate_to_all_neighbors<P: PairwisePotential + ?Sized>(
        &mut self,
        from: NodeId,
        potential: &P,
    ) -> Result<()> {
        let neighbors = self.node_ref(from)?.neighbors().to_vec();
        for neighbor in neighbors {
            self.send_message(from, neighbor, potential)?;
        }
        Ok(())
    }

    /// MAP value of one node under the current messages
    ///
    /// # Errors
    ///
    /// Returns an error if the node is unknown or its buffers are unusable.
    pub fn estimate_belief(&self, id: NodeId) -> Result<u8> {
        self.node_ref(id)?.estimate_belief()
    }

    fn node_ref(&self, id: NodeId) -> Result<&GraphNode> {
        self.nodes
            .get(id.index())
            .ok_or_else(|| topology_violation(id, &"node is not registered in the graph"))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut GraphNode> {
        self.nodes
            .get_mut(id.index())
            .ok_or_else(|| topology_violation(id, &"node is not registered in the graph"))
    }

    fn check_endpoints(&self, a: NodeId, b: NodeId) -> Result<()> {
        if a == b {
            return Err(invalid_parameter(
                "edge",
                &format!("({a}, {b})"),
                &"self-loops are not allowed",
            ));
        }
        self.node_ref(a)?;
        self.node_ref(b)?;
        Ok(())
    }
}
