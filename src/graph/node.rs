//! Graph nodes with observed values, ordered neighbor lists and incoming message buffers
//!
//! A node stores one log-domain buffer per neighbor, kept parallel to the
//! neighbor list. Outgoing messages follow the max-product rule: for every
//! candidate value of the receiver, maximize the sum of all other incoming
//! messages plus the pairwise potential over this node's own values.

use crate::io::configuration::ALPHABET_SIZE;
use crate::io::error::{
    InpaintError, Result, computation_error, invalid_parameter, topology_violation,
};
use crate::math::PairwisePotential;
use crate::math::normalization::first_argmax;
use ndarray::Array1;
use rand::Rng;
use std::fmt;
use std::ops::Range;

/// Log-domain message vector indexed by value
pub type Message = Array1<f64>;

/// Stable arena index identifying a node
///
/// For grid graphs this is the raster index `row * cols + col`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// Position of the node in its graph arena
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// A pixel node of the Markov random field
#[derive(Debug, Clone)]
pub struct GraphNode {
    id: NodeId,
    observed_value: Option<u8>,
    alphabet_size: usize,
    neighbors: Vec<NodeId>,
    /// Parallel to `neighbors`
    incoming: Vec<Message>,
    initialized: bool,
}

impl GraphNode {
    /// Create an isolated node
    ///
    /// Observed nodes are clamped to `observed_value` and never change belief.
    ///
    /// # Errors
    ///
    /// Returns an error if `alphabet_size` is outside `1..=256` or the observed
    /// value lies outside the value domain.
    pub fn new(id: NodeId, observed_value: Option<u8>, alphabet_size: usize) -> Result<Self> {
        if alphabet_size == 0 || alphabet_size > ALPHABET_SIZE {
            return Err(invalid_parameter(
                "alphabet_size",
                &alphabet_size,
                &format!("must be in 1..={ALPHABET_SIZE}"),
            ));
        }
        if let Some(value) = observed_value.filter(|&v| usize::from(v) >= alphabet_size) {
            return Err(InpaintError::InvalidSourceData {
                reason: format!(
                    "observed value {value} of node {id} is outside the value domain 0..{alphabet_size}"
                ),
            });
        }

        Ok(Self {
            id,
            observed_value,
            alphabet_size,
            neighbors: Vec::new(),
            incoming: Vec::new(),
            initialized: false,
        })
    }

    /// Node identity
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// Clamped value, if observed
    pub const fn observed_value(&self) -> Option<u8> {
        self.observed_value
    }

    /// Whether the node is clamped to an observed value
    pub const fn is_observed(&self) -> bool {
        self.observed_value.is_some()
    }

    /// Size of the value domain messages are indexed by
    pub const fn alphabet_size(&self) -> usize {
        self.alphabet_size
    }

    /// Neighbors in insertion order
    pub fn neighbors(&self) -> &[NodeId] {
        &self.neighbors
    }

    /// Whether `initialize_incoming` has seeded the message buffers
    pub const fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Current message received from `neighbor`
    pub fn incoming_from(&self, neighbor: NodeId) -> Option<&Message> {
        self.neighbors
            .iter()
            .position(|&n| n == neighbor)
            .and_then(|slot| self.incoming.get(slot))
    }

    /// Register a neighbor on this side only, with a uniform buffer
    ///
    /// Returns `false` for self-loops and existing neighbors.
    pub(crate) fn add_neighbor(&mut self, neighbor: NodeId) -> bool {
        if neighbor == self.id || self.neighbors.contains(&neighbor) {
            return false;
        }
        self.neighbors.push(neighbor);
        self.incoming.push(Array1::zeros(self.alphabet_size));
        true
    }

    /// Drop a neighbor and its buffer on this side only
    pub(crate) fn remove_neighbor(&mut self, neighbor: NodeId) -> bool {
        let Some(slot) = self.neighbors.iter().position(|&n| n == neighbor) else {
            return false;
        };
        self.neighbors.remove(slot);
        if slot < self.incoming.len() {
            self.incoming.remove(slot);
        }
        true
    }

    /// Reset every incoming buffer to the uniform (all-zero log) message
    pub fn initialize_incoming(&mut self) {
        self.incoming = self
            .neighbors
            .iter()
            .map(|_| Array1::zeros(self.alphabet_size))
            .collect();
        self.initialized = true;
    }

    /// Seed every incoming buffer with uniform random log-values in `[0, 1)`
    pub fn initialize_incoming_with<R: Rng>(&mut self, rng: &mut R) {
        let mut incoming = Vec::with_capacity(self.neighbors.len());
        for _ in &self.neighbors {
            incoming.push(Array1::from_shape_fn(self.alphabet_size, |_| {
                rng.random::<f64>()
            }));
        }
        self.incoming = incoming;
        self.initialized = true;
    }

    /// Unnormalized log-message this node would send to `target` for one candidate value
    ///
    /// # Errors
    ///
    /// Returns an error if the buffers were never seeded, drifted out of sync
    /// with the neighbor list, `target` is not a neighbor, or `candidate` lies
    /// outside the value domain.
    pub fn compute_outgoing_message<P: PairwisePotential + ?Sized>(
        &self,
        target: NodeId,
        candidate: usize,
        potential: &P,
    ) -> Result<f64> {
        self.ensure_ready()?;
        self.slot_of(target)?;
        if candidate >= self.alphabet_size {
            return Err(invalid_parameter(
                "candidate",
                &candidate,
                &format!("must be below the alphabet size {}", self.alphabet_size),
            ));
        }

        let evidence = self.incoming_sum(Some(target));
        Ok(self.max_over_own_values(&evidence, candidate, potential))
    }

    /// Unnormalized log-message to `target` for every candidate value
    ///
    /// # Errors
    ///
    /// Same preconditions as [`GraphNode::compute_outgoing_message`].
    pub fn outgoing_message<P: PairwisePotential + ?Sized>(
        &self,
        target: NodeId,
        potential: &P,
    ) -> Result<Message> {
        self.ensure_ready()?;
        self.slot_of(target)?;

        // Evidence excluding the target is shared by every candidate
        let evidence = self.incoming_sum(Some(target));
        Ok(Array1::from_shape_fn(self.alphabet_size, |candidate| {
            self.max_over_own_values(&evidence, candidate, potential)
        }))
    }

    /// Element-wise sum of all incoming messages
    ///
    /// # Errors
    ///
    /// Returns an error if the buffers were never seeded or are out of sync.
    pub fn belief_vector(&self) -> Result<Message> {
        self.ensure_ready()?;
        Ok(self.incoming_sum(None))
    }

    /// MAP value under the current messages
    ///
    /// Observed nodes return their clamped value without touching messages.
    /// Ties resolve to the lowest value.
    ///
    /// # Errors
    ///
    /// Returns an error if an unobserved node's buffers were never seeded or
    /// are out of sync with its neighbors.
    pub fn estimate_belief(&self) -> Result<u8> {
        if let Some(value) = self.observed_value {
            return Ok(value);
        }

        let belief = self.belief_vector()?;
        let index = first_argmax(belief.view())
            .ok_or_else(|| computation_error("belief estimation", &"empty value domain"))?;
        u8::try_from(index).map_err(|e| computation_error("belief estimation", &e))
    }

    /// Overwrite the buffer holding the message received from `from`
    pub(crate) fn set_incoming(&mut self, from: NodeId, message: Message) -> Result<()> {
        self.ensure_ready()?;
        if message.len() != self.alphabet_size {
            return Err(computation_error(
                "message update",
                &format!(
                    "message from {from} has {} entries, expected {}",
                    message.len(),
                    self.alphabet_size
                ),
            ));
        }

        let slot = self.slot_of(from)?;
        if let Some(buffer) = self.incoming.get_mut(slot) {
            *buffer = message;
        }
        Ok(())
    }

    fn ensure_ready(&self) -> Result<()> {
        if !self.initialized {
            return Err(InpaintError::Uninitialized { node: self.id });
        }
        if self.incoming.len() != self.neighbors.len() {
            return Err(topology_violation(
                self.id,
                &format!(
                    "{} neighbors but {} message buffers",
                    self.neighbors.len(),
                    self.incoming.len()
                ),
            ));
        }
        Ok(())
    }

    fn slot_of(&self, neighbor: NodeId) -> Result<usize> {
        self.neighbors
            .iter()
            .position(|&n| n == neighbor)
            .ok_or_else(|| topology_violation(self.id, &format!("{neighbor} is not a neighbor")))
    }

    fn incoming_sum(&self, excluded: Option<NodeId>) -> Message {
        let mut sum = Array1::zeros(self.alphabet_size);
        for (&neighbor, message) in self.neighbors.iter().zip(&self.incoming) {
            if Some(neighbor) != excluded {
                sum += message;
            }
        }
        sum
    }

    // Observed nodes range over their single clamped value
    fn own_values(&self) -> Range<usize> {
        self.observed_value.map_or(0..self.alphabet_size, |value| {
            usize::from(value)..usize::from(value) + 1
        })
    }

    fn max_over_own_values<P: PairwisePotential + ?Sized>(
        &self,
        evidence: &Message,
        candidate: usize,
        potential: &P,
    ) -> f64 {
        self.own_values()
            .map(|x| {
                evidence.get(x).copied().unwrap_or(f64::NEG_INFINITY)
                    + potential.log_phi(x, candidate)
            })
            .fold(f64::NEG_INFINITY, f64::max)
    }
}
