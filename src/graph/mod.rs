//! Pairwise MRF graph structures
//!
//! This module contains:
//! - Nodes with per-neighbor message buffers and the max-product update rule
//! - An arena graph with symmetric edge mutation and message delivery
//! - The 4-connected grid constructor

/// Grid construction from intensity matrices
pub mod grid;
/// Arena graph and message delivery
pub mod mrf;
/// Nodes, identities and message computation
pub mod node;

pub use grid::{GridGraph, build_grid};
pub use mrf::MrfGraph;
pub use node::{GraphNode, Message, NodeId};
