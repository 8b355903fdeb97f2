//! 4-connected grid construction from an intensity matrix

use crate::graph::mrf::MrfGraph;
use crate::graph::node::{GraphNode, NodeId};
use crate::inference::config::{InferenceConfig, MessageInit};
use crate::io::error::Result;
use ndarray::Array2;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// A grid-shaped MRF with its raster node list and update segment
#[derive(Debug, Clone)]
pub struct GridGraph {
    graph: MrfGraph,
    rows: usize,
    cols: usize,
    nodes: Vec<NodeId>,
    segment: Vec<NodeId>,
}

impl GridGraph {
    /// Underlying graph
    pub const fn graph(&self) -> &MrfGraph {
        &self.graph
    }

    /// Grid dimensions (rows, cols)
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Every node in raster order
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Nodes selected by the segment predicate, in raster order
    pub fn segment(&self) -> &[NodeId] {
        &self.segment
    }

    /// Node at a grid position
    pub fn node_at(&self, row: usize, col: usize) -> Option<NodeId> {
        (row < self.rows && col < self.cols).then_some(NodeId(row * self.cols + col))
    }

    /// Split into graph, raster node list and segment list
    pub fn into_parts(self) -> (MrfGraph, Vec<NodeId>, Vec<NodeId>) {
        (self.graph, self.nodes, self.segment)
    }
}

/// Build a 4-connected grid MRF over `intensities`
///
/// Nodes are created in raster order with id `row * cols + col`. As each node
/// is created it is linked to its left neighbor and then its upper neighbor,
/// so every edge is added once from its later endpoint. Observed nodes take
/// their value from `intensities`. Message buffers are seeded only after the
/// topology is complete.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or an observed intensity
/// lies outside the value domain.
pub fn build_grid<O, S>(
    intensities: &Array2<u8>,
    config: &InferenceConfig,
    is_observed: O,
    in_segment: S,
) -> Result<GridGraph>
where
    O: Fn(usize, usize) -> bool,
    S: Fn(usize, usize) -> bool,
{
    let config = config.validate()?;
    let (rows, cols) = intensities.dim();

    let mut graph = MrfGraph::with_capacity(rows * cols);
    let mut nodes = Vec::with_capacity(rows * cols);
    let mut segment = Vec::new();

    for row in 0..rows {
        for col in 0..cols {
            let id = NodeId(row * cols + col);
            let observed_value = is_observed(row, col)
                .then(|| intensities.get([row, col]).copied())
                .flatten();
            graph.add_vertex(GraphNode::new(id, observed_value, config.alphabet_size)?)?;

            if col > 0 {
                graph.add_edge(id, NodeId(id.index() - 1))?;
            }
            if row > 0 {
                graph.add_edge(id, NodeId(id.index() - cols))?;
            }

            nodes.push(id);
            if in_segment(row, col) {
                segment.push(id);
            }
        }
    }

    match config.message_init {
        MessageInit::Uniform => graph.initialize_incoming(),
        MessageInit::Random { seed } => {
            let mut rng = StdRng::seed_from_u64(seed);
            graph.initialize_incoming_with(&mut rng);
        }
    }

    log::debug!(
        "Built {rows}x{cols} grid: {} edges, {} segment nodes",
        graph.edges().len(),
        segment.len()
    );

    Ok(GridGraph {
        graph,
        rows,
        cols,
        nodes,
        segment,
    })
}
