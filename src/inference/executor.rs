//! Epoch-driven loopy belief propagation over the update segment
//!
//! Each epoch sweeps the segment once, letting every segment node send a
//! fresh message to each neighbor. Sends land immediately, so the sweep is
//! Gauss-Seidel style and the exact node order determines the result. The
//! segment order is reversed after every epoch to alternate sweep direction.

use crate::geometry::ObservationMask;
use crate::graph::grid::{GridGraph, build_grid};
use crate::graph::mrf::MrfGraph;
use crate::graph::node::NodeId;
use crate::inference::config::InferenceConfig;
use crate::inference::snapshot::SnapshotCapture;
use crate::io::configuration::SWEEP_REPORT_INTERVAL;
use crate::io::error::{InpaintError, Result};
use crate::math::{PairwisePotential, TruncatedLinear};
use ndarray::Array2;

/// Lifecycle of an inference run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InferenceState {
    /// No epoch has started
    Uninitialized,
    /// Epochs are in progress
    Running {
        /// Number of epochs completed so far
        epoch: usize,
    },
    /// All configured epochs completed
    Done,
}

/// Max-product loopy belief propagation on a grid MRF
pub struct BeliefPropagation<P: PairwisePotential = TruncatedLinear> {
    graph: MrfGraph,
    rows: usize,
    cols: usize,
    segment: Vec<NodeId>,
    potential: P,
    config: InferenceConfig,
    state: InferenceState,
    snapshots: Option<SnapshotCapture>,
}

impl BeliefPropagation<TruncatedLinear> {
    /// Set up inference on a built grid with the truncated-linear potential
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(grid: GridGraph, config: InferenceConfig) -> Result<Self> {
        let potential = TruncatedLinear::new(config.truncation_cap);
        Self::with_potential(grid, config, potential)
    }

    /// Build the grid for an image and its observation mask, then set up inference
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The mask dimensions differ from the image dimensions
    /// - The configuration is invalid
    pub fn from_intensities(
        intensities: &Array2<u8>,
        mask: &ObservationMask,
        config: InferenceConfig,
    ) -> Result<Self> {
        if mask.dimensions() != intensities.dim() {
            return Err(InpaintError::InvalidSourceData {
                reason: format!(
                    "observation mask is {:?} but image is {:?}",
                    mask.dimensions(),
                    intensities.dim()
                ),
            });
        }

        let grid = build_grid(
            intensities,
            &config,
            |row, col| mask.is_observed(row as isize, col as isize),
            |row, col| mask.in_segment(row as isize, col as isize),
        )?;
        Self::new(grid, config)
    }
}

impl<P: PairwisePotential> BeliefPropagation<P> {
    /// Set up inference on a built grid with a custom potential
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn with_potential(grid: GridGraph, config: InferenceConfig, potential: P) -> Result<Self> {
        let config = config.validate()?;
        let (rows, cols) = grid.dimensions();
        let (graph, _, segment) = grid.into_parts();

        if segment.is_empty() {
            log::warn!("Update segment is empty, beliefs will not change");
        }

        let snapshots = config
            .emit_snapshots
            .then(|| SnapshotCapture::new(config.epoch_count));

        Ok(Self {
            graph,
            rows,
            cols,
            segment,
            potential,
            config,
            state: InferenceState::Uninitialized,
            snapshots,
        })
    }

    /// Current lifecycle state
    pub const fn state(&self) -> InferenceState {
        self.state
    }

    /// Number of completed epochs
    pub const fn epochs_completed(&self) -> usize {
        match self.state {
            InferenceState::Uninitialized => 0,
            InferenceState::Running { epoch } => epoch,
            InferenceState::Done => self.config.epoch_count,
        }
    }

    /// Segment in the order the next epoch will sweep it
    pub fn segment(&self) -> &[NodeId] {
        &self.segment
    }

    /// Graph with its current messages
    pub const fn graph(&self) -> &MrfGraph {
        &self.graph
    }

    /// Configuration in use
    pub const fn config(&self) -> &InferenceConfig {
        &self.config
    }

    /// Per-epoch snapshots, when enabled
    pub const fn snapshots(&self) -> Option<&SnapshotCapture> {
        self.snapshots.as_ref()
    }

    /// Run one epoch
    ///
    /// Returns `false` once every configured epoch has completed.
    ///
    /// # Errors
    ///
    /// Propagates the first graph invariant violation met during the sweep.
    pub fn run_epoch(&mut self) -> Result<bool> {
        self.run_epoch_with(|_, _| {})
    }

    /// Run one epoch, reporting `(nodes_done, segment_len)` after every node
    ///
    /// Returns `false` once every configured epoch has completed.
    ///
    /// # Errors
    ///
    /// Propagates the first graph invariant violation met during the sweep.
    pub fn run_epoch_with<F>(&mut self, mut observer: F) -> Result<bool>
    where
        F: FnMut(usize, usize),
    {
        let completed = self.epochs_completed();
        if self.state == InferenceState::Done || completed >= self.config.epoch_count {
            self.state = InferenceState::Done;
            return Ok(false);
        }

        let total = self.segment.len();
        for (position, &node) in self.segment.iter().enumerate() {
            self.graph.propagate_to_all_neighbors(node, &self.potential)?;
            if position % SWEEP_REPORT_INTERVAL == 0 {
                log::debug!(
                    "Epoch {}: {position} out of {total} segment nodes",
                    completed + 1
                );
            }
            observer(position + 1, total);
        }

        self.segment.reverse();

        let epoch = completed + 1;
        log::info!("Epoch {epoch} out of {} complete", self.config.epoch_count);

        if self.snapshots.is_some() {
            let beliefs = self.extract_beliefs()?;
            if let Some(snapshots) = self.snapshots.as_mut() {
                snapshots.record(beliefs);
            }
        }

        self.state = if epoch >= self.config.epoch_count {
            InferenceState::Done
        } else {
            InferenceState::Running { epoch }
        };
        Ok(true)
    }

    /// Run every remaining epoch and return the final beliefs
    ///
    /// # Errors
    ///
    /// Propagates the first failure of an epoch or of belief extraction.
    pub fn run(&mut self) -> Result<Array2<u8>> {
        while self.run_epoch()? {}
        self.state = InferenceState::Done;
        self.extract_beliefs()
    }

    /// Current MAP estimate of every pixel
    ///
    /// # Errors
    ///
    /// Returns an error if a node's buffers are unusable.
    pub fn extract_beliefs(&self) -> Result<Array2<u8>> {
        extract_beliefs(&self.graph, self.rows, self.cols)
    }
}

/// Place every node's belief at `(id / cols, id % cols)` of a `rows x cols` matrix
///
/// # Errors
///
/// Returns an error if the graph does not hold exactly `rows * cols` nodes or
/// a node's buffers are unusable.
pub fn extract_beliefs(graph: &MrfGraph, rows: usize, cols: usize) -> Result<Array2<u8>> {
    if graph.len() != rows * cols {
        return Err(InpaintError::InvalidSourceData {
            reason: format!(
                "graph has {} nodes, cannot fill a {rows}x{cols} matrix",
                graph.len()
            ),
        });
    }

    let mut beliefs = Array2::zeros((rows, cols));
    for node in graph.nodes() {
        let index = node.id().index();
        if let Some(cell) = beliefs.get_mut([index / cols, index % cols]) {
            *cell = node.estimate_belief()?;
        }
    }
    Ok(beliefs)
}
