//! Grayscale image inpainting with max-product loopy belief propagation
//!
//! Pixels become nodes of a 4-connected pairwise Markov random field. Pixels
//! outside the missing region are clamped to their observed intensity; the
//! remaining nodes receive log-domain messages swept over the region's
//! boundary segment for a fixed number of epochs, and each unobserved pixel
//! takes the value that maximizes its summed incoming evidence.

#![forbid(unsafe_code)]

/// Observed-pixel and update-segment predicates
pub mod geometry;
/// Pairwise MRF graph, nodes and grid construction
pub mod graph;
/// Epoch loop, configuration and snapshots
pub mod inference;
/// Input/output operations and error handling
pub mod io;
/// Log-domain numerics and pairwise potentials
pub mod math;

pub use io::error::{InpaintError, Result};
