//! Mathematical utilities for the inference engine

/// Log-domain normalization and argmax reductions
pub mod normalization;
/// Pairwise smoothness potentials
pub mod potential;

pub use potential::{PairwisePotential, TruncatedLinear};
