//! Pairwise smoothness potentials between adjacent pixel values

use crate::io::configuration::DEFAULT_TRUNCATION_CAP;

/// Log-compatibility between the values of two adjacent nodes
///
/// Implementations must be symmetric and pure; the message-passing rule
/// evaluates them for every (value, candidate) pair of every message.
pub trait PairwisePotential {
    /// Log of the pairwise compatibility between values `a` and `b`
    fn log_phi(&self, a: usize, b: usize) -> f64;
}

/// Truncated L1 smoothness prior: `-min(|a - b|, cap)`
///
/// Compatibility decreases linearly with intensity difference up to the cap
/// and stays flat beyond it, which keeps a strong edge from dominating the
/// evidence gathered by its neighbors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TruncatedLinear {
    cap: usize,
}

impl TruncatedLinear {
    /// Create a potential with the given truncation constant
    pub const fn new(cap: usize) -> Self {
        Self { cap }
    }

    /// Truncation constant
    pub const fn cap(&self) -> usize {
        self.cap
    }
}

impl Default for TruncatedLinear {
    fn default() -> Self {
        Self::new(DEFAULT_TRUNCATION_CAP)
    }
}

impl PairwisePotential for TruncatedLinear {
    fn log_phi(&self, a: usize, b: usize) -> f64 {
        -(a.abs_diff(b).min(self.cap) as f64)
    }
}
