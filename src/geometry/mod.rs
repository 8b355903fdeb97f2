//! Observed-pixel and update-segment predicates

/// Missing rectangles and observation masks
pub mod region;

pub use region::{MissingRegion, ObservationMask};
