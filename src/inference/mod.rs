/// Inference configuration and message seeding
pub mod config;
/// Epoch loop and belief extraction
pub mod executor;
/// Per-epoch belief snapshots
pub mod snapshot;

pub use config::{InferenceConfig, MessageInit};
pub use executor::{BeliefPropagation, InferenceState, extract_beliefs};
pub use snapshot::SnapshotCapture;
