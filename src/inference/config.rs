//! Explicit configuration for graph construction and the inference loop

use crate::io::configuration::{ALPHABET_SIZE, DEFAULT_EPOCHS, DEFAULT_TRUNCATION_CAP};
use crate::io::error::{Result, invalid_parameter};

/// How message buffers are seeded before the first epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageInit {
    /// All-zero log buffers (uniform messages)
    #[default]
    Uniform,
    /// Uniform random log-values in `[0, 1)` from a seeded generator
    Random {
        /// Generator seed
        seed: u64,
    },
}

/// Parameters of one inpainting run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InferenceConfig {
    /// Number of intensity symbols; messages have this many entries
    pub alphabet_size: usize,
    /// Truncation constant of the pairwise potential
    pub truncation_cap: usize,
    /// Number of epochs to run; there is no early stopping
    pub epoch_count: usize,
    /// Whether to record the belief matrix after every epoch
    pub emit_snapshots: bool,
    /// Message buffer seeding
    pub message_init: MessageInit,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            alphabet_size: ALPHABET_SIZE,
            truncation_cap: DEFAULT_TRUNCATION_CAP,
            epoch_count: DEFAULT_EPOCHS,
            emit_snapshots: false,
            message_init: MessageInit::Uniform,
        }
    }
}

impl InferenceConfig {
    /// Check that the configuration describes a usable value domain
    ///
    /// # Errors
    ///
    /// Returns an error if `alphabet_size` is outside `1..=256`.
    pub fn validate(self) -> Result<Self> {
        if self.alphabet_size == 0 || self.alphabet_size > ALPHABET_SIZE {
            return Err(invalid_parameter(
                "alphabet_size",
                &self.alphabet_size,
                &format!("must be in 1..={ALPHABET_SIZE} so values fit in a byte"),
            ));
        }
        Ok(self)
    }
}
