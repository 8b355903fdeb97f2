//! Inference constants and runtime configuration defaults

/// Number of intensity symbols in the value domain (`0..=255`)
pub const ALPHABET_SIZE: usize = 256;

// Bounds the influence of strong edges on the smoothness prior
/// Default truncation constant for the pairwise potential
pub const DEFAULT_TRUNCATION_CAP: usize = 50;

/// Default number of message-passing epochs
pub const DEFAULT_EPOCHS: usize = 17;

// Missing rectangle of the reference penguin image, as row_min,row_max,col_min,col_max
/// Default missing region in `r0,r1,c0,c1` form
pub const DEFAULT_MISSING_REGION: &str = "92,106,13,93";

/// Number of segment nodes between sweep progress reports
pub const SWEEP_REPORT_INTERVAL: usize = 200;

/// Extensions picked up when the target is a directory
pub const SUPPORTED_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "bmp", "tif", "tiff"];

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_inpainted";
/// Suffix added to the per-epoch animation filename
pub const SNAPSHOT_GIF_SUFFIX: &str = "_epochs";
/// Delay between GIF animation frames
pub const SNAPSHOT_FRAME_DELAY_MS: u32 = 250;

/// Log specification used when none is given
pub const DEFAULT_LOG_LEVEL: &str = "info";

// Progress bar display settings
/// Width of the epoch progress bar in characters
pub const PROGRESS_BAR_WIDTH: u16 = 30;
