/// Command-line parsing and batch file processing
pub mod cli;
/// Constants and runtime defaults
pub mod configuration;
/// Error types
pub mod error;
/// Grayscale image loading and export
pub mod image;
/// Logger setup
pub mod logging;
/// Progress display
pub mod progress;
