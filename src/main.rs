//! CLI entry point for loopy belief propagation inpainting

use clap::Parser;
use mrf_inpaint::io::cli::{Cli, FileProcessor};
use mrf_inpaint::io::logging::setup_logging;

fn main() -> mrf_inpaint::Result<()> {
    let cli = Cli::parse();
    let log_spec = if cli.quiet { "warn" } else { cli.log_level.as_str() };
    let _logger = setup_logging(log_spec)?;

    let mut processor = FileProcessor::new(cli);
    processor.process()
}
