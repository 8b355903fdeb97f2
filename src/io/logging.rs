//! Logger setup for the command-line tool

use crate::io::error::{Result, invalid_parameter};
use flexi_logger::{Logger, LoggerHandle};

/// Start a stderr logger from a `log` specification such as `"info"` or
/// `"warn, mrf_inpaint::inference=debug"`
///
/// The returned handle must be kept alive for as long as logging is needed.
///
/// # Errors
///
/// Returns an error if the specification cannot be parsed or a logger is
/// already installed.
pub fn setup_logging(spec: &str) -> Result<LoggerHandle> {
    Logger::try_with_str(spec)
        .map_err(|e| invalid_parameter("log-level", &spec, &e))?
        .log_to_stderr()
        .start()
        .map_err(|e| invalid_parameter("log-level", &spec, &e))
}
