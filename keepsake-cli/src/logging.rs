//! Stderr logging bootstrap.
//!
//! `RUST_LOG` wins over the level picked from `--verbose`. Initialising twice
//! is a no-op, and a failure to start the logger never stops the program.

use anyhow::{Context, Result};
use flexi_logger::{Logger, LoggerHandle, WriteMode};
use once_cell::sync::OnceCell;

static LOGGER: OnceCell<LoggerHandle> = OnceCell::new();

/// `warn` by default, `info` with one `-v`, `debug` with two or more.
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

pub fn init_logging(verbosity: u8) -> Result<()> {
    LOGGER
        .get_or_try_init(|| {
            let level = level_for(verbosity);
            Logger::try_with_env_or_str(level)
                .with_context(|| format!("invalid log level `{level}`"))?
                .log_to_stderr()
                .write_mode(WriteMode::Direct)
                .format(flexi_logger::default_format)
                .start()
                .context("failed to start logger")
        })
        .map(|_| ())
}
