//! Log output for the command line tool.
//!
//! Library code only emits `tracing` events; the binary decides where they go.

use std::io::{self, IsTerminal};

use once_cell::sync::OnceCell;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

use crate::common::{Error, Result};

static TELEMETRY_GUARD: OnceCell<()> = OnceCell::new();

/// Default filter directive for a `-v` count.
pub fn default_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber, writing to stderr.
///
/// `RUST_LOG` takes precedence over `verbosity`. Calling this more than once
/// is a no-op after the first successful call.
pub fn init(verbosity: u8) -> Result<()> {
    TELEMETRY_GUARD
        .get_or_try_init(|| install_subscriber(verbosity))
        .map(|_| ())
}

fn install_subscriber(verbosity: u8) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_filter(verbosity))
            .map_err(|e| Error::Config(format!("invalid log filter: {e}")))?,
    };

    fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .try_init()
        .map_err(|e| Error::Other(format!("failed to install log subscriber: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_levels() {
        assert_eq!(default_filter(0), "warn");
        assert_eq!(default_filter(1), "info");
        assert_eq!(default_filter(2), "debug");
        assert_eq!(default_filter(9), "trace");
    }
}
