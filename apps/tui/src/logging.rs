//! Log subscriber setup.
//!
//! The interactive dashboard owns the terminal, so its logs go to a file.
//! Headless runs log to stderr and keep stdout for the report.

use crate::error::Result;
use std::fs::OpenOptions;
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Where log lines are written.
#[derive(Debug, Clone, Copy)]
pub enum LogTarget<'a> {
    File(&'a Path),
    Stderr,
}

/// `RUST_LOG` wins; otherwise `info`, or `debug` for this crate when asked.
pub fn env_filter(debug: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if debug {
            EnvFilter::new("info,vendor_landscape=debug")
        } else {
            EnvFilter::new("info")
        }
    })
}

/// Installs the global subscriber. A second call is a no-op.
pub fn init_logging(target: LogTarget<'_>, debug: bool) -> Result<()> {
    let filter = env_filter(debug);

    match target {
        LogTarget::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let layer = fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false);
            let _ = tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init();
        }
        LogTarget::Stderr => {
            let layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .with_target(false);
            let _ = tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init();
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_target_creates_the_log_file() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("dashboard.log");

        init_logging(LogTarget::File(&path), false)?;

        assert!(path.exists());
        Ok(())
    }

    #[test]
    fn unwritable_log_path_is_an_error() {
        let result = init_logging(LogTarget::File(Path::new("/nonexistent/dir/x.log")), false);
        assert!(result.is_err());
    }
}
