//! Logging init: append to a file under the XDG state dir, or fall back to stderr.
//!
//! Filtering follows `RUST_LOG`; without it, coord's own crates log at debug
//! and everything else at info.

use anyhow::Result;
use std::fs::{self, File};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,coord_core=debug,coord=debug";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// `~/.local/state/coord/coord.log`.
pub fn log_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("coord")?;
    Ok(xdg_dirs.get_state_home().join("coord.log"))
}

/// Writer handed out per event: a handle to the shared log file, or stderr if
/// the handle could not be duplicated.
enum LogSink {
    File(File),
    Stderr,
}

impl io::Write for LogSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            LogSink::File(f) => f.write(buf),
            LogSink::Stderr => io::stderr().lock().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            LogSink::File(f) => f.flush(),
            LogSink::Stderr => io::stderr().lock().flush(),
        }
    }
}

/// Initialize structured logging to the file at [`log_path`].
/// On failure (e.g. state dir unwritable) returns Err so the caller can use [`init_logging_stderr`].
pub fn init_logging() -> Result<PathBuf> {
    let path = log_path()?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = Arc::new(fs::OpenOptions::new().create(true).append(true).open(&path)?);

    let writer = BoxMakeWriter::new(move || {
        file.try_clone()
            .map(LogSink::File)
            .unwrap_or(LogSink::Stderr)
    });

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install subscriber: {e}"))?;

    tracing::info!("coord logging initialized at {}", path.display());
    Ok(path)
}

/// Initialize logging to stderr only. Used when the log file cannot be opened.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .with_ansi(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_covers_library_and_binary() {
        assert!(EnvFilter::try_new(DEFAULT_FILTER).is_ok());
        let directives: Vec<&str> = DEFAULT_FILTER.split(',').collect();
        assert_eq!(directives, vec!["info", "coord_core=debug", "coord=debug"]);
    }
}
