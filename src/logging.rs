//! File-backed logging.
//!
//! The terminal is owned by the game while it runs, so log records go to
//! `~/.hopper/hopper.log` instead of stderr. `RUST_LOG` overrides the default
//! `info` filter.

use crate::constants::LOG_FILE;
use crate::utils::persistence::data_path;
use env_logger::{Builder, Env, Target};
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};

/// Initialise the global logger. Safe to call more than once; later calls
/// are no-ops.
pub fn init() -> io::Result<PathBuf> {
    let path = data_path(LOG_FILE)?;
    init_at(&path)?;
    Ok(path)
}

pub fn init_at(path: &Path) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    // A logger already installed (tests, repeated init) keeps running
    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .ok();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_creates_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(LOG_FILE);
        init_at(&path).unwrap();
        assert!(path.exists());
        // Second init does not fail
        init_at(&path).unwrap();
    }
}
