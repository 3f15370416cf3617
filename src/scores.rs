//! Best-score persistence.
//!
//! The only thing that outlives a run is one integer, stored under a fixed
//! key in `~/.hopper/best_score.json` together with the time it was set.

use crate::constants::BEST_SCORE_FILE;
use crate::utils::persistence::{data_path, load_json_or_default, save_json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::PathBuf;

/// On-disk record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestScore {
    pub best_score: u32,
    /// RFC 3339 timestamp of when the score was set.
    #[serde(default)]
    pub achieved_at: Option<String>,
}

/// Get/set a single best score.
pub trait ScoreStore {
    fn load_best(&self) -> u32;
    fn save_best(&mut self, score: u32) -> io::Result<()>;
}

/// JSON file store.
pub struct JsonScoreStore {
    path: PathBuf,
}

impl JsonScoreStore {
    /// Store in the default data directory.
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            path: data_path(BEST_SCORE_FILE)?,
        })
    }

    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn record(&self) -> BestScore {
        load_json_or_default(&self.path)
    }
}

impl ScoreStore for JsonScoreStore {
    fn load_best(&self) -> u32 {
        self.record().best_score
    }

    fn save_best(&mut self, score: u32) -> io::Result<()> {
        let record = BestScore {
            best_score: score,
            achieved_at: Some(Utc::now().to_rfc3339()),
        };
        save_json(&self.path, &record)
    }
}

/// In-memory store for tests and the simulator.
#[derive(Debug, Default)]
pub struct MemoryScoreStore {
    pub best: u32,
    pub writes: u32,
}

impl ScoreStore for MemoryScoreStore {
    fn load_best(&self) -> u32 {
        self.best
    }

    fn save_best(&mut self, score: u32) -> io::Result<()> {
        self.best = score;
        self.writes += 1;
        Ok(())
    }
}

/// Persist `final_score` if it beats the stored best. Returns true on a new
/// record.
pub fn record_final_score<S: ScoreStore>(store: &mut S, final_score: u32) -> io::Result<bool> {
    if final_score <= store.load_best() {
        return Ok(false);
    }
    store.save_best(final_score)?;
    log::info!("new best score: {}", final_score);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_only_writes_improvements() {
        let mut store = MemoryScoreStore::default();
        assert!(record_final_score(&mut store, 12).unwrap());
        assert!(!record_final_score(&mut store, 12).unwrap());
        assert!(!record_final_score(&mut store, 3).unwrap());
        assert!(record_final_score(&mut store, 13).unwrap());
        assert_eq!(store.best, 13);
        assert_eq!(store.writes, 2);
    }

    #[test]
    fn test_zero_score_never_written() {
        let mut store = MemoryScoreStore::default();
        assert!(!record_final_score(&mut store, 0).unwrap());
        assert_eq!(store.writes, 0);
    }

    #[test]
    fn test_json_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(BEST_SCORE_FILE);
        let mut store = JsonScoreStore::at(path.clone());
        assert_eq!(store.load_best(), 0);

        assert!(record_final_score(&mut store, 27).unwrap());
        let reopened = JsonScoreStore::at(path);
        assert_eq!(reopened.load_best(), 27);
        assert!(reopened.record().achieved_at.is_some());
    }

    #[test]
    fn test_json_store_accepts_bare_score() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(BEST_SCORE_FILE);
        std::fs::write(&path, r#"{"best_score": 9}"#).unwrap();
        let store = JsonScoreStore::at(path);
        assert_eq!(store.load_best(), 9);
    }
}
