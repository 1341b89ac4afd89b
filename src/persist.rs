//! Persistence for saved games and the best score.
//!
//! State is stored as JSON under two keys of a [`KeyValueStore`]:
//! `game2048_state` holds the full game, `bestScore` the best score alone so
//! it outlives a cleared game. Loading never fails: anything unreadable is
//! logged, corrupt entries are deleted, and the caller starts fresh.

mod store;

pub use store::{FileStore, KeyValueStore, MemoryStore};

use crate::error::{PersistError, PersistResult};
use crate::game::{Board, Snapshot};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Key holding the full saved game.
pub const STATE_KEY: &str = "game2048_state";

/// Key holding the best score.
pub const BEST_SCORE_KEY: &str = "bestScore";

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "TWENTY48_DATA_DIR";

/// Everything needed to resume a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedState {
    /// The board, validated on load.
    pub grid: Board,
    /// Score of the saved game.
    pub score: u32,
    /// Best score when the game was saved.
    pub best_score: u32,
    /// Save time in milliseconds since the Unix epoch. Informational only.
    #[serde(default)]
    pub timestamp: u64,
}

impl SavedState {
    /// Capture a snapshot, stamped with the current time.
    #[must_use]
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
            .unwrap_or(0);

        Self {
            grid: snapshot.board,
            score: snapshot.score,
            best_score: snapshot.best_score,
            timestamp,
        }
    }

    /// Encode as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> PersistResult<String> {
        serde_json::to_string(self).map_err(|e| PersistError::StorageUnavailable(e.to_string()))
    }

    /// Decode from JSON, validating every cell.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::CorruptState`] for malformed JSON, missing
    /// fields or invalid cell values.
    pub fn from_json(json: &str) -> PersistResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Read the saved game without touching the store.
///
/// # Errors
///
/// Returns [`PersistError::CorruptState`] if the stored value cannot be
/// decoded, and any error the store raises while reading.
pub fn read_state(store: &impl KeyValueStore) -> PersistResult<Option<SavedState>> {
    store
        .get(STATE_KEY)?
        .map(|raw| SavedState::from_json(&raw))
        .transpose()
}

/// Read the saved game, discarding it if corrupt.
///
/// Returns `None` when nothing is saved, when the store cannot be read, or
/// when the stored value is corrupt. A corrupt value, whether undecodable
/// bytes or bad JSON, is removed from the store so the next load starts
/// clean.
pub fn load_state(store: &mut impl KeyValueStore) -> Option<SavedState> {
    match read_state(store) {
        Ok(state) => state,
        Err(e @ PersistError::CorruptState(_)) => {
            warn!("Discarding saved game: {e}");
            if let Err(e) = store.remove(STATE_KEY) {
                warn!("Failed to clear corrupt game state: {e}");
            }
            None
        }
        Err(e) => {
            warn!("Failed to load game state: {e}");
            None
        }
    }
}

/// Read the best score alone. Missing or unreadable values count as 0.
pub fn load_best_score(store: &impl KeyValueStore) -> u32 {
    match store.get(BEST_SCORE_KEY) {
        Ok(Some(raw)) => raw.trim().parse().unwrap_or_else(|e| {
            warn!("Ignoring unreadable best score {raw:?}: {e}");
            0
        }),
        Ok(None) => 0,
        Err(e) => {
            warn!("Failed to load best score: {e}");
            0
        }
    }
}

/// Save the game and the best score.
///
/// # Errors
///
/// Returns an error if either key cannot be written.
pub fn save_state(store: &mut impl KeyValueStore, snapshot: &Snapshot) -> PersistResult<()> {
    let state = SavedState::from_snapshot(snapshot);
    store.set(STATE_KEY, &state.to_json()?)?;
    store.set(BEST_SCORE_KEY, &snapshot.best_score.to_string())
}

/// Delete the saved game, keeping the best score.
///
/// # Errors
///
/// Returns an error if the store cannot be written.
pub fn clear_state(store: &mut impl KeyValueStore) -> PersistResult<()> {
    store.remove(STATE_KEY)
}

/// Delete the best score.
///
/// # Errors
///
/// Returns an error if the store cannot be written.
pub fn clear_best_score(store: &mut impl KeyValueStore) -> PersistResult<()> {
    store.remove(BEST_SCORE_KEY)
}

/// Get the path to the data directory.
///
/// Uses `$TWENTY48_DATA_DIR` when set, otherwise `~/.twenty48`. Creates the
/// directory if it doesn't exist.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined or directory
/// creation fails.
pub fn data_dir() -> PersistResult<PathBuf> {
    let dir = if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        PathBuf::from(dir)
    } else {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| {
                PersistError::StorageUnavailable("cannot determine home directory".to_string())
            })?;
        Path::new(&home).join(".twenty48")
    };

    fs::create_dir_all(&dir)?;
    Ok(dir)
}
