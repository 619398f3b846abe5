//! High score leaderboard system
//!
//! Persisted as a JSON array under a fixed key. Entries are only ever
//! appended; ranking happens on read. Only the top 10 are shown.

use serde::{Deserialize, Serialize};

use crate::persistence::{KeyValueStore, StorageError};

/// Maximum number of high scores surfaced to the player
pub const MAX_HIGH_SCORES: usize = 10;

/// Name stored when the player leaves the name field blank
pub const ANONYMOUS: &str = "Anonymous";

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u32,
}

/// High score leaderboard over a key-value store
#[derive(Debug)]
pub struct Leaderboard<S> {
    store: S,
}

impl<S: KeyValueStore> Leaderboard<S> {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "flappyzolder_leaderboard";

    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// All stored entries, best first. Ties keep insertion order.
    ///
    /// Missing, unreadable or malformed data reads as an empty board.
    pub fn load(&self) -> Vec<LeaderboardEntry> {
        let json = match self.store.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => json,
            Ok(None) => return Vec::new(),
            Err(e) => {
                log::warn!("Leaderboard unreadable, treating as empty: {}", e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<LeaderboardEntry>>(&json) {
            Ok(mut entries) => {
                entries.sort_by(|a, b| b.score.cmp(&a.score));
                entries
            }
            Err(e) => {
                log::warn!("Leaderboard data corrupt, treating as empty: {}", e);
                Vec::new()
            }
        }
    }

    /// The entries shown to the player
    pub fn top(&self) -> Vec<LeaderboardEntry> {
        let mut entries = self.load();
        entries.truncate(MAX_HIGH_SCORES);
        entries
    }

    /// Check if a score earns a spot on the board
    pub fn is_high_score(&self, score: u32) -> bool {
        self.is_high_score_within(score, MAX_HIGH_SCORES)
    }

    /// Check if a score qualifies against a board of `max_entries`
    ///
    /// A zero score never qualifies. Otherwise the score qualifies if the
    /// board has room, or if it beats the lowest stored score.
    pub fn is_high_score_within(&self, score: u32, max_entries: usize) -> bool {
        if score == 0 {
            return false;
        }
        let entries = self.load();
        if entries.len() < max_entries {
            return true;
        }
        entries
            .iter()
            .map(|e| e.score)
            .min()
            .is_none_or(|lowest| score > lowest)
    }

    /// Append a score and persist the whole board
    ///
    /// Blank names are stored as [`ANONYMOUS`].
    pub fn record(&mut self, name: &str, score: u32) -> Result<(), StorageError> {
        let name = match name.trim() {
            "" => ANONYMOUS,
            trimmed => trimmed,
        };

        let mut entries = self.load();
        entries.push(LeaderboardEntry {
            name: name.to_string(),
            score,
        });

        let json = serde_json::to_string(&entries).map_err(|e| StorageError::Write {
            key: Self::STORAGE_KEY.to_string(),
            reason: e.to_string(),
        })?;
        self.store.set(Self::STORAGE_KEY, &json)?;
        log::info!(
            "Recorded {} for {} ({} entries stored)",
            score,
            name,
            entries.len()
        );
        Ok(())
    }

    /// Access the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }
}
