//! High score leaderboard system
//!
//! Persisted as plain text, one `name,score` record per line. The file is
//! append-only; ordering happens in memory.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;

use crate::consts::{BEST_SCORES, MAX_NAME_LEN};
use crate::error::{GameError, Result};

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u64,
}

impl LeaderboardEntry {
    /// Build an entry, cleaning the name for storage (no commas, at most 16 chars)
    pub fn new(name: &str, score: u64) -> Self {
        let name: String = name
            .trim()
            .chars()
            .filter(|c| *c != ',' && !c.is_control())
            .take(MAX_NAME_LEN)
            .collect();
        Self { name, score }
    }

    /// `name,score` without the trailing newline
    pub fn to_line(&self) -> String {
        format!("{},{}", self.name, self.score)
    }

    /// Parse one stored record; the first comma separates name from score
    pub fn parse_line(line: &str, line_no: usize) -> Result<Self> {
        let invalid = || GameError::InvalidLeaderboardLine {
            line: line_no,
            content: line.to_string(),
        };
        let (name, score) = line.split_once(',').ok_or_else(invalid)?;
        let score = score.trim().parse::<u64>().map_err(|_| invalid())?;
        Ok(Self {
            name: name.to_string(),
            score,
        })
    }
}

/// High score leaderboard, sorted descending and bounded to the display count
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from arbitrary entries
    pub fn from_entries(entries: impl IntoIterator<Item = LeaderboardEntry>) -> Self {
        let mut board = Self {
            entries: entries.into_iter().collect(),
        };
        board.sort();
        board
    }

    /// Load from a text file. A missing file gives an empty board; malformed
    /// lines are skipped with a warning.
    pub fn load(path: &Path) -> Result<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("No leaderboard at {}, starting fresh", path.display());
                return Ok(Self::new());
            }
            Err(e) => return Err(GameError::io(path, e)),
        };

        let entries = text
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .filter_map(|(i, line)| match LeaderboardEntry::parse_line(line, i + 1) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    log::warn!("{}: {}", path.display(), e);
                    None
                }
            });
        let board = Self::from_entries(entries);
        log::info!("Loaded {} best scores", board.len());
        Ok(board)
    }

    /// Append one record to the file, creating it (and its directory) if needed
    pub fn append_to(path: &Path, entry: &LeaderboardEntry) -> Result<()> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| GameError::io(dir, e))?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| GameError::io(path, e))?;
        writeln!(file, "{}", entry.to_line()).map_err(|e| GameError::io(path, e))
    }

    /// Check if a score earns a place: it must beat one of the top entries,
    /// or fill an empty slot
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        self.entries.len() < BEST_SCORES || self.entries.iter().any(|e| score > e.score)
    }

    /// Insert, re-sort and trim to the display count. Returns the 1-based rank
    /// if the entry made the board.
    pub fn insert(&mut self, entry: LeaderboardEntry) -> Option<usize> {
        // Ties go after the existing records
        let pos = self
            .entries
            .iter()
            .position(|e| entry.score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);
        self.entries.truncate(BEST_SCORES);
        (pos < BEST_SCORES).then_some(pos + 1)
    }

    fn sort(&mut self) {
        // Stable: earlier records win ties
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(BEST_SCORES);
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }
}
