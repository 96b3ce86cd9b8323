//! Game settings and preferences
//!
//! Stored as JSON next to the game data. Every field has a default, so a
//! partial file only overrides what it names.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::consts::{PLAY_HEIGHT, PLAY_WIDTH, START_VOLUME, TARGET_FPS};
use crate::error::{GameError, Result};

/// Leaderboard file name inside `data_dir`
pub const SCORES_FILE: &str = "best_scores.txt";
/// Help text file name inside `data_dir`
pub const HELP_FILE: &str = "help.txt";

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Play area size in pixels
    pub play_width: f32,
    pub play_height: f32,
    /// Simulation ticks per second
    pub fps: u32,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Directory holding the leaderboard and help text
    pub data_dir: PathBuf,
    /// Fixed RNG seed; random per run when absent
    pub seed: Option<u64>,
    /// Stop the headless runner after this many ticks
    pub max_ticks: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            play_width: PLAY_WIDTH,
            play_height: PLAY_HEIGHT,
            fps: TARGET_FPS,
            master_volume: START_VOLUME,
            data_dir: PathBuf::from("data"),
            seed: None,
            max_ticks: None,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file. A missing file gives the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("Using default settings");
                return Ok(Self::default());
            }
            Err(e) => return Err(GameError::io(path, e)),
        };
        let settings: Settings =
            serde_json::from_str(&json).map_err(|source| GameError::Settings {
                path: path.to_path_buf(),
                source,
            })?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings.sanitized())
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|source| GameError::Settings {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(|e| GameError::io(path, e))?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Clamp out-of-range values back into something playable
    fn sanitized(mut self) -> Self {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.fps = self.fps.max(1);
        if self.play_width <= 0.0 || self.play_height <= 0.0 {
            log::warn!("Ignoring invalid play area {}x{}", self.play_width, self.play_height);
            self.play_width = PLAY_WIDTH;
            self.play_height = PLAY_HEIGHT;
        }
        self
    }

    /// Configured seed, or one derived from the clock
    pub fn effective_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        })
    }

    pub fn scores_path(&self) -> PathBuf {
        self.data_dir.join(SCORES_FILE)
    }

    pub fn help_path(&self) -> PathBuf {
        self.data_dir.join(HELP_FILE)
    }
}
