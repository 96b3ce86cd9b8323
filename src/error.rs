//! Error types for startup and persistence

use std::path::PathBuf;

use thiserror::Error;

/// Crate error type
#[derive(Debug, Error)]
pub enum GameError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("help text not found: {0}")]
    MissingHelp(PathBuf),

    #[error("sound not available: {0}")]
    MissingSound(String),

    #[error("invalid settings file {path}: {source}")]
    Settings {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid leaderboard line {line}: {content:?}")]
    InvalidLeaderboardLine { line: usize, content: String },
}

impl GameError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GameError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
