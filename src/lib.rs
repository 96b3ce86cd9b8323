//! Asteroids 2K - a vector arcade asteroid field
//!
//! Core modules:
//! - `sim`: Deterministic simulation (craft, fragments, projectiles, collisions, waves)
//! - `renderer`: Draw-command issuing against a host canvas
//! - `audio`: Logical sound vocabulary and the audio collaborator seam
//! - `highscores`: Leaderboard with `name,score` text persistence
//! - `game`: Host-facing session that sequences input, simulation, audio and drawing

pub mod assets;
pub mod audio;
pub mod error;
pub mod game;
pub mod highscores;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{GameError, Result};
pub use game::{Game, InputSnapshot, NamePrompt};
pub use highscores::{Leaderboard, LeaderboardEntry};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    use std::f32::consts::PI;

    /// Simulation timestep applied to every velocity integration
    pub const SIM_DT: f32 = 0.1;
    /// Target tick rate driven by the host loop
    pub const TARGET_FPS: u32 = 60;

    /// Default play area
    pub const PLAY_WIDTH: f32 = 800.0;
    pub const PLAY_HEIGHT: f32 = 600.0;

    /// Run bookkeeping
    pub const MAX_LIVES: u32 = 3;
    pub const START_LEVEL: u32 = 1;
    pub const START_SCORE: u64 = 0;
    pub const BONUS_COUNTER: u64 = 1;
    pub const BONUS_POINTS: u64 = 1000;
    /// Large fragments spawned per level number
    pub const FRAGMENTS_PER_LEVEL: u32 = 5;

    /// Fragment tuning
    pub const FRAGMENT_VEL: f32 = 10.0;
    pub const FRAGMENT_VEL_RATIO: f32 = 2.0;
    pub const FRAGMENT_LARGE_SIZE: f32 = 30.0;
    pub const FRAGMENT_MEDIUM_SIZE: f32 = 20.0;
    pub const FRAGMENT_SMALL_SIZE: f32 = 10.0;
    pub const FRAGMENT_VERTS: usize = 16;

    pub const LARGE_FRAGMENT_SCORE: u64 = 5;
    pub const MEDIUM_FRAGMENT_SCORE: u64 = 10;
    pub const SMALL_FRAGMENT_SCORE: u64 = 20;
    pub const BIG_HOSTILE_SCORE: u64 = 100;
    pub const SMALL_HOSTILE_SCORE: u64 = 500;

    /// Clearance required around the respawn point
    pub const SAFETY_DISTANCE: f32 = 2.0 * FRAGMENT_LARGE_SIZE;

    /// Craft tuning
    pub const SHIP_SIZE: f32 = 16.0;
    pub const BIG_HOSTILE_SIZE: f32 = 1.5 * SHIP_SIZE;
    pub const SHIP_ROT_STEP: f32 = 10.0;
    pub const SHIP_IMPULSE: f32 = 4.0;
    pub const SHIP_MAX_VEL: f32 = 250.0;
    pub const SHIP_IMPULSE_TICKS: u32 = 20;
    pub const SHIP_THRUST_SOUND_TICKS: u32 = 15;
    pub const SHIP_EXPLOSION_TICKS: u32 = 64;
    pub const SHIP_DEBRIS: usize = 16;
    pub const SHIP_DEBRIS_SCALE: f32 = 8.0;
    pub const SHIELD_TICKS: u32 = 100;
    /// Heading the player starts (and respawns) with, in degrees
    pub const PLAYER_START_HEADING: f32 = 180.0;

    /// Hostile tuning
    pub const HOSTILE_DRIFT_TICKS: u32 = 25;
    pub const HOSTILE_DRIFT: f32 = 5.0;
    pub const HOSTILE_SPAWN_TICKS: i32 = 500;
    pub const HOSTILE_SPAWN_SPEED: f32 = 25.0;
    pub const HOSTILE_SHOT_TICKS: u32 = 20;
    pub const BIG_HOSTILE_INACCURACY: f32 = PI / 16.0;
    pub const SMALL_HOSTILE_INACCURACY: f32 = PI / 64.0;

    /// Projectile tuning
    pub const PROJECTILE_SPEED: f32 = 100.0;
    pub const PLAYER_SHOT_TICKS: u32 = 6;

    /// Game-over splash screens rotate every 5 seconds
    pub const SPLASH_TICKS: u32 = 5 * TARGET_FPS;
    /// Leaderboard rows shown and tested for qualification
    pub const BEST_SCORES: usize = 5;
    /// Longest name stored on the leaderboard
    pub const MAX_NAME_LEN: usize = 16;

    /// Master volume
    pub const START_VOLUME: f32 = 0.25;
    pub const VOLUME_STEP: f32 = 0.05;
}

/// RGB color used by draw commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::gray(255);
    pub const BLACK: Color = Color::gray(0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn gray(level: u8) -> Self {
        Self {
            r: level,
            g: level,
            b: level,
        }
    }

    /// Scale all channels by `factor` (clamped to 0..=1)
    pub fn scaled(self, factor: f32) -> Self {
        let f = factor.clamp(0.0, 1.0);
        Self {
            r: (self.r as f32 * f) as u8,
            g: (self.g as f32 * f) as u8,
            b: (self.b as f32 * f) as u8,
        }
    }
}
