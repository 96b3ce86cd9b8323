//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (one `Pcg32` owned by the state)
//! - Tick counters for every cooldown, never wall-clock time
//! - No rendering or audio playback: sounds are only named, and every side
//!   effect leaves as a `GameEvent`

pub mod collision;
pub mod craft;
pub mod fragment;
pub mod geometry;
pub mod projectile;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod wave;

pub use collision::{CollisionReport, resolve};
pub use craft::{Craft, CraftState, Debris, Explosion};
pub use fragment::{Fragment, FragmentClass};
pub use projectile::Projectile;
pub use spawner::HostileSpawner;
pub use state::{CraftId, EntityIds, GameEvent, GamePhase, GameState, SplashScreen};
pub use tick::{TickInput, tick};
