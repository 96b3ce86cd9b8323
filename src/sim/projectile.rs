//! Projectiles fired by craft

use glam::Vec2;

use super::geometry::is_inside;
use super::state::CraftId;

/// A single shot
///
/// Created unarmed by [`Projectile::new`], then given a position and velocity by
/// [`Projectile::arm`]. The `owner` handle only keeps the shooter from being hit
/// by its own shot; it never affects how long the projectile lives.
#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub armed: bool,
    owner: CraftId,
}

/// Where an unarmed projectile waits (off the play area)
const PARKED: Vec2 = Vec2::new(-10.0, -10.0);

impl Projectile {
    pub fn new(id: u32, owner: CraftId) -> Self {
        Self {
            id,
            pos: PARKED,
            vel: Vec2::ZERO,
            armed: false,
            owner,
        }
    }

    /// The craft that fired this projectile
    #[inline]
    pub fn owner(&self) -> CraftId {
        self.owner
    }

    /// Arm the projectile at `pos` travelling with `vel`
    pub fn arm(&mut self, pos: Vec2, vel: Vec2) {
        self.pos = pos;
        self.vel = vel;
        self.armed = true;
    }

    /// Advance an armed projectile by one step
    pub fn update(&mut self, dt: f32) {
        if self.armed {
            self.pos += self.vel * dt;
        }
    }

    /// True while the projectile is still inside the play area
    #[inline]
    pub fn in_bounds(&self, width: f32, height: f32) -> bool {
        is_inside(self.pos, width, height)
    }
}
