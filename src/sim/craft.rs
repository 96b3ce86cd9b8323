//! Craft state machine shared by the player and the two hostiles
//!
//! ```text
//! Inactive --activate/reset--> Active --explode--> Exploding(n) --n ticks--> Inactive
//! ```
//!
//! Only an explicit reset or activation brings a craft back from `Inactive`.

use glam::Vec2;
use rand::Rng;

use super::fragment::Fragment;
use super::geometry::{distance, heading_vector, rand_abs, rand_signed};
use super::state::{CraftId, GameEvent};
use crate::audio::{Sound, SoundCommand};
use crate::consts::*;

/// Where parked craft wait off screen
pub const PARKED_POS: Vec2 = Vec2::new(-100.0, -100.0);

/// One piece of wreckage flying out from an explosion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Debris {
    /// Offset from the explosion center at tick zero
    pub offset: Vec2,
    /// Extra outward speed, in percent per tick
    pub scale: f32,
}

/// A running explosion animation
#[derive(Debug, Clone, PartialEq)]
pub struct Explosion {
    pub origin: Vec2,
    pub ticks_left: u32,
    pub debris: Vec<Debris>,
}

impl Explosion {
    fn new<R: Rng + ?Sized>(rng: &mut R, origin: Vec2, size: f32) -> Self {
        let count = SHIP_DEBRIS / 2 + (rand_abs(rng, SHIP_DEBRIS as f32) / 2.0) as usize;
        let count = count.min(SHIP_DEBRIS);
        let step = std::f32::consts::TAU / count as f32;
        let debris = (0..count)
            .map(|i| {
                let angle = i as f32 * step;
                let reach = size / 4.0 + rand_abs(rng, size);
                Debris {
                    offset: Vec2::new(angle.cos(), angle.sin()) * reach,
                    scale: rand_abs(rng, SHIP_DEBRIS_SCALE),
                }
            })
            .collect();
        Self {
            origin,
            ticks_left: SHIP_EXPLOSION_TICKS,
            debris,
        }
    }

    /// Ticks since the explosion started
    pub fn elapsed(&self) -> u32 {
        SHIP_EXPLOSION_TICKS - self.ticks_left
    }

    /// Current debris positions
    pub fn points(&self) -> impl Iterator<Item = Vec2> + '_ {
        let elapsed = self.elapsed() as f32;
        self.debris
            .iter()
            .map(move |d| self.origin + d.offset * (16.0 + d.scale) / 100.0 * elapsed)
    }

    /// Fades linearly from 1 to 0 over the animation
    pub fn brightness(&self) -> f32 {
        self.ticks_left as f32 / SHIP_EXPLOSION_TICKS as f32
    }
}

/// Lifecycle of a craft
#[derive(Debug, Clone, PartialEq)]
pub enum CraftState {
    /// Dead or parked. Inert until reset or activated.
    Inactive,
    /// Alive and collidable
    Active,
    /// Running the explosion animation, not collidable
    Exploding(Explosion),
}

/// A player ship or hostile saucer
#[derive(Debug, Clone)]
pub struct Craft {
    pub id: CraftId,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Degrees. 180 points up.
    pub heading: f32,
    pub size: f32,
    pub state: CraftState,
    pub visible: bool,
    pub shield_active: bool,
    /// Ticks until the shield may be raised again
    pub shield_cooldown: u32,
    /// Ticks left on the engine flame
    pub impulse_ticks: u32,
    thrust_sound_ticks: u32,
    drift_ticks: u32,
}

impl Craft {
    pub fn new(id: CraftId) -> Self {
        let state = if id.is_hostile() {
            CraftState::Inactive
        } else {
            CraftState::Active
        };
        Self {
            id,
            pos: PARKED_POS,
            vel: Vec2::ZERO,
            heading: 0.0,
            size: id.size(),
            state,
            visible: false,
            shield_active: false,
            shield_cooldown: 0,
            impulse_ticks: 0,
            thrust_sound_ticks: 0,
            drift_ticks: 0,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.state == CraftState::Active
    }

    #[inline]
    pub fn is_exploding(&self) -> bool {
        matches!(self.state, CraftState::Exploding(_))
    }

    pub fn explosion(&self) -> Option<&Explosion> {
        match &self.state {
            CraftState::Exploding(e) => Some(e),
            _ => None,
        }
    }

    /// Back to a fresh, alive but hidden craft at the origin
    pub fn reset(&mut self, events: &mut Vec<GameEvent>) {
        self.pos = Vec2::ZERO;
        self.vel = Vec2::ZERO;
        self.heading = 0.0;
        self.state = CraftState::Active;
        self.shield_active = false;
        self.shield_cooldown = 0;
        self.impulse_ticks = 0;
        self.thrust_sound_ticks = 0;
        self.drift_ticks = 0;
        self.set_visible(false, events);
    }

    /// Put the craft at `pos` facing `heading`, at rest
    pub fn place(&mut self, pos: Vec2, heading: f32) {
        self.pos = pos;
        self.heading = heading;
        self.vel = Vec2::ZERO;
    }

    /// Move off screen and go inert. Used for hostiles waiting to spawn.
    pub fn park(&mut self) {
        self.pos = PARKED_POS;
        self.vel = Vec2::ZERO;
        self.state = CraftState::Inactive;
    }

    /// Bring a hostile on screen at `pos` moving with `vel`
    pub fn activate_at(&mut self, pos: Vec2, vel: Vec2, events: &mut Vec<GameEvent>) {
        self.pos = pos;
        self.vel = vel;
        self.state = CraftState::Active;
        self.drift_ticks = 0;
        self.set_visible(true, events);
    }

    /// Hide and stop the craft. A running explosion keeps animating.
    pub fn deactivate(&mut self, events: &mut Vec<GameEvent>) {
        if self.is_alive() {
            self.state = CraftState::Inactive;
        }
        self.set_visible(false, events);
    }

    /// Hostiles start or stop their ambient loop when visibility flips
    pub fn set_visible(&mut self, visible: bool, events: &mut Vec<GameEvent>) {
        if self.visible == visible {
            return;
        }
        self.visible = visible;
        if let Some(sound) = self.id.loop_sound() {
            let command = if visible {
                SoundCommand::looped(sound)
            } else {
                SoundCommand::Stop(sound)
            };
            events.push(GameEvent::Sound(command));
        }
    }

    pub fn rotate_left(&mut self) {
        self.heading += SHIP_ROT_STEP;
    }

    pub fn rotate_right(&mut self) {
        self.heading -= SHIP_ROT_STEP;
    }

    /// Push along the heading, each axis capped at the maximum speed
    pub fn impulse(&mut self, amount: f32, events: &mut Vec<GameEvent>) {
        self.impulse_ticks = SHIP_IMPULSE_TICKS;
        self.vel += heading_vector(self.heading) * amount;
        self.vel = self
            .vel
            .clamp(Vec2::splat(-SHIP_MAX_VEL), Vec2::splat(SHIP_MAX_VEL));

        if self.thrust_sound_ticks == 0 {
            self.thrust_sound_ticks = SHIP_THRUST_SOUND_TICKS;
            events.push(GameEvent::Sound(SoundCommand::once(Sound::ShipThrust)));
        }
    }

    /// Raise the shield if the cooldown has run out. Returns whether it went up.
    pub fn activate_shield(&mut self, events: &mut Vec<GameEvent>) -> bool {
        if self.shield_active || self.shield_cooldown > 0 {
            return false;
        }
        self.shield_active = true;
        self.shield_cooldown = SHIELD_TICKS;
        events.push(GameEvent::Sound(SoundCommand::once(Sound::Shield)));
        true
    }

    /// Shield flickers during the last quarter of its duration
    pub fn shield_blinking(&self) -> bool {
        self.shield_active && self.shield_cooldown < SHIELD_TICKS / 4
    }

    /// Blow the craft up. No-op unless alive.
    pub fn explode<R: Rng + ?Sized>(&mut self, rng: &mut R, events: &mut Vec<GameEvent>) {
        if !self.is_alive() {
            return;
        }
        let mut explosion = Explosion::new(rng, self.pos, self.size);
        // First animation frame runs immediately
        explosion.ticks_left -= 1;
        self.state = CraftState::Exploding(explosion);
        self.shield_active = false;
        self.impulse_ticks = 0;
        self.set_visible(false, events);
        events.push(GameEvent::Sound(SoundCommand::once(Sound::ShipExplosion)));
        events.push(GameEvent::CraftDestroyed(self.id));
        log::debug!("{:?} destroyed at ({:.0}, {:.0})", self.id, self.pos.x, self.pos.y);
    }

    /// Advance one tick
    pub fn update<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R) {
        match &mut self.state {
            CraftState::Inactive => {}
            CraftState::Exploding(explosion) => {
                explosion.ticks_left = explosion.ticks_left.saturating_sub(1);
                if explosion.ticks_left == 0 {
                    self.state = CraftState::Inactive;
                }
            }
            CraftState::Active => {
                if self.id.is_hostile() {
                    self.drift_ticks += 1;
                    if self.drift_ticks >= HOSTILE_DRIFT_TICKS {
                        self.drift_ticks = 0;
                        self.vel.y += rand_signed(rng, 2.0 * HOSTILE_DRIFT);
                        self.vel.x += rand_abs(rng, HOSTILE_DRIFT);
                    }
                }
                self.pos += self.vel * dt;
            }
        }

        if self.shield_cooldown > 0 {
            self.shield_cooldown -= 1;
            if self.shield_cooldown == 0 {
                self.shield_active = false;
            }
        }
        self.impulse_ticks = self.impulse_ticks.saturating_sub(1);
        self.thrust_sound_ticks = self.thrust_sound_ticks.saturating_sub(1);
    }

    /// Projectile hit test
    #[inline]
    pub fn is_hit_by(&self, point: Vec2) -> bool {
        distance(self.pos, point) <= self.size
    }

    /// Body contact test against a fragment
    #[inline]
    pub fn touches(&self, fragment: &Fragment) -> bool {
        distance(self.pos, fragment.pos) <= fragment.radius + self.size / 2.0
    }

    /// Player shot: along the heading, inheriting the ship's velocity
    pub fn shot_velocity(&self) -> Vec2 {
        heading_vector(self.heading) * PROJECTILE_SPEED + self.vel
    }

    /// Hostile shot toward `target`, deflected by up to twice the role's inaccuracy
    pub fn aim_at<R: Rng + ?Sized>(&self, target: Vec2, rng: &mut R) -> Vec2 {
        let k = self.id.inaccuracy();
        let delta = target - self.pos;
        let angle = delta.y.atan2(delta.x) + k + rand_signed(rng, k);
        Vec2::new(angle.cos(), angle.sin()) * PROJECTILE_SPEED
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::fragment::FragmentClass;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn player() -> Craft {
        let mut events = Vec::new();
        let mut craft = Craft::new(CraftId::Player);
        craft.reset(&mut events);
        craft.place(Vec2::new(400.0, 300.0), PLAYER_START_HEADING);
        craft.visible = true;
        craft
    }

    #[test]
    fn test_explosion_runs_then_goes_inert() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut events = Vec::new();
        let mut craft = player();
        craft.explode(&mut rng, &mut events);
        assert!(craft.is_exploding());
        assert!(!craft.is_alive());
        assert!(!craft.visible);
        assert!(events.contains(&GameEvent::CraftDestroyed(CraftId::Player)));

        for _ in 0..SHIP_EXPLOSION_TICKS {
            craft.update(SIM_DT, &mut rng);
        }
        assert_eq!(craft.state, CraftState::Inactive);

        // Stays inert
        craft.update(SIM_DT, &mut rng);
        assert_eq!(craft.state, CraftState::Inactive);
    }

    #[test]
    fn test_explode_ignored_unless_alive() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut events = Vec::new();
        let mut craft = Craft::new(CraftId::BigHostile);
        craft.explode(&mut rng, &mut events);
        assert_eq!(craft.state, CraftState::Inactive);
        assert!(events.is_empty());
    }

    #[test]
    fn test_debris_count_bounded() {
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..50 {
            let e = Explosion::new(&mut rng, Vec2::ZERO, SHIP_SIZE);
            assert!(e.debris.len() >= SHIP_DEBRIS / 2);
            assert!(e.debris.len() <= SHIP_DEBRIS);
        }
    }

    #[test]
    fn test_impulse_caps_each_axis() {
        let mut events = Vec::new();
        let mut craft = player();
        for _ in 0..200 {
            craft.impulse(SHIP_IMPULSE, &mut events);
        }
        assert!(craft.vel.y >= -SHIP_MAX_VEL);
        assert!((craft.vel.y + SHIP_MAX_VEL).abs() < 1e-3);
        assert!(craft.vel.x.abs() <= SHIP_MAX_VEL);
        assert_eq!(craft.impulse_ticks, SHIP_IMPULSE_TICKS);
    }

    #[test]
    fn test_thrust_sound_rate_limited() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut events = Vec::new();
        let mut craft = player();
        for _ in 0..SHIP_THRUST_SOUND_TICKS {
            craft.impulse(SHIP_IMPULSE, &mut events);
            craft.update(SIM_DT, &mut rng);
        }
        craft.impulse(SHIP_IMPULSE, &mut events);
        let thrusts = events
            .iter()
            .filter(|e| **e == GameEvent::Sound(SoundCommand::once(Sound::ShipThrust)))
            .count();
        assert_eq!(thrusts, 2);
    }

    #[test]
    fn test_shield_cooldown_cycle() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut events = Vec::new();
        let mut craft = player();
        assert!(craft.activate_shield(&mut events));
        assert!(!craft.activate_shield(&mut events));
        assert!(!craft.shield_blinking());

        for _ in 0..(SHIELD_TICKS - SHIELD_TICKS / 4 + 1) {
            craft.update(SIM_DT, &mut rng);
        }
        assert!(craft.shield_blinking());

        for _ in 0..SHIELD_TICKS {
            craft.update(SIM_DT, &mut rng);
        }
        assert!(!craft.shield_active);
        assert!(craft.activate_shield(&mut events));
    }

    #[test]
    fn test_visibility_sound_on_transition_only() {
        let mut events = Vec::new();
        let mut craft = Craft::new(CraftId::SmallHostile);
        craft.activate_at(Vec2::new(0.0, 200.0), Vec2::new(30.0, 0.0), &mut events);
        craft.set_visible(true, &mut events);
        craft.deactivate(&mut events);
        craft.deactivate(&mut events);
        assert_eq!(
            events,
            vec![
                GameEvent::Sound(SoundCommand::looped(Sound::SaucerSmall)),
                GameEvent::Sound(SoundCommand::Stop(Sound::SaucerSmall)),
            ]
        );
    }

    #[test]
    fn test_player_has_no_loop_sound() {
        let mut events = Vec::new();
        let mut craft = Craft::new(CraftId::Player);
        craft.set_visible(true, &mut events);
        craft.set_visible(false, &mut events);
        assert!(events.is_empty());
    }

    #[test]
    fn test_hostile_drifts_forward() {
        let mut rng = Pcg32::seed_from_u64(6);
        let mut events = Vec::new();
        let mut craft = Craft::new(CraftId::BigHostile);
        craft.activate_at(Vec2::new(0.0, 300.0), Vec2::new(30.0, 0.0), &mut events);
        for _ in 0..HOSTILE_DRIFT_TICKS * 4 {
            craft.update(SIM_DT, &mut rng);
        }
        assert!(craft.vel.x >= 30.0);
        assert!(craft.pos.x > 0.0);
    }

    #[test]
    fn test_aim_within_cone() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut events = Vec::new();
        let mut craft = Craft::new(CraftId::BigHostile);
        craft.activate_at(Vec2::ZERO, Vec2::ZERO, &mut events);
        let target = Vec2::new(100.0, 0.0);
        for _ in 0..100 {
            let v = craft.aim_at(target, &mut rng);
            assert!((v.length() - PROJECTILE_SPEED).abs() < 1e-2);
            let angle = v.y.atan2(v.x);
            assert!(angle >= -1e-4 && angle <= 2.0 * BIG_HOSTILE_INACCURACY + 1e-4);
        }
    }

    #[test]
    fn test_collision_radii() {
        let mut rng = Pcg32::seed_from_u64(8);
        let craft = player();
        assert!(craft.is_hit_by(craft.pos + Vec2::new(SHIP_SIZE, 0.0)));
        assert!(!craft.is_hit_by(craft.pos + Vec2::new(SHIP_SIZE + 0.1, 0.0)));

        let fragment = Fragment::new(
            1,
            FragmentClass::Large,
            craft.pos + Vec2::new(30.0 + SHIP_SIZE / 2.0, 0.0),
            Vec2::ZERO,
            30.0,
            &mut rng,
        );
        assert!(craft.touches(&fragment));
    }
}
