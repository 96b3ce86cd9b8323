//! Hostile spawning and hostile fire

use glam::Vec2;
use rand::Rng;

use super::geometry::{rand_abs, rand_signed};
use super::state::{CraftId, GameEvent, GameState};
use crate::consts::*;

/// Randomized countdown to the next hostile appearance
#[derive(Debug, Clone)]
pub struct HostileSpawner {
    countdown: i32,
}

impl HostileSpawner {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            countdown: Self::interval(rng),
        }
    }

    /// Base interval plus or minus up to half of it
    fn interval<R: Rng + ?Sized>(rng: &mut R) -> i32 {
        let base = HOSTILE_SPAWN_TICKS as f32;
        ((base + rand_signed(rng, base / 2.0)) as i32).max(1)
    }

    /// Ticks left before the next spawn attempt
    pub fn countdown(&self) -> i32 {
        self.countdown
    }

    /// Count down one tick. Returns true when the timer expires (and rearms it).
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        self.countdown -= 1;
        if self.countdown > 0 {
            return false;
        }
        self.countdown = Self::interval(rng);
        true
    }
}

/// Advance the spawn timer and bring a hostile on screen when it expires.
///
/// The class is a coin flip; if that class is already visible nothing spawns.
pub fn spawn_check(state: &mut GameState) -> Option<CraftId> {
    if !state.spawner.tick(&mut state.rng) {
        return None;
    }

    let id = if state.rng.random_bool(0.5) {
        CraftId::BigHostile
    } else {
        CraftId::SmallHostile
    };
    if state.craft(id).visible {
        return None;
    }

    let half = state.height / 2.0;
    let pos = Vec2::new(0.0, half + rand_signed(&mut state.rng, half - 50.0));
    let vel = Vec2::new(
        HOSTILE_SPAWN_SPEED + rand_abs(&mut state.rng, HOSTILE_SPAWN_SPEED),
        0.0,
    );

    let GameState { crafts, events, .. } = &mut *state;
    crafts[id.index()].activate_at(pos, vel, events);
    log::debug!("{:?} spawned at y={:.0}", id, pos.y);
    state.emit(GameEvent::HostileSpawned(id));
    Some(id)
}

/// Every few ticks each visible hostile takes a shot at the player
pub fn hostile_fire_check(state: &mut GameState) {
    state.hostile_shot_ticks += 1;
    if state.hostile_shot_ticks < HOSTILE_SHOT_TICKS {
        return;
    }
    state.hostile_shot_ticks = 0;

    let target = state.player().pos;
    for id in CraftId::HOSTILES {
        let craft = &state.crafts[id.index()];
        if !craft.visible || !craft.is_alive() {
            continue;
        }
        let vel = craft.aim_at(target, &mut state.rng);
        state.fire(id, vel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_interval_in_range() {
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..200 {
            let spawner = HostileSpawner::new(&mut rng);
            assert!(spawner.countdown() >= HOSTILE_SPAWN_TICKS / 2);
            assert!(spawner.countdown() <= HOSTILE_SPAWN_TICKS * 3 / 2);
        }
    }

    #[test]
    fn test_spawns_on_left_edge() {
        let mut state = GameState::new(2);
        let mut spawned = None;
        for _ in 0..(HOSTILE_SPAWN_TICKS * 2) {
            spawned = spawn_check(&mut state);
            if spawned.is_some() {
                break;
            }
        }
        let id = spawned.expect("a hostile should spawn within two intervals");
        let craft = state.craft(id);
        assert!(craft.visible);
        assert!(craft.is_alive());
        assert_eq!(craft.pos.x, 0.0);
        assert!(craft.pos.y >= 50.0 && craft.pos.y <= state.height - 50.0);
        assert!(craft.vel.x >= HOSTILE_SPAWN_SPEED);
        assert!(state.events.contains(&GameEvent::HostileSpawned(id)));
    }

    #[test]
    fn test_visible_class_not_respawned() {
        let mut state = GameState::new(3);
        let GameState { crafts, events, .. } = &mut state;
        for id in CraftId::HOSTILES {
            crafts[id.index()].activate_at(Vec2::new(10.0, 10.0), Vec2::ZERO, events);
        }
        for _ in 0..(HOSTILE_SPAWN_TICKS * 2) {
            assert_eq!(spawn_check(&mut state), None);
        }
        for id in CraftId::HOSTILES {
            assert_eq!(state.craft(id).pos, Vec2::new(10.0, 10.0));
        }
    }

    #[test]
    fn test_hostile_fire_gated() {
        let mut state = GameState::new(4);
        let GameState { crafts, events, .. } = &mut state;
        crafts[CraftId::SmallHostile.index()].activate_at(
            Vec2::new(10.0, 300.0),
            Vec2::ZERO,
            events,
        );

        for _ in 0..HOSTILE_SHOT_TICKS - 1 {
            hostile_fire_check(&mut state);
        }
        assert!(state.projectiles.is_empty());
        hostile_fire_check(&mut state);
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.projectiles[0].owner(), CraftId::SmallHostile);

        // Aimed roughly at the player to the right
        assert!(state.projectiles[0].vel.x > 0.0);
    }

    #[test]
    fn test_hidden_hostile_holds_fire() {
        let mut state = GameState::new(5);
        for _ in 0..HOSTILE_SHOT_TICKS * 3 {
            hostile_fire_check(&mut state);
        }
        assert!(state.projectiles.is_empty());
    }
}
