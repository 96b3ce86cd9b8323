//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use super::collision;
use super::geometry::{is_inside, wrap_position};
use super::spawner;
use super::state::{CraftId, GameState};
use super::wave;
use crate::consts::*;

/// Player commands for a single tick (held keys)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub thrust: bool,
    pub fire: bool,
    pub shield: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.time_ticks += 1;
    state.player_shot_cooldown = state.player_shot_cooldown.saturating_sub(1);

    apply_controls(state, input);

    // Craft motion, countdowns, shield expiry, debris animation
    for craft in state.crafts.iter_mut() {
        craft.update(dt, &mut state.rng);
    }

    spawner::hostile_fire_check(state);

    let (width, height) = (state.width, state.height);
    for projectile in state.projectiles.iter_mut() {
        projectile.update(dt);
    }
    state.projectiles.retain(|p| p.in_bounds(width, height));

    for fragment in state.fragments.iter_mut().filter(|f| f.alive) {
        fragment.update(dt);
        fragment.pos = wrap_position(fragment.pos, width, height);
    }

    force_inside_limits(state);

    if state.is_game_over() {
        advance_splash(state);
        return;
    }

    wave::respawn_check(state);
    spawner::spawn_check(state);
    collision::resolve(state);
    if state.is_game_over() {
        return;
    }
    wave::bonus_check(state);
    wave::level_check(state);
}

/// Steer the player. Ignored unless the player is alive and the run is on.
fn apply_controls(state: &mut GameState, input: &TickInput) {
    if state.is_game_over() || !state.player().is_alive() {
        return;
    }

    let GameState { crafts, events, .. } = &mut *state;
    let player = &mut crafts[CraftId::Player.index()];
    if input.rotate_left {
        player.rotate_left();
    }
    if input.rotate_right {
        player.rotate_right();
    }
    if input.thrust {
        player.impulse(SHIP_IMPULSE, events);
    }
    if input.shield {
        player.activate_shield(events);
    }

    if input.fire && state.player_shot_cooldown == 0 {
        let vel = state.player().shot_velocity();
        state.fire(CraftId::Player, vel);
        state.player_shot_cooldown = PLAYER_SHOT_TICKS;
    }
}

/// Player wraps. A hostile wraps vertically while over the play area and is
/// parked once it leaves it sideways.
fn force_inside_limits(state: &mut GameState) {
    let (width, height) = (state.width, state.height);
    let GameState { crafts, events, .. } = &mut *state;

    for craft in crafts.iter_mut().filter(|c| c.is_alive()) {
        if is_inside(craft.pos, width, height) {
            continue;
        }
        if !craft.id.is_hostile() {
            craft.pos = wrap_position(craft.pos, width, height);
        } else if (0.0..=width).contains(&craft.pos.x) {
            craft.pos = wrap_position(craft.pos, width, height);
        } else {
            craft.set_visible(false, events);
            craft.park();
            log::debug!("{:?} left the play area", craft.id);
        }
    }

    for fragment in state.fragments.iter_mut() {
        fragment.pos = wrap_position(fragment.pos, width, height);
    }
}

fn advance_splash(state: &mut GameState) {
    state.splash_ticks += 1;
    if state.splash_ticks >= SPLASH_TICKS {
        state.splash_ticks = 0;
        state.splash = state.splash.next();
    }
}
