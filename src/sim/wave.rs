//! Waves, bonus lives and player respawn

use super::fragment::Fragment;
use super::geometry::distance;
use super::state::{CraftId, GameEvent, GameState};
use crate::audio::{Sound, SoundCommand};
use crate::consts::*;

/// Re-rolls allowed to place a fragment away from the spawn point
const PLACEMENT_ATTEMPTS: usize = 16;

/// Replace the field with `count` large fragments, none of them on the spawn point
pub fn build_fragments(state: &mut GameState, count: u32) {
    state.fragments.clear();
    let center = state.center();
    for _ in 0..count {
        let id = state.ids.next();
        let mut fragment = Fragment::spawn_large(id, &mut state.rng, state.width, state.height);
        for _ in 0..PLACEMENT_ATTEMPTS {
            if distance(fragment.pos, center) > SAFETY_DISTANCE + fragment.radius {
                break;
            }
            fragment = Fragment::spawn_large(id, &mut state.rng, state.width, state.height);
        }
        state.fragments.push(fragment);
    }
}

/// True when no live fragment is within the safety distance of `pos`
pub fn is_safe_position(state: &GameState, pos: glam::Vec2) -> bool {
    state
        .fragments
        .iter()
        .filter(|f| f.alive)
        .all(|f| distance(f.pos, pos) > SAFETY_DISTANCE)
}

/// Start the next level: clear shots, bump the level, build a bigger field
pub fn next_level(state: &mut GameState) {
    state.projectiles.clear();
    state.level += 1;
    let count = state.level * FRAGMENTS_PER_LEVEL;
    build_fragments(state, count);
    log::info!("Level {} ({} fragments)", state.level, state.fragments.len());
    state.emit(GameEvent::LevelStarted(state.level));
}

/// Advance to the next level once every fragment is gone. Returns true if it did.
pub fn level_check(state: &mut GameState) -> bool {
    if state.fragments_alive() > 0 {
        return false;
    }
    state.fragments.clear();
    next_level(state);
    true
}

/// Award an extra life when the score reaches the next bonus threshold.
///
/// At most one life per call: a score that jumps past several thresholds
/// catches up one threshold per tick.
pub fn bonus_check(state: &mut GameState) -> bool {
    if state.score < BONUS_POINTS * state.bonus_count {
        return false;
    }
    state.lives += 1;
    state.bonus_count += 1;
    state.sound(SoundCommand::once(Sound::Bonus));
    log::debug!("Bonus life ({} lives)", state.lives);
    state.emit(GameEvent::BonusLife { lives: state.lives });
    true
}

/// Bring the player back at the center once its wreck has cleared and the
/// spawn point is safe
pub fn respawn_check(state: &mut GameState) -> bool {
    let player = state.player();
    if state.is_game_over() || player.is_alive() || player.is_exploding() {
        return false;
    }
    let center = state.center();
    if !is_safe_position(state, center) {
        return false;
    }

    let GameState { crafts, events, .. } = &mut *state;
    let player = &mut crafts[CraftId::Player.index()];
    player.reset(events);
    player.place(center, PLAYER_START_HEADING);
    player.visible = true;
    log::debug!("Player respawned");
    state.emit(GameEvent::PlayerRespawned);
    true
}
