//! Collision detection and response
//!
//! Three passes per tick, always in the same order:
//! 1. craft vs fragment (ramming: fragment vanishes without splitting)
//! 2. projectile vs craft (owner excluded)
//! 3. projectile vs fragment (fragment splits)
//!
//! Anything destroyed in an earlier pass is skipped by later ones; dead
//! fragments and spent or stray projectiles are dropped from their collections
//! at the end. Losing the last life ends the run only after all three passes,
//! so the game over carries every point scored this tick.

use super::fragment::Fragment;
use super::state::{CraftId, GameEvent, GameState};
use crate::audio::SoundCommand;

/// What a collision pass did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionReport {
    pub crafts_destroyed: Vec<CraftId>,
    pub fragments_destroyed: usize,
    pub projectiles_spent: usize,
}

/// Run all three passes and compact the collections
pub fn resolve(state: &mut GameState) -> CollisionReport {
    let mut report = CollisionReport::default();
    craft_vs_fragments(state, &mut report);
    projectiles_vs_crafts(state, &mut report);
    projectiles_vs_fragments(state, &mut report);

    let (width, height) = (state.width, state.height);
    state.fragments.retain(|f| f.alive);
    state.projectiles.retain(|p| p.armed && p.in_bounds(width, height));

    if state.lives == 0 {
        state.game_over();
    }
    report
}

/// Wreck a craft, charging the player a life
fn destroy_craft(state: &mut GameState, id: CraftId, report: &mut CollisionReport) {
    let GameState {
        crafts, rng, events, ..
    } = &mut *state;
    crafts[id.index()].explode(rng, events);
    report.crafts_destroyed.push(id);

    if id == CraftId::Player {
        state.lives = state.lives.saturating_sub(1);
    }
}

fn craft_vs_fragments(state: &mut GameState, report: &mut CollisionReport) {
    for fi in 0..state.fragments.len() {
        if !state.fragments[fi].alive {
            continue;
        }
        let hit = CraftId::ALL.into_iter().find(|id| {
            let craft = state.craft(*id);
            craft.is_alive() && !craft.shield_active && craft.touches(&state.fragments[fi])
        });
        let Some(id) = hit else {
            continue;
        };

        state.fragments[fi].alive = false;
        report.fragments_destroyed += 1;
        destroy_craft(state, id, report);
    }
}

fn projectiles_vs_crafts(state: &mut GameState, report: &mut CollisionReport) {
    for pi in 0..state.projectiles.len() {
        let projectile = &state.projectiles[pi];
        if !projectile.armed {
            continue;
        }
        let (owner, pos) = (projectile.owner(), projectile.pos);
        let hit = CraftId::ALL.into_iter().find(|id| {
            let craft = state.craft(*id);
            *id != owner && craft.is_alive() && !craft.shield_active && craft.is_hit_by(pos)
        });
        let Some(id) = hit else {
            continue;
        };

        state.projectiles[pi].armed = false;
        report.projectiles_spent += 1;
        destroy_craft(state, id, report);
        if id.is_hostile() {
            state.add_score(id.kill_score());
        }
    }
}

fn projectiles_vs_fragments(state: &mut GameState, report: &mut CollisionReport) {
    let mut children: Vec<Fragment> = Vec::new();

    for pi in 0..state.projectiles.len() {
        if !state.projectiles[pi].armed {
            continue;
        }
        let pos = state.projectiles[pi].pos;
        let Some(fi) = state
            .fragments
            .iter()
            .position(|f| f.alive && f.contains(pos))
        else {
            continue;
        };

        state.projectiles[pi].armed = false;
        report.projectiles_spent += 1;

        let fragment = &mut state.fragments[fi];
        fragment.alive = false;
        let (class, frag_pos) = (fragment.class, fragment.pos);
        children.extend(fragment.split(&mut state.rng, &mut state.ids));
        report.fragments_destroyed += 1;

        state.add_score(class.score());
        state.sound(SoundCommand::once(class.impact_sound()));
        state.emit(GameEvent::FragmentDestroyed {
            class,
            pos: frag_pos,
        });
    }

    state.fragments.extend(children);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::fragment::FragmentClass;
    use glam::Vec2;

    /// A state with no fragments and only the player on screen
    fn empty_state() -> GameState {
        let mut state = GameState::new(11);
        state.fragments.clear();
        state.events.clear();
        state
    }

    fn add_fragment(state: &mut GameState, class: FragmentClass, pos: Vec2, radius: f32) -> u32 {
        let id = state.ids.next();
        let fragment = Fragment::new(id, class, pos, Vec2::ZERO, radius, &mut state.rng);
        state.fragments.push(fragment);
        id
    }

    #[test]
    fn test_craft_fragment_threshold() {
        let mut state = empty_state();
        let center = state.center();
        add_fragment(&mut state, FragmentClass::Large, center + Vec2::new(39.0, 0.0), 30.0);
        let report = resolve(&mut state);
        assert!(report.crafts_destroyed.is_empty());
        assert_eq!(state.fragments.len(), 1);

        state.fragments[0].pos = center + Vec2::new(38.0, 0.0);
        let report = resolve(&mut state);
        assert_eq!(report.crafts_destroyed, vec![CraftId::Player]);
        // Ramming does not split
        assert!(state.fragments.is_empty());
        assert_eq!(state.lives, MAX_LIVES - 1);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_shield_protects_from_fragment() {
        let mut state = empty_state();
        let center = state.center();
        add_fragment(&mut state, FragmentClass::Large, center, 30.0);
        let GameState { crafts, events, .. } = &mut state;
        assert!(crafts[CraftId::Player.index()].activate_shield(events));

        let report = resolve(&mut state);
        assert!(report.crafts_destroyed.is_empty());
        assert_eq!(state.fragments.len(), 1);
        assert!(state.player().is_alive());
    }

    #[test]
    fn test_own_shot_ignored() {
        let mut state = empty_state();
        state.fire(CraftId::Player, Vec2::new(0.0, -100.0));
        let report = resolve(&mut state);
        assert!(report.crafts_destroyed.is_empty());
        assert_eq!(state.projectiles.len(), 1);
    }

    #[test]
    fn test_hostile_shot_kills_player() {
        let mut state = empty_state();
        let center = state.center();
        let GameState { crafts, events, .. } = &mut state;
        crafts[CraftId::BigHostile.index()].activate_at(
            center + Vec2::new(10.0, 0.0),
            Vec2::ZERO,
            events,
        );
        state.fire(CraftId::BigHostile, Vec2::new(-100.0, 0.0));

        let report = resolve(&mut state);
        // The shot spawns on the hostile, which also overlaps the player
        assert_eq!(report.crafts_destroyed, vec![CraftId::Player]);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.lives, MAX_LIVES - 1);
        assert!(state.craft(CraftId::BigHostile).is_alive());
    }

    #[test]
    fn test_player_shot_scores_hostile() {
        let mut state = empty_state();
        let GameState { crafts, events, .. } = &mut state;
        crafts[CraftId::SmallHostile.index()].activate_at(
            Vec2::new(100.0, 100.0),
            Vec2::ZERO,
            events,
        );
        state.fire(CraftId::Player, Vec2::ZERO);
        state.projectiles[0].pos = Vec2::new(105.0, 100.0);

        let report = resolve(&mut state);
        assert_eq!(report.crafts_destroyed, vec![CraftId::SmallHostile]);
        assert_eq!(state.score, SMALL_HOSTILE_SCORE);
        assert!(state.craft(CraftId::SmallHostile).is_exploding());
    }

    #[test]
    fn test_score_chain_large_medium_small() {
        let mut state = empty_state();
        let target = Vec2::new(100.0, 100.0);

        for class in [FragmentClass::Large, FragmentClass::Medium, FragmentClass::Small] {
            state.fragments.clear();
            let radius = class.radius_range().1;
            add_fragment(&mut state, class, target, radius);
            state.fire(CraftId::Player, Vec2::ZERO);
            if let Some(p) = state.projectiles.last_mut() {
                p.pos = target;
            }
            resolve(&mut state);
        }

        assert_eq!(
            state.score,
            LARGE_FRAGMENT_SCORE + MEDIUM_FRAGMENT_SCORE + SMALL_FRAGMENT_SCORE
        );
    }

    #[test]
    fn test_split_children_added() {
        let mut state = empty_state();
        let target = Vec2::new(100.0, 100.0);
        add_fragment(&mut state, FragmentClass::Large, target, 31.0);
        state.fire(CraftId::Player, Vec2::ZERO);
        state.projectiles[0].pos = target;

        let report = resolve(&mut state);
        assert_eq!(report.fragments_destroyed, 1);
        assert_eq!(report.projectiles_spent, 1);
        assert_eq!(state.fragments.len(), 2);
        assert!(state.fragments.iter().all(|f| f.class == FragmentClass::Medium));
        assert!(state.projectiles.is_empty());
        assert!(state.events.iter().any(|e| matches!(
            e,
            GameEvent::FragmentDestroyed {
                class: FragmentClass::Large,
                ..
            }
        )));
    }

    #[test]
    fn test_one_projectile_one_fragment() {
        let mut state = empty_state();
        let target = Vec2::new(100.0, 100.0);
        add_fragment(&mut state, FragmentClass::Small, target, 12.0);
        add_fragment(&mut state, FragmentClass::Small, target, 12.0);
        state.fire(CraftId::Player, Vec2::ZERO);
        state.projectiles[0].pos = target;

        let report = resolve(&mut state);
        assert_eq!(report.fragments_destroyed, 1);
        assert_eq!(state.fragments.len(), 1);
    }

    #[test]
    fn test_rammed_fragment_not_shot_again() {
        let mut state = empty_state();
        let center = state.center();
        add_fragment(&mut state, FragmentClass::Large, center, 30.0);
        // Hostile shot sitting right on the fragment and the player
        let GameState { crafts, events, .. } = &mut state;
        let hostile = &mut crafts[CraftId::BigHostile.index()];
        hostile.activate_at(Vec2::new(50.0, 50.0), Vec2::ZERO, events);
        state.fire(CraftId::BigHostile, Vec2::ZERO);
        state.projectiles[0].pos = center;

        let report = resolve(&mut state);
        assert_eq!(report.fragments_destroyed, 1);
        assert_eq!(report.crafts_destroyed, vec![CraftId::Player]);
        assert_eq!(report.projectiles_spent, 0);
        // No split, the shot finds nothing left to hit
        assert!(state.fragments.is_empty());
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_three_hits_one_game_over() {
        let mut state = empty_state();
        for _ in 0..MAX_LIVES {
            let center = state.center();
            let GameState { crafts, events, .. } = &mut state;
            let player = &mut crafts[CraftId::Player.index()];
            player.reset(events);
            player.place(center, PLAYER_START_HEADING);
            // Two fragments on top of the player in the same tick
            add_fragment(&mut state, FragmentClass::Large, center, 30.0);
            add_fragment(&mut state, FragmentClass::Large, center, 30.0);
            resolve(&mut state);
        }
        assert_eq!(state.lives, 0);
        assert!(state.is_game_over());
        let overs = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(overs, 1);
    }

    #[test]
    fn test_shield_blocks_projectile() {
        let mut state = empty_state();
        let center = state.center();
        let GameState { crafts, events, .. } = &mut state;
        assert!(crafts[CraftId::Player.index()].activate_shield(events));
        let hostile = &mut crafts[CraftId::BigHostile.index()];
        hostile.activate_at(Vec2::new(50.0, 50.0), Vec2::ZERO, events);
        state.fire(CraftId::BigHostile, Vec2::ZERO);
        state.projectiles[0].pos = center;

        let report = resolve(&mut state);
        assert!(report.crafts_destroyed.is_empty());
        assert_eq!(report.projectiles_spent, 0);
        assert_eq!(state.lives, MAX_LIVES);
        assert!(state.player().is_alive());
        assert_eq!(state.projectiles.len(), 1);
        assert!(state.projectiles[0].armed);
    }

    #[test]
    fn test_last_life_game_over_counts_same_tick_score() {
        let mut state = empty_state();
        state.lives = 1;
        let center = state.center();
        add_fragment(&mut state, FragmentClass::Large, center, 30.0);
        let target = Vec2::new(100.0, 100.0);
        add_fragment(&mut state, FragmentClass::Small, target, 12.0);
        state.fire(CraftId::Player, Vec2::ZERO);
        state.projectiles[0].pos = target;

        resolve(&mut state);
        assert!(state.is_game_over());
        assert_eq!(state.lives, 0);
        assert_eq!(state.score, SMALL_FRAGMENT_SCORE);
        let over = state.events.iter().find_map(|e| match e {
            GameEvent::GameOver { score, .. } => Some(*score),
            _ => None,
        });
        assert_eq!(over, Some(SMALL_FRAGMENT_SCORE));
    }
}
