//! Rendering module
//!
//! The host supplies a [`Canvas`]; everything here turns simulation state into
//! fire-and-forget draw calls on it. Nothing is read back.

pub mod shapes;

use glam::Vec2;

use crate::Color;
use crate::assets::HelpText;
use crate::consts::BEST_SCORES;
use crate::highscores::Leaderboard;
use crate::sim::{Craft, CraftId, GameState, SplashScreen};

/// Line spacing for multi-line splash text
pub const LINE_HEIGHT: f32 = 24.0;
/// HUD baseline
const HUD_Y: f32 = 16.0;
/// First line of the help and leaderboard screens
const SPLASH_TOP: f32 = 128.0;

/// Host drawing surface in screen coordinates
pub trait Canvas {
    fn clear(&mut self, color: Color);
    /// Connected segments through `points`, back to the first when `closed`
    fn polyline(&mut self, points: &[Vec2], closed: bool, color: Color);
    fn point(&mut self, pos: Vec2, color: Color);
    /// Text horizontally centered on `pos`
    fn text(&mut self, pos: Vec2, text: &str, color: Color);
}

/// Canvas that draws nothing, for headless runs
#[derive(Debug, Default)]
pub struct NullCanvas;

impl Canvas for NullCanvas {
    fn clear(&mut self, _color: Color) {}
    fn polyline(&mut self, _points: &[Vec2], _closed: bool, _color: Color) {}
    fn point(&mut self, _pos: Vec2, _color: Color) {}
    fn text(&mut self, _pos: Vec2, _text: &str, _color: Color) {}
}

/// Draw a complete frame: world, HUD and (when over) the splash screen
pub fn draw_frame(
    canvas: &mut dyn Canvas,
    state: &GameState,
    help: &HelpText,
    leaderboard: &Leaderboard,
) {
    canvas.clear(Color::BLACK);
    draw_world(canvas, state);
    draw_hud(canvas, state);
    if state.is_game_over() {
        draw_splash(canvas, state, help, leaderboard);
    }
}

fn draw_world(canvas: &mut dyn Canvas, state: &GameState) {
    for fragment in state.fragments.iter().filter(|f| f.alive) {
        canvas.polyline(&shapes::fragment_outline(fragment), true, Color::WHITE);
    }

    for projectile in state.projectiles.iter().filter(|p| p.armed) {
        canvas.point(projectile.pos, Color::WHITE);
    }

    for craft in &state.crafts {
        if let Some(explosion) = craft.explosion() {
            let color = Color::WHITE.scaled(explosion.brightness());
            for p in explosion.points() {
                canvas.point(p, color);
            }
        } else if craft.visible && craft.is_alive() {
            draw_craft(canvas, craft, state.time_ticks);
        }
    }
}

fn draw_craft(canvas: &mut dyn Canvas, craft: &Craft, time_ticks: u64) {
    for outline in shapes::craft_outline(craft) {
        canvas.polyline(&outline, false, Color::WHITE);
    }

    if craft.id != CraftId::Player {
        return;
    }
    if craft.impulse_ticks > 0 {
        let flame = shapes::placed(shapes::engine_flame(craft.size), craft.heading, craft.pos);
        canvas.polyline(&flame, false, Color::WHITE);
    }
    if craft.shield_active {
        let color = if craft.shield_blinking() {
            Color::WHITE.scaled((time_ticks % 5) as f32 / 4.0)
        } else {
            Color::WHITE
        };
        canvas.polyline(&shapes::shield(craft), true, color);
    }
}

/// Lives, level and score along the top edge
pub fn draw_hud(canvas: &mut dyn Canvas, state: &GameState) {
    let w = state.width;
    canvas.text(
        Vec2::new(96.0, HUD_Y),
        &format!("Ships: {}", state.lives),
        Color::WHITE,
    );
    canvas.text(
        Vec2::new(w / 2.0, HUD_Y),
        &format!("Level: {}", state.level),
        Color::WHITE,
    );
    canvas.text(
        Vec2::new(w - 96.0, HUD_Y),
        &format!("Score: {}", state.score),
        Color::WHITE,
    );
}

fn draw_lines(canvas: &mut dyn Canvas, x: f32, top: f32, lines: &[String]) {
    for (i, line) in lines.iter().enumerate() {
        canvas.text(Vec2::new(x, top + i as f32 * 1.25 * LINE_HEIGHT), line, Color::WHITE);
    }
}

/// Leaderboard screen text
pub fn leaderboard_lines(leaderboard: &Leaderboard) -> Vec<String> {
    let mut lines = vec!["Best Scores:".to_string(), " ".to_string(), " ".to_string()];
    lines.extend(
        leaderboard
            .entries()
            .iter()
            .take(BEST_SCORES)
            .map(|e| format!("{}   {}", e.name, e.score)),
    );
    lines
}

fn draw_splash(
    canvas: &mut dyn Canvas,
    state: &GameState,
    help: &HelpText,
    leaderboard: &Leaderboard,
) {
    let center = state.center();
    match state.splash {
        SplashScreen::Title => canvas.text(center, "Game Over", Color::WHITE),
        SplashScreen::Help => draw_lines(canvas, center.x, SPLASH_TOP, &help.lines),
        SplashScreen::Leaderboard => {
            draw_lines(canvas, center.x, SPLASH_TOP, &leaderboard_lines(leaderboard))
        }
    }
}
