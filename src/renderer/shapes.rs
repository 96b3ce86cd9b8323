//! Polyline generation for craft and fragments
//!
//! Shapes are built around the origin, then rotated and translated into place.

use glam::Vec2;
use std::f32::consts::TAU;

use crate::sim::geometry::{rotate_points, translate_points};
use crate::sim::{Craft, CraftId, Fragment};

/// Segments used for the shield circle
pub const SHIELD_SEGMENTS: usize = 64;

fn scaled(points: &[(f32, f32)], sx: f32, sy: f32) -> Vec<Vec2> {
    points.iter().map(|&(x, y)| Vec2::new(x * sx, y * sy)).collect()
}

/// Player arrowhead (open polyline that closes on itself)
pub fn player_hull(size: f32) -> Vec<Vec2> {
    scaled(
        &[(0.5, -0.5), (0.0, 0.5), (-0.5, -0.5), (0.0, -0.25), (0.5, -0.5)],
        size,
        size,
    )
}

/// Engine flame behind the player
pub fn engine_flame(size: f32) -> Vec<Vec2> {
    scaled(
        &[(-0.25, -0.25), (-0.1, -0.3), (0.0, -0.75), (0.1, -0.3), (0.25, -0.25)],
        size,
        size,
    )
}

/// Saucer outline, including the center line
pub fn hostile_hull(size: f32) -> Vec<Vec2> {
    scaled(
        &[
            (0.5, 0.0),
            (0.25, 0.25),
            (-0.25, 0.25),
            (-0.5, 0.0),
            (-0.25, -0.25),
            (0.25, -0.25),
            (0.5, 0.0),
            (-0.5, 0.0),
        ],
        size,
        -size,
    )
}

/// Saucer dome
pub fn hostile_windshield(size: f32) -> Vec<Vec2> {
    scaled(
        &[(0.2, 0.25), (0.15, 0.4), (-0.15, 0.4), (-0.2, 0.25)],
        size,
        -size,
    )
}

/// Closed circle as `segments` points
pub fn circle(center: Vec2, radius: f32, segments: usize) -> Vec<Vec2> {
    (0..segments)
        .map(|i| {
            let theta = i as f32 / segments as f32 * TAU;
            center + Vec2::new(theta.cos(), theta.sin()) * radius
        })
        .collect()
}

/// Shield bubble around a craft
pub fn shield(craft: &Craft) -> Vec<Vec2> {
    circle(craft.pos, 1.25 * craft.size, SHIELD_SEGMENTS)
}

/// A shape rotated by `deg` and moved to `pos`
pub fn placed(mut shape: Vec<Vec2>, deg: f32, pos: Vec2) -> Vec<Vec2> {
    rotate_points(&mut shape, deg);
    translate_points(&mut shape, pos);
    shape
}

/// Hull polylines for a craft, in screen space. Hostiles never rotate.
pub fn craft_outline(craft: &Craft) -> Vec<Vec<Vec2>> {
    match craft.id {
        CraftId::Player => vec![placed(player_hull(craft.size), craft.heading, craft.pos)],
        CraftId::SmallHostile | CraftId::BigHostile => vec![
            placed(hostile_hull(craft.size), 0.0, craft.pos),
            placed(hostile_windshield(craft.size), 0.0, craft.pos),
        ],
    }
}

/// Fragment silhouette in screen space
pub fn fragment_outline(fragment: &Fragment) -> Vec<Vec2> {
    placed(fragment.shape.clone(), fragment.rotation, fragment.pos)
}
