//! Planar geometry helpers
//!
//! Angles handed to these helpers are in degrees and follow screen space
//! (y grows downward), so a heading of 0° points down and 180° points up.

use glam::Vec2;
use rand::Rng;

/// Rotate a point around the origin by `deg` degrees
#[inline]
pub fn rotate_deg(p: Vec2, deg: f32) -> Vec2 {
    let (sin, cos) = deg.to_radians().sin_cos();
    Vec2::new(p.x * cos + p.y * sin, -p.x * sin + p.y * cos)
}

/// Rotate every point of a polyline in place
pub fn rotate_points(points: &mut [Vec2], deg: f32) {
    for p in points.iter_mut() {
        *p = rotate_deg(*p, deg);
    }
}

/// Translate every point of a polyline in place
pub fn translate_points(points: &mut [Vec2], offset: Vec2) {
    for p in points.iter_mut() {
        *p += offset;
    }
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Unit vector pointing along a craft heading
#[inline]
pub fn heading_vector(deg: f32) -> Vec2 {
    rotate_deg(Vec2::Y, deg)
}

/// Uniform value in `[-|v|, |v|]`
#[inline]
pub fn rand_signed<R: Rng + ?Sized>(rng: &mut R, v: f32) -> f32 {
    v * rng.random_range(-1.0..=1.0)
}

/// Uniform value in `[0, |v|]`
#[inline]
pub fn rand_abs<R: Rng + ?Sized>(rng: &mut R, v: f32) -> f32 {
    v.abs() * rng.random_range(0.0..=1.0)
}

/// Either `1.0` or `-1.0`
#[inline]
pub fn rand_sign<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    if rng.random_bool(0.5) { 1.0 } else { -1.0 }
}

/// Irregular closed polygon around the origin: `verts` points evenly spread on a
/// circle of `radius`, each pushed forward by up to half a radian.
pub fn random_polygon<R: Rng + ?Sized>(rng: &mut R, radius: f32, verts: usize) -> Vec<Vec2> {
    let step = std::f32::consts::TAU / verts as f32;
    (0..verts)
        .map(|i| {
            let angle = i as f32 * step + 0.5 * rng.random::<f32>();
            Vec2::new(angle.cos(), angle.sin()) * radius
        })
        .collect()
}

/// True if `pos` lies inside the `width` x `height` rectangle (edges included)
#[inline]
pub fn is_inside(pos: Vec2, width: f32, height: f32) -> bool {
    pos.x >= 0.0 && pos.x <= width && pos.y >= 0.0 && pos.y <= height
}

/// Wrap a position to the opposite edge when it leaves the play area
pub fn wrap_position(mut pos: Vec2, width: f32, height: f32) -> Vec2 {
    if pos.x < 0.0 {
        pos.x = width;
    } else if pos.x > width {
        pos.x = 0.0;
    }
    if pos.y < 0.0 {
        pos.y = height;
    } else if pos.y > height {
        pos.y = 0.0;
    }
    pos
}
