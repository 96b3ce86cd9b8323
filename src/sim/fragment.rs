//! Rock fragments and the split-on-destroy chain

use glam::Vec2;
use rand::Rng;

use super::geometry::{distance, rand_abs, rand_sign, rand_signed, random_polygon};
use super::state::EntityIds;
use crate::audio::Sound;
use crate::consts::*;

/// Size class of a fragment. Strictly shrinks along the split chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FragmentClass {
    Large,
    Medium,
    Small,
}

impl FragmentClass {
    /// Base radius before jitter
    pub fn base_size(self) -> f32 {
        match self {
            FragmentClass::Large => FRAGMENT_LARGE_SIZE,
            FragmentClass::Medium => FRAGMENT_MEDIUM_SIZE,
            FragmentClass::Small => FRAGMENT_SMALL_SIZE,
        }
    }

    /// Largest extra radius added on top of the base size
    pub fn jitter(self) -> f32 {
        match self {
            FragmentClass::Large => FRAGMENT_LARGE_SIZE / 10.0,
            FragmentClass::Medium => FRAGMENT_MEDIUM_SIZE / 4.0,
            FragmentClass::Small => FRAGMENT_SMALL_SIZE / 2.0,
        }
    }

    /// Radius range a fragment of this class can have
    pub fn radius_range(self) -> (f32, f32) {
        (self.base_size(), self.base_size() + self.jitter())
    }

    /// Points awarded for destroying one fragment of this class
    pub fn score(self) -> u64 {
        match self {
            FragmentClass::Large => LARGE_FRAGMENT_SCORE,
            FragmentClass::Medium => MEDIUM_FRAGMENT_SCORE,
            FragmentClass::Small => SMALL_FRAGMENT_SCORE,
        }
    }

    /// Impact sound played when a fragment of this class is shot
    pub fn impact_sound(self) -> Sound {
        match self {
            FragmentClass::Large => Sound::BangLarge,
            FragmentClass::Medium => Sound::BangMedium,
            FragmentClass::Small => Sound::BangSmall,
        }
    }

    /// Class of the two children produced by a split (None for small)
    pub fn child(self) -> Option<FragmentClass> {
        match self {
            FragmentClass::Large => Some(FragmentClass::Medium),
            FragmentClass::Medium => Some(FragmentClass::Small),
            FragmentClass::Small => None,
        }
    }

    fn random_radius<R: Rng + ?Sized>(self, rng: &mut R) -> f32 {
        self.base_size() + rand_abs(rng, self.jitter())
    }
}

/// A drifting rock
#[derive(Debug, Clone)]
pub struct Fragment {
    pub id: u32,
    pub class: FragmentClass,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Accumulated silhouette rotation (degrees)
    pub rotation: f32,
    /// Rotation added each tick (degrees)
    pub rotation_rate: f32,
    pub radius: f32,
    /// Silhouette around the origin, rendering only
    pub shape: Vec<Vec2>,
    pub alive: bool,
}

impl Fragment {
    pub fn new<R: Rng + ?Sized>(
        id: u32,
        class: FragmentClass,
        pos: Vec2,
        vel: Vec2,
        radius: f32,
        rng: &mut R,
    ) -> Self {
        debug_assert!(radius > 0.0, "fragment radius must be positive");
        let rotation_rate = rng.random::<f32>() * vel.length() * 0.25 * rand_sign(rng);
        Self {
            id,
            class,
            pos,
            vel,
            rotation: 0.0,
            rotation_rate,
            radius,
            shape: random_polygon(rng, radius, FRAGMENT_VERTS),
            alive: true,
        }
    }

    /// A large fragment at a random spot of the play area with a random drift
    pub fn spawn_large<R: Rng + ?Sized>(id: u32, rng: &mut R, width: f32, height: f32) -> Self {
        let pos = Vec2::new(rand_abs(rng, width), rand_abs(rng, height));
        let vel = Vec2::new(
            rand_signed(rng, FRAGMENT_VEL) + FRAGMENT_VEL / 5.0,
            rand_signed(rng, FRAGMENT_VEL) + FRAGMENT_VEL / 5.0,
        );
        let radius = FragmentClass::Large.random_radius(rng);
        Self::new(id, FragmentClass::Large, pos, vel, radius, rng)
    }

    /// Advance position and silhouette rotation
    pub fn update(&mut self, dt: f32) {
        self.pos += self.vel * dt;
        self.rotation += self.rotation_rate;
    }

    /// Circular hit test against a point
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        distance(point, self.pos) <= self.radius
    }

    /// Children produced when this fragment is shot: two of the next class down,
    /// each drifting off with its own random perturbation. Small fragments yield none.
    pub fn split<R: Rng + ?Sized>(&self, rng: &mut R, ids: &mut EntityIds) -> Vec<Fragment> {
        let Some(child) = self.class.child() else {
            return Vec::new();
        };

        (0..2)
            .map(|_| {
                let perturbation = Vec2::new(
                    rand_signed(rng, self.vel.x) / FRAGMENT_VEL_RATIO,
                    rand_signed(rng, self.vel.y) / FRAGMENT_VEL_RATIO,
                );
                let radius = child.random_radius(rng);
                debug_assert!(radius < self.radius, "split child must be smaller than its parent");
                Fragment::new(ids.next(), child, self.pos, self.vel + perturbation, radius, rng)
            })
            .collect()
    }
}
