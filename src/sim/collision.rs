//! Axis-aligned bounding box overlap tests
//!
//! Every object is treated as a square centred on its position; `half` is the
//! half-extent of that square. Touching edges do not count as overlap.

use glam::Vec2;

use super::state::{Asteroid, Bullet, Ship};

/// Strict overlap of two centred boxes
#[inline]
pub fn aabb_overlap(a: Vec2, a_half: f32, b: Vec2, b_half: f32) -> bool {
    let reach = a_half + b_half;
    (a.x - b.x).abs() < reach && (a.y - b.y).abs() < reach
}

/// Bullet (a point) inside an asteroid's box
pub fn bullet_hits_asteroid(bullet: &Bullet, asteroid: &Asteroid) -> bool {
    bullet.alive
        && asteroid.alive
        && aabb_overlap(bullet.pos, 0.0, asteroid.pos, asteroid.half_extent())
}

/// Ship box overlapping an asteroid's box
pub fn ship_hits_asteroid(ship: &Ship, asteroid: &Asteroid) -> bool {
    ship.alive
        && asteroid.alive
        && aabb_overlap(ship.pos, ship.radius, asteroid.pos, asteroid.half_extent())
}
