//! Shape generation for 2D primitives
//!
//! Outlines are described as triangle strips in model space (centred on the
//! origin, pointing along +x) and expanded to triangle lists for the pipeline.

use glam::Vec2;

use super::vertex::{Vertex, colors};
use crate::consts::BULLET_HALF_SIZE;
use crate::rotate_degrees;
use crate::sim::{Asteroid, Bullet, Ship};

/// Length of the thrust flame behind the ship
const THRUST_LENGTH: f32 = 50.0;
/// Thickness of line primitives
const LINE_WIDTH: f32 = 2.0;
/// Nose tip distance as a multiple of the ship's half size
const NOSE_SCALE: f32 = 1.5;

/// Expand a triangle strip into a triangle list, keeping winding consistent
pub fn strip_to_list(strip: &[Vec2]) -> Vec<Vec2> {
    let mut list = Vec::with_capacity(strip.len().saturating_sub(2) * 3);
    for (i, tri) in strip.windows(3).enumerate() {
        if i % 2 == 0 {
            list.extend_from_slice(&[tri[0], tri[1], tri[2]]);
        } else {
            list.extend_from_slice(&[tri[1], tri[0], tri[2]]);
        }
    }
    list
}

/// Rotate (degrees) then translate model-space points into coloured vertices
fn place(points: &[Vec2], origin: Vec2, angle: f32, color: [f32; 4]) -> Vec<Vertex> {
    points
        .iter()
        .map(|&p| {
            let world = origin + rotate_degrees(p, angle);
            Vertex::new(world.x, world.y, color)
        })
        .collect()
}

/// Axis-aligned square strip with the given half size
fn square_strip(half: f32) -> [Vec2; 4] {
    [
        Vec2::new(-half, -half),
        Vec2::new(half, -half),
        Vec2::new(-half, half),
        Vec2::new(half, half),
    ]
}

/// Filled square centred on `center`
pub fn square(center: Vec2, half: f32, angle: f32, color: [f32; 4]) -> Vec<Vertex> {
    place(&strip_to_list(&square_strip(half)), center, angle, color)
}

/// Line segment rendered as a thin quad
pub fn line(from: Vec2, to: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = (to - from).normalize_or_zero();
    let perp = dir.perp() * (width / 2.0);
    let strip = [from - perp, from + perp, to - perp, to + perp];
    place(&strip_to_list(&strip), Vec2::ZERO, 0.0, color)
}

/// Ship body and nose, plus the thrust flame when thrusting
pub fn ship(ship: &Ship, thrusting: bool) -> Vec<Vertex> {
    let half = ship.radius;
    let mut vertices = Vec::with_capacity(12);

    if thrusting {
        let tail = ship.pos + rotate_degrees(Vec2::new(-THRUST_LENGTH, 0.0), ship.angle);
        vertices.extend(line(ship.pos, tail, LINE_WIDTH, colors::THRUST));
    }

    vertices.extend(square(ship.pos, half, ship.angle, colors::SHIP));

    let nose = [
        Vec2::new(half, half),
        Vec2::new(half, -half),
        Vec2::new(half * NOSE_SCALE, 0.0),
    ];
    vertices.extend(place(&nose, ship.pos, ship.angle, colors::SHIP));
    vertices
}

pub fn bullet(bullet: &Bullet) -> Vec<Vertex> {
    square(bullet.pos, BULLET_HALF_SIZE, 0.0, colors::BULLET)
}

pub fn asteroid(asteroid: &Asteroid) -> Vec<Vertex> {
    square(asteroid.pos, asteroid.half_extent(), 0.0, colors::ASTEROID)
}
