//! Space Game - a tiny asteroids-style arcade game and a bitmap-font demo
//!
//! Core modules:
//! - `sim`: Per-frame simulation (ship physics, collisions, spawning, game phase)
//! - `font`: Bitmap glyph sheet slicing and text layout
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser glue (canvas, fetch, keyboard, animation frames)
//! - `frame`: Fixed-rate frame pacing
//! - `settings`: Configuration

pub mod font;
pub mod frame;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{FontSettings, Settings};

use glam::Vec2;

/// Game configuration constants
///
/// Velocities and accelerations are per simulation frame, not per second.
pub mod consts {
    /// Game playfield (orthographic, origin bottom-left, y up)
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Font demo playfield
    pub const FONT_DEMO_WIDTH: f32 = 320.0;
    pub const FONT_DEMO_HEIGHT: f32 = 240.0;

    /// Default frame rate
    pub const TARGET_FPS: u32 = 60;
    /// Maximum substeps per animation frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Ship kinematics
    pub const FORCE_FACTOR: f32 = 0.02;
    pub const SHIP_MASS: f32 = 1.0;
    pub const SHIP_RADIUS: f32 = 20.0;
    pub const MAX_SHIP_SPEED: f32 = 3.0;
    pub const MAX_MAIN_THROTTLE: f32 = 5.0;
    pub const MAIN_THROTTLE_STEP: f32 = 0.5;
    pub const MAIN_THROTTLE_DECAY: f32 = 0.2;
    pub const MAX_ROTATION_THROTTLE: f32 = 3.0;
    pub const ROTATION_THROTTLE_STEP: f32 = 0.05;
    pub const ROTATION_THROTTLE_DECAY: f32 = 0.1;

    /// Bullet defaults
    pub const BULLET_SPEED: f32 = 10.0;
    pub const BULLET_HALF_SIZE: f32 = 2.0;

    /// Distance from the edge where bouncing objects reflect
    pub const BOUNCE_MARGIN: f32 = 20.0;

    /// Asteroid velocity components are drawn from [0, ASTEROID_MAX_SPEED)
    pub const ASTEROID_MAX_SPEED: f32 = 3.0;

    /// Printable ASCII range covered by the glyph sheet
    pub const FIRST_GLYPH: u8 = 32;
    pub const LAST_GLYPH: u8 = 126;
    pub const GLYPH_COUNT: usize = (LAST_GLYPH - FIRST_GLYPH + 1) as usize;

    /// On-screen glyph quad size
    pub const GLYPH_WIDTH: f32 = 12.0;
    pub const GLYPH_HEIGHT: f32 = 16.0;
}

/// Unit vector for a heading given in degrees (0 = +x, counter-clockwise)
#[inline]
pub fn heading_vector(degrees: f32) -> Vec2 {
    let rad = degrees.to_radians();
    Vec2::new(rad.cos(), rad.sin())
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    angle.rem_euclid(360.0)
}

/// Rotate a point by an angle in degrees around the origin
#[inline]
pub fn rotate_degrees(point: Vec2, degrees: f32) -> Vec2 {
    Vec2::from_angle(degrees.to_radians()).rotate(point)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_vector() {
        let v = heading_vector(90.0);
        assert!(v.x.abs() < 1e-6);
        assert!((v.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_degrees() {
        assert!((normalize_degrees(370.0) - 10.0).abs() < 1e-4);
        assert!((normalize_degrees(-10.0) - 350.0).abs() < 1e-4);
    }

    #[test]
    fn test_rotate_degrees() {
        let p = rotate_degrees(Vec2::new(1.0, 0.0), 180.0);
        assert!((p.x + 1.0).abs() < 1e-5);
        assert!(p.y.abs() < 1e-5);
    }

    #[test]
    fn test_glyph_count() {
        assert_eq!(consts::GLYPH_COUNT, 95);
    }
}
