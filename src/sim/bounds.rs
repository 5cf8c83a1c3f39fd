//! Playfield boundaries
//!
//! Objects leaving the playfield either wrap to the opposite edge or bounce
//! off an inset margin, depending on the configured policy.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{BOUNCE_MARGIN, SCREEN_HEIGHT, SCREEN_WIDTH};

/// What happens when an object crosses the playfield edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryPolicy {
    /// Teleport to the opposite edge
    #[default]
    Wrap,
    /// Reflect velocity and mirror the position back inside the margin
    Bounce,
}

/// Fixed rectangular playfield with its origin at the bottom-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Default for Playfield {
    fn default() -> Self {
        Self::new(SCREEN_WIDTH, SCREEN_HEIGHT)
    }
}

impl Playfield {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Inclusive containment test
    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x >= 0.0 && pos.x <= self.width && pos.y >= 0.0 && pos.y <= self.height
    }

    /// Apply the boundary policy to a moving object
    pub fn apply(&self, policy: BoundaryPolicy, pos: &mut Vec2, vel: &mut Vec2) {
        match policy {
            BoundaryPolicy::Wrap => self.wrap(pos),
            BoundaryPolicy::Bounce => self.bounce(pos, vel, BOUNCE_MARGIN),
        }
    }

    pub fn wrap(&self, pos: &mut Vec2) {
        pos.x = wrap_axis(pos.x, self.width);
        pos.y = wrap_axis(pos.y, self.height);
    }

    pub fn bounce(&self, pos: &mut Vec2, vel: &mut Vec2, margin: f32) {
        bounce_axis(&mut pos.x, &mut vel.x, margin, self.width - margin);
        bounce_axis(&mut pos.y, &mut vel.y, margin, self.height - margin);
    }
}

fn wrap_axis(value: f32, extent: f32) -> f32 {
    if value > extent {
        value - extent
    } else if value < 0.0 {
        value + extent
    } else {
        value
    }
}

fn bounce_axis(pos: &mut f32, vel: &mut f32, low: f32, high: f32) {
    if *pos > high {
        *pos += 2.0 * (high - *pos);
        *vel = -*vel;
    }
    if *pos < low {
        *pos += 2.0 * (low - *pos);
        *vel = -*vel;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_right_edge() {
        let field = Playfield::default();
        let mut pos = Vec2::new(803.0, 300.0);
        field.wrap(&mut pos);
        assert!((pos.x - 3.0).abs() < 1e-4);
        assert!((pos.y - 300.0).abs() < 1e-4);
    }

    #[test]
    fn test_wrap_bottom_edge() {
        let field = Playfield::default();
        let mut pos = Vec2::new(100.0, -2.0);
        field.wrap(&mut pos);
        assert!((pos.y - 598.0).abs() < 1e-4);
    }

    #[test]
    fn test_bounce_reflects_position_and_velocity() {
        let field = Playfield::default();
        let mut pos = Vec2::new(782.0, 300.0);
        let mut vel = Vec2::new(2.5, 1.0);
        field.bounce(&mut pos, &mut vel, BOUNCE_MARGIN);
        // Mirrored about x = 780
        assert!((pos.x - 778.0).abs() < 1e-4);
        assert!((vel.x + 2.5).abs() < 1e-6);
        assert!((vel.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_bounce_lower_margin() {
        let field = Playfield::default();
        let mut pos = Vec2::new(400.0, 18.0);
        let mut vel = Vec2::new(0.0, -2.0);
        field.apply(BoundaryPolicy::Bounce, &mut pos, &mut vel);
        assert!((pos.y - 22.0).abs() < 1e-4);
        assert!((vel.y - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_inside_is_untouched() {
        let field = Playfield::default();
        for policy in [BoundaryPolicy::Wrap, BoundaryPolicy::Bounce] {
            let mut pos = Vec2::new(400.0, 300.0);
            let mut vel = Vec2::new(1.0, -1.0);
            field.apply(policy, &mut pos, &mut vel);
            assert_eq!(pos, Vec2::new(400.0, 300.0));
            assert_eq!(vel, Vec2::new(1.0, -1.0));
        }
    }

    #[test]
    fn test_contains() {
        let field = Playfield::new(320.0, 240.0);
        assert!(field.contains(Vec2::new(0.0, 240.0)));
        assert!(!field.contains(Vec2::new(-0.1, 10.0)));
        assert!(!field.contains(Vec2::new(10.0, 240.5)));
    }
}
