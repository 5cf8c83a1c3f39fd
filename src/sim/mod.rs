//! Per-frame simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform dependencies:
//! - One call to `tick` per frame
//! - Seeded RNG only
//! - Per-frame rates (no wall-clock time)

pub mod bounds;
pub mod collision;
pub mod input;
pub mod spawn;
pub mod state;
pub mod tick;

pub use bounds::{BoundaryPolicy, Playfield};
pub use collision::{aabb_overlap, bullet_hits_asteroid, ship_hits_asteroid};
pub use input::{InputLatch, Key};
pub use spawn::{DIFFICULTY_TABLE, DifficultyTier, level_for_score, target_asteroid_count};
pub use state::{Asteroid, Bullet, GameEvent, GamePhase, GameState, Ship, SizeClass};
pub use tick::tick;
