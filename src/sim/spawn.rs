//! Asteroid spawning and difficulty escalation

use glam::Vec2;
use rand::Rng;

use super::bounds::Playfield;
use super::state::{Asteroid, GameEvent, GameState, SizeClass};
use crate::consts::ASTEROID_MAX_SPEED;

/// One step of the difficulty table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DifficultyTier {
    /// Score at which this tier starts
    pub min_score: u32,
    /// Asteroids kept on the field while in this tier
    pub target_asteroids: usize,
}

/// Score thresholds, ascending
pub const DIFFICULTY_TABLE: [DifficultyTier; 4] = [
    DifficultyTier { min_score: 0, target_asteroids: 1 },
    DifficultyTier { min_score: 3, target_asteroids: 2 },
    DifficultyTier { min_score: 6, target_asteroids: 4 },
    DifficultyTier { min_score: 10, target_asteroids: 6 },
];

/// Index into `DIFFICULTY_TABLE` for a score
fn tier_index(score: u32) -> usize {
    DIFFICULTY_TABLE
        .iter()
        .rposition(|tier| score >= tier.min_score)
        .unwrap_or(0)
}

pub fn target_asteroid_count(score: u32) -> usize {
    DIFFICULTY_TABLE[tier_index(score)].target_asteroids
}

/// 1-based level shown on the HUD
pub fn level_for_score(score: u32) -> u32 {
    tier_index(score) as u32 + 1
}

/// Roll a new asteroid anywhere on the field
pub fn random_asteroid<R: Rng>(rng: &mut R, field: &Playfield) -> Asteroid {
    let pos = Vec2::new(
        rng.random_range(0.0..field.width),
        rng.random_range(0.0..field.height),
    );
    let vel = Vec2::new(
        rng.random_range(0.0..ASTEROID_MAX_SPEED),
        rng.random_range(0.0..ASTEROID_MAX_SPEED),
    );
    let size = SizeClass::ALL[rng.random_range(0..SizeClass::ALL.len())];
    Asteroid::new(pos, vel, size)
}

/// Bring the asteroid collection up to the score-derived target and update
/// the level. Entries awaiting removal count toward the target.
pub fn spawn_to_target(state: &mut GameState) -> Vec<GameEvent> {
    let mut events = Vec::new();

    let level = level_for_score(state.score);
    if level > state.level {
        log::info!("Level up: {} (score {})", level, state.score);
        events.push(GameEvent::LevelUp { level });
    }
    state.level = level;

    let target = target_asteroid_count(state.score);
    while state.asteroids.len() < target {
        let asteroid = random_asteroid(&mut state.rng, &state.field);
        log::trace!(
            "Spawned {:?} asteroid at ({:.0}, {:.0})",
            asteroid.size,
            asteroid.pos.x,
            asteroid.pos.y
        );
        state.asteroids.push(asteroid);
        events.push(GameEvent::AsteroidSpawned);
    }

    events
}
