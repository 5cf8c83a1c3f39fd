//! Game state and core simulation types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::bounds::{BoundaryPolicy, Playfield};
use crate::consts::*;
use crate::heading_vector;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Attract screen (never entered by the simulation itself)
    Title,
    /// Active gameplay
    Playing,
    /// Ship destroyed, waiting for fire to restart
    GameOver,
}

/// Discrete asteroid sizes; the radius doubles as the box half-extent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeClass {
    Tiny,
    Small,
    Medium,
    Large,
    Huge,
}

impl SizeClass {
    pub const ALL: [SizeClass; 5] = [
        SizeClass::Tiny,
        SizeClass::Small,
        SizeClass::Medium,
        SizeClass::Large,
        SizeClass::Huge,
    ];

    pub fn radius(self) -> f32 {
        match self {
            SizeClass::Tiny => 10.0,
            SizeClass::Small => 14.0,
            SizeClass::Medium => 18.0,
            SizeClass::Large => 22.0,
            SizeClass::Huge => 26.0,
        }
    }
}

/// The player's ship
#[derive(Debug, Clone, PartialEq)]
pub struct Ship {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Heading in degrees (0 = +x, counter-clockwise)
    pub angle: f32,
    /// Forward thrust accumulator
    pub throttle: f32,
    /// Turn rate accumulator (degrees per frame)
    pub rotation_throttle: f32,
    pub mass: f32,
    /// Half-extent of the collision box
    pub radius: f32,
    pub alive: bool,
}

impl Ship {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            angle: 0.0,
            throttle: 0.0,
            rotation_throttle: 0.0,
            mass: SHIP_MASS,
            radius: SHIP_RADIUS,
            alive: true,
        }
    }

    /// Unit vector along the current heading
    pub fn heading(&self) -> Vec2 {
        heading_vector(self.angle)
    }
}

/// The single reusable bullet slot
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub alive: bool,
}

impl Bullet {
    /// Launch from the ship along its heading. Returns false if the slot is busy.
    pub fn fire_from(&mut self, ship: &Ship) -> bool {
        if self.alive {
            return false;
        }
        self.alive = true;
        self.pos = ship.pos;
        self.vel = ship.heading() * BULLET_SPEED;
        true
    }
}

/// An asteroid entity
#[derive(Debug, Clone, PartialEq)]
pub struct Asteroid {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: SizeClass,
    pub alive: bool,
}

impl Asteroid {
    pub fn new(pos: Vec2, vel: Vec2, size: SizeClass) -> Self {
        Self {
            pos,
            vel,
            size,
            alive: true,
        }
    }

    pub fn half_extent(&self) -> f32 {
        self.size.radius()
    }
}

/// Things that happened during a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    BulletFired,
    AsteroidDestroyed { score: u32 },
    AsteroidSpawned,
    ShipDestroyed,
    LevelUp { level: u32 },
    Restarted,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub field: Playfield,
    pub boundary: BoundaryPolicy,
    phase: GamePhase,
    pub ship: Ship,
    pub bullet: Bullet,
    /// Unordered; dead entries linger until the per-frame cleanup removes them
    pub asteroids: Vec<Asteroid>,
    pub score: u32,
    /// 1-based difficulty tier
    pub level: u32,
    /// Simulation frame counter
    pub frame: u64,
}

impl GameState {
    /// Create a new session with the given seed, ready to play
    pub fn new(seed: u64, boundary: BoundaryPolicy) -> Self {
        let field = Playfield::default();
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            field,
            boundary,
            phase: GamePhase::Playing,
            ship: Ship::new(field.center()),
            bullet: Bullet::default(),
            asteroids: Vec::new(),
            score: 0,
            level: 1,
            frame: 0,
        };
        super::spawn::spawn_to_target(&mut state);
        state
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            log::debug!("Phase {:?} -> {:?}", self.phase, phase);
        }
        self.phase = phase;
    }

    pub fn is_phase(&self, phase: GamePhase) -> bool {
        self.phase == phase
    }

    /// Reset ship, bullet, score and level and repopulate the field.
    /// The RNG keeps running so successive rounds differ.
    pub fn reset(&mut self) {
        self.ship = Ship::new(self.field.center());
        self.bullet = Bullet::default();
        self.asteroids.clear();
        self.score = 0;
        self.level = 1;
        super::spawn::spawn_to_target(self);
    }
}
