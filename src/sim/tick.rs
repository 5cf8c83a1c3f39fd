//! Fixed timestep simulation tick
//!
//! Advances the session by exactly one frame. All rates are per frame.

use super::collision::{bullet_hits_asteroid, ship_hits_asteroid};
use super::input::InputLatch;
use super::spawn::spawn_to_target;
use super::state::{GameEvent, GamePhase, GameState, Ship};
use crate::consts::*;
use crate::normalize_degrees;

/// Advance the game state by one frame.
///
/// A pending fire request in `input` is consumed.
pub fn tick(state: &mut GameState, input: &mut InputLatch) -> Vec<GameEvent> {
    let mut events = Vec::new();
    state.frame += 1;

    match state.phase() {
        GamePhase::Playing => play_frame(state, input, &mut events),
        GamePhase::GameOver | GamePhase::Title => {
            if input.take_fire() {
                state.reset();
                state.set_phase(GamePhase::Playing);
                log::info!("Restarted");
                events.push(GameEvent::Restarted);
            }
        }
    }

    events
}

fn play_frame(state: &mut GameState, input: &mut InputLatch, events: &mut Vec<GameEvent>) {
    steer(&mut state.ship, input);

    if input.take_fire() && state.bullet.fire_from(&state.ship) {
        log::trace!("Bullet fired at {:.1} deg", state.ship.angle);
        events.push(GameEvent::BulletFired);
    }

    // Move everything
    if state.bullet.alive {
        state.bullet.pos += state.bullet.vel;
    }
    for asteroid in state.asteroids.iter_mut().filter(|a| a.alive) {
        asteroid.pos += asteroid.vel;
    }

    // Bullets are not wrapped or bounced
    if !state.field.contains(state.bullet.pos) {
        state.bullet.alive = false;
    }

    let (field, policy) = (state.field, state.boundary);
    field.apply(policy, &mut state.ship.pos, &mut state.ship.vel);
    for asteroid in state.asteroids.iter_mut().filter(|a| a.alive) {
        field.apply(policy, &mut asteroid.pos, &mut asteroid.vel);
    }

    // Bullet vs asteroids
    for asteroid in state.asteroids.iter_mut() {
        if bullet_hits_asteroid(&state.bullet, asteroid) {
            state.bullet.alive = false;
            asteroid.alive = false;
            state.score += 1;
            log::debug!("score! ({})", state.score);
            events.push(GameEvent::AsteroidDestroyed { score: state.score });
        }
    }

    // Ship vs asteroids
    if state
        .asteroids
        .iter()
        .any(|asteroid| ship_hits_asteroid(&state.ship, asteroid))
    {
        state.ship.alive = false;
        state.set_phase(GamePhase::GameOver);
        log::info!("Game over (score {}, level {})", state.score, state.level);
        events.push(GameEvent::ShipDestroyed);
    }

    // Only the first dead asteroid is retired each frame
    if let Some(idx) = state.asteroids.iter().position(|a| !a.alive) {
        state.asteroids.swap_remove(idx);
        events.extend(spawn_to_target(state));
    }
}

/// Apply thrust and rotation input to the ship and integrate its motion
fn steer(ship: &mut Ship, input: &InputLatch) {
    let mut force = glam::Vec2::ZERO;

    if input.up {
        log::trace!("Up");
        if ship.throttle < MAX_MAIN_THROTTLE {
            ship.throttle += MAIN_THROTTLE_STEP;
        }
        force += ship.heading() * ship.throttle;
    } else {
        ship.throttle = (ship.throttle - MAIN_THROTTLE_DECAY).max(0.0);
    }

    if input.left || input.right {
        if ship.rotation_throttle < MAX_ROTATION_THROTTLE {
            ship.rotation_throttle += ROTATION_THROTTLE_STEP;
        }
        let turn = if input.left {
            ship.rotation_throttle
        } else {
            -ship.rotation_throttle
        };
        ship.angle = normalize_degrees(ship.angle + turn);
    } else {
        ship.rotation_throttle = (ship.rotation_throttle - ROTATION_THROTTLE_DECAY).max(0.0);
    }

    ship.vel += force * FORCE_FACTOR / ship.mass;
    ship.vel = ship.vel.clamp(
        glam::Vec2::splat(-MAX_SHIP_SPEED),
        glam::Vec2::splat(MAX_SHIP_SPEED),
    );
    ship.pos += ship.vel;
}
