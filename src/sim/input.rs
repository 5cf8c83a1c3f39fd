//! Keyboard input latch
//!
//! Key-down/key-up events set and clear flags; the simulation reads them once
//! per frame.

/// Game keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Fire,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value to a game key
    pub fn from_dom_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(Key::Up),
            "ArrowDown" => Some(Key::Down),
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            " " | "Spacebar" => Some(Key::Fire),
            _ => None,
        }
    }
}

/// Held-key state for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputLatch {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Pending fire request, consumed by the simulation
    pub fire: bool,
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: Key, pressed: bool) {
        match key {
            Key::Up => self.up = pressed,
            Key::Down => self.down = pressed,
            Key::Left => self.left = pressed,
            Key::Right => self.right = pressed,
            Key::Fire => self.fire = pressed,
        }
    }

    pub fn press(&mut self, key: Key) {
        self.set(key, true);
    }

    pub fn release(&mut self, key: Key) {
        self.set(key, false);
    }

    /// Apply a keyboard event. Fire latches on the first key-down only and
    /// stays pending until the simulation consumes it, so a tap shorter than
    /// one frame still fires.
    pub fn key_event(&mut self, key: Key, pressed: bool, repeat: bool) {
        match key {
            Key::Fire if pressed && !repeat => self.fire = true,
            Key::Fire => {}
            _ => self.set(key, pressed),
        }
    }

    /// Consume a pending fire request
    pub fn take_fire(&mut self) -> bool {
        std::mem::take(&mut self.fire)
    }
}
