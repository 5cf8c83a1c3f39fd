//! Frame pacing
//!
//! The simulation advances in whole frames. `FrameClock` converts the
//! variable timestamps of `requestAnimationFrame` into a number of fixed
//! steps; `FramePacer` tells a native loop how long to sleep before the next
//! frame is due.

use crate::consts::MAX_SUBSTEPS;

/// Largest wall-clock delta accepted per animation frame, in seconds
const MAX_FRAME_DELTA: f64 = 0.1;

/// Fixed-step accumulator
#[derive(Debug, Clone)]
pub struct FrameClock {
    step: f64,
    accumulator: f64,
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new(target_fps: u32) -> Self {
        Self {
            step: 1.0 / f64::from(target_fps.max(1)),
            accumulator: 0.0,
            last_ms: None,
        }
    }

    /// Feed an animation-frame timestamp (milliseconds) and get the number of
    /// simulation frames to run. The first call always yields one frame.
    pub fn advance(&mut self, now_ms: f64) -> u32 {
        let dt = match self.last_ms.replace(now_ms) {
            Some(last) => ((now_ms - last) / 1000.0).clamp(0.0, MAX_FRAME_DELTA),
            None => self.step,
        };
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= self.step && substeps < MAX_SUBSTEPS {
            self.accumulator -= self.step;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS {
            // Drop the backlog instead of carrying it into the next frame
            self.accumulator = self.accumulator.min(self.step);
        }
        substeps
    }
}

/// Sleep-until-deadline pacer for native loops
#[derive(Debug, Clone)]
pub struct FramePacer {
    interval_ms: f64,
    next_ms: Option<f64>,
}

impl FramePacer {
    pub fn new(target_fps: u32) -> Self {
        Self {
            interval_ms: 1000.0 / f64::from(target_fps.max(1)),
            next_ms: None,
        }
    }

    /// Milliseconds to wait from `now_ms` until the next frame is due. The
    /// following deadline is scheduled one interval after the wake-up time.
    pub fn delay(&mut self, now_ms: f64) -> f64 {
        let wait = self.next_ms.map_or(0.0, |next| (next - now_ms).max(0.0));
        self.next_ms = Some(now_ms + wait + self.interval_ms);
        wait
    }

    /// Block the current thread until the next frame is due
    #[cfg(not(target_arch = "wasm32"))]
    pub fn wait(&mut self, origin: std::time::Instant) {
        let now_ms = origin.elapsed().as_secs_f64() * 1000.0;
        let wait = self.delay(now_ms);
        if wait > 0.0 {
            std::thread::sleep(std::time::Duration::from_secs_f64(wait / 1000.0));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_runs_one_step() {
        let mut clock = FrameClock::new(60);
        assert_eq!(clock.advance(1234.0), 1);
    }

    #[test]
    fn test_steady_60hz() {
        let mut clock = FrameClock::new(60);
        clock.advance(0.0);
        let mut total = 0;
        for i in 1..=60 {
            total += clock.advance(i as f64 * 1000.0 / 60.0);
        }
        assert!((59..=61).contains(&total), "ran {total} frames");
    }

    #[test]
    fn test_long_stall_is_capped() {
        let mut clock = FrameClock::new(60);
        clock.advance(0.0);
        assert_eq!(clock.advance(5000.0), MAX_SUBSTEPS);
        // Backlog does not carry over
        assert!(clock.advance(5000.0) <= 1);
    }

    #[test]
    fn test_time_going_backwards() {
        let mut clock = FrameClock::new(60);
        clock.advance(1000.0);
        assert_eq!(clock.advance(900.0), 0);
    }

    #[test]
    fn test_pacer_schedules_from_wakeup() {
        let mut pacer = FramePacer::new(50);
        assert_eq!(pacer.delay(0.0), 0.0);
        assert_eq!(pacer.delay(5.0), 15.0);
        // Woke at 20, next due at 40
        assert_eq!(pacer.delay(30.0), 10.0);
        // Running late never yields a negative wait
        assert_eq!(pacer.delay(100.0), 0.0);
        assert_eq!(pacer.delay(110.0), 10.0);
    }
}
