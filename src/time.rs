//! Frame clock.
//!
//! Produces the elapsed-milliseconds value that time-scaled particles and
//! the enemy sweep consume each frame, and keeps an FPS estimate for the
//! status line.
//!
//! # Example
//!
//! ```ignore
//! use danmaku::time::Clock;
//!
//! let mut clock = Clock::new();
//!
//! // In your game loop:
//! let frame_ms = clock.tick();
//! session.step(&input, frame_ms);
//!
//! println!("Frame: {}", clock.frame());
//! println!("FPS: {:.1}", clock.fps());
//! ```
//!
//! A headless run uses a fixed delta so results do not depend on how fast
//! the host machine is:
//!
//! ```ignore
//! let mut clock = Clock::fixed(33.0);
//! ```

use std::time::{Duration, Instant};

/// Nominal frame duration at the game's 30 FPS target.
pub const NOMINAL_FRAME_MS: f32 = 33.0;

/// Frame timing: delta milliseconds, frame count and FPS.
#[derive(Debug)]
pub struct Clock {
    /// When the last frame occurred.
    last_frame: Instant,
    /// Milliseconds reported by the last `tick`.
    delta_ms: f32,
    /// Total frames since start.
    frame_count: u64,
    /// FPS estimate, refreshed every `fps_update_interval`.
    fps: f32,
    fps_frame_count: u64,
    fps_update_time: Instant,
    fps_update_interval: Duration,
    /// Reported instead of the measured delta when set.
    fixed_delta_ms: Option<f32>,
}

impl Clock {
    /// Clock measuring wall time from now.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last_frame: now,
            delta_ms: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_millis(500),
            fixed_delta_ms: None,
        }
    }

    /// Clock that always reports `delta_ms`.
    pub fn fixed(delta_ms: f32) -> Self {
        let mut clock = Self::new();
        clock.set_fixed_delta(Some(delta_ms));
        clock
    }

    /// Start a new frame and return its elapsed milliseconds.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let measured = now.duration_since(self.last_frame).as_secs_f32() * 1000.0;
        self.last_frame = now;
        self.delta_ms = self.fixed_delta_ms.unwrap_or(measured);
        self.frame_count += 1;

        let fps_elapsed = now.duration_since(self.fps_update_time);
        if fps_elapsed >= self.fps_update_interval {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
        }

        self.delta_ms
    }

    /// Milliseconds reported by the last [`tick`](Self::tick).
    #[inline]
    pub fn delta_ms(&self) -> f32 {
        self.delta_ms
    }

    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Wall-clock frames per second, 0 until the first refresh.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Report a fixed delta instead of measured time. Negative values
    /// clamp to 0.
    pub fn set_fixed_delta(&mut self, delta_ms: Option<f32>) {
        self.fixed_delta_ms = delta_ms.map(|d| d.max(0.0));
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_clock_new() {
        let clock = Clock::new();
        assert_eq!(clock.frame(), 0);
        assert_eq!(clock.delta_ms(), 0.0);
    }

    #[test]
    fn test_tick_measures_wall_time() {
        let mut clock = Clock::new();
        thread::sleep(Duration::from_millis(10));
        let delta = clock.tick();
        assert!(delta >= 10.0);
        assert_eq!(clock.frame(), 1);
    }

    #[test]
    fn test_fixed_delta() {
        let mut clock = Clock::fixed(NOMINAL_FRAME_MS);
        thread::sleep(Duration::from_millis(20));
        assert_eq!(clock.tick(), NOMINAL_FRAME_MS);
        assert_eq!(clock.tick(), NOMINAL_FRAME_MS);
        assert_eq!(clock.frame(), 2);

        clock.set_fixed_delta(Some(-5.0));
        assert_eq!(clock.tick(), 0.0);
    }
}
