//! Frame timing for the driver loop.
//!
//! [`FrameClock`] measures wall-clock time between frames and keeps a
//! rolling frames-per-second figure. The delta it returns is what the
//! simulation step consumes, so it is always non-negative.

use std::time::{Duration, Instant};

/// Per-frame delta time and FPS tracking.
#[derive(Debug)]
pub struct FrameClock {
    last_frame: Instant,
    delta_secs: f32,
    frame_count: u64,
    fps: f32,
    fps_frame_count: u64,
    fps_update_time: Instant,
    fps_update_interval: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last_frame: now,
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_secs(1),
        }
    }

    /// Mark the start of a new frame and return seconds since the last one.
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// [`tick`](Self::tick) with an explicit timestamp.
    ///
    /// A timestamp earlier than the previous frame yields a zero delta.
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        self.delta_secs = now.saturating_duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.frame_count += 1;

        let fps_elapsed = now.saturating_duration_since(self.fps_update_time);
        if fps_elapsed >= self.fps_update_interval {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
        }

        self.delta_secs
    }

    /// Seconds between the two most recent ticks.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Frames per second, refreshed once per second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// True on the tick that refreshed [`fps`](Self::fps).
    #[inline]
    pub fn fps_updated(&self) -> bool {
        self.fps_frame_count == self.frame_count && self.frame_count > 0
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_measures_elapsed() {
        let mut clock = FrameClock::new();
        let start = clock.last_frame;

        let dt = clock.tick_at(start + Duration::from_millis(250));

        assert!((dt - 0.25).abs() < 1e-6);
        assert_eq!(clock.delta(), dt);
        assert_eq!(clock.frame(), 1);
    }

    #[test]
    fn test_backwards_clock_gives_zero_delta() {
        let mut clock = FrameClock::new();
        let start = clock.last_frame;
        clock.tick_at(start + Duration::from_millis(100));

        let dt = clock.tick_at(start);

        assert_eq!(dt, 0.0);
    }

    #[test]
    fn test_fps_refreshes_each_second() {
        let mut clock = FrameClock::new();
        let start = clock.last_frame;

        for i in 1..=30 {
            clock.tick_at(start + Duration::from_millis(i * 20));
        }
        assert_eq!(clock.fps(), 0.0);
        assert!(!clock.fps_updated());

        for i in 31..=50 {
            clock.tick_at(start + Duration::from_millis(i * 20));
        }
        // 50 frames over exactly 1 second
        assert!(clock.fps_updated());
        assert!((clock.fps() - 50.0).abs() < 1e-3);
    }
}
