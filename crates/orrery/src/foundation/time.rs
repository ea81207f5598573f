//! Time management utilities

use std::time::Instant;

/// Monotonic simulation clock driving orbital animation.
///
/// Elapsed time only grows while the clock is running; pausing freezes every
/// orbit in place without losing the accumulated time.
#[derive(Debug, Clone)]
pub struct SimulationClock {
    last_tick: Instant,
    delta: f32,
    elapsed: f32,
    frame_count: u64,
    time_scale: f32,
    paused: bool,
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationClock {
    /// Create a new running clock at time zero
    pub fn new() -> Self {
        Self {
            last_tick: Instant::now(),
            delta: 0.0,
            elapsed: 0.0,
            frame_count: 0,
            time_scale: 1.0,
            paused: false,
        }
    }

    /// Advance by the wall-clock time since the previous tick (once per frame)
    pub fn tick(&mut self) {
        let now = Instant::now();
        let wall = now.duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;
        self.advance(wall);
    }

    /// Advance by an explicit delta in seconds
    pub fn advance(&mut self, dt: f32) {
        self.frame_count += 1;
        self.delta = if self.paused { 0.0 } else { dt.max(0.0) * self.time_scale };
        self.elapsed += self.delta;
    }

    /// Simulation time advanced by the last tick
    pub fn delta(&self) -> f32 {
        self.delta
    }

    /// Total simulation time in seconds
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Number of ticks so far, paused ones included
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Multiplier applied to every delta
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Set the delta multiplier; negative values are clamped to zero
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    /// Freeze simulation time
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume simulation time
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Flip between paused and running, returning the new paused state
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        log::debug!("Simulation clock {}", if self.paused { "paused" } else { "resumed" });
        self.paused
    }

    /// Whether simulation time is frozen
    pub fn is_paused(&self) -> bool {
        self.paused
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_advance_accumulates_elapsed() {
        let mut clock = SimulationClock::new();
        clock.advance(0.5);
        clock.advance(0.25);
        assert_relative_eq!(clock.elapsed(), 0.75);
        assert_relative_eq!(clock.delta(), 0.25);
        assert_eq!(clock.frame_count(), 2);
    }

    #[test]
    fn test_paused_clock_does_not_advance() {
        let mut clock = SimulationClock::new();
        clock.advance(1.0);
        assert!(clock.toggle_pause());
        clock.advance(3.0);
        assert_relative_eq!(clock.elapsed(), 1.0);
        assert_relative_eq!(clock.delta(), 0.0);

        clock.resume();
        clock.advance(1.0);
        assert_relative_eq!(clock.elapsed(), 2.0);
    }

    #[test]
    fn test_time_scale_multiplies_delta() {
        let mut clock = SimulationClock::new();
        clock.set_time_scale(2.0);
        clock.advance(0.5);
        assert_relative_eq!(clock.elapsed(), 1.0);

        clock.set_time_scale(-4.0);
        assert_relative_eq!(clock.time_scale(), 0.0);
    }

    #[test]
    fn test_negative_delta_is_ignored() {
        let mut clock = SimulationClock::new();
        clock.advance(-1.0);
        assert_relative_eq!(clock.elapsed(), 0.0);
    }
}
