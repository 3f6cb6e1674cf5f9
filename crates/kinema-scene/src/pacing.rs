//! Frame pacing strategies used by the [`Director`](crate::Director) loop.

use std::time::Instant;

use kinema_core::{Duration, ManualClock};

/// Called once at the end of every frame.
pub trait Pacer {
    fn pace(&mut self);
}

/// Does not wait at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPacing;

impl Pacer for NoPacing {
    fn pace(&mut self) {}
}

/// Sleeps so that frames are presented at most `fps` times per second.
#[derive(Debug, Clone)]
pub struct FixedRatePacer {
    frame: std::time::Duration,
    last: Option<Instant>,
}

impl FixedRatePacer {
    pub fn new(fps: u32) -> Self {
        Self {
            frame: std::time::Duration::from_secs_f64(1.0 / fps.max(1) as f64),
            last: None,
        }
    }

    pub fn frame_time(&self) -> std::time::Duration {
        self.frame
    }
}

impl Pacer for FixedRatePacer {
    fn pace(&mut self) {
        if let Some(last) = self.last {
            let spent = last.elapsed();
            if spent < self.frame {
                std::thread::sleep(self.frame - spent);
            }
        }
        self.last = Some(Instant::now());
    }
}

/// Advances a [`ManualClock`] by one frame period per frame instead of
/// sleeping, for deterministic headless playback.
#[derive(Debug, Clone)]
pub struct SimulatedPacer {
    clock: ManualClock,
    step: Duration,
}

impl SimulatedPacer {
    pub fn new(clock: ManualClock, fps: u32) -> Self {
        Self {
            clock,
            step: Duration::from_seconds(1.0 / fps.max(1) as f64),
        }
    }

    /// Advance by an explicit step instead of a frame rate.
    pub fn with_step(clock: ManualClock, step: Duration) -> Self {
        Self { clock, step }
    }

    pub fn step(&self) -> Duration {
        self.step
    }
}

impl Pacer for SimulatedPacer {
    fn pace(&mut self) {
        self.clock.advance(self.step);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinema_core::Clock;

    #[test]
    fn test_simulated_pacer_advances_clock() {
        let clock = ManualClock::new();
        let mut pacer = SimulatedPacer::new(clock.clone(), 4);
        pacer.pace();
        pacer.pace();
        assert!((clock.now().as_seconds() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_fixed_rate_frame_time() {
        let pacer = FixedRatePacer::new(50);
        assert!((pacer.frame_time().as_secs_f64() - 0.02).abs() < 1e-9);
    }

    #[test]
    fn test_fixed_rate_sleeps_between_frames() {
        let mut pacer = FixedRatePacer::new(100);
        let start = Instant::now();
        pacer.pace();
        pacer.pace();
        assert!(start.elapsed() >= std::time::Duration::from_millis(9));
    }
}
