//! Lockstep advancement of concurrently running animations.

use std::rc::Rc;

use kinema_core::{Clock, SystemClock};

use crate::animation::Animation;

/// Owns the in-flight animations and advances them once per tick.
///
/// Every animation in a tick sees the same clock reading. Animations are
/// advanced in insertion order, so when two of them write the same channel
/// of the same object the one added last wins for that tick. This is not
/// resolved or merged.
pub struct TimeManager {
    active: Vec<Animation>,
    finished: Vec<Animation>,
    clock: Rc<dyn Clock>,
}

impl TimeManager {
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        Self {
            active: Vec::new(),
            finished: Vec::new(),
            clock,
        }
    }

    pub fn clock(&self) -> &Rc<dyn Clock> {
        &self.clock
    }

    /// Append to the active set. Adding the same animation twice is not
    /// detected; each copy runs independently.
    pub fn add_animation(&mut self, animation: Animation) {
        self.active.push(animation);
    }

    /// Start every active animation now instead of lazily on the next tick.
    pub fn start_all(&mut self) {
        let now = self.clock.now();
        for animation in &mut self.active {
            animation.start(now);
        }
    }

    /// Advance every active animation exactly once.
    ///
    /// Unstarted animations are started first. Animations that finish in
    /// this tick move to the finished set; the rest keep their relative
    /// order. Returns how many finished.
    pub fn update(&mut self) -> usize {
        let now = self.clock.now();
        let mut still_active = Vec::with_capacity(self.active.len());
        let mut finished_now = 0;

        for mut animation in std::mem::take(&mut self.active) {
            if !animation.is_started() {
                animation.start(now);
            }
            if animation.update(now) {
                self.finished.push(animation);
                finished_now += 1;
            } else {
                still_active.push(animation);
            }
        }

        self.active = still_active;
        if finished_now > 0 {
            tracing::debug!(
                "tick at {}: {} finished, {} still active",
                now,
                finished_now,
                self.active.len()
            );
        }
        finished_now
    }

    pub fn is_all_finished(&self) -> bool {
        self.active.is_empty()
    }

    /// Drop both sets. Animations are discarded as they are, not reset.
    pub fn clear(&mut self) {
        self.active.clear();
        self.finished.clear();
    }

    pub fn active(&self) -> &[Animation] {
        &self.active
    }

    pub fn finished(&self) -> &[Animation] {
        &self.finished
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn finished_count(&self) -> usize {
        self.finished.len()
    }
}

impl Default for TimeManager {
    fn default() -> Self {
        Self::new(Rc::new(SystemClock::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{move_to, rotate_to, scale_to, AnimationState};
    use crate::object::{shared, Drawable, Triangle};
    use kinema_core::{Easing, ManualClock, Vec3};

    fn manager() -> (TimeManager, ManualClock) {
        let clock = ManualClock::new();
        (TimeManager::new(Rc::new(clock.clone())), clock)
    }

    #[test]
    fn test_partition_on_finish() {
        let (mut tm, clock) = manager();
        let tri = shared(Triangle::default());
        tm.add_animation(rotate_to(&tri, 1.0, 0.5, Easing::Linear));
        tm.add_animation(move_to(&tri, (4.0, 0.0), 2.0, Easing::Linear));
        tm.add_animation(scale_to(&tri, 2.0, 0.5, Easing::Linear));
        tm.add_animation(move_to(&tri, (4.0, 0.0), 3.0, Easing::Linear));

        assert_eq!(tm.update(), 0);
        assert_eq!(tm.active_count(), 4);

        clock.advance_seconds(1.0);
        assert_eq!(tm.update(), 2);
        assert_eq!(tm.active_count(), 2);
        assert_eq!(tm.finished_count(), 2);
        assert!(!tm.is_all_finished());

        // Relative order of survivors is preserved.
        let durations: Vec<f64> = tm.active().iter().map(|a| a.duration().as_seconds()).collect();
        assert_eq!(durations, vec![2.0, 3.0]);
    }

    #[test]
    fn test_each_animation_advanced_once_per_tick() {
        let (mut tm, clock) = manager();
        let a = shared(Triangle::default());
        let b = shared(Triangle::default());
        tm.add_animation(move_to(&a, (10.0, 0.0), 10.0, Easing::Linear));
        tm.add_animation(move_to(&b, (10.0, 0.0), 1.0, Easing::Linear));

        tm.update();
        clock.advance_seconds(1.0);
        tm.update();

        // One tick at t=1: `a` is 1/10 of the way, `b` is done.
        assert!(a.borrow().transform().position.max_abs_diff(&Vec3::new(1.0, 0.0, 0.0)) < 1e-5);
        assert_eq!(b.borrow().transform().position, Vec3::new(10.0, 0.0, 0.0));
        assert_eq!(tm.finished()[0].state(), AnimationState::Finished);
        assert_eq!(tm.active()[0].state(), AnimationState::Started);
    }

    #[test]
    fn test_lazy_start_uses_tick_time() {
        let (mut tm, clock) = manager();
        let tri = shared(Triangle::default());
        clock.advance_seconds(5.0);
        tm.add_animation(rotate_to(&tri, 2.0, 1.0, Easing::Linear));

        tm.update();
        assert_eq!(tm.active()[0].start_time().unwrap().as_seconds(), 5.0);
        assert_eq!(tri.borrow().transform().rotation, 0.0);
    }

    #[test]
    fn test_start_all() {
        let (mut tm, clock) = manager();
        let tri = shared(Triangle::default());
        tm.add_animation(rotate_to(&tri, 2.0, 2.0, Easing::Linear));
        tm.start_all();

        clock.advance_seconds(1.0);
        tm.update();
        assert!((tri.borrow().transform().rotation - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_last_write_wins_in_insertion_order() {
        let (mut tm, _clock) = manager();
        let tri = shared(Triangle::default());
        tm.add_animation(move_to(&tri, (1.0, 0.0), 0.0, Easing::Linear));
        tm.add_animation(move_to(&tri, (-1.0, 0.0), 0.0, Easing::Linear));
        tm.update();
        assert_eq!(tri.borrow().transform().position, Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_clear_discards_without_reset() {
        let (mut tm, clock) = manager();
        let tri = shared(Triangle::default());
        tm.add_animation(rotate_to(&tri, 1.0, 0.1, Easing::Linear));
        tm.add_animation(rotate_to(&tri, 1.0, 5.0, Easing::Linear));
        tm.update();
        clock.advance_seconds(1.0);
        tm.update();
        assert_eq!(tm.finished_count(), 1);

        tm.clear();
        assert!(tm.is_all_finished());
        assert_eq!(tm.finished_count(), 0);
        assert_eq!(tm.active_count(), 0);
    }

    #[test]
    fn test_empty_manager_is_finished() {
        let (mut tm, _clock) = manager();
        assert!(tm.is_all_finished());
        assert_eq!(tm.update(), 0);
    }
}
