//! Single-channel animations and the factory functions that build them.
//!
//! An [`Animation`] moves one channel of one drawable from a start value to
//! an end value over a fixed duration. Time is passed in explicitly as a
//! [`Timestamp`]; the [`TimeManager`](crate::TimeManager) reads its clock
//! once per tick and hands the same reading to every animation.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use kinema_core::{Color, Duration, Easing, KinemaError, KinemaResult, Timestamp, Value, Vec3};

use crate::channel::Channel;
use crate::object::Drawable;

/// Lifecycle of an animation. Transitions only move forward, except
/// through [`Animation::reset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationState {
    /// Constructed but not started.
    Pending,
    /// Start time and start value have been captured.
    Started,
    /// Terminal; the end value has been written.
    Finished,
}

/// Animates one channel of a drawable between two values.
pub struct Animation {
    target: Weak<RefCell<dyn Drawable>>,
    channel: Channel,
    /// Configured start value; `None` means "capture when started".
    from: Option<Value>,
    end_value: Value,
    duration: Duration,
    easing: Easing,
    state: AnimationState,
    start_time: Option<Timestamp>,
    /// Start value resolved by `start`, owned independently of the target.
    start_value: Option<Value>,
    failure: Option<KinemaError>,
}

impl std::fmt::Debug for Animation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Animation")
            .field("channel", &self.channel)
            .field("state", &self.state)
            .field("from", &self.from)
            .field("end_value", &self.end_value)
            .field("duration", &self.duration)
            .field("easing", &self.easing)
            .finish_non_exhaustive()
    }
}

impl Animation {
    /// Bind `channel` of `target` to an end value.
    ///
    /// The start value is captured from the target when the animation
    /// starts unless one is supplied with [`Animation::with_start`]. A
    /// duration of zero or less finishes on the first update.
    pub fn new<D: Drawable + 'static>(
        target: &Rc<RefCell<D>>,
        channel: Channel,
        end_value: impl Into<Value>,
        duration_secs: f64,
        easing: Easing,
    ) -> Self {
        let target: Rc<RefCell<dyn Drawable>> = target.clone();
        Self::for_shared(&target, channel, end_value, duration_secs, easing)
    }

    /// Same as [`Animation::new`] for an already type-erased handle.
    pub fn for_shared(
        target: &Rc<RefCell<dyn Drawable>>,
        channel: Channel,
        end_value: impl Into<Value>,
        duration_secs: f64,
        easing: Easing,
    ) -> Self {
        let duration = Duration::from_seconds(duration_secs);
        if duration.is_zero() {
            tracing::debug!(
                "{} animation has non-positive duration {}s; it will finish on first update",
                channel,
                duration_secs
            );
        }
        Self {
            target: Rc::downgrade(target),
            channel,
            from: None,
            end_value: channel.normalize(end_value.into()),
            duration,
            easing,
            state: AnimationState::Pending,
            start_time: None,
            start_value: None,
            failure: None,
        }
    }

    /// Use a fixed start value instead of capturing one on start.
    pub fn with_start(mut self, value: impl Into<Value>) -> Self {
        self.from = Some(self.channel.normalize(value.into()));
        self
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn end_value(&self) -> &Value {
        &self.end_value
    }

    /// The start value in effect: the resolved one once started, otherwise
    /// the configured one (if any).
    pub fn start_value(&self) -> Option<&Value> {
        self.start_value.as_ref().or(self.from.as_ref())
    }

    pub fn start_time(&self) -> Option<Timestamp> {
        self.start_time
    }

    pub fn is_started(&self) -> bool {
        self.state != AnimationState::Pending
    }

    pub fn is_finished(&self) -> bool {
        self.state == AnimationState::Finished
    }

    /// The error that made this animation fail closed, if any.
    pub fn failure(&self) -> Option<&KinemaError> {
        self.failure.as_ref()
    }

    /// Whether the target is still alive.
    pub fn has_target(&self) -> bool {
        self.target.strong_count() > 0
    }

    /// Linear progress in `[0, 1]` at `now`, before easing.
    pub fn progress(&self, now: Timestamp) -> f64 {
        match (self.state, self.start_time) {
            (AnimationState::Finished, _) => 1.0,
            (AnimationState::Started, Some(started)) => {
                if self.duration.is_zero() {
                    return 1.0;
                }
                let elapsed = now.duration_since(started).as_seconds();
                (elapsed / self.duration.as_seconds()).min(1.0)
            }
            _ => 0.0,
        }
    }

    /// Capture the start time and, if deferred, the start value.
    ///
    /// Does nothing if already started. Never writes to the target.
    pub fn start(&mut self, now: Timestamp) {
        if self.state != AnimationState::Pending {
            return;
        }
        self.start_time = Some(now);
        self.start_value = match &self.from {
            Some(value) => Some(value.clone()),
            None => self.target.upgrade().map(|target| {
                let target = target.borrow();
                self.channel.read(&*target)
            }),
        };
        self.state = AnimationState::Started;
        tracing::debug!(
            "started {} animation at {} ({} over {})",
            self.channel,
            now,
            self.easing,
            self.duration
        );
    }

    /// Advance to `now` and write the interpolated value.
    ///
    /// Returns whether the animation is finished. Not-started and finished
    /// animations are left alone. Errors make the animation fail closed:
    /// it is marked finished, the error is kept in [`Animation::failure`],
    /// and a warning is logged.
    pub fn update(&mut self, now: Timestamp) -> bool {
        match self.try_update(now) {
            Ok(finished) => finished,
            Err(err) => {
                tracing::warn!("{} animation failed: {}", self.channel, err);
                self.state = AnimationState::Finished;
                self.failure = Some(err);
                true
            }
        }
    }

    /// Like [`Animation::update`] but hands errors back to the caller
    /// without changing state.
    pub fn try_update(&mut self, now: Timestamp) -> KinemaResult<bool> {
        if self.state != AnimationState::Started {
            return Ok(self.is_finished());
        }
        let started = self.start_time.unwrap_or(now);
        let elapsed = now.duration_since(started);

        let finishing = self.duration.is_zero() || elapsed >= self.duration;
        let progress = if finishing {
            1.0
        } else {
            elapsed.as_seconds() / self.duration.as_seconds()
        };

        let Some(target) = self.target.upgrade() else {
            tracing::warn!("{} animation target was dropped; finishing", self.channel);
            self.state = AnimationState::Finished;
            return Ok(true);
        };

        let value = if finishing {
            self.end_value.clone()
        } else {
            self.interpolate(self.easing.apply(progress))?
        };

        if !self.channel.write(&mut *target.borrow_mut(), &value) {
            return Err(KinemaError::unsupported(value.kind(), self.channel.name()));
        }

        if finishing {
            self.state = AnimationState::Finished;
            tracing::debug!("finished {} animation at {}", self.channel, now);
        }
        Ok(finishing)
    }

    /// Return to `Pending`, dropping the captured start time and value.
    pub fn reset(&mut self) {
        self.state = AnimationState::Pending;
        self.start_time = None;
        self.start_value = None;
        self.failure = None;
    }

    fn interpolate(&self, eased: f64) -> KinemaResult<Value> {
        let Some(start) = self.start_value.as_ref() else {
            return Ok(self.end_value.clone());
        };
        if start.kind() != self.end_value.kind() {
            tracing::debug!(
                "cannot blend {} into {} on {}; snapping to nearest endpoint",
                start.kind(),
                self.end_value.kind(),
                self.channel
            );
        }
        start.lerp(&self.end_value, eased)
    }
}

/// Move `target` to `end`, capturing the start position when started.
/// 2D positions are placed on `z = 0`.
pub fn move_to<D: Drawable + 'static>(
    target: &Rc<RefCell<D>>,
    end: impl Into<Vec3>,
    duration_secs: f64,
    easing: Easing,
) -> Animation {
    Animation::new(target, Channel::Position, end.into(), duration_secs, easing)
}

/// Rotate `target` to an absolute angle in radians.
pub fn rotate_to<D: Drawable + 'static>(
    target: &Rc<RefCell<D>>,
    end_angle: f32,
    duration_secs: f64,
    easing: Easing,
) -> Animation {
    Animation::new(target, Channel::Rotation, end_angle, duration_secs, easing)
}

/// Scale `target` uniformly to `end_scale` on every axis.
pub fn scale_to<D: Drawable + 'static>(
    target: &Rc<RefCell<D>>,
    end_scale: f32,
    duration_secs: f64,
    easing: Easing,
) -> Animation {
    Animation::new(
        target,
        Channel::Scale,
        Vec3::splat(end_scale),
        duration_secs,
        easing,
    )
}

/// Fade `target`'s color to `end`.
///
/// Unlike the transform factories, the start color is read right here,
/// when the animation is built, not when it starts.
pub fn color_to<D: Drawable + 'static>(
    target: &Rc<RefCell<D>>,
    end: impl Into<Color>,
    duration_secs: f64,
    easing: Easing,
) -> Animation {
    let current = target.borrow().color();
    Animation::new(target, Channel::Color, end.into(), duration_secs, easing).with_start(current)
}
