use crate::error::{KinemaError, KinemaResult};
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::fmt;
use std::ops::{Add, Sub};
use std::rc::Rc;
use std::time::Instant;

/// Non-negative time span stored as fractional seconds.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Duration {
    seconds: f64,
}

impl Duration {
    /// Create a duration from seconds. Negative and NaN inputs collapse to zero.
    pub fn from_seconds(s: f64) -> Self {
        Self {
            seconds: if s > 0.0 { s } else { 0.0 },
        }
    }

    /// Like `from_seconds`, but rejects anything that is not strictly positive.
    pub fn try_from_seconds(s: f64) -> KinemaResult<Self> {
        if s > 0.0 && s.is_finite() {
            Ok(Self { seconds: s })
        } else {
            Err(KinemaError::InvalidDuration(s))
        }
    }

    pub fn from_millis(ms: f64) -> Self {
        Self::from_seconds(ms / 1000.0)
    }

    pub fn zero() -> Self {
        Self { seconds: 0.0 }
    }

    pub fn is_zero(&self) -> bool {
        self.seconds == 0.0
    }

    pub fn as_seconds(&self) -> f64 {
        self.seconds
    }

    pub fn as_millis(&self) -> f64 {
        self.seconds * 1000.0
    }

    /// Number of frames this span covers at the given FPS.
    pub fn frame_count(&self, fps: f64) -> u64 {
        (self.seconds * fps).ceil() as u64
    }

    pub fn to_std(self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(self.seconds)
    }
}

impl Default for Duration {
    fn default() -> Self {
        Duration::zero()
    }
}

impl Add for Duration {
    type Output = Duration;
    fn add(self, rhs: Duration) -> Duration {
        Duration::from_seconds(self.seconds + rhs.seconds)
    }
}

impl Sub for Duration {
    type Output = Duration;
    fn sub(self, rhs: Duration) -> Duration {
        Duration::from_seconds(self.seconds - rhs.seconds)
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.seconds < 1.0 {
            write!(f, "{:.0}ms", self.seconds * 1000.0)
        } else {
            write!(f, "{:.2}s", self.seconds)
        }
    }
}

/// A reading from a [`Clock`], in seconds since the clock's origin.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Timestamp {
    seconds: f64,
}

impl Timestamp {
    pub fn from_seconds(s: f64) -> Self {
        Self {
            seconds: if s > 0.0 { s } else { 0.0 },
        }
    }

    pub fn zero() -> Self {
        Self { seconds: 0.0 }
    }

    pub fn as_seconds(&self) -> f64 {
        self.seconds
    }

    /// Time elapsed since `earlier`; zero if `earlier` is in the future.
    pub fn duration_since(&self, earlier: Timestamp) -> Duration {
        Duration::from_seconds(self.seconds - earlier.seconds)
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Timestamp::zero()
    }
}

impl Add<Duration> for Timestamp {
    type Output = Timestamp;
    fn add(self, rhs: Duration) -> Timestamp {
        Timestamp::from_seconds(self.seconds + rhs.as_seconds())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total_ms = (self.seconds * 1000.0) as u64;
        let hours = total_ms / 3_600_000;
        let minutes = (total_ms % 3_600_000) / 60_000;
        let secs = (total_ms % 60_000) / 1_000;
        let ms = total_ms % 1_000;
        write!(f, "{:02}:{:02}:{:02}.{:03}", hours, minutes, secs, ms)
    }
}

/// A source of monotonic time.
///
/// Everything that reads time takes a clock handle instead of calling
/// `Instant::now` directly, so tests can drive time explicitly.
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Wall-clock time measured from the moment the clock was created.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_seconds(self.origin.elapsed().as_secs_f64())
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same underlying time, so one handle can be given to the
/// engine while the test keeps another to advance it.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    seconds: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.seconds.set(self.seconds.get() + by.as_seconds());
    }

    pub fn advance_seconds(&self, s: f64) {
        self.advance(Duration::from_seconds(s));
    }

    pub fn set(&self, at: Timestamp) {
        self.seconds.set(at.as_seconds());
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_seconds(self.seconds.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_clamps_negative() {
        assert!(Duration::from_seconds(-1.0).is_zero());
        assert!(Duration::from_seconds(f64::NAN).is_zero());
    }

    #[test]
    fn test_try_from_seconds_rejects_non_positive() {
        assert!(Duration::try_from_seconds(0.5).is_ok());
        assert!(matches!(
            Duration::try_from_seconds(0.0),
            Err(KinemaError::InvalidDuration(_))
        ));
        assert!(Duration::try_from_seconds(-2.0).is_err());
        assert!(Duration::try_from_seconds(f64::INFINITY).is_err());
    }

    #[test]
    fn test_duration_frame_count() {
        assert_eq!(Duration::from_seconds(1.0).frame_count(60.0), 60);
    }

    #[test]
    fn test_duration_display() {
        assert_eq!(format!("{}", Duration::from_seconds(2.5)), "2.50s");
        assert_eq!(format!("{}", Duration::from_millis(500.0)), "500ms");
    }

    #[test]
    fn test_timestamp_duration_since() {
        let a = Timestamp::from_seconds(1.0);
        let b = a + Duration::from_seconds(0.75);
        assert!((b.duration_since(a).as_seconds() - 0.75).abs() < 1e-9);
        assert!(a.duration_since(b).is_zero());
    }

    #[test]
    fn test_timestamp_display() {
        assert_eq!(
            format!("{}", Timestamp::from_seconds(3661.5)),
            "01:01:01.500"
        );
    }

    #[test]
    fn test_manual_clock_shared_between_clones() {
        let clock = ManualClock::new();
        let handle = clock.clone();
        assert_eq!(clock.now(), Timestamp::zero());
        handle.advance_seconds(0.25);
        assert_eq!(clock.now().as_seconds(), 0.25);
        handle.set(Timestamp::from_seconds(2.0));
        assert_eq!(clock.now().as_seconds(), 2.0);
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
