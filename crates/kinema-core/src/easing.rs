//! Easing curves mapping normalized progress to shaped progress.
//!
//! Inputs are expected in `[0, 1]`; callers clamp before calling. None of
//! the curves clamp internally, so an out-of-range input produces an
//! out-of-range output instead of being silently corrected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// `t`
pub fn linear(t: f64) -> f64 {
    t
}

/// Smoothstep: `3t² − 2t³`.
pub fn ease_in_out(t: f64) -> f64 {
    3.0 * t * t - 2.0 * t * t * t
}

/// `t²`
pub fn ease_in_quad(t: f64) -> f64 {
    t * t
}

/// `1 − (1−t)²`
pub fn ease_out_quad(t: f64) -> f64 {
    1.0 - (1.0 - t) * (1.0 - t)
}

/// `2t²` below the midpoint, `1 − 2(1−t)²` from it on.
pub fn ease_in_out_quad(t: f64) -> f64 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - 2.0 * (1.0 - t) * (1.0 - t)
    }
}

/// Easing function for animation interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    EaseInOut,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutQuad,
}

impl Default for Easing {
    fn default() -> Self {
        Easing::EaseInOut
    }
}

impl Easing {
    /// Every supported curve, in declaration order.
    pub const ALL: [Easing; 5] = [
        Easing::Linear,
        Easing::EaseInOut,
        Easing::EaseInQuad,
        Easing::EaseOutQuad,
        Easing::EaseInOutQuad,
    ];

    /// Apply the easing function to a progress value.
    pub fn apply(&self, t: f64) -> f64 {
        match self {
            Easing::Linear => linear(t),
            Easing::EaseInOut => ease_in_out(t),
            Easing::EaseInQuad => ease_in_quad(t),
            Easing::EaseOutQuad => ease_out_quad(t),
            Easing::EaseInOutQuad => ease_in_out_quad(t),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::EaseInOut => "ease_in_out",
            Easing::EaseInQuad => "ease_in_quad",
            Easing::EaseOutQuad => "ease_out_quad",
            Easing::EaseInOutQuad => "ease_in_out_quad",
        }
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Easing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('-', "_").to_ascii_lowercase();
        Easing::ALL
            .into_iter()
            .find(|e| e.name() == normalized)
            .ok_or_else(|| format!("unknown easing '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easing_boundaries_are_exact() {
        for easing in Easing::ALL {
            assert_eq!(easing.apply(0.0), 0.0, "{} should start at 0", easing);
            assert_eq!(easing.apply(1.0), 1.0, "{} should end at 1", easing);
        }
    }

    #[test]
    fn test_symmetric_midpoints() {
        assert_eq!(ease_in_out(0.5), 0.5);
        assert_eq!(ease_in_out_quad(0.5), 0.5);
    }

    #[test]
    fn test_quad_shapes() {
        assert!((ease_in_quad(0.5) - 0.25).abs() < 1e-6);
        assert!((ease_out_quad(0.5) - 0.75).abs() < 1e-6);
        assert!((ease_in_out_quad(0.25) - 0.125).abs() < 1e-6);
        assert!((ease_in_out_quad(0.75) - 0.875).abs() < 1e-6);
    }

    #[test]
    fn test_no_internal_clamping() {
        assert_eq!(linear(1.5), 1.5);
        assert!(ease_in_quad(-1.0) > 0.0);
        assert!(ease_out_quad(2.0) < 1.0);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("linear".parse::<Easing>().unwrap(), Easing::Linear);
        assert_eq!(
            "ease-in-out-quad".parse::<Easing>().unwrap(),
            Easing::EaseInOutQuad
        );
        assert!("bounce".parse::<Easing>().is_err());
    }

    #[test]
    fn test_curves_keep_double_precision() {
        assert_eq!(ease_in_out(0.1), 0.028000000000000004);
        assert_eq!(ease_in_out(0.7), 0.7839999999999999);
        assert_eq!(Easing::EaseInQuad.apply(0.1), 0.1 * 0.1);
        assert_eq!(Easing::EaseOutQuad.apply(0.3), 1.0 - (1.0 - 0.3) * (1.0 - 0.3));
    }

    #[test]
    fn test_default_is_smoothstep() {
        assert_eq!(Easing::default(), Easing::EaseInOut);
    }
}
