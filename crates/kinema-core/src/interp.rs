//! Interpolation between animatable values.
//!
//! `t` is *eased* progress, so it may legitimately fall outside `[0, 1]`
//! for overshooting curves; nothing here clamps it. Both endpoints are
//! exact: `t == 0` yields `start` and `t == 1` yields `end` bit-for-bit.

use crate::color::Color;
use crate::error::{KinemaError, KinemaResult};
use crate::math::Vec3;
use serde::{Deserialize, Serialize};

/// Scalar linear interpolation, `start + (end − start) · t`.
///
/// Blending happens in `f64`; the result narrows to `f32` on the way out.
pub fn lerp(start: f32, end: f32, t: f64) -> f32 {
    if t == 1.0 {
        return end;
    }
    let start = f64::from(start);
    (start + (f64::from(end) - start) * t) as f32
}

/// Nearest-endpoint fallback for values that cannot be blended:
/// `end` once `t ≥ 1`, otherwise `start`.
pub fn step<T: Clone>(start: &T, end: &T, t: f64) -> T {
    if t >= 1.0 {
        end.clone()
    } else {
        start.clone()
    }
}

/// Element-wise interpolation of two equally sized tuples.
pub fn lerp_slice(start: &[f32], end: &[f32], t: f64) -> KinemaResult<Vec<f32>> {
    if start.len() != end.len() {
        return Err(KinemaError::shape_mismatch(start.len(), end.len()));
    }
    Ok(start
        .iter()
        .zip(end)
        .map(|(&s, &e)| lerp(s, e, t))
        .collect())
}

/// A channel value tagged with its kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Scalar(f32),
    Vector(Vec3),
    Color(Color),
    /// A tuple whose arity is only known at runtime.
    Tuple(Vec<f32>),
}

impl Value {
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Scalar(_) => "scalar",
            Value::Vector(_) => "vector",
            Value::Color(_) => "color",
            Value::Tuple(_) => "tuple",
        }
    }

    /// Interpolate towards `end`, reporting every failure.
    ///
    /// Mismatched kinds give `UnsupportedInterpolation`; tuples of
    /// different arity give `ShapeMismatch`.
    pub fn try_lerp(&self, end: &Value, t: f64) -> KinemaResult<Value> {
        match (self, end) {
            (Value::Scalar(a), Value::Scalar(b)) => Ok(Value::Scalar(lerp(*a, *b, t))),
            (Value::Vector(a), Value::Vector(b)) => Ok(Value::Vector(a.lerp(b, t))),
            (Value::Color(a), Value::Color(b)) => Ok(Value::Color(a.lerp(b, t))),
            (Value::Tuple(a), Value::Tuple(b)) => lerp_slice(a, b, t).map(Value::Tuple),
            (a, b) => Err(KinemaError::unsupported(a.kind(), b.kind())),
        }
    }

    /// Interpolate towards `end`, falling back to the nearest endpoint when
    /// the kinds cannot be blended. Arity mismatches are still reported.
    pub fn lerp(&self, end: &Value, t: f64) -> KinemaResult<Value> {
        match self.try_lerp(end, t) {
            Err(KinemaError::UnsupportedInterpolation { .. }) => Ok(step(self, end, t)),
            other => other,
        }
    }

    pub fn as_scalar(&self) -> Option<f32> {
        match self {
            Value::Scalar(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_vector(&self) -> Option<Vec3> {
        match self {
            Value::Vector(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match self {
            Value::Color(c) => Some(*c),
            _ => None,
        }
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Scalar(v)
    }
}

impl From<Vec3> for Value {
    fn from(v: Vec3) -> Self {
        Value::Vector(v)
    }
}

impl From<Color> for Value {
    fn from(c: Color) -> Self {
        Value::Color(c)
    }
}

impl From<Vec<f32>> for Value {
    fn from(v: Vec<f32>) -> Self {
        Value::Tuple(v)
    }
}
