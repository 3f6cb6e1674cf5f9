//! # kinema-core
//!
//! Core types and primitives for the Kinema animation engine.
//! This crate contains the leaf building blocks shared by the rest of the
//! workspace: easing curves, interpolation, vectors and transforms, colors,
//! time sources, configuration, and error types.

pub mod color;
pub mod config;
pub mod easing;
pub mod error;
pub mod interp;
pub mod math;
pub mod time;

pub use config::*;

pub use color::Color;
pub use easing::Easing;
pub use error::{KinemaError, KinemaResult};
pub use interp::Value;
pub use math::{Mat4, Transform, Vec3};
pub use time::{Clock, Duration, ManualClock, SystemClock, Timestamp};
