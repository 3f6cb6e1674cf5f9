//! Core error types for the Kinema engine.

/// A specialized Result type for Kinema operations.
pub type KinemaResult<T> = Result<T, KinemaError>;

/// Top-level error type shared by every Kinema crate.
#[derive(Debug, thiserror::Error)]
pub enum KinemaError {
    #[error("shape mismatch: expected {expected} components, found {found}")]
    ShapeMismatch { expected: usize, found: usize },

    #[error("invalid duration: {0}s (must be > 0)")]
    InvalidDuration(f64),

    #[error("cannot interpolate from {from} to {to}")]
    UnsupportedInterpolation {
        from: &'static str,
        to: &'static str,
    },

    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl KinemaError {
    /// Create a shape mismatch error from the two arities involved.
    pub fn shape_mismatch(expected: usize, found: usize) -> Self {
        KinemaError::ShapeMismatch { expected, found }
    }

    /// Create an interpolation error naming the two value kinds.
    pub fn unsupported(from: &'static str, to: &'static str) -> Self {
        KinemaError::UnsupportedInterpolation { from, to }
    }
}
