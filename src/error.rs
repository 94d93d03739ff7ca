//! Recoverable configuration errors
//!
//! Nothing in the per-tick path returns these; they surface from setters and
//! tuning parsing so callers can log and keep the prior value.

use std::fmt;

use thiserror::Error;

/// Axis of a direction component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => f.write_str("x"),
            Axis::Y => f.write_str("y"),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("direction {axis} component {value} outside [-100, 100]")]
    DirectionOutOfRange { axis: Axis, value: i32 },

    #[error("projectile level {0} outside [1, 127]")]
    LevelOutOfRange(i32),

    #[error("factory timeout {0} must be positive")]
    TimeoutOutOfRange(i32),

    #[error("invalid tuning document: {0}")]
    Tuning(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
