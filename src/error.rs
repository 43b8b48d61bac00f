//! Configuration errors raised while building generators, gradients and
//! controllers.
//!
//! Everything here is fatal to setup. Per-tick outcomes such as a failed speed
//! gate or a gradient bracket miss are not errors and never surface here.

use thiserror::Error;

use crate::force::{DirectionType, ForceKind};

/// A generator, gradient or controller description that cannot be used.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// A generator was described with neither a base force nor a base
    /// acceleration.
    #[error("force generator needs a base force or a base acceleration")]
    MissingMagnitude,
    /// A gradient needs at least two stops to blend between.
    #[error("gradient needs at least two stops, got {count}")]
    TooFewStops {
        /// Number of stops supplied.
        count: usize,
    },
    /// Gradient stops must all be the same generator kind.
    #[error("gradient stop {index} is {found:?} but the first stop is {expected:?}")]
    MixedStopKinds {
        /// Index of the offending stop.
        index: usize,
        /// Kind of the first stop.
        expected: ForceKind,
        /// Kind of the offending stop.
        found: ForceKind,
    },
    /// Gradient stops must all select the same direction.
    #[error("gradient stop {index} uses {found:?} but the first stop uses {expected:?}")]
    MixedStopDirections {
        /// Index of the offending stop.
        index: usize,
        /// Direction type of the first stop.
        expected: DirectionType,
        /// Direction type of the offending stop.
        found: DirectionType,
    },
    /// Gradient stops must be in ascending distance order.
    #[error("gradient stop {index} at {distance} comes after a stop at {previous}")]
    UnorderedStops {
        /// Index of the stop that breaks the ordering.
        index: usize,
        /// Resolved distance of the preceding stop.
        previous: f64,
        /// Resolved distance of the offending stop.
        distance: f64,
    },
    /// Two generators being blended are different kinds.
    #[error("cannot blend a {lower:?} generator toward a {upper:?} generator")]
    KindMismatch {
        /// Kind of the lower stop.
        lower: ForceKind,
        /// Kind of the upper stop.
        upper: ForceKind,
    },
    /// Two generators being blended select different directions.
    #[error("cannot blend {lower:?} toward {upper:?}")]
    DirectionMismatch {
        /// Direction type of the lower stop.
        lower: DirectionType,
        /// Direction type of the upper stop.
        upper: DirectionType,
    },
    /// Body radii must be finite and non-negative.
    #[error("body radius must be finite and non-negative, got {0}")]
    InvalidBodyRadius(f64),
    /// Force, acceleration and speed caps must be finite and non-negative.
    #[error("{name} must be finite and non-negative, got {value}")]
    InvalidLimit {
        /// Which cap was rejected.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// A configuration document could not be parsed.
    #[error("invalid configuration document: {0}")]
    Json(#[from] serde_json::Error),
    /// A configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
}
