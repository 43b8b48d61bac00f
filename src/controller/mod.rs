//! Controllers that steer a body toward a target point.
//!
//! [`PursuitController`] sums force generators and applies the result as a
//! force. [`VelocityController`] is the simpler fallback that writes the
//! body's velocity directly. Both hook the body's force event on construction
//! and unhook it on [`Chase::dispose`] or drop.

use glam::DVec3;

use crate::error::ConfigurationError;

pub mod pursuit;
pub mod velocity;

pub use pursuit::{PursuitController, PursuitSettings};
pub use velocity::{VelocityController, VelocitySettings};

/// Lifecycle shared by every controller.
pub trait Chase {
    /// Start (or keep) steering toward `target`.
    fn set_target(&mut self, target: DVec3);

    /// Clear the target. Force callbacks do nothing until a new target is set.
    fn stop_chasing(&mut self);

    /// The current target, if chasing.
    fn target(&self) -> Option<DVec3>;

    /// Unhook from the body and clear the target. Safe to call repeatedly.
    fn dispose(&mut self);

    /// Whether a target is set.
    fn is_chasing(&self) -> bool {
        self.target().is_some()
    }
}

/// Reject a set cap that is negative, NaN or infinite.
pub(crate) fn check_limit(name: &'static str, limit: Option<f64>) -> Result<(), ConfigurationError> {
    match limit {
        Some(value) if !value.is_finite() || value < 0.0 => {
            Err(ConfigurationError::InvalidLimit { name, value })
        }
        _ => Ok(()),
    }
}
