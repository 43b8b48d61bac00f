//! Physics helper functions.
//!
//! Newton's second law for the reference integrator, kept separate so the
//! arithmetic can be tested without building bodies.

use glam::DVec3;

use crate::DEFAULT_MASS;

/// Smallest acceptable mass to avoid numerically unstable accelerations.
const MIN_MASS: f64 = 1e-12;

/// Computes acceleration from a force vector and optional mass.
///
/// Returns `None` if `mass` is non-positive or effectively zero (see
/// [`MIN_MASS`]). When `mass` is `None` the [`DEFAULT_MASS`] constant is
/// used.
///
/// # Examples
///
/// ```
/// use glam::DVec3;
/// use pursuit::applied_acceleration;
/// let accel = applied_acceleration(DVec3::new(7.0, -14.0, 21.0), Some(7.0));
/// assert_eq!(accel, Some(DVec3::new(1.0, -2.0, 3.0)));
/// assert_eq!(applied_acceleration(DVec3::X, Some(0.0)), None);
/// ```
#[must_use]
pub fn applied_acceleration(force: DVec3, mass: Option<f64>) -> Option<DVec3> {
    match mass {
        Some(m) if m > MIN_MASS => Some(force / m),
        Some(_) => None,
        None => Some(force / DEFAULT_MASS),
    }
}

/// Angular acceleration of a body with a scalar moment of inertia.
///
/// Returns `None` for a non-positive or effectively zero inertia.
#[must_use]
pub fn angular_acceleration(torque: DVec3, moment_of_inertia: f64) -> Option<DVec3> {
    (moment_of_inertia > MIN_MASS).then(|| torque / moment_of_inertia)
}

/// Torque produced by `force` applied at `point` on a body centred at
/// `centre`.
#[must_use]
pub fn torque_at(force: DVec3, point: DVec3, centre: DVec3) -> DVec3 {
    (point - centre).cross(force)
}
