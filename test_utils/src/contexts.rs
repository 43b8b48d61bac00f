//! Canned force contexts.

use glam::DVec3;
use pursuit::ForceContext;

/// A body of `mass` and unit radius at rest, `distance` away from its target
/// along +X.
///
/// # Examples
/// ```
/// use test_utils::contexts::at_rest_along_x;
/// let ctx = at_rest_along_x(4.0, 10.0);
/// assert_eq!(ctx.direction_length, 4.0);
/// ```
pub fn at_rest_along_x(distance: f64, mass: f64) -> ForceContext {
    ForceContext::new(DVec3::X * distance, DVec3::ZERO, mass, 1.0)
}

/// A unit-mass, unit-radius body moving with `velocity` toward a target at
/// `offset`.
pub fn moving(offset: DVec3, velocity: DVec3) -> ForceContext {
    ForceContext::new(offset, velocity, 1.0, 1.0)
}

/// As [`at_rest_along_x`] but with an explicit body radius.
pub fn with_radius(distance: f64, mass: f64, radius: f64) -> ForceContext {
    ForceContext::new(DVec3::X * distance, DVec3::ZERO, mass, radius)
}
