//! Basic vector math helper functions.
//! Zero-safe unit vectors and the projections used to decompose velocity
//! relative to a pursuit direction.
use glam::DVec3;

/// Returns the unit vector and length of `vector`.
///
/// Zero, near-zero and non-finite inputs produce `(DVec3::ZERO, 0.0)` rather
/// than `NaN` components.
///
/// # Examples
///
/// ```
/// use glam::DVec3;
/// use pursuit::vector_math::unit_and_length;
/// let (unit, length) = unit_and_length(DVec3::new(3.0, 0.0, 4.0));
/// assert!((unit.x - 0.6).abs() < 1e-12);
/// assert!((unit.z - 0.8).abs() < 1e-12);
/// assert!((length - 5.0).abs() < 1e-12);
///
/// assert_eq!(unit_and_length(DVec3::ZERO), (DVec3::ZERO, 0.0));
/// ```
#[must_use]
pub fn unit_and_length(vector: DVec3) -> (DVec3, f64) {
    if !vector.is_finite() {
        return (DVec3::ZERO, 0.0);
    }
    let length = vector.length();
    vector
        .try_normalize()
        .map_or((DVec3::ZERO, 0.0), |unit| (unit, length))
}

/// Returns the unit vector in the direction of `vector`, or zero.
#[must_use]
pub fn unit_or_zero(vector: DVec3) -> DVec3 {
    unit_and_length(vector).0
}

/// Component of `vector` that lies along `unit_axis`.
///
/// `unit_axis` is expected to be normalised or zero.
#[must_use]
pub fn project_onto(vector: DVec3, unit_axis: DVec3) -> DVec3 {
    unit_axis * vector.dot(unit_axis)
}

/// Component of `vector` perpendicular to `unit_axis`.
///
/// Uses a double cross product so the result lies in the plane spanned by the
/// axis and the vector.
#[must_use]
pub fn reject_from(vector: DVec3, unit_axis: DVec3) -> DVec3 {
    unit_axis.cross(vector).cross(unit_axis)
}

/// Rescale `vector` so its length does not exceed `max_length`.
#[must_use]
pub fn clamp_length(vector: DVec3, max_length: f64) -> DVec3 {
    let (unit, length) = unit_and_length(vector);
    if length > max_length {
        unit * max_length
    } else {
        vector
    }
}
