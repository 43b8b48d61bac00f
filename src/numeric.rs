//! Scalar helpers shared by the force generators and gradients.
//!
//! These cover the linear remapping used when blending gradient stops and the
//! tolerance checks used to decide when a body already sits on its surface.

/// Tolerance below which a length is treated as zero.
pub const NEAR_ZERO: f64 = 1e-9;

/// Clamp `value` into `[0, 1]`.
///
/// `NaN` collapses to `0.0` so a degenerate blend never leaks into a force.
#[must_use]
pub fn clamp01(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

/// Linearly remap `value` from the range `[from_min, from_max]` onto
/// `[to_min, to_max]`.
///
/// The result is not clamped. A zero-width source range maps everything onto
/// `to_min`.
///
/// # Examples
///
/// ```
/// use pursuit::numeric::scale;
/// assert!((scale(5.0, 0.0, 10.0, 0.0, 1.0) - 0.5).abs() < 1e-12);
/// assert!((scale(0.25, 0.0, 1.0, 20.0, 500.0) - 140.0).abs() < 1e-9);
/// ```
#[must_use]
pub fn scale(value: f64, from_min: f64, from_max: f64, to_min: f64, to_max: f64) -> f64 {
    let width = from_max - from_min;
    if width.abs() < NEAR_ZERO || !width.is_finite() {
        return to_min;
    }
    to_min + (value - from_min) / width * (to_max - to_min)
}

/// Percentage of the way `value` sits between `from` and `to`, clamped to
/// `[0, 1]`.
#[must_use]
pub fn percent_between(value: f64, from: f64, to: f64) -> f64 {
    clamp01(scale(value, from, to, 0.0, 1.0))
}

/// Linear interpolation between `a` and `b`.
#[must_use]
pub fn lerp(a: f64, b: f64, percent: f64) -> f64 {
    scale(percent, 0.0, 1.0, a, b)
}

/// Whether `value` is within `epsilon` of zero.
#[must_use]
pub fn is_near_zero(value: f64, epsilon: f64) -> bool {
    value.abs() <= epsilon
}
