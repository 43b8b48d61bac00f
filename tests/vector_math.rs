//! Vector helper functions: normalisation and length clamping.
use glam::DVec3;
use pursuit::vector_math::{clamp_length, unit_and_length, unit_or_zero};

#[test]
fn unit_vector_is_zero_for_nan() {
    let result = unit_or_zero(DVec3::new(f64::NAN, 1.0, 0.0));
    assert_eq!(result, DVec3::ZERO);
}

#[test]
fn unit_vector_is_normalised() {
    let result = unit_and_length(DVec3::new(3.0, 0.0, 0.0));
    assert_eq!(result, (DVec3::X, 3.0));
}

#[test]
fn clamping_zero_vector_stays_zero() {
    assert_eq!(clamp_length(DVec3::ZERO, 1.0), DVec3::ZERO);
}
