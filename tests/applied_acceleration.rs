//! Unit tests for physics calculations.
//! Covers acceleration helper functions for edge cases and typical inputs.
use approx::assert_relative_eq;
use glam::DVec3;
use pursuit::{applied_acceleration, DEFAULT_MASS};
use rstest::rstest;

#[rstest]
#[case::explicit_mass(DVec3::new(7.0, -14.0, 21.0), Some(7.0), Some(DVec3::new(1.0, -2.0, 3.0)))]
#[case::default_mass(DVec3::new(DEFAULT_MASS, 0.0, 0.0), None, Some(DVec3::X))]
#[case::invalid_mass(DVec3::ONE, Some(0.0), None)]
#[case::negative_mass(DVec3::ONE, Some(-5.0), None)]
fn acceleration_cases(
    #[case] force: DVec3,
    #[case] mass: Option<f64>,
    #[case] expected: Option<DVec3>,
) {
    let acc = applied_acceleration(force, mass);
    match (acc, expected) {
        (Some(a), Some(e)) => {
            assert_relative_eq!(a.x, e.x);
            assert_relative_eq!(a.y, e.y);
            assert_relative_eq!(a.z, e.z);
        }
        (None, None) => {}
        (a, e) => panic!("mismatch: {a:?} vs {e:?}"),
    }
}
