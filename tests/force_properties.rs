//! Behavioural properties of generators and gradients.
use approx::assert_relative_eq;
use glam::DVec3;
use pursuit::force::{
    DirectionType, DistanceSpec, ForceContext, ForceGenerator, ForceKind, Gradient, GradientStop,
};
use pursuit::ConfigurationError;
use rstest::{fixture, rstest};
use test_utils::assert_vec_close;
use test_utils::contexts::{at_rest_along_x, moving, with_radius};

#[rstest]
#[case::along_x(DVec3::new(4.0, 0.0, 0.0))]
#[case::diagonal(DVec3::new(1.0, -2.0, 2.0))]
#[case::tiny(DVec3::new(0.0, 1e-3, 0.0))]
fn constant_direction_force_is_unit_times_magnitude(#[case] offset: DVec3) {
    let generator = ForceGenerator::constant_force(DirectionType::Direction, 7.5);
    let context = moving(offset, DVec3::new(0.3, 0.1, -2.0));
    let force = generator
        .force(&context)
        .unwrap_or_else(|| panic!("ungated constant force always applies"));
    assert_vec_close(force, offset.normalize() * 7.5, 1e-9);
}

#[rstest]
#[case::any(DirectionType::VelocityAny)]
#[case::along(DirectionType::VelocityAlong)]
#[case::toward(DirectionType::VelocityAlongIfVelocityToward)]
#[case::away(DirectionType::VelocityAlongIfVelocityAway)]
#[case::orth(DirectionType::VelocityOrth)]
fn drag_never_reinforces_motion(#[case] direction: DirectionType) {
    let generator = ForceGenerator::drag_acceleration(direction, 3.0);
    let velocities = [
        DVec3::new(2.0, 1.0, 0.0),
        DVec3::new(-2.0, 1.0, 0.5),
        DVec3::new(0.0, -4.0, 1.0),
    ];
    for velocity in velocities {
        let context = moving(DVec3::new(3.0, 0.0, 0.0), velocity);
        let Some(force) = generator.force(&context) else {
            continue;
        };
        let (unit, _) = context
            .select(direction)
            .unwrap_or_else(|| panic!("a produced force implies a valid direction"));
        assert!(force.dot(unit) <= 0.0, "{force} reinforces {unit}");
    }
}

#[test]
fn constant_acceleration_scales_with_mass() {
    let generator = ForceGenerator::constant_acceleration(DirectionType::Direction, 20.0);
    let force = generator
        .force(&at_rest_along_x(4.0, 10.0))
        .unwrap_or_else(|| panic!("force expected"));
    assert_vec_close(force, DVec3::new(200.0, 0.0, 0.0), 1e-9);
}

#[test]
fn lesser_of_force_and_acceleration_wins() {
    let generator =
        ForceGenerator::new(ForceKind::Constant, DirectionType::Direction, Some(50.0), Some(20.0))
            .unwrap_or_else(|e| panic!("generator rejected: {e}"));
    let light = generator.force(&at_rest_along_x(1.0, 1.0)).map_or(0.0, |f| f.x);
    let heavy = generator.force(&at_rest_along_x(1.0, 10.0)).map_or(0.0, |f| f.x);
    assert_relative_eq!(light, 20.0);
    assert_relative_eq!(heavy, 50.0);
}

#[test]
fn generator_without_magnitude_is_rejected() {
    assert!(matches!(
        ForceGenerator::new(ForceKind::Drag, DirectionType::VelocityAny, None, None),
        Err(ConfigurationError::MissingMagnitude)
    ));
}

#[rstest]
#[case::inside_window(1.5, true)]
#[case::below_window(0.5, false)]
#[case::above_window(2.5, false)]
#[case::on_lower_bound(1.0, false)]
#[case::on_upper_bound(2.0, false)]
fn speed_window_is_open(#[case] speed: f64, #[case] applies: bool) {
    let generator = ForceGenerator::drag_force(DirectionType::VelocityAny, 1.0)
        .apply_when_over_speed(1.0)
        .apply_when_under_speed(2.0);
    let context = moving(DVec3::X, DVec3::Y * speed);
    assert_eq!(generator.force(&context).is_some(), applies);
}

#[fixture]
fn ramp() -> Gradient {
    Gradient::new(vec![
        GradientStop::new(
            DistanceSpec::Absolute(0.0),
            ForceGenerator::constant_force(DirectionType::Direction, 10.0),
        ),
        GradientStop::new(
            DistanceSpec::RadiusMultiple(2.0),
            ForceGenerator::constant_force(DirectionType::Direction, 30.0),
        ),
        GradientStop::new(
            DistanceSpec::UNBOUNDED,
            ForceGenerator::constant_force(DirectionType::Direction, 30.0),
        ),
    ])
    .unwrap_or_else(|e| panic!("ramp rejected: {e}"))
}

#[fixture]
fn lifted_ramp() -> Gradient {
    Gradient::new(vec![
        GradientStop::new(
            DistanceSpec::Absolute(1.0),
            ForceGenerator::constant_force(DirectionType::Direction, 10.0),
        ),
        GradientStop::new(
            DistanceSpec::RadiusMultiple(2.0),
            ForceGenerator::constant_force(DirectionType::Direction, 30.0),
        ),
        GradientStop::new(
            DistanceSpec::Absolute(8.0),
            ForceGenerator::constant_force(DirectionType::Direction, 45.0),
        ),
    ])
    .unwrap_or_else(|e| panic!("ramp rejected: {e}"))
}

#[rstest]
#[case::first_stop(0)]
#[case::middle_stop(1)]
#[case::last_stop(2)]
fn gradient_is_continuous_at_stops(lifted_ramp: Gradient, #[case] index: usize) {
    let radius = 1.5;
    let stop = lifted_ramp
        .stops()
        .get(index)
        .copied()
        .unwrap_or_else(|| panic!("no stop {index}"));
    let context = with_radius(stop.distance.resolve(radius), 2.0, radius);
    let blended = lifted_ramp
        .force(&context)
        .unwrap_or_else(|| panic!("stop {index} is bracketed"));
    let own = stop
        .generator
        .force(&context)
        .unwrap_or_else(|| panic!("ungated stop {index} applies"));
    assert!(own.length() > 0.0);
    assert_vec_close(blended, own, 1e-9);
}

#[rstest]
#[case::quarter(0.5, 0.25)]
#[case::half(1.0, 0.5)]
#[case::three_quarters(1.5, 0.75)]
fn gradient_blend_is_linear(ramp: Gradient, #[case] distance: f64, #[case] percent: f64) {
    let force = ramp
        .force(&with_radius(distance, 1.0, 1.0))
        .unwrap_or_else(|| panic!("inside first bracket"));
    assert_relative_eq!(force.x, 10.0 + 20.0 * percent, epsilon = 1e-9);
}

#[test]
fn acceleration_gradient_blends_resolved_magnitudes() {
    let gradient = Gradient::new(vec![
        GradientStop::new(
            DistanceSpec::Absolute(0.0),
            ForceGenerator::constant_acceleration(DirectionType::Direction, 20.0),
        ),
        GradientStop::new(
            DistanceSpec::Absolute(2.0),
            ForceGenerator::constant_acceleration(DirectionType::Direction, 500.0),
        ),
    ])
    .unwrap_or_else(|e| panic!("gradient rejected: {e}"));
    let force = gradient
        .force(&ForceContext::new(DVec3::X, DVec3::ZERO, 3.0, 1.0))
        .unwrap_or_else(|| panic!("inside bracket"));
    assert_relative_eq!(force.x, 3.0 * 260.0, epsilon = 1e-9);
}

#[test]
fn gated_stop_silences_the_bracket() {
    let gradient = Gradient::new(vec![
        GradientStop::new(
            DistanceSpec::Absolute(0.0),
            ForceGenerator::drag_force(DirectionType::VelocityAny, 1.0),
        ),
        GradientStop::new(
            DistanceSpec::Absolute(10.0),
            ForceGenerator::drag_force(DirectionType::VelocityAny, 2.0).apply_when_under_speed(1.0),
        ),
    ])
    .unwrap_or_else(|e| panic!("gradient rejected: {e}"));
    let fast = moving(DVec3::X * 5.0, DVec3::Y * 3.0);
    assert_eq!(gradient.force(&fast), None);
    let slow = moving(DVec3::X * 5.0, DVec3::Y * 0.5);
    assert!(gradient.force(&slow).is_some());
}

#[test]
fn blending_mismatched_generators_is_an_error() {
    let constant = ForceGenerator::constant_force(DirectionType::Direction, 1.0);
    let drag = ForceGenerator::drag_force(DirectionType::Direction, 1.0);
    let sideways = ForceGenerator::constant_force(DirectionType::VelocityOrth, 1.0);
    let context = at_rest_along_x(1.0, 1.0);
    assert!(matches!(
        constant.force_lerp(&drag, &context, 0.5),
        Err(ConfigurationError::KindMismatch { .. })
    ));
    assert!(matches!(
        constant.force_lerp(&sideways, &context, 0.5),
        Err(ConfigurationError::DirectionMismatch { .. })
    ));
}
