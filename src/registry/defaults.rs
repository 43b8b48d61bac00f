//! Default force terms for pinning bodies to a constraint surface.

use crate::constants::{
    APPROACH_DRAG_ACCELERATION, APPROACH_DRAG_FADE_RADIUS_MULTIPLE, ATTRACTION_FAR_ACCELERATION,
    ATTRACTION_FAR_RADIUS_MULTIPLE, ATTRACTION_NEAR_ACCELERATION, RECEDING_DRAG_ACCELERATION,
};
use crate::force::{
    DirectionType, DistanceSpec, ForceGenerator, ForceTerm, Gradient, GradientStop,
};

/// Attraction toward the surface, ramping up to full strength one body
/// radius out.
#[must_use]
pub fn attraction_gradient() -> Gradient {
    let pull =
        |acceleration| ForceGenerator::constant_acceleration(DirectionType::Direction, acceleration);
    Gradient::from_stops_unchecked(vec![
        GradientStop::new(DistanceSpec::Absolute(0.0), pull(ATTRACTION_NEAR_ACCELERATION)),
        GradientStop::new(
            DistanceSpec::RadiusMultiple(ATTRACTION_FAR_RADIUS_MULTIPLE),
            pull(ATTRACTION_FAR_ACCELERATION),
        ),
        GradientStop::new(DistanceSpec::UNBOUNDED, pull(ATTRACTION_FAR_ACCELERATION)),
    ])
}

/// Full drag on velocity carrying the body away from the surface.
#[must_use]
pub const fn receding_drag() -> ForceGenerator {
    ForceGenerator::drag_acceleration(
        DirectionType::VelocityAlongIfVelocityAway,
        RECEDING_DRAG_ACCELERATION,
    )
}

/// Drag on approaching velocity, fading out two radii from the surface.
#[must_use]
pub fn approach_drag_gradient() -> Gradient {
    let drag = |acceleration| {
        ForceGenerator::drag_acceleration(DirectionType::VelocityAlongIfVelocityToward, acceleration)
    };
    Gradient::from_stops_unchecked(vec![
        GradientStop::new(DistanceSpec::Absolute(0.0), drag(APPROACH_DRAG_ACCELERATION)),
        GradientStop::new(
            DistanceSpec::RadiusMultiple(APPROACH_DRAG_FADE_RADIUS_MULTIPLE),
            drag(0.0),
        ),
        GradientStop::new(DistanceSpec::UNBOUNDED, drag(0.0)),
    ])
}

/// Attraction plus the two-part shock absorber.
///
/// # Examples
///
/// ```
/// use pursuit::registry::defaults::default_plane_terms;
/// assert_eq!(default_plane_terms().len(), 3);
/// ```
#[must_use]
pub fn default_plane_terms() -> Vec<ForceTerm> {
    vec![
        attraction_gradient().into(),
        receding_drag().into(),
        approach_drag_gradient().into(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::DVec3;
    use rstest::rstest;

    use crate::force::ForceContext;

    #[rstest]
    #[case::attraction(attraction_gradient())]
    #[case::approach_drag(approach_drag_gradient())]
    fn defaults_pass_validation(#[case] gradient: Gradient) {
        let rebuilt = Gradient::new(gradient.stops().to_vec())
            .unwrap_or_else(|e| panic!("default gradient is invalid: {e}"));
        assert_eq!(rebuilt, gradient);
        assert!(gradient.check_order(0.5).is_ok());
    }

    #[test]
    fn attraction_is_full_strength_past_one_radius() {
        let context = ForceContext::new(DVec3::X * 3.0, DVec3::ZERO, 2.0, 1.0);
        let force = attraction_gradient()
            .force(&context)
            .unwrap_or_else(|| panic!("open-ended gradient always brackets"));
        assert_relative_eq!(force.x, 2.0 * ATTRACTION_FAR_ACCELERATION);
    }

    #[test]
    fn approach_drag_fades_out() {
        let far = ForceContext::new(DVec3::X * 5.0, DVec3::X, 1.0, 1.0);
        let faded = approach_drag_gradient().force(&far).unwrap_or(DVec3::ZERO);
        assert_relative_eq!(faded.length(), 0.0);

        let near = ForceContext::new(DVec3::X * 0.5, DVec3::X, 1.0, 1.0);
        let braking = approach_drag_gradient()
            .force(&near)
            .unwrap_or_else(|| panic!("approaching body is dragged"));
        assert!(braking.x < 0.0);
    }
}
