//! Per-evaluation decomposition of a body's motion relative to its target.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::vector_math::{project_onto, reject_from, unit_and_length};

/// Which part of a [`ForceContext`] a generator acts along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectionType {
    /// Toward the target.
    Direction,
    /// Along the full velocity.
    VelocityAny,
    /// Along the velocity component parallel to the target direction.
    VelocityAlong,
    /// As [`DirectionType::VelocityAlong`], only while moving toward the target.
    VelocityAlongIfVelocityToward,
    /// As [`DirectionType::VelocityAlong`], only while moving away from the target.
    VelocityAlongIfVelocityAway,
    /// Along the velocity component perpendicular to the target direction.
    VelocityOrth,
}

/// Snapshot of one body's motion relative to one target offset.
///
/// Built fresh for every force callback. All unit vectors are zero when the
/// vector they come from has no length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceContext {
    /// Unit vector from the anchor toward the target.
    pub direction_unit: DVec3,
    /// Distance from the anchor to the target.
    pub direction_length: f64,
    /// Unit vector of the full velocity.
    pub velocity_unit: DVec3,
    /// Speed.
    pub velocity_length: f64,
    /// Unit vector of the velocity projected onto the target direction.
    pub velocity_along_unit: DVec3,
    /// Speed along the target direction.
    pub velocity_along_length: f64,
    /// Whether the velocity has a positive component toward the target.
    pub is_velocity_toward_target: bool,
    /// Unit vector of the velocity perpendicular to the target direction.
    pub velocity_orth_unit: DVec3,
    /// Speed perpendicular to the target direction.
    pub velocity_orth_length: f64,
    /// Mass of the body.
    pub body_mass: f64,
    /// Radius used to resolve radius-relative gradient distances.
    pub body_radius: f64,
}

impl ForceContext {
    /// Decompose `velocity` relative to `target_offset` (target minus anchor).
    ///
    /// # Examples
    ///
    /// ```
    /// use glam::DVec3;
    /// use pursuit::force::ForceContext;
    /// let ctx = ForceContext::new(DVec3::new(4.0, 0.0, 0.0), DVec3::new(1.0, 2.0, 0.0), 10.0, 0.5);
    /// assert!(ctx.is_velocity_toward_target);
    /// assert!((ctx.velocity_along_length - 1.0).abs() < 1e-12);
    /// assert!((ctx.velocity_orth_length - 2.0).abs() < 1e-12);
    /// ```
    #[must_use]
    pub fn new(target_offset: DVec3, velocity: DVec3, body_mass: f64, body_radius: f64) -> Self {
        let (direction_unit, direction_length) = unit_and_length(target_offset);
        let (velocity_unit, velocity_length) = unit_and_length(velocity);

        let (velocity_along_unit, velocity_along_length) =
            unit_and_length(project_onto(velocity, direction_unit));
        let (velocity_orth_unit, velocity_orth_length) =
            unit_and_length(reject_from(velocity, direction_unit));

        Self {
            direction_unit,
            direction_length,
            velocity_unit,
            velocity_length,
            velocity_along_unit,
            velocity_along_length,
            is_velocity_toward_target: target_offset.dot(velocity) > 0.0,
            velocity_orth_unit,
            velocity_orth_length,
            body_mass,
            body_radius,
        }
    }

    /// Unit vector and length selected by `direction`.
    ///
    /// Returns `None` when the direction's precondition does not hold, which
    /// only happens for the conditional velocity-along variants.
    #[must_use]
    pub const fn select(&self, direction: DirectionType) -> Option<(DVec3, f64)> {
        match direction {
            DirectionType::Direction => Some((self.direction_unit, self.direction_length)),
            DirectionType::VelocityAny => Some((self.velocity_unit, self.velocity_length)),
            DirectionType::VelocityAlong => {
                Some((self.velocity_along_unit, self.velocity_along_length))
            }
            DirectionType::VelocityAlongIfVelocityToward => {
                if self.is_velocity_toward_target {
                    Some((self.velocity_along_unit, self.velocity_along_length))
                } else {
                    None
                }
            }
            DirectionType::VelocityAlongIfVelocityAway => {
                if self.is_velocity_toward_target {
                    None
                } else {
                    Some((self.velocity_along_unit, self.velocity_along_length))
                }
            }
            DirectionType::VelocityOrth => Some((self.velocity_orth_unit, self.velocity_orth_length)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn zero_offset_is_nan_free() {
        let ctx = ForceContext::new(DVec3::ZERO, DVec3::new(1.0, 1.0, 0.0), 1.0, 1.0);
        assert_eq!(ctx.direction_unit, DVec3::ZERO);
        assert_eq!(ctx.velocity_along_unit, DVec3::ZERO);
        assert_eq!(ctx.velocity_orth_unit, DVec3::ZERO);
        assert!(ctx.velocity_unit.is_finite());
    }

    #[test]
    fn receding_velocity_points_along_negative_direction() {
        let ctx = ForceContext::new(DVec3::X * 3.0, DVec3::new(-2.0, 0.0, 1.0), 1.0, 1.0);
        assert!(!ctx.is_velocity_toward_target);
        assert_relative_eq!(ctx.velocity_along_unit.x, -1.0);
        assert_relative_eq!(ctx.velocity_along_length, 2.0);
        assert_relative_eq!(ctx.velocity_orth_unit.z, 1.0);
        assert_relative_eq!(ctx.velocity_orth_length, 1.0);
    }

    #[rstest]
    #[case::toward(DVec3::X, DirectionType::VelocityAlongIfVelocityToward, true)]
    #[case::toward_rejects_away(DVec3::NEG_X, DirectionType::VelocityAlongIfVelocityToward, false)]
    #[case::away(DVec3::NEG_X, DirectionType::VelocityAlongIfVelocityAway, true)]
    #[case::away_rejects_toward(DVec3::X, DirectionType::VelocityAlongIfVelocityAway, false)]
    #[case::stationary_counts_as_away(DVec3::ZERO, DirectionType::VelocityAlongIfVelocityAway, true)]
    fn conditional_directions(
        #[case] velocity: DVec3,
        #[case] direction: DirectionType,
        #[case] selected: bool,
    ) {
        let ctx = ForceContext::new(DVec3::X * 2.0, velocity, 1.0, 1.0);
        assert_eq!(ctx.select(direction).is_some(), selected);
    }
}
