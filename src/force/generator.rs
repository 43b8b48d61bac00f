//! Constant and drag force generators.
//!
//! A [`ForceGenerator`] reads one unit/length pair out of a [`ForceContext`],
//! checks its speed gate, and turns a mass-aware magnitude into a force. The
//! two kinds differ only in how that final vector is built, so they share one
//! record and dispatch on [`ForceKind`].

use glam::DVec3;
use serde::{Deserialize, Serialize};

use super::context::{DirectionType, ForceContext};
use crate::error::ConfigurationError;
use crate::numeric::lerp;

/// How a generator turns a unit vector, length and magnitude into a force.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForceKind {
    /// `unit * magnitude`: a steady pull (or push, for negative magnitudes).
    Constant,
    /// `unit * (length * -magnitude)`: opposes the selected motion in
    /// proportion to its speed.
    Drag,
}

impl ForceKind {
    /// Build the force vector for this kind.
    #[must_use]
    pub fn combine(self, unit: DVec3, length: f64, magnitude: f64) -> DVec3 {
        match self {
            Self::Constant => unit * magnitude,
            Self::Drag => unit * (length * -magnitude),
        }
    }
}

/// Base strength of a generator, as a force, an acceleration, or both.
///
/// When both are given the weaker of `force` and `mass * acceleration` wins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BaseMagnitude {
    /// Mass-independent force.
    Force(f64),
    /// Acceleration, scaled by the body's mass.
    Acceleration(f64),
    /// The smaller of a force and a mass-scaled acceleration.
    Lesser {
        /// Force cap.
        force: f64,
        /// Acceleration scaled by mass.
        acceleration: f64,
    },
}

impl BaseMagnitude {
    /// Build from the two optional settings.
    ///
    /// # Errors
    /// Returns [`ConfigurationError::MissingMagnitude`] when both are `None`.
    pub fn from_parts(
        force: Option<f64>,
        acceleration: Option<f64>,
    ) -> Result<Self, ConfigurationError> {
        match (force, acceleration) {
            (Some(force), Some(acceleration)) => Ok(Self::Lesser {
                force,
                acceleration,
            }),
            (Some(force), None) => Ok(Self::Force(force)),
            (None, Some(acceleration)) => Ok(Self::Acceleration(acceleration)),
            (None, None) => Err(ConfigurationError::MissingMagnitude),
        }
    }

    /// Force magnitude for a body of `mass`.
    #[must_use]
    pub fn resolve(self, mass: f64) -> f64 {
        match self {
            Self::Force(force) => force,
            Self::Acceleration(acceleration) => mass * acceleration,
            Self::Lesser {
                force,
                acceleration,
            } => force.min(mass * acceleration),
        }
    }

    /// The configured base force, if any.
    #[must_use]
    pub const fn force(self) -> Option<f64> {
        match self {
            Self::Force(force) | Self::Lesser { force, .. } => Some(force),
            Self::Acceleration(_) => None,
        }
    }

    /// The configured base acceleration, if any.
    #[must_use]
    pub const fn acceleration(self) -> Option<f64> {
        match self {
            Self::Acceleration(acceleration) | Self::Lesser { acceleration, .. } => {
                Some(acceleration)
            }
            Self::Force(_) => None,
        }
    }
}

/// Optional speed window outside of which a generator is inactive.
///
/// Bounds are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SpeedGate {
    /// Only apply while the selected length is below this.
    pub under: Option<f64>,
    /// Only apply while the selected length is above this.
    pub over: Option<f64>,
}

impl SpeedGate {
    /// Whether `length` lies inside the window.
    #[must_use]
    pub fn admits(&self, length: f64) -> bool {
        match (self.under, self.over) {
            (Some(under), Some(over)) => length > over && length < under,
            (Some(under), None) => length < under,
            (None, Some(over)) => length > over,
            (None, None) => true,
        }
    }
}

/// A single force rule evaluated against a [`ForceContext`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceGenerator {
    kind: ForceKind,
    direction: DirectionType,
    magnitude: BaseMagnitude,
    gate: SpeedGate,
}

impl ForceGenerator {
    /// Build a generator from optional base force and acceleration settings.
    ///
    /// # Errors
    /// Returns [`ConfigurationError::MissingMagnitude`] when neither is set.
    pub fn new(
        kind: ForceKind,
        direction: DirectionType,
        base_force: Option<f64>,
        base_acceleration: Option<f64>,
    ) -> Result<Self, ConfigurationError> {
        let magnitude = BaseMagnitude::from_parts(base_force, base_acceleration)?;
        Ok(Self::with_magnitude(kind, direction, magnitude))
    }

    /// Build a generator from an already validated magnitude.
    #[must_use]
    pub const fn with_magnitude(
        kind: ForceKind,
        direction: DirectionType,
        magnitude: BaseMagnitude,
    ) -> Self {
        Self {
            kind,
            direction,
            magnitude,
            gate: SpeedGate {
                under: None,
                over: None,
            },
        }
    }

    /// Constant force of a fixed size.
    #[must_use]
    pub const fn constant_force(direction: DirectionType, force: f64) -> Self {
        Self::with_magnitude(ForceKind::Constant, direction, BaseMagnitude::Force(force))
    }

    /// Constant force sized to give `acceleration` regardless of mass.
    ///
    /// # Examples
    ///
    /// ```
    /// use glam::DVec3;
    /// use pursuit::force::{DirectionType, ForceContext, ForceGenerator};
    /// let pull = ForceGenerator::constant_acceleration(DirectionType::Direction, 20.0);
    /// let ctx = ForceContext::new(DVec3::new(4.0, 0.0, 0.0), DVec3::ZERO, 10.0, 1.0);
    /// assert_eq!(pull.force(&ctx), Some(DVec3::new(200.0, 0.0, 0.0)));
    /// ```
    #[must_use]
    pub const fn constant_acceleration(direction: DirectionType, acceleration: f64) -> Self {
        Self::with_magnitude(
            ForceKind::Constant,
            direction,
            BaseMagnitude::Acceleration(acceleration),
        )
    }

    /// Drag with a fixed force per unit speed.
    #[must_use]
    pub const fn drag_force(direction: DirectionType, force: f64) -> Self {
        Self::with_magnitude(ForceKind::Drag, direction, BaseMagnitude::Force(force))
    }

    /// Drag with a mass-scaled force per unit speed.
    #[must_use]
    pub const fn drag_acceleration(direction: DirectionType, acceleration: f64) -> Self {
        Self::with_magnitude(
            ForceKind::Drag,
            direction,
            BaseMagnitude::Acceleration(acceleration),
        )
    }

    /// Only apply while the selected length is below `speed`.
    #[must_use]
    pub const fn apply_when_under_speed(mut self, speed: f64) -> Self {
        self.gate.under = Some(speed);
        self
    }

    /// Only apply while the selected length is above `speed`.
    #[must_use]
    pub const fn apply_when_over_speed(mut self, speed: f64) -> Self {
        self.gate.over = Some(speed);
        self
    }

    /// Replace the whole speed window.
    #[must_use]
    pub const fn with_speed_gate(mut self, gate: SpeedGate) -> Self {
        self.gate = gate;
        self
    }

    /// Which combination rule this generator uses.
    #[must_use]
    pub const fn kind(&self) -> ForceKind {
        self.kind
    }

    /// Which part of the context this generator acts along.
    #[must_use]
    pub const fn direction(&self) -> DirectionType {
        self.direction
    }

    /// The configured base strength.
    #[must_use]
    pub const fn magnitude(&self) -> BaseMagnitude {
        self.magnitude
    }

    /// The configured speed window.
    #[must_use]
    pub const fn speed_gate(&self) -> SpeedGate {
        self.gate
    }

    /// Resolved force magnitude for a body of `mass`.
    #[must_use]
    pub fn base_force(&self, mass: f64) -> f64 {
        self.magnitude.resolve(mass)
    }

    /// Force this generator contributes, or `None` when its direction or speed
    /// gate rules it out for this context.
    #[must_use]
    pub fn force(&self, context: &ForceContext) -> Option<DVec3> {
        let (unit, length) = self.select(context)?;
        Some(
            self.kind
                .combine(unit, length, self.base_force(context.body_mass)),
        )
    }

    /// Force blended `percent` of the way from this generator toward `upper`.
    ///
    /// Both generators must pass their direction and speed checks, otherwise
    /// no force is produced. The vector is built by this generator's rule from
    /// the linearly interpolated magnitude.
    ///
    /// # Errors
    /// Returns [`ConfigurationError::KindMismatch`] or
    /// [`ConfigurationError::DirectionMismatch`] when the two generators cannot
    /// be blended.
    pub fn force_lerp(
        &self,
        upper: &Self,
        context: &ForceContext,
        percent: f64,
    ) -> Result<Option<DVec3>, ConfigurationError> {
        self.check_blendable(upper)?;
        let Some((unit, length)) = self.select(context) else {
            return Ok(None);
        };
        if upper.select(context).is_none() {
            return Ok(None);
        }
        let magnitude = lerp(
            self.base_force(context.body_mass),
            upper.base_force(context.body_mass),
            percent,
        );
        Ok(Some(self.kind.combine(unit, length, magnitude)))
    }

    /// Check that `upper` shares this generator's kind and direction.
    ///
    /// # Errors
    /// See [`ForceGenerator::force_lerp`].
    pub fn check_blendable(&self, upper: &Self) -> Result<(), ConfigurationError> {
        if self.kind != upper.kind {
            return Err(ConfigurationError::KindMismatch {
                lower: self.kind,
                upper: upper.kind,
            });
        }
        if self.direction != upper.direction {
            return Err(ConfigurationError::DirectionMismatch {
                lower: self.direction,
                upper: upper.direction,
            });
        }
        Ok(())
    }

    fn select(&self, context: &ForceContext) -> Option<(DVec3, f64)> {
        let (unit, length) = context.select(self.direction)?;
        self.gate.admits(length).then_some((unit, length))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn context(offset: DVec3, velocity: DVec3, mass: f64) -> ForceContext {
        ForceContext::new(offset, velocity, mass, 1.0)
    }

    #[test]
    fn missing_magnitude_is_rejected() {
        let result = ForceGenerator::new(ForceKind::Constant, DirectionType::Direction, None, None);
        assert!(matches!(result, Err(ConfigurationError::MissingMagnitude)));
    }

    #[rstest]
    #[case::force_wins(Some(50.0), Some(20.0), 10.0, 50.0)]
    #[case::acceleration_wins(Some(500.0), Some(20.0), 10.0, 200.0)]
    #[case::force_only(Some(7.0), None, 10.0, 7.0)]
    #[case::acceleration_only(None, Some(3.0), 10.0, 30.0)]
    fn lesser_of_force_and_acceleration(
        #[case] force: Option<f64>,
        #[case] acceleration: Option<f64>,
        #[case] mass: f64,
        #[case] expected: f64,
    ) {
        let generator = ForceGenerator::new(
            ForceKind::Constant,
            DirectionType::Direction,
            force,
            acceleration,
        )
        .unwrap_or_else(|e| panic!("valid generator rejected: {e}"));
        assert_relative_eq!(generator.base_force(mass), expected);
    }

    #[rstest]
    #[case::inside_window(3.0, true)]
    #[case::at_lower_bound(1.0, false)]
    #[case::at_upper_bound(5.0, false)]
    #[case::too_fast(6.0, false)]
    fn speed_window_is_open(#[case] speed: f64, #[case] applies: bool) {
        let drag = ForceGenerator::drag_acceleration(DirectionType::VelocityAny, 1.0)
            .apply_when_over_speed(1.0)
            .apply_when_under_speed(5.0);
        let ctx = context(DVec3::X, DVec3::Y * speed, 1.0);
        assert_eq!(drag.force(&ctx).is_some(), applies);
    }

    #[test]
    fn single_sided_gates() {
        let slow_only = ForceGenerator::constant_force(DirectionType::VelocityAny, 1.0)
            .apply_when_under_speed(2.0);
        let fast_only = ForceGenerator::constant_force(DirectionType::VelocityAny, 1.0)
            .apply_when_over_speed(2.0);
        let slow = context(DVec3::X, DVec3::Y, 1.0);
        let fast = context(DVec3::X, DVec3::Y * 3.0, 1.0);
        assert!(slow_only.force(&slow).is_some());
        assert!(slow_only.force(&fast).is_none());
        assert!(fast_only.force(&slow).is_none());
        assert!(fast_only.force(&fast).is_some());
    }

    #[test]
    fn drag_scales_with_speed_and_opposes_it() {
        let drag = ForceGenerator::drag_acceleration(DirectionType::VelocityAny, 2.0);
        let ctx = context(DVec3::X, DVec3::new(0.0, 3.0, 4.0), 1.5);
        let force = drag
            .force(&ctx)
            .unwrap_or_else(|| panic!("ungated drag should apply"));
        // |v| = 5, magnitude = 1.5 * 2 = 3
        assert_relative_eq!(force.length(), 15.0, epsilon = 1e-9);
        assert!(force.dot(ctx.velocity_unit) < 0.0);
    }

    #[test]
    fn lerp_rejects_mismatched_generators() {
        let ctx = context(DVec3::X, DVec3::ZERO, 1.0);
        let constant = ForceGenerator::constant_force(DirectionType::Direction, 1.0);
        let drag = ForceGenerator::drag_force(DirectionType::Direction, 1.0);
        let orth = ForceGenerator::constant_force(DirectionType::VelocityOrth, 1.0);
        assert!(matches!(
            constant.force_lerp(&drag, &ctx, 0.5),
            Err(ConfigurationError::KindMismatch { .. })
        ));
        assert!(matches!(
            constant.force_lerp(&orth, &ctx, 0.5),
            Err(ConfigurationError::DirectionMismatch { .. })
        ));
    }

    #[test]
    fn lerp_respects_upper_gate() {
        let ctx = context(DVec3::X, DVec3::X * 4.0, 1.0);
        let lower = ForceGenerator::drag_force(DirectionType::VelocityAlong, 1.0);
        let upper =
            ForceGenerator::drag_force(DirectionType::VelocityAlong, 2.0).apply_when_under_speed(1.0);
        let blended = lower
            .force_lerp(&upper, &ctx, 0.5)
            .unwrap_or_else(|e| panic!("blend rejected: {e}"));
        assert_eq!(blended, None);
    }
}
