//! Distance-dependent blending between force generators.
//!
//! A [`Gradient`] holds ordered stops, each pairing a distance with a
//! generator. For a given distance to the target it finds the two stops that
//! bracket it and blends their magnitudes linearly.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use super::context::{DirectionType, ForceContext};
use super::generator::{ForceGenerator, ForceKind};
use crate::error::ConfigurationError;
use crate::numeric::percent_between;

/// A distance given either outright or as a multiple of the body's radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceSpec {
    /// Absolute distance in world units.
    Absolute(f64),
    /// Multiple of the body radius.
    RadiusMultiple(f64),
}

impl DistanceSpec {
    /// Open-ended last stop: every finite distance lies below it.
    pub const UNBOUNDED: Self = Self::Absolute(f64::MAX);

    /// Distance in world units for a body of `radius`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pursuit::force::DistanceSpec;
    /// assert_eq!(DistanceSpec::Absolute(3.0).resolve(2.0), 3.0);
    /// assert_eq!(DistanceSpec::RadiusMultiple(3.0).resolve(2.0), 6.0);
    /// ```
    #[must_use]
    pub fn resolve(self, radius: f64) -> f64 {
        match self {
            Self::Absolute(value) => value,
            Self::RadiusMultiple(multiple) => radius * multiple,
        }
    }

    /// Whether the distance scales with the body radius.
    #[must_use]
    pub const fn is_relative(self) -> bool {
        matches!(self, Self::RadiusMultiple(_))
    }

    fn raw(self) -> f64 {
        match self {
            Self::Absolute(value) | Self::RadiusMultiple(value) => value,
        }
    }
}

/// One (distance, generator) pair in a [`Gradient`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    /// Where this stop sits.
    pub distance: DistanceSpec,
    /// Generator in effect at that distance.
    pub generator: ForceGenerator,
}

impl GradientStop {
    /// Pair a distance with a generator.
    #[must_use]
    pub const fn new(distance: DistanceSpec, generator: ForceGenerator) -> Self {
        Self {
            distance,
            generator,
        }
    }
}

/// Ordered stops of one generator kind, blended by distance to the target.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    stops: Vec<GradientStop>,
}

impl Gradient {
    /// Validate and build a gradient.
    ///
    /// Stops whose distances can be compared without knowing the body radius
    /// (both absolute, or both radius multiples) must not descend. Mixed pairs
    /// are checked by [`Gradient::check_order`] once the radius is known.
    ///
    /// # Errors
    /// Returns [`ConfigurationError::TooFewStops`],
    /// [`ConfigurationError::MixedStopKinds`],
    /// [`ConfigurationError::MixedStopDirections`] or
    /// [`ConfigurationError::UnorderedStops`].
    pub fn new(stops: Vec<GradientStop>) -> Result<Self, ConfigurationError> {
        let Some(first) = stops.first() else {
            return Err(ConfigurationError::TooFewStops { count: 0 });
        };
        if stops.len() < 2 {
            return Err(ConfigurationError::TooFewStops { count: stops.len() });
        }
        let expected_kind = first.generator.kind();
        let expected_direction = first.generator.direction();

        for (index, stop) in stops.iter().enumerate().skip(1) {
            let found = stop.generator.kind();
            if found != expected_kind {
                return Err(ConfigurationError::MixedStopKinds {
                    index,
                    expected: expected_kind,
                    found,
                });
            }
            let direction = stop.generator.direction();
            if direction != expected_direction {
                return Err(ConfigurationError::MixedStopDirections {
                    index,
                    expected: expected_direction,
                    found: direction,
                });
            }
        }

        for (index, pair) in stops.windows(2).enumerate() {
            let [lower, upper] = pair else { continue };
            if lower.distance.is_relative() == upper.distance.is_relative()
                && upper.distance.raw() < lower.distance.raw()
            {
                return Err(ConfigurationError::UnorderedStops {
                    index: index + 1,
                    previous: lower.distance.raw(),
                    distance: upper.distance.raw(),
                });
            }
        }

        Ok(Self { stops })
    }

    /// Build from stops known to satisfy [`Gradient::new`]'s checks.
    pub(crate) const fn from_stops_unchecked(stops: Vec<GradientStop>) -> Self {
        Self { stops }
    }

    /// Check that the stops ascend once resolved against `radius`.
    ///
    /// # Errors
    /// Returns [`ConfigurationError::UnorderedStops`] for the first descending
    /// pair.
    pub fn check_order(&self, radius: f64) -> Result<(), ConfigurationError> {
        for (index, pair) in self.stops.windows(2).enumerate() {
            let [lower, upper] = pair else { continue };
            let previous = lower.distance.resolve(radius);
            let distance = upper.distance.resolve(radius);
            if distance < previous {
                return Err(ConfigurationError::UnorderedStops {
                    index: index + 1,
                    previous,
                    distance,
                });
            }
        }
        Ok(())
    }

    /// The stops in order.
    #[must_use]
    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    /// Generator kind shared by every stop.
    #[must_use]
    pub fn kind(&self) -> ForceKind {
        self.stops
            .first()
            .map_or(ForceKind::Constant, |stop| stop.generator.kind())
    }

    /// Direction type shared by every stop.
    #[must_use]
    pub fn direction(&self) -> DirectionType {
        self.stops
            .first()
            .map_or(DirectionType::Direction, |stop| stop.generator.direction())
    }

    /// Blended force for this context, or `None` when the distance to the
    /// target falls outside every bracket or the bracketing stops are gated
    /// off.
    ///
    /// Stops are walked pairwise; a descending pair ends the walk.
    ///
    /// # Examples
    ///
    /// ```
    /// use glam::DVec3;
    /// use pursuit::force::{DirectionType, DistanceSpec, ForceContext, ForceGenerator, Gradient, GradientStop};
    /// let gradient = Gradient::new(vec![
    ///     GradientStop::new(DistanceSpec::Absolute(0.0), ForceGenerator::constant_force(DirectionType::Direction, 10.0)),
    ///     GradientStop::new(DistanceSpec::Absolute(2.0), ForceGenerator::constant_force(DirectionType::Direction, 30.0)),
    /// ])?;
    /// let ctx = ForceContext::new(DVec3::new(0.0, 1.0, 0.0), DVec3::ZERO, 1.0, 1.0);
    /// assert_eq!(gradient.force(&ctx), Some(DVec3::new(0.0, 20.0, 0.0)));
    /// # Ok::<(), pursuit::ConfigurationError>(())
    /// ```
    #[must_use]
    pub fn force(&self, context: &ForceContext) -> Option<DVec3> {
        let distance = context.direction_length;
        for pair in self.stops.windows(2) {
            let [lower, upper] = pair else { continue };
            let from = lower.distance.resolve(context.body_radius);
            let to = upper.distance.resolve(context.body_radius);
            if to < from || distance < from {
                return None;
            }
            if distance <= to {
                let percent = percent_between(distance, from, to);
                return lower
                    .generator
                    .force_lerp(&upper.generator, context, percent)
                    .ok()
                    .flatten();
            }
        }
        None
    }
}
