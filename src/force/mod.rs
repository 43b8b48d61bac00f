//! Force generators, gradients and the per-tick context they read.
//!
//! A controller owns a list of [`ForceTerm`]s. Each term is either a single
//! [`ForceGenerator`] or a [`Gradient`] blending several of them by distance.

use glam::DVec3;

use crate::error::ConfigurationError;

pub mod context;
pub mod generator;
pub mod gradient;

pub use context::{DirectionType, ForceContext};
pub use generator::{BaseMagnitude, ForceGenerator, ForceKind, SpeedGate};
pub use gradient::{DistanceSpec, Gradient, GradientStop};

/// One contribution to a controller's summed force.
#[derive(Debug, Clone, PartialEq)]
pub enum ForceTerm {
    /// A single generator.
    Generator(ForceGenerator),
    /// A distance-blended set of generators.
    Gradient(Gradient),
}

impl ForceTerm {
    /// Force contributed for this context, if any.
    #[must_use]
    pub fn force(&self, context: &ForceContext) -> Option<DVec3> {
        match self {
            Self::Generator(generator) => generator.force(context),
            Self::Gradient(gradient) => gradient.force(context),
        }
    }

    /// Check that any gradient stops ascend for a body of `radius`.
    ///
    /// # Errors
    /// Propagates [`Gradient::check_order`].
    pub fn check_order(&self, radius: f64) -> Result<(), ConfigurationError> {
        match self {
            Self::Generator(_) => Ok(()),
            Self::Gradient(gradient) => gradient.check_order(radius),
        }
    }
}

impl From<ForceGenerator> for ForceTerm {
    fn from(generator: ForceGenerator) -> Self {
        Self::Generator(generator)
    }
}

impl From<Gradient> for ForceTerm {
    fn from(gradient: Gradient) -> Self {
        Self::Gradient(gradient)
    }
}

/// Sum every term's contribution.
///
/// Terms that produce no force are skipped.
#[must_use]
pub fn sum_forces(terms: &[ForceTerm], context: &ForceContext) -> DVec3 {
    terms
        .iter()
        .filter_map(|term| term.force(context))
        .fold(DVec3::ZERO, |total, force| total + force)
}
