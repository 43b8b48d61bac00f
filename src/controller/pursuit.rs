//! Force-based pursuit.

use std::cell::Cell;
use std::rc::Rc;

use glam::DVec3;
use log::{debug, warn};

use super::{check_limit, Chase};
use crate::body::{ForceEvent, ForceHandler, PhysicsBody, Subscription};
use crate::error::ConfigurationError;
use crate::force::{sum_forces, ForceContext, ForceTerm};
use crate::vector_math::clamp_length;

/// How a [`PursuitController`] builds and applies its force.
#[derive(Debug, Clone, PartialEq)]
pub struct PursuitSettings {
    /// Terms summed each callback.
    pub generators: Vec<ForceTerm>,
    /// Body-local anchor offset; the anchor is where distance is measured
    /// from and, with torque enabled, where the force is applied.
    pub offset_from_body: DVec3,
    /// Apply the force at the anchor rather than the centre of mass.
    pub causes_torque: bool,
    /// Radius used to resolve radius-relative gradient stops.
    pub body_radius: f64,
    /// Upper bound on the summed force's magnitude.
    pub max_force: Option<f64>,
    /// Upper bound on the summed force's magnitude, per unit mass.
    pub max_acceleration: Option<f64>,
}

impl Default for PursuitSettings {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl PursuitSettings {
    /// Settings with the given terms, no offset, no torque and no limits.
    #[must_use]
    pub fn new(generators: Vec<ForceTerm>) -> Self {
        Self {
            generators,
            offset_from_body: DVec3::ZERO,
            causes_torque: false,
            body_radius: 0.0,
            max_force: None,
            max_acceleration: None,
        }
    }

    /// Set the radius used for radius-relative distances.
    #[must_use]
    pub fn with_body_radius(mut self, radius: f64) -> Self {
        self.body_radius = radius;
        self
    }

    /// Measure from, and push at, a body-local offset.
    #[must_use]
    pub fn with_offset(mut self, offset: DVec3, causes_torque: bool) -> Self {
        self.offset_from_body = offset;
        self.causes_torque = causes_torque;
        self
    }

    /// Cap the summed force.
    #[must_use]
    pub fn with_limits(
        mut self,
        max_force: Option<f64>,
        max_acceleration: Option<f64>,
    ) -> Self {
        self.max_force = max_force;
        self.max_acceleration = max_acceleration;
        self
    }

    /// The tighter of the two limits for a body of `mass`, if any is set.
    #[must_use]
    pub fn force_limit(&self, mass: f64) -> Option<f64> {
        let from_acceleration = self.max_acceleration.map(|accel| accel * mass);
        match (self.max_force, from_acceleration) {
            (Some(force), Some(accel)) => Some(force.min(accel)),
            (limit @ Some(_), None) | (None, limit @ Some(_)) => limit,
            (None, None) => None,
        }
    }
}

#[derive(Debug)]
struct PursuitCore {
    target: Cell<Option<DVec3>>,
    settings: PursuitSettings,
}

impl ForceHandler for PursuitCore {
    fn apply_forces(&self, body: &mut dyn PhysicsBody) {
        let Some(target) = self.target.get() else {
            return;
        };
        let anchor = body.position_to_world(self.settings.offset_from_body);
        let mass = body.mass();
        let context = ForceContext::new(
            target - anchor,
            body.velocity(),
            mass,
            self.settings.body_radius,
        );

        let mut force = sum_forces(&self.settings.generators, &context);
        if let Some(limit) = self.settings.force_limit(mass) {
            force = clamp_length(force, limit);
        }
        if force == DVec3::ZERO {
            return;
        }

        if self.settings.causes_torque {
            body.add_force_at_point(force, anchor);
        } else {
            body.add_force(force);
        }
    }
}

/// Steers a body toward its target by applying the sum of its force terms
/// on every physics step.
#[derive(Debug)]
pub struct PursuitController {
    core: Rc<PursuitCore>,
    subscription: Option<Subscription>,
}

impl PursuitController {
    /// Validate `settings` and hook the body's force event.
    ///
    /// The controller starts without a target.
    ///
    /// # Errors
    /// Returns [`ConfigurationError::InvalidBodyRadius`] for a negative or
    /// non-finite radius, [`ConfigurationError::InvalidLimit`] for a negative
    /// or non-finite force or acceleration cap, and
    /// [`ConfigurationError::UnorderedStops`] when a gradient's stops descend
    /// once resolved against that radius.
    pub fn new(events: &ForceEvent, settings: PursuitSettings) -> Result<Self, ConfigurationError> {
        let radius = settings.body_radius;
        if !radius.is_finite() || radius < 0.0 {
            return Err(ConfigurationError::InvalidBodyRadius(radius));
        }
        check_limit("max_force", settings.max_force)?;
        check_limit("max_acceleration", settings.max_acceleration)?;
        for term in &settings.generators {
            term.check_order(radius)?;
        }
        if settings.generators.is_empty() {
            warn!("pursuit controller created without force terms; it will never move its body");
        }

        let term_count = settings.generators.len();
        let core = Rc::new(PursuitCore {
            target: Cell::new(None),
            settings,
        });
        let handler: Rc<dyn ForceHandler> = core.clone();
        let subscription = events.subscribe(handler);
        debug!("pursuit controller hooked with {term_count} force terms");

        Ok(Self {
            core,
            subscription: Some(subscription),
        })
    }

    /// The settings this controller was built with.
    #[must_use]
    pub fn settings(&self) -> &PursuitSettings {
        &self.core.settings
    }

    /// Whether the controller is still hooked to its body.
    #[must_use]
    pub fn is_subscribed(&self) -> bool {
        self.subscription
            .as_ref()
            .is_some_and(Subscription::is_active)
    }
}

impl Chase for PursuitController {
    fn set_target(&mut self, target: DVec3) {
        self.core.target.set(Some(target));
    }

    fn stop_chasing(&mut self) {
        self.core.target.set(None);
    }

    fn target(&self) -> Option<DVec3> {
        self.core.target.get()
    }

    fn dispose(&mut self) {
        self.core.target.set(None);
        if let Some(subscription) = self.subscription.take() {
            subscription.cancel();
            debug!("pursuit controller unhooked");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::force::{DirectionType, ForceGenerator};
    use rstest::rstest;

    fn pull(acceleration: f64) -> ForceTerm {
        ForceGenerator::constant_acceleration(DirectionType::Direction, acceleration).into()
    }

    #[test]
    fn tighter_limit_wins() {
        let settings = PursuitSettings::new(Vec::new()).with_limits(Some(50.0), Some(2.0));
        assert_eq!(settings.force_limit(10.0), Some(20.0));
        assert_eq!(settings.force_limit(100.0), Some(50.0));
        assert_eq!(PursuitSettings::default().force_limit(1.0), None);
    }

    #[test]
    fn negative_radius_is_rejected() {
        let events = ForceEvent::new();
        let settings = PursuitSettings::new(vec![pull(1.0)]).with_body_radius(-1.0);
        assert!(matches!(
            PursuitController::new(&events, settings),
            Err(ConfigurationError::InvalidBodyRadius(_))
        ));
        assert_eq!(events.subscriber_count(), 0);
    }

    #[rstest]
    #[case::negative_force(Some(-5.0), None)]
    #[case::nan_force(Some(f64::NAN), None)]
    #[case::negative_acceleration(None, Some(-1.0))]
    #[case::infinite_acceleration(None, Some(f64::INFINITY))]
    fn bad_limits_are_rejected(#[case] max_force: Option<f64>, #[case] max_acceleration: Option<f64>) {
        let events = ForceEvent::new();
        let settings = PursuitSettings::new(vec![pull(1.0)]).with_limits(max_force, max_acceleration);
        assert!(matches!(
            PursuitController::new(&events, settings),
            Err(ConfigurationError::InvalidLimit { .. })
        ));
        assert_eq!(events.subscriber_count(), 0);
    }

    #[test]
    fn zero_limit_is_accepted() {
        let events = ForceEvent::new();
        let settings = PursuitSettings::new(vec![pull(1.0)]).with_limits(Some(0.0), None);
        assert!(PursuitController::new(&events, settings).is_ok());
    }

    #[test]
    fn dispose_is_idempotent() {
        let events = ForceEvent::new();
        let mut controller = PursuitController::new(&events, PursuitSettings::new(vec![pull(1.0)]))
            .unwrap_or_else(|e| panic!("controller rejected: {e}"));
        controller.set_target(DVec3::ONE);
        assert!(controller.is_subscribed());

        controller.dispose();
        controller.dispose();
        assert!(!controller.is_subscribed());
        assert_eq!(controller.target(), None);
        assert_eq!(events.subscriber_count(), 0);
    }

    #[test]
    fn dropping_controller_unhooks_it() {
        let events = ForceEvent::new();
        let controller = PursuitController::new(&events, PursuitSettings::new(vec![pull(1.0)]))
            .unwrap_or_else(|e| panic!("controller rejected: {e}"));
        assert_eq!(events.subscriber_count(), 1);
        drop(controller);
        assert_eq!(events.subscriber_count(), 0);
    }
}
