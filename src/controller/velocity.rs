//! Direct velocity assignment toward a target.
//!
//! A proportional-only controller with no damping: responsive, but it
//! bypasses force integration, so collisions cannot deflect the body while it
//! is chasing. Suited to camera-follow style chasing.

use std::cell::Cell;
use std::rc::Rc;

use glam::DVec3;
use log::debug;

use super::{check_limit, Chase};
use crate::body::{ForceEvent, ForceHandler, PhysicsBody, Subscription};
use crate::error::ConfigurationError;
use crate::vector_math::clamp_length;

/// How a [`VelocityController`] turns the offset to its target into a
/// velocity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VelocitySettings {
    /// Body-local point the offset is measured from.
    pub offset_from_body: DVec3,
    /// Velocity per unit of distance to the target.
    pub multiplier: f64,
    /// Optional speed cap.
    pub max_velocity: Option<f64>,
}

impl VelocitySettings {
    /// Uncapped settings measuring from the centre of mass.
    #[must_use]
    pub const fn new(multiplier: f64) -> Self {
        Self {
            offset_from_body: DVec3::ZERO,
            multiplier,
            max_velocity: None,
        }
    }

    /// Cap the assigned speed.
    #[must_use]
    pub const fn with_max_velocity(mut self, max_velocity: f64) -> Self {
        self.max_velocity = Some(max_velocity);
        self
    }

    /// Measure from a body-local offset.
    #[must_use]
    pub const fn with_offset(mut self, offset: DVec3) -> Self {
        self.offset_from_body = offset;
        self
    }

    /// Velocity to assign for an anchor-to-target offset.
    ///
    /// # Examples
    ///
    /// ```
    /// use glam::DVec3;
    /// use pursuit::controller::VelocitySettings;
    /// let settings = VelocitySettings::new(20.0).with_max_velocity(10.0);
    /// let velocity = settings.desired_velocity(DVec3::new(3.0, 4.0, 0.0));
    /// assert!((velocity - DVec3::new(6.0, 8.0, 0.0)).length() < 1e-9);
    /// ```
    #[must_use]
    pub fn desired_velocity(&self, target_offset: DVec3) -> DVec3 {
        let desired = target_offset * self.multiplier;
        self.max_velocity
            .map_or(desired, |max_velocity| clamp_length(desired, max_velocity))
    }
}

#[derive(Debug)]
struct VelocityCore {
    target: Cell<Option<DVec3>>,
    settings: VelocitySettings,
}

impl ForceHandler for VelocityCore {
    fn apply_forces(&self, body: &mut dyn PhysicsBody) {
        let Some(target) = self.target.get() else {
            return;
        };
        let anchor = body.position_to_world(self.settings.offset_from_body);
        body.set_velocity(self.settings.desired_velocity(target - anchor));
    }
}

/// Chases a target by overwriting the body's velocity each physics step.
#[derive(Debug)]
pub struct VelocityController {
    core: Rc<VelocityCore>,
    subscription: Option<Subscription>,
}

impl VelocityController {
    /// Hook the body's force event. The controller starts without a target.
    ///
    /// # Errors
    /// Returns [`ConfigurationError::InvalidLimit`] for a negative or
    /// non-finite speed cap.
    pub fn new(events: &ForceEvent, settings: VelocitySettings) -> Result<Self, ConfigurationError> {
        check_limit("max_velocity", settings.max_velocity)?;
        let core = Rc::new(VelocityCore {
            target: Cell::new(None),
            settings,
        });
        let handler: Rc<dyn ForceHandler> = core.clone();
        let subscription = events.subscribe(handler);
        debug!(
            "velocity controller hooked (multiplier {}, cap {:?})",
            settings.multiplier, settings.max_velocity
        );
        Ok(Self {
            core,
            subscription: Some(subscription),
        })
    }

    /// The settings this controller was built with.
    #[must_use]
    pub fn settings(&self) -> VelocitySettings {
        self.core.settings
    }

    /// Whether the controller is still hooked to its body.
    #[must_use]
    pub fn is_subscribed(&self) -> bool {
        self.subscription
            .as_ref()
            .is_some_and(Subscription::is_active)
    }
}

impl Chase for VelocityController {
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
            debug!("velocity controller unhooked");
        }
    }
}
