//! A minimal rigid-body integrator for exercising controllers end to end.
//!
//! Bodies integrate with semi-implicit Euler. Each frame is split into
//! substeps and every body raises its force event once per substep, the way a
//! full engine calls back into force providers.

use std::cell::RefCell;
use std::rc::Rc;

use glam::{DQuat, DVec3};

use crate::body::{ForceEvent, PhysicsBody};
use crate::constants::{DEFAULT_MASS, DEFAULT_SUBSTEPS};
use crate::physics::{angular_acceleration, applied_acceleration, torque_at};
use crate::registry::TrackedObject;

/// A rigid body with a scalar moment of inertia.
#[derive(Debug)]
pub struct RigidBody {
    position: DVec3,
    orientation: DQuat,
    velocity: DVec3,
    angular_velocity: DVec3,
    mass: f64,
    moment_of_inertia: f64,
    force: DVec3,
    torque: DVec3,
    events: ForceEvent,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::new(DVec3::ZERO, DEFAULT_MASS)
    }
}

impl RigidBody {
    /// A body at rest at `position`, with unit moment of inertia.
    #[must_use]
    pub fn new(position: DVec3, mass: f64) -> Self {
        Self {
            position,
            orientation: DQuat::IDENTITY,
            velocity: DVec3::ZERO,
            angular_velocity: DVec3::ZERO,
            mass,
            moment_of_inertia: 1.0,
            force: DVec3::ZERO,
            torque: DVec3::ZERO,
            events: ForceEvent::new(),
        }
    }

    /// A solid sphere of `radius` at rest at `position`.
    #[must_use]
    pub fn sphere(position: DVec3, radius: f64, mass: f64) -> Self {
        Self::new(position, mass).with_moment_of_inertia(0.4 * mass * radius * radius)
    }

    /// Start moving with `velocity`.
    #[must_use]
    pub const fn with_velocity(mut self, velocity: DVec3) -> Self {
        self.velocity = velocity;
        self
    }

    /// Start rotated by `orientation`.
    #[must_use]
    pub fn with_orientation(mut self, orientation: DQuat) -> Self {
        self.orientation = orientation.normalize();
        self
    }

    /// Override the moment of inertia.
    #[must_use]
    pub const fn with_moment_of_inertia(mut self, moment_of_inertia: f64) -> Self {
        self.moment_of_inertia = moment_of_inertia;
        self
    }

    /// The body's per-step force event.
    #[must_use]
    pub const fn force_event(&self) -> &ForceEvent {
        &self.events
    }

    /// Current orientation.
    #[must_use]
    pub const fn orientation(&self) -> DQuat {
        self.orientation
    }

    /// Current angular velocity.
    #[must_use]
    pub const fn angular_velocity(&self) -> DVec3 {
        self.angular_velocity
    }

    /// Force gathered since the last integration.
    #[must_use]
    pub const fn accumulated_force(&self) -> DVec3 {
        self.force
    }

    /// Torque gathered since the last integration.
    #[must_use]
    pub const fn accumulated_torque(&self) -> DVec3 {
        self.torque
    }

    /// Ask every subscribed handler for its forces.
    pub fn apply_forces(&mut self) {
        let events = self.events.clone();
        events.raise(self);
    }

    /// Advance by `dt` under the accumulated force plus `gravity`, then clear
    /// the accumulators.
    pub fn integrate(&mut self, dt: f64, gravity: DVec3) {
        let linear = applied_acceleration(self.force, Some(self.mass)).unwrap_or(DVec3::ZERO);
        self.velocity += (linear + gravity) * dt;
        self.position += self.velocity * dt;

        if let Some(angular) = angular_acceleration(self.torque, self.moment_of_inertia) {
            self.angular_velocity += angular * dt;
        }
        let spin = DQuat::from_scaled_axis(self.angular_velocity * dt);
        self.orientation = (spin * self.orientation).normalize();

        self.force = DVec3::ZERO;
        self.torque = DVec3::ZERO;
    }
}

impl PhysicsBody for RigidBody {
    fn position(&self) -> DVec3 {
        self.position
    }

    fn velocity(&self) -> DVec3 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: DVec3) {
        self.velocity = velocity;
    }

    fn mass(&self) -> f64 {
        self.mass
    }

    fn position_to_world(&self, local: DVec3) -> DVec3 {
        self.position + self.orientation * local
    }

    fn add_force(&mut self, force: DVec3) {
        self.force += force;
    }

    fn add_force_at_point(&mut self, force: DVec3, point: DVec3) {
        self.force += force;
        self.torque += torque_at(force, point, self.position);
    }
}

/// A body shared between the world and whoever tracks it.
pub type SharedBody = Rc<RefCell<RigidBody>>;

/// Steps a set of bodies with a fixed number of substeps per frame.
#[derive(Debug)]
pub struct PhysicsWorld {
    bodies: Vec<SharedBody>,
    substeps: u32,
    gravity: DVec3,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsWorld {
    /// An empty, gravity-free world.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bodies: Vec::new(),
            substeps: DEFAULT_SUBSTEPS,
            gravity: DVec3::ZERO,
        }
    }

    /// Split each frame into `substeps` integration steps (at least one).
    #[must_use]
    pub fn with_substeps(mut self, substeps: u32) -> Self {
        self.substeps = substeps.max(1);
        self
    }

    /// Apply a constant acceleration to every body.
    #[must_use]
    pub fn with_gravity(mut self, gravity: DVec3) -> Self {
        self.gravity = gravity;
        self
    }

    /// Add `body` and return the shared handle to it.
    pub fn add_body(&mut self, body: RigidBody) -> SharedBody {
        let shared = Rc::new(RefCell::new(body));
        self.bodies.push(Rc::clone(&shared));
        shared
    }

    /// Every body in insertion order.
    #[must_use]
    pub fn bodies(&self) -> &[SharedBody] {
        &self.bodies
    }

    /// Substeps per frame.
    #[must_use]
    pub const fn substeps(&self) -> u32 {
        self.substeps
    }

    /// Advance every body by `dt`.
    pub fn step(&self, dt: f64) {
        let substep = dt / f64::from(self.substeps);
        for _ in 0..self.substeps {
            for body in &self.bodies {
                let mut current = body.borrow_mut();
                current.apply_forces();
                current.integrate(substep, self.gravity);
            }
        }
    }
}

/// A simulated body tracked by radius, for use with a
/// [`ConstraintRegistry`](crate::registry::ConstraintRegistry).
#[derive(Debug, Clone)]
pub struct SimObject {
    body: SharedBody,
    radius: f64,
}

impl SimObject {
    /// Track `body` with the given radius.
    #[must_use]
    pub const fn new(body: SharedBody, radius: f64) -> Self {
        Self { body, radius }
    }

    /// The underlying body.
    #[must_use]
    pub const fn body(&self) -> &SharedBody {
        &self.body
    }
}

impl TrackedObject for SimObject {
    fn force_event(&self) -> ForceEvent {
        self.body.borrow().force_event().clone()
    }

    fn position_world(&self) -> DVec3 {
        self.body.borrow().position()
    }

    fn radius(&self) -> f64 {
        self.radius
    }
}
