//! Stand-in bodies and tracked objects.

use std::cell::Cell;
use std::rc::Rc;

use glam::DVec3;
use pursuit::{ForceEvent, PhysicsBody, TrackedObject};

/// A body that records every force applied to it instead of integrating.
#[derive(Debug, Default, Clone)]
pub struct RecordingBody {
    /// Centre of mass.
    pub position: DVec3,
    /// Linear velocity; overwritten by velocity controllers.
    pub velocity: DVec3,
    /// Mass reported to controllers.
    pub mass: f64,
    /// Forces applied through the centre of mass.
    pub forces: Vec<DVec3>,
    /// Forces applied at a point, with the point.
    pub forces_at: Vec<(DVec3, DVec3)>,
}

impl RecordingBody {
    /// A unit-mass body at rest at `position`.
    ///
    /// # Examples
    /// ```
    /// use glam::DVec3;
    /// use test_utils::RecordingBody;
    /// let body = RecordingBody::at(DVec3::X);
    /// assert_eq!(body.total_force(), DVec3::ZERO);
    /// ```
    pub fn at(position: DVec3) -> Self {
        Self {
            position,
            mass: 1.0,
            ..Self::default()
        }
    }

    /// Replace the mass.
    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }

    /// Replace the velocity.
    pub fn with_velocity(mut self, velocity: DVec3) -> Self {
        self.velocity = velocity;
        self
    }

    /// Sum of every recorded force, wherever it was applied.
    pub fn total_force(&self) -> DVec3 {
        self.forces
            .iter()
            .copied()
            .chain(self.forces_at.iter().map(|(force, _)| *force))
            .fold(DVec3::ZERO, |total, force| total + force)
    }

    /// Forget recorded forces.
    pub fn clear(&mut self) {
        self.forces.clear();
        self.forces_at.clear();
    }
}

impl PhysicsBody for RecordingBody {
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
        self.position + local
    }

    fn add_force(&mut self, force: DVec3) {
        self.forces.push(force);
    }

    fn add_force_at_point(&mut self, force: DVec3, point: DVec3) {
        self.forces_at.push((force, point));
    }
}

/// A tracked object whose position tests move by hand.
#[derive(Debug)]
pub struct TestObject {
    events: ForceEvent,
    position: Cell<DVec3>,
    radius: f64,
}

impl TestObject {
    /// A shared object at `position`.
    pub fn shared(position: DVec3, radius: f64) -> Rc<Self> {
        Rc::new(Self {
            events: ForceEvent::new(),
            position: Cell::new(position),
            radius,
        })
    }

    /// Teleport the object.
    pub fn move_to(&self, position: DVec3) {
        self.position.set(position);
    }

    /// The object's force event, for raising by hand.
    pub fn events(&self) -> &ForceEvent {
        &self.events
    }
}

impl TrackedObject for TestObject {
    fn force_event(&self) -> ForceEvent {
        self.events.clone()
    }

    fn position_world(&self) -> DVec3 {
        self.position.get()
    }

    fn radius(&self) -> f64 {
        self.radius
    }
}
