//! The physics-body boundary and its per-step "apply forces" event.
//!
//! Controllers never own bodies. They subscribe a [`ForceHandler`] to the
//! body's [`ForceEvent`] and hold the returned [`Subscription`]; dropping or
//! cancelling the subscription removes the handler before the body can go
//! away.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use glam::DVec3;
use log::warn;

/// What controllers need from a simulated body.
pub trait PhysicsBody {
    /// Centre of mass in world space.
    fn position(&self) -> DVec3;
    /// Linear velocity.
    fn velocity(&self) -> DVec3;
    /// Overwrite the linear velocity.
    fn set_velocity(&mut self, velocity: DVec3);
    /// Mass of the body.
    fn mass(&self) -> f64;
    /// Transform a body-local point into world space.
    fn position_to_world(&self, local: DVec3) -> DVec3;
    /// Apply a force through the centre of mass for this step.
    fn add_force(&mut self, force: DVec3);
    /// Apply a force at a world-space point, producing torque.
    fn add_force_at_point(&mut self, force: DVec3, point: DVec3);
}

/// Callback run each time the physics engine asks a body for its forces.
pub trait ForceHandler {
    /// Contribute forces (or velocity changes) to `body` for this step.
    fn apply_forces(&self, body: &mut dyn PhysicsBody);
}

type HandlerId = u64;

#[derive(Default)]
struct HandlerList {
    next_id: HandlerId,
    entries: Vec<(HandlerId, Rc<dyn ForceHandler>)>,
}

/// A body's subscribable per-step force event.
///
/// Clones share the same handler list.
#[derive(Clone, Default)]
pub struct ForceEvent {
    handlers: Rc<RefCell<HandlerList>>,
}

impl fmt::Debug for ForceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForceEvent")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl ForceEvent {
    /// Create an event with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler`; it stays registered until the returned
    /// [`Subscription`] is dropped or cancelled.
    pub fn subscribe(&self, handler: Rc<dyn ForceHandler>) -> Subscription {
        let mut list = self.handlers.borrow_mut();
        let id = list.next_id;
        list.next_id += 1;
        list.entries.push((id, handler));
        Subscription {
            id,
            handlers: Rc::downgrade(&self.handlers),
        }
    }

    /// Run every subscribed handler against `body`.
    ///
    /// The handler list is not borrowed while a handler runs, so handlers may
    /// drop subscriptions during dispatch. Dispatch resumes from the last id
    /// run, so removals never cause a later handler to be skipped.
    pub fn raise(&self, body: &mut dyn PhysicsBody) {
        let mut last = None;
        while let Some((id, handler)) = self.handler_after(last) {
            handler.apply_forces(body);
            last = Some(id);
        }
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.handlers.borrow().entries.len()
    }

    // Ids only grow, so entries stay sorted by id; `None` sorts before any id.
    fn handler_after(
        &self,
        last: Option<HandlerId>,
    ) -> Option<(HandlerId, Rc<dyn ForceHandler>)> {
        self.handlers
            .borrow()
            .entries
            .iter()
            .find(|(id, _)| Some(*id) > last)
            .map(|(id, handler)| (*id, Rc::clone(handler)))
    }
}

/// Handle to a registered [`ForceHandler`]. Unsubscribes on drop.
#[must_use = "dropping a subscription unsubscribes its handler immediately"]
pub struct Subscription {
    id: HandlerId,
    handlers: Weak<RefCell<HandlerList>>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

impl Subscription {
    /// Unsubscribe now.
    pub fn cancel(self) {
        drop(self);
    }

    /// Whether the handler is still registered with a live event.
    #[must_use]
    pub fn is_active(&self) -> bool {
        let Some(list) = self.handlers.upgrade() else {
            return false;
        };
        let registered = list.borrow().entries.iter().any(|(id, _)| *id == self.id);
        registered
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(list) = self.handlers.upgrade() else {
            return;
        };
        let Ok(mut current) = list.try_borrow_mut() else {
            warn!(
                "force handler {} left subscribed: handler list busy during unsubscribe",
                self.id
            );
            return;
        };
        current.entries.retain(|(id, _)| *id != self.id);
    }
}
