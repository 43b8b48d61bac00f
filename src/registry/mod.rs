//! Keeps tracked objects pinned to a constraint surface.
//!
//! Each tracked object gets its own [`PursuitController`] hooked to its body.
//! Once per frame [`ConstraintRegistry::update`] projects every object onto
//! the surface and points its controller at the projection.

use std::rc::Rc;

use glam::DVec3;
use hashbrown::HashMap;
use log::debug;

use crate::body::ForceEvent;
use crate::constants::ON_SURFACE_EPSILON;
use crate::controller::{Chase, PursuitController, PursuitSettings};
use crate::error::ConfigurationError;
use crate::force::ForceTerm;
use crate::surface::ConstraintSurface;

pub mod defaults;

/// Something placed in the world whose body can be pinned to a surface.
///
/// Registry membership is by `Rc` identity, not by value.
pub trait TrackedObject {
    /// The body's per-step force event.
    fn force_event(&self) -> ForceEvent;
    /// Current world-space position.
    fn position_world(&self) -> DVec3;
    /// Body radius, used to resolve radius-relative gradient stops.
    fn radius(&self) -> f64;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct ObjectKey(*const ());

impl ObjectKey {
    fn of<O: TrackedObject + ?Sized>(object: &Rc<O>) -> Self {
        Self(Rc::as_ptr(object).cast::<()>())
    }
}

struct Entry {
    object: Rc<dyn TrackedObject>,
    controller: PursuitController,
}

/// Template applied to every controller the registry creates.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistrySettings {
    /// Pursuit settings; the body radius is taken from each object instead.
    pub pursuit: PursuitSettings,
    /// Distance under which an object counts as already on the surface.
    pub on_surface_epsilon: f64,
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self::with_terms(defaults::default_plane_terms())
    }
}

impl RegistrySettings {
    /// Settings using `terms` and the default tolerance.
    #[must_use]
    pub fn with_terms(terms: Vec<ForceTerm>) -> Self {
        Self {
            pursuit: PursuitSettings::new(terms),
            on_surface_epsilon: ON_SURFACE_EPSILON,
        }
    }
}

/// Tracks objects and steers each toward its projection on a surface.
pub struct ConstraintRegistry<S: ConstraintSurface> {
    surface: S,
    settings: RegistrySettings,
    entries: HashMap<ObjectKey, Entry>,
}

impl<S: ConstraintSurface> ConstraintRegistry<S> {
    /// Registry using the default plane-pinning terms.
    #[must_use]
    pub fn new(surface: S) -> Self {
        Self::with_settings(surface, RegistrySettings::default())
    }

    /// Registry using custom force terms.
    #[must_use]
    pub fn with_terms(surface: S, terms: Vec<ForceTerm>) -> Self {
        Self::with_settings(surface, RegistrySettings::with_terms(terms))
    }

    /// Registry using a full settings template.
    #[must_use]
    pub fn with_settings(surface: S, settings: RegistrySettings) -> Self {
        Self {
            surface,
            settings,
            entries: HashMap::new(),
        }
    }

    /// Start tracking `object`.
    ///
    /// Returns `Ok(false)` without touching the existing controller when the
    /// object is already tracked.
    ///
    /// # Errors
    /// Propagates [`PursuitController::new`] failures, such as an invalid
    /// object radius.
    pub fn add<O: TrackedObject + 'static>(
        &mut self,
        object: Rc<O>,
    ) -> Result<bool, ConfigurationError> {
        let key = ObjectKey::of(&object);
        if self.entries.contains_key(&key) {
            return Ok(false);
        }
        let settings = self
            .settings
            .pursuit
            .clone()
            .with_body_radius(object.radius());
        let controller = PursuitController::new(&object.force_event(), settings)?;
        self.entries.insert(key, Entry { object, controller });
        debug!("tracking object {:p}; {} tracked", key.0, self.entries.len());
        Ok(true)
    }

    /// Stop tracking `object`, disposing its controller.
    ///
    /// Returns whether the object was tracked.
    pub fn remove<O: TrackedObject + ?Sized>(&mut self, object: &Rc<O>) -> bool {
        let key = ObjectKey::of(object);
        let Some(mut entry) = self.entries.remove(&key) else {
            return false;
        };
        entry.controller.dispose();
        debug!("stopped tracking object {:p}; {} tracked", key.0, self.entries.len());
        true
    }

    /// Whether `object` is tracked.
    #[must_use]
    pub fn contains<O: TrackedObject + ?Sized>(&self, object: &Rc<O>) -> bool {
        self.entries.contains_key(&ObjectKey::of(object))
    }

    /// The controller steering `object`, if tracked.
    #[must_use]
    pub fn controller<O: TrackedObject + ?Sized>(&self, object: &Rc<O>) -> Option<&PursuitController> {
        self.entries
            .get(&ObjectKey::of(object))
            .map(|entry| &entry.controller)
    }

    /// Number of tracked objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The surface objects are pinned to.
    #[must_use]
    pub const fn surface(&self) -> &S {
        &self.surface
    }

    /// The template new controllers are built from.
    #[must_use]
    pub const fn settings(&self) -> &RegistrySettings {
        &self.settings
    }

    /// Retarget every controller at its object's surface projection.
    ///
    /// Objects with no projection, or already on the surface, stop chasing.
    /// Call once per frame before the physics step.
    pub fn update(&mut self) {
        let epsilon = self.settings.on_surface_epsilon;
        for entry in self.entries.values_mut() {
            let position = entry.object.position_world();
            match self.surface.cast_ray(position) {
                Some(point) if point.distance(position) > epsilon => {
                    entry.controller.set_target(point);
                }
                _ => entry.controller.stop_chasing(),
            }
        }
    }

    /// Dispose every controller and forget every object.
    pub fn dispose(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        let count = self.entries.len();
        for (_, mut entry) in self.entries.drain() {
            entry.controller.dispose();
        }
        debug!("constraint registry disposed {count} controllers");
    }
}

impl<S: ConstraintSurface> Drop for ConstraintRegistry<S> {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::PlaneSurface;
    use std::cell::Cell;

    struct Marker {
        events: ForceEvent,
        position: Cell<DVec3>,
        radius: f64,
    }

    impl Marker {
        fn at(position: DVec3) -> Rc<Self> {
            Rc::new(Self {
                events: ForceEvent::new(),
                position: Cell::new(position),
                radius: 0.5,
            })
        }
    }

    impl TrackedObject for Marker {
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

    #[test]
    fn adding_twice_keeps_one_controller() {
        let mut registry = ConstraintRegistry::new(PlaneSurface::xy());
        let marker = Marker::at(DVec3::new(1.0, 2.0, 3.0));
        assert!(matches!(registry.add(Rc::clone(&marker)), Ok(true)));
        assert!(matches!(registry.add(Rc::clone(&marker)), Ok(false)));
        assert_eq!(registry.len(), 1);
        assert_eq!(marker.events.subscriber_count(), 1);
    }

    #[test]
    fn update_targets_projection() {
        let mut registry = ConstraintRegistry::new(PlaneSurface::xy());
        let marker = Marker::at(DVec3::new(1.0, 2.0, 3.0));
        assert!(matches!(registry.add(Rc::clone(&marker)), Ok(true)));
        registry.update();
        let target = registry.controller(&marker).and_then(Chase::target);
        assert_eq!(target, Some(DVec3::new(1.0, 2.0, 0.0)));

        marker.position.set(DVec3::new(1.0, 2.0, 0.0));
        registry.update();
        let settled = registry.controller(&marker).and_then(Chase::target);
        assert_eq!(settled, None);
    }

    #[test]
    fn remove_and_dispose_unhook_controllers() {
        let mut registry = ConstraintRegistry::new(PlaneSurface::xy());
        let first = Marker::at(DVec3::Z);
        let second = Marker::at(DVec3::Z);
        assert!(matches!(registry.add(Rc::clone(&first)), Ok(true)));
        assert!(matches!(registry.add(Rc::clone(&second)), Ok(true)));

        assert!(registry.remove(&first));
        assert!(!registry.remove(&first));
        assert_eq!(first.events.subscriber_count(), 0);

        registry.dispose();
        assert!(registry.is_empty());
        assert_eq!(second.events.subscriber_count(), 0);
    }
}
