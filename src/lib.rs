//! Library crate providing force-based pursuit controllers.
//!
//! Controllers steer physics bodies toward moving targets by applying forces
//! built from composable generators and distance gradients. A
//! [`ConstraintRegistry`] uses them to keep bodies pinned to a surface, and
//! the [`sim`] module provides a small integrator to drive everything without
//! an external engine.
pub mod body;
pub mod config;
pub mod constants;
pub mod controller;
pub mod error;
pub mod force;
pub mod logging;
pub mod numeric;
pub mod physics;
pub mod registry;
pub mod sim;
pub mod surface;
pub mod vector_math;
pub use constants::*;

// Re-export commonly used items
pub use body::{ForceEvent, ForceHandler, PhysicsBody, Subscription};
pub use config::{Config, PursuitConfig, VelocityConfig};
pub use controller::{
    Chase, PursuitController, PursuitSettings, VelocityController, VelocitySettings,
};
pub use error::ConfigurationError;
pub use force::{
    DirectionType, DistanceSpec, ForceContext, ForceGenerator, ForceKind, ForceTerm, Gradient,
    GradientStop,
};
pub use logging::init as init_logging;
pub use physics::applied_acceleration;
pub use registry::{ConstraintRegistry, RegistrySettings, TrackedObject};
pub use sim::{PhysicsWorld, RigidBody, SimObject};
pub use surface::{ConstraintSurface, CylinderSurface, PlaneSurface};

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use pursuit::prelude::*;
    //! ```

    pub use crate::controller::Chase;
    pub use crate::force::{
        DirectionType, DistanceSpec, ForceGenerator, ForceTerm, Gradient, GradientStop,
    };
    pub use crate::registry::ConstraintRegistry;
    pub use crate::sim::{PhysicsWorld, RigidBody, SimObject};
    pub use crate::surface::{ConstraintSurface, PlaneSurface};
    pub use crate::PhysicsBody;
    pub use crate::PursuitController;
    pub use crate::PursuitSettings;
    pub use glam::DVec3;
}
