//! Tuning constants for the default plane-pinning controllers.
//!
//! The attraction gradient ramps from a gentle pull at the surface to a strong
//! pull once a body has drifted one radius away. The drag terms act as a shock
//! absorber so bodies settle instead of oscillating through the surface.

/// Acceleration toward the surface when the body is on it.
pub const ATTRACTION_NEAR_ACCELERATION: f64 = 20.0;
/// Acceleration toward the surface from one body radius outwards.
pub const ATTRACTION_FAR_ACCELERATION: f64 = 500.0;
/// Radius multiple at which the attraction reaches full strength.
pub const ATTRACTION_FAR_RADIUS_MULTIPLE: f64 = 1.0;

/// Drag acceleration per unit speed opposing motion away from the surface.
pub const RECEDING_DRAG_ACCELERATION: f64 = 20.0;
/// Drag acceleration per unit speed opposing motion toward the surface, at
/// the surface itself.
pub const APPROACH_DRAG_ACCELERATION: f64 = 10.0;
/// Radius multiple beyond which approach drag has faded out.
pub const APPROACH_DRAG_FADE_RADIUS_MULTIPLE: f64 = 2.0;

/// Distance under which a body counts as already on the surface.
pub const ON_SURFACE_EPSILON: f64 = 1e-6;

/// Mass used by the reference simulation when none is supplied.
pub const DEFAULT_MASS: f64 = 1.0;
/// Number of integration substeps per frame in the reference simulation.
pub const DEFAULT_SUBSTEPS: u32 = 4;

/// Velocity per unit distance used by the demo's follow camera.
pub const DEFAULT_FOLLOW_MULTIPLIER: f64 = 5.0;
