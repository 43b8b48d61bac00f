//! Constraint surfaces that bodies are pinned to.
//!
//! A surface projects a free point onto itself along its own defining
//! direction. Planes stand in for a flat play field embedded in 3D space;
//! cylinders wrap one around an axis.

use glam::DVec3;

use crate::vector_math::{project_onto, unit_and_length, unit_or_zero};

/// A surface that can project points onto itself.
pub trait ConstraintSurface {
    /// Nearest point on the surface along the surface's projection, or `None`
    /// where the projection is undefined.
    fn cast_ray(&self, point: DVec3) -> Option<DVec3>;

    /// Unit surface normal at (or nearest to) `point`, if defined.
    fn normal(&self, point: DVec3) -> Option<DVec3>;
}

/// An infinite plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneSurface {
    origin: DVec3,
    normal: DVec3,
}

impl PlaneSurface {
    /// Plane through `origin` facing `normal`. The normal is normalised; a zero
    /// normal leaves the plane undefined.
    #[must_use]
    pub fn new(origin: DVec3, normal: DVec3) -> Self {
        Self {
            origin,
            normal: unit_or_zero(normal),
        }
    }

    /// The `z = 0` plane, the usual 2D play field.
    #[must_use]
    pub fn xy() -> Self {
        Self::new(DVec3::ZERO, DVec3::Z)
    }

    /// A point on the plane.
    #[must_use]
    pub const fn origin(&self) -> DVec3 {
        self.origin
    }

    /// Signed distance of `point` from the plane.
    #[must_use]
    pub fn signed_distance(&self, point: DVec3) -> f64 {
        (point - self.origin).dot(self.normal)
    }
}

impl ConstraintSurface for PlaneSurface {
    fn cast_ray(&self, point: DVec3) -> Option<DVec3> {
        if self.normal == DVec3::ZERO || !point.is_finite() {
            return None;
        }
        Some(point - self.normal * self.signed_distance(point))
    }

    fn normal(&self, _point: DVec3) -> Option<DVec3> {
        (self.normal != DVec3::ZERO).then_some(self.normal)
    }
}

/// The curved shell of an infinite cylinder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CylinderSurface {
    axis_origin: DVec3,
    axis_direction: DVec3,
    radius: f64,
}

impl CylinderSurface {
    /// Cylinder of `radius` around the axis through `axis_origin` along
    /// `axis_direction`.
    #[must_use]
    pub fn new(axis_origin: DVec3, axis_direction: DVec3, radius: f64) -> Self {
        Self {
            axis_origin,
            axis_direction: unit_or_zero(axis_direction),
            radius,
        }
    }

    /// Shell radius.
    #[must_use]
    pub const fn radius(&self) -> f64 {
        self.radius
    }

    fn radial(&self, point: DVec3) -> Option<(DVec3, DVec3, f64)> {
        if self.axis_direction == DVec3::ZERO || !point.is_finite() {
            return None;
        }
        let relative = point - self.axis_origin;
        let along = project_onto(relative, self.axis_direction);
        let (outward, distance) = unit_and_length(relative - along);
        (distance > 0.0).then_some((along, outward, distance))
    }
}

impl ConstraintSurface for CylinderSurface {
    fn cast_ray(&self, point: DVec3) -> Option<DVec3> {
        let (along, outward, _) = self.radial(point)?;
        Some(self.axis_origin + along + outward * self.radius)
    }

    fn normal(&self, point: DVec3) -> Option<DVec3> {
        self.radial(point).map(|(_, outward, _)| outward)
    }
}
