//! Analytic primitive solids.
//!
//! Every primitive is centred on its local origin with its symmetry axis along
//! local Z. Angles are in radians; a sector is `[start, start + span]`.

mod box_shape;
mod cone;
mod extruded;
mod polycone;
mod sphere;
mod torus;
mod tube;

pub use box_shape::BoxShape;
pub use cone::Cone;
pub use extruded::ExtrudedPolygon;
pub use polycone::{Polycone, ZPlane};
pub use sphere::Sphere;
pub use torus::Torus;
pub use tube::Tube;

use std::f64::consts::TAU;

use crate::error::GeometryError;
use crate::math::{Point3, TOLERANCE};

use super::Aabb;

/// Result of primitive validation, before the part name is known.
pub type ShapeResult<T> = std::result::Result<T, GeometryError>;

/// A validated primitive shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Box(BoxShape),
    Tube(Tube),
    Cone(Cone),
    Sphere(Sphere),
    Torus(Torus),
    ExtrudedPolygon(ExtrudedPolygon),
    Polycone(Polycone),
}

impl Primitive {
    /// Short name of the primitive kind.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Box(_) => "box",
            Self::Tube(_) => "tube",
            Self::Cone(_) => "cone",
            Self::Sphere(_) => "sphere",
            Self::Torus(_) => "torus",
            Self::ExtrudedPolygon(_) => "extruded polygon",
            Self::Polycone(_) => "polycone",
        }
    }

    /// Returns `true` when `p` (local coordinates) is inside or on the surface.
    #[must_use]
    pub fn contains(&self, p: &Point3) -> bool {
        match self {
            Self::Box(s) => s.contains(p),
            Self::Tube(s) => s.contains(p),
            Self::Cone(s) => s.contains(p),
            Self::Sphere(s) => s.contains(p),
            Self::Torus(s) => s.contains(p),
            Self::ExtrudedPolygon(s) => s.contains(p),
            Self::Polycone(s) => s.contains(p),
        }
    }

    /// Local bounding box.
    #[must_use]
    pub fn bounding_box(&self) -> Aabb {
        match self {
            Self::Box(s) => s.bounding_box(),
            Self::Tube(s) => s.bounding_box(),
            Self::Cone(s) => s.bounding_box(),
            Self::Sphere(s) => s.bounding_box(),
            Self::Torus(s) => s.bounding_box(),
            Self::ExtrudedPolygon(s) => s.bounding_box(),
            Self::Polycone(s) => s.bounding_box(),
        }
    }

    /// Exact enclosed volume.
    #[must_use]
    pub fn volume(&self) -> f64 {
        match self {
            Self::Box(s) => s.volume(),
            Self::Tube(s) => s.volume(),
            Self::Cone(s) => s.volume(),
            Self::Sphere(s) => s.volume(),
            Self::Torus(s) => s.volume(),
            Self::ExtrudedPolygon(s) => s.volume(),
            Self::Polycone(s) => s.volume(),
        }
    }
}

macro_rules! impl_from_primitive {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(impl From<$ty> for Primitive {
            fn from(shape: $ty) -> Self {
                Primitive::$variant(shape)
            }
        })*
    };
}

impl_from_primitive! {
    Box => BoxShape,
    Tube => Tube,
    Cone => Cone,
    Sphere => Sphere,
    Torus => Torus,
    ExtrudedPolygon => ExtrudedPolygon,
    Polycone => Polycone,
}

pub(crate) fn require_positive(kind: &str, parameter: &'static str, value: f64) -> ShapeResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GeometryError::invalid(kind, parameter, value, "must be positive"))
    }
}

pub(crate) fn require_non_negative(
    kind: &str,
    parameter: &'static str,
    value: f64,
) -> ShapeResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(GeometryError::invalid(kind, parameter, value, "must not be negative"))
    }
}

/// Checks `0 <= rmin < rmax`.
pub(crate) fn require_radii(kind: &str, rmin: f64, rmax: f64) -> ShapeResult<()> {
    require_non_negative(kind, "rmin", rmin)?;
    require_positive(kind, "rmax", rmax)?;
    if rmin >= rmax {
        return Err(GeometryError::invalid(
            kind,
            "rmin",
            rmin,
            "inner radius must be below outer radius",
        ));
    }
    Ok(())
}

/// Checks an angular span lies in `(0, 2π]`.
pub(crate) fn require_span(kind: &str, parameter: &'static str, span: f64) -> ShapeResult<()> {
    if span.is_finite() && span > 0.0 && span <= TAU + TOLERANCE {
        Ok(())
    } else {
        Err(GeometryError::invalid(
            kind,
            parameter,
            span,
            "angular span must be in (0, 360] degrees",
        ))
    }
}

/// Clamps a span that exceeds a full turn only by rounding.
pub(crate) fn clamp_span(span: f64) -> f64 {
    span.min(TAU)
}

/// Fraction of a full turn covered by `span`.
pub(crate) fn turn_fraction(span: f64) -> f64 {
    span / TAU
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::units::DEG;

    #[test]
    fn span_limits() {
        assert!(require_span("tube", "dphi", 360.0 * DEG).is_ok());
        assert!(require_span("tube", "dphi", 0.0).is_err());
        assert!(require_span("tube", "dphi", 361.0 * DEG).is_err());
        assert!(require_span("tube", "dphi", f64::NAN).is_err());
    }

    #[test]
    fn radii_ordering() {
        assert!(require_radii("tube", 0.0, 1.0).is_ok());
        assert!(require_radii("tube", 1.0, 1.0).is_err());
        assert!(require_radii("tube", -1.0, 1.0).is_err());
    }

    #[test]
    fn primitive_dispatch() {
        let prim: Primitive = BoxShape::new(1.0, 2.0, 3.0).unwrap().into();
        assert_eq!(prim.kind_name(), "box");
        assert!((prim.volume() - 48.0).abs() < 1e-12);
        assert!(prim.contains(&Point3::new(0.9, -1.9, 2.9)));
    }
}
