//! Immutable CSG expression trees.
//!
//! A [`Solid`] is a cheap, reference-counted handle to a node. Combining two
//! solids never mutates either operand, so one part can feed several
//! composites.

mod bounds;
pub mod primitive;

pub use bounds::Aabb;
pub use primitive::{
    BoxShape, Cone, ExtrudedPolygon, Polycone, Primitive, Sphere, Torus, Tube, ZPlane,
};

use std::sync::Arc;

use crate::error::{GeometryError, Result};
use crate::math::{Point2, Point3};
use crate::transform::Transform;

use self::primitive::ShapeResult;

/// Default number of grid samples per axis for [`Solid::estimate_volume`].
pub const DEFAULT_VOLUME_RESOLUTION: usize = 48;

/// The type of boolean operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanOp {
    Union,
    Subtract,
    Intersect,
}

/// Node payload of a solid.
#[derive(Debug, Clone, PartialEq)]
pub enum SolidKind {
    Primitive(Primitive),
    /// `right` is placed in `left`'s frame by `transform`.
    Boolean {
        op: BooleanOp,
        left: Solid,
        right: Solid,
        transform: Transform,
    },
}

#[derive(Debug, PartialEq)]
struct SolidNode {
    name: String,
    kind: SolidKind,
    /// Maps points of this node's frame into the tool's frame. Identity for
    /// primitives.
    to_tool: Transform,
}

/// A named node of a CSG expression tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Solid(Arc<SolidNode>);

fn named<T>(name: &str, shape: ShapeResult<T>) -> Result<T> {
    shape.map_err(|err| match err {
        GeometryError::InvalidDimension {
            part,
            parameter,
            value,
            reason,
        } => GeometryError::InvalidDimension {
            part: format!("{name} ({part})"),
            parameter,
            value,
            reason,
        }
        .into(),
    })
}

impl Solid {
    /// Wraps an already validated primitive.
    #[must_use]
    pub fn primitive(name: impl Into<String>, shape: impl Into<Primitive>) -> Self {
        Self(Arc::new(SolidNode {
            name: name.into(),
            kind: SolidKind::Primitive(shape.into()),
            to_tool: Transform::identity(),
        }))
    }

    /// # Errors
    ///
    /// Returns `InvalidDimension` if a half-length is not positive.
    pub fn box_shape(name: &str, dx: f64, dy: f64, dz: f64) -> Result<Self> {
        Ok(Self::primitive(name, named(name, BoxShape::new(dx, dy, dz))?))
    }

    /// # Errors
    ///
    /// Returns `InvalidDimension` for invalid radii, length or span.
    pub fn tube(
        name: &str,
        rmin: f64,
        rmax: f64,
        dz: f64,
        start_phi: f64,
        delta_phi: f64,
    ) -> Result<Self> {
        let tube = named(name, Tube::new(rmin, rmax, dz, start_phi, delta_phi))?;
        Ok(Self::primitive(name, tube))
    }

    /// # Errors
    ///
    /// Returns `InvalidDimension` for invalid radii, length or span.
    #[allow(clippy::too_many_arguments)]
    pub fn cone(
        name: &str,
        rmin1: f64,
        rmax1: f64,
        rmin2: f64,
        rmax2: f64,
        dz: f64,
        start_phi: f64,
        delta_phi: f64,
    ) -> Result<Self> {
        let cone = named(
            name,
            Cone::new(rmin1, rmax1, rmin2, rmax2, dz, start_phi, delta_phi),
        )?;
        Ok(Self::primitive(name, cone))
    }

    /// # Errors
    ///
    /// Returns `InvalidDimension` for invalid radii or angular ranges.
    pub fn sphere(
        name: &str,
        rmin: f64,
        rmax: f64,
        start_phi: f64,
        delta_phi: f64,
        start_theta: f64,
        delta_theta: f64,
    ) -> Result<Self> {
        let sphere = named(
            name,
            Sphere::new(rmin, rmax, start_phi, delta_phi, start_theta, delta_theta),
        )?;
        Ok(Self::primitive(name, sphere))
    }

    /// # Errors
    ///
    /// Returns `InvalidDimension` for invalid radii or span.
    pub fn torus(
        name: &str,
        rmin: f64,
        rmax: f64,
        rtor: f64,
        start_phi: f64,
        delta_phi: f64,
    ) -> Result<Self> {
        let torus = named(name, Torus::new(rmin, rmax, rtor, start_phi, delta_phi))?;
        Ok(Self::primitive(name, torus))
    }

    /// # Errors
    ///
    /// Returns `InvalidDimension` for a degenerate polygon or non-positive `dz`.
    pub fn extruded(name: &str, vertices: Vec<Point2>, dz: f64) -> Result<Self> {
        let shape = named(name, ExtrudedPolygon::new(vertices, dz))?;
        Ok(Self::primitive(name, shape))
    }

    /// # Errors
    ///
    /// Returns `InvalidDimension` for non-monotonic planes or invalid radii.
    pub fn polycone(
        name: &str,
        start_phi: f64,
        delta_phi: f64,
        planes: Vec<ZPlane>,
    ) -> Result<Self> {
        let shape = named(name, Polycone::new(start_phi, delta_phi, planes))?;
        Ok(Self::primitive(name, shape))
    }

    /// Builds a boolean node. `tool` is positioned in `base`'s frame by
    /// `transform`.
    #[must_use]
    pub fn combine(
        op: BooleanOp,
        name: impl Into<String>,
        base: &Solid,
        tool: &Solid,
        transform: Transform,
    ) -> Solid {
        Self(Arc::new(SolidNode {
            name: name.into(),
            kind: SolidKind::Boolean {
                op,
                left: base.clone(),
                right: tool.clone(),
                transform,
            },
            to_tool: transform.inverse(),
        }))
    }

    #[must_use]
    pub fn union(&self, name: impl Into<String>, tool: &Solid, transform: Transform) -> Solid {
        Self::combine(BooleanOp::Union, name, self, tool, transform)
    }

    #[must_use]
    pub fn subtract(&self, name: impl Into<String>, tool: &Solid, transform: Transform) -> Solid {
        Self::combine(BooleanOp::Subtract, name, self, tool, transform)
    }

    #[must_use]
    pub fn intersect(&self, name: impl Into<String>, tool: &Solid, transform: Transform) -> Solid {
        Self::combine(BooleanOp::Intersect, name, self, tool, transform)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.0.name
    }

    #[must_use]
    pub fn kind(&self) -> &SolidKind {
        &self.0.kind
    }

    /// Returns `true` when both handles point at the same node.
    #[must_use]
    pub fn shares_node(&self, other: &Solid) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Returns `true` when `p` (local coordinates) lies inside the solid.
    #[must_use]
    pub fn contains(&self, p: &Point3) -> bool {
        match &self.0.kind {
            SolidKind::Primitive(shape) => shape.contains(p),
            SolidKind::Boolean { op, left, right, .. } => {
                let in_left = left.contains(p);
                let in_right = || right.contains(&self.0.to_tool.apply_point(p));
                match op {
                    BooleanOp::Union => in_left || in_right(),
                    BooleanOp::Subtract => in_left && !in_right(),
                    BooleanOp::Intersect => in_left && in_right(),
                }
            }
        }
    }

    /// Conservative local bounding box.
    #[must_use]
    pub fn bounding_box(&self) -> Aabb {
        match &self.0.kind {
            SolidKind::Primitive(shape) => shape.bounding_box(),
            SolidKind::Boolean {
                op,
                left,
                right,
                transform,
            } => {
                let base = left.bounding_box();
                match op {
                    BooleanOp::Union => base.union(&right.bounding_box().transformed(transform)),
                    BooleanOp::Subtract => base,
                    BooleanOp::Intersect => {
                        base.intersection(&right.bounding_box().transformed(transform))
                    }
                }
            }
        }
    }

    /// Volume of the solid.
    ///
    /// Exact for primitives. Boolean nodes are integrated on a midpoint grid
    /// of `resolution` samples per axis over the bounding box, so repeated
    /// calls give identical results.
    #[must_use]
    pub fn estimate_volume(&self, resolution: usize) -> f64 {
        match &self.0.kind {
            SolidKind::Primitive(shape) => shape.volume(),
            SolidKind::Boolean { .. } => {
                let bb = self.bounding_box();
                if bb.is_empty() || resolution == 0 {
                    return 0.0;
                }
                let hits = grid_samples(&bb, resolution)
                    .filter(|p| self.contains(p))
                    .count();
                #[allow(clippy::cast_precision_loss)]
                let fraction = hits as f64 / (resolution * resolution * resolution) as f64;
                fraction * bb.volume()
            }
        }
    }

    /// Number of nodes on the longest root-to-leaf path.
    #[must_use]
    pub fn depth(&self) -> usize {
        match &self.0.kind {
            SolidKind::Primitive(_) => 1,
            SolidKind::Boolean { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}

/// Cell-centre points of a regular `resolution³` grid over `bb`.
pub(crate) fn grid_samples(bb: &Aabb, resolution: usize) -> impl Iterator<Item = Point3> + '_ {
    #[allow(clippy::cast_precision_loss)]
    let n = resolution as f64;
    let step = bb.extent() / n;
    (0..resolution).flat_map(move |i| {
        (0..resolution).flat_map(move |j| {
            (0..resolution).map(move |k| {
                #[allow(clippy::cast_precision_loss)]
                let (fi, fj, fk) = (i as f64 + 0.5, j as f64 + 0.5, k as f64 + 0.5);
                Point3::new(
                    bb.min.x + fi * step.x,
                    bb.min.y + fj * step.y,
                    bb.min.z + fk * step.z,
                )
            })
        })
    })
}
