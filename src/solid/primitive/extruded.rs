use crate::error::GeometryError;
use crate::math::polygon_2d::{point_in_polygon_2d, polygon_extent_2d, signed_area_2d};
use crate::math::{Point2, Point3, TOLERANCE};
use crate::solid::Aabb;

use super::{require_positive, ShapeResult};

/// A simple polygon in the XY plane extruded symmetrically along Z.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtrudedPolygon {
    vertices: Vec<Point2>,
    pub dz: f64,
}

impl ExtrudedPolygon {
    /// # Errors
    ///
    /// Returns `InvalidDimension` for fewer than three vertices, a polygon
    /// with zero area, or a non-positive `dz`.
    pub fn new(vertices: Vec<Point2>, dz: f64) -> ShapeResult<Self> {
        if vertices.len() < 3 {
            #[allow(clippy::cast_precision_loss)]
            let n = vertices.len() as f64;
            return Err(GeometryError::invalid(
                "extruded polygon",
                "vertices",
                n,
                "needs at least three vertices",
            ));
        }
        let area = signed_area_2d(&vertices);
        if area.abs() < TOLERANCE {
            return Err(GeometryError::invalid(
                "extruded polygon",
                "area",
                area,
                "polygon is degenerate",
            ));
        }
        require_positive("extruded polygon", "dz", dz)?;
        Ok(Self { vertices, dz })
    }

    /// Polygon vertices in their original order.
    #[must_use]
    pub fn vertices(&self) -> &[Point2] {
        &self.vertices
    }

    #[must_use]
    pub fn contains(&self, p: &Point3) -> bool {
        p.z.abs() <= self.dz && point_in_polygon_2d(&Point2::new(p.x, p.y), &self.vertices)
    }

    #[must_use]
    pub fn bounding_box(&self) -> Aabb {
        let (min, max) = polygon_extent_2d(&self.vertices)
            .unwrap_or((Point2::origin(), Point2::origin()));
        Aabb::new(
            Point3::new(min.x, min.y, -self.dz),
            Point3::new(max.x, max.y, self.dz),
        )
    }

    #[must_use]
    pub fn volume(&self) -> f64 {
        signed_area_2d(&self.vertices).abs() * 2.0 * self.dz
    }
}
