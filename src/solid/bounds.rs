use crate::math::{Point3, Vector3};
use crate::transform::Transform;

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box.
    pub min: Point3,
    /// Maximum corner of the bounding box.
    pub max: Point3,
}

impl Aabb {
    /// Creates a box from its corners.
    #[must_use]
    pub fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    /// A box centred on the origin with the given half-extents.
    #[must_use]
    pub fn symmetric(hx: f64, hy: f64, hz: f64) -> Self {
        Self::new(Point3::new(-hx, -hy, -hz), Point3::new(hx, hy, hz))
    }

    /// Returns `true` when the box encloses no volume.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y || self.min.z >= self.max.z
    }

    /// Full edge lengths.
    #[must_use]
    pub fn extent(&self) -> Vector3 {
        (self.max - self.min).map(|e| e.max(0.0))
    }

    /// Enclosed volume, zero when empty.
    #[must_use]
    pub fn volume(&self) -> f64 {
        let e = self.extent();
        e.x * e.y * e.z
    }

    /// Smallest box containing both.
    #[must_use]
    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb::new(self.min.inf(&other.min), self.max.sup(&other.max))
    }

    /// Overlap region of both boxes; may be empty.
    #[must_use]
    pub fn intersection(&self, other: &Aabb) -> Aabb {
        Aabb::new(self.min.sup(&other.min), self.max.inf(&other.max))
    }

    /// Returns `true` when the two boxes share a region of positive volume.
    #[must_use]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        !self.intersection(other).is_empty()
    }

    /// Returns `true` when `p` lies inside or on the box.
    #[must_use]
    pub fn contains(&self, p: &Point3) -> bool {
        (0..3).all(|i| p[i] >= self.min[i] && p[i] <= self.max[i])
    }

    /// Returns the eight corner points.
    #[must_use]
    pub fn corners(&self) -> [Point3; 8] {
        let (a, b) = (self.min, self.max);
        [
            Point3::new(a.x, a.y, a.z),
            Point3::new(b.x, a.y, a.z),
            Point3::new(a.x, b.y, a.z),
            Point3::new(b.x, b.y, a.z),
            Point3::new(a.x, a.y, b.z),
            Point3::new(b.x, a.y, b.z),
            Point3::new(a.x, b.y, b.z),
            Point3::new(b.x, b.y, b.z),
        ]
    }

    /// Bounding box of this box after applying `transform`.
    #[must_use]
    pub fn transformed(&self, transform: &Transform) -> Aabb {
        let corners = self.corners();
        let first = transform.apply_point(&corners[0]);
        corners[1..].iter().fold(Aabb::new(first, first), |acc, c| {
            let q = transform.apply_point(c);
            Aabb::new(acc.min.inf(&q), acc.max.sup(&q))
        })
    }
}
