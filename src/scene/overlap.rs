//! Advisory overlap checks for new placements.
//!
//! The child solid is sampled on a coarse grid over its bounding box and the
//! samples that fall inside it are mapped into the parent frame. A sample
//! outside the parent solid is a protrusion; a sample inside a sibling whose
//! box overlaps the child's is a sibling overlap.

use tracing::warn;

use super::placement::PlacementId;
use super::GeometryStore;
use crate::error::Result;
use crate::math::Point3;
use crate::solid::grid_samples;

/// Grid samples per axis over the child's bounding box.
pub const OVERLAP_RESOLUTION: usize = 10;

/// What a placement was found to collide with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlapKind {
    /// Shares material with another placement in the same parent.
    Sibling { other: PlacementId },
    /// Pokes out of its parent volume.
    Protrusion,
}

/// A suspected overlap found while placing a volume.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlapWarning {
    pub placement: PlacementId,
    pub placement_name: String,
    pub kind: OverlapKind,
    /// One offending sample, in the parent frame.
    pub sample_point: Point3,
    pub overlapping_samples: usize,
}

/// Runs both checks for `id`, which must already be in `store`.
pub(super) fn check_placement(store: &GeometryStore, id: PlacementId) -> Result<Vec<OverlapWarning>> {
    let placement = store.placement(id)?;
    let child = store.volume(placement.volume)?;
    let parent = store.volume(placement.parent)?;

    let local_box = child.solid.bounding_box();
    if local_box.is_empty() {
        return Ok(Vec::new());
    }
    let samples: Vec<Point3> = grid_samples(&local_box, OVERLAP_RESOLUTION)
        .filter(|p| child.solid.contains(p))
        .map(|p| placement.transform.apply_point(&p))
        .collect();

    let mut warnings = Vec::new();
    let outside: Vec<&Point3> = samples
        .iter()
        .filter(|p| !parent.solid.contains(p))
        .collect();
    if let Some(first) = outside.first() {
        warnings.push(OverlapWarning {
            placement: id,
            placement_name: placement.name.clone(),
            kind: OverlapKind::Protrusion,
            sample_point: **first,
            overlapping_samples: outside.len(),
        });
    }

    let child_box = local_box.transformed(&placement.transform);
    for &other_id in store.children(placement.parent) {
        if other_id == id {
            continue;
        }
        let other = store.placement(other_id)?;
        let other_solid = &store.volume(other.volume)?.solid;
        if !other_solid
            .bounding_box()
            .transformed(&other.transform)
            .overlaps(&child_box)
        {
            continue;
        }
        let to_other = other.transform.inverse();
        let inside: Vec<&Point3> = samples
            .iter()
            .filter(|p| other_solid.contains(&to_other.apply_point(p)))
            .collect();
        if let Some(first) = inside.first() {
            warnings.push(OverlapWarning {
                placement: id,
                placement_name: placement.name.clone(),
                kind: OverlapKind::Sibling { other: other_id },
                sample_point: **first,
                overlapping_samples: inside.len(),
            });
        }
    }

    for w in &warnings {
        match w.kind {
            OverlapKind::Protrusion => warn!(
                placement = %w.placement_name,
                parent = %parent.name,
                samples = w.overlapping_samples,
                "placement protrudes from its mother volume"
            ),
            OverlapKind::Sibling { other } => warn!(
                placement = %w.placement_name,
                other = %store.placement(other)?.name,
                samples = w.overlapping_samples,
                "placement overlaps a sibling"
            ),
        }
    }
    Ok(warnings)
}
