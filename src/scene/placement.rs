use super::volume::VolumeId;
use crate::transform::Transform;

slotmap::new_key_type! {
    /// Unique identifier for a placement in the geometry store.
    pub struct PlacementId;
}

/// One positioned copy of a logical volume inside a parent volume.
#[derive(Debug, Clone)]
pub struct Placement {
    pub name: String,
    pub volume: VolumeId,
    pub parent: VolumeId,
    /// Maps the child's local coordinates into the parent's.
    pub transform: Transform,
    pub copy_number: u32,
}
