//! Logical volumes, their placements and the store that owns them.

pub mod overlap;
pub mod placement;
pub mod volume;

pub use overlap::{OverlapKind, OverlapWarning, OVERLAP_RESOLUTION};
pub use placement::{Placement, PlacementId};
pub use volume::{Colour, LogicalVolume, Sensitivity, UserLimits, VisAttributes, VolumeId};

use std::collections::HashMap;

use slotmap::SlotMap;
use tracing::debug;

use crate::error::{Result, SceneError};
use crate::material::MaterialTable;
use crate::solid::Solid;
use crate::transform::Transform;

/// Central arena that owns all logical volumes and placements.
///
/// Placements refer to volumes by [`VolumeId`]; volume names are unique.
#[derive(Debug, Default)]
pub struct GeometryStore {
    volumes: SlotMap<VolumeId, LogicalVolume>,
    placements: SlotMap<PlacementId, Placement>,
    names: HashMap<String, VolumeId>,
    children: HashMap<VolumeId, Vec<PlacementId>>,
    instances: HashMap<VolumeId, Vec<PlacementId>>,
    world: Option<VolumeId>,
    overlap_warnings: Vec<OverlapWarning>,
}

impl GeometryStore {
    /// Creates a new, empty geometry store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Volume operations ---

    /// Inserts a volume and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateName` if a volume with the same name exists; the
    /// store is left unchanged.
    pub fn add_volume(&mut self, volume: LogicalVolume) -> Result<VolumeId> {
        if self.names.contains_key(&volume.name) {
            return Err(SceneError::DuplicateName(volume.name).into());
        }
        let name = volume.name.clone();
        debug!(volume = %name, solid = volume.solid.name(), material = volume.material.name(), "volume");
        let id = self.volumes.insert(volume);
        self.names.insert(name, id);
        Ok(id)
    }

    /// Resolves `material` and creates a volume of `solid` called `name`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownMaterial` or `DuplicateName`; nothing is inserted on
    /// failure.
    pub fn make_volume(
        &mut self,
        solid: Solid,
        materials: &dyn MaterialTable,
        material: &str,
        name: &str,
    ) -> Result<VolumeId> {
        if self.names.contains_key(name) {
            return Err(SceneError::DuplicateName(name.to_owned()).into());
        }
        let material = materials.material(material)?;
        self.add_volume(LogicalVolume::new(name, solid, material))
    }

    /// Returns a reference to the volume, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns `VolumeNotFound` if the ID is stale.
    pub fn volume(&self, id: VolumeId) -> Result<&LogicalVolume> {
        self.volumes
            .get(id)
            .ok_or_else(|| SceneError::VolumeNotFound(format!("{id:?}")).into())
    }

    fn volume_mut(&mut self, id: VolumeId) -> Result<&mut LogicalVolume> {
        self.volumes
            .get_mut(id)
            .ok_or_else(|| SceneError::VolumeNotFound(format!("{id:?}")).into())
    }

    /// Looks a volume up by name.
    ///
    /// # Errors
    ///
    /// Returns `VolumeNotFound` if no volume has that name.
    pub fn volume_by_name(&self, name: &str) -> Result<VolumeId> {
        self.names
            .get(name)
            .copied()
            .ok_or_else(|| SceneError::VolumeNotFound(name.to_owned()).into())
    }

    /// # Errors
    ///
    /// Returns `VolumeNotFound` if the ID is stale.
    pub fn set_vis(&mut self, id: VolumeId, vis: VisAttributes) -> Result<()> {
        self.volume_mut(id)?.vis = vis;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `VolumeNotFound` if the ID is stale.
    pub fn set_sensitivity(&mut self, id: VolumeId, sensitivity: Sensitivity) -> Result<()> {
        self.volume_mut(id)?.sensitivity = Some(sensitivity);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `VolumeNotFound` if the ID is stale.
    pub fn set_user_limits(&mut self, id: VolumeId, limits: UserLimits) -> Result<()> {
        self.volume_mut(id)?.limits = Some(limits);
        Ok(())
    }

    /// Marks `id` as the root of the placement tree.
    ///
    /// # Errors
    ///
    /// Returns `VolumeNotFound` if the ID is stale.
    pub fn set_world(&mut self, id: VolumeId) -> Result<()> {
        self.volume(id)?;
        self.world = Some(id);
        Ok(())
    }

    #[must_use]
    pub fn world(&self) -> Option<VolumeId> {
        self.world
    }

    #[must_use]
    pub fn volume_count(&self) -> usize {
        self.volumes.len()
    }

    /// Iterates over all volumes in no particular order.
    pub fn volumes(&self) -> impl Iterator<Item = (VolumeId, &LogicalVolume)> {
        self.volumes.iter()
    }

    // --- Placement operations ---

    /// Places `volume` inside `parent`.
    ///
    /// With `check_overlaps` set, the new placement is tested against its
    /// parent and siblings; findings are logged and kept on the store but
    /// never fail the placement.
    ///
    /// # Errors
    ///
    /// Returns `VolumeNotFound` if either handle is stale.
    pub fn place(
        &mut self,
        volume: VolumeId,
        parent: VolumeId,
        transform: Transform,
        copy_number: u32,
        name: &str,
        check_overlaps: bool,
    ) -> Result<PlacementId> {
        self.volume(volume)?;
        self.volume(parent)?;
        debug!(placement = name, copy_number, "placement");
        let id = self.placements.insert(Placement {
            name: name.to_owned(),
            volume,
            parent,
            transform,
            copy_number,
        });
        self.children.entry(parent).or_default().push(id);
        self.instances.entry(volume).or_default().push(id);

        if check_overlaps {
            let found = overlap::check_placement(self, id)?;
            self.overlap_warnings.extend(found);
        }
        Ok(id)
    }

    /// Returns a reference to the placement, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns `VolumeNotFound` if the ID is stale.
    pub fn placement(&self, id: PlacementId) -> Result<&Placement> {
        self.placements
            .get(id)
            .ok_or_else(|| SceneError::VolumeNotFound(format!("placement {id:?}")).into())
    }

    /// Placements directly inside `parent`, in insertion order.
    #[must_use]
    pub fn children(&self, parent: VolumeId) -> &[PlacementId] {
        self.children.get(&parent).map_or(&[][..], Vec::as_slice)
    }

    /// A placement with the given name, if any.
    #[must_use]
    pub fn placement_by_name(&self, name: &str) -> Option<PlacementId> {
        self.placements
            .iter()
            .find(|(_, p)| p.name == name)
            .map(|(id, _)| id)
    }

    /// Placements of `volume`, in insertion order.
    #[must_use]
    pub fn placements_of(&self, volume: VolumeId) -> &[PlacementId] {
        self.instances.get(&volume).map_or(&[][..], Vec::as_slice)
    }

    #[must_use]
    pub fn placement_count(&self) -> usize {
        self.placements.len()
    }

    /// Transform from the placement's local frame to the world frame.
    ///
    /// Ancestors placed more than once are followed through their first
    /// placement.
    ///
    /// # Errors
    ///
    /// Returns `VolumeNotFound` if the ID is stale.
    pub fn global_transform(&self, id: PlacementId) -> Result<Transform> {
        let mut placement = self.placement(id)?;
        let mut global = placement.transform;
        // bounded by the placement count so a malformed cycle cannot spin
        for _ in 0..self.placements.len() {
            if Some(placement.parent) == self.world {
                break;
            }
            let Some(&parent_id) = self.placements_of(placement.parent).first() else {
                break;
            };
            placement = self.placement(parent_id)?;
            global = placement.transform.compose(&global);
        }
        Ok(global)
    }

    /// Overlap findings collected so far.
    #[must_use]
    pub fn overlap_warnings(&self) -> &[OverlapWarning] {
        &self.overlap_warnings
    }

    /// Removes every volume, placement and warning.
    pub fn clear(&mut self) {
        self.volumes.clear();
        self.placements.clear();
        self.names.clear();
        self.children.clear();
        self.instances.clear();
        self.world = None;
        self.overlap_warnings.clear();
    }
}
