//! Assembly recipes.
//!
//! A recipe derives the dimensions it needs, builds primitives and
//! booleans, creates volumes and places them. Sub-assemblies are handed a
//! [`Mount`] and only add placements below it.

pub mod c16_chamber;
pub mod cryotarget;
pub mod flux;
pub mod foil;
pub mod gas_target;
pub mod gen;
pub mod gep_chamber;
pub mod radiator;
pub mod standard_chamber;
pub mod tdis;
pub mod tpc;

use crate::config::TargetConfig;
use crate::error::Result;
use crate::material::MaterialTable;
use crate::math::Vector3;
use crate::registry::{SensitiveDetectorRegistry, TargetVolumeRegistry};
use crate::scene::{GeometryStore, PlacementId, Sensitivity, UserLimits, VisAttributes, VolumeId};
use crate::solid::Solid;
use crate::transform::{Rotation, Transform};

/// Where a sub-assembly goes: a parent volume plus the frame rotation and
/// offset of the sub-assembly's origin in that parent.
#[derive(Debug, Clone, Copy)]
pub struct Mount {
    pub parent: VolumeId,
    pub frame: Rotation,
    pub offset: Vector3,
}

impl Mount {
    /// Unrotated mount at `offset`.
    #[must_use]
    pub fn at(parent: VolumeId, offset: Vector3) -> Self {
        Self {
            parent,
            frame: Rotation::identity(),
            offset,
        }
    }

    #[must_use]
    pub fn new(parent: VolumeId, frame: Rotation, offset: Vector3) -> Self {
        Self { parent, frame, offset }
    }

    /// Same orientation, origin moved by `delta` in the parent frame.
    #[must_use]
    pub fn shifted(&self, delta: Vector3) -> Self {
        Self {
            offset: self.offset + delta,
            ..*self
        }
    }

    #[must_use]
    pub fn transform(&self) -> Transform {
        Transform::from_frame(self.frame, self.offset)
    }
}

/// Mutable state shared by the recipes of one build.
pub struct BuildContext<'a> {
    pub config: &'a TargetConfig,
    pub materials: &'a dyn MaterialTable,
    pub store: &'a mut GeometryStore,
    pub targets: &'a mut TargetVolumeRegistry,
    pub detectors: &'a mut SensitiveDetectorRegistry,
    pub world: VolumeId,
}

impl BuildContext<'_> {
    /// Creates a volume of `solid` filled with `material`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownMaterial` or `DuplicateName`.
    pub fn volume(&mut self, solid: Solid, material: &str, name: &str) -> Result<VolumeId> {
        self.store.make_volume(solid, self.materials, material, name)
    }

    /// Creates a volume and registers it as part of the target.
    ///
    /// # Errors
    ///
    /// Returns `UnknownMaterial` or `DuplicateName`.
    pub fn target_volume(&mut self, solid: Solid, material: &str, name: &str) -> Result<VolumeId> {
        let id = self.volume(solid, material, name)?;
        self.targets.insert(name);
        Ok(id)
    }

    /// Registers an existing volume as part of the target.
    ///
    /// # Errors
    ///
    /// Returns `VolumeNotFound` if the ID is stale.
    pub fn mark_target(&mut self, id: VolumeId) -> Result<()> {
        let name = self.store.volume(id)?.name.clone();
        self.targets.insert(name);
        Ok(())
    }

    /// Places `volume` in `parent`. `check` is the recipe's own overlap
    /// setting; the configured policy may override it.
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
        check: bool,
    ) -> Result<PlacementId> {
        let check = self.config.overlap_policy.resolve(check);
        self.store.place(volume, parent, transform, copy_number, name, check)
    }

    /// Places `volume` at `mount`.
    ///
    /// # Errors
    ///
    /// Returns `VolumeNotFound` if either handle is stale.
    pub fn place_at(&mut self, volume: VolumeId, mount: &Mount, name: &str, check: bool) -> Result<PlacementId> {
        self.place(volume, mount.parent, mount.transform(), 0, name, check)
    }

    /// # Errors
    ///
    /// Returns `VolumeNotFound` if the ID is stale.
    pub fn set_vis(&mut self, id: VolumeId, vis: VisAttributes) -> Result<()> {
        self.store.set_vis(id, vis)
    }

    /// Name of the material filling `id`.
    ///
    /// # Errors
    ///
    /// Returns `VolumeNotFound` if the ID is stale.
    pub fn material_name(&self, id: VolumeId) -> Result<String> {
        Ok(self.store.volume(id)?.material.name().to_owned())
    }

    /// Wires `volume` to the named sensitive detector, creating it if
    /// needed.
    ///
    /// # Errors
    ///
    /// Returns `VolumeNotFound` if the ID is stale.
    pub fn make_sensitive(&mut self, volume: VolumeId, detector: &str, collection: &str, depth: u32) -> Result<()> {
        let id = self.detectors.get_or_create(detector, collection);
        self.store.set_sensitivity(volume, Sensitivity { detector: id, depth })?;
        let name = self.store.volume(volume)?.name.clone();
        self.detectors.register_sensitive(&name, id, depth);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `VolumeNotFound` if the ID is stale.
    pub fn set_user_limits(&mut self, volume: VolumeId, limits: UserLimits) -> Result<()> {
        self.store.set_user_limits(volume, limits)
    }
}

/// Target sub-recipe for an empty chamber.
///
/// # Errors
///
/// Never fails.
pub fn no_target(_ctx: &mut BuildContext<'_>, _mount: &Mount) -> Result<()> {
    Ok(())
}

/// Full-circle tube, the most common primitive in the recipes.
pub(crate) fn cylinder(name: &str, rmin: f64, rmax: f64, dz: f64) -> Result<Solid> {
    Solid::tube(name, rmin, rmax, dz, 0.0, std::f64::consts::TAU)
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::builder::{recipe_for, TargetRecipe};
    use crate::material::StaticMaterialTable;
    use crate::units::M;

    /// Owns everything a [`BuildContext`] borrows.
    pub struct Harness {
        pub config: TargetConfig,
        pub materials: StaticMaterialTable,
        pub store: GeometryStore,
        pub targets: TargetVolumeRegistry,
        pub detectors: SensitiveDetectorRegistry,
        pub world: VolumeId,
    }

    impl Harness {
        #[allow(clippy::unwrap_used)]
        pub fn new(config: TargetConfig) -> Self {
            let materials = StaticMaterialTable::standard();
            let mut store = GeometryStore::new();
            let world_box = Solid::box_shape("World_box", 5.0 * M, 5.0 * M, 5.0 * M).unwrap();
            let world = store.make_volume(world_box, &materials, "Air", "World_log").unwrap();
            store.set_world(world).unwrap();
            Self {
                config,
                materials,
                store,
                targets: TargetVolumeRegistry::new(),
                detectors: SensitiveDetectorRegistry::new(),
                world,
            }
        }

        pub fn ctx(&mut self) -> BuildContext<'_> {
            BuildContext {
                config: &self.config,
                materials: &self.materials,
                store: &mut self.store,
                targets: &mut self.targets,
                detectors: &mut self.detectors,
                world: self.world,
            }
        }

        /// Target sub-recipe the dispatch table picks for this
        /// configuration.
        #[allow(clippy::unwrap_used)]
        pub fn target_recipe(&self) -> TargetRecipe {
            recipe_for(self.config.experiment, self.config.target).unwrap().target
        }

        #[allow(clippy::unwrap_used)]
        pub fn id(&self, name: &str) -> VolumeId {
            self.store.volume_by_name(name).unwrap()
        }

        /// Names of the placements directly inside the named volume.
        #[allow(clippy::unwrap_used)]
        pub fn children_of(&self, name: &str) -> Vec<String> {
            self.store
                .children(self.id(name))
                .iter()
                .map(|p| self.store.placement(*p).unwrap().name.clone())
                .collect()
        }
    }
}
