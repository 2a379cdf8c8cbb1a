//! Top-level entry point: owns the scene and registries and runs the
//! recipe for the configured experiment.

use tracing::{info, instrument};

use crate::config::{ExperimentType, TargetConfig, TargetType};
use crate::error::{BuildError, Result};
use crate::material::{MaterialTable, StaticMaterialTable};
use crate::recipes::{
    c16_chamber, cryotarget, foil, gas_target, gen, gep_chamber, no_target, standard_chamber, tdis, BuildContext,
    Mount,
};
use crate::registry::{SensitiveDetectorRegistry, TargetVolumeRegistry};
use crate::scene::{GeometryStore, VisAttributes, VolumeId};
use crate::solid::Solid;
use crate::units::M;

/// Half-size of the world box along each axis.
pub const WORLD_HALF_SIZE: f64 = 5.0 * M;

pub const WORLD_NAME: &str = "World_log";

/// Builds the target proper at the mount its enclosing recipe chooses.
pub type TargetRecipe = fn(&mut BuildContext<'_>, &Mount) -> Result<()>;

/// Builds one experiment's target area in the world, running the given
/// target recipe where the target belongs.
pub type Recipe = fn(&mut BuildContext<'_>, TargetRecipe) -> Result<()>;

/// Target types a recipe can hold, each with the sub-recipe that builds it.
pub type TargetTable = &'static [(TargetType, &'static str, TargetRecipe)];

const CRYO_CHAMBER: TargetTable = &[
    (TargetType::Lh2, "cryotarget", cryotarget::build),
    (TargetType::Ld2, "cryotarget", cryotarget::build),
    (TargetType::Cfoil, "carbon foil", foil::build_carbon_foil),
    (TargetType::Optics, "optics foils", foil::build_optics),
    (TargetType::None, "no target", no_target),
];

const GEP_CHAMBER: TargetTable = &[
    (TargetType::Lh2, "cryotarget", cryotarget::build),
    (TargetType::Ld2, "cryotarget", cryotarget::build),
    (TargetType::None, "no target", no_target),
];

const C16_CHAMBER: TargetTable = &[
    (TargetType::Lh2, "cryotarget", cryotarget::build),
    (TargetType::Ld2, "cryotarget", cryotarget::build),
    (TargetType::Cfoil, "carbon foil", foil::build_carbon_foil),
    (TargetType::None, "no target", no_target),
];

const STRAW: TargetTable = &[
    (TargetType::H2, "gas straw", tdis::build_straw),
    (TargetType::D2, "gas straw", tdis::build_straw),
    (TargetType::He3, "gas straw", tdis::build_straw),
    (TargetType::Neutron, "gas straw", tdis::build_straw),
    (TargetType::None, "no target", no_target),
];

const POLARIZED_HE3: TargetTable = &[(TargetType::He3, "polarized 3He cell", gen::build_cell)];

const GAS_TARGET: TargetTable = &[
    (TargetType::H2, "glass cell", gas_target::build_glass_cell),
    (TargetType::D2, "glass cell", gas_target::build_glass_cell),
    (TargetType::He3, "glass cell", gas_target::build_glass_cell),
    (TargetType::Neutron, "glass cell", gas_target::build_glass_cell),
    (TargetType::Cfoil, "carbon foil", foil::build_carbon_foil),
    (TargetType::Optics, "optics foils", foil::build_optics),
    (TargetType::None, "no target", no_target),
];

/// Dispatch table: each experiment's recipe and the targets it can hold.
pub static RECIPES: &[(ExperimentType, &str, Recipe, TargetTable)] = &[
    (ExperimentType::Gep, "GEp scattering chamber", gep_chamber::build, GEP_CHAMBER),
    (ExperimentType::GepPositron, "GEp scattering chamber", gep_chamber::build, GEP_CHAMBER),
    (ExperimentType::C16, "C16 scattering chamber", c16_chamber::build, C16_CHAMBER),
    (ExperimentType::Tdis, "TDIS target", tdis::build, STRAW),
    (ExperimentType::Ndvcs, "TDIS target", tdis::build, STRAW),
    (ExperimentType::GemHcTest, "standard scattering chamber", standard_chamber::build, CRYO_CHAMBER),
    (ExperimentType::Gmn, "standard scattering chamber", standard_chamber::build, CRYO_CHAMBER),
    (ExperimentType::GenRp, "standard scattering chamber", standard_chamber::build, CRYO_CHAMBER),
    (ExperimentType::Gen, "GEn 3He target", gen::build, POLARIZED_HE3),
    (ExperimentType::Sidis, "gas target", gas_target::build, GAS_TARGET),
];

/// Recipe and target sub-recipe chosen for one (experiment, target) pair.
#[derive(Clone, Copy)]
pub struct Dispatch {
    pub recipe_name: &'static str,
    pub recipe: Recipe,
    pub target_name: &'static str,
    pub target: TargetRecipe,
}

/// Looks up the recipe for `experiment` and the sub-recipe for `target`
/// within it.
///
/// # Errors
///
/// Returns `Config` if no recipe is registered for the experiment or the
/// recipe cannot hold the target type.
pub fn recipe_for(experiment: ExperimentType, target: TargetType) -> Result<Dispatch> {
    let &(_, recipe_name, recipe, targets) = RECIPES
        .iter()
        .find(|(e, ..)| *e == experiment)
        .ok_or_else(|| BuildError::Config(format!("no recipe for {experiment:?}")))?;
    let &(_, target_name, target_recipe) = targets
        .iter()
        .find(|(t, ..)| *t == target)
        .ok_or_else(|| BuildError::Config(format!("{recipe_name} cannot hold a {target:?} target")))?;
    Ok(Dispatch {
        recipe_name,
        recipe,
        target_name,
        target: target_recipe,
    })
}

/// Builds the target geometry for one configuration.
///
/// The builder owns the geometry store, the target-volume registry and the
/// sensitive-detector registry. Call [`reset`](Self::reset) before building
/// again.
pub struct TargetBuilder {
    config: TargetConfig,
    materials: Box<dyn MaterialTable>,
    store: GeometryStore,
    targets: TargetVolumeRegistry,
    detectors: SensitiveDetectorRegistry,
    world: VolumeId,
}

impl TargetBuilder {
    /// Creates a builder using [`StaticMaterialTable::standard`].
    ///
    /// # Errors
    ///
    /// Returns `Config` if the configuration fails validation.
    pub fn new(config: TargetConfig) -> Result<Self> {
        Self::with_materials(config, Box::new(StaticMaterialTable::standard()))
    }

    /// Creates a builder that resolves materials through `materials`.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the configuration fails validation, and
    /// `UnknownMaterial` if the table has no `Air` for the world.
    pub fn with_materials(config: TargetConfig, materials: Box<dyn MaterialTable>) -> Result<Self> {
        config.validate()?;
        let mut store = GeometryStore::new();
        let world = make_world(&mut store, materials.as_ref())?;
        Ok(Self {
            config,
            materials,
            store,
            targets: TargetVolumeRegistry::new(),
            detectors: SensitiveDetectorRegistry::new(),
            world,
        })
    }

    /// Runs the recipe for the configured experiment and returns the world
    /// volume.
    ///
    /// # Errors
    ///
    /// Returns `Config` before anything is built if the experiment cannot
    /// hold the configured target type. Otherwise fails on the first
    /// geometry, scene, material, derivation or configuration error, and the
    /// store keeps whatever was built before it.
    #[instrument(skip(self), fields(experiment = ?self.config.experiment, target = ?self.config.target))]
    pub fn build(&mut self) -> Result<VolumeId> {
        let dispatch = recipe_for(self.config.experiment, self.config.target)?;
        info!(recipe = dispatch.recipe_name, target = dispatch.target_name, "building target");

        let mut ctx = BuildContext {
            config: &self.config,
            materials: self.materials.as_ref(),
            store: &mut self.store,
            targets: &mut self.targets,
            detectors: &mut self.detectors,
            world: self.world,
        };
        (dispatch.recipe)(&mut ctx, dispatch.target)?;

        info!(
            volumes = self.store.volume_count(),
            placements = self.store.placement_count(),
            target_volumes = self.targets.len(),
            overlap_warnings = self.store.overlap_warnings().len(),
            "target built"
        );
        Ok(self.world)
    }

    /// Clears the store, the target registry and the sensitive-volume
    /// registrations, then recreates an empty world.
    ///
    /// Detectors themselves survive, so their IDs stay valid.
    ///
    /// # Errors
    ///
    /// Returns `UnknownMaterial` if the table has no `Air`.
    pub fn reset(&mut self) -> Result<()> {
        self.store.clear();
        self.targets.clear();
        self.detectors.clear_registrations();
        self.world = make_world(&mut self.store, self.materials.as_ref())?;
        Ok(())
    }

    /// Replaces the configuration for the next build.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the new configuration fails validation; the old
    /// one is kept.
    pub fn set_config(&mut self, config: TargetConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    #[must_use]
    pub fn config(&self) -> &TargetConfig {
        &self.config
    }

    #[must_use]
    pub fn world(&self) -> VolumeId {
        self.world
    }

    #[must_use]
    pub fn store(&self) -> &GeometryStore {
        &self.store
    }

    #[must_use]
    pub fn targets(&self) -> &TargetVolumeRegistry {
        &self.targets
    }

    #[must_use]
    pub fn detectors(&self) -> &SensitiveDetectorRegistry {
        &self.detectors
    }

    /// Whether `name` is a target volume.
    #[must_use]
    pub fn is_target_volume(&self, name: &str) -> bool {
        self.targets.is_target_volume(name)
    }
}

fn make_world(store: &mut GeometryStore, materials: &dyn MaterialTable) -> Result<VolumeId> {
    let world_box = Solid::box_shape("World_box", WORLD_HALF_SIZE, WORLD_HALF_SIZE, WORLD_HALF_SIZE)?;
    let world = store.make_volume(world_box, materials, "Air", WORLD_NAME)?;
    store.set_vis(world, VisAttributes::invisible())?;
    store.set_world(world)?;
    Ok(world)
}
