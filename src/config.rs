//! Build configuration.
//!
//! All lengths are millimetres. A configuration can be written by hand in
//! TOML:
//!
//! ```toml
//! experiment = "gep"
//! target = "lh2"
//! target_length = 400.0
//! use_radiator = true
//! radiator_thickness_fraction = 0.06
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{BuildError, Result};
use crate::units::{CM, MM};

/// Experiment whose target area is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperimentType {
    Gep,
    GepPositron,
    C16,
    Tdis,
    Ndvcs,
    GemHcTest,
    Gmn,
    GenRp,
    Gen,
    Sidis,
}

impl ExperimentType {
    /// Every experiment type, in declaration order.
    pub const ALL: [Self; 10] = [
        Self::Gep,
        Self::GepPositron,
        Self::C16,
        Self::Tdis,
        Self::Ndvcs,
        Self::GemHcTest,
        Self::Gmn,
        Self::GenRp,
        Self::Gen,
        Self::Sidis,
    ];
}

/// What fills the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetType {
    /// Liquid hydrogen cryotarget.
    Lh2,
    /// Liquid deuterium cryotarget.
    Ld2,
    /// Hydrogen gas.
    H2,
    /// Deuterium gas.
    D2,
    /// Polarized helium-3 gas.
    He3,
    /// Hydrogen gas standing in for a free-neutron target.
    Neutron,
    /// Single carbon foil.
    Cfoil,
    /// Stack of carbon foils for optics calibration.
    Optics,
    /// No target: the chamber or apparatus is built empty.
    None,
}

impl TargetType {
    /// Every target type, in declaration order.
    pub const ALL: [Self; 9] = [
        Self::Lh2,
        Self::Ld2,
        Self::H2,
        Self::D2,
        Self::He3,
        Self::Neutron,
        Self::Cfoil,
        Self::Optics,
        Self::None,
    ];

    /// Gas fill for the gas-cell recipes. Solid, cryogenic and empty
    /// targets have none.
    #[must_use]
    pub fn gas_material(self) -> Option<&'static str> {
        match self {
            Self::H2 | Self::Neutron => Some("refH2"),
            Self::D2 => Some("refD2"),
            Self::He3 => Some("pol3He"),
            Self::Lh2 | Self::Ld2 | Self::Cfoil | Self::Optics | Self::None => None,
        }
    }

    /// Liquid in the cryotarget cell, for the two cryogenic types only.
    #[must_use]
    pub fn cryo_material(self) -> Option<&'static str> {
        match self {
            Self::Lh2 => Some("LH2"),
            Self::Ld2 => Some("LD2"),
            Self::H2 | Self::D2 | Self::He3 | Self::Neutron | Self::Cfoil | Self::Optics | Self::None => None,
        }
    }
}

/// Running period of the polarized helium-3 target. Selects the
/// Helmholtz coil tilt and the magnetic-shield window cuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenConfig {
    /// Q² = 1.46 GeV².
    Gen146,
    /// Q² = 3.68 GeV².
    Gen368,
    /// Q² = 6.77 GeV².
    Gen677,
    /// Q² = 10.18 GeV².
    Gen1018,
    /// Shield with every beam-right window open.
    Full,
    /// Redesigned shield with tall side windows.
    New,
}

impl GenConfig {
    /// Momentum transfer of the running period in GeV², if it is one.
    #[must_use]
    pub fn q_squared(self) -> Option<f64> {
        match self {
            Self::Gen146 => Some(1.46),
            Self::Gen368 => Some(3.68),
            Self::Gen677 => Some(6.77),
            Self::Gen1018 => Some(10.18),
            Self::Full | Self::New => None,
        }
    }
}

/// Build-wide control of overlap checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapPolicy {
    /// Each recipe keeps its own setting.
    #[default]
    PerRecipe,
    Always,
    Never,
}

impl OverlapPolicy {
    /// Whether to check a placement whose recipe asks for `recipe_default`.
    #[must_use]
    pub fn resolve(self, recipe_default: bool) -> bool {
        match self {
            Self::PerRecipe => recipe_default,
            Self::Always => true,
            Self::Never => false,
        }
    }
}

/// Everything a target build needs to know.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    pub experiment: ExperimentType,
    pub target: TargetType,
    /// Length of the target cell.
    pub target_length: f64,
    pub target_diameter: f64,
    pub use_radiator: bool,
    /// Distance of the radiator upstream of the upstream end of the cell.
    pub radiator_z_offset: f64,
    /// Radiator thickness in units of the copper radiation length.
    pub radiator_thickness_fraction: f64,
    /// Thickness of each optics foil.
    pub foil_thicknesses: Vec<f64>,
    /// Beam-axis position of each optics foil.
    pub foil_z_positions: Vec<f64>,
    /// Adds the particle-flux sphere around the target.
    pub flux_sphere: bool,
    /// Encloses the gas target in a beamline scattering chamber.
    pub scattering_chamber: bool,
    pub gen_config: GenConfig,
    pub overlap_policy: OverlapPolicy,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            experiment: ExperimentType::Gmn,
            target: TargetType::Lh2,
            target_length: 60.0 * CM,
            target_diameter: 8.0 * CM,
            use_radiator: false,
            radiator_z_offset: 10.0 * CM,
            radiator_thickness_fraction: 0.0,
            foil_thicknesses: Vec::new(),
            foil_z_positions: Vec::new(),
            flux_sphere: false,
            scattering_chamber: false,
            gen_config: GenConfig::Gen146,
            overlap_policy: OverlapPolicy::PerRecipe,
        }
    }
}

impl TargetConfig {
    /// Parses a TOML document; missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the document does not parse or fails
    /// [`validate`](Self::validate).
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source).map_err(|err| BuildError::Config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration back to TOML.
    ///
    /// # Errors
    ///
    /// Returns `Config` if serialization fails.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|err| BuildError::Config(err.to_string()))
    }

    /// Checks that the target dimensions and foil lists make sense.
    ///
    /// # Errors
    ///
    /// Returns `Config` describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("target_length", self.target_length),
            ("target_diameter", self.target_diameter),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(BuildError::Config(format!("{field} must be positive, got {value}")));
            }
        }
        if self.foil_thicknesses.len() != self.foil_z_positions.len() {
            return Err(BuildError::Config(format!(
                "{} foil thicknesses but {} foil positions",
                self.foil_thicknesses.len(),
                self.foil_z_positions.len()
            )));
        }
        if let Some(t) = self.foil_thicknesses.iter().find(|t| !t.is_finite() || **t <= 0.0) {
            return Err(BuildError::Config(format!("foil thickness must be positive, got {t}")));
        }
        if self.use_radiator
            && (!self.radiator_thickness_fraction.is_finite() || self.radiator_thickness_fraction <= 0.0)
        {
            return Err(BuildError::Config(format!(
                "radiator enabled with thickness fraction {}",
                self.radiator_thickness_fraction
            )));
        }
        Ok(())
    }

    /// Replaces the optics foils.
    pub fn set_foils(&mut self, foils: impl IntoIterator<Item = (f64, f64)>) {
        let (thicknesses, positions): (Vec<f64>, Vec<f64>) = foils.into_iter().unzip();
        self.foil_thicknesses = thicknesses;
        self.foil_z_positions = positions;
    }

    /// `(thickness, z)` of every optics foil.
    pub fn foils(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.foil_thicknesses
            .iter()
            .copied()
            .zip(self.foil_z_positions.iter().copied())
    }
}

/// Foil stack used when an optics target is requested without explicit
/// foils: three 0.25 mm carbon foils spaced 15 cm apart.
#[must_use]
pub fn default_optics_foils() -> Vec<(f64, f64)> {
    [-15.0 * CM, 0.0, 15.0 * CM]
        .into_iter()
        .map(|z| (0.25 * MM, z))
        .collect()
}
