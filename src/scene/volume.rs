use crate::material::MaterialHandle;
use crate::registry::SensitiveDetectorId;
use crate::solid::Solid;

slotmap::new_key_type! {
    /// Unique identifier for a logical volume in the geometry store.
    pub struct VolumeId;
}

/// RGBA colour with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Colour {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub alpha: f64,
}

impl Colour {
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const GREY: Self = Self::rgb(0.5, 0.5, 0.5);
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Self = Self::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);
    pub const YELLOW: Self = Self::rgb(1.0, 1.0, 0.0);
    pub const MAGENTA: Self = Self::rgb(1.0, 0.0, 1.0);
    pub const CYAN: Self = Self::rgb(0.0, 1.0, 1.0);

    /// Opaque colour.
    #[must_use]
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, alpha: 1.0 }
    }

    /// Opaque grey of the given brightness.
    #[must_use]
    pub const fn grey(level: f64) -> Self {
        Self::rgb(level, level, level)
    }
}

/// Rendering hints handed to the visualization layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisAttributes {
    /// `None` leaves the renderer's default colour.
    pub colour: Option<Colour>,
    pub visible: bool,
    pub wireframe: bool,
}

impl Default for VisAttributes {
    fn default() -> Self {
        Self {
            colour: None,
            visible: true,
            wireframe: false,
        }
    }
}

impl VisAttributes {
    #[must_use]
    pub fn coloured(colour: Colour) -> Self {
        Self {
            colour: Some(colour),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn invisible() -> Self {
        Self {
            visible: false,
            ..Self::default()
        }
    }

    /// Same attributes, drawn as wireframe.
    #[must_use]
    pub fn wireframe(self) -> Self {
        Self {
            wireframe: true,
            ..self
        }
    }
}

/// Step and tracking limits attached to a volume.
///
/// `None` means no limit.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct UserLimits {
    pub max_step: Option<f64>,
    pub max_track_length: Option<f64>,
    pub max_time: Option<f64>,
    pub min_kinetic_energy: Option<f64>,
    pub min_range: Option<f64>,
}

impl UserLimits {
    /// Limits that stop every track on its first step inside the volume.
    #[must_use]
    pub fn kill_all() -> Self {
        Self {
            max_step: Some(0.0),
            max_track_length: Some(0.0),
            max_time: Some(0.0),
            min_kinetic_energy: Some(f64::MAX),
            min_range: Some(f64::MAX),
        }
    }
}

/// Link from a volume to the sensitive detector that records hits in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sensitivity {
    pub detector: SensitiveDetectorId,
    /// Placement-tree depth used to build the hit's copy-number history.
    pub depth: u32,
}

/// A solid filled with a material.
#[derive(Debug, Clone)]
pub struct LogicalVolume {
    pub name: String,
    pub solid: Solid,
    pub material: MaterialHandle,
    pub vis: VisAttributes,
    pub sensitivity: Option<Sensitivity>,
    pub limits: Option<UserLimits>,
}

impl LogicalVolume {
    #[must_use]
    pub fn new(name: impl Into<String>, solid: Solid, material: MaterialHandle) -> Self {
        Self {
            name: name.into(),
            solid,
            material,
            vis: VisAttributes::default(),
            sensitivity: None,
            limits: None,
        }
    }
}
