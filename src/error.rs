use thiserror::Error;

/// Top-level error type for a geometry build.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error(transparent)]
    Material(#[from] MaterialError),

    #[error(transparent)]
    Derivation(#[from] DerivationError),

    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Errors raised while validating primitive shapes and transforms.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("invalid dimension for {part}: {parameter} = {value} ({reason})")]
    InvalidDimension {
        part: String,
        parameter: &'static str,
        value: f64,
        reason: &'static str,
    },
}

/// Errors related to the volume/placement store.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("duplicate volume name: {0}")]
    DuplicateName(String),

    #[error("volume not found: {0}")]
    VolumeNotFound(String),
}

/// Errors raised by the material table.
#[derive(Debug, Error)]
pub enum MaterialError {
    #[error("unknown material: {0}")]
    UnknownMaterial(String),
}

/// Errors from the analytic derivation routines.
#[derive(Debug, Error)]
pub enum DerivationError {
    #[error("ray is parallel to plane (direction . normal = {denominator})")]
    Grazing { denominator: f64 },

    #[error("{quantity} = {value} is outside the domain of the derivation")]
    OutOfDomain { quantity: &'static str, value: f64 },
}

impl GeometryError {
    /// Shorthand for an [`InvalidDimension`](GeometryError::InvalidDimension) error.
    pub fn invalid(
        part: impl Into<String>,
        parameter: &'static str,
        value: f64,
        reason: &'static str,
    ) -> Self {
        Self::InvalidDimension {
            part: part.into(),
            parameter,
            value,
            reason,
        }
    }
}

/// Convenience type alias for results using [`BuildError`].
pub type Result<T> = std::result::Result<T, BuildError>;
