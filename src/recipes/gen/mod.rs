//! Polarized ³He target of the GEn experiment.
//!
//! Everything is placed directly in the world with overlap checking on:
//! the GE180 glass cell with its transfer tubes and pumping chamber, copper
//! end windows, the ³He fill, three Helmholtz coil pairs, a two-layer
//! magnetic shield, the Ultem ladder and the NMR pickup coils.

mod cell;
mod helmholtz;
mod ladder;
mod pickup_coils;
mod shield;

pub use helmholtz::CoilKind;

use tracing::info;

use super::{BuildContext, Mount};
use crate::builder::TargetRecipe;
use crate::error::Result;
use crate::math::Vector3;
use crate::transform::Rotation;

const CHECK_OVERLAPS: bool = true;

/// Geant4-style part frame: rotate about x, then y, then z.
fn frame(rx: f64, ry: f64, rz: f64) -> Rotation {
    Rotation::identity().rotate_x(rx).rotate_y(ry).rotate_z(rz)
}

/// Glass cell, copper end windows and ³He fill, centred on `mount`.
///
/// # Errors
///
/// Propagates geometry, material and naming errors.
pub fn build_cell(ctx: &mut BuildContext<'_>, mount: &Mount) -> Result<()> {
    cell::build_glass_cell(ctx, mount)?;
    cell::build_end_windows(ctx, mount)?;
    cell::build_polarized_he3(ctx, mount)
}

/// Builds the target at the world origin, then the coils, shield, ladder
/// and pickup coils around it.
///
/// # Errors
///
/// Propagates geometry, material and naming errors.
pub fn build(ctx: &mut BuildContext<'_>, target: TargetRecipe) -> Result<()> {
    let config = ctx.config.gen_config;
    match config.q_squared() {
        Some(q2) => info!(q2, "building GEn target"),
        None => info!(?config, "building GEn target"),
    }

    let world = ctx.world;
    target(ctx, &Mount::at(world, Vector3::zeros()))?;
    for kind in CoilKind::ALL {
        helmholtz::build(ctx, kind, config)?;
    }
    shield::build(ctx, config)?;
    ladder::build(ctx)?;
    pickup_coils::build(ctx)
}
