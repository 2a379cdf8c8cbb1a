//! Liquid hydrogen/deuterium cryotarget.
//!
//! A vacuum mother tube holds the liquid cell, its aluminium side wall and
//! the two end windows. The cell axis is the mother's local z.

use super::{cylinder, flux, radiator, BuildContext, Mount};
use crate::error::{BuildError, Result};
use crate::math::Vector3;
use crate::scene::{Colour, VisAttributes};
use crate::transform::Transform;
use crate::units::MM;

pub const UPSTREAM_WINDOW: f64 = 0.1 * MM;
pub const DOWNSTREAM_WINDOW: f64 = 0.15 * MM;
pub const SIDE_WALL: f64 = 0.2 * MM;

/// Builds the cryotarget at `mount`, plus the radiator and flux sphere
/// when configured.
///
/// # Errors
///
/// Returns `Config` unless the target is LH2 or LD2, and propagates
/// geometry, material and naming errors.
pub fn build(ctx: &mut BuildContext<'_>, mount: &Mount) -> Result<()> {
    let target = ctx.config.target;
    let liquid = target
        .cryo_material()
        .ok_or_else(|| BuildError::Config(format!("cryotarget cannot hold {target:?}")))?;
    let length = ctx.config.target_length;
    let r_cell = ctx.config.target_diameter / 2.0;
    let (u, d, s) = (UPSTREAM_WINDOW, DOWNSTREAM_WINDOW, SIDE_WALL);
    let total = length + u + d;

    let mother = ctx.volume(
        cylinder("TargetMother_solid", 0.0, r_cell + s, total / 2.0)?,
        "Vacuum",
        "TargetMother_log",
    )?;
    let cell = ctx.target_volume(
        cylinder("TargetCell", 0.0, r_cell, length / 2.0)?,
        liquid,
        "TargetCell_log",
    )?;
    let wall = ctx.target_volume(
        cylinder("TargetWall", r_cell, r_cell + s, length / 2.0)?,
        "Al",
        "TargetWall_log",
    )?;
    let uwindow = ctx.target_volume(
        cylinder("UpstreamWindow", 0.0, r_cell + s, u / 2.0)?,
        "Al",
        "uwindow_log",
    )?;
    let dwindow = ctx.target_volume(
        cylinder("DownstreamWindow", 0.0, r_cell + s, d / 2.0)?,
        "Al",
        "dwindow_log",
    )?;

    let z0 = -total / 2.0;
    ctx.place(uwindow, mother, Transform::translation(0.0, 0.0, z0 + u / 2.0), 0, "uwindow_phys", false)?;
    let z_cell = z0 + u + length / 2.0;
    ctx.place(cell, mother, Transform::translation(0.0, 0.0, z_cell), 0, "TargetCell_phys", false)?;
    ctx.place(wall, mother, Transform::translation(0.0, 0.0, z_cell), 0, "TargetWall_phys", false)?;
    let z_down = z0 + u + length + d / 2.0;
    ctx.place(dwindow, mother, Transform::translation(0.0, 0.0, z_down), 0, "dwindow_phys", false)?;

    // shift so the cell, not the mother, is centred on the mount
    let target_mount = mount.shifted(Vector3::new(0.0, (u - d) / 2.0, 0.0));
    ctx.place_at(mother, &target_mount, "TargetMother_phys", false)?;

    if ctx.config.use_radiator {
        let upstream = Vector3::new(0.0, length / 2.0 + ctx.config.radiator_z_offset, 0.0);
        let radiator_mount = Mount {
            offset: target_mount.offset - upstream,
            ..target_mount
        };
        radiator::build(ctx, &radiator_mount)?;
    }
    if ctx.config.flux_sphere {
        flux::build(ctx, &target_mount, length)?;
    }

    ctx.set_vis(cell, VisAttributes::coloured(Colour::rgb(0.1, 0.05, 0.9)))?;
    let wall_vis = VisAttributes::coloured(Colour::rgb(0.9, 0.05, 0.1)).wireframe();
    for id in [wall, uwindow, dwindow] {
        ctx.set_vis(id, wall_vis)?;
    }
    ctx.set_vis(mother, VisAttributes::invisible())?;
    Ok(())
}
