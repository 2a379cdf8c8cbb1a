//! Solid carbon targets: a single foil, or a stack of optics foils.

use super::{cylinder, BuildContext, Mount};
use crate::config::default_optics_foils;
use crate::error::{BuildError, Result};
use crate::math::Vector3;
use crate::scene::{Colour, VisAttributes};
use crate::solid::Solid;
use crate::transform::Transform;
use crate::units::MM;

/// Clearance between the foils and the walls of the optics mother box.
const MOTHER_CLEARANCE: f64 = 1.0 * MM;

/// Single carbon disc as long and wide as the configured target.
///
/// # Errors
///
/// Propagates geometry, material and naming errors.
pub fn build_carbon_foil(ctx: &mut BuildContext<'_>, mount: &Mount) -> Result<()> {
    let disc = cylinder(
        "Target_solid",
        0.0,
        ctx.config.target_diameter / 2.0,
        ctx.config.target_length / 2.0,
    )?;
    let target = ctx.volume(disc, "Carbon", "Target_log")?;
    ctx.set_vis(target, VisAttributes::coloured(Colour::grey(0.2)))?;
    ctx.place_at(target, mount, "Target_phys", false)?;
    Ok(())
}

/// Square carbon foils stacked along the mount's z axis.
///
/// The foils sit in a box filled with the same material as the parent,
/// which is placed once with its centre halfway between the outermost foils.
/// Without configured foils the default three-foil stack is used.
///
/// # Errors
///
/// Propagates geometry, material and naming errors.
pub fn build_optics(ctx: &mut BuildContext<'_>, mount: &Mount) -> Result<()> {
    let mut foils: Vec<(f64, f64)> = ctx.config.foils().collect();
    if foils.is_empty() {
        foils = default_optics_foils();
    }
    let (mut z_min, mut z_max, mut max_thickness) = (f64::INFINITY, f64::NEG_INFINITY, 0.0_f64);
    for &(thickness, z) in &foils {
        z_min = z_min.min(z);
        z_max = z_max.max(z);
        max_thickness = max_thickness.max(thickness);
    }
    if !z_min.is_finite() || !z_max.is_finite() {
        return Err(BuildError::Config("optics foil positions must be finite".into()));
    }
    let z_center = (z_max + z_min) / 2.0;
    let half_width = ctx.config.target_diameter / 2.0;

    let mother_box = Solid::box_shape(
        "MultiFoil_MotherBox",
        half_width + MOTHER_CLEARANCE,
        half_width + MOTHER_CLEARANCE,
        (z_max - z_min) / 2.0 + max_thickness + MOTHER_CLEARANCE,
    )?;
    let fill = ctx.material_name(mount.parent)?;
    let mother = ctx.volume(mother_box, &fill, "MultiFoil_MotherLog")?;
    ctx.set_vis(mother, VisAttributes::invisible())?;

    for (i, &(thickness, z)) in foils.iter().enumerate() {
        let box_name = format!("TargFoil_box{i}");
        let log_name = format!("{box_name}_log");
        let foil_box = Solid::box_shape(&box_name, half_width, half_width, thickness / 2.0)?;
        let foil = ctx.target_volume(foil_box, "Carbon", &log_name)?;
        ctx.set_vis(foil, VisAttributes::coloured(Colour::grey(0.8)))?;
        ctx.place(
            foil,
            mother,
            Transform::translation(0.0, 0.0, z - z_center),
            0,
            &format!("{box_name}_phys"),
            false,
        )?;
    }

    let stack_mount = mount.shifted(Vector3::new(0.0, 0.0, z_center));
    ctx.place_at(mother, &stack_mount, "MultiFoil_MotherPhys", false)?;
    Ok(())
}
