//! NMR pickup coils and their aluminium mounts, one pair either side of
//! the target chamber, upstream and downstream.

use super::{frame, CHECK_OVERLAPS};
use crate::error::Result;
use crate::math::Vector3;
use crate::recipes::BuildContext;
use crate::scene::{Colour, VisAttributes};
use crate::solid::Solid;
use crate::transform::Transform;
use crate::units::{CM, DEG, INCH, MM};

const DARK_ORANGE: Colour = Colour::rgb(1.0, 140.0 / 255.0, 0.0);

/// Full sizes of the boxes making up a coil and its mount.
const BASE: (f64, f64, f64) = (6.0 * MM, 48.0 * MM, 67.0 * MM);
const COIL: (f64, f64, f64) = (4.0 * MM, 30.0 * MM, 120.0 * MM);
const HOLDER: (f64, f64, f64) = (8.0 * MM, 30.0 * MM, 120.0 * MM);
/// Width of the copper frame of a coil.
const COIL_FRAME: f64 = 0.5 * CM;

/// Height of the coil centre relative to the beam.
const COIL_HEIGHT: f64 = -1.1 * INCH - 1.5 * CM;
const COIL_Z: f64 = 7.2 * CM;

fn half_box(name: &str, size: (f64, f64, f64)) -> Result<Solid> {
    Solid::box_shape(name, size.0 / 2.0, size.1 / 2.0, size.2 / 2.0)
}

/// Rectangular copper loop, open through x.
fn coil_solid() -> Result<Solid> {
    let outer = half_box("coilOuter", COIL)?;
    let window = Solid::box_shape(
        "coilCut",
        2.0 * COIL.0,
        (COIL.1 - 2.0 * COIL_FRAME) / 2.0,
        (COIL.2 - 2.0 * COIL_FRAME) / 2.0,
    )?;
    Ok(outer.subtract("coil", &window, Transform::identity()))
}

/// U-notched base plate joined to a holder with the coil's footprint
/// pressed into one face.
fn mount_solid(coil: &Solid) -> Result<Solid> {
    let notch_height = 2.0 * 1.3 * CM;
    let notch = Solid::box_shape("Ucut", BASE.0, notch_height / 2.0, 3.2 * CM / 2.0)?;
    let base = half_box("coilB", BASE)?.subtract(
        "coilMount",
        &notch,
        Transform::translation(0.0, 1.1 * CM + notch_height / 2.0, 0.0),
    );
    let holder = half_box("cmnt", HOLDER)?.subtract("coilMount", coil, Transform::translation(COIL.0 / 2.0, 0.0, 0.0));
    Ok(base.union(
        "coilBMNT",
        &holder,
        Transform::translation(BASE.0 / 2.0 + HOLDER.0 / 2.0, 0.9 * CM, 0.0),
    ))
}

/// Positions of copies 0 to 3: beam left and right, downstream then
/// upstream. Beam-left copies are turned around to face the cell.
fn corners(x: f64, y: f64, z: f64) -> [(Vector3, f64); 4] {
    [
        (Vector3::new(x, y, z), 180.0 * DEG),
        (Vector3::new(-x, y, z), 0.0),
        (Vector3::new(x, y, -z), 180.0 * DEG),
        (Vector3::new(-x, y, -z), 0.0),
    ]
}

fn place_set(
    ctx: &mut BuildContext<'_>,
    solid: &Solid,
    material: &str,
    kind: &str,
    vis: VisAttributes,
    positions: [(Vector3, f64); 4],
) -> Result<()> {
    let world = ctx.world;
    for (copy, (position, turn)) in (0u32..).zip(positions) {
        let id = ctx.target_volume(solid.clone(), material, &format!("logicGEnTarget_{kind}_{copy}"))?;
        ctx.set_vis(id, vis)?;
        ctx.place(
            id,
            world,
            Transform::from_frame(frame(0.0, turn, 0.0), position),
            copy,
            &format!("physGEnTarget_{kind}_{copy}"),
            CHECK_OVERLAPS,
        )?;
    }
    Ok(())
}

/// Places the four mounts, then the four coils.
pub(super) fn build(ctx: &mut BuildContext<'_>) -> Result<()> {
    let coil = coil_solid()?;
    let mount = mount_solid(&coil)?;

    let mount_x = 2.5 * CM / 2.0 + BASE.0 / 2.0 + HOLDER.0 + COIL.0;
    let mount_y = COIL_HEIGHT - 0.9 * CM;
    place_set(
        ctx,
        &mount,
        "Aluminum",
        "PUCoilMNT",
        VisAttributes::coloured(Colour::MAGENTA),
        corners(mount_x, mount_y, COIL_Z),
    )?;

    let coil_x = mount_x - COIL.0 / 2.0 - HOLDER.0;
    place_set(
        ctx,
        &coil,
        "Copper",
        "PUCoil",
        VisAttributes::coloured(DARK_ORANGE),
        corners(coil_x, COIL_HEIGHT, COIL_Z),
    )
}
