//! Ultem ladder plate carrying the cell, below and beam right of it.

use super::{frame, CHECK_OVERLAPS};
use crate::error::Result;
use crate::math::Vector3;
use crate::recipes::BuildContext;
use crate::scene::{Colour, VisAttributes};
use crate::solid::Solid;
use crate::transform::Transform;
use crate::units::{CM, DEG, INCH, MM};

const BAR_THICKNESS: f64 = 12.7 * MM;
const BAR_WIDTH: f64 = 38.1 * MM;
/// Upstream upright, relative to the ladder origin.
const UPRIGHT_Z: f64 = -363.0 * MM;

fn bar(name: &str, height: f64, length: f64) -> Result<Solid> {
    Solid::box_shape(name, BAR_THICKNESS / 2.0, height / 2.0, length / 2.0)
}

/// Two uprights joined by a straight bar above and below and four slanted
/// braces. Coordinates are relative to the upstream upright.
fn ladder_solid() -> Result<Solid> {
    let upright = bar("lvu", 203.2 * MM, BAR_WIDTH)?;
    let braces = [
        ("lud", bar("lvd", 203.2 * MM, BAR_WIDTH)?, 0.0, (0.0, 726.0)),
        ("lud_a", bar("la", BAR_WIDTH, 370.0 * MM)?, 0.0, (226.4, 314.2)),
        ("lud_ab", bar("lb", BAR_WIDTH, 114.3 * MM)?, 0.0, (-158.3, 314.2)),
        ("lud_ab_aau", bar("aau", BAR_WIDTH, 240.0 * MM)?, 45.0 * DEG, (150.0, 70.4)),
        ("lud_ab_aaud", bar("aad", BAR_WIDTH, 280.0 * MM)?, -36.0 * DEG, (150.0, 600.0)),
        ("lud_ab_aaud_abu", bar("abu", BAR_WIDTH, 282.0 * MM)?, -14.4 * DEG, (-125.0, 131.0)),
        ("ladder", bar("abd", BAR_WIDTH, 350.0 * MM)?, 11.3 * DEG, (-125.0, 540.0)),
    ];
    Ok(braces.iter().fold(upright, |ladder, (name, piece, tilt, (y, z))| {
        ladder.union(*name, piece, Transform::from_frame(frame(*tilt, 0.0, 0.0), Vector3::new(0.0, *y, *z)))
    }))
}

pub(super) fn build(ctx: &mut BuildContext<'_>) -> Result<()> {
    let world = ctx.world;
    let ladder = ctx.target_volume(ladder_solid()?, "Ultem", "logicGEnTarget_Ladder")?;
    ctx.set_vis(ladder, VisAttributes::coloured(Colour::RED))?;
    let position = Transform::translation(-0.438 * INCH, -5.33 * CM, UPRIGHT_Z + 1.0 * MM);
    ctx.place(ladder, world, position, 0, "physLadder", CHECK_OVERLAPS)?;
    Ok(())
}
