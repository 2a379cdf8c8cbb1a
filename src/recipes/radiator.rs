//! Copper bremsstrahlung radiator upstream of the target.

use super::{BuildContext, Mount};
use crate::error::Result;
use crate::solid::Solid;

const RADIATOR_MATERIAL: &str = "Copper";

/// Places a copper plate as wide as the target and
/// `radiator_thickness_fraction` radiation lengths thick at `mount`.
///
/// # Errors
///
/// Returns `InvalidDimension` for a non-positive thickness, and material or
/// naming errors.
pub fn build(ctx: &mut BuildContext<'_>, mount: &Mount) -> Result<()> {
    let half_width = ctx.config.target_diameter / 2.0;
    let thickness = ctx.materials.radiation_length(RADIATOR_MATERIAL)? * ctx.config.radiator_thickness_fraction;
    let plate = Solid::box_shape("radbox", half_width, half_width, thickness / 2.0)?;
    let radiator = ctx.volume(plate, RADIATOR_MATERIAL, "radlog")?;
    ctx.place_at(radiator, mount, "radphys", false)?;
    Ok(())
}
