//! Particle-flux counting sphere.
//!
//! A thin Air shell around the target that records every particle crossing
//! it and then kills the track.

use super::{BuildContext, Mount};
use crate::error::Result;
use crate::scene::UserLimits;
use crate::solid::Solid;
use crate::units::{CM, DEG};

pub const FLUX_DETECTOR: &str = "FLUX";
pub const FLUX_COLLECTION: &str = "FLUXHitsCollection";

/// Polar extent of the shell; the backward cone is left open for the beam.
const THETA_SPAN: f64 = 150.0 * DEG;
const SHELL_THICKNESS: f64 = 1.0 * CM;

/// Builds the flux sphere for a target of length `target_length`.
///
/// # Errors
///
/// Propagates geometry, material and naming errors.
pub fn build(ctx: &mut BuildContext<'_>, mount: &Mount, target_length: f64) -> Result<()> {
    let r_inner = 1.5 * target_length / 2.0;
    let shell = Solid::sphere(
        "fsph",
        r_inner,
        r_inner + SHELL_THICKNESS,
        0.0,
        360.0 * DEG,
        0.0,
        THETA_SPAN,
    )?;
    let fsph = ctx.volume(shell, "Air", "fsph_log")?;
    ctx.place_at(fsph, mount, "fsph_phys", false)?;
    ctx.make_sensitive(fsph, FLUX_DETECTOR, FLUX_COLLECTION, 0)?;
    ctx.set_user_limits(fsph, UserLimits::kill_all())?;
    Ok(())
}
