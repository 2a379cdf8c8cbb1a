//! Radial time-projection chamber around the TDIS gas target.

use super::{BuildContext, Mount};
use crate::error::Result;
use crate::scene::{Colour, VisAttributes};
use crate::solid::Solid;
use crate::transform::Transform;
use crate::units::{CM, DEG, MM};

pub const INNER_RADIUS: f64 = 5.0 * CM;
pub const OUTER_RADIUS: f64 = 15.0 * CM;
pub const WALL_THICKNESS: f64 = 0.002 * MM;
/// The drift volume runs this much longer than the target.
pub const EXTRA_LENGTH: f64 = 10.0 * CM;

fn shell(name: &str, r_inner: f64, r_outer: f64, half_length: f64) -> Result<Solid> {
    Solid::tube(name, r_inner, r_outer, half_length, 0.0, 360.0 * DEG)
}

/// Places the TPC, a helium drift volume between two Kapton walls, at
/// `mount`.
///
/// # Errors
///
/// Propagates geometry, material and naming errors.
pub fn build(ctx: &mut BuildContext<'_>, mount: &Mount) -> Result<()> {
    let half_length = (ctx.config.target_length + EXTRA_LENGTH) / 2.0;
    let (r_in, r_out, wall) = (INNER_RADIUS, OUTER_RADIUS, WALL_THICKNESS);

    let mother = ctx.volume(shell("TPCmother_solid", r_in, r_out, half_length)?, "Air", "TPCmother_log")?;
    let inner = ctx.volume(
        shell("TPCinnerwall_solid", r_in, r_in + wall, half_length)?,
        "Kapton",
        "TPCinnerwall_log",
    )?;
    let outer = ctx.volume(
        shell("TPCouterwall_solid", r_out - wall, r_out, half_length)?,
        "Kapton",
        "TPCouterwall_log",
    )?;
    let gas = ctx.volume(
        shell("TPCgas_solid", r_in + wall, r_out - wall, half_length)?,
        "ref4He",
        "TPCgas_log",
    )?;

    ctx.place_at(mother, mount, "TPCmother_phys", false)?;
    for (id, name) in [(inner, "TPCinnerwall_phys"), (outer, "TPCouterwall_phys"), (gas, "TPCgas_phys")] {
        ctx.place(id, mother, Transform::identity(), 0, name, false)?;
    }

    ctx.set_vis(mother, VisAttributes::invisible())?;
    let walls = VisAttributes::coloured(Colour::WHITE).wireframe();
    ctx.set_vis(inner, walls)?;
    ctx.set_vis(outer, walls)?;
    ctx.set_vis(
        gas,
        VisAttributes::coloured(Colour {
            alpha: 0.5,
            ..Colour::YELLOW
        }),
    )?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::TargetConfig;
    use crate::math::{Point3, Vector3};
    use crate::recipes::testing::Harness;

    #[test]
    fn walls_enclose_the_drift_gas() {
        let mut h = Harness::new(TargetConfig::default());
        let world = h.world;
        build(&mut h.ctx(), &Mount::at(world, Vector3::new(0.0, 0.0, 50.0))).unwrap();

        assert_eq!(h.children_of("World_log"), ["TPCmother_phys"]);
        assert_eq!(
            h.children_of("TPCmother_log"),
            ["TPCinnerwall_phys", "TPCouterwall_phys", "TPCgas_phys"]
        );
        let gas = h.store.volume(h.id("TPCgas_log")).unwrap();
        assert_eq!(gas.material.name(), "ref4He");
        assert!(gas.solid.contains(&Point3::new(100.0, 0.0, 340.0)));
        assert!(!gas.solid.contains(&Point3::new(100.0, 0.0, 360.0)));
        assert!(!gas.solid.contains(&Point3::new(0.0, 0.0, 0.0)));
        assert_eq!(gas.vis.colour.map(|c| c.alpha), Some(0.5));
        assert!(!h.store.volume(h.id("TPCmother_log")).unwrap().vis.visible);
    }
}
