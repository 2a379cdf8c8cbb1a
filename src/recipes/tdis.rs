//! TDIS / nDVCS target: a thin aluminium gas straw surrounded by the TPC.

use super::gas_target::{require_gas, STRAW_CELL};
use super::{flux, tpc, BuildContext, Mount};
use crate::builder::TargetRecipe;
use crate::error::Result;
use crate::math::Vector3;
use crate::units::CM;

/// The TPC is centred this far downstream of the target centre.
const TPC_OFFSET: f64 = 5.0 * CM;

/// Aluminium straw filled with the configured gas, centred on `mount`.
///
/// # Errors
///
/// Returns `Config` unless the target is a gas, and propagates geometry,
/// material and naming errors.
pub fn build_straw(ctx: &mut BuildContext<'_>, mount: &Mount) -> Result<()> {
    let gas = require_gas(ctx.config.target, "TDIS target")?;
    STRAW_CELL.build(ctx, mount, gas).map(|_| ())
}

/// Builds `target` at the world origin and the TPC around it.
///
/// # Errors
///
/// Propagates geometry, material and naming errors.
pub fn build(ctx: &mut BuildContext<'_>, target: TargetRecipe) -> Result<()> {
    let world = ctx.world;
    if ctx.config.flux_sphere {
        let length = ctx.config.target_length;
        flux::build(ctx, &Mount::at(world, Vector3::zeros()), length)?;
    }
    target(ctx, &Mount::at(world, Vector3::zeros()))?;
    tpc::build(ctx, &Mount::at(world, Vector3::new(0.0, 0.0, TPC_OFFSET)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::{ExperimentType, TargetConfig, TargetType};
    use crate::error::BuildError;
    use crate::recipes::testing::Harness;
    use approx::assert_relative_eq;

    #[test]
    fn straw_then_tpc() {
        let mut h = Harness::new(TargetConfig {
            experiment: ExperimentType::Tdis,
            target: TargetType::H2,
            flux_sphere: true,
            ..TargetConfig::default()
        });
        let target = h.target_recipe();
        build(&mut h.ctx(), target).unwrap();
        assert_eq!(
            h.children_of("World_log"),
            ["fsph_phys", "targ_tube_phys", "targ_cap_phys1", "targ_cap_phys2", "gas_tube_phys", "TPCmother_phys"]
        );
        assert_eq!(h.store.volume(h.id("gas_tube_log")).unwrap().material.name(), "refH2");
        let tpc = h.store.placement_by_name("TPCmother_phys").unwrap();
        assert_relative_eq!(h.store.placement(tpc).unwrap().transform.translation_vector().z, 50.0);
    }

    #[test]
    fn straw_needs_a_gas_target() {
        let mut h = Harness::new(TargetConfig {
            experiment: ExperimentType::Ndvcs,
            target: TargetType::Lh2,
            ..TargetConfig::default()
        });
        let world = h.world;
        let result = build_straw(&mut h.ctx(), &Mount::at(world, Vector3::zeros()));
        assert!(matches!(result, Err(BuildError::Config(_))));
    }

    #[test]
    fn tpc_alone_without_a_target() {
        let mut h = Harness::new(TargetConfig {
            experiment: ExperimentType::Tdis,
            target: TargetType::None,
            ..TargetConfig::default()
        });
        let target = h.target_recipe();
        build(&mut h.ctx(), target).unwrap();
        assert_eq!(h.children_of("World_log"), ["TPCmother_phys"]);
        assert!(h.store.volume_by_name("gas_tube_log").is_err());
    }
}
