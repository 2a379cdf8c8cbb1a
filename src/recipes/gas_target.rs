//! Gas-cell targets: the SIDIS glass cell, optionally inside a thin
//! beamline scattering chamber, and the shared cell layout used by TDIS.

use super::{cylinder, flux, BuildContext, Mount};
use crate::builder::TargetRecipe;
use crate::config::TargetType;
use crate::error::{BuildError, Result};
use crate::math::Vector3;
use crate::scene::{Colour, VisAttributes, VolumeId};
use crate::transform::Transform;
use crate::units::{CM, M, MM};

const EXIT_PIPE_INNER: f64 = 48.0 * MM;
const EXIT_PIPE_OUTER: f64 = 50.0 * MM;
const ENTRANCE_PIPE_INNER: f64 = 31.75 * MM;
const WINDOW_THICKNESS: f64 = 0.38 * MM;
const CHAMBER_START: f64 = -1.5 * M;
const CHAMBER_END: f64 = 162.2 * CM;
const CHAMBER_INNER: f64 = EXIT_PIPE_OUTER;
const CHAMBER_OUTER: f64 = CHAMBER_INNER + WINDOW_THICKNESS;

/// Wall and end-cap thicknesses and materials of a cylindrical gas cell.
#[derive(Debug, Clone, Copy)]
pub struct GasCell {
    pub wall_thickness: f64,
    pub cap_thickness: f64,
    pub wall_material: &'static str,
    /// Registers the wall and caps as target volumes, not just the gas.
    pub walls_are_target: bool,
}

/// GE180 glass cell of the SIDIS target.
pub const GLASS_CELL: GasCell = GasCell {
    wall_thickness: 1.61 * MM,
    cap_thickness: 0.126 * MM,
    wall_material: "GE180",
    walls_are_target: true,
};

/// Thin aluminium straw of the TDIS target.
pub const STRAW_CELL: GasCell = GasCell {
    wall_thickness: 0.01 * MM,
    cap_thickness: 0.01 * MM,
    wall_material: "Aluminum",
    walls_are_target: false,
};

/// Gas fill for `target`, or a configuration error naming `recipe`.
///
/// # Errors
///
/// Returns `Config` when the target type is not a gas.
pub fn require_gas(target: TargetType, recipe: &str) -> Result<&'static str> {
    target
        .gas_material()
        .ok_or_else(|| BuildError::Config(format!("{recipe} needs a gas target, got {target:?}")))
}

impl GasCell {
    /// Places the tube, both caps and the gas fill centred on `mount`, with
    /// the cell axis along the mount's z.
    ///
    /// # Errors
    ///
    /// Propagates geometry, material and naming errors.
    pub fn build(&self, ctx: &mut BuildContext<'_>, mount: &Mount, gas: &str) -> Result<VolumeId> {
        let length = ctx.config.target_length;
        let radius = ctx.config.target_diameter / 2.0;
        let (wall_t, cap_t) = (self.wall_thickness, self.cap_thickness);

        let tube_solid = cylinder("targ_tube", radius - wall_t, radius, length / 2.0)?;
        let cap_solid = cylinder("targ_cap", 0.0, radius, cap_t / 2.0)?;
        let (tube, cap) = if self.walls_are_target {
            (
                ctx.target_volume(tube_solid, self.wall_material, "targ_tube_log")?,
                ctx.target_volume(cap_solid, self.wall_material, "targ_cap_log")?,
            )
        } else {
            (
                ctx.volume(tube_solid, self.wall_material, "targ_tube_log")?,
                ctx.volume(cap_solid, self.wall_material, "targ_cap_log")?,
            )
        };
        let fill = ctx.target_volume(
            cylinder("gas_tube", 0.0, radius - wall_t, length / 2.0)?,
            gas,
            "gas_tube_log",
        )?;

        let axis = mount.transform().apply_vector(&Vector3::z());
        let cap_offset = axis * (length / 2.0 + cap_t / 2.0);
        ctx.place_at(tube, mount, "targ_tube_phys", false)?;
        let downstream = mount.shifted(cap_offset);
        let upstream = mount.shifted(-cap_offset);
        ctx.place(cap, mount.parent, downstream.transform(), 0, "targ_cap_phys1", false)?;
        ctx.place(cap, mount.parent, upstream.transform(), 1, "targ_cap_phys2", false)?;
        ctx.place_at(fill, mount, "gas_tube_phys", false)?;

        let cell_vis = VisAttributes::coloured(Colour::WHITE).wireframe();
        ctx.set_vis(tube, cell_vis)?;
        ctx.set_vis(cap, cell_vis)?;
        ctx.set_vis(fill, VisAttributes::coloured(Colour::CYAN))?;
        Ok(fill)
    }
}

/// Thin aluminium beamline chamber from 1.5 m upstream to the exit pipe.
/// Returns the vacuum inside it and the vacuum's centre on the beam line.
fn beamline_chamber(ctx: &mut BuildContext<'_>) -> Result<(VolumeId, f64)> {
    let world = ctx.world;
    let z_center = (CHAMBER_START + CHAMBER_END) / 2.0;
    let half_length = (CHAMBER_END - CHAMBER_START) / 2.0 - WINDOW_THICKNESS;

    let wall = ctx.volume(cylinder("sc_tube", CHAMBER_INNER, CHAMBER_OUTER, half_length)?, "Aluminum", "sc_wall_log")?;
    let vacuum = ctx.volume(cylinder("sc_vac", 0.0, CHAMBER_INNER, half_length)?, "Vacuum", "sc_vacuum_log")?;
    let upstream = ctx.volume(
        cylinder("sc_cap_upstream", ENTRANCE_PIPE_INNER, CHAMBER_OUTER, WINDOW_THICKNESS / 2.0)?,
        "Aluminum",
        "sc_cap_upstream_log",
    )?;
    let downstream = ctx.volume(
        cylinder("sc_cap_downstream", EXIT_PIPE_INNER, CHAMBER_OUTER, WINDOW_THICKNESS / 2.0)?,
        "Aluminum",
        "sc_cap_downstream_log",
    )?;

    let cap_z = half_length + WINDOW_THICKNESS / 2.0;
    ctx.place(wall, world, Transform::translation(0.0, 0.0, z_center), 0, "sc_wall_phys", false)?;
    ctx.place(
        upstream,
        world,
        Transform::translation(0.0, 0.0, z_center - cap_z),
        0,
        "sc_cap_upstream_phys",
        false,
    )?;
    ctx.place(
        downstream,
        world,
        Transform::translation(0.0, 0.0, z_center + cap_z),
        0,
        "sc_cap_downstream_phys",
        false,
    )?;
    ctx.place(vacuum, world, Transform::translation(0.0, 0.0, z_center), 0, "sc_vacuum_phys", false)?;

    ctx.set_vis(vacuum, VisAttributes::invisible())?;
    let wall_vis = VisAttributes::coloured(Colour::grey(0.5)).wireframe();
    for id in [wall, upstream, downstream] {
        ctx.set_vis(id, wall_vis)?;
    }
    Ok((vacuum, z_center))
}

/// GE180 glass cell filled with the configured gas, centred on `mount`.
///
/// # Errors
///
/// Returns `Config` unless the target is a gas, and propagates geometry,
/// material and naming errors.
pub fn build_glass_cell(ctx: &mut BuildContext<'_>, mount: &Mount) -> Result<()> {
    let gas = require_gas(ctx.config.target, "gas target")?;
    GLASS_CELL.build(ctx, mount, gas).map(|_| ())
}

/// Builds the SIDIS target area: `target` on the beam line, in the beamline
/// chamber when one is configured.
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

    let mount = if ctx.config.scattering_chamber {
        let (vacuum, z_center) = beamline_chamber(ctx)?;
        Mount::at(vacuum, Vector3::new(0.0, 0.0, -z_center))
    } else {
        Mount::at(world, Vector3::zeros())
    };

    target(ctx, &mount)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::{ExperimentType, TargetConfig};
    use crate::recipes::testing::Harness;
    use approx::assert_relative_eq;

    fn harness(target: TargetType, scattering_chamber: bool) -> Harness {
        Harness::new(TargetConfig {
            experiment: ExperimentType::Sidis,
            target,
            scattering_chamber,
            ..TargetConfig::default()
        })
    }

    fn build_sidis(h: &mut Harness) {
        let target = h.target_recipe();
        build(&mut h.ctx(), target).unwrap();
    }

    fn z_of(h: &Harness, name: &str) -> f64 {
        let id = h.store.placement_by_name(name).unwrap();
        h.store.placement(id).unwrap().transform.translation_vector().z
    }

    #[test]
    fn glass_cell_on_the_beam_line() {
        let mut h = harness(TargetType::He3, false);
        build_sidis(&mut h);
        assert_eq!(
            h.children_of("World_log"),
            ["targ_tube_phys", "targ_cap_phys1", "targ_cap_phys2", "gas_tube_phys"]
        );
        let gas = h.store.volume(h.id("gas_tube_log")).unwrap();
        assert_eq!(gas.material.name(), "pol3He");
        for name in ["targ_tube_log", "targ_cap_log", "gas_tube_log"] {
            assert!(h.targets.is_target_volume(name), "{name}");
        }
        assert_relative_eq!(z_of(&h, "targ_cap_phys1"), 300.0 + 0.063, epsilon = 1e-9);
        assert_relative_eq!(z_of(&h, "targ_cap_phys2"), -300.063, epsilon = 1e-9);
    }

    #[test]
    fn chamber_holds_the_cell_at_the_world_origin() {
        let mut h = harness(TargetType::H2, true);
        build_sidis(&mut h);
        assert_eq!(
            h.children_of("World_log"),
            ["sc_wall_phys", "sc_cap_upstream_phys", "sc_cap_downstream_phys", "sc_vacuum_phys"]
        );
        assert_eq!(h.children_of("sc_vacuum_log").len(), 4);
        let z_center = (CHAMBER_START + CHAMBER_END) / 2.0;
        assert_relative_eq!(z_of(&h, "sc_vacuum_phys"), z_center);
        assert_relative_eq!(z_of(&h, "gas_tube_phys"), -z_center);
        assert_relative_eq!(
            z_of(&h, "sc_cap_downstream_phys") - z_of(&h, "sc_cap_upstream_phys"),
            CHAMBER_END - CHAMBER_START - WINDOW_THICKNESS,
            epsilon = 1e-9
        );
    }

    #[test]
    fn foil_targets_skip_the_cell() {
        let mut h = harness(TargetType::Cfoil, true);
        build_sidis(&mut h);
        assert_eq!(h.children_of("sc_vacuum_log"), ["Target_phys"]);
        assert!(h.store.volume_by_name("gas_tube_log").is_err());
    }

    #[test]
    fn glass_cell_needs_a_gas() {
        let mut h = harness(TargetType::Lh2, false);
        let world = h.world;
        let result = build_glass_cell(&mut h.ctx(), &Mount::at(world, Vector3::zeros()));
        assert!(matches!(result, Err(BuildError::Config(_))));
        assert_eq!(h.store.placement_count(), 0);
    }

    #[test]
    fn chamber_alone_without_a_target() {
        let mut h = harness(TargetType::None, true);
        build_sidis(&mut h);
        assert_eq!(h.children_of("World_log").len(), 4);
        assert!(h.children_of("sc_vacuum_log").is_empty());
        for name in ["gas_tube_log", "targ_tube_log", "Target_log", "MultiFoil_MotherLog"] {
            assert!(h.store.volume_by_name(name).is_err(), "{name}");
        }
    }

    #[test]
    fn straw_cell_registers_only_the_gas() {
        let mut h = harness(TargetType::D2, false);
        let world = h.world;
        STRAW_CELL.build(&mut h.ctx(), &Mount::at(world, Vector3::zeros()), "refD2").unwrap();
        assert!(h.targets.is_target_volume("gas_tube_log"));
        assert!(!h.targets.is_target_volume("targ_tube_log"));
        assert_eq!(h.store.volume(h.id("targ_cap_log")).unwrap().material.name(), "Aluminum");
    }
}
