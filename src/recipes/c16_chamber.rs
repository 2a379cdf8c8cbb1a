//! Cylindrical scattering chamber of the C16 tritium run, with the
//! wide-angle DVCS snout and the downstream exit pipe.
//!
//! The chamber's own z axis is vertical; all of its parts are placed with
//! the same frame, turning local `+y` downstream and local `+z` up.

use super::{cylinder, BuildContext, Mount};
use crate::builder::TargetRecipe;
use crate::error::Result;
use crate::math::Vector3;
use crate::scene::{Colour, VisAttributes};
use crate::solid::Solid;
use crate::transform::{Rotation, Transform};
use crate::units::{CM, DEG, INCH, M, MM};

const CHECK_OVERLAPS: bool = false;

const ENTRANCE_PIPE_RADIUS: f64 = 31.75 * MM;
const HEIGHT: f64 = 1.2 * M;
const WALL_OUTER: f64 = 1.143 * M / 2.0;
const WALL_INNER: f64 = 1.041 * M / 2.0;

const EXIT_PIPE_START: f64 = 1.622 * M;

const SNOUT_PHI_MIN: f64 = 8.0 * DEG;
const SNOUT_PHI_MAX: f64 = (90.0 + 52.0) * DEG;
const SNOUT_EDGE: f64 = 2.5 * DEG;
const SNOUT_INNER: f64 = 29.315 * INCH;
const SNOUT_OUTER: f64 = 30.315 * INCH;
const SNOUT_HEIGHT: f64 = 12.5 * INCH;
const BEAMPIPE_INNER: f64 = 6.065 * INCH / 2.0;
const BEAMPIPE_OUTER: f64 = BEAMPIPE_INNER + 0.28 * INCH;

const WINDOW_THICKNESS: f64 = (30.331 - 30.315) * INCH;
const WINDOW_HEIGHT: f64 = 7.328 * INCH;

const TARGET_LIFT: f64 = 0.025 * MM;

const WALL_COLOUR: Colour = Colour::rgb(0.7, 0.7, 1.0);

/// Frame rotX(-90) then rotY(180).
fn chamber_frame() -> Rotation {
    Rotation::identity().rotate_x(-90.0 * DEG).rotate_y(180.0 * DEG)
}

fn wall() -> Result<Solid> {
    let wall = cylinder("scham_wall", WALL_INNER, WALL_OUTER, HEIGHT / 2.0)?;
    let snout_cut = Solid::tube(
        "dvcs_snout_cut",
        WALL_INNER - 1.0 * CM,
        WALL_OUTER + 1.0 * CM,
        SNOUT_HEIGHT / 2.0,
        SNOUT_PHI_MIN,
        SNOUT_PHI_MAX - SNOUT_PHI_MIN,
    )?;
    let wall = wall.subtract("swallcut1", &snout_cut, Transform::identity());
    let beam_hole = cylinder("upstream_beam_hole", 0.0, ENTRANCE_PIPE_RADIUS, 5.0 * INCH)?;
    Ok(wall.subtract(
        "swallcut2",
        &beam_hole,
        Transform::from_frame(chamber_frame(), Vector3::new(0.0, -0.5 * (WALL_OUTER + WALL_INNER), 0.0)),
    ))
}

/// Sector of the snout, widened by the snout's edge thickness either side.
fn snout_sector(name: &str, r_inner: f64) -> Result<Solid> {
    Solid::tube(
        name,
        r_inner,
        SNOUT_OUTER,
        SNOUT_HEIGHT / 2.0,
        SNOUT_PHI_MIN - SNOUT_EDGE,
        SNOUT_PHI_MAX - SNOUT_PHI_MIN + 2.0 * SNOUT_EDGE,
    )
}

fn snout() -> Result<Solid> {
    let snout = snout_sector("dvcs_snout", SNOUT_INNER)?;
    let left_cut = Solid::tube("dvcs_beamleft_cut", 0.0, SNOUT_OUTER + CM, 5.0 * INCH / 2.0, 100.6 * DEG, 38.8 * DEG)?;
    let right_cut = Solid::tube("dvcs_beamright_cut", 0.0, SNOUT_OUTER + CM, 5.0 * INCH / 2.0, 10.6 * DEG, 47.6 * DEG)?;
    let snout = snout
        .subtract("dvcs_snout_cut1", &left_cut, Transform::identity())
        .subtract("dvcs_snout_cut2", &right_cut, Transform::identity());
    let beam_hole = cylinder("dvcs_snout_beamhole", 0.0, BEAMPIPE_INNER, 5.0 * INCH)?;
    Ok(snout.subtract(
        "dvcs_snout_cut3",
        &beam_hole,
        Transform::from_frame(chamber_frame(), Vector3::new(0.0, 0.5 * (SNOUT_INNER + SNOUT_OUTER), 0.0)),
    ))
}

/// Builds the chamber, snout, windows and exit pipe, then runs `target`
/// inside the chamber vacuum.
///
/// # Errors
///
/// Propagates geometry, material and naming errors.
pub fn build(ctx: &mut BuildContext<'_>, target: TargetRecipe) -> Result<()> {
    let world = ctx.world;
    let upright = Transform::from_frame(chamber_frame(), Vector3::zeros());

    let snout_vacuum_solid = snout_sector("dvcs_snout_vacuum", WALL_OUTER)?;
    let snout_vacuum = ctx.target_volume(snout_vacuum_solid.clone(), "Vacuum", "dvcs_snout_vacuum_log")?;
    let snout = ctx.volume(snout()?, "Aluminum", "dvcs_snout_log")?;
    ctx.place(snout, snout_vacuum, Transform::identity(), 0, "dvcs_snout_phys", CHECK_OVERLAPS)?;
    ctx.place(snout_vacuum, world, upright, 0, "dvcs_snout_vacuum_phys", CHECK_OVERLAPS)?;

    let window_vis = VisAttributes::coloured(Colour::rgb(0.8, 0.8, 0.0)).wireframe();
    for (side, start, span) in [
        ("beamleft", (100.6 - 2.23) * DEG, (38.8 + 4.46) * DEG),
        ("beamright", 8.0 * DEG, (47.6 + 4.4) * DEG),
    ] {
        let name = format!("dvcs_{side}_window");
        let foil = Solid::tube(&name, SNOUT_OUTER, SNOUT_OUTER + WINDOW_THICKNESS, WINDOW_HEIGHT / 2.0, start, span)?;
        let window = ctx.volume(foil, "Aluminum", &format!("{name}_log"))?;
        ctx.set_vis(window, window_vis)?;
        ctx.place(window, world, upright, 0, &format!("{name}_phys"), CHECK_OVERLAPS)?;
    }

    let vacuum = ctx.target_volume(cylinder("scham_vacuum", 0.0, WALL_OUTER, HEIGHT / 2.0)?, "Vacuum", "scham_vacuum_log")?;
    let wall = ctx.volume(wall()?, "Aluminum", "scham_wall_log")?;
    ctx.place(wall, vacuum, Transform::identity(), 0, "scham_wall_phys", CHECK_OVERLAPS)?;
    ctx.place(vacuum, world, upright, 0, "scham_vacuum_phys", CHECK_OVERLAPS)?;

    let lid_half = (WALL_OUTER - WALL_INNER) / 2.0;
    let lid = ctx.volume(cylinder("scham_topbottom", 0.0, WALL_OUTER, lid_half)?, "Aluminum", "scham_topbottom_log")?;
    for (copy, (name, sign)) in (0u32..).zip([("scham_top_phys", 1.0), ("scham_bot_phys", -1.0)]) {
        ctx.place(
            lid,
            world,
            Transform::from_frame(chamber_frame(), Vector3::new(0.0, sign * (HEIGHT / 2.0 + lid_half), 0.0)),
            copy,
            name,
            CHECK_OVERLAPS,
        )?;
    }

    // exit pipe from the snout face to the downstream beamline, trimmed to
    // the snout vacuum's curvature
    let pipe_length = EXIT_PIPE_START - SNOUT_INNER;
    let z0 = 0.5 * (EXIT_PIPE_START + SNOUT_INNER);
    let snout_in_pipe = Transform::from_frame(chamber_frame(), Vector3::new(0.0, 0.0, -z0));
    let pipe = cylinder("exit_pipe", BEAMPIPE_INNER, BEAMPIPE_OUTER, pipe_length / 2.0)?
        .subtract("exit_pipe_cut", &snout_vacuum_solid, snout_in_pipe);
    let pipe_vacuum = cylinder("exit_vacuum", 0.0, BEAMPIPE_INNER, pipe_length / 2.0)?
        .subtract("exit_vacuum_cut", &snout_vacuum_solid, snout_in_pipe);
    let pipe = ctx.volume(pipe, "Aluminum", "exit_pipe_log")?;
    let pipe_vacuum = ctx.volume(pipe_vacuum, "Vacuum", "exit_vacuum_log")?;
    ctx.place(pipe, world, Transform::translation(0.0, 0.0, z0), 0, "exit_pipe_phys", CHECK_OVERLAPS)?;
    ctx.place(pipe_vacuum, world, Transform::translation(0.0, 0.0, z0), 0, "exit_vacuum_phys", CHECK_OVERLAPS)?;

    let mount = Mount::new(
        vacuum,
        Rotation::identity().rotate_x(90.0 * DEG),
        Vector3::new(0.0, TARGET_LIFT, 0.0),
    );
    target(ctx, &mount)?;

    let wall_vis = VisAttributes::coloured(WALL_COLOUR).wireframe();
    for id in [wall, lid, snout_vacuum] {
        ctx.set_vis(id, wall_vis)?;
    }
    ctx.set_vis(vacuum, VisAttributes::invisible())?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::{ExperimentType, TargetConfig, TargetType};
    use crate::math::Point3;
    use crate::recipes::testing::Harness;
    use approx::assert_relative_eq;

    fn built(target: TargetType) -> Harness {
        let mut h = Harness::new(TargetConfig {
            experiment: ExperimentType::C16,
            target,
            ..TargetConfig::default()
        });
        let target = h.target_recipe();
        build(&mut h.ctx(), target).unwrap();
        h
    }

    #[test]
    fn chamber_parts_and_target() {
        let h = built(TargetType::Lh2);
        assert_eq!(
            h.children_of("World_log"),
            [
                "dvcs_snout_vacuum_phys",
                "dvcs_beamleft_window_phys",
                "dvcs_beamright_window_phys",
                "scham_vacuum_phys",
                "scham_top_phys",
                "scham_bot_phys",
                "exit_pipe_phys",
                "exit_vacuum_phys",
            ]
        );
        assert_eq!(h.children_of("scham_vacuum_log"), ["scham_wall_phys", "TargetMother_phys"]);
        assert_eq!(h.children_of("dvcs_snout_vacuum_log"), ["dvcs_snout_phys"]);
        assert!(h.targets.is_target_volume("scham_vacuum_log"));
        assert!(h.targets.is_target_volume("dvcs_snout_vacuum_log"));
    }

    #[test]
    fn carbon_foil_replaces_cryotarget() {
        let h = built(TargetType::Cfoil);
        assert_eq!(h.children_of("scham_vacuum_log"), ["scham_wall_phys", "Target_phys"]);
    }

    #[test]
    fn empty_chamber_without_a_target() {
        let h = built(TargetType::None);
        assert_eq!(h.children_of("World_log").len(), 8);
        assert_eq!(h.children_of("scham_vacuum_log"), ["scham_wall_phys"]);
        for name in ["TargetMother_log", "TargetCell_log", "Target_log"] {
            assert!(h.store.volume_by_name(name).is_err(), "{name}");
        }
    }

    #[test]
    fn chamber_axis_is_vertical() {
        let h = built(TargetType::Lh2);
        let vacuum = h.store.placement_by_name("scham_vacuum_phys").unwrap();
        let transform = h.store.placement(vacuum).unwrap().transform;
        assert_relative_eq!(transform.apply_vector(&Vector3::z()), Vector3::y(), epsilon = 1e-12);
        assert_relative_eq!(transform.apply_vector(&Vector3::y()), Vector3::z(), epsilon = 1e-12);

        let lids: Vec<u32> = ["scham_top_phys", "scham_bot_phys"]
            .iter()
            .map(|n| h.store.placement(h.store.placement_by_name(n).unwrap()).unwrap().copy_number)
            .collect();
        assert_eq!(lids, [0, 1]);
    }

    #[test]
    fn exit_pipe_stops_at_the_snout_vacuum() {
        let pipe_vacuum = cylinder("exit_vacuum", 0.0, BEAMPIPE_INNER, (EXIT_PIPE_START - SNOUT_INNER) / 2.0)
            .unwrap()
            .subtract(
                "exit_vacuum_cut",
                &snout_sector("dvcs_snout_vacuum", WALL_OUTER).unwrap(),
                Transform::from_frame(
                    chamber_frame(),
                    Vector3::new(0.0, 0.0, -0.5 * (EXIT_PIPE_START + SNOUT_INNER)),
                ),
            );
        let z0 = 0.5 * (EXIT_PIPE_START + SNOUT_INNER);
        // inside the snout vacuum on the beam line
        assert!(!pipe_vacuum.contains(&Point3::new(0.0, 0.0, SNOUT_INNER + 5.0 * MM - z0)));
        // beyond the snout
        assert!(pipe_vacuum.contains(&Point3::new(0.0, 0.0, SNOUT_OUTER + 5.0 * MM - z0)));
    }

    #[test]
    fn wall_has_entrance_hole_upstream() {
        let wall = wall().unwrap();
        let r_mid = 0.5 * (WALL_OUTER + WALL_INNER);
        // chamber-local -y is upstream
        assert!(!wall.contains(&Point3::new(0.0, -r_mid, 0.0)));
        assert!(wall.contains(&Point3::new(0.0, -r_mid, 20.0 * CM)));
        // the snout sector is open at the beam height downstream
        assert!(!wall.contains(&Point3::new(0.0, r_mid, 0.0)));
    }
}
