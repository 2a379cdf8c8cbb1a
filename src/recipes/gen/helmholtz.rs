//! Helmholtz coil pairs holding the ³He polarization axis.
//!
//! Each coil is an aluminium winding inside a G10 shell; the pair is split
//! by the coil radius along the coil axis.

use super::{frame, CHECK_OVERLAPS};
use crate::config::GenConfig;
use crate::error::Result;
use crate::math::Vector3;
use crate::recipes::{cylinder, BuildContext};
use crate::scene::{Colour, VisAttributes};
use crate::transform::Transform;
use crate::units::{DEG, INCH, MM};

/// The three coil pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoilKind {
    /// Large pair, axis horizontal.
    Major,
    /// RF pair, axis vertical.
    Rf,
    /// Small pair, axis horizontal and crossed with the major pair.
    Minor,
}

/// Winding cross-section and where the pair is centred.
struct Winding {
    r_inner: f64,
    r_outer: f64,
    length: f64,
    centre: Vector3,
    rx: f64,
    ry: f64,
    shell_wall: f64,
}

impl CoilKind {
    pub const ALL: [Self; 3] = [Self::Major, Self::Rf, Self::Minor];

    /// Short tag used in volume names.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Major => "maj",
            Self::Rf => "rfy",
            Self::Minor => "min",
        }
    }

    fn winding(self) -> Winding {
        match self {
            Self::Major => Winding {
                r_inner: 722.3 * MM,
                r_outer: 793.8 * MM,
                length: 80.9 * MM,
                centre: Vector3::new(0.0, 150.1 * MM, 0.0),
                rx: 0.0,
                ry: 90.0 * DEG,
                shell_wall: 5.0 * MM,
            },
            Self::Rf => Winding {
                r_inner: 488.9 * MM,
                r_outer: 520.7 * MM,
                length: 14.1 * MM,
                centre: Vector3::zeros(),
                rx: 90.0 * DEG,
                ry: 0.0,
                shell_wall: 0.030 * INCH,
            },
            Self::Minor => Winding {
                r_inner: 631.8 * MM,
                r_outer: 677.9 * MM,
                length: 64.8 * MM,
                centre: Vector3::new(0.0, 150.1 * MM, 0.0),
                rx: 0.0,
                ry: 0.0,
                shell_wall: 5.0 * MM,
            },
        }
    }

    /// Extra turn about the vertical axis for the running period. The RF
    /// pair never turns.
    #[must_use]
    pub fn tilt(self, config: GenConfig) -> f64 {
        if self == Self::Rf {
            return 0.0;
        }
        match config {
            GenConfig::Gen146 | GenConfig::Gen368 => 43.5 * DEG,
            GenConfig::Gen677 | GenConfig::Gen1018 => 10.0 * DEG,
            GenConfig::Full | GenConfig::New => 0.0,
        }
    }

    fn colour(self) -> Colour {
        match self {
            Self::Major => Colour::RED,
            Self::Rf => Colour::GREEN,
            Self::Minor => Colour::BLUE,
        }
    }

    /// Centres of coils 0 and 1. The pair is split by half the mean coil
    /// radius each way along the (tilted) axis.
    fn coil_centres(self, winding: &Winding, ry: f64) -> [Vector3; 2] {
        let half_gap = 0.25 * (winding.r_inner + winding.r_outer);
        let (dx, dz) = (half_gap * ry.sin().abs(), half_gap * ry.cos().abs());
        let c = winding.centre;
        match self {
            Self::Major => [c + Vector3::new(-dx, 0.0, -dz), c + Vector3::new(dx, 0.0, dz)],
            Self::Minor => [c + Vector3::new(dx, 0.0, -dz), c + Vector3::new(-dx, 0.0, dz)],
            Self::Rf => [c - Vector3::y() * half_gap, c + Vector3::y() * half_gap],
        }
    }
}

/// Builds one coil pair: two shells in the world, each holding its winding.
pub(super) fn build(ctx: &mut BuildContext<'_>, kind: CoilKind, config: GenConfig) -> Result<()> {
    let world = ctx.world;
    let tag = kind.tag();
    let w = kind.winding();
    let wall = w.shell_wall;

    let core = cylinder(&format!("HH_{tag}_n_core"), w.r_inner, w.r_outer, w.length / 2.0)?;
    let shell = cylinder(
        &format!("shellHH_{tag}_n"),
        w.r_inner - wall,
        w.r_outer + wall,
        w.length / 2.0 + wall,
    )?
    .subtract("cns_sub", &core, Transform::identity());
    let winding = cylinder(&format!("HH_{tag}_n"), w.r_inner, w.r_outer, w.length / 2.0)?;

    let ry = w.ry + kind.tilt(config);
    let orientation = frame(w.rx, ry, 0.0);
    let shell_vis = VisAttributes::coloured(kind.colour()).wireframe();
    let coil_vis = VisAttributes::coloured(Colour::GREY);

    let mut shells = Vec::with_capacity(2);
    for (copy, centre) in (0u32..).zip(kind.coil_centres(&w, ry)) {
        let shell_id = ctx.target_volume(shell.clone(), "NEMAG10", &format!("logicGEnTarget_HHCoilShell_{tag}_{copy}"))?;
        ctx.set_vis(shell_id, shell_vis)?;
        ctx.place(
            shell_id,
            world,
            Transform::from_frame(orientation, centre),
            copy,
            &format!("physGEnTarget_HHCoilShell_{tag}_{copy}"),
            CHECK_OVERLAPS,
        )?;
        shells.push(shell_id);
    }
    for (copy, shell_id) in (0u32..).zip(shells) {
        let coil = ctx.target_volume(winding.clone(), "Aluminum", &format!("logicGEnTarget_HHCoil_{tag}_{copy}"))?;
        ctx.set_vis(coil, coil_vis)?;
        ctx.place(
            coil,
            shell_id,
            Transform::identity(),
            copy,
            &format!("physGEnTarget_HHCoil_{tag}_{copy}"),
            CHECK_OVERLAPS,
        )?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::TargetConfig;
    use crate::math::Point3;
    use crate::recipes::testing::Harness;
    use approx::assert_relative_eq;

    fn centre_of(h: &Harness, name: &str) -> Vector3 {
        let p = h.store.placement(h.store.placement_by_name(name).unwrap()).unwrap();
        *p.transform.translation_vector()
    }

    #[test]
    fn tilt_follows_the_running_period() {
        assert_relative_eq!(CoilKind::Major.tilt(GenConfig::Gen146), 43.5 * DEG);
        assert_relative_eq!(CoilKind::Minor.tilt(GenConfig::Gen1018), 10.0 * DEG);
        assert_relative_eq!(CoilKind::Rf.tilt(GenConfig::Gen368), 0.0);
        assert_relative_eq!(CoilKind::Major.tilt(GenConfig::New), 0.0);
    }

    #[test]
    fn major_pair_straddles_the_tilted_axis() {
        let mut h = Harness::new(TargetConfig::default());
        build(&mut h.ctx(), CoilKind::Major, GenConfig::Gen677).unwrap();
        let half_gap = 0.25 * (722.3 + 793.8);
        let ry = 100.0 * DEG;
        let c0 = centre_of(&h, "physGEnTarget_HHCoilShell_maj_0");
        let c1 = centre_of(&h, "physGEnTarget_HHCoilShell_maj_1");
        assert_relative_eq!(c0.x, -half_gap * ry.sin().abs(), epsilon = 1e-9);
        assert_relative_eq!(c1.z, half_gap * ry.cos().abs(), epsilon = 1e-9);
        assert_relative_eq!(c0.y, 150.1);
        assert_relative_eq!((c1 - c0).norm(), 2.0 * half_gap, epsilon = 1e-9);
    }

    #[test]
    fn rf_pair_is_stacked_vertically() {
        let mut h = Harness::new(TargetConfig::default());
        build(&mut h.ctx(), CoilKind::Rf, GenConfig::Gen146).unwrap();
        let half_gap = 0.25 * (488.9 + 520.7);
        assert_relative_eq!(centre_of(&h, "physGEnTarget_HHCoilShell_rfy_0").y, -half_gap);
        assert_relative_eq!(centre_of(&h, "physGEnTarget_HHCoilShell_rfy_1").y, half_gap);
        // The coil axis is vertical, so the winding lies in a horizontal plane.
        let shell = h.store.placement_by_name("physGEnTarget_HHCoilShell_rfy_1").unwrap();
        let to_world = h.store.global_transform(shell).unwrap();
        let axis = to_world.apply_vector(&Vector3::z());
        assert_relative_eq!(axis.y.abs(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn each_winding_sits_in_its_shell() {
        let mut h = Harness::new(TargetConfig::default());
        build(&mut h.ctx(), CoilKind::Minor, GenConfig::Gen146).unwrap();
        assert_eq!(h.children_of("logicGEnTarget_HHCoilShell_min_0"), ["physGEnTarget_HHCoil_min_0"]);
        assert_eq!(h.children_of("logicGEnTarget_HHCoilShell_min_1"), ["physGEnTarget_HHCoil_min_1"]);
        let shell = h.store.volume(h.id("logicGEnTarget_HHCoilShell_min_0")).unwrap();
        assert_eq!(shell.material.name(), "NEMAG10");
        let mid = 0.5 * (631.8 + 677.9);
        assert!(!shell.solid.contains(&Point3::new(mid, 0.0, 0.0)));
        assert!(shell.solid.contains(&Point3::new(mid, 0.0, 64.8 / 2.0 + 2.5)));
    }
}
