//! Two-layer steel box shielding the target field, with beam and detector
//! windows cut through both layers.

use super::{frame, CHECK_OVERLAPS};
use crate::config::GenConfig;
use crate::error::Result;
use crate::math::Vector3;
use crate::recipes::BuildContext;
use crate::scene::{Colour, VisAttributes};
use crate::solid::Solid;
use crate::transform::Transform;
use crate::units::{CM, DEG, INCH, MM};

const WALL: f64 = 0.25 * INCH;
/// Gap between the outer and inner layers.
const SPACING: f64 = 0.79 * INCH;
const OUTER_SIZE: (f64, f64, f64) = (2252.9 * MM, 2560.3 * MM, 2252.9 * MM);
const BEAM_WINDOW: f64 = 9.48 * INCH;
const DOOR: f64 = 40.5 * INCH;
/// Turn of the shield about the vertical axis.
const TURN: f64 = 55.0 * DEG;

/// A box removed from both shield layers, in the shield frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowCut {
    /// Full size along x, y and z.
    pub size: Vector3,
    pub centre: Vector3,
}

impl WindowCut {
    fn new(size: (f64, f64, f64), centre: (f64, f64, f64)) -> Self {
        Self {
            size: Vector3::new(size.0, size.1, size.2),
            centre: Vector3::new(centre.0, centre.1, centre.2),
        }
    }

    fn solid(&self, name: &str) -> Result<Solid> {
        Solid::box_shape(name, self.size.x / 2.0, self.size.y / 2.0, self.size.z / 2.0)
    }
}

/// The four window cuts for a running period: beam exit, beam-left
/// detector window, beam-right detector window and beam entrance.
#[must_use]
pub fn window_cuts(config: GenConfig) -> [(&'static str, WindowCut); 4] {
    let (x_len, y_len, z_len) = OUTER_SIZE;
    let beam = (BEAM_WINDOW, BEAM_WINDOW, BEAM_WINDOW);
    // Tall cuts start at the floor of the shield.
    let floor_aligned = |height: f64| -(y_len / 2.0 - height / 2.0);

    let beam_left = if config == GenConfig::New {
        let height = 0.8 * y_len;
        WindowCut::new((10.0 * CM, height, DOOR), (x_len / 2.0, floor_aligned(height), -DOOR / 2.0))
    } else {
        WindowCut::new((15.0 * INCH, 28.44 * INCH, 15.0 * INCH), (x_len / 2.0, 0.0, -15.0 * INCH / 2.0))
    };

    let (p1, p2, p3) = (8.62 * INCH, 6.62 * INCH, 5.12 * INCH);
    let door_width = 16.70 * INCH;
    let edge = 5.0 * CM;
    let regular_height = 21.41 * INCH;
    let (inset, width, height, y) = match config {
        GenConfig::Gen146 => (edge + p1 + p2 + p3, door_width, regular_height, 0.0),
        GenConfig::Gen368 => (edge + p2 + p3, door_width, regular_height, 0.0),
        GenConfig::Gen677 => (edge + p3, door_width, regular_height, 0.0),
        GenConfig::Gen1018 => (edge, door_width, regular_height, 0.0),
        GenConfig::Full => (edge, p1 + p2 + p3 + door_width, regular_height, 0.0),
        GenConfig::New => {
            let height = 0.8 * y_len;
            (edge, DOOR, height, floor_aligned(height))
        }
    };
    let beam_right = WindowCut::new(
        (width, height, 10.0 * CM),
        (x_len / 2.0 - width / 2.0 - inset, y, z_len / 2.0),
    );

    [
        ("windowCut_dn", WindowCut::new(beam, (x_len / 2.0, 0.0, z_len / 3.0))),
        ("windowCut_beamLeft_dn", beam_left),
        ("windowCut_beamRight_dn", beam_right),
        ("windowCut_up", WindowCut::new(beam, (-x_len / 2.0, 0.0, -z_len / 3.0))),
    ]
}

/// Hollow box of the given outer size with every window cut removed.
fn layer(prefix: &str, size: Vector3, cuts: &[(&str, WindowCut)]) -> Result<Solid> {
    let outer = Solid::box_shape(prefix, size.x / 2.0, size.y / 2.0, size.z / 2.0)?;
    let inner = size - Vector3::repeat(2.0 * WALL);
    let hollow = Solid::box_shape(&format!("{prefix}Cut"), inner.x / 2.0, inner.y / 2.0, inner.z / 2.0)?;
    let mut shield = outer.subtract(format!("{prefix}Shield_1"), &hollow, Transform::identity());
    for (i, (name, cut)) in cuts.iter().enumerate() {
        let step = if i + 1 == cuts.len() {
            format!("{prefix}Shield")
        } else {
            format!("{prefix}Shield_{}", i + 2)
        };
        shield = shield.subtract(
            step,
            &cut.solid(name)?,
            Transform::translation(cut.centre.x, cut.centre.y, cut.centre.z),
        );
    }
    Ok(shield)
}

/// Places the inner (copy 0) and outer (copy 1) shield layers.
pub(super) fn build(ctx: &mut BuildContext<'_>, config: GenConfig) -> Result<()> {
    let world = ctx.world;
    let cuts = window_cuts(config);
    let outer_size = Vector3::new(OUTER_SIZE.0, OUTER_SIZE.1, OUTER_SIZE.2);
    let inner_size = outer_size - Vector3::repeat(2.0 * (WALL + SPACING));
    let layers = [
        ("logicGEnTarget_InnerShield", "physGEnTarget_InnerShield", layer("inner", inner_size, &cuts)?),
        ("logicGEnTarget_OuterShield", "physGEnTarget_OuterShield", layer("outer", outer_size, &cuts)?),
    ];

    let vis = VisAttributes::coloured(Colour::MAGENTA).wireframe();
    let placement = Transform::from_frame(frame(0.0, TURN, 0.0), Vector3::zeros());
    for (copy, (logical, physical, solid)) in (0u32..).zip(layers) {
        let id = ctx.target_volume(solid, "Carbon_Steel_1008", logical)?;
        ctx.set_vis(id, vis)?;
        ctx.place(id, world, placement, copy, physical, CHECK_OVERLAPS)?;
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

    #[test]
    fn beam_right_window_moves_with_the_period() {
        let centre_x = |config| window_cuts(config)[2].1.centre.x;
        // Later periods open the window further downstream along the wall.
        assert!(centre_x(GenConfig::Gen146) < centre_x(GenConfig::Gen368));
        assert!(centre_x(GenConfig::Gen368) < centre_x(GenConfig::Gen677));
        assert!(centre_x(GenConfig::Gen677) < centre_x(GenConfig::Gen1018));
        let full = window_cuts(GenConfig::Full)[2].1;
        assert_relative_eq!(full.size.x, (8.62 + 6.62 + 5.12 + 16.70) * INCH, epsilon = 1e-9);
    }

    #[test]
    fn new_shield_cuts_reach_the_floor() {
        let cuts = window_cuts(GenConfig::New);
        for (_, cut) in &cuts[1..3] {
            let bottom = cut.centre.y - cut.size.y / 2.0;
            assert_relative_eq!(bottom, -OUTER_SIZE.1 / 2.0, epsilon = 1e-9);
        }
        assert_relative_eq!(cuts[1].1.size.z, DOOR);
    }

    #[test]
    fn layers_are_hollow_and_windowed() {
        let mut h = Harness::new(TargetConfig::default());
        build(&mut h.ctx(), GenConfig::Gen146).unwrap();
        assert_eq!(h.children_of("World_log"), ["physGEnTarget_InnerShield", "physGEnTarget_OuterShield"]);

        let outer = h.store.volume(h.id("logicGEnTarget_OuterShield")).unwrap();
        assert_eq!(outer.material.name(), "Carbon_Steel_1008");
        let y_wall = OUTER_SIZE.1 / 2.0 - WALL / 2.0;
        assert!(outer.solid.contains(&Point3::new(0.0, y_wall, 0.0)));
        assert!(!outer.solid.contains(&Point3::new(0.0, 0.0, 0.0)));
        // Beam entrance window through the x wall.
        let x_wall = -OUTER_SIZE.0 / 2.0 + WALL / 2.0;
        assert!(!outer.solid.contains(&Point3::new(x_wall, 0.0, -OUTER_SIZE.2 / 3.0)));
        assert!(outer.solid.contains(&Point3::new(x_wall, 0.0, 0.0)));

        let inner = h.store.volume(h.id("logicGEnTarget_InnerShield")).unwrap();
        let inner_y_wall = OUTER_SIZE.1 / 2.0 - WALL - SPACING - WALL / 2.0;
        assert!(inner.solid.contains(&Point3::new(0.0, inner_y_wall, 0.0)));
        assert!(!inner.solid.contains(&Point3::new(0.0, y_wall, 0.0)));
    }
}
