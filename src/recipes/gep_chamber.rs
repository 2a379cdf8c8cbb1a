//! GEp scattering chamber with its three-plate stainless snout.
//!
//! "Left" and "right" are as seen from downstream: the electron arm (E-arm)
//! is on beam left, the hadron arm (H-arm) on beam right. The target centre
//! is the world origin and the chamber sits 6.5" upstream of it.

use super::{cylinder, BuildContext, Mount};
use crate::builder::TargetRecipe;
use crate::config::ExperimentType;
use crate::derive::{
    flared_snout_planes, front_corner, intersect_ray, rounded_corner_piece, Plane, PlateFrame, Side,
};
use crate::error::Result;
use crate::math::{Point2, Point3, Vector3};
use crate::scene::{Colour, VisAttributes, VolumeId};
use crate::solid::Solid;
use crate::transform::{Rotation, Transform};
use crate::units::{CM, DEG, INCH, MM};

const CHECK_OVERLAPS: bool = false;

const BEAM_PLATE_WIDTH: f64 = 9.425 * INCH;
const EARM_PLATE_WIDTH: f64 = 34.364 * INCH;
const HARM_PLATE_WIDTH: f64 = 27.831 * INCH;
const SNOUT_HEIGHT: f64 = 37.75 * INCH;
const SNOUT_THICKNESS: f64 = 1.0 * INCH;

const EARM_WINDOW_BEND: f64 = 5.750 * INCH;
const EARM_WINDOW_WIDTH: f64 = 2.0 * 9.625 * INCH;
const EARM_WINDOW_HEIGHT: f64 = 2.0 * 15.875 * INCH;
const HARM_WINDOW_BEND: f64 = 5.000 * INCH;
const HARM_WINDOW_WIDTH: f64 = 2.0 * 8.438 * INCH;
const HARM_WINDOW_HEIGHT: f64 = 2.0 * 9.562 * INCH;

const EARM_FOIL_THICKNESS: f64 = 0.032 * INCH;
const HARM_FOIL_THICKNESS: f64 = 0.020 * INCH;

const EARM_WINDOW_X: f64 = EARM_PLATE_WIDTH / 2.0 - 16.438 * INCH;
const HARM_WINDOW_X: f64 = -HARM_PLATE_WIDTH / 2.0 + 15.375 * INCH;
const EARM_ANGLE: f64 = 27.5 * DEG;
const HARM_ANGLE: f64 = 22.0 * DEG;

const BEAM_HOLE_DIAMETER: f64 = 4.870 * INCH;
const COUNTERBORE_DIAMETER: f64 = 5.010 * INCH;
const COUNTERBORE_DEPTH: f64 = 0.260 * INCH;
const BEAM_HOLE_X: f64 = BEAM_PLATE_WIDTH / 2.0 - 4.591 * INCH;
/// Distance from the chamber centre to the upstream face of the beam plate.
const BEAM_PLATE_Z: f64 = 48.56 * INCH;
const TARGET_OFFSET: f64 = 6.50 * INCH;

const CHAMBER_RADIUS: f64 = 23.80 * INCH;
const CHAMBER_HEIGHT: f64 = SNOUT_HEIGHT;

const SNOUT_HARM_PHI: f64 = (90.0 - 54.88) * DEG;
const SNOUT_EARM_PHI: f64 = (90.0 - 46.82) * DEG;
const SNOUT_TAPER: f64 = 38.81 * DEG;
const SNOUT_TAPER_START: f64 = 14.88 * INCH;
const SNOUT_TAPER_MARGIN: f64 = 40.0 * CM;

const IRON_TUBE_RMIN: f64 = 5.0 * CM;
const IRON_TUBE_RMAX: f64 = 7.0 * CM;
const IRON_TUBE_LENGTH: f64 = 6.5 * CM;

const HARM_FLANGE_WIDTH: f64 = 2.0 * 11.44 * INCH;
const HARM_FLANGE_HEIGHT: f64 = 2.0 * 12.56 * INCH;
const EARM_FLANGE_WIDTH: f64 = 2.0 * 12.62 * INCH;
const EARM_FLANGE_HEIGHT: f64 = SNOUT_HEIGHT;
const FLANGE_THICKNESS: f64 = 0.980 * INCH;

const SNOUT_COLOUR: Colour = Colour::rgb(0.6, 0.55, 0.65);
const FLANGE_COLOUR: Colour = Colour::rgb(0.15, 0.8, 0.9);
const WINDOW_COLOUR: Colour = Colour::rgb(0.9, 0.8, 0.15);

/// Positions of the snout plates in the hall.
#[derive(Debug, Clone, Copy)]
struct SnoutLayout {
    /// Centre of the beam plate.
    position: Vector3,
    harm: PlateFrame,
    earm: PlateFrame,
    right_corner: Vector3,
    left_corner: Vector3,
}

impl SnoutLayout {
    fn new() -> Self {
        Self {
            position: Vector3::new(
                -BEAM_HOLE_X,
                0.0,
                BEAM_PLATE_Z - TARGET_OFFSET + SNOUT_THICKNESS / 2.0,
            ),
            harm: PlateFrame::turned(-HARM_ANGLE),
            earm: PlateFrame::turned(EARM_ANGLE),
            right_corner: front_corner(BEAM_PLATE_WIDTH, SNOUT_THICKNESS, Side::Right),
            left_corner: front_corner(BEAM_PLATE_WIDTH, SNOUT_THICKNESS, Side::Left),
        }
    }

    /// H-arm plate centre relative to the beam plate.
    fn harm_plate(&self) -> Vector3 {
        self.right_corner - self.harm.to_parent(HARM_PLATE_WIDTH / 2.0, 0.0, SNOUT_THICKNESS / 2.0)
    }

    fn earm_plate(&self) -> Vector3 {
        self.left_corner + self.earm.to_parent(EARM_PLATE_WIDTH / 2.0, 0.0, -SNOUT_THICKNESS / 2.0)
    }

    /// Hall position of the centre of the H-arm window opening.
    fn harm_opening(&self) -> Vector3 {
        self.position + self.harm_plate() + self.harm.x_axis * HARM_WINDOW_X
    }

    fn earm_opening(&self) -> Vector3 {
        self.position + self.earm_plate() + self.earm.x_axis * EARM_WINDOW_X
    }

    /// Hall position of the H-arm window foil, on the downstream face.
    fn harm_foil(&self) -> Vector3 {
        self.position
            + self.right_corner
            + self
                .harm
                .to_parent(-HARM_PLATE_WIDTH / 2.0 + HARM_WINDOW_X, 0.0, HARM_FOIL_THICKNESS / 2.0)
    }

    fn earm_foil(&self) -> Vector3 {
        self.position
            + self.left_corner
            + self
                .earm
                .to_parent(EARM_PLATE_WIDTH / 2.0 + EARM_WINDOW_X, 0.0, EARM_FOIL_THICKNESS / 2.0)
    }

    /// Outline of the snout vacuum in the horizontal plane, as hall `(x, z)`.
    ///
    /// Runs from the chamber wall on the E-arm side, along the inner faces
    /// of the E-arm, beam and H-arm plates, back to the chamber wall.
    fn vacuum_outline(&self) -> Result<Vec<Point2>> {
        let chamber = Point3::new(0.0, 0.0, -TARGET_OFFSET);
        let plane_of = |plate: Vector3, frame: &PlateFrame| {
            let on_plane = self.position + plate - frame.z_axis * (SNOUT_THICKNESS / 2.0);
            Plane::from_normal(Point3::from(on_plane), frame.z_axis)
        };
        let earm_ray = Vector3::new(SNOUT_EARM_PHI.sin(), 0.0, SNOUT_EARM_PHI.cos());
        let harm_ray = Vector3::new(-SNOUT_HARM_PHI.sin(), 0.0, SNOUT_HARM_PHI.cos());
        let earm_side = intersect_ray(&chamber, &earm_ray, &plane_of(self.earm_plate(), &self.earm)?)?;
        let harm_side = intersect_ray(&chamber, &harm_ray, &plane_of(self.harm_plate(), &self.harm)?)?;

        // inner corners where the side plates meet the beam plate
        let earm_corner = self.position + self.left_corner - self.earm.z_axis * SNOUT_THICKNESS
            + self.earm.x_axis * (SNOUT_THICKNESS * (EARM_ANGLE / 2.0).tan());
        let harm_corner = self.position + self.right_corner
            - self.harm.z_axis * SNOUT_THICKNESS
            - self.harm.x_axis * (SNOUT_THICKNESS * (HARM_ANGLE / 2.0).tan());

        Ok(vec![
            Point2::new(
                CHAMBER_RADIUS * SNOUT_EARM_PHI.sin(),
                CHAMBER_RADIUS * SNOUT_EARM_PHI.cos() - TARGET_OFFSET,
            ),
            Point2::new(earm_side.point.x, earm_side.point.z),
            Point2::new(earm_corner.x, earm_corner.z),
            Point2::new(harm_corner.x, harm_corner.z),
            Point2::new(harm_side.point.x, harm_side.point.z),
            Point2::new(
                -CHAMBER_RADIUS * SNOUT_HARM_PHI.sin(),
                CHAMBER_RADIUS * SNOUT_HARM_PHI.cos() - TARGET_OFFSET,
            ),
        ])
    }
}

fn window_cutout(name: &str, width: f64, height: f64) -> Result<Solid> {
    Solid::box_shape(name, width / 2.0, height / 2.0, SNOUT_THICKNESS / 2.0 + MM)
}

fn snout_solid(layout: &SnoutLayout, earm_cutout: &Solid, harm_cutout: &Solid) -> Result<Solid> {
    let half_thick = SNOUT_THICKNESS / 2.0;
    let beam_plate = Solid::box_shape("SnoutBeamPlate_Box", BEAM_PLATE_WIDTH / 2.0, SNOUT_HEIGHT / 2.0, half_thick)?;
    let through = cylinder("SnoutBeamPlate_ThroughHole", 0.0, BEAM_HOLE_DIAMETER / 2.0, half_thick + MM)?;
    let beam_plate = beam_plate.subtract(
        "SnoutBeamPlate_cut1",
        &through,
        Transform::translation(BEAM_HOLE_X, 0.0, 0.0),
    );
    // counterbore opens on the downstream face
    let bore = cylinder(
        "SnoutBeamPlate_CounterBore",
        0.0,
        COUNTERBORE_DIAMETER / 2.0,
        COUNTERBORE_DEPTH / 2.0 + MM,
    )?;
    let beam_plate = beam_plate.subtract(
        "SnoutBeamPlate_cut2",
        &bore,
        Transform::translation(BEAM_HOLE_X, 0.0, half_thick - COUNTERBORE_DEPTH / 2.0 + MM),
    );

    let earm_plate = Solid::box_shape("SnoutEarmPlate_Box", EARM_PLATE_WIDTH / 2.0, SNOUT_HEIGHT / 2.0, half_thick)?
        .subtract("EarmPlate_cut", earm_cutout, Transform::translation(EARM_WINDOW_X, 0.0, 0.0));
    let harm_plate = Solid::box_shape("SnoutHarmPlate_Box", HARM_PLATE_WIDTH / 2.0, SNOUT_HEIGHT / 2.0, half_thick)?
        .subtract("HarmPlate_cut", harm_cutout, Transform::translation(HARM_WINDOW_X, 0.0, 0.0));

    let snout = beam_plate.union("BeamHarmUnion", &harm_plate, layout.harm.placement(layout.harm_plate()));
    Ok(snout.union("Snout_solid", &earm_plate, layout.earm.placement(layout.earm_plate())))
}

/// Corner offsets and frame turns that fill the four corners of a sharp
/// rectangular opening with unrotated-corner pieces.
fn corner_slots(width: f64, height: f64, bend: f64) -> [(&'static str, f64, f64, f64); 4] {
    let x = width / 2.0 - bend / 2.0;
    let y = height / 2.0 - bend / 2.0;
    [
        ("bottom_right", -x, -y, 0.0),
        ("top_right", -x, y, 90.0 * DEG),
        ("bottom_left", x, -y, -90.0 * DEG),
        ("top_left", x, y, 180.0 * DEG),
    ]
}

/// Vacuum-filled window opening with steel corner pieces, placed in the
/// world on the plate's mid-plane.
fn place_opening(
    ctx: &mut BuildContext<'_>,
    arm: &str,
    cutout: &Solid,
    corner: VolumeId,
    (width, height, bend): (f64, f64, f64),
    frame: &PlateFrame,
    position: Vector3,
) -> Result<VolumeId> {
    let opening = ctx.volume(cutout.clone(), "Vacuum", &format!("Snout{arm}WindowCutout_log"))?;
    for (copy, (slot, x, y, turn)) in (0u32..).zip(corner_slots(width, height, bend)) {
        ctx.place(
            corner,
            opening,
            Transform::from_frame(Rotation::identity().rotate_z(turn), Vector3::new(x, y, 0.0)),
            copy,
            &format!("{arm}WindowCorner_phys_{slot}"),
            CHECK_OVERLAPS,
        )?;
    }
    let world = ctx.world;
    ctx.place(
        opening,
        world,
        frame.placement(position),
        0,
        &format!("Snout{arm}WindowCutout_phys"),
        CHECK_OVERLAPS,
    )?;
    ctx.set_vis(opening, VisAttributes::invisible())?;
    Ok(opening)
}

/// Window foil and flange on the downstream face of one side plate, with
/// aluminium corner pieces rounding the flange opening.
#[allow(clippy::too_many_arguments)]
fn place_window_and_flange(
    ctx: &mut BuildContext<'_>,
    arm: &str,
    cutout: &Solid,
    corner_shape: &Solid,
    (opening_width, opening_height, bend): (f64, f64, f64),
    (flange_width, flange_height, foil_thickness): (f64, f64, f64),
    frame: &PlateFrame,
    foil_position: Vector3,
) -> Result<()> {
    let world = ctx.world;
    let foil_box = Solid::box_shape(
        &format!("{arm}AlWindow_box"),
        flange_width / 2.0,
        flange_height / 2.0,
        foil_thickness / 2.0,
    )?;
    let foil = ctx.volume(foil_box, "Aluminum", &format!("{arm}Window_log"))?;
    ctx.place(foil, world, frame.placement(foil_position), 0, &format!("{arm}Window_phys"), CHECK_OVERLAPS)?;
    ctx.set_vis(foil, VisAttributes::coloured(WINDOW_COLOUR).wireframe())?;

    let flange_box = Solid::box_shape(
        &format!("{arm}Flange_box"),
        flange_width / 2.0,
        flange_height / 2.0,
        FLANGE_THICKNESS / 2.0,
    )?;
    let flange_solid = flange_box.subtract(format!("{arm}Flange_cut"), cutout, Transform::identity());
    let flange = ctx.volume(flange_solid, "Aluminum", &format!("{arm}Flange_log"))?;
    let flange_position = foil_position + frame.z_axis * ((foil_thickness + FLANGE_THICKNESS) / 2.0);
    ctx.place(flange, world, frame.placement(flange_position), 0, &format!("{arm}Flange_phys"), CHECK_OVERLAPS)?;

    let corner = ctx.volume(corner_shape.clone(), "Aluminum", &format!("{arm}FlangeCorner_log"))?;
    // plate frame rotY(-angle), then the corner's own turn about the plate normal
    let plate_turn = Rotation::identity().rotate_y(-frame.angle());
    for (copy, (slot, x, y, turn)) in (0u32..).zip(corner_slots(opening_width, opening_height, bend)) {
        ctx.place(
            corner,
            world,
            Transform::from_frame(plate_turn.rotate_z(turn), flange_position + frame.to_parent(x, y, 0.0)),
            copy,
            &format!("{arm}FlangeCorner_phys_{slot}"),
            CHECK_OVERLAPS,
        )?;
    }
    for id in [flange, corner] {
        ctx.set_vis(id, VisAttributes::coloured(FLANGE_COLOUR))?;
    }
    Ok(())
}

/// Tapered vacuum between the chamber wall and the snout, in a frame whose
/// z axis is vertical and y axis points downstream.
fn snout_vacuum(layout: &SnoutLayout) -> Result<Solid> {
    let planes = flared_snout_planes(
        SNOUT_HEIGHT / 2.0,
        CHAMBER_RADIUS,
        SNOUT_TAPER_START,
        SNOUT_TAPER,
        SNOUT_TAPER_MARGIN,
    )?;
    let taper = Solid::polycone("SnoutTaper", 46.82 * DEG, SNOUT_EARM_PHI + SNOUT_HARM_PHI, planes)?;
    let outline = Solid::extruded("Snout_pgon", layout.vacuum_outline()?, SNOUT_HEIGHT / 2.0)?;
    Ok(taper.intersect(
        "SnoutTaperPgon_intersect",
        &outline,
        Transform::translation(0.0, TARGET_OFFSET, 0.0),
    ))
}

/// Builds the chamber, the snout (not for the positron run) and runs
/// `target` inside the chamber.
///
/// # Errors
///
/// Propagates geometry, derivation, material and naming errors.
pub fn build(ctx: &mut BuildContext<'_>, target: TargetRecipe) -> Result<()> {
    let world = ctx.world;
    let layout = SnoutLayout::new();
    let with_snout = ctx.config.experiment != ExperimentType::GepPositron;

    let earm_cutout = window_cutout("EarmWindowCutout_box", EARM_WINDOW_WIDTH, EARM_WINDOW_HEIGHT)?;
    let harm_cutout = window_cutout("HarmWindowCutout_box", HARM_WINDOW_WIDTH, HARM_WINDOW_HEIGHT)?;
    let earm_corner_shape = rounded_corner_piece("EarmWindowCorner", EARM_WINDOW_BEND, SNOUT_THICKNESS)?;
    let harm_corner_shape = rounded_corner_piece("HarmWindowCorner", HARM_WINDOW_BEND, SNOUT_THICKNESS)?;
    let earm_opening = (EARM_WINDOW_WIDTH, EARM_WINDOW_HEIGHT, EARM_WINDOW_BEND);
    let harm_opening = (HARM_WINDOW_WIDTH, HARM_WINDOW_HEIGHT, HARM_WINDOW_BEND);

    if with_snout {
        let snout = ctx.volume(snout_solid(&layout, &earm_cutout, &harm_cutout)?, "Stainless_Steel", "Snout_log")?;
        ctx.place(snout, world, Transform::new(Rotation::identity(), layout.position), 0, "Snout_phys", CHECK_OVERLAPS)?;

        let harm_corner = ctx.volume(harm_corner_shape.clone(), "Stainless_Steel", "HarmWindowCorner_log")?;
        let earm_corner = ctx.volume(earm_corner_shape.clone(), "Stainless_Steel", "EarmWindowCorner_log")?;
        place_opening(ctx, "Harm", &harm_cutout, harm_corner, harm_opening, &layout.harm, layout.harm_opening())?;
        place_opening(ctx, "Earm", &earm_cutout, earm_corner, earm_opening, &layout.earm, layout.earm_opening())?;
        for id in [snout, harm_corner, earm_corner] {
            ctx.set_vis(id, VisAttributes::coloured(SNOUT_COLOUR))?;
        }
    }

    let chamber = ctx.target_volume(
        cylinder("ScatChamber_solid", 0.0, CHAMBER_RADIUS, CHAMBER_HEIGHT / 2.0)?,
        "Vacuum",
        "ScatChamber_log",
    )?;
    ctx.place(
        chamber,
        world,
        Transform::from_frame(
            Rotation::identity().rotate_x(90.0 * DEG),
            Vector3::new(0.0, 0.0, -TARGET_OFFSET),
        ),
        0,
        "ScatChamber_phys",
        CHECK_OVERLAPS,
    )?;
    let target_mount = Mount::new(
        chamber,
        Rotation::identity().rotate_x(-90.0 * DEG),
        Vector3::new(0.0, -TARGET_OFFSET, 0.0),
    );
    target(ctx, &target_mount)?;

    let vacuum = ctx.target_volume(snout_vacuum(&layout)?, "Vacuum", "SnoutVacuum_log")?;
    ctx.place(
        vacuum,
        world,
        Transform::from_frame(
            Rotation::identity().rotate_x(-90.0 * DEG),
            Vector3::new(0.0, 0.0, -TARGET_OFFSET),
        ),
        0,
        "SnoutVacuum_phys",
        CHECK_OVERLAPS,
    )?;

    // beam pipe collar just upstream of the beam plate
    let iron = ctx.volume(
        cylinder("IronTube", IRON_TUBE_RMIN, IRON_TUBE_RMAX, IRON_TUBE_LENGTH / 2.0)?,
        "Iron",
        "IronTube_log",
    )?;
    ctx.set_vis(iron, VisAttributes::coloured(Colour::grey(0.3)))?;
    ctx.place(
        iron,
        vacuum,
        Transform::from_frame(
            Rotation::identity().rotate_x(90.0 * DEG),
            Vector3::new(0.0, BEAM_PLATE_Z - IRON_TUBE_LENGTH / 2.0, 0.0),
        ),
        0,
        "IronTube_phys",
        CHECK_OVERLAPS,
    )?;

    if with_snout {
        place_window_and_flange(
            ctx,
            "Harm",
            &harm_cutout,
            &harm_corner_shape,
            harm_opening,
            (HARM_FLANGE_WIDTH, HARM_FLANGE_HEIGHT, HARM_FOIL_THICKNESS),
            &layout.harm,
            layout.harm_foil(),
        )?;
        place_window_and_flange(
            ctx,
            "Earm",
            &earm_cutout,
            &earm_corner_shape,
            earm_opening,
            (EARM_FLANGE_WIDTH, EARM_FLANGE_HEIGHT, EARM_FOIL_THICKNESS),
            &layout.earm,
            layout.earm_foil(),
        )?;
    }

    let wire = VisAttributes::coloured(SNOUT_COLOUR).wireframe();
    ctx.set_vis(chamber, wire)?;
    ctx.set_vis(vacuum, wire)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::{TargetConfig, TargetType};
    use crate::recipes::testing::Harness;
    use approx::assert_relative_eq;

    fn built_with(experiment: ExperimentType, target: TargetType) -> Harness {
        let mut h = Harness::new(TargetConfig {
            experiment,
            target,
            ..TargetConfig::default()
        });
        let target = h.target_recipe();
        build(&mut h.ctx(), target).unwrap();
        h
    }

    fn built(experiment: ExperimentType) -> Harness {
        built_with(experiment, TargetType::Lh2)
    }

    #[test]
    fn empty_chamber_without_a_target() {
        let h = built_with(ExperimentType::Gep, TargetType::None);
        assert_eq!(h.children_of("World_log").len(), 17);
        assert!(h.children_of("ScatChamber_log").is_empty());
        for name in ["TargetMother_log", "TargetCell_log", "Target_log"] {
            assert!(h.store.volume_by_name(name).is_err(), "{name}");
        }
    }

    #[test]
    fn full_snout_is_placed_for_gep() {
        let h = built(ExperimentType::Gep);
        let world = h.children_of("World_log");
        assert_eq!(world.len(), 17);
        assert_eq!(world[..4], ["Snout_phys", "SnoutHarmWindowCutout_phys", "SnoutEarmWindowCutout_phys", "ScatChamber_phys"]);
        assert!(world.iter().any(|n| n == "EarmFlangeCorner_phys_top_left"));
        assert_eq!(h.children_of("SnoutHarmWindowCutout_log").len(), 4);
        assert_eq!(h.children_of("SnoutVacuum_log"), ["IronTube_phys"]);
        assert_eq!(h.children_of("ScatChamber_log"), ["TargetMother_phys"]);
        assert!(h.targets.is_target_volume("ScatChamber_log"));
        assert!(h.targets.is_target_volume("SnoutVacuum_log"));
    }

    #[test]
    fn positron_run_has_no_snout() {
        let h = built(ExperimentType::GepPositron);
        assert_eq!(h.children_of("World_log"), ["ScatChamber_phys", "SnoutVacuum_phys"]);
        assert!(h.store.volume_by_name("Snout_log").is_err());
    }

    #[test]
    fn outline_meets_the_inner_plate_faces() {
        let layout = SnoutLayout::new();
        let outline = layout.vacuum_outline().unwrap();
        assert_eq!(outline.len(), 6);
        // end points sit on the chamber wall
        for p in [outline[0], outline[5]] {
            assert_relative_eq!((p.x.powi(2) + (p.y + TARGET_OFFSET).powi(2)).sqrt(), CHAMBER_RADIUS, epsilon = 1e-9);
        }
        let inner_face = layout.position + layout.earm_plate() - layout.earm.z_axis * (SNOUT_THICKNESS / 2.0);
        let on_face = Vector3::new(outline[1].x, 0.0, outline[1].y) - inner_face;
        assert_relative_eq!(on_face.dot(&layout.earm.z_axis), 0.0, epsilon = 1e-9);
        // the beam-plate edge of the outline lies on its upstream face
        assert_relative_eq!(outline[2].y, outline[3].y, epsilon = 1e-6);
        assert_relative_eq!(outline[2].y, BEAM_PLATE_Z - TARGET_OFFSET, epsilon = 1e-6);
    }

    #[test]
    fn iron_tube_sits_inside_the_snout_vacuum() {
        let h = built(ExperimentType::Gep);
        let vacuum = &h.store.volume(h.id("SnoutVacuum_log")).unwrap().solid;
        let iron = h.store.placement_by_name("IronTube_phys").unwrap();
        let centre = h.store.placement(iron).unwrap().transform.apply_point(&Point3::origin());
        assert!(vacuum.contains(&centre));
    }

    #[test]
    fn cryotarget_cell_is_on_the_beam_axis() {
        let h = built(ExperimentType::Gep);
        let cell = h.store.placement_by_name("TargetCell_phys").unwrap();
        let global = h.store.global_transform(cell).unwrap();
        assert_relative_eq!(global.apply_point(&Point3::origin()).coords, Vector3::zeros(), epsilon = 0.1);
        assert_relative_eq!(global.apply_vector(&Vector3::z()), Vector3::z(), epsilon = 1e-9);
    }
}
