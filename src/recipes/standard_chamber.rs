//! Standard scattering chamber used by GMn, GEn-RP and the GEM/HCal test
//! run.
//!
//! An aluminium tank with an exit-flange plate, two clamshells carrying the
//! snouts and beam pipes, thin snout windows with rounded frames, and the
//! vacuum inside. The tank axis is vertical; its local z points down.

use super::{cylinder, BuildContext, Mount};
use crate::builder::TargetRecipe;
use crate::derive::{aperture_atan, flange_outer_radius, rounded_rect_cutout};
use crate::error::Result;
use crate::math::Vector3;
use crate::scene::{Colour, VisAttributes};
use crate::solid::Solid;
use crate::transform::{Rotation, Transform};
use crate::units::{CM, DEG, INCH, M, MM};

const CHECK_OVERLAPS: bool = false;

const HEIGHT: f64 = 44.75 * INCH;
const RADIUS: f64 = 20.0 * INCH;
const TANK_THICKNESS: f64 = 2.5 * INCH;
const TANK_RADIUS: f64 = RADIUS + TANK_THICKNESS;
/// Height of the beam line above the tank centre.
const OFFSET: f64 = 3.75 * INCH;

const FLANGE_PLATE_HEIGHT: f64 = 11.0 * INCH;
const FLANGE_PLATE_THICKNESS: f64 = 1.25 * INCH;
const FLANGE_HOLE_HEIGHT: f64 = 7.85 * INCH;
const FLANGE_HOLE_APERTURE: f64 = 38.25 * DEG;

const WINDOW_HEIGHT: f64 = 18.0 * INCH;
const WINDOW_APERTURE: f64 = 149.0 * DEG;
const WINDOW_ANGLE_OFFSET: f64 = 11.0 * DEG;

const CLAM_HEIGHT: f64 = 20.0 * INCH;
const CLAM_THICKNESS: f64 = 1.25 * INCH;
const CLAM_APERTURE: f64 = 151.0 * DEG;
const FRONT_CLAM_OUTER_RADIUS: f64 = TANK_RADIUS + CLAM_THICKNESS;

const BEAM_EXIT_ANGLE: f64 = 64.5 * DEG;
const LEFT_SNOUT_ANGLE: f64 = -24.2 * DEG;
const RIGHT_SNOUT_ANGLE: f64 = 47.5 * DEG;

const RIGHT_SNOUT_DEPTH: f64 = 15.0 * INCH;
const RIGHT_SNOUT_WIDTH: f64 = 26.0 * INCH;
const RIGHT_SNOUT_HEIGHT: f64 = 18.0 * INCH;
const RIGHT_SNOUT_HOLE_HEIGHT: f64 = 14.0 * INCH;
const RIGHT_SNOUT_HOLE_APERTURE: f64 = 55.0 * DEG;
const RIGHT_SNOUT_BOX_ANGLE: f64 = 9.40 * DEG;
const RIGHT_WINDOW_WIDTH: f64 = 26.351 * INCH;
const RIGHT_HOLE_WIDTH: f64 = 24.47 * INCH;
const RIGHT_HOLE_RADIUS: f64 = 2.1 * INCH;

const LEFT_SNOUT_DEPTH: f64 = 4.0 * INCH;
const LEFT_SNOUT_WIDTH: f64 = 16.338 * INCH;
const LEFT_SNOUT_HEIGHT: f64 = 11.0 * INCH;
const LEFT_SNOUT_HOLE_HEIGHT: f64 = 7.0 * INCH;
const LEFT_SNOUT_HOLE_APERTURE: f64 = 30.0 * DEG;
const LEFT_SNOUT_Y_OFFSET: f64 = 0.5 * INCH;
const LEFT_HOLE_WIDTH: f64 = 12.673 * INCH;
const LEFT_HOLE_RADIUS: f64 = 1.05 * INCH;
/// Round notch clearing the beam pipe at the inner edge of the left window.
const LEFT_NOTCH_RADIUS: f64 = 2.579 * INCH;
const LEFT_NOTCH_X: f64 = 10.287 * INCH;

const SNOUT_WINDOW_THICKNESS: f64 = 0.02 * INCH;
const SNOUT_FRAME_THICKNESS: f64 = 0.75 * INCH;

const BACK_CLAM_THICKNESS: f64 = 0.80 * INCH;
const BACK_CLAM_HEIGHT: f64 = 12.0 * INCH;
const BACK_CLAM_APERTURE: f64 = 145.7 * DEG;
const BACK_CLAM_ANGLE: f64 = -2.5 * DEG;
const BACK_CLAM_OUTER_RADIUS: f64 = TANK_RADIUS + CLAM_THICKNESS + BACK_CLAM_THICKNESS;
const BEAM_ENTRANCE_ANGLE: f64 = BACK_CLAM_ANGLE - 84.0 * DEG;
const BACK_VIEW_ANGLE: f64 = BACK_CLAM_ANGLE - 39.9 * DEG;

/// Point at distance `r` and azimuth `phi` in the clamshell's plane.
fn at_azimuth(r: f64, phi: f64, z: f64) -> Vector3 {
    Vector3::new(r * phi.cos(), r * phi.sin(), z)
}

fn frame_z(angle: f64) -> Rotation {
    Rotation::identity().rotate_z(angle)
}

/// Frame of a pipe sticking out radially at azimuth `-(90° + turn)`.
fn pipe_frame(turn: f64) -> Rotation {
    Rotation::identity().rotate_x(90.0 * DEG).rotate_y(turn)
}

/// Window sector cut through the tank, and the matching vacuum.
fn window_sector(name: &str, r_outer: f64) -> Result<Solid> {
    Solid::tube(name, RADIUS - 1.0 * CM, r_outer, WINDOW_HEIGHT / 2.0, 0.0, WINDOW_APERTURE)
}

fn front_window_frame() -> Rotation {
    frame_z(90.0 * DEG + WINDOW_APERTURE / 2.0 - WINDOW_ANGLE_OFFSET)
}

fn back_window_frame() -> Rotation {
    frame_z(-90.0 * DEG + WINDOW_APERTURE / 2.0 + WINDOW_ANGLE_OFFSET)
}

fn tank(flange_aperture: f64, flange_radius: f64) -> Result<Solid> {
    let offset = Vector3::new(0.0, 0.0, OFFSET);
    let wall = cylinder("SCTank_0", RADIUS, TANK_RADIUS, HEIGHT / 2.0)?;
    let flange = Solid::tube(
        "SCExFlange_tubs",
        RADIUS,
        flange_radius,
        FLANGE_PLATE_HEIGHT / 2.0,
        0.0,
        2.0 * flange_aperture,
    )?;
    let tank = wall.union(
        "solidSCTank_0_exft",
        &flange,
        Transform::from_frame(frame_z(180.0 * DEG + flange_aperture), offset),
    );
    // flatten the flange head where the plate sits
    let head_cut = Solid::box_shape("ExitFlangeHeadCut", 0.5 * M, 0.5 * M, 0.5 * M)?;
    let tank = tank.subtract(
        "solidSCTank_0_exf",
        &head_cut,
        Transform::translation(-TANK_RADIUS - 0.5 * M, 0.0, 0.0),
    );
    let hole = Solid::tube(
        "SCExFH",
        RADIUS - 1.0 * CM,
        TANK_RADIUS + 1.5 * INCH,
        FLANGE_HOLE_HEIGHT / 2.0,
        0.0,
        FLANGE_HOLE_APERTURE,
    )?;
    let tank = tank.subtract(
        "solidSCTank_0_exfh",
        &hole,
        Transform::from_frame(frame_z(180.0 * DEG + FLANGE_HOLE_APERTURE / 2.0), offset),
    );
    let window = window_sector("SCWindow", TANK_RADIUS + 1.0 * CM)?;
    let tank = tank.subtract(
        "solidSCTank_0_wf",
        &window,
        Transform::from_frame(front_window_frame(), offset),
    );
    Ok(tank.subtract(
        "solidSCTank_0_wb",
        &window,
        Transform::from_frame(back_window_frame(), offset),
    ))
}

fn clamshell_base() -> Result<Solid> {
    Solid::tube(
        "solidSCClamshell_0",
        TANK_RADIUS,
        FRONT_CLAM_OUTER_RADIUS,
        CLAM_HEIGHT / 2.0,
        0.0,
        CLAM_APERTURE,
    )
}

fn exit_pipe_hole() -> Result<Solid> {
    cylinder("solidExitBeamPipeHole", 0.0, 50.0 * MM, 7.903 * INCH)
}

fn entrance_pipe_hole() -> Result<Solid> {
    cylinder("solidEntranceBeamPipeHole", 0.0, 1.0 * INCH, 5.375 * INCH)
}

fn front_clamshell() -> Result<Solid> {
    let right_offset = BEAM_EXIT_ANGLE + RIGHT_SNOUT_ANGLE;
    let left_offset = BEAM_EXIT_ANGLE + LEFT_SNOUT_ANGLE;

    let right_box = Solid::box_shape(
        "RightSnoutBox",
        RIGHT_SNOUT_DEPTH / 2.0,
        RIGHT_SNOUT_WIDTH / 2.0,
        RIGHT_SNOUT_HEIGHT / 2.0,
    )?;
    let clam = clamshell_base()?.union(
        "solidSCClamshell_0_rsb",
        &right_box,
        Transform::from_frame(
            frame_z(180.0 * DEG - right_offset - RIGHT_SNOUT_BOX_ANGLE),
            at_azimuth(FRONT_CLAM_OUTER_RADIUS, right_offset, 0.0),
        ),
    );
    let right_box_cut = Solid::box_shape(
        "RightSnoutBox_cut",
        RIGHT_SNOUT_DEPTH + 0.01 * INCH,
        RIGHT_SNOUT_WIDTH,
        RIGHT_SNOUT_HEIGHT / 2.0 + 0.01 * INCH,
    )?;
    let clam = clam.subtract(
        "solidSCFrontClam_0_rsbc",
        &right_box_cut,
        Transform::from_frame(
            frame_z(180.0 * DEG - right_offset),
            at_azimuth(FRONT_CLAM_OUTER_RADIUS + RIGHT_SNOUT_DEPTH, right_offset, 0.0),
        ),
    );
    let right_aperture = Solid::tube(
        "RightSnoutApertCut",
        0.0,
        30.0 * INCH,
        RIGHT_SNOUT_HOLE_HEIGHT / 2.0,
        0.0,
        RIGHT_SNOUT_HOLE_APERTURE,
    )?;
    let clam = clam.subtract(
        "solidSCClamshell_0_rs",
        &right_aperture,
        Transform::from_frame(
            frame_z(-right_offset + RIGHT_SNOUT_HOLE_APERTURE / 2.0),
            Vector3::zeros(),
        ),
    );

    let left_box = Solid::box_shape(
        "LeftSnoutBox",
        LEFT_SNOUT_DEPTH / 2.0,
        LEFT_SNOUT_WIDTH / 2.0,
        LEFT_SNOUT_HEIGHT / 2.0,
    )?;
    let clam = clam.union(
        "solidSCClamshell_0_lsb",
        &left_box,
        Transform::from_frame(
            frame_z(180.0 * DEG - left_offset),
            at_azimuth(FRONT_CLAM_OUTER_RADIUS - 1.85 * INCH, left_offset, LEFT_SNOUT_Y_OFFSET),
        ),
    );
    let inner_cut = cylinder("SnoutsInnerCut", 0.0, TANK_RADIUS, CLAM_HEIGHT / 2.0)?;
    let clam = clam.subtract("solidSCClamshell_0_lsbc", &inner_cut, Transform::identity());
    let left_aperture = Solid::tube(
        "LeftSnoutApertCut",
        0.0,
        30.0 * INCH,
        LEFT_SNOUT_HOLE_HEIGHT / 2.0,
        0.0,
        LEFT_SNOUT_HOLE_APERTURE,
    )?;
    let clam = clam.subtract(
        "solidSCClamshell_0_ls",
        &left_aperture,
        Transform::from_frame(
            frame_z(-left_offset + LEFT_SNOUT_HOLE_APERTURE / 2.0),
            Vector3::new(0.0, 0.0, LEFT_SNOUT_Y_OFFSET),
        ),
    );

    let exit = pipe_frame(-90.0 * DEG + BEAM_EXIT_ANGLE);
    let along_exit = |r: f64| at_azimuth(r, BEAM_EXIT_ANGLE, 0.0);
    let pipe = cylinder("solidExitBeamPipe", 0.0, 55.0 * MM, 2.150 * INCH)?;
    let clam = clam.union(
        "solidSCClamshell_0_ebp",
        &pipe,
        Transform::from_frame(exit, along_exit(FRONT_CLAM_OUTER_RADIUS + 2.003 * INCH)),
    );
    let surround = cylinder("solidExitBeamPipeSurroundCut", 55.0 * MM, 2.803 * INCH, 1.684 * INCH)?;
    let clam = clam.subtract(
        "solidSCClamshell_0_ebps",
        &surround,
        Transform::from_frame(exit, along_exit(FRONT_CLAM_OUTER_RADIUS + 1.684 * INCH)),
    );
    let flange = cylinder("solidExitBeamPipeFlange", 0.0, 2.985 * INCH, 0.3925 * INCH)?;
    let clam = clam.union(
        "solidSCClamshell_0_ebpf",
        &flange,
        Transform::from_frame(exit, along_exit(FRONT_CLAM_OUTER_RADIUS + 3.7605 * INCH)),
    );
    Ok(clam.subtract(
        "solidSCClamshell_0_ebph",
        &exit_pipe_hole()?,
        Transform::from_frame(exit, along_exit(FRONT_CLAM_OUTER_RADIUS)),
    ))
}

fn back_clamshell() -> Result<Solid> {
    // the back pipes are measured clockwise
    let along = |r: f64, angle: f64| at_azimuth(r, -angle, 0.0);

    let extra = Solid::tube(
        "solidSCAddBackClam",
        TANK_RADIUS + CLAM_THICKNESS - 0.5 * CM,
        BACK_CLAM_OUTER_RADIUS,
        BACK_CLAM_HEIGHT / 2.0,
        0.0,
        BACK_CLAM_APERTURE,
    )?;
    let clam = clamshell_base()?.union(
        "solidSCClamshell_0_abc",
        &extra,
        Transform::from_frame(frame_z(BACK_CLAM_ANGLE), Vector3::zeros()),
    );

    let entrance = pipe_frame(-90.0 * DEG - BEAM_ENTRANCE_ANGLE);
    let pipe = cylinder("solidEntranceBeamPipe", 0.0, 2.25 * INCH, 0.825 * INCH)?;
    let at_entrance = along(BACK_CLAM_OUTER_RADIUS, BEAM_ENTRANCE_ANGLE);
    let clam = clam.union(
        "solidSCClamshell_0_ebp",
        &pipe,
        Transform::from_frame(entrance, at_entrance),
    );
    let clam = clam.subtract(
        "solidSCClamshell_0_ebph",
        &entrance_pipe_hole()?,
        Transform::from_frame(entrance, at_entrance),
    );

    let view = pipe_frame(-90.0 * DEG - BACK_VIEW_ANGLE);
    let view_pipe = cylinder("solidBackViewPipe", 0.0, 2.12 * INCH, 1.555 * INCH)?;
    let clam = clam.union(
        "solidSCClamshell_0_bvp",
        &view_pipe,
        Transform::from_frame(view, along(BACK_CLAM_OUTER_RADIUS + 1.501 * INCH, BACK_VIEW_ANGLE)),
    );
    let view_flange = cylinder("solidBackViewPipeFlange", 0.0, 3.0 * INCH, 0.5 * INCH)?;
    let clam = clam.union(
        "solidSCClamshell_0_bvpf",
        &view_flange,
        Transform::from_frame(view, along(BACK_CLAM_OUTER_RADIUS + 2.556 * INCH, BACK_VIEW_ANGLE)),
    );
    let view_hole = cylinder("solidBackViewPipeHole", 0.0, 2.0 * INCH, 4.0 * INCH)?;
    Ok(clam.subtract(
        "solidSCClamshell_0_bvph",
        &view_hole,
        Transform::from_frame(view, along(BACK_CLAM_OUTER_RADIUS, BACK_VIEW_ANGLE)),
    ))
}

fn left_notch() -> Result<Solid> {
    cylinder("LeftSnoutWindow_cut_0", 0.0, LEFT_NOTCH_RADIUS, SNOUT_FRAME_THICKNESS)
}

fn left_notch_position() -> Transform {
    Transform::translation(LEFT_NOTCH_X, -LEFT_SNOUT_Y_OFFSET, 0.0)
}

fn chamber_vacuum() -> Result<Solid> {
    let offset = Vector3::new(0.0, 0.0, OFFSET);
    let base = cylinder("SC", 0.0, RADIUS, HEIGHT / 2.0)?;
    let window = window_sector("SCWindowVacuumFront", TANK_RADIUS)?;
    let vacuum = base.union(
        "solidScatChamber_0_wbv",
        &window,
        Transform::from_frame(front_window_frame(), offset),
    );
    let upright = Rotation::identity().rotate_x(90.0 * DEG);
    let vacuum = vacuum.union(
        "solidScatChamber_0_entbp",
        &entrance_pipe_hole()?,
        Transform::from_frame(upright, Vector3::new(0.0, -RADIUS, OFFSET)),
    );
    Ok(vacuum.union(
        "solidScatChamber_0_exbp",
        &exit_pipe_hole()?,
        Transform::from_frame(upright, Vector3::new(0.0, RADIUS, OFFSET)),
    ))
}

/// Snout window of the given half-size, placed `distance` from the target
/// along `angle`, turned to face it.
fn snout_transform(angle: f64, distance: f64, height: f64) -> Transform {
    Transform::from_frame(
        Rotation::identity().rotate_y(-angle),
        Vector3::new(distance * angle.sin(), height, distance * angle.cos()),
    )
}

/// Builds the chamber and runs `target` at the target position inside it.
///
/// # Errors
///
/// Propagates geometry, derivation, material and naming errors.
pub fn build(ctx: &mut BuildContext<'_>, target: TargetRecipe) -> Result<()> {
    let world = ctx.world;

    let flange_half_length = 22.5 * (25.5 * DEG).sin() * INCH;
    let flange_aperture = aperture_atan(flange_half_length, TANK_RADIUS + FLANGE_PLATE_THICKNESS)?;
    let flange_radius = flange_outer_radius(flange_half_length, flange_aperture)?;

    // tank axis vertical, beam line at the world origin
    let tank_frame = Rotation::identity().rotate_x(-90.0 * DEG);
    let tank_position = Rotation::identity()
        .rotate_x(90.0 * DEG)
        .apply(&Vector3::new(0.0, 0.0, -OFFSET));
    let tank_placement = Transform::from_frame(tank_frame, tank_position);

    let tank_log = ctx.volume(tank(flange_aperture, flange_radius)?, "Aluminum", "ScatChamberTank_log")?;
    ctx.place(tank_log, world, tank_placement, 0, "ScatChamberTankPhys", CHECK_OVERLAPS)?;

    let plate = Solid::box_shape(
        "SCExitFlangePlate_sol",
        FLANGE_PLATE_THICKNESS / 2.0,
        FLANGE_PLATE_HEIGHT / 2.0,
        flange_half_length,
    )?;
    let plate_log = ctx.volume(plate, "Aluminum", "SCExitFlangePlate_log")?;
    ctx.place(
        plate_log,
        world,
        Transform::translation(-TANK_RADIUS - FLANGE_PLATE_THICKNESS / 2.0, 0.0, 0.0),
        0,
        "SCExitFlangePlate",
        CHECK_OVERLAPS,
    )?;

    // right snout window and its frame
    let right_window_distance = 23.74 * INCH + SNOUT_WINDOW_THICKNESS / 2.0;
    let frame_offset = SNOUT_WINDOW_THICKNESS / 2.0 + SNOUT_FRAME_THICKNESS / 2.0;
    let right_window = Solid::box_shape(
        "RightSnoutWindow_sol",
        RIGHT_WINDOW_WIDTH / 2.0,
        RIGHT_SNOUT_HEIGHT / 2.0,
        SNOUT_WINDOW_THICKNESS / 2.0,
    )?;
    let right_window_log = ctx.volume(right_window, "Aluminum", "SCRightSnoutWindow_log")?;
    ctx.place(
        right_window_log,
        world,
        snout_transform(RIGHT_SNOUT_ANGLE, right_window_distance, 0.0),
        0,
        "SCRightSnoutWindow",
        CHECK_OVERLAPS,
    )?;
    let right_frame_plate = Solid::box_shape(
        "RightSnoutWindowFrame_0",
        RIGHT_SNOUT_WIDTH / 2.0,
        RIGHT_SNOUT_HEIGHT / 2.0,
        SNOUT_FRAME_THICKNESS / 2.0,
    )?;
    let right_frame = rounded_rect_cutout(
        &right_frame_plate,
        "RightSnoutWindowFrame",
        RIGHT_HOLE_WIDTH,
        RIGHT_SNOUT_HOLE_HEIGHT,
        RIGHT_HOLE_RADIUS,
        SNOUT_FRAME_THICKNESS,
    )?;
    let right_frame_log = ctx.volume(right_frame, "Aluminum", "SCRightSnoutWindowFrame_log")?;
    ctx.place(
        right_frame_log,
        world,
        snout_transform(RIGHT_SNOUT_ANGLE, right_window_distance + frame_offset, 0.0),
        0,
        "SCRightSnoutWindowFrame",
        CHECK_OVERLAPS,
    )?;

    // left snout window and its frame, both notched for the beam pipe
    let left_window_distance = 23.9 * INCH + SNOUT_WINDOW_THICKNESS / 2.0;
    let left_window_plate = Solid::box_shape(
        "LeftSnoutWindow_sol",
        LEFT_SNOUT_WIDTH / 2.0,
        LEFT_SNOUT_HEIGHT / 2.0,
        SNOUT_WINDOW_THICKNESS / 2.0,
    )?;
    let left_window = left_window_plate.subtract("solidLeftSnoutWindow", &left_notch()?, left_notch_position());
    let left_window_log = ctx.volume(left_window, "Aluminum", "SCLeftSnoutWindow_log")?;
    ctx.place(
        left_window_log,
        world,
        snout_transform(LEFT_SNOUT_ANGLE, left_window_distance, LEFT_SNOUT_Y_OFFSET),
        0,
        "SCLeftSnoutWindow",
        CHECK_OVERLAPS,
    )?;
    let left_frame_plate = Solid::box_shape(
        "LeftSnoutWindowFrame_0",
        LEFT_SNOUT_WIDTH / 2.0,
        LEFT_SNOUT_HEIGHT / 2.0,
        SNOUT_FRAME_THICKNESS / 2.0,
    )?;
    let left_frame = rounded_rect_cutout(
        &left_frame_plate,
        "LeftSnoutWindowFrame_2",
        LEFT_HOLE_WIDTH,
        LEFT_SNOUT_HOLE_HEIGHT,
        LEFT_HOLE_RADIUS,
        SNOUT_FRAME_THICKNESS,
    )?
    .subtract("solidLeftSnoutWindowFrame", &left_notch()?, left_notch_position());
    let left_frame_log = ctx.volume(left_frame, "Aluminum", "SCLeftSnoutWindowFrame_log")?;
    ctx.place(
        left_frame_log,
        world,
        snout_transform(LEFT_SNOUT_ANGLE, left_window_distance + frame_offset, LEFT_SNOUT_Y_OFFSET),
        0,
        "SCLeftSnoutWindowFrame",
        CHECK_OVERLAPS,
    )?;

    let upright = Rotation::identity().rotate_x(90.0 * DEG);
    let front_log = ctx.volume(front_clamshell()?, "Aluminum", "SCFrontClamshell_log")?;
    ctx.place(
        front_log,
        world,
        Transform::from_frame(
            upright.rotate_z(90.0 * DEG + CLAM_APERTURE / 2.0 - WINDOW_ANGLE_OFFSET),
            Vector3::zeros(),
        ),
        0,
        "SCFrontClamshell",
        CHECK_OVERLAPS,
    )?;
    let back_log = ctx.volume(back_clamshell()?, "Aluminum", "SCBackClamshell_log")?;
    ctx.place(
        back_log,
        world,
        Transform::from_frame(
            upright.rotate_z(-90.0 * DEG + CLAM_APERTURE / 2.0 + WINDOW_ANGLE_OFFSET),
            Vector3::zeros(),
        ),
        0,
        "SCBackClamshell",
        CHECK_OVERLAPS,
    )?;

    let chamber = ctx.target_volume(chamber_vacuum()?, "Vacuum", "ScatChamber_log")?;
    ctx.place(chamber, world, tank_placement, 0, "ScatChamberPhys", CHECK_OVERLAPS)?;

    let mount = Mount::new(chamber, upright, Vector3::new(0.0, 0.0, OFFSET));
    target(ctx, &mount)?;

    let wire_grey = VisAttributes::coloured(Colour::grey(0.7)).wireframe();
    ctx.set_vis(tank_log, VisAttributes::coloured(Colour::grey(0.3)).wireframe())?;
    for id in [front_log, back_log, plate_log] {
        ctx.set_vis(id, wire_grey)?;
    }
    for id in [left_window_log, right_window_log, chamber] {
        ctx.set_vis(id, VisAttributes::invisible())?;
    }
    for id in [left_frame_log, right_frame_log] {
        ctx.set_vis(id, VisAttributes::coloured(Colour::CYAN))?;
    }
    Ok(())
}
