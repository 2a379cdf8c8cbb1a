//! Glass cell, end windows and ³He fill.
//!
//! The cell's long axis is the beam line. In the cell's own frame the
//! pumping chamber hangs below the target chamber; the placement flips it
//! upright.

use super::{frame, CHECK_OVERLAPS};
use crate::error::Result;
use crate::math::Vector3;
use crate::recipes::{cylinder, BuildContext, Mount};
use crate::scene::{Colour, VisAttributes};
use crate::solid::Solid;
use crate::transform::{Rotation, Transform};
use crate::units::{DEG, INCH, MM};

const GLASS_WALL: f64 = 1.0 * MM;
const TARGET_CHAMBER_LENGTH: f64 = 571.7 * MM;
const TARGET_CHAMBER_RADIUS: f64 = 10.5 * MM;
const PUMPING_CHAMBER_RADIUS: f64 = 54.0 * MM;
const TRANSFER_TUBE_RADIUS: f64 = 4.5 * MM;
const ELBOW_RADIUS: f64 = 9.0 * MM;
const TRANSFER_SPHERE_RADIUS: f64 = 13.9 * MM;

const SHAFT_LENGTH: f64 = 0.500 * INCH;
const LIP_LENGTH: f64 = 0.125 * INCH;

fn glass_tube(name: &str, length: f64) -> Result<Solid> {
    cylinder(name, TRANSFER_TUBE_RADIUS - GLASS_WALL, TRANSFER_TUBE_RADIUS, length / 2.0)
}

fn glass_elbow(name: &str) -> Result<Solid> {
    Solid::torus(
        name,
        TRANSFER_TUBE_RADIUS - GLASS_WALL,
        TRANSFER_TUBE_RADIUS,
        ELBOW_RADIUS,
        0.0,
        90.0 * DEG,
    )
}

fn glass_sphere(name: &str, radius: f64) -> Result<Solid> {
    Solid::sphere(name, radius - GLASS_WALL, radius, 0.0, 360.0 * DEG, 0.0, 180.0 * DEG)
}

/// One piece of glass unioned onto the target chamber.
struct GlassPart {
    union_name: &'static str,
    solid: Solid,
    frame: Rotation,
    position: Vector3,
}

impl GlassPart {
    fn new(union_name: &'static str, solid: Solid, frame: Rotation, position: (f64, f64, f64)) -> Self {
        Self {
            union_name,
            solid,
            frame,
            position: Vector3::new(position.0, position.1, position.2),
        }
    }
}

/// The cell glass: target chamber, the transfer tube with its elbows,
/// posts and convection sphere, and the pumping chamber.
fn glass_cell_solid() -> Result<Solid> {
    let upright = frame(90.0 * DEG, 0.0, 0.0);
    let none = Rotation::identity();
    let parts = [
        GlassPart::new("gc_tc_ewud_pu", glass_tube("transTubePost_up", 23.0)?, upright, (0.0, -22.0, -259.1)),
        GlassPart::new("gc_tc_ewud_pud", glass_tube("transTubePost_dn", 23.0)?, upright, (0.0, -22.0, 259.1)),
        GlassPart::new(
            "gc_tc_ewud_pud_eu",
            glass_elbow("transTubeEl_up")?,
            frame(180.0 * DEG, 90.0 * DEG, 0.0),
            (0.0, -33.5, -250.0),
        ),
        GlassPart::new(
            "gc_tc_ewud_pud_eud",
            glass_elbow("transTubeEl_dn")?,
            frame(180.0 * DEG, -90.0 * DEG, 0.0),
            (0.0, -33.5, 250.0),
        ),
        GlassPart::new("gc_tc_ewud_pud_eud_tzu", glass_tube("transTubeZ_up", 216.0)?, none, (0.0, -42.5, -142.0)),
        GlassPart::new("gc_tc_ewud_pud_eud_tzud", glass_tube("transTubeZ_dn", 216.0)?, none, (0.0, -42.5, 142.0)),
        GlassPart::new(
            "gc_tc_ewud_pud_eud_tzud_elu",
            glass_elbow("transTubeElLo_up")?,
            frame(0.0, 90.0 * DEG, 0.0),
            (0.0, -51.5, -34.5),
        ),
        GlassPart::new(
            "gc_tc_ewud_pud_eud_tzud_elud",
            glass_elbow("transTubeElLo_dn")?,
            frame(0.0, 270.0 * DEG, 0.0),
            (0.0, -51.5, 34.5),
        ),
        GlassPart::new("gc_tc_ewud_pud_eud_tzud_tyu", glass_tube("transTubeY_up", 233.0)?, upright, (0.0, -168.0, -25.4)),
        GlassPart::new("gc_tc_ewud_pud_eud_tzud_tyua", glass_tube("transTubeYA_dn", 20.0)?, upright, (0.0, -61.0, 25.4)),
        GlassPart::new(
            "gc_tc_ewud_pud_eud_tzud_tyuas",
            glass_sphere("transTubeSphere", TRANSFER_SPHERE_RADIUS)?,
            none,
            (0.0, -83.3, 25.4),
        ),
        GlassPart::new("gc_tc_ewud_pud_eud_tzud_tyuasb", glass_tube("transTubeYB_dn", 189.0)?, upright, (0.0, -190.0, 25.4)),
        GlassPart::new(
            "glassCell",
            glass_sphere("pumpingChamber", PUMPING_CHAMBER_RADIUS)?,
            none,
            (0.0, -330.2, 0.0),
        ),
    ];

    let chamber = cylinder(
        "targetChamber",
        TARGET_CHAMBER_RADIUS - GLASS_WALL,
        TARGET_CHAMBER_RADIUS,
        TARGET_CHAMBER_LENGTH / 2.0,
    )?;
    Ok(parts.iter().fold(chamber, |cell, part| {
        cell.union(part.union_name, &part.solid, Transform::from_frame(part.frame, part.position))
    }))
}

/// Places the GE180 cell centred on `mount`.
pub(super) fn build_glass_cell(ctx: &mut BuildContext<'_>, mount: &Mount) -> Result<()> {
    let cell = ctx.target_volume(glass_cell_solid()?, "GE180", "logicGEnTarget_GlassCell")?;
    ctx.set_vis(cell, VisAttributes::coloured(Colour::WHITE))?;
    let flip = frame(0.0, 180.0 * DEG, 180.0 * DEG);
    let placement = mount.transform().compose(&Transform::from_frame(flip, Vector3::zeros()));
    ctx.place(cell, mount.parent, placement, 0, "physGlassCell", CHECK_OVERLAPS)?;
    Ok(())
}

/// Copper window capping one end of the target chamber: a shaft, a lip, a
/// rounded shoulder and a thin domed cap.
fn end_window_solid() -> Result<Solid> {
    let shaft = cylinder("ew_mainShaft", 0.471 * INCH, 0.505 * INCH, SHAFT_LENGTH / 2.0)?;
    let lip = cylinder("ew_lip", 0.471 * INCH, 0.611 * INCH, LIP_LENGTH / 2.0)?;
    let shoulder = Solid::sphere(
        "ew_rlip",
        0.4855 * INCH,
        0.5455 * INCH,
        0.0,
        360.0 * DEG,
        63.1 * DEG,
        26.9 * DEG,
    )?;
    let cap = Solid::sphere(
        "ew_cap_up",
        0.4855 * INCH,
        0.4915 * INCH,
        0.0,
        360.0 * DEG,
        0.0,
        63.1 * DEG,
    )?;
    Ok(shaft
        .union("ew_ms_l", &lip, Transform::translation(0.0, 0.0, 0.259 * INCH))
        .union("ew_ms_l_rl", &shoulder, Transform::translation(0.0, 0.0, 0.300 * INCH))
        .union("endWindow", &cap, Transform::translation(0.0, 0.0, 0.320 * INCH)))
}

/// Places the upstream (copy 0, turned around) and downstream (copy 1)
/// windows, each in its own volume.
pub(super) fn build_end_windows(ctx: &mut BuildContext<'_>, mount: &Mount) -> Result<()> {
    let solid = end_window_solid()?;
    let z0 = TARGET_CHAMBER_LENGTH / 2.0 + SHAFT_LENGTH / 2.0;
    let vis = VisAttributes::coloured(Colour::RED).wireframe();
    let ends = [(-z0, frame(0.0, 180.0 * DEG, 0.0)), (z0, Rotation::identity())];
    for (copy, (z, turn)) in (0u32..).zip(ends) {
        let window = ctx.target_volume(solid.clone(), "Copper", &format!("logicGEnTarget_EndWindow_{copy}"))?;
        ctx.set_vis(window, vis)?;
        ctx.place(
            window,
            mount.parent,
            mount.transform().compose(&Transform::from_frame(turn, Vector3::new(0.0, 0.0, z))),
            copy,
            &format!("physGEnTarget_EndWindow_{copy}"),
            CHECK_OVERLAPS,
        )?;
    }
    Ok(())
}

/// Gas volume: the inside of the target chamber plus the inside of both
/// end windows, each closed by a hemisphere just short of the window cap.
fn he3_solid() -> Result<Solid> {
    let shaft_radius = 0.451 * INCH;
    let dome_radius = 0.4855 * INCH - 0.5 * MM;
    let gas = cylinder("He3_tc", 0.0, TARGET_CHAMBER_RADIUS - GLASS_WALL, TARGET_CHAMBER_LENGTH / 2.0)?;
    let shaft = cylinder("ew_mainShaft_up", 0.0, shaft_radius, SHAFT_LENGTH / 2.0)?;
    let lip = cylinder("ew_lip_up", 0.0, shaft_radius, LIP_LENGTH / 2.0)?;
    let dome = Solid::sphere("seg_up", 0.0, dome_radius, 0.0, 360.0 * DEG, 0.0, 90.0 * DEG)?;

    let (shaft_z, lip_z, dome_z) = (11.504 * INCH, 11.763 * INCH, 11.804 * INCH);
    let back = frame(0.0, 180.0 * DEG, 0.0);
    Ok(gas
        .union("tc_um", &shaft, Transform::translation(0.0, 0.0, -shaft_z))
        .union("tc_uml", &lip, Transform::translation(0.0, 0.0, -lip_z))
        .union("tc_umls", &dome, Transform::from_frame(back, Vector3::new(0.0, 0.0, -dome_z)))
        .union("tc_umls_dm", &shaft, Transform::translation(0.0, 0.0, shaft_z))
        .union("tc_umls_dml", &lip, Transform::translation(0.0, 0.0, lip_z))
        .union("he3Tube", &dome, Transform::translation(0.0, 0.0, dome_z)))
}

pub(super) fn build_polarized_he3(ctx: &mut BuildContext<'_>, mount: &Mount) -> Result<()> {
    let he3 = ctx.target_volume(he3_solid()?, "pol3He", "logicGEnTarget_polHe3")?;
    ctx.set_vis(he3, VisAttributes::coloured(Colour::YELLOW))?;
    ctx.place_at(he3, mount, "physGEnTarget_polHe3", CHECK_OVERLAPS)?;
    Ok(())
}
