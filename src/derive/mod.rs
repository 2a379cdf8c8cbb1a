//! Closed-form derivations that make adjoining parts meet: plane
//! intercepts, window apertures, corner roundings, taper profiles and
//! turned plate frames.

mod aperture;
mod corner;
mod plane;
mod plate;
mod taper;

pub use aperture::{aperture_asin, aperture_atan, flange_outer_radius};
pub use corner::{rounded_corner_piece, rounded_rect_cutout};
pub use plane::{intersect_ray, Plane, RayHit, GRAZING_TOLERANCE};
pub use plate::{front_corner, PlateFrame, Side};
pub use taper::{flared_snout_planes, taper_profile, taper_radius};
