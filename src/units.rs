//! Length and angle units. Lengths are stored in millimetres, angles in radians.

pub const MM: f64 = 1.0;
pub const UM: f64 = 1.0e-3 * MM;
pub const CM: f64 = 10.0 * MM;
pub const M: f64 = 1000.0 * MM;
pub const INCH: f64 = 25.4 * MM;

pub const RAD: f64 = 1.0;
pub const DEG: f64 = std::f64::consts::PI / 180.0;
