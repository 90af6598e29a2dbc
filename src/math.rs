//! Math utilities.
use std::f64::consts;

use nalgebra::Vector3;

/// 3D vector of `f64`, used for positions, velocities, and accelerations
/// throughout the crate.
pub type Vec3 = Vector3<f64>;

/// Reduce an angle in radians to `[0, 2π)`.
pub fn normalize_angle(rad: f64) -> f64 {
    let rad = rad % consts::TAU;
    if rad < 0.0 {
        rad + consts::TAU
    } else {
        rad
    }
}