//! Scalar, vector and matrix aliases shared across the crate.
//!
//! The simulation lives in three dimensions: particle positions, patch
//! offsets and the VMMC rotation matrix are all `Vec3`/`Mat3` from
//! `bevy_math`.

use bevy_math::{Mat3, Vec3};

pub type Real = f32;
pub const DIM: usize = 3;

pub type Vector = Vec3;
pub type Matrix = Mat3;
pub type Point = Vec3;

#[inline(always)]
pub fn zero_vector() -> Vector {
    Vec3::ZERO
}

#[inline(always)]
pub fn identity_matrix() -> Matrix {
    Mat3::IDENTITY
}

/// Minimum-image difference `b - a`, each component folded into
/// `[-box[d]/2, +box[d]/2]` using nearest-integer rounding.
#[inline]
pub fn mid(a: Vector, b: Vector, box_size: Vector) -> Vector {
    let mut c = b - a;
    c.x -= box_size.x * (c.x / box_size.x).round();
    c.y -= box_size.y * (c.y / box_size.y).round();
    c.z -= box_size.z * (c.z / box_size.z).round();
    c
}

/// Squared minimum-image distance, avoiding the extra sqrt of `mid(..).length()`.
#[inline]
pub fn mid_sqr_distance(a: Vector, b: Vector, box_size: Vector) -> Real {
    mid(a, b, box_size).length_squared()
}

/// Rotation matrix from a unit rotation axis and an angle, via the
/// standard Rodrigues axis-angle formula.
#[inline]
pub fn rotation_matrix(axis: Vector, angle: Real) -> Matrix {
    Mat3::from_axis_angle(axis, angle)
}
