use crate::interp::lerp;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// A 3-component vector. Positions and scale factors both use it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
    pub const ONE: Vec3 = Vec3 {
        x: 1.0,
        y: 1.0,
        z: 1.0,
    };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// A vector with every component set to `v`.
    pub fn splat(v: f32) -> Self {
        Self { x: v, y: v, z: v }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// Linear interpolation between two vectors.
    pub fn lerp(&self, other: &Vec3, t: f64) -> Vec3 {
        Vec3 {
            x: lerp(self.x, other.x, t),
            y: lerp(self.y, other.y, t),
            z: lerp(self.z, other.z, t),
        }
    }

    /// Largest per-component absolute difference, for approximate comparisons.
    pub fn max_abs_diff(&self, other: &Vec3) -> f32 {
        (self.x - other.x)
            .abs()
            .max((self.y - other.y).abs())
            .max((self.z - other.z).abs())
    }
}

impl Default for Vec3 {
    fn default() -> Self {
        Vec3::ZERO
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    fn mul(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// Component-wise product.
impl Mul<Vec3> for Vec3 {
    type Output = Vec3;
    fn mul(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x * rhs.x, self.y * rhs.y, self.z * rhs.z)
    }
}

/// 2D points land on the `z = 0` plane.
impl From<(f32, f32)> for Vec3 {
    fn from((x, y): (f32, f32)) -> Self {
        Vec3::new(x, y, 0.0)
    }
}

impl From<(f32, f32, f32)> for Vec3 {
    fn from((x, y, z): (f32, f32, f32)) -> Self {
        Vec3::new(x, y, z)
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Vec3::new(x, y, z)
    }
}

/// A 4×4 matrix stored row-major (`m[row][col]`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mat4 {
    pub m: [[f32; 4]; 4],
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4 {
        m: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    pub fn identity() -> Self {
        Self::IDENTITY
    }

    pub fn translation(t: Vec3) -> Self {
        let mut out = Self::IDENTITY;
        out.m[0][3] = t.x;
        out.m[1][3] = t.y;
        out.m[2][3] = t.z;
        out
    }

    /// Counter-clockwise rotation about the Z axis, in radians.
    pub fn rotation_z(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        let mut out = Self::IDENTITY;
        out.m[0][0] = cos;
        out.m[0][1] = -sin;
        out.m[1][0] = sin;
        out.m[1][1] = cos;
        out
    }

    pub fn scale(s: Vec3) -> Self {
        let mut out = Self::IDENTITY;
        out.m[0][0] = s.x;
        out.m[1][1] = s.y;
        out.m[2][2] = s.z;
        out
    }

    /// Apply the matrix to a point (implicit `w = 1`).
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        let row = |r: usize| {
            self.m[r][0] * p.x + self.m[r][1] * p.y + self.m[r][2] * p.z + self.m[r][3]
        };
        Vec3::new(row(0), row(1), row(2))
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Mat4 {
    type Output = Mat4;
    fn mul(self, rhs: Mat4) -> Mat4 {
        let mut out = [[0.0f32; 4]; 4];
        for (r, row) in out.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = (0..4).map(|k| self.m[r][k] * rhs.m[k][c]).sum();
            }
        }
        Mat4 { m: out }
    }
}

/// Position, single-axis rotation, and scale of a drawable object.
///
/// The composed matrix is always `T(position) · Rz(rotation) · S(scale)`:
/// scale first, then rotate about the local origin, then translate.
/// Rotation is not wrapped; values beyond ±2π are kept as given.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Translation into world space.
    pub position: Vec3,
    /// Rotation about Z in radians.
    pub rotation: f32,
    /// Per-axis scale factors.
    pub scale: Vec3,
}

impl Transform {
    /// Origin, no rotation, unit scale.
    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: 0.0,
            scale: Vec3::ONE,
        }
    }

    /// Move by a relative offset. 2D offsets leave `z` untouched.
    pub fn translate(&mut self, delta: impl Into<Vec3>) -> &mut Self {
        self.position = self.position + delta.into();
        self
    }

    /// Add `angle` radians to the current rotation.
    pub fn rotate(&mut self, angle: f32) -> &mut Self {
        self.rotation += angle;
        self
    }

    /// Multiply every axis by `factor`.
    pub fn scale_by(&mut self, factor: f32) -> &mut Self {
        self.scale_by_axes(factor, factor, factor)
    }

    /// Multiply each axis independently.
    pub fn scale_by_axes(&mut self, sx: f32, sy: f32, sz: f32) -> &mut Self {
        self.scale = self.scale * Vec3::new(sx, sy, sz);
        self
    }

    pub fn set_position(&mut self, position: impl Into<Vec3>) -> &mut Self {
        self.position = position.into();
        self
    }

    pub fn set_rotation(&mut self, angle: f32) -> &mut Self {
        self.rotation = angle;
        self
    }

    /// Set a uniform scale on all three axes.
    pub fn set_scale(&mut self, factor: f32) -> &mut Self {
        self.set_scale_axes(factor, factor, factor)
    }

    pub fn set_scale_axes(&mut self, sx: f32, sy: f32, sz: f32) -> &mut Self {
        self.scale = Vec3::new(sx, sy, sz);
        self
    }

    /// The composed affine matrix for this transform.
    pub fn matrix(&self) -> Mat4 {
        Mat4::translation(self.position) * Mat4::rotation_z(self.rotation) * Mat4::scale(self.scale)
    }

    /// Map a local-space point into world space.
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        self.matrix().transform_point(p)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_vec3_lerp() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(10.0, 20.0, -4.0);
        let mid = a.lerp(&b, 0.5);
        assert!(mid.max_abs_diff(&Vec3::new(5.0, 10.0, -2.0)) < 1e-6);
    }

    #[test]
    fn test_vec3_from_2d_tuple() {
        assert_eq!(Vec3::from((3.0, -1.0)), Vec3::new(3.0, -1.0, 0.0));
    }

    #[test]
    fn test_transform_identity() {
        let t = Transform::identity();
        assert_eq!(t.position, Vec3::ZERO);
        assert_eq!(t.scale, Vec3::ONE);
        assert_eq!(t.rotation, 0.0);
        assert_eq!(t.matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn test_scale_then_translate() {
        let mut t = Transform::identity();
        t.set_position((1.0, 0.0, 0.0)).set_scale(2.0);
        let p = t.transform_point(Vec3::new(1.0, 0.0, 0.0));
        assert!(p.max_abs_diff(&Vec3::new(3.0, 0.0, 0.0)) < 1e-6);
    }

    #[test]
    fn test_composition_order_scale_rotate_translate() {
        let mut t = Transform::identity();
        t.set_position((10.0, 0.0))
            .set_rotation(FRAC_PI_2)
            .set_scale_axes(2.0, 1.0, 1.0);
        // (1,0) scales to (2,0), rotates to (0,2), translates to (10,2).
        let p = t.transform_point(Vec3::new(1.0, 0.0, 0.0));
        assert!(p.max_abs_diff(&Vec3::new(10.0, 2.0, 0.0)) < 1e-5);

        // Rotating before scaling would have produced (10,1) instead.
        let wrong = Mat4::translation(t.position)
            * Mat4::scale(t.scale)
            * Mat4::rotation_z(t.rotation);
        let q = wrong.transform_point(Vec3::new(1.0, 0.0, 0.0));
        assert!(q.max_abs_diff(&p) > 0.5);
    }

    #[test]
    fn test_relative_mutators() {
        let mut t = Transform::identity();
        t.translate((1.0, 2.0)).translate((0.5, 0.0, 1.0));
        assert_eq!(t.position, Vec3::new(1.5, 2.0, 1.0));

        t.rotate(1.0).rotate(0.25);
        assert!((t.rotation - 1.25).abs() < 1e-6);

        t.scale_by(2.0).scale_by_axes(1.0, 3.0, 0.5);
        assert_eq!(t.scale, Vec3::new(2.0, 6.0, 1.0));
    }

    #[test]
    fn test_rotation_is_not_wrapped() {
        let mut t = Transform::identity();
        t.rotate(4.0 * std::f32::consts::PI);
        assert!(t.rotation > 12.0);
    }

    #[test]
    fn test_negative_scale_is_kept() {
        let mut t = Transform::identity();
        t.scale_by(-1.0);
        assert_eq!(t.scale, Vec3::splat(-1.0));
        let p = t.transform_point(Vec3::new(1.0, 1.0, 0.0));
        assert!(p.max_abs_diff(&Vec3::new(-1.0, -1.0, 0.0)) < 1e-6);
    }
}
