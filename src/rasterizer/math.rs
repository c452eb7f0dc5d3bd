//! Vector and matrix math for the shading pipeline

use std::ops::{Add, Mul, Sub};
use serde::{Deserialize, Serialize};

/// 3D Vector
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn scale(self, s: f32) -> Vec3 {
        Vec3 {
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
        }
    }

    /// Component-wise minimum
    pub fn min(self, other: Vec3) -> Vec3 {
        Vec3::new(self.x.min(other.x), self.y.min(other.y), self.z.min(other.z))
    }

    /// Component-wise maximum
    pub fn max(self, other: Vec3) -> Vec3 {
        Vec3::new(self.x.max(other.x), self.y.max(other.y), self.z.max(other.z))
    }

    /// Largest of the three components
    pub fn max_element(self) -> f32 {
        self.x.max(self.y).max(self.z)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    fn mul(self, s: f32) -> Vec3 {
        self.scale(s)
    }
}

/// 2D Vector (texture coordinates)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Row-major 4x4 affine matrix. Points are column vectors, so `a * b`
/// applies `b` first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4(pub [[f32; 4]; 4]);

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);

    pub fn translation(t: Vec3) -> Self {
        let mut m = Self::IDENTITY;
        m.0[0][3] = t.x;
        m.0[1][3] = t.y;
        m.0[2][3] = t.z;
        m
    }

    pub fn uniform_scale(s: f32) -> Self {
        let mut m = Self::IDENTITY;
        for i in 0..3 {
            m.0[i][i] = s;
        }
        m
    }

    /// Rotation about the vertical (Y) axis, angle in radians
    pub fn rotation_y(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Self::IDENTITY;
        m.0[0][0] = c;
        m.0[0][2] = s;
        m.0[2][0] = -s;
        m.0[2][2] = c;
        m
    }

    /// Transform a point (w = 1)
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        let m = &self.0;
        Vec3::new(
            m[0][0] * p.x + m[0][1] * p.y + m[0][2] * p.z + m[0][3],
            m[1][0] * p.x + m[1][1] * p.y + m[1][2] * p.z + m[1][3],
            m[2][0] * p.x + m[2][1] * p.y + m[2][2] * p.z + m[2][3],
        )
    }
}

impl Mul for Mat4 {
    type Output = Mat4;
    fn mul(self, other: Mat4) -> Mat4 {
        let mut result = [[0.0; 4]; 4];
        for (i, row) in result.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                for k in 0..4 {
                    *cell += self.0[i][k] * other.0[k][j];
                }
            }
        }
        Mat4(result)
    }
}

/// Twice the signed area of a screen-space triangle: `(p2 - p1) x (p3 - p1)`.
/// Computed in i64 so pixel coordinates near the i32 limits cannot overflow.
pub fn signed_area2(p1: (i32, i32), p2: (i32, i32), p3: (i32, i32)) -> i64 {
    let (ax, ay) = (p2.0 as i64 - p1.0 as i64, p2.1 as i64 - p1.1 as i64);
    let (bx, by) = (p3.0 as i64 - p1.0 as i64, p3.1 as i64 - p1.1 as i64);
    ax * by - ay * bx
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a.x - b.x).abs() < 1e-4 && (a.y - b.y).abs() < 1e-4 && (a.z - b.z).abs() < 1e-4
    }

    #[test]
    fn test_matrix_order_translate_first() {
        let m = Mat4::uniform_scale(2.0) * Mat4::translation(Vec3::new(1.0, 0.0, 0.0));
        let p = m.transform_point(Vec3::new(1.0, 1.0, 1.0));
        assert!(approx(p, Vec3::new(4.0, 2.0, 2.0)));
    }

    #[test]
    fn test_rotation_y_quarter_turn() {
        let m = Mat4::rotation_y(std::f32::consts::FRAC_PI_2);
        let p = m.transform_point(Vec3::new(1.0, 0.0, 0.0));
        assert!(approx(p, Vec3::new(0.0, 0.0, -1.0)));
    }

    #[test]
    fn test_identity_is_neutral() {
        let m = Mat4::rotation_y(0.7) * Mat4::IDENTITY;
        assert_eq!(m, Mat4::rotation_y(0.7));
    }

    #[test]
    fn test_signed_area_winding() {
        // Clockwise on screen (y down) is positive
        assert!(signed_area2((0, 0), (10, 0), (0, 10)) > 0);
        assert!(signed_area2((0, 0), (0, 10), (10, 0)) < 0);
        assert_eq!(signed_area2((0, 0), (5, 5), (10, 10)), 0);
    }

    #[test]
    fn test_signed_area_extreme_coordinates() {
        let big = i32::MAX;
        let area = signed_area2((-big, -big), (big, -big), (-big, big));
        assert!(area > 0);
    }
}
