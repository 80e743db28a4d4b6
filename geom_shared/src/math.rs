//! Math types.
//!
//! Small fixed-size vectors and a row-major 4x4 matrix. Points are row
//! vectors: a point is transformed as `p * M`, so translation lives in row 3
//! and compositions read left to right (`scale * rotate * translate`).
//!
//! This module intentionally stays small and deterministic.
//! It avoids SIMD/unsafe and focuses on stable semantics.

use core::ops;

use serde::{Deserialize, Serialize};

use crate::error::GeomError;

pub use std::f32::consts::PI;

macro_rules! vec_op_impl {
    ($trait: ident, $func: ident, $v: ident, $($e: ident),*) => {
        impl ops::$trait<$v> for $v {
            type Output = $v;

            #[inline]
            fn $func(self, rhs: $v) -> $v {
                $v { $( $e: ops::$trait::$func(self.$e, rhs.$e), )* }
            }
        }
    };
}

macro_rules! vec_assign_op_impl {
    ($trait: ident, $func: ident, $v: ident, $($e: ident),*) => {
        impl ops::$trait<$v> for $v {
            #[inline]
            fn $func(&mut self, rhs: $v) {
                $( ops::$trait::$func(&mut self.$e, rhs.$e); )*
            }
        }
    };
}

macro_rules! vec_impl {
    ($v: ident, $($e: ident),*) => {
        impl $v {
            pub const ZERO: Self = Self { $( $e: 0.0, )* };

            pub const fn new($( $e: f32, )*) -> Self {
                Self { $( $e, )* }
            }

            pub fn dot(self, rhs: Self) -> f32 {
                0.0 $( + self.$e * rhs.$e )*
            }

            pub fn length_squared(self) -> f32 {
                self.dot(self)
            }

            /// Largest absolute component.
            pub fn max_abs(self) -> f32 {
                0.0f32 $( .max(self.$e.abs()) )*
            }

            /// Euclidean norm, never negative.
            ///
            /// Components are scaled by [`Self::max_abs`] before squaring, so
            /// finite vectors neither overflow nor underflow.
            pub fn length(self) -> f32 {
                let scale = self.max_abs();
                if scale == 0.0 || !scale.is_finite() {
                    return scale;
                }
                (self / scale).length_squared().sqrt() * scale
            }
        }

        vec_op_impl!(Add, add, $v, $($e),*);
        vec_op_impl!(Sub, sub, $v, $($e),*);
        vec_assign_op_impl!(AddAssign, add_assign, $v, $($e),*);
        vec_assign_op_impl!(SubAssign, sub_assign, $v, $($e),*);

        impl ops::Mul<f32> for $v {
            type Output = $v;

            #[inline]
            fn mul(self, rhs: f32) -> $v {
                $v { $( $e: self.$e * rhs, )* }
            }
        }

        impl ops::Mul<$v> for f32 {
            type Output = $v;

            #[inline]
            fn mul(self, rhs: $v) -> $v {
                $v { $( $e: self * rhs.$e, )* }
            }
        }

        impl ops::Div<f32> for $v {
            type Output = $v;

            #[inline]
            fn div(self, rhs: f32) -> $v {
                $v { $( $e: self.$e / rhs, )* }
            }
        }

        impl ops::Neg for $v {
            type Output = $v;

            #[inline]
            fn neg(self) -> $v {
                $v { $( $e: -self.$e, )* }
            }
        }
    };
}

/// 2D vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

/// 3D vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// 4D vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

vec_impl!(Vec2, x, y);
vec_impl!(Vec3, x, y, z);
vec_impl!(Vec4, x, y, z, w);

impl Vec3 {
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);

    /// Unit vector in the direction of `self`.
    ///
    /// A zero vector normalizes to the zero vector. Callers that need to
    /// distinguish that case should use [`Vec3::try_normalize`].
    pub fn normalize(self) -> Self {
        self.try_normalize().unwrap_or(Self::ZERO)
    }

    pub fn try_normalize(self) -> Result<Self, GeomError> {
        let len = self.length();
        if len == 0.0 {
            return Err(GeomError::ZeroLengthVector);
        }
        Ok(self / len)
    }

    pub fn cross(self, rhs: Self) -> Self {
        Self::new(
            self.y * rhs.z - self.z * rhs.y,
            self.z * rhs.x - self.x * rhs.z,
            self.x * rhs.y - self.y * rhs.x,
        )
    }

    pub fn extend(self, w: f32) -> Vec4 {
        Vec4::new(self.x, self.y, self.z, w)
    }
}

/// 4x4 matrix, row-major, row-vector convention.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mat4 {
    pub m: [[f32; 4]; 4],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat4 {
    pub const IDENTITY: Self = Self {
        m: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    pub const ZERO: Self = Self { m: [[0.0; 4]; 4] };

    pub const fn from_rows(m: [[f32; 4]; 4]) -> Self {
        Self { m }
    }

    pub fn identity() -> Self {
        Self::IDENTITY
    }

    pub fn transpose(&self) -> Self {
        let mut out = Self::ZERO;
        for (i, row) in out.m.iter_mut().enumerate() {
            for (j, v) in row.iter_mut().enumerate() {
                *v = self.m[j][i];
            }
        }
        out
    }

    pub fn determinant(&self) -> f32 {
        let m = &self.m;
        m[0][0] * minor(m, 0, 0) - m[0][1] * minor(m, 0, 1) + m[0][2] * minor(m, 0, 2)
            - m[0][3] * minor(m, 0, 3)
    }

    /// Inverse by cofactor expansion.
    ///
    /// Returns [`GeomError::SingularMatrix`] when the determinant is exactly
    /// zero; no element is ever divided by zero.
    pub fn inverse(&self) -> Result<Self, GeomError> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return Err(GeomError::SingularMatrix { det });
        }
        let inv_det = 1.0 / det;

        // inverse = adjugate / det, adjugate = transposed cofactor matrix
        let mut out = Self::ZERO;
        for (i, row) in out.m.iter_mut().enumerate() {
            for (j, v) in row.iter_mut().enumerate() {
                let sign = if (i + j) % 2 == 0 { 1.0 } else { -1.0 };
                *v = sign * minor(&self.m, j, i) * inv_det;
            }
        }
        Ok(out)
    }

    pub fn scale(s: Vec3) -> Self {
        Self::from_rows([
            [s.x, 0.0, 0.0, 0.0],
            [0.0, s.y, 0.0, 0.0],
            [0.0, 0.0, s.z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Rotation about X, radians.
    pub fn pitch(rad: f32) -> Self {
        let (s, c) = rad.sin_cos();
        Self::from_rows([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, s, 0.0],
            [0.0, -s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Rotation about Y, radians.
    pub fn yaw(rad: f32) -> Self {
        let (s, c) = rad.sin_cos();
        Self::from_rows([
            [c, 0.0, -s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Rotation about Z, radians.
    pub fn roll(rad: f32) -> Self {
        let (s, c) = rad.sin_cos();
        Self::from_rows([
            [c, s, 0.0, 0.0],
            [-s, c, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// `pitch(x) * (yaw(y) * roll(z))`.
    pub fn rotate(r: Vec3) -> Self {
        Self::pitch(r.x) * (Self::yaw(r.y) * Self::roll(r.z))
    }

    pub fn translate(t: Vec3) -> Self {
        Self::from_rows([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [t.x, t.y, t.z, 1.0],
        ])
    }

    /// `scale * rotate * translate`.
    pub fn affine(scale: Vec3, rotate: Vec3, translate: Vec3) -> Self {
        Self::scale(scale) * Self::rotate(rotate) * Self::translate(translate)
    }

    /// Transforms a point (implicit `w = 1`).
    ///
    /// The result is divided by the resulting `w` only when it is non-zero;
    /// otherwise the undivided coordinates are returned.
    pub fn transform_point(&self, v: Vec3) -> Vec3 {
        let h = self.mul_vec4(v.extend(1.0));
        let out = Vec3::new(h.x, h.y, h.z);
        if h.w != 0.0 {
            out / h.w
        } else {
            out
        }
    }

    /// `v * self` for a full homogeneous row vector.
    pub fn mul_vec4(&self, v: Vec4) -> Vec4 {
        let m = &self.m;
        let col = |j: usize| v.x * m[0][j] + v.y * m[1][j] + v.z * m[2][j] + v.w * m[3][j];
        Vec4::new(col(0), col(1), col(2), col(3))
    }

    /// Largest absolute elementwise difference, used for tolerance checks.
    pub fn max_abs_diff(&self, rhs: &Self) -> f32 {
        self.m
            .iter()
            .flatten()
            .zip(rhs.m.iter().flatten())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f32::max)
    }
}

/// Determinant of the 3x3 submatrix left after removing `row` and `col`.
fn minor(m: &[[f32; 4]; 4], row: usize, col: usize) -> f32 {
    let mut s = [[0.0f32; 3]; 3];
    let mut si = 0;
    for (i, r) in m.iter().enumerate() {
        if i == row {
            continue;
        }
        let mut sj = 0;
        for (j, v) in r.iter().enumerate() {
            if j == col {
                continue;
            }
            s[si][sj] = *v;
            sj += 1;
        }
        si += 1;
    }
    s[0][0] * (s[1][1] * s[2][2] - s[1][2] * s[2][1])
        - s[0][1] * (s[1][0] * s[2][2] - s[1][2] * s[2][0])
        + s[0][2] * (s[1][0] * s[2][1] - s[1][1] * s[2][0])
}

impl ops::Add for Mat4 {
    type Output = Mat4;

    fn add(self, rhs: Mat4) -> Mat4 {
        let mut out = self;
        for (row, rrow) in out.m.iter_mut().zip(rhs.m.iter()) {
            for (v, r) in row.iter_mut().zip(rrow.iter()) {
                *v += r;
            }
        }
        out
    }
}

impl ops::Sub for Mat4 {
    type Output = Mat4;

    fn sub(self, rhs: Mat4) -> Mat4 {
        let mut out = self;
        for (row, rrow) in out.m.iter_mut().zip(rhs.m.iter()) {
            for (v, r) in row.iter_mut().zip(rrow.iter()) {
                *v -= r;
            }
        }
        out
    }
}

impl ops::Mul for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Mat4 {
        let mut out = Mat4::ZERO;
        for i in 0..4 {
            for j in 0..4 {
                out.m[i][j] = (0..4).map(|k| self.m[i][k] * rhs.m[k][j]).sum();
            }
        }
        out
    }
}

pub fn dot(a: Vec3, b: Vec3) -> f32 {
    a.dot(b)
}

pub fn length(v: Vec3) -> f32 {
    v.length()
}

pub fn normalize(v: Vec3) -> Vec3 {
    v.normalize()
}

pub fn cross(a: Vec3, b: Vec3) -> Vec3 {
    a.cross(b)
}

pub fn transform(v: Vec3, m: &Mat4) -> Vec3 {
    m.transform_point(v)
}
