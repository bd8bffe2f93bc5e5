// ShaderKit
// Copyright (c) 2025 Harlen Batagelo
// https://github.com/hbatagelo/shaderkit
// SPDX-License-Identifier: GPL-3.0-or-later

use std::ops::Mul;

/// 2D affine transform.
///
/// Stored as a column-major 4×4 matrix so it can be uploaded as a
/// `mat4` uniform without conversion.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transform {
    matrix: [f32; 16],
}

impl Transform {
    pub const IDENTITY: Transform = Transform::new(1., 0., 0., 0., 1., 0., 0., 0., 1.);

    /// Builds a transform from a row-major 3×3 matrix.
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        a00: f32,
        a01: f32,
        a02: f32,
        a10: f32,
        a11: f32,
        a12: f32,
        a20: f32,
        a21: f32,
        a22: f32,
    ) -> Self {
        #[rustfmt::skip]
        let matrix = [
            a00, a10, 0., a20,
            a01, a11, 0., a21,
            0.,  0.,  1., 0.,
            a02, a12, 0., a22,
        ];
        Self { matrix }
    }

    /// Column-major 4×4 representation.
    pub fn matrix(&self) -> &[f32; 16] {
        &self.matrix
    }

    pub fn translation(dx: f32, dy: f32) -> Self {
        Self::new(1., 0., dx, 0., 1., dy, 0., 0., 1.)
    }

    pub fn scaling(sx: f32, sy: f32) -> Self {
        Self::new(sx, 0., 0., 0., sy, 0., 0., 0., 1.)
    }

    /// Counter-clockwise rotation around the origin.
    pub fn rotation(degrees: f32) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self::new(cos, -sin, 0., sin, cos, 0., 0., 0., 1.)
    }

    /// Returns `self * other`: `other` is applied first.
    pub fn combine(&self, other: &Transform) -> Self {
        let a = &self.matrix;
        let b = &other.matrix;
        Self::new(
            a[0] * b[0] + a[4] * b[1] + a[12] * b[3],
            a[0] * b[4] + a[4] * b[5] + a[12] * b[7],
            a[0] * b[12] + a[4] * b[13] + a[12] * b[15],
            a[1] * b[0] + a[5] * b[1] + a[13] * b[3],
            a[1] * b[4] + a[5] * b[5] + a[13] * b[7],
            a[1] * b[12] + a[5] * b[13] + a[13] * b[15],
            a[3] * b[0] + a[7] * b[1] + a[15] * b[3],
            a[3] * b[4] + a[7] * b[5] + a[15] * b[7],
            a[3] * b[12] + a[7] * b[13] + a[15] * b[15],
        )
    }

    pub fn transform_point(&self, x: f32, y: f32) -> (f32, f32) {
        let m = &self.matrix;
        (m[0] * x + m[4] * y + m[12], m[1] * x + m[5] * y + m[13])
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Transform {
    type Output = Transform;

    fn mul(self, rhs: Transform) -> Self::Output {
        self.combine(&rhs)
    }
}
