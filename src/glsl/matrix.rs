// ShaderKit
// Copyright (c) 2025 Harlen Batagelo
// https://github.com/hbatagelo/shaderkit
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::Transform;

/// Column-major `mat3`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Mat3 {
    pub array: [f32; 9],
}

/// Column-major `mat4`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Mat4 {
    pub array: [f32; 16],
}

impl Mat3 {
    #[rustfmt::skip]
    pub const IDENTITY: Mat3 = Mat3::new([
        1., 0., 0.,
        0., 1., 0.,
        0., 0., 1.,
    ]);

    pub const fn new(array: [f32; 9]) -> Self {
        Self { array }
    }
}

impl Mat4 {
    #[rustfmt::skip]
    pub const IDENTITY: Mat4 = Mat4::new([
        1., 0., 0., 0.,
        0., 1., 0., 0.,
        0., 0., 1., 0.,
        0., 0., 0., 1.,
    ]);

    pub const fn new(array: [f32; 16]) -> Self {
        Self { array }
    }
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<[f32; 9]> for Mat3 {
    fn from(array: [f32; 9]) -> Self {
        Self::new(array)
    }
}

impl From<[f32; 16]> for Mat4 {
    fn from(array: [f32; 16]) -> Self {
        Self::new(array)
    }
}

impl From<&Transform> for Mat3 {
    /// Keeps the 2D affine part of the transform.
    fn from(transform: &Transform) -> Self {
        let m = transform.matrix();
        #[rustfmt::skip]
        let array = [
            m[0],  m[1],  m[3],
            m[4],  m[5],  m[7],
            m[12], m[13], m[15],
        ];
        Self::new(array)
    }
}

impl From<&Transform> for Mat4 {
    fn from(transform: &Transform) -> Self {
        Self::new(*transform.matrix())
    }
}
