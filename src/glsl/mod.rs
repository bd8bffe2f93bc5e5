// ShaderKit
// Copyright (c) 2025 Harlen Batagelo
// https://github.com/hbatagelo/shaderkit
// SPDX-License-Identifier: GPL-3.0-or-later

//! Rust counterparts of the GLSL vector and matrix types.

mod matrix;
mod vector;

pub use matrix::{Mat3, Mat4};
pub use vector::{GenericVec2, GenericVec3, GenericVec4};

pub type Vec2 = GenericVec2<f32>;
pub type Ivec2 = GenericVec2<i32>;
pub type Bvec2 = GenericVec2<bool>;

pub type Vec3 = GenericVec3<f32>;
pub type Ivec3 = GenericVec3<i32>;
pub type Bvec3 = GenericVec3<bool>;

pub type Vec4 = GenericVec4<f32>;
pub type Ivec4 = GenericVec4<i32>;
pub type Bvec4 = GenericVec4<bool>;

impl From<crate::Color> for Vec4 {
    /// Normalizes each channel from `[0, 255]` to `[0, 1]`.
    fn from(color: crate::Color) -> Self {
        color.to_normalized().into()
    }
}
