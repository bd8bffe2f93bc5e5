// ShaderKit
// Copyright (c) 2025 Harlen Batagelo
// https://github.com/hbatagelo/shaderkit
// SPDX-License-Identifier: GPL-3.0-or-later

use gl::types::*;

use super::{textures::TextureBinding, Shader};
use crate::{
    backend::{Backend, UniformData},
    glsl::{Bvec2, Bvec3, Bvec4, Ivec2, Ivec3, Ivec4, Mat3, Mat4, Vec2, Vec3, Vec4},
    graphics::{Color, Texture, Transform},
};

/// Makes a program current for the lifetime of the guard.
///
/// Uniform uploads target whatever program is in use, so the previous
/// program is restored on drop.
struct UniformBinder<'a, B: Backend> {
    backend: &'a B,
    program: GLuint,
    previous: GLuint,
}

impl<'a, B: Backend> UniformBinder<'a, B> {
    fn new(backend: &'a B, program: GLuint) -> Self {
        let previous = backend.current_program();
        if previous != program {
            backend.use_program(program);
        }
        Self {
            backend,
            program,
            previous,
        }
    }
}

impl<B: Backend> Drop for UniformBinder<'_, B> {
    fn drop(&mut self) {
        if self.previous != self.program {
            self.backend.use_program(self.previous);
        }
    }
}

fn flatten<T: Copy, const N: usize>(elements: &[T], to_array: impl Fn(T) -> [f32; N]) -> Vec<f32> {
    elements.iter().copied().flat_map(to_array).collect()
}

impl<'t, B: Backend> Shader<'t, B> {
    fn upload(&mut self, name: &str, data: UniformData<'_>) {
        let Some(location) = self.location(name) else {
            return;
        };

        let _binder = UniformBinder::new(&self.backend, self.native_handle());
        log::trace!("Uniform \"{name}\" (location {location}) <- {data:?}");
        self.backend.upload_uniform(location, data);
    }

    fn upload_floats<const N: usize>(&mut self, name: &str, values: [f32; N]) {
        self.upload(
            name,
            UniformData::Floats {
                components: N,
                values: &values,
            },
        );
    }

    fn upload_ints<const N: usize>(&mut self, name: &str, values: [i32; N]) {
        self.upload(
            name,
            UniformData::Ints {
                components: N,
                values: &values,
            },
        );
    }

    fn upload_float_array(&mut self, name: &str, components: usize, values: &[f32]) {
        if values.is_empty() {
            return;
        }
        self.upload(name, UniformData::Floats { components, values });
    }

    pub fn set_uniform_float(&mut self, name: &str, x: f32) {
        self.upload_floats(name, [x]);
    }

    pub fn set_uniform_vec2(&mut self, name: &str, vector: Vec2) {
        self.upload_floats(name, vector.to_array());
    }

    pub fn set_uniform_vec3(&mut self, name: &str, vector: Vec3) {
        self.upload_floats(name, vector.to_array());
    }

    pub fn set_uniform_vec4(&mut self, name: &str, vector: Vec4) {
        self.upload_floats(name, vector.to_array());
    }

    /// Uploads `color` as a `vec4` with every channel scaled to `[0, 1]`.
    pub fn set_uniform_color(&mut self, name: &str, color: Color) {
        self.set_uniform_vec4(name, color.into());
    }

    pub fn set_uniform_int(&mut self, name: &str, x: i32) {
        self.upload_ints(name, [x]);
    }

    pub fn set_uniform_ivec2(&mut self, name: &str, vector: Ivec2) {
        self.upload_ints(name, vector.to_array());
    }

    pub fn set_uniform_ivec3(&mut self, name: &str, vector: Ivec3) {
        self.upload_ints(name, vector.to_array());
    }

    pub fn set_uniform_ivec4(&mut self, name: &str, vector: Ivec4) {
        self.upload_ints(name, vector.to_array());
    }

    /// Booleans are uploaded as integers, as GLSL expects.
    pub fn set_uniform_bool(&mut self, name: &str, x: bool) {
        self.set_uniform_int(name, i32::from(x));
    }

    pub fn set_uniform_bvec2(&mut self, name: &str, vector: Bvec2) {
        self.set_uniform_ivec2(name, vector.cast());
    }

    pub fn set_uniform_bvec3(&mut self, name: &str, vector: Bvec3) {
        self.set_uniform_ivec3(name, vector.cast());
    }

    pub fn set_uniform_bvec4(&mut self, name: &str, vector: Bvec4) {
        self.set_uniform_ivec4(name, vector.cast());
    }

    pub fn set_uniform_mat3(&mut self, name: &str, matrix: &Mat3) {
        self.upload(name, UniformData::Mat3(&matrix.array));
    }

    /// Uploads nine column-major floats as a `mat3`.
    pub fn set_uniform_mat3_raw(&mut self, name: &str, array: &[f32; 9]) {
        self.upload(name, UniformData::Mat3(array));
    }

    pub fn set_uniform_mat4(&mut self, name: &str, matrix: &Mat4) {
        self.upload(name, UniformData::Mat4(&matrix.array));
    }

    /// Uploads sixteen column-major floats as a `mat4`.
    pub fn set_uniform_mat4_raw(&mut self, name: &str, array: &[f32; 16]) {
        self.upload(name, UniformData::Mat4(array));
    }

    /// Uploads the 4×4 matrix of `transform` as a `mat4`.
    pub fn set_uniform_mat4_transform(&mut self, name: &str, transform: &Transform) {
        self.upload(name, UniformData::Mat4(transform.matrix()));
    }

    pub fn set_uniform_float_array(&mut self, name: &str, values: &[f32]) {
        self.upload_float_array(name, 1, values);
    }

    pub fn set_uniform_vec2_array(&mut self, name: &str, vectors: &[Vec2]) {
        self.upload_float_array(name, 2, &flatten(vectors, Vec2::to_array));
    }

    pub fn set_uniform_vec3_array(&mut self, name: &str, vectors: &[Vec3]) {
        self.upload_float_array(name, 3, &flatten(vectors, Vec3::to_array));
    }

    pub fn set_uniform_vec4_array(&mut self, name: &str, vectors: &[Vec4]) {
        self.upload_float_array(name, 4, &flatten(vectors, Vec4::to_array));
    }

    pub fn set_uniform_mat3_array(&mut self, name: &str, matrices: &[Mat3]) {
        if matrices.is_empty() {
            return;
        }
        let values = flatten(matrices, |matrix| matrix.array);
        self.upload(name, UniformData::Mat3(&values));
    }

    pub fn set_uniform_mat4_array(&mut self, name: &str, matrices: &[Mat4]) {
        if matrices.is_empty() {
            return;
        }
        let values = flatten(matrices, |matrix| matrix.array);
        self.upload(name, UniformData::Mat4(&values));
    }

    /// Makes the sampler `name` read from `texture` whenever the shader
    /// is activated.
    ///
    /// Nothing is uploaded now. Unit 0 is reserved for the current
    /// texture, so a new slot is refused once every other unit is taken.
    pub fn set_uniform_texture(&mut self, name: &str, texture: &'t dyn Texture) {
        let Some(location) = self.location(name) else {
            return;
        };

        if self.textures.needs_new_unit(location) {
            let max_units = self.backend.max_texture_units() as usize;
            if self.textures.bound_count() + 1 >= max_units {
                log::error!(
                    "Cannot bind texture {} to \"{name}\": all {} available texture units are used",
                    texture.native_handle(),
                    max_units.saturating_sub(1),
                );
                return;
            }
        }

        self.textures
            .insert(location, TextureBinding::Bound(texture));
    }

    /// Makes the sampler `name` read from the texture of the object
    /// being drawn, supplied when the shader is activated.
    pub fn set_uniform_current_texture(&mut self, name: &str) {
        if let Some(location) = self.location(name) {
            self.textures.insert(location, TextureBinding::DrawTarget);
        }
    }
}
