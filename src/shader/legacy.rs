// ShaderKit
// Copyright (c) 2025 Harlen Batagelo
// https://github.com/hbatagelo/shaderkit
// SPDX-License-Identifier: GPL-3.0-or-later

//! Untyped `set_parameter` surface kept for older callers.

use super::{CurrentTexture, Shader};
use crate::{
    backend::Backend,
    glsl::{Vec2, Vec3},
    graphics::{Color, Texture, Transform},
};

/// A value accepted by [`Shader::set_parameter`].
pub trait Parameter<'t> {
    fn apply<B: Backend>(self, shader: &mut Shader<'t, B>, name: &str);
}

impl<'t> Parameter<'t> for f32 {
    fn apply<B: Backend>(self, shader: &mut Shader<'t, B>, name: &str) {
        shader.set_uniform_float(name, self);
    }
}

impl<'t> Parameter<'t> for (f32, f32) {
    fn apply<B: Backend>(self, shader: &mut Shader<'t, B>, name: &str) {
        shader.set_uniform_vec2(name, self.into());
    }
}

impl<'t> Parameter<'t> for (f32, f32, f32) {
    fn apply<B: Backend>(self, shader: &mut Shader<'t, B>, name: &str) {
        shader.set_uniform_vec3(name, self.into());
    }
}

impl<'t> Parameter<'t> for (f32, f32, f32, f32) {
    fn apply<B: Backend>(self, shader: &mut Shader<'t, B>, name: &str) {
        shader.set_uniform_vec4(name, self.into());
    }
}

impl<'t> Parameter<'t> for Vec2 {
    fn apply<B: Backend>(self, shader: &mut Shader<'t, B>, name: &str) {
        shader.set_uniform_vec2(name, self);
    }
}

impl<'t> Parameter<'t> for Vec3 {
    fn apply<B: Backend>(self, shader: &mut Shader<'t, B>, name: &str) {
        shader.set_uniform_vec3(name, self);
    }
}

impl<'t> Parameter<'t> for Color {
    fn apply<B: Backend>(self, shader: &mut Shader<'t, B>, name: &str) {
        shader.set_uniform_color(name, self);
    }
}

impl<'t> Parameter<'t> for &Transform {
    fn apply<B: Backend>(self, shader: &mut Shader<'t, B>, name: &str) {
        shader.set_uniform_mat4_transform(name, self);
    }
}

impl<'t, T: Texture> Parameter<'t> for &'t T {
    fn apply<B: Backend>(self, shader: &mut Shader<'t, B>, name: &str) {
        shader.set_uniform_texture(name, self);
    }
}

impl<'t> Parameter<'t> for CurrentTexture {
    fn apply<B: Backend>(self, shader: &mut Shader<'t, B>, name: &str) {
        shader.set_uniform_current_texture(name);
    }
}

impl<'t, B: Backend> Shader<'t, B> {
    /// Sets a uniform from a loosely typed value.
    ///
    /// Tuples of floats map to `float`/`vec2`/`vec3`/`vec4`, colors to a
    /// normalized `vec4`, transforms to a `mat4` and textures to samplers.
    #[deprecated(note = "use the typed set_uniform_* setters")]
    pub fn set_parameter(&mut self, name: &str, value: impl Parameter<'t>) {
        value.apply(self, name);
    }
}
