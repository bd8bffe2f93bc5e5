// ShaderKit
// Copyright (c) 2025 Harlen Batagelo
// https://github.com/hbatagelo/shaderkit
// SPDX-License-Identifier: GPL-3.0-or-later

//! Native graphics layer used by [`Shader`](crate::Shader).
//!
//! Every call that touches the GPU goes through [`Backend`], which keeps
//! the shader logic independent of how the calls are issued. The
//! production implementation is [`GlBackend`].

pub mod check_gl_error;
mod gl_backend;

#[cfg(test)]
pub(crate) mod mock;

use gl::types::*;
use std::ffi::CStr;

use crate::shader::Stage;

pub use gl_backend::GlBackend;

/// Value layout handed to [`Backend::upload_uniform`].
///
/// Slices always hold whole elements, so `values.len()` is a multiple
/// of the element width (`components`, 9 or 16).
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum UniformData<'a> {
    /// `float`, `vec2`, `vec3` or `vec4` elements.
    Floats { components: usize, values: &'a [f32] },

    /// `int`/`bool`, `ivec*` or `bvec*` elements.
    Ints { components: usize, values: &'a [i32] },

    /// Column-major 3×3 matrices.
    Mat3(&'a [f32]),

    /// Column-major 4×4 matrices.
    Mat4(&'a [f32]),
}

impl UniformData<'_> {
    /// Number of array elements described by the data.
    pub fn count(&self) -> usize {
        match *self {
            UniformData::Floats { components, values } => values.len() / components.max(1),
            UniformData::Ints { components, values } => values.len() / components.max(1),
            UniformData::Mat3(values) => values.len() / 9,
            UniformData::Mat4(values) => values.len() / 16,
        }
    }
}

/// Native calls required to build, feed and activate a shader program.
///
/// Implementations must be cheap to clone: compiled stages and programs
/// keep a clone so they can release themselves on drop. Calls are only
/// valid on the thread that owns the current graphics context.
pub trait Backend: Clone {
    /// Whether the system supports shader programs.
    ///
    /// Implementations probe once and cache the answer for the process.
    fn shaders_available(&self) -> bool;

    /// Number of texture units usable by a program.
    fn max_texture_units(&self) -> u32;

    fn create_program(&self) -> GLuint;

    fn delete_program(&self, program: GLuint);

    fn create_shader(&self, stage: Stage) -> GLuint;

    fn delete_shader(&self, shader: GLuint);

    /// Compiles `source` into `shader`, returning the info log on failure.
    fn compile_shader(&self, shader: GLuint, source: &CStr) -> Result<(), String>;

    fn attach_shader(&self, program: GLuint, shader: GLuint);

    /// Links `program`, returning the info log on failure.
    fn link_program(&self, program: GLuint) -> Result<(), String>;

    /// Location of an active uniform, or -1 when the program does not use it.
    fn uniform_location(&self, program: GLuint, name: &CStr) -> GLint;

    /// Program currently in use, 0 if none.
    fn current_program(&self) -> GLuint;

    fn use_program(&self, program: GLuint);

    /// Uploads `data` to `location` of the program currently in use.
    fn upload_uniform(&self, location: GLint, data: UniformData<'_>);

    /// Selects the texture unit affected by subsequent texture binds.
    fn active_texture_unit(&self, unit: u32);

    fn flush(&self);
}
