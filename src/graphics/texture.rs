// ShaderKit
// Copyright (c) 2025 Harlen Batagelo
// https://github.com/hbatagelo/shaderkit
// SPDX-License-Identifier: GPL-3.0-or-later

use gl::types::GLuint;

/// A texture that can be sampled by a shader.
///
/// The shader never owns textures; it borrows them for as long as a
/// sampler uniform refers to them and binds them while activating.
pub trait Texture {
    /// Binds the texture to the currently selected texture unit.
    fn bind(&self);

    /// Underlying texture name, used in diagnostics.
    fn native_handle(&self) -> GLuint;
}
