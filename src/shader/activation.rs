// ShaderKit
// Copyright (c) 2025 Harlen Batagelo
// https://github.com/hbatagelo/shaderkit
// SPDX-License-Identifier: GPL-3.0-or-later

use gl::types::*;

use super::{textures::TextureBinding, Shader};
use crate::{
    backend::{Backend, UniformData},
    graphics::Texture,
};

/// Texture unit sampled by current-texture uniforms.
///
/// Concrete textures are assigned the units after it.
pub const CURRENT_TEXTURE_UNIT: u32 = 0;

/// What a successful activation did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Activation {
    /// Program made current.
    pub program: GLuint,

    /// `(slot, unit)` for every concrete texture, in ascending slot order.
    pub assignments: Vec<(GLint, u32)>,

    /// Slot last set to sample the current texture, if any.
    pub current_texture_slot: Option<GLint>,
}

impl<'t, B: Backend> Shader<'t, B> {
    /// Makes this shader the active program for subsequent draws.
    ///
    /// `draw_texture` is the texture of the object about to be drawn; it
    /// is bound on [`CURRENT_TEXTURE_UNIT`]. Returns `None` when no
    /// program was made current.
    pub fn bind(&self, draw_texture: Option<&dyn Texture>) -> Option<Activation> {
        activate(&self.backend, Some(self), draw_texture)
    }

    /// Deactivates any shader, so that subsequent draws use no program.
    pub fn unbind(backend: &B) {
        activate::<B>(backend, None, None);
    }
}

/// Activates `shader`, or no program at all when `shader` is `None` or
/// holds no program.
pub fn activate<B: Backend>(
    backend: &B,
    shader: Option<&Shader<'_, B>>,
    draw_texture: Option<&dyn Texture>,
) -> Option<Activation> {
    if !backend.shaders_available() {
        log::error!(
            "Failed to bind or unbind shader: shaders are not supported on this system \
             (check Shader::is_available before using shaders)"
        );
        return None;
    }

    let Some(shader) = shader.filter(|shader| shader.is_loaded()) else {
        backend.use_program(0);
        return None;
    };

    let program = shader.native_handle();
    backend.use_program(program);

    let mut activation = Activation {
        program,
        assignments: Vec::new(),
        current_texture_slot: shader.textures.current_texture_slot(),
    };

    let mut unit = CURRENT_TEXTURE_UNIT;
    for (slot, binding) in shader.textures.iter() {
        match binding {
            TextureBinding::Bound(texture) => {
                unit += 1;
                upload_unit(backend, slot, unit);
                backend.active_texture_unit(unit);
                texture.bind();
                activation.assignments.push((slot, unit));
            }
            TextureBinding::DrawTarget => upload_unit(backend, slot, CURRENT_TEXTURE_UNIT),
        }
    }

    backend.active_texture_unit(CURRENT_TEXTURE_UNIT);
    if let Some(texture) = draw_texture {
        texture.bind();
    }

    log::trace!("Activated shader program {program}: {activation:?}");
    Some(activation)
}

fn upload_unit<B: Backend>(backend: &B, slot: GLint, unit: u32) {
    backend.upload_uniform(
        slot,
        UniformData::Ints {
            components: 1,
            values: &[unit as i32],
        },
    );
}
