// ShaderKit
// Copyright (c) 2025 Harlen Batagelo
// https://github.com/hbatagelo/shaderkit
// SPDX-License-Identifier: GPL-3.0-or-later

//! Draws a preset: one textured quad through the preset's shader.
//!
//! The quad's own texture is handed to the shader at activation time,
//! so samplers set to `current_texture` read from it.

mod gl_texture;
mod quad;

use std::{
    path::{Path, PathBuf},
    time::Instant,
};
use thiserror::Error;

use shaderkit::{Shader, ShaderError, Stage};

use crate::preset::*;
use {gl_texture::*, quad::*};

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("Preset error: {0}")]
    Preset(#[from] PresetError),

    #[error("Shader error: {0}")]
    Shader(#[from] ShaderError),

    #[error("Failed to load texture \"{}\": {source}", path.display())]
    Texture {
        path: PathBuf,
        source: image::ImageError,
    },
}

/// Owns everything needed to draw one frame.
///
/// Fields drop in declaration order, so the program goes before the
/// textures it sampled. Drop it while the GL context is current.
pub struct Viewer {
    /// Holds no borrowed textures between frames.
    shader: Shader<'static>,
    quad: Quad,
    draw_texture: GlTexture,
    sampler_textures: Vec<(String, GlTexture)>,
    per_frame: Vec<(String, UniformSetting)>,
    start_time: Instant,
    frame_count: u64,
}

fn load_texture(path: &Path) -> Result<GlTexture, ViewerError> {
    let texture = GlTexture::from_file(path).map_err(|source| ViewerError::Texture {
        path: path.to_path_buf(),
        source,
    })?;
    let (width, height) = texture.size();
    log::debug!("Loaded {width}x{height} texture {}", path.display());
    Ok(texture)
}

impl Viewer {
    /// Builds the program and uploads the static uniforms of `preset`.
    ///
    /// Requires a current GL context with loaded function pointers.
    pub fn new(preset: &Preset) -> Result<Self, ViewerError> {
        let vertex = preset
            .source(Stage::Vertex)?
            .unwrap_or_else(|| defaults::VERTEX_SHADER.to_string());
        let fragment = preset.source(Stage::Fragment)?;

        let mut shader = Shader::new();
        shader.load_from_sources(Some(&vertex), fragment.as_deref())?;
        log::info!(
            "Loaded preset \"{}\" (program {})",
            preset.name,
            shader.native_handle()
        );

        let draw_texture = match &preset.texture {
            Some(path) => load_texture(path)?,
            None => GlTexture::checkerboard(),
        };

        let mut sampler_textures = Vec::new();
        let mut per_frame = Vec::new();
        for (name, setting) in &preset.uniforms {
            match setting {
                UniformSetting::Texture { path } => match load_texture(path) {
                    Ok(texture) => sampler_textures.push((name.clone(), texture)),
                    Err(err) => log::warn!("Skipping uniform \"{name}\": {err}"),
                },
                _ if setting.is_per_frame() => per_frame.push((name.clone(), setting.clone())),
                _ => apply_uniform(&mut shader, name, setting),
            }
        }

        Ok(Self {
            shader,
            quad: Quad::new(),
            draw_texture,
            sampler_textures,
            per_frame,
            start_time: Instant::now(),
            frame_count: 0,
        })
    }

    pub fn render(&mut self, width: i32, height: i32) {
        // Sampler textures are lent to the shader for this frame only.
        let mut shader: Shader<'_> = std::mem::take(&mut self.shader);
        for (name, texture) in &self.sampler_textures {
            shader.set_uniform_texture(name, texture);
        }

        let elapsed = self.start_time.elapsed().as_secs_f32();
        for (name, setting) in &self.per_frame {
            match setting {
                UniformSetting::Time => shader.set_uniform_float(name, elapsed),
                UniformSetting::Resolution => {
                    shader.set_uniform_vec2(name, (width as f32, height as f32).into())
                }
                _ => {}
            }
        }

        unsafe {
            gl::Viewport(0, 0, width, height);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }

        let activation = shader.bind(Some(&self.draw_texture));
        if self.frame_count == 0 {
            log::debug!("First frame activation: {activation:?}");
        }
        self.quad.draw();
        Shader::unbind(shader.backend());

        self.shader = shader.release_textures();
        self.frame_count += 1;
    }
}

/// Uploads a setting that does not change between frames.
fn apply_uniform(shader: &mut Shader<'_>, name: &str, setting: &UniformSetting) {
    match setting {
        UniformSetting::Float { value } => shader.set_uniform_float(name, *value),
        UniformSetting::Int { value } => shader.set_uniform_int(name, *value),
        UniformSetting::Bool { value } => shader.set_uniform_bool(name, *value),
        UniformSetting::Vec2 { value } => shader.set_uniform_vec2(name, (*value).into()),
        UniformSetting::Vec3 { value } => shader.set_uniform_vec3(name, (*value).into()),
        UniformSetting::Vec4 { value } => shader.set_uniform_vec4(name, (*value).into()),
        UniformSetting::Color { value } => shader.set_uniform_color(name, *value),
        UniformSetting::CurrentTexture => shader.set_uniform_current_texture(name),
        UniformSetting::Texture { .. } | UniformSetting::Time | UniformSetting::Resolution => {}
    }
}
