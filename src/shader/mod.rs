// ShaderKit
// Copyright (c) 2025 Harlen Batagelo
// https://github.com/hbatagelo/shaderkit
// SPDX-License-Identifier: GPL-3.0-or-later

//! The [`Shader`] program resource.
//!
//! A shader is either absent (no program) or holds one fully linked
//! program. Loading always starts by discarding the previous program
//! together with everything derived from it:
//!
//! 1. the uniform location cache, since locations belong to one program;
//! 2. the texture binding table, since it is keyed by those locations.
//!
//! Uniform values are uploaded as soon as they are set. Sampler
//! uniforms are only recorded, and bound to texture units when the
//! program is activated with [`Shader::bind`].

mod activation;
mod compile;
mod legacy;
mod locations;
mod source;
mod textures;
mod uniforms;

use gl::types::*;
use std::{fmt, io, path::PathBuf};

use crate::backend::{Backend, GlBackend};

use {compile::Program, locations::LocationCache, textures::TextureTable};

pub use activation::{activate, Activation, CURRENT_TEXTURE_UNIT};
pub use legacy::Parameter;
pub use textures::TextureBinding;

#[derive(Debug, thiserror::Error)]
pub enum ShaderError {
    #[error(
        "Shaders are not supported on this system (check Shader::is_available before loading)"
    )]
    Unavailable,
    #[error("No shader source provided")]
    NoSource,
    #[error("Failed to compile {0} shader: {1}")]
    CompileError(Stage, String),
    #[error("Failed to link shader program: {0}")]
    LinkError(String),
    #[error("Failed to read {stage} shader \"{}\": {source}", path.display())]
    Io {
        stage: Stage,
        path: PathBuf,
        source: io::Error,
    },
    #[error("Failed to read {stage} shader from stream: {source}")]
    Stream { stage: Stage, source: io::Error },
    #[error{"{0}"}]
    NulError(#[from] std::ffi::NulError),
}

/// Programmable pipeline stage.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum Stage {
    Vertex,
    Fragment,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Vertex => "vertex",
            Stage::Fragment => "fragment",
        })
    }
}

/// Marker that binds a sampler uniform to the texture of the object
/// being drawn, which is only known when the shader is activated.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct CurrentTexture;

/// A linked GLSL program plus the uniform state attached to it.
///
/// Textures given to [`Shader::set_uniform_texture`] are borrowed for
/// `'t`, so they cannot be dropped while the shader may still bind them.
/// All methods must run on the thread that owns the graphics context.
pub struct Shader<'t, B: Backend = GlBackend> {
    backend: B,
    program: Option<Program<B>>,
    locations: LocationCache,
    textures: TextureTable<'t>,
}

impl<'t> Shader<'t, GlBackend> {
    /// Creates an empty shader issuing calls through the `gl` crate.
    pub fn new() -> Self {
        Self::with_backend(GlBackend)
    }
}

impl Default for Shader<'_, GlBackend> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'t, B: Backend> Shader<'t, B> {
    /// Creates an empty shader issuing calls through `backend`.
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            program: None,
            locations: LocationCache::default(),
            textures: TextureTable::default(),
        }
    }

    /// Whether the system supports shaders.
    ///
    /// The first call probes the current graphics context and caches
    /// the answer for the rest of the process, so it must be made on
    /// the thread that owns the context.
    pub fn is_available(backend: &B) -> bool {
        backend.shaders_available()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Whether a linked program is held.
    pub fn is_loaded(&self) -> bool {
        self.program.is_some()
    }

    /// Native program name, or 0 when no program is loaded.
    ///
    /// Only valid while this shader is alive and not reloaded.
    pub fn native_handle(&self) -> GLuint {
        self.program.as_ref().map_or(0, Program::id)
    }

    /// Compiles and links a program from the given stage sources.
    ///
    /// At least one source is required. The previous program, uniform
    /// locations and texture bindings are dropped before compiling,
    /// so on failure the shader is left without a program.
    pub fn load_from_sources(
        &mut self,
        vertex: Option<&str>,
        fragment: Option<&str>,
    ) -> Result<(), ShaderError> {
        self.discard();

        let result = compile::build_program(&self.backend, vertex, fragment);
        match result {
            Ok(program) => {
                log::debug!("Linked shader program {}", program.id());
                self.program = Some(program);
                self.backend.flush();
                Ok(())
            }
            Err(err) => {
                log::error!("{err}");
                Err(err)
            }
        }
    }

    /// Drops the program and all state derived from it.
    fn discard(&mut self) {
        if let Some(program) = self.program.take() {
            log::debug!("Releasing shader program {}", program.id());
        }
        self.locations.clear();
        self.textures.clear();
    }

    /// What the sampler `name` is currently bound to.
    ///
    /// Only names that were already set are known; this never queries
    /// the program.
    pub fn texture_binding(&self, name: &str) -> Option<TextureBinding<'t>> {
        let location = self.locations.get(name)?;
        self.textures.get(location).copied()
    }

    /// Forgets every borrowed texture and keeps everything else.
    ///
    /// The program, cached locations and current-texture samplers carry
    /// over, so the returned shader can outlive the textures it was
    /// given. Useful for binding short-lived textures once per frame.
    pub fn release_textures<'u>(self) -> Shader<'u, B> {
        let textures = self.textures.without_bound();
        Shader {
            backend: self.backend,
            program: self.program,
            locations: self.locations,
            textures,
        }
    }

    /// Resolves `name` against the current program.
    ///
    /// Returns `None` when no program is loaded or when the program does
    /// not use the uniform.
    fn location(&mut self, name: &str) -> Option<GLint> {
        let program = self.program.as_ref()?.id();
        let location = self.locations.locate(&self.backend, program, name);
        (location != locations::NOT_FOUND).then_some(location)
    }
}

impl<B: Backend> fmt::Debug for Shader<'_, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shader")
            .field("program", &self.native_handle())
            .field("cached_locations", &self.locations.len())
            .field("texture_bindings", &self.textures.len())
            .finish()
    }
}
