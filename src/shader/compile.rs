// ShaderKit
// Copyright (c) 2025 Harlen Batagelo
// https://github.com/hbatagelo/shaderkit
// SPDX-License-Identifier: GPL-3.0-or-later

use gl::types::*;
use std::ffi::CString;

use super::{ShaderError, Stage};
use crate::backend::Backend;

/// A linked program object, released on drop.
pub struct Program<B: Backend> {
    id: GLuint,
    backend: B,
}

impl<B: Backend> Program<B> {
    fn create(backend: &B) -> Self {
        Self {
            id: backend.create_program(),
            backend: backend.clone(),
        }
    }

    pub fn id(&self) -> GLuint {
        self.id
    }

    fn attach(&self, stage: &StageObject<B>) {
        self.backend.attach_shader(self.id, stage.id);
    }

    fn link(self) -> Result<Self, ShaderError> {
        self.backend
            .link_program(self.id)
            .map_err(ShaderError::LinkError)?;
        Ok(self)
    }
}

impl<B: Backend> Drop for Program<B> {
    fn drop(&mut self) {
        self.backend.delete_program(self.id);
    }
}

/// A compiled stage object, released on drop.
///
/// Dropping it after it has been attached only flags it for deletion;
/// the program keeps it alive until the program itself is released.
struct StageObject<B: Backend> {
    id: GLuint,
    backend: B,
}

impl<B: Backend> StageObject<B> {
    fn compile(backend: &B, source: &CString, stage: Stage) -> Result<Self, ShaderError> {
        let object = Self {
            id: backend.create_shader(stage),
            backend: backend.clone(),
        };
        backend
            .compile_shader(object.id, source)
            .map_err(|log| ShaderError::CompileError(stage, log))?;
        Ok(object)
    }
}

impl<B: Backend> Drop for StageObject<B> {
    fn drop(&mut self) {
        self.backend.delete_shader(self.id);
    }
}

/// Compiles the present stages and links them into a program.
///
/// Any object created along the way is released if a step fails.
pub fn build_program<B: Backend>(
    backend: &B,
    vertex: Option<&str>,
    fragment: Option<&str>,
) -> Result<Program<B>, ShaderError> {
    if vertex.is_none() && fragment.is_none() {
        return Err(ShaderError::NoSource);
    }

    if !backend.shaders_available() {
        return Err(ShaderError::Unavailable);
    }

    // Validated up front so that no native object is created for a
    // source that can never be handed to the compiler.
    let vertex = vertex.map(CString::new).transpose()?;
    let fragment = fragment.map(CString::new).transpose()?;

    let program = Program::create(backend);

    for (stage, source) in [(Stage::Vertex, vertex), (Stage::Fragment, fragment)] {
        if let Some(source) = source {
            let object = StageObject::compile(backend, &source, stage)?;
            program.attach(&object);
        }
    }

    program.link()
}
