// ShaderKit
// Copyright (c) 2025 Harlen Batagelo
// https://github.com/hbatagelo/shaderkit
// SPDX-License-Identifier: GPL-3.0-or-later

//! GLSL shader program resource.
//!
//! Compiles vertex/fragment sources into a linked program, caches
//! uniform locations, uploads strongly-typed uniform values and binds
//! sampler uniforms to texture units when the program is activated.
//!
//! A sampler may be bound to a concrete [`Texture`] borrowed for the
//! lifetime of the [`Shader`], or to [`CurrentTexture`], which defers
//! the choice to the draw call that activates the program.
//!
//! All native calls go through a [`Backend`]. [`GlBackend`] issues
//! them through the `gl` crate and requires a current OpenGL context
//! on the calling thread.

pub mod backend;
pub mod glsl;
pub mod graphics;
pub mod shader;

pub use backend::{Backend, GlBackend};
pub use graphics::{Color, Texture, Transform};
pub use shader::{activate, Activation, CurrentTexture, Parameter, Shader, ShaderError, Stage};
