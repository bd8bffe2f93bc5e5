// ShaderKit
// Copyright (c) 2025 Harlen Batagelo
// https://github.com/hbatagelo/shaderkit
// SPDX-License-Identifier: GPL-3.0-or-later

//! Value types consumed by the uniform setters.

#[cfg(test)]
mod tests {
    mod color;
    mod transform;
}
mod color;
mod texture;
mod transform;

pub use color::Color;
pub use texture::Texture;
pub use transform::Transform;
