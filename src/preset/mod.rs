// ShaderKit
// Copyright (c) 2025 Harlen Batagelo
// https://github.com/hbatagelo/shaderkit
// SPDX-License-Identifier: GPL-3.0-or-later

//! TOML presets describing what the viewer draws.
//!
//! A preset names the two shader stages (inline GLSL or files), the
//! texture mapped on the quad and a table of uniform settings:
//!
//! ```toml
//! name = "Ripple"
//! texture = "photo.png"
//! fragment = { file = "ripple.frag" }
//!
//! [uniforms.tint]
//! type = "color"
//! value = { r = 255, g = 128, b = 0 }
//!
//! [uniforms.time]
//! type = "time"
//! ```
//!
//! Relative paths are resolved against the directory of the preset file.

#[cfg(test)]
mod tests {
    mod preset;
}

use serde::*;
use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;

use shaderkit::{Color, Stage};

#[derive(Debug, Error)]
pub enum PresetError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// GLSL code of one stage.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShaderSource {
    File(PathBuf),
    Inline(String),
}

/// How a uniform is fed.
///
/// `time` and `resolution` are refreshed every frame; everything else
/// is set once after the program is linked.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UniformSetting {
    Float { value: f32 },
    Int { value: i32 },
    Bool { value: bool },
    Vec2 { value: [f32; 2] },
    Vec3 { value: [f32; 3] },
    Vec4 { value: [f32; 4] },
    Color { value: Color },
    Texture { path: PathBuf },
    CurrentTexture,
    Time,
    Resolution,
}

impl UniformSetting {
    pub fn is_per_frame(&self) -> bool {
        matches!(self, UniformSetting::Time | UniformSetting::Resolution)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Preset {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub vertex: Option<ShaderSource>,

    #[serde(default)]
    pub fragment: Option<ShaderSource>,

    /// Image drawn on the quad and sampled by `current_texture` uniforms.
    #[serde(default)]
    pub texture: Option<PathBuf>,

    #[serde(default)]
    pub uniforms: BTreeMap<String, UniformSetting>,
}

impl Preset {
    pub fn from_toml_file(path: &Path) -> Result<Self, PresetError> {
        let content = fs::read_to_string(path)?;
        let mut preset: Preset = toml::from_str(&content)?;
        if let Some(dir) = path.parent() {
            preset.resolve_paths(dir);
        }
        Ok(preset)
    }

    /// Preset used when none is given: ripples the quad texture.
    pub fn builtin() -> Self {
        toml::from_str(defaults::BUILTIN_PRESET).expect("Failed to create builtin preset")
    }

    /// Makes every relative path of the preset relative to `dir`.
    pub fn resolve_paths(&mut self, dir: &Path) {
        let resolve = |path: &mut PathBuf| {
            if path.is_relative() {
                *path = dir.join(&*path);
            }
        };

        for source in [&mut self.vertex, &mut self.fragment].into_iter().flatten() {
            if let ShaderSource::File(path) = source {
                resolve(path);
            }
        }
        if let Some(path) = &mut self.texture {
            resolve(path);
        }
        for setting in self.uniforms.values_mut() {
            if let UniformSetting::Texture { path } = setting {
                resolve(path);
            }
        }
    }

    /// Source of `stage`, read from disk if it lives in a file.
    pub fn source(&self, stage: Stage) -> Result<Option<String>, PresetError> {
        let source = match stage {
            Stage::Vertex => &self.vertex,
            Stage::Fragment => &self.fragment,
        };
        Ok(match source {
            Some(ShaderSource::File(path)) => Some(fs::read_to_string(path)?),
            Some(ShaderSource::Inline(code)) => Some(code.clone()),
            None => None,
        })
    }
}

pub mod defaults {
    /// Vertex stage used when a preset only provides a fragment stage.
    pub const VERTEX_SHADER: &str = r#"#version 330 core
layout(location = 0) in vec2 position;
layout(location = 1) in vec2 texCoord;

out vec2 fragTexCoord;

void main() {
    gl_Position = vec4(position, 0.0, 1.0);
    fragTexCoord = texCoord;
}
"#;

    pub const BUILTIN_PRESET: &str = r#"
name = "Ripple"

[fragment]
inline = """
#version 330 core
in vec2 fragTexCoord;
out vec4 fragColor;

uniform sampler2D scene;
uniform vec4 tint;
uniform float time;

void main() {
    vec2 offset = 0.01 * vec2(sin(time + fragTexCoord.y * 20.0),
                              cos(time + fragTexCoord.x * 20.0));
    fragColor = texture(scene, fragTexCoord + offset) * tint;
}
"""

[uniforms.scene]
type = "current_texture"

[uniforms.tint]
type = "color"
value = { r = 255, g = 230, b = 200 }

[uniforms.time]
type = "time"
"#;
}
