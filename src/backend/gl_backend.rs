// ShaderKit
// Copyright (c) 2025 Harlen Batagelo
// https://github.com/hbatagelo/shaderkit
// SPDX-License-Identifier: GPL-3.0-or-later

use gl::types::*;
use std::{ffi::CStr, sync::OnceLock};

use super::{check_gl_error::gl_check, Backend, UniformData};
use crate::shader::Stage;

static SHADERS_AVAILABLE: OnceLock<bool> = OnceLock::new();
static MAX_TEXTURE_UNITS: OnceLock<u32> = OnceLock::new();

/// [`Backend`] that issues calls through the global `gl` function pointers.
///
/// The pointers must have been loaded with [`gl::load_with`] and a GL
/// context must be current on the calling thread.
#[derive(Copy, Clone, Debug, Default)]
pub struct GlBackend;

impl GlBackend {
    fn stage_enum(stage: Stage) -> GLenum {
        match stage {
            Stage::Vertex => gl::VERTEX_SHADER,
            Stage::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

/// Extensions that provide shaders on contexts older than GL 2.0.
const SHADER_EXTENSIONS: [&str; 4] = [
    "GL_ARB_multitexture",
    "GL_ARB_shader_objects",
    "GL_ARB_vertex_shader",
    "GL_ARB_fragment_shader",
];

/// Queries the current context for programmable shader support.
///
/// GL 2.0 made shaders core; older contexts need [`SHADER_EXTENSIONS`].
fn probe_shader_support() -> bool {
    let entry_points_loaded = gl::GetString::is_loaded()
        && gl::CreateShader::is_loaded()
        && gl::CreateProgram::is_loaded()
        && gl::UseProgram::is_loaded()
        && gl::ActiveTexture::is_loaded();
    if !entry_points_loaded {
        log::debug!("GL entry points for shaders are not loaded");
        return false;
    }

    let Some(version) = gl_string(gl::VERSION) else {
        log::debug!("No current GL context to probe");
        return false;
    };
    log::debug!("Probing shader support on GL {version}");

    match parse_gl_version(&version) {
        Some(version) if version >= (2, 0) => gl_string(gl::SHADING_LANGUAGE_VERSION).is_some(),
        Some(_) => gl_string(gl::EXTENSIONS).is_some_and(|list| has_shader_extensions(&list)),
        None => false,
    }
}

fn gl_string(name: GLenum) -> Option<String> {
    let ptr = unsafe { gl::GetString(name) };
    (!ptr.is_null())
        .then(|| unsafe { CStr::from_ptr(ptr as *const _) }.to_string_lossy().into_owned())
}

/// Major and minor version from a `GL_VERSION` string such as
/// `"4.6.0 NVIDIA 550.54"` or `"OpenGL ES 3.2 Mesa 24.0"`.
pub(super) fn parse_gl_version(version: &str) -> Option<(u32, u32)> {
    let number = version
        .split_whitespace()
        .find(|word| word.starts_with(|c: char| c.is_ascii_digit()))?;
    let mut parts = number.split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts
        .next()?
        .chars()
        .take_while(char::is_ascii_digit)
        .collect::<String>()
        .parse()
        .ok()?;
    Some((major, minor))
}

/// Whether a space-separated `GL_EXTENSIONS` list has every extension
/// in [`SHADER_EXTENSIONS`].
pub(super) fn has_shader_extensions(extensions: &str) -> bool {
    SHADER_EXTENSIONS
        .iter()
        .all(|required| extensions.split_whitespace().any(|name| name == *required))
}

type GlGetIv = unsafe fn(GLuint, GLenum, *mut GLint);
type GlGetLog = unsafe fn(GLuint, GLsizei, *mut GLsizei, *mut GLchar);

/// Reads the info log of a shader or program object.
fn info_log(id: GLuint, get_iv: GlGetIv, get_log: GlGetLog) -> String {
    unsafe {
        let mut log_len = 0;
        get_iv(id, gl::INFO_LOG_LENGTH, &mut log_len);
        if log_len <= 0 {
            return String::new();
        }
        let mut log = Vec::<u8>::with_capacity(log_len as usize);
        let mut written = 0;
        get_log(id, log_len, &mut written, log.as_mut_ptr() as *mut _);
        log.set_len(written.clamp(0, log_len) as usize);
        String::from_utf8_lossy(&log).trim_end().to_string()
    }
}

impl Backend for GlBackend {
    fn shaders_available(&self) -> bool {
        *SHADERS_AVAILABLE.get_or_init(|| {
            let available = probe_shader_support();
            log::debug!("Shader support: {available}");
            available
        })
    }

    fn max_texture_units(&self) -> u32 {
        *MAX_TEXTURE_UNITS.get_or_init(|| {
            let mut units = 0;
            gl_check!(gl::GetIntegerv(
                gl::MAX_COMBINED_TEXTURE_IMAGE_UNITS,
                &mut units
            ));
            log::debug!("Texture units: {units}");
            units.max(1) as u32
        })
    }

    fn create_program(&self) -> GLuint {
        gl_check!(gl::CreateProgram())
    }

    fn delete_program(&self, program: GLuint) {
        gl_check!(gl::DeleteProgram(program));
    }

    fn create_shader(&self, stage: Stage) -> GLuint {
        gl_check!(gl::CreateShader(Self::stage_enum(stage)))
    }

    fn delete_shader(&self, shader: GLuint) {
        gl_check!(gl::DeleteShader(shader));
    }

    fn compile_shader(&self, shader: GLuint, source: &CStr) -> Result<(), String> {
        gl_check!(gl::ShaderSource(
            shader,
            1,
            &source.as_ptr(),
            std::ptr::null()
        ));
        gl_check!(gl::CompileShader(shader));

        let mut success = 0;
        gl_check!(gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut success));
        if success == 0 {
            Err(info_log(shader, gl::GetShaderiv, gl::GetShaderInfoLog))
        } else {
            Ok(())
        }
    }

    fn attach_shader(&self, program: GLuint, shader: GLuint) {
        gl_check!(gl::AttachShader(program, shader));
    }

    fn link_program(&self, program: GLuint) -> Result<(), String> {
        gl_check!(gl::LinkProgram(program));

        let mut success = 0;
        gl_check!(gl::GetProgramiv(program, gl::LINK_STATUS, &mut success));
        if success == 0 {
            Err(info_log(program, gl::GetProgramiv, gl::GetProgramInfoLog))
        } else {
            Ok(())
        }
    }

    fn uniform_location(&self, program: GLuint, name: &CStr) -> GLint {
        gl_check!(gl::GetUniformLocation(program, name.as_ptr()))
    }

    fn current_program(&self) -> GLuint {
        let mut program = 0;
        gl_check!(gl::GetIntegerv(gl::CURRENT_PROGRAM, &mut program));
        program as GLuint
    }

    fn use_program(&self, program: GLuint) {
        gl_check!(gl::UseProgram(program));
    }

    fn upload_uniform(&self, location: GLint, data: UniformData<'_>) {
        let count = data.count() as GLsizei;
        match data {
            UniformData::Floats { components, values } => {
                let ptr = values.as_ptr();
                match components {
                    1 => gl_check!(gl::Uniform1fv(location, count, ptr)),
                    2 => gl_check!(gl::Uniform2fv(location, count, ptr)),
                    3 => gl_check!(gl::Uniform3fv(location, count, ptr)),
                    4 => gl_check!(gl::Uniform4fv(location, count, ptr)),
                    _ => log::error!("Unsupported float vector width {components}"),
                }
            }
            UniformData::Ints { components, values } => {
                let ptr = values.as_ptr();
                match components {
                    1 => gl_check!(gl::Uniform1iv(location, count, ptr)),
                    2 => gl_check!(gl::Uniform2iv(location, count, ptr)),
                    3 => gl_check!(gl::Uniform3iv(location, count, ptr)),
                    4 => gl_check!(gl::Uniform4iv(location, count, ptr)),
                    _ => log::error!("Unsupported int vector width {components}"),
                }
            }
            UniformData::Mat3(values) => {
                gl_check!(gl::UniformMatrix3fv(
                    location,
                    count,
                    gl::FALSE,
                    values.as_ptr()
                ))
            }
            UniformData::Mat4(values) => {
                gl_check!(gl::UniformMatrix4fv(
                    location,
                    count,
                    gl::FALSE,
                    values.as_ptr()
                ))
            }
        }
    }

    fn active_texture_unit(&self, unit: u32) {
        gl_check!(gl::ActiveTexture(gl::TEXTURE0 + unit));
    }

    fn flush(&self) {
        gl_check!(gl::Flush());
    }
}
