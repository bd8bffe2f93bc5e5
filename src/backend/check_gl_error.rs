// ShaderKit
// Copyright (c) 2025 Harlen Batagelo
// https://github.com/hbatagelo/shaderkit
// SPDX-License-Identifier: GPL-3.0-or-later

//! GL error reporting.
//!
//! [`gl_check!`] wraps a raw `gl` call in an `unsafe` block and, in debug
//! builds, drains `glGetError` afterwards. [`setup_opengl_debugging`]
//! routes driver debug messages to the logger when `KHR_debug` is present.

#[cfg(debug_assertions)]
use {gl::types::*, owo_colors::OwoColorize};

/// Runs a `gl` call and reports any error it raised in debug builds.
macro_rules! gl_check {
    ($call:expr) => {{
        #[allow(clippy::let_unit_value)]
        let result = unsafe { $call };
        #[cfg(debug_assertions)]
        $crate::backend::check_gl_error::report_gl_errors(stringify!($call), file!(), line!());
        result
    }};
}
pub(crate) use gl_check;

/// A broken context can report the same error forever.
#[cfg(debug_assertions)]
const MAX_REPORTED_ERRORS: usize = 8;

#[cfg(debug_assertions)]
pub fn report_gl_errors(call: &str, file: &str, line: u32) {
    for _ in 0..MAX_REPORTED_ERRORS {
        let error = unsafe { gl::GetError() };
        if error == gl::NO_ERROR {
            break;
        }
        log::error!(
            "{} {call} at {file}:{line}: {}",
            "[GL ERROR]".red().bold(),
            error_name(error)
        );
    }
}

#[cfg(debug_assertions)]
fn error_name(error: GLenum) -> String {
    match error {
        gl::INVALID_ENUM => "GL_INVALID_ENUM".into(),
        gl::INVALID_VALUE => "GL_INVALID_VALUE".into(),
        gl::INVALID_OPERATION => "GL_INVALID_OPERATION".into(),
        gl::STACK_OVERFLOW => "GL_STACK_OVERFLOW".into(),
        gl::STACK_UNDERFLOW => "GL_STACK_UNDERFLOW".into(),
        gl::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY".into(),
        gl::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION".into(),
        other => format!("unknown error 0x{other:X}"),
    }
}

/// Installs a synchronous debug message callback, if the driver offers one.
#[cfg(debug_assertions)]
pub fn setup_opengl_debugging() {
    if !has_extension(&["GL_KHR_debug", "GL_ARB_debug_output"]) {
        log::debug!("GL debug output unavailable");
        return;
    }

    unsafe {
        gl::Enable(gl::DEBUG_OUTPUT);
        gl::Enable(gl::DEBUG_OUTPUT_SYNCHRONOUS);
        gl::DebugMessageCallback(Some(on_debug_message), std::ptr::null());
        gl::DebugMessageControl(
            gl::DONT_CARE,
            gl::DONT_CARE,
            gl::DONT_CARE,
            0,
            std::ptr::null(),
            gl::TRUE,
        );
    }
}

#[cfg(debug_assertions)]
fn has_extension(candidates: &[&str]) -> bool {
    let mut count = 0;
    unsafe { gl::GetIntegerv(gl::NUM_EXTENSIONS, &mut count) };

    (0..count.max(0) as GLuint).any(|index| {
        let ptr = unsafe { gl::GetStringi(gl::EXTENSIONS, index) };
        !ptr.is_null() && {
            let name = unsafe { std::ffi::CStr::from_ptr(ptr as *const _) }.to_string_lossy();
            candidates.iter().any(|candidate| name == *candidate)
        }
    })
}

#[cfg(debug_assertions)]
extern "system" fn on_debug_message(
    source: GLenum,
    type_: GLenum,
    id: GLuint,
    severity: GLenum,
    _length: GLsizei,
    message: *const GLchar,
    _user_param: *mut std::ffi::c_void,
) {
    if severity == gl::DEBUG_SEVERITY_NOTIFICATION || message.is_null() {
        return;
    }

    let source = match source {
        gl::DEBUG_SOURCE_API => "api",
        gl::DEBUG_SOURCE_SHADER_COMPILER => "shader compiler",
        gl::DEBUG_SOURCE_WINDOW_SYSTEM => "window system",
        gl::DEBUG_SOURCE_APPLICATION => "application",
        _ => "other",
    };
    let kind = match type_ {
        gl::DEBUG_TYPE_ERROR => "error",
        gl::DEBUG_TYPE_DEPRECATED_BEHAVIOR => "deprecated",
        gl::DEBUG_TYPE_UNDEFINED_BEHAVIOR => "undefined behavior",
        gl::DEBUG_TYPE_PERFORMANCE => "performance",
        gl::DEBUG_TYPE_PORTABILITY => "portability",
        _ => "other",
    };
    let severity = match severity {
        gl::DEBUG_SEVERITY_HIGH => "high",
        gl::DEBUG_SEVERITY_MEDIUM => "medium",
        _ => "low",
    };

    let text = unsafe { std::ffi::CStr::from_ptr(message).to_string_lossy() };
    log::debug!(
        "{} [{source}/{kind}/{severity}] #{id}: {text}",
        "[GL DEBUG]".white().bold()
    );
}
