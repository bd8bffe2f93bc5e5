// ShaderKit
// Copyright (c) 2025 Harlen Batagelo
// https://github.com/hbatagelo/shaderkit
// SPDX-License-Identifier: GPL-3.0-or-later

use gl::types::*;
use std::{collections::HashMap, ffi::CString};

use crate::backend::Backend;

/// Location reported for uniforms the program does not use.
pub const NOT_FOUND: GLint = -1;

/// Memoized uniform locations of one program.
///
/// Misses are cached too, so a uniform that the compiler optimized
/// away is only queried once.
#[derive(Debug, Default)]
pub struct LocationCache {
    map: HashMap<String, GLint>,
}

impl LocationCache {
    pub fn locate<B: Backend>(&mut self, backend: &B, program: GLuint, name: &str) -> GLint {
        if let Some(&location) = self.map.get(name) {
            return location;
        }

        let location = match CString::new(name) {
            Ok(c_name) => backend.uniform_location(program, &c_name),
            Err(err) => {
                log::warn!("Invalid uniform name {name:?}: {err}");
                NOT_FOUND
            }
        };

        if location == NOT_FOUND {
            log::debug!("Uniform \"{name}\" not found in shader program {program}");
        }

        self.map.insert(name.to_string(), location);
        location
    }

    /// Cached location for `name`, without querying the program.
    pub fn get(&self, name: &str) -> Option<GLint> {
        self.map.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }
}
