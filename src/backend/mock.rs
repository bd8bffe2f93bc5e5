// ShaderKit
// Copyright (c) 2025 Harlen Batagelo
// https://github.com/hbatagelo/shaderkit
// SPDX-License-Identifier: GPL-3.0-or-later

//! Recording [`Backend`] used by the unit tests.
//!
//! The fake compiler accepts any source unless it contains
//! `COMPILE_ERROR`; linking fails when an attached source contains
//! `LINK_ERROR`. Every `uniform <type> <name>;` declaration in the
//! attached sources becomes an active uniform, located at
//! `program * 100 + index` so that locations differ between programs.

use gl::types::*;
use std::{
    cell::RefCell,
    collections::{BTreeSet, HashMap},
    ffi::CStr,
    rc::Rc,
};

use super::{Backend, UniformData};
use crate::{graphics::Texture, shader::Stage};

#[derive(Clone, Debug, PartialEq)]
pub enum Upload {
    Floats(usize, Vec<f32>),
    Ints(usize, Vec<i32>),
    Mat3(Vec<f32>),
    Mat4(Vec<f32>),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    CreateProgram(GLuint),
    DeleteProgram(GLuint),
    CreateShader(Stage, GLuint),
    DeleteShader(GLuint),
    CompileShader(GLuint),
    AttachShader(GLuint, GLuint),
    LinkProgram(GLuint),
    UniformLocation(GLuint, String),
    UseProgram(GLuint),
    Upload(GLint, Upload),
    ActiveTexture(u32),
    BindTexture(GLuint),
    Flush,
}

struct State {
    available: bool,
    max_texture_units: u32,
    next_id: GLuint,
    current_program: GLuint,
    calls: Vec<Call>,
    sources: HashMap<GLuint, String>,
    attached: HashMap<GLuint, Vec<GLuint>>,
    linked_uniforms: HashMap<GLuint, Vec<String>>,
    live_programs: BTreeSet<GLuint>,
    live_shaders: BTreeSet<GLuint>,
    probes: usize,
}

#[derive(Clone)]
pub struct MockBackend(Rc<RefCell<State>>);

impl MockBackend {
    pub fn new() -> Self {
        Self(Rc::new(RefCell::new(State {
            available: true,
            max_texture_units: 16,
            next_id: 1,
            current_program: 0,
            calls: Vec::new(),
            sources: HashMap::new(),
            attached: HashMap::new(),
            linked_uniforms: HashMap::new(),
            live_programs: BTreeSet::new(),
            live_shaders: BTreeSet::new(),
            probes: 0,
        })))
    }

    pub fn unavailable() -> Self {
        let backend = Self::new();
        backend.0.borrow_mut().available = false;
        backend
    }

    pub fn with_texture_units(units: u32) -> Self {
        let backend = Self::new();
        backend.0.borrow_mut().max_texture_units = units;
        backend
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.borrow().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.0.borrow_mut().calls.clear();
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.0.borrow().calls.iter().filter(|call| predicate(call)).count()
    }

    /// Uploads in call order, as `(location, upload)`.
    pub fn uploads(&self) -> Vec<(GLint, Upload)> {
        self.0
            .borrow()
            .calls
            .iter()
            .filter_map(|call| match call {
                Call::Upload(location, upload) => Some((*location, upload.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn location_queries(&self) -> usize {
        self.count(|call| matches!(call, Call::UniformLocation(..)))
    }

    pub fn live_programs(&self) -> Vec<GLuint> {
        self.0.borrow().live_programs.iter().copied().collect()
    }

    pub fn live_shaders(&self) -> Vec<GLuint> {
        self.0.borrow().live_shaders.iter().copied().collect()
    }

    pub fn set_current_program(&self, program: GLuint) {
        self.0.borrow_mut().current_program = program;
    }

    pub fn probes(&self) -> usize {
        self.0.borrow().probes
    }

    fn record(&self, call: Call) {
        self.0.borrow_mut().calls.push(call);
    }

    fn next_id(&self) -> GLuint {
        let mut state = self.0.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;
        id
    }
}

/// Names declared as `uniform <type> <name>;` or `uniform <type> <name>[N];`.
fn declared_uniforms(source: &str) -> Vec<String> {
    source
        .lines()
        .filter_map(|line| line.trim().strip_prefix("uniform "))
        .filter_map(|rest| rest.trim_end_matches(';').split_whitespace().last())
        .map(|name| name.split('[').next().unwrap_or(name).to_string())
        .collect()
}

impl Backend for MockBackend {
    fn shaders_available(&self) -> bool {
        let mut state = self.0.borrow_mut();
        state.probes += 1;
        state.available
    }

    fn max_texture_units(&self) -> u32 {
        self.0.borrow().max_texture_units
    }

    fn create_program(&self) -> GLuint {
        let id = self.next_id();
        let mut state = self.0.borrow_mut();
        state.live_programs.insert(id);
        state.calls.push(Call::CreateProgram(id));
        id
    }

    fn delete_program(&self, program: GLuint) {
        let mut state = self.0.borrow_mut();
        state.live_programs.remove(&program);
        state.calls.push(Call::DeleteProgram(program));
    }

    fn create_shader(&self, stage: Stage) -> GLuint {
        let id = self.next_id();
        let mut state = self.0.borrow_mut();
        state.live_shaders.insert(id);
        state.calls.push(Call::CreateShader(stage, id));
        id
    }

    fn delete_shader(&self, shader: GLuint) {
        let mut state = self.0.borrow_mut();
        state.live_shaders.remove(&shader);
        state.calls.push(Call::DeleteShader(shader));
    }

    fn compile_shader(&self, shader: GLuint, source: &CStr) -> Result<(), String> {
        let source = source.to_string_lossy().into_owned();
        self.record(Call::CompileShader(shader));
        if source.contains("COMPILE_ERROR") {
            return Err(format!("0:1(1): error: syntax error in shader {shader}"));
        }
        self.0.borrow_mut().sources.insert(shader, source);
        Ok(())
    }

    fn attach_shader(&self, program: GLuint, shader: GLuint) {
        let mut state = self.0.borrow_mut();
        state.attached.entry(program).or_default().push(shader);
        state.calls.push(Call::AttachShader(program, shader));
    }

    fn link_program(&self, program: GLuint) -> Result<(), String> {
        self.record(Call::LinkProgram(program));
        let mut state = self.0.borrow_mut();
        let sources: Vec<String> = state
            .attached
            .get(&program)
            .into_iter()
            .flatten()
            .filter_map(|shader| state.sources.get(shader).cloned())
            .collect();

        if sources.iter().any(|source| source.contains("LINK_ERROR")) {
            return Err(format!("error: program {program} failed to link"));
        }

        let uniforms = sources
            .iter()
            .flat_map(|source| declared_uniforms(source))
            .fold(Vec::new(), |mut names, name| {
                if !names.contains(&name) {
                    names.push(name);
                }
                names
            });
        state.linked_uniforms.insert(program, uniforms);
        Ok(())
    }

    fn uniform_location(&self, program: GLuint, name: &CStr) -> GLint {
        let name = name.to_string_lossy().into_owned();
        self.record(Call::UniformLocation(program, name.clone()));
        self.0
            .borrow()
            .linked_uniforms
            .get(&program)
            .and_then(|names| names.iter().position(|n| *n == name))
            .map_or(-1, |index| (program * 100) as GLint + index as GLint)
    }

    fn current_program(&self) -> GLuint {
        self.0.borrow().current_program
    }

    fn use_program(&self, program: GLuint) {
        let mut state = self.0.borrow_mut();
        state.current_program = program;
        state.calls.push(Call::UseProgram(program));
    }

    fn upload_uniform(&self, location: GLint, data: UniformData<'_>) {
        let upload = match data {
            UniformData::Floats { components, values } => {
                Upload::Floats(components, values.to_vec())
            }
            UniformData::Ints { components, values } => Upload::Ints(components, values.to_vec()),
            UniformData::Mat3(values) => Upload::Mat3(values.to_vec()),
            UniformData::Mat4(values) => Upload::Mat4(values.to_vec()),
        };
        self.record(Call::Upload(location, upload));
    }

    fn active_texture_unit(&self, unit: u32) {
        self.record(Call::ActiveTexture(unit));
    }

    fn flush(&self) {
        self.record(Call::Flush);
    }
}

/// Texture whose binds are recorded by the backend it was created with.
pub struct MockTexture {
    handle: GLuint,
    backend: MockBackend,
}

impl MockTexture {
    pub fn new(backend: &MockBackend, handle: GLuint) -> Self {
        Self {
            handle,
            backend: backend.clone(),
        }
    }
}

impl Texture for MockTexture {
    fn bind(&self) {
        self.backend.record(Call::BindTexture(self.handle));
    }

    fn native_handle(&self) -> GLuint {
        self.handle
    }
}
