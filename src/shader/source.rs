// ShaderKit
// Copyright (c) 2025 Harlen Batagelo
// https://github.com/hbatagelo/shaderkit
// SPDX-License-Identifier: GPL-3.0-or-later

use std::{fs, io::Read, path::Path};

use super::{Shader, ShaderError, Stage};
use crate::backend::Backend;

fn read_file(path: &Path, stage: Stage) -> Result<String, ShaderError> {
    fs::read_to_string(path).map_err(|source| ShaderError::Io {
        stage,
        path: path.to_path_buf(),
        source,
    })
}

fn read_stream(reader: &mut impl Read, stage: Stage) -> Result<String, ShaderError> {
    let mut source = String::new();
    reader
        .read_to_string(&mut source)
        .map_err(|source| ShaderError::Stream { stage, source })?;
    Ok(source)
}

fn split_stage(source: &str, stage: Stage) -> (Option<&str>, Option<&str>) {
    match stage {
        Stage::Vertex => (Some(source), None),
        Stage::Fragment => (None, Some(source)),
    }
}

impl<B: Backend> Shader<'_, B> {
    /// Loads a program made of a single stage.
    pub fn load_from_memory(&mut self, source: &str, stage: Stage) -> Result<(), ShaderError> {
        let (vertex, fragment) = split_stage(source, stage);
        self.load_from_sources(vertex, fragment)
    }

    pub fn load_from_memory_pair(&mut self, vertex: &str, fragment: &str) -> Result<(), ShaderError> {
        self.load_from_sources(Some(vertex), Some(fragment))
    }

    /// Loads a single-stage program from a UTF-8 text file.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>, stage: Stage) -> Result<(), ShaderError> {
        let source = self.read_or_discard(|| read_file(path.as_ref(), stage))?;
        self.load_from_memory(&source, stage)
    }

    pub fn load_from_files(
        &mut self,
        vertex_path: impl AsRef<Path>,
        fragment_path: impl AsRef<Path>,
    ) -> Result<(), ShaderError> {
        let vertex = self.read_or_discard(|| read_file(vertex_path.as_ref(), Stage::Vertex))?;
        let fragment =
            self.read_or_discard(|| read_file(fragment_path.as_ref(), Stage::Fragment))?;
        self.load_from_memory_pair(&vertex, &fragment)
    }

    /// Loads a single-stage program from everything `reader` yields.
    pub fn load_from_stream(&mut self, mut reader: impl Read, stage: Stage) -> Result<(), ShaderError> {
        let source = self.read_or_discard(|| read_stream(&mut reader, stage))?;
        self.load_from_memory(&source, stage)
    }

    pub fn load_from_streams(
        &mut self,
        mut vertex_reader: impl Read,
        mut fragment_reader: impl Read,
    ) -> Result<(), ShaderError> {
        let vertex = self.read_or_discard(|| read_stream(&mut vertex_reader, Stage::Vertex))?;
        let fragment =
            self.read_or_discard(|| read_stream(&mut fragment_reader, Stage::Fragment))?;
        self.load_from_memory_pair(&vertex, &fragment)
    }

    /// Runs `read`, leaving the shader without a program if it fails.
    fn read_or_discard(
        &mut self,
        read: impl FnOnce() -> Result<String, ShaderError>,
    ) -> Result<String, ShaderError> {
        read().inspect_err(|err| {
            self.discard();
            log::error!("{err}");
        })
    }
}
