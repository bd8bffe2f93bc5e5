use pretty_assertions::assert_eq;
use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};

use super::super::*;
use crate::backend::mock::{Call, MockBackend};

const VERTEX: &str = "uniform mat4 projection;\nvoid main() {}";
const FRAGMENT: &str = "uniform float time;\nvoid main() {}";

struct FailingReader;

impl Read for FailingReader {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
    }
}

/// Writes `contents` to a fresh file in the temporary directory.
fn temp_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("shaderkit-{}-{name}", std::process::id()));
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_load_from_memory_single_stage() {
    let backend = MockBackend::new();
    let mut shader = Shader::with_backend(backend.clone());

    shader.load_from_memory(VERTEX, Stage::Vertex).unwrap();

    assert_eq!(
        backend.count(|call| matches!(call, Call::CreateShader(Stage::Vertex, _))),
        1
    );
    assert_eq!(
        backend.count(|call| matches!(call, Call::CreateShader(Stage::Fragment, _))),
        0
    );
}

#[test]
fn test_load_from_memory_pair() {
    let backend = MockBackend::new();
    let mut shader = Shader::with_backend(backend.clone());

    shader.load_from_memory_pair(VERTEX, FRAGMENT).unwrap();

    assert_eq!(backend.count(|call| matches!(call, Call::CreateShader(..))), 2);
    assert!(shader.is_loaded());
}

#[test]
fn test_load_from_files() {
    let vertex = temp_file("files.vert", VERTEX);
    let fragment = temp_file("files.frag", FRAGMENT);
    let backend = MockBackend::new();
    let mut shader = Shader::with_backend(backend.clone());

    shader.load_from_files(&vertex, &fragment).unwrap();
    shader.set_uniform_float("time", 1.);

    assert_eq!(backend.uploads().len(), 1);
    fs::remove_file(vertex).unwrap();
    fs::remove_file(fragment).unwrap();
}

#[test]
fn test_load_from_file_single_stage() {
    let fragment = temp_file("single.frag", FRAGMENT);
    let backend = MockBackend::new();
    let mut shader = Shader::with_backend(backend.clone());

    shader.load_from_file(&fragment, Stage::Fragment).unwrap();

    assert_eq!(shader.native_handle(), 1);
    fs::remove_file(fragment).unwrap();
}

#[test]
fn test_missing_file_discards_previous_program() {
    let backend = MockBackend::new();
    let mut shader = Shader::with_backend(backend.clone());
    shader.load_from_memory(FRAGMENT, Stage::Fragment).unwrap();
    let missing = std::env::temp_dir().join("shaderkit-does-not-exist.frag");

    let result = shader.load_from_file(&missing, Stage::Fragment);

    match result {
        Err(ShaderError::Io { stage, path, source }) => {
            assert_eq!(stage, Stage::Fragment);
            assert_eq!(path, missing);
            assert_eq!(source.kind(), io::ErrorKind::NotFound);
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(!shader.is_loaded());
    assert!(backend.live_programs().is_empty());
}

#[test]
fn test_load_from_streams() {
    let backend = MockBackend::new();
    let mut shader = Shader::with_backend(backend.clone());

    shader
        .load_from_streams(VERTEX.as_bytes(), FRAGMENT.as_bytes())
        .unwrap();

    assert!(shader.is_loaded());
}

#[test]
fn test_failing_stream() {
    let backend = MockBackend::new();
    let mut shader = Shader::with_backend(backend.clone());

    let result = shader.load_from_streams(VERTEX.as_bytes(), FailingReader);

    assert!(matches!(
        result,
        Err(ShaderError::Stream {
            stage: Stage::Fragment,
            ..
        })
    ));
    assert!(backend.calls().is_empty());
}

#[test]
fn test_stream_must_be_utf8() {
    let backend = MockBackend::new();
    let mut shader = Shader::with_backend(backend.clone());

    let result = shader.load_from_stream(&[0xff, 0xfe, 0x00][..], Stage::Vertex);

    match result {
        Err(ShaderError::Stream { source, .. }) => {
            assert_eq!(source.kind(), io::ErrorKind::InvalidData)
        }
        other => panic!("unexpected result: {other:?}"),
    }
}
