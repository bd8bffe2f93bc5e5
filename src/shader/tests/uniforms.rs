use pretty_assertions::assert_eq;

use super::super::*;
use crate::{
    backend::mock::{Call, MockBackend, Upload},
    glsl::*,
    Color, Transform,
};

const FRAGMENT: &str = "\
uniform float time;
uniform vec4 tint;
uniform bool enabled;
uniform bvec3 mask;
uniform ivec2 cell;
uniform mat3 normal;
uniform mat4 model;
uniform vec2 points[4];
uniform mat3 bones[2];
void main() {}";

fn loaded(backend: &MockBackend) -> Shader<'static, MockBackend> {
    let mut shader = Shader::with_backend(backend.clone());
    shader.load_from_sources(None, Some(FRAGMENT)).unwrap();
    backend.clear_calls();
    shader
}

#[test]
fn test_upload_binds_and_restores_program() {
    let backend = MockBackend::new();
    let mut shader = loaded(&backend);

    shader.set_uniform_float("time", 0.5);

    assert_eq!(
        backend.calls(),
        vec![
            Call::UniformLocation(1, "time".to_string()),
            Call::UseProgram(1),
            Call::Upload(100, Upload::Floats(1, vec![0.5])),
            Call::UseProgram(0),
        ]
    );
}

#[test]
fn test_upload_restores_other_program() {
    let backend = MockBackend::new();
    let mut shader = loaded(&backend);
    backend.set_current_program(42);

    shader.set_uniform_float("time", 0.5);

    assert_eq!(
        backend.calls()[1..].to_vec(),
        vec![
            Call::UseProgram(1),
            Call::Upload(100, Upload::Floats(1, vec![0.5])),
            Call::UseProgram(42),
        ]
    );
}

#[test]
fn test_upload_to_current_program_keeps_it_current() {
    let backend = MockBackend::new();
    let mut shader = loaded(&backend);
    backend.set_current_program(1);

    shader.set_uniform_float("time", 0.5);

    assert_eq!(backend.count(|call| matches!(call, Call::UseProgram(_))), 0);
    assert_eq!(backend.uploads().len(), 1);
}

#[test]
fn test_color_is_normalized() {
    let backend = MockBackend::new();
    let mut shader = loaded(&backend);

    shader.set_uniform_color("tint", Color::new(255, 128, 0, 255));

    assert_eq!(
        backend.uploads(),
        vec![(101, Upload::Floats(4, vec![1., 128. / 255., 0., 1.]))]
    );
}

#[test]
fn test_vec4_upload() {
    let backend = MockBackend::new();
    let mut shader = loaded(&backend);

    shader.set_uniform_vec4("tint", Vec4::new(0.1, 0.2, 0.3, 0.4));

    assert_eq!(
        backend.uploads(),
        vec![(101, Upload::Floats(4, vec![0.1, 0.2, 0.3, 0.4]))]
    );
}

#[test]
fn test_booleans_upload_as_ints() {
    let backend = MockBackend::new();
    let mut shader = loaded(&backend);

    shader.set_uniform_bool("enabled", true);
    shader.set_uniform_bvec3("mask", Bvec3::new(true, false, true));
    shader.set_uniform_ivec2("cell", Ivec2::new(-3, 4));

    assert_eq!(
        backend.uploads(),
        vec![
            (102, Upload::Ints(1, vec![1])),
            (103, Upload::Ints(3, vec![1, 0, 1])),
            (104, Upload::Ints(2, vec![-3, 4])),
        ]
    );
}

#[test]
fn test_matrices() {
    let backend = MockBackend::new();
    let mut shader = loaded(&backend);
    let transform = Transform::translation(2., 3.);

    shader.set_uniform_mat3("normal", &Mat3::IDENTITY);
    shader.set_uniform_mat4_raw("model", &Mat4::IDENTITY.array);
    shader.set_uniform_mat4_transform("model", &transform);

    assert_eq!(
        backend.uploads(),
        vec![
            (105, Upload::Mat3(Mat3::IDENTITY.array.to_vec())),
            (106, Upload::Mat4(Mat4::IDENTITY.array.to_vec())),
            (106, Upload::Mat4(transform.matrix().to_vec())),
        ]
    );
}

#[test]
fn test_arrays_are_flattened() {
    let backend = MockBackend::new();
    let mut shader = loaded(&backend);

    shader.set_uniform_vec2_array("points", &[Vec2::new(1., 2.), Vec2::new(3., 4.)]);
    shader.set_uniform_mat3_array("bones", &[Mat3::IDENTITY, Mat3::IDENTITY]);

    let uploads = backend.uploads();
    assert_eq!(uploads[0], (107, Upload::Floats(2, vec![1., 2., 3., 4.])));
    match &uploads[1] {
        (108, Upload::Mat3(values)) => assert_eq!(values.len(), 18),
        other => panic!("unexpected upload: {other:?}"),
    }
}

#[test]
fn test_empty_array_is_no_op() {
    let backend = MockBackend::new();
    let mut shader = loaded(&backend);

    shader.set_uniform_float_array("points", &[]);
    shader.set_uniform_vec4_array("points", &[]);
    shader.set_uniform_mat4_array("bones", &[]);

    assert!(backend.calls().is_empty());
}

#[test]
fn test_absent_shader_is_no_op() {
    let backend = MockBackend::new();
    let mut shader = Shader::with_backend(backend.clone());

    shader.set_uniform_float("time", 1.);
    shader.set_uniform_color("tint", Color::WHITE);
    shader.set_uniform_current_texture("base");

    assert!(backend.calls().is_empty());
}
