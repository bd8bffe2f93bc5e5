use pretty_assertions::assert_eq;

use super::super::gl_backend::*;

#[test]
fn test_parse_desktop_version() {
    assert_eq!(parse_gl_version("4.6.0 NVIDIA 550.54.14"), Some((4, 6)));
    assert_eq!(parse_gl_version("3.3 (Core Profile) Mesa 24.0.5"), Some((3, 3)));
    assert_eq!(parse_gl_version("1.4"), Some((1, 4)));
}

#[test]
fn test_parse_es_version() {
    assert_eq!(parse_gl_version("OpenGL ES 3.2 Mesa 24.0.5"), Some((3, 2)));
}

#[test]
fn test_parse_malformed_version() {
    assert_eq!(parse_gl_version(""), None);
    assert_eq!(parse_gl_version("Mesa"), None);
    assert_eq!(parse_gl_version("4"), None);
}

#[test]
fn test_shader_extensions() {
    let legacy = "GL_ARB_multitexture GL_ARB_shader_objects GL_EXT_bgra \
                  GL_ARB_vertex_shader GL_ARB_fragment_shader";
    assert!(has_shader_extensions(legacy));

    let fixed_function = "GL_ARB_multitexture GL_EXT_bgra GL_ARB_vertex_shader";
    assert!(!has_shader_extensions(fixed_function));
    assert!(!has_shader_extensions(""));
}

#[test]
fn test_extension_names_match_exactly() {
    let suffixed = "GL_ARB_multitexture GL_ARB_shader_objects_extra \
                    GL_ARB_vertex_shader GL_ARB_fragment_shader";
    assert!(!has_shader_extensions(suffixed));
}
