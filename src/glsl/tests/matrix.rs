use pretty_assertions::assert_eq;

use super::super::*;
use crate::Transform;

#[test]
fn test_default_is_identity() {
    assert_eq!(Mat3::default(), Mat3::IDENTITY);
    assert_eq!(Mat4::default().array[5], 1.);
    assert_eq!(Mat4::default().array[1], 0.);
}

#[test]
fn test_mat4_from_transform() {
    let transform = Transform::translation(2., 3.);
    assert_eq!(Mat4::from(&transform).array, *transform.matrix());
}

#[test]
fn test_mat3_from_transform() {
    let transform = Transform::new(1., 2., 3., 4., 5., 6., 0., 0., 1.);
    #[rustfmt::skip]
    let expected = [
        1., 4., 0.,
        2., 5., 0.,
        3., 6., 1.,
    ];
    assert_eq!(Mat3::from(&transform).array, expected);
}
