// ShaderKit
// Copyright (c) 2025 Harlen Batagelo
// https://github.com/hbatagelo/shaderkit
// SPDX-License-Identifier: GPL-3.0-or-later

use num_traits::AsPrimitive;

/// Defines a GLSL-style vector with `N` named components.
///
/// Generates the struct, a `new` constructor, conversions to and from
/// arrays and tuples, and a component-wise numeric `cast`.
macro_rules! glsl_vector {
    ($(#[$meta:meta])* $name:ident, $n:literal, $($field:ident),+) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Debug, Default, PartialEq)]
        pub struct $name<T> {
            $(pub $field: T,)+
        }

        impl<T> $name<T> {
            pub const fn new($($field: T),+) -> Self {
                Self { $($field),+ }
            }
        }

        impl<T: Copy> $name<T> {
            pub fn to_array(self) -> [T; $n] {
                [$(self.$field),+]
            }

            /// Component-wise `as` conversion.
            pub fn cast<U>(self) -> $name<U>
            where
                T: AsPrimitive<U>,
                U: Copy + 'static,
            {
                $name { $($field: self.$field.as_()),+ }
            }
        }

        impl<T> From<[T; $n]> for $name<T> {
            fn from([$($field),+]: [T; $n]) -> Self {
                Self { $($field),+ }
            }
        }

        impl<T: Copy> From<$name<T>> for [T; $n] {
            fn from(vector: $name<T>) -> Self {
                vector.to_array()
            }
        }

        impl<T> From<glsl_vector!(@tuple T, $($field),+)> for $name<T> {
            fn from(($($field),+): glsl_vector!(@tuple T, $($field),+)) -> Self {
                Self { $($field),+ }
            }
        }
    };

    (@tuple $t:ident, $($field:ident),+) => {
        ($(glsl_vector!(@ty $t, $field)),+)
    };

    (@ty $t:ident, $field:ident) => {
        $t
    };
}

glsl_vector!(
    /// 2-component vector (`vec2`, `ivec2`, `bvec2`).
    GenericVec2, 2, x, y
);
glsl_vector!(
    /// 3-component vector (`vec3`, `ivec3`, `bvec3`).
    GenericVec3, 3, x, y, z
);
glsl_vector!(
    /// 4-component vector (`vec4`, `ivec4`, `bvec4`).
    GenericVec4, 4, x, y, z, w
);
