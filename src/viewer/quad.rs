// ShaderKit
// Copyright (c) 2025 Harlen Batagelo
// https://github.com/hbatagelo/shaderkit
// SPDX-License-Identifier: GPL-3.0-or-later

use gl::types::*;
use std::os::raw::c_void;

type Position = [f32; 2];
type TexCoord = [f32; 2];

/// Vertex layout expected by the default vertex shader.
#[repr(C)]
struct Vertex(Position, TexCoord);

#[rustfmt::skip]
const VERTICES: [Vertex; 4] = [
    Vertex([-1., -1.], [0., 0.]),
    Vertex([ 1., -1.], [1., 0.]),
    Vertex([-1.,  1.], [0., 1.]),
    Vertex([ 1.,  1.], [1., 1.]),
];

/// Full-viewport quad drawn as a triangle strip.
pub struct Quad {
    vao: GLuint,
    vbo: GLuint,
}

impl Quad {
    pub fn new() -> Self {
        let (mut vao, mut vbo) = (0, 0);
        let stride = std::mem::size_of::<Vertex>() as GLsizei;
        let tex_coord_offset = std::mem::size_of::<Position>();

        unsafe {
            gl::GenVertexArrays(1, &mut vao);
            gl::BindVertexArray(vao);

            gl::GenBuffers(1, &mut vbo);
            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);
            gl::BufferData(
                gl::ARRAY_BUFFER,
                std::mem::size_of_val(&VERTICES) as GLsizeiptr,
                VERTICES.as_ptr() as *const c_void,
                gl::STATIC_DRAW,
            );

            gl::EnableVertexAttribArray(0);
            gl::VertexAttribPointer(0, 2, gl::FLOAT, gl::FALSE, stride, std::ptr::null());
            gl::EnableVertexAttribArray(1);
            gl::VertexAttribPointer(
                1,
                2,
                gl::FLOAT,
                gl::FALSE,
                stride,
                tex_coord_offset as *const c_void,
            );

            gl::BindVertexArray(0);
        }

        Self { vao, vbo }
    }

    pub fn draw(&self) {
        unsafe {
            gl::BindVertexArray(self.vao);
            gl::DrawArrays(gl::TRIANGLE_STRIP, 0, VERTICES.len() as GLsizei);
            gl::BindVertexArray(0);
        }
    }
}

impl Drop for Quad {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteBuffers(1, &self.vbo);
            gl::DeleteVertexArrays(1, &self.vao);
        }
    }
}
