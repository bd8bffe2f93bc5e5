// ShaderKit
// Copyright (c) 2025 Harlen Batagelo
// https://github.com/hbatagelo/shaderkit
// SPDX-License-Identifier: GPL-3.0-or-later

use gl::types::*;
use image::*;
use std::path::Path;

/// Image-backed `GL_TEXTURE_2D`, deleted on drop.
pub struct GlTexture {
    id: GLuint,
    width: u32,
    height: u32,
}

impl GlTexture {
    /// Loads an image file, flipped so that its first row is at `v = 1`.
    pub fn from_file(path: &Path) -> ImageResult<Self> {
        let img = image::open(path)?;
        Ok(Self::from_image(&img.flipv()))
    }

    pub fn from_image(img: &DynamicImage) -> Self {
        let (width, height) = img.dimensions();
        if img.color() == ColorType::L8 {
            Self::define(gl::R8, gl::RED, width, height, img.to_luma8().as_raw())
        } else if img.color().has_alpha() {
            Self::define(gl::RGBA8, gl::RGBA, width, height, img.to_rgba8().as_raw())
        } else {
            Self::define(gl::RGB8, gl::RGB, width, height, img.to_rgb8().as_raw())
        }
    }

    /// 8×8 gray checkerboard, used when no image is given.
    pub fn checkerboard() -> Self {
        const CELLS: u32 = 8;
        let img = RgbImage::from_fn(CELLS, CELLS, |x, y| {
            if (x + y) % 2 == 0 {
                Rgb([200, 200, 200])
            } else {
                Rgb([90, 90, 90])
            }
        });
        Self::define(gl::RGB8, gl::RGB, CELLS, CELLS, img.as_raw())
    }

    fn define(internal_format: GLenum, format: GLenum, width: u32, height: u32, data: &[u8]) -> Self {
        let mut id = 0;
        unsafe {
            gl::GenTextures(1, &mut id);
            gl::BindTexture(gl::TEXTURE_2D, id);
            gl::PixelStorei(gl::UNPACK_ALIGNMENT, 1);
            gl::TexStorage2D(gl::TEXTURE_2D, 1, internal_format, width as i32, height as i32);
            gl::TexSubImage2D(
                gl::TEXTURE_2D,
                0,
                0,
                0,
                width as i32,
                height as i32,
                format,
                gl::UNSIGNED_BYTE,
                data.as_ptr() as *const _,
            );
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, gl::LINEAR as GLint);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, gl::LINEAR as GLint);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, gl::REPEAT as GLint);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, gl::REPEAT as GLint);
        }
        Self { id, width, height }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl shaderkit::Texture for GlTexture {
    fn bind(&self) {
        unsafe { gl::BindTexture(gl::TEXTURE_2D, self.id) };
    }

    fn native_handle(&self) -> GLuint {
        self.id
    }
}

impl Drop for GlTexture {
    fn drop(&mut self) {
        unsafe { gl::DeleteTextures(1, &self.id) };
    }
}
