use std::sync::Arc;

use anyhow::Context;

use crate::foundation::core::{Affine, Point};
use crate::foundation::error::{FxshotError, FxshotResult};
use crate::render::composite::{over, premultiply_rgba8_in_place};
use crate::render::surface::Surface;

/// How texture coordinates outside `[0, 1]` are resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Wrap {
    /// Clamp to the edge texel.
    Clamp,
    /// Tile the texture.
    Repeat,
}

/// Texel filtering mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sampling {
    /// Nearest texel.
    Nearest,
    /// Bilinear interpolation of the four closest texels.
    Linear,
}

/// Immutable, cheaply cloneable premultiplied RGBA8 image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Texture {
    width: u32,
    height: u32,
    rgba8_premul: Arc<Vec<u8>>,
}

impl Texture {
    /// Wrap premultiplied bytes.
    pub fn from_premul(width: u32, height: u32, rgba8_premul: Vec<u8>) -> FxshotResult<Self> {
        let expected = (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4);
        if width == 0 || height == 0 || rgba8_premul.len() != expected {
            return Err(FxshotError::validation(format!(
                "texture bytes do not describe a {width}x{height} rgba8 image"
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        })
    }

    /// Premultiply straight-alpha bytes and wrap them.
    pub fn from_straight(width: u32, height: u32, mut rgba8: Vec<u8>) -> FxshotResult<Self> {
        premultiply_rgba8_in_place(&mut rgba8);
        Self::from_premul(width, height, rgba8)
    }

    /// Decode an encoded image (PNG, JPEG, ...) from memory.
    pub fn decode(bytes: &[u8]) -> FxshotResult<Self> {
        let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
        let rgba = dyn_img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::from_straight(width, height, rgba.into_raw())
    }

    /// Width in texels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in texels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Premultiplied bytes.
    pub fn data(&self) -> &[u8] {
        &self.rgba8_premul
    }

    fn texel(&self, x: i32, y: i32, wrap: Wrap) -> [u8; 4] {
        let (w, h) = (self.width as i32, self.height as i32);
        let (x, y) = match wrap {
            Wrap::Clamp => (x.clamp(0, w - 1), y.clamp(0, h - 1)),
            Wrap::Repeat => (x.rem_euclid(w), y.rem_euclid(h)),
        };
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let d = &self.rgba8_premul;
        [d[idx], d[idx + 1], d[idx + 2], d[idx + 3]]
    }

    /// Sample at texel-space coordinates (texel `i` spans `[i, i + 1)`).
    ///
    /// Returns premultiplied channels in `[0, 1]`.
    pub(crate) fn sample_texel(&self, x: f32, y: f32, wrap: Wrap, sampling: Sampling) -> [f32; 4] {
        let unit = |px: [u8; 4]| px.map(|c| f32::from(c) / 255.0);
        match sampling {
            Sampling::Nearest => unit(self.texel(x.floor() as i32, y.floor() as i32, wrap)),
            Sampling::Linear => {
                let tx = x - 0.5;
                let ty = y - 0.5;
                let x0 = tx.floor();
                let y0 = ty.floor();
                let fx = tx - x0;
                let fy = ty - y0;
                let (x0, y0) = (x0 as i32, y0 as i32);
                let p00 = unit(self.texel(x0, y0, wrap));
                let p10 = unit(self.texel(x0 + 1, y0, wrap));
                let p01 = unit(self.texel(x0, y0 + 1, wrap));
                let p11 = unit(self.texel(x0 + 1, y0 + 1, wrap));
                let mut out = [0f32; 4];
                for c in 0..4 {
                    let top = p00[c] * (1.0 - fx) + p10[c] * fx;
                    let bottom = p01[c] * (1.0 - fx) + p11[c] * fx;
                    out[c] = top * (1.0 - fy) + bottom * fy;
                }
                out
            }
        }
    }

    /// Sample at normalized `[0, 1]` coordinates.
    pub(crate) fn sample_uv(&self, u: f32, v: f32, wrap: Wrap, sampling: Sampling) -> [f32; 4] {
        self.sample_texel(
            u * self.width as f32,
            v * self.height as f32,
            wrap,
            sampling,
        )
    }
}

/// A texture placed in stage space by an affine transform.
#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    /// Source pixels.
    pub texture: Texture,
    /// Texture-to-stage transform.
    pub transform: Affine,
}

impl Sprite {
    /// Sprite at the stage origin with identity transform.
    pub fn new(texture: Texture) -> Self {
        Self {
            texture,
            transform: Affine::IDENTITY,
        }
    }

    /// Return the sprite uniformly scaled about the stage origin.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.transform = Affine::scale(scale) * self.transform;
        self
    }

    /// Sample the sprite at a stage-space position.
    pub(crate) fn sample_stage(&self, x: f64, y: f64, wrap: Wrap) -> [f32; 4] {
        let local = self.transform.inverse() * Point::new(x, y);
        self.texture
            .sample_texel(local.x as f32, local.y as f32, wrap, Sampling::Linear)
    }

    /// Draw the sprite over `dst` (source-over, bilinear sampling).
    pub fn draw_onto(&self, dst: &mut Surface) -> FxshotResult<()> {
        let det = self.transform.determinant();
        if !det.is_finite() || det.abs() < 1e-12 {
            return Err(FxshotError::render("sprite transform is not invertible"));
        }
        let inv = self.transform.inverse();
        let (tw, th) = (
            f64::from(self.texture.width),
            f64::from(self.texture.height),
        );
        let (w, h) = (dst.width(), dst.height());
        let stride = dst.stride();
        let data = dst.data_mut();
        for y in 0..h {
            for x in 0..w {
                let local = inv * Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
                if local.x < 0.0 || local.y < 0.0 || local.x >= tw || local.y >= th {
                    continue;
                }
                let s = self.texture.sample_texel(
                    local.x as f32,
                    local.y as f32,
                    Wrap::Clamp,
                    Sampling::Linear,
                );
                let src = crate::effects::kernel::from_unit(s);
                let idx = (y as usize) * stride + (x as usize) * 4;
                let d = [data[idx], data[idx + 1], data[idx + 2], data[idx + 3]];
                data[idx..idx + 4].copy_from_slice(&over(d, src, 1.0));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/texture.rs"]
mod tests;
