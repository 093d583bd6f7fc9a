use std::io::Cursor;

use anyhow::Context;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::foundation::error::{FxshotError, FxshotResult};
use crate::render::composite::unpremultiply_rgba8_in_place;
use crate::render::surface::Surface;
use crate::scene::preview::PreviewScene;

/// A rendered frame as RGBA8 pixels.
///
/// Renderers produce premultiplied frames; the frame store keeps straight alpha. The
/// `premultiplied` flag makes the convention explicit at API boundaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Wrap a premultiplied surface.
    pub fn from_surface(surface: Surface) -> Self {
        Self {
            width: surface.width(),
            height: surface.height(),
            data: surface.into_data(),
            premultiplied: true,
        }
    }

    /// Convert to straight alpha in place; no-op when already straight.
    pub fn into_straight(mut self) -> Self {
        if self.premultiplied {
            unpremultiply_rgba8_in_place(&mut self.data);
            self.premultiplied = false;
        }
        self
    }

    /// Encode as PNG. PNG stores straight alpha, so premultiplied frames are converted first.
    pub fn encode_png(&self) -> FxshotResult<EncodedImage> {
        let straight = self.clone().into_straight();
        let img = image::RgbaImage::from_raw(straight.width, straight.height, straight.data)
            .ok_or_else(|| FxshotError::capture("frame bytes do not match its dimensions"))?;
        let mut png = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .context("encode frame as png")?;
        Ok(EncodedImage {
            width: self.width,
            height: self.height,
            png,
        })
    }
}

/// An encoded, displayable capture.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedImage {
    pub width: u32,
    pub height: u32,
    /// PNG file bytes.
    pub png: Vec<u8>,
}

impl EncodedImage {
    /// Base64 of the PNG bytes.
    pub fn base64(&self) -> String {
        STANDARD.encode(&self.png)
    }

    /// `data:image/png;base64,...` URL.
    pub fn data_url(&self) -> String {
        format!("data:image/png;base64,{}", self.base64())
    }
}

/// Renders a [`PreviewScene`] and reads the result back.
///
/// `render` is synchronous: once it returns, both extraction methods observe that render until
/// the next call.
pub trait Renderer {
    /// Render the scene with its currently attached effects.
    fn render(&mut self, scene: &PreviewScene) -> FxshotResult<()>;

    /// Encode the last render as a PNG.
    fn extract_image(&self) -> FxshotResult<EncodedImage>;

    /// Read back the last render as premultiplied RGBA.
    fn extract_pixels(&self) -> FxshotResult<FrameRGBA>;
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
