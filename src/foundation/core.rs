use crate::foundation::error::{FxshotError, FxshotResult};

pub use kurbo::{Affine, Point};

/// Border drawn around presented images; its color also clears the stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Border {
    /// `0xRRGGBB` color.
    pub color: u32,
    /// Border width in pixels.
    pub width: u32,
}

impl Default for Border {
    fn default() -> Self {
        Self {
            color: 0xffffff,
            width: 10,
        }
    }
}

/// Fixed output geometry for a whole run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct OutputGeometry {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Border color and width.
    pub border: Border,
}

impl Default for OutputGeometry {
    fn default() -> Self {
        Self {
            width: 280,
            height: 140,
            border: Border::default(),
        }
    }
}

impl OutputGeometry {
    /// Validate that the geometry describes a drawable surface.
    pub fn validate(&self) -> FxshotResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(FxshotError::validation(
                "output width and height must be > 0",
            ));
        }
        if self.border.color > 0xff_ffff {
            return Err(FxshotError::validation("border color must be 0xRRGGBB"));
        }
        Ok(())
    }

    /// Byte length of one RGBA8 frame at this geometry.
    pub fn frame_byte_len(&self) -> usize {
        (self.width as usize)
            .saturating_mul(self.height as usize)
            .saturating_mul(4)
    }

    /// Opaque clear color of the stage as RGBA8.
    pub fn clear_rgba(&self) -> [u8; 4] {
        let [r, g, b] = rgb_from_hex(self.border.color);
        [r, g, b, 255]
    }
}

/// Native size of the scene source artwork.
///
/// Only used once, to derive the uniform scale applied to the scene sprites.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SourceSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Default for SourceSize {
    fn default() -> Self {
        Self {
            width: 640,
            height: 320,
        }
    }
}

impl SourceSize {
    /// Uniform scale that maps the source width onto the output width.
    pub fn scale_to(&self, output: &OutputGeometry) -> f64 {
        if self.width == 0 {
            return 1.0;
        }
        f64::from(output.width) / f64::from(self.width)
    }
}

/// Split a `0xRRGGBB` value into channels.
pub fn rgb_from_hex(hex: u32) -> [u8; 3] {
    [
        ((hex >> 16) & 0xff) as u8,
        ((hex >> 8) & 0xff) as u8,
        (hex & 0xff) as u8,
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
