use crate::foundation::error::{FxshotError, FxshotResult};

/// Premultiplied RGBA8 pixel buffer, row-major, tightly packed.
///
/// Every layer of the preview scene and every effect input/output is a `Surface` of the output
/// size.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Surface {
    /// Fully transparent surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; byte_len(width, height)],
        }
    }

    /// Surface filled with a single premultiplied color.
    pub fn filled(width: u32, height: u32, rgba_premul: [u8; 4]) -> Self {
        let mut s = Self::new(width, height);
        s.fill(rgba_premul);
        s
    }

    /// Wrap existing premultiplied bytes.
    pub fn from_premul(width: u32, height: u32, data: Vec<u8>) -> FxshotResult<Self> {
        if data.len() != byte_len(width, height) {
            return Err(FxshotError::render(format!(
                "surface byte len mismatch: expected {}x{}x4, got {}",
                width,
                height,
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Premultiplied bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub(crate) fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Row stride in bytes.
    pub fn stride(&self) -> usize {
        (self.width as usize) * 4
    }

    pub(crate) fn same_size(&self, other: &Surface) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Overwrite every pixel with `rgba_premul`.
    pub fn fill(&mut self, rgba_premul: [u8; 4]) {
        for px in self.data.chunks_exact_mut(4) {
            px.copy_from_slice(&rgba_premul);
        }
    }

    /// Pixel at integer coordinates; out-of-bounds reads are transparent.
    pub fn pixel(&self, x: i32, y: i32) -> [u8; 4] {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return [0, 0, 0, 0];
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ]
    }

    /// Pixel at integer coordinates clamped into the surface.
    pub(crate) fn pixel_clamped(&self, x: i32, y: i32) -> [u8; 4] {
        if self.width == 0 || self.height == 0 {
            return [0, 0, 0, 0];
        }
        self.pixel(
            x.clamp(0, self.width as i32 - 1),
            y.clamp(0, self.height as i32 - 1),
        )
    }

    /// Bilinear sample at continuous coordinates (pixel `i` spans `[i, i + 1)`).
    ///
    /// Returns premultiplied channels in `[0, 1]`; samples outside the surface fade to
    /// transparent.
    pub(crate) fn sample(&self, x: f32, y: f32) -> [f32; 4] {
        let tx = x - 0.5;
        let ty = y - 0.5;
        let x0 = tx.floor();
        let y0 = ty.floor();
        let fx = tx - x0;
        let fy = ty - y0;
        let (x0, y0) = (x0 as i32, y0 as i32);

        let p00 = self.pixel(x0, y0);
        let p10 = self.pixel(x0 + 1, y0);
        let p01 = self.pixel(x0, y0 + 1);
        let p11 = self.pixel(x0 + 1, y0 + 1);

        let mut out = [0f32; 4];
        for c in 0..4 {
            let top = f32::from(p00[c]) * (1.0 - fx) + f32::from(p10[c]) * fx;
            let bottom = f32::from(p01[c]) * (1.0 - fx) + f32::from(p11[c]) * fx;
            out[c] = (top * (1.0 - fy) + bottom * fy) / 255.0;
        }
        out
    }
}

fn byte_len(width: u32, height: u32) -> usize {
    (width as usize)
        .saturating_mul(height as usize)
        .saturating_mul(4)
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
