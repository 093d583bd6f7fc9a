//! Effects driven by shared scene textures rather than scalar parameters.

use serde_json::Value;

use crate::effects::catalog::EffectKind;
use crate::effects::effect::Effect;
use crate::effects::kernel::{from_unit, map_coords, map_pixels, premul, to_unit, unpremul};
use crate::effects::params::{ParamKind, ParamSpec, boolean, color, number, unknown_param};
use crate::foundation::error::{FxshotError, FxshotResult};
use crate::render::surface::Surface;
use crate::scene::texture::{Sampling, Texture, Wrap};

/// 3D color lookup through a strip of `size` slices, each `size x size` texels.
///
/// Blue selects the slice, red and green index inside it.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorMapFilter {
    pub color_map: Texture,
    /// Nearest-texel lookup instead of bilinear inside a slice.
    pub nearest: bool,
    /// Blend between the original (0) and mapped (1) color.
    pub mix: f32,
}

impl ColorMapFilter {
    pub(crate) const PARAMS: &[ParamSpec] = &[
        ParamSpec::new("nearest", ParamKind::Bool),
        ParamSpec::new("mix", ParamKind::Number),
    ];

    /// Build from a lookup strip whose width is a multiple of its height.
    pub fn new(color_map: Texture, nearest: bool) -> FxshotResult<Self> {
        if color_map.width() % color_map.height() != 0 {
            return Err(FxshotError::validation(format!(
                "color map {}x{} is not a strip of square slices",
                color_map.width(),
                color_map.height()
            )));
        }
        Ok(Self {
            color_map,
            nearest,
            mix: 1.0,
        })
    }

    fn lookup(&self, rgb: [f32; 3]) -> [f32; 3] {
        let size = self.color_map.height() as f32;
        let slices = (self.color_map.width() / self.color_map.height()) as f32;
        let inner = (slices - 1.0).max(0.0);
        let sampling = if self.nearest {
            Sampling::Nearest
        } else {
            Sampling::Linear
        };

        let z = rgb[2].clamp(0.0, 1.0) * inner;
        let z0 = z.floor().min(inner);
        let z1 = (z0 + 1.0).min(inner);
        let t = if self.nearest { 0.0 } else { z - z0 };

        let u = 0.5 + rgb[0].clamp(0.0, 1.0) * (size - 1.0);
        let v = 0.5 + rgb[1].clamp(0.0, 1.0) * (size - 1.0);
        let s0 = unpremul(self.color_map.sample_texel(z0 * size + u, v, Wrap::Clamp, sampling));
        let s1 = unpremul(self.color_map.sample_texel(z1 * size + u, v, Wrap::Clamp, sampling));
        [
            s0[0] + (s1[0] - s0[0]) * t,
            s0[1] + (s1[1] - s0[1]) * t,
            s0[2] + (s1[2] - s0[2]) * t,
        ]
    }
}

impl Effect for ColorMapFilter {
    fn kind(&self) -> EffectKind {
        EffectKind::ColorMap
    }

    fn set_param(&mut self, name: &str, value: &Value) -> FxshotResult<()> {
        match name {
            "nearest" => self.nearest = boolean(name, value)?,
            "mix" => self.mix = number(name, value)?.clamp(0.0, 1.0),
            _ => return Err(unknown_param(self.kind().name(), name)),
        }
        Ok(())
    }

    fn apply(&self, input: &Surface, output: &mut Surface) -> FxshotResult<()> {
        let mix = self.mix;
        map_pixels(input, output, |px| {
            if px[3] == 0 {
                return px;
            }
            let [r, g, b, a] = unpremul(to_unit(px));
            let mapped = self.lookup([r, g, b]);
            from_unit(premul([
                r + (mapped[0] - r) * mix,
                g + (mapped[1] - g) * mix,
                b + (mapped[2] - b) * mix,
                a,
            ]))
        })
    }
}

/// Multiplies the layer by a lightmap stretched over it, plus an ambient color.
#[derive(Clone, Debug, PartialEq)]
pub struct SimpleLightmapFilter {
    pub light_map: Texture,
    /// Ambient light color.
    pub color: [f32; 3],
    /// Ambient light intensity.
    pub alpha: f32,
}

impl SimpleLightmapFilter {
    pub(crate) const PARAMS: &[ParamSpec] = &[
        ParamSpec::new("color", ParamKind::Color),
        ParamSpec::new("alpha", ParamKind::Number),
    ];

    /// Build from a lightmap texture with black ambient light.
    pub fn new(light_map: Texture) -> Self {
        Self {
            light_map,
            color: [0.0, 0.0, 0.0],
            alpha: 1.0,
        }
    }
}

impl Effect for SimpleLightmapFilter {
    fn kind(&self) -> EffectKind {
        EffectKind::SimpleLightmap
    }

    fn set_param(&mut self, name: &str, value: &Value) -> FxshotResult<()> {
        match name {
            "color" => self.color = color(name, value)?,
            "alpha" => self.alpha = number(name, value)?.clamp(0.0, 1.0),
            _ => return Err(unknown_param(self.kind().name(), name)),
        }
        Ok(())
    }

    fn apply(&self, input: &Surface, output: &mut Surface) -> FxshotResult<()> {
        let (w, h) = (input.width() as f32, input.height() as f32);
        let ambient = self.color.map(|c| c * self.alpha);
        map_coords(input, output, |x, y| {
            let src = to_unit(input.pixel(x as i32, y as i32));
            let u = (x as f32 + 0.5) / w;
            let v = (y as f32 + 0.5) / h;
            let light = unpremul(self.light_map.sample_uv(u, v, Wrap::Clamp, Sampling::Linear));
            let mut out = src;
            for c in 0..3 {
                out[c] = src[c] * (ambient[c] + light[c]);
            }
            from_unit(out)
        })
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/effects/filters/maps.rs"]
mod tests;
