//! Stylizing effects: noise, pixelation, halftone, emboss, convolution, outline and shadow.

use serde_json::Value;

use crate::effects::catalog::EffectKind;
use crate::effects::effect::Effect;
use crate::effects::kernel::{
    MAX_BLUR_STRENGTH, blur_separable, from_unit, gaussian_for_sigma, map_coords, premul, to_unit,
    unpremul,
};
use crate::effects::params::{
    ParamKind, ParamSpec, boolean, color, number, number_array, point, unknown_param,
};
use crate::foundation::error::FxshotResult;
use crate::foundation::math::hash_unit;
use crate::render::composite::over;
use crate::render::surface::Surface;

/// Adds deterministic per-pixel luminance noise.
#[derive(Clone, Debug, PartialEq)]
pub struct NoiseFilter {
    /// Noise amplitude in `[0, 1]`.
    pub noise: f32,
    /// Seed of the noise pattern.
    pub seed: f32,
}

impl NoiseFilter {
    pub(crate) const PARAMS: &[ParamSpec] = &[
        ParamSpec::new("noise", ParamKind::Number),
        ParamSpec::new("seed", ParamKind::Number),
    ];
    pub(crate) const CTOR: &[&str] = &["noise", "seed"];
}

impl Default for NoiseFilter {
    fn default() -> Self {
        Self {
            noise: 0.5,
            seed: 0.5,
        }
    }
}

impl Effect for NoiseFilter {
    fn kind(&self) -> EffectKind {
        EffectKind::Noise
    }

    fn set_param(&mut self, name: &str, value: &Value) -> FxshotResult<()> {
        match name {
            "noise" => self.noise = number(name, value)?.clamp(0.0, 1.0),
            "seed" => self.seed = number(name, value)?,
            _ => return Err(unknown_param(self.kind().name(), name)),
        }
        Ok(())
    }

    fn apply(&self, input: &Surface, output: &mut Surface) -> FxshotResult<()> {
        let seed = u64::from(self.seed.to_bits());
        let amount = self.noise;
        map_coords(input, output, |x, y| {
            let px = input.pixel(x as i32, y as i32);
            if px[3] == 0 || amount <= 0.0 {
                return px;
            }
            let diff = (hash_unit(seed, x, y) - 0.5) * amount;
            let [r, g, b, a] = unpremul(to_unit(px));
            from_unit(premul([r + diff, g + diff, b + diff, a]))
        })
    }
}

/// Snaps every pixel to the top-left sample of its block.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelateFilter {
    /// Block size in pixels per axis.
    pub size: [f32; 2],
}

impl PixelateFilter {
    pub(crate) const PARAMS: &[ParamSpec] = &[ParamSpec::new("size", ParamKind::Point)];
    pub(crate) const CTOR: &[&str] = &["size"];
}

impl Default for PixelateFilter {
    fn default() -> Self {
        Self { size: [10.0, 10.0] }
    }
}

impl Effect for PixelateFilter {
    fn kind(&self) -> EffectKind {
        EffectKind::Pixelate
    }

    fn set_param(&mut self, name: &str, value: &Value) -> FxshotResult<()> {
        match name {
            "size" => self.size = point(name, value)?.map(|v| v.max(1.0)),
            _ => return Err(unknown_param(self.kind().name(), name)),
        }
        Ok(())
    }

    fn apply(&self, input: &Surface, output: &mut Surface) -> FxshotResult<()> {
        let [bw, bh] = self.size;
        map_coords(input, output, |x, y| {
            let sx = ((x as f32 / bw).floor() * bw) as i32;
            let sy = ((y as f32 / bh).floor() * bh) as i32;
            input.pixel(sx, sy)
        })
    }
}

/// Halftone dot screen.
#[derive(Clone, Debug, PartialEq)]
pub struct DotFilter {
    pub scale: f32,
    /// Screen angle in radians.
    pub angle: f32,
    pub grayscale: bool,
}

impl DotFilter {
    pub(crate) const PARAMS: &[ParamSpec] = &[
        ParamSpec::new("scale", ParamKind::Number),
        ParamSpec::new("angle", ParamKind::Number),
        ParamSpec::new("grayscale", ParamKind::Bool),
    ];
    pub(crate) const CTOR: &[&str] = &["scale", "angle", "grayscale"];
}

impl Default for DotFilter {
    fn default() -> Self {
        Self {
            scale: 1.0,
            angle: 5.0,
            grayscale: true,
        }
    }
}

impl Effect for DotFilter {
    fn kind(&self) -> EffectKind {
        EffectKind::Dot
    }

    fn set_param(&mut self, name: &str, value: &Value) -> FxshotResult<()> {
        match name {
            "scale" => self.scale = number(name, value)?,
            "angle" => self.angle = number(name, value)?,
            "grayscale" => self.grayscale = boolean(name, value)?,
            _ => return Err(unknown_param(self.kind().name(), name)),
        }
        Ok(())
    }

    fn apply(&self, input: &Surface, output: &mut Surface) -> FxshotResult<()> {
        let (s, c) = self.angle.sin_cos();
        let (scale, grayscale) = (self.scale, self.grayscale);
        map_coords(input, output, |x, y| {
            let [r, g, b, a] = unpremul(to_unit(input.pixel(x as i32, y as i32)));
            let (tx, ty) = (x as f32 + 0.5, y as f32 + 0.5);
            let px = (c * tx - s * ty) * scale;
            let py = (s * tx + c * ty) * scale;
            let pattern = px.sin() * py.sin() * 4.0;
            let rgb = if grayscale {
                let avg = (r + g + b) / 3.0;
                [avg; 3]
            } else {
                [r, g, b]
            };
            let v = rgb.map(|ch| ch * 10.0 - 5.0 + pattern);
            from_unit(premul([v[0], v[1], v[2], a]))
        })
    }
}

/// Gray relief from the diagonal gradient.
#[derive(Clone, Debug, PartialEq)]
pub struct EmbossFilter {
    pub strength: f32,
}

impl EmbossFilter {
    pub(crate) const PARAMS: &[ParamSpec] = &[ParamSpec::new("strength", ParamKind::Number)];
    pub(crate) const CTOR: &[&str] = &["strength"];
}

impl Default for EmbossFilter {
    fn default() -> Self {
        Self { strength: 5.0 }
    }
}

impl Effect for EmbossFilter {
    fn kind(&self) -> EffectKind {
        EffectKind::Emboss
    }

    fn set_param(&mut self, name: &str, value: &Value) -> FxshotResult<()> {
        match name {
            "strength" => self.strength = number(name, value)?,
            _ => return Err(unknown_param(self.kind().name(), name)),
        }
        Ok(())
    }

    fn apply(&self, input: &Surface, output: &mut Surface) -> FxshotResult<()> {
        let strength = self.strength;
        map_coords(input, output, |x, y| {
            let (x, y) = (x as i32, y as i32);
            let before = to_unit(input.pixel_clamped(x - 1, y - 1));
            let after = to_unit(input.pixel_clamped(x + 1, y + 1));
            let mut rgb = [0.5f32; 3];
            for c in 0..3 {
                rgb[c] += (after[c] - before[c]) * strength;
            }
            let gray = (rgb[0] + rgb[1] + rgb[2]) / 3.0;
            let a = to_unit(input.pixel(x, y))[3];
            from_unit(premul([gray, gray, gray, a]))
        })
    }
}

/// 3x3 convolution over premultiplied color; alpha comes from the center texel.
#[derive(Clone, Debug, PartialEq)]
pub struct ConvolutionFilter {
    pub matrix: [f32; 9],
    /// Texel grid width; `None` samples at one-pixel steps.
    pub width: Option<f32>,
    /// Texel grid height; `None` samples at one-pixel steps.
    pub height: Option<f32>,
}

impl ConvolutionFilter {
    pub(crate) const PARAMS: &[ParamSpec] = &[
        ParamSpec::new("matrix", ParamKind::NumberArray(9)),
        ParamSpec::new("width", ParamKind::Number),
        ParamSpec::new("height", ParamKind::Number),
    ];
    pub(crate) const CTOR: &[&str] = &["matrix", "width", "height"];
}

impl Default for ConvolutionFilter {
    fn default() -> Self {
        Self {
            matrix: [0.0; 9],
            width: None,
            height: None,
        }
    }
}

impl Effect for ConvolutionFilter {
    fn kind(&self) -> EffectKind {
        EffectKind::Convolution
    }

    fn set_param(&mut self, name: &str, value: &Value) -> FxshotResult<()> {
        match name {
            "matrix" => self.matrix = number_array::<9>(name, value)?,
            "width" => self.width = Some(number(name, value)?.max(1.0)),
            "height" => self.height = Some(number(name, value)?.max(1.0)),
            _ => return Err(unknown_param(self.kind().name(), name)),
        }
        Ok(())
    }

    fn apply(&self, input: &Surface, output: &mut Surface) -> FxshotResult<()> {
        let step_x = self
            .width
            .map_or(1.0, |w| input.width() as f32 / w);
        let step_y = self
            .height
            .map_or(1.0, |h| input.height() as f32 / h);
        let m = self.matrix;
        map_coords(input, output, |x, y| {
            let (cx, cy) = (x as f32 + 0.5, y as f32 + 0.5);
            let mut acc = [0f32; 3];
            for j in 0..3 {
                for i in 0..3 {
                    let s = input.sample(
                        cx + (i as f32 - 1.0) * step_x,
                        cy + (j as f32 - 1.0) * step_y,
                    );
                    let w = m[j * 3 + i];
                    for c in 0..3 {
                        acc[c] += s[c] * w;
                    }
                }
            }
            let a = to_unit(input.pixel(x as i32, y as i32))[3];
            from_unit([acc[0], acc[1], acc[2], a])
        })
    }
}

const OUTLINE_MIN_SAMPLES: f32 = 1.0;
const OUTLINE_MAX_SAMPLES: f32 = 100.0;

/// Draws a solid outline around opaque content.
#[derive(Clone, Debug, PartialEq)]
pub struct OutlineFilter {
    pub thickness: f32,
    pub color: [f32; 3],
    pub alpha: f32,
    /// Fraction of the maximum sample count used around the circle.
    pub quality: f32,
    /// Output only the outline, removing the content.
    pub knockout: bool,
}

impl OutlineFilter {
    pub(crate) const PARAMS: &[ParamSpec] = &[
        ParamSpec::new("thickness", ParamKind::Number),
        ParamSpec::new("color", ParamKind::Color),
        ParamSpec::new("alpha", ParamKind::Number),
        ParamSpec::new("quality", ParamKind::Number),
        ParamSpec::new("knockout", ParamKind::Bool),
    ];
    pub(crate) const CTOR: &[&str] = &["thickness", "color", "quality"];

    fn sample_offsets(&self) -> Vec<(f32, f32)> {
        let samples = (self.quality * OUTLINE_MAX_SAMPLES)
            .max(OUTLINE_MIN_SAMPLES)
            .round() as usize;
        let step = std::f32::consts::TAU / samples as f32;
        (0..samples)
            .map(|i| {
                let (s, c) = (step * i as f32).sin_cos();
                (c * self.thickness, s * self.thickness)
            })
            .collect()
    }
}

impl Default for OutlineFilter {
    fn default() -> Self {
        Self {
            thickness: 1.0,
            color: [0.0, 0.0, 0.0],
            alpha: 1.0,
            quality: 0.1,
            knockout: false,
        }
    }
}

impl Effect for OutlineFilter {
    fn kind(&self) -> EffectKind {
        EffectKind::Outline
    }

    fn set_param(&mut self, name: &str, value: &Value) -> FxshotResult<()> {
        match name {
            "thickness" => self.thickness = number(name, value)?.max(0.0),
            "color" => self.color = color(name, value)?,
            "alpha" => self.alpha = number(name, value)?.clamp(0.0, 1.0),
            "quality" => self.quality = number(name, value)?.clamp(0.0, 1.0),
            "knockout" => self.knockout = boolean(name, value)?,
            _ => return Err(unknown_param(self.kind().name(), name)),
        }
        Ok(())
    }

    fn apply(&self, input: &Surface, output: &mut Surface) -> FxshotResult<()> {
        let offsets = self.sample_offsets();
        let (tint, alpha, knockout) = (self.color, self.alpha, self.knockout);
        map_coords(input, output, |x, y| {
            let own = to_unit(input.pixel(x as i32, y as i32));
            let (cx, cy) = (x as f32 + 0.5, y as f32 + 0.5);
            let max_alpha = offsets
                .iter()
                .map(|(dx, dy)| input.sample(cx + dx, cy + dy)[3])
                .fold(0.0f32, f32::max);
            let outline_a = max_alpha * alpha * (1.0 - own[3]);
            let outline = [
                tint[0] * outline_a,
                tint[1] * outline_a,
                tint[2] * outline_a,
                outline_a,
            ];
            if knockout {
                return from_unit(outline);
            }
            from_unit([
                own[0] + outline[0],
                own[1] + outline[1],
                own[2] + outline[2],
                own[3] + outline[3],
            ])
        })
    }
}

/// Blurred, tinted copy of the layer's alpha drawn underneath it.
#[derive(Clone, Debug, PartialEq)]
pub struct DropShadowFilter {
    /// Shadow offset in pixels.
    pub offset: [f32; 2],
    pub color: [f32; 3],
    pub alpha: f32,
    /// Shadow blur strength in pixels.
    pub blur: f32,
    pub shadow_only: bool,
}

impl DropShadowFilter {
    pub(crate) const PARAMS: &[ParamSpec] = &[
        ParamSpec::new("offset", ParamKind::Point),
        ParamSpec::new("color", ParamKind::Color),
        ParamSpec::new("alpha", ParamKind::Number),
        ParamSpec::new("blur", ParamKind::Number).at_most(MAX_BLUR_STRENGTH),
        ParamSpec::new("shadowOnly", ParamKind::Bool),
    ];
    pub(crate) const CTOR: &[&str] = &["offset", "color", "alpha", "blur"];
}

impl Default for DropShadowFilter {
    fn default() -> Self {
        Self {
            offset: [4.0, 4.0],
            color: [0.0, 0.0, 0.0],
            alpha: 0.5,
            blur: 2.0,
            shadow_only: false,
        }
    }
}

impl Effect for DropShadowFilter {
    fn kind(&self) -> EffectKind {
        EffectKind::DropShadow
    }

    fn set_param(&mut self, name: &str, value: &Value) -> FxshotResult<()> {
        match name {
            "offset" => self.offset = point(name, value)?,
            "color" => self.color = color(name, value)?,
            "alpha" => self.alpha = number(name, value)?.clamp(0.0, 1.0),
            "blur" => self.blur = number(name, value)?.clamp(0.0, MAX_BLUR_STRENGTH as f32),
            "shadowOnly" => self.shadow_only = boolean(name, value)?,
            _ => return Err(unknown_param(self.kind().name(), name)),
        }
        Ok(())
    }

    fn apply(&self, input: &Surface, output: &mut Surface) -> FxshotResult<()> {
        let [ox, oy] = self.offset;
        let (tint, alpha) = (self.color, self.alpha);

        let mut shadow = Surface::new(input.width(), input.height());
        map_coords(input, &mut shadow, |x, y| {
            let a = input.sample(x as f32 + 0.5 - ox, y as f32 + 0.5 - oy)[3] * alpha;
            from_unit([tint[0] * a, tint[1] * a, tint[2] * a, a])
        })?;

        let k = gaussian_for_sigma(self.blur * 0.5)?;
        blur_separable(&shadow, output, &k, &k)?;
        if self.shadow_only {
            return Ok(());
        }

        for (d, s) in output
            .data_mut()
            .chunks_exact_mut(4)
            .zip(input.data().chunks_exact(4))
        {
            let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], 1.0);
            d.copy_from_slice(&out);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/effects/filters/stylize.rs"]
mod tests;
