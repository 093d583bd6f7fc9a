//! Blur family: gaussian, kawase and zoom blur.

use serde_json::Value;

use crate::effects::catalog::EffectKind;
use crate::effects::effect::Effect;
use crate::effects::kernel::{
    MAX_BLUR_STRENGTH, blur_separable, from_unit, gaussian_for_sigma, map_coords,
};
use crate::effects::params::{ParamKind, ParamSpec, number, point, unknown_param};
use crate::foundation::error::FxshotResult;
use crate::render::surface::Surface;

/// Separable gaussian blur.
///
/// `strength` is the blur extent in pixels (sigma = strength / 2). `quality` splits the blur
/// into that many passes whose combined sigma equals the requested one.
#[derive(Clone, Debug, PartialEq)]
pub struct BlurFilter {
    pub strength_x: f32,
    pub strength_y: f32,
    pub quality: u32,
}

impl BlurFilter {
    pub(crate) const PARAMS: &[ParamSpec] = &[
        ParamSpec::new("strength", ParamKind::Number).at_most(MAX_BLUR_STRENGTH),
        ParamSpec::new("strengthX", ParamKind::Number).at_most(MAX_BLUR_STRENGTH),
        ParamSpec::new("strengthY", ParamKind::Number).at_most(MAX_BLUR_STRENGTH),
        ParamSpec::new("blur", ParamKind::Number).at_most(MAX_BLUR_STRENGTH),
        ParamSpec::new("blurX", ParamKind::Number).at_most(MAX_BLUR_STRENGTH),
        ParamSpec::new("blurY", ParamKind::Number).at_most(MAX_BLUR_STRENGTH),
        ParamSpec::new("quality", ParamKind::Number),
    ];
    pub(crate) const CTOR: &[&str] = &["strength", "quality"];
}

impl Default for BlurFilter {
    fn default() -> Self {
        Self {
            strength_x: 8.0,
            strength_y: 8.0,
            quality: 4,
        }
    }
}

impl Effect for BlurFilter {
    fn kind(&self) -> EffectKind {
        EffectKind::Blur
    }

    fn set_param(&mut self, name: &str, value: &Value) -> FxshotResult<()> {
        let v = number(name, value)?.clamp(0.0, MAX_BLUR_STRENGTH as f32);
        match name {
            "strength" | "blur" => {
                self.strength_x = v;
                self.strength_y = v;
            }
            "strengthX" | "blurX" => self.strength_x = v,
            "strengthY" | "blurY" => self.strength_y = v,
            "quality" => self.quality = v.round().clamp(1.0, 16.0) as u32,
            _ => return Err(unknown_param(self.kind().name(), name)),
        }
        Ok(())
    }

    fn apply(&self, input: &Surface, output: &mut Surface) -> FxshotResult<()> {
        let passes = self.quality.max(1);
        let per_pass = (passes as f32).sqrt();
        let kx = gaussian_for_sigma(self.strength_x * 0.5 / per_pass)?;
        let ky = gaussian_for_sigma(self.strength_y * 0.5 / per_pass)?;

        let mut current = input.clone();
        for _ in 0..passes {
            blur_separable(&current, output, &kx, &ky)?;
            current.data_mut().copy_from_slice(output.data());
        }
        Ok(())
    }
}

/// Kawase blur: repeated four-tap diagonal averages with shrinking offsets.
#[derive(Clone, Debug, PartialEq)]
pub struct KawaseBlurFilter {
    pub strength: f32,
    pub quality: u32,
    pub pixel_size: [f32; 2],
}

impl KawaseBlurFilter {
    pub(crate) const PARAMS: &[ParamSpec] = &[
        ParamSpec::new("strength", ParamKind::Number).at_most(MAX_BLUR_STRENGTH),
        ParamSpec::new("quality", ParamKind::Number),
        ParamSpec::new("pixelSize", ParamKind::Point),
    ];
    pub(crate) const CTOR: &[&str] = &["strength", "quality"];

    /// Offsets of each pass, largest first.
    pub(crate) fn kernels(&self) -> Vec<f32> {
        let mut kernels = vec![self.strength];
        if self.strength > 0.0 {
            let step = self.strength / self.quality as f32;
            let mut k = self.strength;
            for _ in 1..self.quality {
                k -= step;
                kernels.push(k);
            }
        }
        kernels
    }
}

impl Default for KawaseBlurFilter {
    fn default() -> Self {
        Self {
            strength: 4.0,
            quality: 3,
            pixel_size: [1.0, 1.0],
        }
    }
}

impl Effect for KawaseBlurFilter {
    fn kind(&self) -> EffectKind {
        EffectKind::KawaseBlur
    }

    fn set_param(&mut self, name: &str, value: &Value) -> FxshotResult<()> {
        match name {
            "strength" => {
                self.strength = number(name, value)?.clamp(0.0, MAX_BLUR_STRENGTH as f32)
            }
            "quality" => self.quality = number(name, value)?.round().clamp(1.0, 20.0) as u32,
            "pixelSize" => self.pixel_size = point(name, value)?,
            _ => return Err(unknown_param(self.kind().name(), name)),
        }
        Ok(())
    }

    fn apply(&self, input: &Surface, output: &mut Surface) -> FxshotResult<()> {
        let mut current = input.clone();
        for k in self.kernels() {
            let ox = (k + 0.5) * self.pixel_size[0];
            let oy = (k + 0.5) * self.pixel_size[1];
            let src = &current;
            map_coords(src, output, |x, y| {
                let cx = x as f32 + 0.5;
                let cy = y as f32 + 0.5;
                let mut acc = [0f32; 4];
                for (dx, dy) in [(-ox, -oy), (ox, -oy), (ox, oy), (-ox, oy)] {
                    let s = src.sample(cx + dx, cy + dy);
                    for c in 0..4 {
                        acc[c] += s[c] * 0.25;
                    }
                }
                from_unit(acc)
            })?;
            current.data_mut().copy_from_slice(output.data());
        }
        Ok(())
    }
}

const ZOOM_SAMPLES: u32 = 32;

/// Radial blur toward a center point.
#[derive(Clone, Debug, PartialEq)]
pub struct ZoomBlurFilter {
    pub strength: f32,
    /// Center in pixels; `None` is the middle of the layer.
    pub center: Option<[f32; 2]>,
    pub inner_radius: f32,
    /// Outer radius in pixels; negative means unbounded.
    pub radius: f32,
}

impl ZoomBlurFilter {
    pub(crate) const PARAMS: &[ParamSpec] = &[
        ParamSpec::new("strength", ParamKind::Number),
        ParamSpec::new("center", ParamKind::Point),
        ParamSpec::new("innerRadius", ParamKind::Number),
        ParamSpec::new("radius", ParamKind::Number),
    ];
    pub(crate) const CTOR: &[&str] = &["strength", "center", "innerRadius", "radius"];
}

impl Default for ZoomBlurFilter {
    fn default() -> Self {
        Self {
            strength: 0.1,
            center: None,
            inner_radius: 0.0,
            radius: -1.0,
        }
    }
}

impl Effect for ZoomBlurFilter {
    fn kind(&self) -> EffectKind {
        EffectKind::ZoomBlur
    }

    fn set_param(&mut self, name: &str, value: &Value) -> FxshotResult<()> {
        match name {
            "strength" => self.strength = number(name, value)?,
            "center" => self.center = Some(point(name, value)?),
            "innerRadius" => self.inner_radius = number(name, value)?.max(0.0),
            "radius" => self.radius = number(name, value)?,
            _ => return Err(unknown_param(self.kind().name(), name)),
        }
        Ok(())
    }

    fn apply(&self, input: &Surface, output: &mut Surface) -> FxshotResult<()> {
        let [cx, cy] = self
            .center
            .unwrap_or([input.width() as f32 * 0.5, input.height() as f32 * 0.5]);
        let (strength, inner, outer) = (self.strength, self.inner_radius, self.radius);
        map_coords(input, output, |x, y| {
            let px = x as f32 + 0.5;
            let py = y as f32 + 0.5;
            let (dx, dy) = (cx - px, cy - py);
            let dist = (dx * dx + dy * dy).sqrt();
            if dist < inner || (outer >= 0.0 && dist > outer) {
                return input.pixel(x as i32, y as i32);
            }
            let mut acc = [0f32; 4];
            for i in 0..ZOOM_SAMPLES {
                let t = i as f32 / ZOOM_SAMPLES as f32 * strength;
                let s = input.sample(px + dx * t, py + dy * t);
                for c in 0..4 {
                    acc[c] += s[c];
                }
            }
            from_unit(acc.map(|c| c / ZOOM_SAMPLES as f32))
        })
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/effects/filters/blur.rs"]
mod tests;
