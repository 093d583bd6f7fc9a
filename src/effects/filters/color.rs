//! Per-pixel color effects.

use serde_json::Value;

use crate::effects::catalog::EffectKind;
use crate::effects::effect::Effect;
use crate::effects::kernel::{
    color_matrix_px, from_unit, luminance, map_pixels, premul, to_unit, unpremul,
};
use crate::effects::params::{
    ParamKind, ParamSpec, arg_bool, arg_number, color, number, number_array, unknown_param,
};
use crate::foundation::error::FxshotResult;
use crate::render::surface::Surface;

/// Multiplies the layer by a constant opacity.
#[derive(Clone, Debug, PartialEq)]
pub struct AlphaFilter {
    /// Opacity in `[0, 1]`.
    pub alpha: f32,
}

impl AlphaFilter {
    pub(crate) const PARAMS: &[ParamSpec] = &[ParamSpec::new("alpha", ParamKind::Number)];
    pub(crate) const CTOR: &[&str] = &["alpha"];
}

impl Default for AlphaFilter {
    fn default() -> Self {
        Self { alpha: 1.0 }
    }
}

impl Effect for AlphaFilter {
    fn kind(&self) -> EffectKind {
        EffectKind::Alpha
    }

    fn set_param(&mut self, name: &str, value: &Value) -> FxshotResult<()> {
        match name {
            "alpha" => self.alpha = number(name, value)?.clamp(0.0, 1.0),
            _ => return Err(unknown_param(self.kind().name(), name)),
        }
        Ok(())
    }

    fn apply(&self, input: &Surface, output: &mut Surface) -> FxshotResult<()> {
        let a = self.alpha;
        map_pixels(input, output, |px| from_unit(to_unit(px).map(|c| c * a)))
    }
}

const IDENTITY_MATRIX: [f32; 20] = [
    1.0, 0.0, 0.0, 0.0, 0.0, //
    0.0, 1.0, 0.0, 0.0, 0.0, //
    0.0, 0.0, 1.0, 0.0, 0.0, //
    0.0, 0.0, 0.0, 1.0, 0.0,
];

/// 5x4 color matrix with the classic preset methods.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorMatrixFilter {
    /// Row-major 5x4 matrix; the fifth column is an offset in `[0, 1]` units.
    pub matrix: [f32; 20],
    /// Blend between the original (0) and the transformed color (1).
    pub alpha: f32,
}

impl ColorMatrixFilter {
    pub(crate) const PARAMS: &[ParamSpec] = &[
        ParamSpec::new("matrix", ParamKind::NumberArray(20)),
        ParamSpec::new("alpha", ParamKind::Number),
    ];
    pub(crate) const CTOR: &[&str] = &["matrix"];
    pub(crate) const METHODS: &[&str] = &[
        "brightness",
        "contrast",
        "saturate",
        "desaturate",
        "greyscale",
        "grayscale",
        "blackAndWhite",
        "hue",
        "negative",
        "sepia",
        "reset",
    ];

    /// Replace the matrix, or compose it with the current one when `multiply` is set.
    pub fn load(&mut self, matrix: [f32; 20], multiply: bool) {
        self.matrix = if multiply {
            multiply_matrix(&self.matrix, &matrix)
        } else {
            matrix
        };
    }

    /// Scale rgb by `b`.
    pub fn brightness(&mut self, b: f32, multiply: bool) {
        #[rustfmt::skip]
        let m = [
            b, 0.0, 0.0, 0.0, 0.0,
            0.0, b, 0.0, 0.0, 0.0,
            0.0, 0.0, b, 0.0, 0.0,
            0.0, 0.0, 0.0, 1.0, 0.0,
        ];
        self.load(m, multiply);
    }

    /// Push channels away from (or toward) mid gray.
    pub fn contrast(&mut self, amount: f32, multiply: bool) {
        let v = amount + 1.0;
        let o = -0.5 * (v - 1.0);
        #[rustfmt::skip]
        let m = [
            v, 0.0, 0.0, 0.0, o,
            0.0, v, 0.0, 0.0, o,
            0.0, 0.0, v, 0.0, o,
            0.0, 0.0, 0.0, 1.0, 0.0,
        ];
        self.load(m, multiply);
    }

    /// Increase (`amount > 0`) or decrease saturation.
    pub fn saturate(&mut self, amount: f32, multiply: bool) {
        let x = amount * 2.0 / 3.0 + 1.0;
        let y = (x - 1.0) * -0.5;
        #[rustfmt::skip]
        let m = [
            x, y, y, 0.0, 0.0,
            y, x, y, 0.0, 0.0,
            y, y, x, 0.0, 0.0,
            0.0, 0.0, 0.0, 1.0, 0.0,
        ];
        self.load(m, multiply);
    }

    /// Equal-weight gray.
    pub fn greyscale(&mut self, scale: f32, multiply: bool) {
        let s = scale;
        #[rustfmt::skip]
        let m = [
            s, s, s, 0.0, 0.0,
            s, s, s, 0.0, 0.0,
            s, s, s, 0.0, 0.0,
            0.0, 0.0, 0.0, 1.0, 0.0,
        ];
        self.load(m, multiply);
    }

    /// Luma-weighted black and white.
    pub fn black_and_white(&mut self, multiply: bool) {
        #[rustfmt::skip]
        let m = [
            0.3, 0.6, 0.1, 0.0, 0.0,
            0.3, 0.6, 0.1, 0.0, 0.0,
            0.3, 0.6, 0.1, 0.0, 0.0,
            0.0, 0.0, 0.0, 1.0, 0.0,
        ];
        self.load(m, multiply);
    }

    /// Rotate hue by `rotation_deg` degrees.
    pub fn hue(&mut self, rotation_deg: f32, multiply: bool) {
        let rotation = rotation_deg.to_radians();
        let cos_r = rotation.cos();
        let sin_r = rotation.sin();
        let w = 1.0f32 / 3.0;
        let sqr_w = w.sqrt();

        let a00 = cos_r + (1.0 - cos_r) * w;
        let a01 = w * (1.0 - cos_r) - sqr_w * sin_r;
        let a02 = w * (1.0 - cos_r) + sqr_w * sin_r;
        let a10 = w * (1.0 - cos_r) + sqr_w * sin_r;
        let a11 = cos_r + w * (1.0 - cos_r);
        let a12 = w * (1.0 - cos_r) - sqr_w * sin_r;
        let a20 = w * (1.0 - cos_r) - sqr_w * sin_r;
        let a21 = w * (1.0 - cos_r) + sqr_w * sin_r;
        let a22 = cos_r + w * (1.0 - cos_r);

        #[rustfmt::skip]
        let m = [
            a00, a01, a02, 0.0, 0.0,
            a10, a11, a12, 0.0, 0.0,
            a20, a21, a22, 0.0, 0.0,
            0.0, 0.0, 0.0, 1.0, 0.0,
        ];
        self.load(m, multiply);
    }

    /// Invert rgb.
    pub fn negative(&mut self, multiply: bool) {
        #[rustfmt::skip]
        let m = [
            -1.0, 0.0, 0.0, 1.0, 0.0,
            0.0, -1.0, 0.0, 1.0, 0.0,
            0.0, 0.0, -1.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0, 0.0,
        ];
        self.load(m, multiply);
    }

    /// Warm brown tone.
    pub fn sepia(&mut self, multiply: bool) {
        #[rustfmt::skip]
        let m = [
            0.393, 0.769, 0.189, 0.0, 0.0,
            0.349, 0.686, 0.168, 0.0, 0.0,
            0.272, 0.534, 0.131, 0.0, 0.0,
            0.0, 0.0, 0.0, 1.0, 0.0,
        ];
        self.load(m, multiply);
    }
}

impl Default for ColorMatrixFilter {
    fn default() -> Self {
        Self {
            matrix: IDENTITY_MATRIX,
            alpha: 1.0,
        }
    }
}

/// `a * b` with both treated as 5x5 matrices whose last row is `[0, 0, 0, 0, 1]`.
fn multiply_matrix(a: &[f32; 20], b: &[f32; 20]) -> [f32; 20] {
    let mut out = [0f32; 20];
    for row in 0..4 {
        for col in 0..5 {
            let mut acc = 0.0;
            for k in 0..4 {
                acc += a[row * 5 + k] * b[k * 5 + col];
            }
            if col == 4 {
                acc += a[row * 5 + 4];
            }
            out[row * 5 + col] = acc;
        }
    }
    out
}

impl Effect for ColorMatrixFilter {
    fn kind(&self) -> EffectKind {
        EffectKind::ColorMatrix
    }

    fn set_param(&mut self, name: &str, value: &Value) -> FxshotResult<()> {
        match name {
            "matrix" => self.matrix = number_array::<20>(name, value)?,
            "alpha" => self.alpha = number(name, value)?.clamp(0.0, 1.0),
            _ => return Err(unknown_param(self.kind().name(), name)),
        }
        Ok(())
    }

    fn invoke(&mut self, method: &str, args: &[Value]) -> FxshotResult<bool> {
        match method {
            "brightness" => self.brightness(
                arg_number(method, args, 0, 1.0)?,
                arg_bool(method, args, 1, false)?,
            ),
            "contrast" => self.contrast(
                arg_number(method, args, 0, 0.0)?,
                arg_bool(method, args, 1, false)?,
            ),
            "saturate" => self.saturate(
                arg_number(method, args, 0, 0.0)?,
                arg_bool(method, args, 1, false)?,
            ),
            "desaturate" => self.saturate(-1.0, false),
            "greyscale" | "grayscale" => self.greyscale(
                arg_number(method, args, 0, 1.0 / 3.0)?,
                arg_bool(method, args, 1, false)?,
            ),
            "blackAndWhite" => self.black_and_white(arg_bool(method, args, 0, false)?),
            "hue" => self.hue(
                arg_number(method, args, 0, 0.0)?,
                arg_bool(method, args, 1, false)?,
            ),
            "negative" => self.negative(arg_bool(method, args, 0, false)?),
            "sepia" => self.sepia(arg_bool(method, args, 0, false)?),
            "reset" => self.matrix = IDENTITY_MATRIX,
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn apply(&self, input: &Surface, output: &mut Surface) -> FxshotResult<()> {
        let m = self.matrix;
        let mix = self.alpha;
        map_pixels(input, output, |px| color_matrix_px(px, &m, mix))
    }
}

/// Luma grayscale.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GrayscaleFilter;

impl GrayscaleFilter {
    pub(crate) const PARAMS: &[ParamSpec] = &[];
    pub(crate) const CTOR: &[&str] = &[];
}

impl Effect for GrayscaleFilter {
    fn kind(&self) -> EffectKind {
        EffectKind::Grayscale
    }

    fn set_param(&mut self, name: &str, _value: &Value) -> FxshotResult<()> {
        Err(unknown_param(self.kind().name(), name))
    }

    fn apply(&self, input: &Surface, output: &mut Surface) -> FxshotResult<()> {
        map_pixels(input, output, |px| {
            let [r, g, b, a] = to_unit(px);
            // Luma is linear, so it can be taken on premultiplied channels directly.
            let l = luminance([r, g, b]);
            from_unit([l, l, l, a])
        })
    }
}

/// Gamma, saturation, contrast, brightness and per-channel gain in one pass.
#[derive(Clone, Debug, PartialEq)]
pub struct AdjustmentFilter {
    pub gamma: f32,
    pub saturation: f32,
    pub contrast: f32,
    pub brightness: f32,
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub alpha: f32,
}

impl AdjustmentFilter {
    pub(crate) const PARAMS: &[ParamSpec] = &[
        ParamSpec::new("gamma", ParamKind::Number),
        ParamSpec::new("saturation", ParamKind::Number),
        ParamSpec::new("contrast", ParamKind::Number),
        ParamSpec::new("brightness", ParamKind::Number),
        ParamSpec::new("red", ParamKind::Number),
        ParamSpec::new("green", ParamKind::Number),
        ParamSpec::new("blue", ParamKind::Number),
        ParamSpec::new("alpha", ParamKind::Number),
    ];
    pub(crate) const CTOR: &[&str] = &[];
}

impl Default for AdjustmentFilter {
    fn default() -> Self {
        Self {
            gamma: 1.0,
            saturation: 1.0,
            contrast: 1.0,
            brightness: 1.0,
            red: 1.0,
            green: 1.0,
            blue: 1.0,
            alpha: 1.0,
        }
    }
}

impl Effect for AdjustmentFilter {
    fn kind(&self) -> EffectKind {
        EffectKind::Adjustment
    }

    fn set_param(&mut self, name: &str, value: &Value) -> FxshotResult<()> {
        let v = number(name, value)?;
        match name {
            "gamma" => self.gamma = v.max(1e-4),
            "saturation" => self.saturation = v,
            "contrast" => self.contrast = v,
            "brightness" => self.brightness = v,
            "red" => self.red = v,
            "green" => self.green = v,
            "blue" => self.blue = v,
            "alpha" => self.alpha = v.clamp(0.0, 1.0),
            _ => return Err(unknown_param(self.kind().name(), name)),
        }
        Ok(())
    }

    fn apply(&self, input: &Surface, output: &mut Surface) -> FxshotResult<()> {
        let f = self.clone();
        map_pixels(input, output, move |px| {
            let src = to_unit(px);
            let mut out = src;
            if src[3] > 0.0 {
                let [r, g, b, a] = unpremul(src);
                let inv_gamma = 1.0 / f.gamma;
                let rgb = [r, g, b].map(|c| c.max(0.0).powf(inv_gamma));
                let l = 0.2125 * rgb[0] + 0.7154 * rgb[1] + 0.0721 * rgb[2];
                let gains = [f.red, f.green, f.blue];
                let mut adjusted = [0f32; 3];
                for c in 0..3 {
                    let sat = l + (rgb[c] - l) * f.saturation;
                    let con = 0.5 + (sat - 0.5) * f.contrast;
                    adjusted[c] = con * gains[c] * f.brightness;
                }
                out = premul([adjusted[0], adjusted[1], adjusted[2], a]);
            }
            from_unit(out.map(|c| c * f.alpha))
        })
    }
}

/// Tints the layer toward a flat color.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorOverlayFilter {
    /// Straight RGB overlay color.
    pub color: [f32; 3],
    /// Overlay strength.
    pub alpha: f32,
}

impl ColorOverlayFilter {
    pub(crate) const PARAMS: &[ParamSpec] = &[
        ParamSpec::new("color", ParamKind::Color),
        ParamSpec::new("alpha", ParamKind::Number),
    ];
    pub(crate) const CTOR: &[&str] = &["color", "alpha"];
}

impl Default for ColorOverlayFilter {
    fn default() -> Self {
        Self {
            color: [0.0, 0.0, 0.0],
            alpha: 1.0,
        }
    }
}

impl Effect for ColorOverlayFilter {
    fn kind(&self) -> EffectKind {
        EffectKind::ColorOverlay
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
        let (tint, t) = (self.color, self.alpha);
        map_pixels(input, output, |px| {
            let [r, g, b, a] = to_unit(px);
            let rgb = [r, g, b];
            let mut out = [0f32; 4];
            for c in 0..3 {
                out[c] = rgb[c] + (tint[c] * a - rgb[c]) * t;
            }
            out[3] = a;
            from_unit(out)
        })
    }
}

/// Replaces colors close to `originalColor` with `targetColor`.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorReplaceFilter {
    pub original_color: [f32; 3],
    pub target_color: [f32; 3],
    /// Euclidean rgb distance under which a pixel is replaced.
    pub tolerance: f32,
}

impl ColorReplaceFilter {
    pub(crate) const PARAMS: &[ParamSpec] = &[
        ParamSpec::new("originalColor", ParamKind::Color),
        ParamSpec::new("targetColor", ParamKind::Color),
        ParamSpec::new("tolerance", ParamKind::Number),
    ];
    pub(crate) const CTOR: &[&str] = &["originalColor", "targetColor", "tolerance"];
}

impl Default for ColorReplaceFilter {
    fn default() -> Self {
        Self {
            original_color: [1.0, 0.0, 0.0],
            target_color: [0.0, 0.0, 0.0],
            tolerance: 0.4,
        }
    }
}

impl Effect for ColorReplaceFilter {
    fn kind(&self) -> EffectKind {
        EffectKind::ColorReplace
    }

    fn set_param(&mut self, name: &str, value: &Value) -> FxshotResult<()> {
        match name {
            "originalColor" => self.original_color = color(name, value)?,
            "targetColor" => self.target_color = color(name, value)?,
            "tolerance" => self.tolerance = number(name, value)?.max(0.0),
            _ => return Err(unknown_param(self.kind().name(), name)),
        }
        Ok(())
    }

    fn apply(&self, input: &Surface, output: &mut Surface) -> FxshotResult<()> {
        let (orig, target, tol) = (self.original_color, self.target_color, self.tolerance);
        map_pixels(input, output, |px| {
            let src = to_unit(px);
            let [r, g, b, a] = unpremul(src);
            let diff = [orig[0] - r, orig[1] - g, orig[2] - b];
            let dist = (diff[0] * diff[0] + diff[1] * diff[1] + diff[2] * diff[2]).sqrt();
            if a <= 0.0 || dist > tol {
                return px;
            }
            from_unit(premul([
                target[0] + diff[0],
                target[1] + diff[1],
                target[2] + diff[2],
                a,
            ]))
        })
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/effects/filters/color.rs"]
mod tests;
