//! Coordinate-remapping effects.

use serde_json::Value;

use crate::effects::catalog::EffectKind;
use crate::effects::effect::Effect;
use crate::effects::kernel::{from_unit, map_coords, unpremul};
use crate::effects::params::{ParamKind, ParamSpec, number, point, unknown_param};
use crate::foundation::error::FxshotResult;
use crate::foundation::math::smoothstep;
use crate::render::surface::Surface;
use crate::scene::texture::{Sprite, Wrap};

/// Scale used when a displacement effect is built from the shared displacement sprite.
pub const DISPLACEMENT_SCALE: f32 = 50.0;

/// Offsets each pixel by the red/green channels of a displacement map sprite.
///
/// A map value of 0.5 means no offset; 0 and 1 shift by `-scale / 2` and `+scale / 2` pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct DisplacementFilter {
    /// Map sprite, sampled in stage space with repeat wrapping.
    pub map: Sprite,
    /// Offset scale per axis, in pixels.
    pub scale: [f32; 2],
}

impl DisplacementFilter {
    pub(crate) const PARAMS: &[ParamSpec] = &[ParamSpec::new("scale", ParamKind::Point)];

    /// Build from a map sprite and a uniform scale.
    pub fn new(map: Sprite, scale: f32) -> Self {
        Self {
            map,
            scale: [scale, scale],
        }
    }
}

impl Effect for DisplacementFilter {
    fn kind(&self) -> EffectKind {
        EffectKind::Displacement
    }

    fn set_param(&mut self, name: &str, value: &Value) -> FxshotResult<()> {
        match name {
            "scale" => self.scale = point(name, value)?,
            _ => return Err(unknown_param(self.kind().name(), name)),
        }
        Ok(())
    }

    fn apply(&self, input: &Surface, output: &mut Surface) -> FxshotResult<()> {
        let [sx, sy] = self.scale;
        map_coords(input, output, |x, y| {
            let cx = f64::from(x) + 0.5;
            let cy = f64::from(y) + 0.5;
            let m = unpremul(self.map.sample_stage(cx, cy, Wrap::Repeat));
            let dx = (m[0] - 0.5) * sx;
            let dy = (m[1] - 0.5) * sy;
            from_unit(input.sample(cx as f32 + dx, cy as f32 + dy))
        })
    }
}

/// Bulges (positive strength) or pinches (negative) a circular region.
#[derive(Clone, Debug, PartialEq)]
pub struct BulgePinchFilter {
    /// Center in normalized layer coordinates.
    pub center: [f32; 2],
    /// Radius in pixels.
    pub radius: f32,
    /// In `[-1, 1]`.
    pub strength: f32,
}

impl BulgePinchFilter {
    pub(crate) const PARAMS: &[ParamSpec] = &[
        ParamSpec::new("center", ParamKind::Point),
        ParamSpec::new("radius", ParamKind::Number),
        ParamSpec::new("strength", ParamKind::Number),
    ];
    pub(crate) const CTOR: &[&str] = &["center", "radius", "strength"];
}

impl Default for BulgePinchFilter {
    fn default() -> Self {
        Self {
            center: [0.5, 0.5],
            radius: 100.0,
            strength: 1.0,
        }
    }
}

impl Effect for BulgePinchFilter {
    fn kind(&self) -> EffectKind {
        EffectKind::BulgePinch
    }

    fn set_param(&mut self, name: &str, value: &Value) -> FxshotResult<()> {
        match name {
            "center" => self.center = point(name, value)?,
            "radius" => self.radius = number(name, value)?.max(0.0),
            "strength" => self.strength = number(name, value)?.clamp(-1.0, 1.0),
            _ => return Err(unknown_param(self.kind().name(), name)),
        }
        Ok(())
    }

    fn apply(&self, input: &Surface, output: &mut Surface) -> FxshotResult<()> {
        let cx = self.center[0] * input.width() as f32;
        let cy = self.center[1] * input.height() as f32;
        let (radius, strength) = (self.radius, self.strength);
        map_coords(input, output, |x, y| {
            let mut dx = x as f32 + 0.5 - cx;
            let mut dy = y as f32 + 0.5 - cy;
            let dist = (dx * dx + dy * dy).sqrt();
            if dist < radius && dist > 1e-4 {
                let percent = dist / radius;
                let k = if strength > 0.0 {
                    let s = smoothstep(0.0, radius / dist, percent);
                    1.0 + (s - 1.0) * strength * 0.75
                } else {
                    let s = percent.powf(1.0 + strength * 0.75) * radius / dist;
                    1.0 + (s - 1.0) * (1.0 - percent)
                };
                dx *= k;
                dy *= k;
            }
            from_unit(input.sample(cx + dx, cy + dy))
        })
    }
}

/// Swirls pixels around a point, strongest at the center.
#[derive(Clone, Debug, PartialEq)]
pub struct TwistFilter {
    pub radius: f32,
    /// Maximum rotation in radians.
    pub angle: f32,
    /// Twist center in pixels; `None` is the middle of the layer.
    pub offset: Option<[f32; 2]>,
}

impl TwistFilter {
    pub(crate) const PARAMS: &[ParamSpec] = &[
        ParamSpec::new("radius", ParamKind::Number),
        ParamSpec::new("angle", ParamKind::Number),
        ParamSpec::new("offset", ParamKind::Point),
    ];
    pub(crate) const CTOR: &[&str] = &["radius", "angle", "offset"];
}

impl Default for TwistFilter {
    fn default() -> Self {
        Self {
            radius: 200.0,
            angle: 4.0,
            offset: None,
        }
    }
}

impl Effect for TwistFilter {
    fn kind(&self) -> EffectKind {
        EffectKind::Twist
    }

    fn set_param(&mut self, name: &str, value: &Value) -> FxshotResult<()> {
        match name {
            "radius" => self.radius = number(name, value)?.max(0.0),
            "angle" => self.angle = number(name, value)?,
            "offset" => self.offset = Some(point(name, value)?),
            _ => return Err(unknown_param(self.kind().name(), name)),
        }
        Ok(())
    }

    fn apply(&self, input: &Surface, output: &mut Surface) -> FxshotResult<()> {
        let [ox, oy] = self
            .offset
            .unwrap_or([input.width() as f32 * 0.5, input.height() as f32 * 0.5]);
        let (radius, angle) = (self.radius, self.angle);
        map_coords(input, output, |x, y| {
            let dx = x as f32 + 0.5 - ox;
            let dy = y as f32 + 0.5 - oy;
            let dist = (dx * dx + dy * dy).sqrt();
            if dist >= radius {
                return input.pixel(x as i32, y as i32);
            }
            let ratio = (radius - dist) / radius;
            let (s, c) = (ratio * ratio * angle).sin_cos();
            let rx = dx * c - dy * s;
            let ry = dx * s + dy * c;
            from_unit(input.sample(ox + rx, oy + ry))
        })
    }
}

/// Samples red, green and blue from independently offset positions.
#[derive(Clone, Debug, PartialEq)]
pub struct RgbSplitFilter {
    pub red: [f32; 2],
    pub green: [f32; 2],
    pub blue: [f32; 2],
}

impl RgbSplitFilter {
    pub(crate) const PARAMS: &[ParamSpec] = &[
        ParamSpec::new("red", ParamKind::Point),
        ParamSpec::new("green", ParamKind::Point),
        ParamSpec::new("blue", ParamKind::Point),
    ];
    pub(crate) const CTOR: &[&str] = &["red", "green", "blue"];
}

impl Default for RgbSplitFilter {
    fn default() -> Self {
        Self {
            red: [-10.0, 0.0],
            green: [0.0, 10.0],
            blue: [0.0, 0.0],
        }
    }
}

impl Effect for RgbSplitFilter {
    fn kind(&self) -> EffectKind {
        EffectKind::RgbSplit
    }

    fn set_param(&mut self, name: &str, value: &Value) -> FxshotResult<()> {
        match name {
            "red" => self.red = point(name, value)?,
            "green" => self.green = point(name, value)?,
            "blue" => self.blue = point(name, value)?,
            _ => return Err(unknown_param(self.kind().name(), name)),
        }
        Ok(())
    }

    fn apply(&self, input: &Surface, output: &mut Surface) -> FxshotResult<()> {
        let offsets = [self.red, self.green, self.blue];
        map_coords(input, output, |x, y| {
            let cx = x as f32 + 0.5;
            let cy = y as f32 + 0.5;
            let mut out = [0f32; 4];
            for (c, [ox, oy]) in offsets.iter().enumerate() {
                out[c] = input.sample(cx + ox, cy + oy)[c];
            }
            out[3] = input.sample(cx, cy)[3];
            from_unit(out)
        })
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/effects/filters/distort.rs"]
mod tests;
