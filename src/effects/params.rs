//! Declared parameter schemas and typed coercion of JSON option values.

use serde_json::Value;

use crate::foundation::core::rgb_from_hex;
use crate::foundation::error::{FxshotError, FxshotResult};

/// Shape of a settable effect parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamKind {
    /// A finite number.
    Number,
    /// `true` / `false`.
    Bool,
    /// `0xRRGGBB` integer, `"#rrggbb"` string or `[r, g, b]` in `[0, 1]`.
    Color,
    /// `[x, y]`, `{ "x": .., "y": .. }` or a single number used for both axes.
    Point,
    /// A list of exactly this many numbers.
    NumberArray(usize),
}

/// One entry of an effect's declared parameter schema.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParamSpec {
    /// Property name as it appears in descriptor `options`.
    pub name: &'static str,
    /// Expected value shape.
    pub kind: ParamKind,
    /// Largest accepted magnitude for numeric and point values.
    pub max: Option<u32>,
}

impl ParamSpec {
    pub(crate) const fn new(name: &'static str, kind: ParamKind) -> Self {
        Self {
            name,
            kind,
            max: None,
        }
    }

    pub(crate) const fn at_most(mut self, max: u32) -> Self {
        self.max = Some(max);
        self
    }

    /// Check the value's shape and, for bounded parameters, its magnitude.
    pub fn check(&self, value: &Value) -> FxshotResult<()> {
        self.kind.check(self.name, value)?;
        let Some(max) = self.max else {
            return Ok(());
        };
        let components = match self.kind {
            ParamKind::Number => vec![number(self.name, value)?],
            ParamKind::Point => point(self.name, value)?.to_vec(),
            _ => return Ok(()),
        };
        if components.iter().any(|v| v.abs() > max as f32) {
            return Err(FxshotError::validation(format!(
                "param '{}' must be at most {max}, got {value}",
                self.name
            )));
        }
        Ok(())
    }
}

impl ParamKind {
    /// Check that `value` can be coerced into this kind.
    pub fn check(self, name: &str, value: &Value) -> FxshotResult<()> {
        match self {
            ParamKind::Number => number(name, value).map(|_| ()),
            ParamKind::Bool => boolean(name, value).map(|_| ()),
            ParamKind::Color => color(name, value).map(|_| ()),
            ParamKind::Point => point(name, value).map(|_| ()),
            ParamKind::NumberArray(len) => {
                let list = numbers(name, value)?;
                if list.len() != len {
                    return Err(mismatch(name, &format!("exactly {len} numbers"), value));
                }
                Ok(())
            }
        }
    }

    /// Human readable shape, used in listings and validation messages.
    pub fn describe(self) -> String {
        match self {
            ParamKind::Number => "number".to_owned(),
            ParamKind::Bool => "bool".to_owned(),
            ParamKind::Color => "color".to_owned(),
            ParamKind::Point => "point".to_owned(),
            ParamKind::NumberArray(len) => format!("number[{len}]"),
        }
    }
}

fn mismatch(name: &str, expected: &str, value: &Value) -> FxshotError {
    FxshotError::validation(format!("param '{name}' expects {expected}, got {value}"))
}

pub(crate) fn number(name: &str, value: &Value) -> FxshotResult<f32> {
    match value.as_f64() {
        Some(v) if v.is_finite() => Ok(v as f32),
        _ => Err(mismatch(name, "a finite number", value)),
    }
}

pub(crate) fn boolean(name: &str, value: &Value) -> FxshotResult<bool> {
    value
        .as_bool()
        .ok_or_else(|| mismatch(name, "a bool", value))
}

/// Straight RGB in `[0, 1]`.
pub(crate) fn color(name: &str, value: &Value) -> FxshotResult<[f32; 3]> {
    let from_u8 = |rgb: [u8; 3]| rgb.map(|c| f32::from(c) / 255.0);
    match value {
        Value::Number(n) => match n.as_u64() {
            Some(hex) if hex <= 0xff_ffff => Ok(from_u8(rgb_from_hex(hex as u32))),
            _ => Err(mismatch(name, "a 0xRRGGBB color", value)),
        },
        Value::String(s) => {
            let hex = s.strip_prefix('#').unwrap_or(s);
            match u32::from_str_radix(hex, 16) {
                Ok(v) if hex.len() == 6 => Ok(from_u8(rgb_from_hex(v))),
                _ => Err(mismatch(name, "a '#rrggbb' color", value)),
            }
        }
        Value::Array(items) if items.len() == 3 => {
            let mut out = [0f32; 3];
            for (o, item) in out.iter_mut().zip(items) {
                *o = number(name, item)?.clamp(0.0, 1.0);
            }
            Ok(out)
        }
        _ => Err(mismatch(name, "a color", value)),
    }
}

pub(crate) fn point(name: &str, value: &Value) -> FxshotResult<[f32; 2]> {
    match value {
        Value::Number(_) => {
            let v = number(name, value)?;
            Ok([v, v])
        }
        Value::Array(items) if items.len() == 2 => {
            Ok([number(name, &items[0])?, number(name, &items[1])?])
        }
        Value::Object(map) => match (map.get("x"), map.get("y")) {
            (Some(x), Some(y)) => Ok([number(name, x)?, number(name, y)?]),
            _ => Err(mismatch(name, "a point with x and y", value)),
        },
        _ => Err(mismatch(name, "a point", value)),
    }
}

pub(crate) fn numbers(name: &str, value: &Value) -> FxshotResult<Vec<f32>> {
    match value {
        Value::Array(items) => items.iter().map(|v| number(name, v)).collect(),
        _ => Err(mismatch(name, "a list of numbers", value)),
    }
}

/// Fixed-length number list, e.g. a 3x3 convolution or a 5x4 color matrix.
pub(crate) fn number_array<const N: usize>(name: &str, value: &Value) -> FxshotResult<[f32; N]> {
    let list = numbers(name, value)?;
    <[f32; N]>::try_from(list.as_slice())
        .map_err(|_| mismatch(name, &format!("exactly {N} numbers"), value))
}

/// Positional method argument as a number, or `default` when absent/null.
pub(crate) fn arg_number(
    method: &str,
    args: &[Value],
    idx: usize,
    default: f32,
) -> FxshotResult<f32> {
    match args.get(idx) {
        None | Some(Value::Null) => Ok(default),
        Some(v) => number(&format!("{method}#{idx}"), v),
    }
}

/// Positional method argument as a bool, or `default` when absent/null.
pub(crate) fn arg_bool(
    method: &str,
    args: &[Value],
    idx: usize,
    default: bool,
) -> FxshotResult<bool> {
    match args.get(idx) {
        None | Some(Value::Null) => Ok(default),
        Some(v) => boolean(&format!("{method}#{idx}"), v),
    }
}

pub(crate) fn unknown_param(effect: &str, name: &str) -> FxshotError {
    FxshotError::validation(format!("{effect} has no settable property '{name}'"))
}

#[cfg(test)]
#[path = "../../tests/unit/effects/params.rs"]
mod tests;
