//! Construction of one effect instance from a resolved kind and its descriptor.

use serde_json::Value;
use tracing::{debug, warn};

use crate::config::model::EffectDescriptor;
use crate::effects::catalog::EffectKind;
use crate::effects::effect::Effect;
use crate::effects::filters::{
    AdjustmentFilter, AlphaFilter, BlurFilter, BulgePinchFilter, ColorMapFilter,
    ColorMatrixFilter, ColorOverlayFilter, ColorReplaceFilter, ConvolutionFilter,
    DISPLACEMENT_SCALE, DisplacementFilter, DotFilter, DropShadowFilter, EmbossFilter,
    GrayscaleFilter, KawaseBlurFilter, NoiseFilter, OutlineFilter, PixelateFilter,
    RgbSplitFilter, SimpleLightmapFilter, TwistFilter, ZoomBlurFilter,
};
use crate::effects::params::ParamKind;
use crate::foundation::error::FxshotResult;
use crate::scene::texture::{Sprite, Texture};

/// Shared scene resources some effects are built from.
#[derive(Clone, Debug)]
pub struct EffectResources {
    /// Displacement map, positioned in stage space.
    pub displacement: Sprite,
    pub lightmap: Texture,
    /// Color lookup strip.
    pub colormap: Texture,
}

/// Where one positional construction argument goes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum ArgBinding<'a> {
    Param {
        index: usize,
        name: &'a str,
        value: &'a Value,
    },
    Extra {
        index: usize,
    },
}

/// Bind positional construction arguments to the kind's constructor parameters.
///
/// An object argument in a slot that is not a point is spread into named parameters. `null`
/// arguments keep the default.
pub(crate) fn bind_args(kind: EffectKind, args: &[Value]) -> Vec<ArgBinding<'_>> {
    let ctor = kind.ctor_params();
    let mut out = Vec::new();
    for (index, value) in args.iter().enumerate() {
        let slot = ctor.get(index).copied();
        let slot_is_point = slot
            .and_then(|name| kind.param(name))
            .is_some_and(|p| p.kind == ParamKind::Point);
        match value {
            Value::Null => {}
            Value::Object(map) if !slot_is_point => {
                out.extend(map.iter().map(|(name, value)| ArgBinding::Param {
                    index,
                    name: name.as_str(),
                    value,
                }));
            }
            _ => match slot {
                Some(name) => out.push(ArgBinding::Param { index, name, value }),
                None => out.push(ArgBinding::Extra { index }),
            },
        }
    }
    out
}

fn default_instance(kind: EffectKind, res: &EffectResources) -> FxshotResult<Box<dyn Effect>> {
    Ok(match kind {
        EffectKind::Displacement => Box::new(DisplacementFilter::new(
            res.displacement.clone(),
            DISPLACEMENT_SCALE,
        )),
        EffectKind::SimpleLightmap => Box::new(SimpleLightmapFilter::new(res.lightmap.clone())),
        EffectKind::ColorMap => Box::new(ColorMapFilter::new(res.colormap.clone(), false)?),
        EffectKind::Alpha => Box::new(AlphaFilter::default()),
        EffectKind::Blur => Box::new(BlurFilter::default()),
        EffectKind::ColorMatrix => Box::new(ColorMatrixFilter::default()),
        EffectKind::Noise => Box::new(NoiseFilter::default()),
        EffectKind::Adjustment => Box::new(AdjustmentFilter::default()),
        EffectKind::BulgePinch => Box::new(BulgePinchFilter::default()),
        EffectKind::ColorOverlay => Box::new(ColorOverlayFilter::default()),
        EffectKind::ColorReplace => Box::new(ColorReplaceFilter::default()),
        EffectKind::Convolution => Box::new(ConvolutionFilter::default()),
        EffectKind::Dot => Box::new(DotFilter::default()),
        EffectKind::DropShadow => Box::new(DropShadowFilter::default()),
        EffectKind::Emboss => Box::new(EmbossFilter::default()),
        EffectKind::Grayscale => Box::new(GrayscaleFilter),
        EffectKind::KawaseBlur => Box::new(KawaseBlurFilter::default()),
        EffectKind::Outline => Box::new(OutlineFilter::default()),
        EffectKind::Pixelate => Box::new(PixelateFilter::default()),
        EffectKind::RgbSplit => Box::new(RgbSplitFilter::default()),
        EffectKind::Twist => Box::new(TwistFilter::default()),
        EffectKind::ZoomBlur => Box::new(ZoomBlurFilter::default()),
    })
}

/// Build one effect: construct, apply options in order, then the optional invocation.
///
/// Option and argument problems are logged and skipped; only a failure to construct the
/// instance itself is an error. The instance is returned fully built or not at all.
#[tracing::instrument(level = "debug", skip(desc, res), fields(effect = kind.name()))]
pub fn build_effect(
    kind: EffectKind,
    desc: &EffectDescriptor,
    res: &EffectResources,
) -> FxshotResult<Box<dyn Effect>> {
    let mut effect = default_instance(kind, res)?;

    if kind.uses_scene_resources() {
        if !desc.construction_args.is_empty() {
            debug!(
                count = desc.construction_args.len(),
                "construction args ignored for resource-backed effect"
            );
        }
    } else {
        for binding in bind_args(kind, &desc.construction_args) {
            match binding {
                ArgBinding::Param { index, name, value } => {
                    if let Err(e) = effect.set_param(name, value) {
                        warn!(index, param = name, error = %e, "construction arg skipped");
                    }
                }
                ArgBinding::Extra { index } => {
                    warn!(index, "extra construction arg skipped");
                }
            }
        }
    }

    for (name, value) in &desc.options {
        if let Err(e) = effect.set_param(name, value) {
            warn!(option = name.as_str(), error = %e, "option skipped");
        }
    }

    if let Some(inv) = &desc.invoke {
        match effect.invoke(&inv.method, &inv.args) {
            Ok(true) => debug!(method = inv.method.as_str(), "invoked"),
            Ok(false) => debug!(method = inv.method.as_str(), "no such method; skipped"),
            Err(e) => warn!(method = inv.method.as_str(), error = %e, "invocation skipped"),
        }
    }

    Ok(effect)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/builder.rs"]
mod tests;
