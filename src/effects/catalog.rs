//! Closed catalog of effect kinds and name resolution across the two namespaces.

use std::fmt;

use crate::effects::filters::{
    AdjustmentFilter, AlphaFilter, BlurFilter, BulgePinchFilter, ColorMapFilter,
    ColorMatrixFilter, ColorOverlayFilter, ColorReplaceFilter, ConvolutionFilter,
    DisplacementFilter, DotFilter, DropShadowFilter, EmbossFilter, GrayscaleFilter,
    KawaseBlurFilter, NoiseFilter, OutlineFilter, PixelateFilter, RgbSplitFilter,
    SimpleLightmapFilter, TwistFilter, ZoomBlurFilter,
};
use crate::effects::params::ParamSpec;
use crate::foundation::error::UnknownEffectError;

/// Namespace an effect name is defined in. Lookup order is [`Namespace::ORDER`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// Community filter collection.
    Filters,
    /// Filters built into the engine.
    Core,
}

impl Namespace {
    /// Resolution order.
    pub const ORDER: [Namespace; 2] = [Namespace::Filters, Namespace::Core];

    /// Display name.
    pub fn as_str(self) -> &'static str {
        match self {
            Namespace::Filters => "filters",
            Namespace::Core => "core",
        }
    }

    /// Find `name` among the kinds defined in this namespace.
    pub fn lookup(self, name: &str) -> Option<EffectKind> {
        EffectKind::ALL
            .iter()
            .copied()
            .find(|k| k.namespace() == self && k.name() == name)
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every effect the preview driver knows how to build.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum EffectKind {
    Alpha,
    Blur,
    ColorMatrix,
    Displacement,
    Noise,
    Adjustment,
    BulgePinch,
    ColorMap,
    ColorOverlay,
    ColorReplace,
    Convolution,
    Dot,
    DropShadow,
    Emboss,
    Grayscale,
    KawaseBlur,
    Outline,
    Pixelate,
    RgbSplit,
    SimpleLightmap,
    Twist,
    ZoomBlur,
}

impl EffectKind {
    /// All kinds, core namespace first.
    pub const ALL: [EffectKind; 22] = [
        EffectKind::Alpha,
        EffectKind::Blur,
        EffectKind::ColorMatrix,
        EffectKind::Displacement,
        EffectKind::Noise,
        EffectKind::Adjustment,
        EffectKind::BulgePinch,
        EffectKind::ColorMap,
        EffectKind::ColorOverlay,
        EffectKind::ColorReplace,
        EffectKind::Convolution,
        EffectKind::Dot,
        EffectKind::DropShadow,
        EffectKind::Emboss,
        EffectKind::Grayscale,
        EffectKind::KawaseBlur,
        EffectKind::Outline,
        EffectKind::Pixelate,
        EffectKind::RgbSplit,
        EffectKind::SimpleLightmap,
        EffectKind::Twist,
        EffectKind::ZoomBlur,
    ];

    /// Name used in descriptors.
    pub fn name(self) -> &'static str {
        match self {
            EffectKind::Alpha => "AlphaFilter",
            EffectKind::Blur => "BlurFilter",
            EffectKind::ColorMatrix => "ColorMatrixFilter",
            EffectKind::Displacement => "DisplacementFilter",
            EffectKind::Noise => "NoiseFilter",
            EffectKind::Adjustment => "AdjustmentFilter",
            EffectKind::BulgePinch => "BulgePinchFilter",
            EffectKind::ColorMap => "ColorMapFilter",
            EffectKind::ColorOverlay => "ColorOverlayFilter",
            EffectKind::ColorReplace => "ColorReplaceFilter",
            EffectKind::Convolution => "ConvolutionFilter",
            EffectKind::Dot => "DotFilter",
            EffectKind::DropShadow => "DropShadowFilter",
            EffectKind::Emboss => "EmbossFilter",
            EffectKind::Grayscale => "GrayscaleFilter",
            EffectKind::KawaseBlur => "KawaseBlurFilter",
            EffectKind::Outline => "OutlineFilter",
            EffectKind::Pixelate => "PixelateFilter",
            EffectKind::RgbSplit => "RGBSplitFilter",
            EffectKind::SimpleLightmap => "SimpleLightmapFilter",
            EffectKind::Twist => "TwistFilter",
            EffectKind::ZoomBlur => "ZoomBlurFilter",
        }
    }

    pub fn namespace(self) -> Namespace {
        match self {
            EffectKind::Alpha
            | EffectKind::Blur
            | EffectKind::ColorMatrix
            | EffectKind::Displacement
            | EffectKind::Noise => Namespace::Core,
            _ => Namespace::Filters,
        }
    }

    /// Declared settable properties.
    pub fn params(self) -> &'static [ParamSpec] {
        match self {
            EffectKind::Alpha => AlphaFilter::PARAMS,
            EffectKind::Blur => BlurFilter::PARAMS,
            EffectKind::ColorMatrix => ColorMatrixFilter::PARAMS,
            EffectKind::Displacement => DisplacementFilter::PARAMS,
            EffectKind::Noise => NoiseFilter::PARAMS,
            EffectKind::Adjustment => AdjustmentFilter::PARAMS,
            EffectKind::BulgePinch => BulgePinchFilter::PARAMS,
            EffectKind::ColorMap => ColorMapFilter::PARAMS,
            EffectKind::ColorOverlay => ColorOverlayFilter::PARAMS,
            EffectKind::ColorReplace => ColorReplaceFilter::PARAMS,
            EffectKind::Convolution => ConvolutionFilter::PARAMS,
            EffectKind::Dot => DotFilter::PARAMS,
            EffectKind::DropShadow => DropShadowFilter::PARAMS,
            EffectKind::Emboss => EmbossFilter::PARAMS,
            EffectKind::Grayscale => GrayscaleFilter::PARAMS,
            EffectKind::KawaseBlur => KawaseBlurFilter::PARAMS,
            EffectKind::Outline => OutlineFilter::PARAMS,
            EffectKind::Pixelate => PixelateFilter::PARAMS,
            EffectKind::RgbSplit => RgbSplitFilter::PARAMS,
            EffectKind::SimpleLightmap => SimpleLightmapFilter::PARAMS,
            EffectKind::Twist => TwistFilter::PARAMS,
            EffectKind::ZoomBlur => ZoomBlurFilter::PARAMS,
        }
    }

    /// Declared parameter for `name`, if any.
    pub fn param(self, name: &str) -> Option<&'static ParamSpec> {
        self.params().iter().find(|p| p.name == name)
    }

    /// Property names positional construction arguments bind to, in order.
    ///
    /// Empty for kinds built from shared scene resources.
    pub fn ctor_params(self) -> &'static [&'static str] {
        match self {
            EffectKind::Alpha => AlphaFilter::CTOR,
            EffectKind::Blur => BlurFilter::CTOR,
            EffectKind::ColorMatrix => ColorMatrixFilter::CTOR,
            EffectKind::Noise => NoiseFilter::CTOR,
            EffectKind::Adjustment => AdjustmentFilter::CTOR,
            EffectKind::BulgePinch => BulgePinchFilter::CTOR,
            EffectKind::ColorOverlay => ColorOverlayFilter::CTOR,
            EffectKind::ColorReplace => ColorReplaceFilter::CTOR,
            EffectKind::Convolution => ConvolutionFilter::CTOR,
            EffectKind::Dot => DotFilter::CTOR,
            EffectKind::DropShadow => DropShadowFilter::CTOR,
            EffectKind::Emboss => EmbossFilter::CTOR,
            EffectKind::Grayscale => GrayscaleFilter::CTOR,
            EffectKind::KawaseBlur => KawaseBlurFilter::CTOR,
            EffectKind::Outline => OutlineFilter::CTOR,
            EffectKind::Pixelate => PixelateFilter::CTOR,
            EffectKind::RgbSplit => RgbSplitFilter::CTOR,
            EffectKind::Twist => TwistFilter::CTOR,
            EffectKind::ZoomBlur => ZoomBlurFilter::CTOR,
            EffectKind::Displacement | EffectKind::ColorMap | EffectKind::SimpleLightmap => &[],
        }
    }

    /// Methods a descriptor's `invoke` can call.
    pub fn methods(self) -> &'static [&'static str] {
        match self {
            EffectKind::ColorMatrix => ColorMatrixFilter::METHODS,
            _ => &[],
        }
    }

    /// Built from shared scene resources; construction arguments are ignored.
    pub fn uses_scene_resources(self) -> bool {
        matches!(
            self,
            EffectKind::Displacement | EffectKind::ColorMap | EffectKind::SimpleLightmap
        )
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolve a descriptor name, looking in the `filters` namespace first and then `core`.
pub fn resolve(name: &str) -> Result<EffectKind, UnknownEffectError> {
    Namespace::ORDER
        .iter()
        .find_map(|ns| ns.lookup(name))
        .ok_or_else(|| UnknownEffectError {
            name: name.to_owned(),
        })
}

/// Every resolvable name, in catalog order.
pub fn valid_names() -> Vec<&'static str> {
    EffectKind::ALL.iter().map(|k| k.name()).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/effects/catalog.rs"]
mod tests;
