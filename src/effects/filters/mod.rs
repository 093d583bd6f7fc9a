//! CPU implementations of every cataloged effect.

mod blur;
mod color;
mod distort;
mod maps;
mod stylize;

pub use blur::{BlurFilter, KawaseBlurFilter, ZoomBlurFilter};
pub use color::{
    AdjustmentFilter, AlphaFilter, ColorMatrixFilter, ColorOverlayFilter, ColorReplaceFilter,
    GrayscaleFilter,
};
pub use distort::{
    BulgePinchFilter, DISPLACEMENT_SCALE, DisplacementFilter, RgbSplitFilter, TwistFilter,
};
pub use maps::{ColorMapFilter, SimpleLightmapFilter};
pub use stylize::{
    ConvolutionFilter, DotFilter, DropShadowFilter, EmbossFilter, NoiseFilter, OutlineFilter,
    PixelateFilter,
};
