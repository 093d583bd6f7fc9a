//! fxshot renders reference captures for a catalog of visual effects.
//!
//! A run walks an ordered list of effect descriptors. Each cycle resolves the descriptor's
//! effect by name, builds it, attaches it to the whole preview scene or to its subject layer,
//! renders once and captures the result:
//!
//! - Load a [`PreviewConfig`] and optionally [`PreviewConfig::validate`] it
//! - Set up a [`Sequencer`] from [`SceneAssets`], a [`Renderer`] and a [`PresentationSink`]
//! - [`Sequencer::run`] it with a [`FramePacer`] and collect the [`FrameStore`]
#![forbid(unsafe_code)]

pub mod capture;
pub mod config;
pub mod effects;
pub mod foundation;
pub mod render;
pub mod scene;
pub mod session;

pub use crate::capture::{
    CaptureDriver, CaptureReport, FrameStore, InMemoryPresenter, PngDirPresenter,
    PresentationSink,
};
pub use crate::config::{EffectDescriptor, Invocation, PreviewConfig, Scope};
pub use crate::effects::builder::{EffectResources, build_effect};
pub use crate::effects::catalog::{EffectKind, Namespace, resolve, valid_names};
pub use crate::effects::effect::Effect;
pub use crate::foundation::core::{Border, OutputGeometry, SourceSize};
pub use crate::foundation::error::{FxshotError, FxshotResult, UnknownEffectError};
pub use crate::render::{CpuRenderer, EncodedImage, FrameRGBA, Renderer, Surface};
pub use crate::scene::{PreviewScene, RenderContext, SceneAssets};
pub use crate::session::{
    ChannelPacer, FramePacer, ImmediatePacer, RunSummary, Sequencer, SequencerState,
};
