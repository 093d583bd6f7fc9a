//! Scene provider: assets, sprites and the two-scope preview scene.

pub mod assets;
pub mod preview;
pub mod texture;

pub use assets::SceneAssets;
pub use preview::{EffectList, PreviewScene, RenderContext};
pub use texture::{Sampling, Sprite, Texture, Wrap};
