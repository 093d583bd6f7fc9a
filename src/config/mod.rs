//! JSON configuration: descriptors, output geometry and validation.

pub mod model;
pub(crate) mod validate;

pub use model::{EffectDescriptor, Invocation, PreviewConfig, Scope};
