//! CPU rendering of the preview scene and read-back.

pub mod backend;
pub mod composite;
pub mod cpu;
pub mod surface;

pub use backend::{EncodedImage, FrameRGBA, Renderer};
pub use cpu::CpuRenderer;
pub use surface::Surface;
