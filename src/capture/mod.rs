//! Capture driver, presentation sinks and the frame store.

pub mod driver;
pub mod present;
pub mod store;

pub use driver::{CaptureDriver, CaptureReport};
pub use present::{InMemoryPresenter, PngDirPresenter, PresentationSink};
pub use store::FrameStore;
