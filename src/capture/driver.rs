use tracing::{debug, warn};

use crate::capture::present::PresentationSink;
use crate::capture::store::FrameStore;
use crate::config::model::EffectDescriptor;
use crate::effects::effect::Effect;
use crate::foundation::core::OutputGeometry;
use crate::foundation::error::{FxshotError, FxshotResult};
use crate::render::backend::{FrameRGBA, Renderer};
use crate::render::surface::Surface;
use crate::scene::preview::PreviewScene;

/// Artifacts produced by one capture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CaptureReport {
    /// An image was extracted (and offered to the presentation sink).
    pub image: bool,
    /// A frame was stored.
    pub frame: bool,
}

/// Attaches an effect, renders once and routes the result to the presentation sink and/or the
/// frame store.
#[derive(Debug)]
pub struct CaptureDriver<R, P> {
    renderer: R,
    presenter: P,
    frames: FrameStore,
    image_extractions: u64,
    frame_extractions: u64,
}

impl<R: Renderer, P: PresentationSink> CaptureDriver<R, P> {
    pub fn new(renderer: R, presenter: P) -> Self {
        Self {
            renderer,
            presenter,
            frames: FrameStore::new(),
            image_extractions: 0,
            frame_extractions: 0,
        }
    }

    pub fn frames(&self) -> &FrameStore {
        &self.frames
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Image extractions so far.
    pub fn image_extractions(&self) -> u64 {
        self.image_extractions
    }

    /// Frame extractions so far.
    pub fn frame_extractions(&self) -> u64 {
        self.frame_extractions
    }

    /// Consume the driver, returning the frame store and the presenter.
    pub fn finish(self) -> (FrameStore, P) {
        (self.frames, self.presenter)
    }

    /// Run steps reset, attach, render and capture for one descriptor.
    ///
    /// Both capture paths read the same render. Presentation failures are logged and do not
    /// fail the capture. The frame store is only touched once the frame has been read back.
    #[tracing::instrument(level = "debug", skip_all, fields(effect = desc.name.as_str()))]
    pub fn capture(
        &mut self,
        scene: &mut PreviewScene,
        effect: Box<dyn Effect>,
        desc: &EffectDescriptor,
    ) -> FxshotResult<CaptureReport> {
        let output = *scene.output();
        let mut ctx = scene.begin_cycle();
        ctx.attach(desc.scope, effect);
        self.renderer.render(ctx.scene())?;
        debug!(scope = ?desc.scope, "rendered");

        let mut report = CaptureReport::default();

        if let Some(id) = desc.capture_as_image.as_deref() {
            let image = self.renderer.extract_image()?;
            self.image_extractions += 1;
            report.image = true;
            if let Err(e) = self.presenter.present(id, &image) {
                warn!(id, error = %e, "presentation failed");
            }
        }

        if let Some(name) = desc.capture_as_frame.as_deref() {
            let pixels = self.renderer.extract_pixels()?;
            self.frame_extractions += 1;
            let frame = read_back_flipped(&pixels, &output)?;
            if self.frames.insert(name, frame).is_some() {
                debug!(frame = name, "frame overwritten");
            }
            report.frame = true;
        }

        Ok(report)
    }
}

/// Copy `pixels` into an output-sized surface, flip it vertically and read it back as straight
/// alpha.
pub(crate) fn read_back_flipped(
    pixels: &FrameRGBA,
    output: &OutputGeometry,
) -> FxshotResult<FrameRGBA> {
    let expected = (pixels.width as usize) * (pixels.height as usize) * 4;
    if pixels.data.len() != expected {
        return Err(FxshotError::capture(format!(
            "read back {} bytes for a {}x{} render",
            pixels.data.len(),
            pixels.width,
            pixels.height
        )));
    }
    let (w, h) = (output.width, output.height);
    let mut target = Surface::new(w, h);
    let stride = target.stride();
    let src_stride = pixels.width as usize * 4;
    let copy_w = pixels.width.min(w) as usize * 4;
    let copy_h = pixels.height.min(h) as usize;
    {
        let data = target.data_mut();
        for y in 0..copy_h {
            let src = &pixels.data[y * src_stride..y * src_stride + copy_w];
            let dst_row = h as usize - 1 - y;
            data[dst_row * stride..dst_row * stride + copy_w].copy_from_slice(src);
        }
    }
    let frame = FrameRGBA {
        width: w,
        height: h,
        data: target.into_data(),
        premultiplied: pixels.premultiplied,
    };
    Ok(frame.into_straight())
}

#[cfg(test)]
#[path = "../../tests/unit/capture/driver.rs"]
mod tests;
