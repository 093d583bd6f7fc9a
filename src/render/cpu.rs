use crate::config::model::Scope;
use crate::effects::effect::Effect;
use crate::foundation::error::{FxshotError, FxshotResult};
use crate::render::backend::{EncodedImage, FrameRGBA, Renderer};
use crate::render::composite::over_surface;
use crate::render::surface::Surface;
use crate::scene::preview::PreviewScene;

/// CPU renderer for the preview scene.
///
/// Layer order: the stage is cleared to the border color, the background is drawn into the
/// scene container, the subject layer is filtered by the subject scope and composited into the
/// container, the container is filtered by the full scope and composited onto the stage.
#[derive(Debug, Default)]
pub struct CpuRenderer {
    stage: Option<Surface>,
    renders: u64,
}

impl CpuRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of completed render passes.
    pub fn render_count(&self) -> u64 {
        self.renders
    }

    fn last(&self) -> FxshotResult<&Surface> {
        self.stage
            .as_ref()
            .ok_or_else(|| FxshotError::capture("nothing has been rendered yet"))
    }
}

fn apply_chain(effects: &[Box<dyn Effect>], mut current: Surface) -> FxshotResult<Surface> {
    for effect in effects {
        let mut out = Surface::new(current.width(), current.height());
        effect.apply(&current, &mut out).map_err(|e| {
            FxshotError::render(format!("{} failed: {e}", effect.kind().name()))
        })?;
        current = out;
    }
    Ok(current)
}

impl Renderer for CpuRenderer {
    #[tracing::instrument(level = "debug", skip_all, fields(render = self.renders))]
    fn render(&mut self, scene: &PreviewScene) -> FxshotResult<()> {
        let geo = scene.output();
        let (w, h) = (geo.width, geo.height);

        let mut container = Surface::new(w, h);
        scene.background().draw_onto(&mut container)?;

        let mut subject = Surface::new(w, h);
        scene.subject().draw_onto(&mut subject)?;
        let subject = apply_chain(scene.effects(Scope::Subject), subject)?;
        over_surface(&mut container, &subject, 1.0)?;

        let container = apply_chain(scene.effects(Scope::Full), container)?;

        let mut stage = Surface::filled(w, h, geo.clear_rgba());
        over_surface(&mut stage, &container, 1.0)?;

        self.stage = Some(stage);
        self.renders += 1;
        Ok(())
    }

    fn extract_image(&self) -> FxshotResult<EncodedImage> {
        FrameRGBA::from_surface(self.last()?.clone()).encode_png()
    }

    fn extract_pixels(&self) -> FxshotResult<FrameRGBA> {
        Ok(FrameRGBA::from_surface(self.last()?.clone()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
