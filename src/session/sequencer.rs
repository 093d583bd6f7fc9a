use std::future::Future;

use futures::StreamExt;
use futures::channel::mpsc;
use tracing::{debug, error, info};

use crate::capture::driver::{CaptureDriver, CaptureReport};
use crate::capture::present::PresentationSink;
use crate::capture::store::FrameStore;
use crate::config::model::{EffectDescriptor, PreviewConfig};
use crate::effects::builder::{EffectResources, build_effect};
use crate::effects::catalog::resolve;
use crate::foundation::error::{FxshotError, FxshotResult};
use crate::render::backend::Renderer;
use crate::scene::assets::SceneAssets;
use crate::scene::preview::PreviewScene;

/// Lifecycle of a [`Sequencer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequencerState {
    /// Scene is set up; no cycle has run.
    Idle,
    /// At least one step has been taken and descriptors remain.
    Running,
    /// Every descriptor has been processed.
    Done,
    /// A cycle failed; the cursor stays on the failing descriptor.
    Halted,
}

/// Signals that the rendering surface has presented a frame and the next cycle may start.
pub trait FramePacer {
    fn frame_presented(&mut self) -> impl Future<Output = FxshotResult<()>>;
}

/// Pacer for headless runs: every frame is presented immediately.
#[derive(Debug, Default)]
pub struct ImmediatePacer {
    frames: u64,
}

impl ImmediatePacer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames waited for so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl FramePacer for ImmediatePacer {
    fn frame_presented(&mut self) -> impl Future<Output = FxshotResult<()>> {
        self.frames += 1;
        futures::future::ready(Ok(()))
    }
}

/// Pacer driven by a host that sends `()` on every presented frame.
#[derive(Debug)]
pub struct ChannelPacer {
    rx: mpsc::UnboundedReceiver<()>,
}

impl ChannelPacer {
    /// Create the pacer and the sender the host signals presented frames on.
    pub fn channel() -> (mpsc::UnboundedSender<()>, Self) {
        let (tx, rx) = mpsc::unbounded();
        (tx, Self { rx })
    }
}

impl FramePacer for ChannelPacer {
    async fn frame_presented(&mut self) -> FxshotResult<()> {
        self.rx
            .next()
            .await
            .ok_or_else(|| FxshotError::render("frame signal channel closed"))
    }
}

/// Totals of a completed run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Completed cycles.
    pub cycles: usize,
    /// Images handed to the presentation sink.
    pub images: u64,
    /// Distinct frames in the store.
    pub frames: usize,
}

/// Processes descriptors strictly in order, one render-and-capture cycle at a time.
#[derive(Debug)]
pub struct Sequencer<R, P> {
    images: Vec<EffectDescriptor>,
    cursor: usize,
    cycles: usize,
    state: SequencerState,
    scene: PreviewScene,
    resources: EffectResources,
    driver: CaptureDriver<R, P>,
}

impl<R: Renderer, P: PresentationSink> Sequencer<R, P> {
    pub fn new(
        images: Vec<EffectDescriptor>,
        scene: PreviewScene,
        resources: EffectResources,
        driver: CaptureDriver<R, P>,
    ) -> Self {
        Self {
            images,
            cursor: 0,
            cycles: 0,
            state: SequencerState::Idle,
            scene,
            resources,
            driver,
        }
    }

    /// Set up the scene for `config` from `assets` and wrap a fresh capture driver.
    ///
    /// The config is not validated here; unknown names surface when their cycle runs.
    pub fn from_config(
        config: &PreviewConfig,
        assets: &SceneAssets,
        renderer: R,
        presenter: P,
    ) -> FxshotResult<Self> {
        let scene = PreviewScene::setup(assets, config.source_size, config.output)?;
        Ok(Self::new(
            config.images.clone(),
            scene,
            assets.effect_resources(),
            CaptureDriver::new(renderer, presenter),
        ))
    }

    pub fn state(&self) -> SequencerState {
        self.state
    }

    /// Index of the next descriptor to process.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Completed cycles.
    pub fn cycles(&self) -> usize {
        self.cycles
    }

    pub fn scene(&self) -> &PreviewScene {
        &self.scene
    }

    pub fn driver(&self) -> &CaptureDriver<R, P> {
        &self.driver
    }

    pub fn frames(&self) -> &FrameStore {
        self.driver.frames()
    }

    /// Consume the sequencer, returning the frame store and the presenter.
    pub fn finish(self) -> (FrameStore, P) {
        self.driver.finish()
    }

    /// Run one cycle: resolve, build and capture the descriptor at the cursor.
    ///
    /// Returns `Ok(None)` once every descriptor has been processed. A failed cycle halts the
    /// sequencer without advancing the cursor; later calls keep failing.
    #[tracing::instrument(level = "debug", skip(self), fields(cursor = self.cursor))]
    pub fn step(&mut self) -> FxshotResult<Option<CaptureReport>> {
        match self.state {
            SequencerState::Done => return Ok(None),
            SequencerState::Halted => {
                return Err(FxshotError::validation(format!(
                    "sequencer halted at descriptor {}",
                    self.cursor
                )));
            }
            SequencerState::Idle => self.state = SequencerState::Running,
            SequencerState::Running => {}
        }

        let Some(desc) = self.images.get(self.cursor) else {
            self.state = SequencerState::Done;
            info!(cycles = self.cycles, "sequence done");
            return Ok(None);
        };

        let result = resolve(&desc.name)
            .map_err(FxshotError::from)
            .and_then(|kind| build_effect(kind, desc, &self.resources))
            .and_then(|effect| self.driver.capture(&mut self.scene, effect, desc));

        match result {
            Ok(report) => {
                debug!(name = desc.name.as_str(), ?report, "cycle complete");
                self.cursor += 1;
                self.cycles += 1;
                Ok(Some(report))
            }
            Err(e) => {
                error!(
                    index = self.cursor,
                    name = desc.name.as_str(),
                    error = %e,
                    "cycle failed; halting"
                );
                self.state = SequencerState::Halted;
                Err(e)
            }
        }
    }

    /// Drive the sequence to completion, awaiting `pacer` after every cycle.
    #[tracing::instrument(skip_all, fields(descriptors = self.images.len()))]
    pub async fn run<F: FramePacer>(&mut self, pacer: &mut F) -> FxshotResult<RunSummary> {
        while self.step()?.is_some() {
            pacer.frame_presented().await?;
        }
        Ok(RunSummary {
            cycles: self.cycles,
            images: self.driver.image_extractions(),
            frames: self.driver.frames().len(),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/sequencer.rs"]
mod tests;
