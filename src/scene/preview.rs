use smallvec::SmallVec;

use crate::config::model::Scope;
use crate::effects::catalog::EffectKind;
use crate::effects::effect::Effect;
use crate::foundation::core::{OutputGeometry, SourceSize};
use crate::foundation::error::FxshotResult;
use crate::scene::assets::SceneAssets;
use crate::scene::texture::Sprite;

/// Effects attached to one scope; the driver keeps at most one there.
pub type EffectList = SmallVec<[Box<dyn Effect>; 1]>;

/// The canned preview scene: a background and a subject layer, each scaled once at setup.
///
/// The full-scene scope filters the composite of both layers; the subject scope filters only
/// the subject layer before it is composited.
#[derive(Debug)]
pub struct PreviewScene {
    output: OutputGeometry,
    background: Sprite,
    subject: Sprite,
    full_effects: EffectList,
    subject_effects: EffectList,
}

impl PreviewScene {
    /// Place the scene layers, scaled uniformly so the source width fills the output width.
    pub fn setup(
        assets: &SceneAssets,
        source: SourceSize,
        output: OutputGeometry,
    ) -> FxshotResult<Self> {
        output.validate()?;
        let scale = source.scale_to(&output);
        tracing::debug!(scale, width = output.width, height = output.height, "scene setup");
        Ok(Self {
            output,
            background: Sprite::new(assets.background.clone()).with_scale(scale),
            subject: Sprite::new(assets.subject.clone()).with_scale(scale),
            full_effects: SmallVec::new(),
            subject_effects: SmallVec::new(),
        })
    }

    pub fn output(&self) -> &OutputGeometry {
        &self.output
    }

    pub fn background(&self) -> &Sprite {
        &self.background
    }

    pub fn subject(&self) -> &Sprite {
        &self.subject
    }

    /// Effects currently attached to `scope`.
    pub fn effects(&self, scope: Scope) -> &[Box<dyn Effect>] {
        match scope {
            Scope::Full => &self.full_effects,
            Scope::Subject => &self.subject_effects,
        }
    }

    fn list_mut(&mut self, scope: Scope) -> &mut EffectList {
        match scope {
            Scope::Full => &mut self.full_effects,
            Scope::Subject => &mut self.subject_effects,
        }
    }

    /// Replace the effect list of `scope` with the single `effect`.
    pub fn attach(&mut self, scope: Scope, effect: Box<dyn Effect>) {
        let list = self.list_mut(scope);
        list.clear();
        list.push(effect);
    }

    pub fn clear(&mut self, scope: Scope) {
        self.list_mut(scope).clear();
    }

    /// Detach every effect from both scopes.
    pub fn reset_scopes(&mut self) {
        self.full_effects.clear();
        self.subject_effects.clear();
    }

    /// `(scope, kind)` for every attached effect, full scene first.
    pub fn active_effects(&self) -> Vec<(Scope, EffectKind)> {
        [Scope::Full, Scope::Subject]
            .into_iter()
            .flat_map(|scope| self.effects(scope).iter().map(move |e| (scope, e.kind())))
            .collect()
    }

    /// Start a render cycle: both scopes are reset before anything can be attached.
    pub fn begin_cycle(&mut self) -> RenderContext<'_> {
        self.reset_scopes();
        RenderContext { scene: self }
    }
}

/// One cycle's exclusive handle on the scene.
///
/// Created by [`PreviewScene::begin_cycle`]; attachment state from previous cycles is gone by
/// the time a context exists.
#[derive(Debug)]
pub struct RenderContext<'a> {
    scene: &'a mut PreviewScene,
}

impl RenderContext<'_> {
    /// Attach the cycle's effect to `scope`.
    pub fn attach(&mut self, scope: Scope, effect: Box<dyn Effect>) {
        self.scene.attach(scope, effect);
    }

    pub fn scene(&self) -> &PreviewScene {
        self.scene
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/preview.rs"]
mod tests;
