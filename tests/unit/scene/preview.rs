use super::*;
use crate::effects::filters::{AlphaFilter, NoiseFilter};

fn scene() -> PreviewScene {
    let assets = SceneAssets::synthetic(SourceSize::default()).unwrap();
    PreviewScene::setup(&assets, SourceSize::default(), OutputGeometry::default()).unwrap()
}

#[test]
fn setup_scales_layers_to_output_width() {
    let s = scene();
    let c = s.background().transform.as_coeffs();
    assert!((c[0] - 0.4375).abs() < 1e-12);
    assert!((c[3] - 0.4375).abs() < 1e-12);
    assert_eq!(s.subject().transform, s.background().transform);
    assert!(s.active_effects().is_empty());
}

#[test]
fn setup_rejects_empty_output() {
    let assets = SceneAssets::synthetic(SourceSize::default()).unwrap();
    let output = OutputGeometry {
        width: 0,
        ..OutputGeometry::default()
    };
    assert!(PreviewScene::setup(&assets, SourceSize::default(), output).is_err());
}

#[test]
fn attach_replaces_the_scope_list() {
    let mut s = scene();
    s.attach(Scope::Full, Box::new(AlphaFilter::default()));
    s.attach(Scope::Full, Box::new(NoiseFilter::default()));
    assert_eq!(s.active_effects(), vec![(Scope::Full, EffectKind::Noise)]);
    s.clear(Scope::Full);
    assert!(s.effects(Scope::Full).is_empty());
}

#[test]
fn begin_cycle_resets_both_scopes() {
    let mut s = scene();
    s.attach(Scope::Full, Box::new(AlphaFilter::default()));
    s.attach(Scope::Subject, Box::new(NoiseFilter::default()));
    assert_eq!(s.active_effects().len(), 2);

    let mut ctx = s.begin_cycle();
    assert!(ctx.scene().active_effects().is_empty());
    ctx.attach(Scope::Subject, Box::new(AlphaFilter::default()));
    assert_eq!(
        s.active_effects(),
        vec![(Scope::Subject, EffectKind::Alpha)]
    );
}
