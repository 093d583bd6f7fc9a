use super::*;
use crate::effects::filters::{AlphaFilter, ColorOverlayFilter};
use crate::foundation::core::{OutputGeometry, SourceSize};
use crate::scene::assets::SceneAssets;
use serde_json::json;

fn scene() -> PreviewScene {
    let assets = SceneAssets::synthetic(SourceSize::default()).unwrap();
    PreviewScene::setup(&assets, SourceSize::default(), OutputGeometry::default()).unwrap()
}

fn render(scene: &PreviewScene) -> FrameRGBA {
    let mut r = CpuRenderer::new();
    r.render(scene).unwrap();
    r.extract_pixels().unwrap()
}

#[test]
fn extraction_before_render_fails() {
    let r = CpuRenderer::new();
    assert!(r.extract_pixels().is_err());
    assert!(r.extract_image().is_err());
}

#[test]
fn render_is_opaque_at_output_size() {
    let s = scene();
    let frame = render(&s);
    assert_eq!((frame.width, frame.height), (280, 140));
    assert_eq!(frame.data.len(), s.output().frame_byte_len());
    assert!(frame.data.chunks_exact(4).all(|px| px[3] == 255));
}

#[test]
fn render_is_deterministic() {
    let s = scene();
    assert_eq!(render(&s), render(&s));
}

#[test]
fn identity_effect_matches_between_scopes() {
    let mut s = scene();
    let plain = render(&s);
    s.attach(Scope::Full, Box::new(AlphaFilter::default()));
    let full = render(&s);
    s.reset_scopes();
    s.attach(Scope::Subject, Box::new(AlphaFilter::default()));
    let subject = render(&s);
    assert_eq!(full, plain);
    assert_eq!(subject, plain);
}

#[test]
fn overlay_differs_between_scopes() {
    let mut overlay = ColorOverlayFilter::default();
    overlay.set_param("color", &json!(0xff00ff)).unwrap();

    let mut s = scene();
    s.attach(Scope::Full, Box::new(overlay.clone()));
    let full = render(&s);
    s.reset_scopes();
    s.attach(Scope::Subject, Box::new(overlay));
    let subject = render(&s);
    assert_ne!(full, subject);
}

#[test]
fn render_count_tracks_passes() {
    let s = scene();
    let mut r = CpuRenderer::new();
    r.render(&s).unwrap();
    r.render(&s).unwrap();
    assert_eq!(r.render_count(), 2);
}
