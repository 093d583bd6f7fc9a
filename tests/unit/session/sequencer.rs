use super::*;
use crate::capture::present::InMemoryPresenter;
use crate::render::cpu::CpuRenderer;
use futures::executor::block_on;
use serde_json::json;

fn sequencer(images: Vec<EffectDescriptor>) -> Sequencer<CpuRenderer, InMemoryPresenter> {
    let config = PreviewConfig::new(images);
    let assets = SceneAssets::synthetic(config.source_size).unwrap();
    Sequencer::from_config(&config, &assets, CpuRenderer::new(), InMemoryPresenter::new())
        .unwrap()
}

#[test]
fn empty_sequence_goes_straight_to_done() {
    let mut s = sequencer(Vec::new());
    assert_eq!(s.state(), SequencerState::Idle);
    let mut pacer = ImmediatePacer::new();
    let summary = block_on(s.run(&mut pacer)).unwrap();
    assert_eq!(summary, RunSummary::default());
    assert_eq!(s.state(), SequencerState::Done);
    assert_eq!(pacer.frames(), 0);
    assert!(s.frames().is_empty());
}

#[test]
fn step_advances_one_descriptor_at_a_time() {
    let mut s = sequencer(vec![
        EffectDescriptor::new("AlphaFilter"),
        EffectDescriptor::new("NoiseFilter").capture_frame("n"),
    ]);
    assert!(s.step().unwrap().is_some());
    assert_eq!((s.state(), s.cursor()), (SequencerState::Running, 1));
    assert!(s.frames().is_empty());
    assert!(s.step().unwrap().is_some());
    assert_eq!(s.cursor(), 2);
    assert!(s.frames().contains("n"));
    assert!(s.step().unwrap().is_none());
    assert_eq!(s.state(), SequencerState::Done);
    assert!(s.step().unwrap().is_none());
}

#[test]
fn pacer_is_awaited_after_every_cycle() {
    let mut s = sequencer(vec![
        EffectDescriptor::new("AlphaFilter"),
        EffectDescriptor::new("AlphaFilter"),
        EffectDescriptor::new("AlphaFilter"),
    ]);
    let mut pacer = ImmediatePacer::new();
    let summary = block_on(s.run(&mut pacer)).unwrap();
    assert_eq!(summary.cycles, 3);
    assert_eq!(pacer.frames(), 3);
}

#[test]
fn unknown_effect_halts_without_advancing() {
    let mut s = sequencer(vec![
        EffectDescriptor::new("AlphaFilter").capture_frame("a"),
        EffectDescriptor::new("DefinitelyNotARealFilter").capture_frame("b"),
        EffectDescriptor::new("AlphaFilter").capture_frame("c"),
    ]);
    let err = block_on(s.run(&mut ImmediatePacer::new())).unwrap_err();
    assert!(err.is_unknown_effect());
    assert_eq!(s.state(), SequencerState::Halted);
    assert_eq!(s.cursor(), 1);
    assert_eq!(s.frames().names().collect::<Vec<_>>(), vec!["a"]);
    assert!(s.step().is_err());
    assert_eq!(s.cursor(), 1);
}

#[test]
fn channel_pacer_waits_for_signals() {
    let mut s = sequencer(vec![
        EffectDescriptor::new("AlphaFilter"),
        EffectDescriptor::new("BlurFilter").with_option("strength", json!(2)),
    ]);
    let (tx, mut pacer) = ChannelPacer::channel();
    tx.unbounded_send(()).unwrap();
    tx.unbounded_send(()).unwrap();
    let summary = block_on(s.run(&mut pacer)).unwrap();
    assert_eq!(summary.cycles, 2);
}

#[test]
fn closed_signal_channel_stops_the_run() {
    let mut s = sequencer(vec![
        EffectDescriptor::new("AlphaFilter"),
        EffectDescriptor::new("AlphaFilter"),
    ]);
    let (tx, mut pacer) = ChannelPacer::channel();
    drop(tx);
    assert!(block_on(s.run(&mut pacer)).is_err());
    assert_eq!(s.cursor(), 1);
}
