//! The sequencer that drives descriptors through resolve, build and capture.

pub mod sequencer;

pub use sequencer::{
    ChannelPacer, FramePacer, ImmediatePacer, RunSummary, Sequencer, SequencerState,
};
