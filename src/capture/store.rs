use std::collections::BTreeMap;

use crate::render::backend::FrameRGBA;

/// Frames captured during a run, keyed by frame name.
///
/// Buffers are straight-alpha row-major RGBA at output size. Reusing a name overwrites the
/// earlier frame. Nothing is ever removed during a run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameStore {
    frames: BTreeMap<String, FrameRGBA>,
}

impl FrameStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `frame` under `name`, returning the frame it replaced.
    pub fn insert(&mut self, name: impl Into<String>, frame: FrameRGBA) -> Option<FrameRGBA> {
        self.frames.insert(name.into(), frame)
    }

    pub fn get(&self, name: &str) -> Option<&FrameRGBA> {
        self.frames.get(name)
    }

    /// Raw bytes of frame `name`.
    pub fn bytes(&self, name: &str) -> Option<&[u8]> {
        self.frames.get(name).map(|f| f.data.as_slice())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.frames.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frame names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.frames.keys().map(String::as_str)
    }

    /// `(name, frame)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FrameRGBA)> {
        self.frames.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// xxh3-64 of frame `name`'s bytes, for cheap comparison against reference runs.
    pub fn fingerprint(&self, name: &str) -> Option<u64> {
        self.bytes(name).map(xxhash_rust::xxh3::xxh3_64)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/store.rs"]
mod tests;
