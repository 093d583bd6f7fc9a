use std::path::Path;

use anyhow::Context;

use crate::effects::builder::EffectResources;
use crate::foundation::core::SourceSize;
use crate::foundation::error::FxshotResult;
use crate::foundation::math::hash_unit;
use crate::scene::texture::{Sprite, Texture};

/// Asset file names expected in an assets directory.
pub const BACKGROUND_FILE: &str = "preview_background.png";
pub const SUBJECT_FILE: &str = "preview_fishes.png";
pub const LIGHTMAP_FILE: &str = "lightmap.png";
pub const DISPLACEMENT_FILE: &str = "displacement.png";
pub const COLORMAP_FILE: &str = "colormap.png";

const SYNTHETIC_LUT_SIZE: u32 = 16;

/// Decoded textures the preview scene and resource-backed effects are built from.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneAssets {
    pub background: Texture,
    /// Subject layer, drawn over the background.
    pub subject: Texture,
    pub lightmap: Texture,
    pub displacement: Texture,
    pub colormap: Texture,
}

impl SceneAssets {
    /// Decode every asset from `dir`.
    #[tracing::instrument(skip_all, fields(dir = %dir.as_ref().display()))]
    pub fn load_dir(dir: impl AsRef<Path>) -> FxshotResult<Self> {
        let dir = dir.as_ref();
        let load = |file: &str| -> FxshotResult<Texture> {
            let path = dir.join(file);
            let bytes = std::fs::read(&path)
                .with_context(|| format!("read asset '{}'", path.display()))?;
            let tex = Texture::decode(&bytes)
                .map_err(anyhow::Error::from)
                .with_context(|| format!("decode asset '{}'", path.display()))?;
            tracing::debug!(file, width = tex.width(), height = tex.height(), "asset loaded");
            Ok(tex)
        };
        Ok(Self {
            background: load(BACKGROUND_FILE)?,
            subject: load(SUBJECT_FILE)?,
            lightmap: load(LIGHTMAP_FILE)?,
            displacement: load(DISPLACEMENT_FILE)?,
            colormap: load(COLORMAP_FILE)?,
        })
    }

    /// Deterministic stand-in assets at the given source size.
    pub fn synthetic(source: SourceSize) -> FxshotResult<Self> {
        let (w, h) = (source.width.max(1), source.height.max(1));
        Ok(Self {
            background: Texture::from_straight(w, h, background_pixels(w, h))?,
            subject: Texture::from_straight(w, h, subject_pixels(w, h))?,
            lightmap: Texture::from_straight(w, h, lightmap_pixels(w, h))?,
            displacement: Texture::from_straight(
                w.min(256),
                h.min(256),
                displacement_pixels(w.min(256), h.min(256)),
            )?,
            colormap: Texture::from_straight(
                SYNTHETIC_LUT_SIZE * SYNTHETIC_LUT_SIZE,
                SYNTHETIC_LUT_SIZE,
                colormap_pixels(SYNTHETIC_LUT_SIZE),
            )?,
        })
    }

    /// Shared resources for displacement, lightmap and color-map effects.
    ///
    /// The displacement sprite stays at its native size; only the scene layers are scaled.
    pub fn effect_resources(&self) -> EffectResources {
        EffectResources {
            displacement: Sprite::new(self.displacement.clone()),
            lightmap: self.lightmap.clone(),
            colormap: self.colormap.clone(),
        }
    }
}

fn unit(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

// Vertical sea gradient with soft horizontal bands.
fn background_pixels(w: u32, h: u32) -> Vec<u8> {
    let mut out = Vec::with_capacity((w * h * 4) as usize);
    for y in 0..h {
        let t = y as f32 / h as f32;
        for x in 0..w {
            let band = ((x as f32 / w as f32) * 12.0 + t * 3.0).sin() * 0.08;
            out.extend_from_slice(&[
                unit(0.10 + 0.15 * t + band),
                unit(0.45 + 0.25 * t),
                unit(0.75 - 0.25 * t + band),
                255,
            ]);
        }
    }
    out
}

// A few opaque ellipses with tails on a transparent layer.
fn subject_pixels(w: u32, h: u32) -> Vec<u8> {
    let fish = [
        (0.30f32, 0.35f32, 0.10f32, [250u8, 140, 40]),
        (0.62, 0.58, 0.13, [240, 90, 60]),
        (0.45, 0.75, 0.07, [250, 210, 60]),
    ];
    let mut out = vec![0u8; (w * h * 4) as usize];
    for y in 0..h {
        for x in 0..w {
            let (u, v) = (x as f32 / w as f32, y as f32 / h as f32);
            for &(cx, cy, r, rgb) in &fish {
                let dx = (u - cx) / r;
                let dy = (v - cy) / (r * 0.9);
                let body = dx * dx + dy * dy <= 1.0;
                let tail = dx < -0.8 && dx > -1.6 && dy.abs() < (-0.8 - dx) * 0.9;
                if body || tail {
                    let i = ((y * w + x) * 4) as usize;
                    out[i..i + 4].copy_from_slice(&[rgb[0], rgb[1], rgb[2], 255]);
                }
            }
        }
    }
    out
}

fn lightmap_pixels(w: u32, h: u32) -> Vec<u8> {
    let mut out = Vec::with_capacity((w * h * 4) as usize);
    for y in 0..h {
        for x in 0..w {
            let dx = x as f32 / w as f32 - 0.5;
            let dy = y as f32 / h as f32 - 0.4;
            let l = unit(1.1 - (dx * dx + dy * dy).sqrt() * 1.8);
            out.extend_from_slice(&[l, l, l, 255]);
        }
    }
    out
}

fn displacement_pixels(w: u32, h: u32) -> Vec<u8> {
    let mut out = Vec::with_capacity((w * h * 4) as usize);
    for y in 0..h {
        for x in 0..w {
            let jitter = (hash_unit(0x5eed, x / 8, y / 8) - 0.5) * 0.2;
            let r = 0.5 + 0.4 * (x as f32 * 0.09).sin() + jitter;
            let g = 0.5 + 0.4 * (y as f32 * 0.07).cos() - jitter;
            out.extend_from_slice(&[unit(r), unit(g), 128, 255]);
        }
    }
    out
}

// Warm-shifted 3D lookup strip: `size` slices of `size x size`, blue selects the slice.
fn colormap_pixels(size: u32) -> Vec<u8> {
    let step = |i: u32| i as f32 / (size - 1) as f32;
    let mut out = Vec::with_capacity((size * size * size * 4) as usize);
    for y in 0..size {
        for slice in 0..size {
            for x in 0..size {
                let (r, g, b) = (step(x), step(y), step(slice));
                out.extend_from_slice(&[
                    unit(r * 0.9 + 0.1),
                    unit(g * 0.85 + 0.05),
                    unit(b * 0.7),
                    255,
                ]);
            }
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/scene/assets.rs"]
mod tests;
