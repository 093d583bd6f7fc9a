//! Shared CPU pixel kernels used by the effect implementations.
//!
//! Everything here works on premultiplied RGBA8 [`Surface`]s of identical size. Row-level data
//! parallelism comes from `rayon`; it never outlives a single `apply` call.

use crate::foundation::error::{FxshotError, FxshotResult};
use crate::foundation::math::unit_to_u8;
use crate::render::surface::Surface;
use rayon::prelude::*;

pub(crate) fn to_unit(px: [u8; 4]) -> [f32; 4] {
    [
        f32::from(px[0]) / 255.0,
        f32::from(px[1]) / 255.0,
        f32::from(px[2]) / 255.0,
        f32::from(px[3]) / 255.0,
    ]
}

pub(crate) fn from_unit(px: [f32; 4]) -> [u8; 4] {
    let a = px[3].clamp(0.0, 1.0);
    // Keep the premultiplied invariant rgb <= a.
    [
        unit_to_u8(px[0].clamp(0.0, a)),
        unit_to_u8(px[1].clamp(0.0, a)),
        unit_to_u8(px[2].clamp(0.0, a)),
        unit_to_u8(a),
    ]
}

/// Premultiplied -> straight alpha, channels in `[0, 1]`.
pub(crate) fn unpremul(px: [f32; 4]) -> [f32; 4] {
    let a = px[3];
    if a <= 0.0 {
        return [0.0, 0.0, 0.0, 0.0];
    }
    [px[0] / a, px[1] / a, px[2] / a, a]
}

/// Straight -> premultiplied alpha, channels in `[0, 1]`.
pub(crate) fn premul(px: [f32; 4]) -> [f32; 4] {
    let a = px[3].clamp(0.0, 1.0);
    [
        px[0].clamp(0.0, 1.0) * a,
        px[1].clamp(0.0, 1.0) * a,
        px[2].clamp(0.0, 1.0) * a,
        a,
    ]
}

pub(crate) fn luminance(rgb: [f32; 3]) -> f32 {
    0.299 * rgb[0] + 0.587 * rgb[1] + 0.114 * rgb[2]
}

fn check_sizes(src: &Surface, dst: &Surface) -> FxshotResult<()> {
    if !src.same_size(dst) {
        return Err(FxshotError::render(format!(
            "effect input {}x{} does not match output {}x{}",
            src.width(),
            src.height(),
            dst.width(),
            dst.height()
        )));
    }
    Ok(())
}

/// Per-pixel transform, independent of position.
pub(crate) fn map_pixels<F>(src: &Surface, dst: &mut Surface, f: F) -> FxshotResult<()>
where
    F: Fn([u8; 4]) -> [u8; 4] + Sync,
{
    check_sizes(src, dst)?;
    dst.data_mut()
        .par_chunks_exact_mut(4)
        .zip(src.data().par_chunks_exact(4))
        .for_each(|(d, s)| {
            let out = f([s[0], s[1], s[2], s[3]]);
            d.copy_from_slice(&out);
        });
    Ok(())
}

/// Positional transform: `f(x, y)` produces the output pixel at `(x, y)`.
pub(crate) fn map_coords<F>(src: &Surface, dst: &mut Surface, f: F) -> FxshotResult<()>
where
    F: Fn(u32, u32) -> [u8; 4] + Sync,
{
    check_sizes(src, dst)?;
    let stride = dst.stride();
    if stride == 0 {
        return Ok(());
    }
    dst.data_mut()
        .par_chunks_exact_mut(stride)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, px) in row.chunks_exact_mut(4).enumerate() {
                px.copy_from_slice(&f(x as u32, y as u32));
            }
        });
    Ok(())
}

/// Largest gaussian radius, in pixels, a single blur pass samples.
pub(crate) const MAX_BLUR_RADIUS: u32 = 256;

/// Upper bound on blur strength parameters; larger values would only hit the radius cap.
pub(crate) const MAX_BLUR_STRENGTH: u32 = 512;

pub(crate) fn gaussian_kernel_q16(radius: u32, sigma: f32) -> FxshotResult<Vec<u32>> {
    if radius == 0 {
        return Ok(vec![1 << 16]);
    }
    if radius > MAX_BLUR_RADIUS {
        return Err(FxshotError::validation(format!(
            "blur radius {radius} exceeds {MAX_BLUR_RADIUS}"
        )));
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(FxshotError::validation("blur sigma must be finite and > 0"));
    }

    let r = radius as i32;
    let mut weights_f = Vec::<f64>::with_capacity((2 * r + 1) as usize);
    let mut sum = 0.0f64;
    let sigma = f64::from(sigma);
    let denom = 2.0 * sigma * sigma;
    for i in -r..=r {
        let x = f64::from(i);
        let w = (-x * x / denom).exp();
        weights_f.push(w);
        sum += w;
    }
    if sum <= 0.0 {
        return Err(FxshotError::render("gaussian kernel sum is zero"));
    }

    let mut weights = Vec::<u32>::with_capacity(weights_f.len());
    let mut acc: i64 = 0;
    for &wf in &weights_f {
        let q = ((wf / sum) * 65536.0).round() as i64;
        let q = q.clamp(0, 65536);
        weights.push(q as u32);
        acc += q;
    }
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        let new_mid = (i64::from(weights[mid]) + delta).clamp(0, 65536);
        weights[mid] = new_mid as u32;
    }

    Ok(weights)
}

/// Kernel for a gaussian of standard deviation `sigma`, truncated at three sigma.
///
/// Sigma is capped so the radius never exceeds [`MAX_BLUR_RADIUS`].
pub(crate) fn gaussian_for_sigma(sigma: f32) -> FxshotResult<Vec<u32>> {
    if sigma <= 0.0 {
        return gaussian_kernel_q16(0, 1.0);
    }
    let sigma = sigma.min(MAX_BLUR_RADIUS as f32 / 3.0);
    let radius = ((sigma * 3.0).ceil().max(1.0) as u32).min(MAX_BLUR_RADIUS);
    gaussian_kernel_q16(radius, sigma)
}

/// Separable blur with independent horizontal and vertical kernels, edge-clamped.
pub(crate) fn blur_separable(
    src: &Surface,
    dst: &mut Surface,
    kernel_x: &[u32],
    kernel_y: &[u32],
) -> FxshotResult<()> {
    check_sizes(src, dst)?;
    let mut tmp = Surface::new(src.width(), src.height());
    horizontal_blur_q16(src, &mut tmp, kernel_x);
    vertical_blur_q16(&tmp, dst, kernel_y);
    Ok(())
}

fn horizontal_blur_q16(src: &Surface, dst: &mut Surface, k: &[u32]) {
    if k.len() == 1 {
        dst.data_mut().copy_from_slice(src.data());
        return;
    }
    let radius = (k.len() / 2) as i32;
    let stride = src.stride();
    if stride == 0 {
        return;
    }
    dst.data_mut()
        .par_chunks_exact_mut(stride)
        .enumerate()
        .for_each(|(y, row)| {
            let y = y as i32;
            for (x, out) in row.chunks_exact_mut(4).enumerate() {
                let mut acc = [0u64; 4];
                for (ki, &kw) in k.iter().enumerate() {
                    let sx = x as i32 + ki as i32 - radius;
                    let px = src.pixel_clamped(sx, y);
                    for c in 0..4 {
                        acc[c] += u64::from(kw) * u64::from(px[c]);
                    }
                }
                for c in 0..4 {
                    out[c] = q16_to_u8(acc[c]);
                }
            }
        });
}

fn vertical_blur_q16(src: &Surface, dst: &mut Surface, k: &[u32]) {
    if k.len() == 1 {
        dst.data_mut().copy_from_slice(src.data());
        return;
    }
    let radius = (k.len() / 2) as i32;
    let stride = src.stride();
    if stride == 0 {
        return;
    }
    dst.data_mut()
        .par_chunks_exact_mut(stride)
        .enumerate()
        .for_each(|(y, row)| {
            let y = y as i32;
            for (x, out) in row.chunks_exact_mut(4).enumerate() {
                let mut acc = [0u64; 4];
                for (ki, &kw) in k.iter().enumerate() {
                    let sy = y + ki as i32 - radius;
                    let px = src.pixel_clamped(x as i32, sy);
                    for c in 0..4 {
                        acc[c] += u64::from(kw) * u64::from(px[c]);
                    }
                }
                for c in 0..4 {
                    out[c] = q16_to_u8(acc[c]);
                }
            }
        });
}

fn q16_to_u8(acc: u64) -> u8 {
    let v = (acc + 32768) >> 16;
    (v.min(255)) as u8
}

/// Apply a 5x4 color matrix (offsets in `[0, 1]` units) in straight-alpha space.
pub(crate) fn color_matrix_px(px: [u8; 4], m: &[f32; 20], mix: f32) -> [u8; 4] {
    let [r, g, b, a] = unpremul(to_unit(px));

    let out_r = (m[0] * r + m[1] * g + m[2] * b + m[3] * a + m[4]).clamp(0.0, 1.0);
    let out_g = (m[5] * r + m[6] * g + m[7] * b + m[8] * a + m[9]).clamp(0.0, 1.0);
    let out_b = (m[10] * r + m[11] * g + m[12] * b + m[13] * a + m[14]).clamp(0.0, 1.0);
    let out_a = (m[15] * r + m[16] * g + m[17] * b + m[18] * a + m[19]).clamp(0.0, 1.0);

    let mix = mix.clamp(0.0, 1.0);
    let lerp = |from: f32, to: f32| from + (to - from) * mix;
    from_unit(premul([
        lerp(r, out_r),
        lerp(g, out_g),
        lerp(b, out_b),
        lerp(a, out_a),
    ]))
}

#[cfg(test)]
#[path = "../../tests/unit/effects/kernel.rs"]
mod tests;
