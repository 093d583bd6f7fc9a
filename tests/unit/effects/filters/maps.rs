use super::*;
use serde_json::json;

fn identity_lut(size: u32) -> Texture {
    let mut bytes = Vec::new();
    let step = |i: u32| ((i * 255) / (size - 1)) as u8;
    for y in 0..size {
        for slice in 0..size {
            for x in 0..size {
                bytes.extend_from_slice(&[step(x), step(y), step(slice), 255]);
            }
        }
    }
    Texture::from_premul(size * size, size, bytes).unwrap()
}

fn inverting_lut(size: u32) -> Texture {
    let id = identity_lut(size);
    let mut bytes = id.data().to_vec();
    for px in bytes.chunks_exact_mut(4) {
        for c in 0..3 {
            px[c] = 255 - px[c];
        }
    }
    Texture::from_premul(id.width(), id.height(), bytes).unwrap()
}

fn one_px(effect: &dyn Effect, px: [u8; 4]) -> [u8; 4] {
    let input = Surface::filled(1, 1, px);
    let mut output = Surface::new(1, 1);
    effect.apply(&input, &mut output).unwrap();
    output.pixel(0, 0)
}

#[test]
fn color_map_rejects_non_strip_textures() {
    let tex = Texture::from_premul(3, 2, vec![0; 24]).unwrap();
    assert!(ColorMapFilter::new(tex, false).is_err());
}

#[test]
fn identity_lut_preserves_corner_colors() {
    let f = ColorMapFilter::new(identity_lut(4), false).unwrap();
    for px in [[255, 0, 0, 255], [0, 255, 255, 255], [0, 0, 0, 255]] {
        assert_eq!(one_px(&f, px), px);
    }
}

#[test]
fn inverting_lut_inverts_and_mix_blends_back() {
    let mut f = ColorMapFilter::new(inverting_lut(4), false).unwrap();
    assert_eq!(one_px(&f, [255, 0, 255, 255]), [0, 255, 0, 255]);
    f.set_param("mix", &json!(0)).unwrap();
    assert_eq!(one_px(&f, [255, 0, 255, 255]), [255, 0, 255, 255]);
}

#[test]
fn color_map_skips_transparent_pixels() {
    let f = ColorMapFilter::new(inverting_lut(4), true).unwrap();
    assert_eq!(one_px(&f, [0, 0, 0, 0]), [0, 0, 0, 0]);
}

#[test]
fn white_lightmap_is_identity_and_black_darkens() {
    let white = Texture::from_premul(2, 2, [255u8; 16].to_vec()).unwrap();
    let black = Texture::from_premul(2, 2, [0u8, 0, 0, 255].repeat(4)).unwrap();

    let lit = SimpleLightmapFilter::new(white);
    assert_eq!(one_px(&lit, [100, 50, 25, 255]), [100, 50, 25, 255]);

    let mut dark = SimpleLightmapFilter::new(black);
    assert_eq!(one_px(&dark, [100, 50, 25, 255]), [0, 0, 0, 255]);

    dark.set_param("color", &json!(0xffffff)).unwrap();
    assert_eq!(one_px(&dark, [100, 50, 25, 255]), [100, 50, 25, 255]);
}
