use std::io::Cursor;

use super::*;

#[test]
fn decode_png_dimensions_and_premul() {
    let img = image::RgbaImage::from_raw(1, 1, vec![100u8, 50u8, 200u8, 128u8]).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();

    let tex = Texture::decode(&buf).unwrap();
    assert_eq!((tex.width(), tex.height()), (1, 1));
    assert_eq!(
        tex.data(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn decode_rejects_garbage() {
    assert!(Texture::decode(b"not an image").is_err());
}

#[test]
fn repeat_wraps_and_clamp_saturates() {
    let tex = Texture::from_premul(2, 1, vec![255, 0, 0, 255, 0, 0, 255, 255]).unwrap();
    let wrapped = tex.sample_texel(2.5, 0.5, Wrap::Repeat, Sampling::Nearest);
    assert_eq!(wrapped, [1.0, 0.0, 0.0, 1.0]);
    let clamped = tex.sample_texel(2.5, 0.5, Wrap::Clamp, Sampling::Nearest);
    assert_eq!(clamped, [0.0, 0.0, 1.0, 1.0]);
}

#[test]
fn scaled_sprite_covers_scaled_area_only() {
    let tex = Texture::from_premul(4, 4, [0u8, 0, 255, 255].repeat(16)).unwrap();
    let sprite = Sprite::new(tex).with_scale(0.5);
    let mut dst = Surface::filled(4, 4, [255, 255, 255, 255]);
    sprite.draw_onto(&mut dst).unwrap();
    assert_eq!(dst.pixel(0, 0), [0, 0, 255, 255]);
    assert_eq!(dst.pixel(1, 1), [0, 0, 255, 255]);
    assert_eq!(dst.pixel(3, 3), [255, 255, 255, 255]);
}
