use super::*;
use crate::scene::texture::Texture;
use serde_json::json;

fn gradient(w: u32, h: u32) -> Surface {
    let mut s = Surface::new(w, h);
    for y in 0..h {
        for x in 0..w {
            let idx = ((y * w + x) * 4) as usize;
            let v = (x * 255 / (w - 1)) as u8;
            s.data_mut()[idx..idx + 4].copy_from_slice(&[v, 0, 0, 255]);
        }
    }
    s
}

fn flat_map(r: u8, g: u8) -> Sprite {
    Sprite::new(Texture::from_premul(2, 2, [r, g, 0, 255].repeat(4)).unwrap())
}

#[test]
fn neutral_displacement_map_is_identity() {
    let f = DisplacementFilter::new(flat_map(128, 128), DISPLACEMENT_SCALE);
    let input = gradient(16, 4);
    let mut output = Surface::new(16, 4);
    f.apply(&input, &mut output).unwrap();
    for x in 1..15 {
        let (a, b) = (output.pixel(x, 2)[0], input.pixel(x, 2)[0]);
        // 128/255 is a hair above neutral.
        assert!((i32::from(a) - i32::from(b)).abs() <= 2);
    }
}

#[test]
fn red_channel_shifts_horizontally() {
    let mut f = DisplacementFilter::new(flat_map(255, 128), 4.0);
    f.set_param("scale", &json!([4, 0])).unwrap();
    let input = gradient(16, 4);
    let mut output = Surface::new(16, 4);
    f.apply(&input, &mut output).unwrap();
    // Map value 1.0 shifts the lookup +2px.
    assert_eq!(output.pixel(5, 1), input.pixel(7, 1));
}

#[test]
fn bulge_keeps_pixels_outside_radius() {
    let mut f = BulgePinchFilter::default();
    f.set_param("radius", &json!(3)).unwrap();
    let input = gradient(32, 32);
    let mut output = Surface::new(32, 32);
    f.apply(&input, &mut output).unwrap();
    assert_eq!(output.pixel(1, 1), input.pixel(1, 1));
    assert_eq!(output.pixel(30, 30), input.pixel(30, 30));
}

#[test]
fn twist_with_zero_angle_is_identity() {
    let mut f = TwistFilter::default();
    f.set_param("angle", &json!(0)).unwrap();
    let input = gradient(16, 16);
    let mut output = Surface::new(16, 16);
    f.apply(&input, &mut output).unwrap();
    assert_eq!(output, input);
}

#[test]
fn twist_rotates_inside_radius() {
    let input = gradient(32, 32);
    let mut output = Surface::new(32, 32);
    TwistFilter::default().apply(&input, &mut output).unwrap();
    assert_ne!(output, input);
}

#[test]
fn rgb_split_zero_offsets_is_identity() {
    let mut f = RgbSplitFilter::default();
    f.set_param("red", &json!({"x": 0, "y": 0})).unwrap();
    f.set_param("green", &json!([0, 0])).unwrap();
    let input = gradient(8, 8);
    let mut output = Surface::new(8, 8);
    f.apply(&input, &mut output).unwrap();
    assert_eq!(output, input);
}
