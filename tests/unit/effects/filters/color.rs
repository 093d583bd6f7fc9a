use super::*;
use serde_json::json;

fn run(effect: &dyn Effect, px: [u8; 4]) -> [u8; 4] {
    let input = Surface::filled(2, 2, px);
    let mut output = Surface::new(2, 2);
    effect.apply(&input, &mut output).unwrap();
    output.pixel(1, 1)
}

#[test]
fn alpha_scales_premultiplied_pixel() {
    let mut f = AlphaFilter::default();
    f.set_param("alpha", &json!(0.5)).unwrap();
    assert_eq!(run(&f, [200, 100, 0, 255]), [100, 50, 0, 128]);
}

#[test]
fn alpha_rejects_unknown_property() {
    let mut f = AlphaFilter::default();
    let err = f.set_param("opacity", &json!(0.5)).unwrap_err();
    assert!(err.to_string().contains("AlphaFilter"));
}

#[test]
fn color_matrix_negative_inverts_opaque_pixels() {
    let mut f = ColorMatrixFilter::default();
    assert!(f.invoke("negative", &[]).unwrap());
    assert_eq!(run(&f, [255, 0, 100, 255]), [0, 255, 155, 255]);
}

#[test]
fn color_matrix_unknown_method_is_reported_not_failed() {
    let mut f = ColorMatrixFilter::default();
    assert!(!f.invoke("vintageDreams", &[json!(1)]).unwrap());
    assert_eq!(f, ColorMatrixFilter::default());
}

#[test]
fn color_matrix_multiply_composes_presets() {
    let mut f = ColorMatrixFilter::default();
    f.brightness(0.5, false);
    f.brightness(0.5, true);
    assert!((f.matrix[0] - 0.25).abs() < 1e-6);
    assert!((f.matrix[18] - 1.0).abs() < 1e-6);

    f.invoke("reset", &[]).unwrap();
    assert_eq!(f.matrix, IDENTITY_MATRIX);
}

#[test]
fn color_matrix_hue_zero_is_identity() {
    let mut f = ColorMatrixFilter::default();
    f.hue(0.0, false);
    for (a, b) in f.matrix.iter().zip(IDENTITY_MATRIX) {
        assert!((a - b).abs() < 1e-6);
    }
}

#[test]
fn color_matrix_alpha_zero_keeps_original() {
    let mut f = ColorMatrixFilter::default();
    f.sepia(false);
    f.set_param("alpha", &json!(0)).unwrap();
    assert_eq!(run(&f, [10, 200, 30, 255]), [10, 200, 30, 255]);
}

#[test]
fn grayscale_equalizes_channels_and_keeps_alpha() {
    let out = run(&GrayscaleFilter, [255, 0, 0, 255]);
    assert_eq!(out[0], out[1]);
    assert_eq!(out[1], out[2]);
    assert_eq!(out[3], 255);
    assert_eq!(out[0], 76);
}

#[test]
fn adjustment_defaults_are_identity() {
    let out = run(&AdjustmentFilter::default(), [120, 60, 30, 255]);
    for (got, want) in out.iter().zip([120u8, 60, 30, 255]) {
        assert!((i32::from(*got) - i32::from(want)).abs() <= 1);
    }
}

#[test]
fn adjustment_brightness_zero_blackens() {
    let mut f = AdjustmentFilter::default();
    f.set_param("brightness", &json!(0)).unwrap();
    assert_eq!(run(&f, [120, 60, 30, 255]), [0, 0, 0, 255]);
}

#[test]
fn color_overlay_full_strength_paints_color() {
    let mut f = ColorOverlayFilter::default();
    f.set_param("color", &json!(0x00ff00)).unwrap();
    assert_eq!(run(&f, [10, 10, 10, 255]), [0, 255, 0, 255]);
    assert_eq!(run(&f, [0, 0, 0, 0]), [0, 0, 0, 0]);
}

#[test]
fn color_replace_only_touches_close_colors() {
    let mut f = ColorReplaceFilter::default();
    f.set_param("targetColor", &json!("#0000ff")).unwrap();
    f.set_param("tolerance", &json!(0.1)).unwrap();
    assert_eq!(run(&f, [255, 0, 0, 255]), [0, 0, 255, 255]);
    assert_eq!(run(&f, [0, 255, 0, 255]), [0, 255, 0, 255]);
}
