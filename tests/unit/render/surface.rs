use super::*;

#[test]
fn out_of_bounds_pixels_are_transparent() {
    let s = Surface::filled(2, 2, [10, 20, 30, 255]);
    assert_eq!(s.pixel(1, 1), [10, 20, 30, 255]);
    assert_eq!(s.pixel(-1, 0), [0, 0, 0, 0]);
    assert_eq!(s.pixel(0, 2), [0, 0, 0, 0]);
    assert_eq!(s.pixel_clamped(5, -3), [10, 20, 30, 255]);
}

#[test]
fn sample_at_pixel_center_is_exact() {
    let mut s = Surface::new(3, 1);
    s.data_mut()[4..8].copy_from_slice(&[255, 0, 0, 255]);
    let px = s.sample(1.5, 0.5);
    assert!((px[0] - 1.0).abs() < 1e-6);
    assert!((px[3] - 1.0).abs() < 1e-6);

    let between = s.sample(1.0, 0.5);
    assert!((between[0] - 0.5).abs() < 1e-6);
}

#[test]
fn from_premul_checks_length() {
    assert!(Surface::from_premul(2, 2, vec![0; 15]).is_err());
    assert!(Surface::from_premul(2, 2, vec![0; 16]).is_ok());
}
