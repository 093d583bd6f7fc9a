use super::*;

#[test]
fn over_opaque_src_replaces_dst() {
    let dst = [10, 20, 30, 255];
    let src = [200, 100, 50, 255];
    assert_eq!(over(dst, src, 1.0), src);
}

#[test]
fn over_transparent_src_keeps_dst() {
    let dst = [10, 20, 30, 255];
    assert_eq!(over(dst, [0, 0, 0, 0], 1.0), dst);
    assert_eq!(over(dst, [200, 0, 0, 255], 0.0), dst);
}

#[test]
fn over_surface_requires_matching_sizes() {
    let mut a = Surface::new(2, 2);
    let b = Surface::new(3, 2);
    assert!(over_surface(&mut a, &b, 1.0).is_err());
}

#[test]
fn premultiply_roundtrips_opaque_and_zeroes_transparent() {
    let mut px = vec![100u8, 50, 200, 255, 40, 40, 40, 0];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[..4], &[100, 50, 200, 255]);
    assert_eq!(&px[4..], &[0, 0, 0, 0]);
}

#[test]
fn unpremultiply_recovers_half_alpha_color() {
    let mut px = vec![100u8, 50, 200, 128];
    premultiply_rgba8_in_place(&mut px);
    unpremultiply_rgba8_in_place(&mut px);
    for (got, want) in px.iter().zip([100u8, 50, 200, 128]) {
        assert!((i32::from(*got) - i32::from(want)).abs() <= 1);
    }
}
