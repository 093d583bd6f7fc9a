use super::*;

#[test]
fn default_geometry_matches_preview_layout() {
    let g = OutputGeometry::default();
    assert_eq!((g.width, g.height), (280, 140));
    assert_eq!(g.border.color, 0xffffff);
    assert_eq!(g.border.width, 10);
    assert_eq!(g.frame_byte_len(), 280 * 140 * 4);
    assert_eq!(g.clear_rgba(), [255, 255, 255, 255]);
}

#[test]
fn geometry_rejects_empty_surface() {
    let g = OutputGeometry {
        width: 0,
        ..OutputGeometry::default()
    };
    assert!(g.validate().is_err());
}

#[test]
fn source_scale_fits_output_width() {
    let s = SourceSize::default();
    let g = OutputGeometry::default();
    assert!((s.scale_to(&g) - 0.4375).abs() < 1e-12);
}

#[test]
fn hex_split() {
    assert_eq!(rgb_from_hex(0x102030), [0x10, 0x20, 0x30]);
}
