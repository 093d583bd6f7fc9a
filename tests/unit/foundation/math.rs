use super::*;

#[test]
fn mul_div255_rounds_to_nearest() {
    assert_eq!(mul_div255_u8(255, 255), 255);
    assert_eq!(mul_div255_u8(128, 255), 128);
    assert_eq!(mul_div255_u8(0, 200), 0);
    assert_eq!(mul_div255_u8(100, 128), 50);
}

#[test]
fn hash_unit_is_deterministic_and_in_range() {
    for y in 0..8 {
        for x in 0..8 {
            let a = hash_unit(7, x, y);
            assert_eq!(a, hash_unit(7, x, y));
            assert!((0.0..1.0).contains(&a));
        }
    }
    assert_ne!(hash_unit(1, 3, 3), hash_unit(2, 3, 3));
}

#[test]
fn smoothstep_endpoints() {
    assert_eq!(smoothstep(0.0, 1.0, -1.0), 0.0);
    assert_eq!(smoothstep(0.0, 1.0, 2.0), 1.0);
    assert!((smoothstep(0.0, 1.0, 0.5) - 0.5).abs() < 1e-6);
}
