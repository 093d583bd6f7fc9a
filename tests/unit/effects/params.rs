use super::*;
use serde_json::json;

#[test]
fn colors_accept_hex_string_and_unit_triplets() {
    assert_eq!(color("c", &json!(0xff0000)).unwrap(), [1.0, 0.0, 0.0]);
    assert_eq!(color("c", &json!("#00ff00")).unwrap(), [0.0, 1.0, 0.0]);
    assert_eq!(color("c", &json!([0.0, 0.0, 1.0])).unwrap(), [0.0, 0.0, 1.0]);
    assert!(color("c", &json!("#0f0")).is_err());
    assert!(color("c", &json!(0x1_000_000u64)).is_err());
    assert!(color("c", &json!(true)).is_err());
}

#[test]
fn points_accept_three_shapes() {
    assert_eq!(point("p", &json!([1, 2])).unwrap(), [1.0, 2.0]);
    assert_eq!(point("p", &json!({"x": 3, "y": 4})).unwrap(), [3.0, 4.0]);
    assert_eq!(point("p", &json!(5)).unwrap(), [5.0, 5.0]);
    assert!(point("p", &json!([1])).is_err());
}

#[test]
fn number_array_enforces_length() {
    let ok: [f32; 3] = number_array("m", &json!([1, 2, 3])).unwrap();
    assert_eq!(ok, [1.0, 2.0, 3.0]);
    assert!(number_array::<3>("m", &json!([1, 2])).is_err());
}

#[test]
fn check_reports_param_name() {
    let err = ParamKind::Number.check("noise", &json!("loud")).unwrap_err();
    assert!(err.to_string().contains("'noise'"));
    assert!(ParamKind::Bool.check("grayscale", &json!(false)).is_ok());
}

#[test]
fn number_arrays_check_length_and_bounds_check_magnitude() {
    let m = ParamKind::NumberArray(9);
    assert!(m.check("matrix", &serde_json::Value::from(vec![0; 9])).is_ok());
    assert!(m.check("matrix", &json!([1, 2])).is_err());
    assert_eq!(m.describe(), "number[9]");

    let strength = ParamSpec::new("strength", ParamKind::Number).at_most(512);
    assert!(strength.check(&json!(512)).is_ok());
    assert!(strength.check(&json!(1e10)).is_err());
    let offset = ParamSpec::new("offset", ParamKind::Point).at_most(8);
    assert!(offset.check(&json!([1, -9])).is_err());
    assert!(ParamSpec::new("noise", ParamKind::Number).check(&json!(1e10)).is_ok());
}
