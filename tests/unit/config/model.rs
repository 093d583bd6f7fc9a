use super::*;
use serde_json::json;

fn parse(v: Value) -> EffectDescriptor {
    serde_json::from_value(v).unwrap()
}

#[test]
fn canonical_fields_parse() {
    let d = parse(json!({
        "name": "BlurFilter",
        "constructionArgs": [4, 2],
        "options": {"quality": 3},
        "invoke": {"method": "sepia", "args": [true]},
        "scope": true,
        "captureAsImage": "blur",
        "captureAsFrame": "blur-frame"
    }));
    assert_eq!(d.name, "BlurFilter");
    assert_eq!(d.construction_args, vec![json!(4), json!(2)]);
    assert_eq!(d.options.get("quality"), Some(&json!(3)));
    assert_eq!(d.invoke.as_ref().map(|i| i.method.as_str()), Some("sepia"));
    assert_eq!(d.scope, Scope::Subject);
    assert_eq!(d.capture_as_image.as_deref(), Some("blur"));
    assert_eq!(d.capture_as_frame.as_deref(), Some("blur-frame"));
}

#[test]
fn legacy_aliases_parse() {
    let d = parse(json!({
        "name": "ColorMatrixFilter",
        "arguments": 0.5,
        "func": "brightness",
        "args": [0.5, false],
        "fishOnly": true,
        "filename": "cm",
        "frame": "cm-frame"
    }));
    assert_eq!(d.construction_args, vec![json!(0.5)]);
    let inv = d.invoke.unwrap();
    assert_eq!(inv.method, "brightness");
    assert_eq!(inv.args, vec![json!(0.5), json!(false)]);
    assert_eq!(d.scope, Scope::Subject);
    assert_eq!(d.capture_as_image.as_deref(), Some("cm"));
    assert_eq!(d.capture_as_frame.as_deref(), Some("cm-frame"));
}

#[test]
fn minimal_descriptor_defaults() {
    let d = parse(json!({"name": "NoiseFilter", "somethingElse": 1}));
    assert_eq!(d, EffectDescriptor::new("NoiseFilter"));
    assert_eq!(d.scope, Scope::Full);
    assert!(d.is_silent());
}

#[test]
fn config_defaults_geometry() {
    let cfg = PreviewConfig::from_reader(r#"{"images": []}"#.as_bytes()).unwrap();
    assert!(cfg.images.is_empty());
    assert_eq!(cfg.output.width, 280);
    assert_eq!(cfg.output.height, 140);
    assert_eq!(cfg.output.border.color, 0xffffff);
    assert_eq!(cfg.source_size.width, 640);
}

#[test]
fn partial_output_section_keeps_other_defaults() {
    let cfg = PreviewConfig::from_reader(
        r#"{"images": [], "output": {"width": 100, "border": {"width": 2}}}"#.as_bytes(),
    )
    .unwrap();
    assert_eq!(cfg.output.width, 100);
    assert_eq!(cfg.output.height, 140);
    assert_eq!(cfg.output.border.width, 2);
    assert_eq!(cfg.output.border.color, 0xffffff);
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = PreviewConfig::from_reader("{".as_bytes()).unwrap_err();
    assert!(matches!(err, FxshotError::Serde(_)));
}

#[test]
fn missing_file_is_reported_with_path() {
    let err = PreviewConfig::from_path("/definitely/not/here.json").unwrap_err();
    assert!(err.to_string().contains("/definitely/not/here.json"));
}
