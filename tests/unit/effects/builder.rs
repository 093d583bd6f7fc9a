use super::*;
use crate::effects::params::ParamKind;
use crate::render::surface::Surface;
use serde_json::json;

fn resources() -> EffectResources {
    let strip = Texture::from_premul(16, 4, [10u8, 20, 30, 255].repeat(64)).unwrap();
    let white = Texture::from_premul(2, 2, [255u8; 16].to_vec()).unwrap();
    let gray = Texture::from_premul(2, 2, [128u8, 128, 128, 255].repeat(4)).unwrap();
    EffectResources {
        displacement: Sprite::new(gray),
        lightmap: white,
        colormap: strip,
    }
}

fn gradient() -> Surface {
    let (w, h) = (8u32, 4u32);
    let mut data = Vec::new();
    for y in 0..h {
        for x in 0..w {
            data.extend_from_slice(&[(x * 30) as u8, (y * 60) as u8, 90, 255]);
        }
    }
    Surface::from_premul(w, h, data).unwrap()
}

fn render(effect: &dyn Effect) -> Vec<u8> {
    let input = gradient();
    let mut out = Surface::new(input.width(), input.height());
    effect.apply(&input, &mut out).unwrap();
    out.into_data()
}

#[test]
fn noise_option_is_applied_after_defaults() {
    let desc = EffectDescriptor::new("NoiseFilter").with_option("noise", json!(0.25));
    let built = build_effect(EffectKind::Noise, &desc, &resources()).unwrap();
    let expected = NoiseFilter {
        noise: 0.25,
        ..NoiseFilter::default()
    };
    assert_eq!(built.kind(), EffectKind::Noise);
    assert_eq!(render(built.as_ref()), render(&expected));
}

#[test]
fn color_map_uses_shared_strip_and_ignores_args() {
    let res = resources();
    let desc = EffectDescriptor::new("ColorMapFilter").with_args(vec![json!("x"), json!(true)]);
    let built = build_effect(EffectKind::ColorMap, &desc, &res).unwrap();
    let expected = ColorMapFilter::new(res.colormap.clone(), false).unwrap();
    assert_eq!(render(built.as_ref()), render(&expected));
}

#[test]
fn displacement_uses_fixed_scale() {
    let res = resources();
    let built = build_effect(
        EffectKind::Displacement,
        &EffectDescriptor::new("DisplacementFilter").with_args(vec![json!(1)]),
        &res,
    )
    .unwrap();
    let expected = DisplacementFilter::new(res.displacement.clone(), 50.0);
    assert_eq!(render(built.as_ref()), render(&expected));
}

#[test]
fn positional_args_bind_to_constructor_params() {
    let desc = EffectDescriptor::new("AlphaFilter").with_args(vec![json!(0.25)]);
    let built = build_effect(EffectKind::Alpha, &desc, &resources()).unwrap();
    assert_eq!(render(built.as_ref()), render(&AlphaFilter { alpha: 0.25 }));
}

#[test]
fn bad_options_and_missing_methods_are_skipped() {
    let desc = EffectDescriptor::new("BlurFilter")
        .with_option("definitelyNot", json!(1))
        .with_option("quality", json!("high"))
        .with_invoke("sepia", vec![]);
    let built = build_effect(EffectKind::Blur, &desc, &resources()).unwrap();
    assert_eq!(render(built.as_ref()), render(&BlurFilter::default()));
}

#[test]
fn invoke_reaches_color_matrix_methods() {
    let desc = EffectDescriptor::new("ColorMatrixFilter").with_invoke("negative", vec![]);
    let built = build_effect(EffectKind::ColorMatrix, &desc, &resources()).unwrap();
    let mut expected = ColorMatrixFilter::default();
    expected.negative(false);
    assert_eq!(render(built.as_ref()), render(&expected));
}

#[test]
fn object_args_spread_unless_the_slot_is_a_point() {
    let args = vec![json!({"gamma": 2, "red": 0.5})];
    let bound = bind_args(EffectKind::Adjustment, &args);
    assert_eq!(bound.len(), 2);
    assert!(bound.iter().all(|b| matches!(b, ArgBinding::Param { index: 0, .. })));

    let args = vec![json!({"x": 0.2, "y": 0.3}), json!(null), json!(0.5), json!(1)];
    let bound = bind_args(EffectKind::BulgePinch, &args);
    assert_eq!(
        bound,
        vec![
            ArgBinding::Param {
                index: 0,
                name: "center",
                value: &args[0],
            },
            ArgBinding::Param {
                index: 2,
                name: "strength",
                value: &args[2],
            },
            ArgBinding::Extra { index: 3 },
        ]
    );
}

fn sample_value(p: ParamKind) -> Value {
    match p {
        ParamKind::Number => json!(1),
        ParamKind::Bool => json!(true),
        ParamKind::Color => json!(0xff0000),
        ParamKind::Point => json!([1, 2]),
        ParamKind::NumberArray(len) => Value::from(vec![0.0; len]),
    }
}

#[test]
fn every_declared_param_is_settable() {
    let res = resources();
    for kind in EffectKind::ALL {
        let mut effect = build_effect(kind, &EffectDescriptor::new(kind.name()), &res).unwrap();
        assert_eq!(effect.kind(), kind);
        for p in kind.params() {
            effect
                .set_param(p.name, &sample_value(p.kind))
                .unwrap_or_else(|e| panic!("{kind}.{}: {e}", p.name));
        }
        assert!(effect.set_param("surelyUndeclared", &json!(1)).is_err());
    }
}
