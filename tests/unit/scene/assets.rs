use super::*;
use crate::effects::filters::ColorMapFilter;
use std::io::Cursor;

fn temp_dir(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "fxshot_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn write_png(path: &Path, w: u32, h: u32, rgba: [u8; 4]) {
    let img = image::RgbaImage::from_raw(w, h, rgba.repeat((w * h) as usize)).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    std::fs::write(path, &buf).unwrap();
}

#[test]
fn synthetic_assets_are_deterministic_and_sized() {
    let a = SceneAssets::synthetic(SourceSize::default()).unwrap();
    let b = SceneAssets::synthetic(SourceSize::default()).unwrap();
    assert_eq!(a, b);
    assert_eq!((a.background.width(), a.background.height()), (640, 320));
    assert_eq!((a.subject.width(), a.subject.height()), (640, 320));
    assert_eq!(a.colormap.width(), a.colormap.height() * a.colormap.height());
}

#[test]
fn synthetic_subject_has_transparent_and_opaque_regions() {
    let a = SceneAssets::synthetic(SourceSize::default()).unwrap();
    let alphas: Vec<u8> = a.subject.data().chunks_exact(4).map(|px| px[3]).collect();
    assert!(alphas.contains(&0));
    assert!(alphas.contains(&255));
}

#[test]
fn synthetic_colormap_builds_a_color_map_effect() {
    let a = SceneAssets::synthetic(SourceSize::default()).unwrap();
    assert!(ColorMapFilter::new(a.effect_resources().colormap, false).is_ok());
}

#[test]
fn load_dir_decodes_every_asset() {
    let tmp = temp_dir("assets_load_dir");
    std::fs::create_dir_all(&tmp).unwrap();
    for file in [BACKGROUND_FILE, SUBJECT_FILE, LIGHTMAP_FILE, DISPLACEMENT_FILE] {
        write_png(&tmp.join(file), 4, 2, [10, 20, 30, 255]);
    }
    write_png(&tmp.join(COLORMAP_FILE), 4, 2, [0, 0, 0, 255]);

    let assets = SceneAssets::load_dir(&tmp).unwrap();
    assert_eq!(assets.background.width(), 4);
    assert_eq!(assets.colormap.height(), 2);
    assert_eq!(&assets.subject.data()[..4], &[10, 20, 30, 255]);

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn load_dir_names_the_missing_file() {
    let tmp = temp_dir("assets_missing");
    std::fs::create_dir_all(&tmp).unwrap();
    let err = SceneAssets::load_dir(&tmp).unwrap_err();
    assert!(format!("{err:#}").contains(BACKGROUND_FILE));
    std::fs::remove_dir_all(&tmp).ok();
}
