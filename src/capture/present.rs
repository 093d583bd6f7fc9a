use std::io::Cursor;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::core::{Border, rgb_from_hex};
use crate::foundation::error::{FxshotError, FxshotResult};
use crate::render::backend::EncodedImage;

/// Receives encoded image captures for display or storage.
///
/// The capture driver hands images over and never looks at the outcome beyond logging a
/// failure.
pub trait PresentationSink {
    fn present(&mut self, id: &str, image: &EncodedImage) -> FxshotResult<()>;
}

/// Keeps every presented image as a data URL, in presentation order.
#[derive(Debug, Default)]
pub struct InMemoryPresenter {
    pub(crate) presented: Vec<(String, String)>,
}

impl InMemoryPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(id, data_url)` pairs in presentation order.
    pub fn presented(&self) -> &[(String, String)] {
        &self.presented
    }
}

impl PresentationSink for InMemoryPresenter {
    fn present(&mut self, id: &str, image: &EncodedImage) -> FxshotResult<()> {
        self.presented.push((id.to_owned(), image.data_url()));
        Ok(())
    }
}

/// Writes each image to `<dir>/<id>.png`, framed by the output border.
#[derive(Debug)]
pub struct PngDirPresenter {
    dir: PathBuf,
    border: Border,
    written: Vec<PathBuf>,
}

impl PngDirPresenter {
    /// Create the presenter, creating `dir` if needed.
    pub fn new(dir: impl AsRef<Path>, border: Border) -> FxshotResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("create output dir '{}'", dir.display()))?;
        Ok(Self {
            dir,
            border,
            written: Vec::new(),
        })
    }

    /// Files written so far.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn framed(&self, image: &EncodedImage) -> FxshotResult<image::RgbaImage> {
        let inner = image::load_from_memory(&image.png)
            .context("decode captured png")?
            .to_rgba8();
        let b = self.border.width;
        let [r, g, bl] = rgb_from_hex(self.border.color);
        let mut out = image::RgbaImage::from_pixel(
            inner.width() + 2 * b,
            inner.height() + 2 * b,
            image::Rgba([r, g, bl, 255]),
        );
        image::imageops::overlay(&mut out, &inner, i64::from(b), i64::from(b));
        Ok(out)
    }
}

fn check_id(id: &str) -> FxshotResult<()> {
    if id.is_empty() || id == "." || id == ".." || id.contains(['/', '\\']) {
        return Err(FxshotError::capture(format!(
            "image id '{id}' is not a plain file name"
        )));
    }
    Ok(())
}

impl PresentationSink for PngDirPresenter {
    fn present(&mut self, id: &str, image: &EncodedImage) -> FxshotResult<()> {
        check_id(id)?;
        let framed = self.framed(image)?;
        let mut png = Vec::new();
        image::DynamicImage::ImageRgba8(framed)
            .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .context("encode framed png")?;
        let path = self.dir.join(format!("{id}.png"));
        std::fs::write(&path, &png).with_context(|| format!("write '{}'", path.display()))?;
        tracing::info!(path = %path.display(), "image written");
        self.written.push(path);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/present.rs"]
mod tests;
