use std::path::{Path, PathBuf};

use anyhow::Context;
use image::RgbaImage;

use crate::export::page::{POINTS_PER_INCH, PageSetup};
use crate::foundation::core::{Canvas, Rect, Rgba8Premul};
use crate::foundation::error::{StampError, StampResult};
use crate::render::surface::{CpuSurface, Surface};

/// Consumer of composed page images.
///
/// Call order: `begin`, any number of `embed_page`, `end`. `placement` is in points,
/// relative to the page's top-left corner.
pub trait DocumentSink {
    fn begin(&mut self, page: PageSetup) -> StampResult<()>;
    fn embed_page(&mut self, image: &RgbaImage, placement: Rect) -> StampResult<()>;
    fn end(&mut self) -> StampResult<()>;
}

#[derive(Clone, Debug, PartialEq)]
pub struct EmbeddedPage {
    pub image: RgbaImage,
    pub placement: Rect,
}

/// In-memory sink for tests and hosts that assemble documents themselves.
#[derive(Debug, Default)]
pub struct InMemoryDocument {
    page: Option<PageSetup>,
    pub pages: Vec<EmbeddedPage>,
    finished: bool,
}

impl InMemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self) -> Option<PageSetup> {
        self.page
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl DocumentSink for InMemoryDocument {
    fn begin(&mut self, page: PageSetup) -> StampResult<()> {
        self.page = Some(page);
        self.pages.clear();
        self.finished = false;
        Ok(())
    }

    fn embed_page(&mut self, image: &RgbaImage, placement: Rect) -> StampResult<()> {
        self.pages.push(EmbeddedPage {
            image: image.clone(),
            placement,
        });
        Ok(())
    }

    fn end(&mut self) -> StampResult<()> {
        self.finished = true;
        Ok(())
    }
}

/// Rasterizes each page onto white paper at `dpi` and writes it as PNG.
///
/// The first page goes to `path`; further pages get a `-N` suffix before the extension.
#[derive(Debug)]
pub struct PngPageDocument {
    path: PathBuf,
    dpi: f64,
    page: PageSetup,
    written: Vec<PathBuf>,
}

impl PngPageDocument {
    pub fn new(path: impl Into<PathBuf>, dpi: f64) -> StampResult<Self> {
        if !dpi.is_finite() || dpi <= 0.0 {
            return Err(StampError::validation(format!("dpi must be > 0, got {dpi}")));
        }
        Ok(Self {
            path: path.into(),
            dpi,
            page: PageSetup::letter(),
            written: Vec::new(),
        })
    }

    /// Files written so far.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// Page size in pixels at the configured dpi.
    pub fn page_canvas(&self) -> StampResult<Canvas> {
        let px = |pt: f64| (pt * self.dpi / POINTS_PER_INCH).round() as u32;
        Canvas::new(px(self.page.size_pt.width), px(self.page.size_pt.height))
    }

    fn page_path(&self, index: usize) -> PathBuf {
        if index == 0 {
            return self.path.clone();
        }
        let stem = self
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "page".to_string());
        let name = format!("{stem}-{}.png", index + 1);
        match self.path.parent() {
            Some(dir) => dir.join(name),
            None => PathBuf::from(name),
        }
    }

    fn rasterize(&self, image: &RgbaImage, placement: Rect) -> StampResult<RgbaImage> {
        let k = self.dpi / POINTS_PER_INCH;
        let mut surface = CpuSurface::new(self.page_canvas()?);
        surface.clear(Rgba8Premul::opaque([255, 255, 255]));
        surface.draw_image(image, placement.scale_from_origin(k));
        Ok(surface.read_pixels())
    }
}

impl DocumentSink for PngPageDocument {
    fn begin(&mut self, page: PageSetup) -> StampResult<()> {
        page.printable()?;
        self.page = page;
        self.written.clear();
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("create export dir {}", dir.display()))?;
        }
        Ok(())
    }

    #[tracing::instrument(skip(self, image), fields(path = %self.path.display()))]
    fn embed_page(&mut self, image: &RgbaImage, placement: Rect) -> StampResult<()> {
        let page = self.rasterize(image, placement)?;
        let path = self.page_path(self.written.len());
        save_png(&page, &path)?;
        tracing::info!(path = %path.display(), "page written");
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> StampResult<()> {
        Ok(())
    }
}

pub(crate) fn save_png(image: &RgbaImage, path: &Path) -> StampResult<()> {
    image
        .save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| StampError::export(format!("write {}: {e}", path.display())))
}

#[cfg(test)]
#[path = "../../tests/unit/export/sink.rs"]
mod tests;
