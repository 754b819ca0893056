use crate::config::PageConfig;
use crate::foundation::core::{Rect, Size};
use crate::foundation::error::{StampError, StampResult};

pub const POINTS_PER_INCH: f64 = 72.0;

/// Physical page the composed image is placed on, in points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageSetup {
    pub size_pt: Size,
    pub margin_pt: f64,
}

impl Default for PageSetup {
    fn default() -> Self {
        Self::letter()
    }
}

impl PageSetup {
    /// US letter, half-inch margin.
    pub fn letter() -> Self {
        Self {
            size_pt: Size::new(612.0, 792.0),
            margin_pt: 36.0,
        }
    }

    pub fn from_config(cfg: &PageConfig) -> StampResult<Self> {
        let setup = Self {
            size_pt: Size::new(cfg.export_width_pt, cfg.export_height_pt),
            margin_pt: cfg.export_margin_pt,
        };
        setup.printable()?;
        Ok(setup)
    }

    /// Area inside the margins.
    pub fn printable(&self) -> StampResult<Rect> {
        let m = self.margin_pt;
        let r = Rect::new(m, m, self.size_pt.width - m, self.size_pt.height - m);
        if m.is_nan() || m < 0.0 || r.width() <= 0.0 || r.height() <= 0.0 {
            return Err(StampError::validation(format!(
                "page margin {m}pt leaves no printable area on a {}x{}pt page",
                self.size_pt.width, self.size_pt.height
            )));
        }
        Ok(r)
    }

    /// Largest rectangle with the image's aspect ratio that fits the printable area,
    /// centered on the page. Images are scaled up as well as down.
    pub fn fit(&self, image_width: u32, image_height: u32) -> StampResult<Rect> {
        if image_width == 0 || image_height == 0 {
            return Err(StampError::export("cannot place an empty image on a page"));
        }
        let area = self.printable()?;
        let (iw, ih) = (f64::from(image_width), f64::from(image_height));
        let (sx, sy) = (area.width() / iw, area.height() / ih);
        // The limiting axis spans the printable area edge to edge.
        if sx <= sy {
            let inset = (area.height() - ih * sx) / 2.0;
            Ok(Rect::new(area.x0, area.y0 + inset, area.x1, area.y1 - inset))
        } else {
            let inset = (area.width() - iw * sy) / 2.0;
            Ok(Rect::new(area.x0 + inset, area.y0, area.x1 - inset, area.y1))
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/page.rs"]
mod tests;
