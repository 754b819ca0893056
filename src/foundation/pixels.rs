use image::{RgbaImage, imageops::FilterType};

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

pub(crate) fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u32::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

/// Resample a straight-alpha raster without letting the color of transparent pixels bleed
/// into the result (filtering happens in premultiplied space).
///
/// Resampling to the source's own size returns an unchanged copy.
pub(crate) fn resample_straight(
    src: &RgbaImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> RgbaImage {
    let width = width.max(1);
    let height = height.max(1);
    if src.width() == width && src.height() == height {
        return src.clone();
    }

    let mut premul = src.clone();
    premultiply_rgba8_in_place(&mut premul);
    let mut out = image::imageops::resize(&premul, width, height, filter);
    unpremultiply_rgba8_in_place(&mut out);
    out
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/pixels.rs"]
mod tests;
