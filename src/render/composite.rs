pub type PremulRgba8 = [u8; 4];

/// Source-over of one premultiplied pixel onto another, with an extra opacity factor.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = add_sat_u8(sa, mul_div255(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255(u16::from(src[i]), op);
        let dc = mul_div255(u16::from(dst[i]), inv);
        out[i] = add_sat_u8(sc, dc);
    }
    out
}

/// Composite a straight-alpha raster onto a premultiplied buffer at an integer offset.
///
/// Pixels falling outside the destination are clipped.
pub fn over_straight_at(
    dst: &mut [u8],
    dst_w: u32,
    dst_h: u32,
    src: &image::RgbaImage,
    ox: i64,
    oy: i64,
    opacity: f32,
) {
    let (sw, sh) = src.dimensions();
    let x_start = ox.max(0);
    let y_start = oy.max(0);
    let x_end = (ox + i64::from(sw)).min(i64::from(dst_w));
    let y_end = (oy + i64::from(sh)).min(i64::from(dst_h));

    for y in y_start..y_end {
        for x in x_start..x_end {
            let s = src.get_pixel((x - ox) as u32, (y - oy) as u32).0;
            if s[3] == 0 {
                continue;
            }
            let src_premul = premul(s);
            let idx = ((y as usize) * (dst_w as usize) + x as usize) * 4;
            let d = [dst[idx], dst[idx + 1], dst[idx + 2], dst[idx + 3]];
            dst[idx..idx + 4].copy_from_slice(&over(d, src_premul, opacity));
        }
    }
}

fn premul(px: [u8; 4]) -> PremulRgba8 {
    let a = u16::from(px[3]);
    [
        mul_div255(u16::from(px[0]), a),
        mul_div255(u16::from(px[1]), a),
        mul_div255(u16::from(px[2]), a),
        px[3],
    ]
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
