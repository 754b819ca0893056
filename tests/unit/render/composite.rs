use super::*;

#[test]
fn over_opacity_0_is_noop() {
    let dst = [1, 2, 3, 4];
    let src = [200, 200, 200, 200];
    assert_eq!(over(dst, src, 0.0), dst);
}

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    let src = [255, 255, 255, 0];
    assert_eq!(over(dst, src, 1.0), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(over(dst, src, 1.0), src);
}

#[test]
fn over_half_opacity_blends() {
    let dst = [0, 0, 0, 255];
    let src = [255, 255, 255, 255];
    let out = over(dst, src, 0.5);
    assert_eq!(out[3], 255);
    assert!((i32::from(out[0]) - 128).abs() <= 1);
}

#[test]
fn straight_raster_is_clipped_to_destination() {
    let mut dst = vec![0u8; 4 * 4 * 4];
    let src = image::RgbaImage::from_pixel(3, 3, image::Rgba([255, 0, 0, 255]));
    over_straight_at(&mut dst, 4, 4, &src, 2, -1, 1.0);

    let px = |x: usize, y: usize| &dst[(y * 4 + x) * 4..(y * 4 + x) * 4 + 4];
    assert_eq!(px(2, 0), &[255, 0, 0, 255]);
    assert_eq!(px(3, 1), &[255, 0, 0, 255]);
    assert_eq!(px(1, 0), &[0, 0, 0, 0]);
    assert_eq!(px(2, 2), &[0, 0, 0, 0]);
}
