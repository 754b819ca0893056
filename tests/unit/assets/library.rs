use super::*;
use crate::assets::source::SourceImage;

fn source(file: &str, w: u32, h: u32) -> SourceImage {
    SourceImage {
        file_name: file.to_string(),
        raster: RgbaImage::from_fn(w, h, |x, y| {
            if x == 0 || y == 0 || x == w - 1 || y == h - 1 {
                image::Rgba([255, 255, 255, 255])
            } else {
                image::Rgba([0, 0, 0, 255])
            }
        }),
    }
}

#[test]
fn build_keeps_order_and_records_failures() {
    let batch = SourceBatch {
        sources: vec![source("1.png", 20, 10), source("3.png", 12, 30)],
        failures: vec![AssetFailure {
            file_name: "2.png".into(),
            reason: "decode error: bad".into(),
        }],
    };
    let pre = Preprocessor {
        trim_margin: 0,
        bg_tolerance: 10.0,
        thumbnail_box: 16,
    };
    let lib = AssetLibrary::build(batch, &pre);

    assert_eq!(lib.len(), 2);
    assert_eq!(lib.failures().len(), 1);
    let a = lib.get(0).unwrap();
    assert_eq!(a.id, StampId(0));
    assert_eq!(a.name, "Stamp 1");
    assert_eq!(a.nominal_size, 20);
    assert_eq!(a.thumbnail.dimensions(), (16, 16));
    let b = lib.get(1).unwrap();
    assert_eq!(b.name, "Stamp 3");
    assert_eq!(b.nominal_size, 30);
    // White border matched the corner estimate and was keyed out.
    assert_eq!(b.raster.get_pixel(0, 0)[3], 0);
    assert_eq!(b.raster.get_pixel(5, 5)[3], 255);
    assert!(lib.get(2).is_none());
}

#[test]
fn from_raster_derives_nominal_size() {
    let asset = StampAsset::from_raster(StampId(4), "cat.png", RgbaImage::new(90, 45), 80);
    assert_eq!(asset.nominal_size, 90);
    assert_eq!(asset.raster_extent(), 90);
    assert_eq!(asset.name, "cat");
}
