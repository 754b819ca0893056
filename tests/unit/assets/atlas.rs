use super::*;

fn solid(file: &str, w: u32, h: u32, rgba: [u8; 4]) -> SourceImage {
    SourceImage {
        file_name: file.to_string(),
        raster: RgbaImage::from_pixel(w, h, image::Rgba(rgba)),
    }
}

#[test]
fn build_then_slice_recovers_each_stamp() {
    let sources = vec![
        solid("1.png", 4, 3, [255, 0, 0, 255]),
        solid("2.png", 2, 5, [0, 255, 0, 255]),
        solid("3.png", 3, 3, [0, 0, 255, 255]),
    ];
    let (atlas, index) = build_atlas(&sources).unwrap();
    assert_eq!(index.entries.len(), 3);
    // 2x2 grid of 4x5 cells
    assert_eq!((atlas.width(), atlas.height()), (8, 10));

    let sliced = index.slice(&atlas, Some(3)).unwrap();
    for (a, b) in sources.iter().zip(&sliced) {
        assert_eq!(a.file_name, b.file_name);
        assert_eq!(a.raster, b.raster);
    }
}

#[test]
fn count_mismatch_is_fatal() {
    let sources = vec![solid("1.png", 2, 2, [1, 2, 3, 255])];
    let (atlas, index) = build_atlas(&sources).unwrap();
    let err = index.slice(&atlas, Some(13)).unwrap_err();
    assert!(matches!(err, StampError::Atlas(_)));
}

#[test]
fn out_of_bounds_rectangle_is_fatal() {
    let atlas = RgbaImage::new(10, 10);
    let index = AtlasIndex {
        width: 10,
        height: 10,
        entries: vec![AtlasEntry {
            file: "1.png".into(),
            x: 8,
            y: 0,
            width: 4,
            height: 4,
        }],
    };
    assert!(matches!(
        index.slice(&atlas, None).unwrap_err(),
        StampError::Atlas(_)
    ));
}

#[test]
fn dimension_mismatch_is_fatal() {
    let atlas = RgbaImage::new(10, 10);
    let index = AtlasIndex {
        width: 12,
        height: 10,
        entries: vec![AtlasEntry {
            file: "1.png".into(),
            x: 0,
            y: 0,
            width: 4,
            height: 4,
        }],
    };
    assert!(index.validate(atlas.width(), atlas.height(), None).is_err());
}

#[test]
fn index_json_roundtrip_and_garbage() {
    let (_, index) = build_atlas(&[solid("a.png", 1, 1, [0, 0, 0, 255])]).unwrap();
    let json = index.to_json_pretty().unwrap();
    assert_eq!(AtlasIndex::from_json_str(&json).unwrap(), index);
    assert!(matches!(
        AtlasIndex::from_json_str("[").unwrap_err(),
        StampError::Serde(_)
    ));
}
