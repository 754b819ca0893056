use super::*;

fn temp_dir(name: &str) -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!(
        "stampbook-{name}-{}-{nanos}",
        std::process::id()
    ))
}

#[test]
fn in_memory_document_records_pages() {
    let mut doc = InMemoryDocument::new();
    doc.begin(PageSetup::letter()).unwrap();
    let img = RgbaImage::from_pixel(4, 2, image::Rgba([1, 2, 3, 255]));
    let rect = PageSetup::letter().fit(4, 2).unwrap();
    doc.embed_page(&img, rect).unwrap();
    doc.end().unwrap();
    assert!(doc.is_finished());
    assert_eq!(doc.pages.len(), 1);
    assert_eq!(doc.pages[0].placement, rect);
    assert_eq!(doc.page(), Some(PageSetup::letter()));
}

#[test]
fn png_document_rejects_bad_dpi() {
    assert!(PngPageDocument::new("x.png", 0.0).is_err());
    assert!(PngPageDocument::new("x.png", f64::NAN).is_err());
}

#[test]
fn png_document_writes_letter_page() {
    let dir = temp_dir("png-doc");
    let path = dir.join("page.png");
    let mut doc = PngPageDocument::new(&path, 72.0).unwrap();
    doc.begin(PageSetup::letter()).unwrap();

    let img = RgbaImage::from_pixel(10, 10, image::Rgba([0, 0, 0, 255]));
    let rect = PageSetup::letter().fit(10, 10).unwrap();
    doc.embed_page(&img, rect).unwrap();
    doc.embed_page(&img, rect).unwrap();
    doc.end().unwrap();

    assert_eq!(doc.written().len(), 2);
    assert_eq!(doc.written()[1], dir.join("page-2.png"));
    let page = image::open(&path).unwrap().to_rgba8();
    assert_eq!(page.dimensions(), (612, 792));
    assert_eq!(page.get_pixel(5, 5).0, [255, 255, 255, 255]);
    assert_eq!(page.get_pixel(306, 396).0, [0, 0, 0, 255]);

    std::fs::remove_dir_all(&dir).ok();
}
