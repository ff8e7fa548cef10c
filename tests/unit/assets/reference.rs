use super::*;

#[test]
fn parse_classifies_locators() {
    assert!(matches!(
        ImageReference::parse("https://example.com/a.png"),
        ImageReference::Url(_)
    ));
    assert!(matches!(
        ImageReference::parse("data:image/png;base64,AAAA"),
        ImageReference::Url(_)
    ));
    assert_eq!(
        ImageReference::parse("file:///tmp/a.png"),
        ImageReference::Path(PathBuf::from("/tmp/a.png"))
    );
    assert_eq!(
        ImageReference::parse("photos/a.jpg"),
        ImageReference::Path(PathBuf::from("photos/a.jpg"))
    );
}

#[test]
fn labels_do_not_leak_payloads() {
    let data = format!("data:image/png;base64,{}", "A".repeat(500));
    let label = ImageReference::parse(&data).label();
    assert!(label.starts_with("data:image/png;base64,..."));
    assert!(label.len() < 60);

    let bytes = ImageReference::from_bytes(vec![1u8, 2, 3]);
    assert_eq!(bytes.label(), "<3 bytes>");

    let long = format!("https://example.com/{}", "x".repeat(200));
    assert!(ImageReference::parse(&long).label().ends_with("..."));
}

#[test]
fn records_prefilter_keeps_photos_with_media_in_order() {
    let json = r#"[
        {"id": "1", "type": "photo", "mediaUrl": "a.png"},
        {"id": "2", "type": "video", "mediaUrl": "b.mp4"},
        {"id": "3", "type": "photo"},
        {"id": "4", "type": "text"},
        {"id": "5", "type": "photo", "mediaUrl": "c.png"}
    ]"#;
    let records: Vec<MemoryRecord> = serde_json::from_str(json).unwrap();

    let refs = photo_references(&records);
    assert_eq!(
        refs,
        vec![ImageReference::parse("a.png"), ImageReference::parse("c.png")]
    );

    let items = media_items(&records);
    assert_eq!(
        items,
        vec![
            MediaItem::Photo(ImageReference::parse("a.png")),
            MediaItem::Placeholder(MediaKind::Video),
            MediaItem::Placeholder(MediaKind::Text),
            MediaItem::Photo(ImageReference::parse("c.png")),
        ]
    );
}
