use super::*;
use crate::layout::kind::{HeartParams, MosaicParams};

#[test]
fn empty_json_gives_defaults() {
    let spec = CompositionSpec::from_json("{}").unwrap();
    assert_eq!(spec, CompositionSpec::default());
    assert_eq!((spec.width, spec.height), (1200, 800));
    assert_eq!(spec.fit, ImageFit::Cover);
    assert_eq!(spec.format, ExportFormat::Png);
    spec.validate().unwrap();
}

#[test]
fn json_fields_are_read() {
    let spec = CompositionSpec::from_json(
        r#"{
            "title": "Summer",
            "theme": "vintage",
            "layout": { "kind": "heart", "tile": 90 },
            "effects": { "sepia": 40 },
            "width": 640,
            "height": 480,
            "background": [10, 20, 30, 255],
            "fit": "stretch",
            "format": { "type": "jpeg", "quality": 85 }
        }"#,
    )
    .unwrap();
    assert_eq!(spec.effective_title(), Some("Summer"));
    assert_eq!(spec.theme, Theme::Vintage);
    assert_eq!(
        spec.layout,
        LayoutKind::Heart(HeartParams {
            tile: 90.0,
            ..HeartParams::default()
        })
    );
    assert_eq!(spec.effects.map(|e| e.sepia), Some(40.0));
    assert_eq!(spec.effects.map(|e| e.brightness), Some(100.0));
    assert_eq!(spec.background_color(), Some(Rgba8::opaque(10, 20, 30)));
    assert_eq!(spec.fit, ImageFit::Stretch);
    assert_eq!(spec.format, ExportFormat::Jpeg { quality: 85 });
}

#[test]
fn malformed_json_is_invalid_parameter() {
    for bad in ["{", r#"{"theme":"neon"}"#, r#"{"width":-1}"#] {
        assert!(matches!(
            CompositionSpec::from_json(bad),
            Err(KeepsakeError::InvalidParameter(_))
        ));
    }
}

#[test]
fn from_path_reads_file_and_reports_missing() {
    let dir = std::env::temp_dir().join(format!("keepsake-spec-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("spec.json");
    std::fs::write(&path, r#"{"layout":{"kind":"diagonal"},"width":300,"height":200}"#).unwrap();

    let spec = CompositionSpec::from_path(&path).unwrap();
    assert_eq!(spec.layout.name(), "diagonal");
    assert_eq!((spec.width, spec.height), (300, 200));

    let missing = CompositionSpec::from_path(dir.join("nope.json"));
    assert!(matches!(missing, Err(KeepsakeError::InvalidParameter(_))));
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn json_round_trip_keeps_everything() {
    let spec = CompositionSpecBuilder::new(400, 300)
        .title("Trip")
        .theme(Theme::Dark)
        .background([1, 2, 3, 4])
        .format(ExportFormat::jpeg())
        .build()
        .unwrap();
    let back = CompositionSpec::from_json(&spec.to_json().unwrap()).unwrap();
    assert_eq!(back, spec);
}

#[test]
fn validation_rejects_bad_canvas_effects_and_layout() {
    assert!(matches!(
        CompositionSpecBuilder::new(0, 10).build(),
        Err(KeepsakeError::InvalidParameter(_))
    ));
    assert!(matches!(
        CompositionSpecBuilder::new(MAX_SURFACE_DIM + 1, 10).build(),
        Err(KeepsakeError::SurfaceAllocation(_))
    ));
    assert!(
        CompositionSpecBuilder::new(100, 100)
            .effects(EffectParameters {
                blur: f32::NAN,
                ..EffectParameters::IDENTITY
            })
            .build()
            .is_err()
    );
    assert!(
        CompositionSpecBuilder::new(100, 100)
            .layout(LayoutKind::Mosaic(MosaicParams {
                sizes: Vec::new(),
                ..MosaicParams::default()
            }))
            .build()
            .is_err()
    );
}

#[test]
fn blank_title_counts_as_none() {
    let spec = CompositionSpecBuilder::new(100, 100)
        .title("   ")
        .build()
        .unwrap();
    assert_eq!(spec.effective_title(), None);
}
