use super::*;

#[test]
fn default_is_identity() {
    assert!(EffectParameters::default().is_identity());
    assert_eq!(EffectPreset::None.params(), EffectParameters::IDENTITY);
}

#[test]
fn setters_clamp_to_ranges() {
    let p = EffectParameters::default()
        .with_brightness(500.0)
        .with_contrast(-3.0)
        .with_hue(270.0)
        .with_blur(25.0)
        .with_vignette(101.0);
    assert_eq!(p.brightness, 200.0);
    assert_eq!(p.contrast, 0.0);
    assert_eq!(p.hue, 180.0);
    assert_eq!(p.blur, 10.0);
    assert_eq!(p.vignette, 100.0);
    assert!(p.validate().is_ok());
}

#[test]
fn non_finite_values_are_invalid() {
    let p = EffectParameters::default().with_saturation(f32::NAN);
    assert!(matches!(
        p.validate(),
        Err(KeepsakeError::InvalidParameter(msg)) if msg.contains("saturation")
    ));
    let p = EffectParameters {
        sepia: f32::INFINITY,
        ..EffectParameters::default()
    };
    assert!(p.validate().is_err());
}

#[test]
fn presets_are_in_range_and_named() {
    for preset in EffectPreset::ALL {
        let p = preset.params();
        assert_eq!(p, p.clamped(), "{preset:?}");
        assert_eq!(EffectPreset::from_name(preset.name()).unwrap(), preset);
    }
    assert_eq!(EffectPreset::from_name(" Noir ").unwrap(), EffectPreset::Noir);
    assert!(EffectPreset::from_name("lomo").is_err());
    assert!(!presets::VINTAGE.is_identity());
}

#[test]
fn partial_json_fills_identity_defaults() {
    let p: EffectParameters = serde_json::from_str(r#"{"sepia": 50, "vignette": 20}"#).unwrap();
    assert_eq!(
        p,
        EffectParameters {
            sepia: 50.0,
            vignette: 20.0,
            ..EffectParameters::IDENTITY
        }
    );
}
