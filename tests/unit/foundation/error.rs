use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        KeepsakeError::invalid("x")
            .to_string()
            .contains("invalid parameter:")
    );
    assert!(
        KeepsakeError::surface("x")
            .to_string()
            .contains("surface allocation failed:")
    );
    assert!(KeepsakeError::encode("x").to_string().contains("encode failed:"));
    assert_eq!(KeepsakeError::Cancelled.to_string(), "render cancelled");
}

#[test]
fn no_usable_images_reads_as_cannot_compose() {
    let err = KeepsakeError::NoUsableImages { attempted: 3 };
    let msg = err.to_string();
    assert!(msg.starts_with("cannot compose: no images available"));
    assert!(msg.contains('3'));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = KeepsakeError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
