use std::io::Cursor;

use super::*;

fn png_bytes(width: u32, height: u32, px: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba(px));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_png_dimensions_and_premul() {
    let bytes = png_bytes(1, 1, [100, 50, 200, 128]);
    let reference = ImageReference::from_bytes(bytes.clone());
    let decoded = decode_image(&reference, &bytes, None).unwrap();
    assert_eq!(decoded.width, 1);
    assert_eq!(decoded.height, 1);
    assert_eq!(decoded.reference, reference);
    assert_eq!(
        decoded.pixels.as_slice(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn decode_downscales_to_max_dim_keeping_aspect() {
    let bytes = png_bytes(40, 20, [1, 2, 3, 255]);
    let reference = ImageReference::from_bytes(bytes.clone());
    let decoded = decode_image(&reference, &bytes, Some(10)).unwrap();
    assert_eq!((decoded.width, decoded.height), (10, 5));
    assert_eq!(decoded.pixels.len(), 10 * 5 * 4);
}

#[test]
fn garbage_is_unsupported_and_truncated_png_is_corrupt() {
    let reference = ImageReference::from_bytes(vec![0u8; 4]);
    let err = decode_image(&reference, b"definitely not an image", None).unwrap_err();
    assert_eq!(err.reason, LoadFailureReason::Unsupported);

    let mut bytes = png_bytes(8, 8, [9, 9, 9, 255]);
    bytes.truncate(bytes.len() / 2);
    let err = decode_image(&reference, &bytes, None).unwrap_err();
    assert_eq!(err.reason, LoadFailureReason::Corrupt);
}
