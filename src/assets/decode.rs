use std::sync::Arc;

use crate::assets::loader::{ItemError, LoadFailureReason};
use crate::assets::reference::ImageReference;
use crate::foundation::math::premultiply_rgba8_in_place;

/// Decoded, drawable bitmap in premultiplied RGBA8 form.
#[derive(Clone, Debug)]
pub struct DecodedImage {
    /// The reference this bitmap was decoded from.
    pub reference: ImageReference,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub pixels: Arc<Vec<u8>>,
}

/// Decode encoded image bytes, downscaling so that neither side exceeds `max_dim`.
pub(crate) fn decode_image(
    reference: &ImageReference,
    bytes: &[u8],
    max_dim: Option<u32>,
) -> Result<DecodedImage, ItemError> {
    let mut dyn_img = image::load_from_memory(bytes).map_err(classify_image_error)?;
    if dyn_img.width() == 0 || dyn_img.height() == 0 {
        return Err(ItemError::new(
            LoadFailureReason::Corrupt,
            "image has zero width or height",
        ));
    }

    if let Some(max) = max_dim.filter(|&m| m > 0)
        && (dyn_img.width() > max || dyn_img.height() > max)
    {
        // `resize` keeps the aspect ratio and fits inside the bounds.
        dyn_img = dyn_img.resize(max, max, image::imageops::FilterType::Triangle);
    }

    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut pixels = rgba.into_raw();
    premultiply_rgba8_in_place(&mut pixels);

    Ok(DecodedImage {
        reference: reference.clone(),
        width,
        height,
        pixels: Arc::new(pixels),
    })
}

fn classify_image_error(err: image::ImageError) -> ItemError {
    let reason = match &err {
        image::ImageError::Unsupported(_) => LoadFailureReason::Unsupported,
        image::ImageError::Limits(_) => LoadFailureReason::TooLarge,
        _ => LoadFailureReason::Corrupt,
    };
    ItemError::new(reason, format!("decode image: {err}"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
