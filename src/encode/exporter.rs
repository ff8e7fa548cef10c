use std::path::Path;

use anyhow::Context;
use base64::Engine as _;
use image::ImageEncoder as _;

use crate::effects::blend::over;
use crate::foundation::error::{KeepsakeError, KeepsakeResult};
use crate::foundation::math::unpremultiply_rgba8_in_place;
use crate::render::surface::RasterSurface;

/// Output encoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExportFormat {
    /// Lossless PNG with alpha.
    #[default]
    Png,
    /// Lossy JPEG, flattened over white.
    Jpeg {
        /// Quality in `1..=100`; values outside are clamped.
        #[serde(default = "default_jpeg_quality")]
        quality: u8,
    },
}

fn default_jpeg_quality() -> u8 {
    90
}

impl ExportFormat {
    /// JPEG at the default quality.
    pub fn jpeg() -> Self {
        Self::Jpeg {
            quality: default_jpeg_quality(),
        }
    }

    /// MIME type of the encoded bytes.
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg { .. } => "image/jpeg",
        }
    }

    /// Conventional file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg { .. } => "jpg",
        }
    }
}

/// Encoded output buffer. Owned by the caller; the engine keeps no reference to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedImage {
    /// Encoded file bytes.
    pub bytes: Vec<u8>,
    /// Encoding used.
    pub format: ExportFormat,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl EncodedImage {
    /// MIME type of [`EncodedImage::bytes`].
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    /// `data:` URL suitable for a preview surface.
    pub fn to_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type(),
            base64::engine::general_purpose::STANDARD.encode(&self.bytes)
        )
    }

    /// Write the bytes to `path`.
    ///
    /// Bytes go to a sibling temporary file first and are renamed into place, so a failed write
    /// never leaves a truncated file at `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> KeepsakeResult<()> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .ok_or_else(|| KeepsakeError::invalid(format!("'{}' has no file name", path.display())))?;
        let mut tmp_name = std::ffi::OsString::from(".");
        tmp_name.push(name);
        tmp_name.push(".partial");
        let tmp = path.with_file_name(tmp_name);

        std::fs::write(&tmp, &self.bytes)
            .with_context(|| format!("write '{}'", tmp.display()))?;
        if let Err(e) = std::fs::rename(&tmp, path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(anyhow::Error::new(e)
                .context(format!("move output into '{}'", path.display()))
                .into());
        }
        tracing::debug!(path = %path.display(), bytes = self.bytes.len(), "saved output");
        Ok(())
    }
}

/// Encode a surface.
#[tracing::instrument(skip(surface), fields(w = surface.width(), h = surface.height()))]
pub fn encode(surface: &RasterSurface, format: ExportFormat) -> KeepsakeResult<EncodedImage> {
    encode_rgba8_premul(surface.data(), surface.width(), surface.height(), format)
}

/// Encode raw premultiplied RGBA8 pixels.
pub fn encode_rgba8_premul(
    data: &[u8],
    width: u32,
    height: u32,
    format: ExportFormat,
) -> KeepsakeResult<EncodedImage> {
    if width == 0 || height == 0 {
        return Err(KeepsakeError::encode(format!(
            "cannot encode a {width}x{height} surface"
        )));
    }
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| KeepsakeError::encode("surface size overflow"))?;
    if data.len() != expected {
        return Err(KeepsakeError::encode(format!(
            "pixel buffer has {} bytes, expected {expected}",
            data.len()
        )));
    }

    let mut bytes = Vec::new();
    match format {
        ExportFormat::Png => {
            let mut straight = data.to_vec();
            unpremultiply_rgba8_in_place(&mut straight);
            image::codecs::png::PngEncoder::new(&mut bytes)
                .write_image(&straight, width, height, image::ExtendedColorType::Rgba8)
                .map_err(|e| KeepsakeError::encode(format!("png: {e}")))?;
        }
        ExportFormat::Jpeg { quality } => {
            let rgb: Vec<u8> = data
                .chunks_exact(4)
                .flat_map(|px| {
                    let [r, g, b, _] = over([255, 255, 255, 255], [px[0], px[1], px[2], px[3]], 1.0);
                    [r, g, b]
                })
                .collect();
            image::codecs::jpeg::JpegEncoder::new_with_quality(&mut bytes, quality.clamp(1, 100))
                .write_image(&rgb, width, height, image::ExtendedColorType::Rgb8)
                .map_err(|e| KeepsakeError::encode(format!("jpeg: {e}")))?;
        }
    }

    tracing::debug!(bytes = bytes.len(), mime = format.mime_type(), "encoded surface");
    Ok(EncodedImage {
        bytes,
        format,
        width,
        height,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/encode/exporter.rs"]
mod tests;
