use crate::assets::decode::DecodedImage;
use crate::foundation::error::{KeepsakeError, KeepsakeResult};

/// Largest supported surface side, in pixels.
pub const MAX_SURFACE_DIM: u32 = 16_384;

/// Owned premultiplied RGBA8 pixel buffer. One is allocated per render and dropped with it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterSurface {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

fn byte_len(width: u32, height: u32) -> KeepsakeResult<usize> {
    if width == 0 || height == 0 {
        return Err(KeepsakeError::surface(format!(
            "surface dimensions must be > 0, got {width}x{height}"
        )));
    }
    if width > MAX_SURFACE_DIM || height > MAX_SURFACE_DIM {
        return Err(KeepsakeError::surface(format!(
            "surface {width}x{height} exceeds the {MAX_SURFACE_DIM}px limit"
        )));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| KeepsakeError::surface("surface size overflow"))
}

impl RasterSurface {
    /// Allocate a transparent surface.
    pub fn new(width: u32, height: u32) -> KeepsakeResult<Self> {
        let len = byte_len(width, height)?;
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|e| KeepsakeError::surface(format!("{width}x{height}: {e}")))?;
        data.resize(len, 0);
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Wrap existing premultiplied RGBA8 bytes.
    pub fn from_premul_rgba8(width: u32, height: u32, data: Vec<u8>) -> KeepsakeResult<Self> {
        let len = byte_len(width, height)?;
        if data.len() != len {
            return Err(KeepsakeError::invalid(format!(
                "surface data has {} bytes, expected {len} for {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Copy a decoded image into a surface of the same size.
    pub fn from_decoded(image: &DecodedImage) -> KeepsakeResult<Self> {
        Self::from_premul_rgba8(image.width, image.height, image.pixels.as_ref().clone())
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major premultiplied RGBA8 bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable pixel bytes.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Premultiplied pixel at `(x, y)`, if inside.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Set every pixel to one premultiplied color.
    pub fn fill(&mut self, premul: [u8; 4]) {
        for px in self.data.chunks_exact_mut(4) {
            px.copy_from_slice(&premul);
        }
    }

    pub(crate) fn to_pixmap(&self) -> KeepsakeResult<vello_cpu::Pixmap> {
        pixmap_from_premul_bytes(&self.data, self.width, self.height)
    }

    pub(crate) fn copy_from_pixmap(&mut self, pixmap: &vello_cpu::Pixmap) -> KeepsakeResult<()> {
        let src = pixmap.data_as_u8_slice();
        if src.len() != self.data.len() {
            return Err(KeepsakeError::surface("pixmap size does not match surface"));
        }
        self.data.copy_from_slice(src);
        Ok(())
    }
}

/// Build a `vello_cpu` pixmap from premultiplied bytes.
pub(crate) fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> KeepsakeResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| KeepsakeError::surface("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| KeepsakeError::surface("pixmap height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(KeepsakeError::surface("pixmap byte len mismatch"));
    }
    let pixels: Vec<vello_cpu::peniko::color::PremulRgba8> = bytes
        .chunks_exact(4)
        .map(|px| vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]]))
        .collect();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels, w, h, true,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
