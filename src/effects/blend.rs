use crate::foundation::math::mul_div255_u8;

/// One premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

/// Source-over with an extra opacity factor.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255_u8(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }
    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255_u8(u16::from(dst[3]), inv));
    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), op);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

/// Multiply blend: `co = cs*cb + cs*(1 - ab) + cb*(1 - as)`, `ao = as + ab*(1 - as)`.
pub fn multiply(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    let sa = u16::from(src[3]);
    if sa == 0 {
        return dst;
    }
    let da = u16::from(dst[3]);
    let mut out = [0u8; 4];
    for i in 0..3 {
        let (cs, cb) = (u16::from(src[i]), u16::from(dst[i]));
        out[i] = mul_div255_u8(cs, cb)
            .saturating_add(mul_div255_u8(cs, 255 - da))
            .saturating_add(mul_div255_u8(cb, 255 - sa));
    }
    out[3] = src[3].saturating_add(mul_div255_u8(da, 255 - sa));
    out
}

/// Multiply every pixel with one constant premultiplied color.
pub(crate) fn multiply_solid_in_place(rgba_premul: &mut [u8], color: PremulRgba8) {
    if color[3] == 0 {
        return;
    }
    for px in rgba_premul.chunks_exact_mut(4) {
        let out = multiply([px[0], px[1], px[2], px[3]], color);
        px.copy_from_slice(&out);
    }
}

/// Multiply with a centred black radial gradient whose alpha grows linearly from 0 at the centre
/// to `peak` at `0.6 * max(width, height)` and stays there beyond.
pub(crate) fn vignette_in_place(rgba_premul: &mut [u8], width: u32, height: u32, peak: f32) {
    let peak = peak.clamp(0.0, 1.0);
    if peak <= 0.0 || width == 0 || height == 0 {
        return;
    }
    let (w, h) = (f64::from(width), f64::from(height));
    let (cx, cy) = (w * 0.5, h * 0.5);
    let radius = 0.6 * w.max(h);
    let peak = f64::from(peak);

    for (i, px) in rgba_premul.chunks_exact_mut(4).enumerate() {
        let x = (i % width as usize) as f64 + 0.5;
        let y = (i / width as usize) as f64 + 0.5;
        let d = ((x - cx).powi(2) + (y - cy).powi(2)).sqrt();
        let alpha = peak * (d / radius).min(1.0);
        let sa = (alpha * 255.0).round().clamp(0.0, 255.0) as u8;
        if sa == 0 {
            continue;
        }
        let out = multiply([px[0], px[1], px[2], px[3]], [0, 0, 0, sa]);
        px.copy_from_slice(&out);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blend.rs"]
mod tests;
