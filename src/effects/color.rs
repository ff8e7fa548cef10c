//! Per-pixel color filters using the Filter Effects matrices.
//!
//! Filters operate on straight-alpha sRGB values in `[0, 1]` and clamp after every stage. Alpha is
//! never changed.

use crate::effects::params::EffectParameters;

/// One straight-color transform: `out = m * rgb + offset`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ColorOp {
    m: [f32; 9],
    offset: f32,
}

impl ColorOp {
    fn linear(slope: f32, intercept: f32) -> Self {
        Self {
            m: [slope, 0.0, 0.0, 0.0, slope, 0.0, 0.0, 0.0, slope],
            offset: intercept,
        }
    }

    fn matrix(m: [f32; 9]) -> Self {
        Self { m, offset: 0.0 }
    }

    pub(crate) fn brightness(amount: f32) -> Self {
        Self::linear(amount, 0.0)
    }

    pub(crate) fn contrast(amount: f32) -> Self {
        Self::linear(amount, 0.5 - 0.5 * amount)
    }

    pub(crate) fn saturate(s: f32) -> Self {
        Self::matrix([
            0.213 + 0.787 * s,
            0.715 - 0.715 * s,
            0.072 - 0.072 * s,
            0.213 - 0.213 * s,
            0.715 + 0.285 * s,
            0.072 - 0.072 * s,
            0.213 - 0.213 * s,
            0.715 - 0.715 * s,
            0.072 + 0.928 * s,
        ])
    }

    pub(crate) fn hue_rotate(degrees: f32) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self::matrix([
            0.213 + cos * 0.787 - sin * 0.213,
            0.715 - cos * 0.715 - sin * 0.715,
            0.072 - cos * 0.072 + sin * 0.928,
            0.213 - cos * 0.213 + sin * 0.143,
            0.715 + cos * 0.285 + sin * 0.140,
            0.072 - cos * 0.072 - sin * 0.283,
            0.213 - cos * 0.213 - sin * 0.787,
            0.715 - cos * 0.715 + sin * 0.715,
            0.072 + cos * 0.928 + sin * 0.072,
        ])
    }

    pub(crate) fn sepia(amount: f32) -> Self {
        let k = 1.0 - amount;
        Self::matrix([
            0.393 + 0.607 * k,
            0.769 - 0.769 * k,
            0.189 - 0.189 * k,
            0.349 - 0.349 * k,
            0.686 + 0.314 * k,
            0.168 - 0.168 * k,
            0.272 - 0.272 * k,
            0.534 - 0.534 * k,
            0.131 + 0.869 * k,
        ])
    }

    pub(crate) fn grayscale(amount: f32) -> Self {
        let k = 1.0 - amount;
        Self::matrix([
            0.2126 + 0.7874 * k,
            0.7152 - 0.7152 * k,
            0.0722 - 0.0722 * k,
            0.2126 - 0.2126 * k,
            0.7152 + 0.2848 * k,
            0.0722 - 0.0722 * k,
            0.2126 - 0.2126 * k,
            0.7152 - 0.7152 * k,
            0.0722 + 0.9278 * k,
        ])
    }

    fn apply(&self, rgb: [f32; 3]) -> [f32; 3] {
        let m = &self.m;
        let [r, g, b] = rgb;
        [
            (m[0] * r + m[1] * g + m[2] * b + self.offset).clamp(0.0, 1.0),
            (m[3] * r + m[4] * g + m[5] * b + self.offset).clamp(0.0, 1.0),
            (m[6] * r + m[7] * g + m[8] * b + self.offset).clamp(0.0, 1.0),
        ]
    }
}

/// Stages that run before blur: brightness, contrast, saturate, hue-rotate. Identity stages are
/// left out.
pub(crate) fn pre_blur_ops(p: &EffectParameters) -> Vec<ColorOp> {
    let mut ops = Vec::with_capacity(4);
    if p.brightness != 100.0 {
        ops.push(ColorOp::brightness(p.brightness / 100.0));
    }
    if p.contrast != 100.0 {
        ops.push(ColorOp::contrast(p.contrast / 100.0));
    }
    if p.saturation != 100.0 {
        ops.push(ColorOp::saturate(p.saturation / 100.0));
    }
    if p.hue != 0.0 {
        ops.push(ColorOp::hue_rotate(p.hue));
    }
    ops
}

/// Stages that run after blur: sepia, grayscale.
pub(crate) fn post_blur_ops(p: &EffectParameters) -> Vec<ColorOp> {
    let mut ops = Vec::with_capacity(2);
    if p.sepia > 0.0 {
        ops.push(ColorOp::sepia(p.sepia / 100.0));
    }
    if p.grayscale > 0.0 {
        ops.push(ColorOp::grayscale(p.grayscale / 100.0));
    }
    ops
}

/// Apply `ops` in order to premultiplied RGBA8 pixels.
pub(crate) fn apply_color_ops_in_place(rgba_premul: &mut [u8], ops: &[ColorOp]) {
    if ops.is_empty() {
        return;
    }
    for px in rgba_premul.chunks_exact_mut(4) {
        let a = px[3];
        if a == 0 {
            continue;
        }
        let af = f32::from(a);
        let mut rgb = [
            (f32::from(px[0]) / af).min(1.0),
            (f32::from(px[1]) / af).min(1.0),
            (f32::from(px[2]) / af).min(1.0),
        ];
        for op in ops {
            rgb = op.apply(rgb);
        }
        for (dst, c) in px[..3].iter_mut().zip(rgb) {
            *dst = (c * af).round().clamp(0.0, af) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/color.rs"]
mod tests;
