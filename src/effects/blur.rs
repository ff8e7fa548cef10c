use crate::foundation::error::{KeepsakeError, KeepsakeResult};

/// Q16 fixed-point one.
const Q16_ONE: u32 = 1 << 16;

/// Kernel radius for a Gaussian of standard deviation `sigma`: `ceil(3 * sigma)`.
pub(crate) fn radius_for_sigma(sigma: f32) -> u32 {
    if !sigma.is_finite() || sigma <= 0.0 {
        return 0;
    }
    (3.0 * sigma).ceil() as u32
}

/// Normalized, symmetric 1D Gaussian in Q16. Weights sum to exactly [`Q16_ONE`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct GaussianKernel {
    weights: Vec<u32>,
}

impl GaussianKernel {
    /// Kernel for `sigma`, or `None` when the radius rounds to zero and blurring is a no-op.
    pub(crate) fn for_sigma(sigma: f32) -> Option<Self> {
        let radius = radius_for_sigma(sigma);
        if radius == 0 {
            return None;
        }

        let two_sigma_sq = 2.0 * f64::from(sigma) * f64::from(sigma);
        let r = i64::from(radius);
        let raw: Vec<f64> = (-r..=r)
            .map(|i| (-((i * i) as f64) / two_sigma_sq).exp())
            .collect();
        let total: f64 = raw.iter().sum();

        let mut weights: Vec<u32> = raw
            .iter()
            .map(|w| ((w / total) * f64::from(Q16_ONE)).round() as u32)
            .collect();
        // Rounding drift goes to the centre tap so the kernel preserves flat regions exactly.
        let drift = i64::from(Q16_ONE) - weights.iter().map(|&w| i64::from(w)).sum::<i64>();
        let mid = radius as usize;
        weights[mid] = (i64::from(weights[mid]) + drift).clamp(0, i64::from(Q16_ONE)) as u32;
        Some(Self { weights })
    }

    pub(crate) fn radius(&self) -> usize {
        self.weights.len() / 2
    }

    pub(crate) fn weights(&self) -> &[u32] {
        &self.weights
    }

    /// Convolve `count` lines of `len` pixels each. Pixel `j` of line `i` lives at
    /// `i * line_stride + j * step` (in pixels). Samples past either end repeat the edge pixel.
    fn convolve_lines(
        &self,
        src: &[u8],
        dst: &mut [u8],
        count: usize,
        len: usize,
        line_stride: usize,
        step: usize,
    ) {
        let radius = self.radius() as isize;
        let last = len as isize - 1;
        for line in 0..count {
            let base = line * line_stride;
            for j in 0..len as isize {
                let mut acc = [0u64; 4];
                for (k, &w) in self.weights.iter().enumerate() {
                    let s = (j + k as isize - radius).clamp(0, last) as usize;
                    let at = (base + s * step) * 4;
                    for (a, &v) in acc.iter_mut().zip(&src[at..at + 4]) {
                        *a += u64::from(w) * u64::from(v);
                    }
                }
                let at = (base + j as usize * step) * 4;
                for (d, a) in dst[at..at + 4].iter_mut().zip(acc) {
                    *d = ((a + u64::from(Q16_ONE / 2)) >> 16).min(255) as u8;
                }
            }
        }
    }
}

/// Separable Gaussian blur over premultiplied RGBA8 with clamp-to-edge sampling.
pub(crate) fn blur_rgba8_premul(
    src: &[u8],
    width: u32,
    height: u32,
    sigma: f32,
) -> KeepsakeResult<Vec<u8>> {
    let (w, h) = (width as usize, height as usize);
    let expected_len = w
        .checked_mul(h)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| KeepsakeError::invalid("blur buffer size overflow"))?;
    if src.len() != expected_len {
        return Err(KeepsakeError::invalid(format!(
            "blur buffer has {} bytes, expected {expected_len} for {width}x{height}",
            src.len()
        )));
    }
    let Some(kernel) = GaussianKernel::for_sigma(sigma).filter(|_| expected_len > 0) else {
        return Ok(src.to_vec());
    };

    let mut rows = vec![0u8; expected_len];
    kernel.convolve_lines(src, &mut rows, h, w, w, 1);
    let mut out = vec![0u8; expected_len];
    kernel.convolve_lines(&rows, &mut out, w, h, 1, w);
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blur.rs"]
mod tests;
