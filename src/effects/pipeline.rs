use crate::effects::blend::{multiply_solid_in_place, vignette_in_place};
use crate::effects::blur::blur_rgba8_premul;
use crate::effects::color::{apply_color_ops_in_place, post_blur_ops, pre_blur_ops};
use crate::effects::params::EffectParameters;
use crate::foundation::core::Rgba8;
use crate::foundation::error::KeepsakeResult;
use crate::render::surface::RasterSurface;

/// Warm tint used by the vintage overlay.
pub const VINTAGE_TINT: Rgba8 = Rgba8::opaque(255, 204, 153);

/// Filter a copy of `surface`.
pub fn apply_effects(
    surface: &RasterSurface,
    params: &EffectParameters,
) -> KeepsakeResult<RasterSurface> {
    let mut out = surface.clone();
    apply_effects_in_place(&mut out, params)?;
    Ok(out)
}

/// Filter `surface` in place.
///
/// Order: brightness, contrast, saturate, hue-rotate, blur, sepia, grayscale, then the vintage
/// multiply tint and the vignette. Out-of-range knobs are clamped; non-finite knobs are rejected
/// before any pixel is touched.
#[tracing::instrument(skip_all, fields(w = surface.width(), h = surface.height()))]
pub fn apply_effects_in_place(
    surface: &mut RasterSurface,
    params: &EffectParameters,
) -> KeepsakeResult<()> {
    params.validate()?;
    let p = params.clamped();
    if p.is_identity() {
        tracing::debug!("identity effects, surface unchanged");
        return Ok(());
    }

    let (w, h) = (surface.width(), surface.height());

    apply_color_ops_in_place(surface.data_mut(), &pre_blur_ops(&p));

    if p.blur > 0.0 {
        let blurred = blur_rgba8_premul(surface.data(), w, h, p.blur)?;
        surface.data_mut().copy_from_slice(&blurred);
    }

    apply_color_ops_in_place(surface.data_mut(), &post_blur_ops(&p));

    if p.vintage > 0.0 {
        let alpha = ((p.vintage / 100.0) * 0.3 * 255.0).round() as u8;
        let tint = Rgba8 {
            a: alpha,
            ..VINTAGE_TINT
        };
        multiply_solid_in_place(surface.data_mut(), tint.premul());
    }

    if p.vignette > 0.0 {
        vignette_in_place(surface.data_mut(), w, h, (p.vignette / 100.0) * 0.6);
    }

    tracing::debug!(?p, "effects applied");
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/effects/pipeline.rs"]
mod tests;
