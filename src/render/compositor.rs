use std::sync::Arc;

use kurbo::{Affine, Rect};

use crate::assets::decode::DecodedImage;
use crate::assets::loader::{LoadFailure, LoadStats, LoaderOpts, ResourceLoader};
use crate::assets::reference::{ImageReference, MediaItem, MediaKind};
use crate::effects::params::EffectParameters;
use crate::effects::pipeline::apply_effects_in_place;
use crate::encode::exporter::{EncodedImage, ExportFormat, encode};
use crate::foundation::core::{CancelToken, Placement, Rgba8};
use crate::foundation::error::{KeepsakeError, KeepsakeResult};
use crate::layout::engine::compute_placements_in;
use crate::render::decorate::{
    affine_to_cpu, bezpath_to_cpu, color_to_cpu, placeholder_icon, rasterize_title, rect_to_cpu,
    title_band_height, vertical_gradient_premul,
};
use crate::render::spec::{CompositionSpec, ImageFit};
use crate::render::surface::{RasterSurface, pixmap_from_premul_bytes};
use crate::render::theme::{Background, ThemeStyle};

/// Compositor configuration.
#[derive(Clone, Debug, Default)]
pub struct CompositorOpts {
    /// Options of the loader used for every render.
    pub loader: LoaderOpts,
}

impl CompositorOpts {
    /// Defaults overridden from the environment; see [`LoaderOpts::from_env`].
    pub fn from_env() -> Self {
        Self {
            loader: LoaderOpts::from_env(),
        }
    }
}

/// Outcome of one successful render.
#[derive(Clone, Debug)]
pub struct CompositionResult {
    /// Encoded output.
    pub encoded: EncodedImage,
    /// One placement per drawn item, in item order.
    pub placements: Vec<Placement>,
    /// Load counts for the photo references.
    pub stats: LoadStats,
    /// Photos that were dropped, indexed by position among the photo references.
    pub failures: Vec<LoadFailure>,
}

/// Turns a [`CompositionSpec`] and a list of media into one encoded image.
///
/// A compositor holds configuration only. Every call allocates its own surface and thread pool
/// and drops them before returning, so one instance can serve concurrent renders.
#[derive(Clone, Debug, Default)]
pub struct Compositor {
    loader: ResourceLoader,
}

enum Drawable {
    Photo(DecodedImage),
    Placeholder(MediaKind),
}

impl Compositor {
    /// Create a compositor.
    pub fn new(opts: CompositorOpts) -> Self {
        Self {
            loader: ResourceLoader::new(opts.loader),
        }
    }

    /// Render photos only.
    pub fn compose_images(
        &self,
        spec: &CompositionSpec,
        images: &[ImageReference],
    ) -> KeepsakeResult<CompositionResult> {
        let items: Vec<MediaItem> = images.iter().cloned().map(MediaItem::Photo).collect();
        self.compose(spec, &items)
    }

    /// Render a mix of photos and placeholder tiles.
    pub fn compose(
        &self,
        spec: &CompositionSpec,
        items: &[MediaItem],
    ) -> KeepsakeResult<CompositionResult> {
        self.compose_with_cancel(spec, items, &CancelToken::new())
    }

    /// Render, giving up with [`KeepsakeError::Cancelled`] once `cancel` fires.
    ///
    /// Photos that fail to load are dropped and reported in [`CompositionResult::failures`]; the
    /// layout runs over whatever is left. The call fails with
    /// [`KeepsakeError::NoUsableImages`] only when nothing at all can be drawn.
    #[tracing::instrument(
        skip_all,
        fields(items = items.len(), layout = spec.layout.name(), w = spec.width, h = spec.height)
    )]
    pub fn compose_with_cancel(
        &self,
        spec: &CompositionSpec,
        items: &[MediaItem],
        cancel: &CancelToken,
    ) -> KeepsakeResult<CompositionResult> {
        spec.validate()?;
        cancel.check()?;

        let refs: Vec<ImageReference> = items
            .iter()
            .filter_map(|item| match item {
                MediaItem::Photo(r) => Some(r.clone()),
                MediaItem::Placeholder(_) => None,
            })
            .collect();
        let report = self.loader.load_with_cancel(&refs, cancel)?;
        let stats = report.stats();

        let mut decoded: Vec<Option<DecodedImage>> = vec![None; refs.len()];
        for loaded in report.succeeded {
            decoded[loaded.index] = Some(loaded.image);
        }
        let mut photos = decoded.into_iter();
        let drawables: Vec<Drawable> = items
            .iter()
            .filter_map(|item| match item {
                MediaItem::Photo(_) => photos.next().flatten().map(Drawable::Photo),
                MediaItem::Placeholder(kind) => Some(Drawable::Placeholder(*kind)),
            })
            .collect();
        if drawables.is_empty() {
            return Err(KeepsakeError::NoUsableImages {
                attempted: stats.attempted,
            });
        }
        cancel.check()?;

        let mut surface = RasterSurface::new(spec.width, spec.height)?;
        let style = spec.theme.style();
        let canvas = spec.canvas()?.rect();

        let title = spec.effective_title();
        let band = match title {
            Some(_) => title_band_height(spec.height),
            None => 0,
        };
        let area = Rect::new(0.0, f64::from(band), canvas.x1, canvas.y1);
        let placements = compute_placements_in(drawables.len(), &spec.layout, area)?;
        tracing::debug!(count = placements.len(), band, "layout computed");
        cancel.check()?;

        let mut ctx = new_render_context(spec.width, spec.height)?;
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        draw_background(&mut ctx, spec, &style, canvas)?;
        if let Some(title) = title.filter(|_| band > 0) {
            let bytes = rasterize_title(title, &style, spec.width, band)?;
            draw_premul_bytes(&mut ctx, &bytes, spec.width, band, Affine::IDENTITY)?;
        }
        for (drawable, placement) in drawables.iter().zip(&placements) {
            cancel.check()?;
            draw_item(&mut ctx, drawable, placement.to_rect(), &style, spec.fit)?;
        }
        flush_into(&mut ctx, &mut surface)?;
        tracing::debug!("items composited");
        cancel.check()?;

        if let Some(effects) = &spec.effects {
            apply_effects_in_place(&mut surface, effects)?;
            cancel.check()?;
        }

        let encoded = encode(&surface, spec.format)?;
        Ok(CompositionResult {
            encoded,
            placements,
            stats,
            failures: report.failed,
        })
    }

    /// Apply effects to one photo at its own size and encode it.
    #[tracing::instrument(skip_all, fields(reference = %reference))]
    pub fn edit_photo(
        &self,
        reference: &ImageReference,
        params: &EffectParameters,
        format: ExportFormat,
    ) -> KeepsakeResult<EncodedImage> {
        params.validate()?;
        let report = self
            .loader
            .load(std::slice::from_ref(reference))?
            .into_usable()?;
        let Some(image) = report.images().next() else {
            return Err(KeepsakeError::NoUsableImages { attempted: 1 });
        };
        let mut surface = RasterSurface::from_decoded(image)?;
        apply_effects_in_place(&mut surface, params)?;
        encode(&surface, format)
    }
}

fn new_render_context(width: u32, height: u32) -> KeepsakeResult<vello_cpu::RenderContext> {
    let w: u16 = width
        .try_into()
        .map_err(|_| KeepsakeError::surface("render width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| KeepsakeError::surface("render height exceeds u16"))?;
    Ok(vello_cpu::RenderContext::new(w, h))
}

fn flush_into(ctx: &mut vello_cpu::RenderContext, surface: &mut RasterSurface) -> KeepsakeResult<()> {
    let mut pixmap = RasterSurface::new(surface.width(), surface.height())?.to_pixmap()?;
    ctx.flush();
    ctx.render_to_pixmap(&mut pixmap);
    surface.copy_from_pixmap(&pixmap)
}

fn fill_solid(ctx: &mut vello_cpu::RenderContext, color: Rgba8, rect: Rect) {
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(color_to_cpu(color));
    ctx.fill_rect(&rect_to_cpu(rect));
}

/// Fill `(0, 0, width, height)` in the space given by `transform` with premultiplied pixels.
fn draw_premul_bytes(
    ctx: &mut vello_cpu::RenderContext,
    bytes: &[u8],
    width: u32,
    height: u32,
    transform: Affine,
) -> KeepsakeResult<()> {
    let pixmap = pixmap_from_premul_bytes(bytes, width, height)?;
    draw_pixmap(
        ctx,
        Arc::new(pixmap),
        transform,
        Rect::new(0.0, 0.0, f64::from(width), f64::from(height)),
    );
    Ok(())
}

fn draw_pixmap(
    ctx: &mut vello_cpu::RenderContext,
    pixmap: Arc<vello_cpu::Pixmap>,
    transform: Affine,
    src: Rect,
) {
    ctx.set_transform(affine_to_cpu(transform));
    ctx.set_paint(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(pixmap),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    });
    ctx.fill_rect(&rect_to_cpu(src));
}

fn draw_background(
    ctx: &mut vello_cpu::RenderContext,
    spec: &CompositionSpec,
    style: &ThemeStyle,
    canvas: Rect,
) -> KeepsakeResult<()> {
    match (spec.background_color(), style.background) {
        (Some(color), _) | (None, Background::Solid(color)) => {
            fill_solid(ctx, color, canvas);
            Ok(())
        }
        (None, Background::VerticalGradient { top, bottom }) => {
            let bytes = vertical_gradient_premul(top, bottom, spec.width, spec.height);
            draw_premul_bytes(ctx, &bytes, spec.width, spec.height, Affine::IDENTITY)
        }
    }
}

fn draw_item(
    ctx: &mut vello_cpu::RenderContext,
    drawable: &Drawable,
    tile: Rect,
    style: &ThemeStyle,
    fit: ImageFit,
) -> KeepsakeResult<()> {
    let inner = match style.frame {
        Some(frame) => {
            fill_solid(ctx, frame.color, tile);
            tile.inset(-frame.width)
        }
        None => tile,
    };
    if inner.width() <= 0.0 || inner.height() <= 0.0 {
        return Ok(());
    }

    match drawable {
        Drawable::Photo(image) => {
            let pixmap = pixmap_from_premul_bytes(&image.pixels, image.width, image.height)?;
            let src = source_rect(image.width, image.height, inner, fit);
            draw_pixmap(ctx, Arc::new(pixmap), fit_transform(src, inner), src);
        }
        Drawable::Placeholder(kind) => {
            fill_solid(ctx, style.placeholder_fill, inner);
            ctx.set_paint(color_to_cpu(style.placeholder_icon));
            ctx.fill_path(&bezpath_to_cpu(&placeholder_icon(*kind, inner)));
        }
    }
    Ok(())
}

/// Part of a `width x height` image that is shown in `dst`.
pub(crate) fn source_rect(width: u32, height: u32, dst: Rect, fit: ImageFit) -> Rect {
    let (sw, sh) = (f64::from(width), f64::from(height));
    match fit {
        ImageFit::Stretch => Rect::new(0.0, 0.0, sw, sh),
        ImageFit::Cover => {
            let dst_aspect = dst.width() / dst.height();
            if sw / sh > dst_aspect {
                let cw = sh * dst_aspect;
                let x0 = (sw - cw) * 0.5;
                Rect::new(x0, 0.0, x0 + cw, sh)
            } else {
                let ch = sw / dst_aspect;
                let y0 = (sh - ch) * 0.5;
                Rect::new(0.0, y0, sw, y0 + ch)
            }
        }
    }
}

/// Map `src` (image pixels) onto `dst` (surface pixels).
pub(crate) fn fit_transform(src: Rect, dst: Rect) -> Affine {
    Affine::translate((dst.x0, dst.y0))
        * Affine::scale_non_uniform(dst.width() / src.width(), dst.height() / src.height())
        * Affine::translate((-src.x0, -src.y0))
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
