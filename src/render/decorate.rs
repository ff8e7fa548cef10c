//! Whole-surface decorations and tile ornaments: backgrounds, the title band, placeholder icons.

use std::sync::{Arc, OnceLock};

use kurbo::{BezPath, Rect, Shape};

use crate::assets::reference::MediaKind;
use crate::foundation::core::Rgba8;
use crate::foundation::error::{KeepsakeError, KeepsakeResult};
use crate::render::theme::ThemeStyle;

/// Height of the title band: 60px, but never more than a quarter of the canvas.
pub(crate) fn title_band_height(canvas_height: u32) -> u32 {
    60.min(canvas_height / 4)
}

/// Vertical gradient in premultiplied RGBA8, one color per row.
pub(crate) fn vertical_gradient_premul(top: Rgba8, bottom: Rgba8, w: u32, h: u32) -> Vec<u8> {
    let (start, end) = (top.premul(), bottom.premul());
    let mut bytes = vec![0u8; (w as usize).saturating_mul(h as usize).saturating_mul(4)];
    let h1 = (h.max(1) - 1) as f32;
    for (y, row) in bytes.chunks_exact_mut((w as usize) * 4).enumerate() {
        let t = if h1 <= 0.0 { 0.0 } else { (y as f32) / h1 };
        let lerp = |a: u8, b: u8| -> u8 {
            let af = f32::from(a);
            (af + (f32::from(b) - af) * t).round().clamp(0.0, 255.0) as u8
        };
        let c = [
            lerp(start[0], end[0]),
            lerp(start[1], end[1]),
            lerp(start[2], end[2]),
            lerp(start[3], end[3]),
        ];
        for px in row.chunks_exact_mut(4) {
            px.copy_from_slice(&c);
        }
    }
    bytes
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c if c.is_control() => out.push(' '),
            c => out.push(c),
        }
    }
    out
}

/// SVG document holding the centred title, `width x height` user units.
pub(crate) fn title_svg(title: &str, style: &ThemeStyle, width: u32, height: u32) -> String {
    let baseline = f64::from(height) * 0.5 + f64::from(style.title_size) * 0.35;
    format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            r#"<text x="{x}" y="{y:.2}" text-anchor="middle" font-family="{font}" font-size="{size}" fill="{fill}">{text}</text>"#,
            "</svg>"
        ),
        w = width,
        h = height,
        x = f64::from(width) * 0.5,
        y = baseline,
        font = style.title_font,
        size = style.title_size,
        fill = style.title_color.to_css(),
        text = escape_xml(title.trim()),
    )
}

/// Rasterize the title band into premultiplied RGBA8 of `width x height`.
///
/// Text is shaped against the system fonts; on a machine without fonts the band stays transparent.
pub(crate) fn rasterize_title(
    title: &str,
    style: &ThemeStyle,
    width: u32,
    height: u32,
) -> KeepsakeResult<Vec<u8>> {
    let svg = title_svg(title, style, width, height);
    let opts = usvg::Options {
        fontdb: system_fontdb(),
        font_resolver: make_font_resolver(),
        ..Default::default()
    };
    let tree = usvg::Tree::from_str(&svg, &opts)
        .map_err(|e| KeepsakeError::invalid(format!("title svg: {e}")))?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| KeepsakeError::surface("failed to allocate title pixmap"))?;
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::identity(),
        &mut pixmap.as_mut(),
    );
    // tiny-skia stores premultiplied RGBA8.
    Ok(pixmap.take())
}

/// Immutable font database shared by every render in the process.
fn system_fontdb() -> Arc<usvg::fontdb::Database> {
    static DB: OnceLock<Arc<usvg::fontdb::Database>> = OnceLock::new();
    DB.get_or_init(|| {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        tracing::debug!(faces = db.len(), "loaded system fonts");
        Arc::new(db)
    })
    .clone()
}

/// Resolve the requested families, then generic families, then any face at all.
fn make_font_resolver() -> usvg::FontResolver<'static> {
    usvg::FontResolver {
        select_font: Box::new(|font, fontdb| {
            let mut families: Vec<usvg::fontdb::Family<'_>> = font
                .families()
                .iter()
                .map(|family| match family {
                    usvg::FontFamily::Serif => usvg::fontdb::Family::Serif,
                    usvg::FontFamily::SansSerif => usvg::fontdb::Family::SansSerif,
                    usvg::FontFamily::Cursive => usvg::fontdb::Family::Cursive,
                    usvg::FontFamily::Fantasy => usvg::fontdb::Family::Fantasy,
                    usvg::FontFamily::Monospace => usvg::fontdb::Family::Monospace,
                    usvg::FontFamily::Named(s) => usvg::fontdb::Family::Name(s),
                })
                .collect();
            families.push(usvg::fontdb::Family::SansSerif);
            families.push(usvg::fontdb::Family::Serif);

            let query = usvg::fontdb::Query {
                families: &families,
                weight: usvg::fontdb::Weight(font.weight()),
                stretch: usvg::fontdb::Stretch::Normal,
                style: usvg::fontdb::Style::Normal,
            };
            fontdb
                .query(&query)
                .or_else(|| fontdb.faces().next().map(|f| f.id))
        }),
        select_fallback: usvg::FontResolver::default_fallback_selector(),
    }
}

/// Icon outline for a placeholder tile, fitted into the centre of `tile`.
pub(crate) fn placeholder_icon(kind: MediaKind, tile: Rect) -> BezPath {
    let side = tile.width().min(tile.height()) * 0.4;
    let c = tile.center();
    let icon = Rect::new(c.x - side * 0.5, c.y - side * 0.5, c.x + side * 0.5, c.y + side * 0.5);
    let mut path = BezPath::new();
    match kind {
        MediaKind::Video => {
            path.move_to((icon.x0 + side * 0.15, icon.y0));
            path.line_to((icon.x1 - side * 0.05, c.y));
            path.line_to((icon.x0 + side * 0.15, icon.y1));
            path.close_path();
        }
        MediaKind::Audio => {
            let heights = [0.45, 0.8, 1.0, 0.65, 0.35];
            let slot = side / heights.len() as f64;
            for (i, h) in heights.iter().enumerate() {
                let x0 = icon.x0 + i as f64 * slot + slot * 0.15;
                let bar = Rect::new(x0, icon.y1 - side * h, x0 + slot * 0.7, icon.y1);
                path.extend(bar.path_elements(0.1));
            }
        }
        MediaKind::Text | MediaKind::Photo => {
            let widths = [1.0, 0.85, 0.95, 0.6];
            let slot = side / widths.len() as f64;
            for (i, w) in widths.iter().enumerate() {
                let y0 = icon.y0 + i as f64 * slot + slot * 0.3;
                let line = Rect::new(icon.x0, y0, icon.x0 + side * w, y0 + slot * 0.4);
                path.extend(line.path_elements(0.1));
            }
        }
    }
    path
}

pub(crate) fn affine_to_cpu(a: kurbo::Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

pub(crate) fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

pub(crate) fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let pt = |p: kurbo::Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

pub(crate) fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

#[cfg(test)]
#[path = "../../tests/unit/render/decorate.rs"]
mod tests;
