use std::f64::consts::TAU;

use crate::foundation::core::{Canvas, Placement, Point, Rect};
use crate::foundation::error::{KeepsakeError, KeepsakeResult};
use crate::foundation::math::hash_unit;
use crate::layout::kind::{
    CircularParams, DiagonalParams, GridParams, HeartParams, LayoutKind, MosaicParams,
};

/// One placement algorithm.
///
/// Implementations work in a local `width x height` area with its origin at `(0, 0)`; the engine
/// clamps every rectangle into that area and translates the result into surface coordinates.
pub trait LayoutStrategy {
    /// Reject parameters outside their domain.
    fn validate(&self) -> KeepsakeResult<()>;

    /// Arrange `n >= 1` items.
    fn arrange(&self, n: usize, width: f64, height: f64) -> Vec<Placement>;
}

/// Place `n` items over the whole canvas.
pub fn compute_placements(
    n: usize,
    kind: &LayoutKind,
    canvas: Canvas,
) -> KeepsakeResult<Vec<Placement>> {
    compute_placements_in(n, kind, canvas.rect())
}

/// Place `n` items inside `area` (surface coordinates). The result has exactly `n` entries, in
/// item order, each inside `area`.
pub fn compute_placements_in(
    n: usize,
    kind: &LayoutKind,
    area: Rect,
) -> KeepsakeResult<Vec<Placement>> {
    match kind {
        LayoutKind::Grid(p) => run(p, n, area),
        LayoutKind::Mosaic(p) => run(p, n, area),
        LayoutKind::Circular(p) => run(p, n, area),
        LayoutKind::Diagonal(p) => run(p, n, area),
        LayoutKind::Heart(p) => run(p, n, area),
    }
}

fn run<S: LayoutStrategy>(strategy: &S, n: usize, area: Rect) -> KeepsakeResult<Vec<Placement>> {
    let finite = [area.x0, area.y0, area.x1, area.y1]
        .iter()
        .all(|v| v.is_finite());
    if !finite || area.width() <= 0.0 || area.height() <= 0.0 {
        return Err(KeepsakeError::invalid(format!(
            "layout area must be finite and non-empty, got {area:?}"
        )));
    }
    strategy.validate()?;
    if n == 0 {
        return Ok(Vec::new());
    }

    let local = Rect::new(0.0, 0.0, area.width(), area.height());
    Ok(strategy
        .arrange(n, area.width(), area.height())
        .into_iter()
        .map(|p| p.clamped_to(local).translated(area.x0, area.y0))
        .collect())
}

/// Grid shape for `n` items: `cols = ceil(sqrt(n))`, `rows = ceil(n / cols)`.
pub fn grid_dims(n: usize) -> (usize, usize) {
    if n == 0 {
        return (0, 0);
    }
    let mut cols = (n as f64).sqrt().ceil() as usize;
    // Guard against float error around perfect squares.
    while cols * cols < n {
        cols += 1;
    }
    while cols > 1 && (cols - 1) * (cols - 1) >= n {
        cols -= 1;
    }
    (cols, n.div_ceil(cols))
}

/// The heart curve `x = 16 sin^3 t`, `y = 13 cos t - 5 cos 2t - 2 cos 3t - cos 4t`, in curve
/// units with `y` pointing up.
pub fn heart_curve(t: f64) -> Point {
    let s = t.sin();
    Point::new(
        16.0 * s * s * s,
        13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos(),
    )
}

fn check_padding(name: &str, v: f64) -> KeepsakeResult<()> {
    if !v.is_finite() || v < 0.0 {
        return Err(KeepsakeError::invalid(format!(
            "{name} must be finite and >= 0, got {v}"
        )));
    }
    Ok(())
}

fn check_tile(name: &str, v: f64) -> KeepsakeResult<()> {
    if !v.is_finite() || v <= 0.0 {
        return Err(KeepsakeError::invalid(format!(
            "{name} must be finite and > 0, got {v}"
        )));
    }
    Ok(())
}

impl LayoutStrategy for GridParams {
    fn validate(&self) -> KeepsakeResult<()> {
        check_padding("grid padding", self.padding)
    }

    fn arrange(&self, n: usize, width: f64, height: f64) -> Vec<Placement> {
        let (cols, rows) = grid_dims(n);
        let pad = self.padding;
        let cell_w = ((width - (cols as f64 + 1.0) * pad) / cols as f64).max(1.0);
        let cell_h = ((height - (rows as f64 + 1.0) * pad) / rows as f64).max(1.0);
        (0..n)
            .map(|i| {
                let (row, col) = (i / cols, i % cols);
                Placement::new(
                    col as f64 * (cell_w + pad),
                    row as f64 * (cell_h + pad),
                    cell_w,
                    cell_h,
                )
            })
            .collect()
    }
}

impl LayoutStrategy for MosaicParams {
    fn validate(&self) -> KeepsakeResult<()> {
        if self.sizes.is_empty() {
            return Err(KeepsakeError::invalid("mosaic size pool must not be empty"));
        }
        if self.sizes.contains(&0) {
            return Err(KeepsakeError::invalid("mosaic tile sizes must be > 0"));
        }
        check_padding("mosaic padding", self.padding)
    }

    fn arrange(&self, n: usize, width: f64, height: f64) -> Vec<Placement> {
        // Uniform position in [pad, extent - size - pad], centred when that range is empty.
        let scatter = |u: f64, extent: f64, size: f64| {
            let hi = extent - size - self.padding;
            if hi >= self.padding {
                self.padding + u * (hi - self.padding)
            } else {
                ((extent - size) * 0.5).max(0.0)
            }
        };

        (0..n)
            .map(|i| {
                let size = f64::from(self.sizes[i % self.sizes.len()])
                    .min(width)
                    .min(height);
                let ux = hash_unit(self.seed, i as u64, 0);
                let uy = hash_unit(self.seed, i as u64, 1);
                Placement::new(
                    scatter(ux, width, size),
                    scatter(uy, height, size),
                    size,
                    size,
                )
            })
            .collect()
    }
}

impl LayoutStrategy for CircularParams {
    fn validate(&self) -> KeepsakeResult<()> {
        check_padding("circular radius_factor", self.radius_factor)?;
        check_tile("circular tile", self.tile)
    }

    fn arrange(&self, n: usize, width: f64, height: f64) -> Vec<Placement> {
        let tile = self.tile.min(width).min(height);
        let radius = width.min(height) * self.radius_factor;
        let (cx, cy) = (width * 0.5, height * 0.5);
        (0..n)
            .map(|i| {
                let angle = i as f64 * TAU / n as f64;
                let center = Point::new(cx + radius * angle.cos(), cy + radius * angle.sin());
                Placement::centered_square(center, tile)
            })
            .collect()
    }
}

impl LayoutStrategy for DiagonalParams {
    fn validate(&self) -> KeepsakeResult<()> {
        check_tile("diagonal tile", self.tile)
    }

    fn arrange(&self, n: usize, width: f64, height: f64) -> Vec<Placement> {
        let tile = self.tile.min(width).min(height);
        let (step_x, step_y) = if n > 1 {
            let steps = (n - 1) as f64;
            ((width - tile) / steps, (height - tile) / steps)
        } else {
            (0.0, 0.0)
        };
        (0..n)
            .map(|i| Placement::new(i as f64 * step_x, i as f64 * step_y, tile, tile))
            .collect()
    }
}

impl LayoutStrategy for HeartParams {
    fn validate(&self) -> KeepsakeResult<()> {
        check_padding("heart scale_factor", self.scale_factor)?;
        check_tile("heart tile", self.tile)
    }

    fn arrange(&self, n: usize, width: f64, height: f64) -> Vec<Placement> {
        let tile = self.tile.min(width).min(height);
        let scale = width.min(height) * self.scale_factor;
        let (cx, cy) = (width * 0.5, height * 0.5);
        (0..n)
            .map(|i| {
                let p = heart_curve(i as f64 * TAU / n as f64);
                Placement::centered_square(Point::new(cx + p.x * scale, cy - p.y * scale), tile)
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/engine.rs"]
mod tests;
