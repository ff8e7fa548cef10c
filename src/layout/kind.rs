use crate::foundation::error::{KeepsakeError, KeepsakeResult};

/// Geometric strategy used to place items on the canvas.
///
/// Serialized as an internally tagged object, e.g. `{"kind": "mosaic", "seed": 7}`; omitted
/// parameters take their defaults.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayoutKind {
    /// Uniform row-major grid.
    Grid(GridParams),
    /// Seeded scatter of fixed-size tiles; overlaps are allowed.
    Mosaic(MosaicParams),
    /// Tiles evenly spaced on a circle.
    Circular(CircularParams),
    /// Tiles stepping from the top-left to the bottom-right corner.
    Diagonal(DiagonalParams),
    /// Tiles on the parametric heart curve.
    Heart(HeartParams),
}

impl Default for LayoutKind {
    fn default() -> Self {
        Self::Grid(GridParams::default())
    }
}

impl LayoutKind {
    /// Default-parameter layout for a name (`grid`, `mosaic`, `circular`, `diagonal`, `heart`).
    pub fn from_name(name: &str) -> KeepsakeResult<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "grid" => Ok(Self::Grid(GridParams::default())),
            "mosaic" => Ok(Self::Mosaic(MosaicParams::default())),
            "circular" | "circle" => Ok(Self::Circular(CircularParams::default())),
            "diagonal" => Ok(Self::Diagonal(DiagonalParams::default())),
            "heart" => Ok(Self::Heart(HeartParams::default())),
            other => Err(KeepsakeError::invalid(format!("unknown layout '{other}'"))),
        }
    }

    /// Lowercase name of the variant.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Grid(_) => "grid",
            Self::Mosaic(_) => "mosaic",
            Self::Circular(_) => "circular",
            Self::Diagonal(_) => "diagonal",
            Self::Heart(_) => "heart",
        }
    }
}

/// Grid parameters.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GridParams {
    /// Gap around and between cells, in pixels.
    pub padding: f64,
}

impl Default for GridParams {
    fn default() -> Self {
        Self { padding: 20.0 }
    }
}

/// Mosaic parameters.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MosaicParams {
    /// Square tile sizes, cycled by item index.
    pub sizes: Vec<u32>,
    /// Margin kept free along the canvas edges.
    pub padding: f64,
    /// Seed of the position generator. Equal seeds give equal layouts.
    pub seed: u64,
}

impl Default for MosaicParams {
    fn default() -> Self {
        Self {
            sizes: vec![120, 100, 140, 110, 130],
            padding: 20.0,
            seed: 0,
        }
    }
}

/// Circular parameters.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CircularParams {
    /// Circle radius as a fraction of `min(width, height)`.
    pub radius_factor: f64,
    /// Square tile size.
    pub tile: f64,
}

impl Default for CircularParams {
    fn default() -> Self {
        Self {
            radius_factor: 0.3,
            tile: 120.0,
        }
    }
}

/// Diagonal parameters.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DiagonalParams {
    /// Square tile size.
    pub tile: f64,
}

impl Default for DiagonalParams {
    fn default() -> Self {
        Self { tile: 120.0 }
    }
}

/// Heart parameters.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct HeartParams {
    /// Curve units to pixels, as a fraction of `min(width, height)`.
    pub scale_factor: f64,
    /// Square tile size.
    pub tile: f64,
}

impl Default for HeartParams {
    fn default() -> Self {
        Self {
            scale_factor: 0.025,
            tile: 80.0,
        }
    }
}
