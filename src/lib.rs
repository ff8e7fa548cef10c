//! Keepsake is an image composition and effects engine.
//!
//! It turns a list of photo references (plus optional placeholder tiles for non-photo media) into
//! one encoded image: collages, book covers, mashup cards, and single-photo edits.
//!
//! - Describe the output with a [`CompositionSpec`] (builder or JSON)
//! - Render it with a [`Compositor`]
//! - Read the bytes, placements, and per-image load failures from the [`CompositionResult`]
//!
//! Every render is self-contained: the surface, the loader thread pool, and all decoded bitmaps
//! are owned by the call and dropped before it returns.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod effects;
mod encode;
mod foundation;
mod layout;
mod render;

pub use crate::foundation::core::{Affine, CancelToken, Canvas, Placement, Point, Rect, Rgba8};
pub use crate::foundation::error::{KeepsakeError, KeepsakeResult};

pub use crate::assets::decode::DecodedImage;
pub use crate::assets::loader::{
    LoadFailure, LoadFailureReason, LoadReport, LoadStats, LoadedImage, LoaderOpts,
    ResourceLoader,
};
pub use crate::assets::reference::{
    ImageReference, MediaItem, MediaKind, MemoryRecord, media_items, photo_references,
};

pub use crate::layout::engine::{
    LayoutStrategy, compute_placements, compute_placements_in, grid_dims, heart_curve,
};
pub use crate::layout::kind::{
    CircularParams, DiagonalParams, GridParams, HeartParams, LayoutKind, MosaicParams,
};

pub use crate::effects::blend::{PremulRgba8, multiply, over};
pub use crate::effects::params::{EffectParameters, EffectPreset, presets};
pub use crate::effects::pipeline::{VINTAGE_TINT, apply_effects, apply_effects_in_place};

pub use crate::encode::exporter::{EncodedImage, ExportFormat, encode, encode_rgba8_premul};

pub use crate::render::compositor::{CompositionResult, Compositor, CompositorOpts};
pub use crate::render::spec::{CompositionSpec, CompositionSpecBuilder, ImageFit};
pub use crate::render::surface::{MAX_SURFACE_DIM, RasterSurface};
pub use crate::render::theme::{Background, Frame, Theme, ThemeStyle};
