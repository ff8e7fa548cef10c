use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::effects::params::EffectParameters;
use crate::encode::exporter::ExportFormat;
use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::error::{KeepsakeError, KeepsakeResult};
use crate::layout::kind::LayoutKind;
use crate::render::surface::MAX_SURFACE_DIM;
use crate::render::theme::Theme;

/// How a photo fills its placement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageFit {
    /// Scale to cover the placement and crop the overflow, keeping the aspect ratio.
    #[default]
    Cover,
    /// Scale each axis independently to the placement.
    Stretch,
}

/// Everything needed to render one composition, apart from the media.
///
/// Deserializes from JSON with every field optional:
///
/// ```json
/// { "title": "Summer", "theme": "vintage", "layout": { "kind": "heart", "tile": 90 },
///   "width": 1200, "height": 800, "format": { "type": "jpeg", "quality": 85 } }
/// ```
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CompositionSpec {
    /// Optional title drawn in a band across the top.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Visual theme.
    pub theme: Theme,
    /// Placement strategy.
    pub layout: LayoutKind,
    /// Whole-surface effects applied after compositing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effects: Option<EffectParameters>,
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Straight-alpha RGBA fill that replaces the theme background.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<[u8; 4]>,
    /// Photo fitting mode.
    pub fit: ImageFit,
    /// Output encoding.
    pub format: ExportFormat,
}

impl Default for CompositionSpec {
    fn default() -> Self {
        Self {
            title: None,
            theme: Theme::default(),
            layout: LayoutKind::default(),
            effects: None,
            width: 1200,
            height: 800,
            background: None,
            fit: ImageFit::default(),
            format: ExportFormat::default(),
        }
    }
}

impl CompositionSpec {
    /// Parse a spec from a JSON string.
    pub fn from_json(s: &str) -> KeepsakeResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    /// Parse a spec from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> KeepsakeResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| KeepsakeError::invalid(format!("parse composition spec JSON: {e}")))
    }

    /// Parse a spec from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> KeepsakeResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            KeepsakeError::invalid(format!(
                "open composition spec JSON '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> KeepsakeResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| KeepsakeError::Other(anyhow::Error::new(e)))
    }

    /// Output canvas.
    pub fn canvas(&self) -> KeepsakeResult<Canvas> {
        Canvas::new(self.width, self.height)
    }

    /// Title with surrounding whitespace removed, if anything is left.
    pub fn effective_title(&self) -> Option<&str> {
        self.title.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }

    /// Background override as a color.
    pub fn background_color(&self) -> Option<Rgba8> {
        self.background.map(Rgba8::from)
    }

    /// Reject anything that would make rendering fail or misbehave. Runs before any IO.
    ///
    /// Canvases larger than [`MAX_SURFACE_DIM`] fail with [`KeepsakeError::SurfaceAllocation`] so
    /// callers can retry smaller; every other problem is [`KeepsakeError::InvalidParameter`].
    pub fn validate(&self) -> KeepsakeResult<()> {
        let canvas = self.canvas()?;
        if canvas.width > MAX_SURFACE_DIM || canvas.height > MAX_SURFACE_DIM {
            return Err(KeepsakeError::surface(format!(
                "canvas {}x{} exceeds the {MAX_SURFACE_DIM}px limit",
                canvas.width, canvas.height
            )));
        }
        if let Some(effects) = &self.effects {
            effects.validate()?;
        }
        // An empty layout is cheap and runs the same parameter checks as a real one.
        crate::layout::engine::compute_placements(0, &self.layout, canvas)?;
        Ok(())
    }
}

/// Fluent construction of a [`CompositionSpec`].
#[derive(Clone, Debug)]
pub struct CompositionSpecBuilder {
    spec: CompositionSpec,
}

impl CompositionSpecBuilder {
    /// Start from defaults with the given canvas size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            spec: CompositionSpec {
                width,
                height,
                ..CompositionSpec::default()
            },
        }
    }

    /// Set the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.spec.title = Some(title.into());
        self
    }

    /// Set the theme.
    pub fn theme(mut self, theme: Theme) -> Self {
        self.spec.theme = theme;
        self
    }

    /// Set the layout.
    pub fn layout(mut self, layout: LayoutKind) -> Self {
        self.spec.layout = layout;
        self
    }

    /// Set whole-surface effects.
    pub fn effects(mut self, effects: EffectParameters) -> Self {
        self.spec.effects = Some(effects);
        self
    }

    /// Override the theme background with one straight-alpha color.
    pub fn background(mut self, rgba: [u8; 4]) -> Self {
        self.spec.background = Some(rgba);
        self
    }

    /// Set the photo fitting mode.
    pub fn fit(mut self, fit: ImageFit) -> Self {
        self.spec.fit = fit;
        self
    }

    /// Set the output encoding.
    pub fn format(mut self, format: ExportFormat) -> Self {
        self.spec.format = format;
        self
    }

    /// Validate and return the spec.
    pub fn build(self) -> KeepsakeResult<CompositionSpec> {
        self.spec.validate()?;
        Ok(self.spec)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/spec.rs"]
mod tests;
