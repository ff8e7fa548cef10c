use crate::foundation::core::Rgba8;
use crate::foundation::error::{KeepsakeError, KeepsakeResult};

/// Visual theme of a composition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    /// Off-white paper with thin white frames.
    #[default]
    Classic,
    /// Warm sepia gradient with brown frames.
    Vintage,
    /// Flat light gray, no frames.
    Modern,
    /// Pink gradient with white frames.
    Romantic,
    /// Plain white, no frames.
    Minimal,
    /// Charcoal with dark frames.
    Dark,
}

/// Surface fill drawn before anything else.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Background {
    /// One color.
    Solid(Rgba8),
    /// Top-to-bottom linear gradient.
    VerticalGradient {
        /// Color of the first row.
        top: Rgba8,
        /// Color of the last row.
        bottom: Rgba8,
    },
}

/// Border drawn around every tile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    /// Border color.
    pub color: Rgba8,
    /// Border width in pixels, inside the placement.
    pub width: f64,
}

/// Resolved drawing parameters of a [`Theme`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThemeStyle {
    /// Background fill.
    pub background: Background,
    /// Title text color.
    pub title_color: Rgba8,
    /// Title font family list, CSS syntax.
    pub title_font: &'static str,
    /// Title font size in pixels.
    pub title_size: f32,
    /// Tile border, if any.
    pub frame: Option<Frame>,
    /// Card color behind placeholder icons.
    pub placeholder_fill: Rgba8,
    /// Placeholder icon color.
    pub placeholder_icon: Rgba8,
}

impl Theme {
    /// Every theme, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Classic,
        Self::Vintage,
        Self::Modern,
        Self::Romantic,
        Self::Minimal,
        Self::Dark,
    ];

    /// Look a theme up by name (case-insensitive).
    pub fn from_name(name: &str) -> KeepsakeResult<Self> {
        let key = name.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.name() == key)
            .ok_or_else(|| KeepsakeError::invalid(format!("unknown theme '{name}'")))
    }

    /// Lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Vintage => "vintage",
            Self::Modern => "modern",
            Self::Romantic => "romantic",
            Self::Minimal => "minimal",
            Self::Dark => "dark",
        }
    }

    /// Drawing parameters.
    pub fn style(self) -> ThemeStyle {
        match self {
            Self::Classic => ThemeStyle {
                background: Background::Solid(Rgba8::opaque(250, 247, 240)),
                title_color: Rgba8::opaque(51, 51, 51),
                title_font: "Georgia, serif",
                title_size: 32.0,
                frame: Some(Frame {
                    color: Rgba8::opaque(255, 255, 255),
                    width: 4.0,
                }),
                placeholder_fill: Rgba8::opaque(230, 226, 218),
                placeholder_icon: Rgba8::opaque(120, 114, 104),
            },
            Self::Vintage => ThemeStyle {
                background: Background::VerticalGradient {
                    top: Rgba8::opaque(244, 228, 193),
                    bottom: Rgba8::opaque(212, 184, 150),
                },
                title_color: Rgba8::opaque(92, 64, 51),
                title_font: "Georgia, serif",
                title_size: 34.0,
                frame: Some(Frame {
                    color: Rgba8::opaque(139, 105, 20),
                    width: 5.0,
                }),
                placeholder_fill: Rgba8::opaque(222, 200, 160),
                placeholder_icon: Rgba8::opaque(92, 64, 51),
            },
            Self::Modern => ThemeStyle {
                background: Background::Solid(Rgba8::opaque(240, 240, 240)),
                title_color: Rgba8::opaque(17, 17, 17),
                title_font: "Helvetica, Arial, sans-serif",
                title_size: 30.0,
                frame: None,
                placeholder_fill: Rgba8::opaque(214, 214, 214),
                placeholder_icon: Rgba8::opaque(68, 68, 68),
            },
            Self::Romantic => ThemeStyle {
                background: Background::VerticalGradient {
                    top: Rgba8::opaque(255, 228, 236),
                    bottom: Rgba8::opaque(255, 192, 203),
                },
                title_color: Rgba8::opaque(199, 21, 133),
                title_font: "Georgia, serif",
                title_size: 34.0,
                frame: Some(Frame {
                    color: Rgba8::opaque(255, 255, 255),
                    width: 6.0,
                }),
                placeholder_fill: Rgba8::opaque(255, 214, 224),
                placeholder_icon: Rgba8::opaque(199, 21, 133),
            },
            Self::Minimal => ThemeStyle {
                background: Background::Solid(Rgba8::opaque(255, 255, 255)),
                title_color: Rgba8::opaque(0, 0, 0),
                title_font: "Helvetica, Arial, sans-serif",
                title_size: 28.0,
                frame: None,
                placeholder_fill: Rgba8::opaque(238, 238, 238),
                placeholder_icon: Rgba8::opaque(136, 136, 136),
            },
            Self::Dark => ThemeStyle {
                background: Background::Solid(Rgba8::opaque(26, 26, 26)),
                title_color: Rgba8::opaque(245, 245, 245),
                title_font: "Helvetica, Arial, sans-serif",
                title_size: 32.0,
                frame: Some(Frame {
                    color: Rgba8::opaque(51, 51, 51),
                    width: 3.0,
                }),
                placeholder_fill: Rgba8::opaque(48, 48, 48),
                placeholder_icon: Rgba8::opaque(200, 200, 200),
            },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/theme.rs"]
mod tests;
