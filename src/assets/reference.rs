use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Opaque locator for one source image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageReference {
    /// File on the local filesystem.
    Path(PathBuf),
    /// `http(s)://` or `data:` URL.
    Url(String),
    /// Encoded image bytes already in memory.
    Bytes(Arc<[u8]>),
}

impl ImageReference {
    /// Classify a string locator.
    ///
    /// `http://`, `https://` and `data:` become [`ImageReference::Url`]; `file://` and everything
    /// else is treated as a filesystem path.
    pub fn parse(locator: &str) -> Self {
        let trimmed = locator.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") || lower.starts_with("data:")
        {
            return Self::Url(trimmed.to_string());
        }
        if let Some(rest) = trimmed.strip_prefix("file://") {
            return Self::Path(PathBuf::from(rest));
        }
        Self::Path(PathBuf::from(trimmed))
    }

    /// Wrap in-memory encoded bytes.
    pub fn from_bytes(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self::Bytes(bytes.into())
    }

    /// Short label safe for logs (no payloads).
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ImageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(p) => write!(f, "{}", p.display()),
            Self::Url(u) if u.get(..5).is_some_and(|p| p.eq_ignore_ascii_case("data:")) => {
                let header = u.split(',').next().unwrap_or("data:");
                write!(f, "{header},... ({} chars)", u.len())
            }
            Self::Url(u) => {
                const MAX: usize = 96;
                if u.len() <= MAX {
                    write!(f, "{u}")
                } else {
                    let cut = (0..=MAX).rev().find(|&i| u.is_char_boundary(i)).unwrap_or(0);
                    write!(f, "{}...", &u[..cut])
                }
            }
            Self::Bytes(b) => write!(f, "<{} bytes>", b.len()),
        }
    }
}

impl From<&str> for ImageReference {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<PathBuf> for ImageReference {
    fn from(value: PathBuf) -> Self {
        Self::Path(value)
    }
}

impl From<Vec<u8>> for ImageReference {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value.into())
    }
}

/// Kind of a memory record's media.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Still photo; the only kind that is decoded.
    Photo,
    /// Video clip, drawn as a play-icon placeholder.
    Video,
    /// Audio clip, drawn as an equalizer placeholder.
    Audio,
    /// Text note, drawn as a lined-card placeholder.
    Text,
}

/// One item handed to the compositor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MediaItem {
    /// A photo that must be loaded and decoded.
    Photo(ImageReference),
    /// A non-photo record drawn as an icon tile and never decoded.
    Placeholder(MediaKind),
}

impl From<ImageReference> for MediaItem {
    fn from(value: ImageReference) -> Self {
        Self::Photo(value)
    }
}

/// Memory record as exposed by the surrounding journal application.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MemoryRecord {
    /// Record identifier.
    pub id: String,
    /// Media kind.
    #[serde(rename = "type")]
    pub kind: MediaKind,
    /// Location of the media, if any.
    #[serde(rename = "mediaUrl", default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
}

impl MemoryRecord {
    /// The record's image reference if it is a photo with a media URL.
    pub fn photo_reference(&self) -> Option<ImageReference> {
        match (self.kind, self.media_url.as_deref()) {
            (MediaKind::Photo, Some(url)) if !url.trim().is_empty() => {
                Some(ImageReference::parse(url))
            }
            _ => None,
        }
    }

    /// The record as a compositor item: photos with media become [`MediaItem::Photo`], every
    /// other record a placeholder. Photos without media are skipped.
    pub fn media_item(&self) -> Option<MediaItem> {
        match self.kind {
            MediaKind::Photo => self.photo_reference().map(MediaItem::Photo),
            kind => Some(MediaItem::Placeholder(kind)),
        }
    }
}

/// Keep only photo records that carry a media URL, in input order.
pub fn photo_references(records: &[MemoryRecord]) -> Vec<ImageReference> {
    records
        .iter()
        .filter_map(MemoryRecord::photo_reference)
        .collect()
}

/// Map records to compositor items for mashup cards, in input order.
pub fn media_items(records: &[MemoryRecord]) -> Vec<MediaItem> {
    records.iter().filter_map(MemoryRecord::media_item).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/assets/reference.rs"]
mod tests;
