/// Convenience result type used across Keepsake.
pub type KeepsakeResult<T> = Result<T, KeepsakeError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Per-image load failures are not errors: they are reported as
/// [`crate::LoadFailure`] values next to a successful result.
#[derive(thiserror::Error, Debug)]
pub enum KeepsakeError {
    /// A layout, effect, or composition parameter is outside its domain and cannot be clamped.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Every reference in the batch failed to load.
    #[error("cannot compose: no images available ({attempted} attempted)")]
    NoUsableImages {
        /// Number of references the loader tried.
        attempted: usize,
    },

    /// The raster surface for this render could not be allocated.
    #[error("surface allocation failed: {0}")]
    SurfaceAllocation(String),

    /// The final surface could not be encoded.
    #[error("encode failed: {0}")]
    Encode(String),

    /// The caller cancelled the render before it finished.
    #[error("render cancelled")]
    Cancelled,

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl KeepsakeError {
    /// Build a [`KeepsakeError::InvalidParameter`] value.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    /// Build a [`KeepsakeError::SurfaceAllocation`] value.
    pub fn surface(msg: impl Into<String>) -> Self {
        Self::SurfaceAllocation(msg.into())
    }

    /// Build a [`KeepsakeError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
