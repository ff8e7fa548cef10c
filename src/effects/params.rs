use crate::foundation::error::{KeepsakeError, KeepsakeResult};

/// Whole-surface effect knobs. The default value is the identity transform.
///
/// Setters clamp to each knob's range; values deserialized from JSON are clamped when the
/// pipeline runs. Non-finite values are rejected by [`EffectParameters::validate`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EffectParameters {
    /// Brightness in percent, `[0, 200]`, identity 100.
    pub brightness: f32,
    /// Contrast in percent, `[0, 200]`, identity 100.
    pub contrast: f32,
    /// Saturation in percent, `[0, 200]`, identity 100.
    pub saturation: f32,
    /// Hue rotation in degrees, `[-180, 180]`, identity 0.
    pub hue: f32,
    /// Gaussian blur standard deviation in pixels, `[0, 10]`.
    pub blur: f32,
    /// Sepia amount in percent, `[0, 100]`.
    pub sepia: f32,
    /// Grayscale amount in percent, `[0, 100]`.
    pub grayscale: f32,
    /// Warm multiply tint intensity in percent, `[0, 100]`.
    pub vintage: f32,
    /// Radial edge darkening intensity in percent, `[0, 100]`.
    pub vignette: f32,
}

impl Default for EffectParameters {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Knob name with its inclusive range.
const RANGES: [(&str, f32, f32); 9] = [
    ("brightness", 0.0, 200.0),
    ("contrast", 0.0, 200.0),
    ("saturation", 0.0, 200.0),
    ("hue", -180.0, 180.0),
    ("blur", 0.0, 10.0),
    ("sepia", 0.0, 100.0),
    ("grayscale", 0.0, 100.0),
    ("vintage", 0.0, 100.0),
    ("vignette", 0.0, 100.0),
];

impl EffectParameters {
    /// No-op parameters.
    pub const IDENTITY: Self = Self {
        brightness: 100.0,
        contrast: 100.0,
        saturation: 100.0,
        hue: 0.0,
        blur: 0.0,
        sepia: 0.0,
        grayscale: 0.0,
        vintage: 0.0,
        vignette: 0.0,
    };

    fn values(&self) -> [f32; 9] {
        [
            self.brightness,
            self.contrast,
            self.saturation,
            self.hue,
            self.blur,
            self.sepia,
            self.grayscale,
            self.vintage,
            self.vignette,
        ]
    }

    /// Reject NaN and infinite knobs.
    pub fn validate(&self) -> KeepsakeResult<()> {
        for ((name, _, _), v) in RANGES.iter().zip(self.values()) {
            if !v.is_finite() {
                return Err(KeepsakeError::invalid(format!(
                    "effect '{name}' must be finite, got {v}"
                )));
            }
        }
        Ok(())
    }

    /// Copy with every knob clamped to its range. NaN is left for [`Self::validate`] to report.
    pub fn clamped(&self) -> Self {
        let [b, c, s, h, bl, se, g, vi, vg] = self.values();
        let clamp = |i: usize, v: f32| v.clamp(RANGES[i].1, RANGES[i].2);
        Self {
            brightness: clamp(0, b),
            contrast: clamp(1, c),
            saturation: clamp(2, s),
            hue: clamp(3, h),
            blur: clamp(4, bl),
            sepia: clamp(5, se),
            grayscale: clamp(6, g),
            vintage: clamp(7, vi),
            vignette: clamp(8, vg),
        }
    }

    /// Return `true` when applying these parameters changes nothing.
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Set brightness (clamped).
    pub fn with_brightness(mut self, v: f32) -> Self {
        self.brightness = v;
        self.clamped()
    }

    /// Set contrast (clamped).
    pub fn with_contrast(mut self, v: f32) -> Self {
        self.contrast = v;
        self.clamped()
    }

    /// Set saturation (clamped).
    pub fn with_saturation(mut self, v: f32) -> Self {
        self.saturation = v;
        self.clamped()
    }

    /// Set hue rotation (clamped).
    pub fn with_hue(mut self, v: f32) -> Self {
        self.hue = v;
        self.clamped()
    }

    /// Set blur (clamped).
    pub fn with_blur(mut self, v: f32) -> Self {
        self.blur = v;
        self.clamped()
    }

    /// Set sepia (clamped).
    pub fn with_sepia(mut self, v: f32) -> Self {
        self.sepia = v;
        self.clamped()
    }

    /// Set grayscale (clamped).
    pub fn with_grayscale(mut self, v: f32) -> Self {
        self.grayscale = v;
        self.clamped()
    }

    /// Set vintage tint (clamped).
    pub fn with_vintage(mut self, v: f32) -> Self {
        self.vintage = v;
        self.clamped()
    }

    /// Set vignette (clamped).
    pub fn with_vignette(mut self, v: f32) -> Self {
        self.vignette = v;
        self.clamped()
    }
}

/// Named effect presets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectPreset {
    /// Identity.
    None,
    /// Warm faded print with dark corners.
    Vintage,
    /// High-contrast black and white.
    Noir,
    /// Slightly saturated, shifted towards orange.
    Warm,
    /// Slightly desaturated, shifted towards blue.
    Cool,
    /// Punchy contrast and saturation with a strong vignette.
    Dramatic,
    /// Low contrast, washed-out colors.
    Faded,
}

impl EffectPreset {
    /// Every preset, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::None,
        Self::Vintage,
        Self::Noir,
        Self::Warm,
        Self::Cool,
        Self::Dramatic,
        Self::Faded,
    ];

    /// Look a preset up by name (case-insensitive).
    pub fn from_name(name: &str) -> KeepsakeResult<Self> {
        let key = name.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.name() == key)
            .ok_or_else(|| KeepsakeError::invalid(format!("unknown effect preset '{name}'")))
    }

    /// Lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Vintage => "vintage",
            Self::Noir => "noir",
            Self::Warm => "warm",
            Self::Cool => "cool",
            Self::Dramatic => "dramatic",
            Self::Faded => "faded",
        }
    }

    /// The preset's parameters.
    pub fn params(self) -> EffectParameters {
        match self {
            Self::None => presets::NONE,
            Self::Vintage => presets::VINTAGE,
            Self::Noir => presets::NOIR,
            Self::Warm => presets::WARM,
            Self::Cool => presets::COOL,
            Self::Dramatic => presets::DRAMATIC,
            Self::Faded => presets::FADED,
        }
    }
}

/// Preset parameter values.
pub mod presets {
    use super::EffectParameters;

    /// Identity.
    pub const NONE: EffectParameters = EffectParameters::IDENTITY;

    /// See [`EffectPreset`].
    pub const VINTAGE: EffectParameters = EffectParameters {
        brightness: 105.0,
        contrast: 110.0,
        sepia: 40.0,
        vintage: 60.0,
        vignette: 30.0,
        ..EffectParameters::IDENTITY
    };

    /// See [`EffectPreset`].
    pub const NOIR: EffectParameters = EffectParameters {
        contrast: 130.0,
        grayscale: 100.0,
        vignette: 40.0,
        ..EffectParameters::IDENTITY
    };

    /// See [`EffectPreset`].
    pub const WARM: EffectParameters = EffectParameters {
        saturation: 120.0,
        hue: -10.0,
        sepia: 15.0,
        ..EffectParameters::IDENTITY
    };

    /// See [`EffectPreset`].
    pub const COOL: EffectParameters = EffectParameters {
        brightness: 105.0,
        saturation: 90.0,
        hue: 15.0,
        ..EffectParameters::IDENTITY
    };

    /// See [`EffectPreset`].
    pub const DRAMATIC: EffectParameters = EffectParameters {
        contrast: 150.0,
        saturation: 130.0,
        vignette: 50.0,
        ..EffectParameters::IDENTITY
    };

    /// See [`EffectPreset`].
    pub const FADED: EffectParameters = EffectParameters {
        brightness: 110.0,
        contrast: 80.0,
        saturation: 70.0,
        ..EffectParameters::IDENTITY
    };
}

#[cfg(test)]
#[path = "../../tests/unit/effects/params.rs"]
mod tests;
