//! Aspect ratio presets offered by the crop tool.

use ithaka_core::GeometryError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Smallest custom ratio accepted (1:10).
pub const MIN_CUSTOM_RATIO: f64 = 0.1;
/// Largest custom ratio accepted (10:1).
pub const MAX_CUSTOM_RATIO: f64 = 10.0;

/// Width/height constraint applied to the crop region.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AspectRatioPreset {
    /// 1:1
    Square,
    /// 3:4
    Portrait3x4,
    /// 9:16
    Portrait9x16,
    /// 16:9
    Landscape16x9,
    /// 4:3
    Landscape4x3,
    /// User supplied width/height ratio, clamped to `[0.1, 10]`
    Custom(f64),
    /// No ratio enforcement
    #[default]
    Free,
}

impl AspectRatioPreset {
    /// Presets in the order the ratio picker lists them.
    pub const ALL: [AspectRatioPreset; 7] = [
        Self::Free,
        Self::Square,
        Self::Portrait3x4,
        Self::Portrait9x16,
        Self::Landscape16x9,
        Self::Landscape4x3,
        Self::Custom(1.0),
    ];

    /// Returns the width/height ratio, or `None` for [`AspectRatioPreset::Free`].
    pub fn ratio(&self) -> Option<f64> {
        match self {
            Self::Square => Some(1.0),
            Self::Portrait3x4 => Some(3.0 / 4.0),
            Self::Portrait9x16 => Some(9.0 / 16.0),
            Self::Landscape16x9 => Some(16.0 / 9.0),
            Self::Landscape4x3 => Some(4.0 / 3.0),
            Self::Custom(ratio) => Some(clamp_custom_ratio(*ratio)),
            Self::Free => None,
        }
    }

    /// True for [`AspectRatioPreset::Free`].
    pub fn is_free(&self) -> bool {
        matches!(self, Self::Free)
    }

    /// True for any [`AspectRatioPreset::Custom`] value.
    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }

    /// Label shown in the ratio picker.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Square => "1:1",
            Self::Portrait3x4 => "3:4",
            Self::Portrait9x16 => "9:16",
            Self::Landscape16x9 => "16:9",
            Self::Landscape4x3 => "4:3",
            Self::Custom(_) => "custom",
            Self::Free => "free",
        }
    }
}

/// Clamps a user supplied ratio into `[0.1, 10]`. Non-finite input falls back to 1:1.
pub fn clamp_custom_ratio(ratio: f64) -> f64 {
    if ratio.is_finite() {
        ratio.clamp(MIN_CUSTOM_RATIO, MAX_CUSTOM_RATIO)
    } else {
        1.0
    }
}

impl fmt::Display for AspectRatioPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Custom(ratio) => write!(f, "custom:{}", clamp_custom_ratio(*ratio)),
            other => write!(f, "{}", other.label()),
        }
    }
}

impl FromStr for AspectRatioPreset {
    type Err = GeometryError;

    /// Accepts picker labels (`"16:9"`), snake-case names (`"landscape_16_9"`),
    /// and `"custom:<ratio>"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        if let Some(raw) = normalized.strip_prefix("custom:") {
            let ratio: f64 = raw
                .trim()
                .parse()
                .map_err(|_| GeometryError::InvalidRatio {
                    value: raw.to_string(),
                })?;
            return Ok(Self::Custom(clamp_custom_ratio(ratio)));
        }

        match normalized.as_str() {
            "square" | "1:1" => Ok(Self::Square),
            "portrait_3_4" | "3:4" => Ok(Self::Portrait3x4),
            "portrait_9_16" | "9:16" => Ok(Self::Portrait9x16),
            "landscape_16_9" | "16:9" => Ok(Self::Landscape16x9),
            "landscape_4_3" | "4:3" => Ok(Self::Landscape4x3),
            "custom" => Ok(Self::Custom(1.0)),
            "free" | "none" => Ok(Self::Free),
            _ => Err(GeometryError::UnknownAspectPreset {
                name: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for AspectRatioPreset {
    type Error = GeometryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AspectRatioPreset> for String {
    fn from(preset: AspectRatioPreset) -> Self {
        preset.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_ratios() {
        assert_eq!(AspectRatioPreset::Square.ratio(), Some(1.0));
        assert_eq!(AspectRatioPreset::Portrait3x4.ratio(), Some(0.75));
        assert_eq!(AspectRatioPreset::Landscape4x3.ratio(), Some(4.0 / 3.0));
        assert_eq!(AspectRatioPreset::Free.ratio(), None);
    }

    #[test]
    fn test_custom_ratio_is_clamped() {
        assert_eq!(AspectRatioPreset::Custom(25.0).ratio(), Some(10.0));
        assert_eq!(AspectRatioPreset::Custom(0.01).ratio(), Some(0.1));
        assert_eq!(clamp_custom_ratio(f64::INFINITY), 1.0);
    }

    #[test]
    fn test_parse_labels_and_names() {
        assert_eq!(
            "16:9".parse::<AspectRatioPreset>().unwrap(),
            AspectRatioPreset::Landscape16x9
        );
        assert_eq!(
            "portrait_9_16".parse::<AspectRatioPreset>().unwrap(),
            AspectRatioPreset::Portrait9x16
        );
        assert_eq!(
            " Free ".parse::<AspectRatioPreset>().unwrap(),
            AspectRatioPreset::Free
        );
        assert_eq!(
            "custom:2.5".parse::<AspectRatioPreset>().unwrap(),
            AspectRatioPreset::Custom(2.5)
        );
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!(matches!(
            "golden".parse::<AspectRatioPreset>(),
            Err(GeometryError::UnknownAspectPreset { .. })
        ));
        assert!(matches!(
            "custom:wide".parse::<AspectRatioPreset>(),
            Err(GeometryError::InvalidRatio { .. })
        ));
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for preset in AspectRatioPreset::ALL {
            let parsed: AspectRatioPreset = preset.to_string().parse().unwrap();
            assert_eq!(parsed, preset);
        }
    }
}
