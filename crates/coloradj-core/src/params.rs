//! Adjustment parameters and range clamping.
//!
//! Every control has a fixed inclusive range. Values outside it are clamped
//! silently: an out-of-range slider position is a normal input, not an error.
//!
//! Two parameter representations are supported:
//! - [`AdjustmentParameters`]: signed values centered on zero, as consumed by
//!   the transforms.
//! - [`SliderPositions`]: unsigned, offset-encoded trackbar positions as
//!   produced by a slider UI (e.g. brightness 0..=510 with 255 meaning "no
//!   change"), plus gamma expressed in tenths.

use serde::{Deserialize, Serialize};

/// Brightness range (-255 to 255).
pub const BRIGHTNESS_RANGE: (i32, i32) = (-255, 255);
/// Contrast range (-255 to 255).
pub const CONTRAST_RANGE: (i32, i32) = (-255, 255);
/// Hue shift range (-180 to 180), in 8-bit hue units.
pub const HUE_RANGE: (i32, i32) = (-180, 180);
/// Saturation shift range (-255 to 255).
pub const SATURATION_RANGE: (i32, i32) = (-255, 255);
/// Intensity shift range (-255 to 255).
pub const INTENSITY_RANGE: (i32, i32) = (-255, 255);
/// Per-channel balance offset range (-255 to 255).
pub const BALANCE_RANGE: (i32, i32) = (-255, 255);
/// Gamma exponent range (0.1 to 5.0).
pub const GAMMA_RANGE: (f32, f32) = (0.1, 5.0);

/// Neutral gamma exponent.
pub const NEUTRAL_GAMMA: f32 = 1.0;

/// Clamp an integer control to an inclusive `(min, max)` range.
#[inline]
pub fn clamp_to(value: i32, range: (i32, i32)) -> i32 {
    value.clamp(range.0, range.1)
}

/// Clamp a gamma exponent to [`GAMMA_RANGE`].
///
/// NaN maps to [`NEUTRAL_GAMMA`].
#[inline]
pub fn clamp_gamma(gamma: f32) -> f32 {
    if gamma.is_nan() {
        return NEUTRAL_GAMMA;
    }
    gamma.clamp(GAMMA_RANGE.0, GAMMA_RANGE.1)
}

/// Convert a tenths-scaled gamma control (10 = 1.0) to a clamped exponent.
#[inline]
pub fn gamma_from_tenths(tenths: i32) -> f32 {
    clamp_gamma(tenths as f32 / 10.0)
}

/// Color adjustment parameters consumed by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdjustmentParameters {
    /// Brightness (-255 to 255)
    pub brightness: i32,
    /// Contrast (-255 to 255)
    pub contrast: i32,
    /// Hue shift in 8-bit hue units (-180 to 180)
    pub hue: i32,
    /// Saturation shift (-255 to 255)
    pub saturation: i32,
    /// Intensity (HSV value) shift (-255 to 255)
    pub intensity: i32,
    /// Red channel offset (-255 to 255)
    pub balance_red: i32,
    /// Green channel offset (-255 to 255)
    pub balance_green: i32,
    /// Blue channel offset (-255 to 255)
    pub balance_blue: i32,
    /// Gamma exponent (0.1 to 5.0)
    pub gamma: f32,
}

impl Default for AdjustmentParameters {
    fn default() -> Self {
        Self {
            brightness: 0,
            contrast: 0,
            hue: 0,
            saturation: 0,
            intensity: 0,
            balance_red: 0,
            balance_green: 0,
            balance_blue: 0,
            gamma: NEUTRAL_GAMMA,
        }
    }
}

impl AdjustmentParameters {
    /// Create parameters with neutral values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if all values are neutral.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Return a copy with every value clamped to its valid range.
    pub fn clamped(&self) -> Self {
        Self {
            brightness: clamp_to(self.brightness, BRIGHTNESS_RANGE),
            contrast: clamp_to(self.contrast, CONTRAST_RANGE),
            hue: clamp_to(self.hue, HUE_RANGE),
            saturation: clamp_to(self.saturation, SATURATION_RANGE),
            intensity: clamp_to(self.intensity, INTENSITY_RANGE),
            balance_red: clamp_to(self.balance_red, BALANCE_RANGE),
            balance_green: clamp_to(self.balance_green, BALANCE_RANGE),
            balance_blue: clamp_to(self.balance_blue, BALANCE_RANGE),
            gamma: clamp_gamma(self.gamma),
        }
    }
}

/// Offset-encoded slider positions.
///
/// Each signed control is stored as `value + center`, so a slider running
/// from 0 to `2 * center` has its neutral point in the middle. Gamma is
/// stored in tenths (10 = 1.0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderPositions {
    /// Brightness position (0 to 510, 255 = neutral)
    pub brightness: i32,
    /// Contrast position (0 to 510, 255 = neutral)
    pub contrast: i32,
    /// Hue position (0 to 360, 180 = neutral)
    pub hue: i32,
    /// Saturation position (0 to 510, 255 = neutral)
    pub saturation: i32,
    /// Intensity position (0 to 510, 255 = neutral)
    pub intensity: i32,
    /// Red balance position (0 to 510, 255 = neutral)
    pub balance_red: i32,
    /// Green balance position (0 to 510, 255 = neutral)
    pub balance_green: i32,
    /// Blue balance position (0 to 510, 255 = neutral)
    pub balance_blue: i32,
    /// Gamma in tenths (1 to 50, 10 = neutral)
    pub gamma_tenths: i32,
}

/// Center of the 0..=510 sliders.
pub const SLIDER_CENTER: i32 = 255;
/// Center of the 0..=360 hue slider.
pub const HUE_SLIDER_CENTER: i32 = 180;
/// Neutral gamma slider position.
pub const GAMMA_SLIDER_NEUTRAL: i32 = 10;

impl Default for SliderPositions {
    fn default() -> Self {
        Self {
            brightness: SLIDER_CENTER,
            contrast: SLIDER_CENTER,
            hue: HUE_SLIDER_CENTER,
            saturation: SLIDER_CENTER,
            intensity: SLIDER_CENTER,
            balance_red: SLIDER_CENTER,
            balance_green: SLIDER_CENTER,
            balance_blue: SLIDER_CENTER,
            gamma_tenths: GAMMA_SLIDER_NEUTRAL,
        }
    }
}

impl SliderPositions {
    /// Create slider positions at their neutral points.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the positions into clamped adjustment parameters.
    pub fn to_parameters(&self) -> AdjustmentParameters {
        AdjustmentParameters {
            brightness: self.brightness - SLIDER_CENTER,
            contrast: self.contrast - SLIDER_CENTER,
            hue: self.hue - HUE_SLIDER_CENTER,
            saturation: self.saturation - SLIDER_CENTER,
            intensity: self.intensity - SLIDER_CENTER,
            balance_red: self.balance_red - SLIDER_CENTER,
            balance_green: self.balance_green - SLIDER_CENTER,
            balance_blue: self.balance_blue - SLIDER_CENTER,
            gamma: gamma_from_tenths(self.gamma_tenths),
        }
        .clamped()
    }
}

impl From<SliderPositions> for AdjustmentParameters {
    fn from(sliders: SliderPositions) -> Self {
        sliders.to_parameters()
    }
}
