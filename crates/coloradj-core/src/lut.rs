//! 256-entry lookup tables for brightness/contrast and gamma.
//!
//! Both transforms are pure per-value remaps: a table is built once per
//! invocation and then applied to every channel of every pixel by direct
//! indexing.

use crate::buffer::PixelBuffer;
use crate::params::{clamp_gamma, clamp_to, BRIGHTNESS_RANGE, CONTRAST_RANGE};

// ============================================================================
// LUT Type
// ============================================================================

/// Pre-computed 256-entry lookup table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorLut {
    /// LUT values: lut[input] = output
    pub lut: [u8; 256],
}

impl ColorLut {
    /// Build a table from a per-value mapping.
    ///
    /// The mapping's output is saturated to [0, 255] and rounded.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(f64) -> f64,
    {
        let mut lut = [0u8; 256];
        for (i, lut_value) in lut.iter_mut().enumerate() {
            *lut_value = saturate(f(i as f64));
        }
        Self { lut }
    }

    /// Create identity LUT (no change).
    pub fn identity() -> Self {
        let mut lut = [0u8; 256];
        for (i, lut_value) in lut.iter_mut().enumerate() {
            *lut_value = i as u8;
        }
        Self { lut }
    }

    /// Brightness/contrast table.
    ///
    /// With `B = brightness / 255` and `k` from [`contrast_slope`]:
    ///
    /// `y = (x - 127.5 * (1 - B)) * k + 127.5 * (1 + B)`
    ///
    /// Both inputs are clamped to -255..=255 first. Near maximum contrast the
    /// slope is very steep and the table degenerates to a hard threshold.
    pub fn brightness_contrast(brightness: i32, contrast: i32) -> Self {
        let b = clamp_to(brightness, BRIGHTNESS_RANGE) as f64 / 255.0;
        let k = contrast_slope(contrast);
        let pivot_in = 127.5 * (1.0 - b);
        let pivot_out = 127.5 * (1.0 + b);
        Self::from_fn(|x| (x - pivot_in) * k + pivot_out)
    }

    /// Gamma table: `y = 255 * (x / 255)^gamma`.
    ///
    /// Gamma is clamped to 0.1..=5.0 first.
    pub fn gamma(gamma: f32) -> Self {
        let g = clamp_gamma(gamma) as f64;
        Self::from_fn(|x| 255.0 * (x / 255.0).powf(g))
    }

    /// Check if this LUT is identity.
    pub fn is_identity(&self) -> bool {
        self.lut.iter().enumerate().all(|(i, &v)| v == i as u8)
    }

    /// Look up a single value.
    #[inline]
    pub fn map(&self, value: u8) -> u8 {
        self.lut[value as usize]
    }
}

impl Default for ColorLut {
    fn default() -> Self {
        Self::identity()
    }
}

/// Contrast slope `k = tan((45 + 44 * c) / 180 * PI)` with `c = contrast / 255`.
///
/// `k` is 1 at zero contrast, about 57 at +255 and about 0.017 at -255.
pub fn contrast_slope(contrast: i32) -> f64 {
    let c = clamp_to(contrast, CONTRAST_RANGE) as f64 / 255.0;
    ((45.0 + 44.0 * c) / 180.0 * std::f64::consts::PI).tan()
}

#[inline]
fn saturate(y: f64) -> u8 {
    y.clamp(0.0, 255.0).round() as u8
}

// ============================================================================
// LUT Application
// ============================================================================

/// Apply a LUT to the color channels of every pixel in place.
///
/// Alpha and row padding are left untouched.
pub fn apply_lut(image: &mut PixelBuffer, lut: &ColorLut) {
    // Early exit for identity
    if lut.is_identity() {
        return;
    }

    image.for_each_color_value_mut(|v| *v = lut.lut[*v as usize]);
}

/// Build and apply the brightness/contrast table.
pub fn apply_brightness_contrast(image: &mut PixelBuffer, brightness: i32, contrast: i32) {
    apply_lut(image, &ColorLut::brightness_contrast(brightness, contrast));
}

/// Build and apply the gamma table.
pub fn apply_gamma(image: &mut PixelBuffer, gamma: f32) {
    apply_lut(image, &ColorLut::gamma(gamma));
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for brightness values, including out-of-range input.
    fn brightness_strategy() -> impl Strategy<Value = i32> {
        -400i32..=400
    }

    /// Strategy for non-negative contrast (slope >= 1).
    fn non_negative_contrast_strategy() -> impl Strategy<Value = i32> {
        0i32..=255
    }

    proptest! {
        /// Property: Non-negative contrast yields a monotone table.
        #[test]
        fn prop_brightness_contrast_monotone(
            brightness in brightness_strategy(),
            contrast in non_negative_contrast_strategy(),
        ) {
            let lut = ColorLut::brightness_contrast(brightness, contrast);
            for w in lut.lut.windows(2) {
                prop_assert!(w[0] <= w[1], "LUT must be non-decreasing");
            }
        }

        /// Property: Any contrast yields a monotone table (k is always positive).
        #[test]
        fn prop_brightness_contrast_monotone_any_contrast(
            brightness in brightness_strategy(),
            contrast in -255i32..=255,
        ) {
            let lut = ColorLut::brightness_contrast(brightness, contrast);
            for w in lut.lut.windows(2) {
                prop_assert!(w[0] <= w[1]);
            }
        }

        /// Property: Gamma tables are monotone and fix both endpoints.
        #[test]
        fn prop_gamma_monotone(gamma in 0.1f32..=5.0) {
            let lut = ColorLut::gamma(gamma);
            prop_assert_eq!(lut.map(0), 0);
            prop_assert_eq!(lut.map(255), 255);
            for w in lut.lut.windows(2) {
                prop_assert!(w[0] <= w[1]);
            }
        }

        /// Property: Gamma above one never brightens, below one never darkens.
        #[test]
        fn prop_gamma_direction(gamma in 0.1f32..=5.0, x in 0u8..=255) {
            let y = ColorLut::gamma(gamma).map(x);
            if gamma >= 1.0 {
                prop_assert!(y <= x);
            } else {
                prop_assert!(y >= x);
            }
        }
    }
}
