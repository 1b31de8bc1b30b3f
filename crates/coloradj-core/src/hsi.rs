//! Hue / saturation / intensity shifts.
//!
//! Pixels are converted to 8-bit HSV, shifted additively and converted back.
//! Each channel clamps to its own domain: hue to 0..=180, saturation and
//! intensity to 0..=255. The hue bound is deliberately not 255.

use serde::{Deserialize, Serialize};

use crate::buffer::{BufferError, PixelBuffer};
use crate::colorspace::{hsv_to_rgb, rgb_to_hsv, HUE_MAX};
use crate::params::{clamp_to, HUE_RANGE, INTENSITY_RANGE, SATURATION_RANGE};

/// How the saturation and intensity deltas map onto HSV channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HsiVariant {
    /// Saturation delta to the saturation channel, intensity delta to the value channel.
    #[default]
    Standard,
    /// Saturation delta to both saturation and value; intensity delta ignored.
    SaturationOnValue,
}

/// Additive HSV shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HsiShift {
    /// Hue delta in 8-bit hue units (-180 to 180)
    pub hue: i32,
    /// Saturation delta (-255 to 255)
    pub saturation: i32,
    /// Intensity delta (-255 to 255)
    pub intensity: i32,
    /// Channel mapping variant
    pub variant: HsiVariant,
}

impl HsiShift {
    /// Create a standard shift with deltas clamped to their ranges.
    pub fn new(hue: i32, saturation: i32, intensity: i32) -> Self {
        Self {
            hue,
            saturation,
            intensity,
            variant: HsiVariant::Standard,
        }
        .clamped()
    }

    /// Same deltas with a different channel mapping.
    pub fn with_variant(mut self, variant: HsiVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Return a copy with every delta clamped to its range.
    pub fn clamped(&self) -> Self {
        Self {
            hue: clamp_to(self.hue, HUE_RANGE),
            saturation: clamp_to(self.saturation, SATURATION_RANGE),
            intensity: clamp_to(self.intensity, INTENSITY_RANGE),
            variant: self.variant,
        }
    }

    /// Delta applied to the value channel under this variant.
    #[inline]
    fn value_delta(&self) -> i32 {
        match self.variant {
            HsiVariant::Standard => self.intensity,
            HsiVariant::SaturationOnValue => self.saturation,
        }
    }

    /// Shift one 8-bit HSV triple. Deltas are used as stored.
    #[inline]
    pub fn shift_hsv(&self, hsv: [u8; 3]) -> [u8; 3] {
        [
            shift_channel(hsv[0], self.hue, HUE_MAX),
            shift_channel(hsv[1], self.saturation, u8::MAX),
            shift_channel(hsv[2], self.value_delta(), u8::MAX),
        ]
    }
}

#[inline]
fn shift_channel(value: u8, delta: i32, max: u8) -> u8 {
    (value as i32 + delta).clamp(0, max as i32) as u8
}

/// Apply an HSV shift to every pixel in place.
///
/// The HSV round-trip runs even when all deltas are zero, so colored pixels
/// may move by a unit or two from quantization alone. Channels past the
/// third are left untouched.
pub fn apply_hsi_shift(image: &mut PixelBuffer, shift: &HsiShift) -> Result<(), BufferError> {
    image.require_color()?;

    let shift = shift.clamped();
    let order = image.order();
    image.for_each_pixel_mut(|px| {
        let hsv = shift.shift_hsv(rgb_to_hsv(order.read_rgb(px)));
        order.write_rgb(px, hsv_to_rgb(hsv));
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::ChannelOrder;

    // ===== Per-triple shifts =====

    #[test]
    fn test_zero_shift_is_identity_in_hsv() {
        let shift = HsiShift::default();
        assert_eq!(shift.shift_hsv([90, 100, 110]), [90, 100, 110]);
    }

    #[test]
    fn test_hue_clamps_at_180_not_255() {
        let shift = HsiShift::new(150, 0, 0);
        assert_eq!(shift.shift_hsv([100, 0, 0])[0], 180);
    }

    #[test]
    fn test_channels_clamp_at_zero() {
        let shift = HsiShift::new(-180, -255, -255);
        assert_eq!(shift.shift_hsv([10, 20, 30]), [0, 0, 0]);
    }

    #[test]
    fn test_saturation_and_intensity_clamp_at_255() {
        let shift = HsiShift::new(0, 200, 200);
        assert_eq!(shift.shift_hsv([0, 100, 100]), [0, 255, 255]);
    }

    #[test]
    fn test_new_clamps_deltas() {
        let shift = HsiShift::new(500, -500, 900);
        assert_eq!(shift.hue, 180);
        assert_eq!(shift.saturation, -255);
        assert_eq!(shift.intensity, 255);
    }

    #[test]
    fn test_standard_variant_uses_intensity_for_value() {
        let shift = HsiShift::new(0, 10, -20);
        assert_eq!(shift.shift_hsv([0, 100, 100]), [0, 110, 80]);
    }

    #[test]
    fn test_saturation_on_value_variant() {
        let shift = HsiShift::new(0, 10, -20).with_variant(HsiVariant::SaturationOnValue);
        assert_eq!(shift.shift_hsv([0, 100, 100]), [0, 110, 110]);
    }

    // ===== Image application =====

    #[test]
    fn test_zero_shift_keeps_grays() {
        let pixels = vec![250, 250, 250, 50, 50, 50];
        let mut img = PixelBuffer::rgb(2, 1, pixels.clone()).unwrap();
        apply_hsi_shift(&mut img, &HsiShift::default()).unwrap();
        assert_eq!(img.into_raw(), pixels);
    }

    #[test]
    fn test_intensity_brightens_gray() {
        let mut img = PixelBuffer::rgb(1, 1, vec![100, 100, 100]).unwrap();
        apply_hsi_shift(&mut img, &HsiShift::new(0, 0, 50)).unwrap();
        assert_eq!(img.into_raw(), vec![150, 150, 150]);
    }

    #[test]
    fn test_hue_rotation_red_to_green() {
        let mut img = PixelBuffer::rgb(1, 1, vec![255, 0, 0]).unwrap();
        apply_hsi_shift(&mut img, &HsiShift::new(60, 0, 0)).unwrap();
        assert_eq!(img.into_raw(), vec![0, 255, 0]);
    }

    #[test]
    fn test_full_desaturation_gives_gray() {
        let mut img = PixelBuffer::rgb(1, 1, vec![200, 40, 40]).unwrap();
        apply_hsi_shift(&mut img, &HsiShift::new(0, -255, 0)).unwrap();
        assert_eq!(img.into_raw(), vec![200, 200, 200]);
    }

    #[test]
    fn test_bgr_order_respected() {
        // Pure red stored as BGR
        let mut img = PixelBuffer::rgb(1, 1, vec![0, 0, 255])
            .unwrap()
            .with_order(ChannelOrder::Bgr);
        apply_hsi_shift(&mut img, &HsiShift::new(60, 0, 0)).unwrap();
        // Green in BGR is still the middle channel
        assert_eq!(img.into_raw(), vec![0, 255, 0]);
    }

    #[test]
    fn test_alpha_untouched() {
        let mut img = PixelBuffer::packed(1, 1, 4, vec![100, 100, 100, 7]).unwrap();
        apply_hsi_shift(&mut img, &HsiShift::new(0, 0, 50)).unwrap();
        assert_eq!(img.into_raw(), vec![150, 150, 150, 7]);
    }

    #[test]
    fn test_rejects_grayscale_buffer() {
        let mut img = PixelBuffer::filled(2, 2, 1, 9).unwrap();
        let result = apply_hsi_shift(&mut img, &HsiShift::new(10, 0, 0));
        assert_eq!(result, Err(BufferError::NotColor(1)));
        assert_eq!(img.into_raw(), vec![9; 4]);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for 8-bit HSV triples.
    fn hsv_strategy() -> impl Strategy<Value = [u8; 3]> {
        (0u8..=HUE_MAX, any::<u8>(), any::<u8>()).prop_map(|(h, s, v)| [h, s, v])
    }

    /// Strategy for raw (possibly out-of-range) deltas.
    fn delta_strategy() -> impl Strategy<Value = (i32, i32, i32)> {
        (-400i32..=400, -400i32..=400, -400i32..=400)
    }

    fn variant_strategy() -> impl Strategy<Value = HsiVariant> {
        prop_oneof![
            Just(HsiVariant::Standard),
            Just(HsiVariant::SaturationOnValue)
        ]
    }

    proptest! {
        /// Property: Shifted channels always stay inside their domains.
        #[test]
        fn prop_shift_stays_in_domain(
            hsv in hsv_strategy(),
            (dh, ds, di) in delta_strategy(),
            variant in variant_strategy(),
        ) {
            let out = HsiShift::new(dh, ds, di).with_variant(variant).shift_hsv(hsv);
            prop_assert!(out[0] <= HUE_MAX, "hue {} exceeds 180", out[0]);
        }

        /// Property: Hue stays in domain for any source pixel.
        #[test]
        fn prop_rgb_hue_in_domain(
            r in any::<u8>(), g in any::<u8>(), b in any::<u8>(),
            (dh, ds, di) in delta_strategy(),
        ) {
            let hsv = HsiShift::new(dh, ds, di).shift_hsv(rgb_to_hsv([r, g, b]));
            prop_assert!(hsv[0] <= HUE_MAX);
        }

        /// Property: Image geometry is preserved.
        #[test]
        fn prop_geometry_preserved(
            (width, height) in (1u32..=8, 1u32..=8),
            (dh, ds, di) in delta_strategy(),
        ) {
            let mut img = PixelBuffer::filled(width, height, 3, 77).unwrap();
            apply_hsi_shift(&mut img, &HsiShift::new(dh, ds, di)).unwrap();
            prop_assert_eq!(img.width(), width);
            prop_assert_eq!(img.height(), height);
            prop_assert_eq!(img.as_raw().len(), (width * height * 3) as usize);
        }
    }
}
