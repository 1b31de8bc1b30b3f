//! 8-bit color space conversions.
//!
//! The conversion math itself is delegated to `palette`; this module only
//! maps between its normalized floating-point representations and the 8-bit
//! encodings used throughout the crate:
//!
//! | Space | Channel 0            | Channel 1          | Channel 2          |
//! |-------|----------------------|--------------------|--------------------|
//! | HSV   | hue / 2 (0..=180)    | saturation (0..=255) | value (0..=255)  |
//! | Lab   | L * 255 / 100        | a + 128            | b + 128            |
//!
//! Lab uses the D65 white point, matching sRGB.

use palette::{Hsv, IntoColor, Lab, LinSrgb, Srgb};

/// Upper bound of the 8-bit hue channel (360 degrees / 2).
pub const HUE_MAX: u8 = 180;

/// Convert 8-bit sRGB to 8-bit HSV.
pub fn rgb_to_hsv(rgb: [u8; 3]) -> [u8; 3] {
    let hsv: Hsv = normalized(rgb).into_color();
    let hue = (hsv.hue.into_positive_degrees() / 2.0).round().min(HUE_MAX as f32);
    [hue as u8, to_u8(hsv.saturation * 255.0), to_u8(hsv.value * 255.0)]
}

/// Convert 8-bit HSV back to 8-bit sRGB.
///
/// Hue values above [`HUE_MAX`] wrap around the color wheel.
pub fn hsv_to_rgb(hsv: [u8; 3]) -> [u8; 3] {
    let color = Hsv::new(
        hsv[0] as f32 * 2.0,
        hsv[1] as f32 / 255.0,
        hsv[2] as f32 / 255.0,
    );
    let rgb: Srgb = color.into_color();
    [
        to_u8(rgb.red * 255.0),
        to_u8(rgb.green * 255.0),
        to_u8(rgb.blue * 255.0),
    ]
}

/// Convert 8-bit sRGB to 8-bit Lab (D65).
pub fn rgb_to_lab(rgb: [u8; 3]) -> [u8; 3] {
    let linear: LinSrgb<f32> = normalized(rgb).into_linear();
    let lab: Lab = linear.into_color();
    [
        to_u8(lab.l * 255.0 / 100.0),
        to_u8(lab.a + 128.0),
        to_u8(lab.b + 128.0),
    ]
}

#[inline]
fn normalized(rgb: [u8; 3]) -> Srgb<f32> {
    Srgb::new(rgb[0], rgb[1], rgb[2]).into_format()
}

#[inline]
fn to_u8(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
