//! Masked mean color statistics.
//!
//! Means are taken over exactly the pixels a [`SelectionMask`] selects, per
//! channel, in three views of the same pixels: sRGB, 8-bit Lab and 8-bit HSV
//! (see [`crate::colorspace`] for the encodings). Each mean is rounded to the
//! nearest integer. An empty selection yields zeros everywhere.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::buffer::{BufferError, PixelBuffer};
use crate::colorspace::{rgb_to_hsv, rgb_to_lab};
use crate::mask::SelectionMask;

/// Mean color of the selected pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ColorStats {
    /// Mean red, green, blue
    pub rgb: [u8; 3],
    /// Mean L, a, b (8-bit encoding)
    pub lab: [u8; 3],
    /// Mean hue, saturation, value (8-bit encoding)
    pub hsv: [u8; 3],
    /// Number of pixels that contributed
    pub pixel_count: u64,
}

impl ColorStats {
    /// Check if no pixel contributed.
    pub fn is_empty(&self) -> bool {
        self.pixel_count == 0
    }
}

impl fmt::Display for ColorStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.rgb;
        let [l, la, lb] = self.lab;
        let [h, s, v] = self.hsv;
        write!(
            f,
            "RGB({r}, {g}, {b}) Lab({l}, {la}, {lb}) HSV({h}, {s}, {v})"
        )
    }
}

/// Running per-channel sums for one color view.
#[derive(Debug, Default, Clone, Copy)]
struct ChannelSums([u64; 3]);

impl ChannelSums {
    #[inline]
    fn add(&mut self, values: [u8; 3]) {
        for (sum, v) in self.0.iter_mut().zip(values) {
            *sum += v as u64;
        }
    }

    fn mean(&self, count: u64) -> [u8; 3] {
        if count == 0 {
            return [0; 3];
        }
        self.0.map(|sum| (sum as f64 / count as f64).round() as u8)
    }
}

/// Compute mean RGB, Lab and HSV over the pixels selected by `mask`.
///
/// Fails if the image has fewer than three channels or if the mask's
/// dimensions differ from the image's.
pub fn masked_mean(image: &PixelBuffer, mask: &SelectionMask) -> Result<ColorStats, BufferError> {
    image.require_color()?;
    mask.check_matches(image)?;

    let order = image.order();
    let mut rgb_sums = ChannelSums::default();
    let mut lab_sums = ChannelSums::default();
    let mut hsv_sums = ChannelSums::default();
    let mut count = 0u64;

    for (px, &selected) in image.pixels().zip(mask.flags()) {
        if !selected {
            continue;
        }
        let rgb = order.read_rgb(px);
        rgb_sums.add(rgb);
        lab_sums.add(rgb_to_lab(rgb));
        hsv_sums.add(rgb_to_hsv(rgb));
        count += 1;
    }

    let stats = ColorStats {
        rgb: rgb_sums.mean(count),
        lab: lab_sums.mean(count),
        hsv: hsv_sums.mean(count),
        pixel_count: count,
    };
    tracing::debug!(pixels = count, %stats, "computed masked color statistics");
    Ok(stats)
}
