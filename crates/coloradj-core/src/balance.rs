//! Per-channel color balance with saturating arithmetic.

use serde::{Deserialize, Serialize};

use crate::buffer::{BufferError, PixelBuffer};
use crate::params::{clamp_to, BALANCE_RANGE};

/// Additive offsets for the red, green and blue channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChannelOffsets {
    /// Red offset (-255 to 255)
    pub red: i32,
    /// Green offset (-255 to 255)
    pub green: i32,
    /// Blue offset (-255 to 255)
    pub blue: i32,
}

impl ChannelOffsets {
    /// Create offsets clamped to -255..=255.
    pub fn new(red: i32, green: i32, blue: i32) -> Self {
        Self {
            red: clamp_to(red, BALANCE_RANGE),
            green: clamp_to(green, BALANCE_RANGE),
            blue: clamp_to(blue, BALANCE_RANGE),
        }
    }

    /// Check if all offsets are zero.
    pub fn is_zero(&self) -> bool {
        self.red == 0 && self.green == 0 && self.blue == 0
    }

    /// Offsets in red, green, blue order.
    #[inline]
    pub fn as_array(&self) -> [i32; 3] {
        [self.red, self.green, self.blue]
    }
}

/// Add `offset` to `value`, saturating at 0 and 255.
#[inline]
pub fn saturating_offset(value: u8, offset: i32) -> u8 {
    (value as i32 + offset).clamp(0, 255) as u8
}

/// Apply per-channel offsets in place.
///
/// Offsets are matched to channels through the buffer's
/// [`ChannelOrder`](crate::buffer::ChannelOrder); channels past the third are
/// left untouched.
pub fn apply_channel_balance(
    image: &mut PixelBuffer,
    offsets: &ChannelOffsets,
) -> Result<(), BufferError> {
    image.require_color()?;

    let offsets = ChannelOffsets::new(offsets.red, offsets.green, offsets.blue);
    // Early exit if no adjustments
    if offsets.is_zero() {
        return Ok(());
    }

    let indices = image.order().rgb_indices();
    let deltas = offsets.as_array();
    image.for_each_pixel_mut(|px| {
        for (&idx, &delta) in indices.iter().zip(deltas.iter()) {
            px[idx] = saturating_offset(px[idx], delta);
        }
    });
    Ok(())
}


// ============================================================================
// Property-Based Tests
// ============================================================================
