//! Pixel selection masks for statistics.
//!
//! The "bright" mask keeps its historical name but selects a pixel when **at
//! least one** channel is below the threshold. A pixel is excluded only when
//! every channel is at or above it, so near-white pixels drop out and
//! everything else is selected.

use crate::buffer::{BufferError, PixelBuffer};

/// Default selection threshold.
pub const DEFAULT_MASK_THRESHOLD: u8 = 200;

/// One selection flag per pixel, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionMask {
    width: u32,
    height: u32,
    selected: Vec<bool>,
}

impl SelectionMask {
    /// Create a mask from per-pixel flags in row-major order.
    pub fn from_flags(width: u32, height: u32, selected: Vec<bool>) -> Result<Self, BufferError> {
        if width == 0 || height == 0 {
            return Err(BufferError::InvalidDimensions { width, height });
        }
        let expected = width as usize * height as usize;
        if selected.len() != expected {
            return Err(BufferError::InvalidPixelData {
                expected,
                actual: selected.len(),
            });
        }
        Ok(Self {
            width,
            height,
            selected,
        })
    }

    /// Mask width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Mask height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether the pixel at `(x, y)` is selected. Out-of-bounds is unselected.
    pub fn is_selected(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let index = y as usize * self.width as usize + x as usize;
        self.selected.get(index).copied().unwrap_or(false)
    }

    /// Per-pixel flags in row-major order.
    pub fn flags(&self) -> &[bool] {
        &self.selected
    }

    /// Number of selected pixels.
    pub fn selected_count(&self) -> usize {
        self.selected.iter().filter(|&&s| s).count()
    }

    /// Whether no pixel is selected.
    pub fn is_empty(&self) -> bool {
        !self.selected.iter().any(|&s| s)
    }

    /// Fail with [`BufferError::MaskMismatch`] unless dimensions match `image`.
    pub fn check_matches(&self, image: &PixelBuffer) -> Result<(), BufferError> {
        if self.width != image.width() || self.height != image.height() {
            return Err(BufferError::MaskMismatch {
                mask_width: self.width,
                mask_height: self.height,
                width: image.width(),
                height: image.height(),
            });
        }
        Ok(())
    }

    /// Expand to one byte per pixel: 255 for selected, 0 otherwise.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.selected
            .iter()
            .map(|&s| if s { u8::MAX } else { 0 })
            .collect()
    }
}

/// Compute the bright mask with the default threshold of 200.
pub fn bright_mask(image: &PixelBuffer) -> SelectionMask {
    bright_mask_with_threshold(image, DEFAULT_MASK_THRESHOLD)
}

/// Compute the bright mask: selected iff any channel is below `threshold`.
///
/// Only color channels are examined; a fourth (alpha) channel is ignored.
pub fn bright_mask_with_threshold(image: &PixelBuffer, threshold: u8) -> SelectionMask {
    let color_channels = image.channels().min(3);
    let selected: Vec<bool> = image
        .pixels()
        .map(|px| px[..color_channels].iter().any(|&v| v < threshold))
        .collect();

    tracing::trace!(
        threshold,
        selected = selected.iter().filter(|&&s| s).count(),
        total = selected.len(),
        "computed bright mask"
    );

    SelectionMask {
        width: image.width(),
        height: image.height(),
        selected,
    }
}
