//! Stride-aware pixel buffers.
//!
//! A [`PixelBuffer`] owns interleaved 8-bit pixel data laid out row-major with
//! an explicit row stride. Rows may carry trailing padding; every accessor in
//! this module exposes only the `width * channels` payload bytes of a row, so
//! padding is never read or written by the transforms built on top of it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest supported number of interleaved channels (RGBA / BGRA).
pub const MAX_CHANNELS: usize = 4;

/// Error types for buffer validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    /// Width or height is zero.
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// Channel count outside 1..=4.
    #[error("Unsupported channel count: {0} (expected 1 to 4)")]
    UnsupportedChannels(usize),

    /// Row stride cannot hold a full row of pixels.
    #[error("Row stride {stride} is smaller than width * channels ({row_bytes})")]
    StrideTooSmall { stride: usize, row_bytes: usize },

    /// Pixel data is shorter than the geometry requires.
    #[error("Invalid pixel data: expected at least {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// A color operation was requested on a buffer with fewer than three channels.
    #[error("Color operation requires at least 3 channels, buffer has {0}")]
    NotColor(usize),

    /// Mask and image geometry disagree.
    #[error(
        "Mask dimensions {mask_width}x{mask_height} do not match image dimensions {width}x{height}"
    )]
    MaskMismatch {
        mask_width: u32,
        mask_height: u32,
        width: u32,
        height: u32,
    },
}

/// Which interleaved channel holds red, green and blue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChannelOrder {
    /// Red, green, blue (optionally followed by alpha).
    #[default]
    Rgb,
    /// Blue, green, red (optionally followed by alpha).
    Bgr,
}

impl ChannelOrder {
    /// Channel indices of red, green and blue within a pixel.
    #[inline]
    pub fn rgb_indices(self) -> [usize; 3] {
        match self {
            ChannelOrder::Rgb => [0, 1, 2],
            ChannelOrder::Bgr => [2, 1, 0],
        }
    }

    /// Read a pixel's color channels in red, green, blue order.
    #[inline]
    pub fn read_rgb(self, pixel: &[u8]) -> [u8; 3] {
        let [r, g, b] = self.rgb_indices();
        [pixel[r], pixel[g], pixel[b]]
    }

    /// Write red, green, blue values into a pixel's color channels.
    #[inline]
    pub fn write_rgb(self, pixel: &mut [u8], rgb: [u8; 3]) {
        let [r, g, b] = self.rgb_indices();
        pixel[r] = rgb[0];
        pixel[g] = rgb[1];
        pixel[b] = rgb[2];
    }
}

/// An interleaved 8-bit image with explicit row stride.
///
/// Geometry (width, height, channels, stride, channel order) is fixed at
/// construction; only channel values can change afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    channels: usize,
    stride: usize,
    order: ChannelOrder,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a buffer from raw bytes with an explicit row stride.
    ///
    /// The last row only needs `width * channels` bytes; earlier rows need
    /// the full `stride`.
    pub fn new(
        width: u32,
        height: u32,
        channels: usize,
        stride: usize,
        data: Vec<u8>,
    ) -> Result<Self, BufferError> {
        if width == 0 || height == 0 {
            return Err(BufferError::InvalidDimensions { width, height });
        }
        if channels == 0 || channels > MAX_CHANNELS {
            return Err(BufferError::UnsupportedChannels(channels));
        }

        let row_bytes = (width as usize)
            .checked_mul(channels)
            .ok_or(BufferError::InvalidPixelData {
                expected: usize::MAX,
                actual: data.len(),
            })?;
        if stride < row_bytes {
            return Err(BufferError::StrideTooSmall { stride, row_bytes });
        }

        // Geometry that does not fit in usize can never be backed by `data`.
        let expected = stride
            .checked_mul(height as usize - 1)
            .and_then(|n| n.checked_add(row_bytes))
            .ok_or(BufferError::InvalidPixelData {
                expected: usize::MAX,
                actual: data.len(),
            })?;
        if data.len() < expected {
            return Err(BufferError::InvalidPixelData {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            channels,
            stride,
            order: ChannelOrder::Rgb,
            data,
        })
    }

    /// Create a tightly packed buffer (stride equals `width * channels`).
    pub fn packed(
        width: u32,
        height: u32,
        channels: usize,
        data: Vec<u8>,
    ) -> Result<Self, BufferError> {
        let stride = (width as usize).saturating_mul(channels);
        Self::new(width, height, channels, stride, data)
    }

    /// Create a tightly packed RGB buffer.
    pub fn rgb(width: u32, height: u32, data: Vec<u8>) -> Result<Self, BufferError> {
        Self::packed(width, height, 3, data)
    }

    /// Create a packed buffer with every byte set to `value`.
    pub fn filled(
        width: u32,
        height: u32,
        channels: usize,
        value: u8,
    ) -> Result<Self, BufferError> {
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(channels))
            .ok_or(BufferError::InvalidPixelData {
                expected: usize::MAX,
                actual: 0,
            })?;
        Self::packed(width, height, channels, vec![value; len])
    }

    /// Create a buffer from an `image::RgbImage`.
    pub fn from_rgb_image(img: image::RgbImage) -> Result<Self, BufferError> {
        let (width, height) = img.dimensions();
        Self::rgb(width, height, img.into_raw())
    }

    /// Convert to a packed `image::RgbImage` in red, green, blue order.
    ///
    /// Returns `None` for buffers with fewer than three channels. Channels
    /// past the third are dropped.
    pub fn to_rgb_image(&self) -> Option<image::RgbImage> {
        if self.channels < 3 {
            return None;
        }
        let mut raw = Vec::with_capacity(self.pixel_count() * 3);
        for px in self.pixels() {
            raw.extend_from_slice(&self.order.read_rgb(px));
        }
        image::RgbImage::from_raw(self.width, self.height, raw)
    }

    /// Return the same buffer tagged with a different channel order.
    pub fn with_order(mut self, order: ChannelOrder) -> Self {
        self.order = order;
        self
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Interleaved channels per pixel.
    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Bytes between the starts of consecutive rows.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Channel order of the color channels.
    #[inline]
    pub fn order(&self) -> ChannelOrder {
        self.order
    }

    /// Payload bytes in one row (excluding padding).
    #[inline]
    pub fn row_bytes(&self) -> usize {
        self.width as usize * self.channels
    }

    /// Total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Raw backing bytes, including any row padding.
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Consume the buffer and return its backing bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Check that `other` has the same width, height and channel count.
    pub fn same_geometry(&self, other: &PixelBuffer) -> bool {
        self.width == other.width && self.height == other.height && self.channels == other.channels
    }

    /// Fail with [`BufferError::NotColor`] unless the buffer has three or more channels.
    pub fn require_color(&self) -> Result<(), BufferError> {
        if self.channels < 3 {
            return Err(BufferError::NotColor(self.channels));
        }
        Ok(())
    }

    /// Payload of row `y`, or `None` if out of bounds.
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let start = y as usize * self.stride;
        self.data.get(start..start + self.row_bytes())
    }

    /// Mutable payload of row `y`, or `None` if out of bounds.
    pub fn row_mut(&mut self, y: u32) -> Option<&mut [u8]> {
        if y >= self.height {
            return None;
        }
        let start = y as usize * self.stride;
        let end = start + self.row_bytes();
        self.data.get_mut(start..end)
    }

    /// Channels of the pixel at `(x, y)`, or `None` if out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width {
            return None;
        }
        let channels = self.channels;
        let start = x as usize * channels;
        self.row(y).map(|row| &row[start..start + channels])
    }

    /// Mutable channels of the pixel at `(x, y)`, or `None` if out of bounds.
    pub fn pixel_mut(&mut self, x: u32, y: u32) -> Option<&mut [u8]> {
        if x >= self.width {
            return None;
        }
        let channels = self.channels;
        let start = x as usize * channels;
        self.row_mut(y).map(|row| &mut row[start..start + channels])
    }

    /// Value of channel `c` of the pixel at `(x, y)`.
    pub fn get(&self, x: u32, y: u32, c: usize) -> Option<u8> {
        self.pixel(x, y).and_then(|px| px.get(c).copied())
    }

    /// Iterate over row payloads from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        let row_bytes = self.row_bytes();
        self.data
            .chunks(self.stride)
            .take(self.height as usize)
            .map(move |row| &row[..row_bytes])
    }

    /// Iterate mutably over row payloads from top to bottom.
    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut [u8]> + '_ {
        let row_bytes = self.row_bytes();
        self.data
            .chunks_mut(self.stride)
            .take(self.height as usize)
            .map(move |row| &mut row[..row_bytes])
    }

    /// Iterate over pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = &[u8]> + '_ {
        let channels = self.channels;
        self.rows().flat_map(move |row| row.chunks_exact(channels))
    }

    /// Apply `f` to every pixel in row-major order.
    pub fn for_each_pixel_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut [u8]),
    {
        let channels = self.channels;
        for row in self.rows_mut() {
            for px in row.chunks_exact_mut(channels) {
                f(px);
            }
        }
    }

    /// Apply `f` to every channel value of every pixel, padding excluded.
    pub fn for_each_value_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut u8),
    {
        for row in self.rows_mut() {
            row.iter_mut().for_each(&mut f);
        }
    }

    /// Apply `f` to every color value, leaving alpha and padding untouched.
    ///
    /// Buffers with fewer than three channels have no alpha, so every value
    /// is visited.
    pub fn for_each_color_value_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut u8),
    {
        if self.channels < 3 {
            self.for_each_value_mut(f);
            return;
        }
        self.for_each_pixel_mut(|px| px[..3].iter_mut().for_each(&mut f));
    }
}
