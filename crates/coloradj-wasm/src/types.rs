//! WASM-compatible wrapper types for image data.
//!
//! This module provides JavaScript-friendly types that wrap the core pixel
//! buffer, handling the conversion between Rust and JavaScript data
//! representations.

use coloradj_core::{BufferError, ChannelOrder, PixelBuffer};
use wasm_bindgen::prelude::*;

/// A pixel buffer wrapper for JavaScript.
///
/// Geometry is stored as given and validated when the buffer is handed to a
/// core operation, so invalid buffers surface as errors from those calls.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy is made
/// to JavaScript memory as a `Uint8Array`.
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsPixelBuffer {
    width: u32,
    height: u32,
    channels: usize,
    stride: usize,
    bgr: bool,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsPixelBuffer {
    /// Create a tightly packed RGB buffer.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsPixelBuffer {
        JsPixelBuffer {
            width,
            height,
            channels: 3,
            stride: (width as usize).saturating_mul(3),
            bgr: false,
            pixels,
        }
    }

    /// Create a buffer with explicit channel count and row stride.
    ///
    /// Four-channel data from a canvas `ImageData` uses `channels = 4` and
    /// `stride = width * 4`.
    pub fn with_layout(
        width: u32,
        height: u32,
        channels: usize,
        stride: usize,
        bgr: bool,
        pixels: Vec<u8>,
    ) -> JsPixelBuffer {
        JsPixelBuffer {
            width,
            height,
            channels,
            stride,
            bgr,
            pixels,
        }
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the number of interleaved channels
    #[wasm_bindgen(getter)]
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Get the row stride in bytes
    #[wasm_bindgen(getter)]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Whether the color channels are stored blue-first
    #[wasm_bindgen(getter)]
    pub fn bgr(&self) -> bool {
        self.bgr
    }

    /// Get the number of bytes in the pixel buffer
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns pixel data as Uint8Array.
    ///
    /// Note: This creates a copy of the pixel data.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Explicitly free WASM memory.
    ///
    /// This is optional - wasm-bindgen's finalizer will handle cleanup automatically.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsPixelBuffer {
    /// Wrap a core buffer.
    pub(crate) fn from_buffer(buffer: PixelBuffer) -> Self {
        Self {
            width: buffer.width(),
            height: buffer.height(),
            channels: buffer.channels(),
            stride: buffer.stride(),
            bgr: buffer.order() == ChannelOrder::Bgr,
            pixels: buffer.into_raw(),
        }
    }

    /// Validate and convert to a core buffer.
    ///
    /// Note: This clones the pixel data.
    pub(crate) fn to_buffer(&self) -> Result<PixelBuffer, BufferError> {
        let order = if self.bgr {
            ChannelOrder::Bgr
        } else {
            ChannelOrder::Rgb
        };
        PixelBuffer::new(
            self.width,
            self.height,
            self.channels,
            self.stride,
            self.pixels.clone(),
        )
        .map(|buffer| buffer.with_order(order))
    }
}

/// Convert a core error to a JavaScript error value.
pub(crate) fn to_js_error(err: BufferError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
