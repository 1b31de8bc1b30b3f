//! Coloradj Core - Color adjustment engine
//!
//! This crate applies a fixed chain of 8-bit color transforms to a decoded
//! image and reports mean color statistics over a selection mask:
//!
//! 1. Brightness / contrast lookup table
//! 2. Hue / saturation / intensity shift in HSV
//! 3. Per-channel color balance
//! 4. Gamma lookup table
//! 5. Mean RGB, Lab and HSV over the pixels selected by the bright mask
//!
//! Every stage is a synchronous, deterministic function over a
//! [`PixelBuffer`]. Parameters are passed explicitly on each call and
//! clamped silently to their valid ranges.
//!
//! # Example
//!
//! ```ignore
//! use coloradj_core::{run_pipeline, AdjustmentParameters, PixelBuffer};
//!
//! let source = PixelBuffer::rgb(2, 1, vec![250, 250, 250, 50, 50, 50])?;
//! let mut params = AdjustmentParameters::default();
//! params.contrast = 40;
//!
//! let output = run_pipeline(&source, &params)?;
//! println!("{}", output.stats);
//! ```

pub mod balance;
pub mod buffer;
pub mod colorspace;
pub mod hsi;
pub mod lut;
pub mod mask;
pub mod params;
pub mod pipeline;
pub mod stats;

pub use balance::{apply_channel_balance, ChannelOffsets};
pub use buffer::{BufferError, ChannelOrder, PixelBuffer};
pub use hsi::{apply_hsi_shift, HsiShift, HsiVariant};
pub use lut::{apply_brightness_contrast, apply_gamma, apply_lut, ColorLut};
pub use mask::{bright_mask, bright_mask_with_threshold, SelectionMask, DEFAULT_MASK_THRESHOLD};
pub use params::{AdjustmentParameters, SliderPositions};
pub use pipeline::{run_pipeline, Pipeline, PipelineOptions, PipelineOutput};
pub use stats::{masked_mean, ColorStats};
