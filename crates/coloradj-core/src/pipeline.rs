//! The fixed adjustment pipeline.
//!
//! ## Stage Order
//! 1. Brightness / contrast (LUT)
//! 2. Hue / saturation / intensity shift
//! 3. Channel balance
//! 4. Gamma (LUT)
//! 5. Masked statistics
//!
//! The order is part of the output contract: gamma runs after channel
//! balance, never before. The statistics mask is derived from the untouched
//! source image, while the means are taken over the adjusted image.

use serde::{Deserialize, Serialize};

use crate::balance::{apply_channel_balance, ChannelOffsets};
use crate::buffer::{BufferError, PixelBuffer};
use crate::hsi::{apply_hsi_shift, HsiShift, HsiVariant};
use crate::lut::{apply_lut, ColorLut};
use crate::mask::{bright_mask_with_threshold, DEFAULT_MASK_THRESHOLD};
use crate::params::AdjustmentParameters;
use crate::stats::{masked_mean, ColorStats};

/// Pipeline options that are not user-facing adjustments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineOptions {
    /// HSV channel mapping for the shift stage
    pub hsi_variant: HsiVariant,
    /// Statistics mask threshold
    pub mask_threshold: u8,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            hsi_variant: HsiVariant::Standard,
            mask_threshold: DEFAULT_MASK_THRESHOLD,
        }
    }
}

/// Result of a pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    /// Adjusted image, same geometry as the source
    pub image: PixelBuffer,
    /// Statistics of the adjusted image over the source-derived mask
    pub stats: ColorStats,
}

/// A configured adjustment pipeline.
///
/// Parameters are clamped once at construction. Running the pipeline never
/// mutates the source image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pipeline {
    params: AdjustmentParameters,
    options: PipelineOptions,
}

impl Pipeline {
    /// Create a pipeline with default options.
    pub fn new(params: AdjustmentParameters) -> Self {
        Self::with_options(params, PipelineOptions::default())
    }

    /// Create a pipeline with explicit options.
    pub fn with_options(params: AdjustmentParameters, options: PipelineOptions) -> Self {
        Self {
            params: params.clamped(),
            options,
        }
    }

    /// The clamped parameters this pipeline applies.
    pub fn params(&self) -> &AdjustmentParameters {
        &self.params
    }

    /// The pipeline options.
    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Apply the four transform stages to `image` in place.
    ///
    /// Validation happens before the first stage, so on error `image` is
    /// unchanged.
    pub fn adjust(&self, image: &mut PixelBuffer) -> Result<(), BufferError> {
        image.require_color()?;

        let p = &self.params;
        tracing::debug!(
            width = image.width(),
            height = image.height(),
            channels = image.channels(),
            ?p,
            "adjusting image"
        );

        let contrast_lut = ColorLut::brightness_contrast(p.brightness, p.contrast);
        apply_lut(image, &contrast_lut);
        tracing::trace!(brightness = p.brightness, contrast = p.contrast, "applied brightness/contrast");

        let shift = HsiShift::new(p.hue, p.saturation, p.intensity)
            .with_variant(self.options.hsi_variant);
        apply_hsi_shift(image, &shift)?;
        tracing::trace!(?shift, "applied hsi shift");

        let offsets = ChannelOffsets::new(p.balance_red, p.balance_green, p.balance_blue);
        apply_channel_balance(image, &offsets)?;
        tracing::trace!(?offsets, "applied channel balance");

        apply_lut(image, &ColorLut::gamma(p.gamma));
        tracing::trace!(gamma = p.gamma, "applied gamma");

        Ok(())
    }

    /// Run all stages on a copy of `source` and compute masked statistics.
    pub fn run(&self, source: &PixelBuffer) -> Result<PipelineOutput, BufferError> {
        source.require_color()?;

        let mask = bright_mask_with_threshold(source, self.options.mask_threshold);

        let mut image = source.clone();
        self.adjust(&mut image)?;

        let stats = masked_mean(&image, &mask)?;
        Ok(PipelineOutput { image, stats })
    }
}

/// Run the pipeline with default options.
pub fn run_pipeline(
    source: &PixelBuffer,
    params: &AdjustmentParameters,
) -> Result<PipelineOutput, BufferError> {
    Pipeline::new(*params).run(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::SliderPositions;

    /// 2x1 image: one near-white pixel, one dark gray pixel.
    fn two_pixel_image() -> PixelBuffer {
        PixelBuffer::rgb(2, 1, vec![250, 250, 250, 50, 50, 50]).unwrap()
    }

    // ===== End-to-end scenarios =====

    #[test]
    fn test_neutral_parameters_leave_image_unchanged() {
        let source = two_pixel_image();
        let output = run_pipeline(&source, &AdjustmentParameters::default()).unwrap();

        assert_eq!(output.image, source);
        assert_eq!(output.stats.pixel_count, 1);
        assert_eq!(output.stats.rgb, [50, 50, 50]);
        assert_eq!(output.stats.hsv, [0, 0, 50]);
        assert!((output.stats.lab[0] as i32 - 53).abs() <= 1);
    }

    #[test]
    fn test_max_contrast_pushes_to_extremes() {
        let source = two_pixel_image();
        let mut sliders = SliderPositions::new();
        sliders.contrast = 510;

        let output = run_pipeline(&source, &sliders.to_parameters()).unwrap();
        assert_eq!(output.image.as_raw(), &[255, 255, 255, 0, 0, 0]);
        // Mask comes from the source: still only the second pixel
        assert_eq!(output.stats.pixel_count, 1);
        assert_eq!(output.stats.rgb, [0, 0, 0]);
    }

    #[test]
    fn test_source_not_mutated() {
        let source = two_pixel_image();
        let params = AdjustmentParameters {
            brightness: 100,
            ..Default::default()
        };
        let output = run_pipeline(&source, &params).unwrap();
        assert_eq!(source, two_pixel_image());
        assert_ne!(output.image, source);
    }

    #[test]
    fn test_mask_uses_source_not_adjusted_image() {
        // After +255 brightness every pixel is white, but the mask is taken
        // before adjustment so the dark pixel still counts.
        let source = two_pixel_image();
        let params = AdjustmentParameters {
            brightness: 255,
            ..Default::default()
        };
        let output = run_pipeline(&source, &params).unwrap();
        assert_eq!(output.image.as_raw(), &[255; 6]);
        assert_eq!(output.stats.pixel_count, 1);
        assert_eq!(output.stats.rgb, [255, 255, 255]);
    }

    #[test]
    fn test_all_white_source_gives_zero_stats() {
        let source = PixelBuffer::filled(3, 2, 3, 255).unwrap();
        let params = AdjustmentParameters {
            brightness: -200,
            ..Default::default()
        };
        let output = run_pipeline(&source, &params).unwrap();
        assert_eq!(output.stats, ColorStats::default());
    }

    // ===== Stage order =====

    #[test]
    fn test_balance_runs_before_gamma() {
        // Balance +100 then gamma 2: 100 -> 200 -> 255 * (200/255)^2 = 156.9
        // Gamma first would give 100 -> 39 -> 139.
        let source = PixelBuffer::rgb(1, 1, vec![100, 100, 100]).unwrap();
        let params = AdjustmentParameters {
            balance_red: 100,
            balance_green: 100,
            balance_blue: 100,
            gamma: 2.0,
            ..Default::default()
        };
        let output = run_pipeline(&source, &params).unwrap();
        assert_eq!(output.image.as_raw(), &[157, 157, 157]);
    }

    #[test]
    fn test_brightness_runs_before_hsi() {
        // Brightness +51 then intensity +10: 100 -> 151 -> 161
        let source = PixelBuffer::rgb(1, 1, vec![100, 100, 100]).unwrap();
        let params = AdjustmentParameters {
            brightness: 51,
            intensity: 10,
            ..Default::default()
        };
        let output = run_pipeline(&source, &params).unwrap();
        assert_eq!(output.image.as_raw(), &[161, 161, 161]);
    }

    // ===== Options =====

    #[test]
    fn test_saturation_on_value_variant() {
        let source = PixelBuffer::rgb(1, 1, vec![100, 100, 100]).unwrap();
        let params = AdjustmentParameters {
            saturation: 20,
            intensity: -90,
            ..Default::default()
        };

        let standard = Pipeline::new(params).run(&source).unwrap();
        // Gray has no hue: saturation 20 at value 10
        assert_eq!(standard.image.pixel(0, 0).unwrap()[0], 10);

        let options = PipelineOptions {
            hsi_variant: HsiVariant::SaturationOnValue,
            ..Default::default()
        };
        let legacy = Pipeline::with_options(params, options).run(&source).unwrap();
        // Value gets +20 instead of -90
        let px = legacy.image.pixel(0, 0).unwrap();
        assert_eq!(px.iter().max(), Some(&120));
    }

    #[test]
    fn test_custom_mask_threshold() {
        let source = two_pixel_image();
        let options = PipelineOptions {
            mask_threshold: 255,
            ..Default::default()
        };
        let output = Pipeline::with_options(AdjustmentParameters::default(), options)
            .run(&source)
            .unwrap();
        assert_eq!(output.stats.pixel_count, 2);
        assert_eq!(output.stats.rgb, [150, 150, 150]);
    }

    #[test]
    fn test_parameters_clamped_at_construction() {
        let params = AdjustmentParameters {
            contrast: 9000,
            gamma: 0.0,
            ..Default::default()
        };
        let pipeline = Pipeline::new(params);
        assert_eq!(pipeline.params().contrast, 255);
        assert!((pipeline.params().gamma - 0.1).abs() < 1e-6);
        assert_eq!(pipeline.options(), &PipelineOptions::default());
    }

    // ===== Errors =====

    #[test]
    fn test_grayscale_source_rejected_before_mutation() {
        let mut img = PixelBuffer::filled(2, 2, 1, 40).unwrap();
        let pipeline = Pipeline::new(AdjustmentParameters {
            brightness: 100,
            ..Default::default()
        });
        assert_eq!(pipeline.adjust(&mut img), Err(BufferError::NotColor(1)));
        assert_eq!(img.into_raw(), vec![40; 4]);
    }

    #[test]
    fn test_rgba_alpha_carried_through() {
        let source =
            PixelBuffer::packed(2, 1, 4, vec![100, 100, 100, 255, 255, 255, 255, 0]).unwrap();
        let params = AdjustmentParameters {
            brightness: -100,
            gamma: 2.0,
            ..Default::default()
        };
        let output = run_pipeline(&source, &params).unwrap();
        let raw = output.image.as_raw();
        assert_eq!(&raw[..4], &[0, 0, 0, 255]);
        assert_eq!(raw[7], 0);
        // Transparent white is not selected
        assert_eq!(output.stats.pixel_count, 1);
        assert_eq!(output.stats.rgb, [0, 0, 0]);
    }

    #[test]
    fn test_padded_source_keeps_padding() {
        let data = vec![50, 50, 50, 0xAB, 60, 60, 60, 0xAB];
        let source = PixelBuffer::new(1, 2, 3, 4, data).unwrap();
        let params = AdjustmentParameters {
            brightness: 255,
            ..Default::default()
        };
        let output = run_pipeline(&source, &params).unwrap();
        assert_eq!(output.image.as_raw(), &[255, 255, 255, 0xAB, 255, 255, 255, 0xAB]);
        assert_eq!(output.image.stride(), 4);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for small image dimensions.
    fn dimensions_strategy() -> impl Strategy<Value = (u32, u32)> {
        (1u32..=6, 1u32..=6)
    }

    /// Strategy for raw parameters, including out-of-range values.
    fn params_strategy() -> impl Strategy<Value = AdjustmentParameters> {
        (
            (-400i32..=400, -400i32..=400, -300i32..=300),
            (-400i32..=400, -400i32..=400),
            (-400i32..=400, -400i32..=400, -400i32..=400),
            0.0f32..=8.0,
        )
            .prop_map(|((brightness, contrast, hue), (saturation, intensity), (r, g, b), gamma)| {
                AdjustmentParameters {
                    brightness,
                    contrast,
                    hue,
                    saturation,
                    intensity,
                    balance_red: r,
                    balance_green: g,
                    balance_blue: b,
                    gamma,
                }
            })
    }

    /// Create a test image with position-dependent pixel values.
    fn create_test_image(width: u32, height: u32) -> PixelBuffer {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                let v = ((y * width + x) * 37 % 256) as u8;
                pixels.push(v);
                pixels.push(v.wrapping_mul(3));
                pixels.push(255 - v);
            }
        }
        PixelBuffer::rgb(width, height, pixels).unwrap()
    }

    proptest! {
        /// Property: Geometry is preserved for any parameters.
        #[test]
        fn prop_geometry_preserved(
            (width, height) in dimensions_strategy(),
            params in params_strategy(),
        ) {
            let source = create_test_image(width, height);
            let output = run_pipeline(&source, &params).unwrap();
            prop_assert_eq!(output.image.width(), width);
            prop_assert_eq!(output.image.height(), height);
            prop_assert_eq!(output.image.channels(), 3);
            prop_assert_eq!(output.image.as_raw().len(), source.as_raw().len());
        }

        /// Property: Statistics count matches the source-derived mask.
        #[test]
        fn prop_stats_count_matches_mask(
            (width, height) in dimensions_strategy(),
            params in params_strategy(),
        ) {
            let source = create_test_image(width, height);
            let expected = crate::mask::bright_mask(&source).selected_count() as u64;
            let output = run_pipeline(&source, &params).unwrap();
            prop_assert_eq!(output.stats.pixel_count, expected);
        }

        /// Property: Pipeline runs are deterministic.
        #[test]
        fn prop_deterministic(
            (width, height) in dimensions_strategy(),
            params in params_strategy(),
        ) {
            let source = create_test_image(width, height);
            let a = run_pipeline(&source, &params).unwrap();
            let b = run_pipeline(&source, &params).unwrap();
            prop_assert_eq!(a, b);
        }
    }
}
