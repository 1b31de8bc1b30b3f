//! Pipeline and statistics WASM bindings.
//!
//! This module exposes the full adjustment pipeline, the individual stages
//! and the masked color statistics to JavaScript.

use crate::params::AdjustmentParameters;
use crate::types::{to_js_error, JsPixelBuffer};
use coloradj_core::{
    apply_brightness_contrast as core_brightness_contrast, apply_channel_balance,
    apply_gamma as core_gamma, apply_hsi_shift as core_hsi_shift, bright_mask_with_threshold,
    masked_mean, ChannelOffsets, ColorStats, HsiShift, HsiVariant, Pipeline, PipelineOptions,
    DEFAULT_MASK_THRESHOLD,
};
use wasm_bindgen::prelude::*;

/// Mean color statistics accessible from JavaScript.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy)]
pub struct JsColorStats {
    inner: ColorStats,
}

#[wasm_bindgen]
impl JsColorStats {
    /// Mean red, green, blue.
    pub fn rgb(&self) -> Vec<u8> {
        self.inner.rgb.to_vec()
    }

    /// Mean L, a, b (L scaled to 0-255, a and b offset by 128).
    pub fn lab(&self) -> Vec<u8> {
        self.inner.lab.to_vec()
    }

    /// Mean hue (0-180), saturation, value.
    pub fn hsv(&self) -> Vec<u8> {
        self.inner.hsv.to_vec()
    }

    /// Number of pixels that contributed.
    #[wasm_bindgen(getter)]
    pub fn pixel_count(&self) -> u32 {
        self.inner.pixel_count.min(u32::MAX as u64) as u32
    }

    /// One-line text summary for overlays.
    pub fn summary(&self) -> String {
        self.inner.to_string()
    }

    /// Serialize to a plain JavaScript object.
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

/// Adjusted image plus statistics.
#[wasm_bindgen]
pub struct JsPipelineResult {
    image: JsPixelBuffer,
    stats: JsColorStats,
}

#[wasm_bindgen]
impl JsPipelineResult {
    /// The adjusted image.
    #[wasm_bindgen(getter)]
    pub fn image(&self) -> JsPixelBuffer {
        self.image.clone()
    }

    /// Statistics of the adjusted image over the source-derived mask.
    #[wasm_bindgen(getter)]
    pub fn stats(&self) -> JsColorStats {
        self.stats
    }
}

/// Convert a u8 variant value to the core HsiVariant enum.
///
/// Values:
/// - 0 = Standard (intensity shifts the value channel)
/// - 1 = SaturationOnValue (saturation shifts both saturation and value)
///
/// Any other value defaults to Standard.
pub(crate) fn variant_from_u8(value: u8) -> HsiVariant {
    match value {
        1 => HsiVariant::SaturationOnValue,
        _ => HsiVariant::Standard,
    }
}

/// Run the full pipeline on an image.
///
/// # Arguments
/// * `image` - The source image (not modified)
/// * `params` - Adjustment parameters
///
/// # Example (TypeScript)
/// ```typescript
/// const params = AdjustmentParameters.from_sliders(255, 300, 180, 255, 255, 255, 255, 255, 10);
/// const result = run_pipeline(sourceImage, params);
/// overlay.textContent = result.stats.summary();
/// const pixels = result.image.pixels();
/// ```
#[wasm_bindgen]
pub fn run_pipeline(
    image: &JsPixelBuffer,
    params: &AdjustmentParameters,
) -> Result<JsPipelineResult, JsValue> {
    run_pipeline_with_options(image, params, 0, DEFAULT_MASK_THRESHOLD)
}

/// Run the full pipeline with an explicit HSI variant and mask threshold.
#[wasm_bindgen]
pub fn run_pipeline_with_options(
    image: &JsPixelBuffer,
    params: &AdjustmentParameters,
    hsi_variant: u8,
    mask_threshold: u8,
) -> Result<JsPipelineResult, JsValue> {
    let source = image.to_buffer().map_err(to_js_error)?;
    let options = PipelineOptions {
        hsi_variant: variant_from_u8(hsi_variant),
        mask_threshold,
    };
    let output = Pipeline::with_options(*params.inner(), options)
        .run(&source)
        .map_err(to_js_error)?;

    Ok(JsPipelineResult {
        image: JsPixelBuffer::from_buffer(output.image),
        stats: JsColorStats {
            inner: output.stats,
        },
    })
}

/// Apply only the brightness/contrast stage.
#[wasm_bindgen]
pub fn apply_brightness_contrast(
    image: &JsPixelBuffer,
    brightness: i32,
    contrast: i32,
) -> Result<JsPixelBuffer, JsValue> {
    let mut buffer = image.to_buffer().map_err(to_js_error)?;
    core_brightness_contrast(&mut buffer, brightness, contrast);
    Ok(JsPixelBuffer::from_buffer(buffer))
}

/// Apply only the hue/saturation/intensity stage.
#[wasm_bindgen]
pub fn apply_hsi_shift(
    image: &JsPixelBuffer,
    hue: i32,
    saturation: i32,
    intensity: i32,
    hsi_variant: u8,
) -> Result<JsPixelBuffer, JsValue> {
    let mut buffer = image.to_buffer().map_err(to_js_error)?;
    let shift = HsiShift::new(hue, saturation, intensity).with_variant(variant_from_u8(hsi_variant));
    core_hsi_shift(&mut buffer, &shift).map_err(to_js_error)?;
    Ok(JsPixelBuffer::from_buffer(buffer))
}

/// Apply only the color balance stage.
#[wasm_bindgen]
pub fn apply_color_balance(
    image: &JsPixelBuffer,
    red: i32,
    green: i32,
    blue: i32,
) -> Result<JsPixelBuffer, JsValue> {
    let mut buffer = image.to_buffer().map_err(to_js_error)?;
    apply_channel_balance(&mut buffer, &ChannelOffsets::new(red, green, blue))
        .map_err(to_js_error)?;
    Ok(JsPixelBuffer::from_buffer(buffer))
}

/// Apply only the gamma stage.
#[wasm_bindgen]
pub fn apply_gamma(image: &JsPixelBuffer, gamma: f32) -> Result<JsPixelBuffer, JsValue> {
    let mut buffer = image.to_buffer().map_err(to_js_error)?;
    core_gamma(&mut buffer, gamma);
    Ok(JsPixelBuffer::from_buffer(buffer))
}

/// Compute the bright mask as one byte per pixel (255 = selected).
#[wasm_bindgen]
pub fn compute_bright_mask(image: &JsPixelBuffer, threshold: u8) -> Result<Vec<u8>, JsValue> {
    let buffer = image.to_buffer().map_err(to_js_error)?;
    Ok(bright_mask_with_threshold(&buffer, threshold).to_bytes())
}

/// Compute statistics of `image` over the bright mask of `mask_source`.
///
/// Pass the same image twice to measure an image against its own mask.
#[wasm_bindgen]
pub fn compute_color_stats(
    image: &JsPixelBuffer,
    mask_source: &JsPixelBuffer,
    threshold: u8,
) -> Result<JsColorStats, JsValue> {
    let buffer = image.to_buffer().map_err(to_js_error)?;
    let source = mask_source.to_buffer().map_err(to_js_error)?;
    let mask = bright_mask_with_threshold(&source, threshold);
    let inner = masked_mean(&buffer, &mask).map_err(to_js_error)?;
    Ok(JsColorStats { inner })
}
