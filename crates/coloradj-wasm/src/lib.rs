//! Coloradj WASM - WebAssembly bindings for the color adjustment engine
//!
//! This crate exposes the coloradj-core pipeline to JavaScript/TypeScript so
//! a browser UI can re-run it on every slider change.
//!
//! # Module Structure
//!
//! - `params` - Adjustment parameters and slider decoding
//! - `pipeline` - Full pipeline, individual stages, mask and statistics
//! - `types` - WASM-compatible wrapper types for image data
//!
//! # Usage
//!
//! ```typescript
//! import init, { AdjustmentParameters, JsPixelBuffer, run_pipeline } from '@coloradj/wasm';
//!
//! await init();
//!
//! const image = JsPixelBuffer.with_layout(w, h, 4, w * 4, false, imageData.data);
//! const params = AdjustmentParameters.from_sliders(...sliderValues);
//! const result = run_pipeline(image, params);
//! overlay.textContent = result.stats.summary();
//! ```

use wasm_bindgen::prelude::*;

mod params;
mod pipeline;
mod types;

// Re-export public types
pub use params::AdjustmentParameters;
pub use pipeline::{
    apply_brightness_contrast, apply_color_balance, apply_gamma, apply_hsi_shift,
    compute_bright_mask, compute_color_stats, run_pipeline, run_pipeline_with_options,
    JsColorStats, JsPipelineResult,
};
pub use types::JsPixelBuffer;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "coloradj wasm initialized");
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }

    #[test]
    fn test_init_is_idempotent() {
        init();
        init();
    }
}
