//! Adjustment parameter WASM bindings.
//!
//! This module provides JavaScript bindings for the AdjustmentParameters type,
//! allowing slider values to be manipulated from TypeScript.

use coloradj_core::SliderPositions;
use wasm_bindgen::prelude::*;

/// Adjustment parameters wrapper for JavaScript
#[wasm_bindgen]
#[derive(Debug, Clone, Copy)]
pub struct AdjustmentParameters {
    inner: coloradj_core::AdjustmentParameters,
}

#[wasm_bindgen]
impl AdjustmentParameters {
    /// Create new parameters with neutral values
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: coloradj_core::AdjustmentParameters::new(),
        }
    }

    /// Create parameters from offset-encoded slider positions.
    ///
    /// Brightness, contrast, saturation, intensity and the balance sliders run
    /// 0..=510 centered at 255; hue runs 0..=360 centered at 180; gamma is in
    /// tenths (10 = 1.0).
    #[allow(clippy::too_many_arguments)]
    pub fn from_sliders(
        brightness: i32,
        contrast: i32,
        hue: i32,
        saturation: i32,
        intensity: i32,
        balance_red: i32,
        balance_green: i32,
        balance_blue: i32,
        gamma_tenths: i32,
    ) -> AdjustmentParameters {
        let sliders = SliderPositions {
            brightness,
            contrast,
            hue,
            saturation,
            intensity,
            balance_red,
            balance_green,
            balance_blue,
            gamma_tenths,
        };
        Self {
            inner: sliders.to_parameters(),
        }
    }

    /// Get brightness value
    #[wasm_bindgen(getter)]
    pub fn brightness(&self) -> i32 {
        self.inner.brightness
    }

    /// Set brightness value
    #[wasm_bindgen(setter)]
    pub fn set_brightness(&mut self, value: i32) {
        self.inner.brightness = value;
    }

    /// Get contrast value
    #[wasm_bindgen(getter)]
    pub fn contrast(&self) -> i32 {
        self.inner.contrast
    }

    /// Set contrast value
    #[wasm_bindgen(setter)]
    pub fn set_contrast(&mut self, value: i32) {
        self.inner.contrast = value;
    }

    /// Get hue shift
    #[wasm_bindgen(getter)]
    pub fn hue(&self) -> i32 {
        self.inner.hue
    }

    /// Set hue shift
    #[wasm_bindgen(setter)]
    pub fn set_hue(&mut self, value: i32) {
        self.inner.hue = value;
    }

    /// Get saturation shift
    #[wasm_bindgen(getter)]
    pub fn saturation(&self) -> i32 {
        self.inner.saturation
    }

    /// Set saturation shift
    #[wasm_bindgen(setter)]
    pub fn set_saturation(&mut self, value: i32) {
        self.inner.saturation = value;
    }

    /// Get intensity shift
    #[wasm_bindgen(getter)]
    pub fn intensity(&self) -> i32 {
        self.inner.intensity
    }

    /// Set intensity shift
    #[wasm_bindgen(setter)]
    pub fn set_intensity(&mut self, value: i32) {
        self.inner.intensity = value;
    }

    /// Get red balance offset
    #[wasm_bindgen(getter)]
    pub fn balance_red(&self) -> i32 {
        self.inner.balance_red
    }

    /// Set red balance offset
    #[wasm_bindgen(setter)]
    pub fn set_balance_red(&mut self, value: i32) {
        self.inner.balance_red = value;
    }

    /// Get green balance offset
    #[wasm_bindgen(getter)]
    pub fn balance_green(&self) -> i32 {
        self.inner.balance_green
    }

    /// Set green balance offset
    #[wasm_bindgen(setter)]
    pub fn set_balance_green(&mut self, value: i32) {
        self.inner.balance_green = value;
    }

    /// Get blue balance offset
    #[wasm_bindgen(getter)]
    pub fn balance_blue(&self) -> i32 {
        self.inner.balance_blue
    }

    /// Set blue balance offset
    #[wasm_bindgen(setter)]
    pub fn set_balance_blue(&mut self, value: i32) {
        self.inner.balance_blue = value;
    }

    /// Get gamma exponent
    #[wasm_bindgen(getter)]
    pub fn gamma(&self) -> f32 {
        self.inner.gamma
    }

    /// Set gamma exponent
    #[wasm_bindgen(setter)]
    pub fn set_gamma(&mut self, value: f32) {
        self.inner.gamma = value;
    }

    /// Check if all parameters are at neutral values
    pub fn is_default(&self) -> bool {
        self.inner.is_default()
    }

    /// Return a copy with every value clamped to its valid range
    pub fn clamped(&self) -> AdjustmentParameters {
        Self {
            inner: self.inner.clamped(),
        }
    }

    /// Serialize to JSON for storage
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Deserialize from JSON. Missing fields take neutral values.
    pub fn from_json(value: JsValue) -> Result<AdjustmentParameters, JsValue> {
        let inner: coloradj_core::AdjustmentParameters =
            serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { inner })
    }
}

impl Default for AdjustmentParameters {
    fn default() -> Self {
        Self::new()
    }
}

impl AdjustmentParameters {
    /// Get a reference to the inner parameters for use by the pipeline bindings
    pub(crate) fn inner(&self) -> &coloradj_core::AdjustmentParameters {
        &self.inner
    }
}
