//! Display-space crop WASM bindings.
//!
//! The UI hands us the selection exactly as the user drew it: in the
//! coordinate space of the on-screen, CSS-scaled, untransformed image,
//! together with the rotation and flips the preview had applied. The core
//! maps that selection to full-resolution pixels.

use crate::types::JsDecodedImage;
use fileforge_core::encode::OutputFormat;
use fileforge_core::transform::{crop_to_bytes, DisplayRect, DisplaySize, Orientation, Rotation};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

/// Crop parameters as supplied by the UI.
///
/// Deserialized from a plain JS object (camelCase keys):
///
/// ```typescript
/// {
///   rotation: 90,            // degrees, any multiple of 90
///   flipHorizontal: false,
///   flipVertical: false,
///   displayWidth: 500,       // on-screen size of the untransformed image
///   displayHeight: 1000,
///   rectX: 100,              // selection in display coordinates
///   rectY: 50,
///   rectWidth: 200,
///   rectHeight: 100,
///   mimeType: "image/jpeg",  // optional; unknown/missing falls back to PNG
/// }
/// ```
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropSpec {
    #[serde(default)]
    pub rotation: i32,
    #[serde(default)]
    pub flip_horizontal: bool,
    #[serde(default)]
    pub flip_vertical: bool,
    pub display_width: f64,
    pub display_height: f64,
    pub rect_x: f64,
    pub rect_y: f64,
    pub rect_width: f64,
    pub rect_height: f64,
    #[serde(default)]
    pub mime_type: Option<String>,
}

/// Crop a decoded image using a display-space selection, returning encoded
/// bytes ready for download.
///
/// # Arguments
///
/// * `image` - The decoded source image at natural resolution
/// * `spec` - A [`CropSpec`]-shaped JS object
///
/// # Errors
///
/// Rejects rotations that are not multiples of 90, zero-dimension images
/// or display sizes, and encoder failures.
#[wasm_bindgen]
pub fn crop_image(image: &JsDecodedImage, spec: JsValue) -> Result<Vec<u8>, JsValue> {
    let spec: CropSpec =
        serde_wasm_bindgen::from_value(spec).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let rotation = Rotation::from_degrees(spec.rotation).ok_or_else(|| {
        JsValue::from_str(&format!(
            "rotation must be a multiple of 90, got {}",
            spec.rotation
        ))
    })?;
    let orientation = Orientation {
        rotation,
        flip_horizontal: spec.flip_horizontal,
        flip_vertical: spec.flip_vertical,
    };
    let rect = DisplayRect {
        x: spec.rect_x,
        y: spec.rect_y,
        width: spec.rect_width,
        height: spec.rect_height,
    };
    let display = DisplaySize {
        width: spec.display_width,
        height: spec.display_height,
    };
    let format = spec
        .mime_type
        .as_deref()
        .map(OutputFormat::from_mime)
        .unwrap_or_default();

    crop_to_bytes(&image.to_decoded(), orientation, rect, display, format)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
