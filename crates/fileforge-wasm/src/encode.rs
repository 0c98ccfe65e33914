//! Image encoding WASM bindings.
//!
//! # Functions
//!
//! - [`encode_jpeg`] - Encode RGB pixel data to JPEG bytes at a chosen quality
//! - [`encode_image`] - Encode a decoded image in the format for a MIME type
//! - [`convert_image`] - Re-encode whole image files between formats

use crate::types::JsDecodedImage;
use fileforge_core::encode::{self, OutputFormat};
use wasm_bindgen::prelude::*;

/// Encode RGB pixel data to JPEG bytes.
///
/// # Arguments
///
/// * `pixels` - RGB pixel data as a `Uint8Array` (3 bytes per pixel, row-major)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `quality` - JPEG quality (1-100, where 100 is highest quality)
///
/// # Errors
///
/// Returns an error if the pixel data length doesn't match
/// `width * height * 3`, a dimension is zero, or encoding fails.
#[wasm_bindgen]
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, JsValue> {
    encode::encode_jpeg(pixels, width, height, quality)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode a decoded image in the output format for `mime_type`, at maximum
/// quality.
///
/// Unrecognized MIME types fall back to PNG, which can represent any input
/// losslessly.
///
/// # Example
///
/// ```typescript
/// const bytes = encode_image(image, "image/webp");
/// const blob = new Blob([bytes], { type: "image/webp" });
/// ```
#[wasm_bindgen]
pub fn encode_image(image: &JsDecodedImage, mime_type: &str) -> Result<Vec<u8>, JsValue> {
    let format = OutputFormat::from_mime(mime_type);
    encode::encode_image(&image.to_decoded(), format)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Convert an image file from one format to another.
///
/// Decodes the input (format sniffed from content) and re-encodes it in the
/// format for `mime_type` at maximum quality.
#[wasm_bindgen]
pub fn convert_image(bytes: &[u8], mime_type: &str) -> Result<Vec<u8>, JsValue> {
    let format = OutputFormat::from_mime(mime_type);
    encode::convert_image(bytes, format).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// WASM-specific tests that require JsValue.
///
/// Native coverage of the underlying encoders lives in
/// `fileforge_core::encode`.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_encode_jpeg_basic() {
        let pixels = vec![128u8; 10 * 10 * 3];
        let jpeg = encode_jpeg(&pixels, 10, 10, 90).unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
    }

    #[wasm_bindgen_test]
    fn test_encode_image_unknown_mime_is_png() {
        let image = JsDecodedImage::new(8, 8, vec![128u8; 8 * 8 * 3]);
        let bytes = encode_image(&image, "image/gif").unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
    }

    #[wasm_bindgen_test]
    fn test_encode_jpeg_invalid_pixel_data() {
        let pixels = vec![128u8; 50];
        assert!(encode_jpeg(&pixels, 100, 100, 90).is_err());
    }
}
