//! Image decoding WASM bindings.

use crate::types::JsDecodedImage;
use fileforge_core::decode;
use wasm_bindgen::prelude::*;

/// Decode raster image bytes into an RGB pixel buffer.
///
/// The format is sniffed from the byte content; JPEG, PNG, and WebP are the
/// common cases but anything the decoder recognizes is accepted.
///
/// # Arguments
///
/// * `bytes` - Raw file bytes as a `Uint8Array`
///
/// # Returns
///
/// A [`JsDecodedImage`], or an error if the bytes are not a decodable image
/// or decode to a zero-dimension image.
///
/// # Example
///
/// ```typescript
/// const bytes = new Uint8Array(await file.arrayBuffer());
/// const image = decode_image(bytes);
/// console.log(`${image.width}x${image.height}`);
/// ```
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsDecodedImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
