//! Fileforge WASM - WebAssembly bindings for Fileforge
//!
//! This crate provides WASM bindings to expose the fileforge-core
//! functionality to JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for image data
//! - `decode` - Image decoding bindings
//! - `crop` - Display-space crop bindings
//! - `encode` - Image encoding and format conversion bindings
//! - `compress` - PDF compression and page extraction bindings
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, crop_image } from '@fileforge/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! // Decode an image file
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! console.log(`Decoded ${image.width}x${image.height}`);
//! ```

use wasm_bindgen::prelude::*;

mod compress;
mod crop;
mod decode;
mod encode;
mod types;

// Re-export public types
pub use compress::{
    compress_pdf_lossless, compress_pdf_smart, extract_pdf_pages, JsCompressed, JsRenderedPages,
};
pub use crop::crop_image;
pub use decode::decode_image;
pub use encode::{convert_image, encode_image, encode_jpeg};
pub use types::JsDecodedImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    // Future: Set up panic hook for better error messages in browser console
    // when console_error_panic_hook feature is added
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
