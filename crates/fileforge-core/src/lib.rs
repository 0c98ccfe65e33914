//! Fileforge Core - File processing library
//!
//! This crate provides the processing functionality behind the Fileforge
//! browser tools: raster image decoding, the display-space crop transform,
//! image encoding, and the PDF size-reduction pipeline.
//!
//! # Modules
//!
//! - [`decode`] - Raster image decoding into RGB pixel buffers
//! - [`transform`] - Orientation (quarter-turn rotation + flips) and cropping
//! - [`encode`] - JPEG/PNG/WebP encoding and format conversion
//! - [`pdf`] - Lossless and rasterizing PDF compression, page extraction

pub mod decode;
pub mod encode;
pub mod pdf;
pub mod transform;

pub use decode::{decode_image, DecodeError, DecodedImage};
pub use encode::{encode_image, OutputFormat};
pub use pdf::{
    compress_lossless, compress_smart, extract_pages, Compressed, CompressionLevel,
    CompressionOptions, PageRenderer, PdfError, RenderError, Strategy,
};
pub use transform::{crop_to_bytes, DisplayRect, DisplaySize, Orientation, Rotation};
