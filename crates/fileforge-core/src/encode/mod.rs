//! Image encoding.
//!
//! This module encodes RGB pixel buffers to the formats the UI offers for
//! download: PNG, JPEG, and WebP. Crop output is the user's final image, so
//! every format is encoded at its best: JPEG at quality 100, PNG and WebP
//! lossless.
//!
//! # Architecture
//!
//! The encoders are designed to be used from Web Workers via WASM bindings.
//! All operations are synchronous and single-threaded within WASM.

mod jpeg;

use crate::decode::{decode_image, DecodeError, DecodedImage};
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;
use thiserror::Error;

pub use jpeg::encode_jpeg;

/// Errors that can occur during image encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying encoder failed
    #[error("Image encoding failed: {0}")]
    EncodingFailed(String),
}

/// Errors from whole-file format conversion.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Failed to decode source image: {0}")]
    Decode(#[from] DecodeError),

    #[error("Failed to encode converted image: {0}")]
    Encode(#[from] EncodeError),
}

/// Output format for encoded images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Lossless, universally supported. The fallback for anything we don't
    /// recognize, since it can represent any input without quality loss.
    #[default]
    Png,
    /// Quality 100.
    Jpeg,
    /// Lossless.
    WebP,
}

impl OutputFormat {
    /// Map a MIME type to an output format.
    ///
    /// Unknown or missing types fall back to [`OutputFormat::Png`]: the
    /// source file's type string comes from the browser and is not always
    /// one we can re-encode (e.g. `image/gif`), and PNG is the lossless
    /// catch-all.
    pub fn from_mime(mime: &str) -> Self {
        match mime {
            "image/jpeg" => Self::Jpeg,
            "image/png" => Self::Png,
            "image/webp" => Self::WebP,
            _ => Self::Png,
        }
    }

    /// The MIME type of this format.
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::WebP => "image/webp",
        }
    }

    /// The conventional file extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::WebP => "webp",
        }
    }
}

/// Encode an image to the given format at maximum quality.
///
/// # Errors
///
/// - [`EncodeError::InvalidDimensions`] if the image has a zero dimension
/// - [`EncodeError::InvalidPixelData`] if the buffer length doesn't match
/// - [`EncodeError::EncodingFailed`] if the underlying encoder fails
pub fn encode_image(image: &DecodedImage, format: OutputFormat) -> Result<Vec<u8>, EncodeError> {
    match format {
        OutputFormat::Jpeg => encode_jpeg(&image.pixels, image.width, image.height, 100),
        OutputFormat::Png => {
            validate(image)?;
            let mut buffer = Cursor::new(Vec::new());
            PngEncoder::new(&mut buffer)
                .write_image(
                    &image.pixels,
                    image.width,
                    image.height,
                    ExtendedColorType::Rgb8,
                )
                .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;
            Ok(buffer.into_inner())
        }
        OutputFormat::WebP => {
            validate(image)?;
            let mut buffer = Cursor::new(Vec::new());
            WebPEncoder::new_lossless(&mut buffer)
                .encode(
                    &image.pixels,
                    image.width,
                    image.height,
                    ExtendedColorType::Rgb8,
                )
                .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;
            Ok(buffer.into_inner())
        }
    }
}

/// Convert raster image bytes from one format to another.
///
/// Decodes the input (format sniffed from content) and re-encodes it in the
/// target format at maximum quality.
pub fn convert_image(bytes: &[u8], format: OutputFormat) -> Result<Vec<u8>, ConvertError> {
    let image = decode_image(bytes)?;
    Ok(encode_image(&image, format)?)
}

fn validate(image: &DecodedImage) -> Result<(), EncodeError> {
    if image.width == 0 || image.height == 0 {
        return Err(EncodeError::InvalidDimensions {
            width: image.width,
            height: image.height,
        });
    }
    let expected = (image.width as usize) * (image.height as usize) * 3;
    if image.pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: image.pixels.len(),
        });
    }
    Ok(())
}
