//! Raster image decoding.
//!
//! Accepts any raster format the `image` crate recognizes (the browser hands
//! us raw file bytes, so the format is sniffed from the content) and produces
//! an RGB pixel buffer for the transform pipeline.
//!
//! Decoding is where the zero-dimension guard lives: an image that decodes to
//! 0x0 (or reports 0x0 because it was never really decoded) must be rejected
//! here, otherwise the display-space scale factors downstream divide by zero.

mod types;

pub use types::{DecodeError, DecodedImage};

/// Decode raster image bytes into an RGB pixel buffer.
///
/// The format is detected from the byte content; JPEG, PNG, and WebP inputs
/// are the common cases, but anything the `image` crate can sniff is
/// accepted. Alpha channels are dropped (composited over their own RGB).
///
/// # Errors
///
/// - [`DecodeError::UnsupportedFormat`] if the bytes are not a recognizable image
/// - [`DecodeError::Corrupted`] if the container is recognized but decoding fails
/// - [`DecodeError::EmptyImage`] if the decoded image has a zero dimension
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let dynamic = image::load_from_memory(bytes).map_err(|e| match e {
        image::ImageError::Unsupported(_) => DecodeError::UnsupportedFormat,
        other => DecodeError::Corrupted(other.to_string()),
    })?;

    let rgb = dynamic.to_rgb8();
    let image = DecodedImage::from_rgb_image(rgb);

    if image.is_empty() {
        return Err(DecodeError::EmptyImage);
    }

    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbImage};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, 7])
        });
        let mut buffer = Cursor::new(Vec::new());
        img.write_to(&mut buffer, ImageFormat::Png).unwrap();
        buffer.into_inner()
    }

    #[test]
    fn test_decode_png() {
        let bytes = png_bytes(20, 10);
        let image = decode_image(&bytes).unwrap();

        assert_eq!(image.width, 20);
        assert_eq!(image.height, 10);
        assert_eq!(image.pixels.len(), 20 * 10 * 3);
    }

    #[test]
    fn test_decode_preserves_pixel_values() {
        let bytes = png_bytes(8, 8);
        let image = decode_image(&bytes).unwrap();

        // PNG is lossless, so pixel (3, 5) must round-trip exactly
        let idx = ((5 * 8 + 3) * 3) as usize;
        assert_eq!(image.pixels[idx], 3);
        assert_eq!(image.pixels[idx + 1], 5);
        assert_eq!(image.pixels[idx + 2], 7);
    }

    #[test]
    fn test_decode_garbage_fails() {
        let result = decode_image(&[0u8; 64]);
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_empty_input_fails() {
        let result = decode_image(&[]);
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_truncated_png_fails() {
        let mut bytes = png_bytes(50, 50);
        bytes.truncate(bytes.len() / 2);

        let result = decode_image(&bytes);
        assert!(matches!(result, Err(DecodeError::Corrupted(_))));
    }
}
