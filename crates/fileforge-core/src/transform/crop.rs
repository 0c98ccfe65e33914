//! Display-space cropping.
//!
//! The selection tool reports its rectangle in the coordinate space of the
//! *displayed, untransformed* image: CSS scaling has been applied but the
//! quarter-turn rotation and flips have not. Taking the crop at source
//! resolution therefore needs two pieces of bookkeeping:
//!
//! 1. Orient the source image at full resolution (see
//!    [`orient`](super::orient)) - the pixel-exact equivalent of what the
//!    preview shows, decoupled from screen scaling.
//! 2. Map the display-space rectangle into the oriented image. An odd number
//!    of quarter turns swaps which display axis corresponds to which natural
//!    axis, so the horizontal scale factor must come from the natural
//!    *height* in that case (and vice versa). [`map_display_rect`] carries
//!    exactly this derivation and is pinned by tests for every rotation and
//!    flip combination.

use crate::decode::DecodedImage;
use crate::encode::{encode_image, EncodeError, OutputFormat};
use crate::transform::orient::{orient, Orientation, Rotation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from the crop pipeline.
#[derive(Debug, Error)]
pub enum CropError {
    /// The source image has a zero dimension (never decoded, or decoded to
    /// nothing). Guarding here prevents a division by zero in the
    /// display-space scale factors.
    #[error("Cannot crop an image with zero width or height")]
    EmptyImage,

    /// The reported display size has a zero dimension (e.g. the preview
    /// element was hidden while the crop was requested).
    #[error("Display size has zero width or height")]
    EmptyViewport,

    /// Encoding the cropped pixels failed.
    #[error("Failed to encode cropped image: {0}")]
    Encode(#[from] EncodeError),
}

/// Crop selection in display space: coordinates of the on-screen,
/// CSS-scaled, untransformed image.
///
/// This is deliberately a distinct type from any pixel-space rectangle;
/// passing natural-pixel coordinates here is the classic way to get a
/// visually wrong crop, and the type boundary makes that mistake loud.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayRect {
    /// Left edge, display pixels.
    pub x: f64,
    /// Top edge, display pixels.
    pub y: f64,
    /// Selection width, display pixels.
    pub width: f64,
    /// Selection height, display pixels.
    pub height: f64,
}

/// On-screen dimensions of the untransformed image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplaySize {
    pub width: f64,
    pub height: f64,
}

/// A rectangle in oriented natural-pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Map a display-space crop rectangle into oriented natural-pixel space.
///
/// The scale factors depend on the rotation: after an odd number of quarter
/// turns the oriented image's horizontal axis corresponds to the natural
/// vertical axis, so:
///
/// - odd quarter turns: `scale_x = natural_height / display_width`,
///   `scale_y = natural_width / display_height`
/// - otherwise: `scale_x = natural_width / display_width`,
///   `scale_y = natural_height / display_height`
///
/// The result is rounded to whole pixels, clamped to the oriented image
/// bounds, and never smaller than 1x1.
///
/// Callers must ensure `display` and the natural dimensions are non-zero;
/// [`crop_oriented`] checks both before calling.
pub fn map_display_rect(
    rect: DisplayRect,
    display: DisplaySize,
    natural_width: u32,
    natural_height: u32,
    rotation: Rotation,
) -> PixelRect {
    let (scale_x, scale_y) = if rotation.swaps_dimensions() {
        (
            natural_height as f64 / display.width,
            natural_width as f64 / display.height,
        )
    } else {
        (
            natural_width as f64 / display.width,
            natural_height as f64 / display.height,
        )
    };

    let (oriented_w, oriented_h) = if rotation.swaps_dimensions() {
        (natural_height, natural_width)
    } else {
        (natural_width, natural_height)
    };

    let x = (rect.x.max(0.0) * scale_x).round() as u32;
    let y = (rect.y.max(0.0) * scale_y).round() as u32;
    let width = (rect.width.max(0.0) * scale_x).round() as u32;
    let height = (rect.height.max(0.0) * scale_y).round() as u32;

    // Clamp to the oriented image, keeping at least one pixel
    let x = x.min(oriented_w.saturating_sub(1));
    let y = y.min(oriented_h.saturating_sub(1));
    let width = width.clamp(1, oriented_w - x);
    let height = height.clamp(1, oriented_h - y);

    PixelRect {
        x,
        y,
        width,
        height,
    }
}

/// Crop an image using a display-space selection.
///
/// Orients the source at full resolution, maps the selection into the
/// oriented image, and copies the selected region.
///
/// # Errors
///
/// - [`CropError::EmptyImage`] if the source has a zero dimension
/// - [`CropError::EmptyViewport`] if the display size has a zero dimension
pub fn crop_oriented(
    image: &DecodedImage,
    orientation: Orientation,
    rect: DisplayRect,
    display: DisplaySize,
) -> Result<DecodedImage, CropError> {
    if image.is_empty() {
        return Err(CropError::EmptyImage);
    }
    if display.width <= 0.0 || display.height <= 0.0 {
        return Err(CropError::EmptyViewport);
    }

    let oriented = orient(image, orientation);
    let mapped = map_display_rect(
        rect,
        display,
        image.width,
        image.height,
        orientation.rotation,
    );

    Ok(copy_rect(&oriented, mapped))
}

/// Crop an image and encode the result.
///
/// This is the full crop operation as exposed to the UI: display-space
/// selection in, encoded bytes out. The output is encoded at maximum
/// quality - this is the user's final crop, not a preview, so JPEG quality
/// is 100 and PNG/WebP are lossless.
pub fn crop_to_bytes(
    image: &DecodedImage,
    orientation: Orientation,
    rect: DisplayRect,
    display: DisplaySize,
    format: OutputFormat,
) -> Result<Vec<u8>, CropError> {
    let cropped = crop_oriented(image, orientation, rect, display)?;
    Ok(encode_image(&cropped, format)?)
}

/// Copy a sub-rectangle out of an image. `rect` must be in bounds.
fn copy_rect(image: &DecodedImage, rect: PixelRect) -> DecodedImage {
    let mut output = vec![0u8; (rect.width as usize) * (rect.height as usize) * 3];

    for row in 0..rect.height {
        let src_y = (rect.y + row) as usize;
        let src_start = (src_y * image.width as usize + rect.x as usize) * 3;
        let src_end = src_start + (rect.width as usize) * 3;
        let dst_start = (row as usize) * (rect.width as usize) * 3;
        let dst_end = dst_start + (rect.width as usize) * 3;

        output[dst_start..dst_end].copy_from_slice(&image.pixels[src_start..src_end]);
    }

    DecodedImage {
        width: rect.width,
        height: rect.height,
        pixels: output,
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
