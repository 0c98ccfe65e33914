//! Quarter-turn rotation and mirroring.
//!
//! Orientation changes are exact pixel remaps: every output pixel is a copy
//! of exactly one source pixel, so repeated re-orientation never degrades the
//! image. The remap uses inverse mapping: for each output pixel we compute
//! the source pixel that lands there, first undoing the rotation and then
//! undoing the flips (flips are self-inverse).

use crate::decode::DecodedImage;
use serde::{Deserialize, Serialize};

/// Clockwise quarter-turn rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Rotation {
    /// No rotation.
    #[default]
    R0,
    /// 90 degrees clockwise.
    R90,
    /// 180 degrees.
    R180,
    /// 270 degrees clockwise (90 counter-clockwise).
    R270,
}

impl Rotation {
    /// Normalize a degree value to a quarter turn.
    ///
    /// Accepts any integer multiple of 90, positive or negative (so both
    /// `450` and `-270` mean [`Rotation::R90`]). Returns `None` for angles
    /// that are not multiples of 90 - the crop UI only ever produces quarter
    /// turns, so anything else is a caller bug worth surfacing.
    pub fn from_degrees(degrees: i32) -> Option<Rotation> {
        if degrees % 90 != 0 {
            return None;
        }
        match degrees.rem_euclid(360) {
            0 => Some(Rotation::R0),
            90 => Some(Rotation::R90),
            180 => Some(Rotation::R180),
            270 => Some(Rotation::R270),
            _ => unreachable!("rem_euclid(360) of a multiple of 90"),
        }
    }

    /// Returns true if this rotation swaps width and height.
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        matches!(self, Rotation::R90 | Rotation::R270)
    }
}

/// Full orientation of a displayed image: quarter-turn rotation plus
/// optional mirroring.
///
/// Flips are expressed in the image's own unrotated axes and are applied
/// before the rotation ("rotate the flipped image"), matching how the
/// preview composes its CSS transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Orientation {
    /// Clockwise quarter-turn rotation, applied after flips.
    pub rotation: Rotation,
    /// Mirror across the vertical axis (left-right), before rotation.
    pub flip_horizontal: bool,
    /// Mirror across the horizontal axis (top-bottom), before rotation.
    pub flip_vertical: bool,
}

impl Orientation {
    /// An orientation that leaves the image untouched.
    pub fn identity() -> Self {
        Self::default()
    }

    /// Returns true if applying this orientation is a no-op.
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }

    /// Dimensions of an oriented `width` x `height` image.
    pub fn oriented_dimensions(&self, width: u32, height: u32) -> (u32, u32) {
        if self.rotation.swaps_dimensions() {
            (height, width)
        } else {
            (width, height)
        }
    }
}

/// Apply an orientation to an image.
///
/// Produces a new image whose pixels are the source pixels flipped (in the
/// source's own axes) and then rotated clockwise by the given quarter turn.
/// For [`Rotation::R90`] and [`Rotation::R270`] the output dimensions are
/// swapped relative to the source.
///
/// # Example
///
/// ```ignore
/// let orientation = Orientation {
///     rotation: Rotation::R90,
///     flip_horizontal: true,
///     flip_vertical: false,
/// };
/// let oriented = orient(&image, orientation);
/// ```
pub fn orient(image: &DecodedImage, orientation: Orientation) -> DecodedImage {
    // Fast path: nothing to do
    if orientation.is_identity() {
        return image.clone();
    }

    let (src_w, src_h) = (image.width, image.height);
    let (out_w, out_h) = orientation.oriented_dimensions(src_w, src_h);

    let mut output = vec![0u8; (out_w as usize) * (out_h as usize) * 3];

    for out_y in 0..out_h {
        for out_x in 0..out_w {
            // Undo the rotation: where in the flipped image did this output
            // pixel come from?
            let (fx, fy) = match orientation.rotation {
                Rotation::R0 => (out_x, out_y),
                Rotation::R90 => (out_y, src_h - 1 - out_x),
                Rotation::R180 => (src_w - 1 - out_x, src_h - 1 - out_y),
                Rotation::R270 => (src_w - 1 - out_y, out_x),
            };

            // Undo the flips to reach the source pixel
            let sx = if orientation.flip_horizontal {
                src_w - 1 - fx
            } else {
                fx
            };
            let sy = if orientation.flip_vertical {
                src_h - 1 - fy
            } else {
                fy
            };

            let src_idx = ((sy as usize) * (src_w as usize) + (sx as usize)) * 3;
            let dst_idx = ((out_y as usize) * (out_w as usize) + (out_x as usize)) * 3;

            output[dst_idx] = image.pixels[src_idx];
            output[dst_idx + 1] = image.pixels[src_idx + 1];
            output[dst_idx + 2] = image.pixels[src_idx + 2];
        }
    }

    DecodedImage {
        width: out_w,
        height: out_h,
        pixels: output,
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn dimensions_strategy() -> impl Strategy<Value = (u32, u32)> {
        (1u32..=40, 1u32..=40)
    }

    fn orientation_strategy() -> impl Strategy<Value = Orientation> {
        (0u8..4, any::<bool>(), any::<bool>()).prop_map(|(r, fh, fv)| Orientation {
            rotation: match r {
                0 => Rotation::R0,
                1 => Rotation::R90,
                2 => Rotation::R180,
                _ => Rotation::R270,
            },
            flip_horizontal: fh,
            flip_vertical: fv,
        })
    }

    fn coord_image(width: u32, height: u32) -> DecodedImage {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(x as u8);
                pixels.push(y as u8);
                pixels.push(99);
            }
        }
        DecodedImage {
            width,
            height,
            pixels,
        }
    }

    proptest! {
        /// Property: orientation is a permutation - buffer size is preserved.
        #[test]
        fn prop_preserves_pixel_count(
            (width, height) in dimensions_strategy(),
            orientation in orientation_strategy(),
        ) {
            let img = coord_image(width, height);
            let result = orient(&img, orientation);

            prop_assert_eq!(result.pixels.len(), img.pixels.len());
            let (ew, eh) = orientation.oriented_dimensions(width, height);
            prop_assert_eq!((result.width, result.height), (ew, eh));
        }

        /// Property: every source pixel appears exactly once in the output.
        #[test]
        fn prop_is_permutation(
            (width, height) in (1u32..=16, 1u32..=16),
            orientation in orientation_strategy(),
        ) {
            let img = coord_image(width, height);
            let result = orient(&img, orientation);

            let mut src: Vec<&[u8]> = img.pixels.chunks(3).collect();
            let mut dst: Vec<&[u8]> = result.pixels.chunks(3).collect();
            src.sort_unstable();
            dst.sort_unstable();
            prop_assert_eq!(src, dst);
        }

        /// Property: applying an orientation twice with R0/R180 returns the
        /// original (both components are involutions).
        #[test]
        fn prop_half_turns_are_involutions(
            (width, height) in dimensions_strategy(),
            use_r180 in any::<bool>(),
            fh in any::<bool>(),
            fv in any::<bool>(),
        ) {
            let orientation = Orientation {
                rotation: if use_r180 { Rotation::R180 } else { Rotation::R0 },
                flip_horizontal: fh,
                flip_vertical: fv,
            };

            let img = coord_image(width, height);
            let once = orient(&img, orientation);
            let twice = orient(&once, orientation);

            prop_assert_eq!(twice.pixels, img.pixels);
        }

        /// Property: orientation is deterministic.
        #[test]
        fn prop_deterministic(
            (width, height) in dimensions_strategy(),
            orientation in orientation_strategy(),
        ) {
            let img = coord_image(width, height);
            let a = orient(&img, orientation);
            let b = orient(&img, orientation);

            prop_assert_eq!(a.pixels, b.pixels);
        }
    }
}
