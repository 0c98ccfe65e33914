//! Image orientation and cropping.
//!
//! This module implements the crop tool's processing path: the user adjusts
//! a selection on a CSS-scaled preview of the image, optionally rotated in
//! quarter turns and/or mirrored, and the crop must be taken from the
//! full-resolution source so the output loses nothing to screen scaling.
//!
//! # Coordinate Systems
//!
//! Two spaces are in play and they are deliberately kept apart by the type
//! system:
//!
//! - **Display space**: the on-screen, CSS-scaled, *untransformed* image.
//!   Selection rectangles arrive in this space ([`DisplayRect`],
//!   [`DisplaySize`]).
//! - **Natural space**: true source pixels, after orientation has been
//!   applied. All pixel copying happens here.
//!
//! # Transform Order
//!
//! Flips mirror the image in its own (unrotated) axes and are applied first;
//! the quarter-turn rotation is applied to the flipped image. Rotation by an
//! odd number of quarter turns swaps which display axis corresponds to which
//! natural axis, which is where the conditional scale factors in
//! [`map_display_rect`] come from.

mod crop;
mod orient;

pub use crop::{
    crop_oriented, crop_to_bytes, map_display_rect, CropError, DisplayRect, DisplaySize, PixelRect,
};
pub use orient::{orient, Orientation, Rotation};
