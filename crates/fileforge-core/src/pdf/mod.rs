//! PDF size reduction and page extraction.
//!
//! Two compression strategies, tried cheapest-first:
//!
//! 1. **Lossless** ([`compress_lossless`]): re-compress the document's
//!    streams with `lopdf`. Content is untouched, text stays selectable.
//! 2. **Rasterized** ([`rasterize_document`]): render every page to a JPEG
//!    at a quality tier and rebuild the document as one image per page.
//!    Text becomes pixels; the size win can be large.
//!
//! [`compress_smart`] sequences the two and guarantees the returned bytes
//! are never larger than the input.
//!
//! # Page Rendering
//!
//! Rasterization needs a renderer, and where that comes from depends on the
//! host: natively it is Pdfium (behind the `pdfium` feature, see
//! [`pdfium::PdfiumCompressor`]); in the browser the JS side renders pages
//! with pdf.js and hands us the bitmaps. Both paths go through the
//! [`PageRenderer`] trait, which also lets the pipeline be tested without
//! any renderer at all.

mod lossless;
mod pipeline;
mod raster;
mod split;

#[cfg(test)]
pub(crate) mod testutil;

#[cfg(feature = "pdfium")]
pub mod pdfium;

use crate::decode::DecodedImage;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use lossless::compress_lossless;
pub use pipeline::compress_smart;
pub use raster::{rasterize_document, RasterizedDocument};
pub use split::{extract_pages, parse_page_ranges};

/// Largest pixel dimension a page is rendered at, regardless of tier scale.
/// Very large page sizes (posters, architectural drawings) would otherwise
/// produce rasters that exhaust memory.
pub const DEFAULT_MAX_RENDER_DIMENSION: u32 = 3500;

/// Errors from PDF operations.
#[derive(Debug, Error)]
pub enum PdfError {
    /// The bytes could not be parsed as a PDF document.
    #[error("Not a valid PDF document: {0}")]
    InvalidDocument(String),

    /// The document is encrypted; we do not prompt for passwords.
    #[error("Document is encrypted")]
    Encrypted,

    /// Serializing the output document failed.
    #[error("Failed to write PDF output: {0}")]
    Save(String),

    /// Every page failed to render or encode, so rasterization produced
    /// nothing usable.
    #[error("No page could be rasterized")]
    PipelineExhausted,

    /// The page renderer failed in a way that is not per-page recoverable.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// A page-range expression could not be parsed or is out of bounds.
    #[error("Invalid page range: {0}")]
    InvalidPageRange(String),
}

/// Errors from a [`PageRenderer`] implementation.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to initialize renderer: {0}")]
    Init(String),

    #[error("Failed to open document: {0}")]
    Open(String),

    #[error("Failed to render page {index}: {reason}")]
    Page { index: usize, reason: String },

    #[error("Page index {0} out of bounds")]
    OutOfBounds(usize),
}

/// Renders PDF pages to pixel buffers.
///
/// Implemented by the Pdfium adapter natively and by a wrapper over
/// JS-supplied bitmaps in the WASM bindings. Page indices are zero-based.
pub trait PageRenderer {
    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Page dimensions in PDF points (1/72 inch).
    fn page_size(&self, index: usize) -> Result<(f64, f64), RenderError>;

    /// Render a page at the given pixel dimensions.
    fn render_page(
        &self,
        index: usize,
        width_px: u32,
        height_px: u32,
    ) -> Result<DecodedImage, RenderError>;
}

/// Compression tier: how aggressively pages are rasterized.
///
/// Each tier fixes a render scale (pixels per point) and a JPEG quality.
/// `Low` means low compression: high fidelity, larger output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressionLevel {
    /// Scale 2.0, JPEG quality 90.
    Low,
    /// Scale 1.5, JPEG quality 75.
    #[default]
    Medium,
    /// Scale 1.0, JPEG quality 60.
    High,
}

impl CompressionLevel {
    /// Pixels rendered per PDF point.
    pub fn render_scale(self) -> f64 {
        match self {
            Self::Low => 2.0,
            Self::Medium => 1.5,
            Self::High => 1.0,
        }
    }

    /// JPEG quality for rasterized pages.
    pub fn jpeg_quality(self) -> u8 {
        match self {
            Self::Low => 90,
            Self::Medium => 75,
            Self::High => 60,
        }
    }
}

/// Options for the rasterized compression path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressionOptions {
    pub level: CompressionLevel,
    /// Desaturate pages before JPEG encoding. Smaller output for documents
    /// that are effectively monochrome anyway.
    #[serde(default)]
    pub grayscale: bool,
    /// Cap on the larger rendered dimension, in pixels.
    #[serde(default = "default_max_render_dimension")]
    pub max_render_dimension: u32,
}

fn default_max_render_dimension() -> u32 {
    DEFAULT_MAX_RENDER_DIMENSION
}

impl Default for CompressionOptions {
    fn default() -> Self {
        Self {
            level: CompressionLevel::default(),
            grayscale: false,
            max_render_dimension: DEFAULT_MAX_RENDER_DIMENSION,
        }
    }
}

/// Which compression candidate won the size comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Nothing beat the input; the original bytes were returned verbatim.
    Original,
    /// Lossless stream recompression won.
    Lossless,
    /// The rasterized rebuild won.
    Rasterized,
}

/// Result of [`compress_smart`].
///
/// `bytes.len()` never exceeds the input length.
#[derive(Debug)]
pub struct Compressed {
    pub bytes: Vec<u8>,
    pub strategy: Strategy,
    /// Zero-based indices of pages dropped during rasterization. Empty
    /// unless `strategy` is `Rasterized`, or `Original` was a fallback from
    /// a fully failed rasterization.
    pub skipped_pages: Vec<usize>,
}
