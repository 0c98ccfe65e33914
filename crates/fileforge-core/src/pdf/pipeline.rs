//! The smart compression pipeline.
//!
//! Strategy selection is sequential and cheapest-first:
//!
//! 1. Run the lossless pass. If it already cuts more than 10% off, return
//!    it without ever touching the renderer.
//! 2. Otherwise rasterize the document.
//! 3. Compare {original, lossless, rasterized} by size; smallest wins, and
//!    the original bytes are returned verbatim when nothing beats them.
//!
//! The output is therefore never larger than the input.

use super::{
    compress_lossless, rasterize_document, Compressed, CompressionOptions, PageRenderer, PdfError,
    Strategy,
};

/// Fractional size reduction the lossless pass must achieve to short-circuit
/// the pipeline.
const LOSSLESS_EARLY_EXIT: f64 = 0.10;

/// Compress a PDF, choosing the best strategy by output size.
///
/// The renderer is only consulted when the lossless pass is not good
/// enough. If rasterization fails on every page, the original bytes are
/// returned (`Strategy::Original`) rather than erroring: a file the user
/// can still use beats a failure.
///
/// `progress(done, total)` forwards the rasterization progress; it is never
/// called when the lossless pass short-circuits.
///
/// # Errors
///
/// - [`PdfError::InvalidDocument`] / [`PdfError::Encrypted`] for inputs the
///   lossless pass rejects
/// - [`PdfError::Save`] if an output document cannot be serialized
pub fn compress_smart<F>(
    bytes: &[u8],
    renderer: &dyn PageRenderer,
    options: &CompressionOptions,
    progress: F,
) -> Result<Compressed, PdfError>
where
    F: FnMut(usize, usize),
{
    let lossless = compress_lossless(bytes)?;

    let reduction = 1.0 - lossless.len() as f64 / bytes.len() as f64;
    if reduction > LOSSLESS_EARLY_EXIT {
        return Ok(Compressed {
            bytes: lossless,
            strategy: Strategy::Lossless,
            skipped_pages: Vec::new(),
        });
    }

    let rasterized = match rasterize_document(renderer, options, progress) {
        Ok(result) => Some(result),
        Err(PdfError::PipelineExhausted) => None,
        Err(e) => return Err(e),
    };

    let mut best = Compressed {
        bytes: bytes.to_vec(),
        strategy: Strategy::Original,
        // When rasterization produced nothing at all, report every page as
        // skipped so the caller can surface it
        skipped_pages: if rasterized.is_none() {
            (0..renderer.page_count()).collect()
        } else {
            Vec::new()
        },
    };

    if lossless.len() < best.bytes.len() {
        best = Compressed {
            bytes: lossless,
            strategy: Strategy::Lossless,
            skipped_pages: Vec::new(),
        };
    }

    if let Some(result) = rasterized {
        if result.bytes.len() < best.bytes.len() {
            best = Compressed {
                bytes: result.bytes,
                strategy: Strategy::Rasterized,
                skipped_pages: result.skipped_pages,
            };
        }
    }

    Ok(best)
}
