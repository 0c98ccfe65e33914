//! Lossless PDF stream recompression.

use super::PdfError;
use lopdf::Document;

/// Re-save a PDF with its streams recompressed.
///
/// Content is untouched: text stays selectable, vector graphics stay
/// vectors. The win comes from Flate-compressing streams the producer left
/// uncompressed (or compressed poorly) and from lopdf's tighter
/// serialization. On already well-compressed files the output can be the
/// same size or marginally larger; callers compare against the input.
///
/// # Errors
///
/// - [`PdfError::InvalidDocument`] if the bytes don't parse as a PDF
/// - [`PdfError::Encrypted`] for password-protected documents
/// - [`PdfError::Save`] if serialization fails
pub fn compress_lossless(bytes: &[u8]) -> Result<Vec<u8>, PdfError> {
    let mut doc =
        Document::load_mem(bytes).map_err(|e| PdfError::InvalidDocument(e.to_string()))?;

    if doc.is_encrypted() {
        return Err(PdfError::Encrypted);
    }

    doc.compress();

    let mut output = Vec::with_capacity(bytes.len());
    doc.save_to(&mut output)
        .map_err(|e| PdfError::Save(e.to_string()))?;

    Ok(output)
}
