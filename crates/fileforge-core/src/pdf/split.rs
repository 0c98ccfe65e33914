//! Page extraction.
//!
//! Takes a range expression like `1-3,5` and produces a new PDF containing
//! only those pages, in document order. Implemented by deleting the
//! complement and pruning unreferenced objects, which keeps shared
//! resources (fonts, images) intact for the surviving pages.

use super::PdfError;
use lopdf::Document;

/// Parse a 1-based page-range expression (`"1-3,5"`) against a document of
/// `page_count` pages.
///
/// Returns the selected page numbers sorted and deduplicated.
///
/// # Errors
///
/// [`PdfError::InvalidPageRange`] for empty expressions, malformed pieces,
/// inverted ranges, and out-of-bounds page numbers.
pub fn parse_page_ranges(expression: &str, page_count: usize) -> Result<Vec<u32>, PdfError> {
    let mut selected = Vec::new();

    for piece in expression.split(',') {
        let piece = piece.trim();
        if piece.is_empty() {
            return Err(PdfError::InvalidPageRange(format!(
                "empty segment in \"{expression}\""
            )));
        }

        let (start, end) = match piece.split_once('-') {
            Some((a, b)) => (parse_page(a, piece)?, parse_page(b, piece)?),
            None => {
                let n = parse_page(piece, piece)?;
                (n, n)
            }
        };

        if start > end {
            return Err(PdfError::InvalidPageRange(format!(
                "range \"{piece}\" is inverted"
            )));
        }
        if end as usize > page_count {
            return Err(PdfError::InvalidPageRange(format!(
                "page {end} out of bounds (document has {page_count} pages)"
            )));
        }

        selected.extend(start..=end);
    }

    selected.sort_unstable();
    selected.dedup();
    Ok(selected)
}

fn parse_page(text: &str, piece: &str) -> Result<u32, PdfError> {
    let n: u32 = text
        .trim()
        .parse()
        .map_err(|_| PdfError::InvalidPageRange(format!("cannot parse \"{piece}\"")))?;
    if n == 0 {
        return Err(PdfError::InvalidPageRange(
            "page numbers start at 1".to_string(),
        ));
    }
    Ok(n)
}

/// Extract the pages named by `expression` into a new PDF.
///
/// # Errors
///
/// - [`PdfError::InvalidDocument`] / [`PdfError::Encrypted`] for inputs
///   that cannot be opened
/// - [`PdfError::InvalidPageRange`] if the expression is malformed or out
///   of bounds
pub fn extract_pages(bytes: &[u8], expression: &str) -> Result<Vec<u8>, PdfError> {
    let mut doc =
        Document::load_mem(bytes).map_err(|e| PdfError::InvalidDocument(e.to_string()))?;

    if doc.is_encrypted() {
        return Err(PdfError::Encrypted);
    }

    let page_count = doc.get_pages().len();
    let keep = parse_page_ranges(expression, page_count)?;

    let delete: Vec<u32> = (1..=page_count as u32)
        .filter(|n| !keep.contains(n))
        .collect();
    doc.delete_pages(&delete);
    doc.prune_objects();
    doc.compress();

    let mut output = Vec::new();
    doc.save_to(&mut output)
        .map_err(|e| PdfError::Save(e.to_string()))?;
    Ok(output)
}
