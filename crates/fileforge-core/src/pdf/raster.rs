//! Rasterized PDF rebuild.
//!
//! Renders each page to pixels, JPEG-encodes it at the tier quality, and
//! rebuilds the document as one full-page DCTDecode image XObject per page.
//! The page's MediaBox keeps the original point dimensions, so the output
//! prints and displays at the same physical size as the source.
//!
//! A page that fails to render or encode is skipped and the rebuild
//! continues with the rest; only when no page at all survives does the
//! operation fail.

use super::{CompressionOptions, PageRenderer, PdfError};
use crate::encode::encode_jpeg;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// Output of [`rasterize_document`].
#[derive(Debug)]
pub struct RasterizedDocument {
    pub bytes: Vec<u8>,
    /// Zero-based indices of pages that failed and were dropped.
    pub skipped_pages: Vec<usize>,
}

/// One successfully rasterized page, ready for document assembly.
struct RasterPage {
    width_pt: f64,
    height_pt: f64,
    width_px: u32,
    height_px: u32,
    jpeg: Vec<u8>,
}

/// Render every page and rebuild the document from the rasters.
///
/// `progress(done, total)` is called after each page, including skipped
/// ones; it is purely informational.
///
/// # Errors
///
/// - [`PdfError::PipelineExhausted`] if the document has no pages or every
///   page failed
/// - [`PdfError::Save`] if the rebuilt document cannot be serialized
pub fn rasterize_document<F>(
    renderer: &dyn PageRenderer,
    options: &CompressionOptions,
    mut progress: F,
) -> Result<RasterizedDocument, PdfError>
where
    F: FnMut(usize, usize),
{
    let total = renderer.page_count();
    let scale = options.level.render_scale();
    let quality = options.level.jpeg_quality();

    let mut pages = Vec::with_capacity(total);
    let mut skipped_pages = Vec::new();

    for index in 0..total {
        match rasterize_page(renderer, index, scale, quality, options) {
            Ok(page) => pages.push(page),
            Err(_) => skipped_pages.push(index),
        }
        progress(index + 1, total);
    }

    if pages.is_empty() {
        return Err(PdfError::PipelineExhausted);
    }

    let bytes = build_document(&pages)?;
    Ok(RasterizedDocument {
        bytes,
        skipped_pages,
    })
}

fn rasterize_page(
    renderer: &dyn PageRenderer,
    index: usize,
    scale: f64,
    quality: u8,
    options: &CompressionOptions,
) -> Result<RasterPage, PdfError> {
    let (width_pt, height_pt) = renderer.page_size(index)?;
    let (width_px, height_px) =
        target_pixels(width_pt, height_pt, scale, options.max_render_dimension);

    let mut image = renderer.render_page(index, width_px, height_px)?;

    if options.grayscale {
        desaturate(&mut image.pixels);
    }

    let jpeg = encode_jpeg(&image.pixels, image.width, image.height, quality)
        .map_err(|e| PdfError::Save(e.to_string()))?;

    Ok(RasterPage {
        width_pt,
        height_pt,
        width_px: image.width,
        height_px: image.height,
        jpeg,
    })
}

/// Target render size in pixels: points times the tier scale, proportionally
/// reduced so neither axis exceeds `max_dimension`.
fn target_pixels(width_pt: f64, height_pt: f64, scale: f64, max_dimension: u32) -> (u32, u32) {
    let mut width = width_pt * scale;
    let mut height = height_pt * scale;

    let largest = width.max(height);
    if largest > max_dimension as f64 && largest > 0.0 {
        let factor = max_dimension as f64 / largest;
        width *= factor;
        height *= factor;
    }

    ((width.round() as u32).max(1), (height.round() as u32).max(1))
}

/// Desaturate RGB pixels in place using Rec.601 luma weights (77/150/29,
/// fixed point over 256).
fn desaturate(pixels: &mut [u8]) {
    for px in pixels.chunks_exact_mut(3) {
        let luma =
            ((px[0] as u32 * 77 + px[1] as u32 * 150 + px[2] as u32 * 29) >> 8) as u8;
        px[0] = luma;
        px[1] = luma;
        px[2] = luma;
    }
}

/// Assemble a document where every page is a single full-page JPEG image.
fn build_document(pages: &[RasterPage]) -> Result<Vec<u8>, PdfError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in pages {
        let image_id = doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => page.width_px as i64,
                "Height" => page.height_px as i64,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
                "Filter" => "DCTDecode",
            },
            page.jpeg.clone(),
        ));

        // Draw the image scaled to fill the page
        let content = Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![
                        Object::Real(page.width_pt as f32),
                        0.into(),
                        0.into(),
                        Object::Real(page.height_pt as f32),
                        0.into(),
                        0.into(),
                    ],
                ),
                Operation::new("Do", vec![Object::Name(b"Im0".to_vec())]),
                Operation::new("Q", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().map_err(|e| PdfError::Save(e.to_string()))?,
        ));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                Object::Real(page.width_pt as f32),
                Object::Real(page.height_pt as f32),
            ],
            "Resources" => dictionary! {
                "XObject" => dictionary! { "Im0" => image_id },
            },
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| PdfError::Save(e.to_string()))?;
    Ok(bytes)
}
