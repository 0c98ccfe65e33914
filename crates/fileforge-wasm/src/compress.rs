//! PDF compression WASM bindings.
//!
//! Rasterized compression needs rendered page bitmaps, and in the browser
//! those come from the JS side: pdf.js renders each page (at the scale for
//! the chosen compression level) and hands the bitmaps over through
//! [`JsRenderedPages`]. The smart pipeline then runs entirely in WASM, with
//! the same strategy selection and size guarantees as the native path.

use crate::types::JsDecodedImage;
use fileforge_core::decode::DecodedImage;
use fileforge_core::pdf::{
    self, CompressionOptions, PageRenderer, RenderError, Strategy,
};
use wasm_bindgen::prelude::*;

/// Pre-rendered page bitmaps supplied by the JS side.
///
/// ```typescript
/// const pages = new JsRenderedPages();
/// for (const page of pdfJsPages) {
///   pages.add_page(page.widthPt, page.heightPt, renderToImage(page));
/// }
/// ```
#[wasm_bindgen]
#[derive(Default)]
pub struct JsRenderedPages {
    pages: Vec<RenderedPage>,
}

struct RenderedPage {
    width_pt: f64,
    height_pt: f64,
    image: DecodedImage,
}

#[wasm_bindgen]
impl JsRenderedPages {
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsRenderedPages {
        JsRenderedPages::default()
    }

    /// Append a page. `width_pt`/`height_pt` are the page's PDF point
    /// dimensions; `image` is its rendered bitmap.
    pub fn add_page(&mut self, width_pt: f64, height_pt: f64, image: &JsDecodedImage) {
        self.pages.push(RenderedPage {
            width_pt,
            height_pt,
            image: image.to_decoded(),
        });
    }

    #[wasm_bindgen(getter)]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

impl PageRenderer for JsRenderedPages {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_size(&self, index: usize) -> Result<(f64, f64), RenderError> {
        let page = self
            .pages
            .get(index)
            .ok_or(RenderError::OutOfBounds(index))?;
        Ok((page.width_pt, page.height_pt))
    }

    fn render_page(
        &self,
        index: usize,
        _width_px: u32,
        _height_px: u32,
    ) -> Result<DecodedImage, RenderError> {
        // Pages arrive pre-rendered; the bitmap's own dimensions are used
        // instead of the requested ones
        let page = self
            .pages
            .get(index)
            .ok_or(RenderError::OutOfBounds(index))?;
        if page.image.is_empty() {
            return Err(RenderError::Page {
                index,
                reason: "empty page bitmap".to_string(),
            });
        }
        Ok(page.image.clone())
    }
}

/// Result of [`compress_pdf_smart`].
#[wasm_bindgen]
pub struct JsCompressed {
    bytes: Vec<u8>,
    strategy: Strategy,
    skipped_pages: Vec<u32>,
}

#[wasm_bindgen]
impl JsCompressed {
    /// The compressed document, never larger than the input.
    #[wasm_bindgen(getter)]
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    /// Which strategy won: `"original"`, `"lossless"`, or `"rasterized"`.
    #[wasm_bindgen(getter)]
    pub fn strategy(&self) -> String {
        match self.strategy {
            Strategy::Original => "original",
            Strategy::Lossless => "lossless",
            Strategy::Rasterized => "rasterized",
        }
        .to_string()
    }

    /// Zero-based indices of pages dropped during rasterization.
    #[wasm_bindgen(getter)]
    pub fn skipped_pages(&self) -> Vec<u32> {
        self.skipped_pages.clone()
    }
}

/// Losslessly recompress a PDF's streams.
///
/// Content is untouched; text stays selectable. The output can be larger
/// than the input for already well-compressed files - use
/// [`compress_pdf_smart`] for the size guarantee.
#[wasm_bindgen]
pub fn compress_pdf_lossless(bytes: &[u8]) -> Result<Vec<u8>, JsValue> {
    pdf::compress_lossless(bytes).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Compress a PDF, choosing the smallest of {original, lossless,
/// rasterized}.
///
/// # Arguments
///
/// * `bytes` - The source document
/// * `pages` - Pre-rendered page bitmaps (only consulted when the lossless
///   pass is not good enough)
/// * `options` - A `CompressionOptions`-shaped JS object, e.g.
///   `{ level: "medium", grayscale: false }`; pass `undefined` for defaults
/// * `progress` - Optional `(done, total)` callback during rasterization
#[wasm_bindgen]
pub fn compress_pdf_smart(
    bytes: &[u8],
    pages: &JsRenderedPages,
    options: JsValue,
    progress: Option<js_sys::Function>,
) -> Result<JsCompressed, JsValue> {
    let options: CompressionOptions = if options.is_undefined() || options.is_null() {
        CompressionOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options).map_err(|e| JsValue::from_str(&e.to_string()))?
    };

    let report = |done: usize, total: usize| {
        if let Some(callback) = &progress {
            let _ = callback.call2(
                &JsValue::NULL,
                &JsValue::from(done as u32),
                &JsValue::from(total as u32),
            );
        }
    };

    let result = pdf::compress_smart(bytes, pages, &options, report)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    Ok(JsCompressed {
        bytes: result.bytes,
        strategy: result.strategy,
        skipped_pages: result.skipped_pages.iter().map(|&i| i as u32).collect(),
    })
}

/// Extract pages from a PDF using a 1-based range expression like
/// `"1-3,5"`, returning a new document containing only those pages.
#[wasm_bindgen]
pub fn extract_pdf_pages(bytes: &[u8], ranges: &str) -> Result<Vec<u8>, JsValue> {
    pdf::extract_pages(bytes, ranges).map_err(|e| JsValue::from_str(&e.to_string()))
}
