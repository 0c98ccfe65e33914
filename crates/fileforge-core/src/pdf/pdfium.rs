//! Native page rendering through Pdfium.
//!
//! Available behind the `pdfium` feature; requires the Pdfium shared
//! library to be installed on the system. The binding is owned by
//! [`PdfiumCompressor`] and passed where it is needed, so library
//! initialization happens once per handle rather than through a global.

use super::{PageRenderer, RenderError};
use crate::decode::DecodedImage;
use pdfium_render::prelude::*;

/// Owns the Pdfium library binding.
pub struct PdfiumCompressor {
    pdfium: Pdfium,
}

impl PdfiumCompressor {
    /// Bind to the system Pdfium library.
    pub fn init() -> Result<Self, RenderError> {
        let bindings =
            Pdfium::bind_to_system_library().map_err(|e| RenderError::Init(e.to_string()))?;
        Ok(Self {
            pdfium: Pdfium::new(bindings),
        })
    }

    /// Open a document for rendering. The returned handle borrows both the
    /// binding and the input bytes.
    pub fn open<'a>(&'a self, bytes: &'a [u8]) -> Result<PdfiumPages<'a>, RenderError> {
        let document = self
            .pdfium
            .load_pdf_from_byte_slice(bytes, None)
            .map_err(|e| RenderError::Open(e.to_string()))?;
        Ok(PdfiumPages { document })
    }
}

/// A loaded document exposing its pages through [`PageRenderer`].
pub struct PdfiumPages<'a> {
    document: PdfDocument<'a>,
}

impl PageRenderer for PdfiumPages<'_> {
    fn page_count(&self) -> usize {
        self.document.pages().len() as usize
    }

    fn page_size(&self, index: usize) -> Result<(f64, f64), RenderError> {
        let page = self
            .document
            .pages()
            .get(index as u16)
            .map_err(|_| RenderError::OutOfBounds(index))?;
        Ok((page.width().value as f64, page.height().value as f64))
    }

    fn render_page(
        &self,
        index: usize,
        width_px: u32,
        height_px: u32,
    ) -> Result<DecodedImage, RenderError> {
        let page = self
            .document
            .pages()
            .get(index as u16)
            .map_err(|_| RenderError::OutOfBounds(index))?;

        let bitmap = page
            .render_with_config(
                &PdfRenderConfig::new()
                    .set_target_width(width_px as i32)
                    .set_target_height(height_px as i32),
            )
            .map_err(|e| RenderError::Page {
                index,
                reason: e.to_string(),
            })?;

        let rgb = bitmap.as_image().to_rgb8();
        Ok(DecodedImage::from_rgb_image(rgb))
    }
}
