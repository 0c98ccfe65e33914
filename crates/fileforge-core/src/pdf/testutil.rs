//! Shared fixtures for the pdf module tests: in-memory document builders
//! and configurable mock renderers.

use super::{PageRenderer, RenderError};
use crate::decode::DecodedImage;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use std::cell::RefCell;

/// Build a one-page PDF whose content stream is saved uncompressed, so the
/// lossless pass has something to gain. More operations means a bigger,
/// more compressible file.
pub fn uncompressed_pdf(operation_count: usize) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut operations = vec![Operation::new("BT", vec![])];
    for i in 0..operation_count {
        operations.push(Operation::new(
            "Td",
            vec![Object::Real(i as f32), Object::Real(700.0)],
        ));
    }
    operations.push(Operation::new("ET", vec![]));
    let content = Content { operations };

    let content_id = doc.add_object(Stream::new(
        dictionary! {},
        content.encode().expect("content encodes"),
    ));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        "Contents" => content_id,
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("pdf saves");
    bytes
}

/// Build a multi-page PDF carrying `payload_size` bytes of pseudo-random
/// (incompressible) stream data, so the lossless pass gains nothing.
pub fn incompressible_pdf(page_count: usize, payload_size: usize) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    // xorshift-style junk; Flate cannot shrink this
    let mut state = 0x2545F4914F6CDD1Du64;
    let payload: Vec<u8> = (0..payload_size)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state & 0xFF) as u8
        })
        .collect();
    let payload_id = doc.add_object(Stream::new(
        dictionary! { "Filter" => "DCTDecode" },
        payload,
    ));

    let mut kids = Vec::new();
    for _ in 0..page_count {
        let content = Content {
            operations: vec![Operation::new("BT", vec![]), Operation::new("ET", vec![])],
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("content encodes"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            "Resources" => dictionary! {
                "XObject" => dictionary! { "Im0" => payload_id },
            },
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count as i64,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("pdf saves");
    bytes
}

/// Build a PDF whose trailer carries an Encrypt entry, the way
/// password-protected documents do. `is_encrypted()` keys on the trailer
/// entry being an indirect reference, so the dictionary is registered as an
/// object and referenced rather than inlined.
pub fn encrypted_pdf() -> Vec<u8> {
    let mut doc = Document::load_mem(&uncompressed_pdf(10)).expect("fixture parses");

    let encrypt_id = doc.add_object(dictionary! {
        "Filter" => "Standard",
        "V" => 1,
        "R" => 2,
    });
    doc.trailer.set("Encrypt", encrypt_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("pdf saves");
    bytes
}

/// Mock page renderer: fixed page size, flat gray pages, with configurable
/// per-page failures and a render-call log.
pub struct MockRenderer {
    pub page_count: usize,
    /// Page size in points, shared by all pages.
    pub page_size: (f64, f64),
    /// Pages whose `render_page` fails.
    pub failing_pages: Vec<usize>,
    /// Pixel value all rendered pages are filled with. A flat fill keeps
    /// the JPEGs tiny; tests that need large output raise `noise`.
    pub fill: u8,
    /// Fill pages with per-pixel noise instead of a flat color, making the
    /// JPEG output large.
    pub noise: bool,
    /// (index, width_px, height_px) for every render call.
    pub render_calls: RefCell<Vec<(usize, u32, u32)>>,
}

impl MockRenderer {
    pub fn new(page_count: usize) -> Self {
        Self {
            page_count,
            page_size: (612.0, 792.0),
            failing_pages: Vec::new(),
            fill: 200,
            noise: false,
            render_calls: RefCell::new(Vec::new()),
        }
    }
}

impl PageRenderer for MockRenderer {
    fn page_count(&self) -> usize {
        self.page_count
    }

    fn page_size(&self, index: usize) -> Result<(f64, f64), RenderError> {
        if index >= self.page_count {
            return Err(RenderError::OutOfBounds(index));
        }
        Ok(self.page_size)
    }

    fn render_page(
        &self,
        index: usize,
        width_px: u32,
        height_px: u32,
    ) -> Result<DecodedImage, RenderError> {
        self.render_calls
            .borrow_mut()
            .push((index, width_px, height_px));

        if index >= self.page_count {
            return Err(RenderError::OutOfBounds(index));
        }
        if self.failing_pages.contains(&index) {
            return Err(RenderError::Page {
                index,
                reason: "simulated failure".to_string(),
            });
        }

        let len = (width_px as usize) * (height_px as usize) * 3;
        let pixels = if self.noise {
            (0..len).map(|i| ((i * 31 + index * 7) % 256) as u8).collect()
        } else {
            vec![self.fill; len]
        };
        Ok(DecodedImage::new(width_px, height_px, pixels))
    }
}
