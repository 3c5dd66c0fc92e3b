//! PDF documents as paged backgrounds.
//!
//! Page geometry is read with lopdf. With the `pdfium` feature, page
//! content is rasterised by a pdfium library bound at render time. Without
//! it, or when no library can be bound, a page renders as a blank sheet of
//! its true proportions.

use std::fmt;
use std::path::Path;

use image::{Rgba, RgbaImage};
use lopdf::{Document, Object, ObjectId};

use scalemark_core::AssetError;

use super::{file_name, BackgroundProvider};

/// US Letter, for pages without a usable MediaBox.
const DEFAULT_PAGE_SIZE: PageSize = PageSize {
    width_pt: 612.0,
    height_pt: 792.0,
};

/// Page tree levels searched for inherited attributes.
const MAX_INHERIT_DEPTH: usize = 32;

const PAPER: Rgba<u8> = Rgba([255, 255, 255, 255]);
const FRAME: Rgba<u8> = Rgba([220, 220, 220, 255]);

/// Displayed page size in points, after rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width_pt: f32,
    pub height_pt: f32,
}

impl PageSize {
    /// Size in background pixels at one pixel per point, at least 1x1.
    pub fn pixels(&self) -> (u32, u32) {
        (
            self.width_pt.round().max(1.0) as u32,
            self.height_pt.round().max(1.0) as u32,
        )
    }
}

/// A PDF document shown one page at a time.
pub struct PdfBackground {
    name: String,
    bytes: Vec<u8>,
    page_sizes: Vec<PageSize>,
    current: usize,
}

impl fmt::Debug for PdfBackground {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PdfBackground")
            .field("name", &self.name)
            .field("bytes", &self.bytes.len())
            .field("pages", &self.page_sizes.len())
            .field("current", &self.current)
            .finish()
    }
}

impl PdfBackground {
    /// Reads and parses the document at `path`.
    pub fn open(path: &Path) -> Result<Self, AssetError> {
        let name = file_name(path);
        let bytes = std::fs::read(path).map_err(|e| AssetError::DecodeFailed {
            name: name.clone(),
            reason: e.to_string(),
        })?;
        let background = Self::from_bytes(name, bytes)?;
        tracing::info!(
            "Loaded document {} ({} page(s))",
            path.display(),
            background.page_sizes.len()
        );
        Ok(background)
    }

    /// Parses an in-memory document. The first page is current.
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, AssetError> {
        let name = name.into();
        let page_sizes = parse_page_sizes(&bytes).map_err(|reason| AssetError::DecodeFailed {
            name: name.clone(),
            reason,
        })?;
        Ok(Self {
            name,
            bytes,
            page_sizes,
            current: 0,
        })
    }

    pub fn page_sizes(&self) -> &[PageSize] {
        &self.page_sizes
    }

    fn current_size(&self) -> PageSize {
        self.page_sizes
            .get(self.current)
            .copied()
            .unwrap_or(DEFAULT_PAGE_SIZE)
    }

    #[cfg(feature = "pdfium")]
    fn rasterize(&self, width: u32, height: u32) -> Option<RgbaImage> {
        match pdfium::render_page(&self.bytes, self.current, width, height) {
            Ok(image) => Some(image),
            Err(reason) => {
                tracing::warn!(
                    "pdfium could not render {} page {}: {}",
                    self.name,
                    self.current + 1,
                    reason
                );
                None
            }
        }
    }

    #[cfg(not(feature = "pdfium"))]
    fn rasterize(&self, _width: u32, _height: u32) -> Option<RgbaImage> {
        None
    }
}

impl BackgroundProvider for PdfBackground {
    fn name(&self) -> &str {
        &self.name
    }

    fn natural_size(&self) -> (u32, u32) {
        self.current_size().pixels()
    }

    fn page_count(&self) -> u32 {
        self.page_sizes.len() as u32
    }

    fn page(&self) -> u32 {
        self.current as u32 + 1
    }

    fn set_page(&mut self, page: u32) -> Result<(), AssetError> {
        let count = self.page_count();
        if page == 0 || page > count {
            return Err(AssetError::PageOutOfRange { page, count });
        }
        self.current = (page - 1) as usize;
        Ok(())
    }

    fn render(&self, width: u32, height: u32) -> Result<RgbaImage, AssetError> {
        let (width, height) = (width.max(1), height.max(1));
        Ok(self
            .rasterize(width, height)
            .unwrap_or_else(|| blank_page(width, height)))
    }
}

fn parse_page_sizes(bytes: &[u8]) -> Result<Vec<PageSize>, String> {
    if bytes.windows(b"/Encrypt".len()).any(|w| w == b"/Encrypt") {
        return Err("encrypted documents are not supported".to_string());
    }
    let doc = Document::load_mem(bytes).map_err(|e| e.to_string())?;
    let sizes: Vec<PageSize> = doc
        .get_pages()
        .values()
        .map(|&id| page_size(&doc, id))
        .collect();
    if sizes.is_empty() {
        return Err("document has no pages".to_string());
    }
    Ok(sizes)
}

/// Looks `key` up on the page, then up its ancestors in the page tree.
fn inherited<'a>(doc: &'a Document, page: ObjectId, key: &[u8]) -> Option<&'a Object> {
    let mut id = page;
    for _ in 0..MAX_INHERIT_DEPTH {
        let dict = doc.get_dictionary(id).ok()?;
        if let Ok(value) = dict.get(key) {
            return Some(value);
        }
        id = dict.get(b"Parent").ok()?.as_reference().ok()?;
    }
    None
}

fn resolve<'a>(doc: &'a Document, object: &'a Object) -> &'a Object {
    match object.as_reference() {
        Ok(id) => doc.get_object(id).unwrap_or(object),
        Err(_) => object,
    }
}

fn page_size(doc: &Document, page: ObjectId) -> PageSize {
    let media_box = inherited(doc, page, b"MediaBox")
        .and_then(|object| resolve(doc, object).as_array().ok())
        .and_then(|array| {
            let [x0, y0, x1, y1] = array.as_slice() else {
                return None;
            };
            Some(PageSize {
                width_pt: (x1.as_float().ok()? - x0.as_float().ok()?).abs(),
                height_pt: (y1.as_float().ok()? - y0.as_float().ok()?).abs(),
            })
        })
        .filter(|size| size.width_pt > 0.0 && size.height_pt > 0.0)
        .unwrap_or(DEFAULT_PAGE_SIZE);

    let rotate = inherited(doc, page, b"Rotate")
        .and_then(|object| object.as_i64().ok())
        .unwrap_or(0);
    if rotate.rem_euclid(180) == 90 {
        PageSize {
            width_pt: media_box.height_pt,
            height_pt: media_box.width_pt,
        }
    } else {
        media_box
    }
}

/// White sheet with a light grey frame.
fn blank_page(width: u32, height: u32) -> RgbaImage {
    let mut image = RgbaImage::from_pixel(width, height, PAPER);
    if width >= 4 && height >= 4 {
        for x in 0..width {
            image.put_pixel(x, 0, FRAME);
            image.put_pixel(x, height - 1, FRAME);
        }
        for y in 0..height {
            image.put_pixel(0, y, FRAME);
            image.put_pixel(width - 1, y, FRAME);
        }
    }
    image
}

#[cfg(feature = "pdfium")]
mod pdfium {
    use image::imageops::{self, FilterType};
    use image::RgbaImage;
    use pdfium_render::prelude::*;

    fn bind() -> Result<Pdfium, PdfiumError> {
        let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library())?;
        Ok(Pdfium::new(bindings))
    }

    pub(super) fn render_page(
        bytes: &[u8],
        index: usize,
        width: u32,
        height: u32,
    ) -> Result<RgbaImage, String> {
        let pdfium = bind().map_err(|e| e.to_string())?;
        let document = pdfium
            .load_pdf_from_byte_slice(bytes, None)
            .map_err(|e| e.to_string())?;
        let index = PdfPageIndex::try_from(index).map_err(|e| e.to_string())?;
        let page = document.pages().get(index).map_err(|e| e.to_string())?;

        let config = PdfRenderConfig::new()
            .set_target_width(width as i32)
            .set_target_height(height as i32);
        let bitmap = page.render_with_config(&config).map_err(|e| e.to_string())?;
        let rendered = RgbaImage::from_raw(
            bitmap.width() as u32,
            bitmap.height() as u32,
            bitmap.as_rgba_bytes().to_vec(),
        )
        .ok_or_else(|| "bitmap size does not match its pixel data".to_string())?;

        if rendered.dimensions() == (width, height) {
            Ok(rendered)
        } else {
            Ok(imageops::resize(&rendered, width, height, FilterType::Triangle))
        }
    }
}
