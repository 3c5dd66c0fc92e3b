//! Background assets: images and paged documents shown under the overlay.
//!
//! Images decode through `image`; PDF documents go through [`PdfBackground`].
//!
//! Loading is the only step that may finish out of order. Each load takes
//! a [`LoadTicket`] from the [`BackgroundLoader`] and only the most recently
//! issued ticket may install its result.

use std::fmt;
use std::path::Path;

use image::imageops::{self, FilterType};
use image::RgbaImage;

use scalemark_core::AssetError;

mod pdf;

pub use pdf::{PageSize, PdfBackground};

/// Source of the background raster.
pub trait BackgroundProvider: fmt::Debug {
    /// Display name, usually the file name.
    fn name(&self) -> &str;

    /// Size of the current page in its own pixels.
    fn natural_size(&self) -> (u32, u32);

    fn page_count(&self) -> u32 {
        1
    }

    /// Current page, 1-based.
    fn page(&self) -> u32 {
        1
    }

    fn set_page(&mut self, page: u32) -> Result<(), AssetError>;

    /// Renders the current page scaled to exactly `width` x `height`.
    fn render(&self, width: u32, height: u32) -> Result<RgbaImage, AssetError>;
}

/// What a file is, judging by its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Image,
    Document,
    Unsupported,
}

impl AssetKind {
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "png" | "jpg" | "jpeg" | "gif" | "bmp" | "webp" => Self::Image,
            "pdf" => Self::Document,
            _ => Self::Unsupported,
        }
    }
}

/// One or more decoded raster pages.
#[derive(Debug, Clone)]
pub struct RasterBackground {
    name: String,
    pages: Vec<RgbaImage>,
    current: usize,
}

impl RasterBackground {
    /// Wraps already decoded pages. At least one page is required.
    pub fn from_pages(name: impl Into<String>, pages: Vec<RgbaImage>) -> Result<Self, AssetError> {
        let name = name.into();
        if pages.is_empty() {
            return Err(AssetError::DecodeFailed {
                name,
                reason: "no pages".to_string(),
            });
        }
        Ok(Self {
            name,
            pages,
            current: 0,
        })
    }

    pub fn from_image(name: impl Into<String>, image: RgbaImage) -> Self {
        Self {
            name: name.into(),
            pages: vec![image],
            current: 0,
        }
    }

    /// The current page at natural size.
    pub fn current_image(&self) -> &RgbaImage {
        &self.pages[self.current]
    }
}

impl BackgroundProvider for RasterBackground {
    fn name(&self) -> &str {
        &self.name
    }

    fn natural_size(&self) -> (u32, u32) {
        self.current_image().dimensions()
    }

    fn page_count(&self) -> u32 {
        self.pages.len() as u32
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
        let page = self.current_image();
        if page.dimensions() == (width, height) {
            return Ok(page.clone());
        }
        Ok(imageops::resize(page, width.max(1), height.max(1), FilterType::Triangle))
    }
}

pub(crate) fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn decode_image(path: &Path) -> Result<RgbaImage, AssetError> {
    let name = file_name(path);
    match AssetKind::from_path(path) {
        AssetKind::Image => {}
        AssetKind::Document => {
            return Err(AssetError::UnsupportedType {
                name: format!("{} (load documents on their own)", name),
            })
        }
        AssetKind::Unsupported => return Err(AssetError::UnsupportedType { name }),
    }
    let decoded = image::open(path).map_err(|e| AssetError::DecodeFailed {
        name,
        reason: e.to_string(),
    })?;
    Ok(decoded.to_rgba8())
}

/// Loads an image or a PDF document as the background.
pub fn load_background(path: &Path) -> Result<Box<dyn BackgroundProvider>, AssetError> {
    if AssetKind::from_path(path) == AssetKind::Document {
        return Ok(Box::new(PdfBackground::open(path)?));
    }
    let image = decode_image(path)?;
    tracing::info!(
        "Loaded background {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );
    Ok(Box::new(RasterBackground::from_image(file_name(path), image)))
}

/// Loads several image files as the pages of one paged background.
pub fn load_pages<P: AsRef<Path>>(paths: &[P]) -> Result<RasterBackground, AssetError> {
    let Some(first) = paths.first() else {
        return Err(AssetError::UnsupportedType {
            name: "(no files)".to_string(),
        });
    };
    let pages = paths
        .iter()
        .map(|p| decode_image(p.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;
    tracing::info!(
        "Loaded {} page(s) starting with {}",
        pages.len(),
        first.as_ref().display()
    );
    RasterBackground::from_pages(file_name(first.as_ref()), pages)
}

/// Proof that a load was started; compared against the loader's latest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Issues load tickets so only the newest load is installed.
#[derive(Debug, Clone, Default)]
pub struct BackgroundLoader {
    latest: u64,
}

impl BackgroundLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a load, superseding every earlier one.
    pub fn begin(&mut self) -> LoadTicket {
        self.latest += 1;
        LoadTicket(self.latest)
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.latest
    }

    /// Passes `result` through if `ticket` is still the latest load,
    /// otherwise reports it as superseded.
    pub fn accept<T>(&self, ticket: LoadTicket, result: Result<T, AssetError>) -> Result<T, AssetError> {
        if self.is_current(ticket) {
            result
        } else {
            tracing::debug!("Dropping superseded load {:?}", ticket);
            Err(AssetError::Superseded)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_asset_kind_by_extension() {
        assert_eq!(AssetKind::from_path(&PathBuf::from("plan.PNG")), AssetKind::Image);
        assert_eq!(AssetKind::from_path(&PathBuf::from("a.jpeg")), AssetKind::Image);
        assert_eq!(AssetKind::from_path(&PathBuf::from("doc.pdf")), AssetKind::Document);
        assert_eq!(AssetKind::from_path(&PathBuf::from("notes.txt")), AssetKind::Unsupported);
        assert_eq!(AssetKind::from_path(&PathBuf::from("noext")), AssetKind::Unsupported);
    }

    #[test]
    fn test_unsupported_files_are_rejected_before_reading() {
        let err = load_background(&PathBuf::from("missing.txt")).unwrap_err();
        assert!(matches!(err, AssetError::UnsupportedType { .. }));
    }

    #[test]
    fn test_missing_document_fails_to_decode() {
        let err = load_background(&PathBuf::from("/nonexistent/plan.pdf")).unwrap_err();
        assert!(matches!(err, AssetError::DecodeFailed { .. }));
    }

    #[test]
    fn test_documents_are_not_image_pages() {
        let err = load_pages(&[PathBuf::from("b.pdf"), PathBuf::from("a.png")]).unwrap_err();
        assert!(matches!(err, AssetError::UnsupportedType { .. }));
    }

    #[test]
    fn test_missing_image_fails_to_decode() {
        let err = load_background(&PathBuf::from("/nonexistent/plan.png")).unwrap_err();
        assert!(matches!(err, AssetError::DecodeFailed { .. }));
    }

    #[test]
    fn test_pages() {
        let pages = vec![RgbaImage::new(4, 2), RgbaImage::new(3, 3)];
        let mut bg = RasterBackground::from_pages("doc", pages).unwrap();
        assert_eq!(bg.page_count(), 2);
        assert_eq!(bg.natural_size(), (4, 2));

        bg.set_page(2).unwrap();
        assert_eq!(bg.page(), 2);
        assert_eq!(bg.natural_size(), (3, 3));

        assert!(matches!(
            bg.set_page(3),
            Err(AssetError::PageOutOfRange { page: 3, count: 2 })
        ));
        assert_eq!(bg.page(), 2);
    }

    #[test]
    fn test_render_scales_to_request() {
        let bg = RasterBackground::from_image("img", RgbaImage::new(40, 20));
        let out = bg.render(20, 10).unwrap();
        assert_eq!(out.dimensions(), (20, 10));
    }

    #[test]
    fn test_last_started_load_wins() {
        let mut loader = BackgroundLoader::new();
        let first = loader.begin();
        let second = loader.begin();

        assert!(matches!(loader.accept(first, Ok(1)), Err(AssetError::Superseded)));
        assert_eq!(loader.accept(second, Ok(2)).unwrap(), 2);
    }
}
