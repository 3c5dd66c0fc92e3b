//! Background loading, pagination and stage resizing for designer state.

use std::path::Path;

use scalemark_core::AssetError;

use super::DesignerState;
use crate::background::{load_background, load_pages, BackgroundProvider, LoadTicket};
use crate::canvas::ToolMode;
use crate::viewport::Viewport;

impl DesignerState {
    /// Starts a background load. Any load started earlier can no longer
    /// install its result.
    pub fn begin_background_load(&mut self) -> LoadTicket {
        self.loader.begin()
    }

    /// Installs the result of the load identified by `ticket`.
    ///
    /// Failed or superseded loads leave the current background, viewport
    /// and shapes untouched. A successful load re-fits the viewport and
    /// returns to idle mode.
    pub fn finish_background_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Box<dyn BackgroundProvider>, AssetError>,
    ) -> Result<(), AssetError> {
        let provider = match self.loader.accept(ticket, result) {
            Ok(provider) => provider,
            Err(AssetError::Superseded) => return Err(AssetError::Superseded),
            Err(err) => {
                tracing::warn!("Background load failed: {}", err);
                self.set_status(err.to_string());
                return Err(err);
            }
        };

        let (viewport, rendered) = self.fit(provider.as_ref())?;
        tracing::info!("Installed background {} ({})", provider.name(), viewport);
        self.background = Some(provider);
        self.viewport = viewport;
        self.rendered_background = Some(rendered);
        self.canvas.set_mode(ToolMode::Idle);
        self.redraw();
        Ok(())
    }

    /// Loads an image or PDF file as the background.
    pub fn load_background_file(&mut self, path: &Path) -> Result<(), AssetError> {
        let ticket = self.begin_background_load();
        let result = load_background(path);
        self.finish_background_load(ticket, result)
    }

    /// Loads several image files as the pages of one background.
    pub fn load_background_pages<P: AsRef<Path>>(&mut self, paths: &[P]) -> Result<(), AssetError> {
        let ticket = self.begin_background_load();
        let result = load_pages(paths).map(|bg| Box::new(bg) as Box<dyn BackgroundProvider>);
        self.finish_background_load(ticket, result)
    }

    /// Goes to the next page. Returns `false` on the last page or without
    /// a paged background.
    pub fn next_page(&mut self) -> Result<bool, AssetError> {
        match self.background.as_ref() {
            Some(bg) if bg.page() < bg.page_count() => {
                let page = bg.page() + 1;
                self.show_page(page)
            }
            _ => Ok(false),
        }
    }

    /// Goes to the previous page. Returns `false` on the first page.
    pub fn prev_page(&mut self) -> Result<bool, AssetError> {
        match self.background.as_ref() {
            Some(bg) if bg.page() > 1 => {
                let page = bg.page() - 1;
                self.show_page(page)
            }
            _ => Ok(false),
        }
    }

    fn show_page(&mut self, page: u32) -> Result<bool, AssetError> {
        let Some(mut provider) = self.background.take() else {
            return Ok(false);
        };
        let previous = provider.page();
        let result = provider
            .set_page(page)
            .and_then(|_| self.fit(provider.as_ref()));
        match result {
            Ok((viewport, rendered)) => {
                tracing::debug!("Showing page {}/{}", page, provider.page_count());
                self.background = Some(provider);
                self.viewport = viewport;
                self.rendered_background = Some(rendered);
                self.redraw();
                Ok(true)
            }
            Err(err) => {
                // Restore the page that was showing; it rendered before.
                if provider.set_page(previous).is_err() {
                    tracing::warn!("Could not return to page {}", previous);
                }
                self.background = Some(provider);
                self.set_status(err.to_string());
                Err(err)
            }
        }
    }

    /// The stage (container) changed size; re-fit the background.
    pub fn resize_stage(&mut self, width: f64, height: f64) -> Result<(), AssetError> {
        let Some(provider) = self.background.as_deref() else {
            self.viewport = Viewport::new(width, height);
            return Ok(());
        };
        let (natural_width, natural_height) = provider.natural_size();
        let viewport = Viewport::fit(width, height, natural_width as f64, natural_height as f64);
        let (canvas_width, canvas_height) = viewport.canvas_size();
        let rendered = provider.render(canvas_width, canvas_height)?;
        self.viewport = viewport;
        self.rendered_background = Some(rendered);
        self.redraw();
        Ok(())
    }

    /// Viewport and rendered page for `provider` in the current stage.
    fn fit(
        &self,
        provider: &dyn BackgroundProvider,
    ) -> Result<(Viewport, image::RgbaImage), AssetError> {
        let (natural_width, natural_height) = provider.natural_size();
        let viewport = Viewport::fit(
            self.viewport.stage_width(),
            self.viewport.stage_height(),
            natural_width as f64,
            natural_height as f64,
        );
        let (canvas_width, canvas_height) = viewport.canvas_size();
        let rendered = provider.render(canvas_width, canvas_height)?;
        Ok((viewport, rendered))
    }
}
