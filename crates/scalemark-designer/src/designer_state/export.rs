//! PNG and SVG export for designer state.

use std::path::Path;

use image::RgbaImage;

use scalemark_core::ExportError;

use super::DesignerState;
use crate::renderer::{flatten, write_png};
use crate::svg_renderer::render_svg;

impl DesignerState {
    /// Flattens the background and the current overlay into one image.
    pub fn export_image(&self) -> Result<RgbaImage, ExportError> {
        let background = self
            .rendered_background
            .as_ref()
            .ok_or(ExportError::NoBackground)?;
        flatten(background, &self.scene, &self.export_options)
    }

    /// Writes the flattened view as a PNG file.
    pub fn export_png(&self, path: &Path) -> Result<(), ExportError> {
        let image = self.export_image()?;
        write_png(&image, path)
    }

    /// The current overlay as an SVG document sized to the canvas.
    pub fn export_svg(&self) -> String {
        let (width, height) = self.viewport.canvas_size();
        render_svg(&self.scene, width, height, self.export_options.theme)
    }
}
