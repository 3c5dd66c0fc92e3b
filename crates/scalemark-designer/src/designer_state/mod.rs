//! Designer state: the session context that owns every piece of state.
//! Routes device input into the canvas and keeps the overlay scene current.
//!
//! This module is split into submodules for better organization:
//! - `pointer`: Pointer events and calibration prompts
//! - `shapes`: Deletion and keyboard shortcuts
//! - `assets`: Background loading, pagination and stage resizing
//! - `export`: PNG and SVG export

mod assets;
mod export;
mod pointer;
mod shapes;

use image::RgbaImage;

use scalemark_core::constants::{DEFAULT_STAGE_HEIGHT, DEFAULT_STAGE_WIDTH};
use scalemark_core::Theme;

use crate::background::{BackgroundLoader, BackgroundProvider};
use crate::calibration::Calibration;
use crate::canvas::{Canvas, ToolMode};
use crate::overlay::{render_overlay, OverlayScene};
use crate::renderer::ExportOptions;
use crate::viewport::Viewport;

/// Default text offered by the real-length prompt.
pub const DEFAULT_LENGTH_HINT: &str = "1m";

/// Designer state for UI integration
#[derive(Debug)]
pub struct DesignerState {
    pub canvas: Canvas,
    pub calibration: Calibration,
    pub export_options: ExportOptions,
    /// Text pre-filled in the real-length prompt.
    pub length_hint: String,
    viewport: Viewport,
    background: Option<Box<dyn BackgroundProvider>>,
    /// Current page rendered at canvas size.
    rendered_background: Option<RgbaImage>,
    loader: BackgroundLoader,
    scene: OverlayScene,
    status: Option<String>,
}

impl DesignerState {
    /// Creates a new designer state for a stage of the given size.
    pub fn new(stage_width: f64, stage_height: f64) -> Self {
        Self {
            canvas: Canvas::new(),
            calibration: Calibration::new(),
            export_options: ExportOptions::default(),
            length_hint: DEFAULT_LENGTH_HINT.to_string(),
            viewport: Viewport::new(stage_width, stage_height),
            background: None,
            rendered_background: None,
            loader: BackgroundLoader::new(),
            scene: OverlayScene::default(),
            status: None,
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Overlay as of the last event.
    pub fn scene(&self) -> &OverlayScene {
        &self.scene
    }

    /// Last status message (deletions, calibration results, load errors).
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn background(&self) -> Option<&dyn BackgroundProvider> {
        self.background.as_deref()
    }

    pub fn rendered_background(&self) -> Option<&RgbaImage> {
        self.rendered_background.as_ref()
    }

    pub fn mode(&self) -> ToolMode {
        self.canvas.mode()
    }

    /// Hint text for the current mode.
    pub fn hint(&self) -> &'static str {
        self.canvas.mode().hint()
    }

    /// Sets the tool mode directly.
    pub fn set_mode(&mut self, mode: ToolMode) {
        self.canvas.set_mode(mode);
    }

    /// Presses a tool button. Pressing the armed tool again returns to idle.
    pub fn toggle_mode(&mut self, mode: ToolMode) -> ToolMode {
        self.canvas.toggle_mode(mode)
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.export_options.theme = theme;
    }

    pub(crate) fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    /// Re-derives the overlay from the model.
    pub(crate) fn redraw(&mut self) {
        self.scene = render_overlay(
            &self.canvas.shape_store,
            self.canvas.gesture(),
            &self.calibration,
        );
    }
}

impl Default for DesignerState {
    fn default() -> Self {
        Self::new(DEFAULT_STAGE_WIDTH, DEFAULT_STAGE_HEIGHT)
    }
}
