//! Viewport fitting and device coordinate mapping.
//!
//! The background is fitted into the stage (the container it is shown in)
//! preserving its aspect ratio and centered. The fitted canvas is the
//! coordinate space of all annotations: device coordinates are translated
//! by the canvas offset and clamped to the canvas.

use std::fmt;

use scalemark_core::constants::{DEFAULT_STAGE_HEIGHT, DEFAULT_STAGE_WIDTH};

use crate::model::Point;

/// The fitted canvas inside the stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    stage_width: f64,
    stage_height: f64,
    left: f64,
    top: f64,
    canvas_width: u32,
    canvas_height: u32,
}

impl Viewport {
    /// Creates a viewport covering the whole stage, used before any
    /// background is loaded.
    pub fn new(stage_width: f64, stage_height: f64) -> Self {
        Self {
            stage_width,
            stage_height,
            left: 0.0,
            top: 0.0,
            canvas_width: pixel_extent(stage_width),
            canvas_height: pixel_extent(stage_height),
        }
    }

    /// Fits content of `natural_width` x `natural_height` into the stage.
    ///
    /// The content is scaled to the stage width first; if that is too tall
    /// it is scaled to the stage height instead. The canvas size is rounded
    /// to whole pixels and is never smaller than 1x1.
    pub fn fit(stage_width: f64, stage_height: f64, natural_width: f64, natural_height: f64) -> Self {
        let aspect = if natural_width > 0.0 && natural_height > 0.0 {
            natural_width / natural_height
        } else {
            1.0
        };

        let mut draw_width = stage_width;
        let mut draw_height = stage_width / aspect;
        if draw_height > stage_height {
            draw_height = stage_height;
            draw_width = stage_height * aspect;
        }

        Self {
            stage_width,
            stage_height,
            left: (stage_width - draw_width) / 2.0,
            top: (stage_height - draw_height) / 2.0,
            canvas_width: pixel_extent(draw_width),
            canvas_height: pixel_extent(draw_height),
        }
    }

    pub fn stage_width(&self) -> f64 {
        self.stage_width
    }

    pub fn stage_height(&self) -> f64 {
        self.stage_height
    }

    /// Offset of the canvas inside the stage.
    pub fn offset(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// Canvas size in whole pixels.
    pub fn canvas_size(&self) -> (u32, u32) {
        (self.canvas_width, self.canvas_height)
    }

    /// Maps a stage (device) position to canvas coordinates, clamped to the
    /// canvas so a pointer outside it lands on the nearest edge.
    pub fn device_to_canvas(&self, device: Point) -> Point {
        let x = device.x - self.left;
        let y = device.y - self.top;
        Point::new(
            x.clamp(0.0, self.canvas_width as f64),
            y.clamp(0.0, self.canvas_height as f64),
        )
    }

    /// Inverse of [`Viewport::device_to_canvas`] for points on the canvas.
    pub fn canvas_to_device(&self, canvas: Point) -> Point {
        Point::new(canvas.x + self.left, canvas.y + self.top)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(DEFAULT_STAGE_WIDTH, DEFAULT_STAGE_HEIGHT)
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Viewport(canvas={}x{}, offset=({:.1}, {:.1}), stage={}x{})",
            self.canvas_width, self.canvas_height, self.left, self.top, self.stage_width, self.stage_height
        )
    }
}

fn pixel_extent(value: f64) -> u32 {
    if value.is_finite() && value >= 1.0 {
        value.round() as u32
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_wide_image() {
        // 2:1 in a 1000x700 stage: width-bound.
        let vp = Viewport::fit(1000.0, 700.0, 2000.0, 1000.0);
        assert_eq!(vp.canvas_size(), (1000, 500));
        assert_eq!(vp.offset(), Point::new(0.0, 100.0));
    }

    #[test]
    fn test_fit_tall_image() {
        // 1:2 in a 1000x700 stage: height-bound.
        let vp = Viewport::fit(1000.0, 700.0, 500.0, 1000.0);
        assert_eq!(vp.canvas_size(), (350, 700));
        assert_eq!(vp.offset(), Point::new(325.0, 0.0));
    }

    #[test]
    fn test_fit_degenerate_sizes() {
        let vp = Viewport::fit(0.0, 0.0, 100.0, 100.0);
        assert_eq!(vp.canvas_size(), (1, 1));

        let vp = Viewport::fit(400.0, 400.0, 0.0, 0.0);
        assert_eq!(vp.canvas_size(), (400, 400));
    }

    #[test]
    fn test_device_mapping_clamps() {
        let vp = Viewport::fit(1000.0, 700.0, 2000.0, 1000.0);
        assert_eq!(vp.device_to_canvas(Point::new(10.0, 150.0)), Point::new(10.0, 50.0));
        assert_eq!(vp.device_to_canvas(Point::new(-5.0, 50.0)), Point::new(0.0, 0.0));
        assert_eq!(vp.device_to_canvas(Point::new(1200.0, 690.0)), Point::new(1000.0, 500.0));
        assert_eq!(vp.canvas_to_device(Point::new(10.0, 50.0)), Point::new(10.0, 150.0));
    }

    #[test]
    fn test_default_covers_stage() {
        let vp = Viewport::default();
        assert_eq!(vp.canvas_size(), (1000, 700));
        assert_eq!(vp.offset(), Point::new(0.0, 0.0));
    }
}
