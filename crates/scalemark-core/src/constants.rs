//! Interaction and geometry constants shared across crates.
//!
//! All distances are in background-pixel units.

/// Minimum edge length of any square or rectangle.
pub const MIN_SHAPE_SIZE: f64 = 6.0;

/// Pointer travel required before a pending move becomes a real move.
pub const DRAG_THRESHOLD: f64 = 3.0;

/// Calibration segments shorter than this are treated as accidental clicks.
pub const MIN_CALIBRATION_LENGTH: f64 = 3.0;

/// Radius around a handle center that counts as a hit.
pub const HANDLE_HIT_RADIUS: f64 = 8.0;

/// Drawn radius of a move handle on an unselected shape.
pub const MOVE_HANDLE_RADIUS: f64 = 5.0;

/// Drawn radius of a move handle on the selected shape.
pub const MOVE_HANDLE_RADIUS_SELECTED: f64 = 7.0;

/// Drawn radius of corner handles.
pub const CORNER_HANDLE_RADIUS: f64 = 6.0;

/// Drawn radius of width/height edge handles.
pub const EDGE_HANDLE_RADIUS: f64 = 5.0;

/// Corner rounding used for shape outlines.
pub const OUTLINE_CORNER_RADIUS: f64 = 8.0;

/// Vertical gap between a shape's top edge and its label baseline.
pub const LABEL_OFFSET: f64 = 6.0;

/// Vertical gap between a calibration guide midpoint and its label.
pub const GUIDE_LABEL_OFFSET: f64 = 8.0;

/// Label text size in pixels.
pub const LABEL_FONT_SIZE: f64 = 12.0;

/// Width of the halo stroked behind label text.
pub const LABEL_HALO_WIDTH: f64 = 3.0;

/// Stage size used before any configuration is applied.
pub const DEFAULT_STAGE_WIDTH: f64 = 1000.0;
pub const DEFAULT_STAGE_HEIGHT: f64 = 700.0;
