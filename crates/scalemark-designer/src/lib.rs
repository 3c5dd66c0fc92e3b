//! # ScaleMark Designer
//!
//! Interactive measurement annotations over a background image: calibrate a
//! pixel-to-meter scale from a reference segment, then draw, select, move
//! and resize squares and rectangles whose sizes are reported in real units.
//!
//! ## Core Components
//!
//! - **Model**: Squares, rectangles, points and bounds
//! - **Shape Store**: Owns the shapes and enforces the size floor and single selection
//! - **Hit Test**: Handle and body hit testing
//! - **Canvas**: Tool mode plus the pointer gesture state machine
//! - **Calibration**: Meters-per-pixel from a drawn segment and a prompt answer
//! - **Overlay**: Scene of outlines, labels, handles and guides rebuilt after every event
//! - **Viewport**: Fits the background into the stage and maps device coordinates
//! - **Background**: Image pages, PDF documents and the "last load wins" loader
//! - **Export**: tiny-skia PNG flattening with rasterised labels, and SVG serialisation
//!
//! ## Architecture
//!
//! ```text
//! DesignerState (session context)
//!   ├── Viewport (device -> canvas mapping)
//!   ├── Canvas
//!   │     ├── ShapeStore (geometry)
//!   │     ├── ActiveGesture
//!   │     └── ToolMode
//!   ├── Calibration
//!   ├── Background (provider + loader)
//!   └── OverlayScene (derived)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use scalemark_designer::{DesignerState, Point, ToolMode};
//!
//! let mut state = DesignerState::default();
//! state.set_mode(ToolMode::Rect);
//! state.pointer_down(Point::new(10.0, 10.0));
//! state.pointer_move(Point::new(50.0, 30.0));
//! state.pointer_up(Point::new(50.0, 30.0), &mut |_px: f64, _hint: &str| -> Option<String> { None });
//!
//! assert_eq!(state.canvas.shape_count(), 1);
//! assert_eq!(state.scene().labels(), vec!["Size: 40 × 20 px"]);
//! ```

pub mod background;
pub mod calibration;
pub mod canvas;
pub mod deletion;
pub mod font_manager;
pub mod gesture;
pub mod hit_test;
pub mod model;
pub mod overlay;
pub mod palette;
pub mod renderer;
pub mod shape_store;
pub mod svg_renderer;
pub mod viewport;

// Integration modules
pub mod designer_state;

pub use background::{
    load_background, load_pages, AssetKind, BackgroundLoader, BackgroundProvider, LoadTicket,
    PdfBackground, RasterBackground,
};
pub use calibration::{Calibration, CalibrationOutcome, LengthPrompt};
pub use canvas::{Canvas, Effect, PointerEvent, ToolMode};
pub use deletion::{is_delete_key, DeleteOutcome, Deletion};
pub use gesture::ActiveGesture;
pub use hit_test::{Handle, HandleKind};
pub use model::{Annotation, Bounds, Point, Rectangle, ShapeId, ShapeKind, ShapeRef, Square};
pub use overlay::{render_overlay, OutlineStyle, OverlayNode, OverlayScene};
pub use palette::Palette;
pub use renderer::ExportOptions;
pub use shape_store::ShapeStore;
pub use viewport::Viewport;

// State and integration
pub use designer_state::DesignerState;
