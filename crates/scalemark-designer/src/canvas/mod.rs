//! Canvas for drawing and manipulating annotations.

mod operations;
mod types;

pub use operations::transition;
pub use types::{Effect, PointerEvent, ToolMode};

use crate::gesture::ActiveGesture;
use crate::shape_store::ShapeStore;

/// Canvas state: committed shapes, the active gesture and the tool mode.
#[derive(Debug, Clone, Default)]
pub struct Canvas {
    pub shape_store: ShapeStore,
    gesture: Option<ActiveGesture>,
    mode: ToolMode,
}

impl Canvas {
    /// Creates an empty canvas in idle mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the tool mode.
    pub fn set_mode(&mut self, mode: ToolMode) {
        if self.mode != mode {
            tracing::debug!("Tool mode {} -> {}", self.mode, mode);
        }
        self.mode = mode;
    }

    /// Gets the current tool mode.
    pub fn mode(&self) -> ToolMode {
        self.mode
    }

    /// Presses the button for `mode`: arms it, or disarms it if already armed.
    pub fn toggle_mode(&mut self, mode: ToolMode) -> ToolMode {
        self.set_mode(mode.toggled_from(self.mode));
        self.mode
    }

    /// The gesture in flight, if any.
    pub fn gesture(&self) -> Option<&ActiveGesture> {
        self.gesture.as_ref()
    }

    /// Returns the number of shapes on the canvas.
    pub fn shape_count(&self) -> usize {
        self.shape_store.len()
    }

    /// Feeds one pointer event through the gesture state machine.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Effect {
        let (next, effect) = transition(
            self.gesture.take(),
            event,
            &mut self.shape_store,
            &mut self.mode,
        );
        self.gesture = next;
        effect
    }

    /// Drops the active gesture without finishing it.
    pub fn clear_gesture(&mut self) {
        self.gesture = None;
    }
}
