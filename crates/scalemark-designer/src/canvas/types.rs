//! Canvas type definitions: ToolMode, PointerEvent, Effect.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::{Point, ShapeId, ShapeKind};

/// Tool modes for the canvas.
///
/// The mode only matters when a pointer-down hits neither a handle nor a
/// shape body: it decides which draft starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolMode {
    #[default]
    Idle,
    Calibrate,
    Square,
    Rect,
    Select,
}

impl ToolMode {
    /// Mode reached by pressing the button for `self` while in `current`.
    /// Pressing the button of the armed tool disarms it.
    pub fn toggled_from(self, current: ToolMode) -> ToolMode {
        if self == current {
            ToolMode::Idle
        } else {
            self
        }
    }

    /// User-facing hint shown while the mode is active.
    pub fn hint(self) -> &'static str {
        match self {
            Self::Idle => {
                "Load a background, then calibrate the scale or draw squares and rectangles."
            }
            Self::Calibrate => {
                "Drag along a segment of known length, then enter its real length (e.g. 1m, 200cm)."
            }
            Self::Square => "Drag to draw a square.",
            Self::Rect => "Drag to draw a rectangle.",
            Self::Select => {
                "Click a shape to select it. Drag the center to move, the corner to resize, \
                 the right or bottom handle to change width or height."
            }
        }
    }
}

impl fmt::Display for ToolMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Calibrate => "calibrate",
            Self::Square => "square",
            Self::Rect => "rect",
            Self::Select => "select",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for ToolMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "idle" => Ok(Self::Idle),
            "calibrate" => Ok(Self::Calibrate),
            "square" => Ok(Self::Square),
            "rect" | "rectangle" => Ok(Self::Rect),
            "select" => Ok(Self::Select),
            other => Err(format!("Unknown tool mode: {}", other)),
        }
    }
}

/// Pointer input in background-pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Point),
    Move(Point),
    /// Also delivered when the pointer leaves the canvas.
    Up(Point),
}

impl PointerEvent {
    pub fn position(&self) -> Point {
        match *self {
            Self::Down(p) | Self::Move(p) | Self::Up(p) => p,
        }
    }
}

/// Side effect of a transition that the owner of the canvas must act on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    None,
    /// Selection changed without starting a gesture, or a gesture started.
    Selected(Option<ShapeId>),
    /// A draft was committed as a new, selected shape.
    ShapeCreated { id: ShapeId, kind: ShapeKind },
    /// A move or resize finished.
    ShapeEdited(ShapeId),
    /// A calibration segment was drawn; its real length must be requested.
    RequestLength { pixel_length: f64 },
    /// The calibration segment was too short and has been dropped.
    CalibrationDiscarded,
}
