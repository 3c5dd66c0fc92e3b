//! The single in-flight pointer gesture.

use crate::model::{Bounds, Point, ShapeId};

/// Operation currently driven by the pointer, if any.
///
/// Drafts carry their anchor and live pointer; manipulation gestures only
/// carry the shape id because geometry is recomputed from the live pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActiveGesture {
    /// Reference segment being drawn for calibration.
    CalibrationDraft { start: Point, current: Point },
    SquareDraft { start: Point, current: Point },
    RectDraft { start: Point, current: Point },
    /// Pointer went down on a center handle but has not travelled far
    /// enough to count as a move yet.
    PendingMove {
        id: ShapeId,
        offset: Point,
        start: Point,
    },
    /// Confirmed move. `offset` is pointer minus top-left at pointer-down.
    Move { id: ShapeId, offset: Point },
    /// Square corner resize.
    Resize { id: ShapeId },
    /// Rectangle corner resize.
    ResizeRect { id: ShapeId },
    ResizeWidth { id: ShapeId },
    ResizeHeight { id: ShapeId },
    /// Body click; does nothing until pointer-up.
    Selecting,
}

impl ActiveGesture {
    /// Short name used in log output.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CalibrationDraft { .. } => "calibration-draft",
            Self::SquareDraft { .. } => "square-draft",
            Self::RectDraft { .. } => "rect-draft",
            Self::PendingMove { .. } => "pending-move",
            Self::Move { .. } => "move",
            Self::Resize { .. } => "resize",
            Self::ResizeRect { .. } => "resize-rect",
            Self::ResizeWidth { .. } => "resize-width",
            Self::ResizeHeight { .. } => "resize-height",
            Self::Selecting => "selecting",
        }
    }

    pub fn is_draft(&self) -> bool {
        matches!(
            self,
            Self::CalibrationDraft { .. } | Self::SquareDraft { .. } | Self::RectDraft { .. }
        )
    }

    /// Shape the gesture manipulates, if any.
    pub fn target(&self) -> Option<ShapeId> {
        match *self {
            Self::PendingMove { id, .. }
            | Self::Move { id, .. }
            | Self::Resize { id }
            | Self::ResizeRect { id }
            | Self::ResizeWidth { id }
            | Self::ResizeHeight { id } => Some(id),
            _ => None,
        }
    }
}

/// Square spanned by a drag from `start` to `current`.
///
/// The edge is the larger of the two deltas. The corner at `start` stays
/// fixed and the square grows toward the pointer.
pub fn square_draft_bounds(start: Point, current: Point) -> Bounds {
    let dx = current.x - start.x;
    let dy = current.y - start.y;
    let size = dx.abs().max(dy.abs());
    let x = if dx >= 0.0 { start.x } else { start.x - size };
    let y = if dy >= 0.0 { start.y } else { start.y - size };
    Bounds::new(x, y, size, size)
}

/// Rectangle spanned by a drag from `start` to `current`.
pub fn rect_draft_bounds(start: Point, current: Point) -> Bounds {
    let dx = current.x - start.x;
    let dy = current.y - start.y;
    let width = dx.abs();
    let height = dy.abs();
    let x = if dx >= 0.0 { start.x } else { start.x - width };
    let y = if dy >= 0.0 { start.y } else { start.y - height };
    Bounds::new(x, y, width, height)
}
