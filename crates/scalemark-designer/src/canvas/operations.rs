//! Pointer transitions: routing pointer-down, advancing and finishing gestures.

use scalemark_core::constants::{DRAG_THRESHOLD, MIN_CALIBRATION_LENGTH};

use super::types::{Effect, PointerEvent, ToolMode};
use crate::gesture::ActiveGesture;
use crate::hit_test::{hit_body, hit_handle, Handle, HandleKind};
use crate::model::{clamp_size, Annotation, Point, ShapeKind};
use crate::shape_store::ShapeStore;

/// Applies one pointer event.
///
/// Takes the current gesture by value and returns the gesture that replaces
/// it, together with the effect the caller must handle. Geometry and tool
/// mode are updated in place; nothing else is touched.
pub fn transition(
    gesture: Option<ActiveGesture>,
    event: PointerEvent,
    store: &mut ShapeStore,
    mode: &mut ToolMode,
) -> (Option<ActiveGesture>, Effect) {
    match event {
        PointerEvent::Down(point) => pointer_down(store, *mode, point),
        PointerEvent::Move(point) => match gesture {
            Some(gesture) => (Some(pointer_move(gesture, store, point)), Effect::None),
            None => (None, Effect::None),
        },
        PointerEvent::Up(point) => match gesture {
            Some(gesture) => (None, pointer_up(gesture, store, mode, point)),
            None => (None, Effect::None),
        },
    }
}

/// Decides which operation a pointer-down starts.
///
/// First match wins: handle, shape body, the current tool's draft, and
/// finally clearing the selection.
pub fn pointer_down(
    store: &mut ShapeStore,
    mode: ToolMode,
    point: Point,
) -> (Option<ActiveGesture>, Effect) {
    if let Some(handle) = hit_handle(store, point) {
        store.set_selection(Some(handle.shape_id));
        let gesture = start_handle_gesture(store, &handle, point);
        tracing::debug!(
            "Handle {:?} of {} grabbed, starting {:?}",
            handle.kind,
            handle.shape_id,
            gesture.map(|g| g.name())
        );
        return (gesture, Effect::Selected(Some(handle.shape_id)));
    }

    if let Some(id) = hit_body(store, point) {
        store.set_selection(Some(id));
        tracing::debug!("Shape {} selected", id);
        return (Some(ActiveGesture::Selecting), Effect::Selected(Some(id)));
    }

    let draft = match mode {
        ToolMode::Calibrate => Some(ActiveGesture::CalibrationDraft {
            start: point,
            current: point,
        }),
        ToolMode::Square => Some(ActiveGesture::SquareDraft {
            start: point,
            current: point,
        }),
        ToolMode::Rect => Some(ActiveGesture::RectDraft {
            start: point,
            current: point,
        }),
        ToolMode::Idle | ToolMode::Select => None,
    };

    match draft {
        Some(draft) => {
            tracing::debug!("Starting {} at ({:.1}, {:.1})", draft.name(), point.x, point.y);
            (Some(draft), Effect::None)
        }
        None => {
            store.clear_selection();
            (None, Effect::Selected(None))
        }
    }
}

fn start_handle_gesture(
    store: &ShapeStore,
    handle: &Handle,
    point: Point,
) -> Option<ActiveGesture> {
    let id = handle.shape_id;
    let gesture = match (handle.kind, handle.shape_kind) {
        (HandleKind::Move, _) => {
            let origin = store.get(id)?.origin();
            ActiveGesture::PendingMove {
                id,
                offset: point - origin,
                start: point,
            }
        }
        (HandleKind::Corner, ShapeKind::Square) => ActiveGesture::Resize { id },
        (HandleKind::Corner, ShapeKind::Rectangle) => ActiveGesture::ResizeRect { id },
        (HandleKind::Width, _) => ActiveGesture::ResizeWidth { id },
        (HandleKind::Height, _) => ActiveGesture::ResizeHeight { id },
    };
    Some(gesture)
}

/// Advances a gesture to the pointer at `point`.
pub fn pointer_move(gesture: ActiveGesture, store: &mut ShapeStore, point: Point) -> ActiveGesture {
    match gesture {
        ActiveGesture::CalibrationDraft { start, .. } => ActiveGesture::CalibrationDraft {
            start,
            current: point,
        },
        ActiveGesture::SquareDraft { start, .. } => ActiveGesture::SquareDraft {
            start,
            current: point,
        },
        ActiveGesture::RectDraft { start, .. } => ActiveGesture::RectDraft {
            start,
            current: point,
        },
        ActiveGesture::PendingMove { id, offset, start } => {
            if start.distance_to(&point) > DRAG_THRESHOLD {
                tracing::debug!("Pending move of {} confirmed", id);
                store.move_shape(id, point - offset);
                ActiveGesture::Move { id, offset }
            } else {
                gesture
            }
        }
        ActiveGesture::Move { id, offset } => {
            store.move_shape(id, point - offset);
            gesture
        }
        ActiveGesture::Resize { id } => {
            if let Some(origin) = store.square(id).map(|s| s.origin()) {
                let edge = (point.x - origin.x).max(point.y - origin.y);
                store.resize_square(id, edge);
            }
            gesture
        }
        ActiveGesture::ResizeRect { id } => {
            if let Some(origin) = store.rectangle(id).map(|r| r.origin()) {
                store.resize_rectangle(id, Some(point.x - origin.x), Some(point.y - origin.y));
            }
            gesture
        }
        ActiveGesture::ResizeWidth { id } => {
            if let Some(origin) = store.rectangle(id).map(|r| r.origin()) {
                store.resize_rectangle(id, Some(point.x - origin.x), None);
            }
            gesture
        }
        ActiveGesture::ResizeHeight { id } => {
            if let Some(origin) = store.rectangle(id).map(|r| r.origin()) {
                store.resize_rectangle(id, None, Some(point.y - origin.y));
            }
            gesture
        }
        ActiveGesture::Selecting => gesture,
    }
}

/// Finishes a gesture at `point`.
pub fn pointer_up(
    gesture: ActiveGesture,
    store: &mut ShapeStore,
    mode: &mut ToolMode,
    point: Point,
) -> Effect {
    match gesture {
        // The segment ends where the last move left it, not at the release point.
        ActiveGesture::CalibrationDraft { start, current } => {
            *mode = ToolMode::Idle;
            let pixel_length = start.distance_to(&current);
            if pixel_length < MIN_CALIBRATION_LENGTH {
                tracing::debug!("Calibration segment of {:.2} px discarded", pixel_length);
                Effect::CalibrationDiscarded
            } else {
                Effect::RequestLength { pixel_length }
            }
        }
        ActiveGesture::SquareDraft { start, .. } => {
            let dx = point.x - start.x;
            let dy = point.y - start.y;
            let size = clamp_size(dx.abs().max(dy.abs()));
            let x = if dx >= 0.0 { start.x } else { start.x - size };
            let y = if dy >= 0.0 { start.y } else { start.y - size };
            let id = store.create_square(Point::new(x, y), size);
            store.set_selection(Some(id));
            *mode = ToolMode::Select;
            tracing::info!("Square {} created at ({:.1}, {:.1}), edge {:.1} px", id, x, y, size);
            Effect::ShapeCreated {
                id,
                kind: ShapeKind::Square,
            }
        }
        ActiveGesture::RectDraft { start, .. } => {
            let dx = point.x - start.x;
            let dy = point.y - start.y;
            let width = clamp_size(dx.abs());
            let height = clamp_size(dy.abs());
            let x = if dx >= 0.0 { start.x } else { start.x - width };
            let y = if dy >= 0.0 { start.y } else { start.y - height };
            let id = store.create_rectangle(Point::new(x, y), width, height);
            store.set_selection(Some(id));
            *mode = ToolMode::Select;
            tracing::info!(
                "Rectangle {} created at ({:.1}, {:.1}), {:.1} x {:.1} px",
                id,
                x,
                y,
                width,
                height
            );
            Effect::ShapeCreated {
                id,
                kind: ShapeKind::Rectangle,
            }
        }
        ActiveGesture::Move { id, .. }
        | ActiveGesture::Resize { id }
        | ActiveGesture::ResizeRect { id }
        | ActiveGesture::ResizeWidth { id }
        | ActiveGesture::ResizeHeight { id } => Effect::ShapeEdited(id),
        ActiveGesture::PendingMove { .. } | ActiveGesture::Selecting => Effect::None,
    }
}
