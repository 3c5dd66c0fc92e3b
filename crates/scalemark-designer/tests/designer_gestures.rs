//! Tests for the pointer gesture state machine
//! Covers draft creation, threshold-gated moves and handle resizes.

use scalemark_designer::{
    canvas::transition, ActiveGesture, Annotation, Canvas, Effect, Point, PointerEvent, ShapeKind,
    ShapeStore, ToolMode,
};

fn drag(canvas: &mut Canvas, from: Point, to: Point) -> Effect {
    canvas.handle_pointer(PointerEvent::Down(from));
    canvas.handle_pointer(PointerEvent::Move(to));
    canvas.handle_pointer(PointerEvent::Up(to))
}

#[test]
fn test_square_draft_covers_both_endpoints() {
    let mut canvas = Canvas::new();
    canvas.set_mode(ToolMode::Square);

    let effect = drag(&mut canvas, Point::new(10.0, 10.0), Point::new(50.0, 30.0));

    let Effect::ShapeCreated { id, kind } = effect else {
        panic!("expected a new shape, got {:?}", effect);
    };
    assert_eq!(kind, ShapeKind::Square);
    let square = canvas.shape_store.square(id).unwrap();
    assert_eq!(square.size(), 40.0);
    assert_eq!(square.corner(), Point::new(50.0, 50.0));
    assert_eq!(canvas.shape_store.selected_id(), Some(id));
    assert_eq!(canvas.mode(), ToolMode::Select);
    assert!(canvas.gesture().is_none());
}

#[test]
fn test_rect_draft_dimensions() {
    let mut canvas = Canvas::new();
    canvas.set_mode(ToolMode::Rect);

    let effect = drag(&mut canvas, Point::new(10.0, 10.0), Point::new(50.0, 30.0));
    let Effect::ShapeCreated { id, .. } = effect else {
        panic!("expected a new shape");
    };
    let rect = canvas.shape_store.rectangle(id).unwrap();
    assert_eq!((rect.width(), rect.height()), (40.0, 20.0));
    assert_eq!(rect.bounds().x, 10.0);
    assert_eq!(rect.bounds().y, 10.0);
}

#[test]
fn test_rect_draft_dragged_up_left() {
    let mut canvas = Canvas::new();
    canvas.set_mode(ToolMode::Rect);

    let effect = drag(&mut canvas, Point::new(50.0, 30.0), Point::new(10.0, 10.0));
    let Effect::ShapeCreated { id, .. } = effect else {
        panic!("expected a new shape");
    };
    let bounds = canvas.shape_store.rectangle(id).unwrap().bounds();
    assert_eq!((bounds.x, bounds.y, bounds.width, bounds.height), (10.0, 10.0, 40.0, 20.0));
}

#[test]
fn test_tiny_draft_is_floored() {
    let mut canvas = Canvas::new();
    canvas.set_mode(ToolMode::Square);

    // Click without dragging, up-left of the anchor.
    let effect = drag(&mut canvas, Point::new(100.0, 100.0), Point::new(99.0, 99.0));
    let Effect::ShapeCreated { id, .. } = effect else {
        panic!("expected a new shape");
    };
    let bounds = canvas.shape_store.square(id).unwrap().bounds();
    assert_eq!(bounds.width, 6.0);
    // The floored square still ends at the anchor.
    assert_eq!((bounds.x, bounds.y), (94.0, 94.0));
}

#[test]
fn test_small_move_leaves_geometry_unchanged() {
    let mut canvas = Canvas::new();
    let id = canvas.shape_store.create_square(Point::new(100.0, 100.0), 40.0);

    // Center handle is at (120, 120).
    canvas.handle_pointer(PointerEvent::Down(Point::new(120.0, 120.0)));
    assert!(matches!(
        canvas.gesture(),
        Some(ActiveGesture::PendingMove { .. })
    ));

    canvas.handle_pointer(PointerEvent::Move(Point::new(122.0, 122.0)));
    assert!(matches!(
        canvas.gesture(),
        Some(ActiveGesture::PendingMove { .. })
    ));
    canvas.handle_pointer(PointerEvent::Up(Point::new(122.0, 122.0)));

    let square = canvas.shape_store.square(id).unwrap();
    assert_eq!(square.bounds().x, 100.0);
    assert_eq!(square.bounds().y, 100.0);
    assert_eq!(canvas.shape_store.selected_id(), Some(id));
}

#[test]
fn test_move_applies_full_displacement() {
    let mut canvas = Canvas::new();
    let id = canvas.shape_store.create_square(Point::new(100.0, 100.0), 40.0);

    // Grab slightly off-center so the offset matters.
    canvas.handle_pointer(PointerEvent::Down(Point::new(118.0, 121.0)));
    canvas.handle_pointer(PointerEvent::Move(Point::new(120.0, 121.0)));
    canvas.handle_pointer(PointerEvent::Move(Point::new(148.0, 151.0)));
    assert!(matches!(canvas.gesture(), Some(ActiveGesture::Move { .. })));

    let effect = canvas.handle_pointer(PointerEvent::Up(Point::new(148.0, 151.0)));
    assert_eq!(effect, Effect::ShapeEdited(id));

    let bounds = canvas.shape_store.square(id).unwrap().bounds();
    assert_eq!((bounds.x, bounds.y), (130.0, 130.0));
    assert_eq!(bounds.width, 40.0);
}

#[test]
fn test_move_once_confirmed_never_reverts() {
    let mut canvas = Canvas::new();
    let id = canvas.shape_store.create_square(Point::new(0.0, 0.0), 40.0);

    canvas.handle_pointer(PointerEvent::Down(Point::new(20.0, 20.0)));
    canvas.handle_pointer(PointerEvent::Move(Point::new(30.0, 20.0)));
    // Back within the threshold of the start: still a move.
    canvas.handle_pointer(PointerEvent::Move(Point::new(21.0, 20.0)));
    assert!(matches!(canvas.gesture(), Some(ActiveGesture::Move { .. })));
    assert_eq!(canvas.shape_store.square(id).unwrap().bounds().x, 1.0);
}

#[test]
fn test_square_corner_resize_uses_larger_delta() {
    let mut canvas = Canvas::new();
    let id = canvas.shape_store.create_square(Point::new(10.0, 10.0), 40.0);

    canvas.handle_pointer(PointerEvent::Down(Point::new(50.0, 50.0)));
    assert!(matches!(canvas.gesture(), Some(ActiveGesture::Resize { .. })));
    canvas.handle_pointer(PointerEvent::Move(Point::new(70.0, 90.0)));
    assert_eq!(canvas.shape_store.square(id).unwrap().size(), 80.0);

    // Past the top-left: floored, never flipped.
    canvas.handle_pointer(PointerEvent::Move(Point::new(0.0, 0.0)));
    let square = canvas.shape_store.square(id).unwrap();
    assert_eq!(square.size(), 6.0);
    assert_eq!(square.bounds().x, 10.0);
}

#[test]
fn test_rect_handles_resize_their_dimensions() {
    let mut canvas = Canvas::new();
    let id = canvas
        .shape_store
        .create_rectangle(Point::new(0.0, 0.0), 100.0, 50.0);

    // Right-edge handle at (100, 25).
    canvas.handle_pointer(PointerEvent::Down(Point::new(100.0, 25.0)));
    assert!(matches!(canvas.gesture(), Some(ActiveGesture::ResizeWidth { .. })));
    canvas.handle_pointer(PointerEvent::Move(Point::new(140.0, 300.0)));
    canvas.handle_pointer(PointerEvent::Up(Point::new(140.0, 300.0)));
    let rect = canvas.shape_store.rectangle(id).unwrap();
    assert_eq!((rect.width(), rect.height()), (140.0, 50.0));

    // Bottom-edge handle at (70, 50).
    canvas.handle_pointer(PointerEvent::Down(Point::new(70.0, 50.0)));
    assert!(matches!(canvas.gesture(), Some(ActiveGesture::ResizeHeight { .. })));
    canvas.handle_pointer(PointerEvent::Move(Point::new(0.0, 2.0)));
    let rect = canvas.shape_store.rectangle(id).unwrap();
    assert_eq!((rect.width(), rect.height()), (140.0, 6.0));
}

#[test]
fn test_rect_corner_resize_both_dimensions() {
    let mut canvas = Canvas::new();
    let id = canvas
        .shape_store
        .create_rectangle(Point::new(10.0, 10.0), 100.0, 50.0);

    canvas.handle_pointer(PointerEvent::Down(Point::new(110.0, 60.0)));
    assert!(matches!(canvas.gesture(), Some(ActiveGesture::ResizeRect { .. })));
    canvas.handle_pointer(PointerEvent::Move(Point::new(40.0, 12.0)));
    let rect = canvas.shape_store.rectangle(id).unwrap();
    assert_eq!((rect.width(), rect.height()), (30.0, 6.0));
}

#[test]
fn test_move_without_gesture_is_noop() {
    let mut canvas = Canvas::new();
    canvas.shape_store.create_square(Point::new(0.0, 0.0), 40.0);
    let before = canvas.shape_store.clone().squares().to_vec();

    assert_eq!(
        canvas.handle_pointer(PointerEvent::Move(Point::new(20.0, 20.0))),
        Effect::None
    );
    assert_eq!(canvas.shape_store.squares(), before.as_slice());
}

#[test]
fn test_transition_is_a_plain_function() {
    let mut store = ShapeStore::new();
    let mut mode = ToolMode::Rect;

    let (gesture, _) = transition(
        None,
        PointerEvent::Down(Point::new(0.0, 0.0)),
        &mut store,
        &mut mode,
    );
    let (gesture, _) = transition(
        gesture,
        PointerEvent::Move(Point::new(30.0, 20.0)),
        &mut store,
        &mut mode,
    );
    assert!(matches!(gesture, Some(ActiveGesture::RectDraft { .. })));
    assert!(store.is_empty());

    let (gesture, effect) = transition(
        gesture,
        PointerEvent::Up(Point::new(30.0, 20.0)),
        &mut store,
        &mut mode,
    );
    assert!(gesture.is_none());
    assert!(matches!(effect, Effect::ShapeCreated { .. }));
    assert_eq!(mode, ToolMode::Select);
    assert_eq!(store.len(), 1);
}

#[test]
fn test_toggle_mode() {
    let mut canvas = Canvas::new();
    assert_eq!(canvas.toggle_mode(ToolMode::Square), ToolMode::Square);
    assert_eq!(canvas.toggle_mode(ToolMode::Rect), ToolMode::Rect);
    assert_eq!(canvas.toggle_mode(ToolMode::Rect), ToolMode::Idle);
}
