//! Hit testing against shape handles and bodies.
//!
//! Handles always win over bodies. Among handles the closest one inside
//! [`HANDLE_HIT_RADIUS`] is picked; on an exact tie the one drawn last
//! (topmost) wins. Bodies are tested topmost first.

use scalemark_core::constants::{
    CORNER_HANDLE_RADIUS, EDGE_HANDLE_RADIUS, HANDLE_HIT_RADIUS, MOVE_HANDLE_RADIUS,
    MOVE_HANDLE_RADIUS_SELECTED,
};

use crate::model::{Point, ShapeId, ShapeKind, ShapeRef};
use crate::shape_store::ShapeStore;

/// What a handle does when grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleKind {
    /// Center handle, drags the whole shape.
    Move,
    /// Bottom-right corner.
    Corner,
    /// Middle of the right edge (rectangles only).
    Width,
    /// Middle of the bottom edge (rectangles only).
    Height,
}

/// A handle as drawn on the overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    pub shape_id: ShapeId,
    pub shape_kind: ShapeKind,
    pub kind: HandleKind,
    pub center: Point,
    /// Drawn radius. Hit testing uses the larger fixed hit radius.
    pub radius: f64,
    /// Set on the move handle of the selected shape.
    pub emphasized: bool,
}

/// Handles of one shape, in draw order.
pub fn handles_for(shape: ShapeRef<'_>) -> Vec<Handle> {
    let id = shape.id();
    let selected = shape.is_selected();
    let move_radius = if selected {
        MOVE_HANDLE_RADIUS_SELECTED
    } else {
        MOVE_HANDLE_RADIUS
    };
    let handle = |kind, center, radius, emphasized| Handle {
        shape_id: id,
        shape_kind: shape.kind(),
        kind,
        center,
        radius,
        emphasized,
    };

    match shape {
        ShapeRef::Square(square) => vec![
            handle(HandleKind::Corner, square.corner(), CORNER_HANDLE_RADIUS, false),
            handle(HandleKind::Move, square.center(), move_radius, selected),
        ],
        ShapeRef::Rectangle(rect) => vec![
            handle(HandleKind::Corner, rect.corner(), CORNER_HANDLE_RADIUS, false),
            handle(HandleKind::Move, rect.center(), move_radius, selected),
            handle(HandleKind::Width, rect.right_edge(), EDGE_HANDLE_RADIUS, false),
            handle(HandleKind::Height, rect.bottom_edge(), EDGE_HANDLE_RADIUS, false),
        ],
    }
}

/// Finds the handle under `point`, if any.
pub fn hit_handle(store: &ShapeStore, point: Point) -> Option<Handle> {
    let mut best: Option<(f64, Handle)> = None;
    for handle in store.iter().flat_map(handles_for) {
        let distance = handle.center.distance_to(&point);
        if distance > HANDLE_HIT_RADIUS {
            continue;
        }
        match best {
            Some((best_distance, _)) if distance > best_distance => {}
            _ => best = Some((distance, handle)),
        }
    }
    best.map(|(_, handle)| handle)
}

/// Finds the topmost shape whose body contains `point`.
pub fn hit_body(store: &ShapeStore, point: Point) -> Option<ShapeId> {
    store
        .iter()
        .rev()
        .find(|shape| shape.bounds().contains(&point))
        .map(|shape| shape.id())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_has_two_handles() {
        let mut store = ShapeStore::new();
        let id = store.create_square(Point::new(0.0, 0.0), 20.0);
        let square = store.get(id).unwrap();
        let handles = handles_for(square);
        assert_eq!(handles.len(), 2);
        assert_eq!(handles[0].kind, HandleKind::Corner);
        assert_eq!(handles[0].center, Point::new(20.0, 20.0));
        assert_eq!(handles[1].center, Point::new(10.0, 10.0));
        assert_eq!(handles[1].radius, MOVE_HANDLE_RADIUS);
    }

    #[test]
    fn test_selected_move_handle_is_enlarged() {
        let mut store = ShapeStore::new();
        let id = store.create_rectangle(Point::new(0.0, 0.0), 40.0, 20.0);
        store.set_selection(Some(id));
        let handles = handles_for(store.get(id).unwrap());
        let mover = handles.iter().find(|h| h.kind == HandleKind::Move).unwrap();
        assert_eq!(mover.radius, MOVE_HANDLE_RADIUS_SELECTED);
        assert!(mover.emphasized);
        assert_eq!(handles.len(), 4);
    }

    #[test]
    fn test_nearest_handle_wins() {
        let mut store = ShapeStore::new();
        let id = store.create_rectangle(Point::new(0.0, 0.0), 12.0, 12.0);
        // Corner (12,12), right edge (12,6), bottom edge (6,12), center (6,6).
        let hit = hit_handle(&store, Point::new(12.0, 11.0)).unwrap();
        assert_eq!(hit.shape_id, id);
        assert_eq!(hit.kind, HandleKind::Corner);

        let hit = hit_handle(&store, Point::new(12.0, 7.0)).unwrap();
        assert_eq!(hit.kind, HandleKind::Width);
    }

    #[test]
    fn test_body_hit_prefers_topmost() {
        let mut store = ShapeStore::new();
        let below = store.create_square(Point::new(0.0, 0.0), 100.0);
        let above = store.create_rectangle(Point::new(20.0, 20.0), 30.0, 30.0);

        assert_eq!(hit_body(&store, Point::new(30.0, 30.0)), Some(above));
        assert_eq!(hit_body(&store, Point::new(90.0, 90.0)), Some(below));
        assert_eq!(hit_body(&store, Point::new(150.0, 150.0)), None);
    }

    #[test]
    fn test_miss_outside_radius() {
        let mut store = ShapeStore::new();
        store.create_square(Point::new(0.0, 0.0), 100.0);
        assert!(hit_handle(&store, Point::new(70.0, 70.0)).is_none());
        assert!(hit_handle(&store, Point::new(100.0, 109.0)).is_none());
    }
}
