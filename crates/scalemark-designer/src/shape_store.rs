use crate::deletion::{DeleteOutcome, Deletion};
use crate::model::{Annotation, Point, Rectangle, ShapeId, ShapeRef, Square};

/// Owns every committed annotation.
///
/// `ShapeStore` is the single source of truth for annotation geometry:
/// - Squares and rectangles live in two collections
/// - Every size-changing mutator goes through the shapes' own setters,
///   which apply the minimum-size floor
/// - Selection is exclusive across both collections
///
/// Draw order is all squares (in creation order) followed by all
/// rectangles, so a rectangle is drawn above any square.
#[derive(Debug, Clone, Default)]
pub struct ShapeStore {
    squares: Vec<Square>,
    rectangles: Vec<Rectangle>,
}

impl ShapeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of shapes of both kinds.
    pub fn len(&self) -> usize {
        self.squares.len() + self.rectangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn squares(&self) -> &[Square] {
        &self.squares
    }

    pub fn rectangles(&self) -> &[Rectangle] {
        &self.rectangles
    }

    /// Iterates all shapes in draw order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = ShapeRef<'_>> {
        self.squares
            .iter()
            .map(ShapeRef::Square)
            .chain(self.rectangles.iter().map(ShapeRef::Rectangle))
    }

    /// Adds an unselected square and returns its id.
    pub fn create_square(&mut self, top_left: Point, size: f64) -> ShapeId {
        let square = Square::new(top_left, size);
        let id = square.id();
        self.squares.push(square);
        id
    }

    /// Adds an unselected rectangle and returns its id.
    pub fn create_rectangle(&mut self, top_left: Point, width: f64, height: f64) -> ShapeId {
        let rect = Rectangle::new(top_left, width, height);
        let id = rect.id();
        self.rectangles.push(rect);
        id
    }

    pub fn get(&self, id: ShapeId) -> Option<ShapeRef<'_>> {
        self.iter().find(|shape| shape.id() == id)
    }

    pub fn square(&self, id: ShapeId) -> Option<&Square> {
        self.squares.iter().find(|s| s.id() == id)
    }

    pub fn rectangle(&self, id: ShapeId) -> Option<&Rectangle> {
        self.rectangles.iter().find(|r| r.id() == id)
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.get(id).is_some()
    }

    fn annotation_mut(&mut self, id: ShapeId) -> Option<&mut dyn Annotation> {
        if let Some(square) = self.squares.iter_mut().find(|s| s.id() == id) {
            return Some(square as &mut dyn Annotation);
        }
        self.rectangles
            .iter_mut()
            .find(|r| r.id() == id)
            .map(|r| r as &mut dyn Annotation)
    }

    /// Moves a shape so its top-left corner is at `top_left`.
    /// Returns `false` if no shape has this id.
    pub fn move_shape(&mut self, id: ShapeId, top_left: Point) -> bool {
        match self.annotation_mut(id) {
            Some(shape) => {
                shape.set_origin(top_left);
                true
            }
            None => false,
        }
    }

    /// Sets a square's edge length (floored). Returns `false` if `id` is not a square.
    pub fn resize_square(&mut self, id: ShapeId, edge: f64) -> bool {
        match self.squares.iter_mut().find(|s| s.id() == id) {
            Some(square) => {
                square.set_size(edge);
                true
            }
            None => false,
        }
    }

    /// Sets a rectangle's width and/or height (each floored). `None` leaves
    /// that dimension as is. Returns `false` if `id` is not a rectangle.
    pub fn resize_rectangle(
        &mut self,
        id: ShapeId,
        width: Option<f64>,
        height: Option<f64>,
    ) -> bool {
        match self.rectangles.iter_mut().find(|r| r.id() == id) {
            Some(rect) => {
                if let Some(width) = width {
                    rect.set_width(width);
                }
                if let Some(height) = height {
                    rect.set_height(height);
                }
                true
            }
            None => false,
        }
    }

    /// Selects exactly `id` (or nothing) and clears every other shape of
    /// both kinds.
    pub fn set_selection(&mut self, id: Option<ShapeId>) {
        for square in &mut self.squares {
            let selected = Some(square.id()) == id;
            square.set_selected(selected);
        }
        for rect in &mut self.rectangles {
            let selected = Some(rect.id()) == id;
            rect.set_selected(selected);
        }
    }

    pub fn clear_selection(&mut self) {
        self.set_selection(None);
    }

    pub fn selected_id(&self) -> Option<ShapeId> {
        self.iter().find(|s| s.is_selected()).map(|s| s.id())
    }

    pub fn selected_count(&self) -> usize {
        self.iter().filter(|s| s.is_selected()).count()
    }

    /// Runs `deletion` over both collections.
    pub fn delete<P>(&mut self, deletion: &Deletion<P>) -> DeleteOutcome
    where
        P: Fn(&dyn Annotation) -> bool,
    {
        deletion.run(&mut self.squares, &mut self.rectangles)
    }

    /// Removes every shape matching `predicate`.
    /// Survivors keep their geometry and order.
    pub fn delete_where<P>(&mut self, predicate: P) -> DeleteOutcome
    where
        P: Fn(&dyn Annotation) -> bool,
    {
        self.delete(&Deletion::new(predicate))
    }

    pub fn clear(&mut self) {
        self.squares.clear();
        self.rectangles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_lookup() {
        let mut store = ShapeStore::new();
        let sq = store.create_square(Point::new(1.0, 2.0), 10.0);
        let rc = store.create_rectangle(Point::new(5.0, 5.0), 30.0, 20.0);

        assert_eq!(store.len(), 2);
        assert_eq!(store.square(sq).map(|s| s.size()), Some(10.0));
        assert_eq!(store.rectangle(rc).map(|r| r.height()), Some(20.0));
        assert!(store.square(rc).is_none());
        assert_eq!(store.selected_id(), None);
    }

    #[test]
    fn test_draw_order_squares_first() {
        let mut store = ShapeStore::new();
        let rc = store.create_rectangle(Point::new(0.0, 0.0), 30.0, 20.0);
        let sq = store.create_square(Point::new(0.0, 0.0), 10.0);
        let ids: Vec<_> = store.iter().map(|s| s.id()).collect();
        assert_eq!(ids, vec![sq, rc]);
    }

    #[test]
    fn test_resize_is_floored() {
        let mut store = ShapeStore::new();
        let sq = store.create_square(Point::new(0.0, 0.0), 10.0);
        let rc = store.create_rectangle(Point::new(0.0, 0.0), 30.0, 20.0);

        assert!(store.resize_square(sq, 1.0));
        assert_eq!(store.square(sq).map(|s| s.size()), Some(6.0));

        assert!(store.resize_rectangle(rc, Some(-5.0), None));
        let rect = store.rectangle(rc).unwrap();
        assert_eq!(rect.width(), 6.0);
        assert_eq!(rect.height(), 20.0);

        // Wrong kind is rejected.
        assert!(!store.resize_square(rc, 50.0));
        assert!(!store.resize_rectangle(sq, Some(50.0), None));
    }

    #[test]
    fn test_selection_is_exclusive_across_kinds() {
        let mut store = ShapeStore::new();
        let sq = store.create_square(Point::new(0.0, 0.0), 10.0);
        let rc = store.create_rectangle(Point::new(0.0, 0.0), 30.0, 20.0);

        store.set_selection(Some(sq));
        assert_eq!(store.selected_id(), Some(sq));

        store.set_selection(Some(rc));
        assert_eq!(store.selected_id(), Some(rc));
        assert_eq!(store.selected_count(), 1);

        store.clear_selection();
        assert_eq!(store.selected_count(), 0);
    }

    #[test]
    fn test_delete_where_keeps_survivors() {
        let mut store = ShapeStore::new();
        let keep = store.create_square(Point::new(3.0, 4.0), 10.0);
        let drop = store.create_rectangle(Point::new(0.0, 0.0), 30.0, 20.0);
        store.set_selection(Some(drop));

        assert_eq!(store.delete_where(|s| s.is_selected()).removed, 1);
        assert!(!store.contains(drop));
        assert_eq!(store.square(keep).map(|s| s.origin()), Some(Point::new(3.0, 4.0)));
        assert!(store.delete_where(|s| s.is_selected()).is_empty());
    }

    #[test]
    fn test_selected_deletion_matches_predicate_deletion() {
        let mut by_deletion = ShapeStore::new();
        let mut by_predicate = ShapeStore::new();
        for store in [&mut by_deletion, &mut by_predicate] {
            store.create_square(Point::new(0.0, 0.0), 10.0);
            let rc = store.create_rectangle(Point::new(20.0, 0.0), 30.0, 20.0);
            store.create_rectangle(Point::new(60.0, 0.0), 30.0, 20.0);
            store.set_selection(Some(rc));
        }

        let a = by_deletion.delete(&Deletion::selected());
        let b = by_predicate.delete_where(|s| s.is_selected());

        assert_eq!(a, b);
        assert_eq!(a.removed, 1);
        assert_eq!(by_deletion.len(), 2);
        assert_eq!(by_deletion.selected_count(), 0);
        let origins = |store: &ShapeStore| store.iter().map(|s| s.origin()).collect::<Vec<_>>();
        assert_eq!(origins(&by_deletion), origins(&by_predicate));
    }
}
