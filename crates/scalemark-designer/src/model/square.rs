use serde::{Deserialize, Serialize};

use super::{clamp_size, Annotation, Bounds, Point, ShapeId, ShapeKind};

/// Axis-aligned square annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Square {
    id: ShapeId,
    origin: Point,
    size: f64,
    selected: bool,
}

impl Square {
    /// Creates an unselected square; `size` is floored.
    pub fn new(origin: Point, size: f64) -> Self {
        Self {
            id: ShapeId::new(),
            origin,
            size: clamp_size(size),
            selected: false,
        }
    }

    /// Edge length in pixels.
    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn set_size(&mut self, size: f64) {
        self.size = clamp_size(size);
    }

    /// Center of the square, where the move handle sits.
    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    /// Bottom-right corner, where the resize handle sits.
    pub fn corner(&self) -> Point {
        Point::new(self.origin.x + self.size, self.origin.y + self.size)
    }
}

impl Annotation for Square {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Square
    }

    fn origin(&self) -> Point {
        self.origin
    }

    fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    fn bounds(&self) -> Bounds {
        Bounds::new(self.origin.x, self.origin.y, self.size, self.size)
    }

    fn is_selected(&self) -> bool {
        self.selected
    }

    fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }
}
