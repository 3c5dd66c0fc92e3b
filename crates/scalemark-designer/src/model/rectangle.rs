use serde::{Deserialize, Serialize};

use super::{clamp_size, Annotation, Bounds, Point, ShapeId, ShapeKind};

/// Axis-aligned rectangle annotation with independent width and height.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    id: ShapeId,
    origin: Point,
    width: f64,
    height: f64,
    selected: bool,
}

impl Rectangle {
    /// Creates an unselected rectangle; both dimensions are floored.
    pub fn new(origin: Point, width: f64, height: f64) -> Self {
        Self {
            id: ShapeId::new(),
            origin,
            width: clamp_size(width),
            height: clamp_size(height),
            selected: false,
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn set_width(&mut self, width: f64) {
        self.width = clamp_size(width);
    }

    pub fn set_height(&mut self, height: f64) {
        self.height = clamp_size(height);
    }

    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    /// Bottom-right corner (free resize handle).
    pub fn corner(&self) -> Point {
        Point::new(self.origin.x + self.width, self.origin.y + self.height)
    }

    /// Middle of the right edge (width handle).
    pub fn right_edge(&self) -> Point {
        Point::new(self.origin.x + self.width, self.origin.y + self.height / 2.0)
    }

    /// Middle of the bottom edge (height handle).
    pub fn bottom_edge(&self) -> Point {
        Point::new(self.origin.x + self.width / 2.0, self.origin.y + self.height)
    }
}

impl Annotation for Rectangle {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Rectangle
    }

    fn origin(&self) -> Point {
        self.origin
    }

    fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    fn bounds(&self) -> Bounds {
        Bounds::new(self.origin.x, self.origin.y, self.width, self.height)
    }

    fn is_selected(&self) -> bool {
        self.selected
    }

    fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }
}
