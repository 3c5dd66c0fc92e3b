//! Annotation geometry: points, bounds, identifiers and the two shape kinds.
//!
//! All coordinates are background pixels of the fitted viewport, with the
//! origin at the top-left and Y growing downward.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

use scalemark_core::constants::MIN_SHAPE_SIZE;

mod rectangle;
mod square;

pub use rectangle::Rectangle;
pub use square::Square;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Edges are inclusive.
    pub fn contains(&self, point: &Point) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }
}

/// Opaque shape identifier, stable for the lifetime of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShapeId(uuid::Uuid);

impl ShapeId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for ShapeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Square,
    Rectangle,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Square => write!(f, "square"),
            Self::Rectangle => write!(f, "rectangle"),
        }
    }
}

/// Behaviour shared by every annotation kind.
pub trait Annotation {
    fn id(&self) -> ShapeId;

    fn kind(&self) -> ShapeKind;

    /// Top-left corner.
    fn origin(&self) -> Point;

    fn set_origin(&mut self, origin: Point);

    fn bounds(&self) -> Bounds;

    fn is_selected(&self) -> bool;

    fn set_selected(&mut self, selected: bool);
}

/// Borrowed view over either shape kind.
#[derive(Debug, Clone, Copy)]
pub enum ShapeRef<'a> {
    Square(&'a Square),
    Rectangle(&'a Rectangle),
}

impl ShapeRef<'_> {
    pub fn id(&self) -> ShapeId {
        self.as_annotation().id()
    }

    pub fn kind(&self) -> ShapeKind {
        self.as_annotation().kind()
    }

    pub fn origin(&self) -> Point {
        self.as_annotation().origin()
    }

    pub fn bounds(&self) -> Bounds {
        self.as_annotation().bounds()
    }

    pub fn is_selected(&self) -> bool {
        self.as_annotation().is_selected()
    }

    pub fn as_annotation(&self) -> &dyn Annotation {
        match self {
            ShapeRef::Square(square) => *square,
            ShapeRef::Rectangle(rect) => *rect,
        }
    }
}

/// Applies the minimum-size floor. NaN collapses to the floor as well.
pub fn clamp_size(size: f64) -> f64 {
    size.max(MIN_SHAPE_SIZE)
}
