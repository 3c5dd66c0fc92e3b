//! Deletion of annotations.
//!
//! The deleter works on borrowed collections and a predicate; it never
//! reaches into session state. The geometry of survivors is untouched.

use std::fmt;

use crate::model::{Annotation, Rectangle, Square};

/// Keys that delete the current selection.
pub fn is_delete_key(key: &str) -> bool {
    matches!(key, "Delete" | "Backspace")
}

/// Result of a delete action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeleteOutcome {
    pub removed: usize,
}

impl DeleteOutcome {
    pub fn is_empty(&self) -> bool {
        self.removed == 0
    }

    /// Status line shown to the user.
    pub fn message(&self) -> String {
        if self.removed == 0 {
            "No shape selected".to_string()
        } else {
            format!("Deleted {} shape(s)", self.removed)
        }
    }
}

impl fmt::Display for DeleteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// Removes every shape matched by its predicate.
pub struct Deletion<P> {
    predicate: P,
}

impl Deletion<fn(&dyn Annotation) -> bool> {
    /// Deletion of the selected shapes.
    pub fn selected() -> Self {
        fn is_selected(shape: &dyn Annotation) -> bool {
            shape.is_selected()
        }
        Self {
            predicate: is_selected,
        }
    }
}

impl<P> Deletion<P>
where
    P: Fn(&dyn Annotation) -> bool,
{
    pub fn new(predicate: P) -> Self {
        Self { predicate }
    }

    /// Filters both collections in place and reports how many shapes went.
    pub fn run(&self, squares: &mut Vec<Square>, rectangles: &mut Vec<Rectangle>) -> DeleteOutcome {
        let before = squares.len() + rectangles.len();
        squares.retain(|s| !(self.predicate)(s as &dyn Annotation));
        rectangles.retain(|r| !(self.predicate)(r as &dyn Annotation));
        let removed = before - squares.len() - rectangles.len();

        if removed > 0 {
            tracing::info!("Deleted {} shape(s)", removed);
        }
        DeleteOutcome { removed }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Point;

    #[test]
    fn test_delete_keys() {
        assert!(is_delete_key("Delete"));
        assert!(is_delete_key("Backspace"));
        assert!(!is_delete_key("Escape"));
        assert!(!is_delete_key("d"));
    }

    #[test]
    fn test_messages() {
        assert_eq!(DeleteOutcome { removed: 0 }.message(), "No shape selected");
        assert_eq!(DeleteOutcome { removed: 2 }.message(), "Deleted 2 shape(s)");
    }

    #[test]
    fn test_custom_predicate() {
        let mut squares = vec![
            Square::new(Point::new(0.0, 0.0), 10.0),
            Square::new(Point::new(0.0, 0.0), 50.0),
        ];
        let mut rects = vec![Rectangle::new(Point::new(0.0, 0.0), 100.0, 10.0)];

        let wide = Deletion::new(|s: &dyn Annotation| s.bounds().width > 20.0);
        let outcome = wide.run(&mut squares, &mut rects);

        assert_eq!(outcome.removed, 2);
        assert_eq!(squares.len(), 1);
        assert!(rects.is_empty());
    }
}
