//! Overlay scene derived from the annotation model.
//!
//! The overlay is rebuilt from scratch after every event. Nothing here
//! keeps state: the same shapes, gesture and calibration always produce the
//! same scene. Drawing surfaces (SVG, raster export) consume the scene.

use scalemark_core::constants::{GUIDE_LABEL_OFFSET, LABEL_OFFSET};
use scalemark_core::format_meters;

use crate::calibration::Calibration;
use crate::gesture::{rect_draft_bounds, square_draft_bounds, ActiveGesture};
use crate::hit_test::{handles_for, HandleKind};
use crate::model::{Bounds, Point, ShapeId, ShapeKind, ShapeRef};
use crate::shape_store::ShapeStore;

/// Outline styling, derived from the selection flag on every render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutlineStyle {
    Normal,
    Selected,
    /// Preview of a shape being drawn.
    Draft,
}

impl OutlineStyle {
    pub fn for_selected(selected: bool) -> Self {
        if selected {
            Self::Selected
        } else {
            Self::Normal
        }
    }

    /// Stroke colour as a CSS hex string.
    pub fn stroke(self) -> &'static str {
        match self {
            Self::Normal | Self::Draft => "#6ea8fe",
            Self::Selected => "#ff4fa3",
        }
    }

    /// Fill colour as `(r, g, b, alpha)`.
    pub fn fill(self) -> (u8, u8, u8, f32) {
        match self {
            Self::Normal | Self::Draft => (102, 163, 255, 0.12),
            Self::Selected => (255, 79, 163, 0.18),
        }
    }
}

/// One drawable element of the overlay.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayNode {
    /// Rounded body outline of a shape or draft.
    Outline {
        shape_id: Option<ShapeId>,
        kind: ShapeKind,
        bounds: Bounds,
        style: OutlineStyle,
    },
    /// Text centered horizontally on `position`, baseline at `position.y`.
    Label {
        shape_id: Option<ShapeId>,
        position: Point,
        text: String,
    },
    Handle {
        shape_id: ShapeId,
        kind: HandleKind,
        center: Point,
        radius: f64,
        emphasized: bool,
    },
    /// Dashed calibration guide.
    GuideLine { from: Point, to: Point },
}

/// Ordered list of overlay nodes; later nodes are drawn on top.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OverlayScene {
    nodes: Vec<OverlayNode>,
}

impl OverlayScene {
    pub fn nodes(&self) -> &[OverlayNode] {
        &self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Label texts in draw order.
    pub fn labels(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .filter_map(|node| match node {
                OverlayNode::Label { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Label attached to a shape, if the shape is in the scene.
    pub fn label_for(&self, id: ShapeId) -> Option<&str> {
        self.nodes.iter().find_map(|node| match node {
            OverlayNode::Label {
                shape_id: Some(shape_id),
                text,
                ..
            } if *shape_id == id => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn handle_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| matches!(node, OverlayNode::Handle { .. }))
            .count()
    }

    pub fn push(&mut self, node: OverlayNode) {
        self.nodes.push(node);
    }
}

impl FromIterator<OverlayNode> for OverlayScene {
    fn from_iter<I: IntoIterator<Item = OverlayNode>>(iter: I) -> Self {
        Self {
            nodes: iter.into_iter().collect(),
        }
    }
}

/// Builds the overlay for the current model.
///
/// Drafts come first, then every square, then every rectangle. Each shape
/// contributes its outline, label and handles in that order.
pub fn render_overlay(
    store: &ShapeStore,
    gesture: Option<&ActiveGesture>,
    calibration: &Calibration,
) -> OverlayScene {
    let mut scene = OverlayScene::default();

    if let Some(gesture) = gesture {
        push_draft(&mut scene, gesture, calibration);
    }

    for shape in store.iter() {
        push_shape(&mut scene, shape, calibration);
    }

    scene
}

fn push_draft(scene: &mut OverlayScene, gesture: &ActiveGesture, calibration: &Calibration) {
    match *gesture {
        ActiveGesture::CalibrationDraft { start, current } => {
            scene.push(OverlayNode::GuideLine {
                from: start,
                to: current,
            });
            let pixels = start.distance_to(&current);
            let text = match calibration.to_meters(pixels) {
                Some(meters) => format_meters(meters),
                None => format!("{:.1} px", pixels),
            };
            let mid = start.midpoint(&current);
            scene.push(OverlayNode::Label {
                shape_id: None,
                position: Point::new(mid.x, mid.y - GUIDE_LABEL_OFFSET),
                text,
            });
        }
        ActiveGesture::SquareDraft { start, current } => scene.push(OverlayNode::Outline {
            shape_id: None,
            kind: ShapeKind::Square,
            bounds: square_draft_bounds(start, current),
            style: OutlineStyle::Draft,
        }),
        ActiveGesture::RectDraft { start, current } => scene.push(OverlayNode::Outline {
            shape_id: None,
            kind: ShapeKind::Rectangle,
            bounds: rect_draft_bounds(start, current),
            style: OutlineStyle::Draft,
        }),
        _ => {}
    }
}

fn push_shape(scene: &mut OverlayScene, shape: ShapeRef<'_>, calibration: &Calibration) {
    let bounds = shape.bounds();
    let id = shape.id();

    scene.push(OverlayNode::Outline {
        shape_id: Some(id),
        kind: shape.kind(),
        bounds,
        style: OutlineStyle::for_selected(shape.is_selected()),
    });
    scene.push(OverlayNode::Label {
        shape_id: Some(id),
        position: Point::new(bounds.x + bounds.width / 2.0, bounds.y - LABEL_OFFSET),
        text: shape_label(shape, calibration),
    });
    for handle in handles_for(shape) {
        scene.push(OverlayNode::Handle {
            shape_id: handle.shape_id,
            kind: handle.kind,
            center: handle.center,
            radius: handle.radius,
            emphasized: handle.emphasized,
        });
    }
}

/// Dimension label of a shape, in real units when calibrated.
pub fn shape_label(shape: ShapeRef<'_>, calibration: &Calibration) -> String {
    match shape {
        ShapeRef::Square(square) => match calibration.to_meters(square.size()) {
            Some(meters) => format!("Edge: {}", format_meters(meters)),
            None => format!("Edge: {} px", square.size().round()),
        },
        ShapeRef::Rectangle(rect) => {
            match (
                calibration.to_meters(rect.width()),
                calibration.to_meters(rect.height()),
            ) {
                (Some(w), Some(h)) => {
                    format!("Size: {} × {}", format_meters(w), format_meters(h))
                }
                _ => format!(
                    "Size: {} × {} px",
                    rect.width().round(),
                    rect.height().round()
                ),
            }
        }
    }
}
