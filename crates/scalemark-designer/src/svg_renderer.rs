//! SVG serialisation of the overlay scene
//! Produces a standalone SVG document sized to the fitted canvas, with a
//! theme-dependent style block for labels, guides and handles.

use scalemark_core::constants::{LABEL_FONT_SIZE, LABEL_HALO_WIDTH, OUTLINE_CORNER_RADIUS};
use scalemark_core::Theme;

use crate::hit_test::HandleKind;
use crate::model::ShapeKind;
use crate::overlay::{OverlayNode, OverlayScene};
use crate::palette::Palette;

/// Style block embedded in every exported SVG.
pub fn style_block(theme: Theme) -> String {
    let palette = Palette::for_theme(theme);
    format!(
        "text.dim{{font-family:ui-monospace,SFMono-Regular,Menlo,Consolas,\"Liberation Mono\",monospace;\
font-size:{size}px;fill:{text};paint-order:stroke;stroke:{halo};stroke-width:{halo_width}px;}}\
.line-guide{{stroke:{accent};stroke-width:2;stroke-dasharray:5 6;fill:none;}}\
.handle{{fill:{accent};stroke:{halo};stroke-width:2;}}\
.handle[data-kind=\"move\"],.handle[data-kind=\"width\"],.handle[data-kind=\"height\"]{{fill:{neutral};}}",
        text = palette.text,
        halo = palette.stroke_text,
        accent = palette.accent,
        neutral = palette.neutral_handle,
        size = LABEL_FONT_SIZE,
        halo_width = LABEL_HALO_WIDTH,
    )
}

/// Renders the scene as an SVG document of `width` x `height` pixels.
pub fn render_svg(scene: &OverlayScene, width: u32, height: u32, theme: Theme) -> String {
    let mut svg = String::new();
    svg.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n",
        w = width,
        h = height
    ));
    svg.push_str(&format!("<style>{}</style>\n", style_block(theme)));

    for node in scene.nodes() {
        svg.push_str(&render_node(node));
        svg.push('\n');
    }

    svg.push_str("</svg>\n");
    svg
}

fn render_node(node: &OverlayNode) -> String {
    match node {
        OverlayNode::Outline {
            shape_id,
            kind,
            bounds,
            style,
        } => {
            let class = match kind {
                ShapeKind::Square => "square",
                ShapeKind::Rectangle => "rect",
            };
            let (r, g, b, a) = style.fill();
            let id_attr = shape_id
                .map(|id| format!(" data-id=\"{}\"", id))
                .unwrap_or_default();
            format!(
                "<rect class=\"{}\"{} x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"{r8}\" ry=\"{r8}\" \
stroke=\"{}\" fill=\"rgba({},{},{},{})\" stroke-width=\"2\"/>",
                class,
                id_attr,
                bounds.x,
                bounds.y,
                bounds.width,
                bounds.height,
                style.stroke(),
                r,
                g,
                b,
                a,
                r8 = OUTLINE_CORNER_RADIUS,
            )
        }
        OverlayNode::Label { position, text, .. } => format!(
            "<text class=\"dim\" x=\"{}\" y=\"{}\" text-anchor=\"middle\">{}</text>",
            position.x,
            position.y,
            escape_text(text)
        ),
        OverlayNode::Handle {
            shape_id,
            kind,
            center,
            radius,
            emphasized,
        } => {
            let kind = match kind {
                HandleKind::Move => "move",
                HandleKind::Corner => "corner",
                HandleKind::Width => "width",
                HandleKind::Height => "height",
            };
            let selected = if *emphasized {
                " data-selected=\"true\""
            } else {
                ""
            };
            format!(
                "<circle class=\"handle\" data-kind=\"{}\" data-id=\"{}\"{} cx=\"{}\" cy=\"{}\" r=\"{}\"/>",
                kind, shape_id, selected, center.x, center.y, radius
            )
        }
        OverlayNode::GuideLine { from, to } => format!(
            "<line class=\"line-guide\" x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\"/>",
            from.x, from.y, to.x, to.y
        ),
    }
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::Calibration;
    use crate::model::Point;
    use crate::overlay::render_overlay;
    use crate::shape_store::ShapeStore;

    #[test]
    fn test_svg_contains_shapes_and_handles() {
        let mut store = ShapeStore::new();
        let id = store.create_rectangle(Point::new(10.0, 10.0), 40.0, 20.0);
        store.set_selection(Some(id));
        let scene = render_overlay(&store, None, &Calibration::new());
        let svg = render_svg(&scene, 100, 80, Theme::Light);

        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains("viewBox=\"0 0 100 80\""));
        assert!(svg.contains("class=\"rect\""));
        assert!(svg.contains("stroke=\"#ff4fa3\""));
        assert!(svg.contains("Size: 40 × 20 px"));
        assert_eq!(svg.matches("<circle").count(), 4);
        assert!(svg.contains("data-selected=\"true\""));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_theme_changes_style_only() {
        let scene = OverlayScene::default();
        let light = render_svg(&scene, 10, 10, Theme::Light);
        let dark = render_svg(&scene, 10, 10, Theme::Dark);
        assert!(light.contains("#2456d6"));
        assert!(dark.contains("#6ea8fe"));
        assert_ne!(light, dark);
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("a<b & c>"), "a&lt;b &amp; c&gt;");
    }
}
