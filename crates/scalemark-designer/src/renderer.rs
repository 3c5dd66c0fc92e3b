//! Raster export of the annotated view
//! Flattens the rendered background and the overlay scene into one image
//! using tiny-skia for anti-aliased 2D drawing.
//!
//! Features:
//! - Rounded shape outlines with selection-dependent colours
//! - Theme-dependent handle and guide colours
//! - Monospace labels with a contrasting halo
//! - Optional one-pixel theme border

use std::path::Path;

use image::{ImageFormat, RgbaImage};
use tiny_skia::{
    Color, ColorU8, FillRule, Paint, Path as SkPath, PathBuilder, Pixmap, PixmapPaint,
    PremultipliedColorU8, Rect, Stroke, StrokeDash, Transform,
};

use scalemark_core::constants::{LABEL_FONT_SIZE, LABEL_HALO_WIDTH, OUTLINE_CORNER_RADIUS};
use scalemark_core::{ExportError, Theme};

use crate::font_manager::{label_font, rasterize_line};
use crate::hit_test::HandleKind;
use crate::model::{Bounds, Point};
use crate::overlay::{OverlayNode, OverlayScene};
use crate::palette::{parse_hex, Palette};

/// How the export is decorated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    pub theme: Theme,
    pub draw_border: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            draw_border: true,
        }
    }
}

fn color(hex: &str) -> Color {
    parse_hex(hex)
        .map(|(r, g, b)| Color::from_rgba8(r, g, b, 255))
        .unwrap_or(Color::BLACK)
}

fn paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color);
    paint.anti_alias = true;
    paint
}

/// Flattens `background` and `scene` into a new image of the background's size.
pub fn flatten(
    background: &RgbaImage,
    scene: &OverlayScene,
    options: &ExportOptions,
) -> Result<RgbaImage, ExportError> {
    let (width, height) = background.dimensions();
    let mut pixmap = Pixmap::new(width, height).ok_or(ExportError::Surface { width, height })?;

    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(background.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }

    let palette = Palette::for_theme(options.theme);
    for node in scene.nodes() {
        draw_node(&mut pixmap, node, &palette);
    }

    if options.draw_border && width > 1 && height > 1 {
        if let Some(rect) = Rect::from_xywh(0.5, 0.5, width as f32 - 1.0, height as f32 - 1.0) {
            let path = PathBuilder::from_rect(rect);
            let stroke = Stroke {
                width: 1.0,
                ..Default::default()
            };
            pixmap.stroke_path(
                &path,
                &paint(color(palette.border)),
                &stroke,
                Transform::identity(),
                None,
            );
        }
    }

    let data: Vec<u8> = pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();
    RgbaImage::from_raw(width, height, data).ok_or(ExportError::Surface { width, height })
}

fn draw_node(pixmap: &mut Pixmap, node: &OverlayNode, palette: &Palette) {
    match node {
        OverlayNode::Outline { bounds, style, .. } => {
            let Some(path) = rounded_rect(bounds, OUTLINE_CORNER_RADIUS) else {
                return;
            };
            let (r, g, b, a) = style.fill();
            let fill = Color::from_rgba8(r, g, b, (a * 255.0).round() as u8);
            pixmap.fill_path(&path, &paint(fill), FillRule::Winding, Transform::identity(), None);
            let stroke = Stroke {
                width: 2.0,
                ..Default::default()
            };
            pixmap.stroke_path(
                &path,
                &paint(color(style.stroke())),
                &stroke,
                Transform::identity(),
                None,
            );
        }
        OverlayNode::Handle {
            kind,
            center,
            radius,
            ..
        } => {
            let Some(path) = PathBuilder::from_circle(center.x as f32, center.y as f32, *radius as f32)
            else {
                return;
            };
            let fill = match kind {
                HandleKind::Corner => palette.accent,
                HandleKind::Move | HandleKind::Width | HandleKind::Height => palette.neutral_handle,
            };
            pixmap.fill_path(
                &path,
                &paint(color(fill)),
                FillRule::Winding,
                Transform::identity(),
                None,
            );
            let stroke = Stroke {
                width: 2.0,
                ..Default::default()
            };
            pixmap.stroke_path(
                &path,
                &paint(color(palette.stroke_text)),
                &stroke,
                Transform::identity(),
                None,
            );
        }
        OverlayNode::GuideLine { from, to } => {
            let mut pb = PathBuilder::new();
            pb.move_to(from.x as f32, from.y as f32);
            pb.line_to(to.x as f32, to.y as f32);
            let Some(path) = pb.finish() else {
                return;
            };
            let stroke = Stroke {
                width: 2.0,
                dash: StrokeDash::new(vec![5.0, 6.0], 0.0),
                ..Default::default()
            };
            pixmap.stroke_path(
                &path,
                &paint(color(palette.accent)),
                &stroke,
                Transform::identity(),
                None,
            );
        }
        OverlayNode::Label { position, text, .. } => draw_label(pixmap, position, text, palette),
    }
}

/// Draws `text` centered on `position` with its baseline at `position.y`,
/// over a halo in the palette's stroke colour.
fn draw_label(pixmap: &mut Pixmap, position: &Point, text: &str, palette: &Palette) {
    let Some(font) = label_font() else {
        return;
    };
    let halo_radius = (LABEL_HALO_WIDTH / 2.0) as f32;
    let Some(mask) = rasterize_line(
        font,
        text,
        LABEL_FONT_SIZE as f32,
        position.x as f32,
        position.y as f32,
        halo_radius.ceil() as u32 + 1,
    ) else {
        return;
    };
    let Some(mut layer) = Pixmap::new(mask.width, mask.height) else {
        return;
    };

    let ink = parse_hex(palette.text).unwrap_or((0, 0, 0));
    let glow = parse_hex(palette.stroke_text).unwrap_or((255, 255, 255));
    let halo = mask.dilated(halo_radius);
    for ((dst, &text_cov), &halo_cov) in layer
        .pixels_mut()
        .iter_mut()
        .zip(mask.coverage())
        .zip(&halo)
    {
        *dst = text_over_halo(ink, text_cov, glow, halo_cov);
    }

    pixmap.draw_pixmap(
        mask.left,
        mask.top,
        layer.as_ref(),
        &PixmapPaint::default(),
        Transform::identity(),
        None,
    );
}

/// Source-over of text coverage `ta` on halo coverage `ha`, premultiplied.
fn text_over_halo(ink: (u8, u8, u8), ta: f32, glow: (u8, u8, u8), ha: f32) -> PremultipliedColorU8 {
    let alpha = ta + ha * (1.0 - ta);
    let a = (alpha * 255.0).round().clamp(0.0, 255.0) as u8;
    let channel = |t: u8, g: u8| {
        let v = f32::from(t) * ta + f32::from(g) * ha * (1.0 - ta);
        v.round().min(f32::from(a)) as u8
    };
    PremultipliedColorU8::from_rgba(
        channel(ink.0, glow.0),
        channel(ink.1, glow.1),
        channel(ink.2, glow.2),
        a,
    )
    .unwrap_or(PremultipliedColorU8::TRANSPARENT)
}

/// Rounded rectangle path; the radius shrinks to fit small shapes.
fn rounded_rect(bounds: &Bounds, radius: f64) -> Option<SkPath> {
    let x = bounds.x as f32;
    let y = bounds.y as f32;
    let w = bounds.width as f32;
    let h = bounds.height as f32;
    if w <= 0.0 || h <= 0.0 {
        return None;
    }
    let r = (radius as f32).min(w / 2.0).min(h / 2.0);

    let mut pb = PathBuilder::new();
    pb.move_to(x + r, y);
    pb.line_to(x + w - r, y);
    pb.quad_to(x + w, y, x + w, y + r);
    pb.line_to(x + w, y + h - r);
    pb.quad_to(x + w, y + h, x + w - r, y + h);
    pb.line_to(x + r, y + h);
    pb.quad_to(x, y + h, x, y + h - r);
    pb.line_to(x, y + r);
    pb.quad_to(x, y, x + r, y);
    pb.close();
    pb.finish()
}

/// Encodes `image` as PNG at `path`.
pub fn write_png(image: &RgbaImage, path: &Path) -> Result<(), ExportError> {
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|e| ExportError::Write {
            reason: e.to_string(),
        })?;
    tracing::info!(
        "Exported {}x{} PNG to {}",
        image.width(),
        image.height(),
        path.display()
    );
    Ok(())
}
