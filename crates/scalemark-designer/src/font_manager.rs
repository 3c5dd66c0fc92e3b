//! Label font lookup and glyph rasterisation.
//!
//! A system monospace face is found through fontdb. When none matches,
//! the bundled DejaVu Sans Mono is used instead.

use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use rusttype::{point as rt_point, Font, Scale};
use std::sync::OnceLock;

/// Tried in order, same stack as the SVG label style.
const LABEL_FAMILIES: [Family<'static>; 6] = [
    Family::Name("SF Mono"),
    Family::Name("Menlo"),
    Family::Name("Consolas"),
    Family::Name("Liberation Mono"),
    Family::Name("DejaVu Sans Mono"),
    Family::Monospace,
];

static BUNDLED_MONO: &[u8] = include_bytes!("../../../assets/fonts/dejavu/DejaVuSansMono.ttf");

fn system_font() -> Option<Font<'static>> {
    let mut db = Database::new();
    db.load_system_fonts();

    let query = Query {
        families: &LABEL_FAMILIES,
        weight: Weight::NORMAL,
        stretch: Stretch::Normal,
        style: Style::Normal,
    };
    let id = db.query(&query)?;
    db.with_face_data(id, |data, index| {
        Font::try_from_vec_and_index(data.to_vec(), index)
    })
    .flatten()
}

/// The font used for raster labels, loaded once per process.
pub fn label_font() -> Option<&'static Font<'static>> {
    static FONT: OnceLock<Option<Font<'static>>> = OnceLock::new();
    FONT.get_or_init(|| {
        let font = system_font().or_else(|| {
            tracing::debug!("No system monospace font, using bundled DejaVu Sans Mono");
            Font::try_from_bytes(BUNDLED_MONO)
        });
        if font.is_none() {
            tracing::warn!("No usable label font; raster labels are skipped");
        }
        font
    })
    .as_ref()
}

/// Scale for a font size given in CSS pixels (the em square), not in
/// rusttype's ascent-to-descent height.
fn em_scale(font: &Font<'_>, size: f32) -> Scale {
    let v = font.v_metrics_unscaled();
    let units = f32::from(font.units_per_em());
    let height = v.ascent - v.descent;
    if units > 0.0 && height > 0.0 {
        Scale::uniform(size * height / units)
    } else {
        Scale::uniform(size)
    }
}

/// Advance width of `text` at `scale`.
fn line_width(font: &Font<'_>, scale: Scale, text: &str) -> f32 {
    font.layout(text, scale, rt_point(0.0, 0.0))
        .last()
        .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
        .unwrap_or(0.0)
}

/// Anti-aliased coverage of one line of text in device pixels.
#[derive(Debug, Clone)]
pub struct GlyphMask {
    /// Device column of the mask's first pixel.
    pub left: i32,
    /// Device row of the mask's first pixel.
    pub top: i32,
    pub width: u32,
    pub height: u32,
    coverage: Vec<f32>,
}

impl GlyphMask {
    /// Row-major coverage in `0.0..=1.0`.
    pub fn coverage(&self) -> &[f32] {
        &self.coverage
    }

    /// Coverage grown outward by `radius` pixels with a one-pixel soft edge.
    pub fn dilated(&self, radius: f32) -> Vec<f32> {
        let reach = radius.ceil() as i32;
        let (w, h) = (self.width as i32, self.height as i32);
        let mut out = vec![0.0; self.coverage.len()];

        for y in 0..h {
            for x in 0..w {
                let mut best = 0.0f32;
                for dy in -reach..=reach {
                    for dx in -reach..=reach {
                        let (sx, sy) = (x + dx, y + dy);
                        if sx < 0 || sy < 0 || sx >= w || sy >= h {
                            continue;
                        }
                        let distance = ((dx * dx + dy * dy) as f32).sqrt();
                        let falloff = (radius + 0.5 - distance).clamp(0.0, 1.0);
                        best = best.max(self.coverage[(sy * w + sx) as usize] * falloff);
                    }
                }
                out[(y * w + x) as usize] = best;
            }
        }
        out
    }
}

/// Rasterises `text` centered on `center_x` with its baseline at
/// `baseline`. The mask is padded by `pad` pixels on every side.
///
/// Returns `None` when nothing would be inked, e.g. for blank text.
pub fn rasterize_line(
    font: &Font<'_>,
    text: &str,
    size: f32,
    center_x: f32,
    baseline: f32,
    pad: u32,
) -> Option<GlyphMask> {
    let scale = em_scale(font, size);
    let start = rt_point(center_x - line_width(font, scale, text) / 2.0, baseline);
    let glyphs: Vec<_> = font.layout(text, scale, start).collect();

    let (min_x, min_y, max_x, max_y) = glyphs
        .iter()
        .filter_map(|g| g.pixel_bounding_box())
        .fold(None, |acc: Option<(i32, i32, i32, i32)>, bb| {
            Some(match acc {
                None => (bb.min.x, bb.min.y, bb.max.x, bb.max.y),
                Some((x0, y0, x1, y1)) => (
                    x0.min(bb.min.x),
                    y0.min(bb.min.y),
                    x1.max(bb.max.x),
                    y1.max(bb.max.y),
                ),
            })
        })?;

    let pad = pad as i32;
    let left = min_x - pad;
    let top = min_y - pad;
    let width = (max_x - min_x + 2 * pad) as u32;
    let height = (max_y - min_y + 2 * pad) as u32;
    let mut coverage = vec![0.0f32; (width * height) as usize];

    for glyph in &glyphs {
        let Some(bb) = glyph.pixel_bounding_box() else {
            continue;
        };
        glyph.draw(|gx, gy, v| {
            let px = (bb.min.x + gx as i32 - left) as u32;
            let py = (bb.min.y + gy as i32 - top) as u32;
            if let Some(cell) = coverage.get_mut((py * width + px) as usize) {
                *cell = (*cell + v).min(1.0);
            }
        });
    }

    Some(GlyphMask {
        left,
        top,
        width,
        height,
        coverage,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundled() -> Font<'static> {
        Font::try_from_bytes(BUNDLED_MONO).unwrap()
    }

    #[test]
    fn test_label_font_is_available() {
        assert!(label_font().is_some());
    }

    #[test]
    fn test_mask_is_centered_above_baseline() {
        let font = bundled();
        let mask = rasterize_line(&font, "Edge: 40 px", 12.0, 100.0, 50.0, 2).unwrap();

        let right = mask.left + mask.width as i32;
        assert!((mask.left + right - 200).abs() <= 4, "{} .. {}", mask.left, right);
        // Glyphs sit on the baseline; only the padding reaches below it.
        assert!(mask.top < 50);
        assert!(mask.top + mask.height as i32 <= 50 + 2 + 4);
        assert!(mask.coverage().iter().any(|&c| c > 0.5));
    }

    #[test]
    fn test_blank_text_has_no_mask() {
        assert!(rasterize_line(&bundled(), "   ", 12.0, 0.0, 0.0, 2).is_none());
        assert!(rasterize_line(&bundled(), "", 12.0, 0.0, 0.0, 2).is_none());
    }

    #[test]
    fn test_dilation_grows_coverage() {
        let font = bundled();
        let mask = rasterize_line(&font, "I", 12.0, 20.0, 20.0, 3).unwrap();
        let inked = |v: &[f32]| v.iter().filter(|&&c| c > 0.1).count();

        let halo = mask.dilated(1.5);

        assert!(inked(&halo) > inked(mask.coverage()));
        for (grown, original) in halo.iter().zip(mask.coverage()) {
            assert!(grown >= original);
        }
    }
}
