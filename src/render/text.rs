//! Text outlines from font glyphs
//!
//! Glyph outlines are converted to a single tiny-skia path laid out on a
//! baseline at y = 0, starting at x = 0.

use ab_glyph::{Font, FontArc, OutlineCurve};
use tiny_skia::{Path, PathBuilder, Transform};

use super::geometry;
use crate::domain::Point;

/// A laid-out line of text
pub struct TextOutline {
    pub path: Path,
    /// Total advance width in pixels
    pub width: f32,
    /// Shift from baseline to the middle of the line box
    pub baseline_offset: f32,
}

impl TextOutline {
    /// Transform centering the line on `center`, rotated about it
    pub fn centered_at(&self, center: Point, rotation: f32) -> Transform {
        Transform::from_rotate_at(rotation, center.x, center.y).pre_translate(
            center.x - self.width * 0.5,
            center.y + self.baseline_offset,
        )
    }
}

/// Lay out `text` at `font_size` pixels (em size)
///
/// Returns None for empty or whitespace-only text.
pub fn outline_text(font: &FontArc, text: &str, font_size: f32) -> Option<TextOutline> {
    if text.is_empty() || !(font_size > 0.0) {
        return None;
    }
    let scale = font_size / font.units_per_em().unwrap_or(1000.0);

    let mut pb = PathBuilder::new();
    let mut caret = 0.0;
    let mut previous = None;
    for ch in text.chars() {
        let id = font.glyph_id(ch);
        if let Some(previous) = previous {
            caret += font.kern_unscaled(previous, id) * scale;
        }
        if let Some(outline) = font.outline(id) {
            append_curves(&mut pb, &outline.curves, caret, scale);
        }
        caret += font.h_advance_unscaled(id) * scale;
        previous = Some(id);
    }

    let path = pb.finish()?;
    Some(TextOutline {
        path,
        width: caret,
        baseline_offset: geometry::text::middle_baseline_offset(
            font.ascent_unscaled() * scale,
            font.descent_unscaled() * scale,
        ),
    })
}

/// Append glyph curves (font units, y-up) shifted right by `dx` pixels
fn append_curves(pb: &mut PathBuilder, curves: &[OutlineCurve], dx: f32, scale: f32) {
    let map = |p: &ab_glyph::Point| (dx + p.x * scale, -p.y * scale);
    let mut cursor: Option<(f32, f32)> = None;

    for curve in curves {
        let start = match curve {
            OutlineCurve::Line(p0, _) | OutlineCurve::Quad(p0, _, _) | OutlineCurve::Cubic(p0, _, _, _) => {
                map(p0)
            }
        };
        if cursor != Some(start) {
            if cursor.is_some() {
                pb.close();
            }
            pb.move_to(start.0, start.1);
        }

        let end = match curve {
            OutlineCurve::Line(_, p1) => {
                let p1 = map(p1);
                pb.line_to(p1.0, p1.1);
                p1
            }
            OutlineCurve::Quad(_, c, p1) => {
                let (c, p1) = (map(c), map(p1));
                pb.quad_to(c.0, c.1, p1.0, p1.1);
                p1
            }
            OutlineCurve::Cubic(_, c1, c2, p1) => {
                let (c1, c2, p1) = (map(c1), map(c2), map(p1));
                pb.cubic_to(c1.0, c1.1, c2.0, c2.1, p1.0, p1.1);
                p1
            }
        };
        cursor = Some(end);
    }

    if cursor.is_some() {
        pb.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::testing::tuffy;

    #[test]
    fn test_outline_width_grows_with_size() {
        let font = tuffy();
        let small = outline_text(&font, "Map", 24.0).unwrap();
        let large = outline_text(&font, "Map", 96.0).unwrap();
        assert!(small.width > 0.0);
        assert!((large.width / small.width - 4.0).abs() < 0.01);
        assert!((large.baseline_offset / small.baseline_offset - 4.0).abs() < 0.01);
    }

    #[test]
    fn test_blank_text_has_no_outline() {
        let font = tuffy();
        assert!(outline_text(&font, "", 24.0).is_none());
        assert!(outline_text(&font, "   ", 24.0).is_none());
        assert!(outline_text(&font, "x", 0.0).is_none());
    }

    #[test]
    fn test_centered_outline_straddles_center() {
        let font = tuffy();
        let outline = outline_text(&font, "HHHH", 40.0).unwrap();
        let center = Point::new(200.0, 100.0);
        let bounds = outline
            .path
            .clone()
            .transform(outline.centered_at(center, 0.0))
            .unwrap()
            .bounds();
        let mid_x = (bounds.left() + bounds.right()) / 2.0;
        let mid_y = (bounds.top() + bounds.bottom()) / 2.0;
        assert!((mid_x - center.x).abs() < 4.0, "ink centered at x={mid_x}");
        // Cap height sits above the middle baseline, never far from it
        assert!((mid_y - center.y).abs() < 10.0, "ink centered at y={mid_y}");
    }
}
