//! Icon paths from SVG path data

use svgtypes::{SimplePathSegment, SimplifyingPathParser};
use tiny_skia::{Path, PathBuilder, Transform};

use super::geometry::icon;
use crate::domain::Point;

/// Parse path data (absolute, relative, arcs, shorthand) into a tiny-skia path
///
/// Returns None for empty or malformed data.
pub fn icon_path(data: &str) -> Option<Path> {
    let mut pb = PathBuilder::new();
    for segment in SimplifyingPathParser::from(data) {
        let segment = match segment {
            Ok(segment) => segment,
            Err(err) => {
                log::warn!("Invalid icon path data: {err}");
                return None;
            }
        };
        match segment {
            SimplePathSegment::MoveTo { x, y } => pb.move_to(x as f32, y as f32),
            SimplePathSegment::LineTo { x, y } => pb.line_to(x as f32, y as f32),
            SimplePathSegment::Quadratic { x1, y1, x, y } => {
                pb.quad_to(x1 as f32, y1 as f32, x as f32, y as f32)
            }
            SimplePathSegment::CurveTo {
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => pb.cubic_to(
                x1 as f32, y1 as f32, x2 as f32, y2 as f32, x as f32, y as f32,
            ),
            SimplePathSegment::ClosePath => pb.close(),
        }
    }
    pb.finish()
}

/// Transform mapping the icon box onto a `size` square centered on `center`
pub fn icon_transform(center: Point, size: f32, rotation: f32) -> Transform {
    let unit = icon::unit_scale(size);
    Transform::from_rotate_at(rotation, center.x, center.y)
        .pre_translate(center.x - size * 0.5, center.y - size * 0.5)
        .pre_scale(unit, unit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ICONS;

    #[test]
    fn test_catalog_icons_parse() {
        for choice in ICONS.iter() {
            let path = icon_path(choice.path).unwrap();
            let bounds = path.bounds();
            assert!(bounds.left() >= 0.0 && bounds.right() <= 24.0, "{}", choice.name);
            assert!(bounds.top() >= 0.0 && bounds.bottom() <= 24.0, "{}", choice.name);
        }
    }

    #[test]
    fn test_arcs_are_supported() {
        let path = icon_path("M2 12a10 10 0 1 0 20 0a10 10 0 1 0 -20 0z").unwrap();
        assert!(path.bounds().width() > 19.0);
    }

    #[test]
    fn test_malformed_path_is_rejected() {
        assert!(icon_path("").is_none());
        assert!(icon_path("M 1 1 L nonsense").is_none());
    }

    #[test]
    fn test_transform_centers_box() {
        let ts = icon_transform(Point::new(100.0, 50.0), 48.0, 0.0);
        let mut points = [tiny_skia::Point::from_xy(12.0, 12.0)];
        ts.map_points(&mut points);
        assert!((points[0].x - 100.0).abs() < 1e-4);
        assert!((points[0].y - 50.0).abs() < 1e-4);
    }
}
