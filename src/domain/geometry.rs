//! Geometric types for the print viewport and overlay coordinates

use serde::{Deserialize, Serialize};

/// Fraction of the container the print viewport may occupy
pub const VIEWPORT_FILL: f32 = 0.9;

/// Viewport width at which a nominal font size maps 1:1 to pixels
pub const FONT_REFERENCE_WIDTH: f32 = 1000.0;

/// A position in pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Component-wise `self - other`
    pub fn offset_from(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    pub fn translate(self, dx: f32, dy: f32) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }

    /// Rotate around `center` by `degrees` (clockwise in screen space)
    pub fn rotate_around(self, center: Point, degrees: f32) -> Point {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let dx = self.x - center.x;
        let dy = self.y - center.y;
        Point::new(
            center.x + dx * cos - dy * sin,
            center.y + dx * sin + dy * cos,
        )
    }
}

/// A width/height pair in pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Largest size with the given aspect ratio that fits in 90% of the container
///
/// Returns an empty size for degenerate containers or ratios.
pub fn fit_to_container(container: Size, aspect_ratio: f32) -> Size {
    if container.is_empty() || !(aspect_ratio > 0.0) || !aspect_ratio.is_finite() {
        return Size::default();
    }
    if container.width / container.height > aspect_ratio {
        let height = container.height * VIEWPORT_FILL;
        Size::new(height * aspect_ratio, height)
    } else {
        let width = container.width * VIEWPORT_FILL;
        Size::new(width, width / aspect_ratio)
    }
}

/// On-screen rectangle whose aspect ratio mirrors the selected output size.
///
/// Overlay positions live in this rectangle's local pixel space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PrintViewport {
    /// Top-left corner in window coordinates
    pub origin: Point,
    pub size: Size,
}

impl PrintViewport {
    /// Fit the viewport into a container, centered within it
    pub fn fit(container_origin: Point, container: Size, aspect_ratio: f32) -> Self {
        let size = fit_to_container(container, aspect_ratio);
        let origin = container_origin.translate(
            (container.width - size.width).max(0.0) / 2.0,
            (container.height - size.height).max(0.0) / 2.0,
        );
        Self { origin, size }
    }

    pub fn width(&self) -> f32 {
        self.size.width
    }

    pub fn height(&self) -> f32 {
        self.size.height
    }

    /// Center in viewport-local coordinates
    pub fn center(&self) -> Point {
        self.size.center()
    }

    /// Convert a window-space pointer position to viewport-local coordinates
    pub fn to_local(&self, window: Point) -> Point {
        window.offset_from(self.origin)
    }

    /// On-screen pixel size for a resolution-independent font size
    pub fn display_font_size(&self, nominal: f32) -> f32 {
        nominal * self.size.width / FONT_REFERENCE_WIDTH
    }

    /// Ratio between a target raster width and the current on-screen width
    pub fn export_scale(&self, target_width: u32) -> Option<f32> {
        (self.size.width > 0.0).then(|| target_width as f32 / self.size.width)
    }

    /// Map a point from a previous viewport size onto this one, keeping its fractional placement
    pub fn rescale_from(&self, previous: Size, point: Point) -> Point {
        if previous.is_empty() || self.size.is_empty() {
            return point;
        }
        Point::new(
            point.x * self.size.width / previous.width,
            point.y * self.size.height / previous.height,
        )
    }
}
