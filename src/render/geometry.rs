//! Shared geometry constants for poster rendering
//!
//! Used by both the preview (with editor chrome) and the export raster.

/// Icon geometry constants
pub mod icon {
    /// Side of the square box icon path data is authored in
    pub const VIEWBOX: f32 = 24.0;

    /// Scale from path units to pixels for an icon of `size` pixels
    #[inline]
    pub fn unit_scale(size: f32) -> f32 {
        size / VIEWBOX
    }
}

/// Text placement constants
pub mod text {
    /// Offset from the glyph baseline to the vertical middle of the line box.
    ///
    /// `ascent` is positive and `descent` negative, both already scaled.
    #[inline]
    pub fn middle_baseline_offset(ascent: f32, descent: f32) -> f32 {
        (ascent + descent) * 0.5
    }
}

/// Editor chrome constants (never drawn into exports)
pub mod chrome {
    /// Corner radius of the on-screen viewport in logical pixels
    pub const CORNER_RADIUS: f32 = 12.0;
    /// Center guide line thickness in logical pixels
    pub const GUIDE_WIDTH: f32 = 1.0;
    /// Center guide color
    pub const GUIDE_COLOR: [u8; 4] = [255, 64, 129, 255];
    /// Quarter-circle bezier approximation constant: 4/3 * (sqrt(2) - 1)
    pub const BEZIER_K: f32 = 0.552_284_8;
}

/// Clamp a corner radius so opposite corners never overlap
#[inline]
pub fn clamp_radius(radius: f32, width: f32, height: f32) -> f32 {
    radius.min(width * 0.5).min(height * 0.5).max(0.0)
}
