//! Poster rendering module
//!
//! This module contains:
//! - Geometry constants shared between preview and export rendering
//! - Export primitives derived from overlays
//! - Glyph and icon path construction
//! - Raster rendering using tiny-skia

pub mod geometry;
pub mod icon;
pub mod image;
pub mod primitive;
pub mod text;

pub use self::image::{Basemap, Chrome, Scene, render_preview, render_scene};
pub use primitive::{Drawable, FontChain, render_overlay_for_export};
