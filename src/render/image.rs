//! Poster rasterization using tiny-skia
//!
//! A scene is drawn basemap first, then overlays in list order, then (for
//! the on-screen preview only) the editor chrome.

use std::path::Path as FsPath;
use std::sync::Arc;

use anyhow::{Context, bail};
use image::{Rgba, RgbaImage, imageops};
use tiny_skia::{
    ColorU8, FillRule, IntSize, Mask, Paint, Path, PathBuilder, Pixmap, Rect, Transform,
};

use super::geometry::{self, chrome};
use super::icon::{icon_path, icon_transform};
use super::primitive::{Drawable, IconPrimitive, TextPrimitive, export_drawables};
use super::text::outline_text;
use crate::config::OverlayColor;
use crate::domain::{Overlay, PrintViewport};
use crate::drag::CenterGuides;
use crate::fonts::FontSet;

/// Map imagery underneath the overlays
#[derive(Clone, Debug)]
pub enum Basemap {
    Solid(OverlayColor),
    Image(RgbaImage),
}

impl Default for Basemap {
    fn default() -> Self {
        Basemap::Solid(OverlayColor::WHITE)
    }
}

impl Basemap {
    pub fn open(path: &FsPath) -> anyhow::Result<Self> {
        let img = image::open(path)
            .with_context(|| format!("failed to open basemap {}", path.display()))?;
        Ok(Basemap::Image(img.to_rgba8()))
    }

    /// Basemap pixels at exactly `width` x `height`
    fn raster(&self, width: u32, height: u32) -> RgbaImage {
        match self {
            Basemap::Solid(color) => RgbaImage::from_pixel(width, height, Rgba(color.to_rgba_u8())),
            Basemap::Image(img) if img.dimensions() == (width, height) => img.clone(),
            Basemap::Image(img) => {
                imageops::resize(img, width, height, imageops::FilterType::Lanczos3)
            }
        }
    }
}

/// Editor decorations, drawn over the preview and never into exports
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Chrome {
    pub guides: CenterGuides,
    pub rounded_corners: bool,
}

/// Everything needed to draw a poster, detached from the live session
#[derive(Clone, Debug)]
pub struct Scene {
    pub overlays: Vec<Overlay>,
    pub viewport: PrintViewport,
    pub basemap: Arc<Basemap>,
}

/// Draw `scene` into a `width` x `height` raster.
///
/// Overlay geometry is scaled uniformly by `width / viewport width`.
pub fn render_scene(
    scene: &Scene,
    width: u32,
    height: u32,
    fonts: &FontSet,
    chrome: Option<&Chrome>,
) -> anyhow::Result<RgbaImage> {
    if width == 0 || height == 0 {
        bail!("cannot render an empty {width}x{height} raster");
    }
    let Some(scale) = scene.viewport.export_scale(width) else {
        bail!("print viewport has no size");
    };

    let mut img = scene.basemap.raster(width, height);
    let drawables = export_drawables(&scene.overlays, &scene.viewport, scale);

    with_pixmap(&mut img, |pixmap| {
        for drawable in &drawables {
            draw_drawable(pixmap, drawable, fonts);
        }
        if let Some(chrome) = chrome {
            draw_chrome(pixmap, chrome, scale);
        }
    })?;

    Ok(img)
}

/// Draw `scene` at its on-screen size
pub fn render_preview(
    scene: &Scene,
    fonts: &FontSet,
    chrome: Option<&Chrome>,
) -> anyhow::Result<RgbaImage> {
    let width = scene.viewport.width().round() as u32;
    let height = scene.viewport.height().round() as u32;
    render_scene(scene, width, height, fonts, chrome)
}

/// Convert RgbaImage to Pixmap, apply drawing function, and copy back
fn with_pixmap(img: &mut RgbaImage, f: impl FnOnce(&mut Pixmap)) -> anyhow::Result<()> {
    let size = IntSize::from_wh(img.width(), img.height()).context("invalid raster size")?;
    let data = img
        .pixels()
        .flat_map(|p| {
            let c = ColorU8::from_rgba(p[0], p[1], p[2], p[3]).premultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();
    let mut pixmap = Pixmap::from_vec(data, size).context("raster buffer size mismatch")?;

    f(&mut pixmap);

    for (dst, src) in img.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    Ok(())
}

fn draw_drawable(pixmap: &mut Pixmap, drawable: &Drawable, fonts: &FontSet) {
    match drawable {
        Drawable::Text(text) => draw_text(pixmap, text, fonts),
        Drawable::Icon(icon) => draw_icon(pixmap, icon),
    }
}

fn draw_text(pixmap: &mut Pixmap, text: &TextPrimitive, fonts: &FontSet) {
    let Some(font) = fonts.get(text.fonts.families()) else {
        log::warn!(
            "No font available for {}, skipping text overlay {}",
            text.fonts.css(),
            text.id
        );
        return;
    };
    let Some(outline) = outline_text(font, &text.text, text.font_size) else {
        return;
    };
    fill(
        pixmap,
        &outline.path,
        text.color,
        outline.centered_at(text.center, text.rotation),
    );
}

fn draw_icon(pixmap: &mut Pixmap, icon: &IconPrimitive) {
    let Some(path) = icon_path(&icon.path) else {
        log::debug!("Skipping icon overlay {} with unusable path", icon.id);
        return;
    };
    fill(
        pixmap,
        &path,
        icon.color,
        icon_transform(icon.center, icon.size, icon.rotation),
    );
}

fn fill(pixmap: &mut Pixmap, path: &Path, [r, g, b, a]: [u8; 4], transform: Transform) {
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;
    pixmap.fill_path(path, &paint, FillRule::Winding, transform, None);
}

fn draw_chrome(pixmap: &mut Pixmap, chrome: &Chrome, scale: f32) {
    let (w, h) = (pixmap.width() as f32, pixmap.height() as f32);
    let thickness = (chrome::GUIDE_WIDTH * scale).round().max(1.0);

    let mut paint = Paint::default();
    let [r, g, b, a] = chrome::GUIDE_COLOR;
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = false;

    if chrome.guides.vertical
        && let Some(rect) = Rect::from_xywh(((w - thickness) / 2.0).round(), 0.0, thickness, h)
    {
        pixmap.fill_rect(rect, &paint, Transform::identity(), None);
    }
    if chrome.guides.horizontal
        && let Some(rect) = Rect::from_xywh(0.0, ((h - thickness) / 2.0).round(), w, thickness)
    {
        pixmap.fill_rect(rect, &paint, Transform::identity(), None);
    }

    if chrome.rounded_corners {
        let radius = geometry::clamp_radius(chrome::CORNER_RADIUS * scale, w, h);
        if let Some(path) = build_rounded_rect_path(w, h, radius)
            && let Some(mut mask) = Mask::new(pixmap.width(), pixmap.height())
        {
            mask.fill_path(&path, FillRule::Winding, true, Transform::identity());
            pixmap.apply_mask(&mask);
        }
    }
}

/// Build a rounded rectangle path using cubic bezier corners
fn build_rounded_rect_path(w: f32, h: f32, r: f32) -> Option<Path> {
    if r <= 0.0 {
        return Rect::from_xywh(0.0, 0.0, w, h).map(PathBuilder::from_rect);
    }
    let k = r * chrome::BEZIER_K;

    let mut pb = PathBuilder::new();
    pb.move_to(r, 0.0);
    pb.line_to(w - r, 0.0);
    pb.cubic_to(w - r + k, 0.0, w, r - k, w, r);
    pb.line_to(w, h - r);
    pb.cubic_to(w, h - r + k, w - r + k, h, w - r, h);
    pb.line_to(r, h);
    pb.cubic_to(r - k, h, 0.0, h - r + k, 0.0, h - r);
    pb.line_to(0.0, r);
    pb.cubic_to(0.0, r - k, r - k, 0.0, r, 0.0);
    pb.close();
    pb.finish()
}
