//! Authoritative list of overlays
//!
//! Lookups by unknown id are silent no-ops: callers may race a delete
//! against a pending edit and neither side treats that as an error.

use crate::domain::{
    Overlay, OverlayContent, OverlayId, OverlayKind, OverlayStyle, Point, PrintViewport, Size,
};

/// Vertical placement of new text, as a fraction of viewport height
pub const TEXT_DEFAULT_Y: f32 = 0.8;

/// Average glyph advance relative to font size, used for hit testing
const ESTIMATED_ADVANCE: f32 = 0.6;

#[derive(Clone, Debug, Default)]
pub struct OverlayModel {
    overlays: Vec<Overlay>,
}

impl OverlayModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn overlays(&self) -> &[Overlay] {
        &self.overlays
    }

    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }

    pub fn get(&self, id: &OverlayId) -> Option<&Overlay> {
        self.overlays.iter().find(|o| &o.id == id)
    }

    /// Append a new overlay at its default placement and return its id.
    ///
    /// Text is centered horizontally, 80% down; icons sit at the exact center.
    pub fn add(&mut self, content: OverlayContent, style: OverlayStyle, viewport: Size) -> OverlayId {
        let position = match content {
            OverlayContent::Text(_) => {
                Point::new(viewport.width / 2.0, viewport.height * TEXT_DEFAULT_Y)
            }
            OverlayContent::Icon(_) => viewport.center(),
        };
        let id = OverlayId::generate();
        log::debug!("Adding overlay {id} at ({}, {})", position.x, position.y);
        self.overlays
            .push(Overlay::new(id.clone(), content, style, position));
        id
    }

    /// Replace content and style of the overlay with `id`
    pub fn update(&mut self, id: &OverlayId, content: &str, style: &OverlayStyle) {
        match self.overlays.iter_mut().find(|o| &o.id == id) {
            Some(overlay) => overlay.apply(content, style),
            None => log::debug!("Ignoring update for unknown overlay {id}"),
        }
    }

    pub fn set_position(&mut self, id: &OverlayId, position: Point) {
        if let Some(overlay) = self.overlays.iter_mut().find(|o| &o.id == id) {
            overlay.position = position;
        }
    }

    pub fn remove(&mut self, id: &OverlayId) {
        self.overlays.retain(|o| &o.id != id);
    }

    /// Remove the most recently added overlay
    pub fn remove_last(&mut self) -> Option<Overlay> {
        self.overlays.pop()
    }

    /// Distinct font families used by text overlays, in first-use order
    pub fn font_families(&self) -> Vec<String> {
        let mut families: Vec<String> = Vec::new();
        for overlay in &self.overlays {
            if let OverlayKind::Text { font_family, .. } = &overlay.kind
                && !families.contains(font_family)
            {
                families.push(font_family.clone());
            }
        }
        families
    }

    /// Top-most overlay whose rendered bounds contain `point` (viewport-local)
    pub fn hit_test(&self, point: Point, viewport: &PrintViewport) -> Option<&Overlay> {
        self.overlays.iter().rev().find(|overlay| {
            let (half_w, half_h) = half_extents(overlay, viewport);
            // Undo the overlay's rotation so the test is axis-aligned
            let local = point.rotate_around(overlay.position, -overlay.rotation);
            (local.x - overlay.position.x).abs() <= half_w
                && (local.y - overlay.position.y).abs() <= half_h
        })
    }

    /// Move every overlay so it keeps its fractional placement in a resized viewport
    pub fn rescale(&mut self, previous: Size, viewport: &PrintViewport) {
        for overlay in &mut self.overlays {
            overlay.position = viewport.rescale_from(previous, overlay.position);
        }
    }
}

/// Approximate on-screen half width and height of an overlay
fn half_extents(overlay: &Overlay, viewport: &PrintViewport) -> (f32, f32) {
    match &overlay.kind {
        OverlayKind::Text { text, .. } => {
            let px = viewport.display_font_size(overlay.size);
            let chars = text.chars().count().max(1) as f32;
            (chars * px * ESTIMATED_ADVANCE / 2.0, px / 2.0)
        }
        OverlayKind::Icon { .. } => (overlay.size / 2.0, overlay.size / 2.0),
    }
}
