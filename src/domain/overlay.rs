//! Overlay types drawn on top of the map
//!
//! All overlay positions are print-viewport local pixels.

use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

use serde::{Deserialize, Serialize};

use super::geometry::Point;
use crate::config::OverlayColor;

/// Default nominal font size for new text
pub const DEFAULT_TEXT_SIZE: f32 = 100.0;
/// Default pixel size for new icons
pub const DEFAULT_ICON_SIZE: f32 = 48.0;
/// Default family for new text
pub const DEFAULT_FONT_FAMILY: &str = "Roboto";

/// Font size slider bounds
pub const TEXT_SIZE_RANGE: (f32, f32) = (0.0, 200.0);
/// Icon size slider bounds
pub const ICON_SIZE_RANGE: (f32, f32) = (16.0, 96.0);

/// Opaque, time-based overlay identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OverlayId(String);

impl OverlayId {
    /// Mint a new id from the current time in milliseconds.
    ///
    /// Ids minted within the same millisecond are bumped so no two are equal.
    pub fn generate() -> Self {
        static LAST: AtomicI64 = AtomicI64::new(0);
        let now = chrono::Utc::now().timestamp_millis();
        let mut prev = LAST.load(Ordering::Relaxed);
        loop {
            let next = now.max(prev + 1);
            match LAST.compare_exchange_weak(prev, next, Ordering::Relaxed, Ordering::Relaxed) {
                Ok(_) => return Self(next.to_string()),
                Err(actual) => prev = actual,
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for OverlayId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for OverlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Kind-specific payload of an overlay
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum OverlayKind {
    Text { text: String, font_family: String },
    /// Vector path data in a 24x24 box
    Icon { path: String },
}

/// Content for a new overlay
#[derive(Clone, Debug, PartialEq)]
pub enum OverlayContent {
    Text(String),
    Icon(String),
}

/// Visual attributes shared by the add and update operations
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OverlayStyle {
    /// Font size for text, pixel size for icons
    pub size: f32,
    pub color: OverlayColor,
    pub rotation: f32,
    /// Ignored for icons
    pub font_family: String,
}

impl OverlayStyle {
    pub fn text_default() -> Self {
        Self {
            size: DEFAULT_TEXT_SIZE,
            color: OverlayColor::BLACK,
            rotation: 0.0,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
        }
    }

    pub fn icon_default() -> Self {
        Self {
            size: DEFAULT_ICON_SIZE,
            color: OverlayColor::ICON_BLUE,
            rotation: 0.0,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
        }
    }
}

/// A positioned text or icon layer
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Overlay {
    pub id: OverlayId,
    #[serde(flatten)]
    pub kind: OverlayKind,
    pub position: Point,
    pub size: f32,
    pub color: OverlayColor,
    #[serde(default)]
    pub rotation: f32,
}

impl Overlay {
    pub fn new(id: OverlayId, content: OverlayContent, style: OverlayStyle, position: Point) -> Self {
        let kind = match content {
            OverlayContent::Text(text) => OverlayKind::Text {
                text,
                font_family: style.font_family,
            },
            OverlayContent::Icon(path) => OverlayKind::Icon { path },
        };
        Self {
            id,
            kind,
            position,
            size: style.size,
            color: style.color,
            rotation: style.rotation,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, OverlayKind::Text { .. })
    }

    pub fn is_icon(&self) -> bool {
        matches!(self.kind, OverlayKind::Icon { .. })
    }

    /// Text for text overlays, path data for icons
    pub fn content(&self) -> &str {
        match &self.kind {
            OverlayKind::Text { text, .. } => text,
            OverlayKind::Icon { path } => path,
        }
    }

    pub fn font_family(&self) -> Option<&str> {
        match &self.kind {
            OverlayKind::Text { font_family, .. } => Some(font_family),
            OverlayKind::Icon { .. } => None,
        }
    }

    /// Current style, with the default family filled in for icons
    pub fn style(&self) -> OverlayStyle {
        OverlayStyle {
            size: self.size,
            color: self.color,
            rotation: self.rotation,
            font_family: self
                .font_family()
                .unwrap_or(DEFAULT_FONT_FAMILY)
                .to_string(),
        }
    }

    /// Replace content and style in place, keeping the kind
    pub fn apply(&mut self, content: &str, style: &OverlayStyle) {
        match &mut self.kind {
            OverlayKind::Text { text, font_family } => {
                text.clear();
                text.push_str(content);
                font_family.clone_from(&style.font_family);
            }
            OverlayKind::Icon { path } => {
                path.clear();
                path.push_str(content);
            }
        }
        self.size = style.size;
        self.color = style.color;
        self.rotation = style.rotation;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        let ids: Vec<OverlayId> = (0..64).map(|_| OverlayId::generate()).collect();
        for (i, a) in ids.iter().enumerate() {
            for b in &ids[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_apply_writes_content_by_kind() {
        let mut icon = Overlay::new(
            OverlayId::from("1"),
            OverlayContent::Icon("M0 0L1 1".into()),
            OverlayStyle::icon_default(),
            Point::default(),
        );
        let mut style = OverlayStyle::icon_default();
        style.font_family = "Lato".into();
        icon.apply("M2 2L3 3", &style);
        assert_eq!(icon.content(), "M2 2L3 3");
        assert_eq!(icon.font_family(), None);

        let mut text = Overlay::new(
            OverlayId::from("2"),
            OverlayContent::Text("hello".into()),
            OverlayStyle::text_default(),
            Point::default(),
        );
        text.apply("world", &style);
        assert_eq!(text.content(), "world");
        assert_eq!(text.font_family(), Some("Lato"));
        assert_eq!(text.size, DEFAULT_ICON_SIZE);
    }

    #[test]
    fn test_overlay_json_shape() {
        let json = r##"{
            "id": "42",
            "kind": "text",
            "text": "Home",
            "font_family": "Lato",
            "position": {"x": 10.0, "y": 20.0},
            "size": 24.0,
            "color": "#ff0000"
        }"##;
        let overlay: Overlay = serde_json::from_str(json).unwrap();
        assert_eq!(overlay.id.as_str(), "42");
        assert_eq!(overlay.content(), "Home");
        assert_eq!(overlay.rotation, 0.0);
        assert_eq!(overlay.color, OverlayColor { r: 255, g: 0, b: 0 });
    }
}
