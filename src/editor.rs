//! Style editor for the active overlay
//!
//! Every field change is written straight through to the overlay model so
//! the composition always shows the latest value; there is no commit step.

use crate::config::OverlayColor;
use crate::domain::{ICON_SIZE_RANGE, Overlay, OverlayId, OverlayStyle, TEXT_SIZE_RANGE};
use crate::layers::OverlayModel;
use crate::layers::snap::{self, ROTATION_SNAP_TOLERANCE};

/// Fields the editor can show
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    FontFamily,
    FontSize,
    IconSize,
    Color,
    Rotation,
}

const TEXT_FIELDS: &[FieldKind] = &[
    FieldKind::Text,
    FieldKind::FontFamily,
    FieldKind::FontSize,
    FieldKind::Color,
    FieldKind::Rotation,
];

const ICON_FIELDS: &[FieldKind] = &[FieldKind::IconSize, FieldKind::Color, FieldKind::Rotation];

/// A single field edit
#[derive(Clone, Debug, PartialEq)]
pub enum EditorField {
    Text(String),
    FontFamily(String),
    FontSize(f32),
    IconSize(f32),
    /// Hex color as typed
    Color(String),
    Rotation(f32),
}

impl EditorField {
    fn kind(&self) -> FieldKind {
        match self {
            EditorField::Text(_) => FieldKind::Text,
            EditorField::FontFamily(_) => FieldKind::FontFamily,
            EditorField::FontSize(_) => FieldKind::FontSize,
            EditorField::IconSize(_) => FieldKind::IconSize,
            EditorField::Color(_) => FieldKind::Color,
            EditorField::Rotation(_) => FieldKind::Rotation,
        }
    }
}

/// Popup editing one overlay's content and style
#[derive(Clone, Debug)]
pub struct StyleEditor {
    target: OverlayId,
    is_icon: bool,
    is_new: bool,
    content: String,
    style: OverlayStyle,
    rotation_tolerance: f32,
}

impl StyleEditor {
    pub fn open(overlay: &Overlay, is_new: bool) -> Self {
        Self {
            target: overlay.id.clone(),
            is_icon: overlay.is_icon(),
            is_new,
            content: overlay.content().to_string(),
            style: overlay.style(),
            rotation_tolerance: ROTATION_SNAP_TOLERANCE,
        }
    }

    pub fn with_rotation_tolerance(mut self, tolerance: f32) -> Self {
        self.rotation_tolerance = tolerance;
        self
    }

    pub fn target(&self) -> &OverlayId {
        &self.target
    }

    pub fn is_new(&self) -> bool {
        self.is_new
    }

    pub fn title(&self) -> &'static str {
        match (self.is_new, self.is_icon) {
            (true, true) => "Add New Icon",
            (true, false) => "Add New Text",
            (false, _) => "Edit Layer",
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn style(&self) -> &OverlayStyle {
        &self.style
    }

    pub fn visible_fields(&self) -> &'static [FieldKind] {
        if self.is_icon { ICON_FIELDS } else { TEXT_FIELDS }
    }

    /// Apply one field edit and push the result into the model.
    ///
    /// Returns false when the field is hidden for this overlay kind or the
    /// value is rejected; the model is left untouched in that case.
    pub fn edit(&mut self, field: EditorField, model: &mut OverlayModel) -> bool {
        if !self.visible_fields().contains(&field.kind()) {
            log::debug!("Ignoring {:?} for overlay {}", field.kind(), self.target);
            return false;
        }
        match field {
            EditorField::Text(text) => self.content = text,
            EditorField::FontFamily(family) => self.style.font_family = family,
            EditorField::FontSize(size) => {
                self.style.size = size.clamp(TEXT_SIZE_RANGE.0, TEXT_SIZE_RANGE.1)
            }
            EditorField::IconSize(size) => {
                self.style.size = size.clamp(ICON_SIZE_RANGE.0, ICON_SIZE_RANGE.1)
            }
            EditorField::Color(hex) => match hex.parse::<OverlayColor>() {
                Ok(color) => self.style.color = color,
                Err(err) => {
                    log::debug!("Rejected color: {err}");
                    return false;
                }
            },
            EditorField::Rotation(degrees) => {
                self.style.rotation = snap::snap_rotation(degrees, self.rotation_tolerance)
            }
        }
        model.update(&self.target, &self.content, &self.style);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{OverlayContent, Size};

    const VIEWPORT: Size = Size::new(400.0, 500.0);

    #[test]
    fn test_every_edit_updates_model() {
        let mut model = OverlayModel::new();
        let id = model.add(
            OverlayContent::Text("a".into()),
            OverlayStyle::text_default(),
            VIEWPORT,
        );
        let mut editor = StyleEditor::open(model.get(&id).unwrap(), true);
        assert_eq!(editor.title(), "Add New Text");

        assert!(editor.edit(EditorField::Text("ab".into()), &mut model));
        assert_eq!(model.get(&id).unwrap().content(), "ab");

        assert!(editor.edit(EditorField::Color("#ff0000".into()), &mut model));
        assert_eq!(
            model.get(&id).unwrap().color,
            OverlayColor { r: 255, g: 0, b: 0 }
        );

        assert!(editor.edit(EditorField::FontFamily("Lato".into()), &mut model));
        assert_eq!(model.get(&id).unwrap().font_family(), Some("Lato"));
    }

    #[test]
    fn test_rotation_snaps() {
        let mut model = OverlayModel::new();
        let id = model.add(
            OverlayContent::Text("a".into()),
            OverlayStyle::text_default(),
            VIEWPORT,
        );
        let mut editor = StyleEditor::open(model.get(&id).unwrap(), false);
        editor.edit(EditorField::Rotation(92.0), &mut model);
        assert_eq!(model.get(&id).unwrap().rotation, 90.0);
        editor.edit(EditorField::Rotation(80.0), &mut model);
        assert_eq!(model.get(&id).unwrap().rotation, 80.0);
    }

    #[test]
    fn test_icon_hides_text_fields() {
        let mut model = OverlayModel::new();
        let id = model.add(
            OverlayContent::Icon("M0 0".into()),
            OverlayStyle::icon_default(),
            VIEWPORT,
        );
        let mut editor = StyleEditor::open(model.get(&id).unwrap(), true);
        assert!(!editor.visible_fields().contains(&FieldKind::FontSize));
        assert!(!editor.edit(EditorField::FontSize(12.0), &mut model));
        assert!(!editor.edit(EditorField::FontFamily("Lato".into()), &mut model));

        assert!(editor.edit(EditorField::IconSize(500.0), &mut model));
        let icon = model.get(&id).unwrap();
        assert_eq!(icon.size, ICON_SIZE_RANGE.1);
        assert_eq!(icon.content(), "M0 0");
    }

    #[test]
    fn test_invalid_color_is_rejected() {
        let mut model = OverlayModel::new();
        let id = model.add(
            OverlayContent::Text("a".into()),
            OverlayStyle::text_default(),
            VIEWPORT,
        );
        let mut editor = StyleEditor::open(model.get(&id).unwrap(), false);
        assert!(!editor.edit(EditorField::Color("#zzz".into()), &mut model));
        assert_eq!(model.get(&id).unwrap().color, OverlayColor::BLACK);
    }

    #[test]
    fn test_edit_after_delete_is_silent() {
        let mut model = OverlayModel::new();
        let id = model.add(
            OverlayContent::Text("a".into()),
            OverlayStyle::text_default(),
            VIEWPORT,
        );
        let mut editor = StyleEditor::open(model.get(&id).unwrap(), false);
        model.remove(&id);
        assert!(editor.edit(EditorField::Text("b".into()), &mut model));
        assert!(model.is_empty());
    }
}
