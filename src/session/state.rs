//! Editor session state
//!
//! A session owns everything one poster needs while it is being composed:
//! the overlay model, the drag controller, the open style editor and the
//! viewport geometry derived from the container and selected output size.

use std::sync::Arc;

use crate::config::PosterConfig;
use crate::domain::{
    MapStyle, OutputSize, Overlay, OverlayContent, OverlayId, OverlayStyle, Point, PrintViewport,
    Size,
};
use crate::drag::DragController;
use crate::editor::{EditorField, StyleEditor};
use crate::layers::OverlayModel;
use crate::render::{Basemap, Chrome, Scene};

#[derive(Clone, Debug)]
pub struct PosterSession {
    config: PosterConfig,
    model: OverlayModel,
    drag: DragController,
    editor: Option<StyleEditor>,
    output_size: OutputSize,
    map_style: MapStyle,
    container_origin: Point,
    container: Size,
    viewport: PrintViewport,
    capturing: bool,
}

impl PosterSession {
    pub fn new(config: PosterConfig) -> Self {
        let output_size = OutputSize::find(&config.output_size)
            .copied()
            .unwrap_or_else(|| {
                log::warn!("Unknown output size {:?}, using default", config.output_size);
                OutputSize::default()
            });
        let map_style = MapStyle::find(&config.map_style)
            .copied()
            .unwrap_or_else(|| {
                log::warn!("Unknown map style {:?}, using default", config.map_style);
                MapStyle::default()
            });
        let drag = DragController::new(config.snap_threshold);

        Self {
            config,
            model: OverlayModel::new(),
            drag,
            editor: None,
            output_size,
            map_style,
            container_origin: Point::default(),
            container: Size::default(),
            viewport: PrintViewport::default(),
            capturing: false,
        }
    }

    pub fn config(&self) -> &PosterConfig {
        &self.config
    }

    pub fn model(&self) -> &OverlayModel {
        &self.model
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    pub fn editor(&self) -> Option<&StyleEditor> {
        self.editor.as_ref()
    }

    pub fn output_size(&self) -> &OutputSize {
        &self.output_size
    }

    pub fn map_style(&self) -> &MapStyle {
        &self.map_style
    }

    pub fn viewport(&self) -> &PrintViewport {
        &self.viewport
    }

    pub fn is_capturing(&self) -> bool {
        self.capturing
    }

    pub(crate) fn set_capturing(&mut self, capturing: bool) {
        self.capturing = capturing;
    }

    // ------------------------------------------------------------------------
    // Viewport
    // ------------------------------------------------------------------------

    pub fn set_output_size(&mut self, size: OutputSize) {
        log::info!("Output size set to {}", size.name);
        self.output_size = size;
        self.refit();
    }

    pub fn set_map_style(&mut self, style: MapStyle) {
        log::info!("Map style set to {}", style.name);
        self.map_style = style;
    }

    /// The container the viewport is fitted into changed position or size
    pub fn resize_container(&mut self, origin: Point, size: Size) {
        self.container_origin = origin;
        self.container = size;
        self.refit();
    }

    fn refit(&mut self) {
        let previous = self.viewport.size;
        self.viewport = PrintViewport::fit(
            self.container_origin,
            self.container,
            self.output_size.aspect_ratio(),
        );
        log::debug!(
            "Viewport fitted to {}x{} at ({}, {})",
            self.viewport.width(),
            self.viewport.height(),
            self.viewport.origin.x,
            self.viewport.origin.y
        );
        if self.config.renormalize_on_resize && previous != self.viewport.size {
            self.model.rescale(previous, &self.viewport);
        }
    }

    // ------------------------------------------------------------------------
    // Layers
    // ------------------------------------------------------------------------

    /// Add a text overlay with default style and open the editor on it
    pub fn add_text(&mut self, text: impl Into<String>) -> OverlayId {
        let id = self.model.add(
            OverlayContent::Text(text.into()),
            OverlayStyle::text_default(),
            self.viewport.size,
        );
        self.open_editor_for(&id, true);
        id
    }

    /// Add an icon overlay at the center and let it follow the pointer
    pub fn add_icon(&mut self, path: impl Into<String>) -> OverlayId {
        let id = self.model.add(
            OverlayContent::Icon(path.into()),
            OverlayStyle::icon_default(),
            self.viewport.size,
        );
        self.drag.begin_placement(id.clone());
        id
    }

    /// Add an overlay without opening the editor or starting placement
    pub fn add_overlay(
        &mut self,
        content: OverlayContent,
        style: OverlayStyle,
        position: Option<Point>,
    ) -> OverlayId {
        let id = self.model.add(content, style, self.viewport.size);
        if let Some(position) = position {
            self.model.set_position(&id, position);
        }
        id
    }

    pub fn remove(&mut self, id: &OverlayId) {
        self.model.remove(id);
        self.forget(id);
    }

    pub fn remove_last(&mut self) -> Option<Overlay> {
        let removed = self.model.remove_last()?;
        self.forget(&removed.id);
        Some(removed)
    }

    /// Drop editor and drag state pointing at a deleted overlay
    fn forget(&mut self, id: &OverlayId) {
        if self.editor.as_ref().is_some_and(|e| e.target() == id) {
            self.editor = None;
        }
        if self.drag.dragging_id() == Some(id) {
            self.drag.pointer_up();
        }
    }

    // ------------------------------------------------------------------------
    // Style editor
    // ------------------------------------------------------------------------

    pub fn open_editor(&mut self, id: &OverlayId) -> bool {
        self.open_editor_for(id, false)
    }

    fn open_editor_for(&mut self, id: &OverlayId, is_new: bool) -> bool {
        let Some(overlay) = self.model.get(id) else {
            return false;
        };
        self.editor = Some(
            StyleEditor::open(overlay, is_new)
                .with_rotation_tolerance(self.config.rotation_snap_tolerance),
        );
        true
    }

    pub fn close_editor(&mut self) -> Option<StyleEditor> {
        self.editor.take()
    }

    /// Apply one field change through the open editor
    pub fn edit(&mut self, field: EditorField) -> bool {
        match self.editor.as_mut() {
            Some(editor) => editor.edit(field, &mut self.model),
            None => false,
        }
    }

    // ------------------------------------------------------------------------
    // Pointer input (window coordinates)
    // ------------------------------------------------------------------------

    /// Returns true if the pointer landed on an overlay
    pub fn pointer_down(&mut self, window: Point) -> bool {
        let local = self.viewport.to_local(window);
        let Some(overlay) = self.model.hit_test(local, &self.viewport) else {
            return false;
        };
        self.drag.pointer_down(overlay, local);
        true
    }

    /// Returns true if an overlay moved
    pub fn pointer_move(&mut self, window: Point) -> bool {
        let local = self.viewport.to_local(window);
        let Some(step) = self
            .drag
            .pointer_move(local, &self.model, self.viewport.size)
        else {
            return false;
        };
        self.model.set_position(&step.id, step.position);
        true
    }

    pub fn pointer_up(&mut self) -> Option<OverlayId> {
        self.drag.pointer_up()
    }

    /// Whether a context-menu request at `window` should be suppressed
    pub fn context_menu(&self, window: Point) -> bool {
        let local = self.viewport.to_local(window);
        let over_overlay = self.model.hit_test(local, &self.viewport).is_some();
        self.drag.suppress_context_menu(over_overlay)
    }

    // ------------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------------

    /// Chrome for the on-screen preview; none while capturing
    pub fn chrome(&self) -> Option<Chrome> {
        (!self.capturing).then(|| Chrome {
            guides: self.drag.guides(),
            rounded_corners: true,
        })
    }

    /// Owned copy of the composition, detached from further edits
    pub fn snapshot(&self, basemap: Arc<Basemap>) -> Scene {
        Scene {
            overlays: self.model.overlays().to_vec(),
            viewport: self.viewport,
            basemap,
        }
    }
}

impl Default for PosterSession {
    fn default() -> Self {
        Self::new(PosterConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OUTPUT_SIZES;

    fn session() -> PosterSession {
        let mut session = PosterSession::default();
        session.resize_container(Point::new(100.0, 50.0), Size::new(1000.0, 500.0));
        session
    }

    #[test]
    fn test_defaults_come_from_config() {
        let session = PosterSession::default();
        assert_eq!(session.output_size().name, "18x24\"");
        assert_eq!(session.map_style().name, "Positron");
        assert!(!session.is_capturing());
    }

    #[test]
    fn test_unknown_config_names_fall_back() {
        let config = PosterConfig {
            output_size: "3x3".into(),
            map_style: "Nope".into(),
            ..PosterConfig::default()
        };
        let session = PosterSession::new(config);
        assert_eq!(*session.output_size(), OutputSize::default());
        assert_eq!(*session.map_style(), MapStyle::default());
    }

    #[test]
    fn test_container_resize_refits_viewport() {
        let session = session();
        assert!((session.viewport().height() - 450.0).abs() < 1e-3);
        assert!((session.viewport().width() - 337.5).abs() < 1e-3);
    }

    #[test]
    fn test_output_size_change_refits_viewport() {
        let mut session = session();
        session.set_output_size(OUTPUT_SIZES[0]);
        // 8x10 in a 1000x500 container is still height-limited
        assert!((session.viewport().height() - 450.0).abs() < 1e-3);
        assert!((session.viewport().width() - 360.0).abs() < 1e-3);
    }

    #[test]
    fn test_resize_keeps_positions_by_default() {
        let mut session = session();
        let id = session.add_overlay(
            OverlayContent::Icon("M0 0H24V24H0Z".into()),
            OverlayStyle::icon_default(),
            Some(Point::new(30.0, 40.0)),
        );
        session.resize_container(Point::default(), Size::new(2000.0, 1000.0));
        assert_eq!(session.model().get(&id).unwrap().position, Point::new(30.0, 40.0));
    }

    #[test]
    fn test_resize_renormalizes_when_enabled() {
        let config = PosterConfig {
            renormalize_on_resize: true,
            ..PosterConfig::default()
        };
        let mut session = PosterSession::new(config);
        session.resize_container(Point::default(), Size::new(1000.0, 500.0));
        let id = session.add_overlay(
            OverlayContent::Icon("M0 0H24V24H0Z".into()),
            OverlayStyle::icon_default(),
            Some(Point::new(30.0, 40.0)),
        );
        session.resize_container(Point::default(), Size::new(2000.0, 1000.0));
        let position = session.model().get(&id).unwrap().position;
        assert!((position.x - 60.0).abs() < 1e-3);
        assert!((position.y - 80.0).abs() < 1e-3);
    }

    #[test]
    fn test_add_text_opens_editor_as_new() {
        let mut session = session();
        let id = session.add_text("Paris");
        let editor = session.editor().unwrap();
        assert_eq!(editor.target(), &id);
        assert!(editor.is_new());
        assert!(!session.drag().is_dragging());
    }

    #[test]
    fn test_add_icon_starts_placement() {
        let mut session = session();
        let id = session.add_icon("M0 0H24V24H0Z");
        assert_eq!(session.drag().dragging_id(), Some(&id));
        assert!(session.editor().is_none());

        // Placement follows the pointer with no offset
        let origin = session.viewport().origin;
        assert!(session.pointer_move(Point::new(origin.x + 15.0, origin.y + 25.0)));
        assert_eq!(
            session.model().get(&id).unwrap().position,
            Point::new(15.0, 25.0)
        );
        assert_eq!(session.pointer_up(), Some(id));
    }

    #[test]
    fn test_drag_uses_window_coordinates() {
        let mut session = session();
        let id = session.add_overlay(
            OverlayContent::Icon("M0 0H24V24H0Z".into()),
            OverlayStyle::icon_default(),
            Some(Point::new(100.0, 100.0)),
        );
        let origin = session.viewport().origin;

        // Grab 5px right of the icon center
        assert!(session.pointer_down(Point::new(origin.x + 105.0, origin.y + 100.0)));
        assert!(session.pointer_move(Point::new(origin.x + 155.0, origin.y + 130.0)));
        assert_eq!(
            session.model().get(&id).unwrap().position,
            Point::new(150.0, 130.0)
        );
        session.pointer_up();
        assert!(!session.drag().is_dragging());
    }

    #[test]
    fn test_pointer_down_on_empty_space() {
        let mut session = session();
        assert!(!session.pointer_down(Point::new(0.0, 0.0)));
        assert!(!session.drag().is_dragging());
    }

    #[test]
    fn test_remove_closes_editor_and_drag() {
        let mut session = session();
        let id = session.add_text("Paris");
        session.remove(&id);
        assert!(session.editor().is_none());
        assert!(session.model().is_empty());

        let icon = session.add_icon("M0 0H24V24H0Z");
        assert_eq!(session.remove_last().map(|o| o.id), Some(icon));
        assert!(!session.drag().is_dragging());
        assert!(session.remove_last().is_none());
    }

    #[test]
    fn test_edit_without_editor_is_ignored() {
        let mut session = session();
        assert!(!session.edit(EditorField::Rotation(10.0)));
    }

    #[test]
    fn test_edit_goes_live() {
        let mut session = session();
        let id = session.add_text("Paris");
        assert!(session.edit(EditorField::Text("Lyon".into())));
        assert_eq!(session.model().get(&id).unwrap().content(), "Lyon");
    }

    #[test]
    fn test_chrome_hidden_while_capturing() {
        let mut session = session();
        assert!(session.chrome().is_some_and(|c| c.rounded_corners));
        session.set_capturing(true);
        assert!(session.chrome().is_none());
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut session = session();
        session.add_text("Paris");
        let scene = session.snapshot(Arc::new(Basemap::default()));
        session.remove_last();
        assert_eq!(scene.overlays.len(), 1);
        assert_eq!(scene.viewport, *session.viewport());
    }
}
