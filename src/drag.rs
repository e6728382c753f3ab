//! Pointer drag session for repositioning overlays
//!
//! One controller exists per editor session. At most one overlay is dragged
//! at a time; a pointer-down that arrives while a drag is active is ignored.

use crate::domain::{Overlay, OverlayId, Point, Size};
use crate::layers::OverlayModel;
use crate::layers::snap::{self, CENTER_SNAP_THRESHOLD};

/// Drag state machine: `Idle -> Dragging -> Idle`
#[derive(Clone, Debug, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        id: OverlayId,
        /// Pointer position minus overlay position at pointer-down
        offset: Point,
    },
}

/// Visibility of the center alignment guides
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CenterGuides {
    /// Line through the horizontal center (x snapped)
    pub vertical: bool,
    /// Line through the vertical center (y snapped)
    pub horizontal: bool,
}

impl CenterGuides {
    pub fn any(&self) -> bool {
        self.vertical || self.horizontal
    }
}

/// New position for the dragged overlay
#[derive(Clone, Debug, PartialEq)]
pub struct DragMove {
    pub id: OverlayId,
    pub position: Point,
}

#[derive(Clone, Debug)]
pub struct DragController {
    state: DragState,
    guides: CenterGuides,
    snap_threshold: f32,
}

impl Default for DragController {
    fn default() -> Self {
        Self::new(CENTER_SNAP_THRESHOLD)
    }
}

impl DragController {
    pub fn new(snap_threshold: f32) -> Self {
        Self {
            state: DragState::Idle,
            guides: CenterGuides::default(),
            snap_threshold,
        }
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn dragging_id(&self) -> Option<&OverlayId> {
        match &self.state {
            DragState::Dragging { id, .. } => Some(id),
            DragState::Idle => None,
        }
    }

    pub fn guides(&self) -> CenterGuides {
        self.guides
    }

    /// Start dragging `overlay` from a viewport-local pointer position.
    ///
    /// Returns false, leaving the active session untouched, if a drag is in progress.
    pub fn pointer_down(&mut self, overlay: &Overlay, pointer: Point) -> bool {
        if let DragState::Dragging { id, .. } = &self.state {
            log::debug!("Ignoring pointer-down on {} while dragging {}", overlay.id, id);
            return false;
        }
        self.state = DragState::Dragging {
            id: overlay.id.clone(),
            offset: pointer.offset_from(overlay.position),
        };
        true
    }

    /// Make a freshly placed overlay follow the pointer until the next pointer-up
    pub fn begin_placement(&mut self, id: OverlayId) -> bool {
        if self.is_dragging() {
            return false;
        }
        self.state = DragState::Dragging {
            id,
            offset: Point::default(),
        };
        true
    }

    /// Compute the dragged overlay's new position for a viewport-local pointer.
    ///
    /// Text snaps to the viewport center lines; icons never snap. A drag whose
    /// overlay has been deleted ends here.
    pub fn pointer_move(
        &mut self,
        pointer: Point,
        model: &OverlayModel,
        viewport: Size,
    ) -> Option<DragMove> {
        let DragState::Dragging { id, offset } = &self.state else {
            return None;
        };
        let Some(overlay) = model.get(id) else {
            log::debug!("Dragged overlay {id} no longer exists");
            self.pointer_up();
            return None;
        };

        let mut position = pointer.offset_from(*offset);
        if overlay.is_text() {
            let center = viewport.center();
            let (x, snapped_x) = snap::snap_to_center(position.x, center.x, self.snap_threshold);
            let (y, snapped_y) = snap::snap_to_center(position.y, center.y, self.snap_threshold);
            position = Point::new(x, y);
            self.guides = CenterGuides {
                vertical: snapped_x,
                horizontal: snapped_y,
            };
        }

        Some(DragMove {
            id: id.clone(),
            position,
        })
    }

    /// End the drag and hide both guides
    pub fn pointer_up(&mut self) -> Option<OverlayId> {
        self.guides = CenterGuides::default();
        match std::mem::take(&mut self.state) {
            DragState::Dragging { id, .. } => Some(id),
            DragState::Idle => None,
        }
    }

    /// Whether a context-menu request should be swallowed
    pub fn suppress_context_menu(&self, over_overlay: bool) -> bool {
        over_overlay || self.is_dragging()
    }
}
