//! Message types for a poster editing session
//!
//! This module contains the Msg enum with nested sub-enums, one per input
//! surface, so handlers can be organized the same way.

use crate::domain::{OverlayId, Point, Size};
use crate::editor::EditorField;

// ============================================================================
// Layer Types
// ============================================================================

/// Adding, removing and selecting overlays
#[derive(Debug, Clone)]
pub enum LayerMsg {
    /// Add a text overlay and open the editor on it
    AddText(String),
    /// Add an icon from the catalog (by key) or raw path data
    AddIcon(String),
    /// Delete an overlay
    Remove(OverlayId),
    /// Delete the most recently added overlay
    RemoveLast,
    /// Open the style editor for an overlay
    Edit(OverlayId),
    /// Close the style editor
    CloseEditor,
}

// ============================================================================
// Pointer Types
// ============================================================================

/// Pointer input in window coordinates
#[derive(Debug, Clone)]
pub enum PointerMsg {
    Down(f32, f32),
    Move(f32, f32),
    Up,
    /// Secondary-button context menu request
    ContextMenu(f32, f32),
}

// ============================================================================
// View Types
// ============================================================================

/// Viewport geometry and catalog selections
#[derive(Debug, Clone)]
pub enum ViewMsg {
    /// The viewport container moved or was resized
    Resize { origin: Point, size: Size },
    /// Select an output size by name
    OutputSize(String),
    /// Select a map style by name
    MapStyle(String),
}

// ============================================================================
// Main Message Enum
// ============================================================================

#[derive(Debug, Clone)]
pub enum Msg {
    Layer(LayerMsg),
    Pointer(PointerMsg),
    /// Change one field in the open style editor
    Edit(EditorField),
    View(ViewMsg),
}

impl Msg {
    pub fn pointer_down(x: f32, y: f32) -> Self {
        Msg::Pointer(PointerMsg::Down(x, y))
    }

    pub fn pointer_move(x: f32, y: f32) -> Self {
        Msg::Pointer(PointerMsg::Move(x, y))
    }

    pub fn pointer_up() -> Self {
        Msg::Pointer(PointerMsg::Up)
    }
}
