//! Overlay layer model and snapping rules
//!
//! This module provides:
//! - The overlay list with add/update/remove (model.rs)
//! - Center and rotation snapping shared by drag and the editor (snap.rs)

pub mod model;
pub mod snap;

pub use model::OverlayModel;
