//! Map poster composer
//!
//! Text and icon overlays are laid out over a print viewport that mirrors
//! the chosen output size, then rendered off-screen to a print-resolution
//! PNG.

pub mod capture;
pub mod config;
pub mod domain;
pub mod drag;
pub mod editor;
pub mod fonts;
pub mod layers;
pub mod render;
pub mod session;
