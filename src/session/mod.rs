//! Poster session management module
//!
//! This module contains:
//! - Session state (model, drag, editor, viewport)
//! - Message types for session interactions
//! - Message handlers
//! - Scene descriptions for headless rendering

pub mod handlers;
pub mod messages;
pub mod scene;
pub mod state;

pub use handlers::handle_msg;
pub use messages::Msg;
pub use scene::SceneDescription;
pub use state::PosterSession;
