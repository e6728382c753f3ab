//! Pure domain types with minimal dependencies
//!
//! This module contains the overlay, viewport and catalog types used
//! throughout the crate. Nothing here touches rendering or I/O.

pub mod catalog;
pub mod geometry;
pub mod overlay;

pub use catalog::*;
pub use geometry::*;
pub use overlay::*;
